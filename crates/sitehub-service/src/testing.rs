//! Shared fixtures for service tests.

use std::sync::Arc;

use tempfile::TempDir;

use sitehub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use sitehub_cache::CacheManager;
use sitehub_cache::memory::MemoryCacheProvider;
use sitehub_core::config::AppConfig;
use sitehub_database::store::Stores;
use sitehub_entity::account::{NewAccount, Role};
use sitehub_entity::content::ContentRecord;
use sitehub_mail::RecordingMailer;
use sitehub_storage::LocalStorage;

use crate::context::RequestContext;
use crate::{
    AccountService, ApplicationService, AuthService, ContentService, DashboardService,
    NewsletterService, PasswordResetService, ProposalService,
};

/// Password of every fixture account.
pub const TEST_PASSWORD: &str = "Str0ng@Pass";

/// Memory-backed stores, a temporary upload root and a recording mailer.
pub struct Harness {
    pub stores: Stores,
    pub cache: CacheManager,
    pub storage: Arc<LocalStorage>,
    pub mailer: RecordingMailer,
    pub config: AppConfig,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    _media: TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let media = TempDir::new().expect("temp dir");
        let storage = LocalStorage::new(media.path()).await.expect("local storage");
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
            &config.cache.memory,
        )));

        Self {
            stores: Stores::memory(),
            encoder: Arc::new(JwtEncoder::new(&config.auth)),
            decoder: Arc::new(JwtDecoder::new(&config.auth, cache.clone())),
            cache,
            storage: Arc::new(storage),
            mailer: RecordingMailer::new(),
            config,
            _media: media,
        }
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.stores.accounts.clone(), &self.config.auth)
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(
            self.stores.accounts.clone(),
            self.encoder.clone(),
            self.decoder.clone(),
        )
    }

    pub fn reset(&self) -> PasswordResetService {
        PasswordResetService::new(
            self.stores.accounts.clone(),
            self.encoder.clone(),
            self.decoder.clone(),
            Arc::new(self.mailer.clone()),
            &self.config.auth,
            self.config.site.frontend_url.clone(),
        )
    }

    pub fn newsletter(&self) -> NewsletterService {
        NewsletterService::new(self.stores.subscribers.clone(), Arc::new(self.mailer.clone()))
    }

    pub fn applications(&self) -> ApplicationService {
        ApplicationService::new(
            self.stores.applications.clone(),
            self.stores.content.clone(),
            self.storage.clone(),
            Arc::new(self.mailer.clone()),
            self.config.mail.noreply_address.clone(),
        )
    }

    pub fn proposals(&self) -> ProposalService {
        ProposalService::new(
            self.stores.proposals.clone(),
            self.storage.clone(),
            Arc::new(self.mailer.clone()),
            self.config.site.company_name.clone(),
        )
    }

    pub fn content<T: ContentRecord>(&self) -> ContentService<T> {
        ContentService::new(self.stores.content.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.stores.clone())
    }

    /// Inserts an account with [`TEST_PASSWORD`] and returns its context.
    pub async fn account(&self, username: &str, role: Role) -> RequestContext {
        let password_hash = PasswordHasher::new()
            .hash_password(TEST_PASSWORD)
            .expect("hash password");
        let account = self
            .stores
            .accounts
            .create(&NewAccount {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash,
                first_name: String::new(),
                last_name: String::new(),
                role,
            })
            .await
            .expect("create account");
        RequestContext::new(account.id, account.role, account.username)
    }

    /// The super admin `root`.
    pub async fn super_admin(&self) -> RequestContext {
        self.account("root", Role::SuperAdmin).await
    }

    pub async fn admin(&self, username: &str) -> RequestContext {
        self.account(username, Role::Admin).await
    }
}
