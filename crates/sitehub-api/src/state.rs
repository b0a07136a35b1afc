//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sitehub_auth::{JwtDecoder, JwtEncoder};
use sitehub_cache::CacheManager;
use sitehub_core::config::AppConfig;
use sitehub_core::traits::storage::StorageProvider;
use sitehub_database::store::Stores;
use sitehub_entity::content::{
    Award, Blog, Career, CaseStudy, CompanyInfo, Consultation, Message, News, Partner, Review,
    TeamMember,
};
use sitehub_mail::Mailer;
use sitehub_service::{
    AccountService, ApplicationService, AuthService, ContentService, DashboardService,
    NewsletterService, PasswordResetService, ProposalService,
};

use crate::middleware::rate_limit::RateLimiter;

/// One service per content kind.
#[derive(Debug)]
pub struct ContentServices {
    pub messages: ContentService<Message>,
    pub reviews: ContentService<Review>,
    pub consultations: ContentService<Consultation>,
    pub blogs: ContentService<Blog>,
    pub news: ContentService<News>,
    pub careers: ContentService<Career>,
    pub awards: ContentService<Award>,
    pub case_studies: ContentService<CaseStudy>,
    pub company_info: ContentService<CompanyInfo>,
    pub partners: ContentService<Partner>,
    pub team: ContentService<TeamMember>,
}

impl ContentServices {
    fn new(stores: &Stores) -> Self {
        Self {
            messages: ContentService::new(stores.content.clone()),
            reviews: ContentService::new(stores.content.clone()),
            consultations: ContentService::new(stores.content.clone()),
            blogs: ContentService::new(stores.content.clone()),
            news: ContentService::new(stores.content.clone()),
            careers: ContentService::new(stores.content.clone()),
            awards: ContentService::new(stores.content.clone()),
            case_studies: ContentService::new(stores.content.clone()),
            company_info: ContentService::new(stores.content.clone()),
            partners: ContentService::new(stores.content.clone()),
            team: ContentService::new(stores.content.clone()),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Per-caller request throttle
    pub rate_limiter: RateLimiter,

    // ── Services ─────────────────────────────────────────────
    pub account_service: Arc<AccountService>,
    pub auth_service: Arc<AuthService>,
    pub password_reset_service: Arc<PasswordResetService>,
    pub newsletter_service: Arc<NewsletterService>,
    pub application_service: Arc<ApplicationService>,
    pub proposal_service: Arc<ProposalService>,
    pub dashboard_service: Arc<DashboardService>,
    pub content: Arc<ContentServices>,
}

impl AppState {
    /// Wires every service from the infrastructure handles.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        cache: CacheManager,
        storage: Arc<dyn StorageProvider>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, cache));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&stores.accounts),
            &config.auth,
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.accounts),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
        ));
        let password_reset_service = Arc::new(PasswordResetService::new(
            Arc::clone(&stores.accounts),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            Arc::clone(&mailer),
            &config.auth,
            config.site.frontend_url.clone(),
        ));
        let newsletter_service = Arc::new(NewsletterService::new(
            Arc::clone(&stores.subscribers),
            Arc::clone(&mailer),
        ));
        let application_service = Arc::new(ApplicationService::new(
            Arc::clone(&stores.applications),
            Arc::clone(&stores.content),
            Arc::clone(&storage),
            Arc::clone(&mailer),
            config.mail.noreply_address.clone(),
        ));
        let proposal_service = Arc::new(ProposalService::new(
            Arc::clone(&stores.proposals),
            Arc::clone(&storage),
            Arc::clone(&mailer),
            config.site.company_name.clone(),
        ));
        let content = Arc::new(ContentServices::new(&stores));
        let dashboard_service = Arc::new(DashboardService::new(stores));

        Self {
            rate_limiter: RateLimiter::new(&config.rate_limit),
            config: Arc::new(config),
            jwt_decoder,
            account_service,
            auth_service,
            password_reset_service,
            newsletter_service,
            application_service,
            proposal_service,
            dashboard_service,
            content,
        }
    }
}
