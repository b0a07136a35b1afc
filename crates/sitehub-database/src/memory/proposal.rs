use async_trait::async_trait;
use chrono::Utc;

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::ProposalId;
use sitehub_entity::proposal::{NewProposal, ProposalChanges, ProposalRequest, ProposalStatus};

use super::MemoryDatabase;
use crate::store::ProposalStore;

/// In-memory proposal request store.
#[derive(Debug, Clone)]
pub struct MemoryProposalStore {
    db: MemoryDatabase,
}

impl MemoryProposalStore {
    /// Create a store over `db`.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProposalStore for MemoryProposalStore {
    async fn create(&self, data: &NewProposal) -> AppResult<ProposalRequest> {
        let mut tables = self.db.lock().await;
        let proposal = ProposalRequest {
            id: ProposalId::new(),
            name: data.name.clone(),
            email: data.email.clone(),
            service_interest: data.service_interest,
            details: data.details.clone(),
            status: ProposalStatus::Pending,
            admin_response: None,
            proposal_document: None,
            created_at: Utc::now(),
        };
        tables.proposals.push(proposal.clone());
        Ok(proposal)
    }

    async fn find_by_id(&self, id: ProposalId) -> AppResult<Option<ProposalRequest>> {
        let tables = self.db.lock().await;
        Ok(tables.proposals.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<ProposalRequest>> {
        let tables = self.db.lock().await;
        Ok(tables.proposals.iter().rev().cloned().collect())
    }

    async fn update(
        &self,
        id: ProposalId,
        changes: &ProposalChanges,
    ) -> AppResult<ProposalRequest> {
        let mut tables = self.db.lock().await;
        let stored = tables
            .proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Proposal request not found"))?;
        changes.apply_to(stored);
        Ok(stored.clone())
    }

    async fn delete(&self, id: ProposalId) -> AppResult<bool> {
        let mut tables = self.db.lock().await;
        let before = tables.proposals.len();
        tables.proposals.retain(|p| p.id != id);
        Ok(tables.proposals.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.db.lock().await.proposals.len() as u64)
    }

    async fn latest(&self) -> AppResult<Option<ProposalRequest>> {
        Ok(self.db.lock().await.proposals.last().cloned())
    }
}
