//! Proposal request entities and their status lifecycle.

pub mod model;
pub mod status;

pub use model::{NewProposal, ProposalChanges, ProposalRequest, ServiceInterest};
pub use status::{MarkReviewed, ProposalStatus};
