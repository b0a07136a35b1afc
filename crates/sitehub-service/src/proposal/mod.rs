//! Proposal requests from prospective clients.

pub mod service;

pub use service::{CreateProposalRequest, ProposalCreated, ProposalService, UpdateProposalRequest};
