//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate gate, ledger, storage and event emission into the
//!   workspace operations consumed by the host's HTTP layer.
//! - Keep transport layers decoupled from storage and locking details.

pub mod external;
pub mod workspace_service;
