//! Storage layer for draft aggregates.
//!
//! # Responsibility
//! - Define the storage contract the workspace service orchestrates over.
//! - Keep locking details out of service/business code.
//!
//! # Invariants
//! - Draft state lives in process memory only; restart clears everything.
//! - All mutation goes through `modify`, under the store lock.

pub mod draft_repo;
