//! Agora Governance - Token-weighted governance over a single-asset
//! treasury.
//!
//! This crate provides:
//! - Share deposits and withdrawals with vote locking
//! - Chairperson-gated proposals with quorum snapshots
//! - For/against voting weighted by live share amounts
//! - Quorum-and-majority resolution with at-most-once execution
//!
//! Every operation enters through [`GovernanceEngine`], applies atomically,
//! and appends an [`Event`] to the journal. Time is an explicit `now`
//! argument (Unix seconds); the engine has no clock of its own.

pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod proposal;
pub mod quorum;
pub mod treasury;

pub use engine::{GovernanceConfig, GovernanceEngine};
pub use error::GovernanceError;
pub use events::Event;
pub use executor::{ExecutionError, InstructionExecutor, NullExecutor};
pub use proposal::{Proposal, ProposalOutcome, ProposalRegistry, Resolution};
pub use treasury::{Share, Treasury};
