//! Emitted records of governance state changes.
//!
//! The engine appends one event per successful state change, in operation
//! order. Events serialize to JSON so callers can persist the journal as an
//! artifact.

use agora_types::Address;
use serde::{Deserialize, Serialize};

use crate::proposal::ProposalOutcome;

/// Record of a committed governance operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A member moved assets into voting shares
    Deposit { member: Address, amount: u128 },
    /// A member withdrew their entire share amount
    Withdraw { member: Address, amount: u128 },
    /// A proposal was put up for debate
    NewProposal {
        id: u64,
        recipient: Address,
        description: String,
        debating_period: u64,
        minimum_quorum: u128,
    },
    /// A member cast a vote with their live share weight
    Vote {
        proposal: u64,
        member: Address,
        in_favor: bool,
        weight: u128,
    },
    /// A proposal was terminally resolved
    ProposalFinished { proposal: u64, outcome: ProposalOutcome },
}
