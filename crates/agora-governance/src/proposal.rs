//! Proposal lifecycle management.
//!
//! A proposal is created open, collects votes while `now` is inside its
//! debating window, and is terminally resolved exactly once after the
//! window elapses. Resolved proposals are never deleted and stay queryable.

use std::collections::HashSet;

use agora_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Terminal outcome of a resolved proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalOutcome {
    /// Combined vote weight fell short of the quorum snapshot
    QuorumNotPassed,
    /// Quorum reached but against-votes met or beat for-votes
    Rejected,
    /// Quorum reached and for-votes strictly ahead; instruction executed
    Accepted,
}

/// A governance proposal.
///
/// `debating_period` and `minimum_quorum` are stamped from the governance
/// parameters at creation and never change afterwards; parameter updates do
/// not retroactively affect open proposals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique proposal ID, sequential from 0
    pub id: u64,
    /// Recipient of the instruction on acceptance
    pub recipient: Address,
    /// Opaque instruction payload
    pub instruction: Vec<u8>,
    /// Human-readable description
    pub description: String,
    /// Creation timestamp (Unix seconds)
    pub created_at: u64,
    /// Debating window length in seconds, snapshot at creation
    pub debating_period: u64,
    /// Minimum combined vote weight, snapshot at creation
    pub minimum_quorum: u128,
    /// For votes (weighted)
    pub votes_for: u128,
    /// Against votes (weighted)
    pub votes_against: u128,
    /// Members who have voted
    pub voters: HashSet<Address>,
    /// Instruction was handed to the executor
    pub executed: bool,
    /// Proposal is terminally resolved
    pub finished: bool,
}

impl Proposal {
    /// First instant at which voting is closed and finishing is allowed.
    pub fn deadline(&self) -> u64 {
        self.created_at.saturating_add(self.debating_period)
    }

    /// Check if the debating window is still open at `now`.
    pub fn is_open(&self, now: u64) -> bool {
        now < self.deadline()
    }

    /// Check if a member has voted.
    pub fn has_voted(&self, member: &Address) -> bool {
        self.voters.contains(member)
    }

    /// Combined vote weight cast so far.
    pub fn total_votes(&self) -> u128 {
        self.votes_for.saturating_add(self.votes_against)
    }

    fn cast_vote(
        &mut self,
        member: Address,
        in_favor: bool,
        weight: u128,
        now: u64,
    ) -> Result<(), GovernanceError> {
        if !self.is_open(now) {
            return Err(GovernanceError::VotePeriodOver);
        }
        if self.voters.contains(&member) {
            return Err(GovernanceError::AlreadyVoted);
        }

        if in_favor {
            self.votes_for = self.votes_for.saturating_add(weight);
        } else {
            self.votes_against = self.votes_against.saturating_add(weight);
        }
        self.voters.insert(member);
        Ok(())
    }

    fn outcome(&self) -> ProposalOutcome {
        if self.total_votes() < self.minimum_quorum {
            ProposalOutcome::QuorumNotPassed
        } else if self.votes_against >= self.votes_for {
            ProposalOutcome::Rejected
        } else {
            ProposalOutcome::Accepted
        }
    }
}

/// What a resolved proposal asks the caller to do next.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Terminal outcome
    pub outcome: ProposalOutcome,
    /// Every member who voted; each has one lock to release
    pub voters: Vec<Address>,
    /// Recipient and instruction to execute, `Accepted` only
    pub action: Option<(Address, Vec<u8>)>,
}

/// Registry owning all proposals, indexed densely by id.
#[derive(Debug, Default)]
pub struct ProposalRegistry {
    proposals: Vec<Proposal>,
}

impl ProposalRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new proposal and return its id.
    ///
    /// Validation is the caller's job; the registry records whatever the
    /// engine decided to put up for debate.
    pub fn create(
        &mut self,
        recipient: Address,
        instruction: Vec<u8>,
        description: String,
        debating_period: u64,
        minimum_quorum: u128,
        now: u64,
    ) -> u64 {
        let id = self.proposals.len() as u64;
        self.proposals.push(Proposal {
            id,
            recipient,
            instruction,
            description,
            created_at: now,
            debating_period,
            minimum_quorum,
            votes_for: 0,
            votes_against: 0,
            voters: HashSet::new(),
            executed: false,
            finished: false,
        });
        id
    }

    /// Id the next created proposal will get.
    pub fn next_id(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Get a proposal.
    pub fn get(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(id as usize)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// All proposals in creation order.
    pub fn all(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Record a member's vote with their current share weight.
    pub fn cast_vote(
        &mut self,
        id: u64,
        member: Address,
        in_favor: bool,
        weight: u128,
        now: u64,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        proposal.cast_vote(member, in_favor, weight, now)
    }

    /// Terminally resolve a proposal after its debating window.
    ///
    /// Marks `finished` unconditionally; for `Accepted` also marks
    /// `executed` before returning, so the instruction hand-off happens
    /// against already-committed state and the proposal can never be
    /// resolved twice.
    pub fn resolve(&mut self, id: u64, now: u64) -> Result<Resolution, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(GovernanceError::ProposalNotFound(id))?;

        if proposal.finished {
            return Err(GovernanceError::AlreadyExecuted);
        }
        if proposal.is_open(now) {
            return Err(GovernanceError::DebatingPeriodNotOver);
        }

        let outcome = proposal.outcome();
        proposal.finished = true;

        let action = if outcome == ProposalOutcome::Accepted {
            proposal.executed = true;
            Some((proposal.recipient, proposal.instruction.clone()))
        } else {
            None
        };

        Ok(Resolution {
            outcome,
            voters: proposal.voters.iter().copied().collect(),
            action,
        })
    }
}
