//! Governance engine: the single entry point for every member-facing
//! operation.
//!
//! The engine owns the configuration, the treasury ledger, the proposal
//! registry, the event journal, and the instruction executor. Operations
//! take `&mut self` and an explicit `now` timestamp, apply atomically, and
//! append one event on success. The executor is only ever invoked after a
//! resolved proposal's flags are committed.

use agora_types::Address;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GovernanceError;
use crate::events::Event;
use crate::executor::InstructionExecutor;
use crate::proposal::{Proposal, ProposalOutcome, ProposalRegistry};
use crate::quorum;
use crate::treasury::Treasury;

/// Governance parameters.
///
/// Mutable only through chairperson-gated engine operations. Changes apply
/// to proposals created afterwards; open proposals keep their snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// The single identity allowed to change parameters and create proposals
    pub chairperson: Address,
    /// Quorum percentage of the total supply, 0-100 inclusive
    pub quorum_percent: u8,
    /// Debating window length in seconds for new proposals
    pub debating_period: u64,
    /// Reference total supply used for quorum snapshots
    pub total_supply: u128,
}

/// Token-weighted governance over a single-asset treasury.
#[derive(Debug)]
pub struct GovernanceEngine<E> {
    config: GovernanceConfig,
    treasury: Treasury,
    proposals: ProposalRegistry,
    events: Vec<Event>,
    executor: E,
}

impl<E: InstructionExecutor> GovernanceEngine<E> {
    /// Create an engine from validated parameters.
    pub fn new(config: GovernanceConfig, executor: E) -> Result<Self, GovernanceError> {
        quorum::validate_percent(config.quorum_percent)?;
        Ok(Self {
            config,
            treasury: Treasury::new(),
            proposals: ProposalRegistry::new(),
            events: Vec::new(),
            executor,
        })
    }

    /// Fund a member's external balance.
    ///
    /// The asset's origin (mint, transfer-in) is the surrounding runtime's
    /// concern; governance only needs the balance to exist.
    pub fn credit(&mut self, member: Address, amount: u128) {
        self.treasury.credit(member, amount);
    }

    /// Move `amount` of a member's external balance into voting shares.
    ///
    /// Open to any member.
    pub fn deposit(&mut self, member: Address, amount: u128) -> Result<(), GovernanceError> {
        self.treasury.deposit(member, amount)?;
        info!("deposit of {} by {}", amount, member);
        self.events.push(Event::Deposit { member, amount });
        Ok(())
    }

    /// Return a member's entire share amount to their external balance.
    ///
    /// Fails while the member has unresolved votes. Returns the amount
    /// handed back.
    pub fn withdraw(&mut self, member: Address) -> Result<u128, GovernanceError> {
        let amount = self.treasury.withdraw(member)?;
        info!("withdraw of {} by {}", amount, member);
        self.events.push(Event::Withdraw { member, amount });
        Ok(amount)
    }

    /// Change the quorum percentage. Chairperson only.
    pub fn set_quorum(&mut self, caller: Address, percent: u8) -> Result<(), GovernanceError> {
        self.require_chairperson(caller)?;
        quorum::validate_percent(percent)?;
        debug!("quorum percent {} -> {}", self.config.quorum_percent, percent);
        self.config.quorum_percent = percent;
        Ok(())
    }

    /// Change the debating window for future proposals. Chairperson only.
    ///
    /// No bound on the value; a zero window makes a proposal finishable the
    /// moment it is created.
    pub fn set_debating_period(&mut self, caller: Address, seconds: u64) -> Result<(), GovernanceError> {
        self.require_chairperson(caller)?;
        debug!("debating period {} -> {}", self.config.debating_period, seconds);
        self.config.debating_period = seconds;
        Ok(())
    }

    /// Put an instruction up for debate. Chairperson only.
    ///
    /// Stamps the current debating period and the minimum quorum computed
    /// from the current percentage and total supply onto the proposal.
    pub fn add_proposal(
        &mut self,
        caller: Address,
        recipient: Address,
        instruction: Vec<u8>,
        description: String,
        now: u64,
    ) -> Result<u64, GovernanceError> {
        self.require_chairperson(caller)?;

        let minimum_quorum = quorum::minimum_quorum(self.config.quorum_percent, self.config.total_supply);
        let debating_period = self.config.debating_period;
        let id = self.proposals.create(
            recipient,
            instruction,
            description.clone(),
            debating_period,
            minimum_quorum,
            now,
        );

        info!("proposal {} created, quorum {}, debating for {}s", id, minimum_quorum, debating_period);
        self.events.push(Event::NewProposal {
            id,
            recipient,
            description,
            debating_period,
            minimum_quorum,
        });
        Ok(id)
    }

    /// Vote for or against a proposal with the caller's current share
    /// amount as weight.
    ///
    /// The weight is read at this exact moment; deposits or withdrawals
    /// after the vote do not retouch the tally. A successful vote locks the
    /// caller's shares until the proposal resolves.
    pub fn vote(
        &mut self,
        caller: Address,
        proposal_id: u64,
        in_favor: bool,
        now: u64,
    ) -> Result<(), GovernanceError> {
        let weight = self.treasury.share_of(&caller);
        if weight == 0 {
            return Err(GovernanceError::InsufficientVotingPower);
        }

        self.proposals.cast_vote(proposal_id, caller, in_favor, weight, now)?;
        self.treasury.lock_vote(caller);

        debug!("vote on {} by {}: in_favor={} weight={}", proposal_id, caller, in_favor, weight);
        self.events.push(Event::Vote {
            proposal: proposal_id,
            member: caller,
            in_favor,
            weight,
        });
        Ok(())
    }

    /// Terminally resolve a proposal after its debating window. Callable by
    /// anyone.
    ///
    /// Every voter's lock is released whatever the outcome. For `Accepted`,
    /// the instruction is handed to the executor only after the proposal is
    /// marked finished and executed; an executor failure is reported but
    /// the marks stay committed, so the proposal can never be re-accepted.
    pub fn finish_proposal(
        &mut self,
        caller: Address,
        proposal_id: u64,
        now: u64,
    ) -> Result<ProposalOutcome, GovernanceError> {
        let resolution = self.proposals.resolve(proposal_id, now)?;

        for voter in &resolution.voters {
            self.treasury.unlock_vote(*voter);
        }

        info!("proposal {} finished by {}: {:?}", proposal_id, caller, resolution.outcome);
        self.events.push(Event::ProposalFinished {
            proposal: proposal_id,
            outcome: resolution.outcome,
        });

        if let Some((recipient, instruction)) = resolution.action {
            self.executor
                .execute(&recipient, &instruction)
                .map_err(|e| GovernanceError::ExecutionFailed(e.to_string()))?;
        }

        Ok(resolution.outcome)
    }

    /// Chairperson identity.
    pub fn chairperson(&self) -> Address {
        self.config.chairperson
    }

    /// Current quorum percentage.
    pub fn quorum_percent(&self) -> u8 {
        self.config.quorum_percent
    }

    /// Minimum quorum a proposal created now would be stamped with.
    pub fn minimum_quorum(&self) -> u128 {
        quorum::minimum_quorum(self.config.quorum_percent, self.config.total_supply)
    }

    /// Current debating window in seconds.
    pub fn debating_period(&self) -> u64 {
        self.config.debating_period
    }

    /// Reference total supply.
    pub fn total_supply(&self) -> u128 {
        self.config.total_supply
    }

    /// Deposited share amount for a member.
    pub fn share_of(&self, member: &Address) -> u128 {
        self.treasury.share_of(member)
    }

    /// External balance for a member.
    pub fn balance_of(&self, member: &Address) -> u128 {
        self.treasury.balance_of(member)
    }

    /// Number of unresolved votes for a member.
    pub fn locked_votes(&self, member: &Address) -> u32 {
        self.treasury.locked_votes(member)
    }

    /// Full record of a proposal.
    pub fn proposal(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals.get(id)
    }

    /// Id the next proposal will get.
    pub fn next_proposal_id(&self) -> u64 {
        self.proposals.next_id()
    }

    /// Journal of committed operations, in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The instruction executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn require_chairperson(&self, caller: Address) -> Result<(), GovernanceError> {
        if caller != self.config.chairperson {
            return Err(GovernanceError::Unauthorized);
        }
        Ok(())
    }
}
