//! Treasury ledger: member balances, deposited shares, and vote locks.
//!
//! The governed asset is a single fungible token. The ledger tracks, per
//! member, the external (withdrawable-to) balance and the deposited share
//! amount that doubles as voting weight. Shares stay locked while the
//! member has unresolved votes.

use std::collections::HashMap;

use agora_types::Address;

use crate::error::GovernanceError;

/// A member's deposited stake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Share {
    /// Deposited amount, used as voting weight and withdrawal entitlement
    pub amount: u128,
    /// Number of currently-unresolved proposals this member has voted on
    pub locked_votes: u32,
}

/// Per-member balances and shares of the governed asset.
///
/// Mutated exclusively by the governance engine; one operation at a time,
/// each fully applied or fully rejected.
#[derive(Debug, Default)]
pub struct Treasury {
    balances: HashMap<Address, u128>,
    shares: HashMap<Address, Share>,
}

impl Treasury {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a member's external balance.
    ///
    /// How the asset reaches a member is outside governance; this is the
    /// entry point the surrounding runtime (or a test) uses to fund one.
    pub fn credit(&mut self, member: Address, amount: u128) {
        let balance = self.balances.entry(member).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Move `amount` from the member's external balance into their shares.
    pub fn deposit(&mut self, member: Address, amount: u128) -> Result<(), GovernanceError> {
        let balance = self.balances.entry(member).or_insert(0);
        if *balance < amount {
            return Err(GovernanceError::InsufficientBalance {
                available: *balance,
                required: amount,
            });
        }
        *balance -= amount;

        let share = self.shares.entry(member).or_default();
        share.amount = share.amount.saturating_add(amount);
        Ok(())
    }

    /// Return the member's entire share amount to their external balance.
    ///
    /// Fails while the member has unresolved votes. Returns the amount
    /// handed back.
    pub fn withdraw(&mut self, member: Address) -> Result<u128, GovernanceError> {
        let share = self.shares.entry(member).or_default();
        if share.locked_votes > 0 {
            return Err(GovernanceError::VotingInProgress(share.locked_votes));
        }

        let amount = share.amount;
        share.amount = 0;

        let balance = self.balances.entry(member).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(amount)
    }

    /// Record one unresolved vote for the member.
    pub fn lock_vote(&mut self, member: Address) {
        let share = self.shares.entry(member).or_default();
        share.locked_votes += 1;
    }

    /// Release one unresolved vote for the member.
    ///
    /// Called once per voter when a proposal resolves. An unlock without a
    /// matching lock cannot be reached through the public API.
    pub fn unlock_vote(&mut self, member: Address) {
        let share = self
            .shares
            .get_mut(&member)
            .unwrap_or_else(|| panic!("unlock for member with no share record: {member}"));
        assert!(share.locked_votes > 0, "vote lock count underflow for {member}");
        share.locked_votes -= 1;
    }

    /// Deposited share amount for a member.
    pub fn share_of(&self, member: &Address) -> u128 {
        self.shares.get(member).map(|s| s.amount).unwrap_or(0)
    }

    /// External balance for a member.
    pub fn balance_of(&self, member: &Address) -> u128 {
        self.balances.get(member).copied().unwrap_or(0)
    }

    /// Number of unresolved votes for a member.
    pub fn locked_votes(&self, member: &Address) -> u32 {
        self.shares.get(member).map(|s| s.locked_votes).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn test_credit_and_deposit() {
        let mut treasury = Treasury::new();
        let alice = member(1);

        treasury.credit(alice, 1000);
        assert_eq!(treasury.balance_of(&alice), 1000);

        treasury.deposit(alice, 400).unwrap();
        assert_eq!(treasury.balance_of(&alice), 600);
        assert_eq!(treasury.share_of(&alice), 400);
    }

    #[test]
    fn test_deposit_insufficient_balance() {
        let mut treasury = Treasury::new();
        let alice = member(1);
        treasury.credit(alice, 100);

        let err = treasury.deposit(alice, 101).unwrap_err();
        assert_eq!(
            err,
            GovernanceError::InsufficientBalance { available: 100, required: 101 }
        );
        // Nothing moved
        assert_eq!(treasury.balance_of(&alice), 100);
        assert_eq!(treasury.share_of(&alice), 0);
    }

    #[test]
    fn test_withdraw_returns_everything() {
        let mut treasury = Treasury::new();
        let alice = member(1);
        treasury.credit(alice, 1000);
        treasury.deposit(alice, 1000).unwrap();

        let returned = treasury.withdraw(alice).unwrap();
        assert_eq!(returned, 1000);
        assert_eq!(treasury.balance_of(&alice), 1000);
        assert_eq!(treasury.share_of(&alice), 0);
    }

    #[test]
    fn test_withdraw_blocked_while_locked() {
        let mut treasury = Treasury::new();
        let alice = member(1);
        treasury.credit(alice, 500);
        treasury.deposit(alice, 500).unwrap();

        treasury.lock_vote(alice);
        assert_eq!(
            treasury.withdraw(alice),
            Err(GovernanceError::VotingInProgress(1))
        );

        treasury.unlock_vote(alice);
        assert_eq!(treasury.withdraw(alice), Ok(500));
    }

    #[test]
    fn test_lock_count_is_a_counter() {
        let mut treasury = Treasury::new();
        let alice = member(1);
        treasury.credit(alice, 100);
        treasury.deposit(alice, 100).unwrap();

        treasury.lock_vote(alice);
        treasury.lock_vote(alice);
        assert_eq!(treasury.locked_votes(&alice), 2);

        treasury.unlock_vote(alice);
        // One vote still unresolved
        assert_eq!(
            treasury.withdraw(alice),
            Err(GovernanceError::VotingInProgress(1))
        );

        treasury.unlock_vote(alice);
        assert_eq!(treasury.withdraw(alice), Ok(100));
    }

    #[test]
    fn test_withdraw_with_no_shares_is_zero() {
        let mut treasury = Treasury::new();
        let alice = member(1);
        assert_eq!(treasury.withdraw(alice), Ok(0));
    }

    #[test]
    #[should_panic(expected = "vote lock count underflow")]
    fn test_unlock_underflow_panics() {
        let mut treasury = Treasury::new();
        let alice = member(1);
        treasury.credit(alice, 10);
        treasury.deposit(alice, 10).unwrap();
        treasury.unlock_vote(alice);
    }

    #[test]
    fn test_reads_for_unknown_member() {
        let treasury = Treasury::new();
        let ghost = member(9);
        assert_eq!(treasury.balance_of(&ghost), 0);
        assert_eq!(treasury.share_of(&ghost), 0);
        assert_eq!(treasury.locked_votes(&ghost), 0);
    }
}
