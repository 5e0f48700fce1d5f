use thiserror::Error;

/// Errors that can occur in governance operations.
///
/// Every precondition failure aborts the whole operation; no partial state
/// change escapes a failed call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GovernanceError {
    #[error("Unauthorized: chairperson only")]
    Unauthorized,

    #[error("Quorum percent out of range: {0} (must be 0-100)")]
    InvalidQuorumPercent(u8),

    #[error("Shares locked by {0} unresolved vote(s)")]
    VotingInProgress(u32),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),

    #[error("Already voted on this proposal")]
    AlreadyVoted,

    #[error("Debating period is over, vote rejected")]
    VotePeriodOver,

    #[error("Debating period not over yet")]
    DebatingPeriodNotOver,

    #[error("Proposal already finished")]
    AlreadyExecuted,

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: u128, required: u128 },

    #[error("No deposited shares to vote with")]
    InsufficientVotingPower,

    #[error("Instruction execution failed: {0}")]
    ExecutionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GovernanceError::ProposalNotFound(3);
        assert!(err.to_string().contains("3"));

        let err = GovernanceError::InvalidQuorumPercent(101);
        assert!(err.to_string().contains("101"));
    }

    #[test]
    fn test_insufficient_balance_fields() {
        let err = GovernanceError::InsufficientBalance { available: 10, required: 25 };
        let text = err.to_string();
        assert!(text.contains("10"));
        assert!(text.contains("25"));
    }
}
