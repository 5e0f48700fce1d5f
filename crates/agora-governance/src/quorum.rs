//! Minimum-quorum computation.
//!
//! The quorum is a share amount: the smallest combined vote weight a
//! proposal needs before its tally counts at all. It is computed from a
//! whole percentage of the reference total supply and snapshotted onto each
//! proposal at creation, so later parameter changes never retouch open
//! proposals.

use crate::error::GovernanceError;

/// Compute the minimum quorum for a percentage of the total supply.
///
/// Zero percent is an explicit no-quorum policy. Otherwise the result is
/// `floor(total_supply * percent / 100)` in the asset's smallest unit; the
/// truncation is deterministic and intentional.
pub fn minimum_quorum(percent: u8, total_supply: u128) -> u128 {
    if percent == 0 {
        return 0;
    }
    total_supply.saturating_mul(percent as u128) / 100
}

/// Validate a quorum percentage.
pub fn validate_percent(percent: u8) -> Result<(), GovernanceError> {
    if percent > 100 {
        return Err(GovernanceError::InvalidQuorumPercent(percent));
    }
    Ok(())
}
