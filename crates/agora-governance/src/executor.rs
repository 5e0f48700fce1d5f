//! Instruction execution capability.
//!
//! The engine hands an accepted proposal's recipient and instruction to an
//! [`InstructionExecutor`] exactly once, after the proposal is already
//! marked finished and executed. What "execute" means is the runtime's
//! business; the engine only learns success or failure, and a failure never
//! reopens the proposal.

use agora_types::Address;
use thiserror::Error;

/// Failure reported by an instruction executor.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{0}")]
pub struct ExecutionError(pub String);

/// Capability to perform an approved instruction against a recipient.
pub trait InstructionExecutor {
    /// Perform `instruction` against `recipient`. Invoked at most once per
    /// proposal, with no retry on failure.
    fn execute(&mut self, recipient: &Address, instruction: &[u8]) -> Result<(), ExecutionError>;
}

/// Executor that accepts every instruction without doing anything.
///
/// Deterministic stand-in for tests and for deployments where acceptance
/// itself is the only effect that matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExecutor;

impl InstructionExecutor for NullExecutor {
    fn execute(&mut self, _recipient: &Address, _instruction: &[u8]) -> Result<(), ExecutionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_executor_accepts() {
        let mut executor = NullExecutor;
        let recipient = Address::from_bytes([1u8; 20]);
        assert!(executor.execute(&recipient, &[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_execution_error_display() {
        let err = ExecutionError("recipient reverted".to_string());
        assert_eq!(err.to_string(), "recipient reverted");
    }
}
