//! Agora Types - Core type definitions for the AGORA governance engine.
//!
//! This crate provides the fundamental types shared by the governance
//! crates:
//! - Member addresses (20-byte, Bech32m encoded)
//! - Parse/format errors
//!
//! Token amounts throughout the workspace are plain `u128` values in the
//! governed asset's smallest unit; timestamps are Unix seconds (`u64`).

pub mod address;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use error::TypesError;
