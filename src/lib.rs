//! Ledger bridge - wire-compatible conversion between two message schemas
//!
//! The service boundary speaks the [`schema::external`] messages while the
//! engine stores and executes [`schema::ledger`] messages. The two are
//! declared independently but share tags, so a value crosses the boundary by
//! being encoded under one schema and decoded under the other.
//!
//! # Architecture
//!
//! ## Wire Format
//! - [`wire`] - Tag/length/value encoding and the [`wire::Message`] trait
//!
//! ## Schemas
//! - [`schema`] - External and ledger message families
//!
//! ## Conversion
//! - [`bridge`] - Codec bridge, list adapter and the named conversions
//!
//! ## Configuration & Utilities
//! - [`config`] - Codec limits
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use ledger_bridge::bridge::Bridge;
//! use ledger_bridge::schema::ledger;
//!
//! let bridge = Bridge::default();
//! let utxo = ledger::Utxo {
//!     amount: vec![0x01, 0x00],
//!     ref_offset: 1,
//!     ..Default::default()
//! };
//! let external = bridge.utxo_to_external(Some(&utxo)).unwrap();
//! assert_eq!(external.amount, vec![0x01, 0x00]);
//! assert_eq!(bridge.utxo_to_external(None), None);
//! ```

#![forbid(unsafe_code)]

// ============================================================================
// Wire Format & Schemas
// ============================================================================
pub mod schema;
pub mod wire;

// ============================================================================
// Conversion
// ============================================================================
pub mod bridge;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use bridge::Bridge;
pub use config::{load_config, BridgeConfig, CodecLimits};
pub use error::{BridgeError, Result};
