//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (contract, address, tx_hash)
//!     → logging.rs subscriber (stderr, filtered by RUST_LOG)
//! ```

pub mod logging;
