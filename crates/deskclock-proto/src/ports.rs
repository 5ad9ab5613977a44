//! Core port definitions for deskclock adapters.
//!
//! The clock port abstracts the host's wall clock so tickers can be driven by a fixed source in
//! tests. The session port is the contract for the external authentication/subscription
//! provider that gates the clock in the gated variant.

pub mod clock;
pub mod session;
