//! Shared configuration types and port contracts for deskclock.
//!
//! Nothing in this crate performs I/O. Adapters living in `deskclock-core` implement the
//! ports declared in [`ports`], and the GUI consumes the configuration declared in [`config`].

pub mod config;
pub mod ports;
