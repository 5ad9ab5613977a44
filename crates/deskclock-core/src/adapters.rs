//! Concrete implementations of the ports declared in `deskclock_proto::ports`.

pub mod local_session;
pub mod system_clock;
