//! client_core: read-only mirror of the authoritative match state.
//!
//! Responsibilities
//! - Apply replicated snapshots onto local shadow views (never the reverse)
//! - Surface match lifecycle events for presentation, and the halt signal
//! - Map raw input buttons to named client commands for the transport
//!
//! Nothing in this crate mutates authoritative fields; every gameplay action
//! travels as a `ClientCmd` and comes back as replicated state.

pub mod replication;
pub mod systems;
pub mod views;
