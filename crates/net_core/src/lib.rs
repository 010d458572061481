//! `net_core`: replication schema + in-proc plumbing for the match core.
//!
//! Scope
//! - Declares the per-class field schemes the replication substrate consumes
//! - Encodes/decodes snapshot, command and match-event messages
//! - Provides length framing and a local byte channel for loopback testing
//!
//! The transport itself (sockets, session bootstrap) lives outside this
//! workspace; everything here is the contract the core exposes to it.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod channel;
pub mod command;
pub mod event;
pub mod frame;
pub mod snapshot;
pub mod wire;
