//! Command registration and dispatch for modman.
//!
//! This module separates the command registry (named, aliased handler
//! records) from line dispatch, enabling unit testing of both without a
//! terminal attached.

pub mod dispatcher;
pub mod registry;

pub use dispatcher::dispatch;
pub use registry::{Command, CommandSet, Resolution};
