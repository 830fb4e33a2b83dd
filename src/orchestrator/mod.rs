//! Application-level orchestration.
//!
//! This module owns the bridge between UI surfaces and the REST backend:
//! UI layers send `ApiCommand`s, the controller performs the HTTP calls on
//! the tokio runtime and answers with `AppEvent`s on the shared event channel.

mod controller;

pub(crate) use controller::{run_controller, ApiCommand};
