//! Deterministic, allocation-free runtime for hierarchical (statechart)
//! state machines: nested composite scopes, choice and initial pseudostates,
//! guarded and internal transitions, entry/exit obligations.
//!
//! The runtime executes a static table of state descriptors emitted by a
//! chart generator (or written by hand in the same shape); see the
//! `machines` module for complete reference machines and their conformance
//! tests.

pub mod callback;
pub mod descriptor;
pub mod id;
pub mod machine;
pub mod machines;
pub mod transition;
