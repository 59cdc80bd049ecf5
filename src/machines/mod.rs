//! Reference machines, written the way the statechart generator emits them:
//! `StateId` constants, a static descriptor table, the Events/Actions/Guards
//! interfaces, and a wrapper owning the engine.  One module per semantic
//! area, each with its conformance tests inline.

pub mod args;
pub mod cascade;
pub mod choice;
pub mod composite;
pub mod guarded;
pub mod uart;
