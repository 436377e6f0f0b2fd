//! Command Agent - natural language command dispatcher
//!
//! Free text is classified into an intent and dispatched to a local tool, or
//! a named goal is expanded into a plan of dependent tasks and executed with
//! a bounded memory of what ran.

pub mod agent;
pub mod core;
pub mod intent;
pub mod memory;
pub mod planning;
pub mod tools;
