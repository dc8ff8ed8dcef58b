//! CLI library components for the `hub` inspector.

pub mod logging;
pub mod output;
