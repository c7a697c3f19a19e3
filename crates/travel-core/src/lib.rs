//! Core abstractions for the travel advisor
//!
//! This crate defines the pieces shared by every other crate in the workspace:
//! the [`Tool`] trait and [`ToolRegistry`], the common error type, and the
//! tracing subscriber setup used by binaries.

pub mod error;
pub mod logging;
pub mod registry;
pub mod tool;

pub use error::{Error, Result};
pub use logging::{init_tracing, init_tracing_with};
pub use registry::{ToolRegistry, ToolSummary};
pub use tool::Tool;
