//! Tools the agents can invoke and the dispatcher that routes to them

pub mod calculator;
pub mod catalog;
pub mod clock;
pub mod dispatcher;
pub mod filesystem;
pub mod result;

pub use catalog::ToolId;
pub use dispatcher::ToolDispatcher;
pub use filesystem::{FileTools, LocalFileTools};
pub use result::ToolResult;
