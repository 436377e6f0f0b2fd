use thiserror::Error;

use crate::tools::calculator::CalcError;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing argument '{arg}' for tool {tool}")]
    MissingArgument { tool: String, arg: String },

    #[error("Unknown complex task: {0}")]
    UnknownComplexTask(String),

    #[error("Unsafe expression: {0}")]
    UnsafeExpression(String),

    #[error("Calculation error: {0}")]
    Calculation(#[from] CalcError),

    #[error("Tool panicked: {0}")]
    ToolPanic(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid plan template: {0}")]
    PlanTemplate(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;
