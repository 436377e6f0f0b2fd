//! Agent configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose.
//! Values can be overridden from a TOML file; anything omitted keeps its default.

use crate::core::error::{AgentError, Result};
use crate::planning::executor::SchedulingMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the dispatcher, planner and memory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    // === TOOLS ===
    /// Directory that relative tool paths are resolved against
    pub workspace_root: PathBuf,

    /// Manifest file read by the project analysis composite task
    pub project_manifest: String,

    // === INTENT ===
    /// Intents below this confidence are treated as not understood
    ///
    /// Every real rule scores 0.8 or higher and the fallback scores 0.1,
    /// so anything between the two works the same way.
    pub min_confidence: f32,

    // === MEMORY ===
    /// Maximum number of records kept in the memory store
    ///
    /// When full, the oldest record is evicted first.
    pub memory_capacity: usize,

    // === PLANNING ===
    /// How the executor orders tasks with dependencies
    pub scheduling: SchedulingMode,

    /// Optional TOML file replacing the built-in plan templates
    pub plans_file: Option<PathBuf>,

    /// Pause between executed tasks, in milliseconds
    ///
    /// Purely cosmetic pacing for the interactive shell.
    pub step_delay_ms: u64,

    // === OUTPUT ===
    /// Characters of a task result shown in progress narration
    pub result_preview_chars: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            project_manifest: "Cargo.toml".into(),
            min_confidence: 0.3,
            memory_capacity: 50,
            scheduling: SchedulingMode::SinglePass,
            plans_file: None,
            step_delay_ms: 0,
            result_preview_chars: 100,
        }
    }
}

impl AgentConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse_toml(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: AgentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.memory_capacity == 0 {
            return Err(AgentError::Config(
                "memory_capacity must be at least 1".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(AgentError::Config(format!(
                "min_confidence ({}) must be within [0, 1]",
                self.min_confidence
            )));
        }

        if self.project_manifest.trim().is_empty() {
            return Err(AgentError::Config("project_manifest must not be empty".into()));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<AgentConfig> = OnceLock::new();

/// Get the global agent config (initializes with defaults if not set)
pub fn config() -> &'static AgentConfig {
    CONFIG.get_or_init(AgentConfig::default)
}

/// Set the global agent config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: AgentConfig) -> std::result::Result<(), AgentConfig> {
    CONFIG.set(config)
}
