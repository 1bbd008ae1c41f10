use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scene mode selected by the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TreeMode {
    /// Particles scattered, garland hidden
    #[default]
    Chaos,
    /// Snow falling, garland revealed
    Formed,
}

impl TreeMode {
    /// Progress every animated object converges to in this mode
    pub fn target(self) -> f32 {
        match self {
            TreeMode::Formed => 1.0,
            TreeMode::Chaos => 0.0,
        }
    }
}

impl FromStr for TreeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHAOS" => Ok(TreeMode::Chaos),
            "FORMED" => Ok(TreeMode::Formed),
            other => Err(ConfigError::Parse(format!("unknown tree mode '{}'", other))),
        }
    }
}

impl fmt::Display for TreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeMode::Chaos => f.write_str("CHAOS"),
            TreeMode::Formed => f.write_str("FORMED"),
        }
    }
}
