use serde::{Deserialize, Serialize};

use crate::errors::{AuditError, Result};
use crate::metrics::{CommunityConfig, DEFAULT_MAX_PASSES, DEFAULT_RESOLUTION};

/// Root configuration structure for modmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ModmapConfig {
    /// Community detection tuning
    #[serde(default)]
    pub community: CommunitySettings,

    /// Layout diagram handling
    #[serde(default)]
    pub layout: LayoutSettings,

    /// Execution settings
    #[serde(default)]
    pub execution: ExecutionSettings,

    /// Module filtering
    #[serde(default)]
    pub filter: FilterSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunitySettings {
    /// Granularity of detected communities; higher values merge more
    #[serde(default = "default_resolution")]
    pub resolution: f64,

    /// Upper bound on local-moving passes per aggregation level
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LayoutSettings {
    /// Treat a missing or unreadable layout diagram as "nothing to report"
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionSettings {
    /// Run graph metrics concurrently
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilterSettings {
    /// Glob patterns for modules to leave out of the analysis
    #[serde(default)]
    pub exclude: Vec<String>,
}

pub fn default_resolution() -> f64 {
    DEFAULT_RESOLUTION
}

pub fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

pub fn default_parallel() -> bool {
    true
}

impl Default for CommunitySettings {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            max_passes: default_max_passes(),
        }
    }
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

impl CommunitySettings {
    pub fn validate(&self) -> Result<()> {
        self.to_community_config().validate()
    }

    pub fn to_community_config(&self) -> CommunityConfig {
        CommunityConfig {
            resolution: self.resolution,
            max_passes: self.max_passes,
        }
    }
}

impl FilterSettings {
    /// Compile exclude patterns.
    pub fn patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|raw| glob::Pattern::new(raw).map_err(AuditError::from))
            .collect()
    }
}

impl ModmapConfig {
    pub fn validate(&self) -> Result<()> {
        self.community.validate()?;
        self.filter.patterns()?;
        Ok(())
    }
}
