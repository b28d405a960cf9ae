//! `.modmap.toml` configuration.

mod core;
mod loader;

pub use self::core::{
    default_max_passes, default_parallel, default_resolution, CommunitySettings,
    ExecutionSettings, FilterSettings, LayoutSettings, ModmapConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Commented template written by `modmap init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# modmap configuration

[community]
# Granularity of detected communities. Higher values produce fewer, larger
# communities; lower values produce more, smaller ones. Must be > 0.
resolution = 0.8
# Upper bound on local-moving passes per aggregation level.
max_passes = 100

[layout]
# When true, a missing or unreadable layout diagram yields an empty report.
required = false

[execution]
# Compute community, centrality and density metrics concurrently.
parallel = true

[filter]
# Glob patterns for modules excluded from the analysis.
exclude = []
"#;
