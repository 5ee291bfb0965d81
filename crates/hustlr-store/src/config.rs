//! Store configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the stores can come up with zero
//! configuration for local development.

use std::path::PathBuf;

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the durable session snapshot.
    /// Env: `HUSTLR_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Whether to seed the stores with mock data at startup.
    /// Env: `HUSTLR_SEED` (true/false)
    /// Default: `true`
    pub seed: bool,

    /// How many listings to generate per category when seeding.
    /// Env: `HUSTLR_SEED_PER_CATEGORY`
    /// Default: `20`
    pub seed_per_category: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: true,
            seed_per_category: 20,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("HUSTLR_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(val) = std::env::var("HUSTLR_SEED") {
            config.seed = val != "false" && val != "0";
        }

        if let Ok(val) = std::env::var("HUSTLR_SEED_PER_CATEGORY") {
            if let Ok(n) = val.parse::<usize>() {
                config.seed_per_category = n;
            } else {
                tracing::warn!(value = %val, "Invalid HUSTLR_SEED_PER_CATEGORY, using default");
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_seed_twenty_per_category() {
        let config = StoreConfig::default();
        assert!(config.seed);
        assert_eq!(config.seed_per_category, 20);
        assert!(config.data_dir.is_none());
    }
}
