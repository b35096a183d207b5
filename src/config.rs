use std::env;

/// Engine policy knobs. Everything here is a deployment choice, not part of the algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Iterations used when a request does not name a count.
    pub default_iterations: u64,
    /// Requests above this are rejected with `IterationLimitExceeded`.
    pub max_iterations: u64,
    /// Trials per batch; cancellation is observed between batches.
    pub batch_size: u64,
    /// Dedicated pool size. `None` runs on rayon's global pool.
    pub workers: Option<usize>,
    /// Largest number of opponent hole-card assignments enumerated exactly.
    pub exact_limit: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_iterations: 100_000,
            max_iterations: 500_000,
            batch_size: 1_000,
            workers: None,
            exact_limit: 1_000_000,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got '{value}'")]
    NotANumber { key: &'static str, value: String },
    #[error("{key} must be at least 1")]
    Zero { key: &'static str },
    #[error("default iterations {default} exceed the maximum {max}")]
    DefaultAboveMax { default: u64, max: u64 },
}

impl EngineConfig {
    pub const DEFAULT_ITERATIONS: &'static str = "HOLDEM_DEFAULT_ITERATIONS";
    pub const MAX_ITERATIONS: &'static str = "HOLDEM_MAX_ITERATIONS";
    pub const BATCH_SIZE: &'static str = "HOLDEM_BATCH_SIZE";
    pub const WORKERS: &'static str = "HOLDEM_WORKERS";
    pub const EXACT_LIMIT: &'static str = "HOLDEM_EXACT_LIMIT";

    /// Read overrides from the process environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                None => Ok(None),
                Some(v) => v
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| ConfigError::NotANumber { key, value: v }),
            }
        };
        let positive =
            |key: &'static str, v: u64| if v == 0 { Err(ConfigError::Zero { key }) } else { Ok(v) };

        let max_iterations = match read(Self::MAX_ITERATIONS)? {
            Some(v) => positive(Self::MAX_ITERATIONS, v)?,
            None => defaults.max_iterations,
        };
        let default_iterations = match read(Self::DEFAULT_ITERATIONS)? {
            Some(v) => positive(Self::DEFAULT_ITERATIONS, v)?,
            None => defaults.default_iterations.min(max_iterations),
        };
        if default_iterations > max_iterations {
            return Err(ConfigError::DefaultAboveMax {
                default: default_iterations,
                max: max_iterations,
            });
        }
        let batch_size = match read(Self::BATCH_SIZE)? {
            Some(v) => positive(Self::BATCH_SIZE, v)?,
            None => defaults.batch_size,
        };
        // 0 means "use every core", same as unset
        let workers = read(Self::WORKERS)?.filter(|&n| n > 0).map(|n| n as usize);
        let exact_limit = read(Self::EXACT_LIMIT)?.unwrap_or(defaults.exact_limit);

        Ok(Self { default_iterations, max_iterations, batch_size, workers, exact_limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        EngineConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_source_gives_defaults() {
        assert_eq!(from_pairs(&[]).unwrap(), EngineConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = from_pairs(&[
            ("HOLDEM_MAX_ITERATIONS", "2000000"),
            ("HOLDEM_DEFAULT_ITERATIONS", "50000"),
            ("HOLDEM_BATCH_SIZE", " 250 "),
            ("HOLDEM_WORKERS", "4"),
            ("HOLDEM_EXACT_LIMIT", "0"),
        ])
        .unwrap();
        assert_eq!(cfg.max_iterations, 2_000_000);
        assert_eq!(cfg.default_iterations, 50_000);
        assert_eq!(cfg.batch_size, 250);
        assert_eq!(cfg.workers, Some(4));
        assert_eq!(cfg.exact_limit, 0);
    }

    #[test]
    fn zero_workers_means_global_pool() {
        assert_eq!(from_pairs(&[("HOLDEM_WORKERS", "0")]).unwrap().workers, None);
    }

    #[test]
    fn lowering_max_clamps_the_default() {
        let cfg = from_pairs(&[("HOLDEM_MAX_ITERATIONS", "10000")]).unwrap();
        assert_eq!(cfg.default_iterations, 10_000);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert_eq!(
            from_pairs(&[("HOLDEM_BATCH_SIZE", "lots")]).unwrap_err(),
            ConfigError::NotANumber { key: "HOLDEM_BATCH_SIZE", value: "lots".into() }
        );
        assert_eq!(
            from_pairs(&[("HOLDEM_BATCH_SIZE", "0")]).unwrap_err(),
            ConfigError::Zero { key: "HOLDEM_BATCH_SIZE" }
        );
        assert_eq!(
            from_pairs(&[("HOLDEM_DEFAULT_ITERATIONS", "600000")]).unwrap_err(),
            ConfigError::DefaultAboveMax { default: 600_000, max: 500_000 }
        );
    }
}
