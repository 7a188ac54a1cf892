/*!
## Run configuration

Everything a run can be tuned with, in one value. Defaults match the
classic interpreter: a 1024 cell tape and a redraw every 1000 scans.

*/

use crate::mach::DEFAULT_STREAM;

pub const DEFAULT_CAPACITY: usize = 1024;
pub const DEFAULT_BUDGET: usize = 100_000;
pub const DEFAULT_CADENCE: usize = 1000;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Cells on the tape, including the null cell.
    pub capacity: usize,
    /// Most scans a run may take before giving up on convergence.
    pub budget: usize,
    /// Scans between two snapshots.
    pub cadence: usize,
    /// Fan each scan out over the rayon pool.
    pub parallel: bool,
    /// Programs with fewer instructions than this scan serially.
    pub parallel_threshold: usize,
    /// Streams the terminal shows, by name.
    pub routes: Vec<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            capacity: DEFAULT_CAPACITY,
            budget: DEFAULT_BUDGET,
            cadence: DEFAULT_CADENCE,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            routes: vec![DEFAULT_STREAM.to_string()],
        }
    }
}

impl Config {
    pub fn new() -> Config {
        Config::default()
    }

    /// Defaults overridden by `GOTOPE_BUDGET`, `GOTOPE_CAPACITY`,
    /// `GOTOPE_SERIAL` and `GOTOPE_ROUTES` (comma separated).
    pub fn from_env() -> Config {
        let mut config = Config::default();
        if let Some(budget) = env_usize("GOTOPE_BUDGET") {
            config.budget = budget;
        }
        if let Some(capacity) = env_usize("GOTOPE_CAPACITY") {
            config.capacity = capacity;
        }
        if std::env::var_os("GOTOPE_SERIAL").is_some() {
            config.parallel = false;
        }
        if let Ok(routes) = std::env::var("GOTOPE_ROUTES") {
            config.routes = routes
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        config
    }

    pub fn with_capacity(self, capacity: usize) -> Config {
        Config { capacity, ..self }
    }

    pub fn with_budget(self, budget: usize) -> Config {
        Config { budget, ..self }
    }

    pub fn with_cadence(self, cadence: usize) -> Config {
        Config {
            cadence: cadence.max(1),
            ..self
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Config {
        Config { parallel, ..self }
    }

    pub fn with_parallel_threshold(self, parallel_threshold: usize) -> Config {
        Config {
            parallel_threshold,
            ..self
        }
    }

    pub fn with_routes(self, routes: &[&str]) -> Config {
        Config {
            routes: routes.iter().map(|s| s.to_string()).collect(),
            ..self
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    match std::env::var(key) {
        Ok(value) => match value.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("ignoring {}={:?}: not a count", key, value);
                None
            }
        },
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.capacity, 1024);
        assert_eq!(c.cadence, 1000);
        assert_eq!(c.routes, vec!["out".to_string()]);
        assert!(c.parallel);
    }

    #[test]
    fn test_builders() {
        let c = Config::new()
            .with_budget(7)
            .with_cadence(0)
            .with_parallel(false)
            .with_routes(&["out", "err"]);
        assert_eq!(c.budget, 7);
        assert_eq!(c.cadence, 1);
        assert!(!c.parallel);
        assert_eq!(c.routes.len(), 2);
    }
}
