//! Generator configuration

use crate::error::ScheduleError;

pub const DEFAULT_QUOTA: usize = 10;
pub const DEFAULT_ATTEMPT_BUDGET: usize = 5000;
pub const DEFAULT_COOLDOWN_WEEKS: usize = 2;

/// Knobs for one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Maximum number of distinct assignments to return
    pub quota: usize,

    /// Maximum number of attempts before giving up on the quota
    pub attempt_budget: usize,

    /// Minimum week gap before the same group may fill again
    pub cooldown_weeks: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            cooldown_weeks: DEFAULT_COOLDOWN_WEEKS,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ScheduleError> {
        // Load .env file if present
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScheduleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            quota: read_positive(&lookup, "SCHEDULE_QUOTA", defaults.quota)?,
            attempt_budget: read_positive(&lookup, "SCHEDULE_ATTEMPT_BUDGET", defaults.attempt_budget)?,
            cooldown_weeks: read_positive(&lookup, "SCHEDULE_COOLDOWN_WEEKS", defaults.cooldown_weeks)?,
        })
    }

    /// Applies per-run overrides, rejecting zeros
    pub fn with_overrides(
        mut self,
        quota: Option<usize>,
        attempt_budget: Option<usize>,
    ) -> Result<Self, ScheduleError> {
        if let Some(quota) = quota {
            self.quota = ensure_positive("quota", quota)?;
        }
        if let Some(budget) = attempt_budget {
            self.attempt_budget = ensure_positive("attempt budget", budget)?;
        }
        Ok(self)
    }
}

fn read_positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ScheduleError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => {
            let value = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ScheduleError::Config(format!("{key} must be a positive integer, got '{raw}'")))?;
            ensure_positive(key, value)
        }
    }
}

fn ensure_positive(what: &str, value: usize) -> Result<usize, ScheduleError> {
    if value == 0 {
        return Err(ScheduleError::Config(format!("{what} must be greater than zero")));
    }
    Ok(value)
}
