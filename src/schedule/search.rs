use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::attempt::build_attempt;
use super::types::{Blackouts, Person, ResultSet, Week};
use crate::config::GeneratorConfig;

/// Cooperative stop signal, checked once per attempt
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Generates up to `config.quota` distinct assignments using the thread RNG
pub fn generate(
    personnel: &[Person],
    weeks: &[Week],
    blackouts: &Blackouts,
    config: &GeneratorConfig,
) -> ResultSet {
    generate_with(personnel, weeks, blackouts, config, &mut rand::thread_rng(), None)
}

/// Randomized retry search
///
/// Every attempt reshuffles the whole roster and runs one greedy pass.
/// Attempts that reproduce an assignment already found are dropped. The
/// loop stops at the quota, at the attempt budget, or when `cancel` fires;
/// whatever was found by then is returned.
pub fn generate_with<R: Rng + ?Sized>(
    personnel: &[Person],
    weeks: &[Week],
    blackouts: &Blackouts,
    config: &GeneratorConfig,
    rng: &mut R,
    cancel: Option<&CancelToken>,
) -> ResultSet {
    let mut result = ResultSet::default();
    if personnel.is_empty() {
        debug!("Empty roster, nothing to generate");
        return result;
    }

    let mut order: Vec<&Person> = personnel.iter().collect();
    let mut seen = HashSet::new();

    while result.len() < config.quota && result.attempts < config.attempt_budget {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            info!(attempts = result.attempts, "Generation cancelled");
            break;
        }
        result.attempts += 1;

        order.shuffle(rng);
        let assignment = build_attempt(&order, weeks, blackouts, config.cooldown_weeks);

        if seen.insert(assignment.clone()) {
            debug!(
                attempt = result.attempts,
                blanks = assignment.blank_count(),
                "Found new assignment"
            );
            result.assignments.push(assignment);
        }
    }

    info!(
        found = result.len(),
        attempts = result.attempts,
        weeks = weeks.len(),
        personnel = personnel.len(),
        "Schedule generation finished"
    );
    result
}
