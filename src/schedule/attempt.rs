use super::filter::eligible;
use super::types::{Assignment, Blackouts, Person, RunState, Slot, Week};

/// Walks the weeks once, greedily giving each week to the first eligible
/// person in `shuffled` order
///
/// Weeks with nobody eligible become blank and are never revisited. The
/// returned assignment always has one slot per week.
pub fn build_attempt(
    shuffled: &[&Person],
    weeks: &[Week],
    blackouts: &Blackouts,
    cooldown: usize,
) -> Assignment {
    let mut state = RunState::default();
    let slots = weeks
        .iter()
        .enumerate()
        .map(|(index, week)| {
            fill_week(shuffled, index, week, &mut state, blackouts, cooldown)
        })
        .collect();
    Assignment(slots)
}

fn fill_week(
    shuffled: &[&Person],
    index: usize,
    week: &Week,
    state: &mut RunState,
    blackouts: &Blackouts,
    cooldown: usize,
) -> Slot {
    match eligible(shuffled, index, week, state, blackouts, cooldown).first() {
        Some(person) => {
            state.record(person, index);
            Slot::filled(person)
        }
        None => Slot::Blank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn weeks(n: usize) -> Vec<Week> {
        let mut week = Week::containing(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        let mut out = Vec::new();
        for _ in 0..n {
            out.push(week);
            week = week.next();
        }
        out
    }

    fn rendered(assignment: &Assignment) -> Vec<String> {
        assignment.slots().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_greedy_fill_follows_order() {
        let alice = Person::new(1, "Alice", Some("A"));
        let bob = Person::new(2, "Bob", Some("B"));
        let carol = Person::new(3, "Carol", Some("A"));
        let order = vec![&alice, &bob, &carol];

        let result = build_attempt(&order, &weeks(4), &Blackouts::new(), 2);
        assert_eq!(rendered(&result), vec!["Alice", "Bob", "Carol", "BLANK"]);
    }

    #[test]
    fn test_blank_then_later_fill() {
        let alice = Person::new(1, "Alice", Some("A"));
        let bob = Person::new(2, "Bob", Some("B"));
        let carol = Person::new(3, "Carol", Some("A"));
        let order = vec![&bob, &alice, &carol];

        let result = build_attempt(&order, &weeks(4), &Blackouts::new(), 2);
        assert_eq!(rendered(&result), vec!["Bob", "Alice", "BLANK", "Carol"]);
    }

    #[test]
    fn test_single_person_fills_first_week_only() {
        let solo = Person::new(1, "Solo", Some("A"));
        let result = build_attempt(&[&solo], &weeks(5), &Blackouts::new(), 2);
        assert_eq!(result.len(), 5);
        assert_eq!(rendered(&result), vec!["Solo", "BLANK", "BLANK", "BLANK", "BLANK"]);
    }

    #[test]
    fn test_blackout_pushes_to_next_candidate() {
        let alice = Person::new(1, "Alice", Some("A"));
        let bob = Person::new(2, "Bob", Some("B"));
        let all = weeks(2);
        let mut blackouts = Blackouts::new();
        blackouts.insert("Alice".to_string(), HashSet::from([all[0]]));

        let result = build_attempt(&[&alice, &bob], &all, &blackouts, 2);
        assert_eq!(rendered(&result), vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_empty_inputs() {
        let alice = Person::new(1, "Alice", None);
        assert!(build_attempt(&[&alice], &[], &Blackouts::new(), 2).is_empty());

        let result = build_attempt(&[], &weeks(3), &Blackouts::new(), 2);
        assert_eq!(result.blank_count(), 3);
    }
}
