use super::types::{Blackouts, Person, RunState, Week};

/// Returns the people who may take `week`, keeping the order of `personnel`
///
/// A person qualifies when they have not been used in this attempt, their
/// group last filled a week at least `cooldown` weeks ago (or never), and
/// they have no blackout on this week. Everyone without a group counts as
/// one shared group.
pub fn eligible<'a>(
    personnel: &[&'a Person],
    week_index: usize,
    week: &Week,
    state: &RunState,
    blackouts: &Blackouts,
    cooldown: usize,
) -> Vec<&'a Person> {
    personnel
        .iter()
        .copied()
        .filter(|p| !state.used.contains(&p.id))
        .filter(|p| group_rested(p, week_index, state, cooldown))
        .filter(|p| !blacked_out(p, week, blackouts))
        .collect()
}

fn group_rested(person: &Person, week_index: usize, state: &RunState, cooldown: usize) -> bool {
    match state.last_group_week.get(&person.group) {
        Some(&last) => week_index - last >= cooldown,
        None => true,
    }
}

fn blacked_out(person: &Person, week: &Week, blackouts: &Blackouts) -> bool {
    blackouts
        .get(&person.name)
        .map(|weeks| weeks.contains(week))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn week(day: u32) -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2025, 1, day).unwrap())
    }

    fn roster() -> Vec<Person> {
        vec![
            Person::new(1, "Alice", Some("A")),
            Person::new(2, "Bob", Some("B")),
            Person::new(3, "Carol", Some("A")),
        ]
    }

    fn names(people: &[&Person]) -> Vec<String> {
        people.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_everyone_eligible_on_fresh_state() {
        let people = roster();
        let refs: Vec<&Person> = people.iter().collect();
        let result = eligible(&refs, 0, &week(3), &RunState::default(), &Blackouts::new(), 2);
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_preserves_caller_order() {
        let people = roster();
        let refs: Vec<&Person> = people.iter().rev().collect();
        let result = eligible(&refs, 0, &week(3), &RunState::default(), &Blackouts::new(), 2);
        assert_eq!(names(&result), vec!["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn test_used_person_excluded() {
        let people = roster();
        let refs: Vec<&Person> = people.iter().collect();
        let mut state = RunState::default();
        state.used.insert(2);
        let result = eligible(&refs, 0, &week(3), &state, &Blackouts::new(), 2);
        assert_eq!(names(&result), vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_cooldown_boundary() {
        let people = roster();
        let refs: Vec<&Person> = people.iter().collect();
        let mut state = RunState::default();
        state.record(&people[0], 0);

        // gap of 1 disqualifies the rest of group A
        let result = eligible(&refs, 1, &week(10), &state, &Blackouts::new(), 2);
        assert_eq!(names(&result), vec!["Bob"]);

        // gap of exactly 2 is allowed
        let result = eligible(&refs, 2, &week(17), &state, &Blackouts::new(), 2);
        assert_eq!(names(&result), vec!["Bob", "Carol"]);
    }

    #[test]
    fn test_blackout_excludes_only_that_week() {
        let people = roster();
        let refs: Vec<&Person> = people.iter().collect();
        let mut blackouts = Blackouts::new();
        blackouts.insert("Carol".to_string(), HashSet::from([week(10)]));

        let result = eligible(&refs, 0, &week(10), &RunState::default(), &blackouts, 2);
        assert_eq!(names(&result), vec!["Alice", "Bob"]);

        let result = eligible(&refs, 0, &week(3), &RunState::default(), &blackouts, 2);
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_ungrouped_people_share_cooldown() {
        let people = vec![Person::new(1, "X", None), Person::new(2, "Y", None), Person::new(3, "Z", Some("A"))];
        let refs: Vec<&Person> = people.iter().collect();
        let mut state = RunState::default();
        state.record(&people[0], 0);

        let result = eligible(&refs, 1, &week(10), &state, &Blackouts::new(), 2);
        assert_eq!(names(&result), vec!["Z"]);

        let result = eligible(&refs, 2, &week(17), &state, &Blackouts::new(), 2);
        assert_eq!(names(&result), vec!["Y", "Z"]);
    }

    #[test]
    fn test_nobody_eligible_is_empty_not_error() {
        let people = roster();
        let refs: Vec<&Person> = people.iter().collect();
        let mut state = RunState::default();
        for p in &people {
            state.used.insert(p.id);
        }
        assert!(eligible(&refs, 3, &week(24), &state, &Blackouts::new(), 2).is_empty());
    }
}
