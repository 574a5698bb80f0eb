use chrono::NaiveDate;

use super::types::{Blackouts, Week};
use crate::error::ScheduleError;

/// Parses a YYYY-MM-DD date
pub fn parse_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(value.trim().to_string()))
}

/// Builds the week sequence from a Friday `start` up to and including `end`
pub fn week_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<Week>, ScheduleError> {
    let first = Week::from_anchor(start).ok_or_else(|| ScheduleError::NotAnchorWeekday(start.to_string()))?;
    if start >= end {
        return Err(ScheduleError::EmptyRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let mut weeks = Vec::new();
    let mut current = first;
    while current.date() <= end {
        weeks.push(current);
        current = current.next();
    }
    Ok(weeks)
}

/// Blackout entries that name a week outside `weeks`; these never match
pub fn unmatched_blackouts(weeks: &[Week], blackouts: &Blackouts) -> Vec<(String, Week)> {
    let mut unmatched: Vec<(String, Week)> = blackouts
        .iter()
        .flat_map(|(name, blocked)| {
            blocked
                .iter()
                .filter(|week| !weeks.contains(week))
                .map(move |week| (name.clone(), *week))
        })
        .collect();
    unmatched.sort();
    unmatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_week_range_inclusive_of_end() {
        let start = parse_date("2025-01-03").unwrap();
        let end = parse_date("2025-01-31").unwrap();
        let weeks = week_range(start, end).unwrap();
        let labels: Vec<String> = weeks.iter().map(|w| w.to_string()).collect();
        assert_eq!(
            labels,
            vec!["2025-01-03", "2025-01-10", "2025-01-17", "2025-01-24", "2025-01-31"]
        );
    }

    #[test]
    fn test_week_range_end_mid_week() {
        let start = parse_date("2025-01-03").unwrap();
        let end = parse_date("2025-01-15").unwrap();
        assert_eq!(week_range(start, end).unwrap().len(), 2);
    }

    #[test]
    fn test_week_range_rejects_non_friday() {
        let start = parse_date("2025-01-04").unwrap();
        let end = parse_date("2025-02-04").unwrap();
        assert!(matches!(week_range(start, end), Err(ScheduleError::NotAnchorWeekday(_))));
    }

    #[test]
    fn test_week_range_rejects_reversed() {
        let start = parse_date("2025-01-03").unwrap();
        assert!(matches!(week_range(start, start), Err(ScheduleError::EmptyRange { .. })));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(matches!(parse_date("03/01/2025"), Err(ScheduleError::InvalidDate(_))));
    }

    #[test]
    fn test_unmatched_blackouts() {
        let start = parse_date("2025-01-03").unwrap();
        let weeks = week_range(start, parse_date("2025-01-10").unwrap()).unwrap();
        let stray = Week::containing(parse_date("2025-03-07").unwrap());
        let mut blackouts = Blackouts::new();
        blackouts.insert("Alice".to_string(), HashSet::from([weeks[0], stray]));

        assert_eq!(unmatched_blackouts(&weeks, &blackouts), vec![("Alice".to_string(), stray)]);
    }
}
