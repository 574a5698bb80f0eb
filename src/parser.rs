use csv::{Reader, StringRecord};
use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ScheduleError;
use crate::schedule::{parse_date, Blackouts, Person, Week};

/// Finds a column by header name, falling back to a fixed position
fn column(headers: &StringRecord, name: &str, fallback: usize) -> usize {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .unwrap_or(fallback)
}

fn field<'r>(record: &'r StringRecord, col: usize) -> &'r str {
    record.get(col).unwrap_or("").trim()
}

/// Cleans up a roster from any source before it reaches the generator
///
/// Names and groups are trimmed, people without a name are dropped and an
/// empty group means no group. Duplicate ids are rejected. Duplicate names
/// are kept but logged, since every rendering shows names only.
pub fn normalize_roster(personnel: Vec<Person>) -> Result<Vec<Person>, ScheduleError> {
    let mut seen_ids = HashSet::new();
    let mut roster = Vec::with_capacity(personnel.len());

    for person in personnel {
        let name = person.name.trim();
        if name.is_empty() {
            warn!(id = person.id, "Skipping person without a name");
            continue;
        }
        if !seen_ids.insert(person.id) {
            return Err(ScheduleError::DuplicatePerson(person.id));
        }
        let group = person.group.as_deref().map(str::trim).filter(|g| !g.is_empty());
        roster.push(Person::new(person.id, name, group));
    }

    for name in duplicate_names(&roster) {
        warn!(name = %name, "Several people share this name; their options will look alike");
    }
    Ok(roster)
}

/// Names that appear more than once in a roster
pub fn duplicate_names(personnel: &[Person]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = personnel
        .iter()
        .filter(|p| !seen.insert(p.name.as_str()))
        .map(|p| p.name.clone())
        .collect();
    duplicates.sort();
    duplicates.dedup();
    duplicates
}

/// Loads the roster from a CSV file with `id`, `name` and `group` columns
///
/// Row order is kept. Rows with a non-numeric id are skipped; the rest goes
/// through [`normalize_roster`].
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Person>, ScheduleError> {
    let path = csv_path.as_ref().display().to_string();
    let mut reader = Reader::from_path(csv_path)?;

    let headers = reader.headers()?.clone();
    let id_col = column(&headers, "id", 0);
    let name_col = column(&headers, "name", 1);
    let group_col = column(&headers, "group", 2);

    let mut personnel = Vec::new();
    for result in reader.records() {
        let record = result?;

        let Ok(id) = field(&record, id_col).parse::<u32>() else {
            warn!(path = %path, line = record_line(&record), "Skipping roster row without a numeric id");
            continue;
        };
        personnel.push(Person::new(id, field(&record, name_col), Some(field(&record, group_col))));
    }

    let personnel = normalize_roster(personnel)?;
    debug!(path = %path, count = personnel.len(), "Loaded roster");
    Ok(personnel)
}

/// Loads per-person blackout weeks from a CSV file with `name` and `week` columns
///
/// Dates are normalized to the Friday that starts their week.
pub fn load_blackouts<P: AsRef<Path>>(csv_path: P) -> Result<Blackouts, ScheduleError> {
    let path = csv_path.as_ref().display().to_string();
    let mut reader = Reader::from_path(csv_path)?;

    let headers = reader.headers()?.clone();
    let name_col = column(&headers, "name", 0);
    let week_col = column(&headers, "week", 1);

    let mut blackouts = Blackouts::new();
    for result in reader.records() {
        let record = result?;

        let name = field(&record, name_col);
        if name.is_empty() {
            continue;
        }

        let raw_week = field(&record, week_col);
        let date = parse_date(raw_week).map_err(|e| ScheduleError::Input {
            path: path.clone(),
            line: record_line(&record),
            message: e.to_string(),
        })?;

        blackouts
            .entry(name.to_string())
            .or_default()
            .insert(Week::containing(date));
    }

    debug!(path = %path, people = blackouts.len(), "Loaded blackouts");
    Ok(blackouts)
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
