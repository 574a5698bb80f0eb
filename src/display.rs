use std::fs::File;
use std::io::Write;

use crate::schedule::{ResultSet, Week};

/// Renders every option week by week, in the format: Week N (YYYY-MM-DD): name
pub fn format_result_set(result: &ResultSet, weeks: &[Week]) -> String {
    let mut out = String::new();

    if result.is_empty() {
        out.push_str("No valid schedules found.\n");
        out.push_str("Try adjusting the personnel, groups, or time period.\n");
        return out;
    }

    out.push_str(&format!("Generated {} valid schedule(s):\n\n", result.len()));
    for (i, assignment) in result.assignments.iter().enumerate() {
        out.push_str(&format!("Schedule Option {}:\n", i + 1));
        out.push_str(&"-".repeat(50));
        out.push('\n');
        for (j, (week, slot)) in weeks.iter().zip(assignment.slots()).enumerate() {
            out.push_str(&format!("Week {} ({}): {}\n", j + 1, week, slot));
        }
        out.push('\n');
    }
    out
}

/// Prints the generated options to stdout
pub fn print_result_set(result: &ResultSet, weeks: &[Week]) {
    println!("\n=== Call Schedule Options ===");
    println!("Weeks: {}, attempts used: {}", weeks.len(), result.attempts);
    print!("{}", format_result_set(result, weeks));
}

/// Writes the generated options to a text file
pub fn write_result_set_to_file(
    result: &ResultSet,
    weeks: &[Week],
    filename: &str,
) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(format_result_set(result, weeks).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Slot;
    use crate::schedule::{parse_date, week_range, Assignment, Person};

    #[test]
    fn test_format_lists_each_option() {
        let weeks = week_range(parse_date("2025-01-03").unwrap(), parse_date("2025-01-10").unwrap()).unwrap();
        let result = ResultSet {
            assignments: vec![
                Assignment(vec![Slot::filled(&Person::new(1, "Alice", Some("A"))), Slot::Blank]),
                Assignment(vec![Slot::Blank, Slot::filled(&Person::new(2, "Bob", None))]),
            ],
            attempts: 12,
        };

        let text = format_result_set(&result, &weeks);
        assert!(text.starts_with("Generated 2 valid schedule(s):\n\nSchedule Option 1:\n"));
        assert!(text.contains("Schedule Option 1:\n"));
        assert!(text.contains("Week 1 (2025-01-03): Alice\nWeek 2 (2025-01-10): BLANK\n"));
        assert!(text.contains("Schedule Option 2:\n"));
        assert!(text.contains("Week 2 (2025-01-10): Bob\n"));
    }

    #[test]
    fn test_format_empty_result() {
        let text = format_result_set(&ResultSet::default(), &[]);
        assert!(text.starts_with("No valid schedules found."));
    }
}
