use std::io;
use std::path::Path;

use csv::{Terminator, Writer, WriterBuilder};

use crate::error::ScheduleError;
use crate::schedule::{ResultSet, Week};

/// Writes all options side by side as CSV: one row per week, one column per option
///
/// Layout: `Week, Week Start (Friday), Option 1, Option 2, ...`. Blank weeks
/// are written as `BLANK`.
pub fn write_result_set_csv<W: io::Write>(
    writer: W,
    result: &ResultSet,
    weeks: &[Week],
) -> Result<(), ScheduleError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    write_rows(&mut wtr, result, weeks)?;
    wtr.flush()?;
    Ok(())
}

/// Exports the options to a CSV file, replacing any existing file
pub fn export_result_set_to_csv(
    result: &ResultSet,
    weeks: &[Week],
    csv_path: &Path,
) -> Result<(), ScheduleError> {
    let file = std::fs::File::create(csv_path)?;
    write_result_set_csv(file, result, weeks)
}

/// Renders the CSV export into memory
pub fn result_set_to_csv_string(result: &ResultSet, weeks: &[Week]) -> Result<String, ScheduleError> {
    let mut buf = Vec::new();
    write_result_set_csv(&mut buf, result, weeks)?;
    String::from_utf8(buf).map_err(|e| ScheduleError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn write_rows<W: io::Write>(
    wtr: &mut Writer<W>,
    result: &ResultSet,
    weeks: &[Week],
) -> Result<(), ScheduleError> {
    let mut header = vec!["Week".to_string(), "Week Start (Friday)".to_string()];
    header.extend((1..=result.len()).map(|i| format!("Option {i}")));
    wtr.write_record(&header)?;

    for (index, week) in weeks.iter().enumerate() {
        let mut row = vec![format!("Week {}", index + 1), week.to_string()];
        row.extend(
            result
                .assignments
                .iter()
                .map(|a| a.slots().get(index).map(ToString::to_string).unwrap_or_default()),
        );
        wtr.write_record(&row)?;
    }
    Ok(())
}
