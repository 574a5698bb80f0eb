use thiserror::Error;

/// Errors raised at the boundary of the generator: input files, dates, config
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{0} is not a Friday")]
    NotAnchorWeekday(String),
    #[error("end date {end} must be after start date {start}")]
    EmptyRange { start: String, end: String },
    #[error("duplicate person id {0} in roster")]
    DuplicatePerson(u32),
    #[error("no personnel found, add personnel first")]
    EmptyRoster,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{path}, line {line}: {message}")]
    Input {
        path: String,
        line: u64,
        message: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
