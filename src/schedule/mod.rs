pub mod types;
pub mod filter;
pub mod attempt;
pub mod search;
pub mod weeks;

pub use types::{Assignment, Blackouts, Person, ResultSet, Week};
pub use search::{generate, generate_with, CancelToken};
pub use weeks::{parse_date, unmatched_blackouts, week_range};
