use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize, Serializer};

/// Weekday every week token is anchored to
pub const WEEK_ANCHOR: Weekday = Weekday::Fri;

/// Sentinel text for a week nobody could fill
pub const BLANK: &str = "BLANK";

/// A member of the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
}

impl Person {
    pub fn new(id: u32, name: impl Into<String>, group: Option<&str>) -> Self {
        Self {
            id,
            name: name.into(),
            group: group.map(str::to_string),
        }
    }
}

/// One scheduling period, identified by the anchor-weekday date it starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(NaiveDate);

impl Week {
    /// Week token for a date that is already on the anchor weekday
    pub fn from_anchor(date: NaiveDate) -> Option<Self> {
        (date.weekday() == WEEK_ANCHOR).then_some(Self(date))
    }

    /// Normalizes any date to the anchor weekday on or before it
    pub fn containing(date: NaiveDate) -> Self {
        let offset = (7 + date.weekday().num_days_from_monday()
            - WEEK_ANCHOR.num_days_from_monday())
            % 7;
        Self(date - Duration::days(i64::from(offset)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + Duration::days(7))
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Person name -> weeks that person cannot take
pub type Blackouts = HashMap<String, HashSet<Week>>;

/// What one week of an assignment holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Filled { person_id: u32, name: String },
    Blank,
}

impl Slot {
    pub fn filled(person: &Person) -> Self {
        Slot::Filled {
            person_id: person.id,
            name: person.name.clone(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Slot::Filled { name, .. } => Some(name),
            Slot::Blank => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Slot::Blank)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(BLANK))
    }
}

// JSON carries the name, or null for a blank week
impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.name().serialize(serializer)
    }
}

/// Week-by-week outcome of one attempt; always as long as the week sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Assignment(pub Vec<Slot>);

impl Assignment {
    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn blank_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_blank()).count()
    }
}

/// Distinct assignments in discovery order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    pub assignments: Vec<Assignment>,
    pub attempts: usize,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Bookkeeping for a single attempt; never outlives it
///
/// People without a group share the `None` cooldown key.
#[derive(Debug, Default)]
pub struct RunState {
    pub used: HashSet<u32>,
    pub last_group_week: HashMap<Option<String>, usize>,
}

impl RunState {
    pub fn record(&mut self, person: &Person, week_index: usize) {
        self.used.insert(person.id);
        self.last_group_week.insert(person.group.clone(), week_index);
    }
}
