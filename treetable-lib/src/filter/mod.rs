//! Record filtering for project list views.
//!
//! A [`ProjectFilter`] has three dimensions: record type, name and schedule.
//! A record passes when every non-empty dimension matches. Set dimensions
//! match if the record's value is any of the selected values, and an empty
//! dimension never constrains anything.

mod project;

pub use project::*;

use std::collections::BTreeSet;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// A record that can be narrowed by a [`ProjectFilter`].
pub trait FilterRecord {
    /// Type identifier matched against the type set.
    fn type_key(&self) -> String;

    /// Display name matched against the name query.
    fn name(&self) -> &str;

    /// Schedule identifier matched against the schedule set.
    fn schedule_key(&self) -> String;
}

/// How the name query is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameMatch {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Case-insensitive fuzzy match (characters in order, gaps allowed).
    Fuzzy,
}

/// Active filters of a project list.
///
/// # Example
///
/// ```
/// use treetable_lib::filter::{FilterRecord, ProjectFilter};
///
/// struct Row(&'static str, &'static str);
///
/// impl FilterRecord for Row {
///     fn type_key(&self) -> String { self.0.to_string() }
///     fn name(&self) -> &str { self.1 }
///     fn schedule_key(&self) -> String { "1".to_string() }
/// }
///
/// let rows = [Row("A", "Alpha"), Row("B", "Beta")];
/// let filter = ProjectFilter::new().with_type("A");
/// let matched: Vec<&str> = filter.apply(&rows).iter().map(|r| r.1).collect();
/// assert_eq!(matched, vec!["Alpha"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    types: BTreeSet<String>,
    name: String,
    schedules: BTreeSet<String>,
    name_match: NameMatch,
}

impl ProjectFilter {
    /// Creates a filter that passes everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type to the type set.
    pub fn with_type(mut self, type_key: impl Into<String>) -> Self {
        self.types.insert(type_key.into());
        self
    }

    /// Sets the name query.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a schedule to the schedule set.
    pub fn with_schedule(mut self, schedule_key: impl Into<String>) -> Self {
        self.schedules.insert(schedule_key.into());
        self
    }

    /// Sets the name matching mode.
    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    /// Adds the type if absent, removes it if present.
    ///
    /// Returns whether the type is selected afterwards.
    pub fn toggle_type(&mut self, type_key: &str) -> bool {
        toggle(&mut self.types, type_key)
    }

    /// Adds the schedule if absent, removes it if present.
    ///
    /// Returns whether the schedule is selected afterwards.
    pub fn toggle_schedule(&mut self, schedule_key: &str) -> bool {
        toggle(&mut self.schedules, schedule_key)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_name_match(&mut self, name_match: NameMatch) {
        self.name_match = name_match;
    }

    /// Resets every dimension.
    pub fn clear(&mut self) {
        self.types.clear();
        self.name.clear();
        self.schedules.clear();
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schedules(&self) -> &BTreeSet<String> {
        &self.schedules
    }

    /// Whether no dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of dimensions currently constraining records.
    pub fn active_count(&self) -> usize {
        [
            !self.types.is_empty(),
            !self.name.is_empty(),
            !self.schedules.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Check a single record.
    pub fn matches<R: FilterRecord>(&self, record: &R) -> bool {
        self.name_matcher().passes(self, record)
    }

    /// Records passing every active dimension, in input order.
    pub fn apply<'a, R: FilterRecord>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut matcher = self.name_matcher();
        let matched: Vec<&R> = records
            .iter()
            .filter(|record| matcher.passes(self, *record))
            .collect();
        log::debug!(
            "[filter] {} of {} records pass {} active filters",
            matched.len(),
            records.len(),
            self.active_count()
        );
        matched
    }

    fn name_matcher(&self) -> NameMatcher {
        if self.name.is_empty() {
            return NameMatcher::Any;
        }
        match self.name_match {
            NameMatch::Substring => NameMatcher::Substring(self.name.to_lowercase()),
            NameMatch::Fuzzy => NameMatcher::Fuzzy {
                pattern: Pattern::new(
                    &self.name,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
                matcher: Box::new(Matcher::new(Config::DEFAULT)),
            },
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, key: &str) -> bool {
    if set.remove(key) {
        false
    } else {
        set.insert(key.to_string());
        true
    }
}

/// Name query prepared once per filtering pass.
enum NameMatcher {
    Any,
    Substring(String),
    Fuzzy {
        pattern: Pattern,
        matcher: Box<Matcher>,
    },
}

impl NameMatcher {
    fn passes<R: FilterRecord>(&mut self, filter: &ProjectFilter, record: &R) -> bool {
        if !filter.types.is_empty() && !filter.types.contains(&record.type_key()) {
            return false;
        }
        if !filter.schedules.is_empty() && !filter.schedules.contains(&record.schedule_key()) {
            return false;
        }
        match self {
            NameMatcher::Any => true,
            NameMatcher::Substring(needle) => record.name().to_lowercase().contains(needle.as_str()),
            NameMatcher::Fuzzy { pattern, matcher } => {
                let mut buf = Vec::new();
                let haystack = Utf32Str::new(record.name(), &mut buf);
                pattern.score(haystack, &mut **matcher).is_some()
            }
        }
    }
}
