//! Project records shown in the project table and card views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FilterRecord;

/// Number of schedule steps every project goes through.
pub const SCHEDULE_STEPS: usize = 8;

/// Project priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse the numeric level (1 = low, 3 = high).
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Priority::Low),
            2 => Some(Priority::Medium),
            3 => Some(Priority::High),
            _ => None,
        }
    }
}

/// Status of a schedule step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Not planned yet.
    Unplanned,
    Planned,
    Changed,
    Completed,
}

impl ScheduleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Unplanned => "-",
            ScheduleStatus::Planned => "Planned",
            ScheduleStatus::Changed => "Changed",
            ScheduleStatus::Completed => "Completed",
        }
    }
}

/// One step of a project schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStep {
    /// 1-based step number.
    pub id: usize,
    pub planned: bool,
    pub changed: bool,
    pub completed: bool,
    pub date: NaiveDate,
}

impl ScheduleStep {
    /// The most advanced status the step has reached.
    pub fn status(&self) -> ScheduleStatus {
        if self.completed {
            ScheduleStatus::Completed
        } else if self.changed {
            ScheduleStatus::Changed
        } else if self.planned {
            ScheduleStatus::Planned
        } else {
            ScheduleStatus::Unplanned
        }
    }
}

/// Index of the step a project is currently on: the first step that is not
/// completed, or the last step once everything is completed.
pub fn current_step_index(steps: &[ScheduleStep]) -> usize {
    steps
        .iter()
        .position(|step| !step.completed)
        .unwrap_or(steps.len().saturating_sub(1))
}

/// A project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub type_id: u32,
    pub type_name: String,
    pub priority: Priority,
    pub schedule: Vec<ScheduleStep>,
    /// 0-based index into `schedule`.
    pub current_step: usize,
    /// Percent complete, if reported.
    pub progress: Option<u8>,
    pub manager: String,
    pub budget: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Project {
    /// Identifier of the current schedule step (1-based, as a string).
    pub fn schedule_id(&self) -> String {
        (self.current_step + 1).to_string()
    }

    /// Status of the current schedule step.
    pub fn current_status(&self) -> ScheduleStatus {
        self.schedule
            .get(self.current_step)
            .map(ScheduleStep::status)
            .unwrap_or(ScheduleStatus::Unplanned)
    }
}

impl FilterRecord for Project {
    fn type_key(&self) -> String {
        self.type_id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn schedule_key(&self) -> String {
        self.schedule_id()
    }
}
