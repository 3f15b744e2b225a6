use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Difficulty, Language};

/// Where a contest sits relative to a point in time.
///
/// Derived purely from the backend's timestamps; the backend alone decides
/// whether a submission is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContestStatus {
    Active,
    Upcoming,
    Ended,
}

impl ContestStatus {
    pub fn at(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start > now {
            ContestStatus::Upcoming
        } else if now <= end {
            ContestStatus::Active
        } else {
            ContestStatus::Ended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContestStatus::Active => "Active",
            ContestStatus::Upcoming => "Upcoming",
            ContestStatus::Ended => "Ended",
        }
    }
}

fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes().max(0)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContestSummary {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub problem_count: u32,
    #[serde(default)]
    pub is_active: bool,
}

impl ContestSummary {
    pub fn status_at(&self, now: DateTime<Utc>) -> ContestStatus {
        ContestStatus::at(self.start_time, self.end_time, now)
    }

    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContestProblem {
    pub id: i64,
    pub title: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contest {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub problems: Vec<ContestProblem>,
    #[serde(default)]
    pub is_active: bool,
}

impl Contest {
    pub fn status_at(&self, now: DateTime<Utc>) -> ContestStatus {
        ContestStatus::at(self.start_time, self.end_time, now)
    }

    /// Whole minutes until the end, only while the contest is running.
    pub fn minutes_left(&self, now: DateTime<Utc>) -> Option<u64> {
        if self.status_at(now) != ContestStatus::Active {
            return None;
        }
        let minutes = (self.end_time - now).num_minutes();
        (minutes > 0).then_some(minutes as u64)
    }

    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start_time, self.end_time)
    }
}

/// `POST /contests/create/`. Times are sent as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContest {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub problem_ids: Vec<i64>,
}

/// `POST /contests/submit/`
#[derive(Debug, Clone, Serialize)]
pub struct ContestSubmitRequest {
    pub contest_id: i64,
    pub problem_id: i64,
    pub code: String,
    pub language: Language,
}
