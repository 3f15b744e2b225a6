use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_submissions: u64,
    #[serde(default)]
    pub accepted_submissions: u64,
    /// Percentage, 0-100.
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub total_problems: u64,
    #[serde(default)]
    pub solved_problems: u64,
}

impl DashboardStats {
    /// Solved share of the catalog as a 0.0-1.0 ratio for gauges.
    pub fn progress_ratio(&self) -> f64 {
        if self.total_problems == 0 {
            0.0
        } else {
            (self.solved_problems as f64 / self.total_problems as f64).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpcomingContest {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub upcoming_contests: Vec<UpcomingContest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_shape() {
        let body = r#"{
            "stats": {"total_submissions": 10, "accepted_submissions": 4, "accuracy": 40.0,
                      "total_problems": 20, "solved_problems": 5},
            "upcoming_contests": [{"id": 1, "name": "Weekly", "start_time": "2030-01-01T10:00:00+00:00"}]
        }"#;
        let data: DashboardData = serde_json::from_str(body).unwrap();
        assert_eq!(data.stats.accepted_submissions, 4);
        assert_eq!(data.stats.progress_ratio(), 0.25);
        assert_eq!(data.upcoming_contests[0].name, "Weekly");
    }

    #[test]
    fn test_progress_ratio_empty_catalog() {
        assert_eq!(DashboardStats::default().progress_ratio(), 0.0);
    }
}
