use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Difficulty;

/// Row of the problem catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProblemSummary {
    pub id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pending: bool,
}

/// Sample test case shown with the statement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCase {
    pub input_data: String,
    pub expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub is_pending: bool,
}

/// Server-side catalog filters for `GET /problems/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemQuery {
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

impl ProblemQuery {
    /// Query string including the leading `?`, or empty when unfiltered.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(format!("search={}", urlencoding::encode(search.trim())));
        }
        if !self.tags.is_empty() {
            params.push(format!("tags={}", urlencoding::encode(&self.tags.join(","))));
        }
        if let Some(difficulty) = self.difficulty {
            params.push(format!("difficulty={}", difficulty.as_str()));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// A question proposed by a user, awaiting staff review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub constraints: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PendingQuestion {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_by: String,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_approved: bool,
}

/// Which moderation queue to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingFilter {
    All,
    #[default]
    Pending,
    Approved,
}

impl PendingFilter {
    pub fn query(&self) -> &'static str {
        match self {
            PendingFilter::All => "",
            PendingFilter::Pending => "?approved=false",
            PendingFilter::Approved => "?approved=true",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PendingFilter::All => "All",
            PendingFilter::Pending => "Pending",
            PendingFilter::Approved => "Approved",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            PendingFilter::Pending => PendingFilter::Approved,
            PendingFilter::Approved => PendingFilter::All,
            PendingFilter::All => PendingFilter::Pending,
        }
    }
}

/// `{"success": true, "message": "..."}` returned by moderation actions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encodes_filters() {
        let query = ProblemQuery {
            search: Some("two sum".to_string()),
            tags: vec!["array".to_string(), "hash table".to_string()],
            difficulty: Some(Difficulty::Easy),
        };
        assert_eq!(
            query.to_query_string(),
            "?search=two%20sum&tags=array%2Chash%20table&difficulty=easy"
        );
        assert_eq!(ProblemQuery::default().to_query_string(), "");
    }

    #[test]
    fn test_problem_detail_shape() {
        let body = r#"{"id": 3, "title": "Sum", "description": "Add.", "difficulty": "easy",
            "constraints": "", "tags": ["math"],
            "test_cases": [{"input_data": "1 2", "expected_output": "3"}], "is_pending": false}"#;
        let problem: Problem = serde_json::from_str(body).unwrap();
        assert_eq!(problem.test_cases.len(), 1);
        assert_eq!(problem.test_cases[0].expected_output, "3");
    }

    #[test]
    fn test_pending_filter_cycle() {
        assert_eq!(PendingFilter::default().query(), "?approved=false");
        assert_eq!(PendingFilter::Pending.next().next().next(), PendingFilter::Pending);
    }
}
