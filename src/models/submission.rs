use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Language, SubmissionStatus};

/// Row of the submission history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmissionSummary {
    pub id: i64,
    pub problem_id: i64,
    pub problem_title: String,
    pub status: SubmissionStatus,
    pub language: String,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub submitted_at: DateTime<Utc>,
}

/// Outcome of one test case in a graded submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCaseResult {
    #[serde(default)]
    pub test_case_id: Option<i64>,
    pub passed: bool,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub actual_output: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl TestCaseResult {
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub problem_id: i64,
    pub problem_title: String,
    pub code: String,
    pub language: String,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub test_case_results: Option<Vec<TestCaseResult>>,
    #[serde(deserialize_with = "super::time::deserialize")]
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn language(&self) -> Option<Language> {
        Language::from_id(&self.language)
    }

    pub fn test_results(&self) -> &[TestCaseResult] {
        self.test_case_results.as_deref().unwrap_or(&[])
    }

    /// File name used when exporting the code.
    pub fn export_file_name(&self) -> String {
        let ext = self.language().map(|l| l.extension()).unwrap_or("txt");
        let slug: String = self
            .problem_title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("submission-{}-{}.{}", self.id, slug, ext)
    }
}

/// `POST /compiler/run-code/`
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest {
    pub code: String,
    pub language: Language,
    pub input: String,
}

/// Output of an ad-hoc run; `error` flags stderr/timeout output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunResult {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: bool,
}

/// `POST /compiler/submit-solution/`
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub problem_id: i64,
    pub code: String,
    pub language: Language,
}

/// Grading result returned right after a submit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Verdict {
    pub submission_id: i64,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub test_results: Vec<TestCaseResult>,
}

impl Verdict {
    pub fn first_failure(&self) -> Option<&TestCaseResult> {
        self.test_results.iter().find(|t| !t.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(title: &str, language: &str) -> Submission {
        Submission {
            id: 12,
            problem_id: 3,
            problem_title: title.to_string(),
            code: String::new(),
            language: language.to_string(),
            status: SubmissionStatus::Accepted,
            runtime: None,
            memory: None,
            test_case_results: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            submission("Two  Sum Again", "python").export_file_name(),
            "submission-12-Two-Sum-Again.py"
        );
        assert_eq!(
            submission("X", "brainfuck").export_file_name(),
            "submission-12-X.txt"
        );
    }

    #[test]
    fn test_null_results_read_as_empty() {
        let body = r#"{"id": 1, "problem_id": 2, "problem_title": "P", "code": "x",
            "language": "rust", "status": "pending", "runtime": null, "memory": null,
            "test_case_results": null, "submitted_at": "2024-05-01T12:00:00Z"}"#;
        let parsed: Submission = serde_json::from_str(body).unwrap();
        assert!(parsed.test_results().is_empty());
        assert_eq!(parsed.language(), Some(Language::Rust));
    }

    #[test]
    fn test_verdict_first_failure() {
        let body = r#"{"submission_id": 9, "status": "wrong_answer", "runtime": null, "memory": null,
            "test_results": [
                {"test_case_id": 1, "passed": true, "input": "1", "expected_output": "1", "actual_output": "1", "error": null},
                {"test_case_id": 2, "passed": false, "input": "2", "expected_output": "4", "actual_output": "3", "error": null}
            ]}"#;
        let verdict: Verdict = serde_json::from_str(body).unwrap();
        assert_eq!(verdict.first_failure().unwrap().test_case_id, Some(2));
    }
}
