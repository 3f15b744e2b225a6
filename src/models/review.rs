use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `POST /compiler/ai-review/`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_text: Option<String>,
}

/// Markdown feedback produced by the backend's reviewer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewResponse {
    pub feedback: String,
    #[serde(default)]
    pub review_id: Option<i64>,
    /// 0-100 when the reviewer grades the work.
    #[serde(default)]
    pub overall_score: Option<u8>,
}

/// `GET /ai-review/user-progress/`.
///
/// The payload has no fixed schema, so it is kept as ordered key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserProgress {
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl UserProgress {
    /// Scalar fields rendered as `(label, value)` rows.
    pub fn rows(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => if *b { "yes" } else { "no" }.to_string(),
                    serde_json::Value::Array(items) => format!("{} items", items.len()),
                    _ => return None,
                };
                Some((key.replace('_', " "), rendered))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_request_skips_absent_fields() {
        let request = ReviewRequest {
            code: Some("print(1)".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"code":"print(1)"}"#
        );
    }

    #[test]
    fn test_user_progress_rows() {
        let progress: UserProgress = serde_json::from_str(
            r#"{"total_reviews": 3, "streak": true, "recent": [1, 2], "nested": {"a": 1}}"#,
        )
        .unwrap();
        let rows = progress.rows();
        assert_eq!(rows.len(), 3);
        assert!(rows.contains(&("total reviews".to_string(), "3".to_string())));
    }
}
