//! AI feedback handling: text to sections, sections to recommendation lists.
//!
//! Both steps are pure functions with no knowledge of rendering.

mod parser;
mod recommendations;

pub use parser::{parse_feedback, parse_heading, Section};
pub use recommendations::{
    extract_recommendations, extract_score, plain_text, RecommendationItem, RecommendationKind,
    Recommendations,
};

use crate::models::ReviewResponse;

/// A review ready for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReview {
    pub review_id: Option<i64>,
    /// Backend score if sent, otherwise one mentioned in the text.
    pub score: Option<u8>,
    pub sections: Vec<Section>,
    pub recommendations: Recommendations,
}

impl ParsedReview {
    pub fn from_response(response: &ReviewResponse) -> Self {
        let sections = parse_feedback(&response.feedback);
        Self {
            review_id: response.review_id,
            score: response
                .overall_score
                .map(|s| s.min(100))
                .or_else(|| extract_score(&response.feedback)),
            recommendations: extract_recommendations(&sections),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_score_wins() {
        let response = ReviewResponse {
            feedback: "## Overall\nScore: 40/100".to_string(),
            review_id: Some(1),
            overall_score: Some(90),
        };
        assert_eq!(ParsedReview::from_response(&response).score, Some(90));
    }

    #[test]
    fn test_score_falls_back_to_text() {
        let response = ReviewResponse {
            feedback: "## Overall\nScore: 40/100".to_string(),
            ..Default::default()
        };
        let parsed = ParsedReview::from_response(&response);
        assert_eq!(parsed.score, Some(40));
        assert_eq!(parsed.sections.len(), 1);
    }
}
