//! Structured recommendation lists pulled out of parsed feedback.

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, TagEnd};
use regex::Regex;

use super::Section;

/// `- item`, `* item`, `+ item`, `1. item`, `1) item`
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s+(.+)$").expect("Invalid list item regex"));

/// `[title](url)` optionally followed by ` - note`
static LINK_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?P<title>[^\]]+)\]\((?P<url>[^)\s]*)\)\s*(?:[-:\u{2013}\u{2014}]\s*(?P<note>.+))?$")
        .expect("Invalid link item regex")
});

/// In-app problem links such as `/questions/5`.
static PROBLEM_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/questions/(\d+)/?$").expect("Invalid problem link regex"));

/// `Score: 85/100`, `overall score of 72%`
static SCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)score\D{0,20}?(\d{1,3})\s*(?:/\s*100|%)").expect("Invalid score regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationKind {
    Video,
    Course,
    Book,
    Problem,
    ErrorToAvoid,
    Suggestion,
}

impl RecommendationKind {
    /// Classify a section by its title. Order matters: "Practice Problems"
    /// must not fall into the error bucket via "problem".
    pub fn from_title(title: &str) -> Option<Self> {
        let title = title.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| title.contains(w));

        if has(&["video", "youtube"]) {
            Some(RecommendationKind::Video)
        } else if has(&["course"]) {
            Some(RecommendationKind::Course)
        } else if has(&["book", "reading"]) {
            Some(RecommendationKind::Book)
        } else if has(&["problem", "practice", "exercise"]) {
            Some(RecommendationKind::Problem)
        } else if has(&["issue", "avoid", "mistake", "error", "pitfall"]) {
            Some(RecommendationKind::ErrorToAvoid)
        } else if has(&["suggestion", "pattern", "improvement", "tip"]) {
            Some(RecommendationKind::Suggestion)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationKind::Video => "Videos",
            RecommendationKind::Course => "Courses",
            RecommendationKind::Book => "Books",
            RecommendationKind::Problem => "Practice Problems",
            RecommendationKind::ErrorToAvoid => "Errors to Avoid",
            RecommendationKind::Suggestion => "Suggestions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationItem {
    pub title: String,
    pub url: Option<String>,
    pub note: Option<String>,
}

impl RecommendationItem {
    /// Parse the text after a list marker.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(caps) = LINK_ITEM.captures(raw) {
            let url = caps
                .name("url")
                .map(|m| m.as_str().to_string())
                .filter(|u| !u.is_empty() && u != "#");
            return Self {
                title: plain_text(&caps["title"]),
                url,
                note: caps.name("note").map(|m| plain_text(m.as_str())),
            };
        }
        Self {
            title: plain_text(raw),
            url: None,
            note: None,
        }
    }

    /// Problem id for in-app links like `/questions/5`.
    pub fn problem_id(&self) -> Option<i64> {
        let url = self.url.as_deref()?;
        PROBLEM_LINK
            .captures(url)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// External http(s) link, if any.
    pub fn external_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|u| u.starts_with("http://") || u.starts_with("https://"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendations {
    pub videos: Vec<RecommendationItem>,
    pub courses: Vec<RecommendationItem>,
    pub books: Vec<RecommendationItem>,
    pub problems: Vec<RecommendationItem>,
    pub errors_to_avoid: Vec<RecommendationItem>,
    pub suggestions: Vec<RecommendationItem>,
}

impl Recommendations {
    pub fn list(&self, kind: RecommendationKind) -> &[RecommendationItem] {
        match kind {
            RecommendationKind::Video => &self.videos,
            RecommendationKind::Course => &self.courses,
            RecommendationKind::Book => &self.books,
            RecommendationKind::Problem => &self.problems,
            RecommendationKind::ErrorToAvoid => &self.errors_to_avoid,
            RecommendationKind::Suggestion => &self.suggestions,
        }
    }

    fn list_mut(&mut self, kind: RecommendationKind) -> &mut Vec<RecommendationItem> {
        match kind {
            RecommendationKind::Video => &mut self.videos,
            RecommendationKind::Course => &mut self.courses,
            RecommendationKind::Book => &mut self.books,
            RecommendationKind::Problem => &mut self.problems,
            RecommendationKind::ErrorToAvoid => &mut self.errors_to_avoid,
            RecommendationKind::Suggestion => &mut self.suggestions,
        }
    }

    /// Non-empty lists in display order.
    pub fn non_empty(&self) -> Vec<(RecommendationKind, &[RecommendationItem])> {
        [
            RecommendationKind::Problem,
            RecommendationKind::Video,
            RecommendationKind::Course,
            RecommendationKind::Book,
            RecommendationKind::ErrorToAvoid,
            RecommendationKind::Suggestion,
        ]
        .into_iter()
        .map(|kind| (kind, self.list(kind)))
        .filter(|(_, items)| !items.is_empty())
        .collect()
    }

    /// Every item in display order, for cursor selection.
    pub fn items(&self) -> Vec<(RecommendationKind, &RecommendationItem)> {
        self.non_empty()
            .into_iter()
            .flat_map(|(kind, items)| items.iter().map(move |item| (kind, item)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty().is_empty()
    }
}

/// Collect list items of every section whose title names a recommendation kind.
pub fn extract_recommendations(sections: &[Section]) -> Recommendations {
    let mut recommendations = Recommendations::default();
    for section in sections {
        let Some(kind) = RecommendationKind::from_title(&section.title) else {
            continue;
        };
        let items = section
            .body
            .lines()
            .filter_map(|line| LIST_ITEM.captures(line))
            .map(|caps| RecommendationItem::parse(&caps[1]));
        recommendations.list_mut(kind).extend(items);
    }
    recommendations
}

/// First `NN/100` or `NN%` score mentioned next to the word "score", clamped to 100.
pub fn extract_score(text: &str) -> Option<u8> {
    SCORE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u16>().ok())
        .map(|score| score.min(100) as u8)
}

/// Flatten inline markdown (emphasis, links, code) to plain text.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph) if !out.is_empty() => out.push(' '),
            _ => {}
        }
    }
    out.trim().to_string()
}
