//! Client-side filtering and sorting of fetched lists.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::models::{
    ContestStatus, ContestSummary, Difficulty, Language, ProblemSummary, SubmissionStatus,
    SubmissionSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProblemSort {
    #[default]
    Title,
    Difficulty,
    TagCount,
}

impl ProblemSort {
    pub fn label(&self) -> &'static str {
        match self {
            ProblemSort::Title => "title",
            ProblemSort::Difficulty => "difficulty",
            ProblemSort::TagCount => "tags",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ProblemSort::Title => ProblemSort::Difficulty,
            ProblemSort::Difficulty => ProblemSort::TagCount,
            ProblemSort::TagCount => ProblemSort::Title,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemFilter {
    pub search: String,
    /// `None` means all difficulties.
    pub difficulty: Option<Difficulty>,
    /// A problem must carry every selected tag.
    pub tags: BTreeSet<String>,
    pub sort: ProblemSort,
}

impl ProblemFilter {
    pub fn matches(&self, problem: &ProblemSummary) -> bool {
        let search = self.search.trim().to_lowercase();
        (search.is_empty() || problem.title.to_lowercase().contains(&search))
            && self.difficulty.is_none_or(|d| problem.difficulty == d)
            && self.tags.iter().all(|tag| problem.tags.contains(tag))
    }

    /// Matching problems in sort order. Sorting is stable.
    pub fn apply<'a>(&self, problems: &'a [ProblemSummary]) -> Vec<&'a ProblemSummary> {
        let mut out: Vec<_> = problems.iter().filter(|p| self.matches(p)).collect();
        match self.sort {
            ProblemSort::Title => {
                out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            }
            ProblemSort::Difficulty => out.sort_by_key(|p| p.difficulty),
            ProblemSort::TagCount => out.sort_by_key(|p| p.tags.len()),
        }
        out
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    /// all -> easy -> medium -> hard -> all
    pub fn cycle_difficulty(&mut self) {
        self.difficulty = match self.difficulty {
            None => Some(Difficulty::Easy),
            Some(Difficulty::Easy) => Some(Difficulty::Medium),
            Some(Difficulty::Medium) => Some(Difficulty::Hard),
            Some(Difficulty::Hard) => None,
        };
    }
}

/// Every tag used in the catalog, sorted.
pub fn all_tags(problems: &[ProblemSummary]) -> Vec<String> {
    problems
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub search: String,
    pub status: Option<SubmissionStatus>,
    pub language: Option<Language>,
}

impl SubmissionFilter {
    pub fn matches(&self, submission: &SubmissionSummary) -> bool {
        let search = self.search.trim().to_lowercase();
        (search.is_empty() || submission.problem_title.to_lowercase().contains(&search))
            && self.status.is_none_or(|s| submission.status == s)
            && self
                .language
                .is_none_or(|l| submission.language.eq_ignore_ascii_case(l.id()))
    }

    pub fn apply<'a>(&self, submissions: &'a [SubmissionSummary]) -> Vec<&'a SubmissionSummary> {
        submissions.iter().filter(|s| self.matches(s)).collect()
    }

    pub fn cycle_status(&mut self) {
        self.status = cycle(&SubmissionStatus::ALL, self.status);
    }

    pub fn cycle_language(&mut self) {
        self.language = cycle(&Language::ALL, self.language);
    }
}

/// None -> first -> ... -> last -> None
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|i| all.get(i + 1).copied()),
    }
}

/// Contests split by status at `now`: active, upcoming (soonest first), ended
/// (most recent first).
pub fn group_contests(
    contests: &[ContestSummary],
    now: DateTime<Utc>,
) -> Vec<(ContestStatus, Vec<&ContestSummary>)> {
    let mut active = Vec::new();
    let mut upcoming = Vec::new();
    let mut ended = Vec::new();
    for contest in contests {
        match contest.status_at(now) {
            ContestStatus::Active => active.push(contest),
            ContestStatus::Upcoming => upcoming.push(contest),
            ContestStatus::Ended => ended.push(contest),
        }
    }
    active.sort_by_key(|c| c.end_time);
    upcoming.sort_by_key(|c| c.start_time);
    ended.sort_by_key(|c| std::cmp::Reverse(c.end_time));

    vec![
        (ContestStatus::Active, active),
        (ContestStatus::Upcoming, upcoming),
        (ContestStatus::Ended, ended),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn problem(id: i64, title: &str, difficulty: Difficulty, tags: &[&str]) -> ProblemSummary {
        ProblemSummary {
            id,
            title: title.to_string(),
            difficulty,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_pending: false,
        }
    }

    fn catalog() -> Vec<ProblemSummary> {
        vec![
            problem(1, "Two Sum", Difficulty::Easy, &["array", "hash-table"]),
            problem(2, "Merge Intervals", Difficulty::Medium, &["array"]),
            problem(3, "Word Ladder", Difficulty::Hard, &["bfs", "graph", "string"]),
            problem(4, "add strings", Difficulty::Easy, &["string"]),
        ]
    }

    fn ids(list: Vec<&ProblemSummary>) -> Vec<i64> {
        list.into_iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = ProblemFilter {
            search: "SUM".into(),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&catalog())), vec![1]);
    }

    #[test]
    fn test_tags_must_all_match() {
        let mut filter = ProblemFilter::default();
        filter.toggle_tag("array");
        assert_eq!(ids(filter.apply(&catalog())), vec![2, 1]);
        filter.toggle_tag("hash-table");
        assert_eq!(ids(filter.apply(&catalog())), vec![1]);
        filter.toggle_tag("hash-table");
        filter.toggle_tag("array");
        assert!(filter.tags.is_empty());
    }

    #[test]
    fn test_sort_modes() {
        let mut filter = ProblemFilter::default();
        assert_eq!(ids(filter.apply(&catalog())), vec![4, 2, 1, 3]);
        filter.sort = ProblemSort::Difficulty;
        assert_eq!(ids(filter.apply(&catalog())), vec![1, 4, 2, 3]);
        filter.sort = ProblemSort::TagCount;
        assert_eq!(ids(filter.apply(&catalog())), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_difficulty_cycle() {
        let mut filter = ProblemFilter::default();
        filter.cycle_difficulty();
        assert_eq!(ids(filter.apply(&catalog())), vec![4, 1]);
        for _ in 0..3 {
            filter.cycle_difficulty();
        }
        assert_eq!(filter.difficulty, None);
    }

    #[test]
    fn test_all_tags_sorted_unique() {
        assert_eq!(
            all_tags(&catalog()),
            vec!["array", "bfs", "graph", "hash-table", "string"]
        );
    }

    fn submission(id: i64, title: &str, status: SubmissionStatus, language: &str) -> SubmissionSummary {
        SubmissionSummary {
            id,
            problem_id: id,
            problem_title: title.to_string(),
            status,
            language: language.to_string(),
            runtime: None,
            memory: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_submission_filter() {
        let list = vec![
            submission(1, "Two Sum", SubmissionStatus::Accepted, "python"),
            submission(2, "Two Sum", SubmissionStatus::WrongAnswer, "cpp"),
            submission(3, "Graph", SubmissionStatus::Accepted, "cpp"),
        ];
        let mut filter = SubmissionFilter {
            search: "two".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&list).len(), 2);
        filter.language = Some(Language::Cpp);
        assert_eq!(filter.apply(&list)[0].id, 2);
        filter.search.clear();
        filter.cycle_status();
        assert_eq!(filter.status, Some(SubmissionStatus::Accepted));
        assert_eq!(filter.apply(&list)[0].id, 3);
    }

    #[test]
    fn test_status_cycle_returns_to_all() {
        let mut filter = SubmissionFilter::default();
        for _ in 0..SubmissionStatus::ALL.len() {
            filter.cycle_status();
        }
        assert_eq!(filter.status, Some(SubmissionStatus::Pending));
        filter.cycle_status();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_group_contests() {
        let now = Utc::now();
        let h = Duration::hours(1);
        let contest = |id, start, end| ContestSummary {
            id,
            name: format!("c{}", id),
            start_time: start,
            end_time: end,
            problem_count: 0,
            is_active: false,
        };
        let contests = vec![
            contest(1, now - h * 5, now - h * 4),
            contest(2, now + h * 3, now + h * 4),
            contest(3, now - h, now + h),
            contest(4, now + h, now + h * 2),
            contest(5, now - h * 3, now - h * 2),
        ];
        let groups = group_contests(&contests, now);
        let ids: Vec<Vec<i64>> = groups
            .iter()
            .map(|(_, list)| list.iter().map(|c| c.id).collect())
            .collect();
        assert_eq!(ids, vec![vec![3], vec![4, 2], vec![5, 1]]);
    }
}
