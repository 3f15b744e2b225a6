//! Per-screen UI state. Each struct is rebuilt when its screen is entered,
//! so nothing from a previous visit leaks into the next one.

use chrono::{DateTime, Utc};

use super::types::Loadable;
use crate::filters::{group_contests, ProblemFilter, SubmissionFilter};
use crate::models::{
    Contest, ContestSummary, DashboardData, Language, PendingFilter, PendingQuestion, Problem,
    ProblemSummary, RunResult, Submission, SubmissionSummary, UserProgress, Verdict,
};
use crate::review::ParsedReview;
use crate::timer::ContestTimer;
use crate::validation::{ContestForm, QuestionForm, SignupForm};
use crate::widgets::{CodeEditor, InputBox};

/// Focus cycling over a fixed number of form fields.
fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

// ============================================================================
// Auth forms
// ============================================================================

#[derive(Debug, Default)]
pub struct LoginView {
    pub username: InputBox,
    pub password: InputBox,
    pub focus: usize,
    pub submitting: bool,
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            password: InputBox::masked(),
            ..Self::default()
        }
    }

    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            0 => &mut self.username,
            _ => &mut self.password,
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = cycle(self.focus, 2, forward);
    }
}

#[derive(Debug, Default)]
pub struct SignupView {
    pub username: InputBox,
    pub email: InputBox,
    pub password: InputBox,
    pub confirm: InputBox,
    pub agree_terms: bool,
    /// 0-3 text fields, 4 the terms checkbox.
    pub focus: usize,
    pub submitting: bool,
}

impl SignupView {
    pub const FIELDS: usize = 5;

    pub fn new() -> Self {
        Self {
            password: InputBox::masked(),
            confirm: InputBox::masked(),
            ..Self::default()
        }
    }

    pub fn focused_input(&mut self) -> Option<&mut InputBox> {
        match self.focus {
            0 => Some(&mut self.username),
            1 => Some(&mut self.email),
            2 => Some(&mut self.password),
            3 => Some(&mut self.confirm),
            _ => None,
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = cycle(self.focus, Self::FIELDS, forward);
    }

    pub fn form(&self) -> SignupForm {
        SignupForm {
            username: self.username.content().to_string(),
            email: self.email.content().to_string(),
            password: self.password.content().to_string(),
            confirm_password: self.confirm.content().to_string(),
            agree_terms: self.agree_terms,
        }
    }
}

// ============================================================================
// Lists
// ============================================================================

#[derive(Debug, Default)]
pub struct DashboardView {
    pub data: Loadable<DashboardData>,
}

/// New-question proposal form shown over the catalog.
#[derive(Debug, Default)]
pub struct QuestionFormView {
    pub title: InputBox,
    pub description: InputBox,
    pub difficulty: InputBox,
    pub constraints: InputBox,
    pub tags: InputBox,
    pub focus: usize,
    pub submitting: bool,
}

impl QuestionFormView {
    pub const FIELDS: usize = 5;

    pub fn new() -> Self {
        Self {
            difficulty: InputBox::with_content("easy"),
            ..Self::default()
        }
    }

    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            0 => &mut self.title,
            1 => &mut self.description,
            2 => &mut self.difficulty,
            3 => &mut self.constraints,
            _ => &mut self.tags,
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = cycle(self.focus, Self::FIELDS, forward);
    }

    pub fn form(&self) -> QuestionForm {
        QuestionForm {
            title: self.title.content().to_string(),
            description: self.description.content().to_string(),
            difficulty: self.difficulty.content().to_string(),
            constraints: self.constraints.content().to_string(),
            tags: self.tags.content().to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct QuestionsView {
    pub problems: Loadable<Vec<ProblemSummary>>,
    pub filter: ProblemFilter,
    pub search: InputBox,
    /// Typing goes to the search box.
    pub searching: bool,
    /// Row in the filtered list.
    pub selected: usize,
    /// Tag picker open, with its cursor.
    pub tag_picker: Option<usize>,
    pub new_question: Option<QuestionFormView>,
    /// Problem id awaiting delete confirmation (staff).
    pub confirm_delete: Option<i64>,
}

impl QuestionsView {
    pub fn visible(&self) -> Vec<&ProblemSummary> {
        self.problems
            .data()
            .map(|p| self.filter.apply(p))
            .unwrap_or_default()
    }

    pub fn selected_problem(&self) -> Option<&ProblemSummary> {
        self.visible().get(self.selected).copied()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Default)]
pub struct SubmissionsView {
    pub submissions: Loadable<Vec<SubmissionSummary>>,
    pub filter: SubmissionFilter,
    pub search: InputBox,
    pub searching: bool,
    pub selected: usize,
}

impl SubmissionsView {
    pub fn visible(&self) -> Vec<&SubmissionSummary> {
        self.submissions
            .data()
            .map(|s| self.filter.apply(s))
            .unwrap_or_default()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Default)]
pub struct SubmissionDetailView {
    pub submission: Loadable<Submission>,
    pub scroll: u16,
}

/// Contest creation form.
#[derive(Debug, Default)]
pub struct ContestFormView {
    pub name: InputBox,
    pub start_time: InputBox,
    pub end_time: InputBox,
    pub problem_ids: InputBox,
    pub focus: usize,
    pub submitting: bool,
}

impl ContestFormView {
    pub const FIELDS: usize = 4;

    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.start_time,
            2 => &mut self.end_time,
            _ => &mut self.problem_ids,
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = cycle(self.focus, Self::FIELDS, forward);
    }

    pub fn form(&self) -> ContestForm {
        ContestForm {
            name: self.name.content().to_string(),
            start_time: self.start_time.content().to_string(),
            end_time: self.end_time.content().to_string(),
            problem_ids: self.problem_ids.content().to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ContestsView {
    pub contests: Loadable<Vec<ContestSummary>>,
    /// Index into the flattened active/upcoming/ended order.
    pub selected: usize,
    pub create: Option<ContestFormView>,
}

impl ContestsView {
    /// Contests in the order they are listed: active, upcoming, ended.
    pub fn ordered(&self, now: DateTime<Utc>) -> Vec<&ContestSummary> {
        match self.contests.data() {
            Some(list) => group_contests(list, now)
                .into_iter()
                .flat_map(|(_, group)| group)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn selected_contest(&self, now: DateTime<Utc>) -> Option<&ContestSummary> {
        self.ordered(now).get(self.selected).copied()
    }
}

#[derive(Debug, Default)]
pub struct ModerationView {
    pub filter: PendingFilter,
    pub questions: Loadable<Vec<PendingQuestion>>,
    pub selected: usize,
    pub busy: bool,
}

// ============================================================================
// Editors
// ============================================================================

/// Which pane of an editor screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Screen commands (single-key shortcuts).
    #[default]
    Commands,
    Editor,
    /// Playground stdin.
    Input,
}

#[derive(Debug, Default)]
pub struct QuestionDetailView {
    pub problem: Loadable<Problem>,
    pub editor: CodeEditor,
    pub pane: Pane,
    pub statement_scroll: u16,
    pub running: bool,
    pub submitting: bool,
    pub output: Option<RunResult>,
    pub verdict: Option<Verdict>,
    pub review: Loadable<ParsedReview>,
    pub show_review: bool,
}

impl QuestionDetailView {
    pub fn new(language: Language) -> Self {
        Self {
            editor: CodeEditor::new(language),
            ..Self::default()
        }
    }

    /// Stdin for Run: the first sample test case.
    pub fn sample_input(&self) -> String {
        self.problem
            .data()
            .and_then(|p| p.test_cases.first())
            .map(|t| t.input_data.clone())
            .unwrap_or_default()
    }
}

/// A playground buffer kept for the rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub name: String,
    pub language: Language,
    pub code: String,
}

#[derive(Debug, Default)]
pub struct PlaygroundView {
    pub editor: CodeEditor,
    pub input: CodeEditor,
    pub pane: Pane,
    pub running: bool,
    pub output: Option<RunResult>,
    /// Open path prompt for importing a file.
    pub import_prompt: Option<InputBox>,
    pub show_snippets: bool,
    pub snippet_cursor: usize,
}

impl PlaygroundView {
    pub fn new(language: Language) -> Self {
        Self {
            editor: CodeEditor::new(language),
            input: CodeEditor::with_text(language, ""),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct ContestDetailView {
    pub contest: Loadable<Contest>,
    pub selected_problem: usize,
    pub problem: Loadable<Problem>,
    pub editor: CodeEditor,
    pub pane: Pane,
    pub timer: ContestTimer,
    pub submissions: Loadable<Vec<SubmissionSummary>>,
    pub submitting: bool,
    pub verdict: Option<Verdict>,
}

impl ContestDetailView {
    pub fn new(language: Language) -> Self {
        Self {
            editor: CodeEditor::new(language),
            ..Self::default()
        }
    }

    pub fn selected_problem_id(&self) -> Option<i64> {
        self.contest
            .data()
            .and_then(|c| c.problems.get(self.selected_problem))
            .map(|p| p.id)
    }
}

#[derive(Debug, Default)]
pub struct AiReviewView {
    pub review: Loadable<ParsedReview>,
    pub progress: Loadable<UserProgress>,
    pub scroll: u16,
    /// Row in the flattened recommendation list.
    pub selected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, TestCase};

    #[test]
    fn test_focus_wraps_both_ways() {
        assert_eq!(cycle(4, 5, true), 0);
        assert_eq!(cycle(0, 5, false), 4);
    }

    #[test]
    fn test_signup_form_snapshot() {
        let mut view = SignupView::new();
        view.username.set_content("alice");
        view.agree_terms = true;
        let form = view.form();
        assert_eq!(form.username, "alice");
        assert!(form.agree_terms);
    }

    #[test]
    fn test_sample_input_uses_first_test_case() {
        let mut view = QuestionDetailView::new(Language::Python);
        assert_eq!(view.sample_input(), "");
        view.problem = Loadable::Loaded(Problem {
            id: 1,
            title: "Echo".into(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            constraints: String::new(),
            tags: vec![],
            test_cases: vec![TestCase {
                input_data: "5".into(),
                expected_output: "5".into(),
            }],
            is_pending: false,
        });
        assert_eq!(view.sample_input(), "5");
    }
}
