//! Screen identifiers and the fetch-state wrapper shared by all screens.

use crate::error::ApiError;

/// Which screen is displayed. Detail screens carry the id they show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Signup,
    Dashboard,
    Questions,
    QuestionDetail(i64),
    Playground,
    Submissions,
    SubmissionDetail(i64),
    Contests,
    ContestDetail(i64),
    AiReview,
    Moderation,
}

impl Screen {
    /// Everything but the login and signup forms.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Screen::Login | Screen::Signup)
    }

    pub fn requires_staff(&self) -> bool {
        matches!(self, Screen::Moderation)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Signup => "Sign Up",
            Screen::Dashboard => "Dashboard",
            Screen::Questions => "Questions",
            Screen::QuestionDetail(_) => "Question",
            Screen::Playground => "Playground",
            Screen::Submissions => "Submissions",
            Screen::SubmissionDetail(_) => "Submission",
            Screen::Contests => "Contests",
            Screen::ContestDetail(_) => "Contest",
            Screen::AiReview => "AI Review",
            Screen::Moderation => "Moderation",
        }
    }

    /// Where Esc leads from a detail screen.
    pub fn parent(&self) -> Option<Screen> {
        match self {
            Screen::QuestionDetail(_) => Some(Screen::Questions),
            Screen::SubmissionDetail(_) => Some(Screen::Submissions),
            Screen::ContestDetail(_) => Some(Screen::Contests),
            _ => None,
        }
    }
}

/// Top-level screens reachable from the navigation bar, with their hotkeys.
pub const NAV_ITEMS: [(char, Screen); 7] = [
    ('1', Screen::Dashboard),
    ('2', Screen::Questions),
    ('3', Screen::Playground),
    ('4', Screen::Submissions),
    ('5', Screen::Contests),
    ('6', Screen::AiReview),
    ('7', Screen::Moderation),
];

/// State of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ApiError),
}

// Manual impl: the derive would demand `T: Default`.
impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Idle
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Loadable::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<Result<T, ApiError>> for Loadable<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Loadable::Loaded(data),
            Err(e) => Loadable::Failed(e),
        }
    }
}
