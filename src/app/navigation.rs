//! Screen changes, the route guard and per-screen loading.

use super::{App, Loadable, Payload, Screen};
use super::views::*;

impl App {
    /// Switch screens. Aborts in-flight work of the previous screen, applies
    /// the route guard, resets the target's state and starts its fetches.
    pub fn navigate(&mut self, target: Screen) {
        self.session.revalidate();
        let target = self.guard(target);
        self.abort_tasks();
        tracing::info!("Navigate {:?} -> {:?}", self.screen, target);
        self.screen = target;
        self.enter(target);
        self.mark_dirty();
    }

    /// Redirect targets the session is not allowed to see.
    fn guard(&mut self, target: Screen) -> Screen {
        if target.requires_auth() && !self.session.is_authenticated() {
            if !self.session.is_loading() {
                self.after_login = Some(target);
            }
            return Screen::Login;
        }
        if !target.requires_auth() && self.session.is_authenticated() {
            return Screen::Dashboard;
        }
        if target.requires_staff() && !self.session.is_staff() {
            self.notifications
                .error("Access denied", "Admin privileges required.");
            return Screen::Dashboard;
        }
        target
    }

    /// Reload the current screen after an error.
    pub fn retry(&mut self) {
        self.abort_tasks();
        tracing::info!("Retry {:?}", self.screen);
        self.enter(self.screen);
        self.mark_dirty();
    }

    /// Esc from a detail screen.
    pub fn go_back(&mut self) {
        if let Some(parent) = self.screen.parent() {
            self.navigate(parent);
        }
    }

    fn enter(&mut self, screen: Screen) {
        match screen {
            Screen::Login => self.login = LoginView::new(),
            Screen::Signup => self.signup = SignupView::new(),
            Screen::Dashboard => {
                self.dashboard = DashboardView {
                    data: Loadable::Loading,
                };
                let api = self.api.clone();
                self.spawn(async move { Payload::Dashboard(api.dashboard().await) });
            }
            Screen::Questions => {
                self.questions = QuestionsView::default();
                self.load_problems();
            }
            Screen::QuestionDetail(id) => {
                self.question = QuestionDetailView::new(self.language);
                self.question.problem = Loadable::Loading;
                let api = self.api.clone();
                self.spawn(async move { Payload::Problem(api.problem(id).await) });
            }
            Screen::Playground => {
                if let Some(path) = self.pending_open.take() {
                    self.import_file(&path);
                }
            }
            Screen::Submissions => {
                self.submissions = SubmissionsView {
                    submissions: Loadable::Loading,
                    ..SubmissionsView::default()
                };
                let api = self.api.clone();
                self.spawn(async move { Payload::Submissions(api.submissions().await) });
            }
            Screen::SubmissionDetail(id) => {
                self.submission = SubmissionDetailView {
                    submission: Loadable::Loading,
                    scroll: 0,
                };
                let api = self.api.clone();
                self.spawn(async move { Payload::Submission(api.submission(id).await) });
            }
            Screen::Contests => {
                self.contests = ContestsView {
                    contests: Loadable::Loading,
                    ..ContestsView::default()
                };
                let api = self.api.clone();
                self.spawn(async move { Payload::Contests(api.contests().await) });
            }
            Screen::ContestDetail(id) => {
                self.contest = ContestDetailView::new(self.language);
                self.contest.contest = Loadable::Loading;
                self.contest.submissions = Loadable::Loading;
                let api = self.api.clone();
                self.spawn(async move { Payload::Contest(api.contest(id).await) });
                let api = self.api.clone();
                self.spawn(async move {
                    Payload::ContestSubmissions(api.contest_submissions(id).await)
                });
            }
            Screen::AiReview => {
                self.review = AiReviewView {
                    progress: Loadable::Loading,
                    ..AiReviewView::default()
                };
                let api = self.api.clone();
                self.spawn(async move { Payload::Progress(api.user_progress().await) });
            }
            Screen::Moderation => {
                let filter = self.moderation.filter;
                self.moderation = ModerationView {
                    filter,
                    ..ModerationView::default()
                };
                self.load_pending_questions();
            }
        }
    }

    pub(crate) fn load_problems(&mut self) {
        self.questions.problems = Loadable::Loading;
        let api = self.api.clone();
        self.spawn(async move { Payload::Problems(api.problems(&Default::default()).await) });
    }

    pub(crate) fn load_pending_questions(&mut self) {
        self.moderation.questions = Loadable::Loading;
        self.moderation.selected = 0;
        let filter = self.moderation.filter;
        let api = self.api.clone();
        self.spawn(async move {
            Payload::PendingQuestions {
                filter,
                result: api.pending_questions(filter).await,
            }
        });
    }

    /// Fetch the statement of the problem selected inside the contest.
    pub(crate) fn load_contest_problem(&mut self) {
        let Some(id) = self.contest.selected_problem_id() else {
            self.contest.problem = Loadable::Idle;
            return;
        };
        self.contest.problem = Loadable::Loading;
        self.contest.verdict = None;
        let api = self.api.clone();
        self.spawn(async move {
            Payload::ContestProblem {
                id,
                result: api.problem(id).await,
            }
        });
    }
}
