//! Application state and logic for the TUI.
//!
//! - [`App`] owns the session, the per-screen state and the async plumbing
//! - [`Screen`] is the current page
//! - [`AppMessage`] carries results from spawned API tasks
//!
//! Every spawned task is stamped with the current request generation.
//! Navigation aborts in-flight tasks and bumps the generation, so a result
//! for a screen the user already left is dropped instead of applied.

mod actions;
mod handlers;
mod messages;
mod navigation;
mod results;
mod types;
mod views;

pub use messages::{AppMessage, ModerationAction, Payload};
pub use results::verdict_notice;
pub use types::{Loadable, Screen, NAV_ITEMS};
pub use views::*;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::JudgeApi;
use crate::models::Language;
use crate::notifications::Notifications;
use crate::session::SessionManager;
use crate::timer::TimerEvent;

pub struct App {
    pub api: Arc<JudgeApi>,
    pub session: SessionManager,
    pub screen: Screen,
    /// Protected screen the user asked for before logging in.
    pub after_login: Option<Screen>,
    pub should_quit: bool,
    /// Set when state changed since the last draw.
    pub needs_redraw: bool,
    /// Animation counter (spinner).
    pub tick_count: u64,
    pub notifications: Notifications,
    /// Language new editors start in.
    pub language: Language,
    /// Playground snippets saved this session.
    pub snippets: Vec<Snippet>,
    /// File from `--open`, loaded into the playground once logged in.
    pub pending_open: Option<PathBuf>,
    pub logging_out: bool,

    pub login: LoginView,
    pub signup: SignupView,
    pub dashboard: DashboardView,
    pub questions: QuestionsView,
    pub question: QuestionDetailView,
    pub playground: PlaygroundView,
    pub submissions: SubmissionsView,
    pub submission: SubmissionDetailView,
    pub contests: ContestsView,
    pub contest: ContestDetailView,
    pub review: AiReviewView,
    pub moderation: ModerationView,

    /// Taken by the event loop.
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    generation: u64,
    tasks: Vec<JoinHandle<()>>,
    last_second: Instant,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("session", &self.session)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(api: Arc<JudgeApi>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let session = SessionManager::new(api.storage().clone());
        let language = Language::default();
        Self {
            api,
            session,
            screen: Screen::Login,
            after_login: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            notifications: Notifications::new(),
            language,
            snippets: Vec::new(),
            pending_open: None,
            logging_out: false,
            login: LoginView::new(),
            signup: SignupView::new(),
            dashboard: DashboardView::default(),
            questions: QuestionsView::default(),
            question: QuestionDetailView::new(language),
            playground: PlaygroundView::new(language),
            submissions: SubmissionsView::default(),
            submission: SubmissionDetailView::default(),
            contests: ContestsView::default(),
            contest: ContestDetailView::new(language),
            review: AiReviewView::default(),
            moderation: ModerationView::default(),
            message_rx: Some(message_rx),
            message_tx,
            generation: 0,
            tasks: Vec::new(),
            last_second: Instant::now(),
        }
    }

    /// Resolve the session. With a stored token the profile is fetched in the
    /// background; otherwise the login screen stays.
    pub fn start(&mut self) {
        if self.session.start() {
            let api = self.api.clone();
            let tx = self.message_tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(AppMessage::SessionResolved(api.profile().await));
            });
        }
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.abort_tasks();
        self.should_quit = true;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of spawned tasks that have not finished.
    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|h| !h.is_finished()).count()
    }

    /// Run `fut` in the background; its payload is delivered tagged with the
    /// current generation.
    pub(crate) fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = Payload> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        let generation = self.generation;
        let handle = tokio::spawn(async move {
            let payload = fut.await;
            let _ = tx.send(AppMessage::Task {
                generation,
                payload,
            });
        });
        self.tasks.retain(|h| !h.is_finished());
        self.tasks.push(handle);
    }

    /// Abort every in-flight task and invalidate results already queued.
    pub(crate) fn abort_tasks(&mut self) {
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
        self.generation += 1;
    }

    /// Periodic tick from the event loop.
    pub fn tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self.notifications.prune(now) {
            self.mark_dirty();
        }
        if self.is_busy() {
            // Spinner frames.
            self.mark_dirty();
        }

        while now.saturating_duration_since(self.last_second) >= Duration::from_secs(1) {
            self.last_second += Duration::from_secs(1);
            self.second_elapsed();
        }
    }

    fn second_elapsed(&mut self) {
        if !matches!(self.screen, Screen::ContestDetail(_)) {
            return;
        }
        let was_running = self.contest.timer.is_running();
        if let Some(TimerEvent::CountdownFinished) = self.contest.timer.tick() {
            self.notifications
                .info("Time's up!", "Your countdown timer has finished.");
        }
        if was_running {
            self.mark_dirty();
        }
    }

    /// True while anything on screen shows a spinner.
    pub fn is_busy(&self) -> bool {
        self.session.is_loading()
            || self.logging_out
            || self.login.submitting
            || self.signup.submitting
            || match self.screen {
                Screen::Dashboard => self.dashboard.data.is_loading(),
                Screen::Questions => self.questions.problems.is_loading(),
                Screen::QuestionDetail(_) => {
                    self.question.problem.is_loading()
                        || self.question.running
                        || self.question.submitting
                        || self.question.review.is_loading()
                }
                Screen::Playground => self.playground.running,
                Screen::Submissions => self.submissions.submissions.is_loading(),
                Screen::SubmissionDetail(_) => self.submission.submission.is_loading(),
                Screen::Contests => self.contests.contests.is_loading(),
                Screen::ContestDetail(_) => {
                    self.contest.contest.is_loading()
                        || self.contest.problem.is_loading()
                        || self.contest.submitting
                }
                Screen::AiReview => {
                    self.review.review.is_loading() || self.review.progress.is_loading()
                }
                Screen::Moderation => self.moderation.questions.is_loading() || self.moderation.busy,
                Screen::Login | Screen::Signup => false,
            }
    }

    /// Apply one message from the channel.
    pub fn handle_message(&mut self, message: AppMessage) {
        self.mark_dirty();
        match message {
            AppMessage::SessionResolved(result) => {
                self.session.resolve(result);
                if self.session.is_authenticated() {
                    let target = self.after_login.take().unwrap_or(Screen::Dashboard);
                    self.navigate(target);
                } else if self.screen.requires_auth() {
                    self.navigate(Screen::Login);
                }
            }
            AppMessage::LoggedOut => {
                self.logging_out = false;
                self.session.logout();
                self.notifications
                    .success("Logged out", "You have been logged out.");
                self.navigate(Screen::Login);
            }
            AppMessage::Task {
                generation,
                payload,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Discarding stale result (generation {} != {})",
                        generation,
                        self.generation
                    );
                    return;
                }
                let reauth = payload.error().is_some_and(|e| e.requires_reauth());
                if reauth && self.session.revalidate() {
                    self.after_login = Some(self.screen);
                    self.notifications
                        .error("Session expired", "Please log in again.");
                    self.navigate(Screen::Login);
                    return;
                }
                self.apply(payload);
            }
        }
    }
}

#[cfg(test)]
mod tests;
