//! Terminal rendering.
//!
//! [`render`] draws the navbar, the current screen, the footer with key hints
//! and the notification overlay. Screens only read [`App`]; all state changes
//! happen in the app layer.

mod auth;
mod chrome;
mod components;
mod contests;
mod dashboard;
mod helpers;
mod layout;
mod moderation;
mod playground;
mod questions;
mod review;
mod submissions;
pub mod theme;

pub use helpers::{truncate_string, SPINNER_FRAMES};
pub use layout::LayoutContext;
pub use submissions::test_result_lines;

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let ctx = LayoutContext::new(area.width, area.height);
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    chrome::render_navbar(frame, rows[0], app, &ctx);
    let body = rows[1];

    match app.screen {
        Screen::Login => auth::render_login(frame, body, app, &ctx),
        Screen::Signup => auth::render_signup(frame, body, app, &ctx),
        Screen::Dashboard => dashboard::render_dashboard(frame, body, app),
        Screen::Questions => questions::render_questions(frame, body, app, &ctx),
        Screen::QuestionDetail(_) => questions::render_question_detail(frame, body, app, &ctx),
        Screen::Playground => playground::render_playground(frame, body, app, &ctx),
        Screen::Submissions => submissions::render_submissions(frame, body, app),
        Screen::SubmissionDetail(_) => submissions::render_submission_detail(frame, body, app),
        Screen::Contests => contests::render_contests(frame, body, app, &ctx),
        Screen::ContestDetail(_) => contests::render_contest_detail(frame, body, app, &ctx),
        Screen::AiReview => review::render_ai_review(frame, body, app),
        Screen::Moderation => moderation::render_moderation(frame, body, app),
    }

    chrome::render_footer(frame, rows[2], app);
    chrome::render_notifications(frame, area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemorySessionStorage, MockHttpClient};
    use crate::api::JudgeApi;
    use crate::app::Loadable;
    use crate::error::ApiError;
    use crate::models::User;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::Arc;

    fn test_app() -> App {
        let api = JudgeApi::with_parts(
            Arc::new(MockHttpClient::new()),
            Arc::new(MemorySessionStorage::new()),
            "http://judge.test/api",
        );
        App::new(Arc::new(api))
    }

    fn signed_in() -> App {
        let mut app = test_app();
        app.session.login(User {
            id: 1,
            username: "alice".into(),
            email: "a@example.com".into(),
            is_staff: false,
        });
        app
    }

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_login_screen_renders_form() {
        let app = test_app();
        let screen = text(&draw(&app, 100, 30));
        assert!(screen.contains("Sign in to JudgeFlow"));
        assert!(screen.contains("Username or email"));
        assert!(screen.contains("Ctrl+N"));
    }

    #[test]
    fn test_loading_and_error_states() {
        let mut app = signed_in();
        app.screen = Screen::Dashboard;
        app.dashboard.data = Loadable::Loading;
        assert!(text(&draw(&app, 100, 30)).contains("Loading dashboard..."));

        app.dashboard.data = Loadable::Failed(ApiError::Status {
            context: "Failed to fetch dashboard data",
            status: 500,
            detail: None,
        });
        let screen = text(&draw(&app, 100, 30));
        assert!(screen.contains("Failed to fetch dashboard data"));
        assert!(screen.contains("[r] Retry"));
    }

    #[test]
    fn test_staff_tab_hidden_for_regular_users() {
        let mut app = signed_in();
        app.screen = Screen::Playground;
        let screen = text(&draw(&app, 140, 30));
        assert!(screen.contains("Playground"));
        assert!(!screen.contains("Moderation"));
    }

    #[test]
    fn test_notification_overlay() {
        let mut app = signed_in();
        app.screen = Screen::Playground;
        app.notifications.success("Code copied", "Done.");
        assert!(text(&draw(&app, 120, 30)).contains("Code copied"));
    }

    #[test]
    fn test_renders_on_tiny_terminal() {
        let mut app = signed_in();
        app.screen = Screen::Playground;
        draw(&app, 20, 6);
        draw(&test_app(), 10, 4);
    }
}
