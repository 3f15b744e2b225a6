use super::*;
use crate::adapters::{MemorySessionStorage, MockHttpClient, MockResponse};
use crate::auth::Tokens;
use crate::models::{DashboardData, User};
use crate::notifications::NoticeKind;
use crate::traits::SessionStorage;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use std::time::Duration;

const BASE: &str = "http://judge.test/api";

fn user(staff: bool) -> User {
    User {
        id: 7,
        username: "alice".into(),
        email: "alice@example.com".into(),
        is_staff: staff,
    }
}

fn app_with(http: &MockHttpClient, tokens: Option<Tokens>) -> App {
    let storage = match tokens {
        Some(tokens) => MemorySessionStorage::with_tokens(tokens),
        None => MemorySessionStorage::new(),
    };
    let api = JudgeApi::with_parts(Arc::new(http.clone()), Arc::new(storage), BASE);
    App::new(Arc::new(api))
}

/// App with a resolved, authenticated session.
fn signed_in(http: &MockHttpClient, staff: bool) -> App {
    let mut app = app_with(http, Some(Tokens::new("access-1", "refresh-1")));
    app.session.login(user(staff));
    app
}

/// Receive and apply the next message.
async fn pump(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppMessage>) {
    let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a message")
        .expect("channel closed");
    app.handle_message(message);
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn titles(app: &App) -> Vec<String> {
    app.notifications.iter().map(|n| n.title.clone()).collect()
}

#[tokio::test]
async fn test_guard_sends_anonymous_user_to_login_and_remembers_target() {
    let http = MockHttpClient::new();
    let mut app = app_with(&http, None);
    app.start();
    assert!(!app.session.is_loading());

    app.navigate(Screen::Questions);

    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.after_login, Some(Screen::Questions));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_non_staff_is_turned_away_from_moderation() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::json(200, json!({})));
    let mut app = signed_in(&http, false);

    app.navigate(Screen::Moderation);

    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(titles(&app), vec!["Access denied".to_string()]);
}

#[tokio::test]
async fn test_login_stores_tokens_and_opens_requested_screen() {
    let http = MockHttpClient::new();
    http.on_post(
        &format!("{}/accounts/login/", BASE),
        MockResponse::json(
            200,
            json!({
                "success": true,
                "tokens": {"access": "a-1", "refresh": "r-1"},
                "user": {"id": 7, "username": "alice", "email": "alice@example.com"}
            }),
        ),
    );
    http.set_default_response(MockResponse::json(200, json!({"problems": []})));
    let mut app = app_with(&http, None);
    let mut rx = app.message_rx.take().unwrap();
    app.start();
    app.navigate(Screen::Questions);

    type_text(&mut app, "alice");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "hunter22");
    app.handle_key(key(KeyCode::Enter));
    assert!(app.login.submitting);

    pump(&mut app, &mut rx).await;

    assert!(app.session.is_authenticated());
    assert_eq!(app.session.user().unwrap().username, "alice");
    assert_eq!(app.api.storage().access_token().as_deref(), Some("a-1"));
    assert_eq!(app.screen, Screen::Questions);
    assert!(app.after_login.is_none());
    assert!(titles(&app).contains(&"Signed in".to_string()));
}

#[tokio::test]
async fn test_empty_login_form_is_rejected_without_a_request() {
    let http = MockHttpClient::new();
    let mut app = app_with(&http, None);
    app.start();

    app.handle_key(key(KeyCode::Enter));

    assert!(!app.login.submitting);
    assert_eq!(titles(&app), vec!["Missing Information".to_string()]);
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_result_from_previous_generation_is_dropped() {
    let http = MockHttpClient::new();
    let mut app = signed_in(&http, false);
    app.screen = Screen::Dashboard;
    app.dashboard.data = Loadable::Loading;

    let stale = app.generation();
    app.abort_tasks();
    app.handle_message(AppMessage::Task {
        generation: stale,
        payload: Payload::Dashboard(Ok(DashboardData::default())),
    });
    assert!(app.dashboard.data.is_loading());

    app.handle_message(AppMessage::Task {
        generation: app.generation(),
        payload: Payload::Dashboard(Ok(DashboardData::default())),
    });
    assert!(app.dashboard.data.data().is_some());
}

#[tokio::test]
async fn test_navigation_bumps_generation() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::json(200, json!({})));
    let mut app = signed_in(&http, false);

    let before = app.generation();
    app.navigate(Screen::Playground);
    app.navigate(Screen::Dashboard);

    assert!(app.generation() >= before + 2);
}

#[tokio::test]
async fn test_failed_refresh_redirects_to_login() {
    let http = MockHttpClient::new();
    http.on_get(
        &format!("{}/problems/submissions/", BASE),
        MockResponse::status(401),
    );
    http.on_post(
        &format!("{}/accounts/token/refresh/", BASE),
        MockResponse::status(401),
    );
    let mut app = signed_in(&http, false);
    let mut rx = app.message_rx.take().unwrap();

    app.navigate(Screen::Submissions);
    pump(&mut app, &mut rx).await;

    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.after_login, Some(Screen::Submissions));
    assert!(!app.session.is_authenticated());
    assert!(!app.api.has_session());
    assert!(titles(&app).contains(&"Session expired".to_string()));
}

#[tokio::test]
async fn test_logout_clears_session_after_backend_answers() {
    let http = MockHttpClient::new();
    http.on_post(
        &format!("{}/accounts/logout/", BASE),
        MockResponse::json(200, json!({"success": true})),
    );
    let mut app = signed_in(&http, false);
    app.screen = Screen::Playground;
    let mut rx = app.message_rx.take().unwrap();

    app.handle_key(key(KeyCode::Char('L')));
    assert!(app.logging_out);
    pump(&mut app, &mut rx).await;

    assert_eq!(app.screen, Screen::Login);
    assert!(!app.logging_out);
    assert!(!app.api.has_session());
    let logout = http.requests_to(&format!("{}/accounts/logout/", BASE));
    assert_eq!(logout[0].bearer(), Some("access-1"));
}

#[tokio::test]
async fn test_countdown_end_raises_notification() {
    let http = MockHttpClient::new();
    let mut app = signed_in(&http, false);
    app.screen = Screen::ContestDetail(1);
    app.contest.timer.start_countdown(1);

    let start = app.last_second;
    app.tick(start + Duration::from_secs(59));
    assert!(app.notifications.is_empty());
    app.tick(start + Duration::from_secs(60));

    let notice = app.notifications.iter().last().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.title, "Time's up!");
    assert!(!app.contest.timer.is_running());
}

#[tokio::test]
async fn test_editor_pane_takes_letters_and_esc_returns_to_commands() {
    let http = MockHttpClient::new();
    let mut app = signed_in(&http, false);
    app.screen = Screen::Playground;
    app.playground.editor.set_text("");

    app.handle_key(key(KeyCode::Char('e')));
    assert_eq!(app.playground.pane, Pane::Editor);
    type_text(&mut app, "q1");
    assert_eq!(app.playground.editor.text(), "q1");
    assert!(!app.should_quit);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.playground.pane, Pane::Commands);
}

#[tokio::test]
async fn test_question_search_filters_visible_list() {
    let http = MockHttpClient::new();
    let mut app = signed_in(&http, false);
    app.screen = Screen::Questions;
    let problems: Vec<crate::models::ProblemSummary> = serde_json::from_value(json!([
        {"id": 1, "title": "Two Sum", "difficulty": "easy", "tags": ["array"]},
        {"id": 2, "title": "Graph Paths", "difficulty": "hard", "tags": ["graph"]}
    ]))
    .unwrap();
    app.questions.problems = Loadable::Loaded(problems);

    app.handle_key(key(KeyCode::Char('/')));
    type_text(&mut app, "graph");
    app.handle_key(key(KeyCode::Enter));

    let visible: Vec<i64> = app.questions.visible().iter().map(|p| p.id).collect();
    assert_eq!(visible, vec![2]);
    assert!(!app.questions.searching);
}

fn pending(ids: &[i64]) -> Vec<crate::models::PendingQuestion> {
    let rows: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Question {}", id),
                "description": "d",
                "difficulty": "easy",
                "created_by": "bob",
                "created_at": "2026-03-01T10:00:00Z"
            })
        })
        .collect();
    serde_json::from_value(json!(rows)).unwrap()
}

#[tokio::test]
async fn test_moderation_list_for_abandoned_filter_is_dropped() {
    use crate::models::PendingFilter;

    let http = MockHttpClient::new();
    let mut app = signed_in(&http, true);
    app.screen = Screen::Moderation;
    app.moderation.filter = PendingFilter::All;
    app.moderation.questions = Loadable::Loading;

    // The All result lands first, then the late answer for Approved.
    app.handle_message(AppMessage::Task {
        generation: app.generation(),
        payload: Payload::PendingQuestions {
            filter: PendingFilter::All,
            result: Ok(pending(&[1, 2])),
        },
    });
    app.handle_message(AppMessage::Task {
        generation: app.generation(),
        payload: Payload::PendingQuestions {
            filter: PendingFilter::Approved,
            result: Ok(pending(&[2])),
        },
    });

    let shown: Vec<i64> = app
        .moderation
        .questions
        .data()
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(shown, vec![1, 2]);
}
