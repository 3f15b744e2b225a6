//! Submission detail fetched from a mocked backend and drawn on a test
//! terminal.

use std::sync::Arc;
use std::time::Duration;

use judgeflow::adapters::{MemorySessionStorage, ReqwestHttpClient};
use judgeflow::api::JudgeApi;
use judgeflow::app::{App, Screen};
use judgeflow::auth::Tokens;
use judgeflow::models::{SubmissionStatus, User};
use judgeflow::ui::{render, test_result_lines};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submission_body() -> serde_json::Value {
    json!({
        "submission": {
            "id": 42,
            "problem_id": 5,
            "problem_title": "Two Sum",
            "code": "def solve(a, b):\n    return a + b\n",
            "language": "python",
            "status": "wrong_answer",
            "runtime": 0.12,
            "memory": 14.5,
            "submitted_at": "2026-03-01T10:15:00Z",
            "test_case_results": [
                {"passed": true, "input": "1 2", "expected_output": "3", "actual_output": "3"},
                {
                    "passed": false,
                    "input": "5 5",
                    "expected_output": "10",
                    "actual_output": "",
                    "error": "ZeroDivisionError: division by zero"
                }
            ]
        }
    })
}

fn screen_text(buffer: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[tokio::test]
async fn test_submission_detail_shows_both_cases_and_failure_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/problems/submissions/42/"))
        .and(header("Authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(submission_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = JudgeApi::with_parts(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(MemorySessionStorage::with_tokens(Tokens::new("A", "R"))),
        &format!("{}/api", server.uri()),
    );
    let mut app = App::new(Arc::new(api));
    let mut rx = app.message_rx.take().unwrap();
    app.session.login(User {
        id: 3,
        username: "alice".into(),
        email: "alice@example.com".into(),
        is_staff: false,
    });

    app.navigate(Screen::SubmissionDetail(42));
    assert!(app.submission.submission.is_loading());

    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for the submission")
        .expect("channel closed");
    app.handle_message(message);

    let submission = app.submission.submission.data().expect("submission loaded");
    assert_eq!(submission.status, SubmissionStatus::WrongAnswer);
    assert_eq!(submission.test_results().len(), 2);

    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    terminal.draw(|f| render(f, &app)).unwrap();
    let text = screen_text(terminal.backend().buffer());

    assert!(text.contains("Submission #42"));
    assert!(text.contains("Test Case 1 Passed"));
    assert!(text.contains("Test Case 2 Failed"));
    assert!(text.contains("ZeroDivisionError: division by zero"));
    assert!(text.contains("No output"));
}

#[test]
fn test_result_lines_put_error_under_failed_case_only() {
    let body = submission_body();
    let results: Vec<judgeflow::models::TestCaseResult> =
        serde_json::from_value(body["submission"]["test_case_results"].clone()).unwrap();

    let lines: Vec<String> = test_result_lines(&results)
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect();

    let second = lines
        .iter()
        .position(|l| l.starts_with("Test Case 2"))
        .unwrap();
    let error = lines.iter().position(|l| l.starts_with("Error: ")).unwrap();
    assert!(error > second);
    assert_eq!(lines.iter().filter(|l| l.starts_with("Error: ")).count(), 1);
}
