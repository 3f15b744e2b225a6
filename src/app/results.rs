//! Applying finished task payloads to screen state.

use super::{App, Loadable, ModerationAction, Payload, Screen};
use crate::error::ApiError;
use crate::models::{Language, SubmissionStatus, Verdict};
use crate::notifications::NoticeKind;
use crate::review::ParsedReview;

/// Longest failing-test detail shown in the verdict notification.
const FAILURE_PREVIEW_CHARS: usize = 50;

/// Notification for a graded submission: kind, title, message.
pub fn verdict_notice(verdict: &Verdict) -> (NoticeKind, String, String) {
    let mut lines = Vec::new();
    if let Some(runtime) = verdict.runtime {
        lines.push(format!("Runtime: {:.3}s", runtime));
    }
    if let Some(memory) = verdict.memory {
        lines.push(format!("Memory: {:.2}MB", memory));
    }
    match verdict.first_failure() {
        Some(failure) => {
            let detail = failure
                .error
                .as_deref()
                .filter(|e| !e.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!(
                        "Expected {}, got {}",
                        failure.expected_output.trim(),
                        failure.actual_output.trim()
                    )
                });
            lines.push(truncate_chars(&detail, FAILURE_PREVIEW_CHARS));
        }
        None if !verdict.test_results.is_empty() => {
            lines.push("All test cases passed!".to_string());
        }
        None => {}
    }

    let kind = if verdict.status == SubmissionStatus::Accepted {
        NoticeKind::Success
    } else {
        NoticeKind::Error
    };
    (kind, verdict.status.label().to_string(), lines.join("\n"))
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

impl App {
    fn notify_error(&mut self, title: &str, error: &ApiError) {
        tracing::warn!("{}: {}", title, error);
        self.notifications.error(title, error.user_message());
    }

    pub(crate) fn apply(&mut self, payload: Payload) {
        match payload {
            Payload::LoggedIn(result) | Payload::SignedUp(result) => {
                self.login.submitting = false;
                self.signup.submitting = false;
                match result {
                    Ok(user) => {
                        let greeting = format!("Welcome, {}!", user.username);
                        self.session.login(user);
                        self.notifications.success("Signed in", greeting);
                        let target = self.after_login.take().unwrap_or(Screen::Dashboard);
                        self.navigate(target);
                    }
                    Err(e) => self.notify_error("Authentication failed", &e),
                }
            }
            Payload::Dashboard(result) => self.dashboard.data = result.into(),
            Payload::Problems(result) => {
                self.questions.problems = result.into();
                self.questions.clamp_selection();
            }
            Payload::Problem(result) => self.question.problem = result.into(),
            Payload::Submissions(result) => {
                self.submissions.submissions = result.into();
                self.submissions.clamp_selection();
            }
            Payload::Submission(result) => self.submission.submission = result.into(),
            Payload::Contests(result) => {
                self.contests.contests = result.into();
                self.contests.selected = 0;
            }
            Payload::Contest(result) => {
                self.contest.contest = result.into();
                self.contest.selected_problem = 0;
                self.load_contest_problem();
            }
            Payload::ContestProblem { id, result } => {
                if self.contest.selected_problem_id() == Some(id) {
                    self.contest.problem = result.into();
                } else {
                    tracing::debug!("Dropping statement for deselected problem {}", id);
                }
            }
            Payload::ContestSubmissions(result) => self.contest.submissions = result.into(),
            Payload::PendingQuestions { filter, result } => {
                if self.moderation.filter == filter {
                    self.moderation.questions = result.into();
                } else {
                    tracing::debug!("Dropping {} queue after filter change", filter.label());
                }
            }
            Payload::Progress(result) => self.review.progress = result.into(),
            Payload::Review(result) => {
                let parsed: Loadable<ParsedReview> =
                    result.map(|r| ParsedReview::from_response(&r)).into();
                if let Some(e) = parsed.error() {
                    let e = e.clone();
                    self.notify_error("Review failed", &e);
                }
                match self.screen {
                    Screen::QuestionDetail(_) => {
                        self.question.show_review = parsed.data().is_some();
                        self.question.review = parsed;
                    }
                    _ => {
                        self.review.scroll = 0;
                        self.review.selected = 0;
                        self.review.review = parsed;
                    }
                }
            }
            Payload::Ran(result) => {
                let language = self.current_language();
                match self.screen {
                    Screen::Playground => self.playground.running = false,
                    _ => self.question.running = false,
                }
                match result {
                    Ok(run) => {
                        if run.error {
                            self.notifications
                                .error("Execution error", "Your code produced an error.");
                        } else {
                            self.notifications.success(
                                "Code executed",
                                format!("Your {} code ran successfully!", language.display_name()),
                            );
                        }
                        match self.screen {
                            Screen::Playground => self.playground.output = Some(run),
                            _ => self.question.output = Some(run),
                        }
                    }
                    Err(e) => self.notify_error("Run failed", &e),
                }
            }
            Payload::Judged(result) => {
                let in_contest = matches!(self.screen, Screen::ContestDetail(_));
                self.question.submitting = false;
                self.contest.submitting = false;
                match result {
                    Ok(verdict) => {
                        let (kind, title, message) = verdict_notice(&verdict);
                        self.notifications.push_at(
                            kind,
                            title,
                            message,
                            std::time::Instant::now(),
                        );
                        if in_contest {
                            self.contest.verdict = Some(verdict);
                            self.refresh_contest_submissions();
                        } else {
                            self.question.verdict = Some(verdict);
                        }
                    }
                    Err(e) => self.notify_error("Submission Failed", &e),
                }
            }
            Payload::ContestCreated(result) => match result {
                Ok(contest) => {
                    self.notifications.success(
                        "Contest created",
                        format!("\"{}\" has been created successfully!", contest.name),
                    );
                    self.navigate(Screen::Contests);
                }
                Err(e) => {
                    if let Some(form) = self.contests.create.as_mut() {
                        form.submitting = false;
                    }
                    self.notify_error("Failed to create contest", &e);
                }
            },
            Payload::QuestionProposed(result) => match result {
                Ok(response) => {
                    self.questions.new_question = None;
                    self.notifications.success(
                        "Question submitted",
                        response
                            .message
                            .unwrap_or_else(|| "Your question is awaiting review.".to_string()),
                    );
                }
                Err(e) => {
                    if let Some(form) = self.questions.new_question.as_mut() {
                        form.submitting = false;
                    }
                    self.notify_error("Failed to submit question", &e);
                }
            },
            Payload::Moderated { action, id, result } => {
                self.moderation.busy = false;
                match result {
                    Ok(_) => {
                        self.notifications
                            .success("Done", format!("Question {} {}", id, action.past_tense()));
                        match action {
                            ModerationAction::DeleteProblem => {
                                if let Some(list) = self.questions.problems.data_mut() {
                                    list.retain(|p| p.id != id);
                                }
                                self.questions.clamp_selection();
                            }
                            ModerationAction::Approve | ModerationAction::Reject => {
                                self.load_pending_questions()
                            }
                        }
                    }
                    Err(e) => self.notify_error("Action failed", &e),
                }
            }
        }
    }

    /// Language of the editor on the current screen.
    pub(crate) fn current_language(&self) -> Language {
        match self.screen {
            Screen::Playground => self.playground.editor.language(),
            Screen::ContestDetail(_) => self.contest.editor.language(),
            Screen::QuestionDetail(_) => self.question.editor.language(),
            _ => self.language,
        }
    }

    fn refresh_contest_submissions(&mut self) {
        if let Screen::ContestDetail(id) = self.screen {
            let api = self.api.clone();
            self.spawn(async move { Payload::ContestSubmissions(api.contest_submissions(id).await) });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestCaseResult;

    fn case(passed: bool, error: Option<&str>) -> TestCaseResult {
        TestCaseResult {
            test_case_id: None,
            passed,
            input: "1 2".into(),
            expected_output: "3".into(),
            actual_output: if passed { "3".into() } else { "4".into() },
            error: error.map(String::from),
        }
    }

    fn verdict(status: SubmissionStatus, results: Vec<TestCaseResult>) -> Verdict {
        Verdict {
            submission_id: 1,
            status,
            runtime: Some(0.12345),
            memory: Some(12.5),
            test_results: results,
        }
    }

    #[test]
    fn test_accepted_notice() {
        let (kind, title, message) =
            verdict_notice(&verdict(SubmissionStatus::Accepted, vec![case(true, None)]));
        assert_eq!(kind, NoticeKind::Success);
        assert_eq!(title, "Accepted");
        assert_eq!(
            message,
            "Runtime: 0.123s\nMemory: 12.50MB\nAll test cases passed!"
        );
    }

    #[test]
    fn test_failure_detail_truncated() {
        let long = "x".repeat(80);
        let (kind, _, message) = verdict_notice(&verdict(
            SubmissionStatus::RuntimeError,
            vec![case(true, None), case(false, Some(&long))],
        ));
        assert_eq!(kind, NoticeKind::Error);
        let last = message.lines().last().unwrap();
        assert_eq!(last, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_wrong_answer_without_error_shows_outputs() {
        let (_, title, message) = verdict_notice(&verdict(
            SubmissionStatus::WrongAnswer,
            vec![case(false, None)],
        ));
        assert_eq!(title, "Wrong Answer");
        assert!(message.ends_with("Expected 3, got 4"));
    }
}
