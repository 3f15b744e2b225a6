//! User-triggered operations: forms, run/submit, reviews, moderation and
//! clipboard/file helpers. Validation runs before anything is spawned.

use chrono::Utc;
use std::path::Path;

use super::{App, Loadable, ModerationAction, Payload, Screen, Snippet};
use crate::clipboard;
use crate::error::ValidationError;
use crate::files;
use crate::models::{ContestSubmitRequest, ReviewRequest, RunRequest, SubmitRequest};
use crate::validation::{
    validate_code, validate_contest, validate_login, validate_question, validate_signup,
};
use crate::widgets::CodeEditor;

impl App {
    fn reject(&mut self, error: ValidationError) {
        tracing::debug!("Validation failed: {}", error);
        self.notifications.error(error.title(), error.to_string());
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        let username = self.login.username.content().to_string();
        let password = self.login.password.content().to_string();
        if let Err(e) = validate_login(&username, &password) {
            return self.reject(e);
        }
        self.login.submitting = true;
        let api = self.api.clone();
        self.spawn(async move { Payload::LoggedIn(api.login(&username, &password).await) });
    }

    pub fn submit_signup(&mut self) {
        if self.signup.submitting {
            return;
        }
        let form = self.signup.form();
        if let Err(e) = validate_signup(&form) {
            return self.reject(e);
        }
        self.signup.submitting = true;
        let api = self.api.clone();
        self.spawn(async move {
            Payload::SignedUp(api.signup(&form.username, &form.email, &form.password).await)
        });
    }

    /// Tell the backend, then drop the session once it answered.
    pub fn logout(&mut self) {
        if self.logging_out || !self.session.is_authenticated() {
            return;
        }
        self.logging_out = true;
        self.abort_tasks();
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = api.logout().await {
                tracing::warn!("Logout request failed: {}", e);
            }
            let _ = tx.send(super::AppMessage::LoggedOut);
        });
    }

    // ========================================================================
    // Code execution
    // ========================================================================

    /// Run the playground buffer with its stdin, or the question editor
    /// against the first sample input.
    pub fn run_code(&mut self) {
        let (editor, input) = match self.screen {
            Screen::Playground if !self.playground.running => {
                (&self.playground.editor, self.playground.input.text())
            }
            Screen::QuestionDetail(_) if !self.question.running => {
                (&self.question.editor, self.question.sample_input())
            }
            _ => return,
        };
        let request = RunRequest {
            code: editor.text(),
            language: editor.language(),
            input,
        };
        if let Err(e) = validate_code(&request.code) {
            return self.reject(e);
        }
        match self.screen {
            Screen::Playground => {
                self.playground.running = true;
                self.playground.output = None;
            }
            _ => {
                self.question.running = true;
                self.question.output = None;
            }
        }
        let api = self.api.clone();
        self.spawn(async move { Payload::Ran(api.run_code(&request).await) });
    }

    /// Submit the question editor, or the contest editor for the selected
    /// contest problem.
    pub fn submit_solution(&mut self) {
        match self.screen {
            Screen::QuestionDetail(problem_id) if !self.question.submitting => {
                let request = SubmitRequest {
                    problem_id,
                    code: self.question.editor.text(),
                    language: self.question.editor.language(),
                };
                if let Err(e) = validate_code(&request.code) {
                    return self.reject(e);
                }
                self.question.submitting = true;
                self.question.verdict = None;
                let api = self.api.clone();
                self.spawn(async move { Payload::Judged(api.submit_solution(&request).await) });
            }
            Screen::ContestDetail(contest_id) if !self.contest.submitting => {
                let Some(problem_id) = self.contest.selected_problem_id() else {
                    return self.reject(ValidationError::NoProblemSelected);
                };
                let request = ContestSubmitRequest {
                    contest_id,
                    problem_id,
                    code: self.contest.editor.text(),
                    language: self.contest.editor.language(),
                };
                if let Err(e) = validate_code(&request.code) {
                    return self.reject(e);
                }
                self.contest.submitting = true;
                self.contest.verdict = None;
                let api = self.api.clone();
                self.spawn(async move {
                    Payload::Judged(api.submit_contest_solution(&request).await)
                });
            }
            _ => {}
        }
    }

    fn editor_mut(&mut self) -> Option<&mut CodeEditor> {
        match self.screen {
            Screen::Playground => Some(&mut self.playground.editor),
            Screen::QuestionDetail(_) => Some(&mut self.question.editor),
            Screen::ContestDetail(_) => Some(&mut self.contest.editor),
            _ => None,
        }
    }

    /// Next language for the current editor; becomes the default for new editors.
    pub fn cycle_language(&mut self) {
        if let Some(editor) = self.editor_mut() {
            let next = editor.language().next();
            editor.set_language(next);
            self.language = next;
        }
    }

    pub fn reset_editor(&mut self) {
        if let Some(editor) = self.editor_mut() {
            editor.reset();
        }
    }

    // ========================================================================
    // Reviews
    // ========================================================================

    /// AI review of the code in the question editor.
    pub fn request_problem_review(&mut self) {
        let Screen::QuestionDetail(problem_id) = self.screen else {
            return;
        };
        if self.question.review.is_loading() {
            return;
        }
        let code = self.question.editor.text();
        if let Err(e) = validate_code(&code) {
            return self.reject(e);
        }
        self.question.review = Loadable::Loading;
        let api = self.api.clone();
        self.spawn(async move { Payload::Review(api.problem_review(problem_id, &code).await) });
    }

    /// Overall review of the user's recent work.
    pub fn request_comprehensive_review(&mut self) {
        if self.screen != Screen::AiReview || self.review.review.is_loading() {
            return;
        }
        self.review.review = Loadable::Loading;
        let api = self.api.clone();
        self.spawn(async move { Payload::Review(api.comprehensive_review().await) });
    }

    /// Open the review screen with a review of one submission.
    pub fn review_submission(&mut self, submission_id: i64) {
        self.navigate(Screen::AiReview);
        if self.screen != Screen::AiReview {
            return;
        }
        self.review.review = Loadable::Loading;
        let request = ReviewRequest {
            submission_id: Some(submission_id),
            ..ReviewRequest::default()
        };
        let api = self.api.clone();
        self.spawn(async move { Payload::Review(api.code_review(&request).await) });
    }

    // ========================================================================
    // Forms
    // ========================================================================

    pub fn submit_contest_form(&mut self) {
        let Some(form) = self.contests.create.as_mut() else {
            return;
        };
        if form.submitting {
            return;
        }
        let contest = match validate_contest(&form.form()) {
            Ok(contest) => contest,
            Err(e) => return self.reject(e),
        };
        form.submitting = true;
        let api = self.api.clone();
        self.spawn(async move { Payload::ContestCreated(api.create_contest(&contest).await) });
    }

    pub fn submit_question_form(&mut self) {
        let Some(form) = self.questions.new_question.as_mut() else {
            return;
        };
        if form.submitting {
            return;
        }
        let question = match validate_question(&form.form()) {
            Ok(question) => question,
            Err(e) => return self.reject(e),
        };
        form.submitting = true;
        let api = self.api.clone();
        self.spawn(async move {
            Payload::QuestionProposed(api.submit_pending_question(&question).await)
        });
    }

    // ========================================================================
    // Moderation
    // ========================================================================

    pub fn moderate(&mut self, action: ModerationAction, id: i64) {
        if self.moderation.busy || !self.session.is_staff() {
            return;
        }
        self.moderation.busy = action != ModerationAction::DeleteProblem;
        let api = self.api.clone();
        self.spawn(async move {
            let result = match action {
                ModerationAction::Approve => api.approve_pending_question(id).await,
                ModerationAction::Reject => api.reject_pending_question(id).await,
                ModerationAction::DeleteProblem => api.delete_problem(id).await,
            };
            Payload::Moderated { action, id, result }
        });
    }

    // ========================================================================
    // Clipboard and files
    // ========================================================================

    /// Code visible on the current screen.
    fn screen_code(&self) -> Option<String> {
        match self.screen {
            Screen::Playground => Some(self.playground.editor.text()),
            Screen::QuestionDetail(_) => Some(self.question.editor.text()),
            Screen::ContestDetail(_) => Some(self.contest.editor.text()),
            Screen::SubmissionDetail(_) => self.submission.submission.data().map(|s| s.code.clone()),
            _ => None,
        }
    }

    pub fn copy_code(&mut self) {
        let Some(code) = self.screen_code() else {
            return;
        };
        match clipboard::copy_text(&code) {
            Ok(()) => self
                .notifications
                .success("Code copied", "The code has been copied to your clipboard."),
            Err(e) => self.notifications.error("Copy failed", e.to_string()),
        }
    }

    /// Save the playground buffer or the open submission's code to disk.
    pub fn export_code(&mut self) {
        let (file_name, code) = match self.screen {
            Screen::Playground => (
                files::playground_file_name(
                    self.playground.editor.language(),
                    Utc::now().date_naive(),
                ),
                self.playground.editor.text(),
            ),
            Screen::SubmissionDetail(_) => match self.submission.submission.data() {
                Some(s) => (s.export_file_name(), s.code.clone()),
                None => return,
            },
            _ => return,
        };
        match files::export_code(&files::export_dir(), &file_name, &code) {
            Ok(path) => self
                .notifications
                .success("Code downloaded", format!("Saved to {}", path.display())),
            Err(e) => self.notifications.error("Export failed", e.to_string()),
        }
    }

    /// Load a source file into the playground editor.
    pub fn import_file(&mut self, path: &Path) {
        match files::import_source(path) {
            Ok(imported) => {
                let language = imported
                    .language
                    .unwrap_or_else(|| self.playground.editor.language());
                self.playground.editor = CodeEditor::with_text(language, &imported.code);
                self.playground.output = None;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.notifications
                    .success("Snippet imported", format!("Successfully imported {}", name));
            }
            Err(e) => self.notifications.error("Import failed", e.to_string()),
        }
    }

    /// Keep the playground buffer in the in-memory snippet list.
    pub fn save_snippet(&mut self) {
        let editor = &self.playground.editor;
        if editor.is_blank() {
            return self.reject(ValidationError::EmptyCode);
        }
        let snippet = Snippet {
            name: format!(
                "Snippet {} ({})",
                self.snippets.len() + 1,
                editor.language().display_name()
            ),
            language: editor.language(),
            code: editor.text(),
        };
        self.snippets.push(snippet);
        self.notifications
            .success("Code saved", "Your code snippet has been saved to your collection.");
    }

    pub fn load_snippet(&mut self, index: usize) {
        if let Some(snippet) = self.snippets.get(index) {
            self.playground.editor = CodeEditor::with_text(snippet.language, &snippet.code);
            self.playground.show_snippets = false;
        }
    }

    /// Open a recommendation link: practice problems in-app, others in the browser.
    pub fn open_recommendation(&mut self, problem_id: Option<i64>, url: Option<String>) {
        if let Some(id) = problem_id {
            self.navigate(Screen::QuestionDetail(id));
        } else if let Some(url) = url {
            if let Err(e) = webbrowser::open(&url) {
                self.notifications.error("Could not open link", e.to_string());
            }
        }
    }
}
