//! Keyboard and paste dispatch.
//!
//! Form screens and open editor panes take every printable key. Everywhere
//! else keys are single-letter commands, and the ones a screen leaves alone
//! fall through to the global bindings (screen hotkeys, logout, quit, retry).

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use super::{
    App, ContestFormView, ModerationAction, Pane, QuestionFormView, Screen, SignupView, NAV_ITEMS,
};
use crate::filters::all_tags;
use crate::widgets::{CodeEditor, InputBox};

/// Countdown armed unless a running contest supplies its own end.
const DEFAULT_COUNTDOWN_MINUTES: u64 = 30;

/// Shared line-editing keys for single-line inputs.
fn edit_input(input: &mut InputBox, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert_char(c)
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete_char(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.move_cursor_home(),
        KeyCode::End => input.move_cursor_end(),
        _ => return false,
    }
    true
}

/// Editing keys for the multi-line code editor.
fn edit_code(editor: &mut CodeEditor, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            editor.insert_char(c)
        }
        KeyCode::Enter => editor.newline(),
        KeyCode::Tab => editor.insert_tab(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        _ => return false,
    }
    true
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn step(selected: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    }
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_ctrl(&key, 'c') {
            self.quit();
            return;
        }
        self.mark_dirty();

        let handled = match self.screen {
            Screen::Login => self.login_key(key),
            Screen::Signup => self.signup_key(key),
            Screen::Dashboard => false,
            Screen::Questions => self.questions_key(key),
            Screen::QuestionDetail(_) => self.question_key(key),
            Screen::Playground => self.playground_key(key),
            Screen::Submissions => self.submissions_key(key),
            Screen::SubmissionDetail(id) => self.submission_key(key, id),
            Screen::Contests => self.contests_key(key),
            Screen::ContestDetail(_) => self.contest_key(key),
            Screen::AiReview => self.review_key(key),
            Screen::Moderation => self.moderation_key(key),
        };
        if !handled {
            self.global_key(key);
        }
    }

    /// Bracketed paste goes to whatever field is taking text.
    pub fn handle_paste(&mut self, text: String) {
        self.mark_dirty();
        match self.screen {
            Screen::Login => self.login.focused_input().insert_str(&text),
            Screen::Signup => {
                if let Some(input) = self.signup.focused_input() {
                    input.insert_str(&text);
                }
            }
            Screen::Questions => {
                if let Some(form) = self.questions.new_question.as_mut() {
                    form.focused_input().insert_str(&text);
                } else if self.questions.searching {
                    self.questions.search.insert_str(&text);
                    self.questions.filter.search = self.questions.search.content().to_string();
                    self.questions.clamp_selection();
                }
            }
            Screen::Submissions if self.submissions.searching => {
                self.submissions.search.insert_str(&text);
                self.submissions.filter.search = self.submissions.search.content().to_string();
                self.submissions.clamp_selection();
            }
            Screen::Contests => {
                if let Some(form) = self.contests.create.as_mut() {
                    form.focused_input().insert_str(&text);
                }
            }
            Screen::QuestionDetail(_) if self.question.pane == Pane::Editor => {
                self.question.editor.insert_str(&text)
            }
            Screen::ContestDetail(_) if self.contest.pane == Pane::Editor => {
                self.contest.editor.insert_str(&text)
            }
            Screen::Playground => {
                if let Some(prompt) = self.playground.import_prompt.as_mut() {
                    prompt.insert_str(&text);
                } else {
                    match self.playground.pane {
                        Pane::Editor => self.playground.editor.insert_str(&text),
                        Pane::Input => self.playground.input.insert_str(&text),
                        Pane::Commands => {}
                    }
                }
            }
            _ => tracing::debug!("Ignoring paste on {:?}", self.screen),
        }
    }

    fn global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if self.session.is_authenticated() => {
                if let Some((_, screen)) = NAV_ITEMS.iter().find(|(hotkey, _)| *hotkey == c) {
                    self.navigate(*screen);
                    return;
                }
                match c {
                    'L' => self.logout(),
                    'q' => self.quit(),
                    'r' if self.screen_failed() => self.retry(),
                    _ => {}
                }
            }
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                if !self.notifications.is_empty() {
                    self.notifications.dismiss_all();
                } else {
                    self.go_back();
                }
            }
            _ => {}
        }
    }

    /// True when the screen's main fetch failed and `r` should retry it.
    pub fn screen_failed(&self) -> bool {
        match self.screen {
            Screen::Dashboard => self.dashboard.data.error().is_some(),
            Screen::Questions => self.questions.problems.error().is_some(),
            Screen::QuestionDetail(_) => self.question.problem.error().is_some(),
            Screen::Submissions => self.submissions.submissions.error().is_some(),
            Screen::SubmissionDetail(_) => self.submission.submission.error().is_some(),
            Screen::Contests => self.contests.contests.error().is_some(),
            Screen::ContestDetail(_) => self.contest.contest.error().is_some(),
            Screen::AiReview => self.review.progress.error().is_some(),
            Screen::Moderation => self.moderation.questions.error().is_some(),
            Screen::Login | Screen::Signup | Screen::Playground => false,
        }
    }

    // ========================================================================
    // Auth forms
    // ========================================================================

    fn login_key(&mut self, key: KeyEvent) -> bool {
        if is_ctrl(&key, 'n') {
            self.navigate(Screen::Signup);
            return true;
        }
        if self.login.submitting {
            return true;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.login.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.login.cycle_focus(false),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Esc => return false,
            _ => {
                edit_input(self.login.focused_input(), key);
            }
        }
        true
    }

    fn signup_key(&mut self, key: KeyEvent) -> bool {
        if is_ctrl(&key, 'l') || key.code == KeyCode::Esc {
            self.navigate(Screen::Login);
            return true;
        }
        if self.signup.submitting {
            return true;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.signup.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.signup.cycle_focus(false),
            KeyCode::Char(' ') if self.signup.focus == SignupView::FIELDS - 1 => {
                self.signup.agree_terms = !self.signup.agree_terms
            }
            KeyCode::Enter => self.submit_signup(),
            _ => {
                if let Some(input) = self.signup.focused_input() {
                    edit_input(input, key);
                }
            }
        }
        true
    }

    // ========================================================================
    // Questions
    // ========================================================================

    fn questions_key(&mut self, key: KeyEvent) -> bool {
        if let Some(form) = self.questions.new_question.as_mut() {
            match key.code {
                KeyCode::Esc => self.questions.new_question = None,
                KeyCode::Tab => form.cycle_focus(true),
                KeyCode::BackTab => form.cycle_focus(false),
                KeyCode::Enter => self.submit_question_form(),
                _ => {
                    edit_input(form.focused_input(), key);
                }
            }
            return true;
        }

        if let Some(id) = self.questions.confirm_delete {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.questions.confirm_delete = None;
                    self.moderate(ModerationAction::DeleteProblem, id);
                }
                _ => self.questions.confirm_delete = None,
            }
            return true;
        }

        if let Some(cursor) = self.questions.tag_picker {
            let tags = self
                .questions
                .problems
                .data()
                .map(|p| all_tags(p))
                .unwrap_or_default();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.questions.tag_picker = Some(step(cursor, tags.len(), false))
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.questions.tag_picker = Some(step(cursor, tags.len(), true))
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(tag) = tags.get(cursor) {
                        self.questions.filter.toggle_tag(tag);
                        self.questions.clamp_selection();
                    }
                }
                KeyCode::Esc | KeyCode::Char('t') => self.questions.tag_picker = None,
                _ => {}
            }
            return true;
        }

        if self.questions.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.questions.searching = false,
                _ => {
                    edit_input(&mut self.questions.search, key);
                }
            }
            self.questions.filter.search = self.questions.search.content().to_string();
            self.questions.clamp_selection();
            return true;
        }

        let len = self.questions.visible().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.questions.selected = step(self.questions.selected, len, false)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.questions.selected = step(self.questions.selected, len, true)
            }
            KeyCode::Enter => {
                if let Some(id) = self.questions.selected_problem().map(|p| p.id) {
                    self.navigate(Screen::QuestionDetail(id));
                }
            }
            KeyCode::Char('/') => self.questions.searching = true,
            KeyCode::Char('d') => {
                self.questions.filter.cycle_difficulty();
                self.questions.clamp_selection();
            }
            KeyCode::Char('s') => {
                self.questions.filter.sort = self.questions.filter.sort.next();
            }
            KeyCode::Char('t') if self.questions.problems.data().is_some() => {
                self.questions.tag_picker = Some(0)
            }
            KeyCode::Char('c') => {
                self.questions.filter = Default::default();
                self.questions.search.clear();
                self.questions.clamp_selection();
            }
            KeyCode::Char('n') => self.questions.new_question = Some(QuestionFormView::new()),
            KeyCode::Char('D') if self.session.is_staff() => {
                self.questions.confirm_delete = self.questions.selected_problem().map(|p| p.id)
            }
            _ => return false,
        }
        true
    }

    // ========================================================================
    // Editor screens
    // ========================================================================

    /// Ctrl bindings shared by every editor screen, in any pane.
    fn editor_shortcut(&mut self, key: &KeyEvent) -> bool {
        if is_ctrl(key, 'r') {
            self.run_code();
        } else if is_ctrl(key, 's') {
            self.submit_solution();
        } else {
            return false;
        }
        true
    }

    fn question_key(&mut self, key: KeyEvent) -> bool {
        if self.editor_shortcut(&key) {
            return true;
        }
        if self.question.pane == Pane::Editor {
            if key.code == KeyCode::Esc {
                self.question.pane = Pane::Commands;
            } else {
                edit_code(&mut self.question.editor, key);
            }
            return true;
        }
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter if self.question.problem.data().is_some() => {
                self.question.pane = Pane::Editor
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.question.statement_scroll = self.question.statement_scroll.saturating_sub(1)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.question.statement_scroll = self.question.statement_scroll.saturating_add(1)
            }
            KeyCode::Char('l') => self.cycle_language(),
            KeyCode::Char('y') => self.copy_code(),
            KeyCode::Char('a') => self.request_problem_review(),
            KeyCode::Char('v') if self.question.review.data().is_some() => {
                self.question.show_review = !self.question.show_review
            }
            KeyCode::Char('Z') => self.reset_editor(),
            _ => return false,
        }
        true
    }

    fn playground_key(&mut self, key: KeyEvent) -> bool {
        if let Some(prompt) = self.playground.import_prompt.as_mut() {
            match key.code {
                KeyCode::Esc => self.playground.import_prompt = None,
                KeyCode::Enter => {
                    let path = PathBuf::from(prompt.content().trim());
                    self.playground.import_prompt = None;
                    if !path.as_os_str().is_empty() {
                        self.import_file(&path);
                    }
                }
                _ => {
                    edit_input(prompt, key);
                }
            }
            return true;
        }

        if self.playground.show_snippets {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.playground.snippet_cursor =
                        step(self.playground.snippet_cursor, self.snippets.len(), false)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.playground.snippet_cursor =
                        step(self.playground.snippet_cursor, self.snippets.len(), true)
                }
                KeyCode::Enter => self.load_snippet(self.playground.snippet_cursor),
                KeyCode::Esc | KeyCode::Char('o') => self.playground.show_snippets = false,
                _ => {}
            }
            return true;
        }

        if self.editor_shortcut(&key) {
            return true;
        }
        match self.playground.pane {
            Pane::Editor | Pane::Input if key.code == KeyCode::Esc => {
                self.playground.pane = Pane::Commands;
                return true;
            }
            Pane::Editor => {
                edit_code(&mut self.playground.editor, key);
                return true;
            }
            Pane::Input => {
                edit_code(&mut self.playground.input, key);
                return true;
            }
            Pane::Commands => {}
        }
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter => self.playground.pane = Pane::Editor,
            KeyCode::Char('n') => self.playground.pane = Pane::Input,
            KeyCode::Char('l') => self.cycle_language(),
            KeyCode::Char('y') => self.copy_code(),
            KeyCode::Char('x') => self.export_code(),
            KeyCode::Char('i') => self.playground.import_prompt = Some(InputBox::new()),
            KeyCode::Char('w') => self.save_snippet(),
            KeyCode::Char('o') => {
                self.playground.show_snippets = true;
                self.playground.snippet_cursor = 0;
            }
            KeyCode::Char('Z') => self.reset_editor(),
            _ => return false,
        }
        true
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    fn submissions_key(&mut self, key: KeyEvent) -> bool {
        if self.submissions.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.submissions.searching = false,
                _ => {
                    edit_input(&mut self.submissions.search, key);
                }
            }
            self.submissions.filter.search = self.submissions.search.content().to_string();
            self.submissions.clamp_selection();
            return true;
        }

        let visible: Vec<i64> = self.submissions.visible().iter().map(|s| s.id).collect();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.submissions.selected = step(self.submissions.selected, visible.len(), false)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.submissions.selected = step(self.submissions.selected, visible.len(), true)
            }
            KeyCode::Enter => {
                if let Some(id) = visible.get(self.submissions.selected) {
                    self.navigate(Screen::SubmissionDetail(*id));
                }
            }
            KeyCode::Char('/') => self.submissions.searching = true,
            KeyCode::Char('s') => {
                self.submissions.filter.cycle_status();
                self.submissions.clamp_selection();
            }
            KeyCode::Char('l') => {
                self.submissions.filter.cycle_language();
                self.submissions.clamp_selection();
            }
            KeyCode::Char('c') => {
                self.submissions.filter = Default::default();
                self.submissions.search.clear();
                self.submissions.clamp_selection();
            }
            _ => return false,
        }
        true
    }

    fn submission_key(&mut self, key: KeyEvent, id: i64) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.submission.scroll = self.submission.scroll.saturating_sub(1)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.submission.scroll = self.submission.scroll.saturating_add(1)
            }
            KeyCode::Char('y') => self.copy_code(),
            KeyCode::Char('x') => self.export_code(),
            KeyCode::Char('a') if self.submission.submission.data().is_some() => {
                self.review_submission(id)
            }
            KeyCode::Char('p') => {
                if let Some(problem_id) = self.submission.submission.data().map(|s| s.problem_id)
                {
                    self.navigate(Screen::QuestionDetail(problem_id));
                }
            }
            _ => return false,
        }
        true
    }

    // ========================================================================
    // Contests
    // ========================================================================

    fn contests_key(&mut self, key: KeyEvent) -> bool {
        if let Some(form) = self.contests.create.as_mut() {
            match key.code {
                KeyCode::Esc => self.contests.create = None,
                KeyCode::Tab => form.cycle_focus(true),
                KeyCode::BackTab => form.cycle_focus(false),
                KeyCode::Enter => self.submit_contest_form(),
                _ => {
                    edit_input(form.focused_input(), key);
                }
            }
            return true;
        }

        let now = Utc::now();
        let len = self.contests.ordered(now).len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.contests.selected = step(self.contests.selected, len, false)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.contests.selected = step(self.contests.selected, len, true)
            }
            KeyCode::Enter => {
                if let Some(id) = self.contests.selected_contest(now).map(|c| c.id) {
                    self.navigate(Screen::ContestDetail(id));
                }
            }
            KeyCode::Char('c') if self.session.is_staff() => {
                self.contests.create = Some(ContestFormView::default())
            }
            _ => return false,
        }
        true
    }

    fn contest_key(&mut self, key: KeyEvent) -> bool {
        if self.editor_shortcut(&key) {
            return true;
        }
        if self.contest.pane == Pane::Editor {
            if key.code == KeyCode::Esc {
                self.contest.pane = Pane::Commands;
            } else {
                edit_code(&mut self.contest.editor, key);
            }
            return true;
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('[') => self.select_contest_problem(false),
            KeyCode::Right | KeyCode::Char(']') => self.select_contest_problem(true),
            KeyCode::Char('e') | KeyCode::Enter if self.contest.contest.data().is_some() => {
                self.contest.pane = Pane::Editor
            }
            KeyCode::Char('l') => self.cycle_language(),
            KeyCode::Char('y') => self.copy_code(),
            KeyCode::Char('t') => self.contest.timer.toggle(),
            KeyCode::Char('T') => self.contest.timer.reset(),
            KeyCode::Char('m') => {
                let now = Utc::now();
                let minutes = self
                    .contest
                    .contest
                    .data()
                    .and_then(|c| c.minutes_left(now))
                    .unwrap_or(DEFAULT_COUNTDOWN_MINUTES);
                self.contest.timer.start_countdown(minutes);
            }
            KeyCode::Char('Z') => self.reset_editor(),
            _ => return false,
        }
        true
    }

    fn select_contest_problem(&mut self, forward: bool) {
        let count = self.contest.contest.data().map_or(0, |c| c.problems.len());
        let next = step(self.contest.selected_problem, count, forward);
        if count == 0 || next == self.contest.selected_problem {
            return;
        }
        self.contest.selected_problem = next;
        self.load_contest_problem();
    }

    // ========================================================================
    // AI review and moderation
    // ========================================================================

    fn review_key(&mut self, key: KeyEvent) -> bool {
        let items: Vec<(Option<i64>, Option<String>)> = self
            .review
            .review
            .data()
            .map(|r| {
                r.recommendations
                    .items()
                    .into_iter()
                    .map(|(_, item)| (item.problem_id(), item.external_url().map(String::from)))
                    .collect()
            })
            .unwrap_or_default();
        match key.code {
            KeyCode::Char('g') => self.request_comprehensive_review(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.review.selected = step(self.review.selected, items.len(), false)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.review.selected = step(self.review.selected, items.len(), true)
            }
            KeyCode::PageUp => self.review.scroll = self.review.scroll.saturating_sub(5),
            KeyCode::PageDown => self.review.scroll = self.review.scroll.saturating_add(5),
            KeyCode::Enter => {
                if let Some((problem_id, url)) = items.get(self.review.selected).cloned() {
                    self.open_recommendation(problem_id, url);
                }
            }
            _ => return false,
        }
        true
    }

    fn moderation_key(&mut self, key: KeyEvent) -> bool {
        let ids: Vec<i64> = self
            .moderation
            .questions
            .data()
            .map(|q| q.iter().map(|q| q.id).collect())
            .unwrap_or_default();
        let selected = ids.get(self.moderation.selected).copied();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.moderation.selected = step(self.moderation.selected, ids.len(), false)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.moderation.selected = step(self.moderation.selected, ids.len(), true)
            }
            KeyCode::Char('a') => {
                if let Some(id) = selected {
                    self.moderate(ModerationAction::Approve, id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = selected {
                    self.moderate(ModerationAction::Reject, id);
                }
            }
            KeyCode::Char('f') => {
                self.moderation.filter = self.moderation.filter.next();
                self.load_pending_questions();
            }
            _ => return false,
        }
        true
    }
}
