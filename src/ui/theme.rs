//! Color palette for the judge UI.

use ratatui::style::{Color, Style};

use crate::models::{ContestStatus, Difficulty, SubmissionStatus};
use crate::notifications::NoticeKind;

// ============================================================================
// Base palette
// ============================================================================

pub const COLOR_BORDER: Color = Color::DarkGray;

/// Focused borders, selected rows, key hints
pub const COLOR_ACCENT: Color = Color::Cyan;

pub const COLOR_HEADER: Color = Color::White;

pub const COLOR_DIM: Color = Color::DarkGray;

/// Editor and input cursor block
pub const COLOR_CURSOR: Color = Color::Magenta;

pub const COLOR_GUTTER: Color = Color::Rgb(90, 90, 110);

pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 40, 60);

pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

// ============================================================================
// Status colors
// ============================================================================

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_WARNING: Color = Color::Yellow;

pub const COLOR_INFO: Color = Color::Rgb(0, 122, 204); // blue #007ACC

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => COLOR_SUCCESS,
        Difficulty::Medium => COLOR_WARNING,
        Difficulty::Hard => COLOR_ERROR,
    }
}

pub fn status_color(status: SubmissionStatus) -> Color {
    match status {
        SubmissionStatus::Accepted => COLOR_SUCCESS,
        SubmissionStatus::WrongAnswer | SubmissionStatus::RuntimeError => COLOR_ERROR,
        SubmissionStatus::TimeLimitExceeded => COLOR_WARNING,
        SubmissionStatus::Pending => Color::Gray,
    }
}

pub fn contest_status_color(status: ContestStatus) -> Color {
    match status {
        ContestStatus::Active => COLOR_SUCCESS,
        ContestStatus::Upcoming => COLOR_INFO,
        ContestStatus::Ended => Color::Gray,
    }
}

pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Success => COLOR_SUCCESS,
        NoticeKind::Error => COLOR_ERROR,
        NoticeKind::Info => COLOR_INFO,
    }
}

/// `[x]` style used for key hints in footers.
pub fn key_style() -> Style {
    Style::default().fg(COLOR_ACCENT)
}
