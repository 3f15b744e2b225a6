//! Multi-line code editor buffer.
//!
//! All edits go through [`CodeEditor`] methods and the submitted code is read
//! back from the same value with [`CodeEditor::text`]; the renderer never owns
//! text state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use std::cell::Cell;
use unicode_width::UnicodeWidthChar;

use crate::models::Language;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CURSOR, COLOR_GUTTER};

const TAB: &str = "    ";

#[derive(Debug, Clone)]
pub struct CodeEditor {
    lines: Vec<String>,
    /// Cursor row.
    row: usize,
    /// Cursor column, in characters.
    col: usize,
    language: Language,
    /// First visible row; adjusted while rendering.
    scroll: Cell<usize>,
}

impl Default for CodeEditor {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl CodeEditor {
    /// An editor holding `language`'s starter template.
    pub fn new(language: Language) -> Self {
        let mut editor = Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            language,
            scroll: Cell::new(0),
        };
        editor.set_text(language.template());
        editor
    }

    pub fn with_text(language: Language, text: &str) -> Self {
        let mut editor = Self::new(language);
        editor.set_text(text);
        editor
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the buffer; cursor moves to the top.
    pub fn set_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\t', TAB);
        self.lines = normalized.split('\n').map(String::from).collect();
        self.row = 0;
        self.col = 0;
        self.scroll.set(0);
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language. An untouched or empty buffer is replaced by the new
    /// language's template; edited code is kept.
    pub fn set_language(&mut self, language: Language) {
        let untouched = self.is_blank() || self.text() == self.language.template();
        self.language = language;
        if untouched {
            self.set_text(language.template());
        }
    }

    /// Back to the current language's template.
    pub fn reset(&mut self) {
        self.set_text(self.language.template());
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// `(row, col)` of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn current_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    fn byte_at(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        match c {
            '\n' => self.newline(),
            '\r' => {}
            '\t' => self.insert_tab(),
            c => {
                let line = &mut self.lines[self.row];
                let at = Self::byte_at(line, self.col);
                line.insert(at, c);
                self.col += 1;
            }
        }
    }

    /// Paste. Keeps the pasted text's own indentation.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.split_line();
            } else {
                self.insert_char(c);
            }
        }
    }

    pub fn insert_tab(&mut self) {
        for c in TAB.chars() {
            self.insert_char(c);
        }
    }

    fn split_line(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_at(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, rest);
    }

    /// Enter: split the line and carry the current indentation over.
    pub fn newline(&mut self) {
        let indent: String = self.lines[self.row]
            .chars()
            .take_while(|c| *c == ' ')
            .take(self.col)
            .collect();
        self.split_line();
        self.lines[self.row].insert_str(0, &indent);
        self.col = indent.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let line = &mut self.lines[self.row];
            let at = Self::byte_at(line, self.col);
            line.remove(at);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_len();
            self.lines[self.row].push_str(&line);
        }
    }

    /// Delete key.
    pub fn delete(&mut self) {
        if self.col < self.current_len() {
            let line = &mut self.lines[self.row];
            let at = Self::byte_at(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.current_len();
    }

    /// Scroll so the cursor row is inside a viewport of `height` rows.
    fn visible_top(&self, height: usize) -> usize {
        let mut top = self.scroll.get();
        if self.row < top {
            top = self.row;
        } else if height > 0 && self.row >= top + height {
            top = self.row + 1 - height;
        }
        self.scroll.set(top);
        top
    }
}

/// Renders a [`CodeEditor`] with a line-number gutter.
pub struct EditorWidget<'a> {
    editor: &'a CodeEditor,
    title: &'a str,
    focused: bool,
}

impl<'a> EditorWidget<'a> {
    pub fn new(editor: &'a CodeEditor, title: &'a str, focused: bool) -> Self {
        Self {
            editor,
            title,
            focused,
        }
    }
}

impl Widget for EditorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused { COLOR_ACCENT } else { COLOR_BORDER };
        let title = format!(" {} [{}] ", self.title, self.editor.language.display_name());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let editor = self.editor;
        let gutter = editor.lines.len().to_string().len() as u16 + 1;
        let text_x = inner.x + gutter.min(inner.width);
        let text_width = inner.width.saturating_sub(gutter) as usize;
        let top = editor.visible_top(inner.height as usize);

        for (screen_row, (idx, line)) in editor
            .lines
            .iter()
            .enumerate()
            .skip(top)
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + screen_row as u16;
            buf.set_string(
                inner.x,
                y,
                format!("{:>width$} ", idx + 1, width = gutter as usize - 1),
                Style::default().fg(COLOR_GUTTER),
            );

            // Horizontal scroll follows the cursor on its own row only.
            let skip = if idx == editor.row && text_width > 0 && editor.col >= text_width {
                editor.col + 1 - text_width
            } else {
                0
            };
            let mut x = 0usize;
            for (col, ch) in line.chars().enumerate().skip(skip) {
                let w = ch.width().unwrap_or(1).max(1);
                if x + w > text_width {
                    break;
                }
                let style = if self.focused && idx == editor.row && col == editor.col {
                    Style::default().fg(Color::Black).bg(COLOR_CURSOR)
                } else {
                    Style::default().fg(Color::White)
                };
                buf.set_string(text_x + x as u16, y, ch.to_string(), style);
                x += w;
            }

            if self.focused && idx == editor.row && editor.col >= line.chars().count() {
                let cursor_x = editor.col - skip;
                if cursor_x < text_width {
                    buf.set_string(
                        text_x + cursor_x as u16,
                        y,
                        " ",
                        Style::default().bg(COLOR_CURSOR),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_editor_holds_template() {
        let editor = CodeEditor::new(Language::Rust);
        assert_eq!(editor.text(), Language::Rust.template());
        assert_eq!(editor.cursor(), (0, 0));
    }

    #[test]
    fn test_newline_keeps_indentation() {
        let mut editor = CodeEditor::with_text(Language::Python, "def f():\n    x = 1");
        editor.move_down();
        editor.move_end();
        editor.newline();
        editor.insert_str("return x");
        assert_eq!(editor.text(), "def f():\n    x = 1\n    return x");
        assert_eq!(editor.cursor(), (2, 12));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = CodeEditor::with_text(Language::C, "ab\ncd");
        editor.move_down();
        editor.backspace();
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn test_delete_at_line_end_pulls_next_line() {
        let mut editor = CodeEditor::with_text(Language::C, "ab\ncd");
        editor.move_end();
        editor.delete();
        assert_eq!(editor.text(), "abcd");
    }

    #[test]
    fn test_paste_normalizes_line_endings_and_tabs() {
        let mut editor = CodeEditor::with_text(Language::Go, "");
        editor.insert_str("a\r\n\tb");
        assert_eq!(editor.text(), "a\n    b");
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut editor = CodeEditor::with_text(Language::Go, "long line\nab");
        editor.move_end();
        editor.move_down();
        assert_eq!(editor.cursor(), (1, 2));
        editor.move_right();
        assert_eq!(editor.cursor(), (1, 2));
        editor.move_left();
        editor.move_left();
        editor.move_left();
        assert_eq!(editor.cursor(), (0, 9));
    }

    #[test]
    fn test_language_switch_replaces_untouched_template() {
        let mut editor = CodeEditor::new(Language::Python);
        editor.set_language(Language::Java);
        assert_eq!(editor.text(), Language::Java.template());

        editor.set_text("class A {}");
        editor.set_language(Language::Cpp);
        assert_eq!(editor.text(), "class A {}");
        assert_eq!(editor.language(), Language::Cpp);

        editor.reset();
        assert_eq!(editor.text(), Language::Cpp.template());
    }

    #[test]
    fn test_multibyte_insert() {
        let mut editor = CodeEditor::with_text(Language::Python, "print('')");
        for _ in 0..7 {
            editor.move_right();
        }
        editor.insert_str("ñé");
        assert_eq!(editor.text(), "print('ñé')");
    }

    #[test]
    fn test_render_shows_gutter_and_scrolls_to_cursor() {
        let text = (1..=20).map(|i| format!("l{}", i)).collect::<Vec<_>>().join("\n");
        let mut editor = CodeEditor::with_text(Language::Python, &text);
        for _ in 0..19 {
            editor.move_down();
        }
        let area = Rect::new(0, 0, 20, 7);
        let mut buf = Buffer::empty(area);
        EditorWidget::new(&editor, "Code", true).render(area, &mut buf);

        let last_row: String = (1..19).map(|x| buf[(x, 5)].symbol().to_string()).collect();
        assert!(last_row.starts_with("20 l20"), "row was {:?}", last_row);
    }
}
