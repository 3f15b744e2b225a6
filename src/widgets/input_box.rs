use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CURSOR};

/// Single-line text field used by forms and search bars.
///
/// The cursor is a character index, so multi-byte input edits cleanly.
/// A masked field renders every character as `•`.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    cursor: usize,
    masked: bool,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// A password field.
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_content(content);
        input
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Paste; newlines are dropped.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(c);
        }
    }

    /// Delete key.
    pub fn delete_char(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Replace the content; the cursor moves to the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn display_text(&self) -> String {
        if self.masked {
            "•".repeat(self.char_len())
        } else {
            self.content.clone()
        }
    }

    pub fn render_with_title(&self, area: Rect, buf: &mut Buffer, title: &str, focused: bool) {
        let inner_width = area.width.saturating_sub(2) as usize;

        // Keep the cursor visible, leaving one cell for the cursor block.
        let scroll = if inner_width > 0 && self.cursor >= inner_width {
            self.cursor + 1 - inner_width
        } else {
            0
        };

        let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .render(area, buf);

        if inner_width == 0 || area.height < 3 {
            return;
        }
        let (x, y) = (area.x + 1, area.y + 1);

        let visible: String = self
            .display_text()
            .chars()
            .skip(scroll)
            .take(inner_width)
            .collect();
        buf.set_string(x, y, &visible, Style::default().fg(Color::White));

        if focused {
            let offset = (self.cursor - scroll) as u16;
            let under = visible.chars().nth(offset as usize).unwrap_or(' ');
            buf.set_string(
                x + offset,
                y,
                under.to_string(),
                Style::default().fg(Color::Black).bg(COLOR_CURSOR),
            );
        }
    }
}

/// Borrowing [`Widget`] adapter for [`InputBox`].
pub struct InputBoxWidget<'a> {
    input_box: &'a InputBox,
    title: &'a str,
    focused: bool,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input_box: &'a InputBox, title: &'a str, focused: bool) -> Self {
        Self {
            input_box,
            title,
            focused,
        }
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.input_box
            .render_with_title(area, buf, self.title, self.focused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = InputBox::new();
        input.insert_str("Hi!");
        input.backspace();
        assert_eq!(input.content(), "Hi");
        assert_eq!(input.cursor_position(), 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBox::with_content("héllo");
        input.move_cursor_home();
        input.move_cursor_right();
        input.move_cursor_right();
        input.backspace();
        assert_eq!(input.content(), "hllo");
        input.insert_char('é');
        assert_eq!(input.content(), "héllo");
    }

    #[test]
    fn test_delete_char_at_cursor() {
        let mut input = InputBox::with_content("abc");
        input.move_cursor_home();
        input.delete_char();
        assert_eq!(input.content(), "bc");
        input.move_cursor_end();
        input.delete_char();
        assert_eq!(input.content(), "bc");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputBox::with_content("ab");
        input.move_cursor_right();
        assert_eq!(input.cursor_position(), 2);
        input.move_cursor_home();
        input.move_cursor_left();
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_paste_drops_newlines() {
        let mut input = InputBox::new();
        input.insert_str("alice\r\n");
        assert_eq!(input.content(), "alice");
    }

    #[test]
    fn test_masked_render_hides_content() {
        let mut input = InputBox::masked();
        input.insert_str("secret");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        InputBoxWidget::new(&input, "Password", false).render(area, &mut buf);

        let row: String = (1..19).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("••••••"));
        assert!(!row.contains("secret"));
    }
}
