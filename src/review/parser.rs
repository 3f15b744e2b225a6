//! Feedback text to sections.
//!
//! Grammar (line based):
//! - a heading is 1-6 `#`, at least one space, then non-empty text
//! - a heading opens a section; the body is every line up to the next heading
//! - text before the first heading becomes a preamble section (level 0, empty
//!   title), kept only when it has non-blank content
//! - lines inside ``` fences are body text even when they start with `#`
//! - leading and trailing blank lines of a body are dropped

/// One heading and the text under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// 1-6 for headings, 0 for the preamble.
    pub level: u8,
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn is_preamble(&self) -> bool {
        self.level == 0
    }

    /// Case-insensitive match against the title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Split feedback into sections. Pure: equal input gives equal output.
pub fn parse_feedback(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut level = 0u8;
    let mut title = String::new();
    let mut body: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            body.push(line);
            continue;
        }

        let heading = if in_fence { None } else { parse_heading(line) };
        match heading {
            Some((next_level, next_title)) => {
                push_section(&mut sections, level, &title, &body);
                level = next_level;
                title = next_title.to_string();
                body.clear();
            }
            None => body.push(line),
        }
    }
    push_section(&mut sections, level, &title, &body);

    sections
}

/// `Some((level, title))` when `line` is a heading.
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let mut title = rest.trim();
    // A closing `#` run only counts when whitespace separates it from the title.
    let unclosed = title.trim_end_matches('#');
    if unclosed.len() < title.len() && (unclosed.is_empty() || unclosed.ends_with([' ', '\t'])) {
        title = unclosed.trim_end();
    }
    if title.is_empty() {
        return None;
    }
    Some((hashes as u8, title))
}

fn push_section(sections: &mut Vec<Section>, level: u8, title: &str, body: &[&str]) {
    let start = body.iter().position(|l| !l.trim().is_empty());
    let end = body.iter().rposition(|l| !l.trim().is_empty());
    let text = match (start, end) {
        (Some(start), Some(end)) => body[start..=end].join("\n"),
        _ => String::new(),
    };

    if level == 0 && text.is_empty() {
        return;
    }
    sections.push(Section {
        level,
        title: title.to_string(),
        body: text,
    });
}
