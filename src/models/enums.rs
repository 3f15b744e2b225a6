use serde::{Deserialize, Serialize};

/// Problem difficulty. Ordered easy < medium < hard for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Verdict of a graded submission.
///
/// Statuses the client does not know yet are treated as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Accepted,
    WrongAnswer,
    #[serde(alias = "time_limit")]
    TimeLimitExceeded,
    RuntimeError,
    #[serde(other)]
    Pending,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 5] = [
        SubmissionStatus::Accepted,
        SubmissionStatus::WrongAnswer,
        SubmissionStatus::TimeLimitExceeded,
        SubmissionStatus::RuntimeError,
        SubmissionStatus::Pending,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Accepted => "Accepted",
            SubmissionStatus::WrongAnswer => "Wrong Answer",
            SubmissionStatus::TimeLimitExceeded => "Time Limit Exceeded",
            SubmissionStatus::RuntimeError => "Runtime Error",
            SubmissionStatus::Pending => "Pending",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionStatus::Accepted)
    }
}

/// Languages the judge accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    #[default]
    Python,
    Java,
    Cpp,
    C,
    Go,
    Rust,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::C,
        Language::Go,
        Language::Rust,
    ];

    /// Identifier sent to the backend.
    pub fn id(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Go => "go",
            Language::Rust => "rs",
        }
    }

    /// Starter code shown in an empty editor.
    pub fn template(&self) -> &'static str {
        match self {
            Language::JavaScript => {
                "// JavaScript\nfunction solution() {\n    // Your code here\n    return result;\n}"
            }
            Language::Python => "# Python\ndef solution():\n    # Your code here\n    return result",
            Language::Java => {
                "// Java\npublic class Solution {\n    public int solution() {\n        // Your code here\n        return result;\n    }\n}"
            }
            Language::Cpp => {
                "// C++\n#include <iostream>\nusing namespace std;\n\nint main() {\n    // Your code here\n    return 0;\n}"
            }
            Language::C => {
                "// C\n#include <stdio.h>\n\nint main() {\n    // Your code here\n    return 0;\n}"
            }
            Language::Go => {
                "// Go\npackage main\n\nimport \"fmt\"\n\nfunc main() {\n    // Your code here\n}"
            }
            Language::Rust => "// Rust\nfn main() {\n    // Your code here\n}",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.id().eq_ignore_ascii_case(id.trim()))
    }

    /// Guess from a file extension (with or without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "js" | "mjs" => Some(Language::JavaScript),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cpp" | "cc" | "cxx" | "hpp" => Some(Language::Cpp),
            "c" | "h" => Some(Language::C),
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// Next language in the picker, wrapping around.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_order_and_wire_name() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        assert_eq!(Difficulty::parse(" Medium "), Some(Difficulty::Medium));
    }

    #[test]
    fn test_status_aliases_and_unknown() {
        let tle: SubmissionStatus = serde_json::from_str("\"time_limit\"").unwrap();
        assert_eq!(tle, SubmissionStatus::TimeLimitExceeded);
        let other: SubmissionStatus = serde_json::from_str("\"compilation_error\"").unwrap();
        assert_eq!(other, SubmissionStatus::Pending);
        let wa: SubmissionStatus = serde_json::from_str("\"wrong_answer\"").unwrap();
        assert_eq!(wa.label(), "Wrong Answer");
    }

    #[test]
    fn test_language_wire_ids_match_serde() {
        for lang in Language::ALL {
            let wire = serde_json::to_string(&lang).unwrap();
            assert_eq!(wire, format!("\"{}\"", lang.id()));
            assert_eq!(Language::from_id(lang.id()), Some(lang));
            assert_eq!(Language::from_extension(lang.extension()), Some(lang));
        }
    }

    #[test]
    fn test_language_cycle_wraps() {
        assert_eq!(Language::Rust.next(), Language::JavaScript);
        assert_eq!(Language::Cpp.display_name(), "C++");
        assert!(Language::from_extension(".txt").is_none());
    }
}
