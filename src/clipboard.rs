//! System clipboard access for copying code.

/// Errors that can occur when writing to the clipboard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to copy: {0}")]
    WriteFailed(String),
    #[error("Nothing to copy")]
    Empty,
}

/// Copy `text` to the OS clipboard (X11/Wayland, NSPasteboard, Windows).
///
/// Blocks briefly while the platform clipboard is opened; the app calls it
/// through `spawn_blocking`.
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    if text.trim().is_empty() {
        return Err(ClipboardError::Empty);
    }
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_rejected_before_clipboard_access() {
        assert_eq!(copy_text("  \n"), Err(ClipboardError::Empty));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ClipboardError::Unavailable("no display".into()).to_string(),
            "Clipboard unavailable: no display"
        );
    }
}
