//! Crash handling for the judgeflow terminal client.
//!
//! A panic in the event loop would otherwise leave the shell in raw mode on
//! the alternate screen, hiding the message. The hook restores the terminal,
//! records the panic in the log file, then hands over to the previous hook.

use super::setup::emergency_restore;
use std::any::Any;
use std::panic;

/// Install in `main` before the TUI takes over the terminal.
pub fn setup_panic_hook() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        emergency_restore();
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        tracing::error!("judgeflow panicked at {}: {}", location, payload_text(info.payload()));
        previous(info);
    }));
}

/// Message carried by a panic payload, for `&str` and `String` payloads.
fn payload_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_text_reads_both_string_kinds() {
        let borrowed: Box<dyn Any + Send> = Box::new("editor overflow");
        assert_eq!(payload_text(borrowed.as_ref()), "editor overflow");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bad row 7"));
        assert_eq!(payload_text(owned.as_ref()), "bad row 7");
        let other: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(payload_text(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_installing_hook_keeps_process_alive() {
        setup_panic_hook();
        let _ = panic::take_hook();
    }
}
