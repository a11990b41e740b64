//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that perform I/O and return a `UiEvent`.
//! They never touch `AppState`; the runtime spawns them and feeds the result
//! back through the inbox.

use roster_core::api::UsersClient;
use tracing::{debug, warn};

use crate::common::{Clipboard, ClipboardError};
use crate::events::UiEvent;

/// Fetches the user list and converts the outcome into `UsersLoaded`.
pub async fn fetch_users(client: UsersClient) -> UiEvent {
    let result = client
        .fetch_users()
        .await
        .map_err(|err| err.to_string());
    UiEvent::UsersLoaded(result)
}

/// Writes `text` to the clipboard and reports the outcome.
pub fn copy_to_clipboard(text: String) -> UiEvent {
    copy_with(text, Clipboard::copy)
}

fn copy_with(text: String, copy: impl FnOnce(&str) -> Result<(), ClipboardError>) -> UiEvent {
    match copy(&text) {
        Ok(()) => {
            debug!(len = text.len(), "copied to clipboard");
            UiEvent::ClipboardCopied { text }
        }
        Err(err) => {
            warn!(error = %err, "clipboard write failed");
            UiEvent::ClipboardFailed {
                error: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_success_reports_text() {
        let event = copy_with("Bret".to_string(), |_| Ok(()));
        assert!(matches!(event, UiEvent::ClipboardCopied { text } if text == "Bret"));
    }

    #[test]
    fn test_copy_failure_reports_error() {
        let event = copy_with("Bret".to_string(), |_| {
            Err(ClipboardError::System("no display".to_string()))
        });
        assert!(matches!(
            event,
            UiEvent::ClipboardFailed { error } if error == "System clipboard failed: no display"
        ));
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_message() {
        // Nothing listens on the discard port locally.
        let client = UsersClient::new(
            "http://127.0.0.1:9/users",
            Some(std::time::Duration::from_secs(2)),
        )
        .expect("client");
        let event = fetch_users(client).await;
        assert!(matches!(event, UiEvent::UsersLoaded(Err(message)) if !message.is_empty()));
    }
}
