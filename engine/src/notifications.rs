//! User-facing notices shown in the status line.
//!
//! Validation failures and export outcomes never become errors at the
//! controller boundary; they land here and the TUI renders the most recent
//! one until the next key press.

use std::path::PathBuf;

/// A status-line message produced by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// `submit_name` with a blank name.
    NameRequired,
    /// `reveal_card` with a commitment below the minimum length.
    CommitmentTooShort {
        /// Required trimmed length, in characters.
        min: usize,
    },
    ExportSaved {
        path: PathBuf,
    },
    ExportFailed {
        /// Pre-formatted error text.
        reason: String,
    },
    /// An export was requested while another was still running.
    ExportBusy,
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NameRequired => "Please enter your name to continue.".to_string(),
            Self::CommitmentTooShort { min } => {
                format!("Write at least {min} characters to seal your declaration.")
            }
            Self::ExportSaved { path } => format!("Saved card to {}", path.display()),
            Self::ExportFailed { reason } => format!("Card export failed: {reason}"),
            Self::ExportBusy => "Export already in progress.".to_string(),
        }
    }

    /// Whether the notice reports a problem (drawn in the error style).
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::ExportSaved { .. })
    }
}

/// Unseen notices, oldest first, each at most once.
///
/// Re-raising a notice that is already pending moves it to the back instead
/// of stacking a copy, so pressing Enter on a blank name twice shows one
/// message and it is the one on screen.
#[derive(Debug, Default)]
pub struct NoticeQueue(Vec<Notice>);

impl NoticeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.0.retain(|pending| *pending != notice);
        self.0.push(notice);
    }

    /// The notice the status line shows.
    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.0.last()
    }

    /// Drain every pending notice, oldest first.
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.0)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
