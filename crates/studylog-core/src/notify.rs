//! User-facing notices.
//!
//! The core never renders anything itself: every piece of user feedback is
//! handed to an injected [`Notifier`] as a fire-and-forget call. The GUI
//! maps notices to toasts; headless consumers get [`StderrNotifier`].

use std::sync::{Arc, Mutex};

/// Severity-or-style of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// One user-facing message. The sender never reads a reply.
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// Notification sink. Implementations must not block.
pub trait Notifier: Send + Sync {
    /// Unique identifier (e.g. "stderr", "silent").
    fn name(&self) -> &str;

    fn notify(&self, notice: Notice);
}

/// Writes notices to stderr. Default sink for CLI and headless use.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn name(&self) -> &str {
        "stderr"
    }

    fn notify(&self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}: {}", notice.title, notice.body);
    }
}

/// Discards every notice. Used when notifications are disabled in the
/// configuration; diagnostics on stderr are unaffected.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn name(&self) -> &str {
        "silent"
    }

    fn notify(&self, _notice: Notice) {}
}

/// Collects notices in memory. Used by tests and embedders that render
/// notices on their own cadence.
#[derive(Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut self.notices.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn name(&self) -> &str {
        "memory"
    }

    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}
