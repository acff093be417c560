//! User-facing notifications (toasts) as a fire-and-forget port.

use crate::errors::SyncError;
use crate::models::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Sink for success/failure messages. Implementations must not block and
/// the caller never inspects a result.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Routes notices through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => log::info!("{}", notice.message),
            NoticeLevel::Error => log::error!("{}", notice.message),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: Notice) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn past(self) -> &'static str {
        match self {
            Operation::Fetch => "loaded",
            Operation::Create => "created",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Operation::Fetch => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

pub fn success_message(kind: ResourceKind, op: Operation) -> String {
    match op {
        Operation::Fetch => format!("Loaded {}", kind.plural()),
        _ => format!("{} {} successfully", kind.label(), op.past()),
    }
}

pub fn failure_message(kind: ResourceKind, op: Operation, err: &SyncError) -> String {
    // "CV" is an acronym and keeps its case mid-sentence.
    let target = match (op, kind) {
        (Operation::Fetch, _) => kind.plural().to_string(),
        (_, ResourceKind::Cv) => kind.label().to_string(),
        _ => kind.label().to_lowercase(),
    };
    format!("Failed to {} {}: {}", op.verb(), target, err.user_message())
}
