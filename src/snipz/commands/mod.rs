//! # Command Layer
//!
//! One module per operation. Commands take a [`SnippetStore`](crate::store::SnippetStore)
//! (or plain data), work on a freshly loaded snapshot, and return regular Rust types
//! through [`crate::error::Result`]. They never print and never swallow errors: turning
//! failures into user-facing messages is the job of [`crate::api`].

pub mod bulk;
pub mod categories;
pub mod create;
pub mod export;
pub mod import;
pub mod load;
pub mod save;
pub mod search;
pub mod tagging;
pub mod tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The `(result, diagnostic message)` pair every API operation returns.
///
/// Failures still carry a value (an empty list, a zero count) so callers can always
/// use `value` without unwrapping; [`CmdResult::is_success`] tells them apart.
#[derive(Debug, Clone, PartialEq)]
pub struct CmdResult<T> {
    pub value: T,
    pub message: CmdMessage,
}

impl<T> CmdResult<T> {
    pub fn new(value: T, message: CmdMessage) -> Self {
        Self { value, message }
    }

    pub fn success(value: T, content: impl Into<String>) -> Self {
        Self::new(value, CmdMessage::success(content))
    }

    pub fn info(value: T, content: impl Into<String>) -> Self {
        Self::new(value, CmdMessage::info(content))
    }

    pub fn failure(value: T, content: impl Into<String>) -> Self {
        Self::new(value, CmdMessage::error(content))
    }

    pub fn is_success(&self) -> bool {
        self.message.level != MessageLevel::Error
    }

    pub fn into_parts(self) -> (T, CmdMessage) {
        (self.value, self.message)
    }
}

/// Pluralizes "snippet" for messages.
pub(crate) fn snippets_word(count: usize) -> &'static str {
    if count == 1 {
        "snippet"
    } else {
        "snippets"
    }
}
