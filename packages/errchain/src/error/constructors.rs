//! Error constructors and methods

use std::error::Error as StdError;
use std::fmt;

use super::types::{Cause, Error};
use crate::sentinel::EOF;
use crate::stack::Stack;

impl Error {
    /// Create a root error with a stack captured at the call site
    ///
    /// An empty `message` links the node to [`crate::EOF`] instead of leaving
    /// it blank.
    #[must_use]
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self::root(message.into())
    }

    /// Create a root error from pre-formatted arguments, see [`crate::errorf!`]
    #[must_use]
    pub fn from_fmt(args: fmt::Arguments<'_>) -> Self {
        Self::root(fmt::format(args))
    }

    /// Wrap `err` with `message`
    ///
    /// No stack is captured; use [`Error::with_stack`] to record one.
    #[must_use]
    pub fn wrap<E, M>(err: E, message: M) -> Self
    where
        E: StdError + Send + Sync + 'static,
        M: Into<String>,
    {
        Self::from_parts(message.into(), Some(Cause::from_error(err)), None)
    }

    /// Wrap `err` with pre-formatted arguments, see [`crate::wrapf!`]
    #[must_use]
    pub fn wrap_fmt<E>(err: E, args: fmt::Arguments<'_>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_parts(fmt::format(args), Some(Cause::from_error(err)), None)
    }

    /// Wrap `err` in a message-less node carrying a stack captured at the
    /// call site
    #[must_use]
    pub fn with_stack<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_parts(String::new(), Some(Cause::from_error(err)), Some(Stack::capture()))
    }

    /// Wrap `err` with `message` and nothing else
    ///
    /// Renders exactly like [`Error::wrap`]; kept separate so call sites can
    /// state that no stack is wanted.
    #[must_use]
    pub fn with_message<E, M>(err: E, message: M) -> Self
    where
        E: StdError + Send + Sync + 'static,
        M: Into<String>,
    {
        Self::from_parts(message.into(), Some(Cause::from_error(err)), None)
    }

    #[inline(never)]
    fn root(message: String) -> Self {
        let cause = message.is_empty().then_some(Cause::Static(&EOF));
        Self::from_parts(message, cause, Some(Stack::capture()))
    }

    /// Message of this node alone, empty for stack attachments
    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Stack captured when this node was created
    #[must_use]
    pub fn stack(&self) -> Option<&Stack> {
        self.inner.stack.as_ref()
    }
}
