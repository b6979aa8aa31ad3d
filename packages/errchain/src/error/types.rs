//! Core error types and definitions

use std::error::Error as StdError;
use std::sync::Arc;

use crate::stack::Stack;

/// A boxed, thread-safe error trait object
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error node with an optional cause and an optional captured stack
///
/// Cloning is cheap and shares the node; a node is never modified after
/// construction.
#[derive(Clone)]
pub struct Error {
    pub(crate) inner: Arc<ErrorInner>,
}

pub(crate) struct ErrorInner {
    /// Message of this node, empty for pure stack attachments
    pub message: String,
    /// Next link of the chain
    pub cause: Option<Cause>,
    /// Stack captured when this node was created
    pub stack: Option<Stack>,
}

/// Link from a node to the next value in its chain
#[derive(Clone)]
pub(crate) enum Cause {
    /// Another node of this library
    Node(Error),
    /// An error from elsewhere, treated as an opaque leaf
    Foreign(Arc<dyn StdError + Send + Sync + 'static>),
    /// A process-wide leaf such as [`crate::EOF`]
    Static(&'static (dyn StdError + Send + Sync + 'static)),
}

impl Cause {
    /// Link `err`, recognising nodes of this library
    pub(crate) fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: BoxError = Box::new(err);
        match boxed.downcast::<Error>() {
            Ok(node) => Self::Node(*node),
            Err(foreign) => Self::Foreign(Arc::from(foreign)),
        }
    }

    pub(crate) fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match self {
            Self::Node(node) => node,
            Self::Foreign(foreign) => &**foreign,
            Self::Static(leaf) => *leaf,
        }
    }
}

impl Error {
    pub(crate) fn from_parts(message: String, cause: Option<Cause>, stack: Option<Stack>) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                message,
                cause,
                stack,
            }),
        }
    }
}

impl Drop for ErrorInner {
    // Unlink uniquely owned nodes one at a time so long chains do not
    // recurse once per link.
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(Cause::Node(node)) = next {
            next = match Arc::try_unwrap(node.inner) {
                Ok(mut inner) => inner.cause.take(),
                Err(_) => None,
            };
        }
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
