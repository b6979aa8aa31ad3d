//! Error values with cause chains and captured call stacks
//!
//! Every [`Error`] is an immutable node holding:
//! - a message (possibly empty)
//! - an optional cause, either another [`Error`] or any foreign
//!   [`std::error::Error`] acting as the leaf of the chain
//! - an optional [`Stack`] captured where the node was created
//!
//! Chains are built outward with the six constructors ([`new`], [`errorf!`],
//! [`wrap`], [`wrapf!`], [`with_stack`], [`with_message`]) and rendered in
//! one of three modes selected by a [`Verb`]:
//!
//! ```rust
//! use errchain::{Verb, wrap};
//!
//! let err = wrap(wrap(errchain::new("a"), "b"), "c");
//! assert_eq!(err.to_string(), "c: b: a");
//! assert_eq!(err.render(Verb::Compact).to_string(), "c: b: a");
//!
//! // `{:#}` renders every message on its own line, followed by any stack
//! // captured at that point of the chain.
//! let detailed = format!("{err:#}");
//! assert!(detailed.starts_with("c\nb\na"));
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod chain;
pub mod config;
pub mod error;
pub mod sentinel;
pub mod stack;

pub use chain::{chain, unwrap, Chain, MAX_CHAIN_DEPTH};
pub use config::{ConfigError, StackConfig};
pub use error::*;
pub use sentinel::{Eof, EOF};
pub use stack::{Frame, Stack};

/// Create a root error with `message` and a stack captured at the call site
///
/// An empty message links the node to [`EOF`] instead.
#[must_use]
pub fn new<M: Into<String>>(message: M) -> Error {
    Error::new(message)
}

/// Wrap `err` with `message`, without capturing a stack
#[must_use]
pub fn wrap<E, M>(err: E, message: M) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
    M: Into<String>,
{
    Error::wrap(err, message)
}

/// Wrap `err` in a message-less node carrying a stack captured at the call site
#[must_use]
pub fn with_stack<E>(err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::with_stack(err)
}

/// Wrap `err` with `message` only
#[must_use]
pub fn with_message<E, M>(err: E, message: M) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
    M: Into<String>,
{
    Error::with_message(err, message)
}

/// Render `err` under a format verb such as `%s`, `%v` or `%+v`
///
/// Unknown verbs render like `%v`.
#[must_use]
pub fn sprint(err: &Error, verb: &str) -> String {
    err.render(Verb::parse(verb)).to_string()
}
