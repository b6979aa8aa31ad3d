//! Display and rendering for Error
//!
//! A chain renders in one of three modes:
//! - [`Verb::Compact`] (`%s`) and [`Verb::Default`] (`%v`) join every
//!   non-empty message with `": "`, outermost first
//! - [`Verb::Detailed`] (`%+v`) puts each message on its own line followed
//!   by the frames of any stack captured at that link
//!
//! `{}` renders as `%v`, `{:#}` and `{:?}` as `%+v`.

use std::fmt;
use std::str::FromStr;

use super::types::Error;
use crate::chain::Link;

/// Rendering mode selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verb {
    /// One line of `": "`-joined messages
    Compact,
    /// Same output as [`Verb::Compact`]
    #[default]
    Default,
    /// Every message and every captured frame, one per line
    Detailed,
}

/// A format verb that is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized format verb {0:?}")]
pub struct ParseVerbError(String);

impl Verb {
    /// Parse a verb, falling back to [`Verb::Default`] for anything unknown
    #[must_use]
    pub fn parse(verb: &str) -> Self {
        verb.parse().unwrap_or_default()
    }

    /// The verb selected by a formatter's flags
    #[must_use]
    pub fn from_formatter(f: &fmt::Formatter<'_>) -> Self {
        if f.alternate() {
            Self::Detailed
        } else {
            Self::Default
        }
    }

    /// The canonical spelling of this verb
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "%s",
            Self::Default => "%v",
            Self::Detailed => "%+v",
        }
    }
}

impl FromStr for Verb {
    type Err = ParseVerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "%s" | "compact" => Ok(Self::Compact),
            "%v" | "default" => Ok(Self::Default),
            "%+v" | "detailed" => Ok(Self::Detailed),
            other => Err(ParseVerbError(other.to_owned())),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error paired with the verb to render it with
#[derive(Clone, Copy)]
pub struct Render<'a> {
    error: &'a Error,
    verb: Verb,
}

impl Render<'_> {
    /// The selected verb
    #[must_use]
    pub fn verb(&self) -> Verb {
        self.verb
    }
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.write_chain(f, self.verb)
    }
}

impl fmt::Debug for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Error {
    /// Pair this error with a rendering mode
    #[must_use]
    pub fn render(&self, verb: Verb) -> Render<'_> {
        Render { error: self, verb }
    }

    fn write_chain(&self, f: &mut fmt::Formatter<'_>, verb: Verb) -> fmt::Result {
        let detailed = verb == Verb::Detailed;
        let separator = if detailed { "\n" } else { ": " };
        let mut first = true;
        let mut emit = |f: &mut fmt::Formatter<'_>, fragment: &dyn fmt::Display| -> fmt::Result {
            if !first {
                f.write_str(separator)?;
            }
            first = false;
            write!(f, "{fragment}")
        };

        for link in self.links() {
            match link {
                Link::Node(node) => {
                    if !node.message.is_empty() {
                        emit(f, &node.message)?;
                    }
                    if detailed {
                        for frame in node.stack.iter().flatten() {
                            emit(f, frame)?;
                        }
                    }
                }
                Link::Leaf(leaf) => {
                    let text = leaf.to_string();
                    if !text.is_empty() {
                        emit(f, &text)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_chain(f, Verb::from_formatter(f))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_chain(f, Verb::Detailed)
    }
}
