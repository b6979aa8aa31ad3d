//! Walking the causes of an error
//!
//! Works on any [`std::error::Error`]: nodes of this crate report their cause
//! through [`std::error::Error::source`], foreign errors are terminal unless
//! they report a source of their own.

use std::error::Error as StdError;

use crate::error::types::{Cause, Error, ErrorInner};

/// Upper bound on the number of links any walk visits
pub const MAX_CHAIN_DEPTH: usize = 1 << 20;

/// Unwrap `err` one level
#[must_use]
pub fn unwrap<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// Iterate over `err` and everything it wraps, outermost first
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain {
        next: Some(err),
        remaining: MAX_CHAIN_DEPTH,
    }
}

/// Iterator over an error and its causes
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
    remaining: usize,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.remaining == 0 {
            tracing::warn!(limit = MAX_CHAIN_DEPTH, "error chain truncated at walk limit");
            return None;
        }
        self.remaining -= 1;
        self.next = current.source();
        Some(current)
    }
}

/// One link as seen by the renderer
pub(crate) enum Link<'a> {
    Node(&'a ErrorInner),
    Leaf(&'a (dyn StdError + 'static)),
}

/// Links of a chain of nodes, ending at the first foreign leaf
pub(crate) struct Links<'a> {
    next: Option<Link<'a>>,
    remaining: usize,
}

impl<'a> Iterator for Links<'a> {
    type Item = Link<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.remaining == 0 {
            tracing::warn!(limit = MAX_CHAIN_DEPTH, "error chain truncated at walk limit");
            return None;
        }
        self.remaining -= 1;
        if let Link::Node(inner) = current {
            self.next = inner.cause.as_ref().map(|cause| match cause {
                Cause::Node(node) => Link::Node(&node.inner),
                other => Link::Leaf(other.as_dyn()),
            });
        }
        Some(current)
    }
}

impl Error {
    pub(crate) fn links(&self) -> Links<'_> {
        Links {
            next: Some(Link::Node(&self.inner)),
            remaining: MAX_CHAIN_DEPTH,
        }
    }

    /// Iterate over this error and everything it wraps, outermost first
    pub fn chain(&self) -> Chain<'_> {
        chain(self)
    }

    /// The value wrapped by this node, if any
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.cause.as_ref().map(Cause::as_dyn)
    }

    /// The innermost value of the chain, `self` when nothing is wrapped
    #[must_use]
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        self.chain().last().unwrap_or(self)
    }

    /// The first value in the chain of type `E`
    #[must_use]
    pub fn find<E: StdError + 'static>(&self) -> Option<&E> {
        self.chain().find_map(|err| err.downcast_ref::<E>())
    }

    /// Whether the innermost value of the chain has type `E`
    #[must_use]
    pub fn is_rooted_in<E: StdError + 'static>(&self) -> bool {
        self.root_cause().is::<E>()
    }

    /// Whether the chain ends at [`crate::EOF`]
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.is_rooted_in::<crate::Eof>()
    }

    /// Number of values in the chain, including `self`
    #[must_use]
    pub fn depth(&self) -> usize {
        self.chain().count()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    /// Foreign error reporting itself as its own source
    #[derive(Debug)]
    struct SelfLoop;

    impl fmt::Display for SelfLoop {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("loop")
        }
    }

    impl StdError for SelfLoop {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(self)
        }
    }

    #[test]
    fn unwrap_returns_the_next_link() {
        let err = crate::wrap(crate::new("root"), "outer");
        let next = unwrap(&err).expect("wrapped error has a cause");
        assert_eq!(next.to_string(), "root");
        let last = unwrap(next);
        assert!(last.is_none());
    }

    #[test]
    fn foreign_leaf_reports_no_further_cause() {
        let err = crate::wrap(std::io::Error::other("io"), "reading");
        let leaf = unwrap(&err).expect("leaf");
        assert!(unwrap(leaf).is_none());
        assert_eq!(err.depth(), 2);
    }

    #[test]
    fn chain_descends_into_foreign_sources() {
        let err = crate::wrap(Outer(std::io::Error::other("inner io")), "top");
        let rendered: Vec<String> = err.chain().map(ToString::to_string).collect();
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[2], "inner io");
        assert!(err.is_rooted_in::<std::io::Error>());
    }

    #[test]
    fn find_and_root_cause_locate_typed_values() {
        let err = crate::with_message(crate::new(""), "while reading");
        assert!(err.is_eof());
        assert!(err.find::<crate::Eof>().is_some());
        assert!(err.find::<std::io::Error>().is_none());
        assert_eq!(err.root_cause().to_string(), "EOF");
    }

    #[test]
    fn root_cause_of_a_lone_root_is_itself() {
        let err = crate::new("alone");
        assert_eq!(err.root_cause().to_string(), "alone");
        assert!(err.is_rooted_in::<Error>());
        assert_eq!(err.depth(), 1);
    }

    #[test]
    fn links_stop_at_foreign_leaf() {
        let err = crate::wrap(Outer(std::io::Error::other("inner io")), "top");
        let links: Vec<Link<'_>> = err.links().collect();
        assert_eq!(links.len(), 2);
        assert!(matches!(links[0], Link::Node(_)));
        assert!(matches!(links[1], Link::Leaf(_)));
    }

    #[test]
    fn cyclic_sources_stop_at_the_walk_limit() {
        let err = crate::wrap(SelfLoop, "top");
        assert_eq!(err.depth(), MAX_CHAIN_DEPTH);
        assert_eq!(err.root_cause().to_string(), "loop");
        assert!(err.is_rooted_in::<SelfLoop>());
        assert_eq!(err.to_string(), "top: loop");
    }
}
