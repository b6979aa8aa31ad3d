//! Call stack capture
//!
//! Stacks are captured with the `backtrace` crate when the `full-backtrace`
//! feature is enabled (the default). Frames that belong to this crate or to
//! the unwinder are dropped from the top of the capture, so the first frame
//! of a [`Stack`] is always the code that called a constructor.

use std::fmt;

use crate::config::StackConfig;

/// Placeholder for a function name or file that could not be resolved
pub const UNKNOWN: &str = "<unknown>";

/// One captured call site
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    function: String,
    file: String,
    line: u32,
}

impl Frame {
    /// Create a frame from its parts
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    /// Demangled function name, without the symbol hash
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Source file path
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number, `0` when unknown
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\t{}:{}", self.function, self.file, self.line)
    }
}

/// Ordered call frames, innermost (the caller) first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    /// Capture the current call stack
    ///
    /// Returns an empty stack when capture is disabled or no frame could be
    /// attributed to the caller.
    #[inline(never)]
    #[must_use]
    pub fn capture() -> Self {
        let config = StackConfig::global();
        if !config.enabled {
            return Self::default();
        }

        let frames = capture_frames(config.max_frames);
        if frames.is_empty() {
            tracing::debug!("stack capture produced no frames");
        } else {
            tracing::trace!(frames = frames.len(), "captured call stack");
        }
        Self { frames }
    }

    /// The captured frames
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of captured frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate over the frames, caller first
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl From<Vec<Frame>> for Stack {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "full-backtrace")]
fn capture_frames(max_frames: Option<usize>) -> Vec<Frame> {
    let trace = backtrace::Backtrace::new();
    let mut frames = Vec::new();
    let mut skipping = true;
    let mut seen_internal = false;

    // One unwound frame may resolve to several symbols when calls were
    // inlined; each symbol is reported as its own frame.
    for symbol in trace.frames().iter().flat_map(|frame| frame.symbols()) {
        let function = symbol.name().map(|name| format!("{name:#}"));
        if skipping {
            if is_leading(function.as_deref(), seen_internal) {
                seen_internal |= function.is_some();
                continue;
            }
            skipping = false;
        }
        if max_frames.is_some_and(|max| frames.len() >= max) {
            break;
        }
        frames.push(Frame {
            function: function.unwrap_or_else(|| UNKNOWN.to_owned()),
            file: symbol
                .filename()
                .map_or_else(|| UNKNOWN.to_owned(), |path| path.display().to_string()),
            line: symbol.lineno().unwrap_or(0),
        });
    }
    frames
}

#[cfg(not(feature = "full-backtrace"))]
fn capture_frames(_max_frames: Option<usize>) -> Vec<Frame> {
    Vec::new()
}

/// Whether a symbol still precedes the caller in a fresh capture
///
/// Unnamed symbols are skipped only until the first internal one; past that
/// point an unnamed symbol is the caller and is kept as [`UNKNOWN`].
#[cfg_attr(not(feature = "full-backtrace"), allow(dead_code))]
fn is_leading(name: Option<&str>, seen_internal: bool) -> bool {
    match name {
        Some(name) => is_internal(name),
        None => !seen_internal,
    }
}

/// Whether a demangled symbol belongs to the unwinder or to this crate's
/// constructors rather than to the caller.
#[cfg_attr(not(feature = "full-backtrace"), allow(dead_code))]
fn is_internal(name: &str) -> bool {
    const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");
    const TRAIT_IMPL_MARKER: &str = concat!(" as ", env!("CARGO_CRATE_NAME"), "::");

    let path = name.trim_start_matches('<');
    if path.starts_with("backtrace::") {
        return true;
    }
    if name.contains(TRAIT_IMPL_MARKER) {
        return true;
    }
    path.starts_with(CRATE_PREFIX) && !path.contains("::tests::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_caller_ends_the_leading_frames() {
        assert!(is_leading(None, false));
        assert!(is_leading(Some("backtrace::capture::Backtrace::new"), false));
        assert!(is_leading(Some("errchain::stack::Stack::capture"), true));
        assert!(!is_leading(None, true));
        assert!(!is_leading(Some("app::main"), true));
    }

    #[test]
    fn internal_symbols_are_recognised() {
        assert!(is_internal("backtrace::backtrace::libunwind::trace"));
        assert!(is_internal("backtrace::capture::Backtrace::new"));
        assert!(is_internal("errchain::stack::Stack::capture"));
        assert!(is_internal(
            "errchain::error::constructors::<impl errchain::error::types::Error>::new"
        ));
        assert!(is_internal("<errchain::error::types::Error>::wrap::<&str>"));
        assert!(is_internal(
            "<core::result::Result<T,E> as errchain::error::extensions::ResultExt<T>>::with_stack"
        ));
        assert!(is_internal("errchain::new"));
    }

    #[test]
    fn caller_symbols_are_not_internal() {
        assert!(!is_internal("my_app::load_config"));
        assert!(!is_internal("errchain::stack::tests::capture_starts_at_caller"));
        assert!(!is_internal("std::rt::lang_start_internal"));
        assert!(!is_internal("<my_app::Loader as my_app::Load>::load"));
    }

    #[test]
    fn frame_display_puts_location_on_indented_line() {
        let frame = Frame::new("app::main", "src/main.rs", 12);
        assert_eq!(frame.to_string(), "app::main\n\tsrc/main.rs:12");
    }

    #[test]
    fn stack_display_joins_frames_without_trailing_newline() {
        let stack = Stack::from(vec![
            Frame::new("app::inner", "src/lib.rs", 3),
            Frame::new("app::main", "src/main.rs", 12),
        ]);
        assert_eq!(
            stack.to_string(),
            "app::inner\n\tsrc/lib.rs:3\napp::main\n\tsrc/main.rs:12"
        );
        assert_eq!(Stack::default().to_string(), "");
    }

    #[cfg(feature = "full-backtrace")]
    #[test]
    fn capture_starts_at_caller() {
        let stack = Stack::capture();
        let first = stack.frames().first().expect("stack should not be empty");
        assert!(
            first.function().contains("capture_starts_at_caller"),
            "first frame was {}",
            first.function()
        );
        assert!(first.file().ends_with("stack.rs"), "file was {}", first.file());
        assert!(first.line() > 0);
    }
}
