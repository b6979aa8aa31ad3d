//! The default root error

use std::fmt;

/// End of input, the leaf a root error falls back to when given no message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Eof;

impl fmt::Display for Eof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EOF")
    }
}

impl std::error::Error for Eof {}

/// The process-wide end of input sentinel
pub static EOF: Eof = Eof;
