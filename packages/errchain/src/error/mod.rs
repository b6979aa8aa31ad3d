//! Error nodes and their rendering
//!
//! Provides the chain building blocks:
//! - The immutable [`Error`] node and its cause link
//! - Constructors for roots, wrappers and stack attachments
//! - Verb-based rendering with [`Verb`] and [`Render`]
//! - Extension traits for `Result` and `Option`

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod macros;
pub mod types;

pub use display::{ParseVerbError, Render, Verb};
pub use extensions::{OptionExt, ResultExt};
pub use types::{BoxError, Error, Result};
