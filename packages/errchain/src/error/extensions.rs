//! Extension traits applying the wrap family to `Result` and `Option`

use std::error::Error as StdError;

use super::types::{Cause, Error};
use crate::stack::Stack;

/// Wrap the error variant of a `Result`
///
/// ```rust
/// use errchain::ResultExt;
///
/// fn read() -> Result<String, std::io::Error> {
///     Err(std::io::Error::other("permission denied"))
/// }
///
/// let err = read().wrap("loading settings").unwrap_err();
/// assert_eq!(err.to_string(), "loading settings: permission denied");
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with `message`, see [`Error::wrap`]
    ///
    /// # Errors
    /// Returns the wrapped error when `self` is `Err`.
    fn wrap<M: Into<String>>(self, message: M) -> Result<T, Error>;

    /// Wrap the error with a message built only on failure
    ///
    /// # Errors
    /// Returns the wrapped error when `self` is `Err`.
    fn wrap_with<M, F>(self, message: F) -> Result<T, Error>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Attach a stack captured at the call site, see [`Error::with_stack`]
    ///
    /// # Errors
    /// Returns the wrapped error when `self` is `Err`.
    fn with_stack(self) -> Result<T, Error>;

    /// Attach `message` only, see [`Error::with_message`]
    ///
    /// # Errors
    /// Returns the wrapped error when `self` is `Err`.
    fn with_message<M: Into<String>>(self, message: M) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn wrap<M: Into<String>>(self, message: M) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap(err, message)),
        }
    }

    fn wrap_with<M, F>(self, message: F) -> Result<T, Error>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap(err, message())),
        }
    }

    fn with_stack(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::with_stack(err)),
        }
    }

    fn with_message<M: Into<String>>(self, message: M) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::with_message(err, message)),
        }
    }
}

/// Apply the wrap family to an error that may be absent
///
/// `None` produces a node without a cause rather than failing.
pub trait OptionExt {
    /// Wrap with `message`, see [`Error::wrap`]
    fn wrap<M: Into<String>>(self, message: M) -> Error;

    /// Wrap with a lazily built message
    fn wrap_with<M, F>(self, message: F) -> Error
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Attach a stack captured at the call site, see [`Error::with_stack`]
    fn with_stack(self) -> Error;

    /// Attach `message` only, see [`Error::with_message`]
    fn with_message<M: Into<String>>(self, message: M) -> Error;
}

impl<E> OptionExt for Option<E>
where
    E: StdError + Send + Sync + 'static,
{
    fn wrap<M: Into<String>>(self, message: M) -> Error {
        Error::from_parts(message.into(), self.map(Cause::from_error), None)
    }

    fn wrap_with<M, F>(self, message: F) -> Error
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        Error::from_parts(message().into(), self.map(Cause::from_error), None)
    }

    fn with_stack(self) -> Error {
        Error::from_parts(String::new(), self.map(Cause::from_error), Some(Stack::capture()))
    }

    fn with_message<M: Into<String>>(self, message: M) -> Error {
        Error::from_parts(message.into(), self.map(Cause::from_error), None)
    }
}
