//! Macros for formatted error creation

/// Create a root error from a format string, capturing a stack at the call site
///
/// ```rust
/// let err = errchain::errorf!("bad header {:#x}", 0x7f);
/// assert_eq!(err.to_string(), "bad header 0x7f");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Error::from_fmt(::std::format_args!($($arg)*))
    };
}

/// Wrap an error with a formatted message
///
/// ```rust
/// let err = errchain::wrapf!(errchain::new("timeout"), "attempt {}", 3);
/// assert_eq!(err.to_string(), "attempt 3: timeout");
/// ```
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($arg:tt)*) => {
        $crate::Error::wrap_fmt($err, ::std::format_args!($($arg)*))
    };
}

/// Return early with a root error built by [`errorf!`]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return ::std::result::Result::Err($crate::errorf!($($arg)*))
    };
}

/// Return early with a root error unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::bail!("condition failed: {}", ::std::stringify!($cond));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
