//! Shared helpers for integration tests

/// Route `tracing` events from the library to the test output
///
/// Events reach `env_logger` through the `log` compatibility feature of
/// `tracing`; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_module("errchain", log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}
