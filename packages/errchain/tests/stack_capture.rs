//! Stack capture at constructor call sites
//!
//! Requires the default `full-backtrace` feature.

#![cfg(feature = "full-backtrace")]
#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use std::thread;

use errchain::{Error, Frame, OptionExt, ResultExt, Verb};

fn first_frame(err: &Error) -> Frame {
    err.stack()
        .and_then(|stack| stack.frames().first())
        .cloned()
        .expect("constructor should capture at least one frame")
}

fn assert_caller(frame: &Frame, function: &str, line: u32) {
    assert!(
        frame.function().ends_with(function),
        "expected first frame in {function}, got {}",
        frame.function()
    );
    assert!(
        frame.file().ends_with("stack_capture.rs"),
        "unexpected file {}",
        frame.file()
    );
    assert!(
        frame.line().abs_diff(line) <= 1,
        "expected line near {line}, got {}",
        frame.line()
    );
}

#[test]
fn root_stack_starts_at_caller() {
    common::init_logging();
    let (err, line) = (errchain::new("boom"), line!());
    assert_caller(&first_frame(&err), "stack_capture::root_stack_starts_at_caller", line);
}

#[test]
fn formatted_root_stack_starts_at_caller() {
    let (err, line) = (errchain::errorf!("code {}", 9), line!());
    assert_caller(&first_frame(&err), "stack_capture::formatted_root_stack_starts_at_caller", line);
}

#[test]
fn attached_stack_starts_at_caller() {
    let root = Error::new("root");
    let (err, line) = (errchain::with_stack(root), line!());
    assert_caller(&first_frame(&err), "stack_capture::attached_stack_starts_at_caller", line);
}

#[test]
fn extension_traits_capture_at_caller() {
    let failing: Result<(), std::io::Error> = Err(std::io::Error::other("io"));
    let (err, line) = (failing.with_stack().unwrap_err(), line!());
    assert_caller(&first_frame(&err), "stack_capture::extension_traits_capture_at_caller", line);

    let absent: Option<std::io::Error> = None;
    let (err, line) = (absent.with_stack(), line!());
    assert_caller(&first_frame(&err), "stack_capture::extension_traits_capture_at_caller", line);
}

#[test]
fn wrappers_do_not_capture() {
    let root = errchain::new("root");
    assert!(errchain::wrap(root.clone(), "w").stack().is_none());
    assert!(errchain::wrapf!(root.clone(), "w{}", 1).stack().is_none());
    assert!(errchain::with_message(root, "m").stack().is_none());
}

#[test]
fn attach_stack_on_root_renders_both_stacks_in_order() {
    let err = errchain::with_stack(errchain::new("x"));
    let outer = err.stack().expect("attach-stack node has a stack").to_string();
    let inner = err
        .cause()
        .and_then(|cause| cause.downcast_ref::<Error>())
        .and_then(Error::stack)
        .expect("root node has a stack")
        .to_string();

    assert_eq!(format!("{err:#}"), format!("{outer}\nx\n{inner}"));
    assert_eq!(err.to_string(), "x");
}

#[test]
fn chains_render_identically_across_threads() {
    let err = errchain::wrap(errchain::with_stack(errchain::new("shared")), "outer");
    let expected = err.render(Verb::Detailed).to_string();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let err = err.clone();
            thread::spawn(move || err.render(Verb::Detailed).to_string())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("render thread panicked"), expected);
    }
}

#[test]
fn independent_chains_capture_their_own_callers() {
    let handles: Vec<_> = (0..4)
        .map(|i| thread::spawn(move || errchain::errorf!("worker {}", i)))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let err = handle.join().expect("worker thread panicked");
        assert_eq!(err.to_string(), format!("worker {i}"));
        let frame = first_frame(&err);
        assert!(
            frame.function().contains("independent_chains_capture_their_own_callers"),
            "unexpected first frame {}",
            frame.function()
        );
    }
}
