use super::*;
use mimo_ir::{Location, Span};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn sample() -> MimoError {
    MimoError::runtime(
        "REF002",
        "Undefined variable: totl",
        Location::new(Arc::from("app.mimo"), 1, 6, Span::new(5, 9)),
    )
    .with_suggestion("Did you mean 'total'?")
    .with_source("show totl")
}

#[test]
fn plain_output_matches_format() {
    let err = sample();
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, true);
    emitter.emit(&err).unwrap_or_default();
    let written = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    assert_eq!(written, err.format());
}

#[test]
fn colored_output_wraps_header() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&sample()).unwrap_or_default();
    let written = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    assert!(written.starts_with("\x1b[1;31m[RuntimeError REF002]"));
    assert!(written.contains("\x1b[1;32mSuggestion:\x1b[0m Did you mean 'total'?"));
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::parse("rainbow"), None);
}
