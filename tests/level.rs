//! Tests for log level functionality.

use svclog::{DEBUG, ERROR, FATAL, INFO, Level, WARN};

#[test]
fn level_ordering() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Error);
    assert!(Level::Error < Level::Fatal);
}

#[test]
fn level_display() {
    assert_eq!(Level::Debug.to_string(), "debug");
    assert_eq!(Level::Info.to_string(), "info");
    assert_eq!(Level::Warn.to_string(), "warn");
    assert_eq!(Level::Error.to_string(), "error");
    assert_eq!(Level::Fatal.to_string(), "fatal");
}

#[test]
fn level_from_str() {
    assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
    assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("crit".parse::<Level>().unwrap(), Level::Fatal);
}

#[test]
fn level_from_str_invalid() {
    let err = "loud".parse::<Level>().unwrap_err();
    assert_eq!(err.to_string(), "unknown log level: 'loud'");
}

#[test]
fn level_from_tag_is_exact() {
    assert_eq!(Level::from_tag("warn"), Some(Level::Warn));
    assert_eq!(Level::from_tag("WARN"), None);
    assert_eq!(Level::from_tag("audit"), None);
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Info);
}

#[test]
fn prebuilt_lines_carry_their_tags() {
    assert_eq!(INFO.level(), "info");
    assert_eq!(WARN.level(), "warn");
    assert_eq!(ERROR.level(), "error");
    assert_eq!(FATAL.level(), "fatal");
    assert_eq!(DEBUG.level(), "debug");
}
