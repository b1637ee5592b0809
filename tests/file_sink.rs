use std::fs;
use svclog::sink::{FileSink, Sink};
use svclog::{Context, INFO, WARN, time};
use tempfile::TempDir;

#[test]
fn file_sink_appends_records() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("svc.log");

    let ctx = Context::builder()
        .service("ex")
        .time(time::fixed(1))
        .sink(FileSink::new(&path))
        .build();

    INFO.print_in(&ctx, "one");
    WARN.with("n", 2).print_in(&ctx, "two");

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"svc":"ex", "ts":1, "level":"info", "msg":"one"}"#,
            r#"{"svc":"ex", "ts":1, "level":"warn", "n":2, "msg":"two"}"#,
        ]
    );
    assert!(content.ends_with('\n'));
}

#[test]
fn file_sink_creates_parent_directories() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("a").join("b").join("out.log");

    let sink = FileSink::new(&path);
    sink.write_line("{}").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
}

#[test]
fn file_sink_reports_unwritable_path() {
    let tmp_dir = TempDir::new().unwrap();
    let blocker = tmp_dir.path().join("file");
    fs::write(&blocker, "").unwrap();

    let sink = FileSink::new(blocker.join("nested.log"));
    assert!(sink.write_line("{}").is_err());
}

#[test]
fn file_sink_expands_tilde() {
    let sink = FileSink::new("~/svclog-test.log");
    assert!(!sink.path().to_string_lossy().starts_with('~'));
}
