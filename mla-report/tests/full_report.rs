// Byte-for-byte check of the terminal report against a captured reference run
use mla_report::text::{generate_full_report, render_full_report};

const EXPECTED: &str = include_str!("fixtures/full_report.txt");

#[test]
fn test_full_report_matches_reference() {
    let report = render_full_report().unwrap();
    assert_eq!(report, EXPECTED);
}

#[test]
fn test_report_writes_to_any_sink() {
    let mut sink = std::io::Cursor::new(Vec::new());
    generate_full_report(&mut sink).unwrap();
    assert_eq!(sink.into_inner(), EXPECTED.as_bytes());
}
