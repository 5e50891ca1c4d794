// Runs the built `mla-text-report` binary end to end
use std::process::Command;

fn run() -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mla-text-report"))
        .output()
        .expect("failed to launch mla-text-report")
}

#[test]
fn test_binary_prints_report_and_exits_zero() {
    let output = run();
    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "unexpected diagnostics: {:?}", output.stderr);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let tiers: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with('|') && line.contains("tokens"))
        .collect();
    assert_eq!(tiers.len(), 4);
    assert!(tiers.iter().all(|row| row.contains("87.5%")));
    assert!(stdout.contains("报告生成完成"));
}

#[test]
fn test_binary_output_is_byte_identical_across_runs() {
    assert_eq!(run().stdout, run().stdout);
}
