use std::process::Command;

use anyhow::Context as _;

fn status_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

fn poolbench() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_poolbench"));
    cmd.env_remove("POOLBENCH_RESULTS_DIR")
        .env_remove("POOLBENCH_TIMESTAMP")
        .env_remove("POOLBENCH_SIMPLE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_arguments_exit_30_with_usage() -> anyhow::Result<()> {
    let out = poolbench().output().context("run poolbench binary")?;
    let stderr = String::from_utf8_lossy(&out.stderr);

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstderr:\n{stderr}",
        status_code(out.status)
    );
    anyhow::ensure!(stderr.contains("Usage"), "expected usage in stderr:\n{stderr}");
    anyhow::ensure!(out.stdout.is_empty(), "expected empty stdout");

    Ok(())
}

#[test]
fn missing_timestamp_exit_30() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = poolbench()
        .arg(dir.path())
        .output()
        .context("run poolbench binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[test]
fn nonexistent_results_dir_exit_30() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("nope");
    let out = poolbench()
        .arg(&missing)
        .arg("20261019_093000")
        .output()
        .context("run poolbench binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[test]
fn path_like_timestamp_exit_30() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = poolbench()
        .arg(dir.path())
        .arg("../escape")
        .output()
        .context("run poolbench binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[test]
fn empty_results_dir_still_succeeds() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = poolbench()
        .arg(dir.path())
        .arg("20261019_093000")
        .output()
        .context("run poolbench binary")?;

    anyhow::ensure!(
        status_code(out.status) == 0,
        "expected exit code 0, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );

    let stdout = String::from_utf8_lossy(&out.stdout);
    anyhow::ensure!(
        stdout.matches("NO DATA").count() >= 6,
        "expected NO DATA markers:\n{stdout}"
    );

    Ok(())
}

#[test]
fn dotted_timestamp_is_accepted() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = poolbench()
        .arg(dir.path())
        .arg("run..1")
        .arg("--no-echo")
        .output()
        .context("run poolbench binary")?;

    anyhow::ensure!(
        status_code(out.status) == 0,
        "expected exit code 0, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );
    anyhow::ensure!(dir.path().join("detailed_analysis_run..1.txt").is_file());

    Ok(())
}
