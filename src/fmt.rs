use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{bail, Context};

/// Pipes Go source through `gofmt` and returns the formatted text.
pub fn gofmt(input: &str) -> anyhow::Result<String> {
    let mut command = Command::new("gofmt")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to run gofmt")?;

    // Dropping stdin closes the pipe so gofmt sees end of input
    if let Some(mut stdin) = command.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    let output = command.wait_with_output()?;
    if !output.status.success() {
        bail!("gofmt failed: {}", String::from_utf8_lossy(&output.stderr).trim());
    }
    let stdout = String::from_utf8(output.stdout)?;
    Ok(stdout)
}
