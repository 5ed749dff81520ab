use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::process::Command;

fn describe<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    let args_str: Vec<_> = args.iter().map(|s| s.as_ref().to_string_lossy()).collect();
    format!("{} {}", program.to_string_lossy(), args_str.join(" "))
}

/// Run a program to completion, failing on a non-zero exit status
pub fn run<P, I, S>(program: P, args: I) -> Result<()>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_output(program, args).map(|_| ())
}

/// Run a program and capture its combined stdout and stderr
///
/// On failure the captured output is folded into the error so the caller
/// sees what the tool complained about.
pub fn run_output<P, I, S>(program: P, args: I) -> Result<String>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let args: Vec<_> = args.into_iter().collect();
    let command_line = describe(program, &args);

    tracing::debug!("> {}", command_line);

    let output = Command::new(program)
        .args(&args)
        .output()
        .with_context(|| format!("Failed to run {}", command_line))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let combined = combined.trim().to_string();

    if !output.status.success() {
        if combined.is_empty() {
            anyhow::bail!(
                "{} failed with exit code {:?}",
                command_line,
                output.status.code()
            );
        }
        anyhow::bail!(
            "{} failed with exit code {:?}: {}",
            command_line,
            output.status.code(),
            combined
        );
    }

    Ok(combined)
}
