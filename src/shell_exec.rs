//! External command execution with timing and debug logging
//!
//! Every child process lz starts goes through this module, so `-v` shows a
//! complete trace:
//!
//! ```text
//! $ git -C /src/api status --porcelain -z
//! [lz-trace] context=api cmd="git -C /src/api status --porcelain -z" dur=4.1ms ok=true
//! ```

use std::process::{Command, ExitStatus, Output};
use std::time::Instant;

/// Render a command as `program arg arg ...` for logs.
fn command_string(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

fn log_finish(
    cmd_str: &str,
    context: Option<&str>,
    duration_ms: f64,
    outcome: Result<bool, &std::io::Error>,
) {
    let context = context.map(|ctx| format!("context={} ", ctx)).unwrap_or_default();
    match outcome {
        Ok(ok) => log::debug!(
            "[lz-trace] {}cmd=\"{}\" dur={:.1}ms ok={}",
            context,
            cmd_str,
            duration_ms,
            ok
        ),
        Err(e) => log::debug!(
            "[lz-trace] {}cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            context,
            cmd_str,
            duration_ms,
            e
        ),
    }
}

/// Execute a command, capturing its output.
///
/// The `context` parameter is typically the repository name for git commands,
/// or `None` for commands not tied to one repository.
pub fn run(cmd: &mut Command, context: Option<&str>) -> std::io::Result<Output> {
    let cmd_str = command_string(cmd);
    log::debug!("$ {cmd_str}");

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    log_finish(
        &cmd_str,
        context,
        duration_ms,
        result.as_ref().map(|output| output.status.success()),
    );
    result
}

/// Execute a command attached to the terminal and wait for it to exit.
///
/// Used for the editor hand-off: stdin/stdout/stderr are inherited.
pub fn run_attached(cmd: &mut Command, context: Option<&str>) -> std::io::Result<ExitStatus> {
    let cmd_str = command_string(cmd);
    log::debug!("$ {cmd_str}");

    let t0 = Instant::now();
    let result = cmd.status();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    log_finish(
        &cmd_str,
        context,
        duration_ms,
        result.as_ref().map(|status| status.success()),
    );
    result
}
