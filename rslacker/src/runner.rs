//! Runs the configured program and classifies how it ended.

use std::path::Path;
use std::process::ExitStatus;

use process_utils::{CombinedOutput, combined_output, tokio_command};
use tracing::{debug, warn};

/// Separates a diagnostic from the program's own output.
const OUTPUT_SEPARATOR: &str = "\n-------\n";

/// Result of running the configured program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exited with status 0.
    Success { output: String },
    /// Exited with a nonzero status, was killed, or never started.
    ///
    /// `exit_code` is `None` when no exit code is available.
    Failure {
        exit_code: Option<i32>,
        output: String,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn output(&self) -> &str {
        match self {
            Self::Success { output } | Self::Failure { output, .. } => output,
        }
    }
}

/// Run `prog` with `args` in `dir` and wait for it to finish.
///
/// Never fails: a program that cannot be started is reported as a
/// [`RunOutcome::Failure`] without an exit code.
pub async fn run(prog: &str, args: &[String], dir: Option<&Path>) -> RunOutcome {
    let mut cmd = tokio_command(prog);
    cmd.args(args);
    if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
        cmd.current_dir(dir);
    }

    debug!(prog, ?args, ?dir, "Spawning program");

    match combined_output(&mut cmd).await {
        Ok(result) => classify(result),
        Err(e) => {
            warn!(prog, error = %e, "Failed to run program");
            RunOutcome::Failure {
                exit_code: None,
                output: format!("failed to run `{prog}`: {e}"),
            }
        }
    }
}

fn classify(result: CombinedOutput) -> RunOutcome {
    let status = result.status;
    let mut output = result.output_lossy().into_owned();
    if let Some(e) = &result.read_error {
        warn!(error = %e, "Output of program is incomplete");
        output = join_diagnostic(&format!("failed to read output: {e}"), &output);
    }

    match status.code() {
        Some(0) => RunOutcome::Success { output },
        Some(code) => {
            debug!("Program exited with code: {}", code);
            RunOutcome::Failure {
                exit_code: Some(code),
                output,
            }
        }
        None => {
            let diagnostic = describe_abnormal_exit(status);
            warn!("Program {}", diagnostic);
            RunOutcome::Failure {
                exit_code: None,
                output: join_diagnostic(&diagnostic, &output),
            }
        }
    }
}

#[cfg(unix)]
fn describe_abnormal_exit(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(signal) => format!("terminated by signal {signal}"),
        None => format!("terminated abnormally ({status})"),
    }
}

#[cfg(not(unix))]
fn describe_abnormal_exit(status: ExitStatus) -> String {
    format!("terminated abnormally ({status})")
}

fn join_diagnostic(diagnostic: &str, output: &str) -> String {
    if output.trim().is_empty() {
        diagnostic.to_string()
    } else {
        format!("{diagnostic}{OUTPUT_SEPARATOR}{output}")
    }
}
