//! Fire-and-forget shell commands, used for the subscribe/manage action.

use std::{
    process::{ExitStatus, Output},
    sync::Arc,
};

use log::{debug, error, warn};
use masterror::Error;
use tokio::{process::Command, runtime::Handle, task::JoinHandle};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LauncherError {
    /// `sh` could not be started.
    #[error("cannot start `{command}`: {reason}")]
    Spawn { command: Arc<str>, reason: Arc<str> },
    /// The command ran and reported failure.
    #[error("`{command}` failed with {status}")]
    NonZeroExit { command: Arc<str>, status: ExitStatus },
}

/// Run `command` through `sh -c` and wait for it.
///
/// # Errors
///
/// [`LauncherError::Spawn`] when the shell cannot be started,
/// [`LauncherError::NonZeroExit`] when the command exits unsuccessfully.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use deskclock_core::utils::launcher::run_shell_command_with_output;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = tokio::runtime::Runtime::new()?;
/// let output = runtime.block_on(run_shell_command_with_output(&Arc::from("printf ok")))?;
/// assert_eq!(output.stdout, b"ok");
/// # Ok(())
/// # }
/// ```
pub async fn run_shell_command_with_output(command: &Arc<str>) -> Result<Output, LauncherError> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command.as_ref())
        .output()
        .await
        .map_err(|err| LauncherError::Spawn {
            command: Arc::clone(command),
            reason:  Arc::from(err.to_string()),
        })?;

    if !output.status.success() {
        return Err(LauncherError::NonZeroExit {
            command: Arc::clone(command),
            status:  output.status,
        });
    }

    Ok(output)
}

/// Start `command` on `runtime` and return immediately.
///
/// The outcome is only logged, tagged with `context`. The returned handle may be ignored.
pub fn execute_command(
    runtime: &Handle,
    command: Arc<str>,
    context: &'static str,
) -> JoinHandle<()> {
    debug!("{context}: launching `{command}`");

    runtime.spawn(async move {
        match run_shell_command_with_output(&command).await {
            Ok(output) if !output.stderr.is_empty() => warn!(
                "{context}: `{command}` wrote to stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            ),
            Ok(_) => debug!("{context}: `{command}` finished"),
            Err(err) => error!("{context}: {err}"),
        }
    })
}
