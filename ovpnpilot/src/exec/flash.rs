//! Fire-and-forget command execution.

use std::process::Stdio;

use log::{debug, info};
use tokio::process::Command;
use tokio::time;

use crate::command::CommandInvocation;
use crate::error::ExecError;

/// Run a command to completion and capture its combined output.
///
/// The invocation's timeout is a hard ceiling on the child's total
/// runtime; on expiry the child is killed and [`ExecError::Timeout`] is
/// returned. Stdout and stderr are concatenated into one string; ordering
/// between the two streams is best-effort, not guaranteed. A non-zero
/// exit surfaces as [`ExecError::NonZeroExit`] carrying the captured
/// output for diagnostics. No retries.
pub async fn run(invocation: &CommandInvocation) -> Result<String, ExecError> {
    info!("running command: {invocation}");

    let child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

    // kill_on_drop reaps the child when the timeout drops the wait future.
    let output = time::timeout(invocation.timeout, child.wait_with_output())
        .await
        .map_err(|_| ExecError::Timeout(invocation.timeout))?
        .map_err(ExecError::Wait)?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    debug!(
        "command {} exited with {:?} ({} bytes of output)",
        invocation.program,
        output.status.code(),
        combined.len()
    );

    if output.status.success() {
        Ok(combined)
    } else {
        Err(ExecError::NonZeroExit {
            status: output.status.code(),
            output: combined,
        })
    }
}
