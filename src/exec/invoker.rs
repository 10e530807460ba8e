//! Handler script invocation.

use std::path::Path;

use tokio::process::Command;

/// Shell used to run every handler script.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Result of one script invocation. Not persisted.
#[derive(Debug)]
pub struct ProcessOutcome {
    /// Captured standard output, returned verbatim on success.
    pub stdout: Vec<u8>,

    /// Stdout followed by stderr, for failure diagnostics.
    pub combined: Vec<u8>,

    /// False on non-zero exit and on spawn failure alike.
    pub succeeded: bool,
}

/// Run `/bin/sh <script> <payload>` and wait for it to finish.
///
/// Suspends the calling request task until the process exits; there is no
/// timeout and no cancellation. Spawn errors and script-level failures are
/// not distinguished beyond the captured bytes.
pub async fn invoke(script: &Path, payload: &str) -> ProcessOutcome {
    match Command::new(DEFAULT_SHELL)
        .arg(script)
        .arg(payload)
        .output()
        .await
    {
        Ok(output) => {
            let mut combined = output.stdout.clone();
            combined.extend_from_slice(&output.stderr);
            ProcessOutcome {
                stdout: output.stdout,
                combined,
                succeeded: output.status.success(),
            }
        }
        Err(err) => ProcessOutcome {
            stdout: Vec::new(),
            combined: err.to_string().into_bytes(),
            succeeded: false,
        },
    }
}
