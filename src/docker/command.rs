use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use super::error::RuntimeError;
use crate::models::Verb;

/// Captured output of a successful one-shot command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutput {
    pub lines: Vec<String>,
}

pub type ActionResult = Result<ActionOutput, RuntimeError>;

/// Handle on the external container runtime CLI
#[derive(Debug, Clone)]
pub struct Runtime {
    program: String,
}

impl Runtime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run `<runtime> <verb> <container_id>` to completion
    pub async fn run_action(&self, verb: Verb, container_id: &str) -> ActionResult {
        if container_id.trim().is_empty() {
            tracing::error!(%verb, "refusing to run action without a container id");
            return Err(RuntimeError::EmptyId);
        }

        let args = [verb.subcommand(), container_id];
        // `logs` replays the container's stderr stream on our stderr.
        let result = if verb == Verb::Logs {
            self.merged_lines(&args).await
        } else {
            self.output(&args)
                .await
                .map(|stdout| stdout.lines().map(str::to_string).collect())
        };

        match result {
            Ok(lines) => {
                tracing::info!(%verb, container = container_id, "action finished");
                Ok(ActionOutput { lines })
            }
            Err(e) => {
                tracing::error!(%verb, container = container_id, error = %e, "action failed");
                Err(e)
            }
        }
    }

    /// Run the runtime with `args`, returning stdout when it exits successfully
    pub(crate) async fn output(&self, args: &[&str]) -> Result<String, RuntimeError> {
        tracing::debug!(program = %self.program, ?args, "spawning runtime");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| RuntimeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RuntimeError::Exit {
                command: format!("{} {}", self.program, args.join(" ")),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run the runtime with `args`, interleaving stdout and stderr lines as they arrive
    pub(crate) async fn merged_lines(&self, args: &[&str]) -> Result<Vec<String>, RuntimeError> {
        tracing::debug!(program = %self.program, ?args, "spawning runtime (merged output)");

        let spawn_error = |source| RuntimeError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, Stream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, Stream::Stderr, tx.clone()));
        }
        drop(tx);

        let mut lines = Vec::new();
        let mut stderr_text = Vec::new();
        while let Some((stream, line)) = rx.recv().await {
            if stream == Stream::Stderr {
                stderr_text.push(line.clone());
            }
            lines.push(line);
        }

        let status = child.wait().await.map_err(spawn_error)?;
        if !status.success() {
            return Err(RuntimeError::Exit {
                command: format!("{} {}", self.program, args.join(" ")),
                status,
                stderr: stderr_text.join("\n").trim().to_string(),
            });
        }

        Ok(lines)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Send each line of `reader` tagged with its stream until EOF
async fn forward_lines<R>(reader: R, stream: Stream, tx: mpsc::UnboundedSender<(Stream, String)>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send((stream, line)).is_err() {
            break;
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new("docker")
    }
}
