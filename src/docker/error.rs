use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Message shown to the user whenever a one-shot command fails
pub const ACTION_ERROR_MESSAGE: &str = "Error running Command";

/// Failure of a one-shot runtime invocation
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("container id must not be empty")]
    EmptyId,

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Exit {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl RuntimeError {
    /// Short message for the status bar
    pub fn user_message(&self) -> &'static str {
        ACTION_ERROR_MESSAGE
    }

    /// Most useful detail for the user: the runtime's own stderr when it said anything
    pub fn detail(&self) -> String {
        match self {
            Self::Exit { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            other => other.to_string(),
        }
    }
}

/// Failure of an interactive session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to install signal handlers: {0}")]
    Signals(#[source] io::Error),

    #[error("no shell configured")]
    NoShell,

    #[error("failed to start `{command}`: {source}")]
    Start {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Exit { command: String, status: ExitStatus },
}
