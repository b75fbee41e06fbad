use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::models::MenuAction;

/// Menu-driven front-end for the docker CLI
#[derive(Debug, Parser)]
#[command(name = "dockmenu", version, about)]
pub struct Cli {
    /// Screen to open on start
    #[arg(value_enum, default_value_t = Mode::Menu)]
    pub mode: Mode,

    /// Config file (default: <config dir>/dockmenu/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Runtime binary, overriding the config file
    #[arg(long)]
    pub runtime: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Open the action menu
    Menu,
    /// Pick a container to open a shell in
    Shell,
    /// Pick a container to show logs for
    Logs,
    /// Pick a container to stop
    Stop,
    /// Pick a container to restart
    Restart,
    /// Browse running containers
    List,
    /// Pick a container (running or stopped) to start
    Start,
}

impl Mode {
    /// Action whose container picker opens first, if any
    pub fn start_action(&self) -> Option<MenuAction> {
        match self {
            Self::Menu => None,
            Self::Shell => Some(MenuAction::Shell),
            Self::Logs => Some(MenuAction::Logs),
            Self::Stop => Some(MenuAction::Stop),
            Self::Restart => Some(MenuAction::Restart),
            Self::List => Some(MenuAction::List),
            Self::Start => Some(MenuAction::Start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_menu() {
        let cli = Cli::try_parse_from(["dockmenu"]).unwrap();
        assert_eq!(cli.mode, Mode::Menu);
        assert_eq!(cli.mode.start_action(), None);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_mode_and_overrides() {
        let cli = Cli::try_parse_from(["dockmenu", "restart", "--runtime", "podman"]).unwrap();
        assert_eq!(cli.mode.start_action(), Some(MenuAction::Restart));
        assert_eq!(cli.runtime.as_deref(), Some("podman"));
    }

    #[test]
    fn test_start_mode() {
        let cli = Cli::try_parse_from(["dockmenu", "start"]).unwrap();
        assert_eq!(cli.mode.start_action(), Some(MenuAction::Start));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["dockmenu", "rm"]).is_err());
    }
}
