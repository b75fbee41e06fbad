/// Entries shown in the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Shell,
    Logs,
    Stop,
    Restart,
    List,
    /// Launcher-only: not part of the main menu
    Start,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Shell,
        MenuAction::Logs,
        MenuAction::Stop,
        MenuAction::Restart,
        MenuAction::List,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Logs => "logs",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::List => "list",
            Self::Start => "start",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shell => "Shell",
            Self::Logs => "Logs",
            Self::Stop => "Stop",
            Self::Restart => "Restart",
            Self::List => "List",
            Self::Start => "Start",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .chain([Self::Start])
            .find(|a| a.id() == id)
    }

    /// One-shot runtime verb behind this action, if it has one
    pub fn verb(&self) -> Option<Verb> {
        match self {
            Self::Logs => Some(Verb::Logs),
            Self::Stop => Some(Verb::Stop),
            Self::Restart => Some(Verb::Restart),
            Self::Start => Some(Verb::Start),
            Self::Shell | Self::List => None,
        }
    }
}

/// Runtime subcommands that run to completion without a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Start,
    Stop,
    Restart,
    Logs,
}

impl Verb {
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Logs => "logs",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// A running container as reported by the runtime listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub id: String,
    pub name: String,
}

impl ContainerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Anything the list views can display: a menu entry or a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Menu(MenuAction),
    Container(ContainerRef),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Self::Menu(action) => action.id(),
            Self::Container(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Menu(action) => action.name(),
            Self::Container(c) => &c.name,
        }
    }
}

impl From<ContainerRef> for Item {
    fn from(container: ContainerRef) -> Self {
        Self::Container(container)
    }
}

impl From<MenuAction> for Item {
    fn from(action: MenuAction) -> Self {
        Self::Menu(action)
    }
}
