use std::process::ExitStatus;

use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::components::{Header, HelpModal, ItemList, LogsView, StatusBar};
use crate::docker::{ActionResult, Runtime, SessionError, Termination};
use crate::menu::menu_items;
use crate::models::{ContainerRef, Item, MenuAction, Verb};
use crate::ui::{main_layout, MenuStyle};

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    Menu,
    /// Picking a container for the given action
    Containers(MenuAction),
    Logs,
}

/// Outcome line shown above the keybindings
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Running(String),
    Done(String),
    Failed { message: String, detail: String },
}

/// Results of background work, delivered back to the event loop
#[derive(Debug)]
pub enum AppEvent {
    ContainersLoaded(Vec<ContainerRef>),
    ActionFinished {
        verb: Verb,
        container: ContainerRef,
        result: ActionResult,
    },
}

/// Main application state
pub struct App {
    runtime: Runtime,
    shells: Vec<String>,
    pub style: MenuStyle,

    // View state
    pub view_mode: ViewMode,
    pub show_help: bool,
    pub should_quit: bool,
    pub loading: bool,
    pub status: Status,

    // Lists
    pub menu: Vec<Item>,
    pub containers: Vec<Item>,
    pub menu_list: ItemList,
    pub container_list: ItemList,

    // Logs data
    pub logs: Vec<String>,
    pub logs_container: String,
    pub logs_view: LogsView,

    pending_shell: Option<ContainerRef>,
    tick: usize,

    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(runtime: Runtime, shells: Vec<String>, style: MenuStyle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            shells,
            style,
            view_mode: ViewMode::Menu,
            show_help: false,
            should_quit: false,
            loading: false,
            status: Status::Idle,
            menu: menu_items(),
            containers: Vec::new(),
            menu_list: ItemList::new(),
            container_list: ItemList::new(),
            logs: Vec::new(),
            logs_container: String::new(),
            logs_view: LogsView::new(),
            pending_shell: None,
            tick: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn shells(&self) -> &[String] {
        &self.shells
    }

    /// Switch to the container picker for `action` and start loading the list
    pub fn open_containers(&mut self, action: MenuAction) {
        self.view_mode = ViewMode::Containers(action);
        self.container_list.top();
        self.refresh_containers();
    }

    /// Query containers in the background; the start picker lists stopped ones too
    pub fn refresh_containers(&mut self) {
        self.loading = true;
        let all = self.view_mode == ViewMode::Containers(MenuAction::Start);
        let runtime = self.runtime.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let containers = if all {
                runtime.all_containers().await
            } else {
                runtime.running_containers().await
            };
            let _ = tx.send(AppEvent::ContainersLoaded(containers));
        });
    }

    /// Run a one-shot action in the background; one at a time
    fn dispatch(&mut self, verb: Verb, container: ContainerRef) {
        if matches!(self.status, Status::Running(_)) {
            tracing::debug!(%verb, "action already running, ignoring");
            return;
        }

        tracing::info!(%verb, container = %container.name, "dispatching action");
        self.status = Status::Running(format!("{} {}", verb, container.name));

        let runtime = self.runtime.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = runtime.run_action(verb, &container.id).await;
            let _ = tx.send(AppEvent::ActionFinished {
                verb,
                container,
                result,
            });
        });
    }

    /// Container waiting for an interactive shell, if one was chosen
    pub fn take_pending_shell(&mut self) -> Option<ContainerRef> {
        self.pending_shell.take()
    }

    /// Record how a shell session ended
    pub fn shell_finished(
        &mut self,
        container: &ContainerRef,
        result: &Result<ExitStatus, SessionError>,
    ) {
        self.status = match result {
            Ok(_) => Status::Done(format!("shell {}: closed", container.name)),
            Err(e) => Status::Failed {
                message: "Shell session failed".to_string(),
                detail: e.to_string(),
            },
        };
        self.refresh_containers();
    }

    /// Apply every finished background result without blocking
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Wait for the next background result
    #[cfg(test)]
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ContainersLoaded(containers) => {
                self.containers = containers.into_iter().map(Item::Container).collect();
                self.container_list.clamp(self.containers.len());
                self.loading = false;
            }
            AppEvent::ActionFinished {
                verb,
                container,
                result,
            } => match result {
                Ok(output) => {
                    if verb == Verb::Logs {
                        self.status =
                            Status::Done(format!("logs {}: {} lines", container.name, output.lines.len()));
                        self.logs = output.lines;
                        self.logs_container = container.name;
                        self.logs_view = LogsView::new();
                        self.view_mode = ViewMode::Logs;
                    } else {
                        self.status = Status::Done(format!("{} {}: done", verb, container.name));
                        self.refresh_containers();
                    }
                }
                Err(e) => {
                    self.status = Status::Failed {
                        message: e.user_message().to_string(),
                        detail: e.detail(),
                    };
                }
            },
        }
    }

    /// Get the currently selected container
    pub fn selected_container(&self) -> Option<&ContainerRef> {
        match self.container_list.selected().and_then(|i| self.containers.get(i)) {
            Some(Item::Container(c)) => Some(c),
            _ => None,
        }
    }

    fn selected_menu_action(&self) -> Option<MenuAction> {
        match self.menu_list.selected().and_then(|i| self.menu.get(i)) {
            Some(Item::Menu(action)) => Some(*action),
            _ => None,
        }
    }

    fn select(&mut self) {
        match self.view_mode {
            ViewMode::Menu => {
                if let Some(action) = self.selected_menu_action() {
                    self.open_containers(action);
                }
            }
            ViewMode::Containers(action) => {
                let Some(container) = self.selected_container().cloned() else {
                    return;
                };
                match action {
                    MenuAction::Shell => self.pending_shell = Some(container),
                    MenuAction::List => {
                        self.status = Status::Done(format!("{} ({})", container.name, container.id));
                    }
                    other => {
                        if let Some(verb) = other.verb() {
                            self.dispatch(verb, container);
                        }
                    }
                }
            }
            ViewMode::Logs => {}
        }
    }

    /// SIGINT/SIGTERM outside a shell session ends the program
    pub fn handle_termination(&mut self, reason: Termination) {
        tracing::info!(?reason, "termination requested, quitting");
        self.handle_action(Action::Quit);
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Tick => self.tick = self.tick.wrapping_add(1),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::CloseModal => self.show_help = false,
            Action::Refresh => {
                if matches!(self.view_mode, ViewMode::Containers(_)) {
                    self.refresh_containers();
                }
            }
            Action::Select => self.select(),
            Action::Back => {
                self.view_mode = match self.view_mode {
                    ViewMode::Logs => ViewMode::Containers(MenuAction::Logs),
                    ViewMode::Containers(_) | ViewMode::Menu => ViewMode::Menu,
                };
            }
            Action::Up => match self.view_mode {
                ViewMode::Menu => self.menu_list.previous(self.menu.len()),
                ViewMode::Containers(_) => self.container_list.previous(self.containers.len()),
                ViewMode::Logs => self.logs_view.scroll_up(1),
            },
            Action::Down => match self.view_mode {
                ViewMode::Menu => self.menu_list.next(self.menu.len()),
                ViewMode::Containers(_) => self.container_list.next(self.containers.len()),
                ViewMode::Logs => self.logs_view.scroll_down(1, self.logs.len()),
            },
            Action::Top => match self.view_mode {
                ViewMode::Menu => self.menu_list.top(),
                ViewMode::Containers(_) => self.container_list.top(),
                ViewMode::Logs => self.logs_view.top(),
            },
            Action::Bottom => match self.view_mode {
                ViewMode::Menu => self.menu_list.bottom(self.menu.len()),
                ViewMode::Containers(_) => self.container_list.bottom(self.containers.len()),
                ViewMode::Logs => self.logs_view.bottom(self.logs.len()),
            },
            Action::None => {}
        }
    }

    fn containers_title(action: MenuAction) -> &'static str {
        match action {
            MenuAction::Shell => "Choose a Docker Container to Shell into",
            MenuAction::Logs => "Choose a Docker Container to see logs",
            MenuAction::Stop => "Choose a Docker Container to stop",
            MenuAction::Restart => "Choose a Docker Container to restart",
            MenuAction::List => "Running Containers",
            MenuAction::Start => "Choose a Docker Container to start",
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = main_layout(area);

        Header::render(frame, layout.header, self.runtime.program());

        match self.view_mode {
            ViewMode::Menu => self.menu_list.render(
                frame,
                layout.body,
                &self.menu,
                "Choose an Option",
                "",
                &self.style,
            ),
            ViewMode::Containers(action) => {
                let empty = if self.loading {
                    "Loading..."
                } else if action == MenuAction::Start {
                    "No containers"
                } else {
                    "No running containers"
                };
                self.container_list.render(
                    frame,
                    layout.body,
                    &self.containers,
                    Self::containers_title(action),
                    empty,
                    &self.style,
                );
            }
            ViewMode::Logs => self.logs_view.render(
                frame,
                layout.body,
                &self.logs,
                &self.logs_container,
                &self.style,
            ),
        }

        StatusBar::render_status(frame, layout.status, &self.status, self.tick);
        StatusBar::render_keys(frame, layout.keys, &self.view_mode);

        if self.show_help {
            HelpModal::render(frame, area, &self.style);
        }
    }
}
