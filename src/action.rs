/// Actions that can be performed in the application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,

    // Selection
    Select,
    Back,

    // Modals
    ToggleHelp,
    CloseModal,

    // App control
    Refresh,
    Quit,
    Tick, // Timer tick for the spinner

    // No action
    None,
}
