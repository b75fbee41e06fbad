pub mod header;
pub mod help_modal;
pub mod item_list;
pub mod logs_view;
pub mod status_bar;

pub use header::Header;
pub use help_modal::HelpModal;
pub use item_list::ItemList;
pub use logs_view::LogsView;
pub use status_bar::StatusBar;
