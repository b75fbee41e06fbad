pub mod command;
pub mod error;
pub mod listing;
pub mod session;

pub use command::{ActionOutput, ActionResult, Runtime};
pub use error::{RuntimeError, SessionError, ACTION_ERROR_MESSAGE};
pub use listing::{parse_listing, Listing};
pub use session::{drive_session, run_shell, SignalListener, Termination};
