//! Line-oriented front-end: command parsing, prompts and rendering around a
//! [`crate::store::RecordStore`].

mod app;
mod command;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use command::Command;
pub use terminal::{run_app, run_session, Console, StatusKind};
