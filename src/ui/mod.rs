//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* carousel state and turns it into cells on
//! the terminal.  Widgets only read state; they never mutate it.

pub mod indicator;
pub mod info_panel;
pub mod layout;
pub mod popup;
pub mod stage;
pub mod theme;
