//! Application orchestration — state management, input handling and gesture
//! tracking.

pub mod event;
pub mod gesture;
pub mod handler;
pub mod settings;
pub mod state;
