//! Core logic – carousel geometry, animators, the panel transition state
//! machine, content and models.
//!
//! Nothing in this module depends on any TUI or rendering crate, so all of
//! it is testable without a terminal.

pub mod carousel;
pub mod controller;
pub mod items;
pub mod mesh;
pub mod spring;
pub mod transition;
