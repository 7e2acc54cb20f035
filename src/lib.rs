// Chunk: docs/chunks/terminal_host - Terminal popup host
//!
//! tabfzf: runs the tab switcher popup in a terminal.
//!
//! The engine lives in `tabfzf-switcher`. This crate supplies the pieces a
//! terminal host needs around it: a platform over a tab snapshot read from
//! JSON, a focus host driven by the event loop, key translation from
//! crossterm and the renderer.

pub mod app;
pub mod platform;
pub mod render;
pub mod terminal;
