// Terminal dashboard for Learnora: assessment, learning paths and chat
// panels over the REST client in learnora_core.

pub mod components;
pub mod keymap;
pub mod screens;
pub mod theme;
pub mod ui;
