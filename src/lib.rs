//! Super Fighter Ultimate screen and menu layer
//!
//! A stack of screens (background, menus, character select) with timed
//! transitions, input routing to the topmost active screen, and save/restore
//! of the stack across runs. The SDL2 host lives behind the `sdl` feature.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gui;
pub mod input;
pub mod render;
pub mod screen;
pub mod screens;
pub mod text;

#[cfg(feature = "sdl")]
pub mod backend;
