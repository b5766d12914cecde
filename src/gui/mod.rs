//! Menu GUI System
//!
//! This module provides the menu building blocks used by menu-based screens.
//!
//! # Available Components
//!
//! - [`MenuScreen`] - Entry list, selection index, input routing and layout
//! - [`MenuEntry`] - One selectable item with a selection handler
//! - [`MenuStyle`] - Colors shared by a menu and its entries
//!
//! # Example Usage
//!
//! ```ignore
//! use crate::gui::{MenuEntry, MenuScreen};
//!
//! let mut menu = MenuScreen::new("");
//! menu.set_entries(vec![
//!     MenuEntry::with_handler("Jugar", |ctx, _| ctx.exit_all_screens()),
//!     MenuEntry::with_handler("Salir", |ctx, _| ctx.quit()),
//! ]);
//! ```

pub mod menu_entry;
pub mod menu_screen;

pub use menu_entry::{MenuEntry, SelectHandler};
pub use menu_screen::{MenuScreen, MENU_ENTRY_PADDING};

use crate::geometry::Color;

/// Configuration for menu appearance
#[derive(Debug, Clone)]
pub struct MenuStyle {
    /// Title text color (faded by the transition)
    pub title_color: Color,

    /// Normal item text color
    pub item_color: Color,

    /// Selected item text color
    pub selected_item_color: Color,

    /// Tint of the selection border
    pub highlight_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            title_color: Color::rgb(192, 192, 192),
            item_color: Color::rgb(160, 160, 170),
            selected_item_color: Color::rgb(255, 255, 255),
            highlight_color: Color::rgb(255, 210, 60),
        }
    }
}
