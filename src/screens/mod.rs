//! The game's screens
//!
//! - [`BackgroundScreen`] - Full-screen backdrop behind the menus
//! - [`MainMenuScreen`] - Jugar / Opciones / Salir
//! - [`OptionsMenuScreen`] - Theme popup over the main menu
//! - [`SelectCharScreen`] - Character select, painted in the chosen theme

pub mod background;
pub mod main_menu;
pub mod options_menu;
pub mod select_char;

pub use background::BackgroundScreen;
pub use main_menu::MainMenuScreen;
pub use options_menu::OptionsMenuScreen;
pub use select_char::SelectCharScreen;
