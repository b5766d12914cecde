//! Screen stack management
//!
//! A screen is one state of the UI (background, main menu, character select).
//! The [`ScreenManager`] owns an ordered stack of them, updates them top-down
//! once per frame, routes input to at most one, and draws them bottom-up.
//!
//! # Architecture
//!
//! - `state`: `ScreenCore` transition state machine and `GameTime`
//! - `context`: `ScreenContext` command queue, settings, ids
//! - `manager`: `ScreenManager` stack, update/draw loop, save/restore
//! - `registry`: maps stable screen kinds to constructors for restore
//! - `persist`: on-disk layout of the saved stack
//!
//! # Example Usage
//!
//! ```ignore
//! let registry = ScreenRegistry::create_default();
//! let mut manager = ScreenManager::new(Box::new(content), registry, store);
//! manager.add_screen(Box::new(BackgroundScreen::new()), None)?;
//! manager.add_screen(Box::new(MainMenuScreen::new()), None)?;
//! manager.initialize()?;
//!
//! // Each frame
//! manager.update(&time, window_active, snapshot);
//! manager.draw(&time, &mut renderer)?;
//! ```

pub mod context;
pub mod manager;
pub mod persist;
pub mod registry;
pub mod state;

pub use context::{GameSettings, LoadContext, ScreenCommand, ScreenContext, ScreenId, Theme};
pub use manager::ScreenManager;
pub use persist::StateStore;
pub use registry::ScreenRegistry;
pub use state::{GameTime, ScreenCore, ScreenState};

use crate::error::{ContentError, PersistError};
use crate::input::InputState;
use crate::render::DrawContext;

/// One state of the UI stack
///
/// Implementors own a [`ScreenCore`] and expose it through `core`/`core_mut`;
/// the default `update` just advances its transition. Menu-based screens hold
/// a `MenuScreen` and forward to it.
pub trait Screen {
    /// Stable identifier used by the registry when restoring saved state
    fn kind(&self) -> &'static str;

    fn core(&self) -> &ScreenCore;

    fn core_mut(&mut self) -> &mut ScreenCore;

    /// Load graphics content for the screen
    fn load_content(&mut self, _ctx: &mut LoadContext<'_>) -> Result<(), ContentError> {
        Ok(())
    }

    /// Release anything `load_content` acquired
    fn unload_content(&mut self) {}

    /// Runs once per frame regardless of focus
    fn update(
        &mut self,
        time: &GameTime,
        _ctx: &mut ScreenContext<'_>,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.core_mut()
            .update(time.elapsed, other_screen_has_focus, covered_by_other_screen);
    }

    /// Only called while the screen is the one receiving input
    fn handle_input(&mut self, _input: &InputState, _ctx: &mut ScreenContext<'_>) {}

    fn draw(&self, time: &GameTime, ctx: &mut DrawContext<'_>) -> Result<(), String>;

    /// Opaque state written next to the screen list on save
    fn to_save_data(&self) -> Result<serde_json::Value, PersistError> {
        Ok(serde_json::Value::Null)
    }

    /// Feeds back what `to_save_data` produced
    fn restore_save_data(&mut self, _data: serde_json::Value) -> Result<(), PersistError> {
        Ok(())
    }
}
