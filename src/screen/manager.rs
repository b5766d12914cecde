//! Screen manager for the screen stack
//!
//! This module provides the ScreenManager struct which handles:
//! - Adding and removing screens (with content load/unload)
//! - The per-frame update pass and input routing
//! - Drawing every visible screen
//! - Saving and restoring the stack

use crate::config::GameConfig;
use crate::error::{ContentError, PersistError};
use crate::geometry::Rect;
use crate::input::{DeviceSnapshot, InputState, PlayerIndex};
use crate::render::{ContentSource, DrawContext, Renderer, SharedResources};

use super::context::{GameSettings, LoadContext, ScreenCommand, ScreenContext, ScreenId};
use super::persist::{SavedScreen, StateStore};
use super::registry::ScreenRegistry;
use super::state::{GameTime, ScreenState};
use super::Screen;

struct StackEntry {
    id: ScreenId,
    screen: Box<dyn Screen>,
}

/// Owns the screen stack and drives it once per frame
///
/// # Architecture
///
/// The stack is ordered by insertion: the last screen added is on top, drawn
/// last and considered first for input. Each update:
/// 1. Refresh the input snapshot
/// 2. Copy the stack's ids into `screens_to_update`
/// 3. Pop ids top-first, update each screen, apply the commands it queued
/// 4. The first screen found in `TransitionOn`/`Active` while nothing above
///    has claimed focus gets `handle_input`
/// 5. Non-popup screens in `TransitionOn`/`Active` mark everything below as covered
///
/// Screens removed mid-pass are dropped from `screens_to_update` too, and
/// screens added mid-pass wait until the next frame.
pub struct ScreenManager {
    screens: Vec<StackEntry>,
    screens_to_update: Vec<ScreenId>,
    input: InputState,
    resources: SharedResources,
    content: Box<dyn ContentSource>,
    registry: ScreenRegistry,
    store: StateStore,
    settings: GameSettings,
    viewport: Rect,
    safe_area_margin: f32,
    safe_area: Rect,
    is_initialized: bool,
    trace_enabled: bool,
    quit_requested: bool,
    next_id: u64,
}

impl ScreenManager {
    /// Creates an empty, uninitialized manager with a 1280x720 viewport
    pub fn new(
        content: Box<dyn ContentSource>,
        registry: ScreenRegistry,
        store: StateStore,
    ) -> Self {
        let viewport = Rect::new(0, 0, 1280, 720);
        ScreenManager {
            screens: Vec::new(),
            screens_to_update: Vec::new(),
            input: InputState::new(),
            resources: SharedResources::default(),
            content,
            registry,
            store,
            settings: GameSettings::default(),
            viewport,
            safe_area_margin: 0.0,
            safe_area: viewport,
            is_initialized: false,
            trace_enabled: false,
            quit_requested: false,
            next_id: 0,
        }
    }

    /// Creates a manager with the default registry, configured from `config`
    pub fn from_config(config: &GameConfig, content: Box<dyn ContentSource>) -> Self {
        let mut manager = Self::new(
            content,
            ScreenRegistry::create_default(),
            StateStore::new(config.state_dir()),
        );
        manager.safe_area_margin = config.safe_area_margin;
        manager.trace_enabled = config.trace_screens;
        manager.set_viewport(config.window_width, config.window_height);
        manager
    }

    // ======================================================================
    // Properties
    // ======================================================================

    pub fn resources(&self) -> &SharedResources {
        &self.resources
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GameSettings {
        &mut self.settings
    }

    /// The portion of the viewport where drawing is safely allowed
    pub fn safe_area(&self) -> Rect {
        self.safe_area
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace_enabled
    }

    /// If true, every update logs the stack's screen kinds
    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
    }

    /// True once a screen asked the game to shut down
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ScreenRegistry {
        &mut self.registry
    }

    /// Reports a new window size; the safe area follows
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Rect::new(0, 0, width, height);
        let margin = self.safe_area_margin.clamp(0.0, 0.5);
        let dx = (width as f32 * margin).round() as u32;
        let dy = (height as f32 * margin).round() as u32;
        self.safe_area = Rect::new(
            dx as i32,
            dy as i32,
            width.saturating_sub(dx * 2),
            height.saturating_sub(dy * 2),
        );
    }

    /// Screens in stack order, bottom first
    pub fn screens(&self) -> impl Iterator<Item = (ScreenId, &dyn Screen)> + '_ {
        self.screens
            .iter()
            .map(|entry| (entry.id, entry.screen.as_ref()))
    }

    pub fn screen_kinds(&self) -> Vec<&'static str> {
        self.screens.iter().map(|entry| entry.screen.kind()).collect()
    }

    pub fn get(&self, id: ScreenId) -> Option<&dyn Screen> {
        self.position(id).map(|index| self.screens[index].screen.as_ref())
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    fn position(&self, id: ScreenId) -> Option<usize> {
        self.screens.iter().position(|entry| entry.id == id)
    }

    // ======================================================================
    // Lifecycle
    // ======================================================================

    /// Loads shared resources, then the content of every screen already added
    pub fn initialize(&mut self) -> Result<(), ContentError> {
        self.resources = SharedResources::load(self.content.as_mut())?;

        for entry in self.screens.iter_mut() {
            let mut ctx = LoadContext {
                content: self.content.as_mut(),
                resources: &self.resources,
                safe_area: self.safe_area,
            };
            entry.screen.load_content(&mut ctx)?;
        }

        self.is_initialized = true;
        log::debug!("Screen manager initialized with {} screens", self.screens.len());
        Ok(())
    }

    /// Tells each screen to unload its content
    pub fn unload_content(&mut self) {
        for entry in self.screens.iter_mut() {
            entry.screen.unload_content();
        }
    }

    // ======================================================================
    // Stack operations
    // ======================================================================

    /// Adds a screen on top of the stack
    ///
    /// Content is loaded straight away when the manager is already
    /// initialized; if that fails the screen is not added.
    pub fn add_screen(
        &mut self,
        mut screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    ) -> Result<ScreenId, ContentError> {
        self.prepare_screen(screen.as_mut(), controlling_player)?;
        Ok(self.push_screen(screen))
    }

    fn prepare_screen(
        &mut self,
        screen: &mut dyn Screen,
        controlling_player: Option<PlayerIndex>,
    ) -> Result<(), ContentError> {
        screen.core_mut().attach(controlling_player);

        if self.is_initialized {
            let mut ctx = LoadContext {
                content: self.content.as_mut(),
                resources: &self.resources,
                safe_area: self.safe_area,
            };
            screen.load_content(&mut ctx)?;
        }

        Ok(())
    }

    fn push_screen(&mut self, screen: Box<dyn Screen>) -> ScreenId {
        let id = ScreenId(self.next_id);
        self.next_id += 1;

        log::debug!("Adding screen {} ({:?})", screen.kind(), id);
        self.screens.push(StackEntry { id, screen });
        id
    }

    /// Removes a screen immediately
    ///
    /// Normally screens leave through `exit_screen` so they can transition
    /// off first. Safe to call during the update pass.
    pub fn remove_screen(&mut self, id: ScreenId) -> Option<Box<dyn Screen>> {
        let index = self.position(id)?;
        let mut entry = self.screens.remove(index);

        if self.is_initialized {
            entry.screen.unload_content();
        }
        self.screens_to_update.retain(|&pending| pending != id);

        log::debug!("Removed screen {} ({:?})", entry.screen.kind(), id);
        Some(entry.screen)
    }

    /// Asks a screen to exit, removing it at once if its off-time is zero
    pub fn exit_screen(&mut self, id: ScreenId) {
        if let Some(index) = self.position(id) {
            self.screens[index].screen.core_mut().exit_screen();
            self.remove_if_pending(id);
        }
    }

    fn remove_if_pending(&mut self, id: ScreenId) {
        let pending = self
            .position(id)
            .map(|index| self.screens[index].screen.core().is_removal_pending())
            .unwrap_or(false);

        if pending {
            self.remove_screen(id);
        }
    }

    fn apply_commands(&mut self, commands: Vec<ScreenCommand>) {
        for command in commands {
            match command {
                ScreenCommand::Add {
                    screen,
                    controlling_player,
                } => {
                    let kind = screen.kind();
                    if let Err(e) = self.add_screen(screen, controlling_player) {
                        log::error!("Failed to add screen {}: {}", kind, e);
                    }
                }
                ScreenCommand::Exit(id) => self.exit_screen(id),
                ScreenCommand::ExitAll => {
                    let ids: Vec<ScreenId> = self.screens.iter().map(|entry| entry.id).collect();
                    for id in ids {
                        self.exit_screen(id);
                    }
                }
                ScreenCommand::Quit => {
                    log::info!("Quit requested");
                    self.quit_requested = true;
                }
            }
        }
    }

    // ======================================================================
    // Update and Draw
    // ======================================================================

    /// Runs one frame of logic for every screen
    pub fn update(&mut self, time: &GameTime, is_window_active: bool, devices: DeviceSnapshot) {
        self.input.update(devices);

        self.screens_to_update.clear();
        self.screens_to_update
            .extend(self.screens.iter().map(|entry| entry.id));

        let mut other_screen_has_focus = !is_window_active;
        let mut covered_by_other_screen = false;

        while let Some(id) = self.screens_to_update.pop() {
            let Some(index) = self.position(id) else {
                continue;
            };

            let mut commands = Vec::new();
            {
                let entry = &mut self.screens[index];
                let mut ctx = ScreenContext::new(
                    id,
                    &mut commands,
                    &mut self.settings,
                    &self.resources,
                    self.safe_area,
                );
                entry.screen.update(
                    time,
                    &mut ctx,
                    other_screen_has_focus,
                    covered_by_other_screen,
                );
            }
            self.apply_commands(commands);
            self.remove_if_pending(id);

            let Some(index) = self.position(id) else {
                continue;
            };
            let core = self.screens[index].screen.core();
            if !matches!(core.state(), ScreenState::TransitionOn | ScreenState::Active) {
                continue;
            }
            let is_popup = core.is_popup();

            if !other_screen_has_focus {
                let mut commands = Vec::new();
                {
                    let entry = &mut self.screens[index];
                    let mut ctx = ScreenContext::new(
                        id,
                        &mut commands,
                        &mut self.settings,
                        &self.resources,
                        self.safe_area,
                    );
                    entry.screen.handle_input(&self.input, &mut ctx);
                }
                other_screen_has_focus = true;
                self.apply_commands(commands);
                self.remove_if_pending(id);
            }

            if !is_popup {
                covered_by_other_screen = true;
            }
        }

        if self.trace_enabled {
            self.trace_screens();
        }
    }

    fn trace_screens(&self) {
        log::debug!("Screens: {}", self.screen_kinds().join(", "));
    }

    /// Tells each visible screen to draw itself, bottom of the stack first
    pub fn draw(&self, time: &GameTime, renderer: &mut dyn Renderer) -> Result<(), String> {
        let mut ctx = DrawContext::new(renderer, &self.resources);

        for entry in &self.screens {
            if entry.screen.core().state() == ScreenState::Hidden {
                continue;
            }
            entry.screen.draw(time, &mut ctx)?;
        }

        Ok(())
    }

    // ======================================================================
    // Save and Restore
    // ======================================================================

    /// Writes every serializable screen to the state directory
    ///
    /// Screens already transitioning off are left out.
    pub fn serialize_state(&self) -> Result<(), PersistError> {
        let mut saved = Vec::new();
        for entry in &self.screens {
            let core = entry.screen.core();
            if core.is_serializable() && !core.is_exiting() {
                saved.push(SavedScreen {
                    kind: entry.screen.kind().to_string(),
                    data: entry.screen.to_save_data()?,
                });
            }
        }

        self.store.save(&saved)?;
        log::info!(
            "Saved {} screens to {}",
            saved.len(),
            self.store.directory().display()
        );
        Ok(())
    }

    /// Rebuilds the saved stack on top of the current one
    ///
    /// All or nothing: on any failure the saved files are deleted, no screen
    /// is added, and false is returned. Also false when nothing was saved.
    pub fn deserialize_state(&mut self) -> bool {
        let restored = match self.restore_screens() {
            Ok(Some(screens)) if !screens.is_empty() => screens,
            Ok(_) => return false,
            Err(e) => {
                log::warn!("Discarding saved screen state: {}", e);
                self.discard_saved_state();
                return false;
            }
        };

        let mut prepared: Vec<Box<dyn Screen>> = Vec::with_capacity(restored.len());
        for mut screen in restored {
            if let Err(e) = self.prepare_screen(screen.as_mut(), Some(PlayerIndex::One)) {
                log::warn!("Discarding saved screen state: {}", e);
                if self.is_initialized {
                    for loaded in prepared.iter_mut() {
                        loaded.unload_content();
                    }
                }
                self.discard_saved_state();
                return false;
            }
            prepared.push(screen);
        }

        let count = prepared.len();
        for screen in prepared {
            self.push_screen(screen);
        }

        log::info!("Restored {} screens", count);
        true
    }

    fn restore_screens(&self) -> Result<Option<Vec<Box<dyn Screen>>>, PersistError> {
        let Some(saved) = self.store.load()? else {
            return Ok(None);
        };

        let mut restored = Vec::with_capacity(saved.len());
        for record in saved {
            let mut screen = self
                .registry
                .create(&record.kind)
                .ok_or_else(|| PersistError::UnknownScreen(record.kind.clone()))?;
            screen.restore_save_data(record.data)?;
            restored.push(screen);
        }

        Ok(Some(restored))
    }

    fn discard_saved_state(&self) {
        if let Err(e) = self.store.clear() {
            log::error!("Failed to delete saved screen state: {}", e);
        }
    }
}
