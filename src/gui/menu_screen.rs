//! Base Menu Screen
//!
//! Reusable behavior for screens that contain a menu of entries. The user can
//! move left and right through the entries (bound to the up/down menu keys),
//! confirm one, click one, or cancel to back out of the screen.
//!
//! Menu-based screens hold a [`MenuScreen`] and forward their `Screen`
//! methods to it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::geometry::Rect;
use crate::input::{InputState, PlayerIndex};
use crate::render::{DrawContext, SharedResources};
use crate::screen::{GameTime, ScreenContext, ScreenCore};

use super::menu_entry::{MenuEntry, SelectHandler};
use super::MenuStyle;

/// Vertical slack added above and below an entry for pointer hits
pub const MENU_ENTRY_PADDING: i32 = 35;
/// Added to the widest entry's text width
const ENTRY_TEXT_PADDING: u32 = 20;
/// Fixed extra width on every entry
const ENTRY_EXTRA_WIDTH: u32 = 25;
const ENTRY_HEIGHT: u32 = 50;
/// Title baseline before the transition offset
const TITLE_Y: i32 = 375;
const TITLE_SLIDE_DISTANCE: f32 = 100.0;
const TITLE_SCALE: u32 = 2;
const MENU_TRANSITION_TIME: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize, Deserialize)]
struct MenuSaveData {
    selected_entry: usize,
}

/// A stateful menu with a selection index and transition-aware drawing
///
/// # Example
///
/// ```ignore
/// let mut menu = MenuScreen::new("Opciones");
/// menu.set_entries(vec![
///     MenuEntry::with_handler("Volver", |ctx, _| ctx.exit_screen()),
/// ]);
///
/// // In Screen::handle_input
/// menu.handle_input(input, ctx);
/// ```
pub struct MenuScreen {
    core: ScreenCore,
    title: String,
    entries: Vec<MenuEntry>,
    selected_entry: usize,
    pressed_entry: Option<usize>,
    on_cancel: Option<SelectHandler>,
    style: MenuStyle,
}

impl MenuScreen {
    /// Creates an empty menu with half-second transitions
    pub fn new(title: impl Into<String>) -> Self {
        MenuScreen {
            core: ScreenCore::with_transitions(MENU_TRANSITION_TIME, MENU_TRANSITION_TIME),
            title: title.into(),
            entries: Vec::new(),
            selected_entry: 0,
            pressed_entry: None,
            on_cancel: None,
            style: MenuStyle::default(),
        }
    }

    /// Marks the menu as a popup (screens beneath stay uncovered)
    pub fn popup(mut self) -> Self {
        self.core = self.core.popup();
        self
    }

    pub fn with_style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    pub fn core(&self) -> &ScreenCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// The entry list, so wrapping screens can add or change the contents
    pub fn entries_mut(&mut self) -> &mut Vec<MenuEntry> {
        &mut self.entries
    }

    /// Replaces every entry, keeping the selection in range
    pub fn set_entries(&mut self, entries: Vec<MenuEntry>) {
        self.entries = entries;
        if self.selected_entry >= self.entries.len() {
            self.selected_entry = 0;
        }
        self.pressed_entry = None;
    }

    pub fn selected_entry(&self) -> usize {
        self.selected_entry
    }

    /// Replaces the default cancel behavior (exit this screen)
    pub fn set_on_cancel(
        &mut self,
        handler: impl FnMut(&mut ScreenContext<'_>, PlayerIndex) + 'static,
    ) {
        self.on_cancel = Some(Box::new(handler));
    }

    // ======================================================================
    // Handle Input
    // ======================================================================

    /// Move selection back (wraps to the last entry)
    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.selected_entry == 0 {
            self.selected_entry = self.entries.len() - 1;
        } else {
            self.selected_entry -= 1;
        }
    }

    /// Move selection forward (wraps to the first entry)
    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected_entry = (self.selected_entry + 1) % self.entries.len();
    }

    /// Clickable area of an entry: its destination grown vertically
    pub fn entry_hit_bounds(&self, index: usize) -> Rect {
        self.entries[index]
            .destination()
            .inflate(0, MENU_ENTRY_PADDING)
    }

    /// Index of the entry whose hit bounds contain the point
    pub fn entry_at(&self, x: i32, y: i32) -> Option<usize> {
        (0..self.entries.len()).find(|&i| self.entry_hit_bounds(i).contains_point(x, y))
    }

    /// Responds to user input, changing the selected entry and accepting or
    /// cancelling the menu
    ///
    /// Keyboard and pointer are checked independently in the same call.
    pub fn handle_input(&mut self, input: &InputState, ctx: &mut ScreenContext<'_>) {
        let player = self.core.controlling_player();

        if let Some(cancelled_by) = input.is_menu_cancel(player) {
            self.cancel(ctx, cancelled_by);
        }

        if input.is_menu_up(player) {
            self.select_previous();
        } else if input.is_menu_down(player) {
            self.select_next();
        } else if let Some(selected_by) = input.is_menu_select(player) {
            if !self.entries.is_empty() {
                self.select_entry(self.selected_entry, ctx, selected_by);
            }
        }

        let (x, y) = input.pointer_position();
        if input.is_pointer_pressed() {
            self.pressed_entry = self.entry_at(x, y);
            if let Some(index) = self.pressed_entry {
                self.selected_entry = index;
            }
        } else if input.is_pointer_released() {
            if let Some(pressed) = self.pressed_entry.take() {
                if self.entry_at(x, y) == Some(pressed) {
                    self.select_entry(pressed, ctx, player.unwrap_or(PlayerIndex::One));
                }
            }
        }
    }

    /// Runs the handler of entry `index`
    ///
    /// Panics if `index` is out of range.
    pub fn select_entry(&mut self, index: usize, ctx: &mut ScreenContext<'_>, player: PlayerIndex) {
        self.entries[index].select(ctx, player);
    }

    /// Runs the cancel handler, or exits the screen when none is set
    pub fn cancel(&mut self, ctx: &mut ScreenContext<'_>, player: PlayerIndex) {
        match self.on_cancel.as_mut() {
            Some(handler) => handler(ctx, player),
            None => ctx.exit_screen(),
        }
    }

    // ======================================================================
    // Update and Draw
    // ======================================================================

    /// Lays entries out left to right near the bottom of the safe area
    ///
    /// The safe area is split into `count + 2` steps; every entry gets the
    /// width of the widest one so the row looks even.
    pub fn update_menu_entry_destination(&mut self, safe_area: Rect, resources: &SharedResources) {
        if self.entries.is_empty() {
            return;
        }

        let button = &resources.button_background;
        let x_step = safe_area.width as i32 / (self.entries.len() as i32 + 2);
        let max_width = self
            .entries
            .iter()
            .map(|entry| entry.natural_width(&resources.font))
            .max()
            .unwrap_or(0)
            + ENTRY_TEXT_PADDING;

        let y = safe_area.bottom() - button.height as i32 * 2;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            let x = safe_area.left() + (x_step - button.width as i32) / 2 + (i as i32 + 1) * x_step;
            entry.set_destination(Rect::new(x, y, max_width + ENTRY_EXTRA_WIDTH, ENTRY_HEIGHT));
        }
    }

    pub fn update(
        &mut self,
        time: &GameTime,
        ctx: &mut ScreenContext<'_>,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.core
            .update(time.elapsed, other_screen_has_focus, covered_by_other_screen);

        self.update_menu_entry_destination(ctx.safe_area(), ctx.resources());

        let is_active = self.core.is_active();
        let selected = self.selected_entry;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.update(is_active && i == selected, time.elapsed);
        }
    }

    pub fn draw(&self, _time: &GameTime, ctx: &mut DrawContext<'_>) -> Result<(), String> {
        let alpha = self.core.transition_alpha();
        let is_active = self.core.is_active();

        for (i, entry) in self.entries.iter().enumerate() {
            entry.draw(ctx, is_active && i == self.selected_entry, alpha, &self.style)?;
        }

        if self.title.is_empty() {
            return Ok(());
        }

        // Slide the title with a power curve so it slows down near the end
        let transition_offset = self.core.transition_position().powi(2);
        let title_y = TITLE_Y - (transition_offset * TITLE_SLIDE_DISTANCE) as i32;
        let (center_x, _) = ctx.viewport().center();
        let resources = ctx.resources;

        resources.font.draw_centered(
            ctx.renderer,
            &self.title,
            center_x,
            title_y,
            self.style.title_color.scaled(alpha),
            TITLE_SCALE,
        )
    }

    // ======================================================================
    // Save data
    // ======================================================================

    pub fn to_save_data(&self) -> Result<serde_json::Value, PersistError> {
        Ok(serde_json::to_value(MenuSaveData {
            selected_entry: self.selected_entry,
        })?)
    }

    pub fn restore_save_data(&mut self, data: serde_json::Value) -> Result<(), PersistError> {
        let saved: MenuSaveData = serde_json::from_value(data)?;
        self.selected_entry = saved.selected_entry;
        Ok(())
    }
}
