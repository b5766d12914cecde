//! Menu Entry Component
//!
//! One selectable item of a menu: its text, where it was laid out this frame,
//! and the handler that runs when it is chosen.

use std::time::Duration;

use crate::geometry::{Color, Rect};
use crate::input::PlayerIndex;
use crate::render::DrawContext;
use crate::screen::ScreenContext;
use crate::text::BitmapFont;

use super::MenuStyle;

/// Called when an entry is chosen (or when a menu is cancelled)
pub type SelectHandler = Box<dyn FnMut(&mut ScreenContext<'_>, PlayerIndex)>;

/// Selection fade speed, in full fades per second
const SELECTION_FADE_SPEED: f32 = 4.0;

pub struct MenuEntry {
    text: String,
    destination: Rect,
    selection_fade: f32,
    on_select: Option<SelectHandler>,
}

impl MenuEntry {
    /// Creates an entry with no handler
    pub fn new(text: impl Into<String>) -> Self {
        MenuEntry {
            text: text.into(),
            destination: Rect::default(),
            selection_fade: 0.0,
            on_select: None,
        }
    }

    /// Creates an entry that runs `handler` when selected
    pub fn with_handler(
        text: impl Into<String>,
        handler: impl FnMut(&mut ScreenContext<'_>, PlayerIndex) + 'static,
    ) -> Self {
        let mut entry = Self::new(text);
        entry.set_on_select(handler);
        entry
    }

    pub fn set_on_select(
        &mut self,
        handler: impl FnMut(&mut ScreenContext<'_>, PlayerIndex) + 'static,
    ) {
        self.on_select = Some(Box::new(handler));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Where the entry was laid out on the last update
    pub fn destination(&self) -> Rect {
        self.destination
    }

    pub fn set_destination(&mut self, destination: Rect) {
        self.destination = destination;
    }

    pub fn selection_fade(&self) -> f32 {
        self.selection_fade
    }

    /// Width of the text alone, before padding
    pub fn natural_width(&self, font: &BitmapFont) -> u32 {
        font.measure(&self.text).0
    }

    /// Runs the selection handler, if any
    pub fn select(&mut self, ctx: &mut ScreenContext<'_>, player: PlayerIndex) {
        if let Some(handler) = self.on_select.as_mut() {
            handler(ctx, player);
        }
    }

    /// Fades the highlight in while selected and out otherwise
    pub fn update(&mut self, is_selected: bool, elapsed: Duration) {
        let step = elapsed.as_secs_f32() * SELECTION_FADE_SPEED;
        self.selection_fade = if is_selected {
            (self.selection_fade + step).min(1.0)
        } else {
            (self.selection_fade - step).max(0.0)
        };
    }

    pub fn draw(
        &self,
        ctx: &mut DrawContext<'_>,
        is_selected: bool,
        alpha: f32,
        style: &MenuStyle,
    ) -> Result<(), String> {
        let resources = ctx.resources;

        ctx.renderer.draw_texture(
            &resources.button_background,
            self.destination,
            Color::WHITE.scaled(alpha),
        )?;

        if is_selected {
            ctx.renderer.draw_texture(
                &resources.select_border,
                self.destination,
                style.highlight_color.scaled(alpha),
            )?;
        }

        let color = style
            .item_color
            .lerp(style.selected_item_color, self.selection_fade)
            .scaled(alpha);
        let (cx, cy) = self.destination.center();
        resources
            .font
            .draw_centered(ctx.renderer, &self.text, cx, cy, color, 1)
    }
}

impl std::fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEntry")
            .field("text", &self.text)
            .field("destination", &self.destination)
            .field("selection_fade", &self.selection_fade)
            .field("has_handler", &self.on_select.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, SharedResources};

    #[test]
    fn test_selection_fade_clamps() {
        let mut entry = MenuEntry::new("Jugar");

        entry.update(true, Duration::from_millis(125));
        assert!((entry.selection_fade() - 0.5).abs() < 1e-4);

        entry.update(true, Duration::from_secs(1));
        assert_eq!(entry.selection_fade(), 1.0);

        entry.update(false, Duration::from_secs(1));
        assert_eq!(entry.selection_fade(), 0.0);
    }

    #[test]
    fn test_natural_width_follows_font() {
        let entry = MenuEntry::new("Salir");
        assert_eq!(entry.natural_width(&BitmapFont::new(1)), 30);
        assert_eq!(entry.natural_width(&BitmapFont::new(2)), 60);
    }

    #[test]
    fn test_draw_highlights_only_when_selected() {
        let resources = SharedResources::default();
        let style = MenuStyle::default();
        let mut entry = MenuEntry::new("Jugar");
        entry.set_destination(Rect::new(10, 10, 200, 50));

        let mut renderer = RecordingRenderer::new(Rect::new(0, 0, 800, 600));
        let mut ctx = DrawContext::new(&mut renderer, &resources);
        entry.draw(&mut ctx, false, 1.0, &style).unwrap();
        entry.draw(&mut ctx, true, 1.0, &style).unwrap();

        let names: Vec<&str> = renderer.textures.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                crate::render::BUTTON_BACKGROUND_TEXTURE,
                crate::render::BUTTON_BACKGROUND_TEXTURE,
                crate::render::SELECT_BORDER_TEXTURE,
            ]
        );
        assert!(!renderer.fills.is_empty());
    }
}
