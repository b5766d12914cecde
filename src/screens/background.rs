//! Background Screen
//!
//! Sits at the bottom of the stack behind the menus. It never considers
//! itself covered, so it stays visible whatever is placed on top of it.

use std::time::Duration;

use crate::error::ContentError;
use crate::geometry::Color;
use crate::render::{DrawContext, TextureAsset};
use crate::screen::{GameTime, LoadContext, Screen, ScreenContext, ScreenCore};

pub const BACKGROUND_TEXTURE: &str = "images/background";

/// Drawn when the background texture is not loaded
const FALLBACK_COLOR: Color = Color::rgb(20, 16, 28);

pub struct BackgroundScreen {
    core: ScreenCore,
    texture: Option<TextureAsset>,
}

impl BackgroundScreen {
    pub const KIND: &'static str = "background";

    pub fn new() -> Self {
        BackgroundScreen {
            core: ScreenCore::with_transitions(
                Duration::from_millis(500),
                Duration::from_millis(500),
            ),
            texture: None,
        }
    }
}

impl Default for BackgroundScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for BackgroundScreen {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn load_content(&mut self, ctx: &mut LoadContext<'_>) -> Result<(), ContentError> {
        self.texture = Some(ctx.content.load_texture(BACKGROUND_TEXTURE)?);
        Ok(())
    }

    fn unload_content(&mut self) {
        self.texture = None;
    }

    fn update(
        &mut self,
        time: &GameTime,
        _ctx: &mut ScreenContext<'_>,
        other_screen_has_focus: bool,
        _covered_by_other_screen: bool,
    ) {
        self.core.update(time.elapsed, other_screen_has_focus, false);
    }

    fn draw(&self, _time: &GameTime, ctx: &mut DrawContext<'_>) -> Result<(), String> {
        let viewport = ctx.viewport();
        let alpha = self.core.transition_alpha();

        match &self.texture {
            Some(texture) => ctx
                .renderer
                .draw_texture(texture, viewport, Color::WHITE.scaled(alpha)),
            None => ctx.renderer.fill_rect(viewport, FALLBACK_COLOR.scaled(alpha)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::render::{FixedContent, RecordingRenderer, SharedResources};
    use crate::screen::{GameSettings, ScreenId, ScreenState};

    #[test]
    fn test_background_is_never_covered() {
        let mut screen = BackgroundScreen::new();
        let mut commands = Vec::new();
        let mut settings = GameSettings::default();
        let resources = SharedResources::default();
        let mut ctx = ScreenContext::new(
            ScreenId(0),
            &mut commands,
            &mut settings,
            &resources,
            Rect::new(0, 0, 800, 600),
        );

        screen.update(&GameTime::from_secs_f32(1.0), &mut ctx, true, true);
        screen.update(&GameTime::from_secs_f32(1.0), &mut ctx, true, true);

        assert_eq!(screen.core().state(), ScreenState::Active);
    }

    #[test]
    fn test_draws_loaded_texture_over_viewport() {
        let mut screen = BackgroundScreen::new();
        let resources = SharedResources::default();
        let mut content = FixedContent::new(1920, 1080);
        let mut load = LoadContext {
            content: &mut content,
            resources: &resources,
            safe_area: Rect::new(0, 0, 800, 600),
        };
        screen.load_content(&mut load).unwrap();

        let mut renderer = RecordingRenderer::new(Rect::new(0, 0, 800, 600));
        let mut ctx = DrawContext::new(&mut renderer, &resources);
        screen.draw(&GameTime::default(), &mut ctx).unwrap();

        assert_eq!(renderer.textures.len(), 1);
        assert_eq!(renderer.textures[0].0, BACKGROUND_TEXTURE);
        assert_eq!(renderer.textures[0].1, Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn test_unloaded_background_falls_back_to_fill() {
        let screen = BackgroundScreen::new();
        let resources = SharedResources::default();
        let mut renderer = RecordingRenderer::new(Rect::new(0, 0, 800, 600));
        let mut ctx = DrawContext::new(&mut renderer, &resources);

        screen.draw(&GameTime::default(), &mut ctx).unwrap();

        assert!(renderer.textures.is_empty());
        assert_eq!(renderer.fills.len(), 1);
    }
}
