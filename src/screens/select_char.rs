//! Character Select Screen
//!
//! Reached from "Jugar". It snaps on instantly, paints itself in the theme
//! picked in the options menu and backs out to the main menu on cancel.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::geometry::Color;
use crate::input::InputState;
use crate::render::DrawContext;
use crate::screen::{GameTime, Screen, ScreenContext, ScreenCore, Theme};

use super::{BackgroundScreen, MainMenuScreen};

const TITLE: &str = "Selecciona tu luchador";
const TITLE_SCALE: u32 = 2;

#[derive(Debug, Serialize, Deserialize)]
struct SelectCharSaveData {
    theme: Theme,
}

pub struct SelectCharScreen {
    core: ScreenCore,
    theme: Theme,
}

impl SelectCharScreen {
    pub const KIND: &'static str = "select_char";

    pub fn new(theme: Theme) -> Self {
        SelectCharScreen {
            core: ScreenCore::with_transitions(Duration::ZERO, Duration::from_millis(500)),
            theme,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn theme_color(theme: Theme) -> Color {
        match theme {
            Theme::Red => Color::rgb(120, 24, 32),
            Theme::Blue => Color::rgb(24, 40, 120),
            Theme::Green => Color::rgb(24, 96, 40),
        }
    }
}

impl Default for SelectCharScreen {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Screen for SelectCharScreen {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: &InputState, ctx: &mut ScreenContext<'_>) {
        if input
            .is_menu_cancel(self.core.controlling_player())
            .is_some()
        {
            ctx.exit_screen();
            ctx.add_screen(Box::new(BackgroundScreen::new()), None);
            ctx.add_screen(Box::new(MainMenuScreen::new()), None);
        }
    }

    fn draw(&self, _time: &GameTime, ctx: &mut DrawContext<'_>) -> Result<(), String> {
        let viewport = ctx.viewport();
        let alpha = self.core.transition_alpha();
        ctx.renderer
            .fill_rect(viewport, Self::theme_color(self.theme).scaled(alpha))?;

        let (center_x, center_y) = viewport.center();
        let resources = ctx.resources;
        let font = &resources.font;
        let line = (font.line_height() * TITLE_SCALE) as i32;
        font.draw_centered(
            ctx.renderer,
            TITLE,
            center_x,
            center_y - line,
            Color::WHITE.scaled(alpha),
            TITLE_SCALE,
        )?;
        font.draw_centered(
            ctx.renderer,
            self.theme.label(),
            center_x,
            center_y + line,
            Color::WHITE.scaled(alpha),
            1,
        )
    }

    fn to_save_data(&self) -> Result<serde_json::Value, PersistError> {
        Ok(serde_json::to_value(SelectCharSaveData { theme: self.theme })?)
    }

    fn restore_save_data(&mut self, data: serde_json::Value) -> Result<(), PersistError> {
        let saved: SelectCharSaveData = serde_json::from_value(data)?;
        self.theme = saved.theme;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::input::{DeviceSnapshot, Key};
    use crate::render::{RecordingRenderer, SharedResources};
    use crate::screen::{GameSettings, ScreenCommand, ScreenId, ScreenState};

    #[test]
    fn test_snaps_on_in_one_update() {
        let mut screen = SelectCharScreen::new(Theme::Green);
        let mut commands = Vec::new();
        let mut settings = GameSettings::default();
        let resources = SharedResources::default();
        let mut ctx = ScreenContext::new(
            ScreenId(1),
            &mut commands,
            &mut settings,
            &resources,
            Rect::new(0, 0, 1280, 720),
        );

        screen.update(&GameTime::from_secs_f32(0.001), &mut ctx, false, false);

        assert_eq!(screen.core().state(), ScreenState::Active);
        assert_eq!(screen.core().transition_alpha(), 1.0);
    }

    #[test]
    fn test_cancel_goes_back_to_main_menu() {
        let mut screen = SelectCharScreen::default();
        let mut commands = Vec::new();
        let mut settings = GameSettings::default();
        let resources = SharedResources::default();
        let mut input = InputState::new();
        input.update(DeviceSnapshot::with_keys(&[Key::Escape]));

        {
            let mut ctx = ScreenContext::new(
                ScreenId(4),
                &mut commands,
                &mut settings,
                &resources,
                Rect::new(0, 0, 1280, 720),
            );
            screen.handle_input(&input, &mut ctx);
        }

        let kinds: Vec<String> = commands
            .iter()
            .map(|command| match command {
                ScreenCommand::Exit(id) => format!("exit:{}", id.0),
                ScreenCommand::Add { screen, .. } => format!("add:{}", screen.kind()),
                other => format!("{:?}", other),
            })
            .collect();
        assert_eq!(kinds, vec!["exit:4", "add:background", "add:main_menu"]);
    }

    #[test]
    fn test_theme_is_the_save_data() {
        let screen = SelectCharScreen::new(Theme::Blue);
        let data = screen.to_save_data().unwrap();
        assert_eq!(data.to_string(), r#"{"theme":"Blue"}"#);

        let mut restored = SelectCharScreen::default();
        restored.restore_save_data(data).unwrap();
        assert_eq!(restored.theme(), Theme::Blue);

        let result = restored.restore_save_data(serde_json::json!({ "theme": "Purple" }));
        assert!(matches!(result, Err(PersistError::Serialization(_))));
        assert_eq!(restored.theme(), Theme::Blue);
    }

    #[test]
    fn test_draw_fills_viewport_with_theme() {
        let mut screen = SelectCharScreen::new(Theme::Red);
        screen.core_mut().update(Duration::from_millis(16), false, false);
        let resources = SharedResources::default();
        let mut renderer = RecordingRenderer::new(Rect::new(0, 0, 640, 480));
        let mut ctx = DrawContext::new(&mut renderer, &resources);

        screen.draw(&GameTime::default(), &mut ctx).unwrap();

        assert_eq!(
            renderer.fills[0],
            (Rect::new(0, 0, 640, 480), Color::rgb(120, 24, 32))
        );
        assert!(renderer.fills.len() > 1);
    }
}
