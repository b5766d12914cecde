use crate::error::{ContentError, PersistError};
use crate::gui::{MenuEntry, MenuScreen};
use crate::input::InputState;
use crate::render::DrawContext;
use crate::screen::{GameTime, LoadContext, Screen, ScreenContext, ScreenCore, Theme};

/// How dark the screens beneath the popup get when fully on
const BACKDROP_ALPHA: f32 = 2.0 / 3.0;

/// Popup opened from the main menu to pick the color theme
///
/// Being a popup, the main menu beneath keeps drawing (darkened) but gets no
/// input while this is open.
pub struct OptionsMenuScreen {
    menu: MenuScreen,
}

impl OptionsMenuScreen {
    pub const KIND: &'static str = "options_menu";

    pub fn new() -> Self {
        OptionsMenuScreen {
            menu: MenuScreen::new("Opciones").popup(),
        }
    }

    pub fn menu(&self) -> &MenuScreen {
        &self.menu
    }

    fn theme_label(theme: Theme) -> String {
        format!("Tema: {}", theme.label())
    }

    fn build_entries(theme: Theme) -> Vec<MenuEntry> {
        vec![
            MenuEntry::with_handler(Self::theme_label(theme), |ctx, _| {
                let next = ctx.settings().theme.next();
                ctx.settings_mut().theme = next;
                log::debug!("Theme set to {:?}", next);
            }),
            MenuEntry::with_handler("Volver", |ctx, _| ctx.exit_screen()),
        ]
    }
}

impl Default for OptionsMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for OptionsMenuScreen {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn core(&self) -> &ScreenCore {
        self.menu.core()
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        self.menu.core_mut()
    }

    fn load_content(&mut self, _ctx: &mut LoadContext<'_>) -> Result<(), ContentError> {
        if self.menu.entries().is_empty() {
            self.menu.set_entries(Self::build_entries(Theme::default()));
        }
        Ok(())
    }

    fn update(
        &mut self,
        time: &GameTime,
        ctx: &mut ScreenContext<'_>,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        // The theme can change from any handler, so the label is refreshed every tick
        let label = Self::theme_label(ctx.settings().theme);
        if let Some(entry) = self.menu.entries_mut().first_mut() {
            entry.set_text(label);
        }

        self.menu
            .update(time, ctx, other_screen_has_focus, covered_by_other_screen);
    }

    fn handle_input(&mut self, input: &InputState, ctx: &mut ScreenContext<'_>) {
        self.menu.handle_input(input, ctx);
    }

    fn draw(&self, time: &GameTime, ctx: &mut DrawContext<'_>) -> Result<(), String> {
        ctx.fade_back_buffer_to_black(self.core().transition_alpha() * BACKDROP_ALPHA)?;
        self.menu.draw(time, ctx)
    }

    fn to_save_data(&self) -> Result<serde_json::Value, PersistError> {
        self.menu.to_save_data()
    }

    fn restore_save_data(&mut self, data: serde_json::Value) -> Result<(), PersistError> {
        self.menu.restore_save_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::input::{DeviceSnapshot, Key};
    use crate::render::{FixedContent, RecordingRenderer, SharedResources, BLANK_TEXTURE};
    use crate::screen::{GameSettings, ScreenCommand, ScreenId};

    const VIEWPORT: Rect = Rect::new(0, 0, 1280, 720);

    fn loaded_options() -> OptionsMenuScreen {
        let mut screen = OptionsMenuScreen::new();
        let resources = SharedResources::default();
        let mut content = FixedContent::new(160, 50);
        let mut ctx = LoadContext {
            content: &mut content,
            resources: &resources,
            safe_area: VIEWPORT,
        };
        screen.load_content(&mut ctx).unwrap();
        screen
    }

    #[test]
    fn test_theme_entry_cycles_and_label_follows() {
        let mut screen = loaded_options();
        let mut settings = GameSettings::default();
        let mut commands = Vec::new();
        let resources = SharedResources::default();
        let mut input = InputState::new();
        input.update(DeviceSnapshot::with_keys(&[Key::Enter]));

        {
            let mut ctx =
                ScreenContext::new(ScreenId(5), &mut commands, &mut settings, &resources, VIEWPORT);
            screen.handle_input(&input, &mut ctx);
            screen.update(&GameTime::from_secs_f32(0.016), &mut ctx, false, false);
        }

        assert_eq!(settings.theme, Theme::Blue);
        assert_eq!(screen.menu().entries()[0].text(), "Tema: Azul");
        assert!(commands.is_empty());
    }

    #[test]
    fn test_back_entry_exits_popup() {
        let mut screen = loaded_options();
        let mut settings = GameSettings::default();
        let mut commands = Vec::new();
        let resources = SharedResources::default();
        let mut input = InputState::new();

        for keys in [vec![Key::Down], vec![], vec![Key::Enter]] {
            input.update(DeviceSnapshot::with_keys(&keys));
            let mut ctx =
                ScreenContext::new(ScreenId(5), &mut commands, &mut settings, &resources, VIEWPORT);
            screen.handle_input(&input, &mut ctx);
        }

        assert!(matches!(commands.as_slice(), [ScreenCommand::Exit(ScreenId(5))]));
        assert_eq!(settings.theme, Theme::Red);
    }

    #[test]
    fn test_draw_darkens_beneath_first() {
        let screen = loaded_options();
        let resources = SharedResources::default();
        let mut renderer = RecordingRenderer::new(VIEWPORT);
        let mut ctx = DrawContext::new(&mut renderer, &resources);

        screen.draw(&GameTime::default(), &mut ctx).unwrap();

        assert_eq!(renderer.textures[0].0, BLANK_TEXTURE);
        assert_eq!(renderer.textures[0].1, VIEWPORT);
    }
}
