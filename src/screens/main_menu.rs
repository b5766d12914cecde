use crate::error::{ContentError, PersistError};
use crate::gui::{MenuEntry, MenuScreen};
use crate::input::InputState;
use crate::render::DrawContext;
use crate::screen::{GameTime, LoadContext, Screen, ScreenContext, ScreenCore};

use super::{OptionsMenuScreen, SelectCharScreen};

/// The title menu: play, options, quit
pub struct MainMenuScreen {
    menu: MenuScreen,
}

impl MainMenuScreen {
    pub const KIND: &'static str = "main_menu";

    pub fn new() -> Self {
        let mut menu = MenuScreen::new("");
        // Backing out of the main menu leaves the game
        menu.set_on_cancel(|ctx, _| ctx.quit());
        MainMenuScreen { menu }
    }

    pub fn menu(&self) -> &MenuScreen {
        &self.menu
    }

    fn build_entries() -> Vec<MenuEntry> {
        vec![
            MenuEntry::with_handler("Jugar", |ctx, _| {
                let theme = ctx.settings().theme;
                ctx.exit_all_screens();
                ctx.add_screen(Box::new(SelectCharScreen::new(theme)), None);
            }),
            MenuEntry::with_handler("Opciones", |ctx, player| {
                ctx.add_screen(Box::new(OptionsMenuScreen::new()), Some(player));
            }),
            MenuEntry::with_handler("Salir", |ctx, _| ctx.quit()),
        ]
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
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
            self.menu.set_entries(Self::build_entries());
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
        self.menu
            .update(time, ctx, other_screen_has_focus, covered_by_other_screen);
    }

    fn handle_input(&mut self, input: &InputState, ctx: &mut ScreenContext<'_>) {
        self.menu.handle_input(input, ctx);
    }

    fn draw(&self, time: &GameTime, ctx: &mut DrawContext<'_>) -> Result<(), String> {
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
    use crate::input::{DeviceSnapshot, Key, PlayerIndex};
    use crate::render::{FixedContent, SharedResources};
    use crate::screen::{GameSettings, ScreenCommand, ScreenId, Theme};

    fn loaded_menu() -> MainMenuScreen {
        let mut screen = MainMenuScreen::new();
        let resources = SharedResources::default();
        let mut content = FixedContent::new(160, 50);
        let mut ctx = LoadContext {
            content: &mut content,
            resources: &resources,
            safe_area: Rect::new(0, 0, 1280, 720),
        };
        screen.load_content(&mut ctx).unwrap();
        screen
    }

    fn press_keys(
        screen: &mut MainMenuScreen,
        settings: &mut GameSettings,
        keys: &[Key],
    ) -> Vec<ScreenCommand> {
        let mut commands = Vec::new();
        let resources = SharedResources::default();
        let mut input = InputState::new();
        for key in keys {
            input.update(DeviceSnapshot::with_keys(&[*key]));
            let mut ctx = ScreenContext::new(
                ScreenId(3),
                &mut commands,
                settings,
                &resources,
                Rect::new(0, 0, 1280, 720),
            );
            screen.handle_input(&input, &mut ctx);
            input.update(DeviceSnapshot::new());
        }
        commands
    }

    #[test]
    fn test_entries_populated_once() {
        let mut screen = loaded_menu();
        let resources = SharedResources::default();
        let mut content = FixedContent::new(160, 50);
        let mut ctx = LoadContext {
            content: &mut content,
            resources: &resources,
            safe_area: Rect::new(0, 0, 1280, 720),
        };
        screen.load_content(&mut ctx).unwrap();

        let labels: Vec<&str> = screen.menu().entries().iter().map(|e| e.text()).collect();
        assert_eq!(labels, vec!["Jugar", "Opciones", "Salir"]);
    }

    #[test]
    fn test_play_exits_everything_and_opens_character_select() {
        let mut screen = loaded_menu();
        let mut settings = GameSettings { theme: Theme::Green };

        let commands = press_keys(&mut screen, &mut settings, &[Key::Enter]);

        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], ScreenCommand::ExitAll));
        match &commands[1] {
            ScreenCommand::Add { screen, controlling_player } => {
                assert_eq!(screen.kind(), SelectCharScreen::KIND);
                assert_eq!(*controlling_player, None);
                assert_eq!(
                    screen.to_save_data().unwrap(),
                    serde_json::json!({ "theme": "Green" })
                );
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_options_opens_popup_for_selecting_player() {
        let mut screen = loaded_menu();
        let mut settings = GameSettings::default();

        let commands = press_keys(&mut screen, &mut settings, &[Key::Down, Key::Space]);

        match commands.as_slice() {
            [ScreenCommand::Add { screen, controlling_player }] => {
                assert_eq!(screen.kind(), OptionsMenuScreen::KIND);
                assert!(screen.core().is_popup());
                assert_eq!(*controlling_player, Some(PlayerIndex::One));
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn test_exit_entry_and_cancel_quit() {
        let mut screen = loaded_menu();
        let mut settings = GameSettings::default();

        let commands = press_keys(&mut screen, &mut settings, &[Key::Up, Key::Enter, Key::Escape]);

        assert!(matches!(
            commands.as_slice(),
            [ScreenCommand::Quit, ScreenCommand::Quit]
        ));
    }
}
