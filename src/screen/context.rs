//! What a screen can see and ask for while it runs
//!
//! Screens never hold a reference to the manager. Instead every update and
//! input call receives a [`ScreenContext`]: read access to shared resources
//! and settings, plus a queue of [`ScreenCommand`]s the manager applies as
//! soon as the call returns.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::input::PlayerIndex;
use crate::render::{ContentSource, SharedResources};

use super::Screen;

/// Stable handle to a screen on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u64);

/// Requests a screen can make of the manager
pub enum ScreenCommand {
    Add {
        screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    },
    Exit(ScreenId),
    ExitAll,
    Quit,
}

impl std::fmt::Debug for ScreenCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenCommand::Add { screen, controlling_player } => f
                .debug_struct("Add")
                .field("kind", &screen.kind())
                .field("controlling_player", controlling_player)
                .finish(),
            ScreenCommand::Exit(id) => f.debug_tuple("Exit").field(id).finish(),
            ScreenCommand::ExitAll => f.write_str("ExitAll"),
            ScreenCommand::Quit => f.write_str("Quit"),
        }
    }
}

/// Color theme picked in the options menu and carried into character select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Red,
    Blue,
    Green,
}

impl Theme {
    pub fn next(self) -> Theme {
        match self {
            Theme::Red => Theme::Blue,
            Theme::Blue => Theme::Green,
            Theme::Green => Theme::Red,
        }
    }

    /// Display name shown in menus
    pub fn label(self) -> &'static str {
        match self {
            Theme::Red => "Rojo",
            Theme::Blue => "Azul",
            Theme::Green => "Verde",
        }
    }
}

/// Game-wide settings screens can read and change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSettings {
    pub theme: Theme,
}

/// Handed to `Screen::update` and `Screen::handle_input`
pub struct ScreenContext<'a> {
    id: ScreenId,
    commands: &'a mut Vec<ScreenCommand>,
    settings: &'a mut GameSettings,
    resources: &'a SharedResources,
    safe_area: Rect,
}

impl<'a> ScreenContext<'a> {
    pub fn new(
        id: ScreenId,
        commands: &'a mut Vec<ScreenCommand>,
        settings: &'a mut GameSettings,
        resources: &'a SharedResources,
        safe_area: Rect,
    ) -> Self {
        ScreenContext {
            id,
            commands,
            settings,
            resources,
            safe_area,
        }
    }

    /// Id of the screen currently being called
    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn resources(&self) -> &SharedResources {
        self.resources
    }

    pub fn safe_area(&self) -> Rect {
        self.safe_area
    }

    pub fn settings(&self) -> &GameSettings {
        self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GameSettings {
        self.settings
    }

    /// Pushes a new screen on top of the stack
    pub fn add_screen(&mut self, screen: Box<dyn Screen>, controlling_player: Option<PlayerIndex>) {
        self.commands.push(ScreenCommand::Add {
            screen,
            controlling_player,
        });
    }

    /// Exits the screen currently being called
    pub fn exit_screen(&mut self) {
        self.commands.push(ScreenCommand::Exit(self.id));
    }

    /// Exits every screen on the stack, this one included
    pub fn exit_all_screens(&mut self) {
        self.commands.push(ScreenCommand::ExitAll);
    }

    /// Asks the host to shut the game down
    pub fn quit(&mut self) {
        self.commands.push(ScreenCommand::Quit);
    }
}

/// Handed to `Screen::load_content`
pub struct LoadContext<'a> {
    pub content: &'a mut dyn ContentSource,
    pub resources: &'a SharedResources,
    pub safe_area: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycles_back_to_red() {
        let mut theme = Theme::default();
        assert_eq!(theme, Theme::Red);

        for _ in 0..3 {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Red);
        assert_eq!(Theme::Blue.label(), "Azul");
    }

    #[test]
    fn test_context_queues_commands_in_order() {
        let mut commands = Vec::new();
        let mut settings = GameSettings::default();
        let resources = SharedResources::default();
        let mut ctx = ScreenContext::new(
            ScreenId(7),
            &mut commands,
            &mut settings,
            &resources,
            Rect::new(0, 0, 800, 600),
        );

        ctx.exit_screen();
        ctx.exit_all_screens();
        ctx.quit();
        ctx.settings_mut().theme = Theme::Green;

        assert!(matches!(commands[0], ScreenCommand::Exit(ScreenId(7))));
        assert!(matches!(commands[1], ScreenCommand::ExitAll));
        assert!(matches!(commands[2], ScreenCommand::Quit));
        assert_eq!(settings.theme, Theme::Green);
    }
}
