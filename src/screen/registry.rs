use std::collections::HashMap;

use crate::error::RegistryError;
use crate::screens::{BackgroundScreen, MainMenuScreen, OptionsMenuScreen, SelectCharScreen};

use super::Screen;

/// Builds a default-constructed screen
pub type ScreenConstructor = fn() -> Box<dyn Screen>;

/// Central registry of restorable screen kinds
///
/// Saved state only stores each screen's `kind()`. On restore, this registry
/// is the single source of truth for turning a kind back into a screen.
pub struct ScreenRegistry {
    constructors: HashMap<String, ScreenConstructor>,
}

impl ScreenRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        ScreenRegistry {
            constructors: HashMap::new(),
        }
    }

    /// Creates a registry with every built-in screen pre-registered
    pub fn create_default() -> Self {
        let mut registry = Self::new();
        registry.register_base_screens();
        registry
    }

    /// Registers a constructor for `kind`
    ///
    /// Returns error if the kind is already taken.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        constructor: ScreenConstructor,
    ) -> Result<(), RegistryError> {
        let kind = kind.into();
        if self.constructors.contains_key(&kind) {
            return Err(RegistryError::Duplicate(kind));
        }

        self.constructors.insert(kind, constructor);
        Ok(())
    }

    /// Builds a fresh screen of the given kind
    ///
    /// Returns None if nothing is registered under `kind`.
    pub fn create(&self, kind: &str) -> Option<Box<dyn Screen>> {
        self.constructors.get(kind).map(|constructor| constructor())
    }

    /// Returns true if a constructor exists for `kind`
    pub fn exists(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Returns all registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    // ======================================================================
    // Screen Registration - Base Game Screens
    // ======================================================================

    fn register_base_screens(&mut self) {
        let base: [(&str, ScreenConstructor); 4] = [
            (BackgroundScreen::KIND, || Box::new(BackgroundScreen::new())),
            (MainMenuScreen::KIND, || Box::new(MainMenuScreen::new())),
            (OptionsMenuScreen::KIND, || Box::new(OptionsMenuScreen::new())),
            (SelectCharScreen::KIND, || Box::new(SelectCharScreen::default())),
        ];

        for (kind, constructor) in base {
            if let Err(e) = self.register(kind, constructor) {
                log::error!("Failed to register base screen: {}", e);
            }
        }
    }
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self::create_default()
    }
}
