//! Rendering and content seams
//!
//! Screens never talk to the graphics backend directly. They draw through the
//! [`Renderer`] trait and receive texture descriptors from a [`ContentSource`].
//! The SDL2 host implements both (see `backend`), tests use recording fakes.
//!
//! # Architecture
//!
//! - `Renderer`: viewport query plus two primitives (filled rect, textured rect)
//! - `ContentSource`: resolves an asset name to a [`TextureAsset`] descriptor
//! - `SharedResources`: font and textures loaded once by the screen manager
//! - `DrawContext`: what a screen's `draw` receives each frame

use crate::error::ContentError;
use crate::geometry::{Color, Rect};
use crate::text::BitmapFont;

/// Asset names of the textures every screen can use
pub const BLANK_TEXTURE: &str = "images/blank";
pub const BUTTON_BACKGROUND_TEXTURE: &str = "images/button_regular";
pub const SELECT_BORDER_TEXTURE: &str = "images/select_border";

/// Drawing primitives a backend must provide
pub trait Renderer {
    /// Full drawable area in pixels
    fn viewport(&self) -> Rect;

    /// Fill a rectangle with a (possibly translucent) color
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    /// Stretch a texture over `dest`, modulated by `tint`
    fn draw_texture(&mut self, texture: &TextureAsset, dest: Rect, tint: Color)
        -> Result<(), String>;
}

/// Descriptor of a loaded texture
///
/// The backend owns the pixels; screens only need the name (to draw it) and
/// the size (for layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAsset {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl TextureAsset {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        TextureAsset {
            name: name.into(),
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Resolves asset names to texture descriptors
pub trait ContentSource {
    fn load_texture(&mut self, asset: &str) -> Result<TextureAsset, ContentError>;
}

/// Resources loaded once by the screen manager and lent to every screen
#[derive(Debug, Clone)]
pub struct SharedResources {
    pub font: BitmapFont,
    pub blank: TextureAsset,
    pub button_background: TextureAsset,
    pub select_border: TextureAsset,
}

impl SharedResources {
    /// Loads every shared texture from the content source
    pub fn load(content: &mut dyn ContentSource) -> Result<Self, ContentError> {
        Ok(SharedResources {
            font: BitmapFont::default(),
            blank: content.load_texture(BLANK_TEXTURE)?,
            button_background: content.load_texture(BUTTON_BACKGROUND_TEXTURE)?,
            select_border: content.load_texture(SELECT_BORDER_TEXTURE)?,
        })
    }
}

impl Default for SharedResources {
    /// Placeholder descriptors used before `initialize` has run
    fn default() -> Self {
        SharedResources {
            font: BitmapFont::default(),
            blank: TextureAsset::new(BLANK_TEXTURE, 1, 1),
            button_background: TextureAsset::new(BUTTON_BACKGROUND_TEXTURE, 160, 50),
            select_border: TextureAsset::new(SELECT_BORDER_TEXTURE, 160, 50),
        }
    }
}

/// Everything a screen needs while drawing one frame
pub struct DrawContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub resources: &'a SharedResources,
}

impl<'a> DrawContext<'a> {
    pub fn new(renderer: &'a mut dyn Renderer, resources: &'a SharedResources) -> Self {
        DrawContext { renderer, resources }
    }

    pub fn viewport(&self) -> Rect {
        self.renderer.viewport()
    }

    /// Draws a translucent black fullscreen rectangle
    ///
    /// Used for fading screens in and out, and for darkening what lies
    /// beneath popups.
    pub fn fade_back_buffer_to_black(&mut self, alpha: f32) -> Result<(), String> {
        let viewport = self.renderer.viewport();
        let tint = Color::BLACK.scaled(alpha);
        self.renderer
            .draw_texture(&self.resources.blank, viewport, tint)
    }
}

/// Renderer that records every call, for tests
#[cfg(test)]
pub struct RecordingRenderer {
    pub viewport: Rect,
    pub fills: Vec<(Rect, Color)>,
    pub textures: Vec<(String, Rect, Color)>,
}

#[cfg(test)]
impl RecordingRenderer {
    pub fn new(viewport: Rect) -> Self {
        RecordingRenderer {
            viewport,
            fills: Vec::new(),
            textures: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Renderer for RecordingRenderer {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.fills.push((rect, color));
        Ok(())
    }

    fn draw_texture(
        &mut self,
        texture: &TextureAsset,
        dest: Rect,
        tint: Color,
    ) -> Result<(), String> {
        self.textures.push((texture.name.clone(), dest, tint));
        Ok(())
    }
}

/// Content source that hands out fixed-size descriptors, for tests
#[cfg(test)]
pub struct FixedContent {
    pub width: u32,
    pub height: u32,
    pub loaded: Vec<String>,
}

#[cfg(test)]
impl FixedContent {
    pub fn new(width: u32, height: u32) -> Self {
        FixedContent {
            width,
            height,
            loaded: Vec::new(),
        }
    }
}

#[cfg(test)]
impl ContentSource for FixedContent {
    fn load_texture(&mut self, asset: &str) -> Result<TextureAsset, ContentError> {
        self.loaded.push(asset.to_string());
        Ok(TextureAsset::new(asset, self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MissingContent;

    impl ContentSource for MissingContent {
        fn load_texture(&mut self, asset: &str) -> Result<TextureAsset, ContentError> {
            Err(ContentError::NotFound(asset.to_string()))
        }
    }

    #[test]
    fn test_shared_resources_load_all_textures() {
        let mut content = FixedContent::new(120, 40);
        let resources = SharedResources::load(&mut content).unwrap();

        assert_eq!(
            content.loaded,
            vec![BLANK_TEXTURE, BUTTON_BACKGROUND_TEXTURE, SELECT_BORDER_TEXTURE]
        );
        assert_eq!(resources.button_background.bounds(), Rect::new(0, 0, 120, 40));
    }

    #[test]
    fn test_shared_resources_propagate_missing_asset() {
        let result = SharedResources::load(&mut MissingContent);
        assert!(matches!(result, Err(ContentError::NotFound(name)) if name == BLANK_TEXTURE));
    }

    #[test]
    fn test_fade_back_buffer_covers_viewport() {
        let resources = SharedResources::default();
        let mut renderer = RecordingRenderer::new(Rect::new(0, 0, 1280, 720));
        let mut ctx = DrawContext::new(&mut renderer, &resources);

        ctx.fade_back_buffer_to_black(0.5).unwrap();

        assert_eq!(renderer.textures.len(), 1);
        let (name, dest, tint) = &renderer.textures[0];
        assert_eq!(name, BLANK_TEXTURE);
        assert_eq!(*dest, Rect::new(0, 0, 1280, 720));
        assert_eq!(tint.a, 128);
    }
}
