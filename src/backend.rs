//! SDL2 backend
//!
//! Implements the rendering and content seams on top of an SDL2 canvas, and
//! turns SDL's keyboard and mouse state into a [`DeviceSnapshot`].
//!
//! Textures are resolved as `<content_root>/<asset>.png`. A missing file is
//! not fatal: its descriptor gets a placeholder size and drawing it falls
//! back to a tinted filled rectangle.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use sdl2::EventPump;
use sdl2::image::{LoadSurface, LoadTexture};
use sdl2::keyboard::Scancode;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{Window, WindowContext};

use crate::error::ContentError;
use crate::geometry::{Color, Rect};
use crate::input::{ButtonState, DeviceSnapshot, Key, PointerState};
use crate::render::{ContentSource, Renderer, SharedResources, TextureAsset};

const KEY_BINDINGS: [(Scancode, Key); 8] = [
    (Scancode::Up, Key::Up),
    (Scancode::Down, Key::Down),
    (Scancode::Left, Key::Left),
    (Scancode::Right, Key::Right),
    (Scancode::Return, Key::Enter),
    (Scancode::Space, Key::Space),
    (Scancode::Escape, Key::Escape),
    (Scancode::Backspace, Key::Back),
];

fn asset_path(content_root: &Path, asset: &str) -> PathBuf {
    content_root.join(format!("{}.png", asset))
}

fn to_sdl_rect(rect: Rect) -> SdlRect {
    SdlRect::new(rect.x, rect.y, rect.width, rect.height)
}

fn to_sdl_color(color: Color) -> SdlColor {
    SdlColor::RGBA(color.r, color.g, color.b, color.a)
}

/// Reads the current keyboard and mouse state
pub fn poll_devices(event_pump: &EventPump) -> DeviceSnapshot {
    let keyboard = event_pump.keyboard_state();
    let keys = KEY_BINDINGS
        .iter()
        .filter(|(scancode, _)| keyboard.is_scancode_pressed(*scancode))
        .map(|(_, key)| *key)
        .collect();

    let mouse = event_pump.mouse_state();
    let left_button = if mouse.left() {
        ButtonState::Pressed
    } else {
        ButtonState::Released
    };

    DeviceSnapshot {
        keys,
        pointer: PointerState {
            x: mouse.x(),
            y: mouse.y(),
            left_button,
        },
    }
}

/// Content source that reads image headers from disk
pub struct SurfaceContent {
    content_root: PathBuf,
}

impl SurfaceContent {
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        SurfaceContent {
            content_root: content_root.into(),
        }
    }

    /// Size used when an image can't be read
    fn placeholder(asset: &str) -> TextureAsset {
        let defaults = SharedResources::default();
        [defaults.blank, defaults.button_background, defaults.select_border]
            .into_iter()
            .find(|texture| texture.name == asset)
            .unwrap_or_else(|| TextureAsset::new(asset, 1, 1))
    }
}

impl ContentSource for SurfaceContent {
    fn load_texture(&mut self, asset: &str) -> Result<TextureAsset, ContentError> {
        let path = asset_path(&self.content_root, asset);
        match Surface::from_file(&path) {
            Ok(surface) => Ok(TextureAsset::new(asset, surface.width(), surface.height())),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Ok(Self::placeholder(asset))
            }
        }
    }
}

/// Renderer over an SDL2 window canvas
///
/// GPU textures are created the first time a name is drawn and kept until
/// the renderer is dropped.
pub struct SdlRenderer<'a> {
    canvas: Canvas<Window>,
    texture_creator: &'a TextureCreator<WindowContext>,
    content_root: PathBuf,
    textures: HashMap<String, Texture<'a>>,
    missing: HashSet<String>,
}

impl<'a> SdlRenderer<'a> {
    pub fn new(
        canvas: Canvas<Window>,
        texture_creator: &'a TextureCreator<WindowContext>,
        content_root: impl Into<PathBuf>,
    ) -> Self {
        SdlRenderer {
            canvas,
            texture_creator,
            content_root: content_root.into(),
            textures: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    pub fn clear(&mut self) {
        self.canvas.set_draw_color(SdlColor::RGB(0, 0, 0));
        self.canvas.clear();
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    fn ensure_loaded(&mut self, name: &str) {
        if self.textures.contains_key(name) || self.missing.contains(name) {
            return;
        }

        let path = asset_path(&self.content_root, name);
        match self.texture_creator.load_texture(&path) {
            Ok(mut texture) => {
                texture.set_blend_mode(BlendMode::Blend);
                self.textures.insert(name.to_string(), texture);
            }
            Err(e) => {
                log::warn!("Texture {} unavailable, drawing placeholder: {}", name, e);
                self.missing.insert(name.to_string());
            }
        }
    }
}

impl Renderer for SdlRenderer<'_> {
    fn viewport(&self) -> Rect {
        let viewport = self.canvas.viewport();
        Rect::new(viewport.x(), viewport.y(), viewport.width(), viewport.height())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        if rect.width == 0 || rect.height == 0 {
            return Ok(());
        }
        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(to_sdl_color(color));
        self.canvas.fill_rect(to_sdl_rect(rect))
    }

    fn draw_texture(
        &mut self,
        texture: &TextureAsset,
        dest: Rect,
        tint: Color,
    ) -> Result<(), String> {
        if dest.width == 0 || dest.height == 0 {
            return Ok(());
        }

        self.ensure_loaded(&texture.name);
        if let Some(sdl_texture) = self.textures.get_mut(&texture.name) {
            sdl_texture.set_color_mod(tint.r, tint.g, tint.b);
            sdl_texture.set_alpha_mod(tint.a);
            return self.canvas.copy(sdl_texture, None, to_sdl_rect(dest));
        }

        self.fill_rect(dest, tint)
    }
}
