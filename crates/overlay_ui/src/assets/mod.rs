//! Host content access
//!
//! Textures, fonts, and sounds are owned by the host engine's content
//! pipeline; the toolkit only ever holds opaque handles, fetched by name.
//! Everything behind these traits is immutable after load, so handles may be
//! copied freely and cached without invalidation concerns.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::foundation::math::Vec2;

/// Handle to a texture owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Handle to a bitmap font owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// Content lookup and measurement provided by the host
pub trait ContentProvider {
    /// Resolve a texture by name; `None` when the asset is missing
    fn texture(&self, name: &str) -> Option<TextureHandle>;

    /// Pixel dimensions of a loaded texture
    fn texture_size(&self, texture: TextureHandle) -> Vec2;

    /// Resolve a font by name; `None` when the asset is missing
    fn font(&self, name: &str) -> Option<FontHandle>;

    /// Measure the pixel extent of a text run in a font
    fn measure_text(&self, font: FontHandle, text: &str) -> Vec2;

    /// Line height of a font in pixels
    fn line_height(&self, font: FontHandle) -> f32;

    /// Fire-and-forget playback of a named sound effect
    fn play_sound(&self, name: &str);
}

/// Headless content stand-in
///
/// Resolves every texture and font to a fixed handle with deterministic
/// metrics (8x16 px glyphs), and swallows sound playback. Used by tests and
/// the demo application.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullContent;

impl ContentProvider for NullContent {
    fn texture(&self, _name: &str) -> Option<TextureHandle> {
        Some(TextureHandle(0))
    }

    fn texture_size(&self, _texture: TextureHandle) -> Vec2 {
        Vec2::new(64.0, 64.0)
    }

    fn font(&self, _name: &str) -> Option<FontHandle> {
        Some(FontHandle(0))
    }

    fn measure_text(&self, _font: FontHandle, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * 8.0, 16.0)
    }

    fn line_height(&self, _font: FontHandle) -> f32 {
        16.0
    }

    fn play_sound(&self, name: &str) {
        log::trace!("sound playback skipped (headless): {name}");
    }
}

/// Memoizing layer over a raw content source
///
/// Name lookups hit the host once; misses are remembered too, so a missing
/// asset is logged a single time instead of every frame.
pub struct ContentCache<P> {
    source: P,
    textures: RefCell<HashMap<String, Option<TextureHandle>>>,
    fonts: RefCell<HashMap<String, Option<FontHandle>>>,
}

impl<P: ContentProvider> ContentCache<P> {
    /// Wrap a content source
    pub fn new(source: P) -> Self {
        Self {
            source,
            textures: RefCell::new(HashMap::new()),
            fonts: RefCell::new(HashMap::new()),
        }
    }

    /// The wrapped source
    pub fn source(&self) -> &P {
        &self.source
    }
}

impl<P: ContentProvider> ContentProvider for ContentCache<P> {
    fn texture(&self, name: &str) -> Option<TextureHandle> {
        if let Some(cached) = self.textures.borrow().get(name) {
            return *cached;
        }
        let resolved = self.source.texture(name);
        if resolved.is_none() {
            log::warn!("texture not found: {name}");
        }
        self.textures.borrow_mut().insert(name.to_owned(), resolved);
        resolved
    }

    fn texture_size(&self, texture: TextureHandle) -> Vec2 {
        self.source.texture_size(texture)
    }

    fn font(&self, name: &str) -> Option<FontHandle> {
        if let Some(cached) = self.fonts.borrow().get(name) {
            return *cached;
        }
        let resolved = self.source.font(name);
        if resolved.is_none() {
            log::warn!("font not found: {name}");
        }
        self.fonts.borrow_mut().insert(name.to_owned(), resolved);
        resolved
    }

    fn measure_text(&self, font: FontHandle, text: &str) -> Vec2 {
        self.source.measure_text(font, text)
    }

    fn line_height(&self, font: FontHandle) -> f32 {
        self.source.line_height(font)
    }

    fn play_sound(&self, name: &str) {
        self.source.play_sound(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        lookups: Cell<usize>,
    }

    impl ContentProvider for CountingSource {
        fn texture(&self, name: &str) -> Option<TextureHandle> {
            self.lookups.set(self.lookups.get() + 1);
            (name != "missing").then_some(TextureHandle(7))
        }

        fn texture_size(&self, _texture: TextureHandle) -> Vec2 {
            Vec2::new(32.0, 32.0)
        }

        fn font(&self, _name: &str) -> Option<FontHandle> {
            Some(FontHandle(1))
        }

        fn measure_text(&self, _font: FontHandle, _text: &str) -> Vec2 {
            Vec2::zeros()
        }

        fn line_height(&self, _font: FontHandle) -> f32 {
            0.0
        }

        fn play_sound(&self, _name: &str) {}
    }

    #[test]
    fn test_cache_hits_source_once_per_name() {
        let cache = ContentCache::new(CountingSource {
            lookups: Cell::new(0),
        });

        assert_eq!(cache.texture("icon"), Some(TextureHandle(7)));
        assert_eq!(cache.texture("icon"), Some(TextureHandle(7)));
        assert_eq!(cache.source().lookups.get(), 1);

        // Misses are remembered too
        assert_eq!(cache.texture("missing"), None);
        assert_eq!(cache.texture("missing"), None);
        assert_eq!(cache.source().lookups.get(), 2);
    }
}
