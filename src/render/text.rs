use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::Font;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use super::colors::AppColor;

pub const DEFAULT_FONT: &str = "default";

pub struct TextRenderer {
    fonts: HashMap<String, Font>,
    layout: Layout,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn load_system_font(&mut self, name: &str) -> Result<()> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(windir) = std::env::var("WINDIR") {
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\segoeui.ttf")));
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\arial.ttf")));
        }

        candidates.push(PathBuf::from("C:\\Windows\\Fonts\\segoeui.ttf"));
        candidates.push(PathBuf::from("C:\\Windows\\Fonts\\arial.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"));
        candidates.push(PathBuf::from("/Library/Fonts/Arial.ttf"));

        for path in candidates {
            if self.load_font_from_path(name, &path).is_ok() {
                tracing::info!("Loaded text font from {}", path.display());
                return Ok(());
            }
        }

        Err(anyhow!("unable to load a system font from known locations"))
    }

    /// Load a `.ttf`/`.otf` file under `name`, replacing any font already
    /// registered with that name.
    pub fn load_font_from_path(&mut self, name: &str, path: &Path) -> Result<()> {
        let font_data =
            std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        let font = Font::from_bytes(font_data, fontdue::FontSettings::default())
            .map_err(|e| anyhow!("parsing font {}: {e}", path.display()))?;
        self.fonts.insert(name.to_string(), font);
        Ok(())
    }

    /// Rasterize `text` into tinted RGBA glyph bitmaps.
    ///
    /// Returns `None` when the font is missing or the text has no visible glyphs.
    pub fn render_text(
        &mut self,
        text: &str,
        font_name: &str,
        font_size: f32,
        max_width: Option<f32>,
        color: AppColor,
    ) -> Option<TextRenderResult> {
        let font = self.fonts.get(font_name)?;

        self.layout.reset(&LayoutSettings {
            max_width,
            ..Default::default()
        });
        self.layout
            .append(&[font], &TextStyle::new(text, font_size, 0));

        let [r, g, b] = color.to_rgb8();
        let alpha = color.a.clamp(0.0, 1.0);
        let mut glyphs = Vec::new();
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;

        for glyph in self.layout.glyphs() {
            let right = glyph.x + glyph.width as f32;
            let bottom = glyph.y + glyph.height as f32;
            width = width.max(right);
            height = height.max(bottom);

            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let (metrics, bitmap) = font.rasterize_config(glyph.key);

            // Coverage becomes alpha; the color is constant per run.
            let mut rgba_bitmap = Vec::with_capacity(bitmap.len() * 4);
            for &coverage in &bitmap {
                rgba_bitmap.push(r);
                rgba_bitmap.push(g);
                rgba_bitmap.push(b);
                rgba_bitmap.push((f32::from(coverage) * alpha).round() as u8);
            }

            glyphs.push(TextGlyph {
                x: glyph.x,
                y: glyph.y,
                width: metrics.width,
                height: metrics.height,
                bitmap: rgba_bitmap,
            });
        }

        if glyphs.is_empty() {
            return None;
        }

        Some(TextRenderResult {
            glyphs,
            width: width.ceil() as u32,
            height: height.max(self.layout.height()).ceil() as u32,
        })
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TextRenderResult {
    pub glyphs: Vec<TextGlyph>,
    pub width: u32,
    pub height: u32,
}

pub struct TextGlyph {
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
    pub bitmap: Vec<u8>, // RGBA format
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_renders_nothing() {
        let mut renderer = TextRenderer::new();
        assert!(!renderer.has_font(DEFAULT_FONT));
        assert!(renderer
            .render_text("12", DEFAULT_FONT, 14.0, None, AppColor::new(1.0, 1.0, 1.0))
            .is_none());
    }

    #[test]
    fn unreadable_font_path_is_an_error() {
        let mut renderer = TextRenderer::new();
        let err = renderer
            .load_font_from_path(DEFAULT_FONT, Path::new("/nonexistent/font.ttf"))
            .unwrap_err();
        assert!(err.to_string().contains("reading font"));
        assert!(!renderer.has_font(DEFAULT_FONT));
    }
}
