use vello::peniko::Color;

use crate::ui::panels::PanelKind;

/// Our custom color representation for easy manipulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build from 8-bit sRGB components, e.g. a `#rrggbb` literal.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Convert to vello's peniko Color (AlphaColor<Srgb>).
    pub fn to_peniko(self) -> Color {
        Color::new([self.r, self.g, self.b, self.a])
    }

    /// 8-bit RGB triple, used to tint text bitmaps.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn lighten(self, amount: f32) -> Self {
        Self {
            r: (self.r + amount).min(1.0),
            g: (self.g + amount).min(1.0),
            b: (self.b + amount).min(1.0),
            a: self.a,
        }
    }

    pub fn darken(self, amount: f32) -> Self {
        Self {
            r: (self.r - amount).max(0.0),
            g: (self.g - amount).max(0.0),
            b: (self.b - amount).max(0.0),
            a: self.a,
        }
    }
}

/// Edge, fill and unit-grid colors of one rectangle diagram.
#[derive(Debug, Clone, Copy)]
pub struct DiagramStyle {
    pub edge: AppColor,
    pub fill: AppColor,
    pub grid: AppColor,
}

impl DiagramStyle {
    /// Green palette of the base rectangle.
    pub const ORIGINAL: Self = Self {
        edge: AppColor::rgb8(0x2e, 0x7d, 0x32),
        fill: AppColor::rgb8(0x4c, 0xaf, 0x50).with_alpha(0.7),
        grid: AppColor::rgb8(0x81, 0xc7, 0x84).with_alpha(0.7),
    };

    /// Blue palette of the scaled rectangle.
    pub const SCALED: Self = Self {
        edge: AppColor::rgb8(0x15, 0x65, 0xc0),
        fill: AppColor::rgb8(0x21, 0x96, 0xf3).with_alpha(0.7),
        grid: AppColor::rgb8(0x64, 0xb5, 0xf6).with_alpha(0.7),
    };
}

pub const TILE_EDGE: AppColor = AppColor::rgb8(0x33, 0x33, 0x33);
pub const TILE_LABEL_BG: AppColor = AppColor::new(0.0, 0.0, 0.0).with_alpha(0.7);
pub const TILE_FILL_ALPHA: f32 = 0.6;

// Figure and page chrome.
pub const PAGE_BG: AppColor = AppColor::rgb8(0x0e, 0x11, 0x17);
pub const WHITE: AppColor = AppColor::new(1.0, 1.0, 1.0);
pub const FIGURE_BG: AppColor = WHITE;
pub const AXIS_FRAME: AppColor = AppColor::new(0.0, 0.0, 0.0);
pub const AXIS_GRID: AppColor = AppColor::rgb8(0xb0, 0xb0, 0xb0).with_alpha(0.3);
pub const AXIS_TEXT: AppColor = AppColor::rgb8(0x26, 0x26, 0x26);
pub const TEXT: AppColor = AppColor::rgb8(0xfa, 0xfa, 0xfa);
pub const TEXT_MUTED: AppColor = AppColor::rgb8(0xa3, 0xa8, 0xb8);
pub const SEPARATOR: AppColor = AppColor::rgb8(0x3d, 0x41, 0x4a);

/// Matplotlib's Set3 qualitative palette.
pub const SET3: [AppColor; 12] = [
    AppColor::rgb8(0x8d, 0xd3, 0xc7),
    AppColor::rgb8(0xff, 0xff, 0xb3),
    AppColor::rgb8(0xbe, 0xba, 0xda),
    AppColor::rgb8(0xfb, 0x80, 0x72),
    AppColor::rgb8(0x80, 0xb1, 0xd3),
    AppColor::rgb8(0xfd, 0xb4, 0x62),
    AppColor::rgb8(0xb3, 0xde, 0x69),
    AppColor::rgb8(0xfc, 0xcd, 0xe5),
    AppColor::rgb8(0xd9, 0xd9, 0xd9),
    AppColor::rgb8(0xbc, 0x80, 0xbd),
    AppColor::rgb8(0xcc, 0xeb, 0xc5),
    AppColor::rgb8(0xff, 0xed, 0x6f),
];

/// Fill of tile `index` (0-based) out of `count`, before the fill alpha.
///
/// Up to twelve tiles sample Set3 evenly across its range. Beyond that the
/// palette cycles and each further lap is darkened so no two tiles match.
pub fn tile_color(index: usize, count: usize) -> AppColor {
    let n = SET3.len();
    if count <= n {
        let t = if count <= 1 {
            0.0
        } else {
            index as f64 / (count - 1) as f64
        };
        let slot = ((t * n as f64).floor() as usize).min(n - 1);
        SET3[slot]
    } else {
        let lap = index / n;
        SET3[index % n].darken(0.12 * lap as f32)
    }
}

/// Background and accent of a text panel.
pub fn panel_colors(kind: PanelKind) -> (AppColor, AppColor) {
    match kind {
        PanelKind::Info => (
            AppColor::rgb8(0x17, 0x2d, 0x43),
            AppColor::rgb8(0x3d, 0x9d, 0xf3),
        ),
        PanelKind::Success => (
            AppColor::rgb8(0x17, 0x3a, 0x28),
            AppColor::rgb8(0x21, 0xc3, 0x54),
        ),
        PanelKind::Warning => (
            AppColor::rgb8(0x3d, 0x37, 0x16),
            AppColor::rgb8(0xff, 0xd1, 0x6a),
        ),
        PanelKind::Plain => (
            AppColor::rgb8(0x16, 0x19, 0x21),
            AppColor::rgb8(0x3d, 0x41, 0x4a),
        ),
    }
}
