use vello::kurbo::{Affine, Circle, Rect, RoundedRect};
use vello::peniko::Fill;
use vello::Scene;

use crate::geometry::SliderConfig;
use crate::layout::LayoutRect;
use crate::render::colors::{self, AppColor};
use crate::render::scene::{draw_label, draw_label_centered, draw_text, fill_rect};
use crate::render::text::{TextRenderer, DEFAULT_FONT};
use crate::ui::panels::format_factor;

pub const SCALE_LABEL: &str = "Scale Factor";
pub const SCALE_HELP: &str = "How much to scale the original shape";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarHitId {
    ScaleDown,
    ScaleUp,
    ScaleTrack,
    OpenSettings,
}

#[derive(Debug, Clone, Copy)]
pub struct SidebarHitRegion {
    pub id: SidebarHitId,
    pub bounds: [f32; 4],
}

/// Placement of the sidebar controls, derived from the sidebar rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarControls {
    pub panel: LayoutRect,
    pub header: LayoutRect,
    pub label: LayoutRect,
    pub minus: LayoutRect,
    pub track: LayoutRect,
    pub plus: LayoutRect,
    pub range_labels: LayoutRect,
    pub help: LayoutRect,
    pub settings: LayoutRect,
    pub hints: LayoutRect,
}

impl SidebarControls {
    pub fn new(sidebar: LayoutRect) -> Self {
        let panel = sidebar.inset(8.0);
        let x = panel.x + 12.0;
        let w = panel.w - 24.0;
        let mut y = panel.y + 12.0;

        let header = LayoutRect::new(x, y, w, 30.0);
        y += 42.0;
        let label = LayoutRect::new(x, y, w, 22.0);
        y += 30.0;
        let button = 28.0;
        let minus = LayoutRect::new(x, y, button, button);
        let plus = LayoutRect::new(x + w - button, y, button, button);
        let track = LayoutRect::new(x + button + 12.0, y, (w - 2.0 * button - 24.0).max(8.0), button);
        y += button + 4.0;
        let range_labels = LayoutRect::new(track.x, y, track.w, 18.0);
        y += 28.0;
        let help = LayoutRect::new(x, y, w, 40.0);
        y += 56.0;
        let settings = LayoutRect::new(x, y, w, 30.0);
        y += 42.0;
        let hints = LayoutRect::new(x, y, w, 60.0);

        Self {
            panel,
            header,
            label,
            minus,
            track,
            plus,
            range_labels,
            help,
            settings,
            hints,
        }
    }

    pub fn hit_regions(&self) -> Vec<SidebarHitRegion> {
        vec![
            SidebarHitRegion {
                id: SidebarHitId::ScaleDown,
                bounds: self.minus.bounds(),
            },
            SidebarHitRegion {
                id: SidebarHitId::ScaleUp,
                bounds: self.plus.bounds(),
            },
            SidebarHitRegion {
                id: SidebarHitId::ScaleTrack,
                bounds: self.track.bounds(),
            },
            SidebarHitRegion {
                id: SidebarHitId::OpenSettings,
                bounds: self.settings.bounds(),
            },
        ]
    }
}

/// Slider value under cursor position `x` on `track`, snapped to the step grid.
pub fn scale_value_from_track_x(x: f32, track: [f32; 4], slider: &SliderConfig) -> f64 {
    let t = ((x - track[0]) / (track[2] - track[0]).max(1.0)).clamp(0.0, 1.0);
    slider.value_at(f64::from(t))
}

/// Draw the control sidebar and return its clickable regions.
pub fn render_sidebar(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    sidebar: LayoutRect,
    scale_factor: f64,
    slider: &SliderConfig,
    hover: Option<SidebarHitId>,
) -> Vec<SidebarHitRegion> {
    let controls = SidebarControls::new(sidebar);

    fill_rect(scene, sidebar.bounds().map(f64::from), AppColor::rgb8(0x16, 0x19, 0x21));
    fill_rounded(scene, controls.panel, 8.0, AppColor::new(0.10, 0.11, 0.13).with_alpha(0.86));

    draw_label(scene, text_renderer, "Controls", controls.header, 20.0, colors::TEXT);

    draw_label(scene, text_renderer, SCALE_LABEL, controls.label, 14.0, colors::TEXT);
    let value_text = format_factor(scale_factor);
    if let Some(rendered) = text_renderer.render_text(&value_text, DEFAULT_FONT, 14.0, None, colors::TEXT) {
        let x = controls.label.right() - rendered.width as f32;
        let y = controls.label.y + ((controls.label.h - rendered.height as f32) * 0.5).max(0.0);
        draw_text(scene, rendered, x, y);
    }

    for (id, rect, glyph) in [
        (SidebarHitId::ScaleDown, controls.minus, "-"),
        (SidebarHitId::ScaleUp, controls.plus, "+"),
    ] {
        fill_rounded(scene, rect, 4.0, button_color(hover == Some(id)));
        draw_label_centered(
            scene,
            text_renderer,
            glyph,
            rect.x + rect.w * 0.5,
            rect.y + rect.h * 0.5,
            16.0,
            colors::TEXT,
        );
    }

    // Track with step ticks, filled part and thumb.
    let track = controls.track;
    let mid_y = f64::from(track.y + track.h * 0.5);
    let rail = Rect::new(
        f64::from(track.x),
        mid_y - 2.0,
        f64::from(track.right()),
        mid_y + 2.0,
    );
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        AppColor::new(0.20, 0.22, 0.26).to_peniko(),
        None,
        &rail,
    );
    let t = slider.fraction(scale_factor) as f32;
    let thumb_x = f64::from(track.x + track.w * t);
    let filled = Rect::new(f64::from(track.x), mid_y - 2.0, thumb_x, mid_y + 2.0);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        AppColor::rgb8(0xff, 0x4b, 0x4b).to_peniko(),
        None,
        &filled,
    );
    for value in slider.values() {
        let x = f64::from(track.x + track.w * slider.fraction(value) as f32);
        fill_rect(
            scene,
            [x - 0.5, mid_y + 5.0, x + 0.5, mid_y + 9.0],
            colors::TEXT_MUTED,
        );
    }
    let thumb_color = if hover == Some(SidebarHitId::ScaleTrack) {
        AppColor::rgb8(0xff, 0x4b, 0x4b).lighten(0.15)
    } else {
        AppColor::rgb8(0xff, 0x4b, 0x4b)
    };
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        thumb_color.to_peniko(),
        None,
        &Circle::new((thumb_x, mid_y), 7.0),
    );

    let range = controls.range_labels;
    draw_label(
        scene,
        text_renderer,
        &format_factor(slider.min),
        range,
        12.0,
        colors::TEXT_MUTED,
    );
    if let Some(rendered) = text_renderer.render_text(
        &format_factor(slider.max),
        DEFAULT_FONT,
        12.0,
        None,
        colors::TEXT_MUTED,
    ) {
        let x = range.right() - rendered.width as f32;
        draw_text(scene, rendered, x, range.y);
    }

    draw_label(scene, text_renderer, SCALE_HELP, controls.help, 13.0, colors::TEXT_MUTED);

    fill_rounded(
        scene,
        controls.settings,
        4.0,
        button_color(hover == Some(SidebarHitId::OpenSettings)),
    );
    draw_label_centered(
        scene,
        text_renderer,
        "Settings (F2)",
        controls.settings.x + controls.settings.w * 0.5,
        controls.settings.y + controls.settings.h * 0.5,
        14.0,
        colors::TEXT,
    );

    let mut y = controls.hints.y;
    for hint in ["← / → adjust scale", "1–5 jump to a whole factor", "Wheel / PgUp / PgDn scroll"] {
        draw_label(
            scene,
            text_renderer,
            hint,
            LayoutRect::new(controls.hints.x, y, controls.hints.w, 18.0),
            12.0,
            colors::TEXT_MUTED,
        );
        y += 20.0;
    }

    controls.hit_regions()
}

fn button_color(hovered: bool) -> AppColor {
    let base = AppColor::new(0.16, 0.17, 0.20).with_alpha(0.9);
    if hovered {
        base.lighten(0.08)
    } else {
        base
    }
}

fn fill_rounded(scene: &mut Scene, rect: LayoutRect, radius: f64, color: AppColor) {
    let shape = RoundedRect::new(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.right()),
        f64::from(rect.bottom()),
        radius,
    );
    scene.fill(Fill::NonZero, Affine::IDENTITY, color.to_peniko(), None, &shape);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::SIDEBAR_WIDTH;

    fn controls() -> SidebarControls {
        SidebarControls::new(LayoutRect::new(0.0, 0.0, SIDEBAR_WIDTH, 800.0))
    }

    #[test]
    fn track_x_maps_to_snapped_values() {
        let slider = SliderConfig::default();
        let track = controls().track.bounds();
        assert_eq!(scale_value_from_track_x(track[0], track, &slider), 1.0);
        assert_eq!(scale_value_from_track_x(track[2], track, &slider), 5.0);
        let mid = (track[0] + track[2]) * 0.5;
        assert_eq!(scale_value_from_track_x(mid, track, &slider), 3.0);
        assert_eq!(scale_value_from_track_x(-100.0, track, &slider), 1.0);
        assert_eq!(scale_value_from_track_x(10_000.0, track, &slider), 5.0);
    }

    #[test]
    fn controls_stay_inside_sidebar_and_do_not_overlap() {
        let c = controls();
        let regions = c.hit_regions();
        for r in &regions {
            assert!(r.bounds[0] >= c.panel.x && r.bounds[2] <= c.panel.right());
        }
        for (i, a) in regions.iter().enumerate() {
            for b in &regions[i + 1..] {
                let overlap = a.bounds[0] < b.bounds[2]
                    && a.bounds[2] > b.bounds[0]
                    && a.bounds[1] < b.bounds[3]
                    && a.bounds[3] > b.bounds[1];
                assert!(!overlap, "{:?} overlaps {:?}", a.id, b.id);
            }
        }
    }
}
