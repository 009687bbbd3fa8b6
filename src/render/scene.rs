use std::sync::Arc;

use vello::kurbo::{Affine, Line, Rect, RoundedRect, Stroke};
use vello::peniko::{Blob, Fill, ImageAlphaType, ImageBrush, ImageData, ImageFormat};
use vello::Scene;

use super::colors::{self, AppColor};
use super::diagram::{self, DiagramConfig};
use super::text::{TextRenderResult, TextRenderer, DEFAULT_FONT};
use crate::geometry::ScalingState;
use crate::layout::page::{TilingSection, LINE_HEIGHT, PANEL_PADDING};
use crate::layout::{AxisBounds, LayoutRect, PageLayout, Tiling};
use crate::render::colors::DiagramStyle;
use crate::ui::panels::{self, Panel, PagePanels, PanelKind};

pub const TITLE_SIZE: f32 = 28.0;
pub const SUBTITLE_SIZE: f32 = 18.0;
pub const HEADING_SIZE: f32 = 20.0;
pub const BODY_SIZE: f32 = 15.0;

/// Everything drawn in the scrollable page area for one scale factor.
pub struct PageView<'a> {
    pub state: &'a ScalingState,
    pub tiling: Option<&'a Tiling>,
    pub panels: &'a PagePanels,
    pub layout: &'a PageLayout,
}

/// Build the page: header, comparison diagrams, panels, tiling, explanation.
///
/// The scene is reset first; overlays (the sidebar) are appended afterwards by
/// the caller.
pub fn build_scene(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    view: &PageView<'_>,
    config: &DiagramConfig,
    font_scale: f32,
) {
    scene.reset();
    let layout = view.layout;
    let state = view.state;

    draw_label(
        scene,
        text_renderer,
        panels::PAGE_TITLE,
        layout.title,
        TITLE_SIZE * font_scale,
        colors::TEXT,
    );
    draw_label(
        scene,
        text_renderer,
        panels::PAGE_SUBTITLE,
        layout.subtitle,
        SUBTITLE_SIZE * font_scale,
        colors::TEXT,
    );

    // Both comparison diagrams share bounds derived from the scaled rectangle.
    let bounds = AxisBounds::shared(state);
    let comparisons = [
        (
            panels::ORIGINAL_HEADING.to_string(),
            state.original_width,
            state.original_height,
            DiagramStyle::ORIGINAL,
            &view.panels.original,
        ),
        (
            panels::scaled_heading(state),
            state.scaled_width,
            state.scaled_height,
            DiagramStyle::SCALED,
            &view.panels.scaled,
        ),
    ];
    for (column, (heading, width, height, style, panel)) in layout.columns.iter().zip(comparisons) {
        draw_label(
            scene,
            text_renderer,
            &heading,
            column.heading,
            HEADING_SIZE * font_scale,
            colors::TEXT,
        );
        diagram::draw_rectangle_diagram(
            scene,
            text_renderer,
            column.diagram,
            bounds,
            (width, height),
            &style,
            config,
            font_scale,
        );
        draw_panel(scene, text_renderer, column.panel, panel, font_scale);
    }

    draw_panel(
        scene,
        text_renderer,
        layout.discovery,
        &view.panels.discovery,
        font_scale,
    );
    for separator in &layout.separators {
        draw_separator(scene, *separator);
    }

    match (layout.tiling, view.tiling, view.panels.warning.as_ref()) {
        (TilingSection::Diagram { heading, diagram }, Some(tiling), _) => {
            draw_label(
                scene,
                text_renderer,
                &panels::tiling_heading(tiling.copies()),
                heading,
                HEADING_SIZE * font_scale,
                colors::TEXT,
            );
            diagram::draw_tiling_diagram(
                scene,
                text_renderer,
                diagram,
                AxisBounds::tiling(state),
                tiling,
                config,
                font_scale,
            );
        }
        (TilingSection::Warning { panel }, _, Some(warning)) => {
            draw_panel(scene, text_renderer, panel, warning, font_scale);
        }
        _ => tracing::warn!("Page layout and tiling state disagree; skipping tiling section"),
    }

    draw_label(
        scene,
        text_renderer,
        panels::EXPLANATION_HEADING,
        layout.explanation_heading,
        HEADING_SIZE * font_scale,
        colors::TEXT,
    );
    for (rect, panel) in layout.explanation.iter().zip(&view.panels.explanation) {
        draw_panel(scene, text_renderer, *rect, panel, font_scale);
    }
}

/// Rounded panel with a left accent bar, title line and body lines.
pub fn draw_panel(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    rect: LayoutRect,
    panel: &Panel,
    font_scale: f32,
) {
    let (background, accent) = colors::panel_colors(panel.kind);
    let shape = RoundedRect::new(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.right()),
        f64::from(rect.bottom()),
        6.0,
    );
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        background.to_peniko(),
        None,
        &shape,
    );
    if panel.kind != PanelKind::Plain {
        let bar = Rect::new(
            f64::from(rect.x),
            f64::from(rect.y) + 4.0,
            f64::from(rect.x) + 4.0,
            f64::from(rect.bottom()) - 4.0,
        );
        scene.fill(Fill::NonZero, Affine::IDENTITY, accent.to_peniko(), None, &bar);
    }

    let x = rect.x + PANEL_PADDING + 6.0;
    let max_w = (rect.w - PANEL_PADDING * 2.0 - 6.0).max(1.0);
    let mut y = rect.y + PANEL_PADDING;
    let title_color = if panel.kind == PanelKind::Plain {
        colors::TEXT
    } else {
        accent.lighten(0.15)
    };
    let lines = panel
        .title
        .iter()
        .map(|t| (t.as_str(), title_color))
        .chain(panel.lines.iter().map(|l| (l.as_str(), colors::TEXT)));
    for (line, color) in lines {
        if !line.is_empty() {
            let row = LayoutRect::new(x, y, max_w, LINE_HEIGHT);
            draw_label(scene, text_renderer, line, row, BODY_SIZE * font_scale, color);
        }
        y += LINE_HEIGHT;
    }
}

fn draw_separator(scene: &mut Scene, rect: LayoutRect) {
    let y = f64::from(rect.y + rect.h * 0.5);
    let line = Line::new((f64::from(rect.x), y), (f64::from(rect.right()), y));
    scene.stroke(
        &Stroke::new(1.0),
        Affine::IDENTITY,
        colors::SEPARATOR.to_peniko(),
        None,
        &line,
    );
}

/// Draw `text` at the top-left of `row`, vertically centred in it.
pub fn draw_label(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    text: &str,
    row: LayoutRect,
    font_size: f32,
    color: AppColor,
) -> Option<(u32, u32)> {
    let rendered = text_renderer.render_text(text, DEFAULT_FONT, font_size, Some(row.w), color)?;
    let size = (rendered.width, rendered.height);
    let y = row.y + ((row.h - rendered.height as f32) * 0.5).max(0.0);
    draw_text(scene, rendered, row.x, y);
    Some(size)
}

/// Draw `text` centred on `(cx, cy)`.
pub fn draw_label_centered(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    text: &str,
    cx: f32,
    cy: f32,
    font_size: f32,
    color: AppColor,
) -> Option<(u32, u32)> {
    let rendered = text_renderer.render_text(text, DEFAULT_FONT, font_size, None, color)?;
    let size = (rendered.width, rendered.height);
    let x = cx - rendered.width as f32 * 0.5;
    let y = cy - rendered.height as f32 * 0.5;
    draw_text(scene, rendered, x, y);
    Some(size)
}

pub fn draw_text(scene: &mut Scene, text_result: TextRenderResult, x: f32, y: f32) {
    let base = Affine::translate((f64::from(x.round()), f64::from(y.round())));
    draw_text_transformed(scene, text_result, base);
}

/// Draw rendered glyph bitmaps with an arbitrary base transform (used for
/// rotated axis labels).
pub fn draw_text_transformed(scene: &mut Scene, text_result: TextRenderResult, base: Affine) {
    for glyph in text_result.glyphs {
        if glyph.bitmap.is_empty() {
            continue;
        }

        let image = ImageData {
            data: Blob::new(Arc::new(glyph.bitmap)),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: glyph.width as u32,
            height: glyph.height as u32,
        };
        let transform =
            base * Affine::translate((f64::from(glyph.x.round()), f64::from(glyph.y.round())));
        scene.draw_image(&ImageBrush::new(image), transform);
    }
}

pub fn fill_rect(scene: &mut Scene, bounds: [f64; 4], color: AppColor) {
    let [x1, y1, x2, y2] = bounds;
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        color.to_peniko(),
        None,
        &Rect::new(x1, y1, x2, y2),
    );
}

pub fn stroke_rect(scene: &mut Scene, bounds: [f64; 4], width: f64, color: AppColor) {
    let [x1, y1, x2, y2] = bounds;
    scene.stroke(
        &Stroke::new(width),
        Affine::IDENTITY,
        color.to_peniko(),
        None,
        &Rect::new(x1, y1, x2, y2),
    );
}

pub fn stroke_line(scene: &mut Scene, from: (f64, f64), to: (f64, f64), width: f64, color: AppColor) {
    scene.stroke(
        &Stroke::new(width),
        Affine::IDENTITY,
        color.to_peniko(),
        None,
        &Line::new(from, to),
    );
}
