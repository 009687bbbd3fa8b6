use std::f64::consts::FRAC_PI_2;

use vello::kurbo::{Affine, RoundedRect};
use vello::peniko::Fill;
use vello::Scene;

use super::colors::{self, DiagramStyle};
use super::scene::{
    draw_label_centered, draw_text, draw_text_transformed, fill_rect, stroke_line, stroke_rect,
};
use super::text::{TextRenderer, DEFAULT_FONT};
use crate::layout::axes::{nice_ticks, unit_gridlines};
use crate::layout::{AxisBounds, LayoutRect, PlotTransform, Tiling};
use crate::ui::panels;

/// Toggles for the optional parts of each diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Unit gridlines across the rectangle diagrams.
    pub show_unit_grid: bool,
    /// Faint grid at the tick positions.
    pub show_axis_grid: bool,
    /// Numbered boxes at the centre of each tile.
    pub show_tile_labels: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            show_unit_grid: true,
            show_axis_grid: true,
            show_tile_labels: true,
        }
    }
}

const MARGIN_LEFT: f32 = 52.0;
const MARGIN_BOTTOM: f32 = 44.0;
const MARGIN_TOP: f32 = 10.0;
const MARGIN_RIGHT: f32 = 12.0;
const TITLE_SPACE: f32 = 34.0;
const MAX_TICKS: usize = 8;
const TICK_LEN: f64 = 4.0;
const AXIS_FONT: f32 = 12.0;
/// Matplotlib line widths are in points; this maps them to pixels.
const LINE_SCALE: f64 = 1.0;

/// Area left for the axes once tick labels, axis labels and an optional title
/// have their margins.
pub fn axes_area(figure: LayoutRect, with_title: bool) -> LayoutRect {
    let top = MARGIN_TOP + if with_title { TITLE_SPACE } else { 0.0 };
    LayoutRect::new(
        figure.x + MARGIN_LEFT,
        figure.y + top,
        (figure.w - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        (figure.h - top - MARGIN_BOTTOM).max(1.0),
    )
}

/// Tick label text: integers without a decimal point.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One filled rectangle anchored at the origin, with unit gridlines.
#[allow(clippy::too_many_arguments)]
pub fn draw_rectangle_diagram(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    figure: LayoutRect,
    bounds: AxisBounds,
    (width, height): (f64, f64),
    style: &DiagramStyle,
    config: &DiagramConfig,
    font_scale: f32,
) {
    fill_rect(scene, figure_bounds(figure), colors::FIGURE_BG);
    let transform = PlotTransform::fit(bounds, axes_area(figure, false));
    if config.show_axis_grid {
        draw_axis_grid(scene, &transform);
    }

    let shape = transform.rect(0.0, 0.0, width, height);
    fill_rect(scene, shape, style.fill);
    stroke_rect(scene, shape, 3.0 * LINE_SCALE, style.edge);

    if config.show_unit_grid {
        // Lines span the whole axes, like axvline/axhline.
        for x in unit_gridlines(width) {
            stroke_line(
                scene,
                transform.to_screen(x, bounds.y_min),
                transform.to_screen(x, bounds.y_max),
                0.5 * LINE_SCALE,
                style.grid,
            );
        }
        for y in unit_gridlines(height) {
            stroke_line(
                scene,
                transform.to_screen(bounds.x_min, y),
                transform.to_screen(bounds.x_max, y),
                0.5 * LINE_SCALE,
                style.grid,
            );
        }
    }

    draw_axes_frame(scene, text_renderer, &transform, font_scale);
}

/// The scaled rectangle partitioned into numbered copies of the original.
pub fn draw_tiling_diagram(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    figure: LayoutRect,
    bounds: AxisBounds,
    tiling: &Tiling,
    config: &DiagramConfig,
    font_scale: f32,
) {
    fill_rect(scene, figure_bounds(figure), colors::FIGURE_BG);
    draw_label_centered(
        scene,
        text_renderer,
        &panels::tiling_title(tiling.copies()),
        figure.x + figure.w * 0.5,
        figure.y + MARGIN_TOP + TITLE_SPACE * 0.5,
        16.0 * font_scale,
        colors::AXIS_TEXT,
    );

    let transform = PlotTransform::fit(bounds, axes_area(figure, true));
    if config.show_axis_grid {
        draw_axis_grid(scene, &transform);
    }

    stroke_rect(
        scene,
        transform.rect(0.0, 0.0, tiling.width, tiling.height),
        4.0 * LINE_SCALE,
        DiagramStyle::SCALED.edge,
    );

    let count = tiling.cells.len();
    // Label size follows the cell so 25 small tiles stay readable.
    let cell_px = (tiling.cells.first().map_or(0.0, |c| c.h) * transform.scale) as f32;
    let label_size = (cell_px * 0.32).clamp(10.0, 20.0) * font_scale;

    for (i, cell) in tiling.cells.iter().enumerate() {
        let rect = transform.rect(cell.x, cell.y, cell.w, cell.h);
        let fill = colors::tile_color(i, count).with_alpha(colors::TILE_FILL_ALPHA);
        fill_rect(scene, rect, fill);
        stroke_rect(scene, rect, 2.0 * LINE_SCALE, colors::TILE_EDGE);

        if config.show_tile_labels {
            let (cx, cy) = transform.to_screen(cell.center().0, cell.center().1);
            draw_tile_label(
                scene,
                text_renderer,
                &cell.index.to_string(),
                cx as f32,
                cy as f32,
                label_size,
            );
        }
    }

    draw_axes_frame(scene, text_renderer, &transform, font_scale);
}

fn draw_tile_label(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    label: &str,
    cx: f32,
    cy: f32,
    font_size: f32,
) {
    let Some(rendered) = text_renderer.render_text(
        label,
        DEFAULT_FONT,
        font_size,
        None,
        colors::WHITE,
    ) else {
        return;
    };
    let (w, h) = (rendered.width as f64, rendered.height as f64);
    let pad = f64::from(font_size) * 0.35;
    let (cx, cy) = (f64::from(cx), f64::from(cy));
    let bg = RoundedRect::new(
        cx - w * 0.5 - pad,
        cy - h * 0.5 - pad,
        cx + w * 0.5 + pad,
        cy + h * 0.5 + pad,
        pad,
    );
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        colors::TILE_LABEL_BG.to_peniko(),
        None,
        &bg,
    );
    draw_text(scene, rendered, (cx - w * 0.5) as f32, (cy - h * 0.5) as f32);
}

fn figure_bounds(figure: LayoutRect) -> [f64; 4] {
    figure.bounds().map(f64::from)
}

fn draw_axis_grid(scene: &mut Scene, transform: &PlotTransform) {
    let b = transform.bounds;
    for x in nice_ticks(b.x_min, b.x_max, MAX_TICKS) {
        stroke_line(
            scene,
            transform.to_screen(x, b.y_min),
            transform.to_screen(x, b.y_max),
            0.8,
            colors::AXIS_GRID,
        );
    }
    for y in nice_ticks(b.y_min, b.y_max, MAX_TICKS) {
        stroke_line(
            scene,
            transform.to_screen(b.x_min, y),
            transform.to_screen(b.x_max, y),
            0.8,
            colors::AXIS_GRID,
        );
    }
}

/// Spines, tick marks, tick labels and the two axis titles.
fn draw_axes_frame(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    transform: &PlotTransform,
    font_scale: f32,
) {
    let plot = transform.plot_rect();
    let [left, top, right, bottom] = plot;
    stroke_rect(scene, plot, 1.0, colors::AXIS_FRAME);

    let b = transform.bounds;
    let font = AXIS_FONT * font_scale;
    let mut tick_label_h = 0.0f32;
    for x in nice_ticks(b.x_min, b.x_max, MAX_TICKS) {
        let (sx, _) = transform.to_screen(x, b.y_min);
        stroke_line(scene, (sx, bottom), (sx, bottom + TICK_LEN), 1.0, colors::AXIS_FRAME);
        if let Some((_, h)) = draw_label_centered(
            scene,
            text_renderer,
            &format_tick(x),
            sx as f32,
            (bottom + TICK_LEN) as f32 + font * 0.7,
            font,
            colors::AXIS_TEXT,
        ) {
            tick_label_h = tick_label_h.max(h as f32);
        }
    }

    let mut tick_label_w = 0.0f32;
    for y in nice_ticks(b.y_min, b.y_max, MAX_TICKS) {
        let (_, sy) = transform.to_screen(b.x_min, y);
        stroke_line(scene, (left - TICK_LEN, sy), (left, sy), 1.0, colors::AXIS_FRAME);
        let label = format_tick(y);
        if let Some(rendered) =
            text_renderer.render_text(&label, DEFAULT_FONT, font, None, colors::AXIS_TEXT)
        {
            let w = rendered.width as f32;
            let h = rendered.height as f32;
            tick_label_w = tick_label_w.max(w);
            draw_text(
                scene,
                rendered,
                left as f32 - TICK_LEN as f32 - 3.0 - w,
                sy as f32 - h * 0.5,
            );
        }
    }

    draw_label_centered(
        scene,
        text_renderer,
        "Width (units)",
        ((left + right) * 0.5) as f32,
        bottom as f32 + TICK_LEN as f32 + tick_label_h + font * 1.6,
        font,
        colors::AXIS_TEXT,
    );

    // Vertical title, reading bottom to top.
    if let Some(rendered) =
        text_renderer.render_text("Height (units)", DEFAULT_FONT, font, None, colors::AXIS_TEXT)
    {
        let w = f64::from(rendered.width);
        let h = f64::from(rendered.height);
        let x = left - TICK_LEN - 6.0 - f64::from(tick_label_w) - h;
        let y = (top + bottom) * 0.5 + w * 0.5;
        let base = Affine::translate((x, y)) * Affine::rotate(-FRAC_PI_2);
        draw_text_transformed(scene, rendered, base);
    }
}
