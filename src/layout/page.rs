use super::LayoutRect;

pub const SIDEBAR_WIDTH: f32 = 248.0;
pub const MARGIN: f32 = 24.0;
pub const GAP: f32 = 20.0;
pub const TITLE_HEIGHT: f32 = 44.0;
pub const SUBTITLE_HEIGHT: f32 = 32.0;
pub const HEADING_HEIGHT: f32 = 34.0;
pub const LINE_HEIGHT: f32 = 22.0;
pub const PANEL_PADDING: f32 = 12.0;
pub const SEPARATOR_HEIGHT: f32 = 24.0;
/// Upper bound on the side of each column diagram.
pub const MAX_DIAGRAM_SIDE: f32 = 460.0;
/// Upper bound on the width of the tiling diagram.
pub const MAX_TILING_WIDTH: f32 = 900.0;
const MIN_CONTENT_WIDTH: f32 = 360.0;

/// Line counts of the text panels, which decide how tall each section is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageContent {
    pub has_tiling: bool,
    pub measurement_lines: usize,
    pub discovery_lines: usize,
    pub warning_lines: usize,
    pub explanation_lines: usize,
}

/// One half of the side-by-side comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    pub heading: LayoutRect,
    pub diagram: LayoutRect,
    pub panel: LayoutRect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TilingSection {
    Diagram {
        heading: LayoutRect,
        diagram: LayoutRect,
    },
    Warning {
        panel: LayoutRect,
    },
}

/// Pixel placement of every part of the page, scroll already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub sidebar: LayoutRect,
    pub title: LayoutRect,
    pub subtitle: LayoutRect,
    pub columns: [ColumnLayout; 2],
    pub discovery: LayoutRect,
    pub separators: [LayoutRect; 2],
    pub tiling: TilingSection,
    pub explanation_heading: LayoutRect,
    pub explanation: [LayoutRect; 2],
    /// Height of the scrollable content, independent of the scroll offset.
    pub content_height: f32,
    pub max_scroll: f32,
}

pub fn panel_height(lines: usize) -> f32 {
    PANEL_PADDING * 2.0 + lines as f32 * LINE_HEIGHT
}

/// Largest valid scroll offset for a page of `content_height`.
pub fn max_scroll(content_height: f32, viewport_h: f32) -> f32 {
    (content_height - viewport_h).max(0.0)
}

/// Lay out the page for a viewport, top to bottom.
///
/// `scroll` is clamped to `[0, max_scroll]`.
pub fn compute_page_layout(
    viewport_w: f32,
    viewport_h: f32,
    scroll: f32,
    content: &PageContent,
) -> PageLayout {
    let sidebar = LayoutRect::new(0.0, 0.0, SIDEBAR_WIDTH, viewport_h.max(0.0));

    let x0 = SIDEBAR_WIDTH + MARGIN;
    let content_w = (viewport_w - x0 - MARGIN).max(MIN_CONTENT_WIDTH);
    let mut y = MARGIN;

    let title = LayoutRect::new(x0, y, content_w, TITLE_HEIGHT);
    y += TITLE_HEIGHT;
    let subtitle = LayoutRect::new(x0, y, content_w, SUBTITLE_HEIGHT);
    y += SUBTITLE_HEIGHT + GAP * 0.5;

    // Both diagrams get the same side length so the shared axis bounds map
    // to the same pixels per unit.
    let col_w = (content_w - GAP) * 0.5;
    let side = col_w.min(MAX_DIAGRAM_SIDE);
    let measurement_h = panel_height(content.measurement_lines);
    let columns = [0.0, 1.0].map(|i| {
        let cx = x0 + i * (col_w + GAP);
        let heading = LayoutRect::new(cx, y, col_w, HEADING_HEIGHT);
        let diagram = LayoutRect::new(cx, y + HEADING_HEIGHT, side, side);
        let panel = LayoutRect::new(cx, diagram.bottom() + GAP * 0.5, col_w, measurement_h);
        ColumnLayout {
            heading,
            diagram,
            panel,
        }
    });
    y = columns[0].panel.bottom() + GAP;

    let discovery = LayoutRect::new(x0, y, content_w, panel_height(content.discovery_lines));
    y = discovery.bottom();

    let first_separator = LayoutRect::new(x0, y, content_w, SEPARATOR_HEIGHT);
    y += SEPARATOR_HEIGHT;

    let tiling = if content.has_tiling {
        let heading = LayoutRect::new(x0, y, content_w, HEADING_HEIGHT);
        let w = content_w.min(MAX_TILING_WIDTH);
        let diagram = LayoutRect::new(x0, y + HEADING_HEIGHT, w, w * 0.75);
        y = diagram.bottom();
        TilingSection::Diagram { heading, diagram }
    } else {
        let panel = LayoutRect::new(x0, y, content_w, panel_height(content.warning_lines));
        y = panel.bottom();
        TilingSection::Warning { panel }
    };

    let second_separator = LayoutRect::new(x0, y, content_w, SEPARATOR_HEIGHT);
    y += SEPARATOR_HEIGHT;

    let explanation_heading = LayoutRect::new(x0, y, content_w, HEADING_HEIGHT);
    y += HEADING_HEIGHT;
    let explanation_h = panel_height(content.explanation_lines);
    let explanation = [0.0, 1.0].map(|i| LayoutRect::new(x0 + i * (col_w + GAP), y, col_w, explanation_h));
    y += explanation_h + MARGIN;

    let content_height = y;
    let max_scroll = max_scroll(content_height, viewport_h);
    let dy = -scroll.clamp(0.0, max_scroll);

    let shift_column = |c: ColumnLayout| ColumnLayout {
        heading: c.heading.offset_y(dy),
        diagram: c.diagram.offset_y(dy),
        panel: c.panel.offset_y(dy),
    };

    PageLayout {
        sidebar,
        title: title.offset_y(dy),
        subtitle: subtitle.offset_y(dy),
        columns: columns.map(shift_column),
        discovery: discovery.offset_y(dy),
        separators: [first_separator.offset_y(dy), second_separator.offset_y(dy)],
        tiling: match tiling {
            TilingSection::Diagram { heading, diagram } => TilingSection::Diagram {
                heading: heading.offset_y(dy),
                diagram: diagram.offset_y(dy),
            },
            TilingSection::Warning { panel } => TilingSection::Warning {
                panel: panel.offset_y(dy),
            },
        },
        explanation_heading: explanation_heading.offset_y(dy),
        explanation: explanation.map(|r| r.offset_y(dy)),
        content_height,
        max_scroll,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(has_tiling: bool) -> PageContent {
        PageContent {
            has_tiling,
            measurement_lines: 5,
            discovery_lines: 5,
            warning_lines: 1,
            explanation_lines: 9,
        }
    }

    #[test]
    fn column_diagrams_have_identical_size() {
        for width in [800.0, 1280.0, 1920.0] {
            let page = compute_page_layout(width, 800.0, 0.0, &content(true));
            let [left, right] = page.columns;
            assert_eq!(left.diagram.w, right.diagram.w);
            assert_eq!(left.diagram.h, right.diagram.h);
            assert_eq!(left.diagram.w, left.diagram.h);
            assert_eq!(left.diagram.y, right.diagram.y);
            assert!(right.diagram.x > left.diagram.right());
        }
    }

    #[test]
    fn tiling_section_switches_on_whole_factor() {
        let with = compute_page_layout(1280.0, 800.0, 0.0, &content(true));
        let without = compute_page_layout(1280.0, 800.0, 0.0, &content(false));
        assert!(matches!(with.tiling, TilingSection::Diagram { .. }));
        assert!(matches!(without.tiling, TilingSection::Warning { .. }));
        assert!(with.content_height > without.content_height);
    }

    #[test]
    fn tiling_diagram_keeps_four_by_three_aspect() {
        let page = compute_page_layout(1600.0, 900.0, 0.0, &content(true));
        let TilingSection::Diagram { diagram, .. } = page.tiling else {
            panic!("expected tiling diagram");
        };
        assert_eq!(diagram.w, MAX_TILING_WIDTH);
        assert_eq!(diagram.h, diagram.w * 0.75);
    }

    #[test]
    fn scroll_is_clamped_and_sidebar_stays_fixed() {
        let base = compute_page_layout(1280.0, 600.0, 0.0, &content(true));
        let scrolled = compute_page_layout(1280.0, 600.0, 1.0e6, &content(true));
        assert!(base.max_scroll > 0.0);
        assert_eq!(scrolled.title.y, base.title.y - base.max_scroll);
        assert_eq!(scrolled.sidebar, base.sidebar);

        let negative = compute_page_layout(1280.0, 600.0, -50.0, &content(true));
        assert_eq!(negative.title, base.title);
    }

    #[test]
    fn sections_flow_downward() {
        let page = compute_page_layout(1280.0, 800.0, 0.0, &content(false));
        assert!(page.subtitle.y >= page.title.bottom());
        assert!(page.columns[0].heading.y >= page.subtitle.bottom());
        assert!(page.discovery.y >= page.columns[0].panel.bottom());
        assert!(page.explanation_heading.y >= page.separators[1].bottom());
        assert!(page.content_height >= page.explanation[0].bottom());
    }

    #[test]
    fn panel_height_grows_per_line() {
        assert_eq!(panel_height(0), 2.0 * PANEL_PADDING);
        assert_eq!(panel_height(3) - panel_height(2), LINE_HEIGHT);
    }
}
