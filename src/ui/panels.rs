use crate::geometry::ScalingState;

pub const PAGE_TITLE: &str = "Perimeter vs Area Scaling Demo";
pub const PAGE_SUBTITLE: &str = "When you triple the perimeter, the area grows 9 times!";
pub const ORIGINAL_HEADING: &str = "Original Rectangle";
pub const EXPLANATION_HEADING: &str = "Why Does This Happen?";
pub const TILING_WARNING: &str =
    "The grid visualization works best with whole number scale factors. Try 2, 3, 4, or 5!";

/// Visual weight of a text panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Info,
    Success,
    Warning,
    Plain,
}

/// A block of text lines with an optional bold-ish title line.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl Panel {
    fn new(kind: PanelKind, title: Option<&str>, lines: Vec<String>) -> Self {
        Self {
            kind,
            title: title.map(str::to_string),
            lines,
        }
    }

    /// Rendered line count, title included.
    pub fn line_count(&self) -> usize {
        self.lines.len() + usize::from(self.title.is_some())
    }
}

/// Scale factor as the slider shows it: `3.0`, `2.5`.
pub fn format_factor(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Integral constants such as the base width print without a decimal point.
pub fn format_count(value: f64) -> String {
    format!("{value}")
}

pub fn format_one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

fn bullet(text: String) -> String {
    format!("• {text}")
}

pub fn scaled_heading(state: &ScalingState) -> String {
    format!("Scaled Rectangle ({}×)", format_factor(state.scale_factor))
}

pub fn tiling_heading(copies: u32) -> String {
    format!("{copies} copies of the original rectangle fit perfectly!")
}

pub fn tiling_title(copies: u32) -> String {
    format!("{copies} copies of the original fit perfectly inside the scaled version!")
}

pub fn original_measurements(state: &ScalingState) -> Panel {
    let w = format_count(state.original_width);
    let h = format_count(state.original_height);
    Panel::new(
        PanelKind::Info,
        Some("Measurements:"),
        vec![
            bullet(format!("Width: {w} units")),
            bullet(format!("Height: {h} units")),
            bullet(format!(
                "Perimeter: {} units ({w} + {w} + {h} + {h})",
                format_count(state.original_perimeter)
            )),
            bullet(format!(
                "Area: {} square units ({w} × {h})",
                format_count(state.original_area)
            )),
        ],
    )
}

pub fn scaled_measurements(state: &ScalingState) -> Panel {
    let s = format_factor(state.scale_factor);
    Panel::new(
        PanelKind::Info,
        Some("Measurements:"),
        vec![
            bullet(format!(
                "Width: {} units ({} × {s})",
                format_one_decimal(state.scaled_width),
                format_count(state.original_width)
            )),
            bullet(format!(
                "Height: {} units ({} × {s})",
                format_one_decimal(state.scaled_height),
                format_count(state.original_height)
            )),
            bullet(format!(
                "Perimeter: {} units ({} × {s})",
                format_one_decimal(state.scaled_perimeter),
                format_count(state.original_perimeter)
            )),
            bullet(format!(
                "Area: {} square units ({} × {})",
                format_one_decimal(state.scaled_area),
                format_count(state.original_area),
                format_one_decimal(state.factor_squared())
            )),
        ],
    )
}

pub fn key_discovery(state: &ScalingState) -> Panel {
    let s = format_factor(state.scale_factor);
    let sp = format_one_decimal(state.scaled_perimeter);
    let sa = format_one_decimal(state.scaled_area);
    let am = format_one_decimal(state.area_multiplier);
    let op = format_count(state.original_perimeter);
    let oa = format_count(state.original_area);
    Panel::new(
        PanelKind::Success,
        Some("Key Discovery:"),
        vec![
            bullet(format!("Perimeter multiplied by: {op} × {s} = {sp} ✓")),
            bullet(format!("Area multiplied by: {oa} × {am} = {sa} ✓")),
            format!("Notice: {sa} ÷ {oa} = {am}"),
            format!("The area grew by {am} times (which is {s}²)!"),
        ],
    )
}

pub fn tiling_warning() -> Panel {
    Panel::new(PanelKind::Warning, None, vec![TILING_WARNING.to_string()])
}

pub fn explanation_for_factor(state: &ScalingState) -> Panel {
    let s = format_factor(state.scale_factor);
    Panel::new(
        PanelKind::Plain,
        Some(format!("When you scale by factor {s}:").as_str()),
        vec![
            bullet(format!("Width becomes {s}× larger")),
            bullet(format!("Height becomes {s}× larger")),
            bullet("Area = Width × Height, so:".to_string()),
            format!(
                "   {s} × {s} = {}× larger",
                format_one_decimal(state.factor_squared())
            ),
        ],
    )
}

pub fn general_rule() -> Panel {
    let lines = [
        "If perimeter is multiplied by n,",
        "then area is multiplied by n²",
        "",
        "This works for any polygon:",
    ]
    .into_iter()
    .map(str::to_string)
    .chain(
        ["Triangles", "Rectangles", "Pentagons", "Hexagons", "And more!"]
            .into_iter()
            .map(|shape| bullet(shape.to_string())),
    )
    .collect();
    Panel::new(PanelKind::Plain, Some("General Rule:"), lines)
}

/// All text panels for one scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePanels {
    pub original: Panel,
    pub scaled: Panel,
    pub discovery: Panel,
    /// Present only when the tiling diagram is skipped.
    pub warning: Option<Panel>,
    pub explanation: [Panel; 2],
}

impl PagePanels {
    pub fn build(state: &ScalingState) -> Self {
        Self {
            original: original_measurements(state),
            scaled: scaled_measurements(state),
            discovery: key_discovery(state),
            warning: (!state.is_whole_number()).then(tiling_warning),
            explanation: [explanation_for_factor(state), general_rule()],
        }
    }

    /// Line counts used to size the page sections.
    pub fn content(&self) -> crate::layout::PageContent {
        crate::layout::PageContent {
            has_tiling: self.warning.is_none(),
            measurement_lines: self.original.line_count().max(self.scaled.line_count()),
            discovery_lines: self.discovery.line_count(),
            warning_lines: self.warning.as_ref().map_or(1, Panel::line_count),
            explanation_lines: self.explanation[0]
                .line_count()
                .max(self.explanation[1].line_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_formatting_matches_slider_display() {
        assert_eq!(format_factor(3.0), "3.0");
        assert_eq!(format_factor(2.5), "2.5");
        assert_eq!(format_count(14.0), "14");
        assert_eq!(format_one_decimal(108.0), "108.0");
    }

    #[test]
    fn original_panel_uses_plain_integers() {
        let panel = original_measurements(&ScalingState::compute(3.0));
        assert_eq!(panel.kind, PanelKind::Info);
        assert_eq!(panel.lines[0], "• Width: 4 units");
        assert_eq!(panel.lines[2], "• Perimeter: 14 units (4 + 4 + 3 + 3)");
        assert_eq!(panel.lines[3], "• Area: 12 square units (4 × 3)");
    }

    #[test]
    fn scaled_panel_for_triple_scale() {
        let panel = scaled_measurements(&ScalingState::compute(3.0));
        assert_eq!(panel.lines[0], "• Width: 12.0 units (4 × 3.0)");
        assert_eq!(panel.lines[1], "• Height: 9.0 units (3 × 3.0)");
        assert_eq!(panel.lines[2], "• Perimeter: 42.0 units (14 × 3.0)");
        assert_eq!(panel.lines[3], "• Area: 108.0 square units (12 × 9.0)");
    }

    #[test]
    fn discovery_panel_reports_multipliers() {
        let panel = key_discovery(&ScalingState::compute(3.0));
        assert_eq!(panel.kind, PanelKind::Success);
        assert_eq!(panel.lines[0], "• Perimeter multiplied by: 14 × 3.0 = 42.0 ✓");
        assert_eq!(panel.lines[1], "• Area multiplied by: 12 × 9.0 = 108.0 ✓");
        assert_eq!(panel.lines[2], "Notice: 108.0 ÷ 12 = 9.0");
        assert_eq!(panel.lines[3], "The area grew by 9.0 times (which is 3.0²)!");
    }

    #[test]
    fn fractional_factor_gets_warning_instead_of_tiling() {
        let panels = PagePanels::build(&ScalingState::compute(2.5));
        let warning = panels.warning.as_ref().expect("warning panel");
        assert_eq!(warning.kind, PanelKind::Warning);
        assert_eq!(warning.lines, vec![TILING_WARNING.to_string()]);
        assert!(!panels.content().has_tiling);
        assert_eq!(panels.scaled.lines[0], "• Width: 10.0 units (4 × 2.5)");
        assert!(panels.discovery.lines[1].ends_with("= 75.0 ✓"));
    }

    #[test]
    fn whole_factor_has_no_warning() {
        let panels = PagePanels::build(&ScalingState::compute(4.0));
        assert!(panels.warning.is_none());
        assert!(panels.content().has_tiling);
    }

    #[test]
    fn headings_interpolate_values() {
        assert_eq!(
            scaled_heading(&ScalingState::compute(1.5)),
            "Scaled Rectangle (1.5×)"
        );
        assert_eq!(tiling_heading(9), "9 copies of the original rectangle fit perfectly!");
        assert_eq!(
            tiling_title(16),
            "16 copies of the original fit perfectly inside the scaled version!"
        );
    }

    #[test]
    fn explanation_columns() {
        let [left, right] = PagePanels::build(&ScalingState::compute(2.0)).explanation;
        assert_eq!(left.title.as_deref(), Some("When you scale by factor 2.0:"));
        assert_eq!(left.lines[3], "   2.0 × 2.0 = 4.0× larger");
        assert_eq!(right.title.as_deref(), Some("General Rule:"));
        assert_eq!(right.line_count(), 10);
        assert!(right.lines.iter().any(|l| l == "• Hexagons"));
    }
}
