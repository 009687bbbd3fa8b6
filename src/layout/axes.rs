use crate::geometry::ScalingState;

use super::LayoutRect;

/// Visible data range of a diagram, in units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisBounds {
    /// Bounds used by both the original and the scaled diagram.
    ///
    /// Derived from the scaled (larger) rectangle so the two panels draw one
    /// unit with the same length.
    pub fn shared(state: &ScalingState) -> Self {
        Self {
            x_min: -0.5,
            x_max: state.scaled_width + 1.0,
            y_min: -0.5,
            y_max: state.scaled_height + 1.0,
        }
    }

    /// Bounds of the tiling diagram: the scaled rectangle plus half a unit of margin.
    pub fn tiling(state: &ScalingState) -> Self {
        Self {
            x_min: -0.5,
            x_max: state.scaled_width + 0.5,
            y_min: -0.5,
            y_max: state.scaled_height + 0.5,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Interior unit gridline positions for a side of length `extent`: every
/// integer strictly between 0 and `extent`.
pub fn unit_gridlines(extent: f64) -> Vec<f64> {
    let mut lines = Vec::new();
    let mut i = 1.0;
    while i < extent {
        lines.push(i);
        i += 1.0;
    }
    lines
}

/// Tick positions at a 1/2/5 × 10^k step, using the smallest step that keeps
/// the count at or below `max_ticks`.
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    if !(max > min) || max_ticks == 0 {
        return Vec::new();
    }
    let span = max - min;
    let mut magnitude = 10f64.powf((span / max_ticks as f64).log10().floor());
    let step = loop {
        let found = [1.0, 2.0, 5.0]
            .iter()
            .map(|m| m * magnitude)
            .find(|step| (span / step).floor() as usize + 1 <= max_ticks);
        if let Some(step) = found {
            break step;
        }
        magnitude *= 10.0;
    };

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Maps data coordinates (y up) into a pixel area (y down) with equal aspect.
///
/// The data bounds are scaled uniformly to the largest size that fits the
/// area and centred in it, so one unit has the same pixel length on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    pub bounds: AxisBounds,
    /// Pixels per data unit.
    pub scale: f64,
    /// Screen position of `(x_min, y_min)`, the lower-left corner of the plot.
    pub origin: (f64, f64),
}

impl PlotTransform {
    pub fn fit(bounds: AxisBounds, area: LayoutRect) -> Self {
        let sx = f64::from(area.w) / bounds.width();
        let sy = f64::from(area.h) / bounds.height();
        let scale = sx.min(sy).max(0.0);
        let plot_w = bounds.width() * scale;
        let plot_h = bounds.height() * scale;
        let left = f64::from(area.x) + (f64::from(area.w) - plot_w) * 0.5;
        let top = f64::from(area.y) + (f64::from(area.h) - plot_h) * 0.5;
        Self {
            bounds,
            scale,
            origin: (left, top + plot_h),
        }
    }

    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.origin.0 + (x - self.bounds.x_min) * self.scale,
            self.origin.1 - (y - self.bounds.y_min) * self.scale,
        )
    }

    /// Screen rectangle `[x1, y1, x2, y2]` of a data rectangle anchored at `(x, y)`.
    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> [f64; 4] {
        let (x1, y2) = self.to_screen(x, y);
        let (x2, y1) = self.to_screen(x + w, y + h);
        [x1, y1, x2, y2]
    }

    /// Screen rectangle covered by the whole axes.
    pub fn plot_rect(&self) -> [f64; 4] {
        let b = self.bounds;
        self.rect(b.x_min, b.y_min, b.width(), b.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_bounds_follow_scaled_rectangle() {
        for s in [1.0, 2.5, 3.0, 5.0] {
            let b = AxisBounds::shared(&ScalingState::compute(s));
            assert_eq!(b.x_min, -0.5);
            assert_eq!(b.y_min, -0.5);
            assert!((b.x_max - (4.0 * s + 1.0)).abs() < 1e-9);
            assert!((b.y_max - (3.0 * s + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn tiling_bounds_have_half_unit_margin() {
        let b = AxisBounds::tiling(&ScalingState::compute(3.0));
        assert_eq!((b.x_min, b.x_max, b.y_min, b.y_max), (-0.5, 12.5, -0.5, 9.5));
    }

    #[test]
    fn unit_gridlines_are_interior_integers() {
        assert_eq!(unit_gridlines(4.0), vec![1.0, 2.0, 3.0]);
        assert_eq!(unit_gridlines(7.5), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert!(unit_gridlines(1.0).is_empty());
    }

    #[test]
    fn nice_ticks_pick_round_steps() {
        assert_eq!(nice_ticks(-0.5, 5.0, 8), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            nice_ticks(-0.5, 13.0, 8),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0]
        );
        assert!(nice_ticks(21.0, 1.0, 8).is_empty());
    }

    #[test]
    fn transform_keeps_equal_aspect_and_flips_y() {
        let bounds = AxisBounds {
            x_min: 0.0,
            x_max: 4.0,
            y_min: 0.0,
            y_max: 2.0,
        };
        let t = PlotTransform::fit(bounds, LayoutRect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(t.scale, 100.0);
        // Plot is 400x200, centred vertically.
        assert_eq!(t.to_screen(0.0, 0.0), (0.0, 300.0));
        assert_eq!(t.to_screen(4.0, 2.0), (400.0, 100.0));
        assert_eq!(t.rect(0.0, 0.0, 1.0, 1.0), [0.0, 200.0, 100.0, 300.0]);
    }

    #[test]
    fn shared_bounds_give_identical_scale_in_identical_areas() {
        let state = ScalingState::compute(2.0);
        let area = LayoutRect::new(10.0, 10.0, 300.0, 300.0);
        let a = PlotTransform::fit(AxisBounds::shared(&state), area);
        let b = PlotTransform::fit(AxisBounds::shared(&state), area);
        assert_eq!(a.scale, b.scale);
        // The original rectangle is exactly half the scaled one on screen.
        let small = a.rect(0.0, 0.0, 4.0, 3.0);
        let large = b.rect(0.0, 0.0, 8.0, 6.0);
        assert!(((large[2] - large[0]) - 2.0 * (small[2] - small[0])).abs() < 1e-9);
    }
}
