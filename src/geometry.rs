/// Width of the base rectangle, in units.
pub const ORIGINAL_WIDTH: u32 = 4;
/// Height of the base rectangle, in units.
pub const ORIGINAL_HEIGHT: u32 = 3;

/// Domain of the scale factor slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 5.0,
            step: 0.5,
            default: 3.0,
        }
    }
}

impl SliderConfig {
    /// Clamp to `[min, max]` and snap to the nearest step.
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Move `value` by `delta` whole steps.
    pub fn step_by(&self, value: f64, delta: i32) -> f64 {
        self.snap(value + f64::from(delta) * self.step)
    }

    /// Position of `value` along the slider, 0.0 at `min` and 1.0 at `max`.
    pub fn fraction(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Inverse of [`fraction`](Self::fraction), snapped to the step grid.
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.snap(self.min + fraction.clamp(0.0, 1.0) * (self.max - self.min))
    }

    /// Every value the slider can hold, ascending.
    pub fn values(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count)
            .map(|i| self.min + i as f64 * self.step)
            .collect()
    }
}

/// Original and scaled measurements for one scale factor.
///
/// Every field is derived from `scale_factor` and the base dimensions; a new
/// value is computed on each interaction rather than mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingState {
    pub scale_factor: f64,
    pub original_width: f64,
    pub original_height: f64,
    pub scaled_width: f64,
    pub scaled_height: f64,
    pub original_perimeter: f64,
    pub scaled_perimeter: f64,
    pub original_area: f64,
    pub scaled_area: f64,
    pub perimeter_multiplier: f64,
    pub area_multiplier: f64,
}

impl ScalingState {
    pub fn compute(scale_factor: f64) -> Self {
        let original_width = f64::from(ORIGINAL_WIDTH);
        let original_height = f64::from(ORIGINAL_HEIGHT);

        let scaled_width = original_width * scale_factor;
        let scaled_height = original_height * scale_factor;

        let original_perimeter = perimeter(original_width, original_height);
        let scaled_perimeter = perimeter(scaled_width, scaled_height);
        let original_area = area(original_width, original_height);
        let scaled_area = area(scaled_width, scaled_height);

        Self {
            scale_factor,
            original_width,
            original_height,
            scaled_width,
            scaled_height,
            original_perimeter,
            scaled_perimeter,
            original_area,
            scaled_area,
            perimeter_multiplier: scaled_perimeter / original_perimeter,
            area_multiplier: scaled_area / original_area,
        }
    }

    /// True when the scale factor has no fractional part.
    pub fn is_whole_number(&self) -> bool {
        self.scale_factor == self.scale_factor.trunc()
    }

    /// The scale factor as an integer, if it is one.
    pub fn whole_factor(&self) -> Option<u32> {
        if self.is_whole_number() && self.scale_factor >= 1.0 {
            Some(self.scale_factor as u32)
        } else {
            None
        }
    }

    /// `scale_factor²`, the number of base rectangles that fit in the scaled one.
    pub fn factor_squared(&self) -> f64 {
        self.scale_factor * self.scale_factor
    }
}

pub fn perimeter(width: f64, height: f64) -> f64 {
    2.0 * (width + height)
}

pub fn area(width: f64, height: f64) -> f64 {
    width * height
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn derived_values_follow_closed_forms_for_every_slider_value() {
        for s in SliderConfig::default().values() {
            let state = ScalingState::compute(s);
            assert!((state.scaled_width - 4.0 * s).abs() < EPS);
            assert!((state.scaled_height - 3.0 * s).abs() < EPS);
            assert!((state.scaled_perimeter - 14.0 * s).abs() < EPS);
            assert!((state.scaled_area - 12.0 * s * s).abs() < EPS);
            assert!((state.perimeter_multiplier - s).abs() < EPS);
            assert!((state.area_multiplier - s * s).abs() < EPS);
        }
    }

    #[test]
    fn triple_scale_example() {
        let state = ScalingState::compute(3.0);
        assert_eq!(state.scaled_width, 12.0);
        assert_eq!(state.scaled_height, 9.0);
        assert_eq!(state.scaled_perimeter, 42.0);
        assert_eq!(state.scaled_area, 108.0);
        assert!((state.area_multiplier - 9.0).abs() < EPS);
        assert_eq!(state.original_perimeter, 14.0);
        assert_eq!(state.original_area, 12.0);
        assert_eq!(state.whole_factor(), Some(3));
    }

    #[test]
    fn fractional_scale_example() {
        let state = ScalingState::compute(2.5);
        assert!((state.scaled_area - 75.0).abs() < EPS);
        assert!((state.area_multiplier - 6.25).abs() < EPS);
        assert!(!state.is_whole_number());
        assert_eq!(state.whole_factor(), None);
    }

    #[test]
    fn whole_numbers_are_exactly_the_integer_slider_values() {
        let whole: Vec<u32> = SliderConfig::default()
            .values()
            .into_iter()
            .filter_map(|s| ScalingState::compute(s).whole_factor())
            .collect();
        assert_eq!(whole, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn slider_has_nine_positions() {
        let values = SliderConfig::default().values();
        assert_eq!(values.len(), 9);
        assert_eq!(values.first().copied(), Some(1.0));
        assert_eq!(values.last().copied(), Some(5.0));
    }

    #[test]
    fn snap_clamps_and_rounds_to_step() {
        let slider = SliderConfig::default();
        assert_eq!(slider.snap(0.2), 1.0);
        assert_eq!(slider.snap(9.0), 5.0);
        assert_eq!(slider.snap(2.6), 2.5);
        assert_eq!(slider.snap(2.8), 3.0);
        assert_eq!(slider.snap(f64::NAN), 3.0);
    }

    #[test]
    fn step_by_stays_in_range() {
        let slider = SliderConfig::default();
        assert_eq!(slider.step_by(3.0, 1), 3.5);
        assert_eq!(slider.step_by(3.0, -1), 2.5);
        assert_eq!(slider.step_by(5.0, 1), 5.0);
        assert_eq!(slider.step_by(1.0, -4), 1.0);
    }

    #[test]
    fn fraction_round_trips_through_value_at() {
        let slider = SliderConfig::default();
        assert_eq!(slider.fraction(1.0), 0.0);
        assert_eq!(slider.fraction(5.0), 1.0);
        assert_eq!(slider.value_at(0.5), 3.0);
        assert_eq!(slider.value_at(0.6), 3.5);
        assert_eq!(slider.value_at(-1.0), 1.0);
    }
}
