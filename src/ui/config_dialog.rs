use std::sync::{Arc, Mutex};

use iced::widget::{button, checkbox, column, container, row, slider, text, text_input};
use iced::{application, window, Element, Length, Task, Theme};

use crate::geometry::SliderConfig;
use crate::render::diagram::DiagramConfig;

/// Settings edited in the dialog and handed back to the main window.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogResult {
    pub scale_factor: f64,
    pub diagram: DiagramConfig,
    pub label_font_scale: f32,
    pub label_font_path: String,
}

impl DialogResult {
    /// Font scale accepted by the dialog slider.
    pub const FONT_SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.6..=2.0;

    /// Bring the values into the ranges the page can draw.
    pub fn normalized(mut self, slider: &SliderConfig) -> Self {
        self.scale_factor = slider.snap(self.scale_factor);
        let (lo, hi) = (*Self::FONT_SCALE_RANGE.start(), *Self::FONT_SCALE_RANGE.end());
        self.label_font_scale = if self.label_font_scale.is_finite() {
            self.label_font_scale.clamp(lo, hi)
        } else {
            1.0
        };
        self.label_font_path = self.label_font_path.trim().to_string();
        self
    }
}

/// Run the settings window to completion. `None` when cancelled or closed.
pub fn run_config_dialog(
    title: &str,
    initial: DialogResult,
    slider: SliderConfig,
) -> Option<DialogResult> {
    let output = Arc::new(Mutex::new(None));
    let output_for_app = output.clone();
    let title_owned = title.to_string();

    let run = application(
        move |_state: &ConfigDialog| title_owned.clone(),
        move |state: &mut ConfigDialog, message: Message| state.update(message),
        view,
    )
    .theme(|_| Theme::Dark)
    .window_size((560.0, 520.0))
    .run_with(move || (ConfigDialog::new(initial, slider, output_for_app), Task::none()));

    if let Err(err) = run {
        tracing::warn!("Settings dialog failed: {err}");
        return None;
    }
    output.lock().ok().and_then(|g| g.clone())
}

#[derive(Debug, Clone)]
enum Message {
    ScaleChanged(f32),
    UnitGridToggled(bool),
    AxisGridToggled(bool),
    TileLabelsToggled(bool),
    LabelFontScaleChanged(f32),
    LabelFontPathChanged(String),
    BrowseFont,
    Apply,
    Cancel,
}

struct ConfigDialog {
    slider: SliderConfig,
    scale_factor: f32,
    diagram: DiagramConfig,
    label_font_scale: f32,
    label_font_path: String,
    output: Arc<Mutex<Option<DialogResult>>>,
}

impl ConfigDialog {
    fn new(
        initial: DialogResult,
        slider: SliderConfig,
        output: Arc<Mutex<Option<DialogResult>>>,
    ) -> Self {
        Self {
            slider,
            scale_factor: initial.scale_factor as f32,
            diagram: initial.diagram,
            label_font_scale: initial.label_font_scale,
            label_font_path: initial.label_font_path,
            output,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ScaleChanged(v) => {
                self.scale_factor = v;
                Task::none()
            }
            Message::UnitGridToggled(v) => {
                self.diagram.show_unit_grid = v;
                Task::none()
            }
            Message::AxisGridToggled(v) => {
                self.diagram.show_axis_grid = v;
                Task::none()
            }
            Message::TileLabelsToggled(v) => {
                self.diagram.show_tile_labels = v;
                Task::none()
            }
            Message::LabelFontScaleChanged(v) => {
                self.label_font_scale = v;
                Task::none()
            }
            Message::LabelFontPathChanged(v) => {
                self.label_font_path = v;
                Task::none()
            }
            Message::BrowseFont => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Font", &["ttf", "otf"])
                    .pick_file()
                {
                    self.label_font_path = path.to_string_lossy().to_string();
                }
                Task::none()
            }
            Message::Apply => {
                let result = DialogResult {
                    scale_factor: f64::from(self.scale_factor),
                    diagram: self.diagram,
                    label_font_scale: self.label_font_scale,
                    label_font_path: self.label_font_path.clone(),
                }
                .normalized(&self.slider);
                if let Ok(mut guard) = self.output.lock() {
                    *guard = Some(result);
                }
                close_window()
            }
            Message::Cancel => close_window(),
        }
    }
}

fn close_window() -> Task<Message> {
    window::get_latest().then(|id| match id {
        Some(id) => window::close::<Message>(id),
        None => Task::none(),
    })
}

fn setting_slider<'a>(
    label: &'a str,
    value: f32,
    range: std::ops::RangeInclusive<f32>,
    step: f32,
    on_change: impl Fn(f32) -> Message + 'a,
) -> Element<'a, Message> {
    column![
        text(format!("{label}: {value:.1}")).size(16),
        slider(range, value, on_change).step(step)
    ]
    .spacing(6)
    .into()
}

fn view(state: &ConfigDialog) -> Element<'_, Message> {
    let settings = column![
        text("Scaling").size(18),
        setting_slider(
            "Scale Factor",
            state.scale_factor,
            state.slider.min as f32..=state.slider.max as f32,
            state.slider.step as f32,
            Message::ScaleChanged
        ),
        text("Diagrams").size(18),
        checkbox("Show unit gridlines", state.diagram.show_unit_grid)
            .on_toggle(Message::UnitGridToggled),
        checkbox("Show axis grid", state.diagram.show_axis_grid)
            .on_toggle(Message::AxisGridToggled),
        checkbox("Number the tiles", state.diagram.show_tile_labels)
            .on_toggle(Message::TileLabelsToggled),
        text("Text").size(18),
        setting_slider(
            "Label Font Scale",
            state.label_font_scale,
            DialogResult::FONT_SCALE_RANGE,
            0.1,
            Message::LabelFontScaleChanged
        ),
        row![
            text_input("Custom font path (optional, .ttf)", &state.label_font_path)
                .on_input(Message::LabelFontPathChanged)
                .padding(8)
                .width(Length::Fill),
            button("Browse").on_press(Message::BrowseFont)
        ]
        .spacing(8)
    ]
    .spacing(10);

    let body = column![
        text("Area Scaling Settings").size(26),
        container(settings).padding(12),
        row![
            button("Cancel").on_press(Message::Cancel),
            button("Apply Settings").on_press(Message::Apply)
        ]
        .spacing(10)
    ]
    .spacing(14);

    container(body)
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(scale_factor: f64, label_font_scale: f32) -> DialogResult {
        DialogResult {
            scale_factor,
            diagram: DiagramConfig::default(),
            label_font_scale,
            label_font_path: "  /tmp/font.ttf ".to_string(),
        }
    }

    #[test]
    fn normalized_snaps_scale_and_clamps_font() {
        let slider = SliderConfig::default();
        let r = result(2.7, 5.0).normalized(&slider);
        assert_eq!(r.scale_factor, 2.5);
        assert_eq!(r.label_font_scale, 2.0);
        assert_eq!(r.label_font_path, "/tmp/font.ttf");

        let r = result(0.0, f32::NAN).normalized(&slider);
        assert_eq!(r.scale_factor, 1.0);
        assert_eq!(r.label_font_scale, 1.0);
    }

    #[test]
    fn apply_stores_result_for_caller() {
        let output = Arc::new(Mutex::new(None));
        let mut dialog = ConfigDialog::new(result(3.0, 1.0), SliderConfig::default(), output.clone());
        let _ = dialog.update(Message::ScaleChanged(4.5));
        let _ = dialog.update(Message::TileLabelsToggled(false));
        let _ = dialog.update(Message::Apply);

        let stored = output.lock().unwrap().clone().unwrap();
        assert_eq!(stored.scale_factor, 4.5);
        assert!(!stored.diagram.show_tile_labels);
        assert!(stored.diagram.show_unit_grid);
    }

    #[test]
    fn cancel_leaves_no_result() {
        let output = Arc::new(Mutex::new(None));
        let mut dialog = ConfigDialog::new(result(3.0, 1.0), SliderConfig::default(), output.clone());
        let _ = dialog.update(Message::ScaleChanged(1.5));
        let _ = dialog.update(Message::Cancel);
        assert!(output.lock().unwrap().is_none());
    }
}
