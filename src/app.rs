use std::path::Path;

use vello::Scene;

use crate::geometry::{ScalingState, SliderConfig};
use crate::layout::{compute_page_layout, compute_tiling, PageLayout, Tiling};
use crate::render::diagram::DiagramConfig;
use crate::render::scene::{build_scene, PageView};
use crate::render::text::{TextRenderer, DEFAULT_FONT};
use crate::ui::config_dialog::DialogResult;
use crate::ui::input::{self, MouseState};
use crate::ui::overlay::{self, SidebarHitId, SidebarHitRegion};
use crate::ui::panels::{format_factor, PagePanels};

/// Top-level application state.
pub struct App {
    pub slider: SliderConfig,

    // Data derived from the scale factor
    pub state: ScalingState,
    pub tiling: Option<Tiling>,
    pub panels: PagePanels,
    pub page: PageLayout,

    // Settings
    pub diagram_config: DiagramConfig,
    pub label_font_scale: f32,
    pub label_font_path: String,
    pub text_renderer: TextRenderer,

    // UI state
    pub mouse: MouseState,
    pub hover: Option<SidebarHitId>,
    pub sidebar_hit_regions: Vec<SidebarHitRegion>,
    pub slider_dragging: bool,
    pub scroll_offset: f32,

    // Rendering
    pub scene: Scene,
    pub needs_relayout: bool,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl App {
    pub fn new(initial_scale: f64) -> Self {
        let mut text_renderer = TextRenderer::new();
        if let Err(e) = text_renderer.load_system_font(DEFAULT_FONT) {
            tracing::warn!("Failed to load system font, text will not be drawn: {e}");
        }
        Self::with_text_renderer(initial_scale, text_renderer)
    }

    fn with_text_renderer(initial_scale: f64, text_renderer: TextRenderer) -> Self {
        let slider = SliderConfig::default();
        let state = ScalingState::compute(slider.snap(initial_scale));
        let panels = PagePanels::build(&state);
        let (viewport_width, viewport_height) = (1280.0, 800.0);
        let page = compute_page_layout(viewport_width, viewport_height, 0.0, &panels.content());

        Self {
            slider,
            tiling: compute_tiling(&state),
            state,
            panels,
            page,
            diagram_config: DiagramConfig::default(),
            label_font_scale: 1.0,
            label_font_path: String::new(),
            text_renderer,
            mouse: MouseState::default(),
            hover: None,
            sidebar_hit_regions: Vec::new(),
            slider_dragging: false,
            scroll_offset: 0.0,
            scene: Scene::new(),
            needs_relayout: false,
            viewport_width,
            viewport_height,
        }
    }

    /// Snap `value` onto the slider and recompute everything derived from it.
    ///
    /// Returns `true` when the scale factor changed.
    pub fn set_scale_factor(&mut self, value: f64) -> bool {
        let snapped = self.slider.snap(value);
        if snapped == self.state.scale_factor {
            return false;
        }

        self.state = ScalingState::compute(snapped);
        self.tiling = compute_tiling(&self.state);
        self.panels = PagePanels::build(&self.state);
        self.needs_relayout = true;

        tracing::info!(
            "Scale factor {}: perimeter {} -> {}, area {} -> {}",
            format_factor(snapped),
            self.state.original_perimeter,
            self.state.scaled_perimeter,
            self.state.original_area,
            self.state.scaled_area
        );
        true
    }

    pub fn step_scale(&mut self, delta: i32) -> bool {
        self.set_scale_factor(self.slider.step_by(self.state.scale_factor, delta))
    }

    /// Scroll the page by `delta` pixels. Returns `true` when the offset moved.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        let next = (self.scroll_offset + delta).clamp(0.0, self.page.max_scroll);
        if next == self.scroll_offset {
            return false;
        }
        self.scroll_offset = next;
        self.needs_relayout = true;
        true
    }

    /// Apply an input action. Returns `true` when a redraw is needed.
    pub fn apply_action(&mut self, action: input::InputAction) -> bool {
        match action {
            input::InputAction::StepScale { delta } => self.step_scale(delta),
            input::InputAction::ScaleToMin => self.set_scale_factor(self.slider.min),
            input::InputAction::ScaleToMax => self.set_scale_factor(self.slider.max),
            input::InputAction::JumpTo { factor } => self.set_scale_factor(f64::from(factor)),
            input::InputAction::Scroll { delta } => self.scroll_by(delta),
            input::InputAction::OpenSettings | input::InputAction::None => false,
        }
    }

    /// Handle viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport_width = width as f32;
        self.viewport_height = height as f32;
        self.needs_relayout = true;
    }

    /// Recompute the page layout for the current viewport, panels and scroll.
    pub fn relayout(&mut self) {
        self.page = compute_page_layout(
            self.viewport_width,
            self.viewport_height,
            self.scroll_offset,
            &self.panels.content(),
        );
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.page.max_scroll);
        self.needs_relayout = false;
        tracing::debug!(
            "Page laid out: viewport={}x{}, content_height={:.0}, scroll={:.0}",
            self.viewport_width,
            self.viewport_height,
            self.page.content_height,
            self.scroll_offset
        );
    }

    /// Rebuild the Vello scene: page first, sidebar on top.
    pub fn rebuild_scene(&mut self) {
        if self.needs_relayout {
            self.relayout();
        }

        let view = PageView {
            state: &self.state,
            tiling: self.tiling.as_ref(),
            panels: &self.panels,
            layout: &self.page,
        };
        build_scene(
            &mut self.scene,
            &mut self.text_renderer,
            &view,
            &self.diagram_config,
            self.label_font_scale,
        );

        self.sidebar_hit_regions = overlay::render_sidebar(
            &mut self.scene,
            &mut self.text_renderer,
            self.page.sidebar,
            self.state.scale_factor,
            &self.slider,
            self.hover,
        );
    }

    pub fn hit_test_sidebar(&self, x: f32, y: f32) -> Option<SidebarHitId> {
        input::hit_test(&self.sidebar_hit_regions, x, y)
    }

    fn track_bounds(&self) -> Option<[f32; 4]> {
        self.sidebar_hit_regions
            .iter()
            .find(|r| r.id == SidebarHitId::ScaleTrack)
            .map(|r| r.bounds)
    }

    /// Move the slider to the step nearest the cursor `x`.
    pub fn drag_slider_to(&mut self, x: f32) -> bool {
        match self.track_bounds() {
            Some(track) => {
                self.set_scale_factor(overlay::scale_value_from_track_x(x, track, &self.slider))
            }
            None => false,
        }
    }

    /// Handle a left click on a sidebar control. Returns `true` when a redraw
    /// is needed; `OpenSettings` is left to the caller.
    pub fn click_sidebar(&mut self, hit: SidebarHitId) -> bool {
        match hit {
            SidebarHitId::ScaleDown => self.step_scale(-1),
            SidebarHitId::ScaleUp => self.step_scale(1),
            SidebarHitId::ScaleTrack => {
                self.slider_dragging = true;
                self.drag_slider_to(self.mouse.x);
                true
            }
            SidebarHitId::OpenSettings => false,
        }
    }

    /// Current settings, as the dialog starts from them.
    pub fn dialog_state(&self) -> DialogResult {
        DialogResult {
            scale_factor: self.state.scale_factor,
            diagram: self.diagram_config,
            label_font_scale: self.label_font_scale,
            label_font_path: self.label_font_path.clone(),
        }
    }

    /// Apply settings returned by the dialog.
    pub fn apply_settings(&mut self, settings: DialogResult) {
        let settings = settings.normalized(&self.slider);
        self.set_scale_factor(settings.scale_factor);
        self.diagram_config = settings.diagram;
        self.label_font_scale = settings.label_font_scale;

        if settings.label_font_path != self.label_font_path && !settings.label_font_path.is_empty() {
            if let Err(e) = self
                .text_renderer
                .load_font_from_path(DEFAULT_FONT, Path::new(&settings.label_font_path))
            {
                tracing::warn!(
                    "Failed to load custom font '{}': {:#}",
                    settings.label_font_path,
                    e
                );
            } else {
                tracing::info!("Loaded custom font from {}", settings.label_font_path);
            }
        }
        self.label_font_path = settings.label_font_path;
        self.needs_relayout = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(scale: f64) -> App {
        App::with_text_renderer(scale, TextRenderer::new())
    }

    #[test]
    fn initial_scale_is_snapped() {
        assert_eq!(app(3.0).state.scale_factor, 3.0);
        assert_eq!(app(2.7).state.scale_factor, 2.5);
        assert_eq!(app(9.0).state.scale_factor, 5.0);
    }

    #[test]
    fn changing_scale_recomputes_derived_state() {
        let mut app = app(3.0);
        assert_eq!(app.tiling.as_ref().map(|t| t.cells.len()), Some(9));

        assert!(app.set_scale_factor(2.5));
        assert_eq!(app.state.scaled_area, 75.0);
        assert!(app.tiling.is_none());
        assert!(app.panels.warning.is_some());
        assert!(app.needs_relayout);

        assert!(!app.set_scale_factor(2.5));
    }

    #[test]
    fn actions_move_the_slider_within_range() {
        let mut app = app(3.0);
        assert!(app.apply_action(input::InputAction::StepScale { delta: 1 }));
        assert_eq!(app.state.scale_factor, 3.5);
        assert!(app.apply_action(input::InputAction::ScaleToMax));
        assert!(!app.apply_action(input::InputAction::StepScale { delta: 1 }));
        assert_eq!(app.state.scale_factor, 5.0);
        assert!(app.apply_action(input::InputAction::ScaleToMin));
        assert_eq!(app.state.scale_factor, 1.0);
        assert!(app.apply_action(input::InputAction::JumpTo { factor: 4 }));
        assert_eq!(app.tiling.as_ref().map(|t| t.copies()), Some(16));
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut app = app(3.0);
        app.resize(1280, 400);
        app.relayout();
        assert!(app.page.max_scroll > 0.0);
        assert!(!app.scroll_by(-50.0));
        assert!(app.scroll_by(1.0e6));
        assert_eq!(app.scroll_offset, app.page.max_scroll);
    }

    #[test]
    fn settings_round_trip_through_dialog_state() {
        let mut app = app(3.0);
        let mut settings = app.dialog_state();
        settings.scale_factor = 4.0;
        settings.diagram.show_axis_grid = false;
        settings.label_font_scale = 1.4;
        app.apply_settings(settings);

        assert_eq!(app.state.scale_factor, 4.0);
        assert!(!app.diagram_config.show_axis_grid);
        assert_eq!(app.label_font_scale, 1.4);
        assert!(app.needs_relayout);
    }

    #[test]
    fn bad_font_path_keeps_running() {
        let mut app = app(3.0);
        let mut settings = app.dialog_state();
        settings.label_font_path = "/nonexistent/font.ttf".to_string();
        app.apply_settings(settings);
        assert_eq!(app.label_font_path, "/nonexistent/font.ttf");
        assert!(!app.text_renderer.has_font(DEFAULT_FONT));
    }

    #[test]
    fn scene_build_records_sidebar_regions() {
        let mut app = app(2.0);
        app.rebuild_scene();
        assert_eq!(app.sidebar_hit_regions.len(), 4);
        let track = app.track_bounds().unwrap();
        assert!(app.drag_slider_to(track[2]));
        assert_eq!(app.state.scale_factor, 5.0);
    }
}
