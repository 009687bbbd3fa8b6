#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod geometry;
mod layout;
mod render;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

use app::App;
use geometry::SliderConfig;
use render::RenderState;
use ui::input::{self, InputAction};
use ui::overlay::SidebarHitId;

const WINDOW_TITLE: &str = "Perimeter vs Area Scaling";

/// Main application handler for winit's event loop.
struct AreaScaleApp {
    app: App,
    render_state: Option<RenderState>,
    window: Option<Arc<Window>>,
}

impl AreaScaleApp {
    fn new(initial_scale: f64) -> Self {
        Self {
            app: App::new(initial_scale),
            render_state: None,
            window: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_action(&mut self, action: InputAction) {
        if action == InputAction::OpenSettings {
            self.open_settings();
        } else if self.app.apply_action(action) {
            self.request_redraw();
        }
    }

    /// Block on the settings dialog, then apply whatever it returned.
    fn open_settings(&mut self) {
        let settings = ui::config_dialog::run_config_dialog(
            &format!("{WINDOW_TITLE} - Settings"),
            self.app.dialog_state(),
            self.app.slider,
        );
        if let Some(settings) = settings {
            self.app.apply_settings(settings);
            self.request_redraw();
        }
    }
}

impl ApplicationHandler for AreaScaleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 900));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(RenderState::new(window.clone())) {
            Ok(state) => {
                let size = window.inner_size();
                tracing::info!(
                    "Window initialized: scale_factor={:.3}, physical_size={}x{}",
                    window.scale_factor(),
                    size.width,
                    size.height
                );
                self.app.resize(size.width, size.height);
                self.render_state = Some(state);
                window.request_redraw();
            }
            Err(e) => {
                tracing::error!("Failed to initialize GPU: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render_state {
                    render.resize(size.width, size.height);
                    self.app.resize(size.width, size.height);
                    self.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                tracing::info!("Scale factor changed: {:.3}", scale_factor);
                if let (Some(render), Some(window)) = (&mut self.render_state, &self.window) {
                    let size = window.inner_size();
                    render.resize(size.width, size.height);
                    self.app.resize(size.width, size.height);
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.app.mouse.x = position.x as f32;
                self.app.mouse.y = position.y as f32;

                let mut redraw = false;
                if self.app.slider_dragging {
                    redraw |= self.app.drag_slider_to(self.app.mouse.x);
                }

                let hover = self.app.hit_test_sidebar(self.app.mouse.x, self.app.mouse.y);
                if hover != self.app.hover {
                    self.app.hover = hover;
                    if let Some(window) = &self.window {
                        window.set_cursor(if hover.is_some() {
                            CursorIcon::Pointer
                        } else {
                            CursorIcon::Default
                        });
                    }
                    redraw = true;
                }

                if redraw {
                    self.request_redraw();
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button != MouseButton::Left {
                    return;
                }
                self.app.mouse.left_pressed = state == ElementState::Pressed;
                if state == ElementState::Released {
                    self.app.slider_dragging = false;
                    return;
                }

                match self.app.hit_test_sidebar(self.app.mouse.x, self.app.mouse.y) {
                    Some(SidebarHitId::OpenSettings) => self.open_settings(),
                    Some(hit) => {
                        if self.app.click_sidebar(hit) {
                            self.request_redraw();
                        }
                    }
                    None => {}
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_action(input::process_mouse_wheel(delta));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let action = input::process_key(event.logical_key.clone(), event.state);
                self.handle_action(action);
            }

            WindowEvent::RedrawRequested => {
                self.app.rebuild_scene();

                if let Some(render) = &mut self.render_state {
                    if let Err(e) = render.render(&self.app.scene) {
                        tracing::error!("Render error: {}", e);
                    }
                }
            }

            _ => {}
        }
    }
}

/// Initial scale factor from the first command line argument, snapped onto
/// the slider. A missing argument gives the slider default.
fn parse_scale_arg(arg: Option<&str>, slider: &SliderConfig) -> Result<f64> {
    let Some(raw) = arg else {
        return Ok(slider.default);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid scale factor {raw:?}"))?;
    let snapped = slider.snap(value);
    if snapped != value {
        tracing::warn!(
            "Scale factor {} is not a slider position; using {}",
            raw,
            ui::panels::format_factor(snapped)
        );
    }
    Ok(snapped)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("areascale=info".parse()?),
        )
        .init();

    let arg = std::env::args().nth(1);
    let initial_scale = parse_scale_arg(arg.as_deref(), &SliderConfig::default())?;
    tracing::info!(
        "Starting with scale factor {}",
        ui::panels::format_factor(initial_scale)
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = AreaScaleApp::new(initial_scale);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_uses_default() {
        let slider = SliderConfig::default();
        assert_eq!(parse_scale_arg(None, &slider).unwrap(), 3.0);
    }

    #[test]
    fn argument_is_snapped_onto_slider() {
        let slider = SliderConfig::default();
        assert_eq!(parse_scale_arg(Some("4"), &slider).unwrap(), 4.0);
        assert_eq!(parse_scale_arg(Some(" 2.4 "), &slider).unwrap(), 2.5);
        assert_eq!(parse_scale_arg(Some("12"), &slider).unwrap(), 5.0);
    }

    #[test]
    fn unparsable_argument_is_an_error() {
        let slider = SliderConfig::default();
        let err = parse_scale_arg(Some("big"), &slider).unwrap_err();
        assert!(err.to_string().contains("invalid scale factor"));
    }
}
