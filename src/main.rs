// main.rs — window, event loop and the on-screen controls

mod camera;
mod config;
mod cube;
mod mesh;
mod navigation;
mod render_loop;
mod renderer;
mod room;
mod texture;
mod tween;
mod viewport;

use navigation::{Direction, InputEvent};
use render_loop::{FrameClock, RenderLoop};
use renderer::Renderer;
use room::Room;
use texture::TextureResult;
use viewport::Viewport;

use anyhow::Context;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

/// Clicks on the egui overlay, applied after the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum UiAction {
    Navigate(Direction),
    ZoomIn,
    ZoomOut,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = config::LaunchArgs::from_env();
    let config = config::resolve(&args);

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
            .build(&event_loop)
            .context("creating window")?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let mut room = Room::new(&config);
    room.on_resize(logical_viewport(&window, renderer.size));

    let mut render_loop = RenderLoop::new(FrameClock::new());
    let started = Instant::now();
    let mut cursor_x = 0.0f32;

    // Geometry and sizing never wait on the background.
    let (tx, rx): (Sender<TextureResult>, Receiver<TextureResult>) = channel();
    match &config.background {
        Some(path) => texture::start_load(path.clone(), tx),
        None => log::info!("no background configured, front wall uses a flat fill"),
    }

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match rx.try_recv() {
            Ok(Ok(rgba)) => {
                renderer.load_background(rgba);
                room.set_background(true);
            }
            Ok(Err(e)) => {
                log::error!("{e}; front wall falls back to a flat fill");
                room.set_background(false);
            }
            Err(_) => {}
        }

        match event {
            Event::WindowEvent { event, .. } => {
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                let scale = window.scale_factor() as f32;

                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        room.on_resize(logical_viewport(&window, new_size));
                    }

                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        renderer.resize(*new_inner_size);
                        room.on_resize(logical_viewport(&window, *new_inner_size));
                    }

                    WindowEvent::KeyboardInput { input, .. } if !response.consumed => {
                        if input.state == ElementState::Pressed {
                            let direction = match input.virtual_keycode {
                                Some(VirtualKeyCode::Left) => Some(Direction::Left),
                                Some(VirtualKeyCode::Right) => Some(Direction::Right),
                                _ => None,
                            };
                            if let Some(direction) = direction {
                                room.handle_input(InputEvent::Key(direction));
                            }
                        }
                    }

                    WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                        // Releases always end a drag, even over the overlay.
                        match state {
                            ElementState::Pressed if !response.consumed => {
                                room.handle_input(InputEvent::PointerDown {
                                    x: cursor_x,
                                    time: started.elapsed().as_secs_f64(),
                                });
                            }
                            ElementState::Released => {
                                room.handle_input(InputEvent::PointerUp);
                            }
                            _ => {}
                        }
                    }

                    WindowEvent::CursorMoved { position, .. } => {
                        cursor_x = position.x as f32 / scale;
                        room.handle_input(InputEvent::PointerMove { x: cursor_x });
                    }

                    WindowEvent::Touch(touch) => {
                        let x = touch.location.x as f32 / scale;
                        let input = match touch.phase {
                            TouchPhase::Started if !response.consumed => Some(InputEvent::TouchStart { x }),
                            TouchPhase::Moved => Some(InputEvent::TouchMove { x }),
                            TouchPhase::Ended | TouchPhase::Cancelled => Some(InputEvent::TouchEnd),
                            _ => None,
                        };
                        if let Some(input) = input {
                            room.handle_input(input);
                        }
                    }

                    _ => {}
                }
            }

            Event::RedrawRequested(_) => {
                let (render_result, actions) = render_loop.tick(&mut room, |room, completed| {
                    if let Some(done) = completed {
                        log::debug!("arrived at {:?} wall", done.to);
                    }

                    renderer.update_geometry(room.geometry_mut());
                    renderer.update_camera(room.camera().rotation(), room.camera().fov());

                    let mut actions = Vec::new();
                    let result = renderer.render_with_ui(&window, |ctx| draw_ui(ctx, room, &mut actions));
                    (result, actions)
                });

                for action in actions {
                    match action {
                        UiAction::Navigate(direction) => {
                            room.handle_input(InputEvent::NavButton(direction));
                        }
                        UiAction::ZoomIn => room.zoom_in(),
                        UiAction::ZoomOut => room.zoom_out(),
                    }
                }

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => log::warn!("render error: {e:?}"),
                }
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            _ => {}
        }
    });
}

fn logical_viewport(window: &Window, size: PhysicalSize<u32>) -> Viewport {
    let logical = size.to_logical::<f64>(window.scale_factor());
    Viewport::new(logical.width as f32, logical.height as f32)
}

fn draw_ui(ctx: &egui::Context, room: &Room, actions: &mut Vec<UiAction>) {
    let wall = room.camera().wall();
    let arrow = |text: &str| egui::Button::new(egui::RichText::new(text).size(28.0));

    egui::Area::new("nav_left")
        .anchor(egui::Align2::LEFT_CENTER, [16.0, 0.0])
        .show(ctx, |ui| {
            let enabled = wall.step(Direction::Left).is_some();
            if ui.add_enabled(enabled, arrow("⬅")).clicked() {
                actions.push(UiAction::Navigate(Direction::Left));
            }
        });

    egui::Area::new("nav_right")
        .anchor(egui::Align2::RIGHT_CENTER, [-16.0, 0.0])
        .show(ctx, |ui| {
            let enabled = wall.step(Direction::Right).is_some();
            if ui.add_enabled(enabled, arrow("➡")).clicked() {
                actions.push(UiAction::Navigate(Direction::Right));
            }
        });

    egui::Area::new("zoom_controls")
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("−").clicked() {
                    actions.push(UiAction::ZoomOut);
                }
                ui.label(room.camera().zoom_readout());
                if ui.button("+").clicked() {
                    actions.push(UiAction::ZoomIn);
                }
            });
        });

    if let Some((_, content)) = room.active_content() {
        egui::Window::new(content.title.as_str())
            .id(egui::Id::new("wall_content"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -48.0])
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(content.body.as_str());
            });
    }
}
