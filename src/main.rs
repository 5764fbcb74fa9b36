use anyhow::Result;
use env_logger::Env;
use log::{debug, error, info, warn};
use std::time::Duration;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::{Action, InputConfig, InputManager, InputSource};
use game::{DemoHost, Scene, SceneConfig};

/// Frames slower than this are reported
const SLOW_FRAME: Duration = Duration::from_millis(250);

/// The level's 256x244 viewport at 3x scale
const WINDOW_SIZE: (f64, f64) = (768.0, 732.0);

/// Frames between status lines at debug level
const STATUS_INTERVAL: u64 = 600;

/// Cursor keys plus A/D/Space
fn input_config() -> InputConfig {
    let mut config = InputConfig::with_defaults();
    config.bind(InputSource::key(KeyCode::KeyA), Action::MoveLeft);
    config.bind(InputSource::key(KeyCode::KeyD), Action::MoveRight);
    config.bind(InputSource::key(KeyCode::Space), Action::Jump);
    config
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG overrides the default level)
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting Pixel Plumber...");

    let mut scene = Scene::create(SceneConfig::default())?;
    let mut host = DemoHost::new(scene.config());
    host.apply(&scene.drain_commands());

    let mut input = InputManager::new(input_config());
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Pixel Plumber")
        .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                let pressed = event.state == ElementState::Pressed && !event.repeat;
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyP) if pressed => game_loop.toggle_pause(),
                    PhysicalKey::Code(KeyCode::KeyR) if pressed => scene.restart(),
                    _ => input.process_keyboard_event(&event),
                }
            }
            Event::AboutToWait => {
                let tick = game_loop.begin_frame();
                if tick.frame_time > SLOW_FRAME {
                    warn!("Slow frame: {:?}", tick.frame_time);
                }

                if !game_loop.is_paused() {
                    // Deferred actions follow real time even when the step cap drops backlog
                    let restarted = scene.advance_timers(tick.frame_time);
                    host.apply(&scene.drain_commands());

                    // The rest of this frame's steps would sample the old level
                    let steps = if restarted { 0 } else { tick.steps };
                    for _ in 0..steps {
                        let signals = host.step(&mut scene, input.take_snapshot(), FIXED_TIMESTEP);
                        match scene.update(&signals, FIXED_TIMESTEP) {
                            Ok(commands) => host.apply(&commands),
                            Err(e) => {
                                error!("Scene update failed: {}", e);
                                elwt.exit();
                                return;
                            }
                        }
                    }
                }

                if game_loop.frame_count() % STATUS_INTERVAL == 0 {
                    debug!(
                        "{:.1} fps, {} frames, {} steps",
                        game_loop.fps(),
                        game_loop.frame_count(),
                        game_loop.step_count()
                    );
                    let player = scene.player();
                    debug!(
                        "Player {:?} at {:?} facing {:?} ({:?} frame {:?}); patrol at {:?} heading {:?} ({:?}, {} reversals); {} timers pending, {} restarts",
                        player.state(),
                        host.player_position(),
                        player.facing(),
                        player.current_animation(),
                        player.sprite_frame(scene.registry()),
                        host.patrol_position(),
                        scene.patrol().direction(),
                        scene.patrol().current_animation(),
                        scene.patrol().reversals(),
                        scene.pending_timers(),
                        scene.restarts()
                    );
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
