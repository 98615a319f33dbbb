use anyhow::{Context, Result};
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager, KeyBindings};
use game::hud;
use game::{GameConfig, RaceSession, Screen};

const WINDOW_TITLE: &str = "Neon Racer";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let route = std::env::args().nth(1).unwrap_or_else(|| "/game".to_string());
    let screen = Screen::from_path(&route)?;
    let config = GameConfig::discover().context("Failed to load game configuration")?;

    if screen != Screen::Game {
        for line in screen.lines(&config.settings) {
            info!("{line}");
        }
        return Ok(());
    }

    run_game(&config)
}

fn run_game(config: &GameConfig) -> Result<()> {
    info!("Starting {WINDOW_TITLE}...");
    info!("{}", hud::CONTROLS_HINT);

    // Create event loop and window
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)
        .context("Failed to create window")?;

    info!("Window created successfully");

    let mut input = InputManager::new(KeyBindings::with_overrides(&config.controls));
    let mut game_loop = GameLoop::new();
    let mut session = RaceSession::new(config, game_loop.fixed_timestep());
    let size = window.inner_size();
    session.resize(size.width, size.height);
    session.start();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    session.teardown();
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::Focused(focused) => {
                    input.process_focus(focused);
                }
                WindowEvent::Resized(physical_size) => {
                    info!("Window resized to {:?}", physical_size);
                    session.resize(physical_size.width, physical_size.height);
                }
                WindowEvent::RedrawRequested => {
                    if input.just_pressed(Action::Pause) {
                        game_loop.toggle_pause();
                        session.set_paused(game_loop.is_paused());
                    }

                    let ticks = game_loop.begin_frame();
                    let controls = input.snapshot();
                    for _ in 0..ticks {
                        session.tick(&controls);
                    }

                    session.frame(&input, game_loop.render_delta_time());
                    input.end_frame();

                    // Drawing belongs to the external renderer; the frame is
                    // built here so it is ready for upload.
                    let frame = session.render_frame();
                    log::trace!(
                        "Frame {} (tick {}): {} instances, {} + {} bytes, {:.0} fps",
                        game_loop.frame_count(),
                        game_loop.tick_count(),
                        frame.instances.len(),
                        frame.camera_bytes().len(),
                        frame.instance_bytes().len(),
                        game_loop.fps()
                    );

                    window.set_title(&format!(
                        "{WINDOW_TITLE} | {}",
                        hud::hud_line(session.state(), session.camera().mode())
                    ));
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
