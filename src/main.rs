use std::time::{Duration, Instant};

use sdl2::event::{Event, WindowEvent};

use super_fighter_ultimate::backend::{SdlRenderer, SurfaceContent, poll_devices};
use super_fighter_ultimate::config::{DEFAULT_CONFIG_FILE, GameConfig};
use super_fighter_ultimate::screen::{GameTime, ScreenManager};
use super_fighter_ultimate::screens::{BackgroundScreen, MainMenuScreen};

const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> Result<(), String> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let config = GameConfig::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path, e))?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window(&config.window_title, config.window_width, config.window_height)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;

    let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();
    let mut renderer = SdlRenderer::new(canvas, &texture_creator, &config.content_root);
    let mut event_pump = sdl_context.event_pump()?;

    let content = SurfaceContent::new(&config.content_root);
    let mut manager = ScreenManager::from_config(&config, Box::new(content));
    manager
        .initialize()
        .map_err(|e| format!("Failed to load shared content: {}", e))?;

    let restored = config.restore_state && manager.deserialize_state();
    if !restored {
        manager
            .add_screen(Box::new(BackgroundScreen::new()), None)
            .map_err(|e| e.to_string())?;
        manager
            .add_screen(Box::new(MainMenuScreen::new()), None)
            .map_err(|e| e.to_string())?;
    }
    log::info!("Starting with screens {:?}", manager.screen_kinds());

    let start = Instant::now();
    let mut last_frame = start;
    let mut window_active = true;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => window_active = true,
                    WindowEvent::FocusLost => window_active = false,
                    WindowEvent::SizeChanged(width, height) => {
                        manager.set_viewport(width.max(0) as u32, height.max(0) as u32);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        let now = Instant::now();
        let time = GameTime::new(now - last_frame, now - start);
        last_frame = now;

        manager.update(&time, window_active, poll_devices(&event_pump));
        if manager.quit_requested() {
            break 'running;
        }

        renderer.clear();
        manager.draw(&time, &mut renderer)?;
        renderer.present();

        std::thread::sleep(FRAME_TIME);
    }

    if let Err(e) = manager.serialize_state() {
        log::error!("Failed to save screen state: {}", e);
    }
    manager.unload_content();

    Ok(())
}
