//! Panis entry point
//!
//! Headless native runner: feeds a scripted demo through the input queue,
//! runs the frame loop, and prints the final snapshot as JSON.
//!
//! Usage: `panis [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use panis::GameConfig;
    use panis::audio::{LogSink, route_feedback, spawn_music};
    use panis::consts::FRAME_MS;
    use panis::platform::{InputEvent, InputKey, InputKind, InputQueue};
    use panis::sim::{GameState, run_frame};

    /// Frames to run before giving up on the script's Back press
    const MAX_FRAMES: u32 = 400;

    /// Walk right across the level hopping along the way, walk back, quit
    fn script(frame: u32) -> Option<(InputKey, InputKind)> {
        match frame {
            1 => Some((InputKey::Right, InputKind::Press)),
            2..=90 if frame % 12 == 0 => Some((InputKey::Up, InputKind::Press)),
            2..=90 => Some((InputKey::Right, InputKind::Repeat)),
            91 => Some((InputKey::Right, InputKind::Release)),
            100 => Some((InputKey::Left, InputKind::Press)),
            101..=140 if frame % 15 == 0 => Some((InputKey::Up, InputKind::Press)),
            101..=140 => Some((InputKey::Left, InputKind::Repeat)),
            141 => Some((InputKey::Left, InputKind::Release)),
            160 => Some((InputKey::Back, InputKind::Press)),
            _ => None,
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> i32 {
        let path = std::env::args_os().nth(1).map(PathBuf::from);
        let config = GameConfig::load_or_default(path.as_deref());
        if let Err(e) = config.tuning.validate() {
            log::error!("{e}");
            return 1;
        }

        let seed = config.tuning.seed.unwrap_or_else(clock_seed);
        let mut state = GameState::new(config.tuning.clone(), seed);
        state.show_debug = config.settings.show_debug;
        state.music.set(config.settings.effective_music());

        let music = spawn_music(state.music.clone(), |note| {
            log::trace!("note {:.0} Hz for {} ms", note.freq_hz, note.duration_ms);
        });

        let mut queue = InputQueue::default();
        let mut sink = LogSink::default();
        let mut frames = 0;
        for frame in 0..MAX_FRAMES {
            if let Some((key, kind)) = script(frame) {
                queue.push(InputEvent::new(key, kind, frame * FRAME_MS));
            }
            let outcome = run_frame(&mut state, &mut queue);
            route_feedback(&outcome.events, &config.settings, &mut sink);
            frames = frame + 1;
            if outcome.exit {
                break;
            }
        }
        music.stop();

        log::info!(
            "Demo finished after {} frames: score {}, {} pills left, {} vibrations, {} sounds",
            frames,
            state.score,
            state.pill_count(),
            sink.vibrations,
            sink.sounds
        );

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                1
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Panis (headless) starting...");
    std::process::exit(demo::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on wasm; embed the library instead
}
