//! Haptic/sound feedback and background music
//!
//! The simulation only emits [`GameEvent`]s; this module turns them into
//! vibration and sound requests on a [`FeedbackSink`]. Music runs on its own
//! thread and shares nothing with the game except a [`MusicFlag`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Walked or jumped into a block
    Bump,
    /// Reached the end of the world
    Boundary,
    /// Small hop
    Jump,
    /// Double-tap jump
    BigJump,
    /// Pill collected
    Pickup,
}

/// Output side of the feedback pipeline (vibration motor, speaker)
pub trait FeedbackSink {
    /// Single short vibration
    fn vibrate(&mut self);
    /// Fire-and-forget sound effect
    fn play(&mut self, effect: SoundEffect);
}

/// Translate one frame's events into feedback, honouring settings
pub fn route_feedback<S: FeedbackSink + ?Sized>(
    events: &[GameEvent],
    settings: &Settings,
    sink: &mut S,
) {
    let sound = settings.effective_sound_effects();
    for event in events {
        let (vibrate, effect) = match *event {
            GameEvent::Bump => (true, Some(SoundEffect::Bump)),
            GameEvent::BoundaryHit => (true, Some(SoundEffect::Boundary)),
            GameEvent::Jumped { big: false } => (false, Some(SoundEffect::Jump)),
            GameEvent::Jumped { big: true } => (false, Some(SoundEffect::BigJump)),
            GameEvent::PillCollected { .. } => (false, Some(SoundEffect::Pickup)),
            GameEvent::Landed => (false, None),
        };
        if vibrate && settings.vibration {
            sink.vibrate();
        }
        if let Some(effect) = effect.filter(|_| sound) {
            sink.play(effect);
        }
    }
}

/// Sink that only logs; used by the headless runner
#[derive(Debug, Default)]
pub struct LogSink {
    pub vibrations: u32,
    pub sounds: u32,
}

impl FeedbackSink for LogSink {
    fn vibrate(&mut self) {
        self.vibrations += 1;
        log::debug!("bzzt");
    }

    fn play(&mut self, effect: SoundEffect) {
        self.sounds += 1;
        log::debug!("sound {:?}", effect);
    }
}

/// Shared on/off switch for background music
#[derive(Debug, Clone, Default)]
pub struct MusicFlag(Arc<AtomicBool>);

impl MusicFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }

    /// Flip the flag; returns the new state
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

/// One note of a tune (0 Hz = rest)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq_hz: f32,
    pub duration_ms: u64,
}

const fn note(freq_hz: f32, duration_ms: u64) -> Note {
    Note {
        freq_hz,
        duration_ms,
    }
}

/// Looping background theme
pub const THEME: &[Note] = &[
    note(523.25, 150),
    note(659.25, 150),
    note(783.99, 150),
    note(659.25, 150),
    note(587.33, 300),
    note(0.0, 150),
    note(493.88, 150),
    note(587.33, 150),
    note(698.46, 300),
    note(0.0, 300),
];

/// How often a muted music task checks the flag again
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Handle to a running music thread; stops it on drop
#[derive(Debug)]
pub struct MusicTask {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MusicTask {
    /// Ask the thread to finish and wait for it
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Music thread panicked");
            }
        }
    }
}

impl Drop for MusicTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Play [`THEME`] in a loop while `flag` is set
pub fn spawn_music<F>(flag: MusicFlag, play: F) -> MusicTask
where
    F: FnMut(Note) + Send + 'static,
{
    spawn_tune(flag, THEME.to_vec(), play)
}

/// Play `tune` in a loop while `flag` is set
///
/// `play` starts a note and returns immediately; the thread then waits out
/// the note's duration. Nothing here ever waits on the simulation.
pub fn spawn_tune<F>(flag: MusicFlag, tune: Vec<Note>, mut play: F) -> MusicTask
where
    F: FnMut(Note) + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = Arc::clone(&stop);

    let handle = std::thread::spawn(move || {
        let mut index = 0;
        while !thread_stop.load(Ordering::Relaxed) {
            if tune.is_empty() || !flag.is_enabled() {
                std::thread::sleep(IDLE_POLL);
                continue;
            }
            let note = tune[index % tune.len()];
            play(note);
            std::thread::sleep(Duration::from_millis(note.duration_ms));
            index += 1;
        }
        log::debug!("Music thread exiting after {} notes", index);
    });

    MusicTask {
        stop,
        handle: Some(handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[derive(Default)]
    struct Recorder {
        vibrations: u32,
        sounds: Vec<SoundEffect>,
    }

    impl FeedbackSink for Recorder {
        fn vibrate(&mut self) {
            self.vibrations += 1;
        }

        fn play(&mut self, effect: SoundEffect) {
            self.sounds.push(effect);
        }
    }

    #[test]
    fn test_bumps_vibrate() {
        let mut sink = Recorder::default();
        let events = [
            GameEvent::Bump,
            GameEvent::Landed,
            GameEvent::BoundaryHit,
            GameEvent::PillCollected { row: 0, col: 0 },
        ];
        route_feedback(&events, &Settings::default(), &mut sink);
        assert_eq!(sink.vibrations, 2);
        assert_eq!(
            sink.sounds,
            vec![SoundEffect::Bump, SoundEffect::Boundary, SoundEffect::Pickup]
        );
    }

    #[test]
    fn test_settings_silence_feedback() {
        let mut sink = Recorder::default();
        let settings = Settings {
            vibration: false,
            muted: true,
            ..Default::default()
        };
        route_feedback(
            &[GameEvent::Bump, GameEvent::Jumped { big: true }],
            &settings,
            &mut sink,
        );
        assert_eq!(sink.vibrations, 0);
        assert!(sink.sounds.is_empty());
    }

    #[test]
    fn test_music_flag_toggle() {
        let flag = MusicFlag::new(false);
        let shared = flag.clone();
        assert!(flag.toggle());
        assert!(shared.is_enabled());
        assert!(!shared.toggle());
        assert!(!flag.is_enabled());
    }

    #[test]
    fn test_music_follows_flag() {
        let flag = MusicFlag::new(false);
        let (tx, rx) = mpsc::channel();
        let task = spawn_tune(flag.clone(), vec![note(440.0, 1)], move |n| {
            let _ = tx.send(n);
        });

        assert!(rx.recv_timeout(Duration::from_millis(120)).is_err());

        flag.set(true);
        let played = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(played.freq_hz, 440.0);

        task.stop();
    }
}
