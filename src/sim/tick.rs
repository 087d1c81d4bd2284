//! Input dispatch and the per-frame simulation tick
//!
//! A frame applies at most one input event, then exactly one physics tick.
//! Ticks run even with no input so gravity keeps acting on idle frames.

use super::collision::collect_pills;
use super::state::{Direction, GameEvent, GameState};
use super::{physics, scroll};
use crate::platform::{InputEvent, InputKey, InputKind, InputQueue};

/// Whether the frame loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Exit,
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Back was pressed; the caller should end the session
    pub exit: bool,
    /// Feedback signals raised during the frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Dispatch one input event
    ///
    /// Feedback events pile up in the state until [`GameState::drain_events`]
    /// (or [`run_frame`]) takes them.
    pub fn apply_input(&mut self, event: &InputEvent) -> InputOutcome {
        match (event.key, event.kind) {
            (InputKey::Back, InputKind::Press) => return InputOutcome::Exit,

            (InputKey::Up, InputKind::Press) => {
                if let Some(jumped) =
                    physics::trigger_jump(&mut self.character, &self.tuning, event.timestamp_ms)
                {
                    self.emit(jumped);
                }
            }
            (InputKey::Up, InputKind::Release) => {
                physics::release_jump(&mut self.character, &self.tuning);
            }

            (key @ (InputKey::Left | InputKey::Right), InputKind::Press | InputKind::Repeat) => {
                let dir = if key == InputKey::Left {
                    Direction::Left
                } else {
                    Direction::Right
                };
                scroll::step(
                    &mut self.character,
                    &mut self.camera,
                    dir,
                    &self.tuning,
                    self.grid.as_ref(),
                    &mut self.events,
                );
            }

            (InputKey::Down, InputKind::Press) => {
                let on = self.music.toggle();
                log::info!("Music {}", if on { "on" } else { "off" });
            }

            _ => {}
        }
        InputOutcome::Continue
    }
}

/// Advance the simulation by one frame's physics
///
/// Callers driving `tick` directly must drain events themselves;
/// [`run_frame`] does it for them.
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    physics::step(
        &mut state.character,
        &state.tuning,
        state.grid.as_ref(),
        &mut state.events,
    );

    if let Some(grid) = state.grid.as_mut() {
        let hitbox = state.character.hitbox(&state.tuning);
        for (row, col) in collect_pills(grid, state.tuning.cell_size, &hitbox) {
            state.score += state.tuning.pill_reward;
            state.events.push(GameEvent::PillCollected { row, col });
            log::debug!(
                "Pill at ({}, {}), score {}, {} left",
                row,
                col,
                state.score,
                grid.pill_count()
            );
        }
    }
}

/// Run one frame: apply the oldest queued event (if any), then tick
pub fn run_frame(state: &mut GameState, queue: &mut InputQueue) -> FrameOutcome {
    if let Some(event) = queue.pop() {
        if state.apply_input(&event) == InputOutcome::Exit {
            log::info!("Exit requested at tick {}", state.time_ticks);
            return FrameOutcome {
                exit: true,
                events: state.drain_events(),
            };
        }
    }

    tick(state);

    FrameOutcome {
        exit: false,
        events: state.drain_events(),
    }
}
