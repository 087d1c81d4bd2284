//! Horizontal movement and camera scrolling
//!
//! Three coupled coordinates: `world_x = camera.x + screen_x` holds after
//! every step. Near the middle of the screen the camera moves instead of the
//! character; when the camera hits its limit the remainder of the step moves
//! the character on screen.

use super::collision::box_collides_block;
use super::grid::Grid;
use super::state::{Camera, Character, Direction, GameEvent};
use crate::tuning::Tuning;

/// What a single movement step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Character moved on screen, camera unchanged
    Moved,
    /// Camera advanced (possibly handing overflow to the screen position)
    Scrolled,
    /// Step would leave the world (or can't land whole on screen); nothing changed
    AtWorldEdge,
    /// A block is in the way; nothing changed
    Blocked,
}

/// Apply one horizontal movement input
pub fn step(
    ch: &mut Character,
    camera: &mut Camera,
    dir: Direction,
    tuning: &Tuning,
    grid: Option<&Grid>,
    events: &mut Vec<GameEvent>,
) -> MoveOutcome {
    ch.facing = dir.facing();

    let delta = tuning.movement_speed * dir.sign();
    let old_world_x = ch.world_x;
    let target_x = old_world_x + delta;
    if !(0..=tuning.max_world_x()).contains(&target_x) {
        return MoveOutcome::AtWorldEdge;
    }

    let max_camera = tuning.max_camera_x();
    let threshold = tuning.scroll_threshold();
    let scrolls = match dir {
        Direction::Right => ch.screen_x >= threshold && camera.x < max_camera,
        Direction::Left => ch.screen_x <= threshold && camera.x > 0,
    };

    let (camera_x, screen_x, outcome) = if scrolls {
        let unclamped = camera.x + delta;
        let camera_x = unclamped.clamp(0, max_camera);
        // Whatever the camera couldn't absorb moves the character instead
        (camera_x, ch.screen_x + (unclamped - camera_x), MoveOutcome::Scrolled)
    } else {
        let screen_x = (ch.screen_x + delta).clamp(0, tuning.max_screen_x());
        (camera.x, screen_x, MoveOutcome::Moved)
    };
    let world_x = camera_x + screen_x;
    if world_x != target_x || !(0..=tuning.max_screen_x()).contains(&screen_x) {
        log::debug!("Step to world x {} clipped at screen x {}", target_x, screen_x);
        return MoveOutcome::AtWorldEdge;
    }

    if let Some(grid) = grid {
        let hitbox = ch.hitbox_at(world_x, ch.y_pos, tuning);
        if box_collides_block(grid, tuning.cell_size, &hitbox) {
            log::debug!("Bumped into block at world x {}", world_x);
            events.push(GameEvent::Bump);
            return MoveOutcome::Blocked;
        }
    }

    ch.world_x = world_x;
    ch.screen_x = screen_x;
    camera.x = camera_x;

    if world_x != old_world_x && (world_x == 0 || world_x == tuning.max_world_x()) {
        log::debug!("Reached world boundary at {}", world_x);
        events.push(GameEvent::BoundaryHit);
    }

    outcome
}
