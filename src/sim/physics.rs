//! Vertical physics and the jump state machine
//!
//! Grounded -> Rising on a jump trigger; every airborne tick integrates
//! gravity, resolves ceiling bumps and landings against the grid, then falls
//! back on the ground plane. Rising/Falling follow the velocity sign.

use super::collision::{box_collides_block, ground_support};
use super::grid::Grid;
use super::state::{Character, GameEvent, JumpPhase};
use crate::tuning::{JumpPolicy, Tuning};

/// Apply a jump press; returns the event if the character left the ground
pub fn trigger_jump(ch: &mut Character, tuning: &Tuning, now_ms: u32) -> Option<GameEvent> {
    if !ch.on_ground() {
        return None;
    }

    let big = match tuning.jump_policy {
        JumpPolicy::DoubleTap { window_ms } => ch
            .last_jump_ms
            .is_some_and(|last| now_ms.wrapping_sub(last) < window_ms),
        JumpPolicy::PressDuration { .. } => true,
    };

    ch.y_velocity = if big {
        tuning.big_jump_velocity
    } else {
        tuning.small_jump_velocity
    };
    ch.last_jump_ms = Some(now_ms);
    ch.phase = JumpPhase::Rising;
    log::debug!("Jump ({}) at {} ms", if big { "big" } else { "small" }, now_ms);

    Some(GameEvent::Jumped { big })
}

/// Apply a jump release; cuts upward speed under the press-duration policy
pub fn release_jump(ch: &mut Character, tuning: &Tuning) {
    let JumpPolicy::PressDuration { release_factor_pct } = tuning.jump_policy else {
        return;
    };
    if ch.phase == JumpPhase::Rising && ch.y_velocity < 0 {
        ch.y_velocity = ch.y_velocity * release_factor_pct / 100;
        log::debug!("Jump cut, velocity now {}", ch.y_velocity);
    }
}

/// Is the character standing on something at its current position?
pub fn is_supported(ch: &Character, tuning: &Tuning, grid: Option<&Grid>) -> bool {
    ch.y_pos >= tuning.ground_rest_y()
        || grid.is_some_and(|g| ground_support(g, tuning.cell_size, &ch.hitbox(tuning)).is_some())
}

/// Advance vertical motion by one tick
pub fn step(ch: &mut Character, tuning: &Tuning, grid: Option<&Grid>, events: &mut Vec<GameEvent>) {
    if ch.on_ground() {
        if is_supported(ch, tuning, grid) {
            return;
        }
        // Walked off an edge
        ch.phase = JumpPhase::Falling;
        log::debug!("Left support at world x {}", ch.world_x);
    }

    ch.y_velocity = (ch.y_velocity + tuning.gravity).min(tuning.max_fall_speed);
    let mut next_y = ch.y_pos + ch.y_velocity;

    if let Some(cap) = tuning.max_jump_height {
        let ceiling = tuning.ground_rest_y() - cap;
        if next_y < ceiling {
            next_y = ceiling;
            ch.y_velocity = 0;
        }
    }

    let mut landed = false;
    match grid {
        Some(grid) if ch.y_velocity < 0 => {
            let head = ch.hitbox_at(ch.world_x, next_y, tuning);
            if box_collides_block(grid, tuning.cell_size, &head) {
                log::debug!("Head bump at y {}", next_y);
                ch.y_velocity = 0;
                events.push(GameEvent::Bump);
            } else {
                ch.y_pos = next_y;
            }
        }
        Some(grid) => {
            let feet = ch.hitbox_at(ch.world_x, next_y, tuning);
            match ground_support(grid, tuning.cell_size, &feet) {
                Some(support) => {
                    ch.y_pos = support.rest_y;
                    ch.y_velocity = 0;
                    landed = true;
                }
                None => ch.y_pos = next_y,
            }
        }
        None => ch.y_pos = next_y,
    }

    let rest_y = tuning.ground_rest_y();
    if ch.y_pos >= rest_y {
        ch.y_pos = rest_y;
        ch.y_velocity = 0;
        landed = true;
    }

    if landed {
        ch.phase = JumpPhase::Grounded;
        events.push(GameEvent::Landed);
        log::debug!("Landed at y {}", ch.y_pos);
    } else {
        ch.phase = JumpPhase::airborne(ch.y_velocity);
    }
    log::trace!("y {} vy {} {:?}", ch.y_pos, ch.y_velocity, ch.phase);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::CellKind;

    fn airborne_ticks(ch: &mut Character, tuning: &Tuning, grid: Option<&Grid>) -> (i32, u32) {
        let mut apex = ch.y_pos;
        let mut ticks = 0;
        let mut events = Vec::new();
        while !ch.on_ground() && ticks < 100 {
            step(ch, tuning, grid, &mut events);
            apex = apex.min(ch.y_pos);
            ticks += 1;
        }
        (apex, ticks)
    }

    #[test]
    fn test_grounded_tick_is_idempotent() {
        let tuning = Tuning::default();
        let mut ch = Character::spawn(&tuning);
        let before = ch.clone();
        let mut events = Vec::new();
        for _ in 0..10 {
            step(&mut ch, &tuning, None, &mut events);
        }
        assert_eq!(ch, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_small_jump_arc() {
        let tuning = Tuning::default();
        let mut ch = Character::spawn(&tuning);

        let event = trigger_jump(&mut ch, &tuning, 1000);
        assert_eq!(event, Some(GameEvent::Jumped { big: false }));
        assert_eq!(ch.y_velocity, -10);
        assert_eq!(ch.phase, JumpPhase::Rising);

        let mut events = Vec::new();
        step(&mut ch, &tuning, None, &mut events);
        assert_eq!(ch.y_velocity, -8);
        assert_eq!(ch.y_pos, 41);
        assert_eq!(ch.phase, JumpPhase::Rising);
        assert!(!ch.on_ground());

        let (apex, ticks) = airborne_ticks(&mut ch, &tuning, None);
        // 49 - (8 + 6 + 4 + 2)
        assert_eq!(apex, 29);
        assert_eq!(ticks, 8);
        assert_eq!(ch.y_pos, 49);
        assert_eq!(ch.y_velocity, 0);
    }

    #[test]
    fn test_double_tap_window() {
        let tuning = Tuning::default();
        let mut ch = Character::spawn(&tuning);
        trigger_jump(&mut ch, &tuning, 1000);
        airborne_ticks(&mut ch, &tuning, None);

        // Within 300 ms of the last jump
        assert_eq!(
            trigger_jump(&mut ch, &tuning, 1250),
            Some(GameEvent::Jumped { big: true })
        );
        assert_eq!(ch.y_velocity, -14);
        airborne_ticks(&mut ch, &tuning, None);

        // Too late
        assert_eq!(
            trigger_jump(&mut ch, &tuning, 1550),
            Some(GameEvent::Jumped { big: false })
        );
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let tuning = Tuning::default();
        let mut ch = Character::spawn(&tuning);
        trigger_jump(&mut ch, &tuning, 0);
        assert_eq!(trigger_jump(&mut ch, &tuning, 50), None);
        assert_eq!(ch.y_velocity, -10);
        assert_eq!(ch.last_jump_ms, Some(0));
    }

    #[test]
    fn test_release_cuts_jump_under_press_duration() {
        let tuning = Tuning {
            jump_policy: JumpPolicy::PressDuration {
                release_factor_pct: 50,
            },
            ..Default::default()
        };
        let mut tapped = Character::spawn(&tuning);
        trigger_jump(&mut tapped, &tuning, 0);
        assert_eq!(tapped.y_velocity, -14);
        release_jump(&mut tapped, &tuning);
        assert_eq!(tapped.y_velocity, -7);
        let (tap_apex, _) = airborne_ticks(&mut tapped, &tuning, None);

        let mut held = Character::spawn(&tuning);
        trigger_jump(&mut held, &tuning, 0);
        let (hold_apex, _) = airborne_ticks(&mut held, &tuning, None);

        assert!(hold_apex < tap_apex);
        // Releasing on the way down changes nothing
        release_jump(&mut held, &tuning);
        assert_eq!(held.y_velocity, 0);
    }

    #[test]
    fn test_release_ignored_under_double_tap() {
        let tuning = Tuning::default();
        let mut ch = Character::spawn(&tuning);
        trigger_jump(&mut ch, &tuning, 0);
        release_jump(&mut ch, &tuning);
        assert_eq!(ch.y_velocity, -10);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let tuning = Tuning::default();
        let mut ch = Character::spawn(&tuning);
        ch.y_pos = -100;
        ch.phase = JumpPhase::Falling;
        let mut events = Vec::new();
        for _ in 0..8 {
            step(&mut ch, &tuning, None, &mut events);
        }
        assert_eq!(ch.y_velocity, 10);
    }

    #[test]
    fn test_jump_height_cap() {
        let tuning = Tuning {
            max_jump_height: Some(12),
            ..Default::default()
        };
        let mut ch = Character::spawn(&tuning);
        trigger_jump(&mut ch, &tuning, 0);
        let (apex, _) = airborne_ticks(&mut ch, &tuning, None);
        assert_eq!(apex, 49 - 12);
    }

    #[test]
    fn test_head_bump_cancels_rise() {
        let tuning = Tuning::default();
        let mut grid = Grid::empty(6, 39);
        // Block in row 3 over the character (x 32..41 -> cols 3-4)
        grid.place(3, 3, CellKind::Block);
        let mut ch = Character::spawn(&tuning);
        trigger_jump(&mut ch, &tuning, 0);

        let mut events = Vec::new();
        // y 49 -> 41 is clear (rows 4-5)
        step(&mut ch, &tuning, Some(&grid), &mut events);
        assert_eq!(ch.y_pos, 41);
        // y 41 -> 35 puts the top corners in row 3
        step(&mut ch, &tuning, Some(&grid), &mut events);
        assert_eq!(ch.y_pos, 41);
        assert_eq!(ch.y_velocity, 0);
        assert_eq!(events, vec![GameEvent::Bump]);
        assert_eq!(ch.phase, JumpPhase::Falling);

        airborne_ticks(&mut ch, &tuning, Some(&grid));
        assert_eq!(ch.y_pos, 49);
    }

    #[test]
    fn test_land_on_block_top() {
        let tuning = Tuning::default();
        let mut grid = Grid::empty(6, 39);
        grid.place(5, 3, CellKind::Block);
        let mut ch = Character::spawn(&tuning);
        ch.world_x = 30;
        ch.screen_x = 30;
        ch.y_pos = 5;
        ch.phase = JumpPhase::Falling;

        let (_, _) = airborne_ticks(&mut ch, &tuning, Some(&grid));
        assert_eq!(ch.y_pos, 40);
        assert!(ch.on_ground());

        // Resting on the block is stable
        let before = ch.clone();
        let mut events = Vec::new();
        step(&mut ch, &tuning, Some(&grid), &mut events);
        assert_eq!(ch, before);
    }

    #[test]
    fn test_walk_off_block_falls() {
        let tuning = Tuning::default();
        let grid = Grid::empty(6, 39);
        let mut ch = Character::spawn(&tuning);
        ch.y_pos = 40;

        let mut events = Vec::new();
        step(&mut ch, &tuning, Some(&grid), &mut events);
        assert_eq!(ch.phase, JumpPhase::Falling);
        assert_eq!(ch.y_pos, 42);

        airborne_ticks(&mut ch, &tuning, Some(&grid));
        assert_eq!(ch.y_pos, 49);
    }
}
