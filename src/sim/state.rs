//! Game state and core simulation types
//!
//! One [`GameState`] owns everything that changes during a session. The
//! physics and scrolling steps borrow only the pieces they need.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use super::grid::Grid;
use crate::audio::MusicFlag;
use crate::tuning::Tuning;

/// Vertical movement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    /// Standing on the ground plane or a block
    #[default]
    Grounded,
    /// Airborne, moving up
    Rising,
    /// Airborne, moving down (or at the apex)
    Falling,
}

impl JumpPhase {
    /// Airborne phase implied by a vertical velocity
    #[inline]
    pub fn airborne(y_velocity: i32) -> Self {
        if y_velocity < 0 {
            JumpPhase::Rising
        } else {
            JumpPhase::Falling
        }
    }
}

/// Which way the character sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Horizontal input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn facing(self) -> Facing {
        match self {
            Direction::Left => Facing::Left,
            Direction::Right => Facing::Right,
        }
    }
}

/// Fire-and-forget signals for haptics/audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Movement blocked by a solid cell (sideways or head-first)
    Bump,
    /// Character just arrived at the left or right end of the world
    BoundaryHit,
    /// Jump impulse applied
    Jumped { big: bool },
    /// Came to rest after being airborne
    Landed,
    /// Pill picked up at a grid cell
    PillCollected { row: usize, col: usize },
}

/// The player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Position in the full world
    pub world_x: i32,
    /// Position on the visible screen
    pub screen_x: i32,
    /// Top edge (0 = top of screen)
    pub y_pos: i32,
    /// Vertical speed (negative = up)
    pub y_velocity: i32,
    pub facing: Facing,
    pub phase: JumpPhase,
    /// Timestamp of the last jump that left the ground
    pub last_jump_ms: Option<u32>,
}

impl Character {
    /// Standing on the ground plane at the start position
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            world_x: tuning.char_start_x,
            screen_x: tuning.char_start_x,
            y_pos: tuning.ground_rest_y(),
            y_velocity: 0,
            facing: Facing::Right,
            phase: JumpPhase::Grounded,
            last_jump_ms: None,
        }
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.phase == JumpPhase::Grounded
    }

    /// Hitbox at the current position
    #[inline]
    pub fn hitbox(&self, tuning: &Tuning) -> Hitbox {
        self.hitbox_at(self.world_x, self.y_pos, tuning)
    }

    /// Hitbox at a tentative position
    #[inline]
    pub fn hitbox_at(&self, world_x: i32, y_pos: i32, tuning: &Tuning) -> Hitbox {
        Hitbox::new(world_x, y_pos, tuning.char_width, tuning.char_height)
    }
}

/// Horizontal scroll offset into the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: i32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Layout seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub character: Character,
    pub camera: Camera,
    /// Collision grid (None when the grid is disabled)
    pub grid: Option<Grid>,
    /// Points from pickups
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Background music toggle shared with the music task
    pub music: MusicFlag,
    /// Expose debug overlay values to the renderer
    pub show_debug: bool,
    /// Feedback signals not yet drained by the caller
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session, generating the layout from `seed`
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let grid = tuning.grid_enabled.then(|| {
            let mut rng = Pcg32::seed_from_u64(seed);
            Grid::generate(tuning.grid_rows, tuning.grid_cols, &tuning.density, &mut rng)
        });
        Self::with_grid(tuning, seed, grid)
    }

    /// Create a session over a prepared grid
    pub fn with_grid(tuning: Tuning, seed: u64, grid: Option<Grid>) -> Self {
        let character = Character::spawn(&tuning);
        if let Some(grid) = &grid {
            log::info!(
                "Session seed {}: {}x{} grid, {} blocks, {} pills",
                seed,
                grid.rows(),
                grid.cols(),
                grid.block_count(),
                grid.pill_count()
            );
            let spawn = character.hitbox(&tuning);
            if super::collision::box_collides_block(grid, tuning.cell_size, &spawn) {
                log::warn!("Spawn point overlaps a block at world x {}", character.world_x);
            }
        } else {
            log::info!("Session seed {}: no collision grid", seed);
        }

        Self {
            seed,
            tuning,
            character,
            camera: Camera::default(),
            grid,
            score: 0,
            time_ticks: 0,
            music: MusicFlag::new(false),
            show_debug: false,
            events: Vec::new(),
        }
    }

    pub fn block_count(&self) -> u32 {
        self.grid.as_ref().map_or(0, Grid::block_count)
    }

    /// Pills still on the grid
    pub fn pill_count(&self) -> u32 {
        self.grid.as_ref().map_or(0, Grid::pill_count)
    }

    /// Queue a feedback signal
    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Feedback signals pending since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending feedback signals
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
