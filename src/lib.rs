//! Panis - a side-scrolling bread platformer for a 128x64 handheld
//!
//! Core modules:
//! - `sim`: Simulation (jump physics, camera scrolling, grid collision, pickups)
//! - `platform`: Input events and the bounded event queue
//! - `audio`: Haptic/sound feedback routing and the background music task
//! - `tuning`: Data-driven game balance and config loading
//! - `settings`: Player feedback preferences

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{GameConfig, JumpPolicy, Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Display dimensions
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 64;

    /// Horizontal pixels per movement step
    pub const MOVEMENT_SPEED: i32 = 4;
    /// Y of the ground line (character rests with its bottom just above it)
    pub const GROUND_Y: i32 = 59;

    /// Jump physics (negative = upward)
    pub const GRAVITY: i32 = 2;
    pub const SMALL_JUMP_VELOCITY: i32 = -10;
    pub const BIG_JUMP_VELOCITY: i32 = -14;
    pub const MAX_FALL_SPEED: i32 = 10;
    /// Two jump presses closer than this count as a double press. The second
    /// press only counts while grounded, so the big jump needs frames paced by
    /// input events rather than the idle frame timeout.
    pub const DOUBLE_CLICK_MS: u32 = 300;

    /// Background tiles
    pub const TILE_WIDTH: i32 = 128;
    pub const NUM_TILES: i32 = 3;
    pub const TOTAL_WORLD_WIDTH: i32 = TILE_WIDTH * NUM_TILES;

    /// Character hitbox
    pub const CHAR_WIDTH: i32 = 10;
    pub const CHAR_HEIGHT: i32 = 10;

    /// Camera starts following once the character passes half the screen
    pub const START_SCROLL_X: i32 = SCREEN_WIDTH / 2;
    /// Character spawns at a quarter of the screen
    pub const CHAR_START_X: i32 = SCREEN_WIDTH / 4;

    /// Collision grid
    pub const CELL_SIZE: i32 = 10;
    pub const GRID_ROWS: usize = 6;
    pub const GRID_COLS: usize = 39;

    /// Score per collected pill
    pub const PILL_REWARD: u32 = 10;

    /// Default layout densities (fraction of all grid cells)
    pub const AIR_BLOCK_FRACTION: f32 = 0.005;
    pub const GROUND_BLOCK_FRACTION: f32 = 0.02;
    pub const PILL_FRACTION: f32 = 0.02;

    /// Input queue depth
    pub const INPUT_QUEUE_CAPACITY: usize = 8;
    /// Frame period of the handheld loop (queue wait timeout)
    pub const FRAME_MS: u32 = 100;
}
