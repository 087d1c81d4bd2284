//! Read-only view handed to the renderer each frame

use serde::Serialize;

use super::grid::Grid;
use super::state::{Facing, GameState, JumpPhase};
use crate::tuning::Tuning;

/// Everything the renderer needs to draw a frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub camera_x: i32,
    pub screen_x: i32,
    pub world_x: i32,
    pub y_pos: i32,
    pub facing: Facing,
    pub phase: JumpPhase,
    pub grid: Option<&'a Grid>,
    pub score: u32,
    pub block_count: u32,
    pub pill_count: u32,
    /// First and last background tile index on screen
    pub visible_tiles: (i32, i32),
    pub music: bool,
    pub show_debug: bool,
}

/// Background tiles overlapping the viewport, clamped to the tiles that exist
pub fn visible_tiles(camera_x: i32, tuning: &Tuning) -> (i32, i32) {
    let last_tile = tuning.num_tiles - 1;
    let first = (camera_x / tuning.tile_width).clamp(0, last_tile);
    let last = ((camera_x + tuning.screen_width) / tuning.tile_width).clamp(0, last_tile);
    (first, last)
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            camera_x: self.camera.x,
            screen_x: self.character.screen_x,
            world_x: self.character.world_x,
            y_pos: self.character.y_pos,
            facing: self.character.facing,
            phase: self.character.phase,
            grid: self.grid.as_ref(),
            score: self.score,
            block_count: self.block_count(),
            pill_count: self.pill_count(),
            visible_tiles: visible_tiles(self.camera.x, &self.tuning),
            music: self.music.is_enabled(),
            show_debug: self.show_debug,
        }
    }
}
