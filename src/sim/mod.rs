//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, polls input
//! devices, reads a clock or touches audio hardware:
//! - Integer pixel coordinates only
//! - Seeded RNG only (layout generation)
//! - Event timestamps come in with the input

pub mod collision;
pub mod grid;
pub mod physics;
pub mod scroll;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{
    Hitbox, Support, box_collides_block, cell_at, collect_pills, ground_support, has_ground_support,
};
pub use grid::{CellKind, Grid};
pub use scroll::MoveOutcome;
pub use snapshot::{Snapshot, visible_tiles};
pub use state::{Camera, Character, Direction, Facing, GameEvent, GameState, JumpPhase};
pub use tick::{FrameOutcome, InputOutcome, run_frame, tick};
