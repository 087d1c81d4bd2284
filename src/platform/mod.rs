//! Platform boundary
//!
//! Input arrives from the device as discrete key events and is buffered in a
//! small bounded queue that the frame loop drains one event per frame.

pub mod input;

pub use input::{InputEvent, InputKey, InputKind, InputQueue};
