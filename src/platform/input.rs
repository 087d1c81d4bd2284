//! Key events and the bounded input queue

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::INPUT_QUEUE_CAPACITY;

/// Hardware keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    Ok,
    Back,
}

/// Key event types as reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    Press,
    Release,
    /// Press and release before the long-press timeout
    Short,
    /// Held past the long-press timeout
    Long,
    /// Auto-repeat while held
    Repeat,
}

/// One key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub key: InputKey,
    pub kind: InputKind,
    /// Device tick time in milliseconds (wraps)
    pub timestamp_ms: u32,
}

impl InputEvent {
    pub fn new(key: InputKey, kind: InputKind, timestamp_ms: u32) -> Self {
        Self {
            key,
            kind,
            timestamp_ms,
        }
    }

    pub fn press(key: InputKey, timestamp_ms: u32) -> Self {
        Self::new(key, InputKind::Press, timestamp_ms)
    }

    pub fn release(key: InputKey, timestamp_ms: u32) -> Self {
        Self::new(key, InputKind::Release, timestamp_ms)
    }
}

/// Bounded FIFO between the input callback and the frame loop
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(INPUT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Enqueue an event; a full queue drops it and returns false
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.events.len() >= self.capacity {
            log::warn!("Input queue full, dropping {:?} {:?}", event.key, event.kind);
            return false;
        }
        self.events.push_back(event);
        true
    }

    /// Oldest pending event
    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
