//! Presentation buffer between the socket and the draw loop.
//!
//! The draw loop always renders the oldest frame still queued while the
//! controls follow the newest one, so the felt plays bursts back in order
//! and the buttons react immediately.

use std::collections::VecDeque;
use tracing::trace;

/// Whether the head of the queue has been handed to the renderer since the
/// last append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Frames arrived and the renderer has not looked since.
    Pending,
    /// The renderer has read the head; evicting it is safe.
    Drawn,
}

/// FIFO of frames that is never empty.
#[derive(Debug, Clone)]
pub struct FrameQueue<T> {
    frames: VecDeque<T>,
    guard: Guard,
}

impl<T> FrameQueue<T> {
    /// Seed the queue with the frame rendered before the socket opens.
    pub fn new(seed: T) -> Self {
        Self {
            frames: VecDeque::from([seed]),
            guard: Guard::Pending,
        }
    }

    /// Push frames to the tail. Returns how many were added.
    pub fn append<I>(&mut self, frames: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.frames.len();
        self.frames.extend(frames);
        self.guard = Guard::Pending;
        self.frames.len() - before
    }

    /// Hand the head frame to the renderer.
    pub fn peek_oldest(&mut self) -> &T {
        self.guard = Guard::Drawn;
        self.head()
    }

    /// Head frame, without touching the guard.
    pub fn head(&self) -> &T {
        // The seed is never popped: `evict_if_safe` keeps the last frame.
        &self.frames[0]
    }

    /// Most recently appended frame.
    pub fn newest(&self) -> &T {
        &self.frames[self.frames.len() - 1]
    }

    /// Drop the head if the renderer has seen it and another frame follows.
    pub fn evict_if_safe(&mut self) -> bool {
        if self.guard != Guard::Drawn || self.frames.len() <= 1 {
            return false;
        }
        self.frames.pop_front();
        trace!(remaining = self.frames.len(), "evicted drawn frame");
        true
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn guard(&self) -> Guard {
        self.guard
    }
}
