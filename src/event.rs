//
// Copyright 2023-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use bitflags::bitflags;

/// Largest capacity an [`EventQueue`] accepts; bigger requests are clamped.
pub const MAX_QUEUE_CAPACITY: usize = 16384;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse buttons reported by the host window.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No button.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the left button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if the right button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the middle button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Logical keys the widgets react to. Anything else arrives as [`Key::Other`].
pub enum Key {
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Return / Enter.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Platform key code without a dedicated variant.
    Other(u32),
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Input event translated from the host window, in surface pixel coordinates.
pub enum GuiEvent {
    /// The pointer moved.
    MouseMove {
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
    },
    /// A mouse button went down.
    MouseDown {
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
        /// Button pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseUp {
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
        /// Button released.
        button: MouseButton,
    },
    /// The scroll wheel moved.
    MouseScroll {
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
        /// Horizontal wheel delta.
        dx: f32,
        /// Vertical wheel delta.
        dy: f32,
    },
    /// A key went down.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// A character was typed.
    TextInput(char),
}

/// Bounded FIFO between the window thread (producer) and the frame update (consumer).
///
/// When full, pushing drops the oldest queued event so the most recent input always survives.
/// All operations take one internal lock and are safe to call from two threads through an `Arc`.
#[derive(Debug)]
pub struct EventQueue {
    capacity: usize,
    inner: Mutex<QueueState>,
}

#[derive(Debug, Default)]
struct QueueState {
    events: VecDeque<GuiEvent>,
    dropped: u64,
}

impl EventQueue {
    /// Creates a queue holding at most `capacity` events (clamped to `1..=MAX_QUEUE_CAPACITY`).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_QUEUE_CAPACITY);
        Self {
            capacity,
            inner: Mutex::new(QueueState {
                events: VecDeque::with_capacity(capacity),
                dropped: 0,
            }),
        }
    }

    /// Maximum number of queued events.
    pub fn capacity(&self) -> usize { self.capacity }

    /// Number of queued events.
    pub fn len(&self) -> usize { self.lock().events.len() }

    /// Returns `true` when nothing is queued.
    pub fn is_empty(&self) -> bool { self.lock().events.is_empty() }

    /// Number of events discarded because the queue was full.
    pub fn dropped(&self) -> u64 { self.lock().dropped }

    /// Appends an event, discarding the oldest one first if the queue is full.
    pub fn enqueue(&self, event: GuiEvent) {
        let mut state = self.lock();
        if state.events.len() >= self.capacity {
            state.events.pop_front();
            state.dropped += 1;
            log::debug!("event queue full ({}), dropped oldest event", self.capacity);
        }
        state.events.push_back(event);
    }

    /// Removes and returns the oldest event.
    pub fn try_dequeue(&self) -> Option<GuiEvent> { self.lock().events.pop_front() }

    /// Moves every queued event into `buffer` (after clearing it), leaving the queue empty.
    pub fn drain_into<'a>(&self, buffer: &'a mut Vec<GuiEvent>) -> &'a mut Vec<GuiEvent> {
        buffer.clear();
        let mut state = self.lock();
        buffer.extend(state.events.drain(..));
        buffer
    }

    /// Moves every queued event into a fresh vector.
    pub fn drain(&self) -> Vec<GuiEvent> {
        let mut buffer = Vec::new();
        self.drain_into(&mut buffer);
        buffer
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // a panicking producer cannot leave the deque half-updated, so keep using it
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for EventQueue {
    fn default() -> Self { Self::new(1024) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn overflow_drops_oldest() {
        let queue = EventQueue::new(2);
        queue.enqueue(GuiEvent::TextInput('A'));
        queue.enqueue(GuiEvent::TextInput('B'));
        queue.enqueue(GuiEvent::TextInput('C'));
        assert_eq!(queue.drain(), vec![GuiEvent::TextInput('B'), GuiEvent::TextInput('C')]);
        assert_eq!(queue.dropped(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(EventQueue::new(0).capacity(), 1);
        assert_eq!(EventQueue::new(usize::MAX).capacity(), MAX_QUEUE_CAPACITY);
    }

    #[test]
    fn dequeue_is_fifo() {
        let queue = EventQueue::new(8);
        queue.enqueue(GuiEvent::KeyDown(Key::Left));
        queue.enqueue(GuiEvent::KeyUp(Key::Left));
        assert_eq!(queue.try_dequeue(), Some(GuiEvent::KeyDown(Key::Left)));
        assert_eq!(queue.try_dequeue(), Some(GuiEvent::KeyUp(Key::Left)));
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn drain_into_reuses_buffer() {
        let queue = EventQueue::new(8);
        let mut buffer = vec![GuiEvent::TextInput('x')];
        queue.enqueue(GuiEvent::MouseMove { x: 1, y: 2 });
        queue.drain_into(&mut buffer);
        assert_eq!(buffer, vec![GuiEvent::MouseMove { x: 1, y: 2 }]);
        queue.drain_into(&mut buffer);
        assert!(buffer.is_empty());
    }

    #[test]
    fn producer_thread_and_consumer_agree_on_order() {
        let queue = Arc::new(EventQueue::new(MAX_QUEUE_CAPACITY));
        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    queue.enqueue(GuiEvent::MouseMove { x: i, y: 0 });
                }
            })
        };
        let mut seen = Vec::new();
        while seen.len() < 1000 {
            if let Some(GuiEvent::MouseMove { x, .. }) = queue.try_dequeue() {
                seen.push(x);
            } else {
                thread::yield_now();
            }
        }
        producer.join().unwrap();
        assert_eq!(seen, (0..1000).collect::<Vec<_>>());
    }
}
