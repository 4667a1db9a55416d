//! Buffer pairing completed flip-ups.
//!
//! A bounded circular buffer of card ids awaiting pairing, capacity equal
//! to the board's card count. Pairing is strictly by completion order
//! (FIFO), not by flip-request order: the two oldest completed flips are
//! drained together as soon as both are present.

use crate::core::CardId;

/// Bounded FIFO of completed face-up flips.
#[derive(Clone, Debug)]
pub struct MatchQueue {
    buf: Vec<CardId>,
    head: usize,
    tail: usize,
    count: usize,
}

impl MatchQueue {
    /// Create a queue with a fixed capacity (the board's card count).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![CardId::new(0); capacity],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Append a card id. Returns `false` when the buffer is full.
    pub fn enqueue(&mut self, card: CardId) -> bool {
        if self.count == self.buf.len() {
            return false;
        }

        self.buf[self.tail] = card;
        self.tail = (self.tail + 1) % self.buf.len();
        self.count += 1;
        true
    }

    /// Remove and return the oldest card id.
    pub fn dequeue(&mut self) -> Option<CardId> {
        if self.count == 0 {
            return None;
        }

        let card = self.buf[self.head];
        self.head = (self.head + 1) % self.buf.len();
        self.count -= 1;
        Some(card)
    }

    /// Number of buffered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}
