//! Acceptance window and reorder buffer.
//!
//! Frames in `[expected_sequence, expected_sequence + window_size)` are
//! accepted. The expected frame is delivered at once and releases any run of
//! buffered successors; other in-window frames wait in `pending`.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use derive_more::Display;

use crate::protocol::frame::Frame;

/// What happened to a frame handed to [`Receiver::receive`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Reception {
    #[display("discarded (corrupted)")]
    Corrupted,
    #[display("discarded (already delivered)")]
    Duplicate,
    #[display("discarded (beyond window)")]
    BeyondWindow,
    #[display("buffered")]
    Buffered,
    /// `released` counts the frame itself plus any drained successors.
    #[display("delivered, {released} released")]
    Delivered { released: u32 },
}

impl Reception {
    /// `true` when the receiver now holds the frame (delivered or buffered).
    pub fn is_accepted(&self) -> bool {
        matches!(self, Reception::Buffered | Reception::Delivered { .. })
    }
}

#[derive(Debug)]
pub struct Receiver {
    expected_sequence: u32,
    window_size: NonZeroU32,
    delivered: Vec<Frame>,
    pending: BTreeMap<u32, Frame>,
}

impl Receiver {
    pub fn new(window_size: NonZeroU32) -> Self {
        Self {
            expected_sequence: 0,
            window_size,
            delivered: Vec::new(),
            pending: BTreeMap::new(),
        }
    }

    pub fn is_in_window(&self, sequence: u32) -> bool {
        sequence >= self.expected_sequence
            && (sequence as u64) < self.expected_sequence as u64 + self.window_size.get() as u64
    }

    pub fn receive(&mut self, frame: Frame) -> Reception {
        let sequence = frame.sequence();

        let reception = if !frame.is_valid() {
            Reception::Corrupted
        } else if sequence < self.expected_sequence {
            Reception::Duplicate
        } else if !self.is_in_window(sequence) {
            Reception::BeyondWindow
        } else if sequence == self.expected_sequence {
            self.deliver(frame);
            let mut released = 1;
            while let Some(buffered) = self.pending.remove(&self.expected_sequence) {
                log::trace!("receiver: releasing buffered {buffered}");
                self.deliver(buffered);
                released += 1;
            }
            Reception::Delivered { released }
        } else {
            self.pending.insert(sequence, frame);
            Reception::Buffered
        };

        log::debug!(
            "receiver: {frame} {reception}, expecting {}",
            self.expected_sequence
        );
        reception
    }

    fn deliver(&mut self, frame: Frame) {
        self.delivered.push(frame);
        self.expected_sequence += 1;
    }

    /// Delivered frames; ordered by construction, no gaps.
    pub fn delivered_in_order(&self) -> &[Frame] {
        &self.delivered
    }

    pub fn expected_sequence(&self) -> u32 {
        self.expected_sequence
    }

    pub fn window_size(&self) -> NonZeroU32 {
        self.window_size
    }

    pub fn pending(&self) -> impl Iterator<Item = &Frame> {
        self.pending.values()
    }

    pub fn buffered(&self) -> usize {
        self.pending.len()
    }
}
