use std::collections::BTreeSet;

use super::Channel;
use crate::protocol::frame::Frame;

/// Delivers every frame intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perfect;

impl Channel for Perfect {
    fn transmit(&mut self, frame: Frame) -> Frame {
        frame
    }
}

/// Corrupts the first pass of each listed sequence number; later copies of the
/// same sequence go through intact.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    corrupt_once: BTreeSet<u32>,
}

impl Scripted {
    pub fn corrupting(sequences: impl IntoIterator<Item = u32>) -> Self {
        Self {
            corrupt_once: sequences.into_iter().collect(),
        }
    }
}

impl Channel for Scripted {
    fn transmit(&mut self, frame: Frame) -> Frame {
        if self.corrupt_once.remove(&frame.sequence()) {
            frame.corrupted()
        } else {
            frame
        }
    }
}
