//! Transmit-window side of Selective-Repeat.
//!
//! ```text
//!  window_base        next_sequence     window_base + window_size
//!      │                    │                    │
//!  ────┼────────────────────┼────────────────────┼──────▶ sequence space
//!      │ <── in flight ───▶ │ <── sendable ────▶ │
//! ```
//!
//! Every frame is acknowledged on its own. The base only moves when the base
//! frame itself is acknowledged; gaps left by lost frames stay open until those
//! exact frames are acknowledged.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use crate::error::{ArqError, Result};
use crate::protocol::frame::Frame;

#[derive(Debug, Clone)]
struct InFlight {
    frame: Frame,
    transmissions: u32,
}

#[derive(Debug)]
pub struct Sender {
    window_base: u32,
    next_sequence: u32,
    window_size: NonZeroU32,
    in_flight: BTreeMap<u32, InFlight>,
}

impl Sender {
    pub fn new(window_size: NonZeroU32) -> Self {
        Self {
            window_base: 0,
            next_sequence: 0,
            window_size,
            in_flight: BTreeMap::new(),
        }
    }

    fn window_end(&self) -> u64 {
        self.window_base as u64 + self.window_size.get() as u64
    }

    pub fn can_send(&self) -> bool {
        (self.next_sequence as u64) < self.window_end() && self.next_sequence != u32::MAX
    }

    /// Issue the next frame and keep a copy until it is acknowledged.
    ///
    /// Refuses with [`ArqError::WindowFull`] when [`Self::can_send`] is false;
    /// the window is left untouched in that case.
    pub fn send(&mut self) -> Result<Frame> {
        if self.next_sequence == u32::MAX {
            return Err(ArqError::SequenceExhausted);
        }
        if !self.can_send() {
            return Err(ArqError::WindowFull {
                window_base: self.window_base,
                next_sequence: self.next_sequence,
                window_size: self.window_size.get(),
            });
        }

        let frame = Frame::new(self.next_sequence);
        self.in_flight.insert(
            frame.sequence(),
            InFlight {
                frame,
                transmissions: 1,
            },
        );
        self.next_sequence += 1;
        log::trace!("sender: sent {frame}, base {}", self.window_base);
        Ok(frame)
    }

    /// Returns `false` when `sequence` was not in flight (unknown or already
    /// acknowledged), which leaves the sender unchanged.
    pub fn acknowledge(&mut self, sequence: u32) -> bool {
        if self.in_flight.remove(&sequence).is_none() {
            log::trace!("sender: ack {sequence} not in window or already acknowledged");
            return false;
        }

        if sequence == self.window_base {
            self.window_base = self
                .in_flight
                .keys()
                .next()
                .copied()
                .unwrap_or(self.next_sequence);
        }
        log::trace!("sender: ack {sequence}, base {}", self.window_base);
        true
    }

    /// Fresh, uncorrupted copy of an in-flight frame for retransmission.
    pub fn retransmit(&mut self, sequence: u32) -> Option<Frame> {
        let entry = self.in_flight.get_mut(&sequence)?;
        entry.transmissions += 1;
        entry.frame = Frame::new(sequence);
        Some(entry.frame)
    }

    /// Fails with [`ArqError::RetriesExhausted`] once `sequence` has gone out
    /// `limit` times. `None` means no limit.
    pub fn check_retries(&self, sequence: u32, limit: Option<u32>) -> Result<()> {
        if let Some(limit) = limit
            && let Some(transmissions) = self.transmissions(sequence)
            && transmissions >= limit
        {
            return Err(ArqError::RetriesExhausted {
                sequence,
                transmissions,
            });
        }
        Ok(())
    }

    /// Reports the frames still waiting for an acknowledgement.
    ///
    /// There is no clock behind this; retransmission is always triggered from
    /// outside via [`Self::retransmit`].
    pub fn check_timeouts(&self) -> Vec<u32> {
        let outstanding: Vec<u32> = self.outstanding().collect();
        for sequence in &outstanding {
            log::debug!("sender: frame {sequence} is still in window");
        }
        outstanding
    }

    pub fn is_in_window(&self, sequence: u32) -> bool {
        sequence >= self.window_base && (sequence as u64) < self.window_end()
    }

    pub fn window_base(&self) -> u32 {
        self.window_base
    }

    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }

    pub fn window_size(&self) -> NonZeroU32 {
        self.window_size
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn has_unacked(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Unacknowledged sequence numbers, lowest first.
    pub fn outstanding(&self) -> impl Iterator<Item = u32> + '_ {
        self.in_flight.keys().copied()
    }

    pub fn transmissions(&self, sequence: u32) -> Option<u32> {
        self.in_flight.get(&sequence).map(|entry| entry.transmissions)
    }
}
