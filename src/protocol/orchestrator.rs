//! Sequential driver pairing one [`Sender`] with one [`Receiver`].
//!
//! Each call runs send → channel → receive → acknowledge to completion. Loss
//! is signalled by the corruption flag the channel sets; the driver remembers
//! those sequence numbers and retransmits them once the window is full or no
//! new frames are left.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use derive_more::Display;

use crate::config::{Retransmission, SimulationConfig};
use crate::constants::DEFAULT_MAX_TRANSMISSIONS;
use crate::error::Result;
use crate::protocol::frame::Frame;
use crate::protocol::receiver::{Receiver, Reception};
use crate::protocol::sender::Sender;
use crate::transmission::Channel;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display("{}{sequence}: {reception}", if *retransmission { "retransmitted " } else { "sent " })]
pub struct Transmission {
    pub sequence: u32,
    pub reception: Reception,
    pub retransmission: bool,
}

impl Transmission {
    pub fn acknowledged(&self) -> bool {
        self.reception != Reception::Corrupted
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub sent: u32,
    pub retransmitted: u32,
    pub corrupted: u32,
    pub acknowledged: u32,
}

#[derive(Debug)]
pub struct SelectiveRepeat {
    sender: Sender,
    receiver: Receiver,
    retransmission: Retransmission,
    max_transmissions: u32,
    lost: BTreeSet<u32>,
    stats: Stats,
}

impl SelectiveRepeat {
    pub fn new(window_size: NonZeroU32) -> Self {
        log::info!("selective repeat initialised with window size {window_size}");
        Self {
            sender: Sender::new(window_size),
            receiver: Receiver::new(window_size),
            retransmission: Retransmission::default(),
            max_transmissions: DEFAULT_MAX_TRANSMISSIONS,
            lost: BTreeSet::new(),
            stats: Stats::default(),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.window_size)
            .with_retransmission(config.retransmission, config.max_transmissions)
    }

    /// `max_transmissions` counts the first send too; it only applies to
    /// [`Retransmission::Lossy`].
    pub fn with_retransmission(mut self, policy: Retransmission, max_transmissions: u32) -> Self {
        self.retransmission = policy;
        self.max_transmissions = max_transmissions.max(1);
        self
    }

    /// Send one new frame through `channel` and settle it.
    pub fn transmit<C: Channel>(&mut self, channel: &mut C) -> Result<Transmission> {
        let frame = self.sender.send()?;
        self.stats.sent += 1;
        Ok(self.settle(channel.transmit(frame), false))
    }

    /// Re-issue `sequence` as a fresh frame.
    ///
    /// Returns `Ok(None)` when the sequence is no longer in flight. Under
    /// [`Retransmission::Reliable`] the copy skips the channel.
    pub fn retransmit<C: Channel>(
        &mut self,
        sequence: u32,
        channel: &mut C,
    ) -> Result<Option<Transmission>> {
        self.sender
            .check_retries(sequence, self.retransmission.limit(self.max_transmissions))?;

        let Some(frame) = self.sender.retransmit(sequence) else {
            self.lost.remove(&sequence);
            return Ok(None);
        };
        self.stats.retransmitted += 1;

        let frame = match self.retransmission {
            Retransmission::Reliable => frame,
            Retransmission::Lossy => channel.transmit(frame),
        };
        Ok(Some(self.settle(frame, true)))
    }

    fn settle(&mut self, frame: Frame, retransmission: bool) -> Transmission {
        let sequence = frame.sequence();
        let reception = self.receiver.receive(frame);

        if reception == Reception::Corrupted {
            self.stats.corrupted += 1;
            self.lost.insert(sequence);
        } else {
            self.lost.remove(&sequence);
            if self.sender.acknowledge(sequence) {
                self.stats.acknowledged += 1;
            }
        }

        let transmission = Transmission {
            sequence,
            reception,
            retransmission,
        };
        log::debug!("{transmission}");
        transmission
    }

    /// Drive `num_frames` new frames through `channel` until every one of them
    /// is delivered.
    pub fn run<C: Channel>(&mut self, num_frames: u32, channel: &mut C) -> Result<&Stats> {
        let target = self.sender.next_sequence().saturating_add(num_frames);

        loop {
            if self.sender.can_send() && self.sender.next_sequence() < target {
                self.transmit(channel)?;
            } else if let Some(&sequence) = self.lost.first() {
                if self.sender.next_sequence() < target {
                    log::debug!("window full, outstanding {:?}", self.sender.check_timeouts());
                }
                self.retransmit(sequence, channel)?;
            } else {
                break;
            }
        }

        Ok(&self.stats)
    }

    /// Start a new session with the same window and policy.
    pub fn reset(&mut self) {
        let window_size = self.sender.window_size();
        self.sender = Sender::new(window_size);
        self.receiver = Receiver::new(window_size);
        self.lost.clear();
        self.stats = Stats::default();
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Sequence numbers known to have arrived corrupted and not yet repaired.
    pub fn lost(&self) -> impl Iterator<Item = u32> + '_ {
        self.lost.iter().copied()
    }

    pub fn delivered_in_order(&self) -> &[Frame] {
        self.receiver.delivered_in_order()
    }
}
