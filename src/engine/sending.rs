use owo_colors::OwoColorize;

use super::Feedback;
use crate::config::{Retransmission, SimulationConfig};
use crate::error::{ArqError, Result};
use crate::protocol::frame::Frame;
use crate::protocol::orchestrator::Stats;
use crate::protocol::sender::Sender;
use crate::transmission::Channel;
use crate::transmission::link::Link;

pub struct SendingActor<C, L> {
    sender: Sender,
    channel: C,
    link: L,
    frames: u32,
    retransmission: Retransmission,
    max_transmissions: u32,
    stats: Stats,
}

impl<C, L> SendingActor<C, L>
where
    C: Channel + Send + 'static,
    L: Link<Frame, Feedback> + 'static,
{
    pub fn new(config: &SimulationConfig, channel: C, link: L) -> Self {
        Self {
            sender: Sender::new(config.window_size),
            channel,
            link,
            frames: config.frames,
            retransmission: config.retransmission,
            max_transmissions: config.max_transmissions.max(1),
            stats: Stats::default(),
        }
    }

    fn finished(&self) -> bool {
        self.sender.next_sequence() >= self.frames && !self.sender.has_unacked()
    }

    pub async fn run(mut self) -> Result<Stats> {
        while !self.finished() {
            while self.sender.can_send() && self.sender.next_sequence() < self.frames {
                let frame = self.sender.send()?;
                self.stats.sent += 1;
                let frame = self.channel.transmit(frame);
                log::debug!("sending actor: -> {frame}");
                self.link.send(frame).await?;
            }

            if self.finished() {
                break;
            }

            let feedback = self.link.recv().await.ok_or(ArqError::LinkClosed)?;
            log::debug!("sending actor: <- {}", feedback.cyan());
            match feedback {
                Feedback::Ack(sequence) => {
                    if self.sender.acknowledge(sequence) {
                        self.stats.acknowledged += 1;
                    }
                }
                Feedback::Nak(sequence) => {
                    self.stats.corrupted += 1;
                    self.retransmit(sequence).await?;
                }
            }
        }

        log::info!(
            "sending actor: done, {} sent, {} retransmitted",
            self.stats.sent,
            self.stats.retransmitted
        );
        Ok(self.stats)
    }

    async fn retransmit(&mut self, sequence: u32) -> Result<()> {
        self.sender
            .check_retries(sequence, self.retransmission.limit(self.max_transmissions))?;

        let Some(frame) = self.sender.retransmit(sequence) else {
            return Ok(());
        };
        self.stats.retransmitted += 1;

        let frame = match self.retransmission {
            Retransmission::Reliable => frame,
            Retransmission::Lossy => self.channel.transmit(frame),
        };
        log::debug!("sending actor: -> {frame} {}", "(retransmission)".yellow());
        self.link.send(frame).await
    }
}
