//! Sender and receiver as separate tokio tasks.
//!
//! Each task owns its half of the protocol outright; the only thing crossing
//! between them is messages on a [`Link`]: frames one way, [`Feedback`] the
//! other. A corrupted frame is answered with [`Feedback::Nak`], which is the
//! loss signal the sending task retransmits on.

pub mod receiving;
pub mod sending;

use derive_more::Display;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::protocol::frame::Frame;
use crate::protocol::orchestrator::Stats;
use crate::transmission::Channel;
use crate::transmission::link::{Link, MemoryLink};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    #[display("ACK {_0}")]
    Ack(u32),
    #[display("NAK {_0}")]
    Nak(u32),
}

#[derive(Debug)]
pub struct SessionReport {
    pub stats: Stats,
    pub delivered: Vec<Frame>,
}

/// Run one session of `config.frames` frames with both actors on the runtime.
pub async fn run_session<C>(config: &SimulationConfig, channel: C) -> Result<SessionReport>
where
    C: Channel + Send + 'static,
{
    let (sender_end, receiver_end) = MemoryLink::<Frame, Feedback>::pair();
    run_session_over(config, channel, sender_end, receiver_end).await
}

pub async fn run_session_over<C, LS, LR>(
    config: &SimulationConfig,
    channel: C,
    sender_end: LS,
    receiver_end: LR,
) -> Result<SessionReport>
where
    C: Channel + Send + 'static,
    LS: Link<Frame, Feedback> + 'static,
    LR: Link<Feedback, Frame> + 'static,
{
    let sending = sending::SendingActor::new(config, channel, sender_end);
    let receiving = receiving::ReceivingActor::new(config.window_size, receiver_end);

    let sending = tokio::spawn(sending.run());
    let receiving = tokio::spawn(receiving.run());

    // The sender finishing drops its link end, which ends the receiver.
    let stats = sending.await??;
    let receiver = receiving.await?;

    Ok(SessionReport {
        stats,
        delivered: receiver.delivered_in_order().to_vec(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Retransmission;
    use crate::error::ArqError;
    use crate::transmission::lossy::RandomCorruption;
    use crate::transmission::mock::{Perfect, Scripted};
    use std::num::NonZeroU32;

    fn config(window: u32, frames: u32) -> SimulationConfig {
        SimulationConfig {
            window_size: NonZeroU32::new(window).unwrap(),
            frames,
            ..SimulationConfig::default()
        }
    }

    fn sequences(report: &SessionReport) -> Vec<u32> {
        report.delivered.iter().map(Frame::sequence).collect()
    }

    #[tokio::test]
    async fn perfect_session() -> Result<()> {
        let report = run_session(&config(4, 30), Perfect).await?;
        assert_eq!(sequences(&report), (0..30).collect::<Vec<_>>());
        assert_eq!(report.stats.sent, 30);
        assert_eq!(report.stats.acknowledged, 30);
        assert_eq!(report.stats.retransmitted, 0);
        Ok(())
    }

    #[tokio::test]
    async fn nak_triggers_selective_retransmission() -> Result<()> {
        let report = run_session(&config(4, 8), Scripted::corrupting([2, 5])).await?;
        assert_eq!(sequences(&report), (0..8).collect::<Vec<_>>());
        assert_eq!(report.stats.corrupted, 2);
        assert_eq!(report.stats.retransmitted, 2);
        Ok(())
    }

    #[tokio::test]
    async fn random_corruption_sessions_converge() -> Result<()> {
        for seed in 0..10 {
            for window in [1, 3, 8] {
                let channel = RandomCorruption::new(0.3, Some(seed))?;
                let report = run_session(&config(window, 40), channel).await?;
                assert_eq!(sequences(&report), (0..40).collect::<Vec<_>>());
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn reliable_session_ignores_the_limit() -> Result<()> {
        let config = SimulationConfig {
            max_transmissions: 1,
            ..config(4, 3)
        };
        let report = run_session(&config, Scripted::corrupting([0])).await?;
        assert_eq!(sequences(&report), vec![0, 1, 2]);
        assert_eq!(report.stats.retransmitted, 1);
        Ok(())
    }

    #[tokio::test]
    async fn lossy_session_gives_up() {
        let config = SimulationConfig {
            retransmission: Retransmission::Lossy,
            max_transmissions: 4,
            ..config(2, 5)
        };
        let channel = RandomCorruption::new(1.0, Some(0)).unwrap();

        let err = run_session(&config, channel).await.unwrap_err();
        assert!(matches!(
            err,
            ArqError::RetriesExhausted {
                transmissions: 4,
                ..
            }
        ));
    }

    #[test]
    fn feedback_display() {
        assert_eq!(Feedback::Ack(3).to_string(), "ACK 3");
        assert_eq!(Feedback::Nak(4).to_string(), "NAK 4");
    }
}
