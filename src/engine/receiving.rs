use std::num::NonZeroU32;

use super::Feedback;
use crate::protocol::frame::Frame;
use crate::protocol::receiver::{Receiver, Reception};
use crate::transmission::link::Link;

pub struct ReceivingActor<L> {
    receiver: Receiver,
    link: L,
}

impl<L> ReceivingActor<L>
where
    L: Link<Feedback, Frame> + 'static,
{
    pub fn new(window_size: NonZeroU32, link: L) -> Self {
        Self {
            receiver: Receiver::new(window_size),
            link,
        }
    }

    /// Runs until the sending side hangs up, then hands back the receiver.
    pub async fn run(mut self) -> Receiver {
        while let Some(frame) = self.link.recv().await {
            let sequence = frame.sequence();
            let feedback = match self.receiver.receive(frame) {
                Reception::Corrupted => Some(Feedback::Nak(sequence)),
                // Re-acknowledge so a sender that missed the first ACK can move on.
                Reception::Duplicate => Some(Feedback::Ack(sequence)),
                Reception::BeyondWindow => None,
                Reception::Buffered | Reception::Delivered { .. } => Some(Feedback::Ack(sequence)),
            };

            if let Some(feedback) = feedback
                && self.link.send(feedback).await.is_err()
            {
                break;
            }
        }

        log::info!(
            "receiving actor: done, {} delivered",
            self.receiver.delivered_in_order().len()
        );
        self.receiver
    }
}
