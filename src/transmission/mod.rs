//! The unreliable channel between sender and receiver.
//!
//! A [`Channel`] receives a copy of every frame in transit and decides whether
//! it arrives damaged. Randomness and seeding belong to the channel, never to
//! the protocol core. The engine's actor links live in [`link`].

pub mod link;
pub mod lossy;
pub mod mock;

use crate::protocol::frame::Frame;

pub trait Channel {
    fn transmit(&mut self, frame: Frame) -> Frame;
}

/// Any corruption decision `FnMut(&Frame) -> bool` acts as a channel.
impl<F> Channel for F
where
    F: FnMut(&Frame) -> bool,
{
    fn transmit(&mut self, frame: Frame) -> Frame {
        if self(&frame) { frame.corrupted() } else { frame }
    }
}
