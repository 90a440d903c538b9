use async_trait::async_trait;
use flume::{Receiver, Sender};

use crate::error::{ArqError, Result};

/// One end of a duplex message link: sends `Out`, receives `In`.
#[async_trait]
pub trait Link<Out, In>: Send + Sync
where
    Out: Send + 'static,
    In: Send + 'static,
{
    async fn send(&self, message: Out) -> Result<()>;

    /// `None` once the peer has gone away and nothing is left to read.
    async fn recv(&self) -> Option<In>;
}

/// In-process link over flume channels.
pub struct MemoryLink<Out, In> {
    sender: Sender<Out>,
    receiver: Receiver<In>,
}

impl<A, B> MemoryLink<A, B> {
    pub fn pair() -> (MemoryLink<A, B>, MemoryLink<B, A>) {
        // Duplex: A -> B, B -> A
        let (tx1, rx1) = flume::unbounded::<A>();
        let (tx2, rx2) = flume::unbounded::<B>();

        let end1 = MemoryLink {
            sender: tx1,
            receiver: rx2,
        };
        let end2 = MemoryLink {
            sender: tx2,
            receiver: rx1,
        };

        (end1, end2)
    }
}

#[async_trait]
impl<Out, In> Link<Out, In> for MemoryLink<Out, In>
where
    Out: Send + 'static,
    In: Send + 'static,
{
    async fn send(&self, message: Out) -> Result<()> {
        self.sender
            .send_async(message)
            .await
            .map_err(|_| ArqError::LinkClosed)
    }

    async fn recv(&self) -> Option<In> {
        self.receiver.recv_async().await.ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn pair_is_duplex() -> Result<()> {
        let (left, right) = MemoryLink::<u32, &'static str>::pair();

        left.send(7).await?;
        assert_eq!(right.recv().await, Some(7));

        right.send("ack").await?;
        assert_eq!(left.recv().await, Some("ack"));
        Ok(())
    }

    #[tokio::test]
    async fn dropped_peer_closes_link() {
        let (left, right) = MemoryLink::<u32, u32>::pair();
        left.send(1).await.unwrap();
        drop(left);

        // Queued messages still arrive before the close is observed.
        assert_eq!(right.recv().await, Some(1));
        assert_eq!(right.recv().await, None);
        assert!(matches!(right.send(2).await, Err(ArqError::LinkClosed)));
    }
}
