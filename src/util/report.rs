//! Human-readable status of the windows.

use std::fmt::Write;

use crate::constants::DIVIDER_WIDTH;
use crate::protocol::frame::Frame;
use crate::protocol::orchestrator::Stats;
use crate::protocol::receiver::Receiver;
use crate::protocol::sender::Sender;

pub fn divider(symbol: char) -> String {
    std::iter::repeat_n(symbol, DIVIDER_WIDTH).collect()
}

pub fn sequences(frames: &[Frame]) -> String {
    frames
        .iter()
        .map(|frame| frame.sequence().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn window_status(sender: &Sender) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Window status:");
    let _ = writeln!(out, "  Base: {}", sender.window_base());
    let _ = writeln!(out, "  Next sequence number: {}", sender.next_sequence());
    let _ = writeln!(out, "  Window size: {}", sender.window_size());
    let _ = writeln!(out, "  Frames in window:");
    if !sender.has_unacked() {
        let _ = writeln!(out, "    Window is empty.");
    }
    for sequence in sender.outstanding() {
        let transmissions = sender.transmissions(sequence).unwrap_or_default();
        let _ = writeln!(out, "    Frame {sequence} (sent {transmissions}x)");
    }
    out
}

pub fn buffer_status(receiver: &Receiver) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Buffer status:");
    let _ = writeln!(out, "  Expected sequence number: {}", receiver.expected_sequence());
    let _ = writeln!(out, "  Window size: {}", receiver.window_size());

    let delivered = receiver.delivered_in_order();
    if delivered.is_empty() {
        let _ = writeln!(out, "  Received frames: none yet.");
    } else {
        let _ = writeln!(out, "  Received frames: {}", sequences(delivered));
    }

    if receiver.buffered() == 0 {
        let _ = writeln!(out, "  Buffered frames: none.");
    } else {
        let pending: Vec<Frame> = receiver.pending().copied().collect();
        let _ = writeln!(out, "  Buffered frames: {}", sequences(&pending));
    }
    out
}

pub fn stats_summary(stats: &Stats) -> String {
    format!(
        "{} sent, {} retransmitted, {} corrupted, {} acknowledged",
        stats.sent, stats.retransmitted, stats.corrupted, stats.acknowledged
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::orchestrator::SelectiveRepeat;
    use crate::transmission::mock::Scripted;
    use std::num::NonZeroU32;

    #[test]
    fn divider_width() {
        assert_eq!(divider('=').len(), DIVIDER_WIDTH);
    }

    #[test]
    fn status_reflects_gap() {
        let mut protocol = SelectiveRepeat::new(NonZeroU32::new(4).unwrap());
        let mut channel = Scripted::corrupting([1]);
        for _ in 0..3 {
            protocol.transmit(&mut channel).unwrap();
        }

        let window = window_status(protocol.sender());
        assert!(window.contains("Base: 1"));
        assert!(window.contains("Next sequence number: 3"));
        assert!(window.contains("Frame 1 (sent 1x)"));

        let buffer = buffer_status(protocol.receiver());
        assert!(buffer.contains("Expected sequence number: 1"));
        assert!(buffer.contains("Received frames: 0"));
        assert!(buffer.contains("Buffered frames: 2"));
    }

    #[test]
    fn empty_status() {
        let protocol = SelectiveRepeat::new(NonZeroU32::new(2).unwrap());
        assert!(window_status(protocol.sender()).contains("Window is empty."));
        assert!(buffer_status(protocol.receiver()).contains("Received frames: none yet."));
        assert_eq!(
            stats_summary(protocol.stats()),
            "0 sent, 0 retransmitted, 0 corrupted, 0 acknowledged"
        );
    }
}
