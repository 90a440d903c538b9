//! The walkthrough the protocol is usually explained with.
//!
//! Frames 0 and 1 arrive, 2 is damaged, 3 and 4 wait in the reorder buffer,
//! the retransmitted 2 releases them, and 5 follows in order.

use std::num::NonZeroU32;

use super::orchestrator::{SelectiveRepeat, Transmission};
use crate::error::{ArqError, Result};
use crate::transmission::mock::Scripted;

pub const CORRUPTED_SEQUENCE: u32 = 2;

/// Frames 2, 3 and 4 must be in flight together.
pub const MIN_WINDOW: u32 = 3;

/// Runs the walkthrough, handing every step to `on_step` as it happens.
///
/// Fails with [`ArqError::WindowTooSmall`] before sending anything when the
/// window is below [`MIN_WINDOW`].
pub fn documented(
    window_size: NonZeroU32,
    mut on_step: impl FnMut(&str, &Transmission, &SelectiveRepeat),
) -> Result<SelectiveRepeat> {
    if window_size.get() < MIN_WINDOW {
        return Err(ArqError::WindowTooSmall {
            window_size: window_size.get(),
            required: MIN_WINDOW,
        });
    }

    let mut protocol = SelectiveRepeat::new(window_size);
    let mut channel = Scripted::corrupting([CORRUPTED_SEQUENCE]);

    for step in 0..5 {
        let label = if step == CORRUPTED_SEQUENCE {
            "send (corrupted on the way)"
        } else {
            "send"
        };
        let transmission = protocol.transmit(&mut channel)?;
        on_step(label, &transmission, &protocol);
    }

    if let Some(transmission) = protocol.retransmit(CORRUPTED_SEQUENCE, &mut channel)? {
        on_step("retransmit", &transmission, &protocol);
    }

    let transmission = protocol.transmit(&mut channel)?;
    on_step("send", &transmission, &protocol);

    Ok(protocol)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::frame::Frame;
    use crate::protocol::receiver::Reception;

    #[test]
    fn walkthrough_delivers_in_order() {
        let mut steps = vec![];
        let protocol = documented(NonZeroU32::new(4).unwrap(), |label, t, _| {
            steps.push((label.to_string(), t.sequence, t.reception));
        })
        .unwrap();

        let delivered: Vec<u32> = protocol
            .delivered_in_order()
            .iter()
            .map(Frame::sequence)
            .collect();
        assert_eq!(delivered, vec![0, 1, 2, 3, 4, 5]);

        let receptions: Vec<(u32, Reception)> = steps.iter().map(|(_, s, r)| (*s, *r)).collect();
        assert_eq!(
            receptions,
            vec![
                (0, Reception::Delivered { released: 1 }),
                (1, Reception::Delivered { released: 1 }),
                (2, Reception::Corrupted),
                (3, Reception::Buffered),
                (4, Reception::Buffered),
                (2, Reception::Delivered { released: 3 }),
                (5, Reception::Delivered { released: 1 }),
            ]
        );
        assert_eq!(steps[5].0, "retransmit");
    }

    #[test]
    fn small_window_is_rejected_up_front() {
        for size in 1..MIN_WINDOW {
            let mut called = false;
            let result = documented(NonZeroU32::new(size).unwrap(), |_, _, _| called = true);
            assert!(matches!(
                result,
                Err(ArqError::WindowTooSmall {
                    window_size,
                    required: MIN_WINDOW
                }) if window_size == size
            ));
            assert!(!called);
        }
        assert!(documented(NonZeroU32::new(MIN_WINDOW).unwrap(), |_, _, _| {}).is_ok());
    }

    #[test]
    fn corrupted_frame_is_neither_delivered_nor_buffered() {
        documented(NonZeroU32::new(4).unwrap(), |_, t, protocol| {
            if t.reception == Reception::Corrupted {
                let r = protocol.receiver();
                assert_eq!(r.expected_sequence(), CORRUPTED_SEQUENCE);
                assert!(r.pending().all(|f| f.sequence() != CORRUPTED_SEQUENCE));
                assert_eq!(protocol.sender().window_base(), CORRUPTED_SEQUENCE);
            }
        })
        .unwrap();
    }
}
