use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Channel;
use crate::error::{ArqError, Result};
use crate::protocol::frame::Frame;

/// Corrupts each frame independently with probability `rate`.
#[derive(Debug, Clone)]
pub struct RandomCorruption {
    rate: f64,
    rng: StdRng,
}

impl RandomCorruption {
    /// A fixed `seed` makes the corruption pattern reproducible; `None` seeds
    /// from the OS.
    pub fn new(rate: f64, seed: Option<u64>) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ArqError::InvalidCorruptionRate(rate));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { rate, rng })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Channel for RandomCorruption {
    fn transmit(&mut self, frame: Frame) -> Frame {
        if self.rng.random_bool(self.rate) {
            log::debug!("channel: {frame} corrupted during transmission");
            frame.corrupted()
        } else {
            frame
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_non_probabilities() {
        for rate in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                RandomCorruption::new(rate, Some(1)),
                Err(ArqError::InvalidCorruptionRate(_))
            ));
        }
    }

    #[test]
    fn extreme_rates() {
        let mut never = RandomCorruption::new(0.0, Some(1)).unwrap();
        let mut always = RandomCorruption::new(1.0, Some(1)).unwrap();
        for seq in 0..100 {
            assert!(never.transmit(Frame::new(seq)).is_valid());
            assert!(!always.transmit(Frame::new(seq)).is_valid());
        }
    }

    #[test]
    fn same_seed_same_pattern() {
        let pattern = |seed| {
            let mut channel = RandomCorruption::new(0.5, Some(seed)).unwrap();
            (0..64)
                .map(|seq| channel.transmit(Frame::new(seq)).is_corrupted())
                .collect::<Vec<_>>()
        };
        assert_eq!(pattern(42), pattern(42));
    }

    #[test]
    fn rate_is_roughly_respected() {
        let mut channel = RandomCorruption::new(0.2, Some(2024)).unwrap();
        let corrupted = (0..10_000)
            .filter(|seq| channel.transmit(Frame::new(*seq)).is_corrupted())
            .count();
        assert!((1_500..2_500).contains(&corrupted), "{corrupted}");
    }
}
