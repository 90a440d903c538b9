use derive_more::Display;

/// Smallest unit moved across the channel.
///
/// Only the corruption flag may change after creation; the channel sets it to
/// simulate damage in transit.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display("frame {sequence}{}", if *corrupted { " (corrupted)" } else { "" })]
pub struct Frame {
    sequence: u32,
    corrupted: bool,
}

impl Frame {
    pub fn new(sequence: u32) -> Self {
        Self {
            sequence,
            corrupted: false,
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn is_valid(&self) -> bool {
        !self.corrupted
    }

    pub fn corrupt(&mut self) {
        self.corrupted = true;
    }

    pub fn corrupted(mut self) -> Self {
        self.corrupt();
        self
    }
}

#[cfg(test)]
mod test {
    use super::Frame;

    #[test]
    fn new_frame_is_valid() {
        let frame = Frame::new(7);
        assert_eq!(frame.sequence(), 7);
        assert!(frame.is_valid());
        assert!(!frame.is_corrupted());
    }

    #[test]
    fn corruption_only_touches_flag() {
        let original = Frame::new(3);
        let damaged = original.corrupted();

        assert!(!damaged.is_valid());
        assert_eq!(damaged.sequence(), 3);
        // Copies are independent.
        assert!(original.is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(Frame::new(2).to_string(), "frame 2");
        assert_eq!(Frame::new(2).corrupted().to_string(), "frame 2 (corrupted)");
    }
}
