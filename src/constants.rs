use std::num::NonZeroU32;

pub const DEFAULT_WINDOW_SIZE: NonZeroU32 = NonZeroU32::new(4).unwrap();
pub const DEFAULT_FRAMES: u32 = 10;
pub const DEFAULT_CORRUPTION_RATE: f64 = 0.2;
pub const DEFAULT_MAX_TRANSMISSIONS: u32 = 16;

pub const DIVIDER_WIDTH: usize = 70;
