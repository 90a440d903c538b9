pub mod frame;
pub mod orchestrator;
pub mod receiver;
pub mod scenario;
pub mod sender;

pub use frame::Frame;
pub use orchestrator::{SelectiveRepeat, Stats, Transmission};
pub use receiver::{Receiver, Reception};
pub use sender::Sender;
