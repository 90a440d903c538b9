pub mod report;
pub mod timer_logger;
