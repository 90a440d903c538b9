use once_cell::sync::Lazy;
use owo_colors::*;
use std::time::Instant;

pub static PROGRAM_START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

pub fn relative_time_ms(instant: Instant) -> f64 {
    instant.duration_since(*PROGRAM_START_TIME).as_secs_f64() * 1000.0
}

pub fn log_message(message: &str) {
    println!(
        "[{:>10.3}ms] {}",
        relative_time_ms(Instant::now()).red(),
        message
    );
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn relative_time_is_monotonic() {
        let first = relative_time_ms(Instant::now());
        let second = relative_time_ms(Instant::now());
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
