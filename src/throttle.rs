use log::info;
use std::thread;
use std::time::Duration;

/// Politeness delay applied between paginated fetches. A zero-length
/// throttle skips the sleep entirely, which is what tests inject.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn from_secs_f64(seconds: f64) -> Self {
        Throttle {
            delay: Duration::from_secs_f64(seconds.max(0.0)),
        }
    }

    pub fn none() -> Self {
        Throttle {
            delay: Duration::ZERO,
        }
    }

    pub fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        info!("Waiting {:.1}s before next page...", self.delay.as_secs_f64());
        thread::sleep(self.delay);
    }
}
