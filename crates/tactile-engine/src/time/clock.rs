use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source, microsecond resolution.
///
/// Panning physics read the clock on every tick and on every pointer event,
/// so implementations must be cheap and must never go backwards.
pub trait Clock {
    /// Microseconds since an arbitrary, fixed origin.
    fn now_us(&self) -> i64;

    /// Milliseconds since the same origin.
    fn now_ms(&self) -> i64 {
        self.now_us() / 1000
    }
}

/// Wall-clock implementation backed by `Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_us(&self) -> i64 {
        i64::try_from(self.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Manually advanced clock for tests and scripted playback.
///
/// Uses interior mutability so it can be shared behind `Rc` with the
/// components that read it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: Cell<i64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock starting at `ms`.
    pub fn starting_at_ms(ms: i64) -> Self {
        Self { now_us: Cell::new(ms * 1000) }
    }

    /// Moves the clock to an absolute time. Earlier times are ignored.
    pub fn set_ms(&self, ms: i64) {
        self.set_us(ms * 1000);
    }

    pub fn set_us(&self, us: i64) {
        if us > self.now_us.get() {
            self.now_us.set(us);
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now_us.set(self.now_us.get() + ms.max(0) * 1000);
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> i64 {
        self.now_us.get()
    }
}
