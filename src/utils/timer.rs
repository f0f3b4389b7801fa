use std::time::Instant;

/// Accumulates elapsed nanoseconds across one or more start/stop rounds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Timer {
    pub total_time: u128,
    pub curr: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self { total_time: 0, curr: Instant::now() }
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn start(&mut self) {
        self.curr = Instant::now();
    }

    #[inline(always)]
    pub fn stop(&mut self) -> u128 {
        let diff = self.curr.elapsed().as_nanos();
        self.total_time += diff;
        diff
    }

    /// Runs `f` between a start and a stop.
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        self.start();
        let out = f();
        self.stop();
        out
    }
}
