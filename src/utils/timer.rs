use std::time::Instant;

/// Accumulating stopwatch: every `start`/`stop` pair adds to `total_time`
/// (nanoseconds) and counts one access.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Timer {
    pub total_time: u128,
    pub accesses: usize,
    curr: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self { total_time: 0, accesses: 0, curr: Instant::now() }
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
        self.accesses += 1;
        diff
    }

    /// Runs `f` between a `start` and a `stop`.
    #[inline(always)]
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        self.start();
        let result = f();
        self.stop();
        result
    }

    /// Average nanoseconds per access.
    pub fn mean(&self) -> f64 {
        if self.accesses == 0 {
            return 0.0;
        }
        self.total_time as f64 / self.accesses as f64
    }
}

#[test]
fn test_timer() {
    use std::{thread, time};

    let mut timer = Timer::new();

    timer.start();
    thread::sleep(time::Duration::from_millis(20));
    timer.stop();

    assert!(timer.total_time >= 20_000_000);
    assert_eq!(timer.accesses, 1);
}

#[test]
fn test_timer_time_accumulates() {
    let mut timer = Timer::new();

    let sum = timer.time(|| (1..=10).sum::<u32>());
    timer.time(|| ());

    assert_eq!(sum, 55);
    assert_eq!(timer.accesses, 2);
    assert!(timer.mean() * 2.0 <= timer.total_time as f64 + 1.0);
}
