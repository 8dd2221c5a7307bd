use std::time::{Duration, Instant};

/// Timing handed to one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous rendered frame.
    pub delta: f32,
}

/// Wall clock that enforces a minimum time between rendered frames.
///
/// The reference point only advances on frames that are rendered, so a skipped
/// frame's time is carried into the next one.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Duration,
    min_frame_time: Duration,
}

impl FrameClock {
    pub fn start(min_frame_time: Duration) -> Self {
        Self {
            start: Instant::now(),
            last: Duration::ZERO,
            min_frame_time,
        }
    }

    pub fn tick(&mut self) -> Option<FrameTick> {
        self.tick_at(self.start.elapsed())
    }

    /// [`FrameClock::tick`] with an explicit time since start.
    pub fn tick_at(&mut self, now: Duration) -> Option<FrameTick> {
        let delta = now.saturating_sub(self.last);
        if delta < self.min_frame_time {
            return None;
        }
        self.last = now;
        Some(FrameTick {
            elapsed: now.as_secs_f32(),
            delta: delta.as_secs_f32(),
        })
    }
}

/// Rolling window of recent frame times.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    next: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    pub fn record(&mut self, frame_time: Duration) {
        if self.history.len() < self.capacity {
            self.history.push(frame_time);
        } else {
            self.history[self.next] = frame_time;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    /// Number of samples held, at most the capacity.
    pub fn count(&self) -> usize {
        self.history.len()
    }

    pub fn average(&self) -> Duration {
        if self.history.is_empty() {
            return Duration::ZERO;
        }
        self.history.iter().sum::<Duration>() / self.history.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.history.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.history.iter().copied().max().unwrap_or_default()
    }
}
