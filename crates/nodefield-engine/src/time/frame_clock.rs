use std::time::{Duration, Instant};

/// Frame timing snapshot.
///
/// The node field advances by a fixed step per frame, so only counters are
/// reported here.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic frame counter.
    pub frame_index: u64,

    /// Frames presented during the last completed one-second window.
    pub fps: u32,
}

/// Frame clock producing `FrameTime` snapshots.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_index: u64,

    window_start: Instant,
    window_frames: u32,
    fps: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            frame_index: 0,
            window_start: now,
            window_frames: 0,
            fps: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        self.window_frames += 1;
        if now.saturating_duration_since(self.window_start) >= Duration::from_secs(1) {
            self.fps = self.window_frames;
            self.window_frames = 0;
            self.window_start = now;
        }

        let ft = FrameTime {
            frame_index: self.frame_index,
            fps: self.fps,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_zero_until_a_second_has_passed() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let ft = clock.tick_at(start + Duration::from_millis(500));
        assert_eq!(ft.fps, 0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn fps_is_reported_after_a_full_second() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let mut last = None;
        for i in 1..=60u64 {
            last = Some(clock.tick_at(start + Duration::from_micros(i * 16_667)));
        }
        let last = last.expect("ticked");
        assert_eq!(last.fps, 60);
        assert_eq!(last.frame_index, 59);
    }
}
