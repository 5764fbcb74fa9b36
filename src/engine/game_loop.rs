/// Game loop timing
///
/// Fixed timestep for the scene update, fed by real elapsed frame time.
/// `FrameTick::frame_time` carries the full real time, including any
/// backlog the step cap dropped, for consumers that must follow the clock.
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: Duration = Duration::from_micros(16_667);

/// Maximum number of steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Result of starting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Number of fixed steps to run this frame
    pub steps: u32,
    /// Real time since the previous frame
    pub frame_time: Duration,
}

/// Game loop timing state
pub struct GameLoop {
    /// Time not yet consumed by fixed steps
    accumulator: Duration,

    last_frame_time: Instant,

    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    frame_count: u64,

    /// Total fixed steps executed
    step_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a loop whose first frame is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: start,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Begin a new frame now
    pub fn begin_frame(&mut self) -> FrameTick {
        self.begin_frame_at(Instant::now())
    }

    /// Begin a new frame at `now`, returning how many fixed steps to run
    pub fn begin_frame_at(&mut self, now: Instant) -> FrameTick {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.paused {
            return FrameTick {
                steps: 0,
                frame_time,
            };
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }

        // Drop whatever the cap left behind instead of carrying it forward
        if steps == MAX_STEPS_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP);
        }

        self.step_count += steps as u64;
        FrameTick { steps, frame_time }
    }

    /// Average frames per second over the tracking window
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total: Duration = self.frame_times.iter().sum();
        let average = total.as_secs_f32() / self.frame_times.len() as f32;
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.step_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_one_step_per_timestep() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        let tick = game_loop.begin_frame_at(start + FIXED_TIMESTEP);
        assert_eq!(tick.steps, 1);
        assert_eq!(tick.frame_time, FIXED_TIMESTEP);
    }

    #[test]
    fn test_partial_frames_accumulate() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        let half = FIXED_TIMESTEP / 2;
        assert_eq!(game_loop.begin_frame_at(start + half).steps, 0);
        assert_eq!(game_loop.begin_frame_at(start + half * 2).steps, 1);
        assert_eq!(game_loop.step_count(), 1);
    }

    #[test]
    fn test_max_steps_limit() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        // 300ms would allow 18 steps
        let tick = game_loop.begin_frame_at(start + Duration::from_millis(300));
        assert_eq!(tick.steps, MAX_STEPS_PER_FRAME);
        // Real elapsed time is still reported in full for timers
        assert_eq!(tick.frame_time, Duration::from_millis(300));

        // The backlog was dropped
        let next = game_loop.begin_frame_at(start + Duration::from_millis(300));
        assert!(next.steps <= 1);
    }

    #[test]
    fn test_paused_no_steps() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        game_loop.pause();

        let tick = game_loop.begin_frame_at(start + Duration::from_millis(50));
        assert_eq!(tick.steps, 0);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fps_from_frame_times() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        for i in 1..=10u32 {
            game_loop.begin_frame_at(start + Duration::from_millis(20) * i);
        }
        assert!((game_loop.fps() - 50.0).abs() < 0.01);
    }
}
