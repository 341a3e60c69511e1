// app/scheduler.rs
// Drives an animation one tick at a time, standing in for a browser's
// setInterval / requestAnimationFrame.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::Result;
use crate::profile_scope;
use crate::renderer::surface::RenderSurface;

/// Something that can advance one frame and redraw itself.
///
/// A tick is a single synchronous unit of work; the scheduler never overlaps two.
pub trait Animate {
    fn name(&self) -> &str;
    fn tick(&mut self, surface: &mut dyn RenderSurface) -> Result<()>;
}

/// Idle until started, then running until the scheduler stops calling back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Fixed wall-clock period between ticks.
    Interval(Duration),
    /// Paced to a display refresh rate; `fps == 0` runs as fast as possible.
    AnimationFrame { fps: u32 },
}

impl Schedule {
    fn period(&self) -> Option<Duration> {
        match *self {
            Schedule::Interval(d) if !d.is_zero() => Some(d),
            Schedule::Interval(_) => None,
            Schedule::AnimationFrame { fps: 0 } => None,
            Schedule::AnimationFrame { fps } => Some(Duration::from_secs_f64(1.0 / fps as f64)),
        }
    }
}

/// Rolling frames-per-second estimate over roughly one-second windows.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames_in_window: u32,
    last_fps: f64,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames_in_window: 0,
            last_fps: 0.0,
        }
    }

    /// Count one frame. Returns the new estimate whenever a window closes.
    pub fn frame(&mut self) -> Option<f64> {
        self.frame_at(Instant::now())
    }

    pub fn frame_at(&mut self, now: Instant) -> Option<f64> {
        self.frames_in_window += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.last_fps = self.frames_in_window as f64 / elapsed.as_secs_f64();
            self.frames_in_window = 0;
            self.window_start = now;
            Some(self.last_fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f64 {
        self.last_fps
    }
}

pub struct FrameScheduler {
    schedule: Schedule,
    state: LoopState,
    ticks: u64,
    fps: FpsCounter,
}

impl FrameScheduler {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            state: LoopState::Idle,
            ticks: 0,
            fps: FpsCounter::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Idle -> Running. Starting twice is a no-op.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            self.fps = FpsCounter::new();
        }
    }

    /// Invoke `animation.tick` `frames` times, pacing by the schedule.
    ///
    /// `on_frame` runs after every tick with the tick count so far; the caller uses it for
    /// periodic work like diagnostics. An error from a tick ends the run.
    pub fn run<A, F>(
        &mut self,
        animation: &mut A,
        surface: &mut dyn RenderSurface,
        frames: u64,
        mut on_frame: F,
    ) -> Result<()>
    where
        A: Animate + ?Sized,
        F: FnMut(&A, u64),
    {
        self.start();
        info!(animation = animation.name(), frames, schedule = ?self.schedule, "animation loop running");
        let period = self.schedule.period();
        let mut next_deadline = Instant::now();

        for _ in 0..frames {
            {
                profile_scope!("frame_tick");
                animation.tick(surface)?;
            }
            self.ticks += 1;
            on_frame(animation, self.ticks);

            if let Some(fps) = self.fps.frame() {
                debug!(animation = animation.name(), "frame rate {fps:.1} fps");
            }

            if let Some(period) = period {
                next_deadline += period;
                let now = Instant::now();
                if next_deadline > now {
                    std::thread::sleep(next_deadline - now);
                } else {
                    // Fell behind; don't try to catch up with a burst of frames.
                    next_deadline = now;
                }
            }
        }
        info!(animation = animation.name(), ticks = self.ticks, "animation loop done");
        Ok(())
    }
}
