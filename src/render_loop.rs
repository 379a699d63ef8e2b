// render_loop.rs — per-frame tick: advance the room, then draw once

use std::time::Instant;

use crate::camera::TransitionComplete;
use crate::room::Room;

/// Longest step fed to the camera; a stalled window should not skip a transition.
const MAX_FRAME_DT: f32 = 0.1;

/// Supplies the time, in seconds, since the previous tick.
pub trait TickSource {
    fn next_dt(&mut self) -> f32;
}

/// Wall-clock ticks for the live window.
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl TickSource for FrameClock {
    fn next_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last = Some(now);
        dt.min(MAX_FRAME_DT)
    }
}

/// Constant ticks.
pub struct FixedStep(pub f32);

impl TickSource for FixedStep {
    fn next_dt(&mut self) -> f32 {
        self.0
    }
}

/// Frames per second over one-second windows.
#[derive(Debug, Default)]
pub struct FrameStats {
    frames: u32,
    window: f32,
    fps: f32,
}

impl FrameStats {
    /// Returns the new rate whenever a window closes.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.frames += 1;
        self.window += dt;
        if self.window < 1.0 {
            return None;
        }
        self.fps = self.frames as f32 / self.window;
        self.frames = 0;
        self.window = 0.0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

pub struct RenderLoop<T: TickSource> {
    source: T,
    stats: FrameStats,
    frames: u64,
}

impl<T: TickSource> RenderLoop<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            stats: FrameStats::default(),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Advances `room` by one tick and issues exactly one draw, whether or
    /// not anything moved.
    pub fn tick<R>(
        &mut self,
        room: &mut Room,
        draw: impl FnOnce(&mut Room, Option<TransitionComplete>) -> R,
    ) -> R {
        let dt = self.source.next_dt();
        let completed = room.advance(dt);
        if let Some(fps) = self.stats.record(dt) {
            log::debug!("{fps:.1} fps");
        }
        self.frames += 1;
        draw(room, completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoomConfig;
    use crate::navigation::Wall;

    #[test]
    fn draws_once_per_tick_when_idle() {
        let mut room = Room::new(&RoomConfig::default());
        let mut lp = RenderLoop::new(FixedStep(1.0 / 60.0));
        let mut draws = 0;
        for _ in 0..10 {
            lp.tick(&mut room, |_, _| draws += 1);
        }
        assert_eq!(draws, 10);
        assert_eq!(lp.frames(), 10);
    }

    #[test]
    fn transition_completes_through_the_loop() {
        let mut room = Room::new(&RoomConfig::default());
        room.request_view(Wall::Left);
        let mut lp = RenderLoop::new(FixedStep(0.25));
        let mut completions = Vec::new();
        for _ in 0..6 {
            if let Some(done) = lp.tick(&mut room, |_, done| done) {
                completions.push(done);
            }
        }
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].to, Wall::Left);
        assert_eq!(room.panels().active(), Some(Wall::Left));
    }

    #[test]
    fn frame_stats_report_each_second() {
        let mut stats = FrameStats::default();
        let mut reports = Vec::new();
        for _ in 0..120 {
            if let Some(fps) = stats.record(0.02) {
                reports.push(fps);
            }
        }
        assert_eq!(reports.len(), 2);
        assert!((reports[0] - 50.0).abs() < 1.0);
        assert_eq!(stats.fps(), reports[1]);
    }

    #[test]
    fn frame_clock_starts_at_zero_and_is_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.next_dt(), 0.0);
        assert!(clock.next_dt() <= MAX_FRAME_DT);
    }
}
