// camera.rs — field of view, yaw and the timed wall transition

use crate::navigation::Wall;
use crate::tween::{Easing, Tween};

/// FOV before the first resize arrives.
pub const INITIAL_FOV: f32 = 112.0;
pub const MIN_ZOOM_FOV: f32 = 30.0;
pub const MAX_ZOOM_FOV: f32 = 150.0;
pub const ZOOM_STEP: f32 = 5.0;

/// Seconds.
pub const TRANSITION_DURATION: f32 = 1.0;
const FALLBACK_EASING: f32 = 0.1;
const FALLBACK_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: Wall,
    to: Wall,
    tween: Tween,
}

/// Emitted once a transition has finished and the lock is free again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionComplete {
    pub from: Wall,
    pub to: Wall,
}

#[derive(Debug)]
pub struct CameraController {
    fov: f32,
    rotation: f32,
    target_rotation: f32,
    wall: Wall,
    // Held while `Some`.
    transition: Option<Transition>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            fov: INITIAL_FOV,
            rotation: 0.0,
            target_rotation: 0.0,
            wall: Wall::Center,
            transition: None,
        }
    }

    /// Degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Current yaw in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn target_rotation(&self) -> f32 {
        self.target_rotation
    }

    pub fn wall(&self) -> Wall {
        self.wall
    }

    pub fn is_locked(&self) -> bool {
        self.transition.is_some()
    }

    /// Starts turning towards `wall`. Dropped, returning `false`, while
    /// another transition is in flight.
    pub fn request_view(&mut self, wall: Wall) -> bool {
        if self.is_locked() {
            log::trace!("navigation to {wall:?} dropped, transition in flight");
            return false;
        }

        let from = self.wall;
        self.wall = wall;
        self.target_rotation = wall.rotation();
        self.transition = Some(Transition {
            from,
            to: wall,
            tween: Tween::new(
                self.rotation,
                self.target_rotation,
                TRANSITION_DURATION,
                Easing::QuadInOut,
            ),
        });
        log::debug!("transition {from:?} -> {wall:?}");
        true
    }

    /// Steps the FOV by `delta` degrees, clamped to the manual zoom range.
    pub fn manual_zoom(&mut self, delta: f32) {
        self.fov = (self.fov + delta).clamp(MIN_ZOOM_FOV, MAX_ZOOM_FOV);
    }

    pub fn set_resize_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn zoom_readout(&self) -> String {
        format!("{}°", self.fov.round())
    }

    /// Advances the camera by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Option<TransitionComplete> {
        if let Some(transition) = self.transition.as_mut() {
            self.rotation = transition.tween.advance(dt);
            if !transition.tween.is_finished() {
                return None;
            }
            let done = TransitionComplete {
                from: transition.from,
                to: transition.to,
            };
            self.rotation = self.target_rotation;
            self.transition = None;
            return Some(done);
        }

        let error = self.target_rotation - self.rotation;
        if error.abs() > FALLBACK_EPSILON {
            self.rotation += error * FALLBACK_EASING;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(cam: &mut CameraController) -> Option<TransitionComplete> {
        for _ in 0..200 {
            if let Some(done) = cam.advance(1.0 / 60.0) {
                return Some(done);
            }
        }
        None
    }

    #[test]
    fn starts_centered_and_unlocked() {
        let cam = CameraController::new();
        assert_eq!(cam.wall(), Wall::Center);
        assert!(!cam.is_locked());
        assert_eq!(cam.rotation(), 0.0);
        assert_eq!(cam.fov(), INITIAL_FOV);
    }

    #[test]
    fn request_updates_wall_immediately_and_locks() {
        let mut cam = CameraController::new();
        assert!(cam.request_view(Wall::Left));
        assert_eq!(cam.wall(), Wall::Left);
        assert_eq!(cam.target_rotation(), Wall::Left.rotation());
        assert!(cam.is_locked());
        assert_eq!(cam.rotation(), 0.0);
    }

    #[test]
    fn request_while_locked_is_a_no_op() {
        let mut cam = CameraController::new();
        cam.request_view(Wall::Left);
        cam.advance(0.3);
        assert!(!cam.request_view(Wall::Center));
        assert_eq!(cam.wall(), Wall::Left);
        assert_eq!(cam.target_rotation(), Wall::Left.rotation());
    }

    #[test]
    fn transition_completes_after_duration() {
        let mut cam = CameraController::new();
        cam.request_view(Wall::Right);
        assert_eq!(cam.advance(0.5), None);
        let mid = cam.rotation();
        assert!(mid < 0.0 && mid > Wall::Right.rotation());

        let done = cam.advance(0.5);
        assert_eq!(
            done,
            Some(TransitionComplete { from: Wall::Center, to: Wall::Right })
        );
        assert!(!cam.is_locked());
        assert_eq!(cam.rotation(), Wall::Right.rotation());
    }

    #[test]
    fn next_request_allowed_after_completion() {
        let mut cam = CameraController::new();
        cam.request_view(Wall::Left);
        run_to_completion(&mut cam).expect("transition finishes");
        assert!(cam.request_view(Wall::Center));
        let done = run_to_completion(&mut cam).expect("transition finishes");
        assert_eq!(done.from, Wall::Left);
        assert_eq!(done.to, Wall::Center);
        assert!(cam.rotation().abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = CameraController::new();
        cam.set_resize_fov(90.0);
        for _ in 0..20 {
            cam.manual_zoom(-ZOOM_STEP);
            assert!(cam.fov() >= MIN_ZOOM_FOV);
        }
        assert_eq!(cam.fov(), MIN_ZOOM_FOV);
        for _ in 0..40 {
            cam.manual_zoom(ZOOM_STEP);
        }
        assert_eq!(cam.fov(), MAX_ZOOM_FOV);
    }

    #[test]
    fn zoom_ignores_lock() {
        let mut cam = CameraController::new();
        cam.set_resize_fov(60.0);
        cam.request_view(Wall::Left);
        cam.manual_zoom(5.0);
        assert_eq!(cam.fov(), 65.0);
    }

    #[test]
    fn readout_rounds() {
        let mut cam = CameraController::new();
        cam.set_resize_fov(42.4);
        assert_eq!(cam.zoom_readout(), "42°");
        cam.set_resize_fov(67.6);
        assert_eq!(cam.zoom_readout(), "68°");
    }

    #[test]
    fn fallback_easing_converges_when_unlocked() {
        let mut cam = CameraController::new();
        cam.rotation = 0.5;
        let first = {
            cam.advance(1.0 / 60.0);
            cam.rotation()
        };
        assert!((first - 0.45).abs() < 1e-6);
        for _ in 0..200 {
            cam.advance(1.0 / 60.0);
        }
        assert!(cam.rotation().abs() <= FALLBACK_EPSILON);
    }

    #[test]
    fn fallback_easing_is_idle_during_transition() {
        let mut cam = CameraController::new();
        cam.request_view(Wall::Left);
        cam.advance(0.0);
        // Zero elapsed time leaves the tween at its start.
        assert_eq!(cam.rotation(), 0.0);
    }
}
