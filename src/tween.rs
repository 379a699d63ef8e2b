// tween.rs — fixed-duration interpolation of a single value

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in/ease-out.
    QuadInOut,
}

impl Easing {
    /// Maps linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Moves the clock forward and returns the eased value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed / self.duration;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
