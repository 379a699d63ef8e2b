// viewport.rs — wall size and field-of-view derived from the window size

/// Window width at which one reference span of world units is visible.
pub const REFERENCE_WIDTH: f32 = 1000.0;
pub const WORLD_UNITS_PER_REFERENCE: f32 = 50.0;
/// Share of the viewport width taken by a wall.
pub const WALL_WIDTH_RATIO: f32 = 0.9;

/// Landscape floor.
pub const MIN_WALL_HEIGHT: f32 = 23.0;
/// Portrait ceiling.
pub const MAX_WALL_HEIGHT: f32 = 47.0;

pub const WIDE_ASPECT: f32 = 1.5;
pub const NARROW_ASPECT: f32 = 1.0;

pub const MIN_WINDOW_WIDTH: f32 = 260.0;
pub const MIN_FOV: f32 = 42.0;
pub const MAX_FOV: f32 = 92.0;

/// Window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Wall size in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallDimensions {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub wall: WallDimensions,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl ViewportMetrics {
    pub fn compute(viewport: Viewport) -> Self {
        Self {
            wall: WallDimensions {
                width: wall_width(viewport.width),
                height: wall_height(viewport.aspect()),
            },
            fov: field_of_view(viewport.width),
        }
    }
}

/// Linear in the window width, never clamped.
pub fn wall_width(window_width: f32) -> f32 {
    (window_width / REFERENCE_WIDTH) * WORLD_UNITS_PER_REFERENCE * WALL_WIDTH_RATIO
}

/// Piecewise linear in the aspect ratio: floor at or above `WIDE_ASPECT`,
/// ceiling at or below `NARROW_ASPECT`, interpolated in between.
pub fn wall_height(aspect: f32) -> f32 {
    if aspect >= WIDE_ASPECT {
        MIN_WALL_HEIGHT
    } else if aspect <= NARROW_ASPECT {
        MAX_WALL_HEIGHT
    } else {
        let progress = (WIDE_ASPECT - aspect) / (WIDE_ASPECT - NARROW_ASPECT);
        MIN_WALL_HEIGHT + (MAX_WALL_HEIGHT - MIN_WALL_HEIGHT) * progress
    }
}

/// Narrow windows get a wide lens, wide windows a narrow one.
pub fn field_of_view(window_width: f32) -> f32 {
    let constrained = window_width.clamp(MIN_WINDOW_WIDTH, REFERENCE_WIDTH);
    let normalized = (constrained - MIN_WINDOW_WIDTH) / (REFERENCE_WIDTH - MIN_WINDOW_WIDTH);
    let fov = MAX_FOV - (MAX_FOV - MIN_FOV) * normalized;
    fov.clamp(MIN_FOV, MAX_FOV)
}
