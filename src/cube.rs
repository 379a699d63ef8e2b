// cube.rs — the six walls enclosing the viewer

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Quat, Vec3};

use crate::config::WallColors;
use crate::viewport::WallDimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Surface {
    pub const ALL: [Surface; 6] = [
        Surface::Front,
        Surface::Back,
        Surface::Left,
        Surface::Right,
        Surface::Top,
        Surface::Bottom,
    ];

    /// Fixed orientation of the unit quad, which faces +Z before rotation.
    fn orientation(self) -> Quat {
        match self {
            Surface::Front => Quat::IDENTITY,
            Surface::Back => Quat::from_rotation_y(PI),
            Surface::Left => Quat::from_rotation_y(FRAC_PI_2),
            Surface::Right => Quat::from_rotation_y(-FRAC_PI_2),
            Surface::Top => Quat::from_rotation_x(-FRAC_PI_2),
            Surface::Bottom => Quat::from_rotation_x(FRAC_PI_2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGB fill, multiplied with the texture when one is bound.
    pub color: [f32; 3],
    pub textured: bool,
    pub needs_update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl WallTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallMesh {
    pub surface: Surface,
    pub transform: WallTransform,
    pub material: Material,
}

#[derive(Debug, Clone)]
pub struct CubeGeometry {
    walls: [WallMesh; 6],
    untextured_front: [f32; 3],
    dirty: bool,
}

impl CubeGeometry {
    /// Unit walls at the origin; call [`CubeGeometry::apply`] to size them.
    pub fn new(colors: &WallColors) -> Self {
        let walls = Surface::ALL.map(|surface| WallMesh {
            surface,
            transform: WallTransform {
                translation: Vec3::ZERO,
                rotation: surface.orientation(),
                scale: Vec3::ONE,
            },
            material: Material {
                color: match surface {
                    Surface::Front => colors.untextured_front.linear(),
                    Surface::Back => colors.back.linear(),
                    Surface::Left => colors.left.linear(),
                    Surface::Right => colors.right.linear(),
                    Surface::Top => colors.top.linear(),
                    Surface::Bottom => colors.bottom.linear(),
                },
                textured: false,
                needs_update: false,
            },
        });

        Self {
            walls,
            untextured_front: colors.untextured_front.linear(),
            dirty: true,
        }
    }

    /// Positions and scales every wall for `dims`. Repeated calls with the
    /// same dimensions leave the transforms unchanged.
    pub fn apply(&mut self, dims: WallDimensions) {
        let half_w = dims.width / 2.0;
        let half_h = dims.height / 2.0;

        for wall in &mut self.walls {
            let (translation, scale) = match wall.surface {
                Surface::Front => (Vec3::new(0.0, 0.0, -half_w), Vec3::new(dims.width, dims.height, 1.0)),
                Surface::Back => (Vec3::new(0.0, 0.0, half_w), Vec3::new(dims.width, dims.height, 1.0)),
                Surface::Left => (Vec3::new(-half_w, 0.0, 0.0), Vec3::new(dims.width, dims.height, 1.0)),
                Surface::Right => (Vec3::new(half_w, 0.0, 0.0), Vec3::new(dims.width, dims.height, 1.0)),
                // Square footprint.
                Surface::Top => (Vec3::new(0.0, half_h, 0.0), Vec3::new(dims.width, dims.width, 1.0)),
                Surface::Bottom => (Vec3::new(0.0, -half_h, 0.0), Vec3::new(dims.width, dims.width, 1.0)),
            };
            wall.transform.translation = translation;
            wall.transform.scale = scale;
            if wall.material.textured {
                wall.material.needs_update = true;
            }
        }
        self.dirty = true;
    }

    /// Binds or unbinds the background texture on the front wall.
    pub fn set_front_texture(&mut self, textured: bool) {
        let fill = if textured { [1.0, 1.0, 1.0] } else { self.untextured_front };
        let front = self.wall_mut(Surface::Front);
        front.material.textured = textured;
        front.material.needs_update = textured;
        front.material.color = fill;
        self.dirty = true;
    }

    pub fn wall(&self, surface: Surface) -> &WallMesh {
        &self.walls[Self::slot(surface)]
    }

    pub fn walls(&self) -> &[WallMesh] {
        &self.walls
    }

    /// Returns whether the walls changed since the last call and clears the
    /// per-material update flags.
    pub fn take_dirty(&mut self) -> bool {
        for wall in &mut self.walls {
            wall.material.needs_update = false;
        }
        std::mem::replace(&mut self.dirty, false)
    }

    fn wall_mut(&mut self, surface: Surface) -> &mut WallMesh {
        &mut self.walls[Self::slot(surface)]
    }

    fn slot(surface: Surface) -> usize {
        match surface {
            Surface::Front => 0,
            Surface::Back => 1,
            Surface::Left => 2,
            Surface::Right => 3,
            Surface::Top => 4,
            Surface::Bottom => 5,
        }
    }
}
