// room.rs — single owner of the widget state

use crate::camera::{CameraController, TransitionComplete, ZOOM_STEP};
use crate::config::{PanelContent, RoomConfig};
use crate::cube::CubeGeometry;
use crate::navigation::{GestureTracker, InputEvent, Wall};
use crate::viewport::{Viewport, ViewportMetrics};

/// Which wall's content panel is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPanels {
    visible: [bool; 3],
}

impl ContentPanels {
    pub fn new(initial: Wall) -> Self {
        let mut panels = Self { visible: [false; 3] };
        panels.swap(None, initial);
        panels
    }

    pub fn swap(&mut self, previous: Option<Wall>, next: Wall) {
        if let Some(prev) = previous {
            self.visible[prev.index()] = false;
        }
        self.visible[next.index()] = true;
    }

    pub fn is_visible(&self, wall: Wall) -> bool {
        self.visible[wall.index()]
    }

    pub fn active(&self) -> Option<Wall> {
        Wall::ALL.into_iter().find(|w| self.is_visible(*w))
    }
}

pub struct Room {
    camera: CameraController,
    geometry: CubeGeometry,
    gestures: GestureTracker,
    panels: ContentPanels,
    viewport: Option<Viewport>,
    content: [PanelContent; 3],
}

impl Room {
    pub fn new(config: &RoomConfig) -> Self {
        let p = &config.panels;
        Self {
            camera: CameraController::new(),
            geometry: CubeGeometry::new(&config.wall_colors),
            gestures: GestureTracker::new(),
            panels: ContentPanels::new(Wall::Center),
            viewport: None,
            content: [p.left.clone(), p.center.clone(), p.right.clone()],
        }
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn geometry(&self) -> &CubeGeometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut CubeGeometry {
        &mut self.geometry
    }

    pub fn panels(&self) -> &ContentPanels {
        &self.panels
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Content of the visible panel.
    pub fn active_content(&self) -> Option<(Wall, &PanelContent)> {
        self.panels.active().map(|w| (w, &self.content[w.index()]))
    }

    /// Resizes walls and resets the FOV. Rotation and navigation are untouched.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        let metrics = ViewportMetrics::compute(viewport);
        log::debug!(
            "window {}x{}, aspect {:.2}, wall {:.1}x{:.1}, fov {:.1}",
            viewport.width,
            viewport.height,
            viewport.aspect(),
            metrics.wall.width,
            metrics.wall.height,
            metrics.fov
        );
        self.viewport = Some(viewport);
        self.geometry.apply(metrics.wall);
        self.camera.set_resize_fov(metrics.fov);
    }

    pub fn request_view(&mut self, wall: Wall) -> bool {
        self.camera.request_view(wall)
    }

    pub fn manual_zoom(&mut self, delta: f32) {
        self.camera.manual_zoom(delta);
    }

    pub fn zoom_in(&mut self) {
        self.manual_zoom(-ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.manual_zoom(ZOOM_STEP);
    }

    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.gestures.interpret(event, self.camera.wall()) {
            Some(wall) => self.request_view(wall),
            None => false,
        }
    }

    /// One frame of camera motion. Panels swap only once the transition has
    /// finished and released its lock.
    pub fn advance(&mut self, dt: f32) -> Option<TransitionComplete> {
        let done = self.camera.advance(dt)?;
        debug_assert!(!self.camera.is_locked());
        self.panels.swap(Some(done.from), done.to);
        Some(done)
    }

    /// Binds or drops the background texture on the front wall.
    pub fn set_background(&mut self, loaded: bool) {
        self.geometry.set_front_texture(loaded);
    }
}
