// navigation.rs — walls, adjacency and gesture interpretation

use std::f32::consts::FRAC_PI_2;

/// Mouse drag distance, in logical pixels, that triggers a step.
pub const DRAG_THRESHOLD: f32 = 50.0;
/// Touch swipes use a shorter distance.
pub const SWIPE_THRESHOLD: f32 = 30.0;

const DOUBLE_CLICK_INTERVAL: f64 = 0.4;
const DOUBLE_CLICK_SLOP: f32 = 4.0;

/// The three navigable walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 3] = [Wall::Left, Wall::Center, Wall::Right];

    /// Camera yaw, in radians, that faces this wall.
    pub fn rotation(self) -> f32 {
        match self {
            Wall::Left => FRAC_PI_2,
            Wall::Center => 0.0,
            Wall::Right => -FRAC_PI_2,
        }
    }

    /// The adjacent wall in `direction`, if any. Left and right are never
    /// adjacent to each other.
    pub fn step(self, direction: Direction) -> Option<Wall> {
        match (self, direction) {
            (Wall::Right, Direction::Left) | (Wall::Left, Direction::Right) => Some(Wall::Center),
            (Wall::Center, Direction::Left) => Some(Wall::Left),
            (Wall::Center, Direction::Right) => Some(Wall::Right),
            (Wall::Left, Direction::Left) | (Wall::Right, Direction::Right) => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Wall::Left => 0,
            Wall::Center => 1,
            Wall::Right => 2,
        }
    }
}

/// Raw user input, already converted to logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    NavButton(Direction),
    Key(Direction),
    /// `time` is seconds since an arbitrary fixed origin.
    PointerDown { x: f32, time: f64 },
    PointerMove { x: f32 },
    PointerUp,
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
    DoubleClick,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f32,
    threshold: f32,
}

#[derive(Debug, Clone, Copy)]
struct Click {
    x: f32,
    time: f64,
}

/// Turns raw input into single-step wall requests.
#[derive(Debug, Default)]
pub struct GestureTracker {
    drag: Option<Drag>,
    last_click: Option<Click>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns the wall the event asks to move to from `current`.
    pub fn interpret(&mut self, event: InputEvent, current: Wall) -> Option<Wall> {
        match event {
            InputEvent::NavButton(direction) | InputEvent::Key(direction) => current.step(direction),

            InputEvent::PointerDown { x, time } => {
                self.drag = Some(Drag { start_x: x, threshold: DRAG_THRESHOLD });
                if self.register_click(x, time) {
                    return self.interpret(InputEvent::DoubleClick, current);
                }
                None
            }
            InputEvent::TouchStart { x } => {
                self.drag = Some(Drag { start_x: x, threshold: SWIPE_THRESHOLD });
                None
            }

            InputEvent::PointerMove { x } | InputEvent::TouchMove { x } => {
                let drag = self.drag?;
                let delta = x - drag.start_x;
                // Dragging the scene right reveals the wall on the left.
                let direction = if delta > drag.threshold {
                    Direction::Left
                } else if delta < -drag.threshold {
                    Direction::Right
                } else {
                    return None;
                };
                self.drag = None;
                current.step(direction)
            }

            InputEvent::PointerUp | InputEvent::TouchEnd => {
                self.drag = None;
                None
            }

            InputEvent::DoubleClick => (current != Wall::Center).then_some(Wall::Center),
        }
    }

    fn register_click(&mut self, x: f32, time: f64) -> bool {
        let is_double = self.last_click.is_some_and(|prev| {
            time - prev.time <= DOUBLE_CLICK_INTERVAL && (x - prev.x).abs() <= DOUBLE_CLICK_SLOP
        });
        // A double click consumes both presses.
        self.last_click = if is_double { None } else { Some(Click { x, time }) };
        is_double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency() {
        assert_eq!(Wall::Center.step(Direction::Left), Some(Wall::Left));
        assert_eq!(Wall::Center.step(Direction::Right), Some(Wall::Right));
        assert_eq!(Wall::Left.step(Direction::Right), Some(Wall::Center));
        assert_eq!(Wall::Left.step(Direction::Left), None);
        assert_eq!(Wall::Right.step(Direction::Left), Some(Wall::Center));
        assert_eq!(Wall::Right.step(Direction::Right), None);
    }

    #[test]
    fn left_and_right_are_never_one_step_apart() {
        for dir in [Direction::Left, Direction::Right] {
            assert_ne!(Wall::Left.step(dir), Some(Wall::Right));
            assert_ne!(Wall::Right.step(dir), Some(Wall::Left));
        }
    }

    #[test]
    fn keys_and_buttons_share_the_rule() {
        let mut g = GestureTracker::new();
        assert_eq!(g.interpret(InputEvent::Key(Direction::Left), Wall::Center), Some(Wall::Left));
        assert_eq!(
            g.interpret(InputEvent::NavButton(Direction::Left), Wall::Right),
            Some(Wall::Center)
        );
        assert_eq!(g.interpret(InputEvent::Key(Direction::Right), Wall::Right), None);
    }

    #[test]
    fn mouse_drag_threshold() {
        let mut g = GestureTracker::new();
        g.interpret(InputEvent::PointerDown { x: 100.0, time: 0.0 }, Wall::Center);
        assert_eq!(g.interpret(InputEvent::PointerMove { x: 149.0 }, Wall::Center), None);
        assert!(g.is_dragging());
        assert_eq!(
            g.interpret(InputEvent::PointerMove { x: 151.0 }, Wall::Center),
            Some(Wall::Left)
        );
        // The drag ends once it fires.
        assert!(!g.is_dragging());
        assert_eq!(g.interpret(InputEvent::PointerMove { x: 400.0 }, Wall::Left), None);
    }

    #[test]
    fn drag_left_steps_right() {
        let mut g = GestureTracker::new();
        g.interpret(InputEvent::PointerDown { x: 300.0, time: 0.0 }, Wall::Left);
        assert_eq!(
            g.interpret(InputEvent::PointerMove { x: 240.0 }, Wall::Left),
            Some(Wall::Center)
        );
    }

    #[test]
    fn touch_uses_shorter_threshold() {
        let mut g = GestureTracker::new();
        g.interpret(InputEvent::TouchStart { x: 100.0 }, Wall::Center);
        assert_eq!(g.interpret(InputEvent::TouchMove { x: 129.0 }, Wall::Center), None);
        assert_eq!(
            g.interpret(InputEvent::TouchMove { x: 68.0 }, Wall::Center),
            Some(Wall::Right)
        );
    }

    #[test]
    fn release_cancels_drag() {
        let mut g = GestureTracker::new();
        g.interpret(InputEvent::PointerDown { x: 0.0, time: 0.0 }, Wall::Center);
        g.interpret(InputEvent::PointerUp, Wall::Center);
        assert_eq!(g.interpret(InputEvent::PointerMove { x: 500.0 }, Wall::Center), None);

        g.interpret(InputEvent::TouchStart { x: 0.0 }, Wall::Center);
        g.interpret(InputEvent::TouchEnd, Wall::Center);
        assert_eq!(g.interpret(InputEvent::TouchMove { x: 500.0 }, Wall::Center), None);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut g = GestureTracker::new();
        assert_eq!(g.interpret(InputEvent::PointerMove { x: 900.0 }, Wall::Center), None);
    }

    #[test]
    fn double_click_returns_to_center() {
        let mut g = GestureTracker::new();
        assert_eq!(g.interpret(InputEvent::PointerDown { x: 10.0, time: 1.0 }, Wall::Left), None);
        assert_eq!(
            g.interpret(InputEvent::PointerDown { x: 11.0, time: 1.2 }, Wall::Left),
            Some(Wall::Center)
        );
        assert_eq!(g.interpret(InputEvent::DoubleClick, Wall::Center), None);
        assert_eq!(g.interpret(InputEvent::DoubleClick, Wall::Right), Some(Wall::Center));
    }

    #[test]
    fn slow_or_distant_clicks_are_not_double() {
        let mut g = GestureTracker::new();
        g.interpret(InputEvent::PointerDown { x: 10.0, time: 1.0 }, Wall::Left);
        assert_eq!(g.interpret(InputEvent::PointerDown { x: 10.0, time: 1.6 }, Wall::Left), None);
        assert_eq!(g.interpret(InputEvent::PointerDown { x: 40.0, time: 1.7 }, Wall::Left), None);
    }

    #[test]
    fn rotations() {
        assert_eq!(Wall::Center.rotation(), 0.0);
        assert_eq!(Wall::Left.rotation(), FRAC_PI_2);
        assert_eq!(Wall::Right.rotation(), -FRAC_PI_2);
    }
}
