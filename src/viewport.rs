use eframe::egui::{Pos2, Vec2, pos2, vec2};

pub const WORLD_SIZE: Vec2 = vec2(3000.0, 2000.0);
/// Fixed origin every level is laid out around, whatever the depth.
pub const WORLD_CENTER: Pos2 = pos2(WORLD_SIZE.x / 2.0, WORLD_SIZE.y / 2.0);

/// Extra wait past the nominal animation length before a transition counts
/// as settled.
const SETTLE_SLACK_SECS: f64 = 0.010;

const EASING: CubicBezier = CubicBezier::new(0.22, 0.9, 0.32, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn to_screen(&self, origin: Pos2, world: Pos2) -> Pos2 {
        origin + self.translate + world.to_vec2() * self.scale
    }

    pub fn to_world(&self, origin: Pos2, screen: Pos2) -> Pos2 {
        ((screen - origin - self.translate) / self.scale).to_pos2()
    }

    pub fn lerp(&self, target: &Self, t: f32) -> Self {
        Self {
            translate: self.translate + (target.translate - self.translate) * t,
            scale: self.scale + (target.scale - self.scale) * t,
        }
    }
}

/// Screen-side measurements used to center world points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewGeometry {
    pub screen: Vec2,
    /// Width covered by chrome docked on the right edge (the info panel).
    pub reserved_width: f32,
    pub vertical_offset: f32,
}

impl ViewGeometry {
    pub fn effective_center(&self) -> Pos2 {
        pos2(
            ((self.screen.x - self.reserved_width) / 2.0).max(0.0),
            self.screen.y / 2.0 + self.vertical_offset,
        )
    }

    /// Transform placing `world` (or the canonical world center when
    /// `recenter` is set) at the middle of the unobstructed screen area.
    pub fn center_on(&self, world: Pos2, scale: f32, recenter: bool) -> ViewTransform {
        let target = if recenter { WORLD_CENTER } else { world };
        let center = self.effective_center();

        ViewTransform {
            translate: center.to_vec2() - target.to_vec2() * scale,
            scale,
        }
    }

    pub fn canonical(&self, scale: f32) -> ViewTransform {
        self.center_on(WORLD_CENTER, scale, true)
    }
}

#[derive(Clone, Copy, Debug)]
struct TransformAnimation {
    from: ViewTransform,
    started_at: f64,
    duration: f64,
}

#[derive(Clone, Copy, Debug)]
struct PanGesture {
    pointer_origin: Pos2,
    translate_origin: Vec2,
    last_pointer: Pos2,
}

/// Animated translate+scale state of the map surface.
///
/// `settled` is always the transform the view ends up at; an in-flight
/// animation only changes what [`Viewport::displayed`] reports until it runs
/// out.
#[derive(Clone, Debug)]
pub struct Viewport {
    settled: ViewTransform,
    animation: Option<TransformAnimation>,
    pan: Option<PanGesture>,
}

impl Viewport {
    pub fn new(initial: ViewTransform) -> Self {
        Self {
            settled: initial,
            animation: None,
            pan: None,
        }
    }

    pub fn settled(&self) -> ViewTransform {
        self.settled
    }

    pub fn displayed(&self, now: f64) -> ViewTransform {
        let Some(animation) = &self.animation else {
            return self.settled;
        };

        let progress = animation_progress(animation, now);
        if progress >= 1.0 {
            return self.settled;
        }

        animation.from.lerp(&self.settled, EASING.ease(progress))
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| animation_progress(animation, now) < 1.0)
    }

    /// Starts animating toward `target` and returns the time the move is
    /// considered complete.
    pub fn animate_to(&mut self, target: ViewTransform, now: f64, duration: f64) -> f64 {
        let from = self.displayed(now);
        self.settled = target;
        self.animation = Some(TransformAnimation {
            from,
            started_at: now,
            duration: duration.max(0.0),
        });

        now + duration.max(0.0) + SETTLE_SLACK_SECS
    }

    pub fn snap_to(&mut self, target: ViewTransform) {
        self.settled = target;
        self.animation = None;
        // Rebase a live drag so only pointer movement after the snap counts.
        if let Some(pan) = &mut self.pan {
            pan.translate_origin = target.translate;
            pan.pointer_origin = pan.last_pointer;
        }
    }

    pub fn begin_pan(&mut self, pointer: Pos2) {
        self.pan = Some(PanGesture {
            pointer_origin: pointer,
            translate_origin: self.settled.translate,
            last_pointer: pointer,
        });
    }

    pub fn pan_to(&mut self, pointer: Pos2) -> bool {
        let Some(pan) = &mut self.pan else {
            return false;
        };

        pan.last_pointer = pointer;
        self.settled.translate = pan.translate_origin + (pointer - pan.pointer_origin);
        true
    }

    pub fn end_pan(&mut self) {
        self.pan = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }
}

fn animation_progress(animation: &TransformAnimation, now: f64) -> f32 {
    if animation.duration <= 0.0 {
        return 1.0;
    }

    ((now - animation.started_at) / animation.duration).clamp(0.0, 1.0) as f32
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Clone, Copy, Debug)]
struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f32, a2: f32, s: f32) -> f32 {
        let inverse = 1.0 - s;
        3.0 * inverse * inverse * s * a1 + 3.0 * inverse * s * s * a2 + s * s * s
    }

    fn slope(a1: f32, a2: f32, s: f32) -> f32 {
        let inverse = 1.0 - s;
        3.0 * inverse * inverse * a1 + 6.0 * inverse * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    fn ease(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let mut s = t;
        for _ in 0..8 {
            let error = Self::sample(self.x1, self.x2, s) - t;
            if error.abs() < 1e-5 {
                return Self::sample(self.y1, self.y2, s);
            }
            let slope = Self::slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s = (s - error / slope).clamp(0.0, 1.0);
        }

        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..32 {
            let x = Self::sample(self.x1, self.x2, s);
            if (x - t).abs() < 1e-5 {
                break;
            }
            if x < t {
                low = s;
            } else {
                high = s;
            }
            s = (low + high) / 2.0;
        }

        Self::sample(self.y1, self.y2, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ViewGeometry {
        ViewGeometry {
            screen: vec2(1350.0, 800.0),
            reserved_width: 350.0,
            vertical_offset: 0.0,
        }
    }

    #[test]
    fn recenter_puts_world_center_beside_the_panel() {
        let transform = geometry().canonical(1.0);
        assert_eq!(transform.translate, vec2(500.0 - 1500.0, 400.0 - 1000.0));

        let screen = transform.to_screen(Pos2::ZERO, WORLD_CENTER);
        assert_eq!(screen, pos2(500.0, 400.0));
    }

    #[test]
    fn center_on_targets_the_given_point_unless_recentering() {
        let geometry = geometry();
        let point = pos2(1800.0, 1000.0);

        let focused = geometry.center_on(point, 2.0, false);
        assert_eq!(focused.to_screen(Pos2::ZERO, point), pos2(500.0, 400.0));
        assert_eq!(focused.scale, 2.0);

        assert_eq!(geometry.center_on(point, 1.0, true), geometry.canonical(1.0));
    }

    #[test]
    fn screen_world_round_trip() {
        let transform = ViewTransform {
            translate: vec2(-120.0, 45.0),
            scale: 1.5,
        };
        let origin = pos2(10.0, 20.0);
        let world = pos2(333.0, 777.0);

        let back = transform.to_world(origin, transform.to_screen(origin, world));
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn animation_settles_after_its_duration() {
        let start = ViewTransform::default();
        let target = ViewTransform {
            translate: vec2(-100.0, -50.0),
            scale: 1.0,
        };
        let mut viewport = Viewport::new(start);

        let settles_at = viewport.animate_to(target, 10.0, 0.52);
        assert!((settles_at - 10.53).abs() < 1e-9);
        assert_eq!(viewport.settled(), target);
        assert_eq!(viewport.displayed(10.0), start);
        assert!(viewport.is_animating(10.2));

        let midway = viewport.displayed(10.26);
        assert!(midway.translate.x < 0.0 && midway.translate.x > -100.0);

        assert!(!viewport.is_animating(10.6));
        assert_eq!(viewport.displayed(10.6), target);
    }

    #[test]
    fn easing_hits_endpoints_and_overshoots_linear_early() {
        assert_eq!(EASING.ease(0.0), 0.0);
        assert_eq!(EASING.ease(1.0), 1.0);
        assert!(EASING.ease(0.25) > 0.25);

        let mut previous = 0.0;
        for step in 1..=20 {
            let value = EASING.ease(step as f32 / 20.0);
            assert!(value >= previous - 1e-4);
            previous = value;
        }
    }

    #[test]
    fn pan_follows_pointer_one_to_one() {
        let mut viewport = Viewport::new(ViewTransform {
            translate: vec2(10.0, 10.0),
            scale: 1.0,
        });
        assert!(!viewport.pan_to(pos2(5.0, 5.0)));

        viewport.begin_pan(pos2(100.0, 100.0));
        assert!(viewport.pan_to(pos2(130.0, 80.0)));
        assert_eq!(viewport.settled().translate, vec2(40.0, -10.0));
        assert_eq!(viewport.settled().scale, 1.0);

        viewport.end_pan();
        assert!(!viewport.is_panning());
        assert!(!viewport.pan_to(pos2(0.0, 0.0)));
        assert_eq!(viewport.settled().translate, vec2(40.0, -10.0));
    }

    #[test]
    fn pan_during_animation_moves_the_destination() {
        let mut viewport = Viewport::new(ViewTransform::default());
        let target = ViewTransform {
            translate: vec2(200.0, 0.0),
            scale: 1.0,
        };
        viewport.animate_to(target, 0.0, 0.5);

        viewport.begin_pan(pos2(0.0, 0.0));
        viewport.pan_to(pos2(0.0, 30.0));
        assert_eq!(viewport.displayed(1.0).translate, vec2(200.0, 30.0));
    }

    #[test]
    fn snap_rebases_a_live_drag() {
        let mut viewport = Viewport::new(ViewTransform::default());
        viewport.begin_pan(pos2(100.0, 100.0));
        viewport.pan_to(pos2(200.0, 100.0));

        let snapped = ViewTransform {
            translate: vec2(-1000.0, -600.0),
            scale: 1.0,
        };
        viewport.snap_to(snapped);
        assert_eq!(viewport.settled(), snapped);

        viewport.pan_to(pos2(201.0, 100.0));
        assert_eq!(viewport.settled().translate, vec2(-999.0, -600.0));
    }
}
