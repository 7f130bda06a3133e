//! Spring animation.
//!
//! `AnimationController` owns `{current, target, velocity}` and is advanced
//! explicitly with `tick(dt)`. `AnimatedValue` wraps a controller and measures
//! `dt` from the installed clock, so a widget only has to call `update()` once
//! per frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;
use web_time::Instant;

use crate::{Color, Transform};

thread_local! {
    static CLOCK: RefCell<Option<Rc<dyn Clock>>> = const { RefCell::new(None) };
}

pub(crate) fn now() -> Instant {
    CLOCK
        .with(|c| c.borrow().as_ref().map(|c| c.now()))
        .unwrap_or_else(|| SystemClock.now())
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Install the animation clock for this thread. Hosts leave the default
/// system clock in place; tests install a `TestClock`.
pub fn set_clock(clock: Rc<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

/// Drop any installed clock and fall back to the system clock.
pub fn reset_clock() {
    CLOCK.with(|c| *c.borrow_mut() = None);
}

/// A test clock you can drive deterministically. Clones share the same time.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Creates a clock and installs it for the current thread.
    pub fn install() -> Self {
        let clock = Self::new();
        set_clock(Rc::new(clock.clone()));
        clock
    }

    pub fn advance(&self, d: Duration) {
        self.t.set(self.t.get() + d);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

pub type Components = SmallVec<[f32; 8]>;

/// A value a spring can drive: it decomposes into independent numeric
/// channels and can be rebuilt from them.
pub trait Animatable: Clone + PartialEq {
    fn components(&self) -> Components;
    fn from_components(c: &[f32]) -> Self;
}

impl Animatable for f32 {
    fn components(&self) -> Components {
        smallvec::smallvec![*self]
    }
    fn from_components(c: &[f32]) -> Self {
        c.first().copied().unwrap_or_default()
    }
}

impl Animatable for Color {
    fn components(&self) -> Components {
        smallvec::smallvec![self.0 as f32, self.1 as f32, self.2 as f32, self.3 as f32]
    }
    fn from_components(c: &[f32]) -> Self {
        let ch = |i: usize| c.get(i).copied().unwrap_or(0.0).round().clamp(0.0, 255.0) as u8;
        Color(ch(0), ch(1), ch(2), ch(3))
    }
}

impl Animatable for Transform {
    fn components(&self) -> Components {
        smallvec::smallvec![self.translate_x, self.translate_y, self.scale_x, self.scale_y]
    }
    fn from_components(c: &[f32]) -> Self {
        let at = |i: usize, d: f32| c.get(i).copied().unwrap_or(d);
        Transform {
            translate_x: at(0, 0.0),
            translate_y: at(1, 0.0),
            scale_x: at(2, 1.0),
            scale_y: at(3, 1.0),
        }
    }
}

/// Spring parameters. Defaults match a near critically damped spring
/// (damping ratio ≈ 0.997) that settles without visible overshoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringSpec {
    pub tension: f32,
    pub friction: f32,
    pub mass: f32,
    /// Per-channel distance from the target below which the spring may rest.
    pub rest_displacement: f32,
    /// Per-channel speed below which the spring may rest.
    pub rest_velocity: f32,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            tension: 170.0,
            friction: 26.0,
            mass: 1.0,
            rest_displacement: 0.001,
            rest_velocity: 0.001,
        }
    }
}

impl SpringSpec {
    /// Friction giving a damping ratio of exactly 1 for this tension and mass.
    pub fn critically_damped(tension: f32) -> Self {
        let spec = Self::default();
        Self {
            tension,
            friction: 2.0 * (tension * spec.mass).sqrt(),
            ..spec
        }
    }

    pub fn damping_ratio(&self) -> f32 {
        self.friction / (2.0 * (self.tension * self.mass).sqrt())
    }
}

const MAX_STEP: Duration = Duration::from_millis(1);

/// Longest `dt` a single tick integrates; a host resuming after a stall
/// continues from where it was instead of replaying the gap.
pub const MAX_FRAME: Duration = Duration::from_millis(100);

// Integration runs in f64: colour channels live on a 0..255 scale where an
// f32 position stops moving long before the velocity reaches rest.
type State = SmallVec<[f64; 8]>;

fn widen(c: &[f32]) -> State {
    c.iter().map(|&x| f64::from(x)).collect()
}

fn narrow(c: &[f64]) -> Components {
    c.iter().map(|&x| x as f32).collect()
}

/// Spring state for one animated value.
pub struct AnimationController<T: Animatable> {
    current: T,
    target: T,
    position: State,
    goal: State,
    velocity: State,
    spec: SpringSpec,
    at_rest: bool,
}

impl<T: Animatable> AnimationController<T> {
    /// A controller resting at `initial`; with no new target it never moves.
    pub fn new(initial: T, spec: SpringSpec) -> Self {
        let position = widen(&initial.components());
        let velocity = position.iter().map(|_| 0.0).collect();
        Self {
            current: initial.clone(),
            target: initial,
            goal: position.clone(),
            position,
            velocity,
            spec,
            at_rest: true,
        }
    }

    /// Retarget the spring. Any motion toward the previous target is
    /// abandoned; the current velocity carries over so the value does not
    /// jump.
    pub fn set_target(&mut self, target: T) {
        if target == self.target {
            return;
        }
        let goal = widen(&target.components());
        if goal.len() != self.position.len() {
            // Channel count changed; there is nothing to interpolate between.
            self.snap_to(target);
            return;
        }
        log::trace!("spring retargeted (was resting: {})", self.at_rest);
        self.goal = goal;
        self.target = target;
        self.at_rest = false;
    }

    /// Jump to `value` with no motion.
    pub fn snap_to(&mut self, value: T) {
        self.position = widen(&value.components());
        self.velocity = self.position.iter().map(|_| 0.0).collect();
        self.goal = self.position.clone();
        self.current = value.clone();
        self.target = value;
        self.at_rest = true;
    }

    /// Advance the spring by `dt` (at most `MAX_FRAME`). Returns true while
    /// still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.at_rest || dt.is_zero() {
            return !self.at_rest;
        }

        let dt = dt.min(MAX_FRAME);
        let steps = dt.as_nanos().div_ceil(MAX_STEP.as_nanos()).max(1);
        let h = dt.as_secs_f64() / steps as f64;
        let tension = f64::from(self.spec.tension);
        let friction = f64::from(self.spec.friction);
        let mass = f64::from(self.spec.mass);
        let rest_displacement = f64::from(self.spec.rest_displacement);
        let rest_velocity = f64::from(self.spec.rest_velocity);

        for _ in 0..steps {
            for ((x, v), g) in self
                .position
                .iter_mut()
                .zip(self.velocity.iter_mut())
                .zip(self.goal.iter())
            {
                let force = -tension * (*x - *g) - friction * *v;
                *v += force / mass * h;
                *x += *v * h;
            }
        }

        let settled = self
            .position
            .iter()
            .zip(self.velocity.iter())
            .zip(self.goal.iter())
            .all(|((x, v), g)| {
                (x - g).abs() < rest_displacement && v.abs() < rest_velocity
            });

        if settled {
            self.position = self.goal.clone();
            self.velocity.iter_mut().for_each(|v| *v = 0.0);
            self.current = self.target.clone();
            self.at_rest = true;
            log::trace!("spring settled");
        } else {
            self.current = T::from_components(&narrow(&self.position));
        }
        !self.at_rest
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn velocity(&self) -> Components {
        narrow(&self.velocity)
    }

    pub fn spec(&self) -> SpringSpec {
        self.spec
    }

    pub fn is_animating(&self) -> bool {
        !self.at_rest
    }
}

/// Animated value that transitions smoothly, timed by the animation clock.
pub struct AnimatedValue<T: Animatable> {
    controller: AnimationController<T>,
    last_frame: Option<Instant>,
}

impl<T: Animatable> AnimatedValue<T> {
    pub fn new(initial: T, spec: SpringSpec) -> Self {
        Self {
            controller: AnimationController::new(initial, spec),
            last_frame: None,
        }
    }

    pub fn set_target(&mut self, target: T) {
        if !self.controller.is_animating() {
            // Motion starts now, not at whenever the last frame ran.
            self.last_frame = Some(now());
        }
        self.controller.set_target(target);
    }

    pub fn snap_to(&mut self, value: T) {
        self.controller.snap_to(value);
        self.last_frame = None;
    }

    /// Advance by the wall-clock time since the previous call.
    pub fn update(&mut self) -> bool {
        let t = now();
        let dt = self
            .last_frame
            .map(|prev| t.saturating_duration_since(prev))
            .unwrap_or_default();
        self.last_frame = Some(t);
        self.controller.tick(dt)
    }

    /// Advance by an explicit frame delta.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let running = self.controller.tick(dt);
        if let Some(prev) = self.last_frame {
            self.last_frame = Some(prev + dt);
        }
        running
    }

    pub fn get(&self) -> &T {
        self.controller.get()
    }

    pub fn target(&self) -> &T {
        self.controller.target()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }
}
