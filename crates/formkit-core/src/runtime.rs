use std::time::Duration;

use web_time::Instant;

use crate::animation::now;
use crate::scope::Scope;
use crate::View;

/// Something that advances on every display frame.
pub trait Animate {
    /// Advance by `dt`; returns true while another frame is needed.
    fn tick(&mut self, dt: Duration) -> bool;
}

/// Output of one frame: the stamped view tree and whether anything is
/// still in motion.
#[derive(Debug)]
pub struct Frame {
    pub number: u64,
    pub dt: Duration,
    pub view: View,
    pub animating: bool,
}

/// Drives frames for one mounted tree.
///
/// Every frame measures `dt` from the animation clock, lets the caller tick
/// its widgets and build the tree inside the root scope, then assigns view
/// ids. Dropping or `unmount`ing the scheduler disposes the root scope.
pub struct Scheduler {
    scope: Scope,
    last_frame: Option<Instant>,
    frames: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            last_frame: None,
            frames: 0,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Runs `f` with the root scope current, for mounting widgets whose
    /// teardown should follow the tree's.
    pub fn mount<R>(&self, f: impl FnOnce() -> R) -> R {
        self.scope.run(f)
    }

    pub fn frame(&mut self, build: impl FnOnce(Duration) -> (View, bool)) -> Frame {
        let t = now();
        let dt = self
            .last_frame
            .map(|prev| t.saturating_duration_since(prev))
            .unwrap_or_default();
        self.last_frame = Some(t);
        self.frames += 1;

        let (view, animating) = self.scope.run(|| build(dt));

        let mut id = 1u64;
        fn stamp(mut v: View, id: &mut u64) -> View {
            v.id = *id;
            *id += 1;
            v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
            v
        }

        Frame {
            number: self.frames,
            dt,
            view: stamp(view, &mut id),
            animating,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn unmount(self) {
        log::debug!("unmounting tree after {} frames", self.frames);
        self.scope.dispose();
    }
}
