//! Frame loop lifecycle, independent of the scheduling primitive.
//!
//! A [`Host`] provides frame scheduling and listener registration (the
//! browser host uses `requestAnimationFrame` and DOM listeners). The
//! [`Driver`] owns the simulation and the surface and guarantees that after
//! [`Driver::stop`] nothing is scheduled and nothing is listening.

use super::motion::Point;
use super::render::Surface;
use super::sim::{Simulation, TickSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Tap,
    Resize,
}

pub trait Host {
    type Frame: Copy;

    /// Ask for one callback on the next frame. `None` if the host refused.
    fn schedule_frame(&mut self) -> Option<Self::Frame>;
    fn cancel_frame(&mut self, frame: Self::Frame);
    /// Start delivering `event`; returns false if registration failed.
    fn listen(&mut self, event: HostEvent) -> bool;
    fn unlisten(&mut self, event: HostEvent);
}

/// Idle -> Running -> Stopped. A stopped driver never restarts; build a new
/// one instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

pub struct Driver<H: Host, S: Surface> {
    host: H,
    surface: S,
    sim: Simulation,
    pending: Option<H::Frame>,
    listening: Vec<HostEvent>,
    state: Lifecycle,
}

impl<H: Host, S: Surface> Driver<H, S> {
    pub fn new(host: H, surface: S, sim: Simulation) -> Self {
        Self {
            host,
            surface,
            sim,
            pending: None,
            listening: Vec::new(),
            state: Lifecycle::Idle,
        }
    }

    /// Register tap + resize listeners and schedule the first frame.
    /// Only an idle driver starts; running or stopped ones ignore the call.
    pub fn start(&mut self) {
        if self.state != Lifecycle::Idle {
            return;
        }
        self.state = Lifecycle::Running;
        for event in [HostEvent::Tap, HostEvent::Resize] {
            if self.host.listen(event) {
                self.listening.push(event);
            }
        }
        self.pending = self.host.schedule_frame();
    }

    /// Frame callback: one simulation frame, then reschedule while running.
    pub fn on_frame(&mut self) -> Option<TickSummary> {
        self.pending = None;
        if !self.is_running() {
            return None;
        }
        let summary = self.sim.frame(&mut self.surface);
        self.pending = self.host.schedule_frame();
        Some(summary)
    }

    pub fn on_tap(&mut self, at: Point) {
        if self.is_running() {
            self.sim.launch(at);
        }
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
        self.sim.resize(width, height);
    }

    /// Host-initiated launch toward `at`; same path as a tap.
    pub fn launch_at(&mut self, at: Point) {
        self.on_tap(at);
    }

    /// Cancel the pending frame and drop every listener. Idempotent.
    pub fn stop(&mut self) {
        self.state = Lifecycle::Stopped;
        if let Some(frame) = self.pending.take() {
            self.host.cancel_frame(frame);
        }
        for event in self.listening.drain(..) {
            self.host.unlisten(event);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == Lifecycle::Running
    }
    pub fn state(&self) -> Lifecycle {
        self.state
    }
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }
    pub fn listeners(&self) -> &[HostEvent] {
        &self.listening
    }
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
    pub fn host(&self) -> &H {
        &self.host
    }
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host, S: Surface> Drop for Driver<H, S> {
    fn drop(&mut self) {
        self.stop();
    }
}
