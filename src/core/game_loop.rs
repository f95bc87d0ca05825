//! Frame scheduling primitives shared by the terminal host and the simulator.
//!
//! The runner does not own a timer. It asks for frames through a
//! [`FrameScheduler`] and the host calls [`Runner::frame`] whenever a
//! request is pending, passing the time from its [`Clock`].
//!
//! [`Runner::frame`]: crate::core::runner::Runner::frame

use std::time::Instant;

/// Handle of a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequestId(pub u64);

/// Tracks the single outstanding frame request.
///
/// The loop counts as running from the first request until [`cancel`],
/// even between frames. At most one callback is pending at a time.
///
/// [`cancel`]: FrameScheduler::cancel
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    next_id: u64,
    active: Option<FrameRequestId>,
    pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the next frame. No-op if one is already pending.
    pub fn request(&mut self) -> FrameRequestId {
        if self.pending {
            if let Some(id) = self.active {
                return id;
            }
        }
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.active = Some(id);
        self.pending = true;
        id
    }

    /// Consume the pending request at the start of a frame.
    pub fn begin_frame(&mut self) -> Option<FrameRequestId> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.active
    }

    /// Drop any pending request and mark the loop stopped.
    pub fn cancel(&mut self) {
        self.active = None;
        self.pending = false;
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending
    }
}

/// Millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock, relative to creation.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: f64) -> f64 {
        self.now += ms;
        self.now
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

/// Collapses a burst of notifications (resizes, focus changes) into one.
///
/// The deadline is set by the first notification of a burst; later ones
/// only update the value that will be reported.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T: Copy> Debouncer<T> {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn notify(&mut self, now: f64, value: T) {
        match &mut self.pending {
            Some((_, pending_value)) => *pending_value = value,
            None => self.pending = Some((now + self.delay_ms, value)),
        }
    }

    /// The settled value, once the delay has passed.
    pub fn poll(&mut self, now: f64) -> Option<T> {
        match self.pending {
            Some((deadline, value)) if now >= deadline => {
                self.pending = None;
                Some(value)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
