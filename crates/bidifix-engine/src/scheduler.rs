//! Trigger scheduling for annotation passes.
//!
//! The `Scheduler` is a deterministic state machine over `Instant`s: the
//! embedder owns the clock, feeds in event times and asks which passes are
//! due. Nothing here spawns threads or sleeps, which keeps trigger
//! behavior fully testable with synthetic clocks. It tracks:
//! - a one-shot catch-up pass shortly after load
//! - a debounced pass after DOM mutations, with burst coalescing
//! - a periodic full rescan
//! - a settle pass after client-side navigation, plus the poll cadence
//!   used to detect the navigation in the first place
//!
//! # Usage
//!
//! ```ignore
//! let mut scheduler = Scheduler::new(SchedulerTimings::default());
//! let t0 = Instant::now();
//! scheduler.start(t0);
//! scheduler.note_mutation(t0 + Duration::from_millis(10));
//! for trigger in scheduler.poll(t0 + Duration::from_millis(200)) {
//!     // run an annotation pass per trigger
//! }
//! ```

use std::time::{Duration, Instant};

/// Why an annotation pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassTrigger {
    /// Synchronous pass when a document is loaded.
    InitialLoad,
    /// One-shot delayed pass catching content that raced the load.
    CatchUp,
    /// Debounced pass after relevant DOM mutations.
    Mutation,
    /// Periodic full rescan.
    IntervalRescan,
    /// Pass after a client-side navigation settled.
    Navigation,
}

/// Delays and cadences driving the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerTimings {
    /// Quiet window after a mutation before its pass runs.
    pub mutation_debounce: Duration,
    /// Cadence of the periodic rescan.
    pub rescan_interval: Duration,
    /// Cadence of the page-path poll.
    pub nav_poll_interval: Duration,
    /// Delay of the one-shot catch-up pass after `start`.
    pub catch_up_delay: Duration,
    /// Settle time between a detected navigation and its pass.
    pub nav_settle_delay: Duration,
}

impl Default for SchedulerTimings {
    fn default() -> Self {
        Self {
            mutation_debounce: Duration::from_millis(100),
            rescan_interval: Duration::from_millis(2000),
            nav_poll_interval: Duration::from_millis(1000),
            catch_up_delay: Duration::from_millis(1000),
            nav_settle_delay: Duration::from_millis(1000),
        }
    }
}

/// Deadline bookkeeping for the trigger sources.
#[derive(Debug)]
pub struct Scheduler {
    timings: SchedulerTimings,
    /// One-shot catch-up deadline, armed by `start`.
    catch_up_at: Option<Instant>,
    /// Pending debounced mutation pass.
    mutation_due: Option<Instant>,
    /// Next periodic rescan.
    next_rescan: Option<Instant>,
    /// Next permitted page-path poll.
    next_nav_poll: Option<Instant>,
    /// Pending post-navigation settle pass.
    nav_settle_at: Option<Instant>,
}

impl Scheduler {
    pub fn new(timings: SchedulerTimings) -> Self {
        Self {
            timings,
            catch_up_at: None,
            mutation_due: None,
            next_rescan: None,
            next_nav_poll: None,
            nav_settle_at: None,
        }
    }

    /// Arm the recurring deadlines for a freshly loaded document and
    /// return the trigger for the synchronous first pass. Any deadlines
    /// from a previous document are discarded.
    pub fn start(&mut self, now: Instant) -> PassTrigger {
        self.catch_up_at = Some(now + self.timings.catch_up_delay);
        self.mutation_due = None;
        self.next_rescan = Some(now + self.timings.rescan_interval);
        self.next_nav_poll = Some(now + self.timings.nav_poll_interval);
        self.nav_settle_at = None;
        PassTrigger::InitialLoad
    }

    /// Record a relevant DOM mutation. Bursts coalesce into the deadline
    /// armed by the first mutation; later mutations never push it back, so
    /// a continuous stream cannot starve the pass.
    pub fn note_mutation(&mut self, now: Instant) {
        if self.mutation_due.is_none() {
            self.mutation_due = Some(now + self.timings.mutation_debounce);
        }
    }

    /// Record a detected client-side navigation; the settle pass deadline
    /// restarts from `now`.
    pub fn note_navigation(&mut self, now: Instant) {
        self.nav_settle_at = Some(now + self.timings.nav_settle_delay);
    }

    /// Whether the page path should be compared right now. Polls are rate
    /// limited to the configured cadence; a `true` result consumes the
    /// current slot.
    pub fn nav_poll_due(&mut self, now: Instant) -> bool {
        match self.next_nav_poll {
            Some(at) if now >= at => {
                self.next_nav_poll = Some(now + self.timings.nav_poll_interval);
                true
            }
            _ => false,
        }
    }

    /// Collect every trigger whose deadline has passed. One-shot deadlines
    /// disarm; the rescan re-arms relative to `now`, so a stalled embedder
    /// gets one rescan after a long gap, not a burst.
    pub fn poll(&mut self, now: Instant) -> Vec<PassTrigger> {
        let mut due = Vec::new();
        if let Some(at) = self.catch_up_at {
            if now >= at {
                self.catch_up_at = None;
                due.push(PassTrigger::CatchUp);
            }
        }
        if let Some(at) = self.mutation_due {
            if now >= at {
                self.mutation_due = None;
                due.push(PassTrigger::Mutation);
            }
        }
        if let Some(at) = self.nav_settle_at {
            if now >= at {
                self.nav_settle_at = None;
                due.push(PassTrigger::Navigation);
            }
        }
        if let Some(at) = self.next_rescan {
            if now >= at {
                self.next_rescan = Some(now + self.timings.rescan_interval);
                due.push(PassTrigger::IntervalRescan);
            }
        }
        due
    }
}
