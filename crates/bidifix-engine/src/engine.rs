//! The annotation engine: one object owning page, annotator and scheduler.
//!
//! The embedder drives it with a handful of calls: [`Engine::load`] when a
//! document arrives, [`Engine::note_mutation`] and [`Engine::field_event`]
//! as DOM events come in, [`Engine::observe_path`] with the current page
//! path, and [`Engine::run_due`] on every tick to execute whatever passes
//! fell due. Field events apply immediately; everything else funnels
//! through the scheduler.

use std::time::{Duration, Instant};

use bidifix_config::{AnnotatorSettings, BidifixConfig, SchedulerSettings, SelectorSettings};
use bidifix_dom::{
    Annotator, AnnotatorOptions, CompiledSelectors, Page, PassReport, SelectorProfile, page_path,
    platform_for_url,
};
use tracing::{debug, info};

use crate::events::{FieldEvent, MutationNotice};
use crate::scheduler::{PassTrigger, Scheduler, SchedulerTimings};

/// One executed pass: why it ran and what it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    pub trigger: PassTrigger,
    pub report: PassReport,
}

pub struct Engine {
    page: Page,
    annotator: Annotator,
    scheduler: Scheduler,
    selectors: CompiledSelectors,
    platform: Option<&'static str>,
    current_path: Option<String>,
}

impl Engine {
    pub fn new(config: &BidifixConfig) -> Self {
        Self {
            page: Page::parse(""),
            annotator: Annotator::new(annotator_options(&config.annotator)),
            scheduler: Scheduler::new(scheduler_timings(&config.scheduler)),
            selectors: selector_profile(&config.selectors).compile(),
            platform: None,
            current_path: None,
        }
    }

    /// Adopt a freshly loaded document and run the initial pass.
    ///
    /// All annotation state from a previous document is discarded: node
    /// ids are only meaningful within one parsed page.
    pub fn load(&mut self, html: &str, url: &str, now: Instant) -> PassOutcome {
        self.platform = platform_for_url(url);
        self.current_path = page_path(url);
        self.page = Page::parse(html);
        self.annotator.reset();
        info!(
            platform = self.platform.unwrap_or("generic"),
            path = self.current_path.as_deref().unwrap_or("/"),
            "document loaded"
        );
        let trigger = self.scheduler.start(now);
        self.run_pass(trigger)
    }

    /// Feed a DOM mutation. Returns `true` when the mutation was relevant
    /// and a debounced pass is now pending.
    pub fn note_mutation(&mut self, notice: &MutationNotice, now: Instant) -> bool {
        if !notice.is_relevant() {
            return false;
        }
        self.scheduler.note_mutation(now);
        true
    }

    /// Apply a field edit immediately. Returns `true` when the field ended
    /// up styled (as opposed to reverted or ignored).
    pub fn field_event(&mut self, event: &FieldEvent) -> bool {
        self.annotator
            .field_input(&mut self.page, event.node, &event.value)
    }

    /// Compare the page path against the last observed one, rate limited
    /// to the nav-poll cadence. On a change, a settle pass is scheduled
    /// and `true` is returned.
    pub fn observe_path(&mut self, path: &str, now: Instant) -> bool {
        if !self.scheduler.nav_poll_due(now) {
            return false;
        }
        if self.current_path.as_deref() == Some(path) {
            return false;
        }
        debug!(
            from = self.current_path.as_deref().unwrap_or("/"),
            to = path,
            "client-side navigation detected"
        );
        self.current_path = Some(path.to_string());
        self.scheduler.note_navigation(now);
        true
    }

    /// Execute every pass whose deadline has passed.
    pub fn run_due(&mut self, now: Instant) -> Vec<PassOutcome> {
        self.scheduler
            .poll(now)
            .into_iter()
            .map(|trigger| self.run_pass(trigger))
            .collect()
    }

    /// Run a full pass immediately, outside any scheduled trigger. The
    /// scheduler's deadlines are left alone.
    pub fn annotate_now(&mut self) -> PassReport {
        self.annotator
            .annotate_document(&mut self.page, &self.selectors)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Serialized document with all annotations applied so far.
    pub fn html(&self) -> String {
        self.page.html()
    }

    /// Platform label of the loaded URL, for diagnostics.
    pub fn platform(&self) -> Option<&'static str> {
        self.platform
    }

    fn run_pass(&mut self, trigger: PassTrigger) -> PassOutcome {
        let report = self.annotator.annotate_document(&mut self.page, &self.selectors);
        debug!(
            ?trigger,
            containers = report.containers,
            styled = report.styled,
            "pass executed"
        );
        PassOutcome { trigger, report }
    }
}

fn annotator_options(settings: &AnnotatorSettings) -> AnnotatorOptions {
    AnnotatorOptions {
        input_fields: settings.input_fields,
        style_plain_ltr: settings.style_plain_ltr,
    }
}

fn scheduler_timings(settings: &SchedulerSettings) -> SchedulerTimings {
    SchedulerTimings {
        mutation_debounce: Duration::from_millis(settings.mutation_debounce_ms),
        rescan_interval: Duration::from_millis(settings.rescan_interval_ms),
        nav_poll_interval: Duration::from_millis(settings.nav_poll_interval_ms),
        catch_up_delay: Duration::from_millis(settings.catch_up_delay_ms),
        nav_settle_delay: Duration::from_millis(settings.nav_settle_delay_ms),
    }
}

fn selector_profile(settings: &SelectorSettings) -> SelectorProfile {
    let mut profile = SelectorProfile::builtin();
    profile.apply_overrides(&settings.messages, &settings.fields, &settings.sweep);
    profile
}
