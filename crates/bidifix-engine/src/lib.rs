//! bidifix-engine: ties classification, annotation and scheduling together.
//!
//! - [`Engine`] owns the page, the annotator and the scheduler and exposes
//!   the embedder-facing API
//! - [`Scheduler`] turns event times into due annotation passes
//! - [`MutationNotice`] and [`FieldEvent`] are the event intake types

pub mod engine;
pub mod events;
pub mod scheduler;

pub use engine::{Engine, PassOutcome};
pub use events::{FieldEvent, MutationNotice};
pub use scheduler::{PassTrigger, Scheduler, SchedulerTimings};

pub use bidifix_dom::PassReport;
