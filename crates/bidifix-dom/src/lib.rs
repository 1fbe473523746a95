//! bidifix-dom: page model and the incremental direction annotator.
//!
//! This crate owns everything that touches parsed HTML:
//! - [`Page`], a wrapper over the document that confines writes to the
//!   `style` attribute
//! - [`Annotator`], the idempotent walker that classifies text and applies
//!   direction styling
//! - selector profiles for the supported chat platforms
//! - element role and inline-style helpers
//!
//! Classification itself lives in `bidifix-text`; scheduling and event
//! intake live in `bidifix-engine`.

pub mod annotator;
pub mod page;
pub mod platform;
pub mod role;
pub mod style;

pub use annotator::{Annotator, AnnotatorOptions, PassReport};
pub use page::{NodeId, Page};
pub use platform::{CompiledSelectors, SelectorProfile, page_path, platform_for_url};
pub use role::{ElementRole, role_of};
pub use style::{DirectionStyle, Isolation};

pub use scraper::Selector;
