//! UDC Policy
//!
//! Everything source-specific about the query pipeline lives here as data:
//! a [`PolicySet`] maps each [`udc_core::Source`] to a [`SourcePolicy`]
//! describing retention, ordering, voice projection and the spoken summary.
//!
//! - [`RulesEngine`] applies retention and ordering after filtering.
//! - [`VoiceOptimizer`] truncates, projects and summarizes a page.
//! - [`classify`] labels the shape of the final page.

pub mod classifier;
pub mod policy;
pub mod rules;
pub mod voice;

pub use classifier::classify;
pub use policy::{
    Anchor, Direction, PolicySet, Retention, SortKey, SortRule, SourcePolicy, SummaryTemplate,
    Tally,
};
pub use rules::RulesEngine;
pub use voice::{MAX_VOICE_RECORDS, NO_RESULTS_SUMMARY, VoiceOptimizer};
