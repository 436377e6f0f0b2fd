//! Free-text intent classification
//!
//! Input is matched against a fixed rule table and the winning rule's
//! entities are pulled out of the text with pattern heuristics. There is no
//! scoring across rules.

pub mod classifier;
pub mod entities;
pub mod rules;

pub use classifier::{Intent, IntentClassifier, MIN_CONFIDENCE};
pub use entities::{EntityExtractor, EntityKind};
pub use rules::IntentAction;
