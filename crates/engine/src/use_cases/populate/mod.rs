//! Populators: one per entity family, each reading its documents and writing
//! its tables through the import transaction.
//!
//! Every populator follows the same contract. An absent primary document logs
//! and yields [`StepOutcome::Skipped`]; a malformed record is logged and
//! skipped; a store error aborts the whole import.

pub mod choices;
mod classes;
mod equipment;
mod feats;
mod features;
mod races;
mod reference;
mod spells;

pub use choices::{resolve_choices, ChoiceResolution, ChoiceScope, MAX_NESTED_DEPTH};
pub use classes::{populate_classes, populate_subclass_details};
pub use equipment::populate_equipment;
pub use feats::populate_feats;
pub use features::{ensure_feature_stub, populate_features_and_levels, upsert_feature};
pub use races::{populate_races, populate_subraces};
pub use reference::{populate_reference, Vocabulary};
pub use spells::populate_spells;

/// What one pipeline step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran over `records` decoded source records.
    Populated { records: usize },
    /// The step's primary document was absent.
    Skipped,
}

impl StepOutcome {
    pub fn records(&self) -> usize {
        match self {
            StepOutcome::Populated { records } => *records,
            StepOutcome::Skipped => 0,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped)
    }
}
