//! Source document records.
//!
//! One module per document family. Records are decoded one entry at a time
//! so a malformed entry never takes its siblings down with it.

pub mod choice;
pub mod class;
pub mod class_feature;
pub mod common;
pub mod equipment;
pub mod feat;
pub mod race;
pub mod spell;
pub mod vocabulary;

pub use choice::{Choice, ChoiceOption, NestedChoice, OptionSet};
pub use class::{ClassRecord, ClassSpellcasting, SubclassRecord};
pub use class_feature::{FeatureRecord, LevelOwner, LevelRecord, SpellcastingProgression};
pub use common::{decode_record, json_kind, ApiReference, ChoiceList};
pub use equipment::{ArmorClass, Cost, Damage, Distance, EquipmentRecord, PackContent, Speed};
pub use feat::FeatRecord;
pub use race::{AbilityBonus, RaceRecord, SubraceRecord};
pub use spell::{AreaOfEffect, SpellDamage, SpellDc, SpellLevel, SpellRecord};
pub use vocabulary::VocabularyEntry;
