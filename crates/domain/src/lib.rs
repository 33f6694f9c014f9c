//! SrdBldr Domain - source document records and the rules for reading them.
//!
//! Every rule document is a JSON array of entries. This crate knows what each
//! entry looks like (`entities`), how choice structures are shaped
//! (`entities::choice`) and how long-form text is normalized (`text`).
//! It performs no I/O.

pub mod entities;
pub mod error;
pub mod text;

pub use entities::{
    decode_record, json_kind, AbilityBonus, ApiReference, AreaOfEffect, ArmorClass, Choice,
    ChoiceList, ChoiceOption, ClassRecord, ClassSpellcasting, Cost, Damage, Distance,
    EquipmentRecord, FeatRecord, FeatureRecord, LevelOwner, LevelRecord, NestedChoice, OptionSet,
    PackContent, RaceRecord, Speed, SpellDamage, SpellDc, SpellLevel, SpellRecord,
    SpellcastingProgression, SubclassRecord, SubraceRecord, VocabularyEntry,
};
pub use error::DomainError;
pub use text::{join_lines, non_empty_text, text_or_empty, Description};
