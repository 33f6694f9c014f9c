//! A miniature SRD: two classes, a couple of spells, a pack, two races.
//!
//! Every cross reference resolves, so a full import over these documents
//! succeeds with foreign keys enforced.

use serde_json::{json, Value};

use crate::infrastructure::importers::DocumentKind;

pub fn reference(index: &str, name: &str) -> Value {
    json!({"index": index, "name": name, "url": format!("/api/{index}")})
}

pub fn option(index: &str, name: &str) -> Value {
    json!({"option_type": "reference", "item": reference(index, name)})
}

pub fn ability_scores() -> Value {
    let score = |index: &str, name: &str, full_name: &str| {
        json!({
            "index": index,
            "name": name,
            "full_name": full_name,
            "desc": [format!("{full_name} measures something."), "It matters."]
        })
    };
    json!([
        score("str", "STR", "Strength"),
        score("dex", "DEX", "Dexterity"),
        score("con", "CON", "Constitution"),
        score("int", "INT", "Intelligence"),
        score("wis", "WIS", "Wisdom"),
        score("cha", "CHA", "Charisma"),
    ])
}

pub fn damage_types() -> Value {
    json!([
        {"index": "slashing", "name": "Slashing", "desc": ["Swords, axes."]},
        {"index": "piercing", "name": "Piercing", "desc": ["Spears, arrows."]}
    ])
}

pub fn magic_schools() -> Value {
    json!([
        {"index": "evocation", "name": "Evocation", "desc": "Spells that manipulate energy."}
    ])
}

pub fn proficiencies() -> Value {
    let proficiency = |index: &str, name: &str, kind: &str| {
        json!({"index": index, "name": name, "type": kind})
    };
    json!([
        proficiency("skill-athletics", "Skill: Athletics", "Skills"),
        proficiency("skill-acrobatics", "Skill: Acrobatics", "Skills"),
        proficiency("skill-history", "Skill: History", "Skills"),
        proficiency("skill-insight", "Skill: Insight", "Skills"),
        proficiency("skill-perception", "Skill: Perception", "Skills"),
        proficiency("all-armor", "All armor", "Armor"),
        proficiency("longswords", "Longswords", "Weapons"),
        proficiency("lute", "Lute", "Musical Instruments"),
        proficiency("flute", "Flute", "Musical Instruments"),
    ])
}

pub fn equipment_categories() -> Value {
    json!([
        {"index": "weapon", "name": "Weapon"},
        {"index": "adventuring-gear", "name": "Adventuring Gear"},
        {"index": "standard-gear", "name": "Standard Gear"},
        {"index": "equipment-packs", "name": "Equipment Packs"}
    ])
}

pub fn weapon_properties() -> Value {
    json!([
        {"index": "finesse", "name": "Finesse", "desc": ["Use Strength or Dexterity."]},
        {"index": "light", "name": "Light", "desc": ["Good for two-weapon fighting."]}
    ])
}

pub fn languages() -> Value {
    json!([
        {"index": "common", "name": "Common", "type": "Standard", "script": "Common", "typical_speakers": ["Humans"]},
        {"index": "elvish", "name": "Elvish", "type": "Standard", "script": "Elvish", "typical_speakers": ["Elves"]},
        {"index": "dwarvish", "name": "Dwarvish", "type": "Standard", "script": "Dwarvish", "typical_speakers": ["Dwarves", "Duergar"]}
    ])
}

pub fn classes() -> Value {
    json!([
        {
            "index": "fighter",
            "name": "Fighter",
            "hit_die": 10,
            "proficiencies": [reference("all-armor", "All armor")],
            "saving_throws": [reference("str", "STR"), reference("con", "CON")],
            "proficiency_choices": [{
                "desc": "Choose two skills",
                "choose": 2,
                "type": "proficiencies",
                "from": {
                    "option_set_type": "options_array",
                    "options": [
                        option("skill-athletics", "Skill: Athletics"),
                        option("skill-acrobatics", "Skill: Acrobatics"),
                        {
                            "option_type": "choice",
                            "choice": {
                                "desc": "a lore skill",
                                "choose": 1,
                                "type": "proficiencies",
                                "from": {"option_set_type": "options_array", "options": [
                                    option("skill-history", "Skill: History"),
                                    option("skill-insight", "Skill: Insight")
                                ]}
                            }
                        }
                    ]
                }
            }],
            "subclasses": [reference("champion", "Champion")]
        },
        {
            "index": "wizard",
            "name": "Wizard",
            "hit_die": 6,
            "spellcasting": {"level": 1, "spellcasting_ability": reference("int", "INT")},
            "proficiencies": [],
            "saving_throws": [reference("int", "INT"), reference("wis", "WIS")],
            "proficiency_choices": [{
                "desc": "Choose two",
                "choose": 2,
                "type": "proficiencies",
                "from": {"options": [
                    option("skill-history", "Skill: History"),
                    option("skill-insight", "Skill: Insight")
                ]}
            }],
            "subclasses": [reference("evocation", "Evocation")]
        }
    ])
}

pub fn subclasses() -> Value {
    json!([
        {
            "index": "champion",
            "name": "Champion",
            "class": reference("fighter", "Fighter"),
            "subclass_flavor": "Martial Archetype",
            "desc": ["Raw physical power.", "Honed to deadly perfection."]
        },
        {
            "index": "evocation",
            "name": "Evocation",
            "class": reference("wizard", "Wizard"),
            "subclass_flavor": "Arcane Tradition",
            "desc": ["Magic that creates powerful elemental effects."]
        },
        {
            "index": "way-of-nothing",
            "name": "Way of Nothing",
            "desc": ["No class lists this one."]
        }
    ])
}

pub fn spells() -> Value {
    json!([
        {
            "index": "fire-bolt",
            "name": "Fire Bolt",
            "desc": ["You hurl a mote of fire."],
            "range": "120 feet",
            "components": ["V", "S"],
            "ritual": false,
            "duration": "Instantaneous",
            "concentration": false,
            "casting_time": "1 action",
            "level": 0,
            "attack_type": "ranged",
            "damage": {"damage_type": reference("fire", "Fire")},
            "school": reference("evocation", "Evocation"),
            "classes": [reference("wizard", "Wizard")],
            "subclasses": []
        },
        {
            "index": "magic-missile",
            "name": "Magic Missile",
            "desc": ["Three glowing darts."],
            "higher_level": ["One more dart per slot level above 1st."],
            "range": "120 feet",
            "components": ["V", "S"],
            "duration": "Instantaneous",
            "casting_time": "1 action",
            "level": 1,
            "damage": {"damage_type": reference("force", "Force")},
            "area_of_effect": {"type": "sphere", "size": 5},
            "school": reference("evocation", "Evocation"),
            "classes": [reference("wizard", "Wizard")],
            "subclasses": [reference("evocation", "Evocation")]
        }
    ])
}

pub fn equipment() -> Value {
    json!([
        {
            "index": "dagger",
            "name": "Dagger",
            "equipment_category": reference("weapon", "Weapon"),
            "weapon_category": "Simple",
            "weapon_range": "Melee",
            "category_range": "Simple Melee",
            "cost": {"quantity": 2, "unit": "gp"},
            "damage": {"damage_dice": "1d4", "damage_type": reference("piercing", "Piercing")},
            "range": {"normal": 5},
            "throw_range": {"normal": 20, "long": 60},
            "weight": 1,
            "properties": [reference("finesse", "Finesse"), reference("light", "Light")]
        },
        {
            "index": "explorers-pack",
            "name": "Explorer's Pack",
            "equipment_category": reference("adventuring-gear", "Adventuring Gear"),
            "gear_category": reference("equipment-packs", "Equipment Packs"),
            "cost": {"quantity": 10, "unit": "gp"},
            "contents": [
                {"item": reference("dagger", "Dagger"), "quantity": 1},
                {"item": reference("torch", "Torch"), "quantity": 10},
                {"item": reference("rope-hempen", "Rope, hempen (50 feet)"), "quantity": 1}
            ]
        },
        {
            "index": "rope-hempen",
            "name": "Rope, hempen (50 feet)",
            "equipment_category": reference("adventuring-gear", "Adventuring Gear"),
            "gear_category": reference("standard-gear", "Standard Gear"),
            "cost": {"quantity": 1, "unit": "gp"},
            "weight": 10,
            "desc": ["Rope has 2 hit points."]
        }
    ])
}

pub fn features() -> Value {
    json!([
        {"index": "second-wind", "name": "Second Wind", "desc": ["Regain hit points."]},
        {"index": "arcane-recovery", "name": "Arcane Recovery", "desc": ["Recover spell slots."]},
        {"index": "improved-critical", "name": "Improved Critical", "desc": ["Crit on 19 or 20."]}
    ])
}

pub fn levels() -> Value {
    json!([
        {
            "index": "fighter-1",
            "level": 1,
            "class": reference("fighter", "Fighter"),
            "prof_bonus": 2,
            "ability_score_bonuses": 0,
            "features": [
                reference("second-wind", "Second Wind"),
                reference("fighting-style", "Fighting Style")
            ],
            "class_specific": {"action_surges": 0, "extra_attacks": 0}
        },
        {
            "index": "wizard-1",
            "level": 1,
            "class": reference("wizard", "Wizard"),
            "prof_bonus": 2,
            "ability_score_bonuses": 0,
            "features": [reference("arcane-recovery", "Arcane Recovery")],
            "spellcasting": {"cantrips_known": 3, "spell_slots_level_1": 2, "spell_slots_level_2": 0},
            "class_specific": {"arcane_recovery_levels": 1}
        },
        {
            "index": "champion-3",
            "level": 3,
            "class": reference("fighter", "Fighter"),
            "subclass": reference("champion", "Champion"),
            "features": [reference("improved-critical", "Improved Critical")],
            "subclass_specific": null
        }
    ])
}

pub fn races() -> Value {
    json!([
        {
            "index": "elf",
            "name": "Elf",
            "speed": 30,
            "ability_bonuses": [{"ability_score": reference("dex", "DEX"), "bonus": 2}],
            "alignment": "Elves love freedom.",
            "age": "Elves can live to be 750 years old.",
            "size": "Medium",
            "size_description": "Elves range from under 5 to over 6 feet tall.",
            "starting_proficiencies": [reference("skill-perception", "Skill: Perception")],
            "starting_proficiency_options": {
                "desc": "Choose one skill",
                "choose": 1,
                "type": "proficiencies",
                "from": {"option_set_type": "options_array", "options": [
                    option("skill-athletics", "Skill: Athletics"),
                    option("skill-acrobatics", "Skill: Acrobatics")
                ]}
            },
            "languages": [reference("common", "Common"), reference("elvish", "Elvish")],
            "language_desc": "You can speak, read, and write Common and Elvish.",
            "language_options": null,
            "traits": [reference("keen-senses", "Keen Senses"), reference("darkvision", "Darkvision")]
        },
        {
            "index": "human",
            "name": "Human",
            "speed": 30,
            "ability_bonuses": [{"ability_score": reference("str", "STR"), "bonus": 1}],
            "size": "Medium",
            "languages": [reference("common", "Common")],
            "language_options": {
                "desc": "One extra language",
                "choose": 1,
                "type": "languages",
                "from": {"option_set_type": "options_array", "options": [
                    option("dwarvish", "Dwarvish"),
                    option("elvish", "Elvish")
                ]}
            },
            "traits": []
        }
    ])
}

pub fn subraces() -> Value {
    json!([
        {
            "index": "high-elf",
            "name": "High Elf",
            "race": reference("elf", "Elf"),
            "desc": "High elves have a keen mind.",
            "ability_bonuses": [{"ability_score": reference("int", "INT"), "bonus": 1}],
            "racial_traits": [reference("elf-weapon-training", "Elf Weapon Training")],
            "starting_proficiency_options": [{
                "choose": 1,
                "type": "proficiencies",
                "from": {"options": [
                    option("skill-history", "Skill: History"),
                    option("skill-insight", "Skill: Insight"),
                    option("skill-perception", "Skill: Perception")
                ]}
            }],
            "language_options": [{
                "choose": 1,
                "type": "languages",
                "from": {"options": [option("dwarvish", "Dwarvish")]}
            }]
        }
    ])
}

pub fn feats() -> Value {
    json!([
        {
            "index": "grappler",
            "name": "Grappler",
            "prerequisites": [{"ability_score": reference("str", "STR"), "minimum_score": 13}],
            "desc": ["You have advantage on attack rolls against a creature you are grappling."]
        },
        {"index": "alert", "name": "Alert", "desc": ["Always on the lookout."]}
    ])
}

/// Every document of the miniature SRD.
pub fn documents() -> Vec<(DocumentKind, Value)> {
    vec![
        (DocumentKind::AbilityScores, ability_scores()),
        (DocumentKind::DamageTypes, damage_types()),
        (DocumentKind::MagicSchools, magic_schools()),
        (DocumentKind::Proficiencies, proficiencies()),
        (DocumentKind::EquipmentCategories, equipment_categories()),
        (DocumentKind::WeaponProperties, weapon_properties()),
        (DocumentKind::Languages, languages()),
        (DocumentKind::Classes, classes()),
        (DocumentKind::Subclasses, subclasses()),
        (DocumentKind::Spells, spells()),
        (DocumentKind::Equipment, equipment()),
        (DocumentKind::Features, features()),
        (DocumentKind::Levels, levels()),
        (DocumentKind::Races, races()),
        (DocumentKind::Subraces, subraces()),
        (DocumentKind::Feats, feats()),
    ]
}
