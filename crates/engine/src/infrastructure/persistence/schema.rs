//! Relational schema of the rules store.
//!
//! Table and column names are the contract with downstream readers. Natural
//! entities are keyed by the document `index`; choices and level rows get a
//! store-assigned integer id.

use sqlx::SqliteConnection;

use crate::infrastructure::error::ImportError;

/// Every table, in creation order (referenced tables first).
pub const TABLES: &[(&str, &str)] = &[
    // Reference vocabularies
    (
        "AbilityScore",
        r#"CREATE TABLE AbilityScore (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            full_name TEXT,
            description TEXT
        )"#,
    ),
    (
        "DamageType",
        r#"CREATE TABLE DamageType (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        )"#,
    ),
    (
        "MagicSchool",
        r#"CREATE TABLE MagicSchool (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        )"#,
    ),
    (
        "Proficiency",
        r#"CREATE TABLE Proficiency (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT
        )"#,
    ),
    (
        "EquipmentCategory",
        r#"CREATE TABLE EquipmentCategory (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )"#,
    ),
    (
        "WeaponProperty",
        r#"CREATE TABLE WeaponProperty (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        )"#,
    ),
    (
        "Language",
        r#"CREATE TABLE Language (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT,
            script TEXT,
            typical_speakers TEXT,
            description TEXT
        )"#,
    ),
    // Classes
    (
        "Class",
        r#"CREATE TABLE Class (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            hit_die INTEGER,
            spellcasting_level INTEGER,
            spellcasting_ability_index TEXT REFERENCES AbilityScore("index")
        )"#,
    ),
    (
        "Subclass",
        r#"CREATE TABLE Subclass (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            class_index TEXT NOT NULL REFERENCES Class("index"),
            description TEXT,
            subclass_flavor TEXT
        )"#,
    ),
    (
        "ClassProficiency",
        r#"CREATE TABLE ClassProficiency (
            class_index TEXT NOT NULL REFERENCES Class("index"),
            proficiency_index TEXT NOT NULL REFERENCES Proficiency("index"),
            PRIMARY KEY (class_index, proficiency_index)
        )"#,
    ),
    (
        "ClassSavingThrow",
        r#"CREATE TABLE ClassSavingThrow (
            class_index TEXT NOT NULL REFERENCES Class("index"),
            ability_score_index TEXT NOT NULL REFERENCES AbilityScore("index"),
            PRIMARY KEY (class_index, ability_score_index)
        )"#,
    ),
    (
        "ClassProficiencyChoice",
        r#"CREATE TABLE ClassProficiencyChoice (
            id INTEGER PRIMARY KEY,
            class_index TEXT NOT NULL REFERENCES Class("index"),
            description TEXT,
            choose INTEGER NOT NULL,
            type TEXT NOT NULL
        )"#,
    ),
    (
        "ClassProficiencyChoiceOption",
        r#"CREATE TABLE ClassProficiencyChoiceOption (
            choice_id INTEGER NOT NULL REFERENCES ClassProficiencyChoice(id),
            proficiency_index TEXT NOT NULL REFERENCES Proficiency("index"),
            PRIMARY KEY (choice_id, proficiency_index)
        )"#,
    ),
    // Spells. Type and school references are kept as given, unenforced.
    (
        "Spell",
        r#"CREATE TABLE Spell (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            higher_level_desc TEXT,
            "range" TEXT,
            components TEXT,
            material TEXT,
            ritual INTEGER NOT NULL DEFAULT 0,
            duration TEXT,
            concentration INTEGER NOT NULL DEFAULT 0,
            casting_time TEXT,
            level INTEGER,
            attack_type TEXT,
            damage_type_index TEXT,
            dc_type_index TEXT,
            dc_success TEXT,
            area_of_effect_type TEXT,
            area_of_effect_size INTEGER,
            school_index TEXT
        )"#,
    ),
    (
        "SpellClass",
        r#"CREATE TABLE SpellClass (
            spell_index TEXT NOT NULL REFERENCES Spell("index"),
            class_index TEXT NOT NULL REFERENCES Class("index"),
            PRIMARY KEY (spell_index, class_index)
        )"#,
    ),
    (
        "SpellSubclass",
        r#"CREATE TABLE SpellSubclass (
            spell_index TEXT NOT NULL REFERENCES Spell("index"),
            subclass_index TEXT NOT NULL REFERENCES Subclass("index"),
            PRIMARY KEY (spell_index, subclass_index)
        )"#,
    ),
    // Equipment
    (
        "Equipment",
        r#"CREATE TABLE Equipment (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            equipment_category_index TEXT REFERENCES EquipmentCategory("index"),
            cost_quantity INTEGER,
            cost_unit TEXT,
            weight REAL,
            description TEXT,
            weapon_category TEXT,
            weapon_range TEXT,
            category_range TEXT,
            damage_dice TEXT,
            damage_type_index TEXT REFERENCES DamageType("index"),
            range_normal INTEGER,
            range_long INTEGER,
            throw_range_normal INTEGER,
            throw_range_long INTEGER,
            two_handed_damage_dice TEXT,
            two_handed_damage_type_index TEXT REFERENCES DamageType("index"),
            armor_category TEXT,
            armor_class_base INTEGER,
            armor_class_dex_bonus INTEGER,
            armor_class_max_bonus INTEGER,
            str_minimum INTEGER,
            stealth_disadvantage INTEGER NOT NULL DEFAULT 0,
            gear_category_index TEXT REFERENCES EquipmentCategory("index"),
            tool_category TEXT,
            vehicle_category TEXT,
            speed_quantity REAL,
            speed_unit TEXT,
            capacity TEXT
        )"#,
    ),
    (
        "EquipmentProperty",
        r#"CREATE TABLE EquipmentProperty (
            equipment_index TEXT NOT NULL REFERENCES Equipment("index"),
            property_index TEXT NOT NULL REFERENCES WeaponProperty("index"),
            PRIMARY KEY (equipment_index, property_index)
        )"#,
    ),
    (
        "EquipmentContent",
        r#"CREATE TABLE EquipmentContent (
            pack_equipment_index TEXT NOT NULL REFERENCES Equipment("index"),
            content_equipment_index TEXT NOT NULL REFERENCES Equipment("index"),
            quantity INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (pack_equipment_index, content_equipment_index)
        )"#,
    ),
    // Features and level progression
    (
        "Feature",
        r#"CREATE TABLE Feature (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        )"#,
    ),
    (
        "ClassLevel",
        r#"CREATE TABLE ClassLevel (
            id INTEGER PRIMARY KEY,
            "index" TEXT,
            class_index TEXT NOT NULL REFERENCES Class("index"),
            level INTEGER NOT NULL,
            prof_bonus INTEGER,
            ability_score_bonuses INTEGER,
            class_specific_json TEXT,
            UNIQUE (class_index, level)
        )"#,
    ),
    (
        "SubclassLevel",
        r#"CREATE TABLE SubclassLevel (
            id INTEGER PRIMARY KEY,
            "index" TEXT,
            subclass_index TEXT NOT NULL REFERENCES Subclass("index"),
            level INTEGER NOT NULL,
            subclass_specific_json TEXT,
            UNIQUE (subclass_index, level)
        )"#,
    ),
    (
        "ClassLevel_Feature",
        r#"CREATE TABLE ClassLevel_Feature (
            class_level_id INTEGER NOT NULL REFERENCES ClassLevel(id),
            feature_index TEXT NOT NULL REFERENCES Feature("index"),
            PRIMARY KEY (class_level_id, feature_index)
        )"#,
    ),
    (
        "SubclassLevel_Feature",
        r#"CREATE TABLE SubclassLevel_Feature (
            subclass_level_id INTEGER NOT NULL REFERENCES SubclassLevel(id),
            feature_index TEXT NOT NULL REFERENCES Feature("index"),
            PRIMARY KEY (subclass_level_id, feature_index)
        )"#,
    ),
    (
        "ClassLevel_Spellcasting",
        r#"CREATE TABLE ClassLevel_Spellcasting (
            class_level_id INTEGER PRIMARY KEY REFERENCES ClassLevel(id),
            cantrips_known INTEGER,
            spells_known INTEGER,
            spell_slots_level_1 INTEGER,
            spell_slots_level_2 INTEGER,
            spell_slots_level_3 INTEGER,
            spell_slots_level_4 INTEGER,
            spell_slots_level_5 INTEGER,
            spell_slots_level_6 INTEGER,
            spell_slots_level_7 INTEGER,
            spell_slots_level_8 INTEGER,
            spell_slots_level_9 INTEGER
        )"#,
    ),
    // Races
    (
        "Race",
        r#"CREATE TABLE Race (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            speed INTEGER,
            alignment TEXT,
            age TEXT,
            size TEXT,
            size_description TEXT,
            language_desc TEXT
        )"#,
    ),
    (
        "RaceAbilityBonus",
        r#"CREATE TABLE RaceAbilityBonus (
            race_index TEXT NOT NULL REFERENCES Race("index"),
            ability_score_index TEXT NOT NULL REFERENCES AbilityScore("index"),
            bonus INTEGER NOT NULL,
            PRIMARY KEY (race_index, ability_score_index)
        )"#,
    ),
    (
        "RaceProficiency",
        r#"CREATE TABLE RaceProficiency (
            race_index TEXT NOT NULL REFERENCES Race("index"),
            proficiency_index TEXT NOT NULL REFERENCES Proficiency("index"),
            PRIMARY KEY (race_index, proficiency_index)
        )"#,
    ),
    (
        "RaceLanguage",
        r#"CREATE TABLE RaceLanguage (
            race_index TEXT NOT NULL REFERENCES Race("index"),
            language_index TEXT NOT NULL REFERENCES Language("index"),
            PRIMARY KEY (race_index, language_index)
        )"#,
    ),
    (
        "RaceFeature",
        r#"CREATE TABLE RaceFeature (
            race_index TEXT NOT NULL REFERENCES Race("index"),
            feature_index TEXT NOT NULL REFERENCES Feature("index"),
            PRIMARY KEY (race_index, feature_index)
        )"#,
    ),
    (
        "RaceProficiencyChoice",
        r#"CREATE TABLE RaceProficiencyChoice (
            id INTEGER PRIMARY KEY,
            race_index TEXT NOT NULL REFERENCES Race("index"),
            description TEXT,
            choose INTEGER NOT NULL,
            type TEXT NOT NULL
        )"#,
    ),
    (
        "RaceProficiencyChoiceOption",
        r#"CREATE TABLE RaceProficiencyChoiceOption (
            choice_id INTEGER NOT NULL REFERENCES RaceProficiencyChoice(id),
            proficiency_index TEXT NOT NULL REFERENCES Proficiency("index"),
            PRIMARY KEY (choice_id, proficiency_index)
        )"#,
    ),
    (
        "RaceLanguageChoice",
        r#"CREATE TABLE RaceLanguageChoice (
            id INTEGER PRIMARY KEY,
            race_index TEXT NOT NULL REFERENCES Race("index"),
            description TEXT,
            choose INTEGER NOT NULL,
            type TEXT NOT NULL
        )"#,
    ),
    (
        "RaceLanguageChoiceOption",
        r#"CREATE TABLE RaceLanguageChoiceOption (
            choice_id INTEGER NOT NULL REFERENCES RaceLanguageChoice(id),
            language_index TEXT NOT NULL REFERENCES Language("index"),
            PRIMARY KEY (choice_id, language_index)
        )"#,
    ),
    (
        "Subrace",
        r#"CREATE TABLE Subrace (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            race_index TEXT NOT NULL REFERENCES Race("index"),
            description TEXT
        )"#,
    ),
    (
        "SubraceAbilityBonus",
        r#"CREATE TABLE SubraceAbilityBonus (
            subrace_index TEXT NOT NULL REFERENCES Subrace("index"),
            ability_score_index TEXT NOT NULL REFERENCES AbilityScore("index"),
            bonus INTEGER NOT NULL,
            PRIMARY KEY (subrace_index, ability_score_index)
        )"#,
    ),
    (
        "SubraceProficiency",
        r#"CREATE TABLE SubraceProficiency (
            subrace_index TEXT NOT NULL REFERENCES Subrace("index"),
            proficiency_index TEXT NOT NULL REFERENCES Proficiency("index"),
            PRIMARY KEY (subrace_index, proficiency_index)
        )"#,
    ),
    (
        "SubraceLanguage",
        r#"CREATE TABLE SubraceLanguage (
            subrace_index TEXT NOT NULL REFERENCES Subrace("index"),
            language_index TEXT NOT NULL REFERENCES Language("index"),
            PRIMARY KEY (subrace_index, language_index)
        )"#,
    ),
    (
        "SubraceFeature",
        r#"CREATE TABLE SubraceFeature (
            subrace_index TEXT NOT NULL REFERENCES Subrace("index"),
            feature_index TEXT NOT NULL REFERENCES Feature("index"),
            PRIMARY KEY (subrace_index, feature_index)
        )"#,
    ),
    (
        "SubraceProficiencyChoice",
        r#"CREATE TABLE SubraceProficiencyChoice (
            id INTEGER PRIMARY KEY,
            subrace_index TEXT NOT NULL REFERENCES Subrace("index"),
            description TEXT,
            choose INTEGER NOT NULL,
            type TEXT NOT NULL
        )"#,
    ),
    (
        "SubraceProficiencyChoiceOption",
        r#"CREATE TABLE SubraceProficiencyChoiceOption (
            choice_id INTEGER NOT NULL REFERENCES SubraceProficiencyChoice(id),
            proficiency_index TEXT NOT NULL REFERENCES Proficiency("index"),
            PRIMARY KEY (choice_id, proficiency_index)
        )"#,
    ),
    (
        "SubraceLanguageChoice",
        r#"CREATE TABLE SubraceLanguageChoice (
            id INTEGER PRIMARY KEY,
            subrace_index TEXT NOT NULL REFERENCES Subrace("index"),
            description TEXT,
            choose INTEGER NOT NULL,
            type TEXT NOT NULL
        )"#,
    ),
    (
        "SubraceLanguageChoiceOption",
        r#"CREATE TABLE SubraceLanguageChoiceOption (
            choice_id INTEGER NOT NULL REFERENCES SubraceLanguageChoice(id),
            language_index TEXT NOT NULL REFERENCES Language("index"),
            PRIMARY KEY (choice_id, language_index)
        )"#,
    ),
    // Feats
    (
        "Feat",
        r#"CREATE TABLE Feat (
            "index" TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            prerequisites_json TEXT,
            description TEXT
        )"#,
    ),
];

/// Names of every table, in creation order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

/// Quote an identifier for interpolation into SQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Create every table. Expected to run inside the import transaction.
pub async fn create_schema(conn: &mut SqliteConnection) -> Result<(), ImportError> {
    for (name, ddl) in TABLES {
        sqlx::query(ddl)
            .execute(&mut *conn)
            .await
            .map_err(|e| ImportError::store(format!("create table {name}"), e))?;
    }
    tracing::debug!(tables = TABLES.len(), "Schema created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection;

    #[test]
    fn table_names_are_unique() {
        let mut names: Vec<_> = table_names().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("index"), "\"index\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[tokio::test]
    async fn creates_every_table() {
        let mut conn = sqlx::SqliteConnection::connect("sqlite::memory:")
            .await
            .expect("connect");
        create_schema(&mut conn).await.expect("schema");

        let created: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&mut conn)
        .await
        .expect("list tables");

        let mut expected: Vec<String> = table_names().map(str::to_string).collect();
        expected.sort();
        assert_eq!(created, expected);
    }
}
