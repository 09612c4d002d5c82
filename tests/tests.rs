// ../tests/tests.rs
use dsa_sheet::*;
use std::fs;
use tempfile::tempdir;

const FIXTURE: &str = "tests/dummy_skills.json";

fn fixture_loader() -> CatalogLoader {
    CatalogLoader::from_file(FIXTURE)
}

#[test]
fn test_categories_are_top_level_keys() {
    let categories = fixture_loader()
        .skill_categories()
        .expect("Failed to list categories");
    assert_eq!(
        categories,
        ["combat", "Naturtalente", "Gesellschaftstalente"]
    );
}

#[test]
fn test_each_category_yields_one_skill_per_key() {
    let loader = fixture_loader();

    let raw: serde_json::Value =
        serde_json::from_str(&loader.read_skills_json().expect("Failed to read fixture"))
            .expect("Failed to parse fixture");

    for category in loader.skill_categories().expect("Expected categories") {
        let skills = loader
            .skills_of_category(&category)
            .expect("Expected a valid category");
        let expected = raw[&category].as_object().expect("Expected an object");
        assert_eq!(skills.len(), expected.len(), "{category}");
        for (name, spec) in expected {
            let formula: Formula = spec
                .as_str()
                .expect("Expected a formula string")
                .parse()
                .expect("Expected a valid formula");
            assert_eq!(skills[name].formula(), &formula);
        }
    }

    let combat = loader.skills_of_category("combat").unwrap();
    assert_eq!(
        combat["melee"].formula().components(),
        ["str", "agi", "con"]
    );
}

#[test]
fn test_seed_skill_sheet_holds_distinct_skills_at_zero() {
    let sheet = fixture_loader()
        .initialize_skill_value_map()
        .expect("Failed to seed skill sheet");

    // "Raufen" appears in two categories and collapses to one entry.
    assert_eq!(sheet.len(), 6);
    assert!(sheet.values().all(|value| *value == 0));
    assert!(sheet.contains_key("Raufen"));
    assert!(sheet.contains_key("Menschenkenntnis"));
}

#[test]
fn test_character_round_trip_through_store() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = CharacterStore::new(dir.path());
    let loader = fixture_loader();
    assert!(!store.exists());

    let inputs = ["13", "14", "12", "11", "12", "13", "12", "10"];
    assert!(!any_blank(&inputs, Attribute::COUNT));
    let attributes = parse_attributes(&inputs).expect("Expected valid inputs");

    let mut record = CharacterRecord::builder()
        .attributes(&attributes)
        .skill_values(loader.initialize_skill_value_map().unwrap())
        .build()
        .expect("All attributes set");
    record.set_skill_value("Orientierung", 7).unwrap();

    store.save(&record).expect("Failed to save character");
    assert!(store.exists());

    let loaded = store.load(&loader).expect("Failed to load character");
    assert_eq!(loaded.attributes(), record.attributes());
    // Skill values are not persisted; the sheet comes back seeded at zero.
    assert_eq!(loaded.skill_value("Orientierung"), Some(0));
    assert_eq!(loaded.skill_values().len(), record.skill_values().len());

    let orientation = loaded
        .skill_values()
        .keys()
        .find(|skill| skill.name() == "Orientierung")
        .unwrap();
    assert_eq!(loaded.skill_score(orientation).unwrap(), 14 + 12 + 12);
}

#[test]
fn test_load_ignores_key_order() {
    let dir = tempdir().unwrap();
    let store = CharacterStore::new(dir.path());
    fs::write(
        store.path(),
        r#"{"ko":1,"mu":5,"kk":8,"kl":3,"ff":4,"in":7,"ge":6,"ch":2}"#,
    )
    .unwrap();

    let record = store.load(&fixture_loader()).unwrap();
    let expected = [
        (Attribute::Mu, 5),
        (Attribute::Kl, 3),
        (Attribute::In, 7),
        (Attribute::Ch, 2),
        (Attribute::Ff, 4),
        (Attribute::Ge, 6),
        (Attribute::Ko, 1),
        (Attribute::Kk, 8),
    ];
    for (attribute, value) in expected {
        assert_eq!(record.attribute(attribute), value);
    }
}

#[test]
fn test_saved_file_is_flat_attribute_object() {
    let dir = tempdir().unwrap();
    let store = CharacterStore::new(dir.path());
    let record = CharacterRecord::builder()
        .mu(5)
        .kl(3)
        .in_(7)
        .ch(2)
        .ff(4)
        .ge(6)
        .ko(1)
        .kk(8)
        .build()
        .unwrap();
    store.save(&record).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let object = written.as_object().expect("Expected a flat object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, ["mu", "kl", "in", "ch", "ff", "ge", "ko", "kk"]);
    assert_eq!(object["kk"], 8);
}

#[test]
fn test_bundled_catalog_seeds_a_full_sheet() {
    let categories = skill_categories().expect("Bundled catalog should parse");
    let total: usize = categories
        .iter()
        .map(|category| skills_of_category(category).unwrap().len())
        .sum();
    let sheet = initialize_skill_value_map().unwrap();
    assert_eq!(sheet.len(), total);
    assert!(read_skills_json().unwrap().contains("Klettern"));
}

#[test]
fn test_oversized_stored_attributes_report_instead_of_overflowing() {
    let dir = tempdir().unwrap();
    let store = CharacterStore::new(dir.path());
    fs::write(
        store.path(),
        r#"{"mu":2147483647,"kl":1,"in":1,"ch":1,"ff":1,"ge":1,"ko":1,"kk":1}"#,
    )
    .unwrap();

    let record = store.load(&fixture_loader()).unwrap();
    let brawling = Skill::new("Raufen", "mu-ge-kk".parse().unwrap());
    assert!(matches!(
        record.skill_score(&brawling),
        Err(SheetError::ScoreOverflow(_))
    ));
    let orientation = Skill::new("Orientierung", "kl-in-in".parse().unwrap());
    assert_eq!(record.skill_score(&orientation).unwrap(), 3);
}
