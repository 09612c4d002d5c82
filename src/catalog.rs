// Skill catalog: category -> (skill name -> "a-b-c" formula spec), read fresh on every call.
use crate::error::{Result, SheetError};
use crate::skill::{Formula, Skill};
use include_dir::{Dir, include_dir};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub const SKILLS_RESOURCE: &str = "skills.json";

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

// Where the catalog text comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    #[default]
    Bundled, // assets/skills.json compiled into the binary
    File(PathBuf),
}

// Stateless reader over a catalog source. Nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    source: CatalogSource,
}

// Whole catalog from a single parse, categories in source order.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    categories: Vec<(String, HashMap<String, Skill>)>,
}

impl SkillCatalog {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn category(&self, name: &str) -> Option<&HashMap<String, Skill>> {
        self.categories
            .iter()
            .find(|(category, _)| category == name)
            .map(|(_, skills)| skills)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.categories.iter().flat_map(|(_, skills)| skills.values())
    }
}

impl CatalogLoader {
    pub fn bundled() -> Self {
        Self::default()
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        CatalogLoader {
            source: CatalogSource::File(path.into()),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    // Read the catalog text in full.
    pub fn read_skills_json(&self) -> Result<String> {
        let text = match &self.source {
            CatalogSource::Bundled => ASSETS
                .get_file(SKILLS_RESOURCE)
                .ok_or_else(|| SheetError::resource_read(SKILLS_RESOURCE, "not bundled"))
                .and_then(|file| {
                    std::str::from_utf8(file.contents())
                        .map(str::to_owned)
                        .map_err(|e| SheetError::resource_read(SKILLS_RESOURCE, e))
                }),
            CatalogSource::File(path) => fs::read_to_string(path)
                .map_err(|e| SheetError::resource_read(path.display().to_string(), e)),
        };
        text.inspect_err(|e| log::error!("{e}"))
    }

    // Top-level keys, in the order the catalog lists them.
    pub fn skill_categories(&self) -> Result<Vec<String>> {
        Ok(self.parse_root()?.keys().cloned().collect())
    }

    pub fn skills_of_category(&self, category: &str) -> Result<HashMap<String, Skill>> {
        let root = self.parse_root()?;
        let entries = root
            .get(category)
            .ok_or_else(|| SheetError::CatalogParse(format!("no category '{category}'")))
            .and_then(|value| category_entries(category, value))
            .inspect_err(|e| log::error!("{e}"))?;
        parse_skills(category, entries).inspect_err(|e| log::error!("{e}"))
    }

    // Every skill of every category bound to 0: the sheet of a fresh character.
    pub fn initialize_skill_value_map(&self) -> Result<HashMap<Skill, i32>> {
        let mut skill_values = HashMap::new();
        for category in self.skill_categories()? {
            for skill in self.skills_of_category(&category)?.into_values() {
                if skill_values.insert(skill, 0).is_some() {
                    log::debug!("Skill listed in more than one category, keeping one entry");
                }
            }
        }
        log::debug!("Initialized skill sheet with {} skills", skill_values.len());
        Ok(skill_values)
    }

    pub fn load_catalog(&self) -> Result<SkillCatalog> {
        let root = self.parse_root()?;
        let mut categories = Vec::with_capacity(root.len());
        for (name, value) in &root {
            let skills = category_entries(name, value)
                .and_then(|entries| parse_skills(name, entries))
                .inspect_err(|e| log::error!("{e}"))?;
            categories.push((name.clone(), skills));
        }
        Ok(SkillCatalog { categories })
    }

    fn parse_root(&self) -> Result<Map<String, Value>> {
        let text = self.read_skills_json()?;
        let parsed = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(root)) => Ok(root),
            Ok(other) => Err(SheetError::CatalogParse(format!(
                "expected an object of categories, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(SheetError::CatalogParse(e.to_string())),
        };
        parsed.inspect_err(|e| log::error!("{e}"))
    }
}

fn category_entries<'a>(category: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        SheetError::CatalogParse(format!(
            "category '{category}' should be an object, found {}",
            json_kind(value)
        ))
    })
}

fn parse_skills(category: &str, entries: &Map<String, Value>) -> Result<HashMap<String, Skill>> {
    let mut skills = HashMap::with_capacity(entries.len());
    for (name, spec) in entries {
        let spec = spec.as_str().ok_or_else(|| {
            SheetError::CatalogParse(format!(
                "skill '{name}' in '{category}' should map to a formula string"
            ))
        })?;
        let formula = Formula::parse(spec)?;
        skills.insert(name.clone(), Skill::new(name.clone(), formula));
    }
    Ok(skills)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Bundled-catalog shorthands for callers that never override the source.

pub fn read_skills_json() -> Result<String> {
    CatalogLoader::bundled().read_skills_json()
}

pub fn skill_categories() -> Result<Vec<String>> {
    CatalogLoader::bundled().skill_categories()
}

pub fn skills_of_category(category: &str) -> Result<HashMap<String, Skill>> {
    CatalogLoader::bundled().skills_of_category(category)
}

pub fn initialize_skill_value_map() -> Result<HashMap<Skill, i32>> {
    CatalogLoader::bundled().initialize_skill_value_map()
}
