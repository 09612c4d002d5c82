pub mod attribute;
pub mod catalog;
pub mod character;
pub mod dice;
pub mod error;
pub mod logging;
pub mod save;
pub mod settings;
pub mod skill;
pub mod validation;

// Re-export commonly used items for easier access
pub use attribute::Attribute;
pub use catalog::{
    CatalogLoader, CatalogSource, SkillCatalog, initialize_skill_value_map, read_skills_json,
    skill_categories, skills_of_category,
};
pub use character::{Attributes, CharacterRecord, CharacterRecordBuilder, excess};
pub use dice::{CheckResult, resolve_check, skill_check};
pub use error::{Result, SheetError};
pub use save::CharacterStore;
pub use settings::Settings;
pub use skill::{Formula, Skill};
pub use validation::{any_blank, is_blank, parse_attributes};
