use crate::attribute::Attribute;
use thiserror::Error;

// Errors raised by the catalog and character pipeline.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to read skill catalog '{resource}': {reason}")]
    ResourceRead { resource: String, reason: String }, // Bundled or override catalog missing or unreadable.

    #[error("Failed to parse skill catalog: {0}")]
    CatalogParse(String), // Malformed JSON, missing category or a bad formula spec.

    #[error("Failed to read character file: {0}")]
    RecordRead(String), // Persisted character missing or malformed.

    #[error("Failed to write character file: {0}")]
    RecordWrite(String),

    #[error("Attribute '{0}' was never set on the builder")]
    MissingAttribute(Attribute),

    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("Skill '{0}' is not part of this character's skill sheet")]
    UnknownSkill(String),

    #[error("Field {0} is blank")]
    BlankField(usize),

    #[error("Invalid value '{value}' for attribute {attribute}: expected an integer from 0 to 99")]
    InvalidAttribute { attribute: Attribute, value: String },

    #[error("Score of formula {0} does not fit in an i32")]
    ScoreOverflow(String),

    #[error("Failed to get home directory")]
    NoHomeDirectory,

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;

impl SheetError {
    // Helper for catalog read failures, carrying the resource name along.
    pub fn resource_read(resource: impl Into<String>, reason: impl ToString) -> Self {
        SheetError::ResourceRead {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
