// Form-input checks used before a character is built.
use crate::attribute::Attribute;
use crate::character::Attributes;
use crate::error::{Result, SheetError};

// Upper bound accepted from input fields.
pub const MAX_ATTRIBUTE: i32 = 99;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// True if any of the first `count` fields is blank. Fields past the end of
// the slice are missing, and missing counts as blank.
pub fn any_blank<S: AsRef<str>>(fields: &[S], count: usize) -> bool {
    fields.len() < count || fields.iter().take(count).any(|f| is_blank(f.as_ref()))
}

// Parse the eight attribute inputs (sheet order) into values in 0..=MAX_ATTRIBUTE.
pub fn parse_attributes<S: AsRef<str>>(fields: &[S]) -> Result<Attributes> {
    let mut attributes = Attributes::default();
    for (index, attribute) in Attribute::ALL.into_iter().enumerate() {
        let raw = fields
            .get(index)
            .map(|f| f.as_ref())
            .filter(|f| !is_blank(f))
            .ok_or(SheetError::BlankField(index))?;
        let value = raw
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|v| (0..=MAX_ATTRIBUTE).contains(v))
            .ok_or_else(|| SheetError::InvalidAttribute {
                attribute,
                value: raw.to_string(),
            })?;
        attributes.set(attribute, value);
    }
    Ok(attributes)
}
