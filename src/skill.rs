use crate::attribute::Attribute;
use crate::character::Attributes;
use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// Delimiter between the attribute tokens of a formula spec ("mu-kl-in").
pub const FORMULA_DELIMITER: char = '-';

// Three base attributes whose values add up to a skill's score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formula {
    first: String,
    second: String,
    third: String,
}

impl Formula {
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        third: impl Into<String>,
    ) -> Self {
        Formula {
            first: first.into(),
            second: second.into(),
            third: third.into(),
        }
    }

    // Split a catalog value like "mu-in-ge" into a formula.
    pub fn parse(spec: &str) -> Result<Self> {
        let tokens: Vec<&str> = spec.split(FORMULA_DELIMITER).collect();
        match tokens.as_slice() {
            [a, b, c] if !a.is_empty() && !b.is_empty() && !c.is_empty() => {
                Ok(Formula::new(*a, *b, *c))
            }
            _ => Err(SheetError::CatalogParse(format!(
                "formula '{spec}' must name exactly three attributes separated by '{FORMULA_DELIMITER}'"
            ))),
        }
    }

    pub fn components(&self) -> [&str; 3] {
        [&self.first, &self.second, &self.third]
    }

    // Resolve the tokens to base attributes.
    pub fn attributes(&self) -> Result<[Attribute; 3]> {
        let resolve = |token: &str| {
            Attribute::from_str(token).map_err(|_| SheetError::UnknownAttribute(token.to_string()))
        };
        Ok([
            resolve(&self.first)?,
            resolve(&self.second)?,
            resolve(&self.third)?,
        ])
    }

    // Sum of the three attribute values; stored files are not range checked, so
    // the sum may not fit.
    pub fn evaluate(&self, attributes: &Attributes) -> Result<i32> {
        self.attributes()?
            .iter()
            .try_fold(0i32, |sum, attribute| sum.checked_add(attributes.get(*attribute)))
            .ok_or_else(|| SheetError::ScoreOverflow(self.to_string()))
    }
}

impl FromStr for Formula {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        Formula::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.first.to_uppercase(),
            self.second.to_uppercase(),
            self.third.to_uppercase()
        )
    }
}

// A named skill. Identity is the name: two reads of the catalog yield equal keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    name: String,
    formula: Formula,
}

impl Skill {
    pub fn new(name: impl Into<String>, formula: Formula) -> Self {
        Skill {
            name: name.into(),
            formula,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl PartialEq for Skill {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Skill {}

impl Hash for Skill {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// Lets skill sheets be queried by name; consistent with the name-based Hash/Eq above.
impl Borrow<str> for Skill {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.formula)
    }
}
