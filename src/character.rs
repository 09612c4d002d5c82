// Character record: the eight base attributes plus the skill sheet seeded from the catalog.
use crate::attribute::Attribute;
use crate::error::{Result, SheetError};
use crate::skill::Skill;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Base attributes, serialized as a flat object in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub mu: i32,
    pub kl: i32,
    #[serde(rename = "in")]
    pub in_: i32, // `in` is a keyword
    pub ch: i32,
    pub ff: i32,
    pub ge: i32,
    pub ko: i32,
    pub kk: i32,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Mu => self.mu,
            Attribute::Kl => self.kl,
            Attribute::In => self.in_,
            Attribute::Ch => self.ch,
            Attribute::Ff => self.ff,
            Attribute::Ge => self.ge,
            Attribute::Ko => self.ko,
            Attribute::Kk => self.kk,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        let slot = match attribute {
            Attribute::Mu => &mut self.mu,
            Attribute::Kl => &mut self.kl,
            Attribute::In => &mut self.in_,
            Attribute::Ch => &mut self.ch,
            Attribute::Ff => &mut self.ff,
            Attribute::Ge => &mut self.ge,
            Attribute::Ko => &mut self.ko,
            Attribute::Kk => &mut self.kk,
        };
        *slot = value;
    }

    // (attribute, value) pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    attributes: Attributes,
    skill_values: HashMap<Skill, i32>,
}

impl CharacterRecord {
    pub fn builder() -> CharacterRecordBuilder {
        CharacterRecordBuilder::new()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(attribute)
    }

    pub fn skill_values(&self) -> &HashMap<Skill, i32> {
        &self.skill_values
    }

    pub fn skill_value(&self, skill_name: &str) -> Option<i32> {
        self.skill_values.get(skill_name).copied()
    }

    // Only skills seeded at creation can carry a value.
    pub fn set_skill_value(&mut self, skill_name: &str, value: i32) -> Result<()> {
        match self.skill_values.get_mut(skill_name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SheetError::UnknownSkill(skill_name.to_string())),
        }
    }

    // Effective score of a skill: the sum of its formula's attributes.
    pub fn skill_score(&self, skill: &Skill) -> Result<i32> {
        skill.formula().evaluate(&self.attributes)
    }
}

// Builder that refuses to produce a record until all eight attributes are set.
#[derive(Debug, Default)]
pub struct CharacterRecordBuilder {
    values: [Option<i32>; Attribute::COUNT],
    skill_values: HashMap<Skill, i32>,
}

impl CharacterRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, attribute: Attribute, value: i32) -> Self {
        self.values[attribute as usize] = Some(value);
        self
    }

    pub fn mu(self, value: i32) -> Self {
        self.attribute(Attribute::Mu, value)
    }

    pub fn kl(self, value: i32) -> Self {
        self.attribute(Attribute::Kl, value)
    }

    pub fn in_(self, value: i32) -> Self {
        self.attribute(Attribute::In, value)
    }

    pub fn ch(self, value: i32) -> Self {
        self.attribute(Attribute::Ch, value)
    }

    pub fn ff(self, value: i32) -> Self {
        self.attribute(Attribute::Ff, value)
    }

    pub fn ge(self, value: i32) -> Self {
        self.attribute(Attribute::Ge, value)
    }

    pub fn ko(self, value: i32) -> Self {
        self.attribute(Attribute::Ko, value)
    }

    pub fn kk(self, value: i32) -> Self {
        self.attribute(Attribute::Kk, value)
    }

    pub fn attributes(mut self, attributes: &Attributes) -> Self {
        for (attribute, value) in attributes.iter() {
            self = self.attribute(attribute, value);
        }
        self
    }

    // Seed skill sheet, usually from `catalog::initialize_skill_value_map`.
    pub fn skill_values(mut self, skill_values: HashMap<Skill, i32>) -> Self {
        self.skill_values = skill_values;
        self
    }

    pub fn build(self) -> Result<CharacterRecord> {
        let mut attributes = Attributes::default();
        for attribute in Attribute::ALL {
            let value = self.values[attribute as usize]
                .ok_or(SheetError::MissingAttribute(attribute))?;
            attributes.set(attribute, value);
        }
        Ok(CharacterRecord {
            attributes,
            skill_values: self.skill_values,
        })
    }
}

// How far `x` exceeds `y`; zero when it doesn't.
pub fn excess(x: i32, y: i32) -> i32 {
    if x > y { x.saturating_sub(y) } else { 0 }
}
