// The eight base attributes of a character, in sheet order.
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Attribute {
    Mu, // Mut (courage)
    Kl, // Klugheit (cleverness)
    In, // Intuition
    Ch, // Charisma
    Ff, // Fingerfertigkeit (dexterity)
    Ge, // Gewandtheit (agility)
    Ko, // Konstitution
    Kk, // Körperkraft (strength)
}

impl Attribute {
    pub const COUNT: usize = 8;

    pub const ALL: [Attribute; Attribute::COUNT] = [
        Attribute::Mu,
        Attribute::Kl,
        Attribute::In,
        Attribute::Ch,
        Attribute::Ff,
        Attribute::Ge,
        Attribute::Ko,
        Attribute::Kk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Mu => "Mut",
            Attribute::Kl => "Klugheit",
            Attribute::In => "Intuition",
            Attribute::Ch => "Charisma",
            Attribute::Ff => "Fingerfertigkeit",
            Attribute::Ge => "Gewandtheit",
            Attribute::Ko => "Konstitution",
            Attribute::Kk => "Körperkraft",
        }
    }
}
