// Skill checks: three d20 against the skill's three attributes, with the skill
// value as a pool of points that absorbs overshoot.
use crate::character::{CharacterRecord, excess};
use crate::error::{Result, SheetError};
use crate::skill::Skill;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub rolls: [u8; 3],
    pub remaining: i32, // Points left over after covering every overshoot.
    pub success: bool,
    pub critical_success: bool, // At least two ones.
    pub botch: bool,            // At least two twenties.
}

// Largest difficulty modifier taken from callers.
pub const MAX_MODIFIER: i32 = 99;

// Roll a check for one of the record's skills. A positive modifier makes it harder.
pub fn skill_check(record: &CharacterRecord, skill: &Skill, modifier: i32) -> Result<CheckResult> {
    let skill_value = record
        .skill_value(skill.name())
        .ok_or_else(|| SheetError::UnknownSkill(skill.name().to_string()))?;
    let attributes = skill.formula().attributes()?.map(|a| record.attribute(a));

    let mut rng = rand::rng();
    let rolls = [roll_d20(&mut rng), roll_d20(&mut rng), roll_d20(&mut rng)];
    let result = resolve_check(attributes, skill_value, modifier, rolls);
    log::debug!("Check on {skill}: {result:?}");
    Ok(result)
}

// Score a check from known rolls.
pub fn resolve_check(
    attributes: [i32; 3],
    skill_value: i32,
    modifier: i32,
    rolls: [u8; 3],
) -> CheckResult {
    let ones = rolls.iter().filter(|r| **r == 1).count();
    let twenties = rolls.iter().filter(|r| **r == 20).count();

    let pool = skill_value.saturating_sub(modifier);
    let (remaining, success) = if pool >= 0 {
        // Overshoot on each die is paid out of the pool.
        let spent = rolls
            .iter()
            .zip(attributes)
            .map(|(roll, attribute)| excess(i32::from(*roll), attribute))
            .fold(0i32, i32::saturating_add);
        let remaining = pool.saturating_sub(spent);
        (remaining.max(0), remaining >= 0)
    } else {
        // A negative pool lowers every attribute instead, and nothing remains.
        let success = rolls
            .iter()
            .zip(attributes)
            .all(|(roll, attribute)| i32::from(*roll) <= attribute.saturating_add(pool));
        (0, success)
    };

    let critical_success = ones >= 2;
    let botch = twenties >= 2;
    CheckResult {
        rolls,
        remaining: if critical_success { pool.max(0) } else { remaining },
        success: !botch && (critical_success || success),
        critical_success,
        botch,
    }
}

fn roll_d20(rng: &mut impl Rng) -> u8 {
    rng.random_range(1..=20)
}
