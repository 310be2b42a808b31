//! Pathfinder carrying-capacity and encumbrance rules.
//!
//! The capacity formula follows the closed form posted by Cevah on the
//! Paizo forums: below strength 10 the heavy load is linear; from 10 up it
//! cycles through ten fixed base values, quadrupling each decade.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::Attribute;

/// Heavy-load base values for the ten remainder classes of `strength - 1`.
const HEAVY_LOAD_BASE: [f64; 10] = [
    25.0, 28.75, 32.5, 37.5, 43.75, 50.0, 57.5, 65.0, 75.0, 87.5,
];

/// The three load thresholds, in pounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadLimits {
    pub light: f64,
    pub medium: f64,
    pub heavy: f64,
}

/// Carrying capacity for an integer strength score.
pub fn carrying_capacity(strength: i32) -> LoadLimits {
    let heavy = if strength < 10 {
        f64::from(strength) * 10.0
    } else {
        let steps = strength - 1;
        let base = HEAVY_LOAD_BASE[(steps % 10) as usize];
        base * 4f64.powi(steps / 10)
    };

    LoadLimits {
        light: (heavy / 3.0).floor(),
        medium: (heavy * 2.0 / 3.0).floor(),
        heavy,
    }
}

/// Carried-weight totals derived from a character's sheet attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarriedWeight {
    /// Equipped armor and shield plus loaded weapon ammunition weight
    pub armor_and_weapons: f64,
    /// Everything in the repeating item rows
    pub equipment: f64,
}

static WEARABLE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(armor|shield)-(equipped|weight)$").expect("valid wearable regex"));
static REPEATING_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^repeating_(item|weapon)_(\d+)_(ammo|qty|weight)$").expect("valid row regex")
});

#[derive(Default)]
struct Wearable {
    equipped: Option<f64>,
    weight: Option<f64>,
}

impl Wearable {
    fn carried_weight(&self) -> f64 {
        match (self.weight, self.equipped) {
            (Some(weight), Some(equipped)) => weight * equipped,
            _ => 0.0,
        }
    }
}

#[derive(Default)]
struct GearRow {
    ammo: Option<f64>,
    qty: Option<f64>,
    weight: Option<f64>,
}

/// Scan a character's attributes and total the carried weight.
///
/// Attribute names follow the Pathfinder sheet conventions
/// (`armor-weight`, `repeating_item_3_qty`, ...). Attributes with
/// non-numeric current values are skipped, as are rows missing either
/// factor of their product.
pub fn weigh_attributes<'a>(attributes: impl IntoIterator<Item = &'a Attribute>) -> CarriedWeight {
    let mut armor = Wearable::default();
    let mut shield = Wearable::default();
    let mut items: HashMap<u32, GearRow> = HashMap::new();
    let mut weapons: HashMap<u32, GearRow> = HashMap::new();

    for attribute in attributes {
        let Some(value) = attribute.current_number() else {
            continue;
        };

        if let Some(captures) = WEARABLE_ATTR.captures(&attribute.name) {
            let target = match &captures[1] {
                "armor" => &mut armor,
                _ => &mut shield,
            };
            match &captures[2] {
                "equipped" => target.equipped = Some(value),
                _ => target.weight = Some(value),
            }
        } else if let Some(captures) = REPEATING_ATTR.captures(&attribute.name) {
            let Ok(index) = captures[2].parse::<u32>() else {
                continue;
            };
            let row = match &captures[1] {
                "item" => items.entry(index).or_default(),
                _ => weapons.entry(index).or_default(),
            };
            match &captures[3] {
                "ammo" => row.ammo = Some(value),
                "qty" => row.qty = Some(value),
                _ => row.weight = Some(value),
            }
        }
    }

    let item_weight: f64 = items
        .values()
        .filter_map(|row| Some(row.weight? * row.qty?))
        .sum();
    let weapon_weight: f64 = weapons
        .values()
        .filter_map(|row| Some(row.weight? * row.ammo?))
        .sum();

    CarriedWeight {
        armor_and_weapons: armor.carried_weight() + shield.carried_weight() + weapon_weight,
        equipment: item_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_scores_scale_linearly() {
        for strength in 1..=9 {
            let limits = carrying_capacity(strength);
            assert_eq!(limits.heavy, f64::from(strength) * 10.0);
            assert_eq!(limits.light, (limits.heavy / 3.0).floor());
            assert_eq!(limits.medium, (limits.heavy * 2.0 / 3.0).floor());
        }
    }

    #[test]
    fn table_scores_quadruple_each_decade() {
        assert_eq!(carrying_capacity(10).heavy, 87.5);
        assert_eq!(carrying_capacity(20).heavy, 350.0);
        assert_eq!(carrying_capacity(30).heavy, 1400.0);
    }

    #[test]
    fn fractional_heavy_loads_floor_the_lower_thresholds() {
        let limits = carrying_capacity(10);
        assert_eq!(limits.light, 29.0);
        assert_eq!(limits.medium, 58.0);
    }

    #[test]
    fn mid_decade_scores_walk_the_table() {
        assert_eq!(carrying_capacity(11).heavy, 25.0 * 4.0);
        assert_eq!(carrying_capacity(15).heavy, 43.75 * 4.0);
        assert_eq!(carrying_capacity(19).heavy, 75.0 * 4.0);
    }

    fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
        pairs
            .iter()
            .map(|(name, current)| Attribute::new(*name, *current))
            .collect()
    }

    #[test]
    fn equipped_armor_and_items_are_weighed() {
        let attributes = attrs(&[
            ("armor-weight", "10"),
            ("armor-equipped", "1"),
            ("repeating_item_1_weight", "2"),
            ("repeating_item_1_qty", "3"),
        ]);
        let carried = weigh_attributes(&attributes);
        assert_eq!(carried.armor_and_weapons, 10.0);
        assert_eq!(carried.equipment, 6.0);
    }

    #[test]
    fn unequipped_armor_weighs_nothing() {
        let attributes = attrs(&[("armor-weight", "10"), ("armor-equipped", "0")]);
        assert_eq!(weigh_attributes(&attributes).armor_and_weapons, 0.0);
    }

    #[test]
    fn wearables_missing_a_field_are_excluded() {
        let attributes = attrs(&[("armor-weight", "10"), ("shield-equipped", "1")]);
        assert_eq!(weigh_attributes(&attributes).armor_and_weapons, 0.0);
    }

    #[test]
    fn weapon_weight_multiplies_by_ammo() {
        let attributes = attrs(&[
            ("repeating_weapon_2_weight", "0.5"),
            ("repeating_weapon_2_ammo", "20"),
        ]);
        assert_eq!(weigh_attributes(&attributes).armor_and_weapons, 10.0);
    }

    #[test]
    fn rows_missing_a_factor_are_skipped() {
        let attributes = attrs(&[
            ("repeating_item_1_weight", "2"),
            ("repeating_weapon_1_ammo", "20"),
        ]);
        let carried = weigh_attributes(&attributes);
        assert_eq!(carried.equipment, 0.0);
        assert_eq!(carried.armor_and_weapons, 0.0);
    }

    #[test]
    fn malformed_values_and_unrelated_attributes_are_ignored() {
        let attributes = attrs(&[
            ("repeating_item_1_weight", "heavy"),
            ("repeating_item_1_qty", "1"),
            ("strength", "14"),
            ("armor-style", "ornate"),
        ]);
        assert_eq!(weigh_attributes(&attributes), CarriedWeight::default());
    }
}
