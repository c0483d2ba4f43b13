use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Piece-rate work category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Taklob,
    Lawas,
}

/// size code -> unit price
pub type PriceList = BTreeMap<String, f64>;

/// Unit prices keyed by category, subcategory and size, plus a flat list of
/// additional items. Read-only once the server is up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "taklob": { "molde": { "S1": 15.0 }, "turno": { "S1": 15.0 } },
    "lawas": { "finish": { "S1": 12.0 } },
    "additional": { "X-RAY": 35.0 }
}))]
pub struct PricingTable {
    #[schema(value_type = Object)]
    pub taklob: BTreeMap<String, PriceList>,
    #[schema(value_type = Object)]
    pub lawas: BTreeMap<String, PriceList>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub additional: PriceList,
}

const SIZE_CODES: &[&str] = &[
    "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL", "6XL", "10C", "U", "V", "W", "X", "Y", "Z",
    "KW",
];

const ADDITIONAL_ITEMS: &[(&str, f64)] = &[
    ("X-RAY", 35.0),
    ("GRINDER ALL SIZE", 40.0),
    ("CUTTER ALL SIZE", 45.0),
    ("PUGON/PCS", 50.0),
    ("HELPER", 200.0),
    ("BUHOS", 25.0),
    ("HANDLE", 30.0),
    ("TUSMAW", 35.0),
];

/// Every size code has five grades (S1..S5) sharing one price; each step up
/// the size ladder adds one peso.
fn size_ladder(base_price: f64) -> PriceList {
    SIZE_CODES
        .iter()
        .enumerate()
        .flat_map(|(step, code)| {
            (1..=5).map(move |grade| (format!("{code}{grade}"), base_price + step as f64))
        })
        .collect()
}

static BUILTIN: Lazy<PricingTable> = Lazy::new(|| PricingTable {
    taklob: BTreeMap::from([
        ("molde".to_string(), size_ladder(15.0)),
        ("turno".to_string(), size_ladder(15.0)),
    ]),
    lawas: BTreeMap::from([("finish".to_string(), size_ladder(12.0))]),
    additional: ADDITIONAL_ITEMS
        .iter()
        .map(|(code, price)| (code.to_string(), *price))
        .collect(),
});

impl PricingTable {
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pricing file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid pricing table in {}", path.display()))
    }

    pub fn subcategories(&self, category: Category) -> &BTreeMap<String, PriceList> {
        match category {
            Category::Taklob => &self.taklob,
            Category::Lawas => &self.lawas,
        }
    }

    /// Unit price for one work entry, or 0 when nothing matches.
    ///
    /// Lookup order: the category's subcategory list, then (for lawas only)
    /// the category's single subcategory when none was chosen, then the
    /// additional items keyed by `size`.
    pub fn resolve(&self, category: Category, subcategory: Option<&str>, size: &str) -> f64 {
        let groups = self.subcategories(category);

        let prices = match subcategory.map(str::trim).filter(|s| !s.is_empty()) {
            Some(sub) => groups.get(sub),
            None if category == Category::Lawas && groups.len() == 1 => groups.values().next(),
            None => None,
        };

        prices
            .and_then(|p| p.get(size))
            .or_else(|| self.additional.get(size))
            .copied()
            .unwrap_or(0.0)
    }
}
