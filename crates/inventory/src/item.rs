use serde::{Deserialize, Deserializer, Serialize};

use stockline_core::{Entity, ItemId};

/// Unit of measure assumed when the store omits one.
pub const DEFAULT_UNIT: &str = "pcs";

/// Item category as recorded by the external store.
///
/// Store records carry free-form strings; parsing is lenient and anything
/// unrecognised (including null or empty) maps to [`ItemCategory::Other`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ItemCategory {
    RawMaterial,
    Component,
    Tool,
    Part,
    #[default]
    Other,
}

impl ItemCategory {
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "raw_material" | "raw_materials" => Self::RawMaterial,
            "component" | "components" => Self::Component,
            "tool" | "tools" => Self::Tool,
            "part" | "parts" => Self::Part,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RawMaterial => "raw_material",
            Self::Component => "component",
            Self::Tool => "tool",
            Self::Part => "part",
            Self::Other => "other",
        }
    }

    /// Movement profile used by the synthetic transaction generator.
    pub fn profile(&self) -> CategoryProfile {
        match self {
            Self::RawMaterial => CategoryProfile::new(3.0, 200.0, 80.0),
            Self::Component => CategoryProfile::new(2.0, 100.0, 40.0),
            Self::Tool => CategoryProfile::new(0.5, 20.0, 5.0),
            Self::Part => CategoryProfile::new(1.5, 80.0, 25.0),
            Self::Other => CategoryProfile::new(1.0, 50.0, 20.0),
        }
    }
}

impl From<Option<String>> for ItemCategory {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<ItemCategory> for String {
    fn from(value: ItemCategory) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How busy a category typically is, and how large its movements get.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CategoryProfile {
    /// Multiplier applied to both inbound and outbound maxima.
    pub activity: f64,
    pub max_inbound: f64,
    pub max_outbound: f64,
}

impl CategoryProfile {
    pub const fn new(activity: f64, max_inbound: f64, max_outbound: f64) -> Self {
        Self {
            activity,
            max_inbound,
            max_outbound,
        }
    }
}

/// Stock level relative to the item's configured thresholds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Normal,
    Overstocked,
}

/// Inventory item snapshot as read from the external record store.
///
/// Read-only from this crate's perspective. Missing or null fields fall back to
/// defaults at deserialization time (see the field docs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    /// Display name; empty when absent.
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    /// Absent or unknown categories become `Other`.
    #[serde(default)]
    category: ItemCategory,
    /// Unit of measure; [`DEFAULT_UNIT`] when absent.
    #[serde(default = "default_unit", deserialize_with = "unit_or_default")]
    unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    current_quantity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    min_quantity: i64,
    /// No overstock ceiling when absent.
    #[serde(default)]
    max_quantity: Option<i64>,
}

impl InventoryItem {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: ItemCategory::Other,
            unit: DEFAULT_UNIT.to_string(),
            current_quantity: 0,
            min_quantity: 0,
            max_quantity: None,
        }
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_current_quantity(mut self, quantity: i64) -> Self {
        self.current_quantity = quantity;
        self
    }

    pub fn with_thresholds(mut self, min: i64, max: Option<i64>) -> Self {
        self.min_quantity = min;
        self.max_quantity = max;
        self
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ItemCategory {
        self.category
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn current_quantity(&self) -> i64 {
        self.current_quantity
    }

    pub fn min_quantity(&self) -> i64 {
        self.min_quantity
    }

    pub fn max_quantity(&self) -> Option<i64> {
        self.max_quantity
    }

    /// Classify the current quantity against the item's thresholds.
    ///
    /// Rules are checked in order: out of stock, low (at or below the
    /// minimum), overstocked (above a configured maximum), otherwise normal.
    pub fn stock_level(&self) -> StockLevel {
        let qty = self.current_quantity;
        if qty <= 0 {
            StockLevel::OutOfStock
        } else if qty <= self.min_quantity {
            StockLevel::Low
        } else if self.max_quantity.is_some_and(|max| qty > max) {
            StockLevel::Overstocked
        } else {
            StockLevel::Normal
        }
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn unit_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let unit = Option::<String>::deserialize(deserializer)?;
    Ok(unit
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(default_unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(qty: i64, min: i64, max: Option<i64>) -> InventoryItem {
        InventoryItem::new(ItemId::new(), "Bearing 6204")
            .with_current_quantity(qty)
            .with_thresholds(min, max)
    }

    #[test]
    fn category_parsing_is_lenient() {
        assert_eq!(ItemCategory::parse("raw_material"), ItemCategory::RawMaterial);
        assert_eq!(ItemCategory::parse("Raw Material"), ItemCategory::RawMaterial);
        assert_eq!(ItemCategory::parse("raw-materials"), ItemCategory::RawMaterial);
        assert_eq!(ItemCategory::parse("COMPONENTS"), ItemCategory::Component);
        assert_eq!(ItemCategory::parse(" tool "), ItemCategory::Tool);
        assert_eq!(ItemCategory::parse("part"), ItemCategory::Part);
        assert_eq!(ItemCategory::parse(""), ItemCategory::Other);
        assert_eq!(ItemCategory::parse("consumable"), ItemCategory::Other);
    }

    #[test]
    fn category_profiles_match_movement_table() {
        assert_eq!(ItemCategory::RawMaterial.profile(), CategoryProfile::new(3.0, 200.0, 80.0));
        assert_eq!(ItemCategory::Component.profile(), CategoryProfile::new(2.0, 100.0, 40.0));
        assert_eq!(ItemCategory::Tool.profile(), CategoryProfile::new(0.5, 20.0, 5.0));
        assert_eq!(ItemCategory::Part.profile(), CategoryProfile::new(1.5, 80.0, 25.0));
        assert_eq!(ItemCategory::Other.profile(), CategoryProfile::new(1.0, 50.0, 20.0));
    }

    #[test]
    fn sparse_record_gets_defaults() {
        let id = ItemId::new();
        let parsed: InventoryItem = serde_json::from_value(json!({ "id": id })).unwrap();

        assert_eq!(parsed.id_typed(), id);
        assert_eq!(parsed.name(), "");
        assert_eq!(parsed.category(), ItemCategory::Other);
        assert_eq!(parsed.unit(), DEFAULT_UNIT);
        assert_eq!(parsed.current_quantity(), 0);
        assert_eq!(parsed.min_quantity(), 0);
        assert_eq!(parsed.max_quantity(), None);
    }

    #[test]
    fn null_fields_get_defaults() {
        let id = ItemId::new();
        let parsed: InventoryItem = serde_json::from_value(json!({
            "id": id,
            "name": null,
            "category": null,
            "unit": "  ",
            "current_quantity": null,
            "min_quantity": null,
            "max_quantity": null,
        }))
        .unwrap();

        assert_eq!(parsed, InventoryItem::new(id, ""));
    }

    #[test]
    fn full_record_is_read_as_is() {
        let id = ItemId::new();
        let parsed: InventoryItem = serde_json::from_value(json!({
            "id": id,
            "name": "Steel sheet 2mm",
            "category": "Raw Material",
            "unit": "kg",
            "current_quantity": 420,
            "min_quantity": 100,
            "max_quantity": 1000,
        }))
        .unwrap();

        assert_eq!(parsed.name(), "Steel sheet 2mm");
        assert_eq!(parsed.category(), ItemCategory::RawMaterial);
        assert_eq!(parsed.unit(), "kg");
        assert_eq!(parsed.current_quantity(), 420);
        assert_eq!(parsed.min_quantity(), 100);
        assert_eq!(parsed.max_quantity(), Some(1000));
    }

    #[test]
    fn category_serializes_as_canonical_string() {
        let value = serde_json::to_value(ItemCategory::RawMaterial).unwrap();
        assert_eq!(value, json!("raw_material"));
    }

    #[test]
    fn missing_id_is_rejected() {
        let result = serde_json::from_value::<InventoryItem>(json!({ "name": "orphan" }));
        assert!(result.is_err());
    }

    #[test]
    fn stock_level_boundaries() {
        assert_eq!(item(0, 10, None).stock_level(), StockLevel::OutOfStock);
        assert_eq!(item(-4, 10, None).stock_level(), StockLevel::OutOfStock);
        assert_eq!(item(10, 10, None).stock_level(), StockLevel::Low);
        assert_eq!(item(11, 10, None).stock_level(), StockLevel::Normal);
        assert_eq!(item(500, 10, None).stock_level(), StockLevel::Normal);
        assert_eq!(item(100, 10, Some(100)).stock_level(), StockLevel::Normal);
        assert_eq!(item(101, 10, Some(100)).stock_level(), StockLevel::Overstocked);
    }
}
