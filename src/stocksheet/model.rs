use crate::stock;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_UNIT: &str = "Nos";

/// A stock quantity. Always finite: anything else coerces to zero.
///
/// Stored sheets may carry quantities as numbers, numeric strings or nothing
/// at all, so deserialization accepts any of those. Integral values are
/// written as JSON integers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quantity(f64);

impl Quantity {
    pub fn new(value: f64) -> Self {
        Self(stock::coerce(value))
    }

    pub fn parse(raw: &str) -> Self {
        Self(stock::coerce_text(raw))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    fn from_stored(raw: Option<&Value>) -> Self {
        raw.and_then(|v| Quantity::deserialize(v).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stock::format_raw(self.0))
    }
}

// Largest magnitude below which every integral f64 is exactly an i64.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        if q.0.fract() == 0.0 && q.0.abs() < MAX_EXACT_INT {
            Value::from(q.0 as i64)
        } else {
            Value::from(q.0)
        }
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Ok(Quantity::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        Ok(Quantity::new(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(Quantity::new(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
        Ok(Quantity::parse(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Quantity, E> {
        Ok(Quantity::new(if v { 1.0 } else { 0.0 }))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Quantity, E> {
        Ok(Quantity::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Quantity, E> {
        Ok(Quantity::default())
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Quantity, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(Quantity::default())
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Quantity, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(Quantity::default())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

/// Derived stock status. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Reorder,
    OutOfStock,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Reorder => "Reorder",
            Status::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const STORED_KEYS: [&str; 10] = [
    "id",
    "name",
    "category",
    "unit",
    "opening",
    "in",
    "out",
    "reorderLevel",
    "remarks",
    "updatedAt",
];

/// One line of the stock sheet, as persisted.
///
/// Field names on disk follow the sheet's historical JSON layout. Loading is
/// lenient: text fields holding `null`, numbers or booleans read as text, and
/// quantities read as described on [`Quantity`]. Keys this struct does not
/// know about are kept in `extra`.
///
/// An item that came from storage remembers the JSON it was read from. When
/// saved again, every field whose value is unchanged is written back exactly
/// as it was stored, so a load/save cycle leaves untouched items alone.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub opening: Quantity,
    pub stock_in: Quantity,
    pub stock_out: Quantity,
    pub reorder_level: Quantity,
    pub remarks: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub extra: Map<String, Value>,
    stored: Option<Map<String, Value>>,
}

impl StockItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_item_id(),
            name: name.into(),
            category: DEFAULT_CATEGORY.to_string(),
            unit: DEFAULT_UNIT.to_string(),
            opening: Quantity::default(),
            stock_in: Quantity::default(),
            stock_out: Quantity::default(),
            reorder_level: Quantity::default(),
            remarks: String::new(),
            updated_at: Some(Utc::now()),
            extra: Map::new(),
            stored: None,
        }
    }

    pub fn with_quantities(
        mut self,
        opening: f64,
        stock_in: f64,
        stock_out: f64,
        reorder: f64,
    ) -> Self {
        self.opening = Quantity::new(opening);
        self.stock_in = Quantity::new(stock_in);
        self.stock_out = Quantity::new(stock_out);
        self.reorder_level = Quantity::new(reorder);
        self
    }

    fn from_stored(stored: Map<String, Value>, extra: Map<String, Value>) -> Self {
        let raw = |key: &str| stored.get(key);
        let mut item = Self {
            id: loose_text(raw("id")),
            name: loose_text(raw("name")),
            category: loose_text(raw("category")),
            unit: loose_text(raw("unit")),
            opening: Quantity::from_stored(raw("opening")),
            stock_in: Quantity::from_stored(raw("in")),
            stock_out: Quantity::from_stored(raw("out")),
            reorder_level: Quantity::from_stored(raw("reorderLevel")),
            remarks: loose_text(raw("remarks")),
            updated_at: timestamp::parse(raw("updatedAt")),
            extra,
            stored: None,
        };
        item.stored = Some(stored);
        item
    }

    /// The known fields in on-disk order, each either re-emitted as stored or
    /// written from the current value.
    fn entries(&self) -> Vec<(&'static str, Value)> {
        let stored = self.stored.as_ref();
        let raw = |key: &str| stored.and_then(|m| m.get(key));
        let mut out = Vec::with_capacity(STORED_KEYS.len());
        let mut push = |key: &'static str, current: Option<Value>, unchanged: bool| match stored {
            Some(m) if unchanged => {
                if let Some(v) = m.get(key) {
                    out.push((key, v.clone()));
                }
            }
            _ => {
                if let Some(v) = current {
                    out.push((key, v));
                }
            }
        };

        let texts = [
            ("id", &self.id),
            ("name", &self.name),
            ("category", &self.category),
            ("unit", &self.unit),
        ];
        for (key, value) in texts {
            push(key, Some(Value::from(value.as_str())), loose_text(raw(key)) == *value);
        }
        let quantities = [
            ("opening", self.opening),
            ("in", self.stock_in),
            ("out", self.stock_out),
            ("reorderLevel", self.reorder_level),
        ];
        for (key, value) in quantities {
            push(key, Some(Value::from(value)), Quantity::from_stored(raw(key)) == value);
        }
        push(
            "remarks",
            Some(Value::from(self.remarks.as_str())),
            loose_text(raw("remarks")) == self.remarks,
        );
        push(
            "updatedAt",
            self.updated_at.as_ref().map(|ts| Value::from(timestamp::format(ts))),
            timestamp::parse(raw("updatedAt")) == self.updated_at,
        );
        out
    }
}

impl Serialize for StockItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len() + self.extra.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StockItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = Map::<String, Value>::deserialize(deserializer)?;
        let stored = STORED_KEYS
            .iter()
            .filter_map(|key| extra.remove(*key).map(|v| (key.to_string(), v)))
            .collect();
        Ok(Self::from_stored(stored, extra))
    }
}

/// Reads a stored text field. Falsy values (`null`, `false`, `0`, missing)
/// read as empty; other numbers and `true` read as their printed form.
fn loose_text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| *v != 0.0)
            .map(stock::format_raw)
            .unwrap_or_default(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// `updatedAt` is written the way browsers print ISO timestamps
/// (`2024-01-01T08:30:00.000Z`). Unreadable values load as `None`.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde_json::Value;

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.format(FORMAT).to_string()
    }

    pub fn parse(raw: Option<&Value>) -> Option<DateTime<Utc>> {
        raw.and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }
}
