use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::DecodeError;
use super::field::{Field, FieldValue};
use super::reader::UplinkReader;

/// Fields emitted when no other selection is configured.
pub const DEFAULT_FIELDS: [Field; 4] = [
    Field::Voltage,
    Field::BatteryPct,
    Field::Temperature,
    Field::Co2,
];

pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Ordered, de-duplicated selection of fields to emit.
///
/// # Examples
/// ```
/// use sensorlink_core::{Field, FieldSet};
///
/// let set = FieldSet::new([Field::Co2, Field::Voltage, Field::Co2]);
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![Field::Voltage, Field::Co2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut fields: Vec<Field> = fields.into_iter().collect();
        fields.sort();
        fields.dedup();
        Self { fields }
    }

    /// Builds a set from wire names, rejecting unknown names.
    pub fn from_names<S: AsRef<str>>(
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, DecodeError> {
        let fields = names
            .into_iter()
            .map(|name| name.as_ref().parse::<Field>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(fields))
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.binary_search(&field).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new(DEFAULT_FIELDS)
    }
}

/// Decoded uplink: field name to value.
///
/// # Examples
/// ```
/// use sensorlink_core::decode;
///
/// let fields = decode(&[0, 100, 85, 1, 144, 0, 0, 0, 0, 0, 1, 144], 1)?;
/// assert_eq!(fields.get("co2").and_then(|v| v.as_u32()), Some(400));
/// # Ok::<(), sensorlink_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.0.get(name).copied()
    }

    pub fn field(&self, field: Field) -> Option<FieldValue> {
        self.get(field.name())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    fn insert(&mut self, field: Field, value: FieldValue) {
        self.0.insert(field.name().to_string(), value);
    }
}

/// How a profile treats fields still holding the firmware's unread marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnreadPolicy {
    /// Apply the field formula to whatever the frame holds.
    #[default]
    Decode,
    /// Emit [`FieldValue::Unread`] for humidity, illuminance and pressure
    /// when they hold `0xFF`/`0xFFFF`.
    Null,
}

/// A named frame decoding: which fields of the fixed layout to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingProfile {
    pub name: String,
    pub fields: FieldSet,
    pub unread: UnreadPolicy,
}

impl DecodingProfile {
    pub fn new(name: impl Into<String>, fields: FieldSet) -> Self {
        Self {
            name: name.into(),
            fields,
            unread: UnreadPolicy::Decode,
        }
    }

    pub fn with_unread(mut self, unread: UnreadPolicy) -> Self {
        self.unread = unread;
        self
    }

    /// Decodes `payload` into the enabled fields.
    ///
    /// The whole frame must be present even when the enabled fields would
    /// fit in fewer bytes; bytes past the frame are ignored.
    pub fn decode(&self, payload: &[u8]) -> Result<Fields, DecodeError> {
        let reader = UplinkReader::new(payload)?;

        let mut out = Fields::default();
        for field in self.fields.iter() {
            let value = if self.unread == UnreadPolicy::Null && field.is_unread(&reader)? {
                FieldValue::Unread
            } else {
                field.decode(&reader)?
            };
            log::trace!("{}: {} = {}", self.name, field, value);
            out.insert(field, value);
        }
        Ok(out)
    }
}

impl Default for DecodingProfile {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_NAME, FieldSet::default())
    }
}
