use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DecodeError;
use super::layout;
use super::reader::UplinkReader;

/// Every measurement the device packs into an uplink frame.
///
/// Declaration order matches frame order and is used when listing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Header,
    Voltage,
    BatteryPct,
    Temperature,
    Humidity,
    Illuminance,
    Pressure,
    Co2,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Header,
        Field::Voltage,
        Field::BatteryPct,
        Field::Temperature,
        Field::Humidity,
        Field::Illuminance,
        Field::Pressure,
        Field::Co2,
    ];

    /// Key used in decoded output and configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Field::Header => "header",
            Field::Voltage => "voltage",
            Field::BatteryPct => "battery_pct",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Illuminance => "illuminance",
            Field::Pressure => "pressure",
            Field::Co2 => "co2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Header => "Header",
            Field::Voltage => "Voltage",
            Field::BatteryPct => "Battery",
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
            Field::Illuminance => "Illuminance",
            Field::Pressure => "Pressure",
            Field::Co2 => "CO2",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Field::Header => None,
            Field::Voltage => Some("V"),
            Field::BatteryPct => Some("%"),
            Field::Temperature => Some("°C"),
            Field::Humidity => Some("%RH"),
            Field::Illuminance => Some("lx"),
            Field::Pressure => Some("Pa"),
            Field::Co2 => Some("ppm"),
        }
    }

    /// Byte range the field occupies in the frame.
    pub fn span(self) -> std::ops::Range<usize> {
        match self {
            Field::Header => single(layout::HEADER_OFFSET),
            Field::Voltage => single(layout::VOLTAGE_OFFSET),
            Field::BatteryPct => single(layout::BATTERY_OFFSET),
            Field::Temperature => layout::TEMPERATURE_RANGE,
            Field::Humidity => single(layout::HUMIDITY_OFFSET),
            Field::Illuminance => layout::ILLUMINANCE_RANGE,
            Field::Pressure => layout::PRESSURE_RANGE,
            Field::Co2 => layout::CO2_RANGE,
        }
    }

    /// Decodes this field from the frame.
    ///
    /// Temperature is combined as an unsigned 16-bit value; readings below
    /// zero sent by the device as two's complement come out as large
    /// positive numbers (`0xFF9C` decodes to `6543.6`, not `-10.0`).
    pub fn decode(self, reader: &UplinkReader<'_>) -> Result<FieldValue, DecodeError> {
        let value = match self {
            Field::Header => FieldValue::Integer(reader.u8_at(layout::HEADER_OFFSET)?.into()),
            Field::Voltage => FieldValue::Float(
                reader.scaled_u8_at(layout::VOLTAGE_OFFSET, layout::VALUE_SCALE)?,
            ),
            Field::BatteryPct => FieldValue::Integer(reader.u8_at(layout::BATTERY_OFFSET)?.into()),
            Field::Temperature => FieldValue::Float(
                reader.scaled_u16_be_at(layout::TEMPERATURE_RANGE.start, layout::VALUE_SCALE)?,
            ),
            Field::Humidity => FieldValue::Float(
                reader.scaled_u8_at(layout::HUMIDITY_OFFSET, layout::HUMIDITY_SCALE)?,
            ),
            Field::Illuminance => {
                FieldValue::Integer(reader.u16_be_at(layout::ILLUMINANCE_RANGE.start)?.into())
            }
            Field::Pressure => FieldValue::Integer(
                u32::from(reader.u16_be_at(layout::PRESSURE_RANGE.start)?)
                    * layout::PRESSURE_SCALE,
            ),
            Field::Co2 => FieldValue::Integer(reader.u16_be_at(layout::CO2_RANGE.start)?.into()),
        };
        Ok(value)
    }

    /// Raw value the firmware leaves in place when the sensor was not read.
    ///
    /// The firmware pre-fills the whole frame with `0xFF`. Only the header
    /// and the reserved climate fields carry a marker; voltage, battery,
    /// temperature and CO2 are always decoded with their plain formulas.
    pub fn unread_marker(self) -> Option<u16> {
        match self {
            Field::Header | Field::Humidity => Some(layout::UNREAD_U8.into()),
            Field::Illuminance | Field::Pressure => Some(layout::UNREAD_U16),
            _ => None,
        }
    }

    /// Whether the frame holds this field's unread marker.
    pub fn is_unread(self, reader: &UplinkReader<'_>) -> Result<bool, DecodeError> {
        let Some(marker) = self.unread_marker() else {
            return Ok(false);
        };
        let span = self.span();
        let raw = if span.len() == 1 {
            u16::from(reader.u8_at(span.start)?)
        } else {
            reader.u16_be_at(span.start)?
        };
        Ok(raw == marker)
    }
}

fn single(offset: usize) -> std::ops::Range<usize> {
    offset..offset + 1
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| DecodeError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// Decoded value; serializes as a bare JSON number, or `null` when unread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u32),
    Float(f64),
    Unread,
}

impl FieldValue {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(f64::from(value)),
            FieldValue::Float(value) => Some(value),
            FieldValue::Unread => None,
        }
    }

    pub fn as_u32(self) -> Option<u32> {
        match self {
            FieldValue::Integer(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value:.1}"),
            FieldValue::Unread => f.write_str("n/a"),
        }
    }
}

/// Reason the device sent the frame, carried in byte 0.
///
/// # Examples
/// ```
/// use sensorlink_core::HeaderKind;
///
/// assert_eq!(HeaderKind::from(0x02), HeaderKind::ButtonClick);
/// assert_eq!(HeaderKind::from(0x02).to_string(), "BUTTON_CLICK");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Boot,
    Update,
    ButtonClick,
    ButtonHold,
    Unknown(u8),
}

impl From<u8> for HeaderKind {
    fn from(value: u8) -> Self {
        match value {
            layout::HEADER_BOOT => HeaderKind::Boot,
            layout::HEADER_UPDATE => HeaderKind::Update,
            layout::HEADER_BUTTON_CLICK => HeaderKind::ButtonClick,
            layout::HEADER_BUTTON_HOLD => HeaderKind::ButtonHold,
            other => HeaderKind::Unknown(other),
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderKind::Boot => f.write_str("BOOT"),
            HeaderKind::Update => f.write_str("UPDATE"),
            HeaderKind::ButtonClick => f.write_str("BUTTON_CLICK"),
            HeaderKind::ButtonHold => f.write_str("BUTTON_HOLD"),
            HeaderKind::Unknown(value) => write!(f, "UNKNOWN(0x{value:02x})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FieldValue, HeaderKind};
    use crate::payload::layout;
    use crate::payload::reader::UplinkReader;

    fn frame() -> [u8; layout::FRAME_LEN] {
        // header=UPDATE, 3.3 V, 97 %, 23.4 °C, 45.5 %RH, 300 lx, 101320 Pa, 812 ppm
        [
            0x01, 33, 97, 0x00, 0xea, 91, 0x01, 0x2c, 0xc5, 0xe4, 0x03, 0x2c,
        ]
    }

    #[test]
    fn decode_every_field() {
        let frame = frame();
        let reader = UplinkReader::new(&frame).unwrap();
        let decoded: Vec<_> = Field::ALL
            .iter()
            .map(|field| field.decode(&reader).unwrap())
            .collect();
        assert_eq!(
            decoded,
            vec![
                FieldValue::Integer(1),
                FieldValue::Float(3.3),
                FieldValue::Integer(97),
                FieldValue::Float(23.4),
                FieldValue::Float(45.5),
                FieldValue::Integer(300),
                FieldValue::Integer(101_320),
                FieldValue::Integer(812),
            ]
        );
    }

    #[test]
    fn temperature_is_not_sign_extended() {
        let mut frame = [0u8; layout::FRAME_LEN];
        frame[layout::TEMPERATURE_RANGE].copy_from_slice(&[0xff, 0x9c]);
        let reader = UplinkReader::new(&frame).unwrap();
        assert_eq!(
            Field::Temperature.decode(&reader).unwrap(),
            FieldValue::Float(6543.6)
        );
    }

    #[test]
    fn spans_stay_inside_frame() {
        for field in Field::ALL {
            assert!(field.span().end <= layout::FRAME_LEN, "{field}");
        }
    }

    #[test]
    fn parse_names() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        let err = "orientation".parse::<Field>().unwrap_err();
        assert!(err.to_string().contains("unknown field name"));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Field::BatteryPct).unwrap();
        assert_eq!(json, "\"battery_pct\"");
        let field: Field = serde_json::from_str("\"co2\"").unwrap();
        assert_eq!(field, Field::Co2);
    }

    #[test]
    fn values_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&FieldValue::Integer(400)).unwrap(), "400");
        assert_eq!(serde_json::to_string(&FieldValue::Float(10.0)).unwrap(), "10.0");
        assert_eq!(FieldValue::Float(40.0).to_string(), "40.0");
    }

    #[test]
    fn unread_markers_cover_header_and_climate_fields() {
        let frame = [
            0x01, 0x21, 0x61, 0x00, 0xea, 0xff, 0xff, 0xff, 0xff, 0xff, 0x03, 0x2c,
        ];
        let reader = UplinkReader::new(&frame).unwrap();
        for field in [Field::Humidity, Field::Illuminance, Field::Pressure] {
            assert!(field.is_unread(&reader).unwrap(), "{field}");
        }
        for field in [Field::Header, Field::Voltage, Field::Temperature, Field::Co2] {
            assert!(!field.is_unread(&reader).unwrap(), "{field}");
        }

        let mut frame = frame;
        frame[layout::HEADER_OFFSET] = layout::UNREAD_U8;
        let reader = UplinkReader::new(&frame).unwrap();
        assert!(Field::Header.is_unread(&reader).unwrap());
    }

    #[test]
    fn default_fields_have_no_unread_marker() {
        let frame = [0xffu8; layout::FRAME_LEN];
        let reader = UplinkReader::new(&frame).unwrap();
        for field in [Field::Voltage, Field::BatteryPct, Field::Temperature, Field::Co2] {
            assert_eq!(field.unread_marker(), None);
            assert!(!field.is_unread(&reader).unwrap());
        }
        assert_eq!(
            Field::Voltage.decode(&reader).unwrap(),
            FieldValue::Float(25.5)
        );
    }

    #[test]
    fn unread_value_serializes_as_null() {
        assert_eq!(serde_json::to_string(&FieldValue::Unread).unwrap(), "null");
        assert_eq!(FieldValue::Unread.as_f64(), None);
        assert_eq!(FieldValue::Unread.to_string(), "n/a");
    }

    #[test]
    fn header_kinds() {
        assert_eq!(HeaderKind::from(0x00), HeaderKind::Boot);
        assert_eq!(HeaderKind::from(0x03), HeaderKind::ButtonHold);
        assert_eq!(HeaderKind::from(0x7f).to_string(), "UNKNOWN(0x7f)");
    }
}
