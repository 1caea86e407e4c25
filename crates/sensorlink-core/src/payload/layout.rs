pub const HEADER_OFFSET: usize = 0;
pub const VOLTAGE_OFFSET: usize = 1;
pub const BATTERY_OFFSET: usize = 2;
pub const TEMPERATURE_RANGE: std::ops::Range<usize> = 3..5;
pub const HUMIDITY_OFFSET: usize = 5;
pub const ILLUMINANCE_RANGE: std::ops::Range<usize> = 6..8;
pub const PRESSURE_RANGE: std::ops::Range<usize> = 8..10;
pub const CO2_RANGE: std::ops::Range<usize> = 10..12;

pub const FRAME_LEN: usize = CO2_RANGE.end;

/// Fixed-point divisor for voltage and temperature (one implied decimal).
pub const VALUE_SCALE: f64 = 10.0;
/// Humidity is transmitted in half-percent steps.
pub const HUMIDITY_SCALE: f64 = 2.0;
/// Pressure is transmitted in units of 2 Pa.
pub const PRESSURE_SCALE: u32 = 2;

pub const HEADER_BOOT: u8 = 0x00;
pub const HEADER_UPDATE: u8 = 0x01;
pub const HEADER_BUTTON_CLICK: u8 = 0x02;
pub const HEADER_BUTTON_HOLD: u8 = 0x03;

/// Fill value for sensors the firmware did not read.
pub const UNREAD_U8: u8 = 0xff;
pub const UNREAD_U16: u16 = 0xffff;
