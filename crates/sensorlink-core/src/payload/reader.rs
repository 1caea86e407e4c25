use super::error::DecodeError;
use super::layout;

/// Bounds-checked view over an uplink frame.
///
/// Construction fails unless the whole frame is present, so every read at a
/// layout offset is in range; the per-read checks only guard offsets that
/// come from outside `layout`.
pub struct UplinkReader<'a> {
    frame: &'a [u8],
}

impl<'a> UplinkReader<'a> {
    /// Wraps `payload`, keeping only the first [`layout::FRAME_LEN`] bytes.
    pub fn new(payload: &'a [u8]) -> Result<Self, DecodeError> {
        let frame = payload
            .get(..layout::FRAME_LEN)
            .ok_or(DecodeError::TruncatedPayload {
                needed: layout::FRAME_LEN,
                actual: payload.len(),
            })?;
        Ok(Self { frame })
    }

    fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N], DecodeError> {
        let end = offset + N;
        self.frame
            .get(offset..end)
            .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
            .ok_or(DecodeError::TruncatedPayload {
                needed: end,
                actual: self.frame.len(),
            })
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8, DecodeError> {
        let [value] = self.bytes::<1>(offset)?;
        Ok(value)
    }

    /// Big-endian: the byte at `offset` is the high byte.
    pub fn u16_be_at(&self, offset: usize) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.bytes::<2>(offset)?))
    }

    /// One-byte fixed-point value divided by `scale`.
    pub fn scaled_u8_at(&self, offset: usize, scale: f64) -> Result<f64, DecodeError> {
        Ok(f64::from(self.u8_at(offset)?) / scale)
    }

    /// Unsigned big-endian 16-bit value divided by `scale`. No sign extension.
    pub fn scaled_u16_be_at(&self, offset: usize, scale: f64) -> Result<f64, DecodeError> {
        Ok(f64::from(self.u16_be_at(offset)?) / scale)
    }
}
