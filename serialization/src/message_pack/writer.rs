use crate::error::SerializerError;
use rmp::encode;

/// Growable MessagePack output buffer.
#[derive(Debug, Clone, Default)]
pub struct MessagePackWriter {
  buf: Vec<u8>,
}

impl MessagePackWriter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      buf: Vec::with_capacity(capacity),
    }
  }

  pub fn write_nil(&mut self) -> Result<(), SerializerError> {
    encode::write_nil(&mut self.buf).map_err(SerializerError::encode)
  }

  pub fn write_array_header(&mut self, len: u32) -> Result<(), SerializerError> {
    encode::write_array_len(&mut self.buf, len)
      .map(|_| ())
      .map_err(SerializerError::encode)
  }

  pub fn write_int(&mut self, value: i64) -> Result<(), SerializerError> {
    encode::write_sint(&mut self.buf, value)
      .map(|_| ())
      .map_err(SerializerError::encode)
  }

  pub fn write_bool(&mut self, value: bool) -> Result<(), SerializerError> {
    encode::write_bool(&mut self.buf, value).map_err(SerializerError::encode)
  }

  pub fn write_string(&mut self, value: &str) -> Result<(), SerializerError> {
    encode::write_str(&mut self.buf, value).map_err(SerializerError::encode)
  }

  /// Writes already UTF-8 encoded bytes with a `str` header.
  pub fn write_string_bytes(&mut self, value: &[u8]) -> Result<(), SerializerError> {
    let len = u32::try_from(value.len()).map_err(SerializerError::encode)?;
    encode::write_str_len(&mut self.buf, len).map_err(SerializerError::encode)?;
    self.buf.extend_from_slice(value);
    Ok(())
  }

  /// Appends bytes that already form complete MessagePack values.
  pub(crate) fn write_raw(&mut self, encoded: &[u8]) {
    self.buf.extend_from_slice(encoded);
  }

  pub(crate) fn inner_mut(&mut self) -> &mut Vec<u8> {
    &mut self.buf
  }

  pub fn len(&self) -> usize {
    self.buf.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buf.is_empty()
  }

  pub fn as_slice(&self) -> &[u8] {
    &self.buf
  }

  pub fn into_inner(self) -> Vec<u8> {
    self.buf
  }
}
