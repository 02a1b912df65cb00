use crate::error::SerializerError;
use rmp::{decode, Marker};

/// Cursor over a MessagePack buffer.
///
/// Besides the read position it tracks the current object graph depth, which nested
/// envelopes step through [`MessagePackReader::depth_step`] and [`MessagePackReader::depth_leave`].
#[derive(Debug, Clone)]
pub struct MessagePackReader<'a> {
  buf: &'a [u8],
  depth: usize,
}

impl<'a> MessagePackReader<'a> {
  pub fn new(buf: &'a [u8]) -> Self {
    Self { buf, depth: 0 }
  }

  pub fn remaining(&self) -> &'a [u8] {
    self.buf
  }

  pub fn is_empty(&self) -> bool {
    self.buf.is_empty()
  }

  pub fn depth(&self) -> usize {
    self.depth
  }

  pub fn peek_is_nil(&self) -> bool {
    matches!(self.buf.first().map(|b| Marker::from_u8(*b)), Some(Marker::Null))
  }

  /// Consumes a nil marker if one is next.
  pub fn try_read_nil(&mut self) -> bool {
    if self.peek_is_nil() {
      self.buf = &self.buf[1..];
      true
    } else {
      false
    }
  }

  pub fn read_nil(&mut self) -> Result<(), SerializerError> {
    decode::read_nil(&mut self.buf).map_err(SerializerError::decode)
  }

  pub fn read_array_header(&mut self) -> Result<u32, SerializerError> {
    decode::read_array_len(&mut self.buf).map_err(SerializerError::decode)
  }

  pub fn read_int32(&mut self) -> Result<i32, SerializerError> {
    decode::read_int::<i32, _>(&mut self.buf).map_err(SerializerError::decode)
  }

  pub fn read_int64(&mut self) -> Result<i64, SerializerError> {
    decode::read_int::<i64, _>(&mut self.buf).map_err(SerializerError::decode)
  }

  pub fn read_bool(&mut self) -> Result<bool, SerializerError> {
    decode::read_bool(&mut self.buf).map_err(SerializerError::decode)
  }

  /// Reads a `str` value and returns its raw UTF-8 bytes without validating them.
  pub fn read_string_bytes(&mut self) -> Result<&'a [u8], SerializerError> {
    let len = decode::read_str_len(&mut self.buf).map_err(SerializerError::decode)? as usize;
    if self.buf.len() < len {
      return Err(SerializerError::decode(format!(
        "string of {} bytes exceeds the {} remaining bytes",
        len,
        self.buf.len()
      )));
    }
    let (head, tail) = self.buf.split_at(len);
    self.buf = tail;
    Ok(head)
  }

  pub fn read_string(&mut self) -> Result<&'a str, SerializerError> {
    let bytes = self.read_string_bytes()?;
    std::str::from_utf8(bytes).map_err(SerializerError::decode)
  }

  /// Enters one more level of nesting, failing when `max_depth` would be exceeded.
  pub fn depth_step(&mut self, max_depth: usize) -> Result<(), SerializerError> {
    if self.depth >= max_depth {
      return Err(SerializerError::DepthExceeded { max_depth });
    }
    self.depth += 1;
    Ok(())
  }

  pub fn depth_leave(&mut self) {
    self.depth = self.depth.saturating_sub(1);
  }

  pub(crate) fn inner_mut(&mut self) -> &mut &'a [u8] {
    &mut self.buf
  }
}
