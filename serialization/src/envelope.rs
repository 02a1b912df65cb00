use crate::dispatch_cache;
use crate::error::SerializerError;
use crate::message_pack::{MessagePackReader, MessagePackWriter};
use crate::polymorphic::{Polymorphic, PolymorphicRef};
use crate::serializer::Serializer;
use crate::serializer_options::SerializerOptions;
use std::sync::Arc;


const ENVELOPE_LEN: u32 = 2;

/// Serializer of the base slot type: writes `[type header, payload]`.
///
/// The header comes from the options' [`TypeHeaderStrategy`](crate::TypeHeaderStrategy), the
/// payload from the concrete type's own serializer. `None` is written as a bare nil.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeSerializer;

impl EnvelopeSerializer {
  pub fn new() -> Self {
    Self
  }

  fn deserialize_envelope(
    &self,
    reader: &mut MessagePackReader<'_>,
    options: &SerializerOptions,
  ) -> Result<Arc<dyn Polymorphic>, SerializerError> {
    let count = reader.read_array_header()?;
    if count != ENVELOPE_LEN {
      return Err(SerializerError::MalformedEnvelope { count });
    }

    let strategy = options.require_type_header_strategy()?;
    let type_key = strategy.read(reader, options)?;
    options.ensure_type_allowed(type_key)?;

    let bound = dispatch_cache::bound_serializer(options, type_key)?;
    bound.deserialize_any(reader, options)
  }
}

impl Serializer<PolymorphicRef> for EnvelopeSerializer {
  fn serialize(
    &self,
    writer: &mut MessagePackWriter,
    value: &PolymorphicRef,
    options: &SerializerOptions,
  ) -> Result<(), SerializerError> {
    let Some(value) = value else {
      return writer.write_nil();
    };

    let strategy = options.require_type_header_strategy()?;
    writer.write_array_header(ENVELOPE_LEN)?;

    let type_key = value.type_key();
    strategy.write(writer, type_key, options)?;

    let bound = dispatch_cache::bound_serializer(options, type_key)?;
    bound.serialize_any(writer, &**value, options)
  }

  fn deserialize(
    &self,
    reader: &mut MessagePackReader<'_>,
    options: &SerializerOptions,
  ) -> Result<PolymorphicRef, SerializerError> {
    if reader.try_read_nil() {
      return Ok(None);
    }

    reader.depth_step(options.max_depth())?;
    let result = self.deserialize_envelope(reader, options);
    reader.depth_leave();
    result.map(Some)
  }
}
