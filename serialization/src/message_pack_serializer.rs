use crate::error::SerializerError;
use crate::message_pack::{MessagePackReader, MessagePackWriter};
use crate::resolver::SerializerResolverExt;
use crate::serializer::Serializer;
use crate::serializer_options::SerializerOptions;
use std::sync::Arc;

fn resolve<T: 'static>(options: &SerializerOptions) -> Result<Arc<dyn Serializer<T>>, SerializerError> {
  options
    .resolver()
    .get_serializer::<T>()
    .ok_or_else(|| SerializerError::MissingSerializer {
      type_name: std::any::type_name::<T>().to_string(),
    })
}

/// Serializes `value` with the serializer the options' resolver returns for `T`.
pub fn serialize<T: 'static>(value: &T, options: &SerializerOptions) -> Result<Vec<u8>, SerializerError> {
  let serializer = resolve::<T>(options)?;
  let mut writer = MessagePackWriter::new();
  serializer.serialize(&mut writer, value, options)?;
  Ok(writer.into_inner())
}

pub fn deserialize<T: 'static>(bytes: &[u8], options: &SerializerOptions) -> Result<T, SerializerError> {
  let serializer = resolve::<T>(options)?;
  let mut reader = MessagePackReader::new(bytes);
  serializer.deserialize(&mut reader, options)
}

/// Renders any MessagePack buffer as JSON, for logs and test diagnostics.
pub fn to_json(bytes: &[u8]) -> Result<serde_json::Value, SerializerError> {
  rmp_serde::from_slice::<serde_json::Value>(bytes).map_err(SerializerError::decode)
}
