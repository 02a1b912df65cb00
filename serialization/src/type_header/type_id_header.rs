use crate::error::{RegistryError, SerializerError};
use crate::message_pack::{MessagePackReader, MessagePackWriter};
use crate::polymorphic::TypeKey;
use crate::serializer_options::SerializerOptions;
use crate::type_header::TypeHeaderStrategy;
use std::collections::HashMap;

/// Writes the header as an integer taken from a caller supplied, one-to-one type table.
#[derive(Debug, Clone)]
pub struct TypeIdHeaderStrategy {
  type_to_id: HashMap<TypeKey, i32>,
  id_to_type: HashMap<i32, TypeKey>,
}

impl TypeIdHeaderStrategy {
  /// Builds the table from `(type, id)` pairs, deriving the reverse direction.
  pub fn new(types: impl IntoIterator<Item = (TypeKey, i32)>) -> Result<Self, RegistryError> {
    let mut type_to_id = HashMap::new();
    let mut id_to_type: HashMap<i32, TypeKey> = HashMap::new();
    for (type_key, type_id) in types {
      if type_to_id.contains_key(&type_key) {
        return Err(RegistryError::DuplicateType {
          type_name: type_key.name().to_string(),
        });
      }
      if let Some(existing) = id_to_type.get(&type_id) {
        return Err(RegistryError::DuplicateTypeId {
          type_id,
          existing: existing.name().to_string(),
          duplicate: type_key.name().to_string(),
        });
      }
      type_to_id.insert(type_key, type_id);
      id_to_type.insert(type_id, type_key);
    }
    Ok(Self { type_to_id, id_to_type })
  }

  /// Accepts both directions from the caller; they must be exact inverses of each other.
  pub fn from_maps(
    type_to_id: HashMap<TypeKey, i32>,
    id_to_type: HashMap<i32, TypeKey>,
  ) -> Result<Self, RegistryError> {
    for (type_key, type_id) in &type_to_id {
      if id_to_type.get(type_id) != Some(type_key) {
        return Err(RegistryError::InconsistentTypeMaps {
          type_name: type_key.name().to_string(),
        });
      }
    }
    if let Some((_, orphan)) = id_to_type
      .iter()
      .find(|(type_id, type_key)| type_to_id.get(*type_key) != Some(*type_id))
    {
      return Err(RegistryError::InconsistentTypeMaps {
        type_name: orphan.name().to_string(),
      });
    }
    Ok(Self { type_to_id, id_to_type })
  }

  pub fn id_of(&self, type_key: TypeKey) -> Option<i32> {
    self.type_to_id.get(&type_key).copied()
  }

  pub fn type_of(&self, type_id: i32) -> Option<TypeKey> {
    self.id_to_type.get(&type_id).copied()
  }

  pub fn len(&self) -> usize {
    self.type_to_id.len()
  }

  pub fn is_empty(&self) -> bool {
    self.type_to_id.is_empty()
  }
}

impl TypeHeaderStrategy for TypeIdHeaderStrategy {
  fn write(
    &self,
    writer: &mut MessagePackWriter,
    type_key: TypeKey,
    _options: &SerializerOptions,
  ) -> Result<(), SerializerError> {
    let type_id = self.id_of(type_key).ok_or_else(|| SerializerError::HeaderEncoding {
      type_name: type_key.name().to_string(),
    })?;
    writer.write_int(i64::from(type_id))
  }

  fn read(&self, reader: &mut MessagePackReader<'_>, _options: &SerializerOptions) -> Result<TypeKey, SerializerError> {
    let type_id = reader.read_int32()?;
    self
      .type_of(type_id)
      .ok_or(SerializerError::HeaderDecoding { type_id })
  }
}
