use crate::error::SerializerError;
use crate::message_pack::{MessagePackReader, MessagePackWriter};
use crate::polymorphic::TypeKey;
use crate::serializer_options::SerializerOptions;
use crate::type_header::type_module::{registered_modules, TypeModule};
use crate::type_header::TypeHeaderStrategy;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::{Arc, PoisonError, RwLock};

// Complete `str` values (marker, length and UTF-8 bytes) keyed by type.
static TYPE_TO_NAME: Lazy<DashMap<TypeId, Arc<[u8]>>> = Lazy::new(DashMap::new);
static NAME_TO_TYPE: Lazy<DashMap<Box<[u8]>, TypeKey>> = Lazy::new(DashMap::new);
// Implementations of a base type tend to live in a handful of modules; try those first.
static PREFERRED_MODULES: Lazy<RwLock<Vec<Arc<TypeModule>>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// Writes the header as the fully-qualified type name.
///
/// Needs no up-front id table: any type contained in a registered [`TypeModule`] can be read
/// back. Names are encoded once per type and resolved once per name, both process-wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeNameHeaderStrategy;

impl TypeNameHeaderStrategy {
  pub fn new() -> Self {
    Self
  }
}

fn encoded_name(type_key: TypeKey) -> Result<Arc<[u8]>, SerializerError> {
  if let Some(encoded) = TYPE_TO_NAME.get(&type_key.type_id()) {
    return Ok(encoded.value().clone());
  }
  let mut writer = MessagePackWriter::new();
  writer.write_string(type_key.name())?;
  let encoded: Arc<[u8]> = writer.into_inner().into();
  tracing::trace!("Caching encoded type name: type_name = {}", type_key.name());
  Ok(TYPE_TO_NAME.entry(type_key.type_id()).or_insert(encoded).value().clone())
}

fn remember(name: &[u8], type_key: TypeKey) -> TypeKey {
  *NAME_TO_TYPE.entry(Box::from(name)).or_insert(type_key).value()
}

fn prefer_module(module: &Arc<TypeModule>) {
  let mut preferred = PREFERRED_MODULES.write().unwrap_or_else(PoisonError::into_inner);
  if !preferred.iter().any(|m| m.name() == module.name()) {
    tracing::debug!("Preferring type module: name = {}", module.name());
    preferred.push(module.clone());
  }
}

fn resolve_type_name(name_bytes: &[u8]) -> Result<TypeKey, SerializerError> {
  if let Some(type_key) = NAME_TO_TYPE.get(name_bytes) {
    return Ok(*type_key.value());
  }

  let name = std::str::from_utf8(name_bytes).map_err(SerializerError::decode)?;
  let preferred = PREFERRED_MODULES
    .read()
    .unwrap_or_else(PoisonError::into_inner)
    .clone();

  for module in &preferred {
    if let Some(type_key) = module.find_type(name) {
      return Ok(remember(name_bytes, type_key));
    }
  }

  tracing::debug!("Scanning all type modules: type_name = {}", name);
  for module in registered_modules()
    .iter()
    .filter(|module| !preferred.iter().any(|p| p.name() == module.name()))
  {
    if let Some(type_key) = module.find_type(name) {
      let type_key = remember(name_bytes, type_key);
      prefer_module(module);
      return Ok(type_key);
    }
  }

  Err(SerializerError::UnresolvedTypeName { name: name.to_string() })
}

impl TypeHeaderStrategy for TypeNameHeaderStrategy {
  fn write(
    &self,
    writer: &mut MessagePackWriter,
    type_key: TypeKey,
    _options: &SerializerOptions,
  ) -> Result<(), SerializerError> {
    let encoded = encoded_name(type_key)?;
    writer.write_raw(&encoded);
    Ok(())
  }

  fn read(&self, reader: &mut MessagePackReader<'_>, _options: &SerializerOptions) -> Result<TypeKey, SerializerError> {
    let name = reader.read_string_bytes()?;
    resolve_type_name(name)
  }
}

#[cfg(test)]
pub(crate) fn preferred_module_names() -> Vec<String> {
  PREFERRED_MODULES
    .read()
    .unwrap_or_else(PoisonError::into_inner)
    .iter()
    .map(|module| module.name().to_string())
    .collect()
}

#[cfg(test)]
pub(crate) fn clear_caches() {
  TYPE_TO_NAME.clear();
  NAME_TO_TYPE.clear();
  PREFERRED_MODULES
    .write()
    .unwrap_or_else(PoisonError::into_inner)
    .clear();
}
