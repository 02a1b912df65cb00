//! Memo of bound per-type serializers.
//!
//! Resolving "the serializer of concrete type X" may walk a chain of resolvers. The first
//! envelope call per type does that walk and binds the typed serializer behind a
//! [`SerializerAny`]; later calls reuse the bound object. A cache belongs to one resolver:
//! every options value derived without replacing the resolver shares it, and it is dropped
//! with the last of them.

use crate::error::SerializerError;
use crate::polymorphic::TypeKey;
use crate::serializer::SerializerAny;
use crate::serializer_options::SerializerOptions;
use dashmap::DashMap;
use std::any::TypeId;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct DispatchCache {
  bound: DashMap<TypeId, Arc<dyn SerializerAny>>,
}

impl DispatchCache {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.bound.len()
  }
}

impl Debug for DispatchCache {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DispatchCache").field("len", &self.bound.len()).finish()
  }
}

pub(crate) fn bound_serializer(
  options: &SerializerOptions,
  type_key: TypeKey,
) -> Result<Arc<dyn SerializerAny>, SerializerError> {
  let cache = options.dispatch_cache();
  if let Some(bound) = cache.bound.get(&type_key.type_id()) {
    return Ok(bound.value().clone());
  }

  // No shard lock may be held here: binding calls into the resolver.
  let bound = type_key
    .bind(options.resolver())
    .ok_or_else(|| SerializerError::MissingSerializer {
      type_name: type_key.name().to_string(),
    })?;
  tracing::debug!("Binding serializer: type_name = {}", type_key.name());
  Ok(cache.bound.entry(type_key.type_id()).or_insert(bound).value().clone())
}

#[cfg(test)]
pub(crate) fn is_bound(options: &SerializerOptions, type_key: TypeKey) -> bool {
  options.dispatch_cache().bound.contains_key(&type_key.type_id())
}
