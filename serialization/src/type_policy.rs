use crate::polymorphic::TypeKey;
use std::collections::HashSet;

/// Decides which concrete types may be materialized while deserializing.
///
/// A type passes when it is not denied and, if an allow-list is set, appears in it.
#[derive(Debug, Clone, Default)]
pub struct TypePolicy {
  allowed: Option<HashSet<TypeKey>>,
  denied: HashSet<TypeKey>,
}

impl TypePolicy {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn allow_only(types: impl IntoIterator<Item = TypeKey>) -> Self {
    Self {
      allowed: Some(types.into_iter().collect()),
      denied: HashSet::new(),
    }
  }

  pub fn allow(mut self, type_key: TypeKey) -> Self {
    self.allowed.get_or_insert_with(HashSet::new).insert(type_key);
    self
  }

  pub fn deny(mut self, type_key: TypeKey) -> Self {
    self.denied.insert(type_key);
    self
  }

  pub fn is_allowed(&self, type_key: TypeKey) -> bool {
    if self.denied.contains(&type_key) {
      return false;
    }
    self
      .allowed
      .as_ref()
      .map_or(true, |allowed| allowed.contains(&type_key))
  }
}
