use crate::error::RegistryError;
use crate::polymorphic::{Polymorphic, TypeKey};
use once_cell::sync::Lazy;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A named group of concrete types that name based headers can resolve to.
///
/// Subtypes contributed by one crate or feature are usually registered together as one module
/// at startup through [`register_type_module`].
#[derive(Debug, Clone)]
pub struct TypeModule {
  name: String,
  types: HashMap<&'static str, TypeKey>,
  // distinct types reporting the same name; such a module can't be registered
  ambiguous: Vec<&'static str>,
}

impl TypeModule {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      types: HashMap::new(),
      ambiguous: Vec::new(),
    }
  }

  pub fn with_type<T: Polymorphic>(mut self) -> Self {
    let type_key = TypeKey::of::<T>();
    match self.types.entry(type_key.name()) {
      Entry::Occupied(existing) if *existing.get() != type_key => self.ambiguous.push(type_key.name()),
      Entry::Occupied(_) => {}
      Entry::Vacant(entry) => {
        entry.insert(type_key);
      }
    }
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn find_type(&self, type_name: &str) -> Option<TypeKey> {
    self.types.get(type_name).copied()
  }

  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }
}

static TYPE_MODULES: Lazy<RwLock<Vec<Arc<TypeModule>>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// Makes a module visible to name resolution for the rest of the process.
///
/// Module names are unique; registering a second module under a taken name fails, as does a
/// module holding two distinct types with the same name.
pub fn register_type_module(module: TypeModule) -> Result<(), RegistryError> {
  if let Some(type_name) = module.ambiguous.first() {
    return Err(RegistryError::AmbiguousTypeName {
      module: module.name.clone(),
      type_name: type_name.to_string(),
    });
  }
  let mut modules = TYPE_MODULES.write().unwrap_or_else(PoisonError::into_inner);
  if modules.iter().any(|registered| registered.name == module.name) {
    return Err(RegistryError::DuplicateModule { name: module.name });
  }
  tracing::debug!(
    "Registering type module: name = {}, types = {}",
    module.name,
    module.types.len()
  );
  modules.push(Arc::new(module));
  Ok(())
}

pub(crate) fn registered_modules() -> Vec<Arc<TypeModule>> {
  TYPE_MODULES.read().unwrap_or_else(PoisonError::into_inner).clone()
}
