use crate::envelope::EnvelopeSerializer;
use crate::error::RegistryError;
use crate::polymorphic::PolymorphicRef;
use crate::serializer::{SerdeSerializer, Serializer, VecSerializer};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::{Any, TypeId};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;


/// Maps a type to its ordinary serializer.
///
/// Implementations return the `Arc<dyn Serializer<T>>` for `T` erased behind `Any`; callers
/// use [`SerializerResolverExt::get_serializer`] to get it back typed.
pub trait SerializerResolver: Debug + Send + Sync {
  fn get_serializer_dynamic(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>>;
}

pub trait SerializerResolverExt {
  fn get_serializer<T: 'static>(&self) -> Option<Arc<dyn Serializer<T>>>;
}

impl<R: SerializerResolver + ?Sized> SerializerResolverExt for R {
  fn get_serializer<T: 'static>(&self) -> Option<Arc<dyn Serializer<T>>> {
    self
      .get_serializer_dynamic(TypeId::of::<T>())
      .and_then(|s| s.downcast::<Arc<dyn Serializer<T>>>().ok())
      .map(|arc| arc.as_ref().clone())
  }
}

fn erase<T: 'static>(serializer: Arc<dyn Serializer<T>>) -> Arc<dyn Any + Send + Sync> {
  Arc::new(serializer)
}

struct RegisteredSerializer {
  type_name: &'static str,
  serializer: Arc<dyn Any + Send + Sync>,
}

/// Resolver backed by a concurrent map of registered serializers.
#[derive(Clone, Default)]
pub struct InMemorySerializerResolver {
  serializers: Arc<DashMap<TypeId, RegisteredSerializer>>,
}

impl InMemorySerializerResolver {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers the serializer for `T`. A second registration for the same type is rejected.
  pub fn register<T: 'static>(&self, serializer: Arc<dyn Serializer<T>>) -> Result<(), RegistryError> {
    let type_name = std::any::type_name::<T>();
    match self.serializers.entry(TypeId::of::<T>()) {
      Entry::Occupied(_) => Err(RegistryError::DuplicateSerializer {
        type_name: type_name.to_string(),
      }),
      Entry::Vacant(entry) => {
        tracing::debug!("Registering serializer: type_name = {}", type_name);
        entry.insert(RegisteredSerializer {
          type_name,
          serializer: erase(serializer),
        });
        Ok(())
      }
    }
  }

  pub fn register_serde<T>(&self) -> Result<(), RegistryError>
  where
    T: Serialize + DeserializeOwned + 'static, {
    self.register::<T>(Arc::new(SerdeSerializer::<T>::new()))
  }

  fn put_serde<T>(&self)
  where
    T: Serialize + DeserializeOwned + 'static, {
    self.serializers.insert(
      TypeId::of::<T>(),
      RegisteredSerializer {
        type_name: std::any::type_name::<T>(),
        serializer: erase::<T>(Arc::new(SerdeSerializer::<T>::new())),
      },
    );
  }

  pub fn len(&self) -> usize {
    self.serializers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.serializers.is_empty()
  }
}

impl Debug for InMemorySerializerResolver {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_set()
      .entries(self.serializers.iter().map(|entry| entry.value().type_name))
      .finish()
  }
}

impl SerializerResolver for InMemorySerializerResolver {
  fn get_serializer_dynamic(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
    self.serializers.get(&type_id).map(|entry| entry.serializer.clone())
  }
}

/// Asks each resolver in order and returns the first hit.
#[derive(Debug, Clone)]
pub struct CompositeResolver {
  resolvers: Vec<Arc<dyn SerializerResolver>>,
}

impl CompositeResolver {
  pub fn new(resolvers: impl IntoIterator<Item = Arc<dyn SerializerResolver>>) -> Self {
    Self {
      resolvers: resolvers.into_iter().collect(),
    }
  }
}

impl SerializerResolver for CompositeResolver {
  fn get_serializer_dynamic(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
    self
      .resolvers
      .iter()
      .find_map(|resolver| resolver.get_serializer_dynamic(type_id))
  }
}

static ENVELOPE_SERIALIZER: Lazy<Arc<dyn Any + Send + Sync>> =
  Lazy::new(|| erase::<PolymorphicRef>(Arc::new(EnvelopeSerializer::new())));
static ENVELOPE_VEC_SERIALIZER: Lazy<Arc<dyn Any + Send + Sync>> =
  Lazy::new(|| erase::<Vec<PolymorphicRef>>(Arc::new(VecSerializer::<PolymorphicRef>::new())));

/// Serves the envelope serializer for base-typed slots (`PolymorphicRef` and `Vec<PolymorphicRef>`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PolymorphicResolver;

impl SerializerResolver for PolymorphicResolver {
  fn get_serializer_dynamic(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
    if type_id == TypeId::of::<PolymorphicRef>() {
      Some(ENVELOPE_SERIALIZER.clone())
    } else if type_id == TypeId::of::<Vec<PolymorphicRef>>() {
      Some(ENVELOPE_VEC_SERIALIZER.clone())
    } else {
      None
    }
  }
}

static STANDARD_SERIALIZERS: Lazy<InMemorySerializerResolver> = Lazy::new(|| {
  let resolver = InMemorySerializerResolver::new();
  resolver.put_serde::<bool>();
  resolver.put_serde::<i8>();
  resolver.put_serde::<i16>();
  resolver.put_serde::<i32>();
  resolver.put_serde::<i64>();
  resolver.put_serde::<u8>();
  resolver.put_serde::<u16>();
  resolver.put_serde::<u32>();
  resolver.put_serde::<u64>();
  resolver.put_serde::<f32>();
  resolver.put_serde::<f64>();
  resolver.put_serde::<String>();
  resolver.put_serde::<Option<String>>();
  resolver.put_serde::<Option<i64>>();
  resolver.put_serde::<Vec<String>>();
  resolver.put_serde::<Vec<i64>>();
  resolver
});

/// Process-wide serializers for primitive types.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolver;

impl SerializerResolver for StandardResolver {
  fn get_serializer_dynamic(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
    STANDARD_SERIALIZERS.get_serializer_dynamic(type_id)
  }
}
