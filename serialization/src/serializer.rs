use crate::error::SerializerError;
use crate::message_pack::{MessagePackReader, MessagePackWriter};
use crate::polymorphic::{Polymorphic, TypeKey};
use crate::resolver::{SerializerResolver, SerializerResolverExt};
use crate::serializer_options::SerializerOptions;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;


/// Ordinary, statically typed serializer for `T`.
pub trait Serializer<T>: Send + Sync {
  fn serialize(
    &self,
    writer: &mut MessagePackWriter,
    value: &T,
    options: &SerializerOptions,
  ) -> Result<(), SerializerError>;

  fn deserialize(&self, reader: &mut MessagePackReader<'_>, options: &SerializerOptions) -> Result<T, SerializerError>;
}

/// Serializer bound to one concrete [`Polymorphic`] type, callable through the base type.
pub trait SerializerAny: Send + Sync {
  fn type_key(&self) -> TypeKey;

  fn serialize_any(
    &self,
    writer: &mut MessagePackWriter,
    value: &dyn Polymorphic,
    options: &SerializerOptions,
  ) -> Result<(), SerializerError>;

  fn deserialize_any(
    &self,
    reader: &mut MessagePackReader<'_>,
    options: &SerializerOptions,
  ) -> Result<Arc<dyn Polymorphic>, SerializerError>;
}

struct BoundSerializer<T> {
  inner: Arc<dyn Serializer<T>>,
}

impl<T: Polymorphic> SerializerAny for BoundSerializer<T> {
  fn type_key(&self) -> TypeKey {
    TypeKey::of::<T>()
  }

  fn serialize_any(
    &self,
    writer: &mut MessagePackWriter,
    value: &dyn Polymorphic,
    options: &SerializerOptions,
  ) -> Result<(), SerializerError> {
    let value = value
      .downcast_ref::<T>()
      .ok_or_else(|| SerializerError::TypeMismatch {
        expected: std::any::type_name::<T>().to_string(),
      })?;
    self.inner.serialize(writer, value, options)
  }

  fn deserialize_any(
    &self,
    reader: &mut MessagePackReader<'_>,
    options: &SerializerOptions,
  ) -> Result<Arc<dyn Polymorphic>, SerializerError> {
    self
      .inner
      .deserialize(reader, options)
      .map(|value| Arc::new(value) as Arc<dyn Polymorphic>)
  }
}

pub(crate) fn bind_serializer<T: Polymorphic>(resolver: &dyn SerializerResolver) -> Option<Arc<dyn SerializerAny>> {
  resolver
    .get_serializer::<T>()
    .map(|inner| Arc::new(BoundSerializer { inner }) as Arc<dyn SerializerAny>)
}

/// Serializer for any serde type, encoded with `rmp-serde` in its compact array layout.
pub struct SerdeSerializer<T> {
  _phantom: PhantomData<fn() -> T>,
}

impl<T> SerdeSerializer<T> {
  pub fn new() -> Self {
    Self { _phantom: PhantomData }
  }
}

impl<T> Default for SerdeSerializer<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Serialize + DeserializeOwned> Serializer<T> for SerdeSerializer<T> {
  fn serialize(
    &self,
    writer: &mut MessagePackWriter,
    value: &T,
    _options: &SerializerOptions,
  ) -> Result<(), SerializerError> {
    rmp_serde::encode::write(writer.inner_mut(), value).map_err(SerializerError::encode)
  }

  fn deserialize(&self, reader: &mut MessagePackReader<'_>, _options: &SerializerOptions) -> Result<T, SerializerError> {
    rmp_serde::from_read(reader.inner_mut()).map_err(SerializerError::decode)
  }
}

/// Array of `T`, with the element serializer looked up once per call from the options' resolver.
pub struct VecSerializer<T> {
  _phantom: PhantomData<fn() -> T>,
}

impl<T> VecSerializer<T> {
  pub fn new() -> Self {
    Self { _phantom: PhantomData }
  }
}

impl<T> Default for VecSerializer<T> {
  fn default() -> Self {
    Self::new()
  }
}

fn element_serializer<T: 'static>(options: &SerializerOptions) -> Result<Arc<dyn Serializer<T>>, SerializerError> {
  options
    .resolver()
    .get_serializer::<T>()
    .ok_or_else(|| SerializerError::MissingSerializer {
      type_name: std::any::type_name::<T>().to_string(),
    })
}

impl<T: 'static> Serializer<Vec<T>> for VecSerializer<T> {
  fn serialize(
    &self,
    writer: &mut MessagePackWriter,
    value: &Vec<T>,
    options: &SerializerOptions,
  ) -> Result<(), SerializerError> {
    let element = element_serializer::<T>(options)?;
    let len = u32::try_from(value.len()).map_err(SerializerError::encode)?;
    writer.write_array_header(len)?;
    for item in value {
      element.serialize(writer, item, options)?;
    }
    Ok(())
  }

  fn deserialize(
    &self,
    reader: &mut MessagePackReader<'_>,
    options: &SerializerOptions,
  ) -> Result<Vec<T>, SerializerError> {
    let element = element_serializer::<T>(options)?;
    let len = reader.read_array_header()? as usize;
    // capped by the remaining input
    let mut result = Vec::with_capacity(len.min(reader.remaining().len()));
    for _ in 0..len {
      result.push(element.deserialize(reader, options)?);
    }
    Ok(result)
  }
}
