use crate::resolver::SerializerResolver;
use crate::serializer::{bind_serializer, SerializerAny};
use std::any::{Any, TypeId};
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The abstract base of every value that travels inside an envelope.
///
/// Usually implemented with `#[derive(Polymorphic)]`.
pub trait Polymorphic: Debug + Send + Sync + 'static {
  fn eq_polymorphic(&self, other: &dyn Polymorphic) -> bool;
  fn as_any(&self) -> &(dyn Any + Send + Sync + 'static);

  /// Token of the runtime concrete type.
  fn type_key(&self) -> TypeKey;
}

impl dyn Polymorphic {
  pub fn is<T: Polymorphic>(&self) -> bool {
    self.as_any().is::<T>()
  }

  pub fn downcast_ref<T: Polymorphic>(&self) -> Option<&T> {
    self.as_any().downcast_ref::<T>()
  }
}

impl PartialEq for dyn Polymorphic {
  fn eq(&self, other: &Self) -> bool {
    self.eq_polymorphic(other)
  }
}

/// A base-typed slot. `None` is the absence sentinel and is written as MessagePack nil.
pub type PolymorphicRef = Option<Arc<dyn Polymorphic>>;

type BindFn = fn(&dyn SerializerResolver) -> Option<Arc<dyn SerializerAny>>;

/// Explicit type token for a concrete [`Polymorphic`] type.
///
/// Carries the canonical name and a binder that asks a resolver for the typed serializer of
/// exactly this type, so dispatch never needs runtime reflection. Equality and hashing use
/// the `TypeId` only.
#[derive(Clone, Copy)]
pub struct TypeKey {
  type_id: TypeId,
  name: &'static str,
  bind: BindFn,
}

impl TypeKey {
  pub fn of<T: Polymorphic>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
      bind: bind_serializer::<T>,
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  /// Fully-qualified name, as reported by `std::any::type_name`.
  pub fn name(&self) -> &'static str {
    self.name
  }

  pub(crate) fn bind(&self, resolver: &dyn SerializerResolver) -> Option<Arc<dyn SerializerAny>> {
    (self.bind)(resolver)
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl Debug for TypeKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("TypeKey").field(&self.name).finish()
  }
}

impl Display for TypeKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name)
  }
}
