//! Unionless polymorphic serialization.
//!
//! Values held behind `Arc<dyn Polymorphic>` are written as a two element MessagePack array
//! `[type header, payload]`. The header is produced by a pluggable [`TypeHeaderStrategy`]
//! (numeric ids or type names) and the payload by the concrete type's own [`Serializer`],
//! so no central union table has to list every subtype.

mod dispatch_cache;
pub mod envelope;
pub mod error;
pub mod message_pack;
pub mod message_pack_serializer;
pub mod polymorphic;
pub mod resolver;
pub mod serializer;
pub mod serializer_option;
pub mod serializer_options;
pub mod type_header;
pub mod type_policy;

#[cfg(test)]
mod test_fixtures;

pub use envelope::EnvelopeSerializer;
pub use error::{RegistryError, SerializerError};
pub use message_pack::{MessagePackReader, MessagePackWriter};
pub use message_pack_serializer::{deserialize, serialize, to_json};
pub use polymorphic::{Polymorphic, PolymorphicRef, TypeKey};
pub use resolver::{
  CompositeResolver, InMemorySerializerResolver, PolymorphicResolver, SerializerResolver, SerializerResolverExt,
  StandardResolver,
};
pub use serializer::{SerdeSerializer, Serializer, SerializerAny, VecSerializer};
pub use serializer_option::SerializerOption;
pub use serializer_options::{SerializerOptions, DEFAULT_MAX_DEPTH};
pub use type_header::{
  register_type_module, TypeHeaderStrategy, TypeIdHeaderStrategy, TypeModule, TypeNameHeaderStrategy,
};
pub use type_policy::TypePolicy;

// Re-exports for derive macros
pub use nexus_polymorphic_derive_rs::Polymorphic;
