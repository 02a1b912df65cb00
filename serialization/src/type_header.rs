//! Strategies for writing "which concrete type is this" in front of a payload.

mod type_id_header;
mod type_module;
mod type_name_header;

pub use self::{type_id_header::*, type_module::*, type_name_header::*};

#[cfg(test)]
pub(crate) use self::type_name_header::clear_caches;

use crate::error::SerializerError;
use crate::message_pack::{MessagePackReader, MessagePackWriter};
use crate::polymorphic::TypeKey;
use crate::serializer_options::SerializerOptions;
use std::fmt::Debug;


pub trait TypeHeaderStrategy: Debug + Send + Sync {
  fn write(
    &self,
    writer: &mut MessagePackWriter,
    type_key: TypeKey,
    options: &SerializerOptions,
  ) -> Result<(), SerializerError>;

  fn read(&self, reader: &mut MessagePackReader<'_>, options: &SerializerOptions) -> Result<TypeKey, SerializerError>;
}
