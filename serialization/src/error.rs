use thiserror::Error;

/// Failure of a single serialize or deserialize call.
///
/// Every variant is terminal for the call that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializerError {
  #[error("configuration error: {0}")]
  Configuration(String),
  #[error("a two element array expected, actual count: {count}")]
  MalformedEnvelope { count: u32 },
  #[error("can't find an id for type '{type_name}'")]
  HeaderEncoding { type_name: String },
  #[error("can't find the type for id '{type_id}'")]
  HeaderDecoding { type_id: i32 },
  #[error("can't find type '{name}' in registered type modules")]
  UnresolvedTypeName { name: String },
  #[error("deserialization of type '{type_name}' is not allowed")]
  DisallowedType { type_name: String },
  #[error("maximum object graph depth of {max_depth} exceeded")]
  DepthExceeded { max_depth: usize },
  #[error("can't determine serializer for type: {type_name}")]
  MissingSerializer { type_name: String },
  #[error("value is not of type '{expected}'")]
  TypeMismatch { expected: String },
  #[error("encode error: {0}")]
  Encode(String),
  #[error("decode error: {0}")]
  Decode(String),
}

impl SerializerError {
  pub fn configuration(message: impl Into<String>) -> Self {
    SerializerError::Configuration(message.into())
  }

  pub fn encode(message: impl ToString) -> Self {
    SerializerError::Encode(message.to_string())
  }

  pub fn decode(message: impl ToString) -> Self {
    SerializerError::Decode(message.to_string())
  }
}

/// Failure while building one of the registries the serializers read from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
  #[error("type id {type_id} is assigned to both '{existing}' and '{duplicate}'")]
  DuplicateTypeId {
    type_id: i32,
    existing: String,
    duplicate: String,
  },
  #[error("type '{type_name}' is registered more than once")]
  DuplicateType { type_name: String },
  #[error("type maps disagree for '{type_name}'")]
  InconsistentTypeMaps { type_name: String },
  #[error("type module '{module}' holds more than one type named '{type_name}'")]
  AmbiguousTypeName { module: String, type_name: String },
  #[error("type module '{name}' is already registered")]
  DuplicateModule { name: String },
  #[error("serializer for type '{type_name}' already registered")]
  DuplicateSerializer { type_name: String },
}
