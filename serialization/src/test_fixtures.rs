use crate::error::SerializerError;
use crate::message_pack::{MessagePackReader, MessagePackWriter};
use crate::polymorphic::PolymorphicRef;
use crate::resolver::{
  CompositeResolver, InMemorySerializerResolver, PolymorphicResolver, SerializerResolver, SerializerResolverExt,
  StandardResolver,
};
use crate::serializer::Serializer;
use crate::serializer_options::SerializerOptions;
use crate::type_header::{register_type_module, TypeIdHeaderStrategy, TypeModule, TypeNameHeaderStrategy};
use crate::{Polymorphic, TypeKey};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, Once, PoisonError};
use tracing_subscriber::EnvFilter;

const EVENTS_MODULE: &str = "fixtures.events";
const SENSORS_MODULE: &str = "fixtures.sensors";

#[derive(Debug, Clone, PartialEq, Polymorphic, Serialize, Deserialize)]
pub struct TypeA {
  pub base: String,
}

#[derive(Debug, Clone, PartialEq, Polymorphic, Serialize, Deserialize)]
pub struct TypeB {
  pub base: String,
  pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Polymorphic, Serialize, Deserialize)]
pub struct Reading {
  pub base: Option<String>,
  pub value: f64,
}

/// Registered with the id strategy but without a serializer anywhere.
#[derive(Debug, Clone, PartialEq, Polymorphic)]
pub struct Orphan;

/// Carries a base-typed child, so nesting goes through the envelope again.
#[derive(Debug, PartialEq, Polymorphic)]
pub struct Node {
  pub label: String,
  pub child: PolymorphicRef,
}

impl Node {
  pub fn chain(len: usize) -> PolymorphicRef {
    (0..len).fold(None, |child, i| {
      Some(Arc::new(Node {
        label: format!("node-{}", i),
        child,
      }) as Arc<dyn Polymorphic>)
    })
  }
}

pub const NODE_TYPE_ID: i32 = 3;

pub struct NodeSerializer;

fn envelope(options: &SerializerOptions) -> Result<Arc<dyn Serializer<PolymorphicRef>>, SerializerError> {
  options
    .resolver()
    .get_serializer::<PolymorphicRef>()
    .ok_or_else(|| SerializerError::MissingSerializer {
      type_name: std::any::type_name::<PolymorphicRef>().to_string(),
    })
}

impl Serializer<Node> for NodeSerializer {
  fn serialize(
    &self,
    writer: &mut MessagePackWriter,
    value: &Node,
    options: &SerializerOptions,
  ) -> Result<(), SerializerError> {
    writer.write_array_header(2)?;
    writer.write_string(&value.label)?;
    envelope(options)?.serialize(writer, &value.child, options)
  }

  fn deserialize(&self, reader: &mut MessagePackReader<'_>, options: &SerializerOptions) -> Result<Node, SerializerError> {
    let count = reader.read_array_header()?;
    if count != 2 {
      return Err(SerializerError::decode(format!("Node expects 2 fields, got {}", count)));
    }
    let label = reader.read_string()?.to_string();
    let child = envelope(options)?.deserialize(reader, options)?;
    Ok(Node { label, child })
  }
}

pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

pub fn fixture_resolver() -> InMemorySerializerResolver {
  let resolver = InMemorySerializerResolver::new();
  resolver.register_serde::<TypeA>().expect("register TypeA");
  resolver.register_serde::<TypeB>().expect("register TypeB");
  resolver.register_serde::<Reading>().expect("register Reading");
  resolver
    .register::<Node>(Arc::new(NodeSerializer))
    .expect("register Node");
  resolver
}

pub fn composite_with(resolver: impl SerializerResolver + 'static) -> Arc<dyn SerializerResolver> {
  Arc::new(CompositeResolver::new([
    Arc::new(PolymorphicResolver) as Arc<dyn SerializerResolver>,
    Arc::new(resolver),
    Arc::new(StandardResolver),
  ]))
}

pub fn type_id_strategy() -> TypeIdHeaderStrategy {
  TypeIdHeaderStrategy::new([
    (TypeKey::of::<TypeA>(), 0),
    (TypeKey::of::<TypeB>(), 1),
    (TypeKey::of::<Reading>(), 2),
    (TypeKey::of::<Node>(), NODE_TYPE_ID),
    (TypeKey::of::<Orphan>(), 4),
  ])
  .expect("fixture ids are unique")
}

static BASE_OPTIONS: Lazy<SerializerOptions> = Lazy::new(|| SerializerOptions::new(composite_with(fixture_resolver())));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
  ById,
  ByName,
}

pub fn options_for(kind: StrategyKind) -> SerializerOptions {
  init_tracing();
  ensure_fixture_modules();
  match kind {
    StrategyKind::ById => BASE_OPTIONS.with_type_header_strategy(Arc::new(type_id_strategy())),
    StrategyKind::ByName => BASE_OPTIONS.with_type_header_strategy(Arc::new(TypeNameHeaderStrategy::new())),
  }
}

pub fn ensure_fixture_modules() {
  static REGISTERED: Once = Once::new();
  REGISTERED.call_once(|| {
    register_type_module(
      TypeModule::new(EVENTS_MODULE)
        .with_type::<TypeA>()
        .with_type::<TypeB>()
        .with_type::<Node>(),
    )
    .expect("register events module");
    register_type_module(TypeModule::new(SENSORS_MODULE).with_type::<Reading>()).expect("register sensors module");
  });
}

/// Serializes tests that clear or inspect the process-wide caches.
pub fn cache_guard() -> MutexGuard<'static, ()> {
  static CACHE_LOCK: Mutex<()> = Mutex::new(());
  CACHE_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn boxed<T: Polymorphic>(value: T) -> PolymorphicRef {
  Some(Arc::new(value))
}
