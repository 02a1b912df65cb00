use crate::dispatch_cache::DispatchCache;
use crate::error::SerializerError;
use crate::polymorphic::TypeKey;
use crate::resolver::{CompositeResolver, PolymorphicResolver, SerializerResolver, StandardResolver};
use crate::serializer_option::SerializerOption;
use crate::type_header::TypeHeaderStrategy;
use crate::type_policy::TypePolicy;
use std::sync::Arc;


/// Default limit on nested envelopes while deserializing.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Immutable configuration shared by every serializer of one call tree.
///
/// The `with_*` methods derive a new value and keep every setting they don't name, the type
/// header strategy included. Bound per-type serializers are memoized per resolver: derived
/// options share the memo until the resolver is replaced, and it is freed with the options.
#[derive(Debug, Clone)]
pub struct SerializerOptions {
  resolver: Arc<dyn SerializerResolver>,
  dispatch_cache: Arc<DispatchCache>,
  type_header_strategy: Option<Arc<dyn TypeHeaderStrategy>>,
  max_depth: usize,
  type_policy: Option<Arc<TypePolicy>>,
}

static_assertions::assert_impl_all!(SerializerOptions: Send, Sync);

impl SerializerOptions {
  pub fn new(resolver: Arc<dyn SerializerResolver>) -> Self {
    Self {
      resolver,
      dispatch_cache: Arc::new(DispatchCache::new()),
      type_header_strategy: None,
      max_depth: DEFAULT_MAX_DEPTH,
      type_policy: None,
    }
  }

  /// Options over the polymorphic and primitive resolvers, without a header strategy.
  pub fn standard() -> Self {
    Self::new(Arc::new(CompositeResolver::new([
      Arc::new(PolymorphicResolver) as Arc<dyn SerializerResolver>,
      Arc::new(StandardResolver),
    ])))
  }

  pub fn from(resolver: Arc<dyn SerializerResolver>, options: impl IntoIterator<Item = SerializerOption>) -> Self {
    options
      .into_iter()
      .fold(Self::new(resolver), |acc, option| option.apply(acc))
  }

  pub fn resolver(&self) -> &dyn SerializerResolver {
    self.resolver.as_ref()
  }

  pub(crate) fn dispatch_cache(&self) -> &Arc<DispatchCache> {
    &self.dispatch_cache
  }

  pub fn type_header_strategy(&self) -> Option<&Arc<dyn TypeHeaderStrategy>> {
    self.type_header_strategy.as_ref()
  }

  pub fn max_depth(&self) -> usize {
    self.max_depth
  }

  pub fn type_policy(&self) -> Option<&TypePolicy> {
    self.type_policy.as_deref()
  }

  pub fn with_resolver(&self, resolver: Arc<dyn SerializerResolver>) -> Self {
    Self {
      resolver,
      dispatch_cache: Arc::new(DispatchCache::new()),
      ..self.clone()
    }
  }

  pub fn with_type_header_strategy(&self, strategy: Arc<dyn TypeHeaderStrategy>) -> Self {
    Self {
      type_header_strategy: Some(strategy),
      ..self.clone()
    }
  }

  pub fn with_max_depth(&self, max_depth: usize) -> Self {
    Self {
      max_depth,
      ..self.clone()
    }
  }

  pub fn with_type_policy(&self, type_policy: TypePolicy) -> Self {
    Self {
      type_policy: Some(Arc::new(type_policy)),
      ..self.clone()
    }
  }

  pub(crate) fn require_type_header_strategy(&self) -> Result<&Arc<dyn TypeHeaderStrategy>, SerializerError> {
    self
      .type_header_strategy
      .as_ref()
      .ok_or_else(|| SerializerError::configuration("options without a type header strategy"))
  }

  pub fn ensure_type_allowed(&self, type_key: TypeKey) -> Result<(), SerializerError> {
    match &self.type_policy {
      Some(policy) if !policy.is_allowed(type_key) => Err(SerializerError::DisallowedType {
        type_name: type_key.name().to_string(),
      }),
      _ => Ok(()),
    }
  }
}
