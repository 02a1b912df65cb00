use crate::resolver::SerializerResolver;
use crate::serializer_options::SerializerOptions;
use crate::type_header::TypeHeaderStrategy;
use crate::type_policy::TypePolicy;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum SerializerOption {
  SetResolver(Arc<dyn SerializerResolver>),
  SetTypeHeaderStrategy(Arc<dyn TypeHeaderStrategy>),
  SetMaxDepth(usize),
  SetTypePolicy(TypePolicy),
}

impl SerializerOption {
  pub fn apply(&self, options: SerializerOptions) -> SerializerOptions {
    match self {
      SerializerOption::SetResolver(resolver) => options.with_resolver(resolver.clone()),
      SerializerOption::SetTypeHeaderStrategy(strategy) => options.with_type_header_strategy(strategy.clone()),
      SerializerOption::SetMaxDepth(max_depth) => options.with_max_depth(*max_depth),
      SerializerOption::SetTypePolicy(policy) => options.with_type_policy(policy.clone()),
    }
  }

  pub fn with_resolver(resolver: Arc<dyn SerializerResolver>) -> SerializerOption {
    SerializerOption::SetResolver(resolver)
  }

  pub fn with_type_header_strategy(strategy: impl TypeHeaderStrategy + 'static) -> SerializerOption {
    SerializerOption::SetTypeHeaderStrategy(Arc::new(strategy))
  }

  pub fn with_max_depth(max_depth: usize) -> SerializerOption {
    SerializerOption::SetMaxDepth(max_depth)
  }

  pub fn with_type_policy(policy: TypePolicy) -> SerializerOption {
    SerializerOption::SetTypePolicy(policy)
  }
}
