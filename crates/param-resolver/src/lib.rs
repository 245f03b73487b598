//! Parameter resolution (§4.6-4.7): a discovery cache indexed four ways, a
//! shadow layer that is authoritative over unreliable host read-back, and a
//! semantic alias pre-lookup per plugin family.

pub mod alias;
pub mod cache;
pub mod error;
pub mod resolver;
pub mod shadow;

pub use alias::SemanticAliasMap;
pub use cache::ParameterCache;
pub use error::ResolverError;
pub use resolver::{ReadSource, Resolver};
pub use shadow::{ShadowEntry, ShadowState};
