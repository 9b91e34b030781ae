//! Raw responses and their normalization.

pub mod normalizer;
pub mod parsed;
#[allow(clippy::module_inception)]
pub mod response;

pub use normalizer::{DocumentOptions, ResponseNormalizer};
pub use parsed::{Doc, DocList, Group, GroupBlock, ParsedData, ResponseHeader};
pub use response::SolrResponse;
