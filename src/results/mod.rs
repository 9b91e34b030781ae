//! Result sets, hits, facets and groups.

pub mod facet;
pub mod geo;
pub mod group;
pub mod hit;
pub mod result_set;

pub use facet::{FacetBlock, FacetKind};
pub use geo::GeoUnit;
pub use group::{GroupResult, fix_group_name};
pub use hit::{DefaultHitFactory, HitFactory, SearchHit};
pub use result_set::{Cursor, Hits, ResultSet, ResultSetOptions};
