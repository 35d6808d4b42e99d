//! `pm-geometry`: region geometry, restricted-edge index, and waypoint sampling.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`polygon`] | `Polygon`, `contains`, `segments_intersect`, `crosses_restricted` |
//! | [`index`]   | `RestrictedIndex`: R-tree over every restricted edge           |
//! | [`region`]  | `RegionSet` (immutable, shared), `RegionSetBuilder`             |
//! | [`sampler`] | `ConstrainedSampler`, `SampleConstraint`, `advance_toward`      |
//! | [`error`]   | `GeometryError`, `SampleError`, `GeometryResult<T>`             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Polygon`.              |
//!
//! Everything in [`polygon`] is a pure function over supplied geometry.  The
//! only state in this crate is the immutable [`RegionSet`], built once by the
//! host and shared by `Arc` with every agent.

pub mod error;
pub mod index;
pub mod polygon;
pub mod region;
pub mod sampler;


pub use error::{GeometryError, GeometryResult, SampleError};
pub use index::RestrictedIndex;
pub use polygon::{Polygon, contains, crosses_restricted, segments_intersect};
pub use region::{RegionSet, RegionSetBuilder};
pub use sampler::{ConstrainedSampler, DEFAULT_MAX_ATTEMPTS, SampleConstraint, advance_toward};
