//! Region files in, one deduplicated FeatureCollection out.

mod engine;
mod normalize;
mod source;

pub use engine::{merge_sources, DuplicateName, MergeOutcome};
pub use normalize::{DroppedFeature, Normalizer};
pub use source::{load_region_file, load_region_sources, missing_regions, LoadedSources, RegionSource, SkippedFile};
