#![doc = "VHSL school region dataset pipeline"]
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod lookup;
pub mod merge;
pub mod propose;
pub mod reconcile;
pub mod region;
pub mod report;
pub mod survey;
pub mod types;
pub mod validate;

#[doc(inline)]
pub use config::Layout;

#[doc(inline)]
pub use lookup::{build_lookup, LookupEntry, LookupTable};

#[doc(inline)]
pub use merge::{load_region_sources, merge_sources};

#[doc(inline)]
pub use reconcile::{extract_known_mapping, reconcile_collection};

#[doc(inline)]
pub use region::{parse_region, parse_region_file, ParsedRegion, RegionFormatError};

#[doc(inline)]
pub use types::{Feature, FeatureCollection, RegionId};

#[doc(inline)]
pub use validate::{validate, ValidationInputs, ValidationReport};
