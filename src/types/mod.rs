mod app;
mod class;
mod feature;

pub use app::{
    AppConfig, ClassEntry, ClassTree, Coordinates, DistrictEntry, DistrictRoster, RegionEntry,
    RosterSchool, SchoolRoster,
};
pub use class::{ClassError, ClassNum, LetterError, RegionId, RegionLetter};
pub use feature::{
    Attribution, Feature, FeatureCollection, PROP_CLASS, PROP_DISTRICT, PROP_NAME, PROP_REGION,
    PROP_SIZE, PROP_SOURCE_FILE,
};
