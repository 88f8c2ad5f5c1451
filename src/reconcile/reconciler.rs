use serde::Serialize;
use tracing::{debug, info, warn};

use super::known::{Correction, KnownMapping};
use super::strategy::{Evidence, Strategy, STRATEGIES};
use crate::types::{Attribution, FeatureCollection};

/// A school none of the strategies could attribute. Its properties are left
/// exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    pub name: String,
    pub current: Attribution,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileSummary {
    /// Features already consistent.
    pub unchanged: usize,
    pub corrections: Vec<Correction>,
    pub unresolved: Vec<Unresolved>,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool { self.corrections.is_empty() }
}

/// Run the strategy chain over every named feature. Each hit writes `class`,
/// `size` and `region` together; a second run over the output is a no-op.
pub fn reconcile(collection: &mut FeatureCollection, known: &KnownMapping) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();

    for feature in &mut collection.features {
        let Some(name) = feature.name().map(str::to_string) else { continue };

        let evidence = Evidence::for_feature(feature, known);
        let hit = STRATEGIES.iter()
            .find_map(|(strategy, resolve)| resolve(feature, &evidence).map(|r| (*strategy, r)));

        let Some((strategy, region)) = hit else {
            debug!("{name:?}: unresolved");
            summary.unresolved.push(Unresolved { name, current: feature.attribution() });
            continue;
        };

        let before = feature.attribution();
        if strategy == Strategy::Consistent || !feature.apply_region(region) {
            summary.unchanged += 1;
            continue;
        }
        debug!("{name:?}: {:?} -> {region} ({})", before.region, strategy.name());
        summary.corrections.push(Correction { name, strategy: strategy.name(), before, after: region.to_string() });
    }

    info!(
        "reconciled {} features: {} unchanged, {} corrected, {} unresolved",
        collection.len(), summary.unchanged, summary.corrections.len(), summary.unresolved.len(),
    );
    if !summary.unresolved.is_empty() {
        warn!("{} schools could not be attributed to a region", summary.unresolved.len());
    }
    summary
}
