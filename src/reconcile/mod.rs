//! Class/size/region attribution.
//!
//! Two layers: the known mapping extracted from the region files is broadcast
//! over the collection first, then the strategy chain fills in whatever the
//! mapping did not cover.

mod known;
mod reconciler;
mod strategy;

pub use known::{apply_known_mapping, extract_known_mapping, Correction, KnownMapping, MappingConflict};
pub use reconciler::{reconcile, ReconcileSummary, Unresolved};
pub use strategy::{Evidence, Resolver, Strategy, STRATEGIES};

use serde::Serialize;

use crate::types::FeatureCollection;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub mapping_entries: usize,
    pub mapping_conflicts: Vec<MappingConflict>,
    /// Corrections made by broadcasting the known mapping.
    pub broadcast: Vec<Correction>,
    pub chain: ReconcileSummary,
}

impl ReconcileReport {
    pub fn corrected(&self) -> usize { self.broadcast.len() + self.chain.corrections.len() }
}

/// Broadcast `known` over `collection`, then run the strategy chain.
pub fn reconcile_collection(collection: &mut FeatureCollection, known: &KnownMapping) -> ReconcileReport {
    let broadcast = apply_known_mapping(collection, known);
    let chain = reconcile(collection, known);
    ReconcileReport {
        mapping_entries: known.len(),
        mapping_conflicts: known.conflicts().to_vec(),
        broadcast,
        chain,
    }
}
