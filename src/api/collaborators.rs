use crate::core::{Curve, Timestamp, UnitInfo};
use crate::error::ArtworkResult;

use super::{GraphDataRange, GraphRecipe};

/// Turns a recipe's metric expressions into time-aligned curves.
///
/// Fetching raw series and evaluating expressions happen behind this
/// boundary. Closures with the matching signature implement it. Resolvers
/// are shared across threads, hence `Sync`.
pub trait MetricResolver: Sync {
    fn resolve_curves(
        &self,
        recipe: &GraphRecipe,
        data_range: &GraphDataRange,
    ) -> ArtworkResult<Vec<Curve>>;
}

impl<F> MetricResolver for F
where
    F: Fn(&GraphRecipe, &GraphDataRange) -> ArtworkResult<Vec<Curve>> + Sync,
{
    fn resolve_curves(
        &self,
        recipe: &GraphRecipe,
        data_range: &GraphDataRange,
    ) -> ArtworkResult<Vec<Curve>> {
        self(recipe, data_range)
    }
}

/// Source of the user's pinned timestamp.
pub trait PinStore: Sync {
    fn pin_time(&self) -> Option<Timestamp>;
}

impl PinStore for Option<Timestamp> {
    fn pin_time(&self) -> Option<Timestamp> {
        *self
    }
}

const NO_PIN: Option<Timestamp> = None;

/// External inputs of an artwork computation.
#[derive(Clone, Copy)]
pub struct ArtworkCollaborators<'a> {
    pub metric_resolver: &'a dyn MetricResolver,
    /// Unit of the recipe, already resolved by the caller.
    pub unit: &'a UnitInfo,
    pub pin_store: &'a dyn PinStore,
}

impl<'a> ArtworkCollaborators<'a> {
    #[must_use]
    pub fn new(metric_resolver: &'a dyn MetricResolver, unit: &'a UnitInfo) -> Self {
        Self {
            metric_resolver,
            unit,
            pin_store: &NO_PIN,
        }
    }

    #[must_use]
    pub fn with_pin_store(mut self, pin_store: &'a dyn PinStore) -> Self {
        self.pin_store = pin_store;
        self
    }
}
