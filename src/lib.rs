//! graph-artwork: device-independent layout of monitoring graphs.
//!
//! Turns time-aligned metric curves into a [`GraphArtwork`]: half-step
//! interpolated, stacked and mirrored curves with legend statistics, a
//! vertical axis with "nice" steps and a calendar-aware time axis. Drawing is
//! left to the consumer.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{
    ArtworkCollaborators, GraphArtwork, GraphDataRange, GraphRecipe, GraphRenderOptions,
    MetricResolver, PinStore, compute_graph_artwork, compute_graph_hover_values,
};
pub use core::{UnitCatalog, UnitInfo};
pub use error::{ArtworkError, ArtworkResult};
