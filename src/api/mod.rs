mod artwork;
mod artwork_json;
mod collaborators;
mod recipe;
mod render_options;

pub use artwork::{
    GraphArtwork, compute_graph_artwork, compute_graph_artwork_curves, compute_graph_hover_values,
};
pub use collaborators::{ArtworkCollaborators, MetricResolver, PinStore};
pub use artwork_json::{ARTWORK_DOCUMENT_FORMAT, ARTWORK_DOCUMENT_VERSION};
pub use recipe::{GraphDataRange, GraphMetric, GraphRecipe, HorizontalRule};
pub use render_options::{
    GraphColors, GraphRenderOptions, GraphTheme, TitleFormat, VerticalAxisWidth,
};
