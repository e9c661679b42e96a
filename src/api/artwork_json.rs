//! JSON exchange of computed artworks with renderers.
//!
//! Renderers receive a versioned document:
//! `{ "format": "graph-artwork", "version": 1, "artwork": { .. } }`.
//! Reading also accepts a bare artwork object.

use serde::{Deserialize, Serialize};

use crate::error::{ArtworkError, ArtworkResult};

use super::GraphArtwork;

/// Value of the document's `format` field.
pub const ARTWORK_DOCUMENT_FORMAT: &str = "graph-artwork";

/// Current document version.
pub const ARTWORK_DOCUMENT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ArtworkDocumentRef<'a> {
    format: &'static str,
    version: u32,
    artwork: &'a GraphArtwork,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredArtwork {
    Document {
        format: String,
        version: u32,
        artwork: GraphArtwork,
    },
    Bare(GraphArtwork),
}

fn serialize_error(error: serde_json::Error) -> ArtworkError {
    ArtworkError::InvalidData(format!("failed to serialize artwork: {error}"))
}

impl GraphArtwork {
    /// Bare artwork object.
    pub fn to_json_pretty(&self) -> ArtworkResult<String> {
        serde_json::to_string_pretty(self).map_err(serialize_error)
    }

    /// Artwork wrapped in the versioned renderer document.
    pub fn to_document_json(&self) -> ArtworkResult<String> {
        serde_json::to_string_pretty(&ArtworkDocumentRef {
            format: ARTWORK_DOCUMENT_FORMAT,
            version: ARTWORK_DOCUMENT_VERSION,
            artwork: self,
        })
        .map_err(serialize_error)
    }

    /// Reads a versioned document or a bare artwork.
    pub fn from_json(input: &str) -> ArtworkResult<Self> {
        let stored: StoredArtwork = serde_json::from_str(input).map_err(|error| {
            ArtworkError::InvalidData(format!("failed to parse artwork json: {error}"))
        })?;
        match stored {
            StoredArtwork::Bare(artwork) => Ok(artwork),
            StoredArtwork::Document {
                format,
                version,
                artwork,
            } => {
                if format != ARTWORK_DOCUMENT_FORMAT {
                    return Err(ArtworkError::InvalidData(format!(
                        "not a graph artwork document: {format}"
                    )));
                }
                if version != ARTWORK_DOCUMENT_VERSION {
                    return Err(ArtworkError::InvalidData(format!(
                        "unsupported artwork document version: {version}"
                    )));
                }
                Ok(artwork)
            }
        }
    }
}
