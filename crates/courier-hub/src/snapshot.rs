//! Serializable map view handed to front ends.

use serde::Serialize;

/// One city node with its canvas coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct MapNodeDto {
    pub name: String,
    pub x:    f32,
    pub y:    f32,
}

/// One undirected route, reported once per city pair.
#[derive(Debug, Clone, Serialize)]
pub struct MapLinkDto {
    pub from:     String,
    pub to:       String,
    pub distance: u32,
    pub blocked:  bool,
}

/// Everything needed to draw the network: nodes plus deduplicated links.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapSnapshot {
    pub nodes: Vec<MapNodeDto>,
    pub links: Vec<MapLinkDto>,
}
