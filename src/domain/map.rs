// Map viewport model
use super::coordinate::Coordinate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

/// Viewport, marker and layout state of the location map.
///
/// `size_generation` increases every time the map is asked to recompute its
/// pixel size; a renderer re-measures its container when it sees it change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapState {
    pub center: Coordinate,
    pub zoom: u8,
    pub marker: Coordinate,
    pub tile_layer: TileLayer,
    pub active: bool,
    pub size_generation: u64,
}

impl MapState {
    pub fn new(center: Coordinate, zoom: u8, tile_layer: TileLayer) -> Self {
        Self {
            center,
            zoom,
            marker: center,
            tile_layer,
            active: false,
            size_generation: 0,
        }
    }

    pub fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn move_marker(&mut self, to: Coordinate) {
        self.marker = to;
    }

    pub fn invalidate_size(&mut self) {
        self.size_generation += 1;
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::new(
            Coordinate::new(0.0, 0.0),
            0,
            TileLayer {
                url_template: String::new(),
                max_zoom: 0,
                attribution: String::new(),
            },
        )
    }
}
