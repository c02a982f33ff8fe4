use std::collections::HashMap;

use serde_json::{Value, json};

use crate::map::{MapError, MapHandle, MapRenderer, Marker, RouteOverlay};
use crate::models::load::Coords;

fn position(coords: &Coords) -> Value {
    json!([coords.lng(), coords.lat()])
}

pub fn markers_feature_collection(markers: &[Marker]) -> Value {
    let features: Vec<Value> = markers
        .iter()
        .map(|marker| {
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": position(&marker.position) },
                "properties": {
                    "id": marker.load_id,
                    "label": marker.label,
                    "color": marker.color,
                    "selected": marker.selected,
                }
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

pub fn route_feature(route: &RouteOverlay) -> Value {
    let coordinates: Vec<Value> = route.coordinates.iter().map(position).collect();
    json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": coordinates },
        "properties": {
            "id": route.load_id,
            "distance_km": route.distance_km,
            "source": route.source,
        }
    })
}

#[derive(Debug, Default)]
struct Scene {
    container: String,
    markers: Value,
    route: Option<Value>,
}

/// Renderer that keeps each mounted map as GeoJSON documents in memory.
/// Handy for exporting the current board and for exercising [`MapView`]
/// without a browser.
///
/// [`MapView`]: crate::map::MapView
#[derive(Debug, Default)]
pub struct GeoJsonRenderer {
    scenes: HashMap<u64, Scene>,
    next_id: u64,
}

impl GeoJsonRenderer {
    pub fn live_maps(&self) -> usize {
        self.scenes.len()
    }

    pub fn markers(&self, handle: MapHandle) -> Option<&Value> {
        self.scenes.get(&handle.0).map(|scene| &scene.markers)
    }

    pub fn route(&self, handle: MapHandle) -> Option<&Value> {
        self.scenes.get(&handle.0).and_then(|scene| scene.route.as_ref())
    }

    pub fn container(&self, handle: MapHandle) -> Option<&str> {
        self.scenes.get(&handle.0).map(|scene| scene.container.as_str())
    }

    fn scene(&mut self, handle: MapHandle) -> Result<&mut Scene, MapError> {
        self.scenes
            .get_mut(&handle.0)
            .ok_or(MapError::UnknownHandle(handle.0))
    }
}

impl MapRenderer for GeoJsonRenderer {
    fn initialize(&mut self, container: &str) -> Result<MapHandle, MapError> {
        if container.trim().is_empty() {
            return Err(MapError::EmptyContainer);
        }

        self.next_id += 1;
        self.scenes.insert(
            self.next_id,
            Scene {
                container: container.to_string(),
                markers: markers_feature_collection(&[]),
                route: None,
            },
        );
        Ok(MapHandle(self.next_id))
    }

    fn render_markers(&mut self, handle: MapHandle, markers: &[Marker]) -> Result<(), MapError> {
        self.scene(handle)?.markers = markers_feature_collection(markers);
        Ok(())
    }

    fn show_route(&mut self, handle: MapHandle, route: &RouteOverlay) -> Result<(), MapError> {
        self.scene(handle)?.route = Some(route_feature(route));
        Ok(())
    }

    fn clear_route(&mut self, handle: MapHandle) -> Result<(), MapError> {
        self.scene(handle)?.route = None;
        Ok(())
    }

    fn dispose(&mut self, handle: MapHandle) {
        self.scenes.remove(&handle.0);
    }
}
