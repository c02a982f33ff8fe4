//! Projection of the filtered board onto a map widget.
//!
//! Rendering goes through [`MapRenderer`], an injected adapter with an
//! explicit mount/dispose lifecycle. Nothing in the load pipeline depends
//! on this module.

pub mod directions;
pub mod geojson;

use serde::Serialize;
use thiserror::Error;

use crate::geo::{haversine_km, path_length_km};
use crate::models::load::{Coords, Load};

#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("map is not mounted")]
    NotMounted,

    #[error("unknown map handle {0}")]
    UnknownHandle(u64),

    #[error("map container cannot be empty")]
    EmptyContainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(pub u64);

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub load_id: String,
    pub position: Coords,
    pub label: String,
    pub color: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    Directions,
    StraightLine,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteOverlay {
    pub load_id: String,
    pub coordinates: Vec<Coords>,
    pub distance_km: f64,
    pub source: RouteSource,
}

impl RouteOverlay {
    /// Uses the road geometry when there is one, otherwise a straight
    /// origin-destination line.
    pub fn for_load(load: &Load, directions: Option<Vec<Coords>>) -> Self {
        match directions {
            Some(coordinates) if coordinates.len() >= 2 => Self {
                load_id: load.id.clone(),
                distance_km: path_length_km(&coordinates),
                coordinates,
                source: RouteSource::Directions,
            },
            _ => Self {
                load_id: load.id.clone(),
                coordinates: vec![load.origin_coords, load.destination_coords],
                distance_km: haversine_km(&load.origin_coords, &load.destination_coords),
                source: RouteSource::StraightLine,
            },
        }
    }
}

pub fn project_markers(loads: &[Load], selected: Option<&str>) -> Vec<Marker> {
    loads
        .iter()
        .map(|load| Marker {
            load_id: load.id.clone(),
            position: load.origin_coords,
            label: format!("{}\u{20ac}", load.price),
            color: load.kind.color(),
            selected: selected == Some(load.id.as_str()),
        })
        .collect()
}

pub trait MapRenderer {
    fn initialize(&mut self, container: &str) -> Result<MapHandle, MapError>;
    fn render_markers(&mut self, handle: MapHandle, markers: &[Marker]) -> Result<(), MapError>;
    fn show_route(&mut self, handle: MapHandle, route: &RouteOverlay) -> Result<(), MapError>;
    fn clear_route(&mut self, handle: MapHandle) -> Result<(), MapError>;
    fn dispose(&mut self, handle: MapHandle);
}

/// Owns one mounted map and keeps it in sync with the board.
pub struct MapView<R: MapRenderer> {
    renderer: R,
    handle: Option<MapHandle>,
}

impl<R: MapRenderer> MapView<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            handle: None,
        }
    }

    /// Mounting twice keeps the first map.
    pub fn mount(&mut self, container: &str) -> Result<MapHandle, MapError> {
        if let Some(handle) = self.handle {
            return Ok(handle);
        }
        let handle = self.renderer.initialize(container)?;
        self.handle = Some(handle);
        Ok(handle)
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    pub fn sync_markers(&mut self, filtered: &[Load], selected: Option<&str>) -> Result<(), MapError> {
        let handle = self.handle.ok_or(MapError::NotMounted)?;
        self.renderer
            .render_markers(handle, &project_markers(filtered, selected))
    }

    pub fn show_route(&mut self, route: Option<&RouteOverlay>) -> Result<(), MapError> {
        let handle = self.handle.ok_or(MapError::NotMounted)?;
        match route {
            Some(route) => self.renderer.show_route(handle, route),
            None => self.renderer.clear_route(handle),
        }
    }

    pub fn unmount(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.renderer.dispose(handle);
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: MapRenderer> Drop for MapView<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}
