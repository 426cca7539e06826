//! Points of interest and the markers that show them.
//!
//! Each POI gets its own marker layer with a popup built from its name,
//! description and category.

use crate::{
    core::constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, POI_ICON_URL},
    data::types::{Poi, PoiId},
    layers::{
        base::LayerTrait,
        marker::{Icon, Marker},
    },
    traits::MapSurface,
};

struct Entry {
    poi: Poi,
    /// Surface id of the rendered marker; `None` if attaching it failed
    marker_id: Option<String>,
}

/// Ordered POI collection whose markers mirror it on the surface.
///
/// Identifiers are not unique: several POIs may share one, and removing by
/// identifier removes every match together with its marker.
#[derive(Default)]
pub struct PoiStore {
    entries: Vec<Entry>,
    next_marker: u64,
}

impl PoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn marker_for(&mut self, poi: &Poi) -> Marker {
        self.next_marker += 1;
        let icon = Icon::new(
            poi.icon.as_deref().unwrap_or(POI_ICON_URL),
            MARKER_ICON_SIZE,
            MARKER_ICON_ANCHOR,
        );
        Marker::new(format!("poi-{}", self.next_marker), poi.position())
            .with_icon(icon)
            .with_title(poi.name.clone())
            .with_popup(crate::ui::popup::poi_popup(poi))
    }

    fn render(&mut self, surface: &mut dyn MapSurface, poi: Poi) {
        let marker = self.marker_for(&poi);
        let marker_id = marker.id().to_string();
        let marker_id = match surface.add_layer(Box::new(marker)) {
            Ok(()) => Some(marker_id),
            Err(e) => {
                log::error!("failed to render POI {} ({}): {e}", poi.id, poi.name);
                None
            }
        };
        self.entries.push(Entry { poi, marker_id });
    }

    fn unrender(surface: &mut dyn MapSurface, entry: &Entry) {
        if let Some(marker_id) = &entry.marker_id {
            surface.remove_layer(marker_id);
        }
    }

    /// Replaces the whole collection and re-renders it in order
    pub fn load(&mut self, surface: &mut dyn MapSurface, items: Vec<Poi>) {
        self.clear(surface);
        for poi in items {
            self.render(surface, poi);
        }
        log::info!("displaying {} POIs", self.entries.len());
    }

    pub fn add(&mut self, surface: &mut dyn MapSurface, poi: Poi) {
        log::debug!("adding POI {} ({})", poi.id, poi.name);
        self.render(surface, poi);
    }

    /// Removes every POI with `id`; returns how many were removed
    pub fn remove(&mut self, surface: &mut dyn MapSurface, id: &PoiId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            if &entry.poi.id == id {
                Self::unrender(surface, entry);
                false
            } else {
                true
            }
        });
        before - self.entries.len()
    }

    /// First POI with `id`
    pub fn get_by_id(&self, id: &PoiId) -> Option<&Poi> {
        self.entries.iter().map(|e| &e.poi).find(|poi| &poi.id == id)
    }

    /// Snapshot of all POIs in insertion order
    pub fn get_all(&self) -> Vec<Poi> {
        self.entries.iter().map(|e| e.poi.clone()).collect()
    }

    /// Surface ids of the markers rendered for `id`
    pub fn marker_ids(&self, id: &PoiId) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| &e.poi.id == id)
            .filter_map(|e| e.marker_id.as_deref())
            .collect()
    }

    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        for entry in self.entries.drain(..) {
            Self::unrender(surface, &entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
