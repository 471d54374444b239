//! Destination markers shown where a move order was issued.
//!
//! A marker plays a one-shot animation and is destroyed once the host reports
//! that the animation finished. Rendering and animation stepping belong to the
//! host; this module only tracks each marker's lifecycle:
//!
//! ```text
//! Spawned --begin_playback--> Playing --on_animation_finished--> PendingDestroy --reap--> (gone)
//! ```

use glam::Vec3;
use log::{debug, warn};

use crate::constants::{MARKER_CLIP, MARKER_CLIP_FPS, MARKER_SCALE};

/// Identifier of a destination marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Lifecycle stage of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// Created; the host has not started the animation yet.
    Spawned,
    /// The one-shot animation is running.
    Playing,
    /// The animation finished; the host should destroy the marker.
    PendingDestroy,
}

/// Visual feedback entity placed at a move order's destination.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveMarker {
    /// Identifier handed to the host.
    pub id: MarkerId,
    /// World-space position of the marker.
    pub position: Vec3,
    /// Render scale.
    pub scale: Vec3,
    /// Animation clip to play once.
    pub clip: &'static str,
    /// Playback rate of `clip` in frames per second.
    pub clip_fps: u32,
    /// Lifecycle stage.
    pub state: MarkerState,
}

/// Markers currently alive.
#[derive(Debug, Default, Clone)]
pub struct MarkerSet {
    markers: Vec<MoveMarker>,
    next_id: u64,
}

impl MarkerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a marker at `position`.
    pub fn spawn(&mut self, position: Vec3) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.markers.push(MoveMarker {
            id,
            position,
            scale: Vec3::splat(MARKER_SCALE),
            clip: MARKER_CLIP,
            clip_fps: MARKER_CLIP_FPS,
            state: MarkerState::Spawned,
        });
        debug!("spawned move marker {id:?} at {position}");
        id
    }

    fn find_mut(&mut self, id: MarkerId) -> Option<&mut MoveMarker> {
        self.markers.iter_mut().find(|marker| marker.id == id)
    }

    /// Marks the marker's animation as started.
    ///
    /// Returns `false` if the marker is unknown or not freshly spawned.
    pub fn begin_playback(&mut self, id: MarkerId) -> bool {
        match self.find_mut(id) {
            Some(marker) if marker.state == MarkerState::Spawned => {
                marker.state = MarkerState::Playing;
                true
            }
            _ => false,
        }
    }

    /// Records that the marker's animation finished.
    ///
    /// Repeated notifications are harmless. Returns `false` for unknown
    /// markers.
    pub fn on_animation_finished(&mut self, id: MarkerId) -> bool {
        if let Some(marker) = self.find_mut(id) {
            marker.state = MarkerState::PendingDestroy;
            true
        } else {
            warn!("animation finished for unknown move marker {id:?}");
            false
        }
    }

    /// Removes markers awaiting destruction and returns their identifiers.
    pub fn reap(&mut self) -> Vec<MarkerId> {
        let mut reaped = Vec::new();
        self.markers.retain(|marker| {
            let done = marker.state == MarkerState::PendingDestroy;
            if done {
                reaped.push(marker.id);
            }
            !done
        });
        reaped
    }

    /// Markers the renderer should draw.
    pub fn visible(&self) -> impl Iterator<Item = &MoveMarker> {
        self.markers
            .iter()
            .filter(|marker| marker.state != MarkerState::PendingDestroy)
    }

    /// Looks up a marker.
    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&MoveMarker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    /// Number of markers alive, including those awaiting destruction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no marker is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Releases every marker and returns their identifiers.
    pub fn clear(&mut self) -> Vec<MarkerId> {
        self.markers.drain(..).map(|marker| marker.id).collect()
    }
}
