//! External asset loading.
//!
//! An [`AssetLoadJob`] tries the candidate locations of a room in order and
//! reports through [`LoadEvent`]s. It never touches a scene itself: the host runs
//! it on whatever executor it has and hands the events back to
//! [`RoomViewer::apply_load_event`](crate::viewer::RoomViewer::apply_load_event),
//! which drops events from sessions that are no longer current.

use std::{
    collections::{HashMap, HashSet},
    future::Future,
};

use instant::Instant;
use log::{debug, info, warn};

use crate::{
    data_structures::{
        instance::Instance,
        scene_graph::{SceneNode, world_bounds},
    },
    error::SceneError,
    resources::{self, is_remote},
    room::{RoomDescriptor, RoomType},
    viewer::SessionToken,
};

/// Share of the room footprint a fitted asset may cover.
pub const FOOTPRINT_FILL: f32 = 0.8;
/// Share of the room height a fitted asset may reach.
pub const HEIGHT_FILL: f32 = 0.9;

/// Retrieves raw asset bytes.
pub trait AssetFetcher {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<Vec<u8>, SceneError>>;
}

/// Fetches over HTTP, resolving relative locations against an asset base.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    asset_base: String,
}

impl HttpFetcher {
    pub fn new(asset_base: &str) -> Self {
        Self {
            asset_base: asset_base.to_string(),
        }
    }
}

impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, SceneError> {
        if is_remote(location) {
            debug!("GET {}", location);
        }
        resources::load_binary(location, &self.asset_base)
            .await
            .map_err(|e| SceneError::asset(location, format!("{e:#}")))
    }
}

pub enum LoadEventKind {
    /// Percentage of candidates tried so far.
    Progress(u8),
    Loaded {
        location: String,
        asset: Box<dyn SceneNode>,
    },
    /// One candidate could not be fetched, parsed or fitted.
    Rejected { location: String, error: SceneError },
    /// All candidates failed, or there were none.
    Exhausted { last_error: Option<SceneError> },
}

pub struct LoadEvent {
    pub session: SessionToken,
    pub kind: LoadEventKind,
}

impl std::fmt::Debug for LoadEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.kind {
            LoadEventKind::Progress(p) => format!("Progress({p})"),
            LoadEventKind::Loaded { location, .. } => format!("Loaded({location})"),
            LoadEventKind::Rejected { location, error } => format!("Rejected({location}: {error})"),
            LoadEventKind::Exhausted { last_error } => format!("Exhausted({last_error:?})"),
        };
        f.debug_struct("LoadEvent")
            .field("session", &self.session)
            .field("kind", &kind)
            .finish()
    }
}

/// One pass over the candidate assets of a room.
#[derive(Clone, Debug)]
pub struct AssetLoadJob {
    pub session: SessionToken,
    pub room: RoomType,
    pub candidates: Vec<String>,
}

impl AssetLoadJob {
    /// Tries every candidate until one can be fetched, parsed and fitted. Emits a
    /// progress event after each attempt, `Rejected` for each failed one and
    /// finishes with either `Loaded` or `Exhausted`.
    pub async fn run<F, C>(self, fetcher: F, mut emit: C)
    where
        F: AssetFetcher,
        C: FnMut(LoadEvent),
    {
        let session = self.session;
        let total = self.candidates.len();
        let descriptor = self.room.descriptor();
        let mut last_error = None;

        for (completed, location) in self.candidates.into_iter().enumerate() {
            let started = Instant::now();
            let attempt = load_candidate(&fetcher, &location, &descriptor).await;
            emit(LoadEvent {
                session,
                kind: LoadEventKind::Progress(((completed + 1) * 100 / total) as u8),
            });
            match attempt {
                Ok(asset) => {
                    info!(
                        "Loaded asset {} for {} in {:?}",
                        location,
                        self.room,
                        started.elapsed()
                    );
                    emit(LoadEvent {
                        session,
                        kind: LoadEventKind::Loaded { location, asset },
                    });
                    return;
                }
                Err(e) => {
                    warn!("{}", e);
                    emit(LoadEvent {
                        session,
                        kind: LoadEventKind::Rejected {
                            location,
                            error: e.clone(),
                        },
                    });
                    last_error = Some(e);
                }
            }
        }
        emit(LoadEvent {
            session,
            kind: LoadEventKind::Exhausted { last_error },
        });
    }
}

async fn load_candidate<F: AssetFetcher>(
    fetcher: &F,
    location: &str,
    room: &RoomDescriptor,
) -> Result<Box<dyn SceneNode>, SceneError> {
    let bytes = fetcher.fetch(location).await?;
    let mut asset = resources::parse_asset(location, &bytes)
        .await
        .map_err(|e| SceneError::asset(location, format!("{e:#}")))?;
    fit_to_room(asset.as_mut(), room).map_err(|reason| SceneError::asset(location, reason))?;
    Ok(asset)
}

/// Scales an asset uniformly so it covers at most 80% of the room footprint and
/// 90% of its height, centers it on x/z and puts it on the floor.
pub fn fit_to_room(asset: &mut dyn SceneNode, room: &RoomDescriptor) -> Result<(), String> {
    asset.update_world_transforms(&Instance::new());
    let (min, max) = world_bounds(asset).ok_or("asset has no geometry")?;
    let size = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    let limits = [
        room.width * FOOTPRINT_FILL,
        room.height * HEIGHT_FILL,
        room.depth * FOOTPRINT_FILL,
    ];
    let scale = size
        .iter()
        .zip(limits)
        .filter(|(extent, _)| **extent > f32::EPSILON)
        .map(|(extent, limit)| limit / extent)
        .fold(f32::INFINITY, f32::min);
    if !scale.is_finite() {
        return Err("asset has no extent".to_string());
    }

    let center_x = (min[0] + max[0]) / 2.0;
    let center_z = (min[2] + max[2]) / 2.0;
    let fit = Instance::at(-center_x * scale, -min[1] * scale, -center_z * scale).scaled(scale);
    let local = &fit * asset.get_local_transform();
    asset.set_local_transform(local);
    asset.update_world_transforms(&Instance::new());
    Ok(())
}

/// Loaded assets of one viewer keyed by location, plus the locations known to fail.
#[derive(Default)]
pub struct AssetCache {
    assets: HashMap<String, Box<dyn SceneNode>>,
    failed: HashSet<String>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh copy of the cached asset, sharing geometry with the cached one.
    pub fn get(&self, location: &str) -> Option<Box<dyn SceneNode>> {
        self.assets.get(location).map(|asset| asset.boxed_clone())
    }

    pub fn insert(&mut self, location: &str, asset: &dyn SceneNode) {
        self.failed.remove(location);
        self.assets.insert(location.to_string(), asset.boxed_clone());
    }

    pub fn mark_failed(&mut self, location: &str) {
        self.failed.insert(location.to_string());
    }

    pub fn is_known_failure(&self, location: &str) -> bool {
        self.failed.contains(location)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.assets.contains_key(location)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
