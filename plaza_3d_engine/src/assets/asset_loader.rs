/// Asynchronous asset loading seam.
///
/// A loader receives a locator and an `AssetCompletion`. Whenever the load
/// finishes (on another thread or in a later `poll`), the completion sends
/// the result over a channel. Nothing touches the scene from the loader:
/// the frame driver drains the channel at the start of the next tick and
/// runs the registered `SceneTask`s there.

use std::sync::mpsc::{self, Receiver, Sender};
use rustc_hash::FxHashMap;
use crate::anim::{AnimationClip, Skeleton};
use crate::error::{Error, Result};
use crate::frame::SimulationContext;
use crate::scene::SceneFragment;
use crate::{engine_debug, engine_error};

/// Identifies one request (a locator may be requested several times)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Content of a successfully loaded asset
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub locator: String,
    pub fragment: SceneFragment,
    /// Embedded animation clips
    pub clips: Vec<AnimationClip>,
    /// Skeleton the clips animate, for skinned assets
    pub skeleton: Option<Skeleton>,
}

impl LoadedAsset {
    /// Static asset without animation
    pub fn new(locator: impl Into<String>, fragment: SceneFragment) -> Self {
        Self {
            locator: locator.into(),
            fragment,
            clips: Vec::new(),
            skeleton: None,
        }
    }

    /// Builder: attach a skeleton and its clips
    pub fn with_animation(mut self, skeleton: Skeleton, clips: Vec<AnimationClip>) -> Self {
        self.skeleton = Some(skeleton);
        self.clips = clips;
        self
    }
}

/// Result of one request
#[derive(Debug, Clone)]
pub enum AssetEvent {
    Loaded(LoadedAsset),
    Failed { locator: String, reason: String },
}

impl AssetEvent {
    pub fn locator(&self) -> &str {
        match self {
            AssetEvent::Loaded(asset) => &asset.locator,
            AssetEvent::Failed { locator, .. } => locator,
        }
    }
}

/// Completion handle handed to a loader for one request.
#[derive(Debug, Clone)]
pub struct AssetCompletion {
    request: RequestId,
    locator: String,
    sender: Sender<(RequestId, AssetEvent)>,
}

impl AssetCompletion {
    pub fn request(&self) -> RequestId {
        self.request
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Deliver a loaded asset
    pub fn complete(self, fragment: SceneFragment, clips: Vec<AnimationClip>, skeleton: Option<Skeleton>) {
        let asset = LoadedAsset {
            locator: self.locator.clone(),
            fragment,
            clips,
            skeleton,
        };
        self.send(AssetEvent::Loaded(asset));
    }

    /// Deliver a prepared asset (its locator is replaced by the requested one)
    pub fn complete_with(self, mut asset: LoadedAsset) {
        asset.locator = self.locator.clone();
        self.send(AssetEvent::Loaded(asset));
    }

    /// Report a network or parse failure
    pub fn fail(self, reason: impl Into<String>) {
        let event = AssetEvent::Failed { locator: self.locator.clone(), reason: reason.into() };
        self.send(event);
    }

    fn send(self, event: AssetEvent) {
        // The inbox is gone once the session ends; late results are dropped
        let _ = self.sender.send((self.request, event));
    }
}

/// Asset-loading collaborator
pub trait AssetLoader {
    /// Start loading `locator`; the result goes through `completion`
    fn request(&mut self, locator: &str, completion: AssetCompletion);

    /// Called once per frame so cooperative loaders can make progress
    fn poll(&mut self) {}
}

/// Receiving end of every completion.
pub struct AssetInbox {
    sender: Sender<(RequestId, AssetEvent)>,
    receiver: Receiver<(RequestId, AssetEvent)>,
    next_request: u64,
}

impl AssetInbox {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver, next_request: 1 }
    }

    /// Completion handle for a new request
    pub fn completion(&mut self, locator: &str) -> AssetCompletion {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        AssetCompletion {
            request,
            locator: locator.to_string(),
            sender: self.sender.clone(),
        }
    }

    /// Every event delivered so far, in arrival order
    pub fn drain(&self) -> Vec<(RequestId, AssetEvent)> {
        self.receiver.try_iter().collect()
    }
}

impl Default for AssetInbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene mutation run at the start of the tick after its asset arrived
pub type SceneTask = Box<dyn FnOnce(&mut SimulationContext, LoadedAsset) -> Result<()>>;

/// A task paired with the asset it was waiting for
pub struct ReadyTask {
    pub task: SceneTask,
    pub asset: LoadedAsset,
}

impl ReadyTask {
    /// Run the task. Errors are logged and the feature stays absent.
    pub fn apply(self, context: &mut SimulationContext) -> bool {
        let locator = self.asset.locator.clone();
        match (self.task)(context, self.asset) {
            Ok(()) => {
                engine_debug!("plaza3d::AssetQueue", "Applied deferred task for '{}'", locator);
                true
            }
            Err(err) => {
                engine_error!("plaza3d::AssetQueue", "Deferred task for '{}' failed: {}", locator, err);
                false
            }
        }
    }
}

/// Pending requests and their completion tasks.
pub struct AssetQueue {
    inbox: AssetInbox,
    tasks: FxHashMap<RequestId, SceneTask>,
    failures: Vec<Error>,
}

impl AssetQueue {
    pub fn new() -> Self {
        Self {
            inbox: AssetInbox::new(),
            tasks: FxHashMap::default(),
            failures: Vec::new(),
        }
    }

    /// Request `locator` from `loader` and run `task` once it has loaded
    pub fn request(&mut self, loader: &mut dyn AssetLoader, locator: &str, task: SceneTask) -> RequestId {
        let completion = self.inbox.completion(locator);
        let request = completion.request();
        self.tasks.insert(request, task);
        engine_debug!("plaza3d::AssetQueue", "Requested '{}' ({:?})", locator, request);
        loader.request(locator, completion);
        request
    }

    /// Number of requests still waiting for a result
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Failures reported so far (never retried)
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    /// Drain delivered results. Failures are logged and their tasks dropped.
    pub fn collect(&mut self) -> Vec<ReadyTask> {
        let mut ready = Vec::new();
        for (request, event) in self.inbox.drain() {
            let Some(task) = self.tasks.remove(&request) else {
                engine_debug!("plaza3d::AssetQueue",
                    "Ignoring result for unknown request {:?} ('{}')", request, event.locator());
                continue;
            };
            match event {
                AssetEvent::Loaded(asset) => ready.push(ReadyTask { task, asset }),
                AssetEvent::Failed { locator, reason } => {
                    engine_error!("plaza3d::AssetQueue", "Failed to load '{}': {}", locator, reason);
                    self.failures.push(Error::AssetLoadFailed { locator, reason });
                }
            }
        }
        ready
    }
}

impl Default for AssetQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "asset_loader_tests.rs"]
mod tests;
