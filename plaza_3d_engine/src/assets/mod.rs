//! Asset loading module
//!
//! Loader seam, completion channel and deferred scene tasks.

mod asset_loader;

pub use asset_loader::{
    AssetCompletion, AssetEvent, AssetInbox, AssetLoader, AssetQueue,
    LoadedAsset, ReadyTask, RequestId, SceneTask,
};
