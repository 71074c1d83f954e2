/// Render pipeline seam.
///
/// The frame driver hands one FrameSubmission per tick to a RenderBackend.
/// Geometry, materials, lighting and post-processing stay behind this trait.

use glam::Mat4;
use crate::error::Result;
use crate::scene::InstanceData;

/// Scene clear colour (white), RGBA
pub const CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameSubmission {
    pub frame: u64,
    /// Attached scene names, in attachment order
    pub scenes: Vec<String>,
    pub view_projection: Mat4,
    pub clear_color: [f32; 4],
    /// Visible nodes of the attached scenes
    pub instances: Vec<InstanceData>,
}

impl FrameSubmission {
    /// Instance records as raw bytes, ready for upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn view_projection_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.view_projection)
    }
}

/// Rendering collaborator
pub trait RenderBackend {
    /// Display one frame
    fn submit(&mut self, frame: &FrameSubmission) -> Result<()>;
}

/// Backend that discards every frame (headless runs)
pub struct NoOpBackend;

impl RenderBackend for NoOpBackend {
    fn submit(&mut self, _frame: &FrameSubmission) -> Result<()> {
        Ok(())
    }
}
