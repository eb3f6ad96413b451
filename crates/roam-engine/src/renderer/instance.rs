use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the page-side renderer.
/// Must match the page protocol: 8 floats = 32 bytes stride.
///
/// Instances arrive already sorted back-to-front; `z` is passed along so the
/// page may depth-test instead of trusting order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in world space (sprite centre).
    pub x: f32,
    /// Y position in world space (sprite centre).
    pub y: f32,
    /// Draw depth within the layer.
    pub z: f32,
    /// World-space rendered size in game units.
    pub size: f32,
    /// Atlas column.
    pub col: f32,
    /// Atlas row.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Atlas index.
    pub atlas: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all sprite instances for one frame.
pub struct RenderBuffer {
    /// Instances in draw order.
    pub instances: Vec<RenderInstance>,
    capacity: usize,
    /// Instances dropped this frame because the buffer was full.
    overflow: u32,
}

impl RenderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
            overflow: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.overflow = 0;
    }

    /// Push an instance; silently counts an overflow once capacity is reached.
    pub fn push(&mut self, instance: RenderInstance) {
        if self.instances.len() >= self.capacity {
            self.overflow += 1;
            return;
        }
        self.instances.push(instance);
    }

    pub fn extend(&mut self, instances: impl IntoIterator<Item = RenderInstance>) {
        for instance in instances {
            self.push(instance);
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn overflow(&self) -> u32 {
        self.overflow
    }

    /// Raw pointer to instance data for zero-copy reads from the page.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.overflow(), 1);

        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.overflow(), 0);
    }
}
