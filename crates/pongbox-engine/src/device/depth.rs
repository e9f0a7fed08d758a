use winit::dpi::PhysicalSize;

/// Depth buffer format shared by every depth-tested pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth buffer matching the surface size.
///
/// Recreated whenever the surface is resized.
pub struct DepthTarget {
    texture: wgpu::Texture,
    size: PhysicalSize<u32>,
}

impl DepthTarget {
    pub fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pongbox depth buffer"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        Self { texture, size }
    }

    /// Recreates the buffer if `size` differs from the current one.
    pub fn ensure_size(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        if self.size == size || size.width == 0 || size.height == 0 {
            return;
        }
        *self = Self::new(device, size);
    }

    pub fn view(&self) -> wgpu::TextureView {
        self.texture
            .create_view(&wgpu::TextureViewDescriptor::default())
    }
}
