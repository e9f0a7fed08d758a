use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;

/// Decoded RGBA8 image with its full mip chain.
///
/// Level 0 is the source image; each following level halves both dimensions
/// (never below 1) down to 1x1.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub levels: Vec<Vec<u8>>,
}

impl TextureImage {
    /// Builds the mip chain for `image`.
    pub fn from_rgba(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "image has zero size");

        let mut levels = Vec::with_capacity(mip_level_count(width, height) as usize);
        let mut current = image;
        loop {
            let (w, h) = current.dimensions();
            let next = (w > 1 || h > 1)
                .then(|| image::imageops::resize(&current, (w / 2).max(1), (h / 2).max(1), FilterType::Triangle));
            levels.push(current.into_raw());
            match next {
                Some(n) => current = n,
                None => break,
            }
        }

        Ok(Self { width, height, levels })
    }

    /// 1x1 texel of the given color, without mips.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            levels: vec![rgba.to_vec()],
        }
    }

    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Dimensions of mip `level`.
    pub fn level_size(&self, level: u32) -> (u32, u32) {
        ((self.width >> level).max(1), (self.height >> level).max(1))
    }
}

pub(crate) fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Creates a sampled texture and uploads every level of `image`.
pub(crate) fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &TextureImage,
    label: &str,
) -> Result<wgpu::TextureView> {
    let limit = device.limits().max_texture_dimension_2d;
    anyhow::ensure!(
        image.width <= limit && image.height <= limit,
        "{label}: {}x{} exceeds the device limit of {limit}",
        image.width,
        image.height
    );

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: image.mip_level_count(),
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (level, data) in image.levels.iter().enumerate() {
        let level = u32::try_from(level).context("mip level index overflow")?;
        let (w, h) = image.level_size(level);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: level,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
    }

    Ok(texture.create_view(&wgpu::TextureViewDescriptor::default()))
}
