//! Canvas-to-PNG export.
//!
//! Copies the canvas texture into a mapped buffer and writes it out with the
//! `image` crate. Rows are padded to `COPY_BYTES_PER_ROW_ALIGNMENT` for the
//! copy and stripped again on the CPU.

use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// Read the canvas back and save it as a PNG at `path`.
///
/// Blocks until the GPU copy completes; acceptable for a user-triggered
/// export.
pub fn save_png(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    path: &Path,
) -> Result<(), ExportError> {
    let width = texture.width();
    let height = texture.height();
    if width == 0 || height == 0 {
        return Err(ExportError::BadDimensions(width, height));
    }

    let bytes_per_pixel = 4u32;
    let unpadded_bytes_per_row = width * bytes_per_pixel;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Export Readback Buffer"),
        size: (padded_bytes_per_row * height) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Export Encoder"),
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::Maintain::Wait);

    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(ExportError::BufferMapping(e.to_string())),
        Err(_) => {
            return Err(ExportError::BufferMapping(
                "map_async callback dropped".into(),
            ))
        }
    }

    let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
    {
        let data = buffer_slice.get_mapped_range();
        for row in data.chunks(padded_bytes_per_row as usize) {
            pixels.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
        }
    }
    readback.unmap();

    // The canvas alpha channel is blend bookkeeping, not coverage.
    for px in pixels.chunks_exact_mut(4) {
        px[3] = 255;
    }

    let img = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or(ExportError::BadDimensions(width, height))?;
    img.save(path)?;

    Ok(())
}

/// First free path of the form `base.png`, `base-1.png`, `base-2.png`, ...
pub fn numbered_path(base: &str) -> PathBuf {
    let first = PathBuf::from(format!("{base}.png"));
    if !first.exists() {
        return first;
    }
    for n in 1.. {
        let candidate = PathBuf::from(format!("{base}-{n}.png"));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("ran out of export filenames")
}
