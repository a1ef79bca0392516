use wgpu::{Buffer, BufferUsages, Device, Queue};

use game_of_life::config::Palette;
use game_of_life::Grid;

/// Render parameters passed to the fragment shader (64 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    // Grid and surface info (16 bytes)
    pub grid_width: u32,
    pub grid_height: u32,
    pub surface_width: f32,
    pub surface_height: f32,

    // Palette, RGBA in the surface's color space (48 bytes)
    pub alive_color: [f32; 4],
    pub dead_color: [f32; 4],
    pub grid_line_color: [f32; 4],
}

/// Storage buffer mirroring the grid (one u32 per cell, row-major) and the
/// uniform buffer for render parameters
pub struct GridBuffers {
    pub cell_buffer: Buffer,
    pub render_params_buffer: Buffer,
    /// CPU-side staging for the per-frame upload
    staging: Vec<u32>,
    pub width: u32,
    pub height: u32,
}

impl GridBuffers {
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        let cell_count = width as usize * height as usize;
        let buffer_size = (cell_count * std::mem::size_of::<u32>()) as u64;

        let cell_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid-cell-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            cell_buffer,
            render_params_buffer,
            staging: Vec::with_capacity(cell_count),
            width,
            height,
        }
    }

    /// Upload the current generation
    pub fn upload_cells(&mut self, queue: &Queue, grid: &Grid) {
        debug_assert_eq!((grid.width(), grid.height()), (self.width, self.height));

        self.staging.clear();
        self.staging.extend(grid.cells().map(|cell| cell.to_gpu()));
        queue.write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(&self.staging));
    }

    /// Update render parameters for the current surface
    pub fn update_render_params(
        &self,
        queue: &Queue,
        surface_size: (u32, u32),
        palette: &Palette,
        srgb_surface: bool,
    ) {
        let color = |rgb: [u8; 3]| to_shader_color(rgb, srgb_surface);
        let params = RenderParams {
            grid_width: self.width,
            grid_height: self.height,
            surface_width: surface_size.0 as f32,
            surface_height: surface_size.1 as f32,
            alive_color: color(palette.alive),
            dead_color: color(palette.dead),
            grid_line_color: color(palette.grid_line),
        };
        queue.write_buffer(&self.render_params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

/// Convert an 8-bit sRGB color to shader output. sRGB surfaces expect linear
/// values and re-encode on write.
fn to_shader_color(rgb: [u8; 3], srgb_surface: bool) -> [f32; 4] {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if !srgb_surface {
            c
        } else if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), 1.0]
}
