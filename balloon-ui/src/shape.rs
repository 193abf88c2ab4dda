//! Tessellation of balloon frames and pins into triangles

use bytemuck::{Pod, Zeroable};

use crate::geometry::{Color, Direction, Size};

/// Vertex format for shape rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    /// Position [x, y] in the owning view's coordinates
    pub position: [f32; 2],
    /// Color [r, g, b, a]
    pub color: [f32; 4],
}

impl ShapeVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub(crate) fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Triangulated filled polygon
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    vertices: Vec<ShapeVertex>,
    indices: Vec<u16>,
    size: Size,
}

impl Shape {
    /// Rounded rectangle filling `size`, triangulated as a fan from its center
    pub fn rounded_rect(size: Size, corner_radius: f32, color: Color) -> Self {
        use std::f32::consts::{FRAC_PI_2, PI, TAU};

        let (width, height) = (size.width, size.height);
        let radius = corner_radius.max(0.0).min(width / 2.0).min(height / 2.0);
        let segments_per_corner = if radius > 0.0 { 8 } else { 0 };

        let mut vertices = vec![ShapeVertex {
            position: [width / 2.0, height / 2.0],
            color,
        }];

        let corners = [
            (radius, radius, PI, FRAC_PI_2 * 3.0),                 // top-left
            (width - radius, radius, FRAC_PI_2 * 3.0, TAU),        // top-right
            (width - radius, height - radius, 0.0, FRAC_PI_2),     // bottom-right
            (radius, height - radius, FRAC_PI_2, PI),              // bottom-left
        ];

        for (cx, cy, start_angle, end_angle) in corners {
            for i in 0..=segments_per_corner {
                let angle = if segments_per_corner == 0 {
                    start_angle
                } else {
                    let t = i as f32 / segments_per_corner as f32;
                    start_angle + t * (end_angle - start_angle)
                };
                vertices.push(ShapeVertex {
                    position: [cx + radius * angle.cos(), cy + radius * angle.sin()],
                    color,
                });
            }
        }

        let edge_count = vertices.len() as u16 - 1;
        let mut indices = Vec::with_capacity(edge_count as usize * 3);
        for i in 0..edge_count {
            let next = (i + 1) % edge_count;
            indices.extend_from_slice(&[0, 1 + i, 1 + next]);
        }

        Self {
            vertices,
            indices,
            size,
        }
    }

    /// Triangle filling `size` whose tip points toward `direction`
    pub fn pin(direction: Direction, size: Size, color: Color) -> Self {
        let (w, h) = (size.width, size.height);
        let corners = match direction {
            Direction::Top => [[0.0, h], [w, h], [w / 2.0, 0.0]],
            Direction::Bottom => [[0.0, 0.0], [w, 0.0], [w / 2.0, h]],
            Direction::Left => [[w, 0.0], [w, h], [0.0, h / 2.0]],
            Direction::Right => [[0.0, 0.0], [0.0, h], [w, h / 2.0]],
        };

        Self {
            vertices: corners
                .iter()
                .map(|&position| ShapeVertex { position, color })
                .collect(),
            indices: vec![0, 1, 2],
            size,
        }
    }

    /// Get the vertices
    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    /// Get the indices
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Size of the view this shape fills
    pub fn size(&self) -> Size {
        self.size
    }

    /// Bounding box of the vertices [min_x, min_y, max_x, max_y]
    pub fn extent(&self) -> [f32; 4] {
        self.vertices.iter().fold(
            [f32::MAX, f32::MAX, f32::MIN, f32::MIN],
            |[x0, y0, x1, y1], v| {
                [
                    x0.min(v.position[0]),
                    y0.min(v.position[1]),
                    x1.max(v.position[0]),
                    y1.max(v.position[1]),
                ]
            },
        )
    }
}
