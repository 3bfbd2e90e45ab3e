use std::{mem::offset_of, ptr::slice_from_raw_parts};

use eframe::glow;
use glam::{Vec2, Vec3, Vec4};

use crate::gfx::{Model, Shader, Vertex};

/// A vertex array uploaded once and drawn every frame, with an optional
/// index buffer for the element-buffer exercises. The GL-side objects are
/// created in `setup_gl` and live until `destroy_gl`.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub verts: Vec<Vertex>,
    indices: Option<Vec<u32>>,

    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    ebo: Option<glow::Buffer>,
}

impl Mesh {
    pub fn new(verts: Vec<Vertex>) -> Self {
        Self {
            verts,
            indices: None,
            vao: None,
            vbo: None,
            ebo: None,
        }
    }

    pub fn with_indices(verts: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            verts,
            indices: Some(indices),
            vao: None,
            vbo: None,
            ebo: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |i| i.len())
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                             Hardcoded Tutorial Geometry                                           //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Mesh {
    /// A rectangle built from two triangles, duplicating the shared corners.
    pub fn rectangle() -> Self {
        let corners = [
            // first triangle
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
            // second triangle
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ];
        Self::new(
            corners
                .into_iter()
                .map(|pos| Vertex::flat(pos, Vec3::ONE))
                .collect(),
        )
    }

    /// The same rectangle with the shared corners deduplicated through an
    /// element buffer, plus colors and texture coordinates.
    pub fn indexed_quad() -> Self {
        let verts = vec![
            Vertex::new(
                Vec3::new(0.5, 0.5, 0.0),
                Vec4::new(1.0, 0.0, 0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ),
            Vertex::new(
                Vec3::new(0.5, -0.5, 0.0),
                Vec4::new(0.0, 1.0, 0.0, 1.0),
                Vec2::new(1.0, 0.0),
            ),
            Vertex::new(
                Vec3::new(-0.5, -0.5, 0.0),
                Vec4::new(0.0, 0.0, 1.0, 1.0),
                Vec2::new(0.0, 0.0),
            ),
            Vertex::new(
                Vec3::new(-0.5, 0.5, 0.0),
                Vec4::new(1.0, 1.0, 0.0, 1.0),
                Vec2::new(0.0, 1.0),
            ),
        ];
        Self::with_indices(verts, vec![0, 1, 3, 1, 2, 3])
    }

    /// A unit cube as 36 plain vertices with texture coordinates.
    pub fn cube() -> Self {
        #[rustfmt::skip]
        const FACES: [([f32; 3], [f32; 2]); 36] = [
            // back
            ([-0.5, -0.5, -0.5], [0.0, 0.0]),
            ([ 0.5,  0.5, -0.5], [1.0, 1.0]),
            ([ 0.5, -0.5, -0.5], [1.0, 0.0]),
            ([ 0.5,  0.5, -0.5], [1.0, 1.0]),
            ([-0.5, -0.5, -0.5], [0.0, 0.0]),
            ([-0.5,  0.5, -0.5], [0.0, 1.0]),
            // front
            ([-0.5, -0.5,  0.5], [0.0, 0.0]),
            ([ 0.5, -0.5,  0.5], [1.0, 0.0]),
            ([ 0.5,  0.5,  0.5], [1.0, 1.0]),
            ([ 0.5,  0.5,  0.5], [1.0, 1.0]),
            ([-0.5,  0.5,  0.5], [0.0, 1.0]),
            ([-0.5, -0.5,  0.5], [0.0, 0.0]),
            // left
            ([-0.5,  0.5,  0.5], [1.0, 0.0]),
            ([-0.5,  0.5, -0.5], [1.0, 1.0]),
            ([-0.5, -0.5, -0.5], [0.0, 1.0]),
            ([-0.5, -0.5, -0.5], [0.0, 1.0]),
            ([-0.5, -0.5,  0.5], [0.0, 0.0]),
            ([-0.5,  0.5,  0.5], [1.0, 0.0]),
            // right
            ([ 0.5,  0.5,  0.5], [1.0, 0.0]),
            ([ 0.5, -0.5, -0.5], [0.0, 1.0]),
            ([ 0.5,  0.5, -0.5], [1.0, 1.0]),
            ([ 0.5, -0.5, -0.5], [0.0, 1.0]),
            ([ 0.5,  0.5,  0.5], [1.0, 0.0]),
            ([ 0.5, -0.5,  0.5], [0.0, 0.0]),
            // bottom
            ([-0.5, -0.5, -0.5], [0.0, 1.0]),
            ([ 0.5, -0.5, -0.5], [1.0, 1.0]),
            ([ 0.5, -0.5,  0.5], [1.0, 0.0]),
            ([ 0.5, -0.5,  0.5], [1.0, 0.0]),
            ([-0.5, -0.5,  0.5], [0.0, 0.0]),
            ([-0.5, -0.5, -0.5], [0.0, 1.0]),
            // top
            ([-0.5,  0.5, -0.5], [0.0, 1.0]),
            ([ 0.5,  0.5,  0.5], [1.0, 0.0]),
            ([ 0.5,  0.5, -0.5], [1.0, 1.0]),
            ([ 0.5,  0.5,  0.5], [1.0, 0.0]),
            ([-0.5,  0.5, -0.5], [0.0, 1.0]),
            ([-0.5,  0.5,  0.5], [0.0, 0.0]),
        ];

        Self::new(
            FACES
                .into_iter()
                .map(|(pos, uv)| Vertex::new(Vec3::from(pos), Vec4::ONE, Vec2::from(uv)))
                .collect(),
        )
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                  GL Plumbing                                                      //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn vertex_bytes(verts: &[Vertex]) -> &[u8] {
    unsafe {
        slice_from_raw_parts(
            verts.as_ptr() as *const u8,
            verts.len() * size_of::<Vertex>(),
        )
        .as_ref()
        .unwrap()
    }
}

fn index_bytes(indices: &[u32]) -> &[u8] {
    unsafe {
        slice_from_raw_parts(
            indices.as_ptr() as *const u8,
            indices.len() * size_of::<u32>(),
        )
        .as_ref()
        .unwrap()
    }
}

impl Model for Mesh {
    fn setup_gl(&mut self, gl: &glow::Context) {
        // Do not setup twice!
        if self.vao.is_some() || self.vbo.is_some() {
            panic!("Trying to setup GL Twice");
        }

        unsafe {
            use glow::HasContext as _;

            match gl.create_vertex_array() {
                Ok(vao) => self.vao = Some(vao),
                Err(e) => panic!("{}", e),
            };
            match gl.create_buffer() {
                Ok(vbo) => self.vbo = Some(vbo),
                Err(e) => panic!("{}", e),
            };

            gl.bind_vertex_array(self.vao);
            gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, vertex_bytes(&self.verts), glow::STATIC_DRAW);

            if let Some(indices) = &self.indices {
                match gl.create_buffer() {
                    Ok(ebo) => self.ebo = Some(ebo),
                    Err(e) => panic!("{}", e),
                };
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.ebo);
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    index_bytes(indices),
                    glow::STATIC_DRAW,
                );
            }

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, size_of::<Vertex>() as _, 0);

            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                4,
                glow::FLOAT,
                false,
                size_of::<Vertex>() as _,
                offset_of!(Vertex, clr) as _,
            );

            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                size_of::<Vertex>() as _,
                offset_of!(Vertex, uv) as _,
            );

            gl.bind_vertex_array(None)
        }
    }

    fn destroy_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if let (Some(vao), Some(vbo)) = (self.vao, self.vbo) {
                gl.delete_vertex_array(vao);
                gl.delete_buffer(vbo);
            }
            if let Some(ebo) = self.ebo {
                gl.delete_buffer(ebo);
            }

            self.vao = None;
            self.vbo = None;
            self.ebo = None;
        }
    }

    fn update_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if self.vao.is_some() && self.vbo.is_some() {
                gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
                gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, vertex_bytes(&self.verts));
            }
        }
    }

    fn draw(&mut self, gl: &glow::Context, shader: &Shader) {
        // Uniforms are the exercise's business; the mesh only issues the call.
        let _ = shader;

        if self.vao.is_none() || self.vbo.is_none() {
            return;
        }

        unsafe {
            use glow::HasContext as _;

            gl.bind_vertex_array(self.vao);
            match &self.indices {
                Some(indices) => {
                    gl.draw_elements(glow::TRIANGLES, indices.len() as _, glow::UNSIGNED_INT, 0)
                }
                None => gl.draw_arrays(glow::TRIANGLES, 0, self.verts.len() as _),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_duplicates_the_shared_edge() {
        let mesh = Mesh::rectangle();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn indexed_quad_dedups_through_the_element_buffer() {
        let mesh = Mesh::indexed_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);

        let indices = mesh.indices.as_ref().unwrap();
        assert!(indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn cube_is_centered_on_the_origin() {
        let mesh = Mesh::cube();
        assert_eq!(mesh.vertex_count(), 36);

        let sum: Vec3 = mesh.verts.iter().map(|v| v.pos).sum();
        assert!(sum.length() < 1e-5);
        for v in &mesh.verts {
            assert_eq!(v.pos.abs(), Vec3::splat(0.5));
            assert!(v.uv.x >= 0.0 && v.uv.x <= 1.0);
            assert!(v.uv.y >= 0.0 && v.uv.y <= 1.0);
        }
    }
}
