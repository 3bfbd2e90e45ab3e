use glam::{Vec2, Vec3, Vec4};

/// One interleaved vertex as it is laid out in the vertex buffer. The
/// attribute pointers in [`crate::gfx::Mesh`] are derived from this layout,
/// so it must stay `#[repr(C)]`.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Vertex {
    pub pos: Vec3,
    pub clr: Vec4,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(pos: Vec3, clr: Vec4, uv: Vec2) -> Self {
        Self { pos, clr, uv }
    }

    /// A vertex with an opaque color and no texture coordinate, for the
    /// exercises that only care about position and color.
    pub fn flat(pos: Vec3, clr: Vec3) -> Self {
        Self {
            pos,
            clr: clr.extend(1.0),
            uv: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_vertices_are_opaque() {
        let v = Vertex::flat(Vec3::new(0.5, -0.5, 0.0), Vec3::new(1.0, 0.5, 0.2));
        assert_eq!(v.clr.w, 1.0);
        assert_eq!(v.uv, Vec2::ZERO);
    }
}
