use std::{error::Error, path::Path};

use eframe::glow;

const FALLBACK_SIZE: usize = 64;
const FALLBACK_CELL: usize = 8;

/// An RGBA8 texture living on the GPU.
#[derive(Debug, Clone)]
pub struct Texture(glow::Texture);

impl Texture {
    /// Decodes an image file and uploads it. The image is flipped
    /// vertically because GL samples with the origin at the bottom left.
    pub fn from_file(gl: &glow::Context, path: &Path) -> Result<Self, Box<dyn Error>> {
        let img = image::open(path)?.flipv();
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        Ok(Self::from_rgba(gl, w as i32, h as i32, rgba.as_raw()))
    }

    /// Uploads raw RGBA8 pixels with repeat wrapping and mipmapped
    /// linear sampling.
    pub fn from_rgba(gl: &glow::Context, w: i32, h: i32, pixels: &[u8]) -> Self {
        unsafe {
            use glow::HasContext as _;

            let tex = gl.create_texture().expect("Cannot create texture");
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                w,
                h,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);

            Self(tex)
        }
    }

    /// The stand-in used when a texture file cannot be loaded.
    pub fn checkerboard(gl: &glow::Context) -> Self {
        let pixels = checkerboard_pixels(FALLBACK_SIZE, FALLBACK_SIZE, FALLBACK_CELL);
        Self::from_rgba(gl, FALLBACK_SIZE as i32, FALLBACK_SIZE as i32, &pixels)
    }

    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            use glow::HasContext as _;

            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.0));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.delete_texture(self.0);
        }
    }
}

/// Two-tone checkerboard pixels, `cell` texels per square.
pub fn checkerboard_pixels(w: usize, h: usize, cell: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            let tone = if ((x / cell) + (y / cell)) % 2 == 0 {
                200
            } else {
                60
            };
            pixels.extend_from_slice(&[tone, tone, tone, 255]);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_is_rgba_sized() {
        let px = checkerboard_pixels(16, 8, 4);
        assert_eq!(px.len(), 16 * 8 * 4);
        // Fully opaque.
        assert!(px.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn checkerboard_alternates_per_cell() {
        let px = checkerboard_pixels(16, 16, 4);
        let texel = |x: usize, y: usize| px[(y * 16 + x) * 4];

        assert_eq!(texel(0, 0), texel(8, 0));
        assert_ne!(texel(0, 0), texel(4, 0));
        assert_ne!(texel(0, 0), texel(0, 4));
        assert_eq!(texel(4, 4), texel(0, 0));
    }
}
