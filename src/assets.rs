use std::{
    fs,
    path::{Path, PathBuf},
};

use eframe::glow;

use crate::gfx::{Shader, Texture};

pub const SHADER_ROOT: &str = "Shaders";
pub const TEXTURE_ROOT: &str = "Textures";

/// `Shaders/Vertex/<name>.v`
pub fn vertex_shader_path(name: &str) -> PathBuf {
    Path::new(SHADER_ROOT)
        .join("Vertex")
        .join(format!("{name}.v"))
}

/// `Shaders/Fragment/<name>.f`
pub fn fragment_shader_path(name: &str) -> PathBuf {
    Path::new(SHADER_ROOT)
        .join("Fragment")
        .join(format!("{name}.f"))
}

// A missing or unreadable file is reported and replaced with empty source,
// which then fails compilation with its own diagnostic. The exercise keeps
// running either way.
fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            log::error!("could not read shader source {}: {e}", path.display());
            String::new()
        }
    }
}

/// Builds a program from the conventionally named stage files.
pub fn load_shader(gl: &glow::Context, vtx_name: &str, frag_name: &str) -> Shader {
    let vtx = read_source(&vertex_shader_path(vtx_name));
    let frag = read_source(&fragment_shader_path(frag_name));
    Shader::from_src(gl, &vtx, &frag)
}

/// Finds `Textures/<stem>.*`, whatever the image format.
pub fn find_texture(stem: &str) -> Option<PathBuf> {
    let pattern = format!("{TEXTURE_ROOT}/{stem}.*");
    glob::glob(&pattern)
        .expect("Invalid Glob pattern")
        .filter_map(Result::ok)
        .next()
}

/// Loads a texture by stem, falling back to the checkerboard when the file
/// is missing or will not decode.
pub fn load_texture(gl: &glow::Context, stem: &str) -> Texture {
    let Some(path) = find_texture(stem) else {
        log::error!("no file matches {TEXTURE_ROOT}/{stem}.*, using the checkerboard");
        return Texture::checkerboard(gl);
    };

    match Texture::from_file(gl, &path) {
        Ok(tex) => tex,
        Err(e) => {
            log::error!(
                "could not load texture {}: {e}, using the checkerboard",
                path.display()
            );
            Texture::checkerboard(gl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_paths_follow_the_layout_convention() {
        assert_eq!(
            vertex_shader_path("vertex_color"),
            Path::new("Shaders/Vertex/vertex_color.v")
        );
        assert_eq!(
            fragment_shader_path("vertex_color"),
            Path::new("Shaders/Fragment/vertex_color.f")
        );
    }

    #[test]
    fn missing_texture_stems_find_nothing() {
        assert!(find_texture("definitely_not_a_texture").is_none());
    }

    #[test]
    fn the_container_texture_ships_with_the_exercises() {
        // cargo runs tests from the package root, next to Textures/.
        assert!(find_texture("container").is_some());
    }
}
