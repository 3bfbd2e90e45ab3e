pub mod camera;
pub mod mesh;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use camera::Camera;
pub use mesh::Mesh;
pub use shader::Shader;
pub use texture::Texture;
pub use vertex::Vertex;

use eframe::glow;

/// Anything that owns GL-side objects and can be drawn with a bound shader.
pub trait Model {
    fn setup_gl(&mut self, gl: &glow::Context);
    fn destroy_gl(&mut self, gl: &glow::Context);
    fn update_gl(&mut self, gl: &glow::Context);

    fn draw(&mut self, gl: &glow::Context, shader: &Shader);
}
