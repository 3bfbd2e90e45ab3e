use eframe::glow;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Value types that can be written to a named uniform.
#[derive(Debug, Clone, Copy)]
pub enum UniformValue {
    Bool(bool),
    I32(i32),
    F32(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// A linked vertex + fragment shader program.
///
/// Compile and link failures are reported through the logger and then
/// swallowed: the constructor always hands back a handle, and the recorded
/// status flags tell the caller whether it is usable. Drawing with a failed
/// program draws nothing.
#[derive(Debug, Clone)]
pub struct Shader {
    program: glow::Program,
    compile_ok: bool,
    link_ok: bool,
}

impl Shader {
    pub fn from_src(gl: &glow::Context, vtx: &str, frag: &str) -> Self {
        use glow::HasContext as _;

        unsafe {
            let program = gl.create_program().expect("Cannot create program");

            let shader_sources = [(glow::VERTEX_SHADER, vtx), (glow::FRAGMENT_SHADER, frag)];

            let mut compile_ok = true;
            let shaders: Vec<_> = shader_sources
                .iter()
                .map(|(shader_type, shader_source)| {
                    let shader = gl
                        .create_shader(*shader_type)
                        .expect("Cannot create shader");
                    gl.shader_source(shader, shader_source);
                    gl.compile_shader(shader);
                    if !gl.get_shader_compile_status(shader) {
                        compile_ok = false;
                        log::error!(
                            "{} shader failed to compile:\n{}",
                            stage_name(*shader_type),
                            gl.get_shader_info_log(shader)
                        );
                    }
                    gl.attach_shader(program, shader);
                    shader
                })
                .collect();

            gl.link_program(program);
            let link_ok = gl.get_program_link_status(program);
            if !link_ok {
                log::error!(
                    "shader program failed to link:\n{}",
                    gl.get_program_info_log(program)
                );
            }

            // The per-stage objects are no longer needed once linked.
            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            Self {
                program,
                compile_ok,
                link_ok,
            }
        }
    }

    /// Whether every stage compiled cleanly.
    pub fn compile_ok(&self) -> bool {
        self.compile_ok
    }

    /// Whether the program linked cleanly.
    pub fn link_ok(&self) -> bool {
        self.link_ok
    }

    /// Writes a uniform by name. The location is looked up on every call;
    /// a name that does not exist in the program resolves to no location,
    /// which the GL treats as a no-op rather than a fault.
    pub fn set_uniform(&self, gl: &glow::Context, name: &str, value: UniformValue) {
        use glow::HasContext as _;

        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            match value {
                UniformValue::Bool(v) => gl.uniform_1_i32(loc.as_ref(), v as i32),
                UniformValue::I32(v) => gl.uniform_1_i32(loc.as_ref(), v),
                UniformValue::F32(v) => gl.uniform_1_f32(loc.as_ref(), v),
                UniformValue::Vec2(v) => gl.uniform_2_f32_slice(loc.as_ref(), &v.to_array()),
                UniformValue::Vec3(v) => gl.uniform_3_f32_slice(loc.as_ref(), &v.to_array()),
                UniformValue::Vec4(v) => gl.uniform_4_f32_slice(loc.as_ref(), &v.to_array()),
                UniformValue::Mat4(v) => {
                    gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &v.to_cols_array())
                }
            }
        }
    }

    pub fn use_program(&self, gl: &glow::Context) {
        use glow::HasContext as _;

        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext as _;

        unsafe {
            gl.delete_program(self.program);
        }
    }
}

/// Keeps track of every live program an exercise has created, so shutdown
/// can delete them in one sweep and individual programs can be retired.
#[derive(Debug, Default)]
pub struct ShaderSet {
    live: Vec<Shader>,
}

impl ShaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a program as live and hands it back for use.
    pub fn track(&mut self, shader: Shader) -> Shader {
        self.live.push(shader.clone());
        shader
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drops a program from the live list without touching the GL. Returns
    /// the forgotten entry, or `None` if it was never tracked.
    pub fn forget(&mut self, shader: &Shader) -> Option<Shader> {
        let at = self
            .live
            .iter()
            .position(|s| s.program == shader.program)?;
        Some(self.live.remove(at))
    }

    /// Deletes one tracked program. Returns false if it was not tracked.
    pub fn destroy_one(&mut self, gl: &glow::Context, shader: &Shader) -> bool {
        match self.forget(shader) {
            Some(s) => {
                s.destroy(gl);
                true
            }
            None => false,
        }
    }

    /// Deletes every tracked program.
    pub fn destroy_all(&mut self, gl: &glow::Context) {
        for shader in self.live.drain(..) {
            shader.destroy(gl);
        }
    }
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn dummy(id: u32) -> Shader {
        Shader {
            program: glow::NativeProgram(NonZeroU32::new(id).unwrap()),
            compile_ok: true,
            link_ok: true,
        }
    }

    #[test]
    fn shader_set_tracks_live_programs() {
        let mut set = ShaderSet::new();
        assert!(set.is_empty());

        let a = set.track(dummy(1));
        let _b = set.track(dummy(2));
        assert_eq!(set.len(), 2);

        assert!(set.forget(&a).is_some());
        assert_eq!(set.len(), 1);

        // Forgetting it twice finds nothing.
        assert!(set.forget(&a).is_none());
    }

    #[test]
    fn stage_names_for_diagnostics() {
        assert_eq!(stage_name(glow::VERTEX_SHADER), "vertex");
        assert_eq!(stage_name(glow::FRAGMENT_SHADER), "fragment");
    }
}
