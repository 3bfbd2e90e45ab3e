#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(unsafe_code)]

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;

use gl_learning::app::{max_vertex_attribs, Controls};
use gl_learning::assets;
use gl_learning::gfx::shader::{ShaderSet, UniformValue};
use gl_learning::gfx::{Mesh, Model, Shader};

const WIDTH: f32 = 800f32;
const HEIGHT: f32 = 600f32;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([WIDTH, HEIGHT]),
        multisampling: 2,
        depth_buffer: 24,

        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    eframe::run_native(
        "Exercise 03: Indexed Quad",
        options,
        Box::new(|cc| Ok(Box::new(IndexedQuad::new(cc)))),
    )
}

struct IndexedQuad {
    controls: Controls,
    shader: Shader,
    shaders: ShaderSet,
    mesh: Arc<Mutex<Mesh>>,
}

impl IndexedQuad {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        log::info!(
            "Maximum nr of vertex attributes supported: {}",
            max_vertex_attribs(gl)
        );

        let mut shaders = ShaderSet::new();
        let shader = shaders.track(assets::load_shader(gl, "vertex_color", "vertex_color"));

        let mut mesh = Mesh::indexed_quad();
        mesh.setup_gl(gl);

        Self {
            controls: Controls::new(),
            shader,
            shaders,
            mesh: Arc::new(Mutex::new(mesh)),
        }
    }
}

impl eframe::App for IndexedQuad {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (quit, toggle, time) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::T),
                i.time,
            )
        });
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if toggle {
            self.controls.toggle_wireframe();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::canvas(ui.style()).show(ui, |ui| {
                self.custom_painting(ui, time);
            });
        });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.shaders.destroy_all(gl);
            self.mesh.lock().destroy_gl(gl);
        }
    }
}

impl IndexedQuad {
    fn custom_painting(&mut self, ui: &mut egui::Ui, time: f64) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        // Slide the quad back and forth so the uniform visibly updates.
        let offset = (time.sin() * 0.5) as f32;

        let mesh = self.mesh.clone();
        let shader = self.shader.clone();
        let wireframe = self.controls.wireframe;
        let bg_color = self.controls.bg_color;

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let mesh = &mut mesh.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    if wireframe {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE);
                    } else {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                    }
                    gl.clear_color(
                        bg_color.r() as f32 / u8::MAX as f32,
                        bg_color.g() as f32 / u8::MAX as f32,
                        bg_color.b() as f32 / u8::MAX as f32,
                        bg_color.a() as f32 / u8::MAX as f32,
                    );
                    gl.clear(glow::COLOR_BUFFER_BIT);
                }

                shader.use_program(gl);
                shader.set_uniform(gl, "offset", UniformValue::F32(offset));
                mesh.draw(gl, &shader);

                unsafe {
                    use glow::HasContext as _;
                    gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                }
            })),
        };
        ui.painter().add(callback);
    }
}
