#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(unsafe_code)]

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use glam::Vec3;

use gl_learning::app::{Channel, Controls};
use gl_learning::assets;
use gl_learning::gfx::shader::{ShaderSet, UniformValue};
use gl_learning::gfx::{Mesh, Model, Shader, Vertex};

const WIDTH: f32 = 800f32;
const HEIGHT: f32 = 600f32;

const CHANNEL_STEP: f32 = 0.05;

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
        "Exercise 04: Two Triangles, Two Programs",
        options,
        Box::new(|cc| Ok(Box::new(TwoTriangles::new(cc)))),
    )
}

struct TwoTriangles {
    controls: Controls,
    uniform_shader: Shader,
    vertex_shader: Shader,
    shaders: ShaderSet,

    /// Left triangle, colored through a uniform the color keys drive.
    left: Arc<Mutex<Mesh>>,
    /// Right triangle, recolored on the CPU and re-uploaded every frame.
    right: Arc<Mutex<Mesh>>,
    base_colors: Vec<Vec3>,
}

impl TwoTriangles {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let mut shaders = ShaderSet::new();
        let uniform_shader = shaders.track(assets::load_shader(gl, "position", "uniform_color"));
        let vertex_shader = shaders.track(assets::load_shader(gl, "vertex_color", "vertex_color"));

        let mut left = Mesh::new(vec![
            Vertex::flat(Vec3::new(-0.9, -0.5, 0.0), Vec3::ONE),
            Vertex::flat(Vec3::new(-0.1, -0.5, 0.0), Vec3::ONE),
            Vertex::flat(Vec3::new(-0.5, 0.5, 0.0), Vec3::ONE),
        ]);
        left.setup_gl(gl);

        let base_colors = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let mut right = Mesh::new(vec![
            Vertex::flat(Vec3::new(0.1, -0.5, 0.0), base_colors[0]),
            Vertex::flat(Vec3::new(0.9, -0.5, 0.0), base_colors[1]),
            Vertex::flat(Vec3::new(0.5, 0.5, 0.0), base_colors[2]),
        ]);
        right.setup_gl(gl);

        Self {
            controls: Controls::new(),
            uniform_shader,
            vertex_shader,
            shaders,
            left: Arc::new(Mutex::new(left)),
            right: Arc::new(Mutex::new(right)),
            base_colors,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let (quit, steps) = ctx.input(|i| {
            let direction = if i.modifiers.shift {
                -CHANNEL_STEP
            } else {
                CHANNEL_STEP
            };
            let mut steps = Vec::new();
            if i.key_pressed(egui::Key::R) {
                steps.push((Channel::R, direction));
            }
            if i.key_pressed(egui::Key::G) {
                steps.push((Channel::G, direction));
            }
            if i.key_pressed(egui::Key::B) {
                steps.push((Channel::B, direction));
            }
            (i.key_pressed(egui::Key::Escape), steps)
        });

        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        for (channel, delta) in steps {
            self.controls.adjust_channel(channel, delta);
        }
    }
}

impl eframe::App for TwoTriangles {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        let time = ctx.input(|i| i.time);

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
            self.left.lock().destroy_gl(gl);
            self.right.lock().destroy_gl(gl);
        }
    }
}

impl TwoTriangles {
    fn custom_painting(&mut self, ui: &mut egui::Ui, time: f64) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        let pulse = (time.sin() / 2.0 + 0.5) as f32;
        let tint = self.controls.tint;

        let left = self.left.clone();
        let right = self.right.clone();
        let uniform_shader = self.uniform_shader.clone();
        let vertex_shader = self.vertex_shader.clone();
        let base_colors = self.base_colors.clone();
        let bg_color = self.controls.bg_color;

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let left = &mut left.lock();
                let right = &mut right.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.clear_color(
                        bg_color.r() as f32 / u8::MAX as f32,
                        bg_color.g() as f32 / u8::MAX as f32,
                        bg_color.b() as f32 / u8::MAX as f32,
                        bg_color.a() as f32 / u8::MAX as f32,
                    );
                    gl.clear(glow::COLOR_BUFFER_BIT);
                }

                uniform_shader.use_program(gl);
                uniform_shader.set_uniform(gl, "uColor", UniformValue::Vec4(tint.extend(1.0)));
                left.draw(gl, &uniform_shader);

                // Fade the corner colors in and out on the CPU side, then
                // push the new bytes into the existing buffer.
                for (vertex, base) in right.verts.iter_mut().zip(&base_colors) {
                    vertex.clr = (*base * pulse).extend(1.0);
                }
                right.update_gl(gl);

                vertex_shader.use_program(gl);
                right.draw(gl, &vertex_shader);
            })),
        };
        ui.painter().add(callback);
    }
}
