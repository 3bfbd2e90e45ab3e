#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(unsafe_code)]

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;

use gl_learning::app::Controls;
use gl_learning::assets;
use gl_learning::gfx::shader::{ShaderSet, UniformValue};
use gl_learning::gfx::{Mesh, Model, Shader, Texture};

const WIDTH: f32 = 800f32;
const HEIGHT: f32 = 600f32;

const MIX_STEP: f32 = 0.05;

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
        "Exercise 05: Textures",
        options,
        Box::new(|cc| Ok(Box::new(Textures::new(cc)))),
    )
}

struct Textures {
    controls: Controls,
    shader: Shader,
    shaders: ShaderSet,
    texture: Texture,
    mesh: Arc<Mutex<Mesh>>,
}

impl Textures {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let mut shaders = ShaderSet::new();
        let shader = shaders.track(assets::load_shader(gl, "texture", "texture"));

        let texture = assets::load_texture(gl, "container");

        let mut mesh = Mesh::indexed_quad();
        mesh.setup_gl(gl);

        Self {
            controls: Controls::new(),
            shader,
            shaders,
            texture,
            mesh: Arc::new(Mutex::new(mesh)),
        }
    }
}

impl eframe::App for Textures {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (quit, up, down) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::ArrowDown),
            )
        });
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if up {
            self.controls.adjust_mix(MIX_STEP);
        }
        if down {
            self.controls.adjust_mix(-MIX_STEP);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::canvas(ui.style()).show(ui, |ui| {
                self.custom_painting(ui);
            });
        });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.shaders.destroy_all(gl);
            self.texture.destroy(gl);
            self.mesh.lock().destroy_gl(gl);
        }
    }
}

impl Textures {
    fn custom_painting(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        let mesh = self.mesh.clone();
        let shader = self.shader.clone();
        let texture = self.texture.clone();
        let mix_amount = self.controls.mix_amount;
        let bg_color = self.controls.bg_color;

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let mesh = &mut mesh.lock();
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

                texture.bind(gl, 0);
                shader.use_program(gl);
                shader.set_uniform(gl, "uTexture", UniformValue::I32(0));
                shader.set_uniform(gl, "uMix", UniformValue::F32(mix_amount));
                mesh.draw(gl, &shader);
            })),
        };
        ui.painter().add(callback);
    }
}
