#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(unsafe_code)]

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use egui::Response;
use glam::{Mat4, Vec3};

use gl_learning::app::Controls;
use gl_learning::assets;
use gl_learning::gfx::shader::{ShaderSet, UniformValue};
use gl_learning::gfx::{Camera, Mesh, Model, Shader, Texture};

const WIDTH: f32 = 1024f32;
const HEIGHT: f32 = 768f32;

const CAM_SPEED: f32 = 2.5;
const LOOK_SENSITIVITY: f32 = 0.1;
const ZOOM_SENSITIVITY: f32 = 0.05;

// Where the cubes stand, straight out of the book.
const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

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
        "Exercise 06: Camera",
        options,
        Box::new(|cc| Ok(Box::new(CameraCubes::new(cc)))),
    )
}

struct CameraCubes {
    controls: Controls,
    camera: Camera,
    shader: Shader,
    shaders: ShaderSet,
    texture: Texture,
    cube: Arc<Mutex<Mesh>>,
}

impl CameraCubes {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let mut shaders = ShaderSet::new();
        let shader = shaders.track(assets::load_shader(gl, "camera", "camera"));

        let texture = assets::load_texture(gl, "container");

        let mut cube = Mesh::cube();
        cube.setup_gl(gl);

        Self {
            controls: Controls::new(),
            camera: Camera::new().with_pos(Vec3::new(0.0, 0.0, 3.0)),
            shader,
            shaders,
            texture,
            cube: Arc::new(Mutex::new(cube)),
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, response: &Response) {
        let cam = &mut self.camera;

        let (quit, toggle) = ctx.input(|i| {
            let amount = CAM_SPEED * i.predicted_dt;

            if i.key_down(egui::Key::W) {
                cam.move_forward(amount);
            }
            if i.key_down(egui::Key::S) {
                cam.move_backward(amount);
            }
            if i.key_down(egui::Key::A) {
                cam.move_left(amount);
            }
            if i.key_down(egui::Key::D) {
                cam.move_right(amount);
            }
            if i.key_down(egui::Key::Space) {
                cam.move_up(amount);
            }
            if i.modifiers.shift {
                cam.move_down(amount);
            }

            cam.adjust_zoom(i.smooth_scroll_delta.y * ZOOM_SENSITIVITY);

            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::T),
            )
        });

        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if toggle {
            self.controls.toggle_wireframe();
        }

        cam.move_yaw(response.drag_motion().x * LOOK_SENSITIVITY);
        cam.move_pitch(-response.drag_motion().y * LOOK_SENSITIVITY);
    }
}

impl eframe::App for CameraCubes {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::canvas(ui.style()).show(ui, |ui| {
                self.custom_painting(ui, ctx);
            });
        });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.shaders.destroy_all(gl);
            self.texture.destroy(gl);
            self.cube.lock().destroy_gl(gl);
        }
    }
}

impl CameraCubes {
    fn custom_painting(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui.available_size();
        let (rect, response) = ui.allocate_at_least(size, egui::Sense::drag());

        self.handle_input(ctx, &response);

        let view = self.camera.view_mtx();
        let proj = self.camera.proj_mtx(size.x / size.y);

        let cube = self.cube.clone();
        let shader = self.shader.clone();
        let texture = self.texture.clone();
        let wireframe = self.controls.wireframe;
        let bg_color = self.controls.bg_color;

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let cube = &mut cube.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.enable(glow::DEPTH_TEST);
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
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }

                texture.bind(gl, 0);
                shader.use_program(gl);
                shader.set_uniform(gl, "uTexture", UniformValue::I32(0));
                shader.set_uniform(gl, "view", UniformValue::Mat4(view));
                shader.set_uniform(gl, "proj", UniformValue::Mat4(proj));

                for (i, pos) in CUBE_POSITIONS.iter().enumerate() {
                    let angle = (20.0 * i as f32).to_radians();
                    let model = Mat4::from_translation(*pos)
                        * Mat4::from_axis_angle(Vec3::new(1.0, 0.3, 0.5).normalize(), angle);
                    shader.set_uniform(gl, "model", UniformValue::Mat4(model));
                    cube.draw(gl, &shader);
                }

                unsafe {
                    use glow::HasContext as _;
                    gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                    gl.disable(glow::DEPTH_TEST);
                }
            })),
        };
        ui.painter().add(callback);
    }
}
