use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 120.0;

/// A free-fly camera. Position and orientation are mutated by the input
/// handling each frame; the view matrix is recomputed lazily when read.
#[derive(Debug, Clone)]
pub struct Camera {
    pos: Vec3,
    front: Vec3,
    up: Vec3,
    pitch: f32,
    yaw: f32,
    zoom: f32,

    mtx: Mat4,
    dirty: bool,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Creation Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    pub fn new() -> Self {
        Self {
            pos: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            pitch: 0.0f32,
            yaw: -90.0f32,
            zoom: 70.0f32,

            mtx: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self.dirty = true;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self.dirty = true;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.dirty = true;
        self
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Usability Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    pub fn move_forward(&mut self, amount: f32) {
        self.pos += amount * self.front;
        self.dirty = true;
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.pos -= amount * self.front;
        self.dirty = true;
    }

    pub fn move_right(&mut self, amount: f32) {
        self.pos += self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    pub fn move_left(&mut self, amount: f32) {
        self.pos -= self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    pub fn move_up(&mut self, amount: f32) {
        self.pos.y += amount;
        self.dirty = true;
    }

    pub fn move_down(&mut self, amount: f32) {
        self.pos.y -= amount;
        self.dirty = true;
    }

    pub fn move_pitch(&mut self, amount: f32) {
        self.pitch = (self.pitch + amount).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.dirty = true;
    }

    pub fn move_yaw(&mut self, amount: f32) {
        self.yaw += amount;
        self.dirty = true;
    }

    /// Scroll zoom, expressed as the vertical field of view in degrees.
    pub fn adjust_zoom(&mut self, amount: f32) {
        self.zoom = (self.zoom - amount).clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Get / Set Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    pub fn view_mtx(&mut self) -> Mat4 {
        if self.dirty {
            self.calc_mtx();
        }

        self.mtx
    }

    pub fn proj_mtx(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect, 0.1f32, 1000f32)
    }

    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    pub fn front(&mut self) -> Vec3 {
        if self.dirty {
            self.calc_mtx();
        }

        self.front
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Internal Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    fn calc_mtx(&mut self) {
        self.front = Vec3::new(
            self.yaw.to_radians().cos() * self.pitch.to_radians().cos(),
            self.pitch.to_radians().sin(),
            self.yaw.to_radians().sin() * self.pitch.to_radians().cos(),
        )
        .normalize();

        self.mtx = Mat4::look_at_rh(self.pos, self.pos + self.front, self.up);

        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera_faces_negative_z() {
        let mut cam = Camera::new();
        assert!(close(cam.front(), Vec3::NEG_Z));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::new();
        cam.move_pitch(500.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        cam.move_pitch(-1000.0);
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::new();
        cam.adjust_zoom(-500.0);
        assert_eq!(cam.zoom(), ZOOM_MAX);
        cam.adjust_zoom(1000.0);
        assert_eq!(cam.zoom(), ZOOM_MIN);
    }

    #[test]
    fn view_matrix_sends_eye_to_origin() {
        let mut cam = Camera::new().with_pos(Vec3::new(3.0, 2.0, 5.0));
        let eye = cam.view_mtx().transform_point3(cam.pos());
        assert!(close(eye, Vec3::ZERO));
    }

    #[test]
    fn forward_movement_follows_the_front_vector() {
        let mut cam = Camera::new().with_pos(Vec3::ZERO);
        cam.move_forward(2.0);
        assert!(close(cam.pos(), Vec3::new(0.0, 0.0, -2.0)));

        // Turning 90 degrees right makes forward +X once the orientation
        // is re-read, as the frame loop does.
        cam.move_yaw(90.0);
        assert!(close(cam.front(), Vec3::X));
        cam.move_forward(1.0);
        assert!(close(cam.pos(), Vec3::new(1.0, 0.0, -2.0)));
    }
}
