use eframe::glow;
use egui::Color32;
use glam::Vec3;

/// One RGB channel of the keyboard-adjustable tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

/// Mutable state shared between the input handling and the paint callback.
/// This is the explicit replacement for the free-floating globals a
/// tutorial main would otherwise use.
#[derive(Debug, Clone)]
pub struct Controls {
    pub wireframe: bool,
    pub tint: Vec3,
    pub mix_amount: f32,
    pub bg_color: Color32,
}

impl Controls {
    pub fn new() -> Self {
        Self {
            wireframe: false,
            tint: Vec3::new(1.0, 0.5, 0.2),
            mix_amount: 0.2,
            // The clear color every exercise in the book starts from.
            bg_color: Color32::from_rgb(51, 77, 77),
        }
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    /// Steps one tint channel, keeping it inside [0, 1].
    pub fn adjust_channel(&mut self, channel: Channel, delta: f32) {
        let value = match channel {
            Channel::R => &mut self.tint.x,
            Channel::G => &mut self.tint.y,
            Channel::B => &mut self.tint.z,
        };
        *value = (*value + delta).clamp(0.0, 1.0);
    }

    /// Steps the texture/tint mix, keeping it inside [0, 1].
    pub fn adjust_mix(&mut self, delta: f32) {
        self.mix_amount = (self.mix_amount + delta).clamp(0.0, 1.0);
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

/// The capability query the early exercises report at startup.
pub fn max_vertex_attribs(gl: &glow::Context) -> i32 {
    use glow::HasContext as _;

    unsafe { gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wireframe_toggles_back_and_forth() {
        let mut controls = Controls::new();
        assert!(!controls.wireframe);
        controls.toggle_wireframe();
        assert!(controls.wireframe);
        controls.toggle_wireframe();
        assert!(!controls.wireframe);
    }

    #[test]
    fn tint_channels_saturate_at_the_ends() {
        let mut controls = Controls::new();
        for _ in 0..100 {
            controls.adjust_channel(Channel::G, 0.05);
        }
        assert_eq!(controls.tint.y, 1.0);

        for _ in 0..100 {
            controls.adjust_channel(Channel::G, -0.05);
        }
        assert_eq!(controls.tint.y, 0.0);

        // The other channels are untouched.
        assert_eq!(controls.tint.x, Controls::new().tint.x);
    }

    #[test]
    fn mix_amount_stays_inside_the_unit_range() {
        let mut controls = Controls::new();
        controls.adjust_mix(5.0);
        assert_eq!(controls.mix_amount, 1.0);
        controls.adjust_mix(-7.5);
        assert_eq!(controls.mix_amount, 0.0);
    }
}
