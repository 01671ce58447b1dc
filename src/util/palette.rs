use palette::{
    Srgb,
    Srgba,
    WithAlpha,
};
use rand::Rng;

pub mod serde {
    // colors are stored as `[r, g, b]` arrays in the config file
    pub use palette::serde::as_array::*;
}

/// Draws a color with each channel uniform in `[0, 1)`.
pub fn random_color(rng: &mut impl Rng) -> Srgb {
    Srgb::new(rng.random(), rng.random(), rng.random())
}

pub trait ColorExt {
    fn with_opacity(self, alpha: f32) -> Srgba;
}

impl ColorExt for Srgb {
    fn with_opacity(self, alpha: f32) -> Srgba {
        self.with_alpha(alpha.clamp(0.0, 1.0))
    }
}

pub trait ToEguiColor {
    fn to_egui(&self) -> egui::Color32;
}

impl ToEguiColor for Srgb {
    fn to_egui(&self) -> egui::Color32 {
        let color = self.into_format::<u8>();
        egui::Color32::from_rgb(color.red, color.green, color.blue)
    }
}

impl ToEguiColor for Srgba {
    fn to_egui(&self) -> egui::Color32 {
        let color = self.into_format::<u8, u8>();
        egui::Color32::from_rgba_unmultiplied(color.red, color.green, color.blue, color.alpha)
    }
}
