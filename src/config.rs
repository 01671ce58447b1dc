use palette::Srgb;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seed for the volume colors. Colors change on every start if unset.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub scene: SceneConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Opacity of the faces
    #[serde(default = "default_face_alpha")]
    pub face_alpha: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            face_alpha: default_face_alpha(),
        }
    }
}

fn default_face_alpha() -> f32 {
    0.5
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Initial rotation around the vertical axis, in degrees
    #[serde(default = "default_azimuth")]
    pub azimuth: f32,

    /// Initial angle above the horizontal plane, in degrees
    #[serde(default = "default_elevation")]
    pub elevation: f32,

    /// Distance of the camera from the center of the scene, in multiples of
    /// the scene's half size. Larger values flatten the perspective.
    #[serde(default = "default_distance")]
    pub distance: f32,

    #[serde(default = "default_background_color", with = "crate::util::palette::serde")]
    pub background_color: Srgb,

    /// Draw the bounding box of the points
    #[serde(default)]
    pub show_axes: bool,

    /// Stroke face outlines in the face color
    #[serde(default = "default_to_true")]
    pub outline: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            azimuth: default_azimuth(),
            elevation: default_elevation(),
            distance: default_distance(),
            background_color: default_background_color(),
            show_axes: false,
            outline: true,
        }
    }
}

fn default_azimuth() -> f32 {
    40.0
}

fn default_elevation() -> f32 {
    20.0
}

fn default_distance() -> f32 {
    30.0
}

fn default_background_color() -> Srgb {
    Srgb::new(1.0, 1.0, 1.0)
}

fn default_to_true() -> bool {
    true
}
