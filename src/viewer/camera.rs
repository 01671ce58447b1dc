use nalgebra::{
    Point2,
    Point3,
    Vector3,
};

use crate::{
    config::ViewConfig,
    scene::Bounds,
};

/// Closest the camera may get to the center of the view box.
///
/// The view box spans `[-1, 1]^3`, so anything closer would put corners of
/// it behind the camera.
const MIN_DISTANCE: f32 = 2.0;

/// Orbit camera looking at the center of the scene's bounding box.
///
/// Points are first mapped into the view box `[-1, 1]^3`, one axis at a time,
/// so that the bounding box of the scene fills it. The camera then sits at
/// `distance` from the origin, above the horizontal plane by `elevation` and
/// rotated around the vertical (z) axis by `azimuth`.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Degrees
    pub azimuth: f32,

    /// Degrees, clamped to `[-90, 90]`
    pub elevation: f32,

    pub distance: f32,

    pub zoom: f32,

    center: Point3<f64>,
    scale: Vector3<f64>,
}

impl Camera {
    pub fn new(bounds: Option<&Bounds>, config: &ViewConfig) -> Self {
        let (center, scale) = bounds.map_or_else(
            || (Point3::origin(), Vector3::repeat(1.0)),
            |bounds| (bounds.center(), axis_scale(&bounds.half_extents())),
        );

        Self {
            azimuth: config.azimuth,
            elevation: config.elevation.clamp(-90.0, 90.0),
            distance: config.distance.max(MIN_DISTANCE),
            zoom: 1.0,
            center,
            scale,
        }
    }

    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(360.0);
        self.elevation = (self.elevation + delta_elevation).clamp(-90.0, 90.0);
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(0.05, 50.0);
    }

    /// Right, up and towards-the-eye directions of the camera
    fn basis(&self) -> [Vector3<f64>; 3] {
        let azimuth = f64::from(self.azimuth).to_radians();
        let elevation = f64::from(self.elevation).to_radians();
        let (sin_a, cos_a) = azimuth.sin_cos();
        let (sin_e, cos_e) = elevation.sin_cos();

        let right = Vector3::new(-sin_a, cos_a, 0.0);
        let up = Vector3::new(-sin_e * cos_a, -sin_e * sin_a, cos_e);
        let eye = Vector3::new(cos_e * cos_a, cos_e * sin_a, sin_e);

        [right, up, eye]
    }

    /// Maps a point into the view box `[-1, 1]^3`.
    pub fn to_view_box(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from((point - self.center).component_div(&self.scale))
    }

    /// Projects a point in scene coordinates.
    ///
    /// Returns the position on the image plane, with `+y` pointing up and the
    /// view box fitting into `[-1, 1]^2` at zoom 1, and the depth of the point
    /// along the viewing direction. Larger depths are further away.
    pub fn project(&self, point: &Point3<f64>) -> (Point2<f32>, f32) {
        self.project_view_box(&self.to_view_box(point))
    }

    /// Projects a point that is already in view box coordinates.
    pub fn project_view_box(&self, point: &Point3<f64>) -> (Point2<f32>, f32) {
        let [right, up, eye] = self.basis();
        let distance = f64::from(self.distance);
        let point = point.coords;

        let depth = distance - point.dot(&eye);
        // the box's circumsphere has radius sqrt(3). its nearest points are
        // magnified by `distance / (distance - sqrt(3))`.
        let radius = 3.0f64.sqrt();
        let fit = (distance - radius) / (distance * radius);
        let perspective = fit * f64::from(self.zoom) * distance / depth.max(f64::EPSILON);

        (
            Point2::new(
                (perspective * point.dot(&right)) as f32,
                (perspective * point.dot(&up)) as f32,
            ),
            depth as f32,
        )
    }
}

/// Scale of each axis of the view box.
///
/// Flat axes borrow the largest extent so they don't collapse the projection.
fn axis_scale(half_extents: &Vector3<f64>) -> Vector3<f64> {
    let largest = half_extents.max();
    let fallback = if largest > 0.0 { largest } else { 1.0 };
    half_extents.map(|half_extent| if half_extent > 0.0 { half_extent } else { fallback })
}

#[cfg(test)]
mod tests {
    use nalgebra::{
        Point3,
        Vector3,
    };

    use crate::{
        config::ViewConfig,
        scene::Bounds,
        viewer::camera::Camera,
    };

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    fn view(azimuth: f32, elevation: f32) -> ViewConfig {
        ViewConfig {
            azimuth,
            elevation,
            ..Default::default()
        }
    }

    fn bounds() -> Bounds {
        Bounds {
            min: Point3::new(-1.0, 0.0, 10.0),
            max: Point3::new(3.0, 2.0, 10.0),
        }
    }

    #[test]
    fn bounds_fill_the_view_box() {
        let camera = Camera::new(Some(&bounds()), &ViewConfig::default());
        assert_eq!(
            camera.to_view_box(&Point3::new(-1.0, 0.0, 10.0)),
            Point3::new(-1.0, -1.0, 0.0)
        );
        assert_eq!(
            camera.to_view_box(&Point3::new(3.0, 2.0, 10.0)),
            Point3::new(1.0, 1.0, 0.0)
        );
        // flat z axis uses the largest extent
        assert_eq!(
            camera.to_view_box(&Point3::new(1.0, 1.0, 12.0)),
            Point3::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn center_projects_to_origin() {
        let camera = Camera::new(Some(&bounds()), &view(123.0, -35.0));
        let (position, depth) = camera.project(&bounds().center());
        assert_close(position.x, 0.0);
        assert_close(position.y, 0.0);
        assert_close(depth, camera.distance);
    }

    #[test]
    fn axes_in_front_view() {
        // looking from +x towards the origin, +y is right and +z is up
        let camera = Camera::new(None, &view(0.0, 0.0));

        let (position, _) = camera.project(&Point3::new(0.0, 1.0, 0.0));
        assert!(position.x > 0.0);
        assert_close(position.y, 0.0);

        let (position, _) = camera.project(&Point3::new(0.0, 0.0, 1.0));
        assert_close(position.x, 0.0);
        assert!(position.y > 0.0);

        let (_, near) = camera.project(&Point3::new(1.0, 0.0, 0.0));
        let (_, far) = camera.project(&Point3::new(-1.0, 0.0, 0.0));
        assert!(near < far);
    }

    #[test]
    fn view_box_fits_on_screen() {
        let camera = Camera::new(None, &view(40.0, 20.0));
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    let (position, _) = camera.project(&Point3::new(x, y, z));
                    assert!(position.coords.amax() <= 1.0, "{position:?}");
                }
            }
        }
    }

    #[test]
    fn orbit_clamps_elevation() {
        let mut camera = Camera::new(None, &ViewConfig::default());
        camera.orbit(350.0, 100.0);
        assert_eq!(camera.elevation, 90.0);
        assert_close(camera.azimuth, 30.0);
    }

    #[test]
    fn empty_scene_uses_unit_box() {
        let camera = Camera::new(None, &ViewConfig::default());
        let point = Point3::new(0.5, -0.25, 1.0);
        assert_eq!(camera.to_view_box(&point), point);
        assert_eq!(camera.scale, Vector3::repeat(1.0));
    }
}
