//! Window showing a [`Scene`].
//!
//! Triangles are painted with egui's painter, sorted back to front so that
//! translucent faces blend correctly.

mod camera;

use color_eyre::eyre::{
    Error,
    eyre,
};
use nalgebra::{
    Point2,
    Point3,
};
use palette::Srgba;

pub use self::camera::Camera;
use crate::{
    config::ViewConfig,
    scene::{
        Bounds,
        Scene,
    },
    util::palette::ToEguiColor,
};

/// Degrees per dragged point
const ORBIT_SPEED: f32 = 0.4;

const ZOOM_SPEED: f32 = 0.002;

/// Opens a window showing the scene and blocks until it is closed.
pub fn show(scene: Scene, title: impl Into<String>, config: &ViewConfig) -> Result<(), Error> {
    let title = title.into();
    let app = ViewerApp::new(scene, config.clone());

    tracing::debug!(%title, num_triangles = app.scene.triangles().len(), "opening viewer");

    eframe::run_native(
        &title,
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&title)
                .with_app_id(env!("CARGO_PKG_NAME")),
            // meshes are not anti-aliased by egui
            multisampling: 4,
            ..Default::default()
        },
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| eyre!("{e}"))?;

    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedTriangle {
    pub vertices: [Point2<f32>; 3],
    pub depth: f32,
    pub color: Srgba,
}

/// Projects all triangles of the scene, furthest first.
///
/// Triangles are ordered by the mean depth of their vertices. This is
/// the painter's algorithm and can be wrong for intersecting or very
/// differently sized triangles.
pub fn project_triangles(scene: &Scene, camera: &Camera) -> Vec<ProjectedTriangle> {
    let mut projected = scene
        .triangles()
        .iter()
        .map(|triangle| {
            let mut depth = 0.0;
            let vertices = triangle.vertices.map(|vertex| {
                let (position, vertex_depth) = camera.project(&vertex);
                depth += vertex_depth;
                position
            });

            ProjectedTriangle {
                vertices,
                depth: depth / 3.0,
                color: triangle.color,
            }
        })
        .collect::<Vec<_>>();

    projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    projected
}

#[derive(Debug)]
struct ViewerApp {
    scene: Scene,
    camera: Camera,
    initial_camera: Camera,
    config: ViewConfig,
}

impl ViewerApp {
    fn new(scene: Scene, config: ViewConfig) -> Self {
        let camera = Camera::new(scene.bounds(), &config);
        Self {
            scene,
            camera,
            initial_camera: camera,
            config,
        }
    }

    fn view(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        if response.dragged_by(egui::PointerButton::Primary) {
            let drag_delta = response.drag_delta();
            self.camera
                .orbit(-ORBIT_SPEED * drag_delta.x, ORBIT_SPEED * drag_delta.y);
        }
        if response.double_clicked() {
            self.camera = self.initial_camera;
        }
        if response.hovered() {
            let scroll = ui.input(|input| input.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom_by((ZOOM_SPEED * scroll).exp());
            }
        }

        let rect = response.rect;
        let half_size = 0.5 * rect.width().min(rect.height());
        let to_screen = |position: Point2<f32>| {
            rect.center() + half_size * egui::vec2(position.x, -position.y)
        };

        if self.config.show_axes {
            let stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
            let corners = Bounds {
                min: Point3::new(-1.0, -1.0, -1.0),
                max: Point3::new(1.0, 1.0, 1.0),
            }
            .corners()
            .map(|corner| to_screen(self.camera.project_view_box(&corner).0));

            for i in 0..4 {
                let j = (i + 1) % 4;
                painter.line_segment([corners[i], corners[j]], stroke);
                painter.line_segment([corners[i + 4], corners[j + 4]], stroke);
                painter.line_segment([corners[i], corners[i + 4]], stroke);
            }
        }

        for triangle in project_triangles(&self.scene, &self.camera) {
            let color = triangle.color.to_egui();
            let points = triangle.vertices.map(to_screen);

            let mut mesh = egui::Mesh::default();
            for point in points {
                mesh.colored_vertex(point, color);
            }
            mesh.add_triangle(0, 1, 2);
            painter.add(egui::Shape::mesh(mesh));

            if self.config.outline {
                painter.add(egui::Shape::closed_line(
                    points.to_vec(),
                    egui::Stroke::new(1.0, color),
                ));
            }
        }

        if self.scene.is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Nothing to draw",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.config.background_color.to_egui()))
            .show(ctx, |ui| {
                self.view(ui);
            });
    }
}
