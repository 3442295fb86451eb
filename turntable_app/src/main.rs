//! Turntable demo application
//!
//! Loads an embedded crate model into a scene and renders a fixed number
//! of frames against the recording backend, orbiting the camera one step
//! per frame. Doubles as an integration smoke test and as a minimal
//! embedding example.

use polyview::prelude::*;

/// Crate model: two materials, quad faces without normals (the flattener
/// synthesizes flat ones), edge outlines as polylines, and a second part.
const CRATE_OBJ: &str = "\
mtllib crate.mtl
o crate
v -1.0 -1.0  1.0
v  1.0 -1.0  1.0
v  1.0  1.0  1.0
v -1.0  1.0  1.0
v -1.0 -1.0 -1.0
v  1.0 -1.0 -1.0
v  1.0  1.0 -1.0
v -1.0  1.0 -1.0
usemtl pine
f 1 2 3 4
f 6 5 8 7
f 2 6 7 3
f 5 1 4 8
usemtl trim
f 4 3 7 8
f 5 6 2 1
l 1 2 3 4 1
l 5 6 7 8 5
o base
v -2.5 -1.01  2.5
v  2.5 -1.01  2.5
v  2.5 -1.01 -2.5
v -2.5 -1.01 -2.5
f 9 10 11 12
";

const CRATE_MTL: &str = "\
newmtl pine
Ka 1.0 1.0 1.0
Kd 0.71 0.55 0.34
Ks 0.30 0.30 0.30
Ns 32
illum 2
map_Kd crate_diffuse.png

newmtl trim
Kd 0.35 0.27 0.17
Ns 8
illum 1
";

/// Texture files the embedded model may reference.
const TEXTURE_NAMES: [&str; 1] = ["crate_diffuse.png"];

const CONFIG_PATH: &str = "turntable.toml";
const FRAME_COUNT: usize = 120;

struct TurntableApp {
    scene: Scene,
    renderer: SceneRenderer,
    backend: HeadlessBackend,
}

impl TurntableApp {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let texture_names: Vec<String> = TEXTURE_NAMES.iter().map(ToString::to_string).collect();
        let loaded = load_model(CRATE_OBJ, Some(CRATE_MTL), &texture_names)?;
        if !loaded.diagnostics.is_empty() {
            log::warn!(
                "Model loaded with {} parse anomalies",
                loaded.diagnostics.len()
            );
        }

        let mut object = RenderObject::from_model("crate", &loaded.model, loaded.materials);

        // Slot 0 backs the map_Kd reference resolved during parsing; the
        // same pixels double as the whole-object diffuse map.
        let diffuse = ImageData::solid_color(4, 4, [181, 140, 87, 255]);
        object.push_auxiliary_texture(diffuse.clone())?;
        object.set_texture(TextureKind::Diffuse, diffuse);

        let mut scene = Scene::new();
        match ViewerConfig::from_file(CONFIG_PATH) {
            Ok(config) => scene.apply_config(&config),
            Err(ConfigError::Io(_)) => {
                log::info!("No {CONFIG_PATH} found, using built-in defaults");
            }
            Err(err) => return Err(err.into()),
        }

        Self::frame_camera(&mut scene, &object);
        scene.add_object(object);
        scene.pin_light_to_camera();

        Ok(Self {
            scene,
            renderer: SceneRenderer::new(),
            backend: HeadlessBackend::new(),
        })
    }

    /// Place the camera so the whole model fits the vertical field of view.
    fn frame_camera(scene: &mut Scene, object: &RenderObject) {
        let Some(aabb) = object.mesh().bounding_box() else {
            return;
        };

        let center = aabb.center();
        let radius = aabb.extents().length() * 0.5;
        let distance = (radius / (scene.camera.fov_y * 0.5).tan()) * 1.2;

        scene.camera.target = center;
        scene.camera.position = center + Vec3::new(0.0, radius * 0.5, distance);
        log::info!(
            "Framed camera at distance {:.2} around center {:?}",
            distance,
            center
        );
    }

    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        for frame in 0..FRAME_COUNT {
            self.scene.camera.orbit(1.0, 0.0);
            self.backend.clear_recording();
            self.renderer.render(&self.scene, &mut self.backend)?;

            if frame == 0 {
                log::info!(
                    "Frame 0: {} backend calls, {} triangle draws, {} line draws",
                    self.backend.calls().len(),
                    self.backend.triangle_draw_count(),
                    self.backend.line_draw_count()
                );
            }
        }

        log::info!(
            "Rendered {FRAME_COUNT} frames; camera finished at {:?}",
            self.scene.camera.position
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    polyview::foundation::logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting turntable demo");
    let mut app = TurntableApp::new()?;
    app.run()?;
    log::info!("Turntable demo finished");
    Ok(())
}
