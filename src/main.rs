use std::{sync::Arc, time::Instant};

use clap::{value_t, App, Arg};
use tracing::{error, info, warn, Level};

use glint::{
    camera::Camera,
    lighting::Point,
    material::{Color, Material, Simple},
    math::{Transform, Vector3},
    object::{Plane, Sphere},
    scene::Scene,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = App::new("glint")
        .version("0.1")
        .about("Renders a small demo scene of spheres over a reflective floor")
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("PIXELS")
                .help("The output image width")
                .default_value("1280"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("PIXELS")
                .help("The output image height")
                .default_value("720"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("The output file")
                .default_value("render.png"),
        )
        .arg(
            Arg::with_name("depth")
                .long("depth")
                .value_name("N")
                .help("The maximum number of reflections followed per ray")
                .default_value("3"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log scene setup details"),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let width = value_t!(matches, "width", u32).unwrap_or_else(|e| e.exit());
    let height = value_t!(matches, "height", u32).unwrap_or_else(|e| e.exit());
    let depth = value_t!(matches, "depth", u32).unwrap_or_else(|e| e.exit());
    let output = matches.value_of("output").unwrap_or("render.png");

    info!("Initializing scene");
    let start_time = Instant::now();

    let mut scene = demo_scene(width as f64 / height as f64).map_err(|e| {
        error!("Failed to set up scene: {}", e);
        e
    })?;
    scene.options.max_reflection_depth = depth;

    info!("Scene initialized in {:?}", start_time.elapsed());

    let render_time = Instant::now();
    let stats = scene.render_to(output, width, height).map_err(|e| {
        error!("Failed to render to {}: {}", output, e);
        e
    })?;
    info!(
        hits = stats.hits,
        "Rendered {} in {:?}",
        output,
        render_time.elapsed()
    );

    Ok(())
}

/// Build a transform without rotation, or log and skip the object if it
/// can't be inverted.
fn place(translation: Vector3, scale: Vector3) -> Option<Transform> {
    match Transform::new(translation, Vector3::zero(), scale) {
        Ok(transform) => Some(transform),
        Err(e) => {
            warn!(?translation, ?scale, "skipping object: {}", e);
            None
        }
    }
}

/// Three spheres sharing two materials over a mirrored floor, lit from
/// in front by three colored lights.
fn demo_scene(aspect_ratio: f64) -> glint::Result<Scene> {
    let camera = Camera::new(
        Vector3::new(0., -10., -1.),
        Vector3::zero(),
        Vector3::new(0., 0., 1.),
        1.,
        0.25,
        aspect_ratio,
    )?;
    let mut scene = Scene::new(camera);

    let silver: Arc<dyn Material> = Arc::new(Simple::new(Color::new(0.5, 0.5, 0.8), 0.5, 10.));
    let gold: Arc<dyn Material> = Arc::new(Simple::new(Color::new(0.8, 0.8, 0.3), 0.25, 20.));
    let floor: Arc<dyn Material> = Arc::new(Simple::new(Color::new(1., 1., 1.), 0.5, 0.));

    let spheres = [
        (Vector3::new(-1.5, 0., 0.), Vector3::new(0.5, 0.5, 0.75), &silver),
        (Vector3::new(0., 0., 0.), Vector3::new(0.75, 0.5, 0.5), &gold),
        (Vector3::new(1.5, 0., 0.), Vector3::new(0.75, 0.75, 0.75), &silver),
    ];
    for (translation, scale, material) in spheres {
        if let Some(transform) = place(translation, scale) {
            scene.add_object(
                Sphere::new(transform, Color::white()).with_material(Arc::clone(material)),
            );
        }
    }

    // +z is down the screen, so the floor sits just below the spheres
    if let Some(transform) = place(Vector3::new(0., 0., 0.75), Vector3::new(4., 4., 1.)) {
        scene.add_object(Plane::new(transform, Color::new(0.5, 0.5, 0.5)).with_material(floor));
    }

    scene.add_light(Point::new(Vector3::new(5., -10., -5.), Color::new(0., 0., 1.), 1.));
    scene.add_light(Point::new(Vector3::new(-5., -10., -5.), Color::new(1., 0., 0.), 1.));
    scene.add_light(Point::new(Vector3::new(0., -10., -5.), Color::new(0., 1., 0.), 1.));

    Ok(scene)
}
