use std::{f64::consts::FRAC_PI_2, sync::Arc};

use approx::assert_abs_diff_eq;
use glint::{
    canvas::{Canvas, ImageSink},
    lighting::{Light, Point},
    material::{diffuse_color, reflection_color, Color, Simple},
    math::{Ray, Transform, Vector3},
    object::Sphere,
    scene::Scene,
};
use image::RgbImage;

fn assert_color_eq(a: Color, b: Color) {
    assert_abs_diff_eq!(a.r, b.r, epsilon = 1e-9);
    assert_abs_diff_eq!(a.g, b.g, epsilon = 1e-9);
    assert_abs_diff_eq!(a.b, b.b, epsilon = 1e-9);
}

/// The default camera narrowed so a unit sphere at the origin fills most of the view.
fn narrow_scene() -> Scene {
    let mut scene = Scene::empty();
    scene.camera.horizontal_size = 0.125;
    scene.camera.update_geometry().unwrap();
    scene
}

fn sphere(translation: Vector3, scale: f64, color: Color) -> Sphere {
    let transform = Transform::new(translation, Vector3::zero(), Vector3::new(scale, scale, scale))
        .unwrap();
    Sphere::new(transform, color)
}

#[test]
fn empty_scene_hits_nothing() {
    let mut scene = Scene::empty();
    scene.add_light(Point::new(Vector3::new(0., -10., 0.), Color::white(), 1.));

    let background = Color::new(0.1, 0.2, 0.3);
    let mut canvas = Canvas::with_background(8, 6, background);
    let stats = scene.render(&mut canvas);

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 48);
    assert_eq!(stats.min_distance, None);
    for y in 0..6 {
        for x in 0..8 {
            assert_eq!(canvas.get_pixel(x, y), Some(background));
            assert!(scene.trace_pixel(x, y, 8, 6).is_none());
        }
    }
}

#[test]
fn lit_sphere_is_diffuse_shaded_inside_its_silhouette() {
    let base = Color::new(0.8, 0.4, 0.2);
    let mut scene = narrow_scene();
    scene.add_object(sphere(Vector3::zero(), 1., base));
    // right at the camera
    scene.add_light(Point::new(Vector3::new(0., -10., 0.), Color::white(), 1.));

    let background = Color::blue();
    let mut canvas = Canvas::with_background(10, 10, background);
    let stats = scene.render(&mut canvas);
    assert!(stats.hits > 0);
    assert!(stats.misses > 0);
    assert_abs_diff_eq!(stats.min_distance.unwrap(), 9., epsilon = 1e-9);

    // dead center faces the light head on
    assert_color_eq(canvas.get_pixel(5, 5).unwrap(), base);

    // corners miss
    for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
        assert_eq!(canvas.get_pixel(x, y), Some(background));
    }

    // elsewhere the falloff is linear in the incidence angle
    let light = Vector3::new(0., -10., 0.);
    for (x, y) in [(6, 5), (5, 4), (6, 6)] {
        let ray = scene.pixel_ray(x, y, 10, 10);
        let closest = scene.cast_ray(&ray, None).unwrap();
        let to_light = (light - closest.hit.point).normalize();
        let angle = closest.hit.normal.dot(to_light).acos();
        let expected = base * (1. - angle / FRAC_PI_2);

        let pixel = canvas.get_pixel(x, y).unwrap();
        assert_color_eq(pixel, expected);
        assert!(pixel.r < base.r);
    }
}

#[test]
fn full_reflection_reproduces_the_reflected_sphere() {
    let mut scene = Scene::empty();
    let mirror = scene.add_object(
        sphere(Vector3::zero(), 1., Color::white())
            .with_material(Arc::new(Simple::new(Color::white(), 1., 0.))),
    );
    let target = scene.add_object(sphere(Vector3::new(0., -5., 0.), 1., Color::new(0.2, 0.9, 0.4)));
    scene.add_light(Point::new(Vector3::new(3., -2.5, 0.), Color::white(), 1.));

    // between the spheres, looking at the mirror
    let ray = Ray::new(Vector3::new(0., -2.5, 0.), Vector3::zero());
    let closest = scene.cast_ray(&ray, None).unwrap();
    assert_eq!(closest.index, mirror);

    let expected = diffuse_color(
        &scene,
        target,
        Vector3::new(0., -4., 0.),
        Vector3::new(0., 1., 0.),
        Color::new(0.2, 0.9, 0.4),
    );
    assert!(expected.g > 0.);
    assert_color_eq(scene.shade(&closest, &ray, 0), expected);

    // no reflections allowed leaves nothing
    scene.options.max_reflection_depth = 0;
    let closest = scene.cast_ray(&ray, None).unwrap();
    assert_color_eq(scene.shade(&closest, &ray, 0), Color::black());
    let reflected = reflection_color(
        &scene,
        mirror,
        closest.hit.point,
        closest.hit.normal,
        &ray,
        0,
    );
    assert_eq!(reflected, Color::black());
}

#[test]
fn occluder_blocks_only_its_own_light() {
    let mut scene = Scene::empty();
    let surface = scene.add_object(sphere(Vector3::zero(), 1., Color::white()));
    scene.add_light(Point::new(Vector3::new(0., -10., 0.), Color::white(), 1.));
    scene.add_light(Point::new(Vector3::new(-3., -3., 0.), Color::white(), 1.));

    let point = Vector3::new(0., -1., 0.);
    let normal = Vector3::new(0., -1., 0.);
    let before: Vec<f64> = scene
        .lights
        .iter()
        .map(|l| l.illumination(point, normal, &scene, Some(surface)).intensity)
        .collect();
    assert_abs_diff_eq!(before[0], 1., epsilon = 1e-12);
    assert!(before[1] > 0.);

    // right between the first light and the point
    scene.add_object(sphere(Vector3::new(0., -5., 0.), 0.5, Color::white()));
    let after: Vec<f64> = scene
        .lights
        .iter()
        .map(|l| l.illumination(point, normal, &scene, Some(surface)).intensity)
        .collect();
    assert_eq!(after[0], 0.);
    assert_abs_diff_eq!(after[1], before[1], epsilon = 1e-12);

    // and the shaded color only loses the first light
    let shaded = diffuse_color(&scene, surface, point, normal, Color::white());
    assert_abs_diff_eq!(shaded.r, before[1], epsilon = 1e-12);
}

#[test]
fn renders_into_an_rgb_image() {
    let mut scene = narrow_scene();
    scene.add_object(sphere(Vector3::zero(), 1., Color::new(1., 0., 0.)));
    scene.add_light(Point::new(Vector3::new(0., -10., 0.), Color::white(), 2.));

    let mut image = RgbImage::new(10, 10);
    assert_eq!(image.size(), (10, 10));
    scene.render(&mut image);

    // overbright red is clamped, the background is untouched
    assert_eq!(image.get_pixel(5, 5).0, [255, 0, 0]);
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
}

#[test]
fn render_to_writes_a_png() {
    let mut scene = Scene::empty();
    scene.add_object(sphere(Vector3::zero(), 1., Color::white()));
    scene.add_light(Point::new(Vector3::new(0., -10., 0.), Color::white(), 1.));

    let path = std::env::temp_dir().join(format!("glint-render-{}.png", std::process::id()));
    let stats = scene.render_to(&path, 16, 12).unwrap();
    assert!(stats.hits > 0);

    let saved = image::open(&path).unwrap().to_rgb8();
    assert_eq!(saved.dimensions(), (16, 12));
    std::fs::remove_file(&path).unwrap();
}
