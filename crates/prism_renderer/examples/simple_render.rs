//! Simple ray casting example.
//!
//! Builds a small scene in code (no scene file) and saves it to PPM format.

use prism_core::{Light, Object, Scene, Surface};
use prism_renderer::{raycast, save_image, Color, DVec3, RenderConfig};

fn main() {
    println!("Prism Ray Caster - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene().expect("Scene exceeds capacity");
    println!("Scene built in {:?} ({} objects)", start.elapsed(), scene.len());

    let config = RenderConfig::default().with_background(Color::new(0.05, 0.05, 0.1));
    let (width, height) = (800, 600);

    println!("Rendering {}x{}...", width, height);
    let start = std::time::Instant::now();
    let image = raycast(&scene, width, height, &config).expect("Scene has a camera");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_image(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Result<Scene, prism_core::SceneError> {
    let mut scene = Scene::new("simple");

    scene.push(Object::camera(4.0 / 3.0, 1.0))?;

    // Ground
    scene.push(Object::plane(
        DVec3::new(0.0, -1.0, 0.0),
        DVec3::Y,
        Surface::diffuse(Color::new(0.5, 0.5, 0.5)).with_reflectivity(0.2),
    ))?;

    // Three main spheres
    scene.push(Object::sphere(
        DVec3::new(0.0, 0.0, 6.0),
        1.0,
        Surface::default()
            .with_specular(Color::ONE)
            .with_refraction(0.9, 1.5),
    ))?;

    scene.push(Object::sphere(
        DVec3::new(-2.2, 0.0, 7.0),
        1.0,
        Surface::diffuse(Color::new(0.4, 0.2, 0.1)).with_specular(Color::splat(0.3)),
    ))?;

    scene.push(Object::sphere(
        DVec3::new(2.2, 0.0, 7.0),
        1.0,
        Surface::diffuse(Color::new(0.7, 0.6, 0.5)).with_reflectivity(0.8),
    ))?;

    // A ring of small spheres
    for i in 0..12 {
        let angle = i as f64 * std::f64::consts::TAU / 12.0;
        let center = DVec3::new(3.5 * angle.cos(), -0.75, 7.0 + 3.5 * angle.sin());
        let hue = Color::new(
            0.5 + 0.5 * angle.cos(),
            0.5 + 0.5 * (angle + 2.1).cos(),
            0.5 + 0.5 * (angle + 4.2).cos(),
        );
        scene.push(Object::sphere(center, 0.25, Surface::diffuse(hue)))?;
    }

    scene.push(Object::light(
        Light::point(DVec3::new(-4.0, 6.0, 2.0), Color::ONE).with_radial(1.0, 0.02, 0.005),
    ))?;
    scene.push(Object::light(
        Light::point(DVec3::new(0.0, 8.0, 7.0), Color::splat(0.8))
            .with_spot(DVec3::NEG_Y, 25f64.to_radians(), 2.0),
    ))?;

    Ok(scene)
}
