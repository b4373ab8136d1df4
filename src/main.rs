// The binary shares the library's modules; not every API entry point is
// reachable from the demo driver.
#![allow(dead_code)]

use clap::Parser;
use glam::Vec3A;
use log::info;

mod block;
mod camera;
mod cli;
mod grid;
mod light;
mod logger;
mod material;
mod noise;
mod output;
mod prism;
mod random;
mod ray;
mod renderable;
mod renderer;
mod scene;
mod sky;
mod sphere;
mod terrain;

use camera::Camera;
use cli::Args;
use light::AreaLight;
use logger::init_logger;
use material::Material;
use output::{save_image_as_exr, save_image_as_png, send_image_to_tev};
use renderer::Renderer;
use scene::Scene;
use sphere::Sphere;
use terrain::TerrainGenerator;

/// Build the demo world: terrain, a warm sun light above the origin, and a
/// pair of showcase spheres exercising the reflection and refraction paths.
fn create_scene(args: &Args, surface_height: i32) -> Scene {
    let mut scene = Scene::new();

    let generator = TerrainGenerator::new(args.seed);
    let terrain = if args.flat {
        generator.generate_flat_terrain(-args.extent, args.extent, -args.extent, args.extent)
    } else {
        generator.generate_terrain(-args.extent, args.extent, -args.extent, args.extent, 1)
    };
    info!("Generated {} terrain blocks", terrain.len());
    scene.add_blocks(terrain);

    // Warm sunlight well above the terrain
    scene.add_unit_light(AreaLight::unit(
        0,
        surface_height + 20,
        0,
        Vec3A::new(1.0, 1.0, 200.0 / 255.0),
        2.0,
    ));

    // A mirror ball and a glass ball resting on the surface
    let mirror = Material::mirror(Vec3A::new(0.9, 0.9, 0.9), 0.9);
    scene.add_unit_sphere(Sphere::unit(2, surface_height + 1, -2, mirror));
    let glass = Material::glass(Vec3A::ONE, 0.9, 1.5);
    scene.add_unit_sphere(Sphere::unit(-2, surface_height + 1, -2, glass));

    scene
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("VoxelPath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{}, shadow samples per light: {}",
        args.width, args.height, args.shadow_samples
    );

    let generator = TerrainGenerator::new(args.seed);
    let surface_height = if args.flat {
        0
    } else {
        generator.terrain_height(0.0, 0.0) as i32
    };

    let scene = create_scene(&args, surface_height);
    info!("{}", scene.grid_stats());

    // Hover above the surface, looking slightly down into the terrain
    let mut camera = Camera::new();
    camera.set_position(Vec3A::new(0.0, surface_height as f32 + 5.0, 5.0));
    camera.set_direction(Vec3A::new(0.0, -0.3, -1.0));

    let renderer = Renderer::new(&scene, &camera).with_shadow_samples(args.shadow_samples);
    let image = renderer.render(args.width, args.height);

    // Send image to TEV if requested
    let should_send_to_tev = args.tev || args.tev_address.is_some();
    if should_send_to_tev {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address);
    }

    // Save image based on file extension
    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
