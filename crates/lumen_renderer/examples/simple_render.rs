//! Renders a small glossy scene to `glossy_spheres.png`.
//!
//! Run with `RUST_LOG=info` to see BVH, scene and render statistics.

use anyhow::Result;
use lumen_renderer::{
    AmbientLight, Camera, Color, Cylinder, Geometry, ImageWriter, Material, Plane, Point3, PointLight,
    Polygon, Ray, RayTracer, Render, RenderConfig, SamplingConfig, Scene, Sphere, SpotLight, Vector3,
};

fn main() -> Result<()> {
    env_logger::init();

    let glossy_floor = Material::builder()
        .kd(0.4)
        .ks(0.3)
        .shininess(30)
        .kr(0.3)
        .glossy_radius(3.0)
        .build()?;
    let glass = Material::builder()
        .kd(0.2)
        .ks(0.5)
        .shininess(80)
        .kt(0.6)
        .diffuse_radius(1.5)
        .build()?;
    let mirror = Material::builder().kd(0.1).ks(0.8).shininess(200).kr(0.7).build()?;
    let matte = Material::builder().kd(0.7).ks(0.2).shininess(10).build()?;

    let back_wall = Polygon::new(vec![
        Point3::new(-150.0, -50.0, -300.0),
        Point3::new(150.0, -50.0, -300.0),
        Point3::new(150.0, 150.0, -300.0),
        Point3::new(-150.0, 150.0, -300.0),
    ])?;

    let key_light = PointLight::new(Color::new(500.0, 400.0, 400.0), Point3::new(60.0, 100.0, -50.0))
        .with_attenuation(1.0, 0.0005, 0.00005)?;
    let spot_light = SpotLight::new(
        Color::new(700.0, 400.0, 300.0),
        Point3::new(-100.0, 80.0, -60.0),
        Vector3::new(1.0, -1.0, -2.0)?,
    )
    .with_attenuation(1.0, 0.0001, 0.00002)?;

    let scene = Scene::builder("glossy_spheres")
        .background(Color::new(10.0, 10.0, 20.0))
        .ambient(AmbientLight::new(Color::from_rgb8(255, 191, 191), 0.1))
        .sampling(SamplingConfig::default().with_samples(12))
        .geometry(
            Plane::new(Point3::new(0.0, -50.0, 0.0), Vector3::Y)
                .with_emission(Color::new(40.0, 40.0, 40.0))
                .with_material(glossy_floor),
        )
        .geometry(back_wall.with_emission(Color::new(20.0, 30.0, 60.0)).with_material(matte))
        .geometry(
            Sphere::new(Point3::new(-50.0, -10.0, -150.0), 40.0)?
                .with_emission(Color::new(20.0, 20.0, 80.0))
                .with_material(glass),
        )
        .geometry(
            Sphere::new(Point3::new(-50.0, -10.0, -150.0), 15.0)?
                .with_emission(Color::new(150.0, 30.0, 30.0))
                .with_material(matte),
        )
        .geometry(
            Sphere::new(Point3::new(55.0, -15.0, -180.0), 35.0)?
                .with_emission(Color::new(30.0, 30.0, 30.0))
                .with_material(mirror),
        )
        .geometry(
            Cylinder::new(Ray::new(Point3::new(0.0, -50.0, -220.0), Vector3::Y), 12.0, 60.0)?
                .with_emission(Color::new(60.0, 120.0, 40.0))
                .with_material(matte),
        )
        .light(key_light)
        .light(spot_light)
        .build();

    let camera = Camera::new(Point3::new(0.0, 0.0, 200.0), -Vector3::Z, Vector3::Y)?
        .with_view_plane(200.0, 150.0)?
        .with_distance(300.0)?;

    let tracer = RayTracer::new(&scene);
    let mut render = Render::new()
        .with_camera(camera)
        .with_image_writer(ImageWriter::new(scene.name(), 400, 300))
        .with_tracer(&tracer)
        .with_config(RenderConfig::default().with_bucket_size(32));

    render.render_image()?;
    let path = render.write_to_image()?;
    println!("Saved {}", path.display());

    Ok(())
}
