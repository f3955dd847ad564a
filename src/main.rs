//! Builds a small scene and prints an ASCII depth image of it.
//!
//! Run with `RUST_LOG=debug` to see the hierarchy statistics.

use std::sync::Arc;

use log::info;
use tracer_accel::bounding_hierarchy::Geometry;
use tracer_accel::instance::Instance;
use tracer_accel::scene::{ObjectRegistry, Scene, SceneBuilder, SceneConfig};
use tracer_accel::shapes::{Mesh, Plane, Shape, Sphere};
use tracer_accel::transform::{Transform, TransformOp};
use tracer_accel::{Point3, Real, Vector3};

const WIDTH: usize = 72;
const HEIGHT: usize = 28;
const SHADES: &[u8] = b"@%#*+=-:. ";

/// A pyramid with a square base, apex up.
fn pyramid() -> tracer_accel::Result<Mesh> {
    let positions = [
        Point3::new(-1.0, 0.0, -1.0),
        Point3::new(1.0, 0.0, -1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(-1.0, 0.0, 1.0),
        Point3::new(0.0, 1.5, 0.0),
    ];
    let faces = [[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4], [0, 2, 1], [0, 3, 2]];
    Mesh::from_indexed(&positions, &faces)
}

fn build_scene() -> tracer_accel::Result<Scene> {
    let mut builder = SceneBuilder::new(SceneConfig::default());
    let mut registry = ObjectRegistry::new();

    let sphere = Arc::new(Shape::Sphere(Sphere::new(Point3::origin(), 0.5)));
    for i in 0..5 {
        for j in 0..3 {
            let offset = Vector3::new(i as Real * 1.5 - 3.0, 0.5, j as Real * 1.5 + 2.0);
            builder.add_instance(
                Instance::new(sphere.clone())
                    .with_transform(Transform::translation(offset))
                    .with_motion_blur(Vector3::new(0.0, 0.2 * j as Real, 0.0))
                    .with_material(i * 3 + j),
            );
        }
    }

    let pyramid = Arc::new(Shape::Mesh(pyramid()?));
    let base = Transform::from_ops(&[
        TransformOp::Rotation {
            angle: 30.0,
            axis: Vector3::y(),
        },
        TransformOp::Translation(Vector3::new(-2.0, 0.0, 7.0)),
    ])?;
    info!(
        "Pyramid bounds after placement: {}",
        pyramid.local_aabb().transformed(base.matrix())
    );
    registry.register(0, pyramid.clone(), base)?;
    builder.add_instance(Instance::new(pyramid).with_transform(base).with_material(20));

    // Two more pyramids reusing the registered mesh.
    let shifted = [TransformOp::Translation(Vector3::new(4.0, 0.0, 0.0))];
    builder.add_instance(registry.instantiate_as(1, 0, &shifted, false)?.with_material(21));
    builder.add_instance(registry.instantiate(1, &shifted, false)?.with_material(22));

    builder.add_plane(Plane::new(Point3::origin(), Vector3::y()).with_material(30));
    Ok(builder.build())
}

fn main() -> tracer_accel::Result<()> {
    env_logger::init();

    let scene = build_scene()?;
    let eye = Point3::new(0.0, 3.0, -6.0);
    let mut rays: Vec<_> = (0..HEIGHT)
        .flat_map(|row| (0..WIDTH).map(move |column| (row, column)))
        .map(|(row, column)| {
            let x = (column as Real / WIDTH as Real - 0.5) * 2.0;
            let y = (0.5 - row as Real / HEIGHT as Real) * 1.2;
            let direction = Vector3::new(x, y - 0.3, 1.0);
            scene
                .primary_ray(eye, direction)
                .with_time(column as Real / WIDTH as Real)
        })
        .collect();

    let hits = scene.intersect_batch(&mut rays);
    let light = Point3::new(5.0, 10.0, -5.0);
    let mut lit = 0usize;
    for row in hits.chunks(WIDTH) {
        let line: String = row
            .iter()
            .map(|hit| match hit {
                None => ' ',
                Some(hit) => {
                    let shadow = scene.shadow_ray(hit.point, hit.normal, light);
                    if scene.is_occluded(&shadow) {
                        '.'
                    } else {
                        lit += 1;
                        let shade = (hit.t / 20.0).clamp(0.0, 0.99);
                        SHADES[(shade * (SHADES.len() - 1) as Real) as usize] as char
                    }
                }
            })
            .collect();
        println!("{}", line);
    }

    info!(
        "Traced {} rays: {} hits, {} lit.",
        rays.len(),
        hits.iter().filter(|hit| hit.is_some()).count(),
        lit
    );
    Ok(())
}
