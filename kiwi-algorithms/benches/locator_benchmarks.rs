use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiwi_algorithms::CellLocator;
use kiwi_core::{Point3f, PolyMesh};

/// A `n` x `n` grid of unit quads in the z = 0 plane
fn quad_grid(n: usize) -> PolyMesh {
    let mut mesh = PolyMesh::new();
    for i in 0..=n {
        for j in 0..=n {
            mesh.add_point(Point3f::new(i as f32, j as f32, 0.0));
        }
    }
    let stride = n + 1;
    for i in 0..n {
        for j in 0..n {
            let a = i * stride + j;
            let b = a + stride;
            mesh.triangles.push([a, b, b + 1]);
            mesh.triangles.push([a, b + 1, a + 1]);
        }
    }
    mesh
}

fn bench_build(c: &mut Criterion) {
    let mesh = quad_grid(128);
    c.bench_function("cell_locator_build_32k", |b| {
        b.iter(|| CellLocator::build(black_box(&mesh)))
    });
}

fn bench_pick(c: &mut Criterion) {
    let locator = CellLocator::build(&quad_grid(128));
    let p0 = Point3f::new(64.3, 31.7, 100.0);
    let p1 = Point3f::new(64.3, 31.7, -100.0);
    c.bench_function("cell_locator_pick", |b| {
        b.iter(|| locator.intersect_with_line(black_box(&p0), black_box(&p1), 0.0))
    });
}

criterion_group!(benches, bench_build, bench_pick);
criterion_main!(benches);
