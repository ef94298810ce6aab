use criterion::{criterion_group, criterion_main, Criterion};
use octahedra::lattice::Lattice;
use octahedra::site::Site;
use octahedra::structure::Structure;
use octahedra::tilting::{mean_tilting_angle, TiltingParams};
use std::hint::black_box;
use std::time::Duration;

fn cubic_perovskite(n: usize, a: f64) -> Structure {
    let mut structure = Structure::new(Lattice::cubic(a * n as f64).unwrap());
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let origin = [i as f64 * a, j as f64 * a, k as f64 * a];
                let at = |fx: f64, fy: f64, fz: f64| {
                    [origin[0] + fx * a, origin[1] + fy * a, origin[2] + fz * a]
                };
                structure.add_site(Site::new("Cs", at(0.0, 0.0, 0.0)));
                structure.add_site(Site::new("Pb", at(0.5, 0.5, 0.5)));
                structure.add_site(Site::new("I", at(0.5, 0.5, 0.0)));
                structure.add_site(Site::new("I", at(0.5, 0.0, 0.5)));
                structure.add_site(Site::new("I", at(0.0, 0.5, 0.5)));
            }
        }
    }
    structure
}

fn criterion_benchmark(c: &mut Criterion) {
    let structure = cubic_perovskite(3, 6.0);
    let params = TiltingParams::default();

    let mut group = c.benchmark_group("tilting");
    group.measurement_time(Duration::from_secs(6));
    group.bench_function("mean tilting angle 3x3x3", |b| {
        b.iter(|| black_box(mean_tilting_angle(&structure, &params).unwrap()))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
