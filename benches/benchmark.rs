use std::fs;

use criterion::{criterion_group, criterion_main, Criterion};

use zonecut::{BBox, Triangulator};

fn load_fixture(name: &str) -> Vec<[i64; 2]> {
    let s = fs::read_to_string("./tests/fixtures/".to_string() + name + ".json").unwrap();
    serde_json::from_str::<Vec<[i64; 2]>>(&s).unwrap()
}

/// Irregular star with `n` rays, radii from a fixed-seed LCG.
fn star(n: usize, seed: u64) -> Vec<[i64; 2]> {
    let mut s = seed;
    (0..n)
        .map(|k| {
            s = s
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let r = (200_000 + (s >> 33) % 800_000) as f64;
            let a = k as f64 * std::f64::consts::TAU / n as f64;
            [(r * a.cos()).round() as i64, (r * a.sin()).round() as i64]
        })
        .collect()
}

fn bench(c: &mut Criterion) {
    let mut triangulator = Triangulator::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();

    for name in ["comb", "spiral", "rounded-pad", "star-spike", "self-touching"] {
        let ring = load_fixture(name);
        let bbox = BBox::from_points(&ring).unwrap();
        c.bench_function(name, |b| {
            b.iter(|| {
                let _ = triangulator.triangulate(ring.iter().copied(), &bbox, &mut triangles);
            })
        });
    }

    for n in [1_000, 20_000] {
        let ring = star(n, 7);
        let bbox = BBox::from_points(&ring).unwrap();
        c.bench_function(&format!("star-{n}"), |b| {
            b.iter(|| {
                let _ = triangulator.triangulate(ring.iter().copied(), &bbox, &mut triangles);
            })
        });
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
