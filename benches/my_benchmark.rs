use bvh_mocap::parse::load_bvh_from_string;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fmt::Write;

const CHAINS: usize = 5;
const CHAIN_LEN: usize = 4;
const NUM_FRAMES: usize = 1000;

/// Builds a hips-plus-five-chains skeleton with NUM_FRAMES frames of motion,
/// roughly the shape of a mocap capture session.
fn synthetic_bvh() -> String {
    let mut out = String::from("HIERARCHY\nROOT Hips\n{\n");
    out.push_str("OFFSET 0.0 0.0 0.0\n");
    out.push_str("CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation\n");
    for chain in 0..CHAINS {
        for depth in 0..CHAIN_LEN {
            writeln!(out, "JOINT Chain{chain}_{depth}").unwrap();
            out.push_str("{\nOFFSET 0.0 1.0 0.0\nCHANNELS 3 Zrotation Xrotation Yrotation\n");
        }
        out.push_str("End Site\n{\nOFFSET 0.0 1.0 0.0\n}\n");
        for _ in 0..CHAIN_LEN {
            out.push_str("}\n");
        }
    }
    out.push_str("}\nMOTION\n");

    let values_per_frame = 6 + CHAINS * CHAIN_LEN * 3;
    writeln!(out, "Frames: {NUM_FRAMES}").unwrap();
    out.push_str("Frame Time: 0.008333\n");
    for frame in 0..NUM_FRAMES {
        for value in 0..values_per_frame {
            write!(out, "{:.3} ", ((frame * 31 + value * 7) % 720) as f64 * 0.5).unwrap();
        }
        out.push('\n');
    }
    out
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let content = synthetic_bvh();

    let mut group = c.benchmark_group("parse");
    group.sample_size(10);
    group.bench_function("synthetic 1000 frames", |b| {
        b.iter(|| black_box(load_bvh_from_string(&content).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
