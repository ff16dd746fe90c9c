use std::process;

use bvh_mocap::parse::load_bvh_from_file;
use bvh_mocap::types::{Bvh, Index};

fn main() {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: bvh_mocap <file.bvh>");
            process::exit(2);
        }
    };

    let bvh = match load_bvh_from_file(&path) {
        Ok(bvh) => bvh,
        Err(err) => {
            eprintln!("{path}: {err}");
            process::exit(1);
        }
    };

    println!(
        "{path}: {} skeleton(s), {} nodes, {} frames at {:.6}s per frame ({} fps)",
        bvh.roots.len(),
        bvh.nodes.len(),
        bvh.num_frames,
        bvh.frame_time,
        bvh.fps
    );
    for &root in &bvh.roots {
        print_node(&bvh, root, 1);
    }
}

fn print_node(bvh: &Bvh, index: Index, depth: usize) {
    let node = bvh.node(index);
    let kind = if node.is_end_site { "end site" } else { "joint" };
    println!(
        "{:indent$}{} [{kind}] offset ({:.3}, {:.3}, {:.3}), {} channel(s)",
        "",
        node.name,
        node.offset.x,
        node.offset.y,
        node.offset.z,
        node.channels.len(),
        indent = depth * 2
    );
    for &child in &node.children {
        print_node(bvh, child, depth + 1);
    }
}
