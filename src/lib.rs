//! A .bvh (Biovision Hierarchy) motion capture file parser.
//!
//! A .bvh file pairs a brace-delimited skeletal hierarchy with a stream of
//! per-frame channel values. [`parse::load_bvh_from_file`] and
//! [`parse::load_bvh_from_string`] run both parse phases and hand back a
//! [`types::Bvh`]: the node forest (several `ROOT` skeletons per file are
//! legal), each joint's channel layout, and one value vector per joint per
//! frame.
//!
//! ```no_run
//! use bvh_mocap::parse::load_bvh_from_file;
//!
//! let bvh = load_bvh_from_file("walk.bvh")?;
//! println!("{} nodes, {} frames", bvh.nodes.len(), bvh.num_frames);
//! # Ok::<(), bvh_mocap::parse::BvhError>(())
//! ```

pub mod parse;
pub mod tokens;
pub mod types;

pub use parse::{load_bvh_from_file, load_bvh_from_string, BvhError};
pub use types::{Bvh, Channel, Node};
