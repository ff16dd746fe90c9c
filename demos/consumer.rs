//! Walks a parsed file the way a downstream scene builder would: one
//! transform object per node, parented per `parent_index`, the static offset
//! as its translation, then per-frame channel values decoded into position
//! and rotation updates.
//!
//! Run with `cargo run --example consumer`.

use bvh_mocap::parse::load_bvh_from_string;
use bvh_mocap::types::{Channel, Index, Position};
use cgmath::{Deg, Euler, Quaternion};

const SAMPLE: &str = r#"HIERARCHY
ROOT Hips
{
    OFFSET 0.0 0.9 0.0
    CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation
    JOINT Spine
    {
        OFFSET 0.0 0.2 0.0
        CHANNELS 3 Zrotation Xrotation Yrotation
        End Site
        {
            OFFSET 0.0 0.3 0.0
        }
    }
}
MOTION
Frames: 2
Frame Time: 0.033333
0.0 0.9 0.0 0.0 0.0 0.0 0.0 0.0 0.0
0.1 1.0 0.0 0.0 90.0 0.0 0.0 45.0 0.0
"#;

/// Stand-in for a host scene object (a transform/joint node in a 3D scene).
struct SceneObject {
    name: String,
    parent: Option<Index>,
    translation: Position,
    rotation: Quaternion<f64>,
}

fn identity() -> Quaternion<f64> {
    Quaternion::from(Euler::new(Deg(0.0), Deg(0.0), Deg(0.0)))
}

/// Decodes one channel value onto a scene object: position channels
/// overwrite the matching translation component, rotation channels compose
/// in the order the channels were declared.
fn apply(object: &mut SceneObject, channel: Channel, value: f64) {
    match channel {
        Channel::Xposition => object.translation.x = value,
        Channel::Yposition => object.translation.y = value,
        Channel::Zposition => object.translation.z = value,
        Channel::Xrotation => {
            object.rotation = object.rotation * Quaternion::from(Euler::new(Deg(value), Deg(0.0), Deg(0.0)))
        }
        Channel::Yrotation => {
            object.rotation = object.rotation * Quaternion::from(Euler::new(Deg(0.0), Deg(value), Deg(0.0)))
        }
        Channel::Zrotation => {
            object.rotation = object.rotation * Quaternion::from(Euler::new(Deg(0.0), Deg(0.0), Deg(value)))
        }
    }
}

fn main() {
    let bvh = load_bvh_from_string(SAMPLE).expect("sample is well formed");

    // motion header fields
    assert_eq!(bvh.num_frames, 2);
    assert_eq!(bvh.fps, 30);

    // one scene object per node, parented the way the nodes are
    let mut scene: Vec<SceneObject> = bvh
        .nodes
        .iter()
        .map(|node| SceneObject {
            name: node.name.clone(),
            parent: (node.parent_index != -1).then(|| node.parent_index as Index),
            translation: node.offset,
            rotation: identity(),
        })
        .collect();

    println!("scene graph:");
    for object in &scene {
        let parent = object
            .parent
            .map(|p| scene[p].name.as_str())
            .unwrap_or("<none>");
        println!("  {} (parent: {parent})", object.name);
    }

    // pose the scene once per frame; End Sites have no channels and keep
    // their rest transform
    let order = bvh.motion_order();
    for frame in 0..bvh.num_frames {
        for &index in &order {
            let node = bvh.node(index);
            if node.channels.is_empty() {
                continue;
            }
            let object = &mut scene[index];
            object.translation = node.offset;
            object.rotation = identity();
            for (&channel, &value) in node.channels.iter().zip(&node.frames[frame]) {
                apply(object, channel, value);
            }
        }

        let root = &scene[bvh.roots[0]];
        println!(
            "frame {frame}: {} at ({:.2}, {:.2}, {:.2})",
            root.name, root.translation.x, root.translation.y, root.translation.z
        );
    }
}
