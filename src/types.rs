use cgmath::Vector3;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Index = usize;
pub type ParentIndex = isize; // can be -1 if node has no parent
pub type Position = Vector3<f64>;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// One animatable degree of freedom on a joint, as named in a `CHANNELS` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Xposition,
    Yposition,
    Zposition,
    Xrotation,
    Yrotation,
    Zrotation,
}

impl Channel {
    /// Maps a channel-name token to a `Channel`. Anything outside the six
    /// known names is rejected by the hierarchy parser.
    pub fn from_token(token: &str) -> Option<Channel> {
        match token {
            "Xposition" => Some(Channel::Xposition),
            "Yposition" => Some(Channel::Yposition),
            "Zposition" => Some(Channel::Zposition),
            "Xrotation" => Some(Channel::Xrotation),
            "Yrotation" => Some(Channel::Yrotation),
            "Zrotation" => Some(Channel::Zrotation),
            _ => None,
        }
    }

    pub fn is_position(self) -> bool {
        matches!(
            self,
            Channel::Xposition | Channel::Yposition | Channel::Zposition
        )
    }

    pub fn is_rotation(self) -> bool {
        !self.is_position()
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// One skeletal joint or End Site marker.
///
/// Nodes live in the flat `Bvh::nodes` arena in file declaration order;
/// `parent_index` and `children` are indices into that arena.
#[derive(Debug)]
pub struct Node {
    pub name: String,
    pub index: Index,
    pub parent_index: ParentIndex,
    /// Static translation from the parent joint to this one.
    pub offset: Position,
    /// Declared channel list. Empty for End Sites.
    pub channels: Vec<Channel>,
    /// Child indices in declaration order. That order drives the per-frame
    /// motion traversal and is never reordered.
    pub children: Vec<Index>,
    pub is_end_site: bool,
    /// One value vector per frame, each of length `channels.len()`.
    /// Stays empty for nodes without channels.
    pub frames: Vec<Vec<f64>>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent_index == -1
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// A parsed .bvh file: the skeleton forest plus the motion header values.
#[derive(Debug)]
pub struct Bvh {
    /// All nodes of all skeletons, in file declaration order.
    pub nodes: Vec<Node>,
    /// Arena indices of the `ROOT` nodes, in declaration order.
    pub roots: Vec<Index>,
    pub num_frames: usize,
    pub frame_time: f64,
    pub fps: u32,
}

impl Bvh {
    pub fn node(&self, index: Index) -> &Node {
        &self.nodes[index]
    }

    pub fn children<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> {
        node.children.iter().map(move |&child| &self.nodes[child])
    }

    /// The fixed traversal order for motion data: each root in declaration
    /// order, then its subtree depth-first with children left-to-right.
    ///
    /// Computed from the tree shape alone, so it is identical every time it
    /// is taken. The motion reader takes it once and replays it per frame.
    pub fn motion_order(&self) -> Vec<Index> {
        fn walk(nodes: &[Node], index: Index, order: &mut Vec<Index>) {
            order.push(index);
            for &child in &nodes[index].children {
                walk(nodes, child, order);
            }
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            walk(&self.nodes, root, &mut order);
        }
        order
    }

    /// Numeric tokens consumed per motion frame across the whole forest.
    pub fn channels_per_frame(&self) -> usize {
        self.nodes.iter().map(|node| node.channels.len()).sum()
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_node(name: &str, index: Index, parent_index: ParentIndex) -> Node {
        Node {
            name: name.to_string(),
            index,
            parent_index,
            offset: Position::new(0.0, 0.0, 0.0),
            channels: Vec::new(),
            children: Vec::new(),
            is_end_site: false,
            frames: Vec::new(),
        }
    }

    #[test]
    fn motion_order_is_preorder_with_declaration_order_siblings() {
        // root(0) -> [a(1) -> [c(3)], b(2)]; c sits after b in the arena on
        // purpose, the walk must follow `children` rather than arena order
        let mut root = bare_node("root", 0, -1);
        root.children = vec![1, 2];
        let mut a = bare_node("a", 1, 0);
        a.children = vec![3];
        let b = bare_node("b", 2, 0);
        let c = bare_node("c", 3, 1);

        let bvh = Bvh {
            nodes: vec![root, a, b, c],
            roots: vec![0],
            num_frames: 0,
            frame_time: 0.0,
            fps: 0,
        };
        assert_eq!(bvh.motion_order(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn channel_tokens_map_to_the_known_set() {
        assert_eq!(Channel::from_token("Xposition"), Some(Channel::Xposition));
        assert_eq!(Channel::from_token("Zrotation"), Some(Channel::Zrotation));
        assert_eq!(Channel::from_token("Wrotation"), None);
        assert_eq!(Channel::from_token("xposition"), None);
        assert!(Channel::Yposition.is_position());
        assert!(Channel::Yrotation.is_rotation());
    }
}
