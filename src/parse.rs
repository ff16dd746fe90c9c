use crate::tokens::{Token, TokenStream};
use crate::types::{Bvh, Channel, Index, Node, ParentIndex, Position};
use log::debug;
use thiserror::Error;

///////////////////////////////////////////////////////////////////////////////////////////////////

/// Errors surfaced by the .bvh parser.
///
/// Parsing is strict: the first structural or numeric failure aborts the
/// whole parse and nothing partial is returned.
#[derive(Error, Debug)]
pub enum BvhError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected {expected}, found `{found}`")]
    MalformedHeader {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: {message}")]
    MalformedNodeGrammar { line: usize, message: String },

    #[error("line {line}: in End Site: {message}")]
    MalformedEndSite { line: usize, message: String },

    #[error("line {line}: expected a number, found `{token}`")]
    NumericParse { line: usize, token: String },

    #[error("motion data ran out after {frames_read} of {expected} declared frames")]
    TruncatedMotionData { frames_read: usize, expected: usize },
}

pub type BvhResult<T> = Result<T, BvhError>;

fn header_error(expected: &'static str) -> impl Fn(usize, &str) -> BvhError {
    move |line, found| BvhError::MalformedHeader {
        line,
        expected,
        found: found.to_string(),
    }
}

fn node_error(expected: &'static str) -> impl Fn(usize, &str) -> BvhError {
    move |line, found| BvhError::MalformedNodeGrammar {
        line,
        message: format!("expected {expected}, found `{found}`"),
    }
}

fn end_site_error(expected: &'static str) -> impl Fn(usize, &str) -> BvhError {
    move |line, found| BvhError::MalformedEndSite {
        line,
        message: format!("expected {expected}, found `{found}`"),
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////

fn next_token<'a>(
    tokens: &mut TokenStream<'a>,
    err: impl FnOnce(usize, &str) -> BvhError,
) -> BvhResult<Token<'a>> {
    let line = tokens.line();
    tokens.next().ok_or_else(|| err(line, "end of file"))
}

fn expect(
    tokens: &mut TokenStream<'_>,
    literal: &str,
    err: impl FnOnce(usize, &str) -> BvhError,
) -> BvhResult<()> {
    let line = tokens.line();
    match tokens.next() {
        Some(token) if token.text == literal => Ok(()),
        Some(token) => Err(err(token.line, token.text)),
        None => Err(err(line, "end of file")),
    }
}

fn parse_f64(token: Token<'_>) -> BvhResult<f64> {
    token.text.parse().map_err(|_| BvhError::NumericParse {
        line: token.line,
        token: token.text.to_string(),
    })
}

fn parse_usize(token: Token<'_>) -> BvhResult<usize> {
    token.text.parse().map_err(|_| BvhError::NumericParse {
        line: token.line,
        token: token.text.to_string(),
    })
}

fn read_offset(
    tokens: &mut TokenStream<'_>,
    err: impl Fn(usize, &str) -> BvhError,
) -> BvhResult<Position> {
    let x = parse_f64(next_token(tokens, &err)?)?;
    let y = parse_f64(next_token(tokens, &err)?)?;
    let z = parse_f64(next_token(tokens, &err)?)?;
    Ok(Position::new(x, y, z))
}

///////////////////////////////////////////////////////////////////////////////////////////////////

/// Parses the shared `ROOT`/`JOINT` node body:
/// `<name> { OFFSET x y z CHANNELS n ch1..chn`, then appends the node to the
/// arena and returns its index. The body is left open; the caller tracks the
/// closing brace.
fn read_node(
    tokens: &mut TokenStream<'_>,
    nodes: &mut Vec<Node>,
    parent_index: ParentIndex,
) -> BvhResult<Index> {
    let name = next_token(tokens, node_error("a joint name"))?;
    expect(tokens, "{", node_error("`{`"))?;
    expect(tokens, "OFFSET", node_error("`OFFSET`"))?;
    let offset = read_offset(tokens, node_error("an OFFSET value"))?;
    expect(tokens, "CHANNELS", node_error("`CHANNELS`"))?;
    let count = parse_usize(next_token(tokens, node_error("a channel count"))?)?;

    //// The declared count must be matched by exactly that many channel
    //// names; a list that runs short trips over the next keyword here.
    let mut channels = Vec::with_capacity(count);
    for _ in 0..count {
        let token = next_token(tokens, node_error("a channel name"))?;
        match Channel::from_token(token.text) {
            Some(channel) => channels.push(channel),
            None => {
                return Err(BvhError::MalformedNodeGrammar {
                    line: token.line,
                    message: format!(
                        "`{}` is not a channel name; CHANNELS {count} takes exactly {count} channel names",
                        token.text
                    ),
                })
            }
        }
    }

    let index = nodes.len();
    nodes.push(Node {
        name: name.text.to_string(),
        index,
        parent_index,
        offset,
        channels,
        children: Vec::new(),
        is_end_site: false,
        frames: Vec::new(),
    });
    Ok(index)
}

/// Parses `Site { OFFSET x y z }` after an `End` token and attaches the
/// channel-less leaf to `parent`. End Sites close their own brace, so they
/// never go on the open-node stack.
fn read_end_site(
    tokens: &mut TokenStream<'_>,
    nodes: &mut Vec<Node>,
    parent: Index,
) -> BvhResult<()> {
    expect(tokens, "Site", end_site_error("`Site`"))?;
    expect(tokens, "{", end_site_error("`{`"))?;
    expect(tokens, "OFFSET", end_site_error("`OFFSET`"))?;
    let offset = read_offset(tokens, end_site_error("an OFFSET value"))?;
    expect(tokens, "}", end_site_error("`}`"))?;

    let index = nodes.len();
    nodes.push(Node {
        name: "Site".to_string(),
        index,
        parent_index: parent as ParentIndex,
        offset,
        channels: Vec::new(),
        children: Vec::new(),
        is_end_site: true,
        frames: Vec::new(),
    });
    nodes[parent].children.push(index);
    Ok(())
}

/// Hierarchy phase. Consumes everything from the `HIERARCHY` header through
/// the `MOTION` keyword and returns the static forest with no frames
/// attached yet.
fn parse_hierarchy(tokens: &mut TokenStream<'_>) -> BvhResult<Bvh> {
    expect(tokens, "HIERARCHY", header_error("HIERARCHY"))?;

    let mut nodes: Vec<Node> = Vec::new();
    let mut roots: Vec<Index> = Vec::new();

    loop {
        let keyword = next_token(tokens, header_error("ROOT or MOTION"))?;
        match keyword.text {
            "MOTION" => break,
            "ROOT" => {
                let root = read_node(tokens, &mut nodes, -1)?;
                roots.push(root);

                //// The open stack tracks brace scope only; the motion
                //// traversal order is derived from the finished tree.
                let mut open: Vec<Index> = vec![root];
                while let Some(&top) = open.last() {
                    let token = next_token(tokens, node_error("`JOINT`, `End` or `}`"))?;
                    match token.text {
                        "JOINT" => {
                            let joint = read_node(tokens, &mut nodes, top as ParentIndex)?;
                            nodes[top].children.push(joint);
                            open.push(joint);
                        }
                        "End" => read_end_site(tokens, &mut nodes, top)?,
                        "}" => {
                            open.pop();
                        }
                        other => {
                            return Err(BvhError::MalformedNodeGrammar {
                                line: token.line,
                                message: format!("unexpected token `{other}` in joint body"),
                            })
                        }
                    }
                }
            }
            other => {
                return Err(BvhError::MalformedHeader {
                    line: keyword.line,
                    expected: "ROOT or MOTION",
                    found: other.to_string(),
                })
            }
        }
    }

    debug!(
        "parsed hierarchy: {} nodes across {} roots",
        nodes.len(),
        roots.len()
    );

    Ok(Bvh {
        nodes,
        roots,
        num_frames: 0,
        frame_time: 0.0,
        fps: 0,
    })
}

/// Motion phase. Expects the stream just past the `MOTION` keyword, parses
/// the `Frames:` and `Frame Time:` headers, then reads exactly `num_frames`
/// frames of channel values onto the forest.
///
/// Every frame replays the same pre-order node list taken once up front, so
/// the i-th value of a node's frame vector always belongs to `channels[i]`.
/// A missing or non-numeric token aborts the parse. Tokens left over after
/// the declared frame count are ignored.
fn parse_motion(tokens: &mut TokenStream<'_>, bvh: &mut Bvh) -> BvhResult<()> {
    expect(tokens, "Frames:", header_error("Frames:"))?;
    bvh.num_frames = parse_usize(next_token(tokens, header_error("a frame count"))?)?;
    // `Frame Time:` tokenizes as two words
    expect(tokens, "Frame", header_error("Frame Time:"))?;
    expect(tokens, "Time:", header_error("Frame Time:"))?;
    bvh.frame_time = parse_f64(next_token(tokens, header_error("a frame time"))?)?;
    bvh.fps = (1.0 / bvh.frame_time) as u32;

    let order = bvh.motion_order();
    for frame in 0..bvh.num_frames {
        for &index in &order {
            let count = bvh.nodes[index].channels.len();
            if count == 0 {
                continue; // End Sites stay in the walk but consume nothing
            }
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                let token = tokens.next().ok_or(BvhError::TruncatedMotionData {
                    frames_read: frame,
                    expected: bvh.num_frames,
                })?;
                values.push(parse_f64(token)?);
            }
            bvh.nodes[index].frames.push(values);
        }
    }

    debug!(
        "read {} frames of {} values at {}s per frame",
        bvh.num_frames,
        bvh.channels_per_frame(),
        bvh.frame_time
    );
    Ok(())
}

//////////////////////////////////////////////////// PUBLIC ////////////////////////////////////////

/// Loads and parses a .bvh file from a file path.
pub fn load_bvh_from_file(file_path: &str) -> BvhResult<Bvh> {
    let contents = std::fs::read_to_string(file_path)?;
    load_bvh_from_string(&contents)
}

/// Parses .bvh content already in memory.
///
/// Runs the two phases back to back: the hierarchy parser builds the static
/// forest, then the motion reader streams frame values onto it. On error the
/// half-built forest is dropped here, so callers never observe a `Bvh` with
/// inconsistent frame counts.
pub fn load_bvh_from_string(content: &str) -> BvhResult<Bvh> {
    let mut tokens = TokenStream::new(content);
    let mut bvh = parse_hierarchy(&mut tokens)?;
    parse_motion(&mut tokens, &mut bvh)?;
    Ok(bvh)
}

///////////////////////////////////////////////////////////////////////////////////////////////////
