//! Reassembles clipped polygon fragments into closed rings by walking the
//! clip boundary between their endpoints.
//!
//! Every fragment contributes two intersections: where it enters and where
//! it leaves the visible region. The intersections are threaded onto two
//! circular lists, one in fragment order (the subject) and one in boundary
//! order (the clip), and the walk alternates between them. Nodes live in a
//! flat arena and link to each other by index.

use std::cmp::Ordering;

use crate::math::EPSILON;
use crate::stream::Stream;

/// The boundary of a clip region, as needed to close rings along it.
pub trait ClipBoundary {
    /// Emit the boundary path from `from` to `to`, or the whole boundary
    /// when `endpoints` is `None`. `direction` is `1.0` or `-1.0`.
    fn interpolate(&self, endpoints: Option<([f64; 2], [f64; 2])>, direction: f64, stream: &mut dyn Stream);

    /// Order of two boundary points along the boundary.
    fn compare(&self, a: &[f64; 2], b: &[f64; 2]) -> Ordering;
}

#[derive(Debug)]
struct Intersection {
    x: [f64; 2],
    /// Fragment this node belongs to; `None` for clip-list nodes.
    segment: Option<usize>,
    other: usize,
    entry: bool,
    visited: bool,
    next: usize,
    prev: usize,
}

impl Intersection {
    fn new(x: [f64; 2], segment: Option<usize>, entry: bool) -> Self {
        Self {
            x,
            segment,
            other: 0,
            entry,
            visited: false,
            next: 0,
            prev: 0,
        }
    }
}

fn point_equal(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() < EPSILON && (a[1] - b[1]).abs() < EPSILON
}

fn link(nodes: &mut [Intersection], order: &[usize]) {
    let n = order.len();
    for (i, &index) in order.iter().enumerate() {
        nodes[index].next = order[(i + 1) % n];
        nodes[index].prev = order[(i + n - 1) % n];
    }
}

fn emit(points: &[[f64; 2]], stream: &mut dyn Stream) {
    for p in points {
        stream.point(p[0], p[1], 0.0);
    }
}

/// Close the given fragments into rings and stream them.
///
/// `start_inside` tells whether the boundary's starting point lies inside
/// the polygon being clipped. A fragment whose endpoints coincide is already
/// closed and is streamed as-is. Neither clip marks its cut points, so
/// coincident endpoints always mean a ring that left and re-entered through
/// the same boundary point, never a degenerate cut that needs nudging apart.
pub fn rejoin<B: ClipBoundary + ?Sized>(
    segments: &[Vec<[f64; 2]>],
    boundary: &B,
    mut start_inside: bool,
    stream: &mut dyn Stream,
) {
    let mut nodes: Vec<Intersection> = Vec::with_capacity(segments.len() * 4);
    let mut subject = Vec::with_capacity(segments.len() * 2);
    let mut clip = Vec::with_capacity(segments.len() * 2);

    for (index, segment) in segments.iter().enumerate() {
        if segment.len() <= 1 {
            continue;
        }
        let n = segment.len() - 1;
        let p0 = segment[0];
        let p1 = segment[n];

        if point_equal(p0, p1) {
            stream.line_start();
            emit(&segment[..n], stream);
            stream.line_end();
            continue;
        }

        for (x, entry) in [(p0, true), (p1, false)] {
            let a = nodes.len();
            nodes.push(Intersection::new(x, Some(index), entry));
            nodes.push(Intersection::new(x, None, !entry));
            nodes[a].other = a + 1;
            nodes[a + 1].other = a;
            subject.push(a);
            clip.push(a + 1);
        }
    }

    if subject.is_empty() {
        return;
    }

    clip.sort_by(|&a, &b| boundary.compare(&nodes[a].x, &nodes[b].x));
    link(&mut nodes, &subject);
    link(&mut nodes, &clip);

    for &index in &clip {
        start_inside = !start_inside;
        nodes[index].entry = start_inside;
    }

    let start = subject[0];
    loop {
        let mut current = start;
        let mut is_subject = true;
        while nodes[current].visited {
            current = nodes[current].next;
            if current == start {
                return;
            }
        }

        stream.line_start();
        loop {
            nodes[current].visited = true;
            let other = nodes[current].other;
            nodes[other].visited = true;

            if nodes[current].entry {
                let next = nodes[current].next;
                if is_subject {
                    if let Some(segment) = nodes[current].segment {
                        emit(&segments[segment], stream);
                    }
                } else {
                    boundary.interpolate(Some((nodes[current].x, nodes[next].x)), 1.0, stream);
                }
                current = next;
            } else {
                let prev = nodes[current].prev;
                if is_subject {
                    if let Some(segment) = nodes[prev].segment {
                        for p in segments[segment].iter().rev() {
                            stream.point(p[0], p[1], 0.0);
                        }
                    }
                } else {
                    boundary.interpolate(Some((nodes[current].x, nodes[prev].x)), -1.0, stream);
                }
                current = prev;
            }

            current = nodes[current].other;
            is_subject = !is_subject;
            if nodes[current].visited {
                break;
            }
        }
        stream.line_end();
    }
}
