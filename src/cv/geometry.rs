// src/cv/geometry.rs

use crate::Point2i;

fn dist_sq(a: Point2i, b: Point2i) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    dx * dx + dy * dy
}

/// Half-open run of contour indices. Indices may exceed the contour length
/// and are taken modulo it when dereferenced.
#[derive(Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

/// Douglas-Peucker simplification of a closed contour.
///
/// The contour is first split at two mutually distant points (found by three
/// rounds of farthest-point search), then each half is split recursively at
/// the point farthest from its chord until every point lies within `epsilon`.
///
/// # Arguments
/// * `contour` - The closed input boundary.
/// * `epsilon` - Maximum allowed distance between the contour and its approximation.
///
/// # Returns
/// The retained vertices, in contour order.
pub fn approx_poly_dp(contour: &[Point2i], epsilon: f64) -> Vec<Point2i> {
    let len = contour.len();
    if len == 0 {
        return Vec::new();
    }

    let epsilon_sq = epsilon * epsilon;

    let mut anchor = 0;
    let mut offset = 0;
    let mut max_dist = 0.0;
    for _ in 0..3 {
        anchor = (anchor + offset) % len;
        max_dist = 0.0;
        for j in 1..len {
            let d = dist_sq(contour[(anchor + j) % len], contour[anchor]);
            if d > max_dist {
                max_dist = d;
                offset = j;
            }
        }
    }

    let mut poly = Vec::new();
    if max_dist <= epsilon_sq {
        poly.push(contour[anchor]);
        return poly;
    }

    let split = anchor + offset;
    let mut stack = vec![
        Span {
            start: split % len,
            end: if split % len < anchor {
                anchor
            } else {
                anchor + len
            },
        },
        Span {
            start: anchor,
            end: split,
        },
    ];

    while let Some(span) = stack.pop() {
        let start_pt = contour[span.start % len];
        let end_pt = contour[span.end % len];

        let mut within = true;
        let mut farthest = span.start;

        if span.end > span.start + 1 {
            let dx = (end_pt.x - start_pt.x) as f64;
            let dy = (end_pt.y - start_pt.y) as f64;
            let mut max_dev = 0.0;

            for i in (span.start + 1)..span.end {
                let pt = contour[i % len];
                let dev = (((pt.y - start_pt.y) as f64) * dx - ((pt.x - start_pt.x) as f64) * dy)
                    .abs();
                if dev > max_dev {
                    max_dev = dev;
                    farthest = i;
                }
            }

            within = max_dev * max_dev <= epsilon_sq * (dx * dx + dy * dy);
        }

        if within {
            poly.push(start_pt);
        } else {
            stack.push(Span {
                start: farthest,
                end: span.end,
            });
            stack.push(Span {
                start: span.start,
                end: farthest,
            });
        }
    }

    drop_straight_vertices(poly, epsilon)
}

/// Closing pass over a simplified closed polygon: drops a vertex that lies
/// within `epsilon / sqrt(2)` of the chord joining its neighbours and between
/// them. Axis-aligned chords are left alone. The vertex after a removed one is
/// kept without being tested, and at least two vertices always remain.
fn drop_straight_vertices(poly: Vec<Point2i>, epsilon: f64) -> Vec<Point2i> {
    let len = poly.len();
    if len <= 2 {
        return poly;
    }

    let limit = 0.5 * epsilon * epsilon;
    let mut kept = Vec::with_capacity(len);
    let mut remaining = len;
    let mut start = poly[len - 1];
    let mut i = 0;

    while i < len {
        let pt = poly[i];
        let end = poly[(i + 1) % len];

        let dx = end.x as f64 - start.x as f64;
        let dy = end.y as f64 - start.y as f64;
        let (px, py) = (pt.x as f64 - start.x as f64, pt.y as f64 - start.y as f64);
        let dev = (px * dy - py * dx).abs();
        let forward = px * (end.x as f64 - pt.x as f64) + py * (end.y as f64 - pt.y as f64);

        if remaining > 2
            && dx != 0.0
            && dy != 0.0
            && forward >= 0.0
            && dev * dev <= limit * (dx * dx + dy * dy)
        {
            remaining -= 1;
            if i + 1 < len {
                kept.push(end);
            }
            start = end;
            i += 2;
            continue;
        }

        kept.push(pt);
        start = pt;
        i += 1;
    }

    kept
}

/// Length of the closed outline through `poly`.
pub fn perimeter(poly: &[Point2i]) -> f64 {
    let Some(&last) = poly.last() else {
        return 0.0;
    };

    let mut prev = last;
    let mut p = 0.0;
    for &cur in poly {
        p += dist_sq(cur, prev).sqrt();
        prev = cur;
    }
    p
}

/// Signed shoelace area of the closed polygon `poly`.
/// Positive for counter-clockwise order in a y-up frame, which is clockwise on screen.
pub fn contour_area(poly: &[Point2i]) -> f64 {
    let Some(&last) = poly.last() else {
        return 0.0;
    };

    let mut prev = last;
    let mut twice_area = 0i64;
    for &cur in poly {
        twice_area += prev.x as i64 * cur.y as i64 - cur.x as i64 * prev.y as i64;
        prev = cur;
    }
    twice_area as f64 * 0.5
}

/// Tests if the closed polygon turns the same way at every vertex.
/// Collinear or repeated vertices make the polygon non-convex.
pub fn is_contour_convex(contour: &[Point2i]) -> bool {
    let len = contour.len();
    if len < 3 {
        return false;
    }

    let mut orientation = 0u8;
    let mut prev_pt = contour[len - 1];
    let mut dx0 = contour[0].x - prev_pt.x;
    let mut dy0 = contour[0].y - prev_pt.y;
    prev_pt = contour[0];

    for j in 1..=len {
        let cur_pt = contour[j % len];
        let dx = cur_pt.x - prev_pt.x;
        let dy = cur_pt.y - prev_pt.y;

        // i64 keeps the cross product exact for any i32 coordinates
        let dxdy0 = dx as i64 * dy0 as i64;
        let dydx0 = dy as i64 * dx0 as i64;

        orientation |= if dydx0 > dxdy0 {
            1
        } else if dydx0 < dxdy0 {
            2
        } else {
            3
        };

        if orientation == 3 {
            return false;
        }

        dx0 = dx;
        dy0 = dy;
        prev_pt = cur_pt;
    }

    true
}
