use crate::{ImageBuffer, Point2i};

/// Copies a binary image into a zero-padded label grid.
///
/// The grid is `(width + 2) * (height + 2)` cells; every source pixel becomes
/// `1` when non-zero and `0` otherwise, and the one-cell frame is `0` so the
/// border follower never leaves the grid.
///
/// # Arguments
/// * `src` - The binary source `ImageBuffer`.
/// * `dst` - Pre-allocated label grid of the padded size.
///
/// # Returns
/// A reference to the filled label grid.
pub fn pad_binary<'a>(src: &ImageBuffer, dst: &'a mut [i32]) -> &'a [i32] {
    let width = src.width as usize;
    let height = src.height as usize;
    let padded_width = width + 2;

    dst.fill(0);
    for (y, row) in src.data.chunks_exact(width.max(1)).take(height).enumerate() {
        let start = (y + 1) * padded_width + 1;
        for (cell, &pixel) in dst[start..start + width].iter_mut().zip(row) {
            *cell = i32::from(pixel != 0);
        }
    }

    dst
}

/// Offsets for the 8-neighborhood (x, y), counter-clockwise starting east.
pub const NEIGHBORHOOD: [[i32; 2]; 8] = [
    [1, 0],
    [1, -1],
    [0, -1],
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
];

/// Flattened offsets for the 8-neighborhood in a grid of the given row width.
/// The eight offsets are stored twice so that a scan may run past index 7
/// without wrapping.
pub fn neighborhood_deltas(width: i32) -> [i32; 16] {
    let mut deltas = [0i32; 16];
    for (i, [dx, dy]) in NEIGHBORHOOD.iter().enumerate() {
        let delta = dx + dy * width;
        deltas[i] = delta;
        deltas[i + 8] = delta;
    }
    deltas
}

/// A single traced border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Border pixels in tracing order.
    pub points: Vec<Point2i>,
    /// Whether this border encloses a hole inside a foreground region.
    pub hole: bool,
}

/// Follows one border starting at `pos` (Suzuki & Abe).
///
/// Visited border cells are relabelled with `nbd` (or `-nbd` when their east
/// neighbor is background) so the raster scan in [`find_contours`] does not
/// start the same border twice.
///
/// # Arguments
/// * `grid` - Padded label grid, updated in place.
/// * `pos` - Flat index of the starting cell.
/// * `nbd` - Label of the border being traced.
/// * `point` - Image coordinates of the starting cell.
/// * `hole` - True when tracing a hole border.
/// * `deltas` - Neighborhood offsets from [`neighborhood_deltas`].
pub fn follow_border(
    grid: &mut [i32],
    pos: usize,
    nbd: i32,
    mut point: Point2i,
    hole: bool,
    deltas: &[i32; 16],
) -> Contour {
    let mut contour = Contour {
        points: Vec::new(),
        hole,
    };

    let step = |from: usize, dir: usize| (from as isize + deltas[dir] as isize) as usize;

    // Look clockwise for the first foreground neighbor.
    let mut s: usize = if hole { 0 } else { 4 };
    let mut s_end = s;
    let mut pos1;
    loop {
        s = s.wrapping_sub(1) & 7;
        pos1 = step(pos, s);
        if grid[pos1] != 0 || s == s_end {
            break;
        }
    }

    if s == s_end && grid[pos1] == 0 {
        // Isolated pixel.
        grid[pos] = -nbd;
        contour.points.push(point);
        return contour;
    }

    let mut pos3 = pos;
    loop {
        s_end = s;

        let mut pos4;
        loop {
            s = (s + 1) & 15;
            pos4 = step(pos3, s);
            if grid[pos4] != 0 {
                break;
            }
        }
        s &= 7;

        // The east neighbor was examined as background iff the scan wrapped past it.
        if (s.wrapping_sub(1) as u32) < s_end as u32 {
            grid[pos3] = -nbd;
        } else if grid[pos3] == 1 {
            grid[pos3] = nbd;
        }

        contour.points.push(point);
        point.x += NEIGHBORHOOD[s][0];
        point.y += NEIGHBORHOOD[s][1];

        if pos4 == pos && pos3 == pos1 {
            break;
        }

        pos3 = pos4;
        s = (s + 4) & 7;
    }

    contour
}

/// Raster-scans a padded binary grid and traces every outer and hole border.
///
/// # Arguments
/// * `src` - The binary `ImageBuffer`; any non-zero pixel is foreground.
/// * `grid` - Scratch label grid of `(width + 2) * (height + 2)` cells.
///
/// # Returns
/// All borders in discovery order, without hierarchy.
pub fn find_contours(src: &ImageBuffer, grid: &mut [i32]) -> Vec<Contour> {
    let width = src.width as usize;
    let height = src.height as usize;
    let mut contours = Vec::new();

    if width == 0 || height == 0 {
        return contours;
    }

    pad_binary(src, grid);
    let deltas = neighborhood_deltas((width + 2) as i32);

    let mut pos = width + 3;
    let mut nbd = 1;

    for y in 0..height {
        for x in 0..width {
            let pix = grid[pos];

            if pix != 0 {
                let outer = pix == 1 && grid[pos - 1] == 0;
                let hole = !outer && pix >= 1 && grid[pos + 1] == 0;

                if outer || hole {
                    nbd += 1;
                    let start = Point2i::new(x as i32, y as i32);
                    contours.push(follow_border(grid, pos, nbd, start, hole, &deltas));
                }
            }

            pos += 1;
        }
        // Skip the right padding of this row and the left padding of the next.
        pos += 2;
    }

    contours
}

/// Allocates a scratch grid and traces all borders of `src`.
pub fn trace_contours(src: &ImageBuffer) -> Vec<Contour> {
    let cells = (src.width as usize + 2) * (src.height as usize + 2);
    let mut grid = vec![0i32; cells];
    find_contours(src, &mut grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_binary() {
        let src_data = [1, 0, 1, 0, 1, 0, 0, 0, 9];
        let src = ImageBuffer {
            data: &src_data,
            width: 3,
            height: 3,
        };

        let mut dst = vec![7i32; 25];
        let padded = pad_binary(&src, &mut dst);

        for i in 0..5 {
            assert_eq!(padded[i], 0);
            assert_eq!(padded[20 + i], 0);
            assert_eq!(padded[i * 5], 0);
            assert_eq!(padded[i * 5 + 4], 0);
        }

        let expected = [1, 0, 1, 0, 1, 0, 0, 0, 1];
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(padded[(y + 1) * 5 + x + 1], expected[y * 3 + x]);
            }
        }
    }

    #[test]
    fn test_ring_has_outer_and_hole_border() {
        let src_data = [
            0, 0, 0, 0, 0, //
            0, 255, 255, 255, 0, //
            0, 255, 0, 255, 0, //
            0, 255, 255, 255, 0, //
            0, 0, 0, 0, 0,
        ];
        let img = ImageBuffer {
            data: &src_data,
            width: 5,
            height: 5,
        };

        let contours = trace_contours(&img);

        assert_eq!(contours.len(), 2);
        assert!(!contours[0].hole);
        assert!(contours[1].hole);
        assert_eq!(contours[0].points[0], Point2i::new(1, 1));
    }

    #[test]
    fn test_filled_rectangle_border() {
        let (w, h) = (8usize, 6usize);
        let mut data = vec![0u8; w * h];
        for y in 1..5 {
            for x in 2..7 {
                data[y * w + x] = 255;
            }
        }
        let img = ImageBuffer {
            data: &data,
            width: w as u32,
            height: h as u32,
        };

        let contours = trace_contours(&img);
        assert_eq!(contours.len(), 1);

        let border = &contours[0].points;
        // 5x4 block: 2 * (5 + 4) - 4 border pixels
        assert_eq!(border.len(), 14);
        for corner in [(2, 1), (6, 1), (6, 4), (2, 4)] {
            assert!(border.contains(&Point2i::new(corner.0, corner.1)));
        }
    }

    #[test]
    fn test_isolated_pixel() {
        let mut data = vec![0u8; 9];
        data[4] = 1;
        let img = ImageBuffer {
            data: &data,
            width: 3,
            height: 3,
        };

        let contours = trace_contours(&img);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, vec![Point2i::new(1, 1)]);
    }

    #[test]
    fn test_blank_image_has_no_contours() {
        let data = vec![0u8; 16];
        let img = ImageBuffer {
            data: &data,
            width: 4,
            height: 4,
        };
        assert!(trace_contours(&img).is_empty());
    }
}
