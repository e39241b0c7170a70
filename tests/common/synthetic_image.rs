/// Generates an interleaved RGB image made of full-height vertical bands.
///
/// Each band is `(x_start, x_end, value)` with `x_end` exclusive; pixels
/// outside every band keep `background`. All three channels carry the same
/// value so every channel pass sees the same plane.
pub fn vertical_bands_rgb(
    width: usize,
    height: usize,
    background: u8,
    bands: &[(usize, usize, u8)],
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![background; width * height * 3];
    for y in 0..height {
        for &(start, end, val) in bands {
            for x in start..end.min(width) {
                let idx = (y * width + x) * 3;
                img[idx..idx + 3].fill(val);
            }
        }
    }
    img
}

/// Three adjacent bands of decreasing brightness.
///
/// The threshold sweep sees nested rectangles that all share the left image
/// edge, so any two of them meet in exactly two corners.
pub fn stepped_panels_rgb(width: usize, height: usize) -> Vec<u8> {
    let third = width / 3;
    vertical_bands_rgb(
        width,
        height,
        0,
        &[
            (0, third, 255),
            (third, 2 * third, 170),
            (2 * third, width, 120),
        ],
    )
}

/// Top, left and right faces of a cube seen corner-on, meeting at `(120, 120)`
/// in a 240x240 frame.
pub const CUBE_FACES: [[(i32, i32); 4]; 3] = [
    [(120, 120), (190, 80), (120, 40), (50, 80)],
    [(120, 120), (50, 80), (50, 160), (120, 200)],
    [(120, 120), (120, 200), (190, 160), (190, 80)],
];

/// Renders [`CUBE_FACES`] filled with `shades` (top, left, right) on a black
/// 240x240 RGB background.
pub fn rendered_cube_rgb(shades: [u8; 3]) -> Vec<u8> {
    let (width, height) = (240usize, 240usize);
    let mut img = vec![0u8; width * height * 3];
    for (face, &shade) in CUBE_FACES.iter().zip(&shades) {
        for y in 0..height {
            for x in 0..width {
                if covers(face, x as f64 + 0.5, y as f64 + 0.5) {
                    let idx = (y * width + x) * 3;
                    img[idx..idx + 3].fill(shade);
                }
            }
        }
    }
    img
}

/// Pixel centre inside (or on the border of) a convex polygon of either winding.
fn covers(poly: &[(i32, i32); 4], x: f64, y: f64) -> bool {
    let mut side = 0.0f64;
    for i in 0..poly.len() {
        let (ax, ay) = (poly[i].0 as f64, poly[i].1 as f64);
        let (bx, by) = (poly[(i + 1) % 4].0 as f64, poly[(i + 1) % 4].1 as f64);
        let cross = (bx - ax) * (y - ay) - (by - ay) * (x - ax);
        if cross != 0.0 {
            if side == 0.0 {
                side = cross.signum();
            } else if cross.signum() != side {
                return false;
            }
        }
    }
    true
}
