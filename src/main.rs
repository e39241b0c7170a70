use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cube_detect::core::detector::{Analysis, CubeDetector};
use cube_detect::core::params::ExtractorParams;
use cube_detect::report::AnalysisReport;
use cube_detect::simd::dispatch::Cv;
use cube_detect::{ColorBuffer, Point2i};
use image::{Rgb, RgbImage};
use log::info;

const OUTLINE: Rgb<u8> = Rgb([0, 255, 0]);
const FACE: Rgb<u8> = Rgb([255, 0, 0]);

#[derive(Parser, Debug)]
#[command(name = "cube-detect")]
#[command(about = "Find quadrilaterals in images and report whether three of them form a cube")]
struct Cli {
    /// Images to analyze, in order
    #[arg(required = true)]
    images: Vec<PathBuf>,
    /// JSON file with extractor parameters; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Upper Canny threshold
    #[arg(long)]
    canny_high: Option<f64>,
    /// Passes per color channel
    #[arg(long)]
    levels: Option<usize>,
    /// Write `<name>.annotated.png` with candidate outlines into this directory
    #[arg(long)]
    annotate_dir: Option<PathBuf>,
    /// Write a JSON report for all images to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = load_params(&cli)?;
    let detector = CubeDetector::new(Cv, params).context("configuring detector")?;

    if let Some(dir) = &cli.annotate_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    let mut reports = Vec::new();
    for path in &cli.images {
        let img = match image::open(path) {
            Ok(img) => img.to_rgb8(),
            Err(err) => {
                println!("Couldn't load {}", path.display());
                info!("{}: {err}", path.display());
                continue;
            }
        };

        let buffer = ColorBuffer {
            data: img.as_raw(),
            width: img.width(),
            height: img.height(),
            channels: 3,
        };
        let analysis = detector
            .analyze(&buffer)
            .with_context(|| format!("analyzing {}", path.display()))?;

        println!(
            "{}: {} quadrilaterals",
            path.display(),
            analysis.candidates.len()
        );
        if analysis.verdict.is_cube() {
            println!("Cube detected in image: {}", path.display());
        }

        if let Some(dir) = &cli.annotate_dir {
            save_annotated(dir, path, img, &analysis)?;
        }
        reports.push(AnalysisReport::new(path.display().to_string(), &analysis));
    }

    if let Some(json) = &cli.json {
        let bytes = serde_json::to_vec_pretty(&reports).context("serializing json")?;
        fs::write(json, bytes).with_context(|| format!("writing json {}", json.display()))?;
    }

    Ok(())
}

fn load_params(cli: &Cli) -> Result<ExtractorParams> {
    let mut params = match &cli.config {
        Some(path) => {
            let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&data)
                .with_context(|| format!("parsing json {}", path.display()))?
        }
        None => ExtractorParams::default(),
    };

    if let Some(high) = cli.canny_high {
        params.canny_high = high;
    }
    if let Some(levels) = cli.levels {
        params.levels = levels;
    }
    Ok(params)
}

fn save_annotated(dir: &Path, source: &Path, mut img: RgbImage, analysis: &Analysis) -> Result<()> {
    for quad in &analysis.candidates {
        // skip outlines hugging the top-left corner, they are usually the image frame
        let first = quad.corners[0];
        if first.x > 3 && first.y > 3 {
            draw_polygon(&mut img, &quad.corners, OUTLINE);
        }
    }
    if let Some(faces) = analysis.verdict.face_quads(&analysis.candidates) {
        for quad in &faces {
            draw_polygon(&mut img, &quad.corners, FACE);
        }
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let out = dir.join(format!("{stem}.annotated.png"));
    img.save(&out)
        .with_context(|| format!("saving image {}", out.display()))
}

fn draw_polygon(img: &mut RgbImage, corners: &[Point2i], color: Rgb<u8>) {
    for (i, &a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        draw_line(img, a, b, color);
    }
}

/// Bresenham line with a 3x3 brush.
fn draw_line(img: &mut RgbImage, a: Point2i, b: Point2i, color: Rgb<u8>) {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let (mut x, mut y) = (a.x, a.y);
    let mut err = dx + dy;

    loop {
        draw_dot(img, x, y, color);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_dot(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if ux >= img.width() || uy >= img.height() {
                continue;
            }
            img.put_pixel(ux, uy, color);
        }
    }
}
