#![cfg(feature = "web")]
use crate::chart::ChartSpec;
use crate::error::{DashboardError, Result};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::prelude::*;

/// Raster options for the chart PNG endpoint
#[derive(Clone, Debug)]
pub struct PngOptions {
    /// Width of the image in pixels
    pub width: u32,

    /// Height of the image in pixels
    pub height: u32,

    /// Blank space kept around the plotting area, in pixels
    pub margin: u32,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
            margin: 10,
        }
    }
}

/// Rasterise a chart spec as PNG
///
/// Only the series and a frame are drawn; the page shows the title, tick
/// labels and hover values from the spec itself, so no font backend is
/// needed. Dates map to day offsets from the first point. An empty spec
/// renders a blank frame.
///
/// # Arguments
/// * `spec` - Chart to draw
/// * `options` - Image size and margin
///
/// # Returns
/// * `Result<Vec<u8>>` - PNG bytes
///
/// # Errors
/// * `Render` if the size is zero, the colour is not `#RRGGBB` or drawing fails
pub fn render_png(spec: &ChartSpec, options: &PngOptions) -> Result<Vec<u8>> {
    if options.width == 0 || options.height == 0 {
        return Err(DashboardError::Render("image dimensions must be non-zero".to_string()));
    }
    let color = parse_hex_color(&spec.color)?;

    let mut buffer = vec![0u8; options.width as usize * options.height as usize * 3];
    draw_spec(spec, color, &mut buffer, options).map_err(|e| DashboardError::Render(e.to_string()))?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&buffer, options.width, options.height, ColorType::Rgb8)
        .map_err(|e| DashboardError::Render(e.to_string()))?;
    Ok(png)
}

fn draw_spec(
    spec: &ChartSpec,
    color: RGBColor,
    buffer: &mut [u8],
    options: &PngOptions,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::with_buffer(buffer, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;
    root.draw(&Rectangle::new(
        [(0, 0), (options.width as i32 - 1, options.height as i32 - 1)],
        BLACK.mix(0.3).stroke_width(1),
    ))?;

    if let (Some(first), Some((y_min, y_max))) = (spec.points.first(), spec.y_bounds()) {
        let origin = first.x;
        let x_max = spec
            .points
            .iter()
            .map(|p| (p.x - origin).num_days() as f64)
            .fold(1.0, f64::max);

        // flat series still get a visible band
        let pad = if y_max > y_min { (y_max - y_min) * 0.05 } else { y_min.abs().max(1.0) * 0.05 };

        let mut chart = ChartBuilder::on(&root)
            .margin(options.margin)
            .build_cartesian_2d(0.0..x_max, (y_min - pad)..(y_max + pad))?;

        chart.draw_series(LineSeries::new(
            spec.points.iter().map(|p| ((p.x - origin).num_days() as f64, p.y)),
            color.stroke_width(2),
        ))?;
    }

    root.present()?;
    Ok(())
}

fn parse_hex_color(raw: &str) -> Result<RGBColor> {
    let invalid = || DashboardError::Render(format!("invalid colour '{}'", raw));
    let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
