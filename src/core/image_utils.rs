use num::complex::Complex64;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::errors::ParamsError;

/**
 * Describes the base grid shared by every frame of an animation. The plane
 * region `[x_limits] x [y_limits]` is shifted so that its lower-left corner
 * sits at the origin and scaled so that its longer side has unit length.
 * All points of the rendered function (roots and poles) are mapped through
 * the same transform, see `to_normalized`.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NormalizedGrid {
    pub resolution: nalgebra::Vector2<u32>,
    pub x_limits: [f64; 2],
    pub y_limits: [f64; 2],
}

impl NormalizedGrid {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.resolution[0] == 0 || self.resolution[1] == 0 {
            return Err(ParamsError::EmptyResolution(
                self.resolution[0],
                self.resolution[1],
            ));
        }
        let scale = self.scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ParamsError::DegenerateLimits {
                x: self.x_limits,
                y: self.y_limits,
            });
        }
        Ok(())
    }

    fn deltas(&self) -> (f64, f64) {
        (
            (self.x_limits[1] - self.x_limits[0]).abs(),
            (self.y_limits[1] - self.y_limits[0]).abs(),
        )
    }

    /// Factor that maps the longer side of the plane region onto [0, 1].
    pub fn scale(&self) -> f64 {
        let (dx, dy) = self.deltas();
        1.0 / dx.max(dy)
    }

    /// Size of the grid in normalized coordinates; the longer side is exactly one.
    pub fn extent(&self) -> (f64, f64) {
        let (dx, dy) = self.deltas();
        let scale = self.scale();
        (dx * scale, dy * scale)
    }

    pub fn lower_left_corner(&self) -> Complex64 {
        Complex64::new(self.x_limits[0], self.y_limits[0])
    }

    /// Maps a point from the plane region into grid coordinates.
    pub fn to_normalized(&self, z: Complex64) -> Complex64 {
        (z - self.lower_left_corner()).scale(self.scale())
    }

    /**
     * Sample coordinates for every pixel, in row-major order: the outer loop is
     * over `y` (rows) and the inner loop over `x` (columns). Row zero is `y = 0`.
     */
    pub fn points(&self) -> Vec<Complex64> {
        let (x_max, y_max) = self.extent();
        let width = LinearPixelMap::new(self.resolution[0], 0.0, x_max);
        let height = LinearPixelMap::new(self.resolution[1], 0.0, y_max);
        let mut points =
            Vec::with_capacity((self.resolution[0] as usize) * (self.resolution[1] as usize));
        for j in 0..self.resolution[1] {
            let y = height.map(j);
            for i in 0..self.resolution[0] {
                points.push(Complex64::new(width.map(i), y));
            }
        }
        points
    }
}

#[derive(Clone, Debug)]
/**
 * Used to map from image space into the "regular" domain used to generate the fractals.
 */
pub struct LinearPixelMap {
    offset: f64,
    slope: f64,
}

impl LinearPixelMap {
    /**
     * @param n: number of pixels spanned by [x0,x1]
     * @param x0: output of the map at 0
     * @param x1: output of the map at n-1 (ignored when n == 1)
     */
    pub fn new(n: u32, x0: f64, x1: f64) -> LinearPixelMap {
        assert!(n > 0);
        let offset = x0;
        let slope = if n > 1 {
            (x1 - x0) / ((n - 1) as f64)
        } else {
            0.0
        };
        LinearPixelMap { offset, slope }
    }

    // Map from pixel (integer) to point (float)
    pub fn map(&self, index: u32) -> f64 {
        self.offset + self.slope * (index as f64)
    }
}

/**
 * Evaluates `pixel_renderer` at every point, in parallel, and assembles the
 * results into an image with `width` columns. The `points` must be in
 * row-major order, as produced by `NormalizedGrid::points`. The first error
 * reported by the renderer aborts the whole image.
 */
pub fn generate_color_image<F, E>(
    width: u32,
    height: u32,
    points: &[Complex64],
    pixel_renderer: F,
) -> Result<image::RgbImage, E>
where
    F: Fn(&Complex64) -> Result<image::Rgb<u8>, E> + std::marker::Sync,
    E: Send,
{
    assert_eq!(
        points.len(),
        (width as usize) * (height as usize),
        "Point count does not match image dimensions"
    );
    let colors: Vec<image::Rgb<u8>> = points
        .par_iter()
        .map(&pixel_renderer)
        .collect::<Result<Vec<_>, E>>()?;

    let mut image = image::RgbImage::new(width, height);
    for (pixel, color) in image.pixels_mut().zip(colors) {
        *pixel = color;
    }
    Ok(image)
}

pub fn write_image_to_file_or_panic<F, T, E>(filename: std::path::PathBuf, save_lambda: F)
where
    F: FnOnce(&PathBuf) -> Result<T, E>,
{
    save_lambda(&filename)
        .unwrap_or_else(|_| panic!("ERROR:  Unable to write image file: {}", filename.display()));
    log::info!("Wrote image file to: {}", filename.display());
}
