use iter_num_tools::lin_space;
use num::complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::{color::HslColor, errors::ParamsError, image_utils::NormalizedGrid};

use super::basin_coloring::Palette;

/**
 * Family of rational functions whose roots rotate about the origin as the
 * animation angle advances:
 *
 *  - `2N` poles, fixed on the unit circle at `exp(i k π / N)`.
 *  - `N` roots on a circle of radius `1 + a sin(θ)`, rotating with `+θ`.
 *  - `N` roots on a circle of radius `1 + a cos(θ)`, rotating with `-θ`.
 *
 * where `N = symmetry_order`, `a = amplitude_modulation` and the roots are
 * spread by `root_angle_multiplier * k π / N`.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RotatingRootsParams {
    pub symmetry_order: u32,
    pub root_angle_multiplier: f64,
    pub amplitude_modulation: f64,
    pub root_colors_rgb: Vec<[u8; 3]>, // one per root, `2 * symmetry_order` in total
    pub no_match_color_rgb: [u8; 3],
}

impl RotatingRootsParams {
    pub fn root_count(&self) -> usize {
        2 * self.symmetry_order as usize
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.symmetry_order == 0 {
            return Err(ParamsError::ZeroSymmetryOrder);
        }
        if self.root_colors_rgb.len() != self.root_count() {
            return Err(ParamsError::RootColorCount {
                expected: self.root_count(),
                found: self.root_colors_rgb.len(),
            });
        }
        Ok(())
    }

    /// Roots and poles in the plane, before mapping onto the grid.
    pub fn roots_and_poles(&self, angle: f64) -> (Vec<Complex64>, Vec<Complex64>) {
        let n = self.symmetry_order as f64;
        let amp_forward = 1.0 + self.amplitude_modulation * angle.sin();
        let amp_reverse = 1.0 + self.amplitude_modulation * angle.cos();
        let spread = |k: u32| self.root_angle_multiplier * (k as f64) * PI / n;

        let poles = (0..2 * self.symmetry_order)
            .map(|k| Complex64::from_polar(1.0, (k as f64) * PI / n))
            .collect();

        let forward = (0..self.symmetry_order)
            .map(|k| Complex64::from_polar(amp_forward, spread(k) + angle));
        let reverse = (0..self.symmetry_order)
            .map(|k| Complex64::from_polar(amp_reverse, spread(k) - angle));
        let roots = forward.chain(reverse).collect();

        (roots, poles)
    }

    /// Builds the immutable root set, pole set and palette for one frame.
    pub fn frame_configuration(&self, angle: f64, grid: &NormalizedGrid) -> FrameConfiguration {
        let (roots, poles) = self.roots_and_poles(angle);
        let roots: Vec<Complex64> = roots.into_iter().map(|z| grid.to_normalized(z)).collect();
        let poles: Vec<Complex64> = poles.into_iter().map(|z| grid.to_normalized(z)).collect();

        let palette = Palette::new(
            roots
                .iter()
                .zip(&self.root_colors_rgb)
                .map(|(root, rgb)| (*root, HslColor::from_rgb_u8(*rgb)))
                .collect(),
            HslColor::from_rgb_u8(self.no_match_color_rgb),
        );

        FrameConfiguration {
            angle,
            roots,
            poles,
            palette,
        }
    }
}

/// Everything the per-pixel computation needs for a single frame. Read-only once built.
#[derive(Debug, Clone)]
pub struct FrameConfiguration {
    pub angle: f64,
    pub roots: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub palette: Palette,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum AngleSpecification {
    Snapshot(f64),
    /// `count` frames evenly spaced on `[low, upp)`; the endpoint is dropped so
    /// that a full turn does not render the first frame twice.
    Series { low: f64, upp: f64, count: u32 },
}

impl AngleSpecification {
    pub fn validate(&self) -> Result<(), ParamsError> {
        match self {
            AngleSpecification::Series { count: 0, .. } => Err(ParamsError::EmptyAngleSeries),
            _ => Ok(()),
        }
    }

    pub fn angles(&self) -> Vec<f64> {
        match *self {
            AngleSpecification::Snapshot(angle) => vec![angle],
            AngleSpecification::Series { low, upp, count } => {
                lin_space(low..=upp, count as usize + 1)
                    .take(count as usize)
                    .collect()
            }
        }
    }
}
