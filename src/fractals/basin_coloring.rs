//! Maps the terminal value of a Newton sequence onto the color of the root it
//! converged to, with brightness encoding how quickly it got there.

use num::complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{
    color::HslColor,
    interpolation::{AffineMap, InterpolationKeyframe},
};

/// Relative tolerance used when matching a terminal value against a root.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Absolute tolerance used when matching a terminal value against a root.
pub const ACCEPTABLE_ZERO: f64 = 1e-3;

/// Luminance assigned to a point that converges within a single iteration.
pub const MAX_LUMINANCE: f64 = 0.5;

/**
 * Relative and absolute tolerance for deciding whether a terminal value
 * belongs to a root: `|a - b| <= max(relative * max(|a|, |b|), absolute)`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MatchTolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for MatchTolerance {
    fn default() -> Self {
        MatchTolerance {
            relative: RELATIVE_TOLERANCE,
            absolute: ACCEPTABLE_ZERO,
        }
    }
}

impl MatchTolerance {
    pub fn is_close(&self, a: Complex64, b: Complex64) -> bool {
        if a == b {
            return true;
        }
        let distance = (a - b).norm();
        let bound = (self.relative * a.norm().max(b.norm())).max(self.absolute);
        distance <= bound
    }
}

/// What to do with a pixel whose terminal value is not close to any root.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassificationFailurePolicy {
    /// Propagate the `ClassificationError`, aborting the frame.
    Abort,
    /// Use the palette's "no match" color for the pixel.
    #[default]
    NoMatchColor,
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("terminal value {terminal} is not close to any root; nearest is {nearest} at distance {distance:e}")]
pub struct ClassificationError {
    pub terminal: Complex64,
    pub nearest: Complex64,
    pub distance: f64,
}

/**
 * Ordered list of (root, color) pairs for a single frame, plus a color for
 * points that do not match any root. Roots are compared by exact equality
 * first, so it should be built from the same values passed to the iteration.
 */
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<(Complex64, HslColor)>,
    no_match: HslColor,
}

impl Palette {
    pub fn new(entries: Vec<(Complex64, HslColor)>, no_match: HslColor) -> Palette {
        assert!(!entries.is_empty(), "palette must contain at least one root");
        Palette { entries, no_match }
    }

    pub fn entries(&self) -> &[(Complex64, HslColor)] {
        &self.entries
    }

    pub fn no_match(&self) -> HslColor {
        self.no_match
    }

    /**
     * Index of the entry whose key is closest to `z`. An exact key match
     * short-circuits the search; otherwise the lowest index wins on ties.
     * If every distance is NaN the first entry is returned, which will then
     * fail the tolerance check.
     */
    pub fn nearest(&self, z: Complex64) -> (usize, f64) {
        if let Some(index) = self.entries.iter().position(|(key, _)| *key == z) {
            return (index, 0.0);
        }
        let mut best = (0, (self.entries[0].0 - z).norm());
        for (index, (key, _)) in self.entries.iter().enumerate().skip(1) {
            let distance = (key - z).norm();
            if distance < best.1 {
                best = (index, distance);
            }
        }
        best
    }
}

/**
 * Maps the iteration count onto a luminance: the line passes through
 * (max_iterations, 0) and (1, MAX_LUMINANCE), and is clamped onto
 * [0, MAX_LUMINANCE]. Fast convergence is bright; slow convergence
 * fades to black.
 */
#[derive(Debug, Clone, Copy)]
pub struct LuminanceMap {
    map: AffineMap<f64>,
}

impl LuminanceMap {
    pub fn new(max_iterations: u32) -> LuminanceMap {
        assert!(max_iterations > 1, "luminance map needs at least two iterations");
        LuminanceMap {
            map: AffineMap::through(
                InterpolationKeyframe {
                    input: max_iterations as f64,
                    output: 0.0,
                },
                InterpolationKeyframe {
                    input: 1.0,
                    output: MAX_LUMINANCE,
                },
            ),
        }
    }

    pub fn luminance(&self, iterations_used: u32) -> f64 {
        self.map
            .evaluate(iterations_used as f64)
            .clamp(0.0, MAX_LUMINANCE)
    }
}

/// Everything besides the palette that the classifier needs; fixed for a whole animation.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    pub tolerance: MatchTolerance,
    pub luminance_map: LuminanceMap,
    pub failure_policy: ClassificationFailurePolicy,
}

impl Classifier {
    pub fn new(
        max_iterations: u32,
        tolerance: MatchTolerance,
        failure_policy: ClassificationFailurePolicy,
    ) -> Classifier {
        Classifier {
            tolerance,
            luminance_map: LuminanceMap::new(max_iterations),
            failure_policy,
        }
    }

    /**
     * Colors a single terminal value:
     * 1. find the palette root nearest to `terminal` (exact key first),
     * 2. require that root to be within tolerance, or fail,
     * 3. set the root color's luminance from `iterations_used`,
     * 4. return the normalized RGB triple.
     */
    pub fn classify(
        &self,
        palette: &Palette,
        terminal: Complex64,
        iterations_used: u32,
    ) -> Result<[f64; 3], ClassificationError> {
        let (index, distance) = palette.nearest(terminal);
        let (key, color) = palette.entries[index];
        if !self.tolerance.is_close(terminal, key) {
            return Err(ClassificationError {
                terminal,
                nearest: key,
                distance,
            });
        }
        Ok(color
            .with_luminance(self.luminance_map.luminance(iterations_used))
            .to_rgb())
    }

    /**
     * Same as `classify`, but applies the failure policy to mismatches.
     * Under `NoMatchColor` a mismatch yields the palette's "no match" color,
     * flagged with `matched: false` so that callers can count fallbacks.
     */
    pub fn classify_or_fallback(
        &self,
        palette: &Palette,
        terminal: Complex64,
        iterations_used: u32,
    ) -> Result<PixelColor, ClassificationError> {
        match self.classify(palette, terminal, iterations_used) {
            Ok(rgb) => Ok(PixelColor { rgb, matched: true }),
            Err(err) => match self.failure_policy {
                ClassificationFailurePolicy::Abort => Err(err),
                ClassificationFailurePolicy::NoMatchColor => {
                    log::debug!("{}", err);
                    Ok(PixelColor {
                        rgb: palette.no_match.to_rgb(),
                        matched: false,
                    })
                }
            },
        }
    }
}

/// Color chosen for a single pixel, and whether it came from a matching root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelColor {
    pub rgb: [f64; 3],
    pub matched: bool,
}
