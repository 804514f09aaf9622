// Renders animations of the basins of attraction of Newton's method, applied
// to a rational function whose roots rotate as the animation advances.

use std::sync::atomic::{AtomicUsize, Ordering};

use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::{
    color::rgb_to_pixel,
    errors::ParamsError,
    file_io::{serialize_to_json_or_panic, FilePrefix},
    image_utils::{generate_color_image, write_image_to_file_or_panic, NormalizedGrid},
    stopwatch::Stopwatch,
};

use super::{
    basin_coloring::{ClassificationError, ClassificationFailurePolicy, Classifier, MatchTolerance},
    newtons_method_core::{iterate, CRITICAL_DISTANCE, MAX_ITERATIONS},
    rotating_roots::{AngleSpecification, FrameConfiguration, RotatingRootsParams},
};

fn default_max_iterations() -> u32 {
    MAX_ITERATIONS
}

fn default_critical_distance() -> f64 {
    CRITICAL_DISTANCE
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewtonsMethodParams {
    pub grid: NormalizedGrid,
    pub angles: AngleSpecification,
    pub configuration: RotatingRootsParams,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_critical_distance")]
    pub critical_distance: f64,
    #[serde(default)]
    pub tolerance: MatchTolerance,
    #[serde(default)]
    pub failure_policy: ClassificationFailurePolicy,
}

impl NewtonsMethodParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.grid.validate()?;
        self.angles.validate()?;
        self.configuration.validate()?;
        if self.max_iterations < 2 {
            return Err(ParamsError::IterationLimit(self.max_iterations));
        }
        if !(self.critical_distance.is_finite() && self.critical_distance > 0.0) {
            return Err(ParamsError::CriticalDistance(self.critical_distance));
        }
        let MatchTolerance { relative, absolute } = self.tolerance;
        if !(relative.is_finite() && relative >= 0.0 && absolute.is_finite() && absolute >= 0.0) {
            return Err(ParamsError::MatchTolerance { relative, absolute });
        }
        Ok(())
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.max_iterations, self.tolerance, self.failure_policy)
    }
}

/// A rendered frame, along with the number of pixels that fell back to the "no match" color.
pub struct RenderedFrame {
    pub image: image::RgbImage,
    pub fallback_count: usize,
}

/**
 * Runs the iteration and classification for every point of the base grid,
 * in parallel. Only fails if the failure policy is `Abort` and some pixel
 * cannot be matched to a root.
 */
pub fn render_frame_on_points(
    params: &NewtonsMethodParams,
    classifier: &Classifier,
    frame: &FrameConfiguration,
    points: &[Complex64],
) -> Result<RenderedFrame, ClassificationError> {
    let fallback_count = AtomicUsize::new(0);
    let image = generate_color_image(
        params.grid.resolution[0],
        params.grid.resolution[1],
        points,
        |z: &Complex64| -> Result<image::Rgb<u8>, ClassificationError> {
            let result = iterate(
                params.max_iterations,
                *z,
                &frame.roots,
                &frame.poles,
                params.critical_distance,
            );
            let color = classifier.classify_or_fallback(
                &frame.palette,
                result.terminal,
                result.iterations_used,
            )?;
            if !color.matched {
                fallback_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(rgb_to_pixel(color.rgb))
        },
    )?;
    Ok(RenderedFrame {
        image,
        fallback_count: fallback_count.into_inner(),
    })
}

/// Renders a single frame at `angle`.
pub fn render_frame(
    params: &NewtonsMethodParams,
    angle: f64,
) -> Result<RenderedFrame, Box<dyn std::error::Error>> {
    params.validate()?;
    let frame = params.configuration.frame_configuration(angle, &params.grid);
    let rendered =
        render_frame_on_points(params, &params.classifier(), &frame, &params.grid.points())?;
    Ok(rendered)
}

/// Renders every frame of the angle schedule into `<file_base>-<index>.png`.
pub fn render_newtons_method(
    params: &NewtonsMethodParams,
    file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    params.validate()?;
    let mut stopwatch = Stopwatch::new("Newton's method stopwatch".to_owned());

    serialize_to_json_or_panic(file_prefix.with_suffix(".json"), params);

    let points = params.grid.points();
    let classifier = params.classifier();
    let angles = params.angles.angles();
    stopwatch.record_split("setup".to_owned());

    for (index, angle) in angles.iter().enumerate() {
        log::info!(
            "Computing frame {}/{}, angle={:04.1}°",
            index + 1,
            angles.len(),
            angle.to_degrees()
        );
        let frame = params.configuration.frame_configuration(*angle, &params.grid);
        let rendered = render_frame_on_points(params, &classifier, &frame, &points)?;
        if rendered.fallback_count > 0 {
            log::warn!(
                "{} of {} pixels did not match any root in frame {}",
                rendered.fallback_count,
                points.len(),
                index
            );
        }
        let duration = stopwatch.record_split(format!("frame {:06}", index));
        log::debug!("Frame {} rendered in {:?}", index, duration);

        write_image_to_file_or_panic(file_prefix.frame_file_name(index), |f| {
            rendered.image.save(f)
        });
    }

    stopwatch.record_split("render".to_owned());
    stopwatch.log_summary();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractals::basin_coloring::RELATIVE_TOLERANCE;
    use std::f64::consts::PI;

    fn tiny_params(failure_policy: ClassificationFailurePolicy) -> NewtonsMethodParams {
        NewtonsMethodParams {
            grid: NormalizedGrid {
                resolution: nalgebra::Vector2::new(24, 16),
                x_limits: [-2.4, 2.4],
                y_limits: [-1.6, 1.6],
            },
            angles: AngleSpecification::Series {
                low: 0.0,
                upp: 2.0 * PI,
                count: 3,
            },
            configuration: RotatingRootsParams {
                symmetry_order: 2,
                root_angle_multiplier: 1.0,
                amplitude_modulation: 0.5,
                root_colors_rgb: vec![[139, 0, 0], [65, 105, 225], [255, 99, 71], [64, 224, 208]],
                no_match_color_rgb: [0, 0, 0],
            },
            max_iterations: MAX_ITERATIONS,
            critical_distance: CRITICAL_DISTANCE,
            tolerance: MatchTolerance::default(),
            failure_policy,
        }
    }

    #[test]
    fn test_render_frame_dimensions() {
        let params = tiny_params(ClassificationFailurePolicy::NoMatchColor);
        let rendered = render_frame(&params, 0.4).unwrap();
        assert_eq!(rendered.image.dimensions(), (24, 16));
    }

    #[test]
    fn test_render_frame_is_deterministic() {
        let params = tiny_params(ClassificationFailurePolicy::NoMatchColor);
        let first = render_frame(&params, 1.1).unwrap();
        let second = render_frame(&params, 1.1).unwrap();
        assert_eq!(first.image, second.image);
        assert_eq!(first.fallback_count, second.fallback_count);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let mut params = tiny_params(ClassificationFailurePolicy::NoMatchColor);
        params.max_iterations = 1;
        assert!(render_frame(&params, 0.0).is_err());
        assert_eq!(params.validate(), Err(ParamsError::IterationLimit(1)));
    }

    #[test]
    fn test_unmatched_pixels_fall_back_to_no_match_color() {
        let params = tiny_params(ClassificationFailurePolicy::NoMatchColor);
        let rendered = render_frame(&params, 0.4).unwrap();
        assert!(rendered.fallback_count > 0);
        assert!(rendered.fallback_count < 24 * 16);
        assert!(rendered
            .image
            .pixels()
            .any(|pixel| *pixel == image::Rgb([0, 0, 0])));
    }

    #[test]
    fn test_abort_policy_fails_the_frame() {
        let params = tiny_params(ClassificationFailurePolicy::Abort);
        let err = render_frame(&params, 0.4).err().unwrap();
        assert!(err.to_string().contains("not close to any root"));
    }

    #[test]
    fn test_bad_tolerances_are_rejected() {
        let mut params = tiny_params(ClassificationFailurePolicy::NoMatchColor);
        params.critical_distance = f64::NAN;
        assert!(matches!(
            params.validate(),
            Err(ParamsError::CriticalDistance(d)) if d.is_nan()
        ));
        params.critical_distance = 0.0;
        assert_eq!(params.validate(), Err(ParamsError::CriticalDistance(0.0)));
        params.critical_distance = CRITICAL_DISTANCE;
        assert!(params.validate().is_ok());

        params.tolerance.absolute = -1e-3;
        assert_eq!(
            params.validate(),
            Err(ParamsError::MatchTolerance {
                relative: RELATIVE_TOLERANCE,
                absolute: -1e-3
            })
        );
        params.tolerance.absolute = 0.0;
        params.tolerance.relative = f64::INFINITY;
        assert!(render_frame(&params, 0.0).is_err());
    }

    #[test]
    fn test_params_defaults_from_json() {
        let json = r#"{
            "grid": { "resolution": [4, 4], "x_limits": [-2.0, 2.0], "y_limits": [-2.0, 2.0] },
            "angles": { "Snapshot": 0.0 },
            "configuration": {
                "symmetry_order": 1,
                "root_angle_multiplier": 12.0,
                "amplitude_modulation": 0.5,
                "root_colors_rgb": [[255, 0, 0], [0, 0, 255]],
                "no_match_color_rgb": [0, 0, 0]
            }
        }"#;
        let params: NewtonsMethodParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.max_iterations, MAX_ITERATIONS);
        assert_eq!(params.critical_distance, CRITICAL_DISTANCE);
        assert_eq!(params.tolerance, MatchTolerance::default());
        assert_eq!(params.failure_policy, ClassificationFailurePolicy::NoMatchColor);
        assert!(params.validate().is_ok());
    }
}
