use num_traits::Float;

/// Keyframe used to define an affine map: maps an input (query) to an output value.
#[derive(Clone, Copy, Debug)]
pub struct InterpolationKeyframe<T> {
    pub input: T,
    pub output: T,
}

/**
 * Affine map defined by the line passing through two keyframes. Queries
 * outside of the keyframe inputs are extrapolated along the same line;
 * callers are responsible for any clamping.
 */
#[derive(Clone, Copy, Debug)]
pub struct AffineMap<T: Float> {
    offset: T,
    slope: T,
}

impl<T: Float> AffineMap<T> {
    pub fn through(a: InterpolationKeyframe<T>, b: InterpolationKeyframe<T>) -> Self {
        assert!(a.input != b.input, "keyframe inputs must be distinct");
        let slope = (b.output - a.output) / (b.input - a.input);
        Self {
            offset: a.output - slope * a.input,
            slope,
        }
    }

    pub fn evaluate(&self, query: T) -> T {
        self.offset + self.slope * query
    }
}
