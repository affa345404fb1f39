use serde::{Deserialize, Serialize};

use crate::Float;

/**
 * Parameters of the linear shape fit.
 *
 * All optional fields fall back to the defaults of Aldrian & Smith,
 * Inverse Rendering of Faces with a 3D Morphable Model, PAMI 2013:
 * fit all coefficients, detector standard deviation sqrt(3) pixels,
 * model standard deviation 0.
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittingConfig {
    /// Weight of the prior towards the mean. Scaled internally by the
    /// number of images.
    pub lambda: Float,
    /// How many shape coefficients to fit. None fits all of them.
    pub num_coefficients_to_fit: Option<usize>,
    /// Standard deviation of the 2D landmarks, in pixels.
    pub detector_standard_deviation: Option<Float>,
    /// Standard deviation of the model points projected to 2D, in pixels.
    pub model_standard_deviation: Option<Float>,
}

impl Default for FittingConfig {
    fn default() -> FittingConfig {
        FittingConfig {
            lambda: 3.0,
            num_coefficients_to_fit: None,
            detector_standard_deviation: None,
            model_standard_deviation: None,
        }
    }
}

impl FittingConfig {
    pub fn get_detector_standard_deviation(&self) -> Float {
        self.detector_standard_deviation.unwrap_or((3.0 as Float).sqrt())
    }

    pub fn get_model_standard_deviation(&self) -> Float {
        self.model_standard_deviation.unwrap_or(0.0)
    }

    pub fn get_sigma_squared(&self) -> Float {
        self.get_detector_standard_deviation().powi(2)
            + self.get_model_standard_deviation().powi(2)
    }
}
