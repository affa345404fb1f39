use crate::error::{FittingError, Result};
use crate::fitting::correspondence::{resolve_correspondences, Correspondence};
use crate::fitting::fitting_config::FittingConfig;
use crate::fitting::solver::FittingResult;
use crate::morphable::ShapePcaModel;

pub mod assembly;
pub mod correspondence;
pub mod fitting_config;
pub mod solver;

/**
 * Fits the shape coefficients of a PCA shape model to 2D landmarks of one
 * or more images jointly, as proposed in Aldrian & Smith, Inverse Rendering
 * of Faces with a 3D Morphable Model, PAMI 2013. A linear, closed-form
 * solution with regularization towards the mean.
 *
 * Each image contributes an affine camera and a list of landmark to vertex
 * correspondences; all images refer to the same model. Fusing several
 * images (e.g. frames of one identity) tightens the estimate.
 *
 * Structural inconsistencies in the inputs are reported before any matrix
 * is built. A degenerate system (too few landmarks for the requested
 * coefficient count, near-collinear points) is not an error; see
 * FittingResult for how it surfaces.
 *
 * Note: fitting fewer than all coefficients re-optimizes over the
 * truncated basis; the result is not a prefix of the full solution.
 */
pub fn fit_shape_to_landmarks_multi(
    model: &ShapePcaModel,
    correspondences: &[Correspondence],
    config: &FittingConfig,
) -> Result<FittingResult> {
    let num_principal_components = model.get_num_principal_components();
    let num_coefficients = config
        .num_coefficients_to_fit
        .unwrap_or(num_principal_components);
    if num_coefficients > num_principal_components {
        return Err(FittingError::DimensionMismatch {
            expected: num_principal_components,
            actual: num_coefficients,
        });
    }

    let (resolved, total_landmarks) = resolve_correspondences(model, correspondences)?;

    let v_hat_h =
        assembly::assemble_homogeneous_basis(model, &resolved, num_coefficients, total_landmarks);
    let p = assembly::assemble_projection(&resolved, total_landmarks);
    let y = assembly::assemble_targets(&resolved, total_landmarks);
    let v_bar = assembly::assemble_base_points(&resolved, total_landmarks);

    Ok(solver::solve_regularized(
        &p,
        &v_hat_h,
        &v_bar,
        &y,
        config.lambda,
        correspondences.len(),
        config.get_sigma_squared(),
    ))
}

/// Single-image convenience wrapper around fit_shape_to_landmarks_multi.
pub fn fit_shape_to_landmarks(
    model: &ShapePcaModel,
    correspondence: &Correspondence,
    config: &FittingConfig,
) -> Result<FittingResult> {
    fit_shape_to_landmarks_multi(model, std::slice::from_ref(correspondence), config)
}
