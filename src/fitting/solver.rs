extern crate nalgebra as na;
extern crate nalgebra_sparse;

use log::debug;
use na::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;

use crate::Float;

/**
 * Solution of one linear shape fit.
 *
 * The coefficients are approximately standard-normal distributed since the
 * fit runs over the rescaled basis; they are not multiplied by eigenvalues.
 * Rank and residual norm describe the numerical quality of the solve: an
 * under-determined or near-degenerate system still produces a result, it is
 * just a low-quality one, and these fields are how a caller can tell.
 */
#[derive(Debug, Clone)]
pub struct FittingResult {
    pub coefficients: DVector<Float>,
    pub rank: usize,
    pub residual_norm: Float,
}

impl FittingResult {
    pub fn is_underdetermined(&self) -> bool {
        self.rank < self.coefficients.len()
    }
}

/**
 * Solves the weighted, Tikhonov-regularized normal equations
 *
 *   (A^t Omega A + lambda_eff I) x = -A^t Omega b
 *
 * with A = P V_hat_h and b = P v_bar - y. Omega is a diagonal weight over
 * all 3T rows with the uniform value 1/sigma^2; per-landmark variances are
 * not supported. lambda_eff is lambda scaled by the image count so the
 * prior keeps the same influence however many images are fused.
 *
 * Decomposed with column-pivoted Householder QR. The solve never fails:
 * rank-deficient systems fall back to a pseudo-inverse solution via SVD
 * and are reported through the result's rank and residual norm.
 */
pub fn solve_regularized(
    projection: &CscMatrix<Float>,
    homogeneous_basis: &DMatrix<Float>,
    base_points: &DVector<Float>,
    targets: &DVector<Float>,
    lambda: Float,
    num_images: usize,
    sigma_squared: Float,
) -> FittingResult {
    let num_coefficients = homogeneous_basis.ncols();
    // the regularization has to be adjusted when more than one image is given
    let lambda_eff = lambda * num_images as Float;

    let a = projection * homogeneous_basis;
    let b = projection * base_points - targets;
    let omega = DVector::<Float>::from_element(a.nrows(), 1.0 / sigma_squared);

    let mut a_weighted = a.clone();
    for i in 0..a_weighted.nrows() {
        let row = a_weighted.row(i) * omega[i];
        a_weighted.row_mut(i).copy_from(&row);
    }

    let a_transpose = a.transpose();
    let normal = &a_transpose * &a_weighted
        + DMatrix::<Float>::identity(num_coefficients, num_coefficients) * lambda_eff;
    let rhs = -(&a_transpose * omega.component_mul(&b));

    let eps = normal.diagonal().amax() * num_coefficients as Float * Float::EPSILON;
    let qr = normal.clone().col_piv_qr();
    let rank = qr.r().diagonal().iter().filter(|d| d.abs() > eps).count();
    let coefficients = match qr.solve(&rhs) {
        Some(solution) => solution,
        None => normal
            .svd(true, true)
            .solve(&rhs, eps)
            .expect("SVD solve failed"),
    };

    let residual_norm = (&a * &coefficients + &b).norm();
    debug!(
        "linear shape fit: {} images, {} rows, rank {}/{}, residual norm {:e}",
        num_images,
        a.nrows(),
        rank,
        num_coefficients,
        residual_norm
    );

    FittingResult {
        coefficients,
        rank,
        residual_norm,
    }
}
