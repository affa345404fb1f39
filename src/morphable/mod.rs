extern crate nalgebra as na;

use na::{DMatrix, DVector, Matrix3xX};
use crate::error::{FittingError, Result};
use crate::Float;

/**
 * PCA shape model of a deformable 3D mesh.
 *
 * The mean is stored as (x_1, y_1, z_1, x_2, ...)^t, so it has length 3 times
 * the vertex count. The basis columns are the eigenvectors scaled by the
 * square root of their eigenvalues, which makes fitted coefficients
 * approximately standard-normal distributed.
 *
 * The model is read-only once constructed and can be shared across
 * concurrent fitting calls.
 */
#[derive(Debug, Clone)]
pub struct ShapePcaModel {
    mean: DVector<Float>,
    rescaled_basis: DMatrix<Float>,
}

impl ShapePcaModel {
    pub fn new(mean: DVector<Float>, rescaled_basis: DMatrix<Float>) -> Result<ShapePcaModel> {
        if mean.len() % 3 != 0 {
            return Err(FittingError::DimensionMismatch {
                expected: 3 * (mean.len() / 3 + 1),
                actual: mean.len(),
            });
        }
        if rescaled_basis.nrows() != mean.len() {
            return Err(FittingError::DimensionMismatch {
                expected: mean.len(),
                actual: rescaled_basis.nrows(),
            });
        }
        Ok(ShapePcaModel { mean, rescaled_basis })
    }

    pub fn get_mean(&self) -> &DVector<Float> {
        &self.mean
    }

    pub fn get_rescaled_basis(&self) -> &DMatrix<Float> {
        &self.rescaled_basis
    }

    /// The 3 basis rows of one vertex, as a 3 x K block.
    pub fn get_rescaled_basis_at_vertex(&self, vertex_id: usize) -> Matrix3xX<Float> {
        self.rescaled_basis.fixed_rows::<3>(3 * vertex_id).into_owned()
    }

    pub fn get_num_vertices(&self) -> usize {
        self.mean.len() / 3
    }

    pub fn get_num_principal_components(&self) -> usize {
        self.rescaled_basis.ncols()
    }
}
