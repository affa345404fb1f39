extern crate nalgebra as na;
extern crate nalgebra_sparse;

use na::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CscMatrix};

use crate::fitting::correspondence::ResolvedCorrespondence;
use crate::morphable::ShapePcaModel;
use crate::Float;

/**
 * Stacks the basis rows of all referenced vertices into a 4T x K' matrix,
 * landmarks in encounter order (image 0 first). Each landmark contributes
 * its 3 basis rows truncated to the first K' columns, followed by one
 * all-zero row. The zero rows line up with the homogeneous column of the
 * 3x4 cameras in the projection matrix, so one multiply applies the full
 * affine transform.
 */
pub fn assemble_homogeneous_basis(
    model: &ShapePcaModel,
    correspondences: &[ResolvedCorrespondence],
    num_coefficients: usize,
    total_landmarks: usize,
) -> DMatrix<Float> {
    let mut v_hat_h = DMatrix::<Float>::zeros(4 * total_landmarks, num_coefficients);
    let mut row_index = 0;
    for correspondence in correspondences {
        for &vertex_id in correspondence.get_vertex_ids() {
            let basis_rows = model
                .get_rescaled_basis()
                .view((3 * vertex_id, 0), (3, num_coefficients));
            v_hat_h
                .view_mut((row_index, 0), (3, num_coefficients))
                .copy_from(&basis_rows);
            row_index += 4; // the 4th row stays zero
        }
    }
    v_hat_h
}

/**
 * Block-diagonal 3T x 4T projection matrix: landmark i carries its image's
 * affine camera at row offset 3i, column offset 4i. Built as a triplet
 * list first and materialized once, so the allocation stays O(T).
 */
pub fn assemble_projection(
    correspondences: &[ResolvedCorrespondence],
    total_landmarks: usize,
) -> CscMatrix<Float> {
    let mut projection_coo =
        CooMatrix::<Float>::zeros(3 * total_landmarks, 4 * total_landmarks);
    let mut landmark_index = 0;
    for correspondence in correspondences {
        let camera = correspondence.get_affine_camera_matrix();
        for _ in 0..correspondence.get_num_landmarks() {
            projection_coo.push_matrix(3 * landmark_index, 4 * landmark_index, camera);
            landmark_index += 1;
        }
    }
    CscMatrix::from(&projection_coo)
}

/// The observed points stacked as (x_1, y_1, 1, x_2, ...)^t, length 3T.
pub fn assemble_targets(
    correspondences: &[ResolvedCorrespondence],
    total_landmarks: usize,
) -> DVector<Float> {
    let mut y = DVector::<Float>::from_element(3 * total_landmarks, 1.0);
    let mut landmark_index = 0;
    for correspondence in correspondences {
        for point in correspondence.get_points() {
            y[3 * landmark_index] = point.x;
            y[3 * landmark_index + 1] = point.y;
            // the third slot stays 1 (homogeneous coordinate)
            landmark_index += 1;
        }
    }
    y
}

/// The base shape at the referenced vertices, stacked as
/// (x_1, y_1, z_1, 1, x_2, ...)^t, length 4T.
pub fn assemble_base_points(
    correspondences: &[ResolvedCorrespondence],
    total_landmarks: usize,
) -> DVector<Float> {
    let mut v_bar = DVector::<Float>::from_element(4 * total_landmarks, 1.0);
    let mut landmark_index = 0;
    for correspondence in correspondences {
        let base_shape = correspondence.get_base_shape();
        for &vertex_id in correspondence.get_vertex_ids() {
            v_bar[4 * landmark_index] = base_shape[3 * vertex_id];
            v_bar[4 * landmark_index + 1] = base_shape[3 * vertex_id + 1];
            v_bar[4 * landmark_index + 2] = base_shape[3 * vertex_id + 2];
            // the fourth slot stays 1 (homogeneous coordinate)
            landmark_index += 1;
        }
    }
    v_bar
}
