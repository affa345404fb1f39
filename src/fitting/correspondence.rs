extern crate nalgebra as na;

use na::{DVector, Matrix3x4, Vector2};
use crate::error::{FittingError, Result};
use crate::morphable::ShapePcaModel;
use crate::Float;

/**
 * Landmark observations of one image: an affine camera from model to
 * screen space and parallel lists tying each 2D point to a model vertex.
 *
 * The base shape is the shape the fit is linearized around. It is usually
 * the model mean, which is what gets used when it is not set explicitly.
 */
#[derive(Debug, Clone)]
pub struct Correspondence {
    pub affine_camera_matrix: Matrix3x4<Float>,
    pub points: Vec<Vector2<Float>>,
    pub vertex_ids: Vec<usize>,
    pub base_shape: Option<DVector<Float>>,
}

impl Correspondence {
    pub fn new(
        affine_camera_matrix: Matrix3x4<Float>,
        points: Vec<Vector2<Float>>,
        vertex_ids: Vec<usize>,
    ) -> Correspondence {
        Correspondence {
            affine_camera_matrix,
            points,
            vertex_ids,
            base_shape: None,
        }
    }

    pub fn with_base_shape(
        affine_camera_matrix: Matrix3x4<Float>,
        points: Vec<Vector2<Float>>,
        vertex_ids: Vec<usize>,
        base_shape: DVector<Float>,
    ) -> Correspondence {
        Correspondence {
            affine_camera_matrix,
            points,
            vertex_ids,
            base_shape: Some(base_shape),
        }
    }
}

/// A fully specified correspondence: the base shape is always present.
#[derive(Debug, Clone)]
pub struct ResolvedCorrespondence {
    affine_camera_matrix: Matrix3x4<Float>,
    points: Vec<Vector2<Float>>,
    vertex_ids: Vec<usize>,
    base_shape: DVector<Float>,
}

impl ResolvedCorrespondence {
    pub fn get_affine_camera_matrix(&self) -> &Matrix3x4<Float> {
        &self.affine_camera_matrix
    }

    pub fn get_points(&self) -> &Vec<Vector2<Float>> {
        &self.points
    }

    pub fn get_vertex_ids(&self) -> &Vec<usize> {
        &self.vertex_ids
    }

    pub fn get_base_shape(&self) -> &DVector<Float> {
        &self.base_shape
    }

    pub fn get_num_landmarks(&self) -> usize {
        self.points.len()
    }
}

/**
 * Checks the structural invariants of all per-image inputs and produces
 * fully specified copies, filling in the model mean where no base shape
 * override was given. Caller inputs are never mutated.
 *
 * Returns the resolved correspondences together with the total landmark
 * count over all images, which sizes every matrix built downstream.
 * All checks run before any matrix is allocated.
 */
pub fn resolve_correspondences(
    model: &ShapePcaModel,
    correspondences: &[Correspondence],
) -> Result<(Vec<ResolvedCorrespondence>, usize)> {
    let num_vertices = model.get_num_vertices();
    let mut total_landmarks = 0;

    for (image_index, correspondence) in correspondences.iter().enumerate() {
        if correspondence.points.len() != correspondence.vertex_ids.len() {
            return Err(FittingError::ShapeMismatch(format!(
                "image {} has {} points but {} vertex ids",
                image_index,
                correspondence.points.len(),
                correspondence.vertex_ids.len()
            )));
        }
        for &vertex_id in &correspondence.vertex_ids {
            if vertex_id >= num_vertices {
                return Err(FittingError::ShapeMismatch(format!(
                    "image {} references vertex {} but the model has {} vertices",
                    image_index, vertex_id, num_vertices
                )));
            }
        }
        if let Some(base_shape) = &correspondence.base_shape {
            if base_shape.len() != 3 * num_vertices {
                return Err(FittingError::DimensionMismatch {
                    expected: 3 * num_vertices,
                    actual: base_shape.len(),
                });
            }
        }
        total_landmarks += correspondence.points.len();
    }

    let resolved = correspondences
        .iter()
        .map(|correspondence| ResolvedCorrespondence {
            affine_camera_matrix: correspondence.affine_camera_matrix,
            points: correspondence.points.clone(),
            vertex_ids: correspondence.vertex_ids.clone(),
            base_shape: match &correspondence.base_shape {
                Some(base_shape) => base_shape.clone(),
                None => model.get_mean().clone(),
            },
        })
        .collect::<Vec<ResolvedCorrespondence>>();

    Ok((resolved, total_landmarks))
}
