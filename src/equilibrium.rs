//! Static equilibrium of a single six degree-of-freedom system.
//!
//! The first [`FREE_DOFS`] entries of the stiffness matrix and force vector
//! are unrestrained and the remaining ones are supports. Partitioning the
//! system as in the direct stiffness method
//! (<https://en.wikipedia.org/wiki/Direct_stiffness_method>) gives
//!
//! ```text
//! K_ff d   = F_f
//! R        = K_cf d + F_c
//! ```

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};
use tracing::debug;

use crate::errors::SolveError;

/// Total degrees of freedom in the system.
pub const DOFS: usize = 6;

/// Leading degrees of freedom that are free to displace.
pub const FREE_DOFS: usize = 3;

/// Pivots at or below this fraction of the largest stiffness term are treated as zero.
///
/// Equal to the round-off bound of an LU factorisation of the free block.
pub const SINGULARITY_TOLERANCE: f64 = FREE_DOFS as f64 * f64::EPSILON;

/// Global stiffness matrix ordered free first, constrained last.
pub type StiffnessMatrix = SMatrix<f64, DOFS, DOFS>;

/// Nodal force vector aligned with [`StiffnessMatrix`].
pub type ForceVector = SVector<f64, DOFS>;

/// Result of an equilibrium solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquilibriumSolution {
    /// Displacements of the free degrees of freedom.
    pub displacements: Vector3<f64>,
    /// Reactions at the constrained degrees of freedom.
    pub reactions: Vector3<f64>,
}

/// Solve the free partition for displacements and back out the support reactions.
///
/// # Errors
///
/// Returns [`SolveError::SingularMatrix`] when the free-free block cannot be
/// inverted.
///
/// # Examples
/// ```
/// use stiffsheet::{solve_equilibrium, ForceVector, StiffnessMatrix};
///
/// let stiffness = StiffnessMatrix::identity() * 1000.0;
/// let forces = ForceVector::from_column_slice(&[100.0, 0.0, -200.0, 0.0, 0.0, 0.0]);
/// let solution = solve_equilibrium(&stiffness, &forces).expect("regular system");
/// assert!((solution.displacements[0] - 0.1).abs() < 1.0e-12);
/// ```
pub fn solve_equilibrium(
    stiffness: &StiffnessMatrix,
    forces: &ForceVector,
) -> Result<EquilibriumSolution, SolveError> {
    let k_ff: Matrix3<f64> = stiffness.fixed_view::<FREE_DOFS, FREE_DOFS>(0, 0).into_owned();
    let f_f: Vector3<f64> = forces.fixed_rows::<FREE_DOFS>(0).into_owned();

    let displacements = solve_free_block(&k_ff, &f_f)?;

    let k_cf: Matrix3<f64> = stiffness
        .fixed_view::<FREE_DOFS, FREE_DOFS>(FREE_DOFS, 0)
        .into_owned();
    let f_c: Vector3<f64> = forces.fixed_rows::<FREE_DOFS>(FREE_DOFS).into_owned();
    let reactions = k_cf * displacements + f_c;

    debug!(?displacements, ?reactions, "equilibrium solved");
    Ok(EquilibriumSolution {
        displacements,
        reactions,
    })
}

/// Dense LU solve of the free block with a relative pivot check.
fn solve_free_block(k_ff: &Matrix3<f64>, f_f: &Vector3<f64>) -> Result<Vector3<f64>, SolveError> {
    let scale = k_ff.amax();
    if scale == 0.0 || !scale.is_finite() {
        return Err(SolveError::SingularMatrix);
    }
    let lu = k_ff.lu();
    let threshold = scale * SINGULARITY_TOLERANCE;
    if lu.u().diagonal().iter().any(|pivot| pivot.abs() <= threshold) {
        return Err(SolveError::SingularMatrix);
    }
    lu.solve(f_f)
        .filter(|solution| solution.iter().all(|value| value.is_finite()))
        .ok_or(SolveError::SingularMatrix)
}
