//! The `UnitCell` type represents the enclosing box of a simulated system, with
//! some type of periodic condition.
use crate::{Matrix3, Vector3D};

/// The shape of a cell determine how periodic boundary conditions apply, and
/// which kind of box the solver needs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum CellShape {
    /// Infinite unit cell, with no boundaries
    Infinite,
    /// Orthorhombic unit cell, with cuboid shape
    Orthorhombic,
    /// Triclinic unit cell, with arbitrary parallelepiped shape
    Triclinic,
}

/// An `UnitCell` defines the system physical boundaries.
///
/// The cell vectors are stored as the rows of the cell matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct UnitCell {
    /// Unit cell matrix
    matrix: Matrix3,
    /// Inverse of the unit cell matrix, cached from matrix
    inverse: Matrix3,
    /// Unit cell shape
    shape: CellShape,
}

impl From<Matrix3> for UnitCell {
    fn from(matrix: Matrix3) -> UnitCell {
        assert!(matrix.determinant() > 1e-6, "matrix is not invertible");

        let is_close_0 = |value| f64::abs(value) < 1e-6;
        let is_diagonal = |matrix: Matrix3| {
            is_close_0(matrix[0][1]) && is_close_0(matrix[0][2]) &&
            is_close_0(matrix[1][0]) && is_close_0(matrix[1][2]) &&
            is_close_0(matrix[2][0]) && is_close_0(matrix[2][1])
        };

        let shape = if is_diagonal(matrix) {
            CellShape::Orthorhombic
        } else {
            CellShape::Triclinic
        };

        return UnitCell {
            matrix: matrix,
            inverse: matrix.inverse(),
            shape: shape
        }
    }
}

impl UnitCell {
    /// Create an infinite unit cell
    pub fn infinite() -> UnitCell {
        UnitCell {
            matrix: Matrix3::zero(),
            inverse: Matrix3::zero(),
            shape: CellShape::Infinite,
        }
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let matrix = Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c]
        ]);
        UnitCell {
            matrix: matrix,
            inverse: matrix.inverse(),
            shape: CellShape::Orthorhombic,
        }
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> UnitCell {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Create a triclinic unit cell, with side lengths `a, b, c` and angles
    /// `alpha, beta, gamma` in degrees.
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z = f64::sqrt(c * c - c_y * c_y - c_x * c_x);

        return UnitCell::from(Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z],
        ]));
    }

    /// Get the cell shape
    pub fn shape(&self) -> CellShape {
        self.shape
    }

    /// Check if this unit cell is infinite, *i.e.* if it does not have
    /// periodic boundary conditions.
    pub fn is_infinite(&self) -> bool {
        self.shape() == CellShape::Infinite
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the first cell vector
    pub fn a_vector(&self) -> Vector3D {
        self.matrix.row(0)
    }

    /// Get the second cell vector
    pub fn b_vector(&self) -> Vector3D {
        self.matrix.row(1)
    }

    /// Get the third cell vector
    pub fn c_vector(&self) -> Vector3D {
        self.matrix.row(2)
    }

    /// Get the first length of the cell
    pub fn a(&self) -> f64 {
        self.a_vector().norm()
    }

    /// Get the second length of the cell
    pub fn b(&self) -> f64 {
        self.b_vector().norm()
    }

    /// Get the third length of the cell
    pub fn c(&self) -> f64 {
        self.c_vector().norm()
    }

    /// Get the angle between the second and third cell vectors, in degrees
    pub fn alpha(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.b_vector(), self.c_vector()).to_degrees(),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the angle between the first and third cell vectors, in degrees
    pub fn beta(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.a_vector(), self.c_vector()).to_degrees(),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the angle between the first and second cell vectors, in degrees
    pub fn gamma(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => angle(self.a_vector(), self.b_vector()).to_degrees(),
            CellShape::Orthorhombic | CellShape::Infinite => 90.0,
        }
    }

    /// Get the volume of the cell
    pub fn volume(&self) -> f64 {
        match self.shape {
            CellShape::Infinite => 0.0,
            _ => self.matrix.determinant(),
        }
    }

    /// Get the fractional representation of the `vector` in this cell
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        vector * self.inverse
    }

    /// Get the fractional representation of the `vector` in this cell, with
    /// all components wrapped inside `[0, 1)`.
    pub fn wrapped_fractional(&self, vector: Vector3D) -> Vector3D {
        let mut fractional = self.fractional(vector);
        for i in 0..3 {
            fractional[i] -= f64::floor(fractional[i]);
            // -1e-17 - floor(-1e-17) rounds to exactly 1.0
            if fractional[i] >= 1.0 {
                fractional[i] = 0.0;
            }
        }
        return fractional;
    }
}

/// Get the angles between the vectors `u` and `v`, in radians.
fn angle(u: Vector3D, v: Vector3D) -> f64 {
    let cos = u.dot(&v) / (u.norm() * v.norm());
    f64::acos(cos.clamp(-1.0, 1.0))
}
