use crate::{Vector3D, Matrix3};
use super::{UnitCell, SimpleSystem};

pub fn test_system(name: &str) -> SimpleSystem {
    match name {
        "NaCl" => get_nacl(),
        "CsCl" => get_cscl(),
        "ZnS" => get_zns(),
        "water" => get_water(),
        _ => panic!("unknown test system {}", name)
    }
}

/// NaCl structure, in the conventional cubic cell
fn get_nacl() -> SimpleSystem {
    let a = 5.69169;
    let mut system = SimpleSystem::new(UnitCell::cubic(a));
    for fractional in [[0.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5]] {
        let position = Vector3D::from(fractional) * a;
        system.add_atom(11, position);
        system.add_atom(17, position + Vector3D::new(0.5 * a, 0.0, 0.0));
    }
    return system;
}

/// CsCl structure
/// This structure is simple since the primitive unit cell
/// is just the usual cubic cell with side length set to one.
fn get_cscl() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::cubic(1.0));
    system.add_atom(17, Vector3D::new(0.0, 0.0, 0.0));
    system.add_atom(55, Vector3D::new(0.5, 0.5, 0.5));
    return system;
}

/// ZnS (zincblende) structure, using a primitive (triclinic) unit cell with
/// the cell vectors not aligned with the x axis.
fn get_zns() -> SimpleSystem {
    let cell = Matrix3::new([[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]]);
    let mut system = SimpleSystem::new(UnitCell::from(cell));
    system.add_atom(16, Vector3D::new(0.0, 0.0, 0.0));
    system.add_atom(30, Vector3D::new(0.5, 0.5, 0.5));
    return system;
}

/// A single water molecule, without periodic boundary conditions
fn get_water() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::infinite());
    system.add_atom(8, Vector3D::new(0.0, 0.0, 0.0));
    system.add_atom(1, Vector3D::new(0.0, 0.75545, -0.58895));
    system.add_atom(1, Vector3D::new(0.0, -0.75545, -0.58895));
    return system;
}
