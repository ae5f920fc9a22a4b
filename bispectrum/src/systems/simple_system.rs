use crate::Error;

use super::{UnitCell, System, Vector3D};
use super::elements;

/// A simple implementation of `System` to use when no other is available
#[derive(Clone, Debug)]
pub struct SimpleSystem {
    cell: UnitCell,
    types: Vec<i32>,
    positions: Vec<Vector3D>,
}

impl SimpleSystem {
    /// Create a new empty system with the given unit cell
    pub fn new(cell: UnitCell) -> SimpleSystem {
        SimpleSystem {
            cell: cell,
            types: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Add an atom with the given atomic number and position to this system
    pub fn add_atom(&mut self, atomic_number: i32, position: Vector3D) {
        self.types.push(atomic_number);
        self.positions.push(position);
    }

    /// Add an atom of the element with the given `symbol` at `position`
    pub fn add_element(&mut self, symbol: &str, position: Vector3D) -> Result<(), Error> {
        let atomic_number = elements::atomic_number(symbol).ok_or_else(|| Error::InvalidParameter(
            format!("'{}' is not a known chemical element", symbol)
        ))?;
        self.add_atom(atomic_number, position);
        Ok(())
    }
}

impl System for SimpleSystem {
    fn size(&self) -> Result<usize, Error> {
        Ok(self.types.len())
    }

    fn positions(&self) -> Result<&[Vector3D], Error> {
        Ok(&self.positions)
    }

    fn types(&self) -> Result<&[i32], Error> {
        Ok(&self.types)
    }

    fn cell(&self) -> Result<UnitCell, Error> {
        Ok(self.cell)
    }
}

impl std::convert::TryFrom<&dyn System> for SimpleSystem {
    type Error = Error;

    fn try_from(system: &dyn System) -> Result<SimpleSystem, Error> {
        let mut new = SimpleSystem::new(system.cell()?);
        for (&atomic_type, &position) in system.types()?.iter().zip(system.positions()?) {
            new.add_atom(atomic_type, position);
        }
        return Ok(new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_atoms() {
        let mut system = SimpleSystem::new(UnitCell::cubic(10.0));
        system.add_atom(3, Vector3D::new(2.0, 3.0, 4.0));
        system.add_atom(1, Vector3D::new(1.0, 3.0, 4.0));
        system.add_element("Li", Vector3D::new(5.0, 3.0, 4.0)).unwrap();

        assert_eq!(system.size().unwrap(), 3);
        assert_eq!(system.types().unwrap(), &[3, 1, 3]);
        assert_eq!(system.positions().unwrap(), &[
            Vector3D::new(2.0, 3.0, 4.0),
            Vector3D::new(1.0, 3.0, 4.0),
            Vector3D::new(5.0, 3.0, 4.0),
        ]);
        assert_eq!(system.cell().unwrap(), UnitCell::cubic(10.0));
    }

    #[test]
    fn unknown_element() {
        let mut system = SimpleSystem::new(UnitCell::cubic(10.0));
        let error = system.add_element("Qq", Vector3D::zero()).unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: 'Qq' is not a known chemical element");
        assert_eq!(system.size().unwrap(), 0);
    }

    #[test]
    fn from_dyn_system() {
        let mut system = SimpleSystem::new(UnitCell::cubic(3.0));
        system.add_atom(8, Vector3D::new(0.0, 0.0, 0.0));
        system.add_atom(1, Vector3D::new(0.0, 0.75, -0.58));

        let copy = SimpleSystem::try_from(&system as &dyn System).unwrap();
        assert_eq!(copy.types().unwrap(), &[8, 1]);
        assert_eq!(copy.positions().unwrap(), system.positions().unwrap());
    }
}
