use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Error, Matrix3, System, Vector3D};
use crate::systems::{elements, CellShape, UnitCell};

/// Simulation box in the LAMMPS convention: the first cell vector is along
/// `x`, the second one is in the `xy` plane, and the box starts at the
/// origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LammpsBox {
    /// Box lengths along `x`, `y` and `z`
    pub lengths: [f64; 3],
    /// Tilt factors `xy`, `xz` and `yz`, `None` for orthorhombic boxes
    pub tilt: Option<[f64; 3]>,
}

impl LammpsBox {
    /// Build the box corresponding to the given periodic `cell`
    pub fn new(cell: &UnitCell) -> Result<LammpsBox, Error> {
        if cell.is_infinite() {
            return Err(Error::InvalidParameter(
                "the solver needs a periodic cell, got an infinite one".into()
            ));
        }

        let a = cell.a_vector();
        let b = cell.b_vector();
        let c = cell.c_vector();

        let lx = a.norm();
        let xy = b.dot(&a) / lx;
        let ly = f64::sqrt(b.norm2() - xy * xy);
        let xz = c.dot(&a) / lx;
        let yz = (b.dot(&c) - xy * xz) / ly;
        let lz = f64::sqrt(c.norm2() - xz * xz - yz * yz);

        let tilt = match cell.shape() {
            CellShape::Orthorhombic => None,
            _ => Some([xy, xz, yz]),
        };

        return Ok(LammpsBox {
            lengths: [lx, ly, lz],
            tilt: tilt,
        });
    }

    /// Get the cell matrix of this box, with cell vectors as rows
    pub fn matrix(&self) -> Matrix3 {
        let [lx, ly, lz] = self.lengths;
        let [xy, xz, yz] = self.tilt.unwrap_or([0.0; 3]);
        Matrix3::new([
            [lx, 0.0, 0.0],
            [xy, ly, 0.0],
            [xz, yz, lz],
        ])
    }
}

/// A LAMMPS data file for `atom_style charge`, containing a single structure.
///
/// Atom types are numbered from 1 following the element order given at
/// construction, and all elements get a type (and a mass) even if they do not
/// appear in the structure.
#[derive(Debug, Clone)]
pub struct LammpsData {
    simulation_box: LammpsBox,
    /// Element symbol and mass for each atom type
    masses: Vec<(String, f64)>,
    /// Atom type (starting at 1) and position inside the box for each atom
    atoms: Vec<(usize, Vector3D)>,
}

impl LammpsData {
    /// Convert `system` to a LAMMPS data file, using `element_order` to assign
    /// atom types.
    pub fn new(system: &dyn System, element_order: &[&str]) -> Result<LammpsData, Error> {
        let mut masses = Vec::new();
        let mut atomic_numbers = Vec::new();
        for &symbol in element_order {
            let atomic_number = elements::atomic_number(symbol).ok_or_else(|| Error::InvalidParameter(
                format!("'{}' is not a known chemical element", symbol)
            ))?;
            let mass = elements::mass(atomic_number).expect("known elements should have a mass");

            masses.push((symbol.to_owned(), mass));
            atomic_numbers.push(atomic_number);
        }

        let cell = system.cell()?;
        let simulation_box = LammpsBox::new(&cell)?;
        let box_matrix = simulation_box.matrix();

        let types = system.types()?;
        let positions = system.positions()?;
        if types.len() != positions.len() {
            return Err(Error::InvalidParameter(format!(
                "the system contains {} atomic types but {} positions",
                types.len(), positions.len()
            )));
        }

        let mut atoms = Vec::with_capacity(types.len());
        for (i, (&atomic_type, &position)) in types.iter().zip(positions).enumerate() {
            let lammps_type = atomic_numbers.iter()
                .position(|&z| z == atomic_type)
                .ok_or_else(|| Error::InvalidParameter(format!(
                    "atom {} is {}, which is not part of the elements [{}]",
                    i,
                    elements::symbol(atomic_type).map_or_else(|| format!("type {}", atomic_type), str::to_owned),
                    element_order.join(", "),
                )))?;

            let fractional = cell.wrapped_fractional(position);
            atoms.push((lammps_type + 1, fractional * box_matrix));
        }

        return Ok(LammpsData {
            simulation_box,
            masses,
            atoms,
        });
    }

    /// Get the simulation box of this data file
    pub fn simulation_box(&self) -> &LammpsBox {
        &self.simulation_box
    }

    /// Get the number of atoms in this data file
    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    /// Write this data file to the given `writer`
    pub fn write(&self, mut writer: impl Write) -> std::io::Result<()> {
        let [lx, ly, lz] = self.simulation_box.lengths;

        writeln!(writer, "LAMMPS data file for bispectrum calculation")?;
        writeln!(writer)?;
        writeln!(writer, "{} atoms", self.atoms.len())?;
        writeln!(writer, "{} atom types", self.masses.len())?;
        writeln!(writer)?;
        writeln!(writer, "0 {} xlo xhi", lx)?;
        writeln!(writer, "0 {} ylo yhi", ly)?;
        writeln!(writer, "0 {} zlo zhi", lz)?;
        if let Some([xy, xz, yz]) = self.simulation_box.tilt {
            writeln!(writer, "{} {} {} xy xz yz", xy, xz, yz)?;
        }

        writeln!(writer)?;
        writeln!(writer, "Masses")?;
        writeln!(writer)?;
        for (i, (symbol, mass)) in self.masses.iter().enumerate() {
            writeln!(writer, "{} {} # {}", i + 1, mass, symbol)?;
        }

        writeln!(writer)?;
        writeln!(writer, "Atoms # charge")?;
        writeln!(writer)?;
        for (i, (atom_type, position)) in self.atoms.iter().enumerate() {
            writeln!(writer, "{} {} 0 {} {} {}", i + 1, atom_type, position[0], position[1], position[2])?;
        }

        Ok(())
    }

    /// Write this data file at `path`, making sure the content reached the
    /// disk before returning.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    /// Get the content of this data file as a string
    pub fn contents(&self) -> String {
        let mut buffer = Vec::new();
        self.write(&mut buffer).expect("writing to a Vec should not fail");
        String::from_utf8(buffer).expect("data file should be valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::systems::test_utils::test_system;
    use crate::SimpleSystem;
    use super::*;

    #[test]
    fn orthorhombic_box() {
        let simulation_box = LammpsBox::new(&UnitCell::orthorhombic(3.0, 4.0, 5.0)).unwrap();
        assert_eq!(simulation_box.lengths, [3.0, 4.0, 5.0]);
        assert_eq!(simulation_box.tilt, None);
    }

    #[test]
    fn triclinic_box() {
        let cell = UnitCell::triclinic(3.0, 4.0, 5.0, 80.0, 95.0, 110.0);
        let simulation_box = LammpsBox::new(&cell).unwrap();
        assert!(simulation_box.tilt.is_some());

        // the box must describe the same lattice, only rotated
        let rotated = UnitCell::from(simulation_box.matrix());
        assert_relative_eq!(rotated.a(), cell.a(), epsilon = 1e-12);
        assert_relative_eq!(rotated.b(), cell.b(), epsilon = 1e-12);
        assert_relative_eq!(rotated.c(), cell.c(), epsilon = 1e-12);
        assert_relative_eq!(rotated.alpha(), cell.alpha(), epsilon = 1e-10);
        assert_relative_eq!(rotated.beta(), cell.beta(), epsilon = 1e-10);
        assert_relative_eq!(rotated.gamma(), cell.gamma(), epsilon = 1e-10);
        assert_relative_eq!(rotated.volume(), cell.volume(), epsilon = 1e-10);
    }

    #[test]
    fn rotated_cell() {
        // cell vectors are not aligned with x, the box is rotated
        let system = test_system("ZnS");
        let data = LammpsData::new(&system, &["S", "Zn"]).unwrap();

        let sqrt_2 = f64::sqrt(2.0);
        let simulation_box = data.simulation_box();
        assert_relative_eq!(simulation_box.lengths[0], sqrt_2, epsilon = 1e-12);

        let tilt = simulation_box.tilt.unwrap();
        assert_relative_eq!(tilt[0], sqrt_2 / 2.0, epsilon = 1e-12);
        assert_relative_eq!(tilt[1], sqrt_2 / 2.0, epsilon = 1e-12);

        // the distance between the two atoms is conserved
        let distance = (data.atoms[1].1 - data.atoms[0].1).norm();
        assert_relative_eq!(distance, f64::sqrt(0.75), epsilon = 1e-12);
    }

    #[test]
    fn nacl() {
        let system = test_system("NaCl");
        let data = LammpsData::new(&system, &["Na", "Cl"]).unwrap();
        assert_eq!(data.size(), 8);

        let content = data.contents();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "LAMMPS data file for bispectrum calculation");
        assert_eq!(lines[2], "8 atoms");
        assert_eq!(lines[3], "2 atom types");
        assert_eq!(lines[5], "0 5.69169 xlo xhi");
        assert_eq!(lines[6], "0 5.69169 ylo yhi");
        assert_eq!(lines[7], "0 5.69169 zlo zhi");
        assert_eq!(lines[9], "Masses");
        assert_eq!(lines[11], "1 22.98976928 # Na");
        assert_eq!(lines[12], "2 35.453 # Cl");
        assert_eq!(lines[14], "Atoms # charge");
        assert_eq!(lines[16], "1 1 0 0 0 0");
        assert!(lines[17].starts_with("2 2 0 "));
        assert_eq!(lines.len(), 16 + 8);

        // all atoms are inside the box
        for (_, position) in &data.atoms {
            for k in 0..3 {
                assert!(position[k] >= 0.0 && position[k] <= 5.69169 + 1e-12);
            }
        }
    }

    #[test]
    fn element_order() {
        let system = test_system("NaCl");
        let data = LammpsData::new(&system, &["Cl", "Na"]).unwrap();
        let content = data.contents();
        assert!(content.contains("1 35.453 # Cl\n2 22.98976928 # Na\n"));
        assert!(content.contains("\n1 2 0 0 0 0\n"));

        // extra elements still get a type
        let data = LammpsData::new(&system, &["Na", "Cl", "K"]).unwrap();
        let content = data.contents();
        assert!(content.contains("3 atom types\n"));
        assert!(content.contains("3 39.0983 # K\n"));
    }

    #[test]
    fn missing_element() {
        let system = test_system("CsCl");
        let error = LammpsData::new(&system, &["Cl"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter: atom 1 is Cs, which is not part of the elements [Cl]"
        );

        let mut system = SimpleSystem::new(UnitCell::cubic(3.0));
        system.add_atom(500, Vector3D::zero());
        let error = LammpsData::new(&system, &["Cl"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter: atom 0 is type 500, which is not part of the elements [Cl]"
        );
    }

    /// System returning one more position than atomic types
    struct InconsistentSystem {
        types: Vec<i32>,
        positions: Vec<Vector3D>,
    }

    impl System for InconsistentSystem {
        fn cell(&self) -> Result<UnitCell, Error> {
            Ok(UnitCell::cubic(3.0))
        }

        fn size(&self) -> Result<usize, Error> {
            Ok(self.types.len())
        }

        fn types(&self) -> Result<&[i32], Error> {
            Ok(&self.types)
        }

        fn positions(&self) -> Result<&[Vector3D], Error> {
            Ok(&self.positions)
        }
    }

    #[test]
    fn inconsistent_system() {
        let system = InconsistentSystem {
            types: vec![11],
            positions: vec![Vector3D::zero(), Vector3D::new(1.0, 1.0, 1.0)],
        };
        let error = LammpsData::new(&system, &["Na"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter: the system contains 1 atomic types but 2 positions"
        );
    }

    #[test]
    fn infinite_cell() {
        let system = test_system("water");
        let error = LammpsData::new(&system, &["H", "O"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter: the solver needs a periodic cell, got an infinite one"
        );
    }
}
