use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Error;
use crate::calculators::BispectrumParameters;

use super::{DATA_FILE, DUMP_ELEMENT, DUMP_SNA, DUMP_SNAD, DUMP_SNAV};

/// Input script for the solver, computing the bispectrum components and their
/// derivatives for all atoms in a single structure.
///
/// The script is a pure function of the parameters: building it twice from the
/// same parameters gives the same lines.
#[derive(Debug, Clone, PartialEq)]
pub struct InputScript {
    lines: Vec<String>,
}

impl InputScript {
    /// Build the input script for the given `parameters`. The parameters
    /// should already be validated.
    pub fn new(parameters: &BispectrumParameters) -> InputScript {
        let mut lines = vec![
            "units metal".to_owned(),
            "atom_style charge".to_owned(),
            "box tilt large".to_owned(),
            format!("read_data {}", DATA_FILE),
            // the pair style is required to run, but does not matter here
            "pair_style lj/cut 10".to_owned(),
            "pair_coeff * * 1 1".to_owned(),
        ];

        let sna = sna_arguments(parameters);
        lines.push(format!("compute sna all sna/atom {} bzeroflag 0", sna));
        lines.push(format!("compute snad all snad/atom {} quadraticflag 0", sna));
        lines.push(format!("compute snav all snav/atom {} quadraticflag 0", sna));

        lines.push(format!("dump 1 all custom 1 {} element", DUMP_ELEMENT));
        lines.push(format!("dump 2 all custom 1 {} c_sna[*]", DUMP_SNA));
        lines.push(format!("dump 3 all custom 1 {} c_snad[*]", DUMP_SNAD));
        lines.push(format!("dump 4 all custom 1 {} c_snav[*]", DUMP_SNAV));
        lines.push(format!("dump_modify 1 element {}", parameters.element_order().join(" ")));

        lines.push("run 0".to_owned());

        return InputScript { lines };
    }

    /// Get the lines of this script
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write this script at `path`, making sure the content reached the disk
    /// before returning.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

impl std::fmt::Display for InputScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Arguments shared by all the `sna` computes. The radii are already scaled,
/// so the cutoff scale given to the solver is 1.
fn sna_arguments(parameters: &BispectrumParameters) -> String {
    let mut arguments = vec![
        "1".to_owned(),
        parameters.rfac0.to_string(),
        parameters.twojmax.to_string(),
    ];

    arguments.extend(parameters.scaled_radii().iter().map(f64::to_string));
    arguments.extend(parameters.weights().iter().map(f64::to_string));

    arguments.push(format!("diagonal {}", parameters.diagonal));
    arguments.push(format!("rmin0 {}", parameters.rmin0));

    return arguments.join(" ");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(elements: &str) -> BispectrumParameters {
        BispectrumParameters::from_json(&format!(r#"{{
            "cutoff_scale": 5.0,
            "twojmax": 3,
            "elements": {}
        }}"#, elements)).unwrap()
    }

    #[test]
    fn script() {
        let parameters = parameters(r#"{
            "Na": {"radius": 0.3, "weight": 0.9},
            "Cl": {"radius": 0.7, "weight": 3.0}
        }"#);

        let script = InputScript::new(&parameters);
        assert_eq!(script.lines(), [
            "units metal",
            "atom_style charge",
            "box tilt large",
            "read_data data.0",
            "pair_style lj/cut 10",
            "pair_coeff * * 1 1",
            "compute sna all sna/atom 1 0.99363 3 1.5 3.5 0.9 3 diagonal 3 rmin0 0 bzeroflag 0",
            "compute snad all snad/atom 1 0.99363 3 1.5 3.5 0.9 3 diagonal 3 rmin0 0 quadraticflag 0",
            "compute snav all snav/atom 1 0.99363 3 1.5 3.5 0.9 3 diagonal 3 rmin0 0 quadraticflag 0",
            "dump 1 all custom 1 dump.element element",
            "dump 2 all custom 1 dump.sna c_sna[*]",
            "dump 3 all custom 1 dump.snad c_snad[*]",
            "dump 4 all custom 1 dump.snav c_snav[*]",
            "dump_modify 1 element Na Cl",
            "run 0",
        ]);

        assert!(script.to_string().ends_with("dump_modify 1 element Na Cl\nrun 0\n"));
    }

    #[test]
    fn element_order() {
        let parameters = parameters(r#"{
            "Zr": {"radius": 0.5, "weight": 1.0},
            "Cu": {"radius": 0.4, "weight": 0.5},
            "Al": {"radius": 0.6, "weight": 0.25}
        }"#);

        let script = InputScript::new(&parameters);
        assert_eq!(
            script.lines()[6],
            "compute sna all sna/atom 1 0.99363 3 2.5 2 3 1 0.5 0.25 diagonal 3 rmin0 0 bzeroflag 0"
        );
        assert_eq!(script.lines()[13], "dump_modify 1 element Zr Cu Al");
    }

    #[test]
    fn no_accumulation() {
        let mut parameters = parameters(r#"{"Si": {"radius": 0.5, "weight": 1.0}}"#);
        parameters.diagonal = crate::calculators::DiagonalStyle::Diagonal0;
        parameters.rmin0 = 0.25;

        let first = InputScript::new(&parameters);
        let second = InputScript::new(&parameters);
        assert_eq!(first, second);
        assert_eq!(
            first.lines()[7],
            "compute snad all snad/atom 1 0.99363 3 2.5 1 diagonal 0 rmin0 0.25 quadraticflag 0"
        );
    }
}
