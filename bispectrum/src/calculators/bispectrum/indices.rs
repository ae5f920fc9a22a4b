use crate::Error;

/// Selection rule for the `(j1, j2, j3)` triplets entering the bispectrum.
///
/// The solver uses the same integer encoding (`diagonal 0` to `diagonal 3`),
/// and enumerates triplets in the same order as [`make_js`]. This order is the
/// order of the columns in the solver output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum DiagonalStyle {
    /// All triplets satisfying the triangle and parity rules
    Diagonal0,
    /// Only triplets with `j1 = j2`
    Diagonal1,
    /// Only triplets with `j1 = j2 = j3`
    Diagonal2,
    /// Triplets from `Diagonal0` with `j3 >= j1`, which removes triplets
    /// giving redundant bispectrum components
    #[default]
    Diagonal3,
}

impl DiagonalStyle {
    /// Integer value used to encode this style in the solver input
    pub fn as_u8(self) -> u8 {
        match self {
            DiagonalStyle::Diagonal0 => 0,
            DiagonalStyle::Diagonal1 => 1,
            DiagonalStyle::Diagonal2 => 2,
            DiagonalStyle::Diagonal3 => 3,
        }
    }
}

impl TryFrom<i64> for DiagonalStyle {
    type Error = Error;

    fn try_from(value: i64) -> Result<DiagonalStyle, Error> {
        match value {
            0 => Ok(DiagonalStyle::Diagonal0),
            1 => Ok(DiagonalStyle::Diagonal1),
            2 => Ok(DiagonalStyle::Diagonal2),
            3 => Ok(DiagonalStyle::Diagonal3),
            _ => Err(Error::InvalidParameter(format!(
                "invalid diagonal style {}, must be 0, 1, 2, or 3", value
            ))),
        }
    }
}

impl From<DiagonalStyle> for u8 {
    fn from(style: DiagonalStyle) -> u8 {
        style.as_u8()
    }
}

impl std::fmt::Display for DiagonalStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl schemars::JsonSchema for DiagonalStyle {
    fn schema_name() -> String {
        "DiagonalStyle".into()
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        use schemars::schema::{InstanceType, Metadata, SchemaObject};

        SchemaObject {
            metadata: Some(Box::new(Metadata {
                description: Some(
                    "Selection rule for the (j1, j2, j3) triplets, using the \
                    solver encoding: 0 for all triplets, 1 for j1 = j2, 2 for \
                    j1 = j2 = j3, and 3 for j3 >= j1".into()
                ),
                ..Default::default()
            })),
            instance_type: Some(InstanceType::Integer.into()),
            enum_values: Some((0..4).map(serde_json::Value::from).collect()),
            ..Default::default()
        }.into()
    }
}

/// A single `(j1, j2, j3)` triplet of angular momenta, on the doubled scale
/// (i.e. these are `2j` values, and odd values represent half-integers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Triplet {
    pub j1: usize,
    pub j2: usize,
    pub j3: usize,
}

impl Triplet {
    pub fn new(j1: usize, j2: usize, j3: usize) -> Triplet {
        Triplet { j1, j2, j3 }
    }
}

impl From<[usize; 3]> for Triplet {
    fn from([j1, j2, j3]: [usize; 3]) -> Triplet {
        Triplet { j1, j2, j3 }
    }
}

impl std::fmt::Display for Triplet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.j1, self.j2, self.j3)
    }
}

/// Enumerate the `(j1, j2, j3)` triplets used for bispectrum components with
/// the given `twojmax` and `diagonal` style.
///
/// `j1` always runs from 0 to `twojmax`; `j3` only takes values with the
/// same parity as `j1 + j2`, between `|j1 - j2|` and `min(twojmax, j1 + j2)`.
/// The returned order is part of the contract: the solver writes one column
/// per triplet, in this order.
#[time_graph::instrument(name = "make_js")]
pub fn make_js(twojmax: usize, diagonal: DiagonalStyle) -> Vec<Triplet> {
    let mut js = Vec::new();
    for j1 in 0..=twojmax {
        match diagonal {
            DiagonalStyle::Diagonal2 => {
                js.push(Triplet::new(j1, j1, j1));
            }
            DiagonalStyle::Diagonal1 => {
                for j in (0..=usize::min(twojmax, 2 * j1)).step_by(2) {
                    js.push(Triplet::new(j1, j1, j));
                }
            }
            DiagonalStyle::Diagonal0 | DiagonalStyle::Diagonal3 => {
                for j2 in 0..=j1 {
                    for j in (j1 - j2..=usize::min(twojmax, j1 + j2)).step_by(2) {
                        if diagonal == DiagonalStyle::Diagonal3 && j < j1 {
                            continue;
                        }
                        js.push(Triplet::new(j1, j2, j));
                    }
                }
            }
        }
    }
    return js;
}

/// Same as [`make_js`], taking unchecked integers as input. This fails if
/// `twojmax` is negative or `diagonal` is not one of the four known styles.
pub fn make_js_checked(twojmax: i64, diagonal: i64) -> Result<Vec<Triplet>, Error> {
    let diagonal = DiagonalStyle::try_from(diagonal)?;
    let twojmax = usize::try_from(twojmax).map_err(|_| Error::InvalidParameter(format!(
        "twojmax must be positive or zero, got {}", twojmax
    )))?;

    return Ok(make_js(twojmax, diagonal));
}
