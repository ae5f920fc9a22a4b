use indexmap::IndexMap;
use indexmap::map::Entry;
use metatensor::{Labels, LabelsBuilder};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::Error;
use crate::systems::elements;

use super::{make_js, DiagonalStyle, Triplet};

fn default_rfac0() -> f64 {
    0.99363
}

fn default_diagonal() -> i64 {
    DiagonalStyle::default().as_u8().into()
}

/// Parameters of a single chemical element for the bispectrum descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ElementProfile {
    /// Cutoff radius of this element, before scaling by `cutoff_scale`. The
    /// cutoff for a pair of atoms is the sum of their scaled radii.
    #[serde(alias = "r")]
    pub radius: f64,
    /// Weight of this element in the neighbor density
    #[serde(alias = "w")]
    pub weight: f64,
}

/// Parameters for the SNAP bispectrum descriptor.
///
/// Each atom is described by the bispectrum components `B_{j1, j2, j3}` of its
/// neighbor density, projected on hyperspherical harmonics up to
/// `J = twojmax / 2`. The set of `(j1, j2, j3)` triplets is controlled by
/// `diagonal`, see [`make_js`].
///
/// The order of `elements` matters: it is the order of the atom types given
/// to the solver, and the order of the radii and weights in its input.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BispectrumParameters {
    /// Scale factor applied to all element radii (`rcutfac`)
    pub cutoff_scale: f64,
    /// Twice the maximal angular momentum of the hyperspherical harmonics
    pub twojmax: usize,
    /// Parameter in the distance to angle conversion, in `(0, 1]`
    #[serde(default = "default_rfac0")]
    pub rfac0: f64,
    /// Parameter in the distance to angle conversion, in distance units
    #[serde(default)]
    pub rmin0: f64,
    /// Selection rule for the `(j1, j2, j3)` triplets
    #[serde(default)]
    pub diagonal: DiagonalStyle,
    /// Radius and weight for each element, indexed by element symbol
    pub elements: IndexMap<String, ElementProfile>,
}

/// Parameters as written in JSON, before checking the integer values and the
/// element list
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonParameters {
    cutoff_scale: f64,
    twojmax: i64,
    #[serde(default = "default_rfac0")]
    rfac0: f64,
    #[serde(default)]
    rmin0: f64,
    #[serde(default = "default_diagonal")]
    diagonal: i64,
    elements: ElementList,
}

/// All entries of the `elements` JSON object, including duplicated keys
struct ElementList(Vec<(String, ElementProfile)>);

impl<'de> Deserialize<'de> for ElementList {
    fn deserialize<D>(deserializer: D) -> Result<ElementList, D::Error> where D: Deserializer<'de> {
        struct ElementListVisitor;

        impl<'de> Visitor<'de> for ElementListVisitor {
            type Value = ElementList;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map from element symbols to radius and weight")
            }

            fn visit_map<A>(self, mut map: A) -> Result<ElementList, A::Error> where A: MapAccess<'de> {
                let mut elements = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, ElementProfile>()? {
                    elements.push(entry);
                }
                Ok(ElementList(elements))
            }
        }

        deserializer.deserialize_map(ElementListVisitor)
    }
}

impl TryFrom<JsonParameters> for BispectrumParameters {
    type Error = Error;

    fn try_from(json: JsonParameters) -> Result<BispectrumParameters, Error> {
        let twojmax = usize::try_from(json.twojmax).map_err(|_| Error::InvalidParameter(format!(
            "twojmax must be positive or zero, got {}", json.twojmax
        )))?;

        let mut elements = IndexMap::with_capacity(json.elements.0.len());
        for (symbol, profile) in json.elements.0 {
            match elements.entry(symbol) {
                Entry::Occupied(entry) => {
                    return Err(Error::InvalidParameter(format!(
                        "element {} is given more than once", entry.key()
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(profile);
                }
            }
        }

        return Ok(BispectrumParameters {
            cutoff_scale: json.cutoff_scale,
            twojmax: twojmax,
            rfac0: json.rfac0,
            rmin0: json.rmin0,
            diagonal: DiagonalStyle::try_from(json.diagonal)?,
            elements: elements,
        });
    }
}

impl<'de> Deserialize<'de> for BispectrumParameters {
    fn deserialize<D>(deserializer: D) -> Result<BispectrumParameters, D::Error> where D: Deserializer<'de> {
        let json = JsonParameters::deserialize(deserializer)?;
        BispectrumParameters::try_from(json).map_err(serde::de::Error::custom)
    }
}

impl BispectrumParameters {
    /// Parse parameters from a JSON string, and validate them.
    ///
    /// Malformed JSON gives an `Error::Json`, while well-formed JSON with
    /// invalid values (out of range diagonal style, negative `twojmax`,
    /// duplicated element...) gives an `Error::InvalidParameter`.
    pub fn from_json(json: &str) -> Result<BispectrumParameters, Error> {
        let json: JsonParameters = serde_json::from_str(json)?;
        let parameters = BispectrumParameters::try_from(json)?;
        parameters.validate()?;
        return Ok(parameters);
    }

    /// Check that these parameters are usable by the solver
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.cutoff_scale.is_finite() && self.cutoff_scale > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected positive cutoff_scale, got {}", self.cutoff_scale
            )));
        }

        if !(self.rfac0 > 0.0 && self.rfac0 <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "rfac0 must be in (0, 1], got {}", self.rfac0
            )));
        }

        if !(self.rmin0.is_finite() && self.rmin0 >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected positive or zero rmin0, got {}", self.rmin0
            )));
        }

        if self.elements.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one element is required".into()
            ));
        }

        for (symbol, profile) in &self.elements {
            if elements::atomic_number(symbol).is_none() {
                return Err(Error::InvalidParameter(format!(
                    "'{}' is not a known chemical element", symbol
                )));
            }

            if !(profile.radius.is_finite() && profile.radius > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "expected positive radius for {}, got {}", symbol, profile.radius
                )));
            }

            if !profile.weight.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "expected finite weight for {}, got {}", symbol, profile.weight
                )));
            }
        }

        let smallest_cutoff = 2.0 * self.scaled_radii().into_iter().fold(f64::INFINITY, f64::min);
        if self.rmin0 >= smallest_cutoff {
            return Err(Error::InvalidParameter(format!(
                "rmin0 ({}) must be smaller than the smallest pair cutoff ({})",
                self.rmin0, smallest_cutoff
            )));
        }

        Ok(())
    }

    /// Element symbols, in the order used by the solver
    pub fn element_order(&self) -> Vec<&str> {
        self.elements.keys().map(String::as_str).collect()
    }

    /// Radii of all elements multiplied by `cutoff_scale`, following
    /// `element_order`
    pub fn scaled_radii(&self) -> Vec<f64> {
        self.elements.values().map(|profile| profile.radius * self.cutoff_scale).collect()
    }

    /// Weights of all elements, following `element_order`
    pub fn weights(&self) -> Vec<f64> {
        self.elements.values().map(|profile| profile.weight).collect()
    }

    /// `(j1, j2, j3)` triplets of the bispectrum components, in the order the
    /// solver outputs them
    pub fn triplets(&self) -> Vec<Triplet> {
        make_js(self.twojmax, self.diagonal)
    }

    /// Number of bispectrum components per atom
    pub fn size(&self) -> usize {
        self.triplets().len()
    }

    /// Properties labels for the bispectrum components, with one entry per
    /// column of the solver output
    pub fn properties(&self) -> Labels {
        let mut properties = LabelsBuilder::new(vec!["j1", "j2", "j3"]);
        for triplet in self.triplets() {
            properties.add(&[triplet.j1, triplet.j2, triplet.j3]);
        }
        return properties.finish();
    }
}
