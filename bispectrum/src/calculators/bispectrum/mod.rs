//! SNAP bispectrum descriptor: selection of the angular momentum triplets and
//! hyper-parameters.

mod indices;
pub use self::indices::{DiagonalStyle, Triplet, make_js, make_js_checked};

mod parameters;
pub use self::parameters::{BispectrumParameters, ElementProfile};
