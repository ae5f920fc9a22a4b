pub mod bispectrum;
pub use self::bispectrum::{BispectrumParameters, ElementProfile};
pub use self::bispectrum::{DiagonalStyle, Triplet, make_js};
