pub mod assertions;
pub mod config;
mod fpa;

#[doc(inline)]
pub use config::DecoderConfig;
#[doc(inline)]
pub use config::NameBand;
#[doc(inline)]
pub use config::NestingConfig;
#[doc(inline)]
pub use config::SizeLabel;
#[doc(inline)]
pub use config::TextRegion;
#[doc(inline)]
pub use fpa::FPA;
