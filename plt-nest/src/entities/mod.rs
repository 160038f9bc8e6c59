mod nesting_piece;
mod nesting_result;
mod piece;

#[doc(inline)]
pub use nesting_piece::NestingPiece;
#[doc(inline)]
pub use nesting_piece::SizeClass;
#[doc(inline)]
pub use nesting_result::NestingResult;
#[doc(inline)]
pub use nesting_result::StripBounds;
#[doc(inline)]
pub use piece::ExtPiece;
#[doc(inline)]
pub use piece::PenCommand;
#[doc(inline)]
pub use piece::Piece;
