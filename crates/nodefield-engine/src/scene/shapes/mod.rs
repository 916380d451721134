pub mod circle;
pub mod line;
