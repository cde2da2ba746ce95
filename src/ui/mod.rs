pub mod span;
pub mod spinner;
pub mod style;
