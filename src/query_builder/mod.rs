//! Query-string generation for Wikipedia's advanced search syntax.

pub mod fields;
pub mod generator;

pub use fields::*;
pub use generator::*;
