//! Supported document formats and the conversions allowed between them.

pub mod table;

pub use table::{ConversionRule, DocumentFamily};
