//! # Office Converter
//!
//! Converts word processing, spreadsheet, presentation and image files by
//! running an external LibreOffice process in headless mode.
//!
//! ## Conversion flow
//!
//! An [`OfficeConverter`] is opened on one source document. Opening checks
//! that the file exists and that its extension is a key of the conversion
//! table. [`OfficeConverter::convert_to`] then checks the requested output
//! extension against the same table, runs
//! `<bin> --headless --convert-to <ext> <source> --outdir <staging>`, and
//! renames the produced file to the requested name.

pub mod config;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod filesystem;
pub mod formats;

pub use config::{ConverterConfig, LogFormat, LoggingConfig};
pub use converter::{ConverterOptions, OfficeConverter};
pub use discovery::{DiscoveryMethod, ToolDiscovery, ToolInstallation};
pub use error::{ConversionError, ErrorKind};
pub use formats::table::{allowed_outputs, is_supported_conversion, is_supported_input, rules};
pub use formats::{ConversionRule, DocumentFamily};
