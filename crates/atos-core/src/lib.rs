//! Core types for the atos normativos registry: the ato record, its label
//! tables, date handling, and form validation.

pub mod ato;
pub mod date;
pub mod labels;
pub mod validation;

pub use ato::{Ato, AtoForm, AtoPayload, ValidatedAto};
pub use date::{DateParseError, format_display, parse_date_input};
pub use labels::{Situacao, TipoAto, UnknownLabel};
pub use validation::{Field, FieldError, FieldErrorKind, ValidationErrors, validate};
