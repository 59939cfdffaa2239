//! Error types for introspection, copying and filter synthesis.
//!
//! Every failure names the offending type and property so callers can tell
//! which field of which shape caused it. Structural errors are
//! deterministic: retrying the same call with the same inputs fails the
//! same way.
//!
//! ```rust
//! use propwise_core::{Error, QueryBuildError};
//!
//! let err: Error = QueryBuildError::unknown_field("User", "nickname").into();
//! assert!(err.to_string().contains("nickname"));
//! ```

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use crate::value::ConversionError;

/// Result type using the umbrella [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A shape could not be enumerated.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum IntrospectionError {
    /// The type declares no properties.
    #[error("type `{type_name}` declares no properties")]
    #[diagnostic(
        code(propwise::introspect::no_properties),
        help("derive `Properties` on a struct with named fields")
    )]
    NoProperties { type_name: &'static str },

    /// The shape lists a property the instance cannot read.
    #[error("property `{type_name}.{property}` is declared but cannot be read")]
    #[diagnostic(
        code(propwise::introspect::unreadable),
        help("every name in the shape must be handled by `Properties::get`")
    )]
    Unreadable {
        type_name: &'static str,
        property: &'static str,
    },
}

/// A single property write was rejected by the instance.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum SetError {
    /// The instance has no property with this name.
    #[error("type `{type_name}` has no property `{property}`")]
    #[diagnostic(code(propwise::set::unknown_property))]
    UnknownProperty {
        type_name: &'static str,
        property: String,
    },

    /// The property cannot be written.
    #[error("property `{type_name}.{property}` is read-only")]
    #[diagnostic(code(propwise::set::read_only))]
    ReadOnly {
        type_name: &'static str,
        property: &'static str,
    },

    /// The value does not convert into the field type.
    #[error("cannot assign property `{type_name}.{property}`: {source}")]
    #[diagnostic(code(propwise::set::conversion))]
    Conversion {
        type_name: &'static str,
        property: &'static str,
        #[source]
        source: ConversionError,
    },
}

/// Selective copy failed.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum CopyError {
    /// The source could not be enumerated.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Introspection(#[from] IntrospectionError),

    /// A shared property carries a value the destination field cannot hold.
    #[error("cannot copy `{property}` into `{type_name}`: {source}")]
    #[diagnostic(
        code(propwise::copy::incompatible),
        help("add the property to the ignore list or use `MismatchPolicy::Skip`")
    )]
    Incompatible {
        type_name: &'static str,
        property: &'static str,
        #[source]
        source: ConversionError,
    },

    /// The destination rejected a write that passed validation.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Write(#[from] SetError),
}

impl CopyError {
    /// The property that caused the failure, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::Introspection(IntrospectionError::Unreadable { property, .. }) => Some(*property),
            Self::Introspection(IntrospectionError::NoProperties { .. }) => None,
            Self::Incompatible { property, .. } => Some(*property),
            Self::Write(SetError::UnknownProperty { property, .. }) => Some(property.as_str()),
            Self::Write(SetError::ReadOnly { property, .. })
            | Self::Write(SetError::Conversion { property, .. }) => Some(*property),
        }
    }
}

/// The query context could not express a constraint.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum QueryBuildError {
    /// The filter object has a property with no matching entity field.
    #[error("entity `{entity}` has no field for filter property `{property}`")]
    #[diagnostic(
        code(propwise::query::unknown_field),
        help("ignore the property or add a matching field to the entity")
    )]
    UnknownField { entity: String, property: String },
}

impl QueryBuildError {
    /// Create an unknown field error.
    pub fn unknown_field(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownField {
            entity: entity.into(),
            property: property.into(),
        }
    }
}

/// Equality conjunction synthesis failed.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum PredicateError {
    /// The filter object could not be enumerated.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Introspection(#[from] IntrospectionError),

    /// The query context rejected a property.
    #[error(transparent)]
    #[diagnostic(transparent)]
    QueryBuild(#[from] QueryBuildError),
}

/// Configuration could not be loaded.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(propwise::config::io_error))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(propwise::config::toml_error))]
    Toml {
        #[source]
        source: toml::de::Error,
    },
}

/// Any propwise error.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Enumeration failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Introspection(#[from] IntrospectionError),

    /// Copy failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Copy(#[from] CopyError),

    /// Filter synthesis failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Predicate(#[from] PredicateError),

    /// Configuration failed to load.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl From<QueryBuildError> for Error {
    fn from(err: QueryBuildError) -> Self {
        Self::Predicate(err.into())
    }
}
