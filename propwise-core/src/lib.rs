//! # propwise-core
//!
//! Shape-driven property introspection for the propwise crate.
//!
//! Every type that takes part registers a static [`Shape`] listing its
//! properties, normally through `#[derive(Properties)]` from the `propwise`
//! crate. On top of that one traversal primitive this crate provides:
//!
//! - [`enumerate`] - ordered `(name, value, writable)` triples of an instance
//! - [`find_empty_properties`] - names whose value is absent
//! - [`copy_into`] - selective merge-copy that skips ignored properties
//! - [`build_equality_conjunction`] - AND of `field == value` constraints
//!   built from a filter object through a [`QueryContext`]
//! - [`to_map`] / [`to_json`] - object-to-map conversion
//!
//! ## Values
//!
//! ```rust
//! use propwise_core::{PropertyValue, PropertyType};
//!
//! assert_eq!(Some("x".to_string()).to_value(), PropertyValue::String("x".into()));
//! assert!(None::<i32>.to_value().is_null());
//! assert!(PropertyValue::String(String::new()).is_blank());
//! ```
//!
//! ## Filters
//!
//! ```rust
//! use propwise_core::{Filter, PropertyValue};
//!
//! let filter = Filter::None
//!     .and_then(Filter::equals("status", "ACTIVE"))
//!     .and_then(Filter::Equals("owner".into(), PropertyValue::Int(42)));
//!
//! let (sql, params) = filter.to_sql(0);
//! assert_eq!(sql, "(status = $1 AND owner = $2)");
//! assert_eq!(params.len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! All operations are synchronous and keep no state between calls. Shapes
//! are `'static` and shared freely across threads. The only mutated value
//! is the destination handed to the copier, which `&mut` already keeps
//! exclusive.

pub mod config;
pub mod copy;
pub mod detect;
pub mod enumerate;
pub mod error;
pub mod filter;
pub mod ignore;
pub mod logging;
pub mod map;
pub mod predicate;
pub mod shape;
pub mod value;

pub use config::PropwiseConfig;
pub use copy::{
    CopyOptions, MismatchPolicy, copy_into, copy_into_with, copy_non_null, copy_to_new,
};
pub use detect::find_empty_properties;
pub use enumerate::{Property, enumerate};
pub use error::{
    ConfigError, CopyError, Error, IntrospectionError, PredicateError, QueryBuildError, Result,
    SetError,
};
pub use filter::Filter;
pub use ignore::{EmptyNames, IgnoreList};
pub use map::{to_json, to_map};
pub use predicate::{
    FilterContext, QueryContext, SynthesisOptions, build_equality_conjunction,
    build_equality_conjunction_with,
};
pub use shape::{Properties, PropertyDescriptor, Shape};
pub use value::{ConversionError, PropertyType, PropertyValue, ValueKind};

#[doc(hidden)]
pub use tracing as __tracing;
