//! # Propwise
//!
//! Shape-driven property introspection for plain Rust structs.
//!
//! Propwise provides:
//! - A derive macro registering each type's properties in a static shape
//! - Detection of properties whose value is absent
//! - Selective merge-copy between structurally unrelated types
//! - Synthesis of equality filters from a filter object
//!
//! ## Quick Start
//!
//! ```rust
//! use propwise::prelude::*;
//!
//! #[derive(Debug, Default, Properties)]
//! struct PersonPatch {
//!     name: Option<String>,
//!     age: Option<i32>,
//! }
//!
//! #[derive(Debug, Default, Properties)]
//! struct Person {
//!     name: Option<String>,
//!     age: Option<i32>,
//! }
//!
//! fn main() -> propwise::Result<()> {
//!     let patch = PersonPatch { name: Some("Alice".into()), age: None };
//!     let mut person = Person { name: Some("Bob".into()), age: Some(30) };
//!
//!     copy_non_null(&patch, &mut person, &IgnoreList::none())?;
//!
//!     assert_eq!(person.name.as_deref(), Some("Alice"));
//!     assert_eq!(person.age, Some(30));
//!     Ok(())
//! }
//! ```
//!
//! ## Filters
//!
//! ```rust
//! use propwise::prelude::*;
//!
//! #[derive(Default, Properties)]
//! #[props(rename_all = "camelCase")]
//! struct OrderFilter {
//!     status: Option<String>,
//!     owner_id: Option<i64>,
//! }
//!
//! #[derive(Default, Properties)]
//! #[props(rename_all = "camelCase")]
//! struct Order {
//!     id: i64,
//!     status: String,
//!     #[props(column = "owner")]
//!     owner_id: i64,
//! }
//!
//! let filter = OrderFilter { status: Some("ACTIVE".into()), owner_id: Some(42) };
//! let ctx = FilterContext::for_entity::<Order>();
//! let expr = build_equality_conjunction(Filter::None, &filter, &ctx, &IgnoreList::none())?;
//!
//! assert_eq!(expr.to_sql(0).0, "(status = $1 AND owner = $2)");
//! # Ok::<(), propwise::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

extern crate self as propwise;

pub use propwise_core::*;

// Re-export proc macros
pub use propwise_derive::Properties;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        CopyOptions, Filter, FilterContext, IgnoreList, MismatchPolicy, Properties,
        PropertyType, PropertyValue, QueryContext, build_equality_conjunction, copy_into,
        copy_non_null, copy_to_new, enumerate, find_empty_properties,
    };
}
