//! Equality conjunction synthesis from filter objects.
//!
//! A filter object is an instance whose present properties describe the
//! rows a caller wants. [`build_equality_conjunction`] turns each present,
//! non-blank property into `field == value` through a [`QueryContext`] and
//! ANDs the constraints onto a base expression.
//!
//! ```rust
//! use propwise_core::{Filter, FilterContext, IgnoreList, build_equality_conjunction};
//! use propwise_derive::Properties;
//!
//! #[derive(Properties)]
//! #[props(crate = "propwise_core", rename_all = "camelCase")]
//! struct OrderQuery {
//!     status: Option<String>,
//!     region: Option<String>,
//!     owner_id: Option<i64>,
//! }
//!
//! #[derive(Properties)]
//! #[props(crate = "propwise_core", rename_all = "camelCase")]
//! struct Order {
//!     status: String,
//!     region: String,
//!     #[props(column = "owner")]
//!     owner_id: i64,
//! }
//!
//! let filter = OrderQuery { status: Some("ACTIVE".into()), region: Some("".into()), owner_id: None };
//! let ctx = FilterContext::for_entity::<Order>();
//! let predicate = build_equality_conjunction(Filter::None, &filter, &ctx, &IgnoreList::none())?;
//! assert_eq!(predicate, Filter::equals("status", "ACTIVE"));
//! # Ok::<(), propwise_core::PredicateError>(())
//! ```

use tracing::{debug, trace};

use crate::enumerate::enumerate;
use crate::error::{PredicateError, QueryBuildError};
use crate::filter::Filter;
use crate::ignore::IgnoreList;
use crate::shape::{Properties, Shape};
use crate::value::PropertyValue;

/// Turns property names and values into query constraints.
///
/// Implemented by the persistence layer; the synthesizer knows nothing of
/// the storage engine behind it.
pub trait QueryContext {
    /// A resolved, comparable field accessor.
    type Field;
    /// A predicate expression.
    type Expr;

    /// Resolve the target field for a filter property.
    fn field(&self, name: &str) -> Result<Self::Field, QueryBuildError>;

    /// Build the constraint `field == value`.
    fn equal(&self, field: Self::Field, value: PropertyValue) -> Self::Expr;

    /// Conjoin two expressions.
    fn and(&self, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr;
}

/// Options for [`build_equality_conjunction_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Skip present values whose textual form is empty.
    pub skip_blank_strings: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            skip_blank_strings: true,
        }
    }
}

/// AND an equality constraint for every present property of `filter` onto
/// `base`.
///
/// Null properties, blank strings and names in `ignore` are skipped. When
/// nothing qualifies the result is `base` itself. Constraints are appended
/// in declaration order.
pub fn build_equality_conjunction<C>(
    base: C::Expr,
    filter: &dyn Properties,
    ctx: &C,
    ignore: &IgnoreList,
) -> Result<C::Expr, PredicateError>
where
    C: QueryContext + ?Sized,
{
    build_equality_conjunction_with(base, filter, ctx, ignore, &SynthesisOptions::default())
}

/// [`build_equality_conjunction`] with explicit [`SynthesisOptions`].
pub fn build_equality_conjunction_with<C>(
    base: C::Expr,
    filter: &dyn Properties,
    ctx: &C,
    ignore: &IgnoreList,
    options: &SynthesisOptions,
) -> Result<C::Expr, PredicateError>
where
    C: QueryContext + ?Sized,
{
    let mut predicate = base;
    let mut constraints = 0usize;

    for property in enumerate(filter)? {
        if property.value.is_null() || ignore.contains(property.name) {
            continue;
        }
        if options.skip_blank_strings && property.value.is_blank() {
            trace!(property = property.name, "skipping blank filter value");
            continue;
        }

        let field = ctx.field(property.name)?;
        predicate = ctx.and(predicate, ctx.equal(field, property.value));
        constraints += 1;
    }

    debug!(
        type_name = filter.shape().type_name,
        constraints, "synthesized equality conjunction"
    );
    Ok(predicate)
}

/// A [`QueryContext`] producing [`Filter`] trees for one entity.
///
/// Field names resolve against the entity's shape and map to its query
/// columns.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    entity: &'static Shape,
}

impl FilterContext {
    /// Create a context over an entity shape.
    pub fn new(entity: &'static Shape) -> Self {
        Self { entity }
    }

    /// Create a context for entity type `E`.
    pub fn for_entity<E: Properties>() -> Self {
        Self::new(E::describe())
    }

    /// The entity shape fields resolve against.
    pub fn entity(&self) -> &'static Shape {
        self.entity
    }
}

impl QueryContext for FilterContext {
    type Field = &'static str;
    type Expr = Filter;

    fn field(&self, name: &str) -> Result<Self::Field, QueryBuildError> {
        self.entity
            .get(name)
            .map(|descriptor| descriptor.column)
            .ok_or_else(|| QueryBuildError::unknown_field(self.entity.type_name, name))
    }

    fn equal(&self, field: Self::Field, value: PropertyValue) -> Self::Expr {
        Filter::Equals(field.to_string(), value)
    }

    fn and(&self, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr {
        lhs.and_then(rhs)
    }
}
