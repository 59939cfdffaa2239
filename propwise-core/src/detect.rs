//! Detection of absent properties.

use tracing::debug;

use crate::enumerate::enumerate;
use crate::error::IntrospectionError;
use crate::ignore::{EmptyNames, IgnoreList};
use crate::shape::Properties;

/// Names of the properties of `instance` whose value is absent.
///
/// Only [`PropertyValue::Null`](crate::PropertyValue::Null) counts as
/// absent here; an empty string is a value. Names in `ignore` are never
/// reported.
///
/// ```rust
/// use propwise_core::{IgnoreList, find_empty_properties};
/// use propwise_derive::Properties;
///
/// #[derive(Properties)]
/// #[props(crate = "propwise_core")]
/// struct User {
///     name: Option<String>,
///     age: Option<i32>,
/// }
///
/// let source = User { name: Some("Alice".into()), age: None };
/// let empty = find_empty_properties(&source, &IgnoreList::none())?;
/// assert!(empty.contains("age"));
/// assert!(!empty.contains("name"));
/// # Ok::<(), propwise_core::IntrospectionError>(())
/// ```
pub fn find_empty_properties(
    instance: &dyn Properties,
    ignore: &IgnoreList,
) -> Result<EmptyNames, IntrospectionError> {
    let mut empty = EmptyNames::default();
    for property in enumerate(instance)? {
        if property.value.is_null() && !ignore.contains(property.name) {
            empty.insert(property.name);
        }
    }

    debug!(
        type_name = instance.shape().type_name,
        empty = empty.len(),
        "detected empty properties"
    );
    Ok(empty)
}
