//! Property enumeration, the traversal every other operation builds on.

use tracing::trace;

use crate::error::IntrospectionError;
use crate::shape::Properties;
use crate::value::PropertyValue;

/// One enumerated property of an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name.
    pub name: &'static str,
    /// Value at enumeration time.
    pub value: PropertyValue,
    /// Whether the property can be written.
    pub writable: bool,
}

/// Enumerate the properties of an instance in declaration order.
///
/// Fails if the type declares no properties, or if its shape names a
/// property that [`Properties::get`] does not serve.
pub fn enumerate(instance: &dyn Properties) -> Result<Vec<Property>, IntrospectionError> {
    let shape = instance.shape();
    if shape.is_empty() {
        return Err(IntrospectionError::NoProperties {
            type_name: shape.type_name,
        });
    }

    let properties = shape
        .properties
        .iter()
        .map(|descriptor| {
            let value =
                instance
                    .get(descriptor.name)
                    .ok_or(IntrospectionError::Unreadable {
                        type_name: shape.type_name,
                        property: descriptor.name,
                    })?;
            Ok(Property {
                name: descriptor.name,
                value,
                writable: descriptor.writable,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    trace!(
        type_name = shape.type_name,
        count = properties.len(),
        "enumerated properties"
    );
    Ok(properties)
}
