//! Per-type property registration.
//!
//! A [`Shape`] lists the declared properties of a type in declaration
//! order. Shapes are built once per type, normally as a `static` emitted by
//! `#[derive(Properties)]`, so enumeration never re-derives metadata.
//!
//! Types can also register themselves by hand:
//!
//! ```rust
//! use propwise_core::{Properties, PropertyDescriptor, PropertyType, PropertyValue, SetError, Shape};
//!
//! #[derive(Default)]
//! struct Tag {
//!     label: Option<String>,
//! }
//!
//! static TAG: Shape = Shape::new("Tag", &[PropertyDescriptor::of::<Option<String>>("label")]);
//!
//! impl Properties for Tag {
//!     fn describe() -> &'static Shape {
//!         &TAG
//!     }
//!
//!     fn shape(&self) -> &'static Shape {
//!         &TAG
//!     }
//!
//!     fn get(&self, name: &str) -> Option<PropertyValue> {
//!         match name {
//!             "label" => Some(self.label.to_value()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set(&mut self, name: &str, value: PropertyValue) -> Result<(), SetError> {
//!         match name {
//!             "label" => {
//!                 self.label = PropertyType::from_value(value).map_err(|source| {
//!                     SetError::Conversion { type_name: "Tag", property: "label", source }
//!                 })?;
//!                 Ok(())
//!             }
//!             _ => Err(SetError::UnknownProperty {
//!                 type_name: "Tag",
//!                 property: name.to_string(),
//!             }),
//!         }
//!     }
//! }
//!
//! assert_eq!(Tag::describe().names().collect::<Vec<_>>(), ["label"]);
//! ```

use crate::error::SetError;
use crate::value::{ConversionError, PropertyType, PropertyValue, ValueKind};

/// Metadata for one declared property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: &'static str,
    /// Column or field name used by query contexts.
    pub column: &'static str,
    /// Kind of non-null values.
    pub kind: ValueKind,
    /// Whether the property can hold null.
    pub nullable: bool,
    /// Whether the copier may write the property.
    pub writable: bool,
    /// Checks that a value would be accepted by the property's type.
    pub validate: fn(&PropertyValue) -> Result<(), ConversionError>,
}

impl PropertyDescriptor {
    /// Describe a property of Rust type `T`.
    pub const fn of<T: PropertyType>(name: &'static str) -> Self {
        Self {
            name,
            column: name,
            kind: T::KIND,
            nullable: T::NULLABLE,
            writable: true,
            validate: T::validate,
        }
    }

    /// Map the property to a different query column.
    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = column;
        self
    }

    /// Exclude the property from writes.
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Check a value against this property's type.
    pub fn accepts(&self, value: &PropertyValue) -> Result<(), ConversionError> {
        (self.validate)(value)
    }
}

/// The declared properties of a type.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    /// Rust type name.
    pub type_name: &'static str,
    /// Properties in declaration order.
    pub properties: &'static [PropertyDescriptor],
}

impl Shape {
    /// Create a shape.
    pub const fn new(type_name: &'static str, properties: &'static [PropertyDescriptor]) -> Self {
        Self {
            type_name,
            properties,
        }
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a property by its query column.
    pub fn by_column(&self, column: &str) -> Option<&'static PropertyDescriptor> {
        self.properties.iter().find(|p| p.column == column)
    }

    /// Check whether a property is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.properties.iter().map(|p| p.name)
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if no property is declared.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// An object whose properties can be enumerated, read and written.
///
/// The trait is object safe; every operation in this crate accepts
/// `&dyn Properties` for the side it only reads.
pub trait Properties {
    /// The shape of the implementing type.
    fn describe() -> &'static Shape
    where
        Self: Sized;

    /// The shape of this instance.
    fn shape(&self) -> &'static Shape;

    /// Read a property, or `None` if the name is not declared.
    fn get(&self, name: &str) -> Option<PropertyValue>;

    /// Write a property.
    fn set(&mut self, name: &str, value: PropertyValue) -> Result<(), SetError>;
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_shape_preserves_declaration_order() {
        let names: Vec<_> = Contact::describe().names().collect();
        assert_eq!(names, ["name", "age", "city"]);
    }

    #[test]
    fn test_descriptor_metadata() {
        let shape = OrderFilter::describe();
        let owner = shape.get("owner_id").unwrap();
        assert_eq!(owner.column, "owner");
        assert_eq!(owner.kind, ValueKind::Int);
        assert!(owner.nullable);
        assert!(shape.by_column("owner").is_some());
        assert!(!shape.contains("owner"));

        let id = Audited::describe().get("id").unwrap();
        assert!(!id.writable);
        assert!(!id.nullable);
    }

    #[test]
    fn test_descriptor_accepts() {
        let age = Strict::describe().get("age").unwrap();
        assert!(age.accepts(&PropertyValue::Int(30)).is_ok());
        assert!(age.accepts(&PropertyValue::Null).is_err());
        assert!(age.accepts(&PropertyValue::Int(i64::MAX)).is_err());
    }

    #[test]
    fn test_get_and_set() {
        let mut person = Person::default();
        person.set("name", "Alice".into()).unwrap();
        assert_eq!(person.get("name"), Some(PropertyValue::String("Alice".into())));
        assert_eq!(person.get("missing"), None);
        assert!(matches!(
            person.set("age", "thirty".into()),
            Err(SetError::Conversion { property: "age", .. })
        ));
    }
}
