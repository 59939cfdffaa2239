//! Object-to-map conversion.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::enumerate::enumerate;
use crate::error::IntrospectionError;
use crate::shape::Properties;
use crate::value::PropertyValue;

/// Collect the properties of `instance` into an ordered map.
pub fn to_map(
    instance: &dyn Properties,
) -> Result<IndexMap<&'static str, PropertyValue>, IntrospectionError> {
    Ok(enumerate(instance)?
        .into_iter()
        .map(|property| (property.name, property.value))
        .collect())
}

/// Collect the properties of `instance` into a JSON object.
///
/// Absent values become `null`; UUIDs and dates are rendered as strings.
pub fn to_json(instance: &dyn Properties) -> Result<Map<String, Value>, IntrospectionError> {
    Ok(enumerate(instance)?
        .into_iter()
        .map(|property| (property.name.to_string(), property.value.to_json()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::fixtures::*;
    use serde_json::json;

    #[test]
    fn test_to_map_keeps_order_and_nulls() {
        let person = Person {
            name: Some("Alice".into()),
            age: None,
        };
        let map = to_map(&person).unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["name", "age"]);
        assert_eq!(map["age"], PropertyValue::Null);
    }

    #[test]
    fn test_to_json() {
        let order = Order {
            id: 9,
            status: "ACTIVE".into(),
            region: "EU".into(),
            owner_id: 3,
        };
        let object = to_json(&order).unwrap();
        assert_eq!(
            Value::Object(object),
            json!({"id": 9, "status": "ACTIVE", "region": "EU", "owner_id": 3})
        );
    }

    #[test]
    fn test_opaque_instance_fails() {
        assert!(to_map(&Opaque).is_err());
        assert!(to_json(&Opaque).is_err());
    }
}
