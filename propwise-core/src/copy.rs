//! Selective property copy.
//!
//! [`copy_into`] merges a source instance onto a destination: every
//! property the two shapes share is assigned unless it is ignored or
//! read-only on the destination. Properties the destination does not share
//! keep their values.
//!
//! Before anything is written, every pending assignment is checked against
//! the destination's property type. With [`MismatchPolicy::Abort`] the first
//! incompatible property fails the call and the destination is left exactly
//! as it was. With [`MismatchPolicy::Skip`] incompatible properties are
//! dropped and the rest are copied.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detect::find_empty_properties;
use crate::enumerate::enumerate;
use crate::error::CopyError;
use crate::ignore::IgnoreList;
use crate::shape::Properties;
use crate::value::PropertyValue;

/// What to do with a shared property whose value the destination rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Fail the whole copy without writing anything.
    #[default]
    Abort,
    /// Leave the property untouched and continue.
    Skip,
}

/// Options for [`copy_into_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Handling of incompatible values.
    pub on_mismatch: MismatchPolicy,
}

impl CopyOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mismatch policy.
    pub fn on_mismatch(mut self, policy: MismatchPolicy) -> Self {
        self.on_mismatch = policy;
        self
    }
}

/// Copy shared properties from `source` onto `destination`.
///
/// Names in `ignore` are skipped whatever their source value. Returns the
/// destination for chaining.
pub fn copy_into<'d, D>(
    source: &dyn Properties,
    destination: &'d mut D,
    ignore: &IgnoreList,
) -> Result<&'d mut D, CopyError>
where
    D: Properties + ?Sized,
{
    copy_into_with(source, destination, ignore, &CopyOptions::default())
}

/// Copy shared properties with explicit [`CopyOptions`].
pub fn copy_into_with<'d, D>(
    source: &dyn Properties,
    destination: &'d mut D,
    ignore: &IgnoreList,
    options: &CopyOptions,
) -> Result<&'d mut D, CopyError>
where
    D: Properties + ?Sized,
{
    let target = destination.shape();
    let mut writes: Vec<(&'static str, PropertyValue)> = Vec::new();

    for property in enumerate(source)? {
        if ignore.contains(property.name) {
            continue;
        }
        let Some(descriptor) = target.get(property.name) else {
            continue;
        };
        if !descriptor.writable {
            continue;
        }

        if let Err(err) = descriptor.accepts(&property.value) {
            match options.on_mismatch {
                MismatchPolicy::Abort => {
                    return Err(CopyError::Incompatible {
                        type_name: target.type_name,
                        property: descriptor.name,
                        source: err,
                    });
                }
                MismatchPolicy::Skip => {
                    debug!(
                        type_name = target.type_name,
                        property = descriptor.name,
                        error = %err,
                        "skipping incompatible property"
                    );
                    continue;
                }
            }
        }

        writes.push((descriptor.name, property.value));
    }

    let written = writes.len();
    for (name, value) in writes {
        destination.set(name, value)?;
    }

    debug!(
        source = source.shape().type_name,
        destination = target.type_name,
        written,
        "copied properties"
    );
    Ok(destination)
}

/// Copy only the properties that are present on `source`.
///
/// Runs [`find_empty_properties`] on the source and ignores its result
/// together with `extra`, so absent source values never overwrite the
/// destination.
pub fn copy_non_null<'d, D>(
    source: &dyn Properties,
    destination: &'d mut D,
    extra: &IgnoreList,
) -> Result<&'d mut D, CopyError>
where
    D: Properties + ?Sized,
{
    let ignore = find_empty_properties(source, &IgnoreList::none())?.into_ignore_list(extra);
    copy_into(source, destination, &ignore)
}

/// Copy `source` into a freshly defaulted `T`.
///
/// This is the usual entity-to-DTO mapping step.
pub fn copy_to_new<T>(source: &dyn Properties, ignore: &IgnoreList) -> Result<T, CopyError>
where
    T: Properties + Default,
{
    let mut target = T::default();
    copy_into(source, &mut target, ignore)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetError;
    use crate::shape::fixtures::*;
    use crate::value::ConversionError;
    use pretty_assertions::assert_eq;

    fn bob() -> Contact {
        Contact {
            name: Some("Bob".into()),
            age: Some(30),
            city: Some("NYC".into()),
        }
    }

    #[test]
    fn test_merge_skips_detected_empty_properties() {
        let source = Person {
            name: Some("Alice".into()),
            age: None,
        };
        let mut destination = bob();

        let ignore: IgnoreList = find_empty_properties(&source, &IgnoreList::none())
            .unwrap()
            .into();
        assert_eq!(ignore, IgnoreList::from(["age"]));

        copy_into(&source, &mut destination, &ignore).unwrap();
        assert_eq!(
            destination,
            Contact {
                name: Some("Alice".into()),
                age: Some(30),
                city: Some("NYC".into()),
            }
        );
    }

    #[test]
    fn test_copy_without_ignore_overwrites_with_null() {
        let source = Person {
            name: Some("Alice".into()),
            age: None,
        };
        let mut destination = bob();
        copy_into(&source, &mut destination, &IgnoreList::none()).unwrap();
        assert_eq!(destination.age, None);
        assert_eq!(destination.city.as_deref(), Some("NYC"));
    }

    #[test]
    fn test_copy_non_null() {
        let source = Person {
            name: None,
            age: Some(41),
        };
        let mut destination = bob();
        copy_non_null(&source, &mut destination, &IgnoreList::none()).unwrap();
        assert_eq!(destination.name.as_deref(), Some("Bob"));
        assert_eq!(destination.age, Some(41));
    }

    #[test]
    fn test_copy_non_null_with_extra_ignore() {
        let source = Person {
            name: Some("Carol".into()),
            age: Some(41),
        };
        let mut destination = bob();
        copy_non_null(&source, &mut destination, &IgnoreList::from(["name"])).unwrap();
        assert_eq!(destination.name.as_deref(), Some("Bob"));
        assert_eq!(destination.age, Some(41));
    }

    #[test]
    fn test_ignored_properties_keep_destination_value() {
        let source = Contact {
            name: Some("Zed".into()),
            age: Some(99),
            city: Some("Oslo".into()),
        };
        let mut destination = bob();
        let ignore = IgnoreList::from(["age", "city"]);
        copy_into(&source, &mut destination, &ignore).unwrap();
        assert_eq!(destination.age, Some(30));
        assert_eq!(destination.city.as_deref(), Some("NYC"));
        assert_eq!(destination.name.as_deref(), Some("Zed"));
    }

    #[test]
    fn test_copy_is_idempotent() {
        let source = Person {
            name: Some("Alice".into()),
            age: None,
        };
        let ignore = IgnoreList::from(["age"]);
        let mut destination = bob();

        copy_into(&source, &mut destination, &ignore).unwrap();
        let once = destination.clone();
        copy_into(&source, &mut destination, &ignore).unwrap();
        assert_eq!(destination, once);
    }

    #[test]
    fn test_mismatch_aborts_without_writing() {
        let source = Loose {
            name: Some("Alice".into()),
            age: Some("thirty".into()),
        };
        let mut destination = Person {
            name: Some("Bob".into()),
            age: Some(30),
        };

        let err = copy_into(&source, &mut destination, &IgnoreList::none()).unwrap_err();
        assert!(matches!(
            err,
            CopyError::Incompatible {
                type_name: "Person",
                property: "age",
                source: ConversionError::Mismatch { .. },
            }
        ));
        assert_eq!(err.property(), Some("age"));
        assert_eq!(destination.name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_mismatch_skip_policy() {
        let source = Loose {
            name: Some("Alice".into()),
            age: Some("thirty".into()),
        };
        let mut destination = Person {
            name: Some("Bob".into()),
            age: Some(30),
        };

        let options = CopyOptions::new().on_mismatch(MismatchPolicy::Skip);
        copy_into_with(&source, &mut destination, &IgnoreList::none(), &options).unwrap();
        assert_eq!(destination.name.as_deref(), Some("Alice"));
        assert_eq!(destination.age, Some(30));
    }

    #[test]
    fn test_null_into_required_property() {
        let source = Person {
            name: Some("Alice".into()),
            age: None,
        };
        let mut destination = Strict {
            name: "Bob".into(),
            age: 30,
        };

        let err = copy_into(&source, &mut destination, &IgnoreList::none()).unwrap_err();
        assert!(matches!(
            err,
            CopyError::Incompatible {
                source: ConversionError::Null { .. },
                ..
            }
        ));
        assert_eq!(destination.name, "Bob");

        copy_non_null(&source, &mut destination, &IgnoreList::none()).unwrap();
        assert_eq!(destination.name, "Alice");
        assert_eq!(destination.age, 30);
    }

    #[test]
    fn test_read_only_destination_property_is_skipped() {
        let source = Order {
            id: 7,
            status: "ACTIVE".into(),
            ..Order::default()
        };
        let mut destination = Audited {
            id: 1,
            name: Some("kept".into()),
        };
        copy_into(&source, &mut destination, &IgnoreList::none()).unwrap();
        assert_eq!(destination.id, 1);
        assert_eq!(destination.name.as_deref(), Some("kept"));
    }

    #[test]
    fn test_copy_to_new() {
        let source = bob();
        let dto: Person = copy_to_new(&source, &IgnoreList::none()).unwrap();
        assert_eq!(
            dto,
            Person {
                name: Some("Bob".into()),
                age: Some(30),
            }
        );
    }

    #[test]
    fn test_opaque_source_fails() {
        let mut destination = bob();
        let err = copy_into(&Opaque, &mut destination, &IgnoreList::none()).unwrap_err();
        assert!(matches!(err, CopyError::Introspection(_)));
        assert_eq!(destination, bob());
    }

    #[test]
    fn test_copy_into_trait_object() {
        let source = bob();
        let mut destination = Person::default();
        let target: &mut dyn Properties = &mut destination;
        copy_into(&source, target, &IgnoreList::none()).unwrap();
        assert_eq!(destination.age, Some(30));
    }

    #[test]
    fn test_write_error_surfaces() {
        let err: CopyError = SetError::UnknownProperty {
            type_name: "Person",
            property: "nope".into(),
        }
        .into();
        assert_eq!(err.property(), Some("nope"));
    }
}
