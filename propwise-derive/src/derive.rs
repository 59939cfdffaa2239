//! Implementation of the `#[derive(Properties)]` macro.

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Type};

/// Parse and generate code for the `#[derive(Properties)]` macro.
pub fn derive_properties_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let type_name = name.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Properties derive does not support generic structs",
        ));
    }

    let struct_attrs = parse_struct_attrs(input)?;
    let krate = &struct_attrs.krate;

    // Unit structs register an empty shape
    let fields: Vec<FieldInfo> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields
                .named
                .iter()
                .map(|f| parse_field(f, struct_attrs.rename_all))
                .filter_map(Result::transpose)
                .collect::<Result<_, _>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Properties derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Properties derive only supports structs",
            ));
        }
    };

    check_unique_names(&fields)?;

    let descriptors = fields.iter().map(|f| {
        let ty = &f.ty;
        let prop = &f.property;
        let column = &f.column;
        let read_only = f.readonly.then(|| quote! { .read_only() });
        quote! {
            #krate::PropertyDescriptor::of::<#ty>(#prop).column(#column) #read_only
        }
    });

    let get_arms = fields.iter().map(|f| {
        let ident = &f.ident;
        let prop = &f.property;
        quote! {
            #prop => ::core::option::Option::Some(#krate::PropertyType::to_value(&self.#ident)),
        }
    });

    let set_arms = fields.iter().map(|f| {
        let ident = &f.ident;
        let ty = &f.ty;
        let prop = &f.property;
        if f.readonly {
            quote! {
                #prop => ::core::result::Result::Err(#krate::SetError::ReadOnly {
                    type_name: #type_name,
                    property: #prop,
                }),
            }
        } else {
            quote! {
                #prop => {
                    self.#ident = <#ty as #krate::PropertyType>::from_value(value).map_err(
                        |source| #krate::SetError::Conversion {
                            type_name: #type_name,
                            property: #prop,
                            source,
                        },
                    )?;
                    ::core::result::Result::Ok(())
                }
            }
        }
    });

    Ok(quote! {
        impl #krate::Properties for #name {
            fn describe() -> &'static #krate::Shape {
                static SHAPE: #krate::Shape = #krate::Shape::new(#type_name, &[
                    #(#descriptors,)*
                ]);
                &SHAPE
            }

            fn shape(&self) -> &'static #krate::Shape {
                <Self as #krate::Properties>::describe()
            }

            fn get(&self, name: &str) -> ::core::option::Option<#krate::PropertyValue> {
                match name {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set(
                &mut self,
                name: &str,
                value: #krate::PropertyValue,
            ) -> ::core::result::Result<(), #krate::SetError> {
                match name {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(#krate::SetError::UnknownProperty {
                        type_name: #type_name,
                        property: ::std::string::ToString::to_string(name),
                    }),
                }
            }
        }
    })
}

/// Struct-level attributes parsed from `#[props(...)]`.
#[derive(Debug)]
struct StructAttrs {
    krate: Path,
    rename_all: Option<Case>,
}

/// Parse struct-level `#[props(...)]` attributes.
fn parse_struct_attrs(input: &DeriveInput) -> Result<StructAttrs, syn::Error> {
    let mut attrs = StructAttrs {
        krate: syn::parse_quote!(::propwise),
        rename_all: None,
    };

    for attr in &input.attrs {
        if !attr.path().is_ident("props") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.krate = value.parse()?;
            } else if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.rename_all = Some(parse_case(&value)?);
            } else {
                return Err(meta.error("unknown struct attribute"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

fn parse_case(value: &LitStr) -> Result<Case, syn::Error> {
    match value.value().as_str() {
        "camelCase" => Ok(Case::Camel),
        "PascalCase" => Ok(Case::Pascal),
        "snake_case" => Ok(Case::Snake),
        "kebab-case" => Ok(Case::Kebab),
        "SCREAMING_SNAKE_CASE" => Ok(Case::ScreamingSnake),
        other => Err(syn::Error::new_spanned(
            value,
            format!("unsupported rename_all case `{}`", other),
        )),
    }
}

/// Information about a property field.
#[derive(Debug)]
struct FieldInfo {
    ident: Ident,
    ty: Type,
    property: String,
    column: String,
    readonly: bool,
}

/// Parse a field and its `#[props(...)]` attributes. Skipped fields yield `None`.
fn parse_field(
    field: &syn::Field,
    rename_all: Option<Case>,
) -> Result<Option<FieldInfo>, syn::Error> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Fields must be named"))?;

    let base = ident.unraw().to_string();
    let mut property = match rename_all {
        Some(case) => base.to_case(case),
        None => base,
    };
    let mut column = None;
    let mut readonly = false;
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("props") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
            } else if meta.path.is_ident("readonly") {
                readonly = true;
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                property = value.value();
            } else if meta.path.is_ident("column") {
                let value: LitStr = meta.value()?.parse()?;
                column = Some(value.value());
            } else {
                return Err(meta.error("unknown field attribute"));
            }
            Ok(())
        })?;
    }

    if skip {
        return Ok(None);
    }

    Ok(Some(FieldInfo {
        ident,
        ty: field.ty.clone(),
        column: column.unwrap_or_else(|| property.clone()),
        property,
        readonly,
    }))
}

/// Reject two fields mapping to the same property name or query column.
fn check_unique_names(fields: &[FieldInfo]) -> Result<(), syn::Error> {
    for (i, field) in fields.iter().enumerate() {
        let earlier = &fields[..i];
        if earlier.iter().any(|f| f.property == field.property) {
            return Err(syn::Error::new_spanned(
                &field.ident,
                format!("duplicate property name `{}`", field.property),
            ));
        }
        if earlier.iter().any(|f| f.column == field.column) {
            return Err(syn::Error::new_spanned(
                &field.ident,
                format!("duplicate column `{}`", field.column),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        derive_properties_impl(&input).unwrap().to_string()
    }

    #[test]
    fn test_simple_struct() {
        let code = expand(parse_quote! {
            struct User {
                name: Option<String>,
                age: Option<i32>,
            }
        });

        assert!(code.contains("impl :: propwise :: Properties for User"));
        assert!(code.contains("static SHAPE"));
        assert!(code.contains("\"name\""));
        assert!(code.contains("\"age\""));
    }

    #[test]
    fn test_rename_all_and_column() {
        let code = expand(parse_quote! {
            #[props(rename_all = "camelCase")]
            struct OrderQuery {
                #[props(column = "owner")]
                owner_id: Option<i64>,
                created_on: Option<String>,
            }
        });

        assert!(code.contains("\"ownerId\""));
        assert!(code.contains("\"owner\""));
        assert!(code.contains("\"createdOn\""));
        assert!(!code.contains("\"owner_id\""));
    }

    #[test]
    fn test_skip_and_readonly() {
        let code = expand(parse_quote! {
            struct Entity {
                #[props(readonly)]
                id: i64,
                #[props(skip)]
                cache: Vec<u8>,
            }
        });

        assert!(code.contains("read_only"));
        assert!(code.contains("ReadOnly"));
        assert!(!code.contains("cache"));
    }

    #[test]
    fn test_custom_crate_path() {
        let code = expand(parse_quote! {
            #[props(crate = "propwise_core")]
            struct Tag {
                label: String,
            }
        });

        assert!(code.contains("impl propwise_core :: Properties for Tag"));
    }

    #[test]
    fn test_raw_identifier() {
        let code = expand(parse_quote! {
            struct Item {
                r#type: String,
            }
        });

        assert!(code.contains("\"type\""));
    }

    #[test]
    fn test_unit_struct_has_empty_shape() {
        let input: DeriveInput = parse_quote! {
            struct Marker;
        };
        assert!(derive_properties_impl(&input).is_ok());
    }

    #[test]
    fn test_rejects_tuple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Pair(i32, i32);
        };
        assert!(derive_properties_impl(&input).is_err());
    }

    #[test]
    fn test_rejects_enum() {
        let input: DeriveInput = parse_quote! {
            enum Status { Active, Closed }
        };
        assert!(derive_properties_impl(&input).is_err());
    }

    #[test]
    fn test_rejects_generics() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> { inner: T }
        };
        assert!(derive_properties_impl(&input).is_err());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let input: DeriveInput = parse_quote! {
            struct Clash {
                #[props(rename = "b")]
                a: String,
                b: String,
            }
        };
        let err = derive_properties_impl(&input).unwrap_err();
        assert!(err.to_string().contains("duplicate property name `b`"));
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let input: DeriveInput = parse_quote! {
            struct Order {
                #[props(column = "owner")]
                owner_id: i64,
                owner: String,
            }
        };
        let err = derive_properties_impl(&input).unwrap_err();
        assert!(err.to_string().contains("duplicate column `owner`"));
    }

    #[test]
    fn test_skipped_field_does_not_clash() {
        let input: DeriveInput = parse_quote! {
            struct Order {
                #[props(column = "owner")]
                owner_id: i64,
                #[props(skip)]
                owner: String,
            }
        };
        assert!(derive_properties_impl(&input).is_ok());
    }

    #[test]
    fn test_rejects_unknown_attribute() {
        let input: DeriveInput = parse_quote! {
            struct Odd {
                #[props(flatten)]
                a: String,
            }
        };
        assert!(derive_properties_impl(&input).is_err());
    }

    #[test]
    fn test_rejects_unknown_case() {
        let input: DeriveInput = parse_quote! {
            #[props(rename_all = "Train-Case")]
            struct Odd {
                a: String,
            }
        };
        assert!(derive_properties_impl(&input).is_err());
    }
}
