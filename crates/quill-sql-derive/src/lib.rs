//! Derive macros for mapping structs to table rows.
//!
//! This crate provides the `#[derive(Tuple)]` macro, which maps the named
//! fields of a struct to column names so the struct can be inserted from and
//! read back into.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta};

/// Derives `quill_sql_core::schema::Tuple` for a struct with named fields.
///
/// The struct must implement `Default`. Every mapped field must implement
/// `Clone`, `ToSqlValue` and `FromSqlValue`; use `Option<T>` for columns
/// that may hold NULL.
///
/// # Field Attributes
///
/// - `#[column(name = "Name")]` - Maps the field to the given column name
///   (optional, defaults to the field name)
/// - `#[column(skip)]` - Leaves the field out of the mapping
///
/// # Generated Items
///
/// For a struct `Person`, this macro generates an
/// `impl quill_sql_core::schema::Tuple for Person` whose `COLUMNS` lists the
/// mapped column names in field order.
#[proc_macro_derive(Tuple, attributes(column))]
pub fn derive_tuple(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_tuple_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_tuple_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Tuple derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Tuple derive only supports structs",
            ));
        }
    };

    let mut mapped: Vec<MappedField> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.clone() else {
            continue;
        };
        let attrs = parse_column_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let column_name = attrs.name.unwrap_or_else(|| field_name.to_string());
        if let Some(previous) = mapped.iter().find(|m| m.column_name == column_name) {
            return Err(syn::Error::new_spanned(
                field,
                format!(
                    "column `{column_name}` is already mapped by field `{}`",
                    previous.field_name
                ),
            ));
        }
        mapped.push(MappedField {
            field_name,
            column_name,
        });
    }

    let column_names: Vec<&str> = mapped.iter().map(|m| m.column_name.as_str()).collect();

    let value_arms: Vec<TokenStream2> = mapped
        .iter()
        .map(|m| {
            let field_name = &m.field_name;
            let column_name = &m.column_name;
            quote! {
                #column_name => ::core::option::Option::Some(
                    ::quill_sql_core::builder::ToSqlValue::to_sql_value(
                        ::core::clone::Clone::clone(&self.#field_name),
                    ),
                ),
            }
        })
        .collect();

    let assign_arms: Vec<TokenStream2> = mapped
        .iter()
        .map(|m| {
            let field_name = &m.field_name;
            let column_name = &m.column_name;
            quote! {
                #column_name => {
                    self.#field_name =
                        ::quill_sql_core::builder::FromSqlValue::from_sql_value(value)?;
                    true
                }
            }
        })
        .collect();

    let expanded = quote! {
        impl #impl_generics ::quill_sql_core::schema::Tuple for #struct_name #ty_generics #where_clause {
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];

            fn value_of(
                &self,
                column: &str,
            ) -> ::core::option::Option<::quill_sql_core::builder::SqlValue> {
                match column {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                column: &str,
                value: ::quill_sql_core::builder::SqlValue,
            ) -> ::core::result::Result<bool, ::quill_sql_core::builder::ValueError> {
                let assigned = match column {
                    #(#assign_arms)*
                    _ => false,
                };
                ::core::result::Result::Ok(assigned)
            }
        }
    };

    Ok(expanded)
}

struct MappedField {
    field_name: Ident,
    column_name: String,
}

#[derive(Default)]
struct ColumnAttrs {
    name: Option<String>,
    skip: bool,
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("column") {
            // Handle empty attribute like #[column]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    let value: Expr = meta.value()?.parse()?;
                    match value {
                        Expr::Lit(lit) => match lit.lit {
                            Lit::Str(s) => result.name = Some(s.value()),
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "column name must be a string literal",
                                ));
                            }
                        },
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "column name must be a string literal",
                            ));
                        }
                    }
                } else {
                    return Err(meta.error("unsupported column attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}
