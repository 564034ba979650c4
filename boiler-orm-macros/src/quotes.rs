use quote::quote;

use crate::attr::Attr;
use crate::types::KeyKind;

/// Renders the `Entity` impl for the annotated struct. Column order is the
/// field declaration order captured by the parser, which fixes placeholder
/// numbering for every statement generated against this type.
pub fn entity_impl(attr: &Attr) -> proc_macro2::TokenStream {
    let struct_name = &attr.struct_name;
    let table_name = attr.table_name.to_string();

    let pk = attr.primary_key.as_ref().unwrap_or_else(|| {
        panic!("No primary key field found which is mandatory for the Entity derive")
    });
    let pk_name = &pk.name;
    let pk_ident = &pk.ident;

    let kind = KeyKind::classify(&pk._type).unwrap_or_else(|| {
        panic!(
            "Primary key field {pk_ident} has an unsupported type; \
             expected a string, signed integer or unsigned integer"
        )
    });
    let kind_variant = kind.variant();

    let column_names: Vec<&str> = attr.columns.iter().map(|c| c.name.as_str()).collect();
    let column_idents: Vec<&syn::Ident> = attr.columns.iter().map(|c| &c.ident).collect();

    let key_fn = match kind {
        KeyKind::Text => quote! {
            fn key(&self) -> ::boiler_orm::Key {
                ::boiler_orm::Key::Text(self.#pk_ident.clone())
            }
        },
        KeyKind::Int => quote! {
            fn key(&self) -> ::boiler_orm::Key {
                ::boiler_orm::Key::Int(self.#pk_ident as i64)
            }
        },
        KeyKind::Uint => quote! {
            fn key(&self) -> ::boiler_orm::Key {
                ::boiler_orm::Key::Uint(self.#pk_ident as u64)
            }
        },
    };

    let set_key_fn = match kind {
        KeyKind::Text => quote! {
            fn set_key(&mut self, key: ::boiler_orm::Key) -> ::std::result::Result<(), ::boiler_orm::BoilerOrmError> {
                match key {
                    ::boiler_orm::Key::Text(value) => {
                        self.#pk_ident = value;
                        Ok(())
                    }
                    other => Err(::boiler_orm::BoilerOrmError::TypeMismatch {
                        expected: ::boiler_orm::KeyKind::Text,
                        got: other.kind(),
                    }),
                }
            }
        },
        // Integer keys travel as the widest width; narrowing back into the
        // declared field can fail, which surfaces as KeyOutOfRange.
        KeyKind::Int | KeyKind::Uint => quote! {
            fn set_key(&mut self, key: ::boiler_orm::Key) -> ::std::result::Result<(), ::boiler_orm::BoilerOrmError> {
                match key {
                    ::boiler_orm::Key::#kind_variant(value) => {
                        self.#pk_ident = ::std::convert::TryFrom::try_from(value)
                            .map_err(|_| ::boiler_orm::BoilerOrmError::KeyOutOfRange(value.to_string()))?;
                        Ok(())
                    }
                    other => Err(::boiler_orm::BoilerOrmError::TypeMismatch {
                        expected: ::boiler_orm::KeyKind::#kind_variant,
                        got: other.kind(),
                    }),
                }
            }
        },
    };

    quote! {
        impl ::boiler_orm::Entity for #struct_name {
            fn meta() -> ::boiler_orm::EntityMeta {
                ::boiler_orm::EntityMeta {
                    table_name: #table_name,
                    primary_key: #pk_name,
                }
            }

            fn key_kind() -> ::boiler_orm::KeyKind {
                ::boiler_orm::KeyKind::#kind_variant
            }

            fn columns() -> &'static [&'static str] {
                &[#(#column_names),*]
            }

            #key_fn

            #set_key_fn

            fn bind_columns<'q>(&'q self, query: ::boiler_orm::DbQuery<'q>) -> ::boiler_orm::DbQuery<'q> {
                #(
                    let query = query.bind(&self.#column_idents);
                )*
                query
            }

            fn read_columns(&mut self, row: &::boiler_orm::DbRow) -> ::std::result::Result<(), ::sqlx::Error> {
                #(
                    self.#column_idents = ::sqlx::Row::try_get(row, #column_names)?;
                )*
                Ok(())
            }
        }
    }
}
