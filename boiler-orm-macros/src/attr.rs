use syn::{
    punctuated::Punctuated, Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit,
    LitStr, Meta, Token,
};

use crate::types::{Column, PrimaryKey, TableName};

const NAME_MACRO_ARG: &str = "boiler_orm";

/// Everything the derive needs, parsed out of the struct definition: table
/// name, primary key field, and the non-key columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub struct_name: Ident,
    pub table_name: TableName,
    pub primary_key: Option<PrimaryKey>,
    pub columns: Vec<Column>,
}

impl Attr {
    pub fn parse(input: DeriveInput) -> Self {
        let struct_name = input.ident;
        let table_name = Parser::parse_struct_macro_arguments(&struct_name, &input.attrs);
        let (primary_key, columns) = Parser::parse_fields_macro_arguments(input.data);

        Attr {
            struct_name,
            table_name,
            primary_key,
            columns,
        }
    }
}

struct Parser();

impl Parser {
    fn parse_struct_macro_arguments(struct_name: &Ident, attrs: &[Attribute]) -> TableName {
        let mut table_name: Option<String> = None;

        for attr in attrs {
            if attr.path().is_ident(NAME_MACRO_ARG) {
                let nested = attr
                    .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
                    .unwrap();
                for meta in nested {
                    match meta {
                        Meta::NameValue(name_value) if name_value.path.is_ident("table_name") => {
                            if let Expr::Lit(ExprLit {
                                lit: Lit::Str(lit_str),
                                ..
                            }) = name_value.value
                            {
                                table_name = Some(lit_str.value().trim().to_string());
                            };
                        }
                        _ => {
                            panic!("Error - Skip unknown name value");
                        }
                    }
                }
            }
        }

        TableName::new(table_name.unwrap_or_else(|| struct_name.to_string()))
    }

    fn parse_fields_macro_arguments(data: Data) -> (Option<PrimaryKey>, Vec<Column>) {
        let mut primary_key: Option<PrimaryKey> = None;
        let mut columns = Vec::new();

        match data {
            Data::Struct(data_struct) => match &data_struct.fields {
                Fields::Named(fields) => {
                    for field in fields.named.iter() {
                        let ident = field
                            .ident
                            .clone()
                            .expect("Field ident is expected to get its name");
                        let mut column =
                            Column::new(&ident.to_string(), ident, field.ty.clone());

                        for attr in &field.attrs {
                            if attr.path().is_ident(NAME_MACRO_ARG) {
                                attr.parse_nested_meta(|meta| {
                                    if meta.path.is_ident("primary_key") {
                                        column.set_primary_key();
                                    } else if meta.path.is_ident("skip") {
                                        column.set_skip();
                                    } else if meta.path.is_ident("column") {
                                        let lit: LitStr = meta.value()?.parse()?;
                                        column.rename(&lit.value());
                                    }
                                    Ok(())
                                })
                                .unwrap_or(());
                            }
                        }

                        if column.primary_key && column.skip {
                            panic!(
                                "Field {} cannot be both primary_key and skip",
                                column.ident
                            );
                        }

                        columns.push(column);
                    }
                }
                _ => panic!("Only named fields are supported"),
            },
            _ => panic!("Only structs are supported"),
        };

        // An explicit primary_key attribute wins; otherwise a field named
        // "id" is the default.
        let explicit = columns.iter().position(|column| column.primary_key);
        let pk_position = explicit.or_else(|| {
            columns
                .iter()
                .position(|column| !column.skip && column.name == "id")
        });

        if let Some(position) = pk_position {
            let mut pk = columns.remove(position);
            pk.set_primary_key();
            primary_key = Some(pk);
        }

        let columns = columns.into_iter().filter(|column| !column.skip).collect();

        (primary_key, columns)
    }
}
