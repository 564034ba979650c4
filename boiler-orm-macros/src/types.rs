use convert_case::{Case, Casing};
use quote::format_ident;
use std::fmt;
use syn::{Ident, Type};

/// One struct field as seen by the derive: the column name it maps to (the
/// field name unless renamed) and the flags parsed from its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ident: Ident,
    pub _type: Type,
    pub primary_key: bool,
    pub skip: bool,
}

impl Column {
    pub fn new(name: &str, ident: Ident, _type: Type) -> Self {
        Self {
            name: name.to_string(),
            ident,
            _type,
            primary_key: false,
            skip: false,
        }
    }

    pub fn set_primary_key(&mut self) {
        self.primary_key = true;
    }

    pub fn set_skip(&mut self) {
        self.skip = true;
    }

    pub fn rename(&mut self, column_name: &str) {
        self.name = column_name.trim().to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(pub String);

impl TableName {
    pub fn new(input: String) -> Self {
        Self(input.to_case(Case::Snake))
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary key representation, classified from the field's declared type.
/// Only string and integer keys participate; anything else is rejected at
/// macro-expansion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text,
    Int,
    Uint,
}

impl KeyKind {
    pub fn classify(_type: &Type) -> Option<Self> {
        let Type::Path(type_path) = _type else {
            return None;
        };
        let ident = type_path.path.segments.last()?.ident.to_string();
        match ident.as_str() {
            "String" => Some(KeyKind::Text),
            "i8" | "i16" | "i32" | "i64" | "isize" => Some(KeyKind::Int),
            "u8" | "u16" | "u32" | "u64" | "usize" => Some(KeyKind::Uint),
            _ => None,
        }
    }

    /// The matching variant ident of the runtime `KeyKind`/`Key` enums.
    pub fn variant(self) -> Ident {
        match self {
            KeyKind::Text => format_ident!("Text"),
            KeyKind::Int => format_ident!("Int"),
            KeyKind::Uint => format_ident!("Uint"),
        }
    }
}

pub type PrimaryKey = Column;
