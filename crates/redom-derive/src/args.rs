use darling::{Error as DarlingError, FromMeta, util::Flag};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Path, parse_quote};

///
/// ModelArgs
///
/// `#[model(crate = "...")]`: where the generated code finds `redom`.
///

#[derive(Debug, Default, FromMeta)]
pub struct ModelArgs {
    #[darling(rename = "crate")]
    pub krate: Option<Path>,
}

impl ModelArgs {
    pub fn crate_path(&self) -> Path {
        self.krate.clone().unwrap_or_else(|| parse_quote!(::redom))
    }
}

///
/// SchemaArgs
///
/// `#[schema(data_structure = "JSON", index_name = "...", name = "...")]`
///

#[derive(Debug, Default, FromMeta)]
pub struct SchemaArgs {
    pub data_structure: Option<String>,
    pub index_name: Option<String>,
    pub name: Option<String>,
}

impl SchemaArgs {
    pub fn options_expr(&self, krate: &Path) -> Result<TokenStream, DarlingError> {
        let mut chain = Vec::new();

        if let Some(ds) = &self.data_structure {
            let variant = match ds.as_str() {
                "JSON" => format_ident!("Json"),
                "HASH" => format_ident!("Hash"),
                other => {
                    return Err(DarlingError::custom(format!(
                        "unknown data_structure '{other}', expected \"JSON\" or \"HASH\""
                    )));
                }
            };
            chain.push(quote!(.data_structure(#krate::schema::types::DataStructure::#variant)));
        }
        if let Some(index_name) = &self.index_name {
            chain.push(quote!(.index_name(#index_name)));
        }
        if let Some(name) = &self.name {
            chain.push(quote!(.name(#name)));
        }

        Ok(quote! {
            #krate::schema::node::SchemaOptions::new() #(#chain)*
        })
    }
}

///
/// NestedClass
///
/// `nested` takes the class from the field's type, `nested = "path::Type"`
/// names it.
///

#[derive(Debug)]
pub enum NestedClass {
    Inferred,
    Explicit(Path),
}

impl FromMeta for NestedClass {
    fn from_word() -> Result<Self, DarlingError> {
        Ok(Self::Inferred)
    }

    fn from_string(value: &str) -> Result<Self, DarlingError> {
        syn::parse_str::<Path>(value)
            .map(Self::Explicit)
            .map_err(|_| DarlingError::custom(format!("'{value}' is not a type path")))
    }
}

///
/// PropArgs
///

#[derive(Debug, Default, FromMeta)]
pub struct PropArgs {
    #[darling(rename = "type")]
    pub ty: Option<String>,

    pub indexed: Option<bool>,
    pub sortable: Option<bool>,
    pub text_search: Option<bool>,
    pub normalized: Option<bool>,
    pub case_sensitive: Option<bool>,
    pub stemming: Option<bool>,
    pub weight: Option<f64>,
    pub matcher: Option<String>,
    pub separator: Option<String>,
    pub field: Option<String>,
    pub path: Option<String>,

    pub nested: Option<NestedClass>,
    pub lazy: Flag,
}

// `type = "..."` names accepted on a property
const FIELD_TYPES: [(&str, &str); 8] = [
    ("boolean", "Boolean"),
    ("date", "Date"),
    ("number", "Number"),
    ("number[]", "NumberArray"),
    ("point", "Point"),
    ("string", "String"),
    ("string[]", "StringArray"),
    ("text", "Text"),
];

impl PropArgs {
    pub fn validate(&self) -> Result<(), DarlingError> {
        if self.ty.is_some() && self.nested.is_some() {
            return Err(DarlingError::custom(
                "`type` and `nested` cannot be used together",
            ));
        }
        if self.lazy.is_present() && self.nested.is_none() {
            return Err(DarlingError::custom("`lazy` requires `nested`"));
        }

        Ok(())
    }

    /// Builder chain producing the `PropOptions` for this property.
    /// `inferred` is the model type used by a bare `nested`.
    pub fn options_expr(
        &self,
        krate: &Path,
        inferred: &syn::Type,
    ) -> Result<TokenStream, DarlingError> {
        let mut chain = Vec::new();

        if let Some(ty) = &self.ty {
            let variant = FIELD_TYPES
                .iter()
                .find(|(name, _)| *name == ty.as_str())
                .map(|(_, variant)| format_ident!("{variant}"))
                .ok_or_else(|| DarlingError::custom(format!("unknown property type '{ty}'")))?;

            chain.push(quote!(.ty(#krate::schema::types::FieldType::#variant)));
        }

        if let Some(nested) = &self.nested {
            let class = match nested {
                NestedClass::Inferred => quote!(#inferred),
                NestedClass::Explicit(path) => quote!(#path),
            };
            let class_ref = quote!(#krate::schema::node::ClassRef::of::<#class>);

            chain.push(if self.lazy.is_present() {
                quote!(.nested_lazy(#class_ref))
            } else {
                quote!(.nested(#class_ref()))
            });
        }

        let flags = [
            ("indexed", self.indexed),
            ("sortable", self.sortable),
            ("text_search", self.text_search),
            ("normalized", self.normalized),
            ("case_sensitive", self.case_sensitive),
            ("stemming", self.stemming),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                let method = format_ident!("{name}");
                chain.push(quote!(.#method(#value)));
            }
        }

        if let Some(weight) = self.weight {
            chain.push(quote!(.weight(#weight)));
        }

        let strings = [
            ("matcher", &self.matcher),
            ("separator", &self.separator),
            ("field", &self.field),
            ("path", &self.path),
        ];
        for (name, value) in strings {
            if let Some(value) = value {
                let method = format_ident!("{name}");
                chain.push(quote!(.#method(#value)));
            }
        }

        Ok(quote! {
            #krate::schema::node::PropOptions::new() #(#chain)*
        })
    }
}
