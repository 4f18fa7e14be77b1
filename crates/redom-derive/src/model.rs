use crate::{
    args::{ModelArgs, PropArgs, SchemaArgs},
    helper::{find_attr, nested_model_type, parse_attr},
};
use darling::Error as DarlingError;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, ext::IdentExt};

// derive_model
pub fn derive_model(input: TokenStream) -> TokenStream {
    expand(input).unwrap_or_else(DarlingError::write_errors)
}

fn expand(input: TokenStream) -> Result<TokenStream, DarlingError> {
    // Phase 1: parse inputs.
    let input: DeriveInput = syn::parse2(input)?;
    let ident = &input.ident;
    let class_name = ident.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let model_args = match find_attr(&input.attrs, "model")? {
        Some(attr) => parse_attr::<ModelArgs>(attr)?,
        None => ModelArgs::default(),
    };
    let krate = model_args.crate_path();

    let Data::Struct(data) = &input.data else {
        return Err(DarlingError::custom(
            "Model can only be derived for structs with named fields",
        )
        .with_span(ident));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(DarlingError::custom(
            "Model can only be derived for structs with named fields",
        )
        .with_span(&data.fields));
    };

    // Phase 2: the Schema decorator, when the struct is an entity.
    let mut statements = Vec::new();

    if let Some(attr) = find_attr(&input.attrs, "schema")? {
        let options = parse_attr::<SchemaArgs>(attr)?
            .options_expr(&krate)
            .map_err(|err| err.with_span(attr))?;

        statements.push(quote! {
            #krate::schema::decorator::schema(#options).decorate(store, class);
        });
    }

    // Phase 3: one Prop decorator per `#[prop]` field, in declaration order.
    let mut errors = DarlingError::accumulator();

    for field in &named.named {
        let Some(attr) = errors.handle(find_attr(&field.attrs, "prop")).flatten() else {
            continue;
        };
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let options = parse_attr::<PropArgs>(attr).and_then(|args| {
            args.validate()?;
            args.options_expr(&krate, nested_model_type(&field.ty))
        });

        if let Some(options) = errors.handle(options.map_err(|err| err.with_span(attr))) {
            let property_key = field_ident.unraw().to_string();

            statements.push(quote! {
                #krate::schema::decorator::prop(#options).decorate(store, class, #property_key);
            });
        }
    }

    errors.finish()?;

    // Phase 4: emit the impl.
    let body = if statements.is_empty() {
        quote!(let _ = store;)
    } else {
        quote! {
            let class = #krate::schema::node::ClassKey::named::<Self>(#class_name);
            #(#statements)*
        }
    };

    Ok(quote! {
        impl #impl_generics #krate::schema::node::Model for #ident #ty_generics #where_clause {
            const CLASS_NAME: &'static str = #class_name;

            fn describe(store: &mut #krate::schema::metadata::MetadataStore) {
                #body
            }
        }
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: TokenStream) -> String {
        derive_model(input).to_string()
    }

    #[test]
    fn entity_emits_schema_and_props_in_order() {
        let out = expand_str(quote! {
            #[schema(data_structure = "HASH", name = "Customer")]
            struct CustomerEntity {
                #[prop(indexed)]
                email: String,
                #[prop(type = "number", sortable)]
                age: u32,
                notes: String,
            }
        });

        assert!(out.contains("\"CustomerEntity\""));
        assert!(out.contains("DataStructure :: Hash"));
        assert!(out.contains(". name (\"Customer\")"));

        let email = out.find("\"email\"").unwrap();
        let age = out.find("\"age\"").unwrap();
        assert!(email < age);
        assert!(out.contains("FieldType :: Number"));
        assert!(!out.contains("\"notes\""));
    }

    #[test]
    fn nested_field_uses_unwrapped_type() {
        let out = expand_str(quote! {
            struct Person {
                #[prop(nested, lazy)]
                address: Option<Box<Address>>,
                #[prop(nested = "crate::Office")]
                office: Office,
            }
        });

        assert!(out.contains("nested_lazy"));
        assert!(out.contains("< Address >"));
        assert!(out.contains("< crate :: Office > ()"));
        assert!(!out.contains("decorator :: schema"));
    }

    #[test]
    fn crate_path_can_be_overridden() {
        let out = expand_str(quote! {
            #[model(crate = "::my_redom")]
            #[schema]
            struct Item {}
        });

        assert!(out.contains(":: my_redom :: schema :: node :: Model"));
    }

    #[test]
    fn type_and_nested_are_exclusive() {
        let out = expand_str(quote! {
            struct Bad {
                #[prop(type = "string", nested)]
                inner: Inner,
            }
        });

        assert!(out.contains("compile_error"));
        assert!(out.contains("cannot be used together"));
    }

    #[test]
    fn unknown_values_are_rejected() {
        let bad_type = expand_str(quote! {
            struct Bad {
                #[prop(type = "float")]
                value: f64,
            }
        });
        let bad_structure = expand_str(quote! {
            #[schema(data_structure = "XML")]
            struct Bad {}
        });

        assert!(bad_type.contains("unknown property type"));
        assert!(bad_structure.contains("unknown data_structure"));
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let out = expand_str(quote! {
            struct Pair(String, String);
        });

        assert!(out.contains("named fields"));
    }
}
