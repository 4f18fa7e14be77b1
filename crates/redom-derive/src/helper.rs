use darling::{Error as DarlingError, FromMeta};
use syn::{Attribute, GenericArgument, Meta, PathArguments, Type};

// Wrappers looked through when inferring a nested model type.
const WRAPPERS: [&str; 3] = ["Option", "Box", "Vec"];

// Strip reference wrappers like &T or &mut T.
pub fn peel_reference(ty: &Type) -> &Type {
    if let Type::Reference(reference) = ty {
        return peel_reference(&reference.elem);
    }

    ty
}

// Extract the inner type from Wrapper<T> when the last segment is `wrapper`.
pub fn unwrap_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };

    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

/// The model type a field holds, looking through references and any mix
/// of `Option`, `Box` and `Vec`.
pub fn nested_model_type(ty: &Type) -> &Type {
    let mut current = peel_reference(ty);

    while let Some(inner) = WRAPPERS
        .iter()
        .find_map(|wrapper| unwrap_generic(current, wrapper))
    {
        current = peel_reference(inner);
    }

    current
}

/// The single attribute named `name`, if any.
pub fn find_attr<'a>(
    attrs: &'a [Attribute],
    name: &str,
) -> Result<Option<&'a Attribute>, DarlingError> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident(name));
    let first = found.next();

    if let Some(duplicate) = found.next() {
        return Err(
            DarlingError::custom(format!("duplicate #[{name}] attribute")).with_span(duplicate),
        );
    }

    Ok(first)
}

/// Parse an attribute's arguments; a bare `#[name]` yields the defaults.
pub fn parse_attr<T: Default + FromMeta>(attr: &Attribute) -> Result<T, DarlingError> {
    match &attr.meta {
        Meta::Path(_) => Ok(T::default()),
        meta => T::from_meta(meta),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;
    use syn::parse_quote;

    fn tokens(ty: &Type) -> String {
        ty.to_token_stream().to_string()
    }

    #[test]
    fn nested_model_type_unwraps_wrappers() {
        let cases: [(Type, Type); 4] = [
            (parse_quote!(Address), parse_quote!(Address)),
            (parse_quote!(Option<Address>), parse_quote!(Address)),
            (parse_quote!(Option<Box<crate::Address>>), parse_quote!(crate::Address)),
            (parse_quote!(&Vec<Address>), parse_quote!(Address)),
        ];

        for (input, expected) in cases {
            assert_eq!(tokens(nested_model_type(&input)), tokens(&expected));
        }
    }

    #[test]
    fn duplicate_attribute_is_rejected() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[schema]),
            parse_quote!(#[schema(name = "X")]),
        ];

        assert!(find_attr(&attrs, "schema").is_err());
        assert!(find_attr(&attrs, "prop").unwrap().is_none());
    }
}
