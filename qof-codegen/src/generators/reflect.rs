//! Implementation of the `#[derive(Reflect)]` macro.

use std::collections::HashSet;

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, Path, PathArguments, Type,
    parse_quote,
};

/// Parse and generate code for the `#[derive(Reflect)]` macro.
pub fn derive_reflect_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect derive does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Reflect derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Reflect derive only supports structs",
            ));
        }
    };

    let struct_attrs = parse_struct_attrs(input)?;
    let krate = struct_attrs
        .krate
        .unwrap_or_else(|| parse_quote!(::qof));
    let case = struct_attrs.rename_all.unwrap_or(Case::Pascal);

    let field_infos: Vec<FieldInfo> = fields
        .iter()
        .map(|f| parse_field(f, case))
        .collect::<Result<_, _>>()?;

    let mut seen = HashSet::new();
    for field in &field_infos {
        if field.kind != FieldKind::Skip && !seen.insert(field.property_name.as_str()) {
            return Err(syn::Error::new_spanned(
                &field.name,
                format!("duplicate property name '{}'", field.property_name),
            ));
        }
    }

    let consts: Vec<_> = field_infos
        .iter()
        .filter_map(|f| generate_const(name, &krate, f))
        .collect();

    let listed: Vec<_> = field_infos
        .iter()
        .filter(|f| f.kind == FieldKind::Scalar)
        .map(|f| &f.const_name)
        .collect();

    let type_name = name.to_string();

    Ok(quote! {
        impl #name {
            #(#consts)*
        }

        impl #krate::Reflect for #name {
            const TYPE_NAME: &'static str = #type_name;
            const PROPERTIES: &'static [#krate::Property<Self>] = &[#(#name::#listed),*];
        }
    })
}

/// Struct-level attributes parsed from `#[qof(...)]`.
#[derive(Default)]
struct StructAttrs {
    rename_all: Option<Case>,
    krate: Option<Path>,
}

/// Parse struct-level `#[qof(...)]` attributes.
fn parse_struct_attrs(input: &DeriveInput) -> Result<StructAttrs, syn::Error> {
    let mut attrs = StructAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("qof") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.rename_all = Some(parse_case(&value)?);
            } else if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.krate = Some(value.parse()?);
            } else {
                return Err(meta.error("unsupported qof attribute"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

fn parse_case(value: &LitStr) -> Result<Case, syn::Error> {
    match value.value().as_str() {
        "PascalCase" => Ok(Case::Pascal),
        "camelCase" => Ok(Case::Camel),
        "snake_case" => Ok(Case::Snake),
        "SCREAMING_SNAKE_CASE" => Ok(Case::UpperSnake),
        other => Err(syn::Error::new_spanned(
            value,
            format!("unknown naming convention '{}'", other),
        )),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FieldKind {
    Scalar,
    Collection(Type),
    Skip,
}

/// Information about a field.
struct FieldInfo {
    name: Ident,
    ty: Type,
    const_name: Ident,
    property_name: String,
    kind: FieldKind,
}

/// Parse a field and its `#[qof(...)]` attributes.
fn parse_field(field: &syn::Field, case: Case) -> Result<FieldInfo, syn::Error> {
    let name = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Fields must be named"))?;

    let plain = name.unraw().to_string();
    let const_name = format_ident!("{}", plain.to_case(Case::UpperSnake));
    let mut property_name = plain.to_case(case);
    let mut skip = false;
    let mut collection = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("qof") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
            } else if meta.path.is_ident("collection") {
                collection = true;
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                property_name = value.value();
            } else {
                return Err(meta.error("unsupported qof attribute"));
            }
            Ok(())
        })?;
    }

    let kind = if skip {
        FieldKind::Skip
    } else if collection {
        let element = vec_element_type(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(&field.ty, "#[qof(collection)] requires a Vec<T> field")
        })?;
        FieldKind::Collection(element.clone())
    } else {
        FieldKind::Scalar
    };

    Ok(FieldInfo {
        name,
        ty: field.ty.clone(),
        const_name,
        property_name,
        kind,
    })
}

/// The `T` of a `Vec<T>`.
fn vec_element_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Vec" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(element) => Some(element),
        _ => None,
    }
}

/// Generate the associated constant for one field.
fn generate_const(
    owner: &Ident,
    krate: &Path,
    field: &FieldInfo,
) -> Option<TokenStream> {
    let field_name = &field.name;
    let const_name = &field.const_name;
    let property_name = &field.property_name;
    let ty = &field.ty;

    let tokens = match &field.kind {
        FieldKind::Skip => return None,
        FieldKind::Scalar => {
            let doc = format!("The `{}` property.", property_name);
            quote! {
                #[doc = #doc]
                pub const #const_name: #krate::Property<#owner> = {
                    fn get(record: &#owner) -> #krate::FilterValue {
                        #krate::ValueType::to_value(&record.#field_name)
                    }
                    #krate::Property::new(
                        #property_name,
                        <#ty as #krate::ValueType>::KIND,
                        get,
                    )
                };
            }
        }
        FieldKind::Collection(element) => {
            let doc = format!("The `{}` collection.", property_name);
            quote! {
                #[doc = #doc]
                pub const #const_name: #krate::CollectionProperty<#owner, #element> = {
                    fn items(record: &#owner) -> &[#element] {
                        &record.#field_name
                    }
                    #krate::CollectionProperty::new(#property_name, items)
                };
            }
        }
    };

    Some(tokens)
}
