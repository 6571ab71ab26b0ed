//! # Dictionary Translation Derive Macro
//!
//! Implements `dict_trans_core::Translatable` and `dict_trans_core::graph::Descend`
//! for structs with named fields.
//!
//! Field attributes (`#[dict(...)]`):
//!
//! * `code = "..."` dictionary used to translate the field
//! * `split = "..."` separator of a multi-valued raw code
//! * `join = "..."` separator between resolved meanings (requires `split`)
//! * `before_copy_to = "..."` field receiving the raw code
//! * `over_copy_to = "..."` field receiving the meaning
//! * `nested` descend into this field during graph translation
//! * `base` embedded ancestor whose fields are inherited
//! * `skip` hide the field from the engine
//!
//! Fields without `nested`, `base` or `skip` must implement
//! `dict_trans_core::meta::FieldValue`.
//!
//! Compatible with `syn 2.0`.

use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type};

/// Derives `Translatable` and `Descend`.
#[proc_macro_derive(Translatable, attributes(dict))]
pub fn derive_translatable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => e.to_compile_error().into(),
    }
}

// --- Internal Data Structures ---

#[derive(Default)]
struct DirectiveAttr {
    code: Option<LitStr>,
    split: Option<LitStr>,
    join: Option<LitStr>,
    before_copy_to: Option<LitStr>,
    over_copy_to: Option<LitStr>,
}

enum FieldRole {
    Plain(Option<DirectiveAttr>),
    Nested,
    Base,
    Skip,
}

struct ParsedField {
    ident: Ident,
    name: String,
    ty: Type,
    role: FieldRole,
}

/// Parses `#[dict(...)]` attributes into the field's role.
fn parse_attributes(attrs: &[Attribute]) -> syn::Result<FieldRole> {
    let mut directive = DirectiveAttr::default();
    let mut has_directive = false;
    let mut nested = false;
    let mut base = false;
    let mut skip = false;
    let mut span: Option<Span> = None;

    for attr in attrs {
        if !attr.path().is_ident("dict") {
            continue;
        }
        span.get_or_insert_with(|| attr.path().span());

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("nested") {
                nested = true;
                return Ok(());
            }
            if meta.path.is_ident("base") {
                base = true;
                return Ok(());
            }
            if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            }

            let slot = if meta.path.is_ident("code") {
                &mut directive.code
            } else if meta.path.is_ident("split") {
                &mut directive.split
            } else if meta.path.is_ident("join") {
                &mut directive.join
            } else if meta.path.is_ident("before_copy_to") {
                &mut directive.before_copy_to
            } else if meta.path.is_ident("over_copy_to") {
                &mut directive.over_copy_to
            } else {
                return Err(meta.error(
                    "Unknown dict attribute key. Supported: code, split, join, \
                     before_copy_to, over_copy_to, nested, base, skip",
                ));
            };
            let value: LitStr = meta.value()?.parse()?;
            *slot = Some(value);
            has_directive = true;
            Ok(())
        })?;
    }

    let span = span.unwrap_or_else(Span::call_site);
    let markers = [nested, base, skip].iter().filter(|m| **m).count();
    if markers > 1 || (markers == 1 && has_directive) {
        return Err(syn::Error::new(
            span,
            "`nested`, `base` and `skip` cannot be combined with each other or with directive keys",
        ));
    }
    if directive.join.is_some() && directive.split.is_none() {
        return Err(syn::Error::new(span, "`join` requires `split`"));
    }

    Ok(if nested {
        FieldRole::Nested
    } else if base {
        FieldRole::Base
    } else if skip {
        FieldRole::Skip
    } else if has_directive {
        FieldRole::Plain(Some(directive))
    } else {
        FieldRole::Plain(None)
    })
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Translatable cannot be derived for generic types",
        ));
    }

    let data_struct = match &input.data {
        Data::Struct(ds) => ds,
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "Translatable only supports structs",
            ))
        }
    };
    let named = match &data_struct.fields {
        Fields::Named(named) => &named.named,
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "Translatable requires named fields",
            ))
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        fields.push(ParsedField {
            name: ident.unraw().to_string(),
            ident,
            ty: field.ty.clone(),
            role: parse_attributes(&field.attrs)?,
        });
    }

    validate(&fields)?;

    // Types with the same name can live in one module (inside different
    // functions), so the definition site is part of the name.
    let type_name = quote! {
        concat!(module_path!(), "::", stringify!(#name), "@", line!(), ":", column!())
    };

    let descriptor = generate_descriptor(&type_name, &fields);
    let accessors = generate_accessors(&type_name, &fields);
    let children = generate_children(&fields);

    Ok(quote! {
        impl ::dict_trans_core::graph::Translatable for #name {
            #descriptor
            #accessors
            #children
        }

        impl ::dict_trans_core::graph::Descend for #name {
            fn descend(&mut self, visitor: &mut dyn ::dict_trans_core::graph::ChildVisitor) {
                ::dict_trans_core::graph::ChildVisitor::visit_owned(visitor, self);
            }
        }
    })
}

/// Checks redirection targets and the single-base rule.
fn validate(fields: &[ParsedField]) -> syn::Result<()> {
    let plain: HashSet<&str> = fields
        .iter()
        .filter(|f| matches!(f.role, FieldRole::Plain(_)))
        .map(|f| f.name.as_str())
        .collect();

    let mut base_seen = false;
    for field in fields {
        match &field.role {
            FieldRole::Base => {
                if base_seen {
                    return Err(syn::Error::new(
                        field.ident.span(),
                        "only one field may be marked `base`",
                    ));
                }
                base_seen = true;
            }
            FieldRole::Plain(Some(directive)) => {
                for target in [&directive.before_copy_to, &directive.over_copy_to]
                    .into_iter()
                    .flatten()
                {
                    let value = target.value();
                    if !value.is_empty() && !plain.contains(value.as_str()) {
                        return Err(syn::Error::new_spanned(
                            target,
                            format!("`{}` is not a translatable field of this struct", value),
                        ));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn opt_lit(lit: &Option<LitStr>) -> TokenStream2 {
    match lit {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    }
}

// --- Generator: type descriptor ---

fn generate_descriptor(type_name: &TokenStream2, fields: &[ParsedField]) -> TokenStream2 {
    let descriptors = fields.iter().filter_map(|f| {
        let FieldRole::Plain(directive) = &f.role else {
            return None;
        };
        let fname = &f.name;
        Some(match directive {
            None => quote! {
                ::dict_trans_core::meta::FieldDescriptor::plain(#type_name, #fname)
            },
            Some(d) => {
                let code = opt_lit(&d.code);
                let split = opt_lit(&d.split);
                let join = opt_lit(&d.join);
                let before = opt_lit(&d.before_copy_to);
                let over = opt_lit(&d.over_copy_to);
                quote! {
                    ::dict_trans_core::meta::FieldDescriptor::with_directive(
                        #type_name,
                        #fname,
                        ::dict_trans_core::meta::TranslationDirective {
                            dict_code: #code,
                            split_symbol: #split,
                            join_symbol: #join,
                            before_copy_to: #before,
                            over_copy_to: #over,
                        },
                    )
                }
            }
        })
    });

    let base = match fields.iter().find(|f| matches!(f.role, FieldRole::Base)) {
        Some(f) => {
            let ty = &f.ty;
            quote! {
                ::core::option::Option::Some(
                    <#ty as ::dict_trans_core::graph::Translatable>::type_descriptor
                )
            }
        }
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        fn type_descriptor() -> &'static ::dict_trans_core::meta::TypeDescriptor {
            static DESCRIPTOR: ::dict_trans_core::meta::TypeDescriptor =
                ::dict_trans_core::meta::TypeDescriptor {
                    type_name: #type_name,
                    fields: &[#(#descriptors),*],
                    base: #base,
                };
            &DESCRIPTOR
        }

        fn descriptor(&self) -> &'static ::dict_trans_core::meta::TypeDescriptor {
            <Self as ::dict_trans_core::graph::Translatable>::type_descriptor()
        }
    }
}

// --- Generator: field accessors ---

fn generate_accessors(type_name: &TokenStream2, fields: &[ParsedField]) -> TokenStream2 {
    let plain: Vec<&ParsedField> = fields
        .iter()
        .filter(|f| matches!(f.role, FieldRole::Plain(_)))
        .collect();
    let base = fields.iter().find(|f| matches!(f.role, FieldRole::Base));

    let read_arms = plain.iter().map(|f| {
        let ident = &f.ident;
        let fname = &f.name;
        quote! {
            #fname => ::core::result::Result::Ok(
                ::dict_trans_core::meta::FieldValue::to_value(&self.#ident)
            ),
        }
    });
    let write_arms = plain.iter().map(|f| {
        let ident = &f.ident;
        let fname = &f.name;
        quote! {
            #fname => ::dict_trans_core::meta::store_value(&mut self.#ident, #fname, value),
        }
    });

    let (read_inherited, write_inherited) = match base {
        Some(f) => {
            let ident = &f.ident;
            (
                quote! { ::dict_trans_core::graph::Translatable::read_field(&self.#ident, field) },
                quote! {
                    ::dict_trans_core::graph::Translatable::write_field(&mut self.#ident, field, value)
                },
            )
        }
        None => (
            quote! { ::core::result::Result::Err(::dict_trans_core::graph::field_not_found(field)) },
            quote! { ::core::result::Result::Err(::dict_trans_core::graph::field_not_found(field)) },
        ),
    };

    quote! {
        fn read_field(
            &self,
            field: &::dict_trans_core::meta::FieldId,
        ) -> ::dict_trans_core::Result<::core::option::Option<::dict_trans_core::meta::Value>> {
            if field.owner != #type_name {
                return #read_inherited;
            }
            match field.name {
                #(#read_arms)*
                _ => ::core::result::Result::Err(::dict_trans_core::graph::field_not_found(field)),
            }
        }

        #[allow(unused_variables)]
        fn write_field(
            &mut self,
            field: &::dict_trans_core::meta::FieldId,
            value: ::dict_trans_core::meta::Value,
        ) -> ::dict_trans_core::Result<()> {
            if field.owner != #type_name {
                return #write_inherited;
            }
            match field.name {
                #(#write_arms)*
                _ => ::core::result::Result::Err(::dict_trans_core::graph::field_not_found(field)),
            }
        }
    }
}

// --- Generator: graph children ---

fn generate_children(fields: &[ParsedField]) -> TokenStream2 {
    let nested = fields
        .iter()
        .filter(|f| matches!(f.role, FieldRole::Nested))
        .map(|f| {
            let ident = &f.ident;
            quote! { ::dict_trans_core::graph::Descend::descend(&mut self.#ident, visitor); }
        });
    let inherited = fields
        .iter()
        .filter(|f| matches!(f.role, FieldRole::Base))
        .map(|f| {
            let ident = &f.ident;
            quote! { ::dict_trans_core::graph::Translatable::visit_children(&mut self.#ident, visitor); }
        });

    quote! {
        #[allow(unused_variables)]
        fn visit_children(&mut self, visitor: &mut dyn ::dict_trans_core::graph::ChildVisitor) {
            #(#nested)*
            #(#inherited)*
        }
    }
}
