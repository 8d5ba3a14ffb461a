//! Implementation of the `#[derive(RecordKey)]` macro.
//!
//! This module generates the `RecordKey` implementation of a fieldless enum
//! and a `{Enum}Fields` trait holding one read-only accessor per variant.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DataEnum, DeriveInput, Fields, Ident, parse_macro_input};

/// Identifiers that cannot be written even as raw identifiers.
const NON_RAW_KEYWORDS: [&str; 4] = ["crate", "self", "super", "Self"];

/// Methods reachable on every record type. An accessor with one of these
/// names would be shadowed by the record's own method.
const RECORD_METHODS: [&str; 19] = [
    "clone",
    "entries",
    "eq",
    "fmt",
    "get",
    "has",
    "into_iter",
    "into_trie",
    "is_thin",
    "is_trie",
    "iter",
    "merge",
    "ne",
    "schema",
    "set",
    "to_trie",
    "try_set",
    "update",
    "value_at",
];

/// Main implementation of the `RecordKey` derive macro.
pub fn derive_record_key_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Enum(data_enum) => generate_record_key(&input, data_enum),
        Data::Struct(_) => syn::Error::new_spanned(
            &input.ident,
            "RecordKey can only be derived for fieldless enums, not structs.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "RecordKey cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// Generates the `RecordKey` impl and the accessor trait for an enum.
fn generate_record_key(input: &DeriveInput, data_enum: &DataEnum) -> TokenStream2 {
    let name = &input.ident;
    let visibility = &input.vis;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "RecordKey cannot be derived for generic enums.",
        )
        .to_compile_error();
    }

    if let Some(variant) = data_enum
        .variants
        .iter()
        .find(|variant| !matches!(variant.fields, Fields::Unit))
    {
        return syn::Error::new_spanned(
            variant,
            "RecordKey variants cannot carry fields; every variant must be a unit variant.",
        )
        .to_compile_error();
    }

    let variants: Vec<&Ident> = data_enum.variants.iter().map(|variant| &variant.ident).collect();
    let variant_names: Vec<String> = variants.iter().map(ToString::to_string).collect();
    let accessors: Vec<Ident> = variants
        .iter()
        .map(|variant| accessor_ident(variant))
        .collect();
    let accessor_docs: Vec<String> = variant_names
        .iter()
        .map(|variant_name| {
            format!("Returns the value of the `{variant_name}` field, or its default if unset.")
        })
        .collect();

    let fields_trait = format_ident!("{}Fields", name);
    let trait_doc = format!(
        "Read-only field accessors for records keyed by [`{name}`].\n\n\
         Implemented for every `RecordView<{name}, V>`. There are no setters: \
         use `set` on the record to obtain a new record with a different value."
    );

    quote! {
        impl ::record_trie::record::RecordKey for #name {
            const KEYS: &'static [Self] = &[#(Self::#variants),*];

            fn name(&self) -> &'static str {
                match *self {
                    #(Self::#variants => #variant_names,)*
                }
            }
        }

        #[doc = #trait_doc]
        #visibility trait #fields_trait<V>: ::record_trie::record::RecordView<#name, V> {
            #(
                #[doc = #accessor_docs]
                #[inline]
                fn #accessors(&self) -> ::core::option::Option<&V> {
                    ::record_trie::record::RecordView::get(self, &#name::#variants)
                }
            )*
        }

        impl<V, R> #fields_trait<V> for R
        where
            R: ::record_trie::record::RecordView<#name, V> + ?Sized,
        {
        }
    }
}

/// Builds the accessor method name for a variant.
///
/// Names that collide with a record method, or with a keyword that has no
/// raw form, get a trailing underscore. Other keywords become raw
/// identifiers.
fn accessor_ident(variant: &Ident) -> Ident {
    let snake = to_snake_case(&variant.to_string());
    if RECORD_METHODS.contains(&snake.as_str()) || NON_RAW_KEYWORDS.contains(&snake.as_str()) {
        format_ident!("{}_", snake, span = variant.span())
    } else if syn::parse_str::<Ident>(&snake).is_ok() {
        Ident::new(&snake, variant.span())
    } else {
        Ident::new_raw(&snake, variant.span())
    }
}

/// Converts a `CamelCase` or `PascalCase` string to `snake_case`.
fn to_snake_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let chars: Vec<char> = input.chars().collect();

    for (index, &character) in chars.iter().enumerate() {
        if character.is_uppercase() {
            if index > 0 {
                let previous_char = chars[index - 1];
                let next_is_lowercase = chars.get(index + 1).is_some_and(|c| c.is_lowercase());

                // "keyPress" -> "key_press", "XMLParser" -> "xml_parser"
                if previous_char.is_lowercase()
                    || previous_char.is_ascii_digit()
                    || (previous_char.is_uppercase() && next_is_lowercase)
                {
                    result.push('_');
                }
            }
            result.push(character.to_lowercase().next().unwrap_or(character));
        } else {
            result.push(character);
        }
    }

    result
}
