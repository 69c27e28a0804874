//! # Stronk Macros
//!
//! Derive macros for declaring packet wire layouts.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, Meta,
    parse::{Parse, ParseStream},
    parse_macro_input,
    token::Paren,
};

const ALLOWED_TYPES: [&str; 12] = [
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

const UNSUPPORTED_PROP: &str =
    "unsupported property. Supported properties are `as = ...`, `bound = ...`";
const WRONG_READ_FORMAT: &str = "attribute requires a list format: `#[read(as = ..., bound = ..)]";
const WRONG_WRITE_FORMAT: &str =
    "attribute requires a list format: `#[write(as = ..., bound = ..)]";

/// Represents a parsed strategy from read/write attributes.
///
/// Supports:
/// - Simple: `VarInt`, `VarLong`, `Json`, `Unprefixed`
/// - Container: `Prefixed(VarInt)`
#[derive(Debug, Clone)]
struct Strategy {
    name: Ident,
    /// For Prefixed: the prefix type (e.g. `VarInt`, `u16`)
    prefix_type: Option<syn::Type>,
}

impl Strategy {
    fn name_str(&self) -> String {
        self.name.to_string()
    }

    /// Gets the prefix type as a token stream, expanding known identifiers
    /// to full paths.
    fn prefix_type_tokens(&self) -> Option<proc_macro2::TokenStream> {
        self.prefix_type.as_ref().map(expand_known_type)
    }
}

/// Expands known type identifiers to their fully qualified paths.
///
/// For example, `VarInt` becomes `stronk_utils::codec::VarInt`.
fn expand_known_type(ty: &syn::Type) -> proc_macro2::TokenStream {
    if let syn::Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && type_path.path.segments.len() == 1
    {
        let segment = &type_path.path.segments[0];
        if segment.arguments.is_empty() {
            let ident_str = segment.ident.to_string();
            match ident_str.as_str() {
                "VarInt" => return quote! { stronk_utils::codec::VarInt },
                "VarLong" => return quote! { stronk_utils::codec::VarLong },
                _ => {}
            }
        }
    }
    quote! { #ty }
}

impl Parse for Strategy {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;

        let mut prefix_type = None;
        if input.peek(Paren) {
            let content;
            syn::parenthesized!(content in input);
            if !content.is_empty() {
                prefix_type = Some(content.parse()?);
            }
        }

        Ok(Strategy { name, prefix_type })
    }
}

struct FieldAttributes {
    strategy: Option<Strategy>,
    bound: Option<syn::LitInt>,
}

fn parse_field_attributes(
    attrs: &[syn::Attribute],
    attr_name: &str,
    wrong_format: &str,
) -> FieldAttributes {
    let mut strategy: Option<Strategy> = None;
    let mut bound: Option<syn::LitInt> = None;

    if let Some(attr) = attrs.iter().find(|a| a.path().is_ident(attr_name)) {
        if let Meta::List(meta) = attr.meta.clone() {
            meta.parse_nested_meta(|meta| {
                if meta.path.is_ident("as") {
                    let value = meta.value()?;
                    strategy = Some(value.parse()?);
                    Ok(())
                } else if meta.path.is_ident("bound") {
                    let value = meta.value()?;
                    let int_lit: syn::LitInt = value.parse()?;
                    bound = Some(int_lit);
                    Ok(())
                } else {
                    Err(meta.error(UNSUPPORTED_PROP))
                }
            })
            .unwrap_or_else(|e| panic!("Failed to parse `{attr_name}` attribute: {e}"));
        } else {
            panic!("{wrong_format}");
        }
    }

    FieldAttributes { strategy, bound }
}

/// Derives the `ReadFrom` trait for a struct or a unit enum.
///
/// # Panics
/// - If the derive macro is used on a union.
/// - If the `read` attribute is malformed.
/// - If an unknown read strategy is specified.
#[proc_macro_derive(ReadFrom, attributes(read))]
pub fn read_from_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    match input.data {
        Data::Struct(s) => read_from_struct(s, name),
        Data::Enum(e) => read_from_enum(e, name, &input.attrs),
        Data::Union(_) => panic!("ReadFrom can only be derived for structs or enums"),
    }
}

/// Generates read code for a field based on the given strategy.
fn generate_read_code(
    strategy: &Strategy,
    field_type: &syn::Type,
    bound: Option<&syn::LitInt>,
) -> proc_macro2::TokenStream {
    match strategy.name_str().as_str() {
        "VarInt" => quote! {
            stronk_utils::codec::VarInt::read(data)?.0 as #field_type
        },
        "VarLong" => quote! {
            stronk_utils::codec::VarLong::read(data)?.0 as #field_type
        },
        "Prefixed" => {
            let prefix = strategy
                .prefix_type_tokens()
                .unwrap_or_else(|| quote! { stronk_utils::codec::VarInt });

            if let Some(b) = bound {
                quote! {
                    {
                        use stronk_utils::serial::PrefixedRead;
                        <#field_type>::read_prefixed_bound::<#prefix>(data, #b)?
                    }
                }
            } else {
                quote! {
                    {
                        use stronk_utils::serial::PrefixedRead;
                        <#field_type>::read_prefixed::<#prefix>(data)?
                    }
                }
            }
        }
        s => panic!(
            "Unknown read strategy: `{s}`. \
            Expected one of: VarInt, VarLong, Prefixed"
        ),
    }
}

fn read_from_struct(s: syn::DataStruct, name: Ident) -> TokenStream {
    let Fields::Named(fields) = s.fields else {
        panic!("ReadFrom only supports structs with named fields");
    };

    let readers = fields.named.iter().map(|f| {
        let field_name = f.ident.as_ref().expect("should have a named field");
        let field_type = &f.ty;
        let FieldAttributes { strategy, bound } =
            parse_field_attributes(&f.attrs, "read", WRONG_READ_FORMAT);

        if let Some(strat) = strategy {
            let read_code = generate_read_code(&strat, field_type, bound.as_ref());
            quote! {
                let #field_name = #read_code;
            }
        } else {
            quote! {
                let #field_name = <#field_type>::read(data)?;
            }
        }
    });

    let field_names = fields
        .named
        .iter()
        .map(|f| f.ident.as_ref().expect("should have a named field"));

    let expanded = quote! {
        #[automatically_derived]
        impl stronk_utils::serial::ReadFrom for #name {
            fn read(data: &mut impl std::io::Read) -> std::io::Result<Self> {
                use stronk_utils::serial::ReadFrom;

                #(#readers)*

                Ok(Self {
                    #(#field_names),*
                })
            }
        }
    };

    TokenStream::from(expanded)
}

fn read_from_enum(e: syn::DataEnum, name: Ident, attrs: &[syn::Attribute]) -> TokenStream {
    let readers = e.variants.iter().map(|v| {
        assert!(
            matches!(v.fields, Fields::Unit),
            "ReadFrom only supports enum variants without fields"
        );
        let Some((_, value)) = &v.discriminant else {
            panic!(
                "ReadFrom only supports enum variants with explicit discriminant\n(e.g. {} = 0)",
                &v.ident
            )
        };
        let v_name = &v.ident;
        quote! {
            #value => #name::#v_name,
        }
    });

    // The discriminant is read as a VarInt unless an attribute says otherwise.
    let FieldAttributes { strategy, bound: _ } =
        parse_field_attributes(attrs, "read", WRONG_READ_FORMAT);

    let read_discriminant = match strategy.as_ref().map(Strategy::name_str) {
        None => {
            quote! { stronk_utils::codec::VarInt::read(data)?.0 }
        }
        Some(ref s) if s == "VarInt" => {
            quote! { stronk_utils::codec::VarInt::read(data)?.0 }
        }
        Some(ref s) if ALLOWED_TYPES.contains(&s.as_str()) => {
            let enum_type = Ident::new(s, Span::call_site());
            quote! { <#enum_type as stronk_utils::serial::ReadFrom>::read(data)? }
        }
        Some(s) => panic!(
            "Unknown read strategy for enum: `{s}`. \
            Expected VarInt or a primitive type ({ALLOWED_TYPES:?})"
        ),
    };

    let error_msg = format!("Invalid {name}");

    TokenStream::from(quote! {
        #[automatically_derived]
        impl stronk_utils::serial::ReadFrom for #name {
            fn read(data: &mut impl std::io::Read) -> std::io::Result<Self> {
                use stronk_utils::serial::ReadFrom;

                Ok(match { #read_discriminant } {
                    #(#readers)*
                    _ => {
                        return Err(
                            std::io::Error::other(#error_msg)
                        );
                    }
                })
            }
        }
    })
}

/// Derives the `WriteTo` trait for a struct or a unit enum.
///
/// # Panics
/// - If the derive macro is used on a union.
/// - If the `write` attribute is malformed.
/// - If an unknown write strategy is specified.
#[proc_macro_derive(WriteTo, attributes(write))]
pub fn write_to_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    match input.data {
        Data::Struct(s) => write_to_struct(s, name, &input.generics),
        Data::Enum(_) => write_to_enum(&name, &input.attrs),
        Data::Union(_) => panic!("WriteTo can only be derived for structs and enums"),
    }
}

/// Generates write code for a value based on the given strategy.
fn generate_write_code(
    strategy: &Strategy,
    value: &proc_macro2::TokenStream,
    bound: Option<&syn::LitInt>,
) -> proc_macro2::TokenStream {
    match strategy.name_str().as_str() {
        "VarInt" => quote! {
            stronk_utils::codec::VarInt(#value as i32).write(writer)?;
        },
        "VarLong" => quote! {
            stronk_utils::codec::VarLong(#value as i64).write(writer)?;
        },
        "Json" => {
            let prefix = strategy
                .prefix_type_tokens()
                .unwrap_or_else(|| quote! { stronk_utils::codec::VarInt });
            quote! {
                {
                    use stronk_utils::serial::PrefixedWrite;
                    serde_json::to_string(&#value).map_err(|e| {
                        std::io::Error::other(format!("Failed to serialize: {e}"))
                    })?.write_prefixed::<#prefix>(writer)?;
                }
            }
        }
        "Prefixed" => {
            let prefix = strategy
                .prefix_type_tokens()
                .unwrap_or_else(|| quote! { stronk_utils::codec::VarInt });

            let write_call = if let Some(b) = bound {
                quote! { (#value).write_prefixed_bound::<#prefix>(writer, #b)?; }
            } else {
                quote! { (#value).write_prefixed::<#prefix>(writer)?; }
            };
            quote! {
                {
                    use stronk_utils::serial::PrefixedWrite;
                    #write_call
                }
            }
        }
        "Unprefixed" => {
            // Write the raw bytes with no length prefix; the frame length
            // delimits them.
            quote! {
                writer.write_all(&#value)?;
            }
        }
        s => panic!(
            "Unknown write strategy: `{s}`. \
            Expected one of: VarInt, VarLong, Json, Prefixed, Unprefixed"
        ),
    }
}

fn write_to_struct(s: syn::DataStruct, name: Ident, generics: &syn::Generics) -> TokenStream {
    let Fields::Named(fields) = s.fields else {
        panic!("WriteTo only supports structs with named fields");
    };

    let writers = fields.named.iter().map(|f| {
        let field_name = f.ident.as_ref().expect("should have a named field");
        let FieldAttributes { strategy, bound } =
            parse_field_attributes(&f.attrs, "write", WRONG_WRITE_FORMAT);

        if let Some(strat) = strategy {
            generate_write_code(&strat, &quote! { self.#field_name }, bound.as_ref())
        } else {
            quote! {
                self.#field_name.write(writer)?;
            }
        }
    });

    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics stronk_utils::serial::WriteTo for #name #ty_generics {
            fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
                use stronk_utils::serial::WriteTo;

                #(#writers)*

                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}

fn write_to_enum(name: &Ident, attrs: &[syn::Attribute]) -> TokenStream {
    let FieldAttributes { strategy, bound: _ } =
        parse_field_attributes(attrs, "write", WRONG_WRITE_FORMAT);

    let strategy = strategy
        .unwrap_or_else(|| panic!("WriteTo for enums requires the `write` attribute: #[write(as = VarInt)]"));
    let strategy_name = strategy.name_str();

    let writer = match strategy_name.as_str() {
        "VarInt" => {
            quote! {
                stronk_utils::codec::VarInt(*self as i32).write(writer)?;
            }
        }
        s if ALLOWED_TYPES.contains(&s) => {
            let enum_type = Ident::new(s, Span::call_site());
            quote! {
                (*self as #enum_type).write(writer)?;
            }
        }
        s => panic!(
            "Unknown write strategy for enum: `{s}`. \
            Expected VarInt or a primitive type ({ALLOWED_TYPES:?})"
        ),
    };

    TokenStream::from(quote! {
        #[automatically_derived]
        impl stronk_utils::serial::WriteTo for #name {
            fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
                use stronk_utils::serial::WriteTo;

                #writer

                Ok(())
            }
        }
    })
}

/// Derives the `ClientPacket` trait for a struct.
///
/// # Panics
/// - If the `packet_id` attribute is missing or malformed.
#[proc_macro_derive(ClientPacket, attributes(packet_id))]
pub fn client_packet_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let attrs: Vec<_> = input
        .attrs
        .iter()
        .filter(|a| a.path().is_ident("packet_id"))
        .collect();

    assert!(
        !attrs.is_empty(),
        "ClientPacket derive macro requires at least one #[packet_id(...)] attribute"
    );

    let mut match_arms = Vec::new();

    for attr in attrs {
        if let Meta::List(meta) = attr.meta.clone() {
            meta.parse_nested_meta(|meta| {
                let state = meta
                    .path
                    .get_ident()
                    .expect("Expected an identifier for the protocol state")
                    .to_string();
                let value: syn::Expr = meta.value()?.parse()?;
                let state_ident = Ident::new(&state, Span::call_site());

                let arm = quote! {
                    crate::utils::ConnectionProtocol::#state_ident => Some(#value),
                };
                match_arms.push(arm);

                Ok(())
            })
            .unwrap_or_else(|e| panic!("Failed to parse `packet_id` attribute: {e}"));
        } else {
            panic!("`packet_id` attribute must be a list: `#[packet_id(STATE = \"path\", ...)]`");
        }
    }

    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics crate::packet_traits::ClientPacket for #name #ty_generics {
            fn get_id(&self, protocol: crate::utils::ConnectionProtocol) -> Option<i32> {
                match protocol {
                    #(#match_arms)*
                    _ => None,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derives the `ServerPacket` trait for a struct.
#[proc_macro_derive(ServerPacket)]
pub fn server_packet_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let expanded = quote! {
        #[automatically_derived]
        impl crate::packet_traits::ServerPacket for #name {
        }
    };

    TokenStream::from(expanded)
}
