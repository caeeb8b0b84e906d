#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the arena workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! arena-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Consumers must depend on `thiserror` themselves; the generated code refers to
//! `::thiserror::Error`.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless already derived.
/// * **Context**: a companion `<Name>Ext` trait adds `.context(..)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every variant with a source.
/// * **Conversions**: `From<Source>` for variants holding a `source` field (or a
///   field tagged `#[source]` / `#[from]`), so `?` works on upstream errors.
/// * **Internal fallback**: `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant is declared.
/// * **Formatting**: a module-local `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Applied to an enum with named-field variants only.
/// 2. Context-aware variants declare `context: Option<Cow<'static, str>>`.
/// 3. Variants with a source must also declare a context field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[arena_derive::arena_error]
/// pub enum StoreError {
///     #[error("Snapshot error{}: {source}", format_context(.context))]
///     Snapshot { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<Snapshot, StoreError> {
///     serde_json::from_str(raw).context("Parsing snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn arena_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
