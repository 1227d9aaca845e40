//! Lookup name derivation

/// Derive the lookup name from a simple type name.
///
/// Lower-cases the first character when it is an ASCII upper-case letter:
/// `OrderService` becomes `orderService`. Anything else (a lower-case letter,
/// a digit, an underscore, a non-ASCII character) is left as it is, and an
/// empty name stays empty.
pub fn derive_lookup_name(simple_name: &str) -> String {
    let mut chars = simple_name.chars();
    match chars.next() {
        Some(first) => {
            let mut name = String::with_capacity(simple_name.len());
            name.push(first.to_ascii_lowercase());
            name.push_str(chars.as_str());
            name
        }
        None => String::new(),
    }
}

/// Strip the module path and generic arguments from a `type_name`.
///
/// `shop::billing::Ledger<u64>` becomes `Ledger`.
pub fn simple_name_of(qualified_name: &'static str) -> &'static str {
    let base = qualified_name
        .split_once('<')
        .map_or(qualified_name, |(base, _)| base);
    base.rsplit("::").next().unwrap_or(base)
}
