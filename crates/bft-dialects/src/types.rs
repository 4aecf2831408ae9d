//! Type shorthand registry.
//!
//! Maps canonical type names to the compact codes used when rendering
//! literals and kernels in diagnostics, and back. Parametrized types appear
//! both in their generic catalog form (`decimal<P,S>`) and collapsed to the
//! family name (`decimal`).

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::LazyLock;

/// `(canonical, short)` pairs. Later pairs win when building the inverse map.
pub const TYPE_SHORTHANDS: &[(&str, &str)] = &[
    ("required enumeration", "req"),
    ("i8", "i8"),
    ("i16", "i16"),
    ("i32", "i32"),
    ("i64", "i64"),
    ("fp32", "fp32"),
    ("fp64", "fp64"),
    ("string", "str"),
    ("binary", "vbin"),
    ("boolean", "bool"),
    ("timestamp", "ts"),
    ("timestamp_tz", "tstz"),
    ("date", "date"),
    ("time", "time"),
    ("interval_year", "iyear"),
    ("interval_day", "iday"),
    ("uuid", "uuid"),
    ("fixedchar<N>", "fchar"),
    ("varchar<N>", "vchar"),
    ("fixedbinary<N>", "fbin"),
    ("decimal<P,S>", "dec"),
    ("precision_timestamp<P>", "pts"),
    ("precision_timestamp_tz<P>", "ptstz"),
    ("struct<T1,T2,...,TN>", "struct"),
    ("list<T>", "list"),
    ("map<K,V>", "map"),
    ("map", "map"),
    ("any", "any"),
    ("any1", "any1"),
    ("any2", "any2"),
    ("any3", "any3"),
    ("user defined type", "u!name"),
    // parametrized families
    ("fixedchar", "fchar"),
    ("varchar", "vchar"),
    ("fixedbinary", "fbin"),
    ("decimal", "dec"),
    ("precision_timestamp", "pts"),
    ("precision_timestamp_tz", "ptstz"),
    ("struct", "struct"),
    ("list", "list"),
    ("geometry", "geometry"),
];

static CANONICAL_TO_SHORT: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TYPE_SHORTHANDS.iter().copied().collect());

static SHORT_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        TYPE_SHORTHANDS
            .iter()
            .map(|&(canonical, short)| (short, canonical))
            .collect()
    });

/// Prefix shared by all wildcard type variables (`any`, `any1`, ...).
pub const WILDCARD_PREFIX: &str = "any";

/// Whether a kernel argument type is a wildcard type variable.
pub fn is_wildcard(type_name: &str) -> bool {
    type_name.starts_with(WILDCARD_PREFIX)
}

/// Family name of a parametrized type: `decimal<38,2>` -> `decimal`.
pub fn type_family(type_name: &str) -> &str {
    match type_name.find('<') {
        Some(idx) => type_name[..idx].trim_end(),
        None => type_name,
    }
}

/// Short code for a canonical type name.
///
/// A concretely parametrized name that is not itself in the table is
/// collapsed to its family before giving up.
pub fn to_short(canonical: &str) -> Result<&'static str> {
    CANONICAL_TO_SHORT
        .get(canonical)
        .or_else(|| CANONICAL_TO_SHORT.get(type_family(canonical)))
        .copied()
        .ok_or_else(|| Error::unknown_type(canonical))
}

/// Canonical type name for a short code.
pub fn to_canonical(short: &str) -> Result<&'static str> {
    SHORT_TO_CANONICAL
        .get(short)
        .copied()
        .ok_or_else(|| Error::unknown_type(short))
}

/// Short code when known, the name itself otherwise. Diagnostics only.
pub fn display_type(type_name: &str) -> &str {
    to_short(type_name).map_or(type_name, |short| short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_map_to_short_codes() {
        assert_eq!(to_short("string").unwrap(), "str");
        assert_eq!(to_short("timestamp_tz").unwrap(), "tstz");
        assert_eq!(to_short("decimal<P,S>").unwrap(), "dec");
        assert_eq!(to_short("required enumeration").unwrap(), "req");
    }

    #[test]
    fn concrete_parameters_collapse_to_family() {
        assert_eq!(to_short("decimal<38,2>").unwrap(), "dec");
        assert_eq!(to_short("varchar<10>").unwrap(), "vchar");
        assert_eq!(to_short("list<i32>").unwrap(), "list");
        assert_eq!(type_family("precision_timestamp<6>"), "precision_timestamp");
        assert_eq!(type_family("i64"), "i64");
    }

    #[test]
    fn inverse_prefers_later_table_entries() {
        assert_eq!(to_canonical("dec").unwrap(), "decimal");
        assert_eq!(to_canonical("map").unwrap(), "map");
        assert_eq!(to_canonical("fchar").unwrap(), "fixedchar");
        assert_eq!(to_canonical("vbin").unwrap(), "binary");
    }

    #[test]
    fn unknown_names_are_errors() {
        assert_eq!(to_short("tensor"), Err(Error::unknown_type("tensor")));
        assert_eq!(to_canonical("tns"), Err(Error::unknown_type("tns")));
    }

    #[test]
    fn display_falls_back_to_given_name() {
        assert_eq!(display_type("boolean"), "bool");
        assert_eq!(display_type("tensor"), "tensor");
    }

    #[test]
    fn wildcards_share_the_any_prefix() {
        for name in ["any", "any1", "any2", "any3"] {
            assert!(is_wildcard(name), "{name} should be a wildcard");
        }
        assert!(!is_wildcard("i32"));
        assert!(!is_wildcard("list<any1>"));
    }
}
