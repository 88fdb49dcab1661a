//! Percent-encoding and canonical parameter ordering for OAuth 1.0a.
//!
//! The FatSecret server recomputes the signature from the query string it
//! receives, so the encoding here has to match its expectations byte for
//! byte: only `A-Z a-z 0-9 - _ . ~` pass through unchanged; space becomes
//! `%20` (never `+`), and `!`, `*`, `'`, `(`, `)` are escaped as
//! `%21`, `%2A`, `%27`, `%28`, `%29`.

use std::collections::BTreeMap;

/// Percent-encode a string for use in a signature base string or query.
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Parameters of a single request, keyed by name.
///
/// Keys and values are stored in their wire form: [`insert`](Self::insert)
/// percent-encodes both, so a value can never contribute its own `&` or `=`
/// to the canonical string. Values that are already encoded, such as a
/// computed signature, go through [`insert_encoded`](Self::insert_encoded).
/// A set is built fresh for every call and consumed by signing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: BTreeMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter given its raw key and value.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> &mut Self {
        self.params.insert(encode(key.as_ref()), encode(value.as_ref()));
        self
    }

    /// Insert a parameter whose key and value are already percent-encoded.
    pub fn insert_encoded(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Move every parameter of `other` into this set, replacing duplicates.
    pub fn merge(&mut self, other: ParameterSet) -> &mut Self {
        self.params.extend(other.params);
        self
    }

    /// The encoded value stored under an unencoded `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(&encode(key)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sorted `key=value` pairs joined with `&`.
    ///
    /// Sorting is over the whole `key=value` string rather than the key
    /// alone, so `oauth_signature=...` sorts before `oauth_signature_method=...`.
    pub fn canonicalize(&self) -> String {
        canonicalize(self.iter())
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Canonical query string for any sequence of `(key, value)` pairs.
pub fn canonicalize<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<String> = params
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    pairs.sort();
    pairs.join("&")
}
