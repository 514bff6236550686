// Initial consonant mutation (lenition) and consonant cluster safety

use std::borrow::Cow;

use crate::character::is_vowel;

/// Cluster mutations, longest first. Each entry is the leading text, its
/// replacement and the label shown in analyses.
const MUTATIONS: &[(&str, &str, &str)] = &[
    ("ts", "s", "ts→s"),
    ("tx", "t", "tx→t"),
    ("kx", "k", "kx→k"),
    ("px", "p", "px→p"),
    ("t", "s", "t→s"),
    ("k", "h", "k→h"),
    ("p", "f", "p→f"),
];

/// Apply lenition to the start of `text`.
///
/// Returns the display label and the mutated text. The label is empty and
/// the text is returned unchanged when nothing lenites, which includes a
/// glottal stop before `l`/`r` and a lone glottal stop.
///
/// ```
/// use tirea_core::lenition::apply_lenition;
///
/// assert_eq!(apply_lenition("tskxe"), ("ts→s".into(), "skxe".into()));
/// assert_eq!(apply_lenition("'eylan"), ("'e→e".into(), "eylan".into()));
/// assert_eq!(apply_lenition("uvan"), ("".into(), "uvan".into()));
/// ```
pub fn apply_lenition(text: &str) -> (Cow<'static, str>, Cow<'_, str>) {
    for &(from, to, label) in MUTATIONS {
        if let Some(rest) = text.strip_prefix(from) {
            let mutated = if text[from.len() - to.len()..].starts_with(to) {
                // ts→s keeps the tail of the original cluster.
                Cow::Borrowed(&text[from.len() - to.len()..])
            } else {
                Cow::Owned(format!("{to}{rest}"))
            };
            return (Cow::Borrowed(label), mutated);
        }
    }

    if let Some(rest) = text.strip_prefix('\'') {
        if let Some(vowel) = rest.chars().next().filter(|&c| is_vowel(c)) {
            return (Cow::Owned(format!("'{vowel}→{vowel}")), Cow::Borrowed(rest));
        }
    }

    (Cow::Borrowed(""), Cow::Borrowed(text))
}

/// Check whether `common` would split a consonant cluster (or the bare
/// glottal stop) that lenition must be able to see whole.
///
/// `a` and `b` are the two full texts sharing the prefix `common`.
pub fn breaks_cluster(common: &str, a: &str, b: &str) -> bool {
    let either = |prefix: &str| a.starts_with(prefix) || b.starts_with(prefix);
    match common {
        "'" => true,
        "t" => either("ts") || either("tx"),
        "p" => either("px"),
        "k" => either("kx"),
        "n" => either("ng"),
        _ => false,
    }
}
