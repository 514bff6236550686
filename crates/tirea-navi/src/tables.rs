// Default Na'vi tables: infix slot groups and shared sub-automata

use tirea_trie::{InfixTable, SubtreeMap, build_tree, combine_trees};

// ---------------------------------------------------------------------------
// Infixes
// ---------------------------------------------------------------------------

/// Pre-first position: causative and reflexive.
const INFIXES_0: &[&str] = &["", "äpeyk", "epeyk =äpeyk", "äp", "ep =äp", "eyk"];

/// First position: tense, aspect and mood.
const INFIXES_1: &[&str] = &[
    "", "iv", "irv", "ilv", "imv", "iyev", "ìyev", "am", "ìm", "ìy", "ay", "ìsy", "ìsh=ìsy",
    "asy", "ash=asy", "er -rr", "arm", "ìrm", "ìry", "ary", "ol -ll", "alm", "ìlm", "ìly",
    "aly",
];

/// Second position: speaker attitude.
const INFIXES_2: &[&str] = &[
    "", "eiy >i >ì >rr >ll", "ei", "äng", "eng =äng", "ats", "uy",
];

/// Infix groups for the slots `<0>`, `<1>` and `<2>`.
pub fn default_infix_table() -> InfixTable {
    let mut table = InfixTable::new();
    table.insert_group("0", INFIXES_0);
    table.insert_group("1", INFIXES_1);
    table.insert_group("2", INFIXES_2);
    table
}

// ---------------------------------------------------------------------------
// Sub-automata
// ---------------------------------------------------------------------------

/// Name of the subtree that collects suffixes derived from adpositions.
pub const ADPOSITION_SUBTREE: &str = "nsadp";

type Rules = &'static [&'static [&'static str]];

const CONSONANT_CASES: Rules = &[&["/return"], &["-ìl|-ti|-it|-ur|-ìri|-ä|-e=ä", "/return"]];
const LOANWORD_CASES: Rules = &[&["/return"], &["-ìl|-it|-ur|-ìri|-ä|-e=ä", "/return"]];
const PRONOUN_CASES: Rules = &[&["-l|-t|-ti|-r|-ru|-ri", "/return"]];

const SUBTREES: &[(&str, Rules)] = &[
    // Noun prefixes
    (
        "np",
        &[
            &["$np2"],
            &["me+|pxe+|ay+", "$np2"],
            &["fì-|tsa-|pe+", "$np2"],
            &["fì-|tsa-|pe+", "me+|pxe+|ay+", "$np2"],
            &["sna-|munsna-", "$np2"],
            &["fra-", "$np2"],
            &["fra-", "ay+", "$np2"],
            &["fay+|pay+", "$np2"],
        ],
    ),
    // Prefixes closest to the noun, reached through np
    ("np2", &[&["/return"], &["fne-", "/return"]]),
    // Modifying noun suffixes
    (
        "nsmod",
        &[
            &["$nsadp"],
            &["-sì", "/return"],
            &["-fkeyk", "$ncec|$nsmod_fkeyk|$nsadp"],
            &["-tsyìp", "$ncec|$nsmod_tsyìp|$nsadp"],
            &["-o", "$ncevou|$nsadp"],
            &["-pe", "$ncev|$nsadp"],
        ],
    ),
    (
        "nsmod_fkeyk",
        &[
            &["-tsyìp", "$ncec|$nsmod_tsyìp|$nsadp"],
            &["-o", "$ncevou|$nsadp"],
            &["-pe", "$ncev|$nsadp"],
        ],
    ),
    (
        "nsmod_tsyìp",
        &[&["-o", "$ncevou|$nsadp"], &["-pe", "$ncev|$nsadp"]],
    ),
    // Noun part of si-verbs
    (
        "nsmod_si",
        &[
            &["/return"],
            &["-o|-pe", "/return"],
            &["-tsyìp", "/return"],
            &["-tsyìp", "-o|-pe", "/return"],
        ],
    ),
    (ADPOSITION_SUBTREE, &[]),
    // Case endings after a vowel
    (
        "ncev",
        &[&["/return"], &["-l|-t|-ti|-r|-ru|-ri|-yä|-ye=yä", "/return"]],
    ),
    // After "ia"
    (
        "nceia",
        &[&["/return"], &["-l|-t|-ti|-r|-ru|-ri", "/return"], &["-yä", "/return"]],
    ),
    // After "o" or "u"
    (
        "ncevou",
        &[&["/return"], &["-l|-t|-ti|-r|-ru|-ri|-ä|-e=ä", "/return"]],
    ),
    ("ncec", CONSONANT_CASES),
    // Loanwords whose final ì is replaced
    ("ncevìlw", LOANWORD_CASES),
    ("ncect", LOANWORD_CASES),
    ("ncec'", CONSONANT_CASES),
    // After "ay" or "ey"
    (
        "ncedy",
        &[
            &["/return"],
            &["-l|-ìl|-t|-ti|-ur|-ru|-ri|-ä|-e=ä", "/return"],
            &["-it|-ìri", "/return"],
        ],
    ),
    // After "aw" or "ew"
    (
        "ncedw",
        &[&["/return"], &["-l|-ìl|-ti|-it|-r|-ur|-ri|-ä|-e=ä", "/return"]],
    ),
    ("pce_o", PRONOUN_CASES),
    ("pce_ng_a", PRONOUN_CASES),
];

/// The noun prefix and case-ending families every dictionary starts with.
///
/// [`ADPOSITION_SUBTREE`] starts empty and is filled as adpositions are
/// inserted.
pub fn default_subtree_map() -> SubtreeMap {
    SUBTREES
        .iter()
        .map(|&(name, rules)| {
            let tree = combine_trees(rules.iter().map(|tokens| build_tree(tokens)));
            (name.to_string(), tree)
        })
        .collect()
}
