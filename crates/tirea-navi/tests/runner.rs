//! End-to-end matching against a fixture trie over the default Na'vi tables.

use tirea_navi::Dictionary;
use tirea_navi::tables::{default_infix_table, default_subtree_map};
use tirea_trie::{Node, Runner, SubtreeMap, build_tree, combine_trees};

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn fixture_tree() -> Node {
    combine_trees([
        build_tree(&["fm", "<0>", "<1>", "et", "<2>", "ok", "=392"]),
        build_tree(&["fm", "<0>", "<1>", "<2>", "i", "=396"]),
        build_tree(&["fm", "<0>", "<1>", "<2>", "al", "=3700"]),
        build_tree(&["f", "<0>", "<1>", "rrf", "<2>", "en", "=464"]),
        build_tree(&["s", "<0>", "<1>", "<2>", "i", "=1788"]),
        build_tree(&["$np", "tì-", "fm", "<us>", "etok", "=392:n."]),
        build_tree(&["$np", "fmetok", "-yu", "=392:n."]),
        build_tree(&["$np", "uvan", "$nsmod|$ncec", "=2644"]),
        build_tree(&["$np", "uvan", " s", "<0>", "<1>", "<2>", "i", "=2648"]),
        build_tree(&["$np", "tìtaron", "=7336"]),
        build_tree(&["sìk", "=1796"]),
        build_tree(&["tìk", "=13294"]),
        build_tree(&["tsìk", "=8280"]),
        build_tree(&["ma", "=1056"]),
        build_tree(&["$np", "'eylan", "=56"]),
        build_tree(&["z", "<0>", "<1>", "<2>", "o", "=6420"]),
        build_tree(&["'", "<0>", "<1>", "rrk", "<2>", "o", "=10496"]),
        build_tree(&["$np", "fe'ranvi", "$nsmod|$ncec", "=9256"]),
        build_tree(&["$np", "fe'ran", "$nsmod|$ncec", "=9248"]),
        // A made-up prefix, so that a prefix can start with a glottal stop.
        build_tree(&["$np", "'e-", "lì'u", "$nsmod|$ncec", "=-1"]),
        build_tree(&["tsuk-", "k", "anom", "=8392"]),
        build_tree(&["'a", "sap", "$nsmod_si", " ", "s", "<1>", "i", "=12962"]),
        build_tree(&["a-", "$np", "'asap-s", "<us>", "i", "=12962:adj."]),
    ])
}

fn fixture() -> Dictionary {
    let mut dict = Dictionary::new();
    dict.insert(fixture_tree());
    dict
}

fn render(results: &[tirea_navi::Analysis]) -> Vec<String> {
    results.iter().map(ToString::to_string).collect()
}

const RUN_CASES: &[(&str, &[&str])] = &[
    ("fmetok", &["392"]),
    ("fmeretok", &["392 <er>"]),
    ("fmeyketok", &["392 <eyk>"]),
    ("fmeteiok", &["392 <ei>"]),
    ("fmäpeykìlmetängok", &["392 <äpeyk,ìlm,äng>"]),
    ("folrrfen", &["464 <ol>"]),
    ("ferrrfen", &[]),
    ("seiyi", &["1788 <eiy>"]),
    ("frrfeiyen", &[]),
    ("tìfmusetok", &["392:n. tì- <us>"]),
    ("sìtaron", &["7336 t→s"]),
    ("fraysìtaron", &["7336 fra-ay- t→s"]),
    ("saysìtaron", &["7336 tsa-ay- ts→s,t→s"]),
    ("sìfmusetok", &["392:n. tì- <us> t→s"]),
    ("saysìfmusetok", &["392:n. tsa-ay-tì- <us> ts→s,t→s"]),
    ("fepesìfmusetok", &["392:n. pe-pxe-tì- <us> p→f,px→p,t→s"]),
    ("fìuvan", &["2644 fì-"]),
    ("fneuvan", &["2644 fne-"]),
    ("fìfneuvan", &["2644 fì-fne-"]),
    ("ayuvan", &["2644 ay-"]),
    ("frayuvan", &["2644 fra-ay-"]),
    ("sayuvan", &["2644 tsa-ay- ts→s"]),
    ("uvanä", &["2644 -ä"]),
    ("uvan si", &["2644 + si", "2648"]),
    ("sayfneuvanti", &["2644 tsa-ay-fne- -ti ts→s"]),
    ("sìk", &["1796", "13294 t→s", "8280 ts→s"]),
    ("'eylan", &["56"]),
    ("meeylan", &["56 me- 'e→e"]),
    ("pxeeylan", &["56 pxe- 'e→e"]),
    ("meylan", &["56 me- 'e→e"]),
    ("peylan", &["56 pxe- px→p,'e→e", "56 pe- 'e→e"]),
    ("pxeylan", &["56 pxe- 'e→e"]),
    ("zeyko", &["6420 <eyk>"]),
    ("rrko", &[]),
    ("eykrrko", &["10496 <eyk> 'e→e"]),
    ("zeykeyko", &[]),
    ("zerero", &[]),
    ("fe'ran", &["9248"]),
    ("fe'ranvi", &["9256"]),
    ("tsukkanom", &["8392 tsuk-"]),
    ("tsukanom", &["8392 tsuk-"]),
    ("'asap soli", &["12962 <ol>"]),
    ("ayasap-susi", &["12962:adj. a-ay- <us> 'a→a"]),
    ("melì'u", &["-1 me-'e- 'e→e"]),
];

// ---------------------------------------------------------------------------
// Single words
// ---------------------------------------------------------------------------

#[test]
fn run_fixture_words() {
    let dict = fixture();
    for &(word, expected) in RUN_CASES {
        assert_eq!(render(&dict.lookup(word)), expected, "lookup {word:?}");
    }
}

#[test]
fn run_is_case_insensitive() {
    let dict = fixture();
    assert_eq!(render(&dict.lookup("FìUvan")), vec!["2644 fì-"]);
    assert_eq!(render(&dict.lookup("MA")), vec!["1056"]);
}

#[test]
fn runner_counts_work() {
    let dict = fixture();
    let mut runner = dict.runner();
    assert_eq!(runner.step_count(), 0);
    runner.run("fmäpeykìlmetängok");
    let steps = runner.step_count();
    assert!(steps > 0);
    assert!(runner.comparison_count() > 0);

    runner.run("ma");
    assert!(runner.step_count() > steps);
}

#[test]
#[should_panic(expected = "unknown subtree")]
fn missing_subtree_panics() {
    let mut dict = Dictionary::with_tables(SubtreeMap::new(), default_infix_table());
    dict.insert(build_tree(&["$np", "uvan", "=2644"]));
    dict.lookup("uvan");
}

// ---------------------------------------------------------------------------
// Running text
// ---------------------------------------------------------------------------

#[test]
fn extract_fixture_text() {
    let dict = fixture();
    let cases: &[(&str, &[&str])] = &[
        (
            "fmetok fìuvanti, ma eylan",
            &["[1] 392", "[2] 2644 fì- -ti", "[3] 1056", "[4] 56 'e→e"],
        ),
        (
            "fmetok fìkeyawralì'uti, ma eylan",
            &["[1] 392", "[3] 1056", "[4] 56 'e→e"],
        ),
        ("tsauvan seri", &["[1] 2648 tsa- <er>"]),
        ("blerg?!", &[]),
        ("", &[]),
    ];
    for &(text, expected) in cases {
        assert_eq!(render(&dict.extract(text)), expected, "extract {text:?}");
    }
}

#[test]
fn extract_strict_stops_at_unknown_word() {
    let dict = fixture();
    assert!(dict.extract_strict("fmetok fìkeyawralì'uti, ma eylan").is_none());
    let results = dict.extract_strict("fmetok, ma").unwrap();
    assert_eq!(render(&results), vec!["[1] 392", "[2] 1056"]);
}

#[test]
fn runner_over_borrowed_tables() {
    let root = fixture_tree();
    let subtrees = default_subtree_map();
    let infixes = default_infix_table();
    let mut runner = Runner::new(&root, &subtrees, &infixes);
    assert_eq!(render(&runner.run("fìuvan")), vec!["2644 fì-"]);
    assert_eq!(render(&runner.extract("ma uvan")), vec!["[1] 1056", "[2] 2644"]);
}

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

fn sorted_lookup(dict: &Dictionary, word: &str) -> Vec<String> {
    let mut rendered = render(&dict.lookup(word));
    rendered.sort();
    rendered
}

#[test]
fn optimize_keeps_every_reading() {
    let plain = fixture();
    let mut optimized = fixture();
    optimized.optimize();

    assert!(optimized.is_sorted());
    assert!(optimized.size() < plain.size());
    for &(word, _) in RUN_CASES {
        assert_eq!(sorted_lookup(&optimized, word), sorted_lookup(&plain, word), "{word:?}");
    }
}

#[test]
fn optimize_is_idempotent() {
    let mut dict = fixture();
    dict.optimize();
    let once = dict.root().to_string();
    let size = dict.size();

    dict.optimize();
    assert_eq!(dict.root().to_string(), once);
    assert_eq!(dict.size(), size);
}

#[test]
fn fixture_references_resolve() {
    assert!(fixture().validate().is_ok());
}

// ---------------------------------------------------------------------------
// Phrases
// ---------------------------------------------------------------------------

#[test]
fn phrase_folds_inflected_words() {
    let mut dict = fixture();
    dict.add_phrase("p1", "fmetok ma").unwrap();
    assert_eq!(render(&dict.phrases()["p1"]), vec!["[1] 392", "[2] 1056"]);

    assert_eq!(
        render(&dict.extract("fmeretok ma eylan")),
        vec!["[1] p1 <er>", "[3] 56 'e→e"]
    );
    // Out of order: nothing to fold.
    assert_eq!(render(&dict.extract("ma fmetok")), vec!["[1] 1056", "[2] 392"]);
    // A single word never folds.
    assert_eq!(render(&dict.extract("fmetok")), vec!["[1] 392"]);
}

#[test]
fn phrase_needs_known_words() {
    let mut dict = fixture();
    let err = dict.add_phrase("p2", "fmetok blerg").unwrap_err();
    assert_eq!(
        err.to_string(),
        "phrase p2 does not parse word by word: \"fmetok blerg\""
    );
}
