// tests/integration_core.rs
//! End-to-end pipeline tests: raw batch text through extraction, comparison,
//! and report formatting, plus config file loading.

use codesim_core::config::Config;
use codesim_core::extract::parse_batch;
use codesim_core::keywords::build_keyword_set;
use codesim_core::report;
use codesim_core::similarity::{find_groups, similarity};
use codesim_core::trie::PrefixMap;
use std::io::Write;

const KEYWORDS: &str = "if\nelse\nwhile\nfor\nreturn\nint\nchar\nvoid\n";

fn keyword_set() -> PrefixMap {
    build_keyword_set(KEYWORDS, 1 << 16).unwrap()
}

#[test]
fn renamed_locals_are_an_exact_match() {
    // Same call structure, same bodies, different identifiers everywhere.
    let batch = concat!(
        "1 main(){foo();bar();}",
        "foo(){int alpha=1;alpha=alpha+2;}",
        "bar(){int beta=9;}",
        "\u{c}",
        "2 main(){first();second();}",
        "first(){int gamma=1;gamma=gamma+2;}",
        "second(){int delta=9;}",
    );

    let out = parse_batch(batch, &keyword_set(), &Config::new()).unwrap();
    assert!(out.rejected.is_empty());
    let [a, b] = &out.submissions[..] else {
        panic!("expected two submissions");
    };

    assert_eq!(a.proc_stream, b.proc_stream);
    assert_eq!(similarity(&a.proc_stream, &b.proc_stream), 1.0);

    let groups = find_groups(&out.submissions, 0.95);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].ids, vec![1, 2]);
}

#[test]
fn uncalled_function_never_reaches_the_fingerprint() {
    let with_dead = "1 main(){foo();}foo(){x=1;}bar(){y=2;z=3;w=4;}";
    let without = "\u{c}2 main(){foo();}foo(){x=1;}";
    let batch = format!("{with_dead}{without}");

    let out = parse_batch(&batch, &keyword_set(), &Config::new()).unwrap();
    let [a, b] = &out.submissions[..] else {
        panic!("expected two submissions");
    };

    // Identical fingerprints byte for byte: bar contributed nothing.
    assert_eq!(a.fingerprint_len(), b.fingerprint_len());
    assert_eq!(a.proc_stream, b.proc_stream);
}

#[test]
fn malformed_submission_does_not_poison_the_batch() {
    let batch = concat!(
        "1 main)(",
        "\u{c}",
        "2 main(){go();}go(){a=1;}",
        "\u{c}",
        "3 main(){go();}go(){b=1;}",
    );

    let out = parse_batch(batch, &keyword_set(), &Config::new()).unwrap();
    assert_eq!(out.rejected.len(), 1);
    assert_eq!(out.rejected[0].id, 1);

    let groups = find_groups(&out.submissions, 0.95);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].ids, vec![2, 3]);
}

#[test]
fn terminal_report_is_one_line_per_group() {
    let batch = concat!(
        "1 main(){f();}f(){q=1;}",
        "\u{c}",
        "2 main(){f();}f(){r=1;}",
        "\u{c}",
        "3 main(){while(1){}}",
    );

    let out = parse_batch(batch, &keyword_set(), &Config::new()).unwrap();
    let groups = find_groups(&out.submissions, 0.95);
    let text = report::format_terminal(&groups);
    // Submission 3 is ungrouped and produces no line.
    assert_eq!(text, "1 2\n");
}

#[test]
fn json_report_lists_groups_as_id_arrays() {
    let batch = concat!(
        "1 main(){f();}f(){q=1;}",
        "\u{c}",
        "2 main(){f();}f(){r=1;}",
    );

    let out = parse_batch(batch, &keyword_set(), &Config::new()).unwrap();
    let groups = find_groups(&out.submissions, 0.95);

    let json = report::format_report(&groups, "json");
    let parsed: Vec<Vec<u32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, vec![vec![1, 2]]);
}

#[test]
fn config_file_overrides_defaults_but_not_all_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "threshold = 0.8").unwrap();
    writeln!(file, "max_functions = 32").unwrap();
    file.flush().unwrap();

    let mut config = Config::new();
    config.load_file(file.path()).unwrap();
    config.validate().unwrap();

    assert_eq!(config.threshold, 0.8);
    assert_eq!(config.max_functions, 32);
    // Untouched keys keep their defaults.
    assert_eq!(config.max_ident_len, 64);
}

#[test]
fn out_of_range_threshold_fails_validation() {
    let mut config = Config::new();
    config.threshold = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn missing_config_file_is_an_io_error() {
    let mut config = Config::new();
    let err = config.load_file(std::path::Path::new("/nonexistent/codesim.toml"));
    assert!(err.is_err());
}
