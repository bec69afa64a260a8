use ods_records::records::{normalize, normalize_default, NormalizeOptions};

#[test]
fn default_options_strip_specials_uppercase_and_trim() {
    assert_eq!(normalize_default(Some(" a-b_c ")), Some("ABC".to_string()));
}

#[test]
fn collapse_only_keeps_case_and_punctuation() {
    let options = NormalizeOptions {
        remove_special_chars: false,
        remove_whitespace: true,
        uppercase: false,
    };
    assert_eq!(normalize(Some("a   b"), &options), Some("a b".to_string()));
    assert_eq!(normalize(Some(" x.y  z "), &options), Some("x.y z".to_string()));
}

#[test]
fn absent_input_stays_absent() {
    assert_eq!(normalize_default(None), None);
    assert_eq!(normalize(None, &NormalizeOptions::keep_special_chars()), None);
}

#[test]
fn whitespace_runs_survive_by_default() {
    assert_eq!(normalize_default(Some("a  b")), Some("A  B".to_string()));
}

#[test]
fn specials_are_stripped_before_whitespace_collapses() {
    let options = NormalizeOptions {
        remove_whitespace: true,
        ..NormalizeOptions::default()
    };
    // "a - b" loses the dash first, leaving a double space that then collapses.
    assert_eq!(normalize(Some("a - b"), &options), Some("A B".to_string()));
}

#[test]
fn non_ascii_letters_count_as_special() {
    assert_eq!(normalize_default(Some("José")), Some("JOS".to_string()));
}

#[test]
fn normalize_is_idempotent() {
    let option_sets = [
        NormalizeOptions::default(),
        NormalizeOptions::keep_special_chars(),
        NormalizeOptions {
            remove_special_chars: true,
            remove_whitespace: true,
            uppercase: false,
        },
    ];
    let samples = [
        "",
        "   ",
        " Hello,  World! ",
        "DOE, JOHN",
        "id-0042\t\tx",
        "mixed Case 123",
    ];
    for options in &option_sets {
        for sample in samples {
            let once = normalize(Some(sample), options);
            let twice = normalize(once.as_deref(), options);
            assert_eq!(once, twice, "sample {sample:?} with {options:?}");
        }
    }
}

#[test]
fn options_deserialize_with_defaults() {
    let options: NormalizeOptions =
        serde_json::from_value(serde_json::json!({ "remove_whitespace": true }))
            .expect("options");
    assert!(options.remove_special_chars);
    assert!(options.remove_whitespace);
    assert!(options.uppercase);
}
