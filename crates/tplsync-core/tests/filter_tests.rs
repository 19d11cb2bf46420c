//! Decision tables for the inclusion filter

use rstest::rstest;
use tplsync_core::{InclusionFilter, Polarity};

fn filter(rules: &[(&str, Polarity)]) -> InclusionFilter {
    let mut filter = InclusionFilter::new();
    for (pattern, polarity) in rules {
        filter.add_rule(pattern, *polarity).unwrap();
    }
    filter
}

#[rstest]
#[case("a.txt", true)]
#[case("secret/a.txt", false)]
#[case("secret/deep/a.txt", false)]
#[case("notsecret/a.txt", true)]
#[case("a.dat", false)]
fn test_include_then_exclude(#[case] path: &str, #[case] expected: bool) {
    let filter = filter(&[
        (r".*\.txt", Polarity::Include),
        (r"secret/.*\.txt", Polarity::Exclude),
    ]);
    assert_eq!(filter.decide(path), expected, "path: {}", path);
}

#[rstest]
#[case("a.txt", true)]
#[case("archive/a.txt", false)]
#[case("archive/keep/a.txt", true)]
#[case("archive/keep", false)]
fn test_exclude_then_include(#[case] path: &str, #[case] expected: bool) {
    let filter = filter(&[
        ("archive/.*", Polarity::Exclude),
        ("archive/keep/.*", Polarity::Include),
    ]);
    assert_eq!(filter.decide(path), expected, "path: {}", path);
}

#[rstest]
#[case(Polarity::Include, false)]
#[case(Polarity::Exclude, true)]
fn test_unmatched_path_takes_opposite_of_first_rule(
    #[case] first: Polarity,
    #[case] expected: bool,
) {
    let filter = filter(&[("never", first)]);
    assert_eq!(filter.decide("a.txt"), expected);
}

#[rstest]
#[case("")]
#[case("a.txt")]
#[case("x/y/z.txt")]
fn test_empty_filter_keeps_everything(#[case] path: &str) {
    assert!(InclusionFilter::new().decide(path));
}

#[rstest]
#[case("*.txt")]
#[case("(unclosed")]
#[case("[z-a]")]
fn test_invalid_patterns_are_rejected(#[case] pattern: &str) {
    let mut filter = InclusionFilter::new();
    let err = filter.include(pattern).unwrap_err();

    assert_eq!(err.pattern, pattern);
    assert!(err.to_string().contains(pattern));
    assert!(filter.is_empty());
}
