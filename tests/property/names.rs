//! Property tests for identifier spelling.

use clojo::codegen::names::{camel_to_dashed, is_label, member, symbol};
use proptest::prelude::*;

proptest! {
    #[test]
    fn lowercase_names_are_unchanged(name in "x[a-z0-9_]{0,12}") {
        prop_assert_eq!(symbol(&name), name);
    }

    #[test]
    fn each_hump_becomes_one_dash(name in "x[a-z]{0,5}([A-Z][a-z]{1,5}){0,3}") {
        let dashed = symbol(&name);
        let humps = name.chars().filter(|c| c.is_ascii_uppercase()).count();
        prop_assert_eq!(dashed.matches('-').count(), humps);
        prop_assert_eq!(dashed.replace('-', ""), name.to_lowercase());
    }

    #[test]
    fn dashing_is_idempotent(name in "[a-z]{1,4}([A-Z][a-z]{1,4}){0,3}") {
        let once = camel_to_dashed(&name);
        prop_assert_eq!(camel_to_dashed(&once), once.clone());
    }

    #[test]
    fn labels_become_lowercase_keywords(raw in "[A-Z][A-Z0-9_]{0,8}") {
        prop_assert!(is_label(&raw));
        let keyword = symbol(&raw);
        prop_assert!(keyword.starts_with(':'));
        prop_assert!(!keyword.chars().any(|c| c.is_ascii_uppercase() || c == '_'));
    }

    #[test]
    fn escaped_names_pass_through(inner in "[a-z?!*+<>=-]{1,10}") {
        prop_assert_eq!(symbol(&format!("\\{inner}\\")), inner);
    }

    #[test]
    fn members_keep_their_spelling(name in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
        prop_assert_eq!(member(&name), name.clone());
        prop_assert_eq!(member(&format!("_{name}")), format!("-{name}"));
    }
}
