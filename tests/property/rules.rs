//! Property-based tests for the rule chain

use proptest::prelude::*;
use resgen::config::{PrefixMatch, RuleConfig};
use resgen::rules::{files_with_extensions, named_files, parent_dirs, RuleChain};
use resgen::vfs::Metadata;
use std::collections::BTreeSet;
use std::time::UNIX_EPOCH;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

fn path_under(depth: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..=depth).prop_map(|parts| format!("/{}", parts.join("/")))
}

/// Files ending in an excluded extension are always skipped; directories never are.
#[test]
fn test_extension_exclusion_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let skip = files_with_extensions(&[".go".to_string(), "rs".to_string()]);

    runner
        .run(&(path_under(4), prop::bool::ANY), |(stem, is_go)| {
            let ext = if is_go { ".go" } else { ".rs" };
            let file_path = format!("{}{}", stem, ext);
            let name = file_path.rsplit('/').next().unwrap_or_default().to_string();

            assert!(skip(&file_path, &Metadata::file(name.clone(), 1, UNIX_EPOCH)));
            assert!(!skip(&file_path, &Metadata::dir(name, UNIX_EPOCH)));
            assert!(!skip(&format!("{}.txt", stem), &Metadata::file("x.txt", 1, UNIX_EPOCH)));
            Ok(())
        })
        .unwrap();
}

/// Named-file rules compare the whole base name only.
#[test]
fn test_named_file_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let skip = named_files(&["Makefile".to_string()]);

    runner
        .run(&(path_under(3), segment()), |(dir, suffix)| {
            let exact = format!("{}/Makefile", dir);
            let longer = format!("{}/Makefile.{}", dir, suffix);
            assert!(skip(&exact, &Metadata::file("Makefile", 1, UNIX_EPOCH)));
            assert!(!skip(&longer, &Metadata::file("Makefile.x", 1, UNIX_EPOCH)));
            Ok(())
        })
        .unwrap();
}

/// Boundary prefixes cover the prefix and its descendants but not siblings
/// that merely share the spelling; raw prefixes cover both.
#[test]
fn test_prefix_boundary_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(path_under(3), path_under(3), segment()),
            |(prefix, rest, suffix)| {
                let meta = Metadata::file("f", 1, UNIX_EPOCH);
                let boundary = parent_dirs(&[prefix.clone()], PrefixMatch::Boundary);
                let raw = parent_dirs(&[prefix.clone()], PrefixMatch::Raw);

                let descendant = format!("{}{}", prefix, rest);
                let sibling = format!("{}{}", prefix, suffix);

                assert!(boundary(&prefix, &meta));
                assert!(boundary(&descendant, &meta));
                assert!(!boundary(&sibling, &meta));
                assert!(raw(&descendant, &meta));
                assert!(raw(&sibling, &meta));
                Ok(())
            },
        )
        .unwrap();
}

/// The chain skips exactly when some individual rule skips.
#[test]
fn test_chain_is_logical_or() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let config = RuleConfig::default();
    let chain = RuleChain::from_config(&config, &BTreeSet::new());
    let ext = files_with_extensions(&config.excluded_extensions);
    let names = named_files(&config.excluded_names);
    let prefixes = parent_dirs(&config.excluded_prefixes, config.prefix_match);

    let names_pool = prop::sample::select(vec![
        "a.txt", "b.go", "lib.rs", "Makefile", "PROJECT", "kustomization.yaml", "x.yaml",
    ]);
    let dirs_pool = prop::sample::select(vec![
        "", "/bundle", "/bundle-extra", "/operator", "/operator/patches", "/docs",
    ]);

    runner
        .run(&(dirs_pool, names_pool, prop::bool::ANY), |(dir, name, is_dir)| {
            let entry_path = format!("{}/{}", dir, name);
            let meta = if is_dir {
                Metadata::dir(name, UNIX_EPOCH)
            } else {
                Metadata::file(name, 1, UNIX_EPOCH)
            };
            let expected =
                ext(&entry_path, &meta) || names(&entry_path, &meta) || prefixes(&entry_path, &meta);
            assert_eq!(chain.should_skip(&entry_path, &meta), expected);
            Ok(())
        })
        .unwrap();
}
