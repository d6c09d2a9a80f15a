//! Property-based tests for the deterministic metadata wrapper

use proptest::prelude::*;
use resgen::serializer::RustSourceSerializer;
use resgen::vfs::modtime::ZERO_TIME;
use resgen::vfs::{FileSystem, FixedModTime, MemoryFs, Walker};
use std::time::{Duration, UNIX_EPOCH};

fn tree() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::vec(
        (
            prop::collection::vec("[a-z]{1,6}", 1..=3).prop_map(|p| format!("/{}", p.join("/"))),
            prop::collection::vec(any::<u8>(), 0..32),
        ),
        1..8,
    )
}

fn build(files: &[(String, Vec<u8>)], secs: u64) -> MemoryFs {
    let mut fs = MemoryFs::new().with_modified(UNIX_EPOCH + Duration::from_secs(secs));
    for (file_path, contents) in files {
        // Skip paths that collide with an already registered file used as a directory.
        let clashes = files.iter().any(|(other, _)| {
            other != file_path && file_path.starts_with(&format!("{}/", other))
        });
        if !clashes {
            fs = fs.with_file(file_path, contents);
        }
    }
    fs
}

/// Every entry reported through the wrapper has the zero modification time.
#[test]
fn test_wrapper_zeroes_every_entry() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(tree(), any::<u32>()), |(files, secs)| {
            let view = FixedModTime::new(build(&files, u64::from(secs)));
            assert_eq!(view.stat("/").unwrap().modified, ZERO_TIME);
            for entry in Walker::new(&view).walk().unwrap() {
                assert_eq!(entry.metadata().modified, ZERO_TIME);
            }
            Ok(())
        })
        .unwrap();
}

/// Rendering the same tree with different underlying times gives identical output.
#[test]
fn test_render_independent_of_modification_times() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let serializer = RustSourceSerializer::new();

    runner
        .run(&(tree(), any::<u32>(), any::<u32>()), |(files, a, b)| {
            let left = FixedModTime::new(build(&files, u64::from(a)));
            let right = FixedModTime::new(build(&files, u64::from(b)));
            let (left_src, left_summary) = serializer.render(&left, "res").unwrap();
            let (right_src, right_summary) = serializer.render(&right, "res").unwrap();
            assert_eq!(left_src, right_src);
            assert_eq!(left_summary, right_summary);
            Ok(())
        })
        .unwrap();
}
