use std::path::Path;
use strudel_ref::overlay::{NOTATION_REWRITES, Overlay, OverlayError, merge_overlay};

const NOTATION: &str = concat!(
    "{\"token\":\"~\",\"meaning\":\"rest\"}\n",
    "{\"token\":\"*\",\"meaning\":\"speed up\",\"desc\":\"faster ✓\"}\n",
    "{\"token\":\"!\",\"meaning\":\"replicate\",\"desc\":\"\"}\n",
);

fn setup(dir: &Path, rewrites: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let target = dir.join("mini-notation.jsonl");
    let patch = dir.join("mini-notation-rewrites.json");
    std::fs::write(&target, NOTATION).expect("write target");
    std::fs::write(&patch, rewrites).expect("write patch");
    (target, patch)
}

#[test]
fn merges_rewrites_in_place() {
    let dir = tempfile::tempdir().expect("dir");
    let (target, patch) = setup(dir.path(), r#"{"rewrites":{"~":{"alsoAccepts":["-"]}}}"#);

    let report = merge_overlay(&target, &patch, NOTATION_REWRITES).expect("merge");
    assert_eq!(report.records, 3);
    assert_eq!(report.merged, 1);
    assert!(report.rewritten);

    let merged = std::fs::read_to_string(&target).expect("read");
    let lines: Vec<&str> = merged.lines().collect();
    let original: Vec<&str> = NOTATION.lines().collect();
    assert_eq!(lines.len(), original.len());
    assert_eq!(
        lines[0],
        r#"{"token":"~","meaning":"rest","rewrites":{"alsoAccepts":["-"]}}"#
    );
    assert_eq!(lines[1..], original[1..]);
}

#[test]
fn empty_patch_set_is_a_no_op() {
    let dir = tempfile::tempdir().expect("dir");
    let (target, patch) = setup(dir.path(), r#"{"rewrites":{}}"#);

    let report = merge_overlay(&target, &patch, NOTATION_REWRITES).expect("merge");
    assert_eq!(report.merged, 0);
    assert!(!report.rewritten);
    assert_eq!(std::fs::read_to_string(&target).expect("read"), NOTATION);
}

#[test]
fn unmatched_patches_keep_file_identical() {
    let dir = tempfile::tempdir().expect("dir");
    let (target, patch) = setup(dir.path(), r#"{"rewrites":{"@":{"note":"unused"}}}"#);

    let report = merge_overlay(&target, &patch, NOTATION_REWRITES).expect("merge");
    assert_eq!(report.merged, 0);
    assert_eq!(std::fs::read_to_string(&target).expect("read"), NOTATION);
}

#[test]
fn missing_inputs_abort_without_rewriting() {
    let dir = tempfile::tempdir().expect("dir");
    let target = dir.path().join("mini-notation.jsonl");
    std::fs::write(&target, NOTATION).expect("write target");
    let patch = dir.path().join("absent.json");

    let err = merge_overlay(&target, &patch, NOTATION_REWRITES).unwrap_err();
    assert!(matches!(err, OverlayError::Missing { ref path } if path == &patch));
    assert_eq!(std::fs::read_to_string(&target).expect("read"), NOTATION);

    let err = merge_overlay(&dir.path().join("absent.jsonl"), &target, NOTATION_REWRITES)
        .unwrap_err();
    assert!(matches!(err, OverlayError::Missing { .. }));
}

#[test]
fn corrupt_target_line_is_fatal() {
    let dir = tempfile::tempdir().expect("dir");
    let target = dir.path().join("mini-notation.jsonl");
    let patch = dir.path().join("rewrites.json");
    let corrupt = "{\"token\":\"~\"}\n{\"token\":\"*\",\n";
    std::fs::write(&target, corrupt).expect("write target");
    std::fs::write(&patch, r#"{"rewrites":{"~":1}}"#).expect("write patch");

    assert!(merge_overlay(&target, &patch, NOTATION_REWRITES).is_err());
    assert_eq!(std::fs::read_to_string(&target).expect("read"), corrupt);
}

#[test]
fn custom_join_fields() {
    let dir = tempfile::tempdir().expect("dir");
    let target = dir.path().join("functions.jsonl");
    let patch = dir.path().join("notes.json");
    std::fs::write(&target, "{\"name\":\"lpf\"}\n{\"name\":\"hpf\"}\n").expect("write");
    std::fs::write(&patch, r#"{"notes":{"hpf":"pairs with lpf"}}"#).expect("write");

    let overlay = Overlay {
        join_key: "name",
        field: "notes",
    };
    let report = merge_overlay(&target, &patch, overlay).expect("merge");
    assert_eq!(report.merged, 1);
    assert_eq!(
        std::fs::read_to_string(&target).expect("read"),
        "{\"name\":\"lpf\"}\n{\"name\":\"hpf\",\"notes\":\"pairs with lpf\"}\n"
    );
}

#[test]
fn unpatched_lines_keep_their_original_bytes() {
    let dir = tempfile::tempdir().expect("dir");
    let target = dir.path().join("mini-notation.jsonl");
    let patch = dir.path().join("rewrites.json");
    let untouched = r#"{"token":"@","meaning":"caf\u00e9","w":1.50,"n":123456789012345678901234}"#;
    std::fs::write(&target, format!("{{\"token\":\"~\"}}\n{untouched}\n")).expect("write target");
    std::fs::write(&patch, r#"{"rewrites":{"~":"-"}}"#).expect("write patch");

    let report = merge_overlay(&target, &patch, NOTATION_REWRITES).expect("merge");
    assert_eq!(report.merged, 1);
    assert_eq!(
        std::fs::read_to_string(&target).expect("read"),
        format!("{{\"token\":\"~\",\"rewrites\":\"-\"}}\n{untouched}\n")
    );
}

#[test]
fn blank_lines_are_dropped_on_rewrite() {
    let dir = tempfile::tempdir().expect("dir");
    let target = dir.path().join("mini-notation.jsonl");
    let patch = dir.path().join("rewrites.json");
    std::fs::write(&target, "{\"token\":\"~\"}\n\n{\"token\":\"*\"}\n").expect("write target");
    std::fs::write(&patch, r#"{"rewrites":{"*":1}}"#).expect("write patch");

    let report = merge_overlay(&target, &patch, NOTATION_REWRITES).expect("merge");
    assert_eq!(report.records, 2);
    assert_eq!(
        std::fs::read_to_string(&target).expect("read"),
        "{\"token\":\"~\"}\n{\"token\":\"*\",\"rewrites\":1}\n"
    );
}
