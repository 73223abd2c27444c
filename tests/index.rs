use strudel_ref::docs::{DocsSource, generate_docs};
use strudel_ref::index::{IndexError, generate_index};

#[test]
fn groups_function_names_by_sorted_category() {
    let dir = tempfile::tempdir().expect("dir");
    let functions = dir.path().join("functions.jsonl");
    let out = dir.path().join("functions-index.jsonl");
    std::fs::write(
        &functions,
        concat!(
            "{\"name\":\"room\",\"cat\":\"Effects\"}\n",
            "\n",
            "{\"name\":\"s\",\"cat\":\"Core\",\"desc\":\"sound\"}\n",
            "{\"name\":\"delay\",\"cat\":\"Effects\"}\n",
            "{\"cat\":\"Effects\"}\n",
            "{\"name\":\"note\",\"cat\":\"Core\"}\n",
        ),
    )
    .expect("write");

    let report = generate_index(&functions, &out).expect("index");
    assert_eq!(report.categories, 2);
    assert_eq!(report.functions, 4);
    assert_eq!(
        std::fs::read_to_string(&out).expect("read"),
        "{\"cat\":\"Core\",\"names\":[\"note\",\"s\"]}\n{\"cat\":\"Effects\",\"names\":[\"delay\",\"room\"]}\n"
    );
}

#[test]
fn index_follows_generated_reference() {
    let dir = tempfile::tempdir().expect("dir");
    generate_docs(&DocsSource::new("tests/fixtures/docs"), dir.path()).expect("docs");

    let out = dir.path().join("functions-index.jsonl");
    let report = generate_index(&dir.path().join("functions.jsonl"), &out).expect("index");
    assert_eq!(report.categories, 2);
    assert_eq!(report.functions, 4);
}

#[test]
fn missing_reference_is_fatal() {
    let dir = tempfile::tempdir().expect("dir");
    let out = dir.path().join("functions-index.jsonl");
    let err = generate_index(&dir.path().join("functions.jsonl"), &out).unwrap_err();
    assert!(matches!(err, IndexError::Missing { .. }));
    assert!(!out.exists());
}

#[test]
fn corrupt_reference_line_is_fatal() {
    let dir = tempfile::tempdir().expect("dir");
    let functions = dir.path().join("functions.jsonl");
    std::fs::write(&functions, "{\"name\":\"s\",\"cat\":\"Core\"}\n{\"name\":").expect("write");
    let out = dir.path().join("functions-index.jsonl");

    let err = generate_index(&functions, &out).unwrap_err();
    assert!(err.to_string().contains("line 2"));
    assert!(!out.exists());
}
