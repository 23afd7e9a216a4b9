//! End-to-end integration tests for blog2md.
//!
//! Every test builds its export fixture inline, runs the pipeline against
//! a temp directory, and checks the files on disk. No network, no fixed
//! paths; the suite is safe to run in CI as-is.

use blog2md::{
    convert, convert_content, inspect, sanitize, Blog2MdError, ConversionConfig, SourceFormat,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Write an export fixture into a temp dir and return (dir, file path).
fn fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    (dir, path)
}

fn config_into(dir: &Path) -> ConversionConfig {
    ConversionConfig::builder()
        .output_dir(dir)
        .build()
        .expect("valid config")
}

/// Assert a written document passes the basic shape checks.
fn assert_document_shape(text: &str, context: &str) {
    assert!(
        text.starts_with("---\n"),
        "[{context}] document must open with front-matter delimiter"
    );
    assert!(
        text.contains("\n---\n\n"),
        "[{context}] document must close front matter before the body"
    );
    assert!(
        text.ends_with('\n'),
        "[{context}] document must end with a newline"
    );
}

const CSV_EXPORT: &str = "\
Title,Post status,Published date,Tags,Categories,Content
\"My Post\",\"Published\",\"2024-01-01\",\"tech\",\"a|b\",\"Hello world\"
";

// ── CSV flow ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn csv_export_produces_reference_document() {
    let (_in_dir, input) = fixture("input.csv", CSV_EXPORT);
    let out_dir = tempfile::tempdir().unwrap();

    let output = convert(input.to_str().unwrap(), &config_into(out_dir.path()))
        .await
        .expect("conversion should succeed");

    assert_eq!(output.stats.total_records, 1);
    assert_eq!(output.stats.written_records, 1);
    assert_eq!(output.stats.failed_records, 0);

    let written = std::fs::read_to_string(out_dir.path().join("My Post.md")).unwrap();
    let expected = "---\n\
                    title: My Post\n\
                    status: Published\n\
                    datePublished: '2024-01-01'\n\
                    tags: tech\n\
                    categories:\n  - a\n  - b\n\
                    ---\n\n\
                    Hello world\n";
    assert_eq!(written, expected);
    assert_document_shape(&written, "csv reference");
}

#[tokio::test]
async fn csv_record_without_title_still_produces_a_file() {
    let export = "Title,Content\n,\"body without a title\"\n";
    let (_in_dir, input) = fixture("input.csv", export);
    let out_dir = tempfile::tempdir().unwrap();

    let output = convert(input.to_str().unwrap(), &config_into(out_dir.path()))
        .await
        .unwrap();

    // The Title column exists but is empty: empty string, not absent.
    assert_eq!(output.stats.written_records, 1);
    let written = std::fs::read_to_string(out_dir.path().join(".md")).unwrap();
    assert!(written.contains("title: ''"));
}

#[tokio::test]
async fn csv_record_with_absent_title_column_writes_underscore_file() {
    let export = "Content\nno title column at all\n";
    let (_in_dir, input) = fixture("input.csv", export);
    let out_dir = tempfile::tempdir().unwrap();

    let output = convert(input.to_str().unwrap(), &config_into(out_dir.path()))
        .await
        .unwrap();

    assert_eq!(output.stats.written_records, 1);
    assert_eq!(output.records[0].file_name, "_.md");
    let written = std::fs::read_to_string(out_dir.path().join("_.md")).unwrap();
    assert!(
        !written.contains("title:"),
        "absent title must be omitted from front matter"
    );
    assert!(written.contains("no title column at all"));
}

#[tokio::test]
async fn sparse_csv_fields_are_omitted_not_defaulted() {
    let export = "Title,Tags\nSparse Post,\n";
    let (_in_dir, input) = fixture("input.csv", export);
    let out_dir = tempfile::tempdir().unwrap();

    convert(input.to_str().unwrap(), &config_into(out_dir.path()))
        .await
        .unwrap();

    let written = std::fs::read_to_string(out_dir.path().join("Sparse Post.md")).unwrap();
    // Tags column present but empty → rendered as ''.
    assert!(written.contains("tags: ''"));
    // Columns absent from the header never appear.
    assert!(!written.contains("status:"));
    assert!(!written.contains("datePublished:"));
    assert!(!written.contains("categories:"));
    // Body defaults to empty: front matter then a lone blank body.
    assert!(written.ends_with("---\n\n\n"));
}

// ── XML flow ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn xml_cdata_categories_match_csv_equivalent() {
    let xml = "<data><post>\
               <Title>My Post</Title>\
               <Status>Published</Status>\
               <Date>2024-01-01</Date>\
               <Tags>tech</Tags>\
               <Categories><![CDATA[a|b]]></Categories>\
               <Content>Hello world</Content>\
               </post></data>";
    let (_in_dir, input) = fixture("export.xml", xml);
    let out_dir = tempfile::tempdir().unwrap();

    convert(input.to_str().unwrap(), &config_into(out_dir.path()))
        .await
        .unwrap();

    let written = std::fs::read_to_string(out_dir.path().join("My Post.md")).unwrap();
    assert!(written.contains("categories:\n  - a\n  - b"));

    // Identical to what the CSV flow produces for the same post.
    let (_csv_dir, csv_input) = fixture("input.csv", CSV_EXPORT);
    let csv_out = tempfile::tempdir().unwrap();
    convert(csv_input.to_str().unwrap(), &config_into(csv_out.path()))
        .await
        .unwrap();
    let from_csv = std::fs::read_to_string(csv_out.path().join("My Post.md")).unwrap();
    assert_eq!(written, from_csv);
}

#[tokio::test]
async fn xml_missing_root_fails_whole_flow_with_no_output() {
    let (_in_dir, input) = fixture("export.xml", "<feed><post><Title>t</Title></post></feed>");
    let out_parent = tempfile::tempdir().unwrap();
    let out_dir = out_parent.path().join("markdown");

    let err = convert(input.to_str().unwrap(), &config_into(&out_dir))
        .await
        .unwrap_err();

    assert!(matches!(err, Blog2MdError::MalformedXml { .. }));
    assert!(!out_dir.exists(), "parse failure must precede any write");
}

#[tokio::test]
async fn xml_with_zero_posts_is_malformed() {
    let err = convert_content(
        "<data><!-- nothing here --></data>",
        SourceFormat::Xml,
        &ConversionConfig::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Blog2MdError::MalformedXml { .. }));
}

// ── Format dispatch ──────────────────────────────────────────────────────────

#[tokio::test]
async fn unsupported_extension_reports_and_writes_nothing() {
    let (_in_dir, input) = fixture("notes.txt", "Title,Content\na,b\n");
    let out_parent = tempfile::tempdir().unwrap();
    let out_dir = out_parent.path().join("markdown");

    let err = convert(input.to_str().unwrap(), &config_into(&out_dir))
        .await
        .unwrap_err();

    assert!(matches!(err, Blog2MdError::UnsupportedFormat { .. }));
    assert!(!out_dir.exists(), "no output may be produced");
}

#[tokio::test]
async fn format_override_beats_extension_detection() {
    let (_in_dir, input) = fixture("mislabelled.csv", "<data><post><Title>t</Title></post></data>");
    let out_dir = tempfile::tempdir().unwrap();

    let config = ConversionConfig::builder()
        .output_dir(out_dir.path())
        .format(SourceFormat::Xml)
        .build()
        .unwrap();

    let output = convert(input.to_str().unwrap(), &config).await.unwrap();
    assert_eq!(output.stats.written_records, 1);
}

#[tokio::test]
async fn missing_input_file_is_fatal() {
    let err = convert("/definitely/not/here.csv", &ConversionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Blog2MdError::InputNotFound { .. }));
}

// ── Collisions and batching ──────────────────────────────────────────────────

#[tokio::test]
async fn colliding_titles_leave_one_surviving_file() {
    // "a/b" and "a:b" both sanitise to "a_b".
    let export = "Title,Content\na/b,first\na:b,second\n";
    let (_in_dir, input) = fixture("input.csv", export);
    let out_dir = tempfile::tempdir().unwrap();

    // concurrency 1 makes completion order deterministic for the assert.
    let config = ConversionConfig::builder()
        .output_dir(out_dir.path())
        .concurrency(1)
        .build()
        .unwrap();

    let output = convert(input.to_str().unwrap(), &config).await.unwrap();
    assert_eq!(output.stats.failed_records, 0, "collision is not an error");

    let files: Vec<_> = std::fs::read_dir(out_dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1, "last write wins, one file survives");
    let survivor = std::fs::read_to_string(out_dir.path().join("a_b.md")).unwrap();
    assert!(survivor.contains("second"));
}

#[tokio::test]
async fn batch_survives_many_records() {
    let mut export = String::from("Title,Categories,Content\n");
    for i in 0..50 {
        export.push_str(&format!("Post {i},x|y,body {i}\n"));
    }
    let (_in_dir, input) = fixture("input.csv", &export);
    let out_dir = tempfile::tempdir().unwrap();

    let output = convert(input.to_str().unwrap(), &config_into(out_dir.path()))
        .await
        .unwrap();

    assert_eq!(output.stats.written_records, 50);
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 50);
    // Results come back in source order regardless of write completion order.
    assert!(output.records.windows(2).all(|w| w[0].index < w[1].index));
}

#[tokio::test]
async fn existing_output_directory_is_reused() {
    let (_in_dir, input) = fixture("input.csv", CSV_EXPORT);
    let out_dir = tempfile::tempdir().unwrap();
    // Directory already exists and already has content.
    std::fs::write(out_dir.path().join("keep.md"), "existing").unwrap();

    convert(input.to_str().unwrap(), &config_into(out_dir.path()))
        .await
        .expect("existing directory must not be an error");

    assert!(out_dir.path().join("keep.md").exists());
    assert!(out_dir.path().join("My Post.md").exists());
}

// ── Inspect ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn inspect_reports_format_count_and_fields() {
    let (_in_dir, input) = fixture("input.csv", CSV_EXPORT);

    let summary = inspect(input.to_str().unwrap()).await.unwrap();

    assert_eq!(summary.format, SourceFormat::Csv);
    assert_eq!(summary.record_count, 1);
    assert_eq!(
        summary.field_names,
        [
            "Title",
            "Post status",
            "Published date",
            "Tags",
            "Categories",
            "Content"
        ]
    );
}

#[tokio::test]
async fn inspect_writes_nothing() {
    let (_in_dir, input) = fixture("input.csv", CSV_EXPORT);
    let before: Vec<_> = std::fs::read_dir(_in_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();

    inspect(input.to_str().unwrap()).await.unwrap();

    let after: Vec<_> = std::fs::read_dir(_in_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(before, after);
}

// ── Sanitiser properties (public API) ────────────────────────────────────────

#[test]
fn sanitize_removes_all_reserved_characters() {
    let nasty = "a\\b/c:d*e?f\"g<h>i|j\r\nk\tl";
    let clean = sanitize(Some(nasty));
    for ch in ['\\', '/', ':', '*', '?', '"', '<', '>', '|', '\r', '\n', '\t'] {
        assert!(!clean.contains(ch), "{ch:?} survived sanitisation");
    }
    assert_eq!(sanitize(Some(&clean)), clean, "must be idempotent");
}

#[test]
fn sanitize_absent_is_underscore() {
    assert_eq!(sanitize(None), "_");
}
