use filelist::format::{filetime_to_datetime, format_size, EPOCH_DIFFERENCE};
use filelist::{
    load_settings, save_settings, ListingEngine, ListingSettings, QueryOptions, SharedListing,
    SortKey, PLACEHOLDER,
};
use tempfile::tempdir;

const HEADER: &str = "Filename,Size,Date Modified,Date Created,Attributes";

fn export(rows: &[&str]) -> String {
    std::iter::once(HEADER)
        .chain(rows.iter().copied())
        .collect::<Vec<_>>()
        .join("\r\n")
}

fn names(engine: &ListingEngine) -> Vec<String> {
    engine
        .filtered_records()
        .map(|record| record.file_name().to_string())
        .collect()
}

fn engine_with(rows: &[&str]) -> ListingEngine {
    let mut engine = ListingEngine::new();
    engine.ingest(&export(rows));
    engine
}

fn query(engine: &mut ListingEngine, text: &str) -> Vec<String> {
    engine
        .set_query(text, QueryOptions::default())
        .expect("query compiles");
    names(engine)
}

#[test]
fn absent_and_zero_sizes_render_placeholder() {
    assert_eq!(format_size(None), PLACEHOLDER);
    let engine = engine_with(&["C:\\a,0,,,32", "C:\\b,0,,,32", "C:\\c,,,,32"]);
    assert_eq!(engine.aggregate_size(), PLACEHOLDER);
    let record = engine.records().get(2).expect("record");
    assert_eq!(engine.format_size(record), PLACEHOLDER);
}

#[test]
fn repeated_queries_are_idempotent() {
    let mut engine = engine_with(&["/x/b2.log,5,,,32", "/x/a1.log,9,,,32", "/x/c3.txt,1,,,32"]);
    engine.set_sort(SortKey::Size, false);
    let first = query(&mut engine, "*.log");
    let second = query(&mut engine, "*.log");
    assert_eq!(first, vec!["a1.log", "b2.log"]);
    assert_eq!(first, second);
}

#[test]
fn file_names_sort_naturally() {
    let engine = engine_with(&["/d/file2,,,,32", "/d/file10,,,,32", "/d/file1,,,,32"]);
    assert_eq!(names(&engine), vec!["file1", "file2", "file10"]);
}

#[test]
fn wildcards_match_single_and_runs_of_characters() {
    let mut engine = engine_with(&["a.txt,1,,,32", "dir/b.txt,1,,,32", "notes.md,1,,,32"]);
    assert_eq!(query(&mut engine, "file:*.txt"), vec!["a.txt", "b.txt"]);

    let mut engine = engine_with(&["report,1,,,32", "repart,1,,,32", "repoort,1,,,32"]);
    assert_eq!(query(&mut engine, "rep?rt"), vec!["repart", "report"]);
}

#[test]
fn negation_keeps_directories() {
    let mut engine = engine_with(&[
        "/src/foo.rs,1,,,32",
        "/src/foo,,,,16",
        "/src/bar,,,,16",
        "/src/main.rs,1,,,32",
    ]);
    assert_eq!(query(&mut engine, "!file:foo"), vec!["bar", "main.rs"]);
}

#[test]
fn path_scope_ignores_name_and_attribute_text() {
    let mut engine = engine_with(&[
        "/etc/hosts,1,,,32",
        "/var/log,1,,,/etc",
        "/home/my-etc-notes,1,,,32",
    ]);
    assert_eq!(query(&mut engine, "path:/etc"), vec!["hosts"]);
    assert_eq!(query(&mut engine, "/etc"), vec!["hosts", "log"]);
    assert_eq!(query(&mut engine, "file:etc"), vec!["my-etc-notes"]);
}

#[test]
fn pagination_boundaries() {
    let rows = (0..45)
        .map(|index| format!("/p/f{index:02},1,,,32"))
        .collect::<Vec<_>>();
    let mut engine = engine_with(&rows.iter().map(String::as_str).collect::<Vec<_>>());

    assert_eq!(engine.total_pages(), 3);
    let page = engine.get_page(3, 20).expect("page");
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0].file_name(), "f40");

    let page = engine.get_page(4, 20).expect("page");
    assert_eq!(page.current_page, 3);
    let batches = page.batches(2).count();
    assert_eq!(batches, 3);
}

#[test]
fn filetime_epoch_boundary_is_absent() {
    assert_eq!(filetime_to_datetime(Some(116_444_736_000_000_000)), None);
    assert!(filetime_to_datetime(Some(EPOCH_DIFFERENCE + 10_000)).is_some());
}

#[test]
fn directory_exclusion_leaves_aggregate_unchanged() {
    let mut engine = engine_with(&[
        "C:\\docs,8192,,,16",
        "C:\\docs\\a.bin,1048576,,,32",
        "C:\\docs\\hidden,,,,18",
    ]);
    let before = engine.aggregate_size();
    assert_eq!(engine.set_directory_inclusion(false), 1);
    assert!(engine.filtered_records().all(|record| !record.is_directory()));
    assert_eq!(engine.aggregate_size(), before);
    assert_eq!(before, "1.00 MB");
}

#[test]
fn attribute_bits_decode_in_table_order() {
    let engine = engine_with(&["/a,1,,,33"]);
    let record = engine.records().get(0).expect("record");
    assert_eq!(engine.describe_attributes(record), "Read-only, Archive");
}

#[test]
fn export_files_and_settings_persist() {
    let dir = tempdir().expect("tempdir");
    let export_path = dir.path().join("listing.csv");
    std::fs::write(&export_path, export(&["/a/one.txt,10,,,32", "/a/two.txt,20,,,32"]))
        .expect("write export");

    let mut engine = ListingEngine::new();
    assert_eq!(engine.ingest_file(&export_path).expect("ingest").len(), 2);
    engine.set_query("two", QueryOptions::default()).expect("query");

    let settings_path = dir.path().join("config").join("filelist.json");
    save_settings(&settings_path, &engine.settings()).expect("save");
    let restored: ListingSettings = load_settings(&settings_path).expect("load");

    let mut restored_engine = ListingEngine::with_settings(restored);
    restored_engine.ingest_file(&export_path).expect("ingest");
    // Ingestion clears the query; the stored text is reapplied explicitly.
    let last_query = engine.settings().last_query;
    restored_engine
        .set_query(&last_query, restored_engine.query_options())
        .expect("query");
    assert_eq!(names(&restored_engine), vec!["two.txt"]);

    assert!(ListingEngine::new()
        .ingest_file(&dir.path().join("missing.csv"))
        .is_err());
}

#[test]
fn published_snapshots_survive_reingestion() {
    let mut engine = engine_with(&["/a,1,,,32", "/b,1,,,32"]);
    let shared = SharedListing::new(engine.snapshot());
    let reader_view = shared.load();

    engine.ingest(&export(&["/c,1,,,32"]));
    shared.publish(engine.snapshot());

    assert_eq!(reader_view.filtered_count(), 2);
    assert_eq!(shared.load().filtered_count(), 1);
}
