//! Behavior-driven tests for the bronze and silver layers fed by a
//! connector.

use std::fs;

use gridlake_core::{Connector, DocumentFamily, ElexonConnector};
use gridlake_store::{BronzeStore, SilverStore};
use gridlake_tests::{fixtures, source_config, window, Arc, RecordingHttpClient};
use tempfile::tempdir;

const PUBLIC_ELEXON: &str = r#"
base_url: https://data.elexon.co.uk/bmrs/api/v1
reports:
  - name: total_load
    code: B1610
    date_param_type: from_to_date
"#;

#[test]
fn when_extraction_is_persisted_bronze_layout_mirrors_logical_paths() {
    // Given: A connector and an empty bronze root
    let temp = tempdir().expect("tempdir");
    let bronze = BronzeStore::new(temp.path().join("bronze"));
    let connector = ElexonConnector::new(
        &source_config(PUBLIC_ELEXON),
        Arc::new(RecordingHttpClient::always(fixtures::PUBLIC_LOAD_JSON)),
    )
    .expect("connector");

    // When: Two days are extracted and written
    let report = bronze
        .write_all(&connector.extract(&window("2023-07-18", "2023-07-19")))
        .expect("bronze write");

    // Then: Files sit at {root}/{source}/{logical_path}
    assert_eq!(report.written, 2);
    assert!(temp
        .path()
        .join("bronze/elexon/total_load/2023-07-19.json")
        .is_file());
}

#[test]
fn when_bronze_is_transformed_silver_table_is_sorted_and_deduplicated() {
    // Given: The same document stored for two days
    let temp = tempdir().expect("tempdir");
    let bronze = BronzeStore::new(temp.path().join("bronze"));
    let silver = SilverStore::new(temp.path().join("silver"));
    let connector = ElexonConnector::new(
        &source_config(PUBLIC_ELEXON),
        Arc::new(RecordingHttpClient::always(fixtures::PUBLIC_LOAD_JSON)),
    )
    .expect("connector");
    bronze
        .write_all(&connector.extract(&window("2023-07-18", "2023-07-19")))
        .expect("bronze write");

    // When: Every bronze file is parsed into one table
    let family = DocumentFamily::for_descriptor("total_load").expect("known report");
    let mut table = family.empty_table();
    for file in bronze.list("elexon").expect("list") {
        table.append(family.parse(&bronze.read(&file).expect("read")));
    }
    let written = silver
        .write_table("elexon", "total_load", family.table_name(), table)
        .expect("silver write");

    // Then: Duplicate rows collapse and the CSV is ordered by timestamp
    assert_eq!(written.rows, 2);
    let csv = fs::read_to_string(&written.path).expect("read csv");
    assert_eq!(
        csv,
        "timestamp_utc,load_mw\n2023-07-18T00:00:00Z,22100\n2023-07-18T23:30:00Z,21050\n"
    );
}
