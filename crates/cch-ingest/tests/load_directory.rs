use std::fs;

use cch_ingest::{IngestError, load_tables};
use cch_model::{CellValue, TableName};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn loads_relevant_tables_and_omits_the_rest() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "Client.csv",
        "Client_Id,ClientOption_WhatTypeOfReferralIsThis\nId,Referral type\nA,Self\nB,\n",
    );
    write(
        &dir,
        "interaction.csv",
        "Client_Id,InteractionOption_ContactOutcome\nId,Outcome\nA,Care Coordination\n",
    );
    write(&dir, "Staff.csv", "Name\nmeta\nJo\n");

    let tables = load_tables(dir.path()).unwrap();

    assert!(tables.is_loaded(TableName::Client));
    assert!(tables.is_loaded(TableName::Interaction));
    assert!(!tables.is_loaded(TableName::Goalshortterm));

    let client = tables.get(TableName::Client);
    assert_eq!(client.name(), "Client");
    assert_eq!(client.height(), 2);
    assert_eq!(
        client.cell(1, "ClientOption_WhatTypeOfReferralIsThis"),
        Some(&CellValue::Null)
    );

    let interaction = tables.get(TableName::Interaction);
    assert_eq!(interaction.name(), "Interaction");
    assert_eq!(interaction.height(), 1);

    assert!(tables.get(TableName::Goalshortterm).columns().is_empty());
    assert_eq!(tables.total_rows(), 3);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = load_tables(&dir.path().join("absent"));
    assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
}

#[test]
fn empty_directory_yields_empty_mapping() {
    let dir = TempDir::new().unwrap();
    let tables = load_tables(dir.path()).unwrap();
    assert_eq!(tables.loaded().count(), 0);
    assert_eq!(tables.total_rows(), 0);
}

#[test]
fn empty_and_header_only_exports_load_as_empty_tables() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Goalshortterm.csv", "");
    write(&dir, "Client.csv", "Client_Id,Client_CreateStamp\n");
    write(
        &dir,
        "Interaction.csv",
        "Client_Id,InteractionOption_ContactOutcome\nId,Outcome\n",
    );

    let tables = load_tables(dir.path()).unwrap();

    assert!(tables.is_loaded(TableName::Goalshortterm));
    assert!(tables.get(TableName::Goalshortterm).columns().is_empty());
    assert_eq!(
        tables.get(TableName::Client).columns(),
        &["Client_Id", "Client_CreateStamp"]
    );
    assert_eq!(
        tables.get(TableName::Interaction).columns(),
        &["Client_Id", "InteractionOption_ContactOutcome"]
    );
    assert_eq!(tables.total_rows(), 0);
}
