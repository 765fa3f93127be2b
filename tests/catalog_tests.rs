//! Integration tests for catalogue discovery and querying.
//!
//! Tests the complete flow from an on-disk source tree to repository
//! answers: scanning, stock-entry injection, malformed-file tolerance, and
//! lookup behavior.

use std::fs;
use std::path::Path;

use tablet_variant_manager::parser;
use tablet_variant_manager::services::{QueryError, VariantRepository};
use tempfile::TempDir;

/// Writes a minimal variant document under a device directory.
fn write_variant(device_dir: &Path, file: &str, name: &str) {
    fs::create_dir_all(device_dir).unwrap();
    fs::write(
        device_dir.join(file),
        format!(r#"{{ "Name": "{name}", "Specifications": {{ "Width": 216 }} }}"#),
    )
    .unwrap();
}

/// Builds a small catalogue source tree with three manufacturers.
fn build_source_tree() -> TempDir {
    let root = TempDir::new().unwrap();

    write_variant(&root.path().join("Wacom/Intuos"), "pro.json", "Pro");
    write_variant(&root.path().join("Wacom/Intuos"), "art.json", "Art");
    write_variant(&root.path().join("Huion/H640P"), "h640p.json", "H640P Tweaked");
    fs::create_dir_all(root.path().join("XP-Pen/Deco")).unwrap();

    root
}

#[test]
fn lists_every_manufacturer_with_nonempty_device_lists() {
    let root = build_source_tree();
    let repository = VariantRepository::open(root.path()).unwrap();

    assert_eq!(
        repository.manufacturers(),
        vec!["Huion", "Wacom", "XP-Pen"]
    );

    for manufacturer in repository.manufacturers() {
        for device in repository.devices(manufacturer).unwrap() {
            let variants = repository.variants(manufacturer, device).unwrap();
            assert!(!variants.is_empty());
            assert_eq!(variants[0], format!("{device} Stock"));
        }
    }
}

#[test]
fn stock_variant_always_resolves_without_a_document() {
    let root = build_source_tree();
    let repository = VariantRepository::open(root.path()).unwrap();

    for manufacturer in ["Wacom", "Huion", "XP-Pen"] {
        for device in repository.devices(manufacturer).unwrap() {
            let stock_name = format!("{device} Stock");
            let variant = repository
                .resolve_variant(manufacturer, device, &stock_name)
                .unwrap();
            assert!(variant.is_stock());
            assert!(variant.configuration().is_none());
        }
    }
}

#[test]
fn malformed_file_contributes_nothing_and_is_not_fatal() {
    let root = TempDir::new().unwrap();
    let device_dir = root.path().join("Wacom/Intuos");
    write_variant(&device_dir, "pro.json", "Pro");
    fs::write(device_dir.join("bad.json"), "definitely not json").unwrap();

    let repository = VariantRepository::open(root.path()).unwrap();
    assert_eq!(
        repository.variants("Wacom", "Intuos").unwrap(),
        vec!["Intuos Stock", "Pro"]
    );
}

#[test]
fn variants_keep_file_listing_order_after_the_stock_entry() {
    let root = build_source_tree();
    let repository = VariantRepository::open(root.path()).unwrap();

    // art.json sorts before pro.json in the device directory.
    assert_eq!(
        repository.variants("Wacom", "Intuos").unwrap(),
        vec!["Intuos Stock", "Art", "Pro"]
    );
}

#[test]
fn lookups_on_absent_names_report_which_level_failed() {
    let root = build_source_tree();
    let repository = VariantRepository::open(root.path()).unwrap();

    assert!(matches!(
        repository.devices("Gaomon").unwrap_err(),
        QueryError::UnknownManufacturer { .. }
    ));
    assert!(matches!(
        repository.variants("Wacom", "Bamboo").unwrap_err(),
        QueryError::UnknownDevice { .. }
    ));
    assert!(matches!(
        repository
            .resolve_variant("Wacom", "Intuos", "Ghost")
            .unwrap_err(),
        QueryError::UnknownVariant { .. }
    ));
}

#[test]
fn written_document_round_trips_through_the_parser() {
    let root = build_source_tree();
    let repository = VariantRepository::open(root.path()).unwrap();

    let configuration = repository
        .resolve_configuration("Wacom", "Intuos", "Pro")
        .unwrap()
        .unwrap();

    let out = TempDir::new().unwrap();
    let path = out.path().join("roundtrip.json");
    parser::write_configuration(configuration, &path).unwrap();

    let reparsed = parser::parse_variant_file(&path).unwrap();
    assert_eq!(&reparsed, configuration);
}

#[test]
fn scan_does_not_mutate_the_source_tree() {
    let root = build_source_tree();
    let before: Vec<_> = walk(root.path());

    let _repository = VariantRepository::open(root.path()).unwrap();

    let after: Vec<_> = walk(root.path());
    assert_eq!(before, after);
}

/// Collects all paths under `root`, sorted, for before/after comparison.
fn walk(root: &Path) -> Vec<std::path::PathBuf> {
    let mut paths = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path.clone());
            }
            paths.push(path);
        }
    }
    paths.sort();
    paths
}
