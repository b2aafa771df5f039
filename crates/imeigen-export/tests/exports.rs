use std::fs;
use std::path::PathBuf;

use imeigen_core::is_valid_imei;
use imeigen_generate::{DeviceBatch, ImeiGenerator, TacBatch};
use imeigen_export::output::{ExportFormat, ExportOptions, write_export};
use imeigen_export::at::{AtFlavor, write_combined_at_file, write_device_at_files};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("imeigen_export_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn sample_devices() -> Vec<DeviceBatch> {
    let mut generator = ImeiGenerator::from_seed(42);
    let record = imeigen_core::DeviceRecord {
        name: "Samsung Galaxy".to_string(),
        model: "S24 Ultra".to_string(),
        device_type: imeigen_core::DeviceType::Smartphone,
        tacs: vec!["35573167".to_string(), "35554513".to_string()],
    };
    let galaxy = generator.generate_device_batch(&record, 3).expect("batch");

    let random = DeviceBatch {
        name: "Random IMEIs".to_string(),
        device_type: imeigen_core::DeviceType::Other,
        batches: vec![TacBatch {
            tac: generator.generate_random_tac(),
            imeis: vec![generator.generate_fully_random_imei().expect("generate")],
        }],
    };

    vec![galaxy, random]
}

#[test]
fn text_export_groups_imeis_by_tac() {
    let devices = sample_devices();
    let path = temp_out_dir("txt").join("all.txt");

    write_export(ExportFormat::Txt, &path, &devices, &ExportOptions::default())
        .expect("write text export");

    let contents = fs::read_to_string(&path).expect("read text export");
    assert!(contents.contains("Device: Samsung Galaxy S24 Ultra [Smartphone]"));
    assert!(contents.contains("TAC: 35573167"));
    assert!(contents.contains("TAC: 35554513"));
    for imei in &devices[0].batches[0].imeis {
        assert!(contents.contains(imei));
    }
}

#[test]
fn text_export_can_append_at_commands() {
    let devices = sample_devices();
    let path = temp_out_dir("txt_at").join("all.txt");
    let options = ExportOptions {
        include_at_commands: true,
        ..ExportOptions::default()
    };

    write_export(ExportFormat::Txt, &path, &devices, &options).expect("write text export");

    let contents = fs::read_to_string(&path).expect("read text export");
    assert!(contents.contains(r#"input="AT+EGMR=1,7,\""#));
}

#[test]
fn csv_export_emits_one_row_per_imei() {
    let devices = sample_devices();
    let expected_rows: usize = devices.iter().map(|d| d.imei_count()).sum();
    let path = temp_out_dir("csv").join("all.csv");

    write_export(ExportFormat::Csv, &path, &devices, &ExportOptions::default())
        .expect("write csv export");

    let contents = fs::read_to_string(&path).expect("read csv export");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("device,device_type,tac,imei"));
    let rows: Vec<&str> = lines.filter(|line| !line.is_empty()).collect();
    assert_eq!(rows.len(), expected_rows);
    for row in rows {
        let imei = row.rsplit(',').next().expect("imei column");
        assert!(is_valid_imei(imei), "row holds invalid IMEI: {row}");
    }
}

#[test]
fn json_export_matches_batch_structure() {
    let devices = sample_devices();
    let path = temp_out_dir("json").join("all.json");
    let options = ExportOptions {
        include_at_commands: true,
        ..ExportOptions::default()
    };

    write_export(ExportFormat::Json, &path, &devices, &options).expect("write json export");

    let contents = fs::read_to_string(&path).expect("read json export");
    let parsed: serde_json::Value = serde_json::from_str(&contents).expect("parse json export");

    assert_eq!(
        parsed["metadata"]["device_count"].as_u64(),
        Some(devices.len() as u64)
    );
    let first = &parsed["devices"][0];
    assert_eq!(first["name"].as_str(), Some("Samsung Galaxy S24 Ultra"));
    assert_eq!(first["device_type"].as_str(), Some("smartphone"));
    assert_eq!(
        first["tacs"].as_array().map(|tacs| tacs.len()),
        Some(devices[0].batches.len())
    );
    let imeis = first["imeis"].as_array().expect("imeis array");
    assert_eq!(imeis[0]["tac"].as_str(), Some("35573167"));
    assert_eq!(
        imeis[0]["imeis"].as_array().map(|list| list.len()),
        Some(3)
    );
    assert!(imeis[0]["at_commands"].is_array());
}

#[test]
fn sqlite_export_round_trips_rows() {
    let devices = sample_devices();
    let expected_rows: usize = devices.iter().map(|d| d.imei_count()).sum();
    let path = temp_out_dir("sqlite").join("all.sqlite");

    write_export(
        ExportFormat::Sqlite,
        &path,
        &devices,
        &ExportOptions::default(),
    )
    .expect("write sqlite export");

    let conn = rusqlite::Connection::open(&path).expect("open database");
    let device_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM devices", [], |row| row.get(0))
        .expect("count devices");
    let imei_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM imeis", [], |row| row.get(0))
        .expect("count imeis");

    assert_eq!(device_count as usize, devices.len());
    assert_eq!(imei_count as usize, expected_rows);

    let linked: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM imeis i JOIN devices d ON i.device_id = d.id",
            [],
            |row| row.get(0),
        )
        .expect("count joined rows");
    assert_eq!(linked, imei_count);
}

#[test]
fn sqlite_export_ignores_duplicate_imeis() {
    let devices = sample_devices();
    let path = temp_out_dir("sqlite_dup").join("all.sqlite");
    let options = ExportOptions::default();

    write_export(ExportFormat::Sqlite, &path, &devices, &options).expect("first write");
    write_export(ExportFormat::Sqlite, &path, &devices, &options).expect("second write");

    let conn = rusqlite::Connection::open(&path).expect("open database");
    let imei_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM imeis", [], |row| row.get(0))
        .expect("count imeis");
    let expected_rows: usize = devices.iter().map(|d| d.imei_count()).sum();
    assert_eq!(imei_count as usize, expected_rows, "duplicates must be ignored");
}

#[test]
fn device_at_files_are_written_per_tac() {
    let devices = sample_devices();
    let out_dir = temp_out_dir("at_files");

    let paths = write_device_at_files(&devices[0], &out_dir, AtFlavor::Both, "lte1")
        .expect("write AT files");

    assert_eq!(paths.len(), devices[0].batches.len());
    for (path, batch) in paths.iter().zip(&devices[0].batches) {
        let contents = fs::read_to_string(path).expect("read AT file");
        assert!(contents.contains(&format!("TAC {}", batch.tac)));
        for imei in &batch.imeis {
            assert!(contents.contains(&format!(r#"input="AT+EGMR=1,7,\"{imei}\"""#)));
            assert!(contents.contains(&format!(r#"AT+EGMR=1,7,"{imei}""#)));
        }
    }
}

#[test]
fn combined_at_file_respects_flavor() {
    let devices = sample_devices();
    let path = temp_out_dir("at_combined").join("combined.txt");

    write_combined_at_file(&devices, &path, AtFlavor::Fiberhome, "lte1")
        .expect("write combined AT file");

    let contents = fs::read_to_string(&path).expect("read combined AT file");
    assert!(contents.contains("# Combined AT commands (fiberhome)"));
    assert!(!contents.contains("interface lte at-chat"));
    for device in &devices {
        assert!(contents.contains(&format!("# Device: {}", device.name)));
    }
}
