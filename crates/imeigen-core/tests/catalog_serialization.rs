use imeigen_core::{Catalog, DeviceRecord, DeviceType, validate_catalog};

#[test]
fn serializes_catalog_deterministically() {
    let catalog = Catalog {
        catalog_version: "0.1".to_string(),
        devices: vec![DeviceRecord {
            name: "Nighthawk M7 Pro".to_string(),
            model: "MR7400".to_string(),
            device_type: DeviceType::Router,
            tacs: vec!["35890743".to_string()],
        }],
    };

    let json = serde_json::to_string_pretty(&catalog).expect("serialize catalog");
    let expected = r#"{
  "catalog_version": "0.1",
  "devices": [
    {
      "name": "Nighthawk M7 Pro",
      "model": "MR7400",
      "device_type": "router",
      "tacs": [
        "35890743"
      ]
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn parses_and_validates_catalog_document() {
    let json = r#"{
      "catalog_version": "0.1",
      "devices": [
        {
          "name": "iPhone",
          "model": "6 Pro Max",
          "device_type": "smartphone",
          "tacs": ["35006781", "35461444"]
        },
        {
          "name": "U60 PRO",
          "model": "MU5250",
          "device_type": "router",
          "tacs": ["86600507"]
        }
      ]
    }"#;

    let catalog: Catalog = serde_json::from_str(json).expect("parse catalog");
    validate_catalog(&catalog).expect("catalog is valid");
    assert_eq!(catalog.devices.len(), 2);
    assert_eq!(catalog.devices[0].tacs.len(), 2);
    assert_eq!(catalog.devices[0].display_name(), "iPhone 6 Pro Max");
}

#[test]
fn rejects_unknown_device_type() {
    let json = r#"{
      "catalog_version": "0.1",
      "devices": [
        {
          "name": "Mystery",
          "model": "X",
          "device_type": "drone",
          "tacs": ["35006781"]
        }
      ]
    }"#;

    let parsed: Result<Catalog, _> = serde_json::from_str(json);
    assert!(parsed.is_err());
}
