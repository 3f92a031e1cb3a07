//! Integration tests for strata-settings

use std::f64::consts::PI;
use std::io::Write;
use strata_settings::*;
use temp_env::with_vars;

const PRINTER_YAML: &str = r#"
global:
  layer_height: 0.15
  infill_sparse_density: 45
  speed_travel: -10
  support_angle: 450
  draft_shield_height_limitation: limited
  machine_gcode_flavor: "RepRap (Volumetric)"
  mesh_rotation_matrix: "[[1, 2 ,3],[4,5,6],[7,8,9]]"
  support_extruder_nr: 1
  support_line_width: 0.4
limit_to_extruder:
  support_line_width: 1
extruders:
  - material_flow_temp_graph: "[0,200],[10,210]"
    machine_nozzle_size: 0.4
  - material_flow_temp_graph: "[abc,5]"
    machine_nozzle_size: 0.8
    support_line_width: 0.6
"#;

const DEFINITIONS_JSON: &str = r#"{
  "settings": {
    "resolution": {
      "children": {
        "layer_height": {"type": "float"},
        "line_width": {"children": {"support_line_width": {"type": "float"}}}
      }
    },
    "speed": {"children": {"speed_travel": {"type": "float"}}}
  }
}"#;

fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_typed_resolution_through_scopes() {
    let file = write_temp(PRINTER_YAML, ".yaml");
    let document = SettingsLoader::with_prefix("STRATA_IT_SCOPES")
        .from_file(file.path())
        .unwrap();

    let mut global = SettingContainer::new();
    document.apply_global(&mut global);
    let mut extruders = Vec::new();
    for index in 0..document.extruder_count() {
        let mut extruder = SettingContainer::with_parent(&global);
        document.apply_extruder(index, &mut extruder).unwrap();
        extruders.push(extruder);
    }
    let mut mesh = SettingContainer::with_parent(&extruders[0]);
    mesh.add("infill_sparse_density", "15");

    // mesh -> extruder -> global
    assert_eq!(mesh.get::<Coord>("layer_height").unwrap(), Coord(150));
    assert!((mesh.get::<Ratio>("infill_sparse_density").unwrap().value() - 0.15).abs() < 1e-12);
    assert!((extruders[0].get::<Ratio>("infill_sparse_density").unwrap().value() - 0.45).abs() < 1e-12);
    assert_eq!(mesh.get::<Velocity>("speed_travel").unwrap().value(), 0.0);
    assert!((mesh.get::<AngleRadians>("support_angle").unwrap().value() - PI / 2.0).abs() < 1e-9);
    assert_eq!(mesh.get::<AngleDegrees>("support_angle").unwrap(), AngleDegrees(450.0));
    assert_eq!(
        mesh.get::<DraftShieldHeightLimitation>("draft_shield_height_limitation").unwrap(),
        DraftShieldHeightLimitation::Limited
    );
    assert_eq!(
        mesh.get::<GCodeFlavor>("machine_gcode_flavor").unwrap(),
        GCodeFlavor::MarlinVolumetric
    );

    let matrix: FMatrix3x3 = mesh.get("mesh_rotation_matrix").unwrap();
    assert_eq!(matrix.rows, [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);

    let graph: FlowTempGraph = mesh.get("material_flow_temp_graph").unwrap();
    let pairs: Vec<(f64, f64)> = graph.data.iter().map(|p| (p.flow, p.temperature)).collect();
    assert_eq!(pairs, vec![(0.0, 200.0), (10.0, 210.0)]);
    assert!(extruders[1].get::<FlowTempGraph>("material_flow_temp_graph").unwrap().is_empty());

    // extruder-limited and extruder-by-number lookups
    assert_eq!(global.get::<Coord>("support_line_width").unwrap(), Coord(400));
    assert_eq!(
        global.get_limited::<Coord, _>("support_line_width", &extruders).unwrap(),
        Coord(600)
    );
    let support = global.get_extruder("support_extruder_nr", &extruders).unwrap();
    assert_eq!(support.get::<Coord>("machine_nozzle_size").unwrap(), Coord(800));

    let err = mesh.get::<String>("not_configured_anywhere").unwrap_err();
    assert!(err.is_missing_key());
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_env_overrides_global_scope() {
    let vars = vec![
        ("STRATA_IT_ENV_SET_LAYER_HEIGHT", Some("0.3")),
        ("STRATA_IT_ENV_SET_ADHESION_TYPE", Some("brim")),
    ];

    with_vars(vars, || {
        let loader = SettingsLoader::with_prefix("STRATA_IT_ENV");
        let document = loader.from_str(PRINTER_YAML).unwrap();
        assert_eq!(document.global["layer_height"], "0.3");
        assert_eq!(document.global["adhesion_type"], "brim");

        let env_only = loader.from_env().unwrap();
        assert_eq!(env_only.global.len(), 2);
        assert!(env_only.extruders.is_empty());
    });
}

#[cfg(unix)]
#[test]
fn test_env_overrides_skip_foreign_non_utf8_variables() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let garbage = OsStr::from_bytes(&[0xff, 0xfe]);
    let vars = vec![
        (OsStr::new("STRATA_IT_FOREIGN_BYTES"), Some(garbage)),
        (OsStr::new("STRATA_IT_UTF8_SET_SPEED_PRINT"), Some(OsStr::new("60"))),
    ];

    with_vars(vars, || {
        let document = SettingsLoader::with_prefix("STRATA_IT_UTF8").from_env().unwrap();
        assert_eq!(document.global.len(), 1);
        assert_eq!(document.global["speed_print"], "60");
    });
}

#[cfg(unix)]
#[test]
fn test_env_override_with_non_utf8_value_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let garbage = OsStr::from_bytes(&[b'0', 0xff]);
    with_vars(vec![("STRATA_IT_BYTES_SET_LAYER_HEIGHT", Some(garbage))], || {
        let err = SettingsLoader::with_prefix("STRATA_IT_BYTES").from_env().unwrap_err();
        assert!(matches!(err, SettingsError::InvalidArgument(_)));
        assert!(err.to_string().contains("STRATA_IT_BYTES_SET_LAYER_HEIGHT"));
        assert_eq!(err.exit_code(), 1);
    });
}

#[test]
fn test_load_without_path_uses_environment() {
    with_vars(vec![("STRATA_IT_LOAD_SET_SPEED_PRINT", Some("70"))], || {
        let loader = SettingsLoader::with_prefix("STRATA_IT_LOAD");
        let document = loader.load(None::<&str>).unwrap();
        assert_eq!(document.global["speed_print"], "70");
    });
}

#[test]
fn test_missing_file_is_read_error() {
    let err = SettingsLoader::new()
        .from_file("/definitely/not/here.yaml")
        .unwrap_err();
    assert!(matches!(err, SettingsError::FileReadError(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_registry_and_legacy_store() {
    let definitions = write_temp(DEFINITIONS_JSON, ".json");
    let registry = KeyRegistry::from_file(definitions.path()).unwrap();
    assert!(registry.setting_exists("support_line_width"));
    assert!(!registry.setting_exists("made_up_key"));

    let mut machine = SettingsBase::new();
    machine.set_setting("layer_height", "0.2", &registry);
    machine.set_setting("speed_travel", "150", &registry);

    let mut support_train = SettingsBase::new();
    support_train.set_setting("support_line_width", "0.5", &registry);

    let mut mesh_group = SettingsBase::with_parent(&machine);
    mesh_group.set_setting("support_line_width", "0.3", &registry);
    mesh_group.set_setting("made_up_key", "value with spaces", &registry);
    mesh_group.set_setting_inherit_base("support_line_width", &support_train);

    assert_eq!(mesh_group.get_setting_string("layer_height").unwrap(), "0.2");
    assert_eq!(mesh_group.get_setting_string("support_line_width").unwrap(), "0.5");
    assert_eq!(mesh_group.get::<Coord>("support_line_width").unwrap(), Coord(500));
    assert!(mesh_group.get_setting_string("speed_print").unwrap_err().is_missing_key());

    assert_eq!(
        mesh_group.get_all_local_settings_string(),
        " -s made_up_key=\"value\\ with\\ spaces\" -s support_line_width=\"0.3\""
    );
}

#[test]
fn test_messenger_shares_owner_state() {
    let registry: KeyRegistry = ["layer_height"].into_iter().collect();
    let mut owner = SettingsBase::new();
    {
        let mut view = SettingsMessenger::new(&mut owner);
        view.set_setting("layer_height", "0.25", &registry);
        assert_eq!(view.get::<Coord>("layer_height").unwrap(), Coord(250));
    }
    assert_eq!(owner.get_all_local_settings_string(), " -s layer_height=\"0.25\"");
}
