//! Simple settings demo
//!
//! A minimal example showing scope loading and typed lookups

use std::fs;
use strata_settings::{
    Coord, FMatrix3x3, FlowTempGraph, Ratio, SettingContainer, SettingsError, SettingsLoader,
    SettingsResult,
};
use tempfile::TempDir;

fn main() -> SettingsResult<()> {
    println!("Simple Strata Settings Demo");

    // Create temporary directory for demo files
    let temp_dir = TempDir::new()?;

    // Create a simple settings file
    let settings_path = temp_dir.path().join("printer.yaml");
    let settings_content = r#"
global:
  layer_height: 0.2
  infill_sparse_density: 20
  mesh_rotation_matrix: "[[1,0,0],[0,1,0],[0,0,1]]"
extruders:
  - machine_nozzle_size: 0.4
    material_flow_temp_graph: "[[2,200],[6,220]]"
"#;

    fs::write(&settings_path, settings_content)?;

    // Load the settings and build the scopes
    let document = SettingsLoader::new().from_file(&settings_path)?;
    let mut global = SettingContainer::new();
    document.apply_global(&mut global);
    let mut extruder = SettingContainer::with_parent(&global);
    document.apply_extruder(0, &mut extruder)?;

    let layer_height: Coord = extruder.get("layer_height")?;
    let infill: Ratio = extruder.get("infill_sparse_density")?;
    let matrix: FMatrix3x3 = extruder.get("mesh_rotation_matrix")?;
    let curve: FlowTempGraph = extruder.get("material_flow_temp_graph")?;

    println!("   Layer height: {} µm", layer_height);
    println!("   Infill density: {}", infill);
    println!("   Identity transform: {}", matrix.is_identity());
    println!("   Temperature at 4 mm³/s: {}", curve.temperature_at(4.0, 200.0, true));

    match extruder.get::<String>("not_a_setting") {
        Err(SettingsError::MissingKey { key }) => println!("   No value for '{}'", key),
        other => println!("   Unexpected: {:?}", other),
    }

    Ok(())
}
