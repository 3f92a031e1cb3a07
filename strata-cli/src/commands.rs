//! Command implementations

use crate::cli::{SettingArgs, ValueKind};
use anyhow::{Context, Result};
use std::path::Path;
use strata_settings::{
    parse_setting_arg, AngleDegrees, AngleRadians, Coord, DraftShieldHeightLimitation, Duration,
    FMatrix3x3, FlowTempGraph, GCodeFlavor, KeyRegistry, LayerIndex, Ratio, SettingContainer,
    SettingRegistry, SettingValue, SettingsBase, SettingsDocument, SettingsError, SettingsLoader,
    SettingsResult, Temperature, Velocity,
};
use tracing::{debug, warn};

/// Load the registry of legal keys, or an empty one when no file is given
pub fn load_registry(definitions: Option<&Path>) -> Result<KeyRegistry> {
    match definitions {
        Some(path) => KeyRegistry::from_file(path)
            .with_context(|| format!("Failed to load definitions from {}", path.display())),
        None => Ok(KeyRegistry::new()),
    }
}

/// Load the settings document and apply command-line settings on top of it
pub fn load_document(settings: Option<&Path>, inputs: &SettingArgs) -> Result<SettingsDocument> {
    let mut document = SettingsLoader::new()
        .load(settings)
        .context("Failed to load settings document")?;

    for arg in &inputs.pairs {
        let (key, value) = parse_setting_arg(arg)?;
        document.set(key, value);
    }
    for arg in &inputs.extruder_pairs {
        let (index, pair) = arg.split_once(':').ok_or_else(|| {
            SettingsError::InvalidArgument(format!("Expected N:key=value, got '{}'", arg))
        })?;
        let index: usize = index.trim().parse().map_err(|e| {
            SettingsError::InvalidArgument(format!("Invalid extruder number in '{}': {}", arg, e))
        })?;
        let (key, value) = parse_setting_arg(pair)?;
        document.set_extruder(index, key, value);
    }
    Ok(document)
}

/// Resolve `key` in the requested scope and render it as `kind`
pub fn run_get(
    document: &SettingsDocument,
    registry: &KeyRegistry,
    key: &str,
    kind: ValueKind,
    extruder: Option<usize>,
    limited: bool,
) -> Result<String> {
    if !registry.is_empty() && !registry.setting_exists(key) {
        warn!("Querying setting '{}' which is not in the definitions", key);
    }

    let mut global = SettingContainer::new();
    document.apply_global(&mut global);
    let mut extruders = Vec::with_capacity(document.extruder_count());
    for index in 0..document.extruder_count() {
        let mut scope = SettingContainer::with_parent(&global);
        document.apply_extruder(index, &mut scope)?;
        extruders.push(scope);
    }
    debug!("Built global scope and {} extruder scope(s)", extruders.len());

    let scope = match extruder {
        Some(index) => extruders.get(index).ok_or(SettingsError::ExtruderOutOfRange {
            index: index as i64,
            count: extruders.len(),
        })?,
        None => &global,
    };

    render(scope, key, kind, &extruders, limited)
}

fn fetch<T: SettingValue>(
    scope: &SettingContainer<'_>,
    key: &str,
    extruders: &[SettingContainer<'_>],
    limited: bool,
) -> SettingsResult<T> {
    if limited {
        scope.get_limited(key, extruders)
    } else {
        scope.get(key)
    }
}

fn render(
    scope: &SettingContainer<'_>,
    key: &str,
    kind: ValueKind,
    extruders: &[SettingContainer<'_>],
    limited: bool,
) -> Result<String> {
    let text = match kind {
        ValueKind::String => fetch::<String>(scope, key, extruders, limited)?,
        ValueKind::Int => fetch::<i64>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Float => fetch::<f64>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Bool => fetch::<bool>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Coord => fetch::<Coord>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Degrees => fetch::<AngleDegrees>(scope, key, extruders, limited)?
            .value()
            .to_string(),
        ValueKind::Radians => fetch::<AngleRadians>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Ratio => fetch::<Ratio>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Velocity => fetch::<Velocity>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Duration => fetch::<Duration>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Temperature => {
            fetch::<Temperature>(scope, key, extruders, limited)?.to_string()
        }
        ValueKind::Layer => fetch::<LayerIndex>(scope, key, extruders, limited)?.to_string(),
        ValueKind::DraftShield => {
            fetch::<DraftShieldHeightLimitation>(scope, key, extruders, limited)?.to_string()
        }
        ValueKind::FlowTemp => {
            let graph = fetch::<FlowTempGraph>(scope, key, extruders, limited)?;
            serde_json::to_string(&graph.data)?
        }
        ValueKind::Matrix => {
            let matrix = fetch::<FMatrix3x3>(scope, key, extruders, limited)?;
            serde_json::to_string(&matrix.rows)?
        }
        ValueKind::Flavor => fetch::<GCodeFlavor>(scope, key, extruders, limited)?.to_string(),
        ValueKind::Extruder => {
            scope.get_extruder(key, extruders)?;
            scope.get::<i64>(key)?.to_string()
        }
    };
    Ok(text)
}

/// Render the global settings as `-s key="value"` arguments
pub fn run_args(document: &SettingsDocument, registry: &KeyRegistry) -> String {
    let mut store = SettingsBase::new();
    document.apply_to_scope(&mut store, registry);
    store.get_all_local_settings_string()
}

/// Process exit status for an error, taken from the first settings error in its chain
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<SettingsError>())
        .map(SettingsError::exit_code)
        .unwrap_or(1)
}
