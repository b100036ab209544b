use log::warn;

use super::params::VehicleParams;

// ---------------------------------------------------------------------------
// Named vehicle presets
// ---------------------------------------------------------------------------

/// Registry key of the preset used when a name is not recognised.
pub const DEFAULT_PRESET: &str = "ferrari";

/// Sport car.
pub fn ferrari() -> VehicleParams {
    VehicleParams::preset("Ferrari 488", 1400.0, 8000.0, 20.0)
}

/// City car.
pub fn fiat() -> VehicleParams {
    VehicleParams::preset("Fiat Punto", 1100.0, 2500.0, 55.0)
}

/// Heavy goods vehicle.
pub fn truck() -> VehicleParams {
    VehicleParams::preset("Truck (TIR)", 15000.0, 12000.0, 150.0)
}

pub fn motorcycle() -> VehicleParams {
    VehicleParams::preset("Motorcycle", 300.0, 2500.0, 8.0)
}

pub fn tank() -> VehicleParams {
    VehicleParams::preset("Tank", 60000.0, 40000.0, 400.0)
}

/// Registry keys in display order.
pub const KEYS: [&str; 5] = ["ferrari", "fiat", "truck", "motorcycle", "tank"];

fn canonical_key(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    let canonical = match key.as_str() {
        "ferrari" | "sport" | "sports" | "samochod" | "samochód" | "sportowy" => "ferrari",
        "fiat" | "city" | "miejski" | "osobowy" => "fiat",
        "truck" | "heavy" | "tir" | "ciezarowka" | "ciężarówka" => "truck",
        "motorcycle" | "motorbike" | "motocykl" => "motorcycle",
        "tank" | "czolg" | "czołg" => "tank",
        _ => return None,
    };
    Some(canonical)
}

/// Resolve a name token (case-insensitive, English or Polish) to a preset.
pub fn lookup(name: &str) -> Option<VehicleParams> {
    let params = match canonical_key(name)? {
        "ferrari" => ferrari(),
        "fiat" => fiat(),
        "truck" => truck(),
        "motorcycle" => motorcycle(),
        _ => tank(),
    };
    Some(params)
}

/// Like [`lookup`], but unknown names fall back to the sport-car preset.
pub fn by_name(name: &str) -> VehicleParams {
    lookup(name).unwrap_or_else(|| {
        warn!("unknown vehicle '{}', falling back to '{}'", name, DEFAULT_PRESET);
        ferrari()
    })
}

/// All presets as `(key, params)` pairs.
pub fn all() -> Vec<(&'static str, VehicleParams)> {
    KEYS.iter()
        .filter_map(|&k| lookup(k).map(|p| (k, p)))
        .collect()
}
