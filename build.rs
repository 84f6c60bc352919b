use std::env;
use std::fs;
use std::path::Path;

/// Variables que la app lee con `option_env!` (ver src/config.rs)
const CONFIG_KEYS: &[&str] = &[
    "GOOGLE_MAPS_API_KEY",
    "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY",
    "ENABLE_LOGGING",
    "DEFAULT_MAP_CENTER_LAT",
    "DEFAULT_MAP_CENTER_LNG",
    "DEFAULT_MAP_ZOOM",
    "ROUTE_STROKE_COLOR",
    "ROUTE_STROKE_WEIGHT",
    "READINESS_POLL_INTERVAL_MS",
    "READINESS_MAX_ATTEMPTS",
    "AUTOCOMPLETE_WIDGET",
];

fn main() {
    // Cargar variables desde .env si existe
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE, con comillas opcionales
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // El entorno real tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Set GOOGLE_MAPS_API_KEY (see .env.example) or the app will show the missing key screen.");
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
