// Utils compartidos

#[cfg(target_arch = "wasm32")]
pub mod google_maps_ffi;
