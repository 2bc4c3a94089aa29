//! A library that loads fine but has no `Patch` export.

mod record;

#[allow(non_snake_case)]
#[no_mangle]
pub extern "system" fn PatchW() -> i32 {
    0
}
