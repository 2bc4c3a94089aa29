//! Stand-in for patchclient.dll. Each call of `Patch` appends its argument
//! string as one line to the file named by `PATCH_FIXTURE_OUTPUT`, and echoes
//! it to stdout.

use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

mod record;

#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "system" fn Patch(hwnd: *mut c_void, hinst: *mut c_void, args: *const c_char) {
    assert!(hwnd.is_null());
    assert!(hinst.is_null());
    let args = CStr::from_ptr(args).to_string_lossy();

    record::record(&args);
    println!("patching: {}", args);
}
