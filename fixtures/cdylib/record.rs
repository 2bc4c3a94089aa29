//! Shared by the fixture patch clients: appends lines to the file named by
//! `PATCH_FIXTURE_OUTPUT`, and records `unloaded` when the library goes away.

use std::fs::OpenOptions;
use std::io::Write;

pub fn record(line: &str) {
    if let Some(path) = std::env::var_os("PATCH_FIXTURE_OUTPUT") {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        writeln!(file, "{}", line).unwrap();
    }
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
mod unload {
    extern "C" fn on_unload() {
        super::record("unloaded");
    }

    #[used]
    #[link_section = ".fini_array"]
    static ON_UNLOAD: extern "C" fn() = on_unload;
}

#[cfg(windows)]
mod unload {
    use std::os::raw::c_void;

    const DLL_PROCESS_DETACH: u32 = 0;

    #[allow(non_snake_case)]
    #[no_mangle]
    pub extern "system" fn DllMain(_module: *mut c_void, reason: u32, _reserved: *mut c_void) -> i32 {
        if reason == DLL_PROCESS_DETACH {
            super::record("unloaded");
        }
        1
    }
}
