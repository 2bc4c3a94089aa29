use crate::PatchError;
use std::ffi::{CStr, CString, OsStr};
use std::os::raw::{c_char, c_void};
use std::path::{Path, PathBuf};

/// `Patch`/`PatchW` use rundll32 style signatures. The first two arguments
/// (window and instance handles) aren't relevant to our usage and are always
/// null.
pub type PatchFn = unsafe extern "system" fn(*mut c_void, *mut c_void, *const c_char);

const PATCH_SYMBOL: &[u8] = b"Patch\0";

/// A loaded patch client library.
///
/// The library is unloaded when this is dropped, or explicitly through
/// [`PatchClient::unload`] to find out whether the platform managed it.
pub struct PatchClient {
    path: PathBuf,
    lib: libloading::Library,
}

impl PatchClient {
    pub fn load(path: &Path) -> Result<Self, PatchError> {
        // dlopen("") hands back the main program instead of failing
        if path.as_os_str().is_empty() {
            return Err(PatchError::Load {
                path: path.to_path_buf(),
                source: None,
            });
        }

        log::debug!("Loading patch client: {}", path.display());
        let lib = unsafe { libloading::Library::new(path) }.map_err(|e| {
            log::debug!("{}", e);
            PatchError::Load {
                path: path.to_path_buf(),
                source: Some(e),
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            lib,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the `Patch` export. The entry borrows the library, so it can't
    /// be called once the library is gone.
    pub fn entry(&self) -> Result<PatchEntry<'_>, PatchError> {
        let symbol = unsafe { self.lib.get::<PatchFn>(PATCH_SYMBOL) }.map_err(|e| {
            log::debug!("{}", e);
            PatchError::SymbolNotFound {
                path: self.path.clone(),
                source: e,
            }
        })?;
        log::debug!("Resolved `Patch` in {}", self.path.display());
        Ok(PatchEntry { symbol })
    }

    pub fn unload(self) -> Result<(), PatchError> {
        let Self { path, lib } = self;
        log::debug!("Unloading patch client: {}", path.display());
        lib.close().map_err(|e| {
            log::debug!("{}", e);
            PatchError::Unload { path, source: e }
        })
    }
}

pub struct PatchEntry<'lib> {
    symbol: libloading::Symbol<'lib, PatchFn>,
}

impl<'lib> PatchEntry<'lib> {
    /// Call `Patch(NULL, NULL, args)`.
    ///
    /// Nothing checks that the export really has the [`PatchFn`] signature,
    /// and faults raised inside the patch client are not caught. Whoever
    /// supplies the library is trusted on both counts.
    pub fn call(&self, args: &CStr) {
        log::debug!("Invoking `Patch` with {:?}", args);
        unsafe {
            (*self.symbol)(std::ptr::null_mut(), std::ptr::null_mut(), args.as_ptr());
        }
        log::debug!("`Patch` returned");
    }
}

/// Convert a command line argument into the string handed to `Patch`.
pub fn patch_arguments(args: &OsStr) -> Result<CString, PatchError> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        args.as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = args.to_string_lossy().into_owned().into_bytes();

    CString::new(bytes).map_err(|_| PatchError::InvalidArgument)
}

/// Load the patch client at `library`, call its `Patch` export once with
/// `args`, and unload it again.
pub fn run_patch_client(library: &Path, args: &OsStr) -> Result<(), PatchError> {
    let args = patch_arguments(args)?;
    let client = PatchClient::load(library)?;
    {
        let entry = client.entry()?;
        entry.call(&args);
    }

    // the run already succeeded, a failed unload doesn't change that
    if let Err(e) = client.unload() {
        log::warn!("{}", e);
    }
    Ok(())
}
