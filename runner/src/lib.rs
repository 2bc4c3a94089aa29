mod client;
mod error;

pub use client::{patch_arguments, run_patch_client, PatchClient, PatchEntry, PatchFn};
pub use error::PatchError;
