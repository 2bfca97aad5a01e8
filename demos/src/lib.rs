//! Runnable demos for the cliparse workspace; see the `examples`
//! targets declared in the manifest.
