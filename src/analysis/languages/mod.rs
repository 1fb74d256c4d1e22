//! Language adapter implementations and registry.

mod go;
mod python;
mod rust_lang;

pub use go::GoAdapter;
pub use python::PythonAdapter;
pub use rust_lang::RustAdapter;

use once_cell::sync::OnceCell;

use super::LanguageAdapter;

static GO_ADAPTER: OnceCell<GoAdapter> = OnceCell::new();
static PYTHON_ADAPTER: OnceCell<PythonAdapter> = OnceCell::new();
static RUST_ADAPTER: OnceCell<RustAdapter> = OnceCell::new();

/// Register all adapters. Idempotent; called lazily by `adapter_for`.
pub fn register_adapters() {
    GO_ADAPTER.get_or_init(GoAdapter::new);
    PYTHON_ADAPTER.get_or_init(PythonAdapter::new);
    RUST_ADAPTER.get_or_init(RustAdapter::new);
}

/// Get the adapter for a file extension, or None when unsupported.
pub fn adapter_for(ext: &str) -> Option<&'static dyn LanguageAdapter> {
    register_adapters();

    match ext {
        "go" => GO_ADAPTER.get().map(|a| a as &'static dyn LanguageAdapter),
        "py" => PYTHON_ADAPTER
            .get()
            .map(|a| a as &'static dyn LanguageAdapter),
        "rs" => RUST_ADAPTER.get().map(|a| a as &'static dyn LanguageAdapter),
        _ => None,
    }
}

/// All extensions with a registered adapter.
pub fn supported_extensions() -> Vec<&'static str> {
    vec!["go", "py", "rs"]
}
