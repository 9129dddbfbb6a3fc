use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn error(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn warn(s: &str);
}

/// `console.error` for failures the user should know about.
macro_rules! console_error {
    ($($t:tt)*) => (crate::console::error(&format_args!($($t)*).to_string()))
}
pub(crate) use console_error;

/// `console.warn` for wallet events that could not be understood.
macro_rules! console_warn {
    ($($t:tt)*) => (crate::console::warn(&format_args!($($t)*).to_string()))
}
pub(crate) use console_warn;
