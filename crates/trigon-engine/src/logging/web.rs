use std::sync::Once;

static INIT: Once = Once::new();

/// Routes `log` records and panics to the browser console.
///
/// Idempotent; only the first call's level takes effect.
pub fn init_web_logging(level: log::Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            web_sys::console::warn_1(&"a logger was already installed".into());
        }
    });
}
