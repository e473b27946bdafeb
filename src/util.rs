use std::path::PathBuf;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();

/// Install the fmt subscriber once. `RUST_LOG` wins; otherwise only warnings are
/// shown so logs do not interleave with the prompts.
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Append `.txt` unless the name already ends with it. Blank names fall back to `default`.
pub fn ensure_txt_extension(name: &str, default: &str) -> PathBuf {
    let name = name.trim();
    let name = if name.is_empty() { default } else { name };
    if name.ends_with(".txt") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.txt"))
    }
}
