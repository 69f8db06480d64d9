//! Config file inspection and editing.

use crate::config;

/// Show the config, applying any provided changes first
pub fn cmd_config(collapse_albums: Option<bool>, context_rows: Option<usize>) -> anyhow::Result<()> {
    let mut cfg = config::load();
    let changed = collapse_albums.is_some() || context_rows.is_some();

    if let Some(collapse) = collapse_albums {
        cfg.view.collapse_albums = collapse;
    }
    if let Some(rows) = context_rows {
        cfg.view.scroll_context_rows = rows;
    }
    if changed {
        config::save(&cfg)?;
    }

    if let Some(path) = config::config_path() {
        println!("Config file: {:?}", path);
    }
    println!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}
