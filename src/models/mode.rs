//! File extension to widget syntax mode

/// Mode name for a path, by case-insensitive extension.
///
/// Returns `None` for a missing path, a path without an extension, or an
/// unrecognised extension.
pub fn mode_for_path(path: Option<&str>) -> Option<&'static str> {
    let path = path?;
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() && ext.is_empty() {
        return None;
    }

    let mode = match ext.to_ascii_lowercase().as_str() {
        "yaml" | "yml" => "ha-yaml",
        "py" => "python",
        "js" | "json" => "javascript",
        "css" => "css",
        "html" => "htmlmixed",
        "md" => "markdown",
        "sh" => "shell",
        "jinja" | "jinja2" | "j2" => "jinja2",
        _ => return None,
    };
    Some(mode)
}

/// True for documents validated as Home Assistant YAML
pub fn is_yaml_mode(mode: Option<&str>) -> bool {
    mode == Some("ha-yaml")
}
