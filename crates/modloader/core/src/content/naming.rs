//! Naming conventions shared by autoload and the by-type lookups.

/// Last `.`-separated segment of a fully qualified name.
pub fn simple_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

/// Everything before the last `.`; empty for unqualified names.
pub fn namespace(full_name: &str) -> &str {
    full_name
        .rsplit_once('.')
        .map(|(namespace, _)| namespace)
        .unwrap_or("")
}

/// Conventional texture path: the qualified name with `.` replaced by `/`.
pub fn default_texture(full_name: &str) -> String {
    full_name.replace('.', "/")
}

/// Simple name of a Rust type, without module path or generic arguments.
pub fn type_simple_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
