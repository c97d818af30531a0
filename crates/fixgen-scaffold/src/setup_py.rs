//! `setup.py` rendering.
//!
//! Values are written as Python string literals rather than pasted into the
//! template, so names or requirements containing quotes still produce a
//! valid file.

use fixgen_core::ProjectSpec;

/// Contents of the placeholder module shipped in every project
pub const MODULE_PY: &str = "def hello():\n    print(\"Hello from my_package!\")";

/// Quote a string as a valid Python single-quoted literal
pub fn python_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            other => literal.push(other),
        }
    }
    literal.push('\'');
    literal
}

/// Render a list of strings as a Python list literal: `['a<2.0', 'e<2.0']`
pub fn python_list(values: &[&str]) -> String {
    let items: Vec<String> = values.iter().map(|v| python_literal(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Render the build descriptor for a project
///
/// `install_requires` is only emitted when the project has dependencies.
pub fn render_setup_py(spec: &ProjectSpec) -> String {
    let mut content = String::from("\nfrom setuptools import setup, find_packages\n\nsetup(\n");

    content.push_str(&format!("    name={},\n", python_literal(&spec.name)));
    content.push_str(&format!("    version={},\n", python_literal(&spec.version)));
    content.push_str("    packages=find_packages(),\n");

    let requirements = spec.requirements();
    if !requirements.is_empty() {
        content.push_str(&format!("    install_requires={},\n", python_list(&requirements)));
    }

    content.push_str(")\n");
    content
}
