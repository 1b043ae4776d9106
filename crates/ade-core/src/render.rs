//! Token substitution for template paths and contents.
//!
//! Two token syntaxes appear in historical templates, `{{name}}` and
//! `{name}`; both keep resolving here. Unresolved token names are left as
//! literal text rather than failing, so partial templates stay usable.
//!
//! All substitution is deterministic and side-effect-free: variables are
//! derived once at construction, rendering is plain string replacement.

/// Port substituted when a framework declares no `deployment.defaultPort`.
pub const DEFAULT_PORT: u16 = 8000;

/// The fixed variable set available to templates.
///
/// `ServiceName` / `Domain` upper-case only the first ASCII character
/// (`my-service` → `My-service`). Generated code may depend on that literal
/// behavior, so no title-casing of hyphenated identifiers happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenContext {
    vars: Vec<(&'static str, String)>,
}

impl TokenContext {
    /// Variable set for path segments: `serviceName` and `domain` only.
    pub fn for_paths(service: &str, domain: &str) -> Self {
        Self {
            vars: vec![
                ("serviceName", service.to_string()),
                ("domain", domain.to_string()),
            ],
        }
    }

    /// Full variable set for file contents.
    pub fn for_files(service: &str, domain: &str, port: u16) -> Self {
        Self {
            vars: vec![
                ("serviceName", service.to_string()),
                ("domain", domain.to_string()),
                ("ServiceName", capitalize(service)),
                ("Domain", capitalize(domain)),
                ("port", port.to_string()),
            ],
        }
    }

    /// Substitute every known variable in both token syntaxes.
    ///
    /// The double-brace form is replaced before the single-brace form so
    /// `{{name}}` never leaves a stray brace pair behind.
    pub fn render(&self, template: &str) -> String {
        let mut out = template.to_string();
        for (name, value) in &self.vars {
            out = out.replace(&format!("{{{{{name}}}}}"), value);
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

/// Upper-case the first ASCII character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
