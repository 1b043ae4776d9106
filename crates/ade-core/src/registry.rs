//! The stack registry: a schema-validated model of supported languages,
//! frameworks, their scaffold definitions, and the domain-layout convention.
//!
//! The registry is a single JSON document. It is parsed into [`Registry`]
//! eagerly and strictly — any shape violation fails at load time with the
//! dotted path of the offending field, so the generator and validator can
//! assume a well-typed structure and never hit undefined-access failures
//! deep in generation.
//!
//! Declaration order matters: `scaffold.folders` and `scaffold.files` keep
//! the order they were written in, and that order flows through to scaffold
//! output (stable, diffable previews).
//!
//! No component mutates a loaded `Registry`; it is passed by reference into
//! every engine call.

use serde_json::{Map, Value, json};

use crate::error::RegistryError;

/// Prefix marking a file value as an external template reference rather
/// than inline content. The remainder is a path relative to a templates
/// root, e.g. `TEMPLATE_REF::fastapi/app/main.py`.
pub const TEMPLATE_REF_MARKER: &str = "TEMPLATE_REF::";

// ── Model ─────────────────────────────────────────────────────────────────────

/// Root registry object.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    pub conventions: Conventions,
    /// Language identifier → spec, in declaration order.
    pub languages: Vec<(String, LanguageSpec)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conventions {
    pub domain_layout: DomainLayout,
}

/// The domain-oriented directory convention enforced by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainLayout {
    pub enforce: bool,
    pub base_pattern: Option<String>,
    /// Plain relative path segments, no template tokens.
    pub required_subdirs: Vec<String>,
    /// Directory names that must not appear at the project root.
    pub deny_at_root: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSpec {
    /// Framework identifier → spec, in declaration order.
    pub frameworks: Vec<(String, FrameworkSpec)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameworkSpec {
    pub deployment: Option<Deployment>,
    pub scaffold: ScaffoldSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub default_port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldSpec {
    /// Template-path strings for directories, in declaration order.
    pub folders: Vec<String>,
    /// Template-path → content, in declaration order.
    pub files: Vec<(String, FileContent)>,
}

/// Content of one scaffold file entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    /// The registry value itself is the template text.
    Inline(String),
    /// The value named an external template (after the marker prefix).
    Reference(String),
}

// ── Accessors ─────────────────────────────────────────────────────────────────

impl Registry {
    pub fn language(&self, name: &str) -> Option<&LanguageSpec> {
        self.languages
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn language_names(&self) -> Vec<String> {
        self.languages.iter().map(|(n, _)| n.clone()).collect()
    }
}

impl LanguageSpec {
    pub fn framework(&self, name: &str) -> Option<&FrameworkSpec> {
        self.frameworks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn framework_names(&self) -> Vec<String> {
        self.frameworks.iter().map(|(n, _)| n.clone()).collect()
    }
}

// ── Parsing & schema validation ───────────────────────────────────────────────

impl Registry {
    /// Parse and schema-validate a registry from JSON text.
    ///
    /// Malformed JSON fails with [`RegistryError::Parse`]; well-formed JSON
    /// that violates the schema fails with [`RegistryError::InvalidSchema`]
    /// carrying the offending field path.
    pub fn from_json_str(text: &str) -> Result<Self, RegistryError> {
        let value: Value = serde_json::from_str(text).map_err(|e| RegistryError::Parse {
            reason: e.to_string(),
        })?;
        Self::from_json_value(&value)
    }

    /// Schema-validate an already-parsed JSON value.
    pub fn from_json_value(value: &Value) -> Result<Self, RegistryError> {
        let root = as_object(value, "$")?;

        let conventions = parse_conventions(require(root, "conventions", "conventions")?)?;

        let languages_val = require(root, "languages", "languages")?;
        let languages_obj = as_object(languages_val, "languages")?;
        let mut languages = Vec::with_capacity(languages_obj.len());
        for (name, lang_val) in languages_obj {
            let field = format!("languages.{name}");
            languages.push((name.clone(), parse_language(lang_val, &field)?));
        }

        Ok(Self {
            conventions,
            languages,
        })
    }

    /// Serialize back to a JSON value, preserving declaration order.
    ///
    /// Used by the `save` convenience for tooling that regenerates the
    /// registry file; not on the scaffold/validate hot path.
    pub fn to_json_value(&self) -> Value {
        let layout = &self.conventions.domain_layout;
        let mut layout_map = Map::new();
        layout_map.insert("enforce".into(), json!(layout.enforce));
        if let Some(pattern) = &layout.base_pattern {
            layout_map.insert("basePattern".into(), json!(pattern));
        }
        layout_map.insert("requiredSubdirs".into(), json!(layout.required_subdirs));
        layout_map.insert("denyAtRoot".into(), json!(layout.deny_at_root));

        let mut languages = Map::new();
        for (name, lang) in &self.languages {
            let mut frameworks = Map::new();
            for (fw_name, fw) in &lang.frameworks {
                let mut fw_map = Map::new();
                if let Some(dep) = &fw.deployment {
                    fw_map.insert(
                        "deployment".into(),
                        json!({ "defaultPort": dep.default_port }),
                    );
                }
                let mut files = Map::new();
                for (path, content) in &fw.scaffold.files {
                    let raw = match content {
                        FileContent::Inline(text) => text.clone(),
                        FileContent::Reference(r) => format!("{TEMPLATE_REF_MARKER}{r}"),
                    };
                    files.insert(path.clone(), json!(raw));
                }
                fw_map.insert(
                    "scaffold".into(),
                    json!({ "folders": fw.scaffold.folders, "files": files }),
                );
                frameworks.insert(fw_name.clone(), Value::Object(fw_map));
            }
            languages.insert(name.clone(), json!({ "frameworks": frameworks }));
        }

        json!({
            "conventions": { "domainLayout": Value::Object(layout_map) },
            "languages": Value::Object(languages),
        })
    }
}

fn parse_conventions(value: &Value) -> Result<Conventions, RegistryError> {
    let obj = as_object(value, "conventions")?;
    let layout_val = require(obj, "domainLayout", "conventions.domainLayout")?;
    let layout = as_object(layout_val, "conventions.domainLayout")?;
    let base = "conventions.domainLayout";

    let enforce = as_bool(
        require(layout, "enforce", &format!("{base}.enforce"))?,
        &format!("{base}.enforce"),
    )?;

    let base_pattern = match layout.get("basePattern") {
        None | Some(Value::Null) => None,
        Some(v) => Some(as_str(v, &format!("{base}.basePattern"))?.to_string()),
    };

    let required_subdirs = string_array(
        require(layout, "requiredSubdirs", &format!("{base}.requiredSubdirs"))?,
        &format!("{base}.requiredSubdirs"),
    )?;
    for (i, entry) in required_subdirs.iter().enumerate() {
        if entry.is_empty() || entry.contains(['{', '}']) || !is_safe_relative(entry) {
            return Err(RegistryError::InvalidSchema {
                field: format!("{base}.requiredSubdirs[{i}]"),
                expected: "a plain relative path segment with no template tokens".into(),
            });
        }
    }

    // denyAtRoot is optional; missing means "deny nothing".
    let deny_at_root = match layout.get("denyAtRoot") {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => string_array(v, &format!("{base}.denyAtRoot"))?,
    };

    Ok(Conventions {
        domain_layout: DomainLayout {
            enforce,
            base_pattern,
            required_subdirs,
            deny_at_root,
        },
    })
}

fn parse_language(value: &Value, field: &str) -> Result<LanguageSpec, RegistryError> {
    let obj = as_object(value, field)?;
    let fw_field = format!("{field}.frameworks");
    let frameworks_obj = as_object(require(obj, "frameworks", &fw_field)?, &fw_field)?;

    let mut frameworks = Vec::with_capacity(frameworks_obj.len());
    for (name, fw_val) in frameworks_obj {
        let fw_path = format!("{fw_field}.{name}");
        frameworks.push((name.clone(), parse_framework(fw_val, &fw_path)?));
    }
    Ok(LanguageSpec { frameworks })
}

fn parse_framework(value: &Value, field: &str) -> Result<FrameworkSpec, RegistryError> {
    let obj = as_object(value, field)?;

    let deployment = match obj.get("deployment") {
        None | Some(Value::Null) => None,
        Some(dep_val) => {
            let dep_field = format!("{field}.deployment");
            let dep = as_object(dep_val, &dep_field)?;
            let port_field = format!("{dep_field}.defaultPort");
            let port_val = require(dep, "defaultPort", &port_field)?;
            let port = port_val
                .as_u64()
                .filter(|p| (1..=u64::from(u16::MAX)).contains(p))
                .ok_or_else(|| RegistryError::InvalidSchema {
                    field: port_field,
                    expected: "a positive integer port number".into(),
                })?;
            Some(Deployment {
                default_port: port as u16,
            })
        }
    };

    let scaffold_field = format!("{field}.scaffold");
    let scaffold_obj = as_object(require(obj, "scaffold", &scaffold_field)?, &scaffold_field)?;

    let folders = string_array(
        require(scaffold_obj, "folders", &format!("{scaffold_field}.folders"))?,
        &format!("{scaffold_field}.folders"),
    )?;

    let files_field = format!("{scaffold_field}.files");
    let files_obj = as_object(require(scaffold_obj, "files", &files_field)?, &files_field)?;
    let mut files = Vec::with_capacity(files_obj.len());
    for (path, content_val) in files_obj {
        let entry_field = format!("{files_field}.{path}");
        let raw = as_str(content_val, &entry_field)?;

        // Token-free keys can be checked for traversal right now; tokenized
        // keys are re-checked after substitution at generation time.
        if !path.contains('{') && !is_safe_relative(path) {
            return Err(RegistryError::InvalidSchema {
                field: entry_field,
                expected: "a relative file path without `..` traversal".into(),
            });
        }

        let content = match raw.strip_prefix(TEMPLATE_REF_MARKER) {
            Some(reference) => FileContent::Reference(reference.to_string()),
            None => FileContent::Inline(raw.to_string()),
        };
        files.push((path.clone(), content));
    }

    Ok(FrameworkSpec {
        deployment,
        scaffold: ScaffoldSpec { folders, files },
    })
}

// ── Value helpers ─────────────────────────────────────────────────────────────

fn require<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<&'a Value, RegistryError> {
    obj.get(key).ok_or_else(|| RegistryError::InvalidSchema {
        field: field.to_string(),
        expected: "field to be present".into(),
    })
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, RegistryError> {
    value.as_object().ok_or_else(|| RegistryError::InvalidSchema {
        field: field.to_string(),
        expected: "an object".into(),
    })
}

fn as_str<'a>(value: &'a Value, field: &str) -> Result<&'a str, RegistryError> {
    value.as_str().ok_or_else(|| RegistryError::InvalidSchema {
        field: field.to_string(),
        expected: "a string".into(),
    })
}

fn as_bool(value: &Value, field: &str) -> Result<bool, RegistryError> {
    value.as_bool().ok_or_else(|| RegistryError::InvalidSchema {
        field: field.to_string(),
        expected: "a boolean".into(),
    })
}

fn string_array(value: &Value, field: &str) -> Result<Vec<String>, RegistryError> {
    let arr = value.as_array().ok_or_else(|| RegistryError::InvalidSchema {
        field: field.to_string(),
        expected: "an array of strings".into(),
    })?;
    arr.iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| RegistryError::InvalidSchema {
                    field: format!("{field}[{i}]"),
                    expected: "a string".into(),
                })
        })
        .collect()
}

/// A path is safe when it is relative and never traverses upward.
pub(crate) fn is_safe_relative(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return false;
    }
    // Windows drive prefix.
    if path.len() >= 2 && path.as_bytes()[1] == b':' {
        return false;
    }
    path.split(['/', '\\']).all(|segment| segment != "..")
}

// ── tests ─────────────────────────────────────────────────────────────────────
