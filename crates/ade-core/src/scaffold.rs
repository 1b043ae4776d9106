//! Scaffold generator — resolves a request against the registry into a
//! concrete set of directories and files, rendered and either previewed or
//! written to disk.
//!
//! Ordering is part of the contract: folders first, then files, each in
//! registry declaration order. Preview output must be byte-identical to what
//! apply mode would write, so both modes share one code path and only the
//! disk-touching steps are gated.
//!
//! Scaffolding is not transactional: a failed step aborts before its own
//! side effect, but earlier directories and files stay on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{EngineResult, ScaffoldError},
    ports::{Filesystem, TemplateSource, VcsInitializer},
    registry::{self, FileContent, Registry},
    render::{DEFAULT_PORT, TokenContext},
};

/// A fully-populated scaffold request, as supplied by the CLI or an editor
/// collaborator. No prompting happens past this point.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub language: String,
    pub framework: String,
    pub service: String,
    pub domain: String,
    pub output_root: PathBuf,
    /// Compute everything, touch nothing.
    pub preview: bool,
    /// Best-effort repository init after a successful apply.
    pub init_git: bool,
}

/// The computed scaffold. Transient, owned by the caller; either printed
/// (preview) or already materialized on disk (apply).
///
/// Serializes to the wire contract consumed by out-of-process callers:
/// `{ "path": string, "structure": [string], "files": { path: content } }`.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldResult {
    /// Absolute-or-caller-relative root of the new service.
    #[serde(rename = "path")]
    pub root_path: PathBuf,
    /// Relative paths (directories then files) in declaration order.
    pub structure: Vec<String>,
    /// Rendered file content keyed by service-relative path.
    pub files: BTreeMap<String, String>,
}

/// Main scaffolding engine.
pub struct ScaffoldEngine {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateSource>,
    vcs: Option<Box<dyn VcsInitializer>>,
}

impl ScaffoldEngine {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateSource>,
        vcs: Option<Box<dyn VcsInitializer>>,
    ) -> Self {
        Self {
            filesystem,
            templates,
            vcs,
        }
    }

    /// Generate a service scaffold.
    ///
    /// Request validation happens before any filesystem interaction; the
    /// target-exists check happens before any write. See the module docs for
    /// the ordering and transactionality guarantees.
    #[instrument(
        skip_all,
        fields(
            language = %request.language,
            framework = %request.framework,
            service = %request.service,
            domain = %request.domain,
            preview = request.preview,
        )
    )]
    pub fn generate(
        &self,
        request: &ScaffoldRequest,
        registry: &Registry,
    ) -> EngineResult<ScaffoldResult> {
        validate_name("service", &request.service)?;
        validate_name("domain", &request.domain)?;

        let language =
            registry
                .language(&request.language)
                .ok_or_else(|| ScaffoldError::UnknownLanguage {
                    language: request.language.clone(),
                    available: registry.language_names(),
                })?;

        let framework =
            language
                .framework(&request.framework)
                .ok_or_else(|| ScaffoldError::UnknownFramework {
                    framework: request.framework.clone(),
                    language: request.language.clone(),
                    available: language.framework_names(),
                })?;

        let service_path = request
            .output_root
            .join(&request.domain)
            .join(&request.service);
        let apply = !request.preview;

        // Scaffolding never overwrites. Preview is allowed regardless, since
        // its entire value is "what would be written".
        if apply && self.filesystem.exists(&service_path) {
            return Err(ScaffoldError::AlreadyExists { path: service_path }.into());
        }

        let mut result = ScaffoldResult {
            root_path: service_path.clone(),
            structure: Vec::new(),
            files: BTreeMap::new(),
        };

        // Paths see only the names; contents get the full variable set.
        let path_ctx = TokenContext::for_paths(&request.service, &request.domain);
        let port = framework
            .deployment
            .as_ref()
            .map_or(DEFAULT_PORT, |d| d.default_port);
        let file_ctx = TokenContext::for_files(&request.service, &request.domain, port);

        for folder in &framework.scaffold.folders {
            let rendered = path_ctx.render(folder);
            ensure_safe(&rendered)?;

            result
                .structure
                .push(format!("{}/{}/{rendered}", request.domain, request.service));

            if apply {
                self.filesystem.create_dir_all(&service_path.join(&rendered))?;
            }
        }

        for (path_template, content) in &framework.scaffold.files {
            let rendered_path = path_ctx.render(path_template);
            ensure_safe(&rendered_path)?;

            let template_text = match content {
                FileContent::Inline(text) => text.clone(),
                FileContent::Reference(reference) => self.templates.load(reference)?,
            };
            let rendered = file_ctx.render(&template_text);

            result
                .structure
                .push(format!("{}/{}/{rendered_path}", request.domain, request.service));

            if apply {
                let full_path = service_path.join(&rendered_path);
                if let Some(parent) = full_path.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(&full_path, &rendered)?;
            }

            result.files.insert(rendered_path, rendered);
        }

        debug!(
            directories = framework.scaffold.folders.len(),
            files = result.files.len(),
            "scaffold computed"
        );

        // Best-effort, never raised: a failed git init must not mask a
        // successful scaffold.
        if apply && request.init_git {
            if let Some(vcs) = &self.vcs {
                if let Err(e) = vcs.init(&service_path, &request.language) {
                    warn!(error = %e, "could not initialize git repository");
                }
            }
        }

        if apply {
            info!(path = %service_path.display(), "service scaffolded");
        }

        Ok(result)
    }
}

/// Service and domain names: `^[a-z][a-z0-9-]*$`.
fn validate_name(field: &'static str, value: &str) -> Result<(), ScaffoldError> {
    let mut chars = value.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidName {
            field,
            value: value.to_string(),
        })
    }
}

fn ensure_safe(rendered: &str) -> Result<(), ScaffoldError> {
    if registry::is_safe_relative(rendered) {
        Ok(())
    } else {
        Err(ScaffoldError::UnsafePath {
            path: rendered.to_string(),
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::path::Path;

    /// Filesystem double that records nothing and reports nothing exists.
    /// Preview-mode tests never reach the disk anyway.
    struct NullFilesystem;

    impl Filesystem for NullFilesystem {
        fn create_dir_all(&self, _path: &Path) -> EngineResult<()> {
            panic!("preview mode must not create directories");
        }
        fn write_file(&self, _path: &Path, _content: &str) -> EngineResult<()> {
            panic!("preview mode must not write files");
        }
        fn exists(&self, _path: &Path) -> bool {
            false
        }
        fn list_dirs(&self, _path: &Path) -> EngineResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    /// Template source that echoes the reference back as content.
    struct EchoTemplates;

    impl TemplateSource for EchoTemplates {
        fn load(&self, reference: &str) -> EngineResult<String> {
            Ok(format!("ref:{reference} service={{{{serviceName}}}}"))
        }
    }

    fn engine() -> ScaffoldEngine {
        ScaffoldEngine::new(Box::new(NullFilesystem), Box::new(EchoTemplates), None)
    }

    fn registry() -> Registry {
        Registry::from_json_str(
            r##"{
                "conventions": {
                    "domainLayout": { "enforce": true, "requiredSubdirs": ["src", "tests"] }
                },
                "languages": {
                    "python": {
                        "frameworks": {
                            "fastapi": {
                                "scaffold": {
                                    "folders": ["src/app", "tests", "deploy/{serviceName}"],
                                    "files": {
                                        "src/app/main.py": "TEMPLATE_REF::fastapi/app/main.py",
                                        "README.md": "# {{ServiceName}} on port {{port}}"
                                    }
                                }
                            }
                        }
                    }
                }
            }"##,
        )
        .unwrap()
    }

    fn request(preview: bool) -> ScaffoldRequest {
        ScaffoldRequest {
            language: "python".into(),
            framework: "fastapi".into(),
            service: "user-api".into(),
            domain: "identity".into(),
            output_root: PathBuf::from("/tmp/out"),
            preview,
            init_git: false,
        }
    }

    #[test]
    fn preview_structure_is_prefixed_by_domain_and_service() {
        let result = engine().generate(&request(true), &registry()).unwrap();
        assert!(!result.structure.is_empty());
        for entry in &result.structure {
            assert!(
                entry.starts_with("identity/user-api/"),
                "unexpected entry: {entry}"
            );
        }
    }

    #[test]
    fn declaration_order_is_preserved() {
        let result = engine().generate(&request(true), &registry()).unwrap();
        assert_eq!(
            result.structure,
            vec![
                "identity/user-api/src/app",
                "identity/user-api/tests",
                "identity/user-api/deploy/user-api",
                "identity/user-api/src/app/main.py",
                "identity/user-api/README.md",
            ]
        );
    }

    #[test]
    fn preview_is_idempotent() {
        let eng = engine();
        let reg = registry();
        let first = eng.generate(&request(true), &reg).unwrap();
        let second = eng.generate(&request(true), &reg).unwrap();
        assert_eq!(first.files, second.files);
        assert_eq!(first.structure, second.structure);
    }

    #[test]
    fn missing_default_port_renders_8000() {
        let result = engine().generate(&request(true), &registry()).unwrap();
        assert_eq!(
            result.files["README.md"],
            "# User-api on port 8000"
        );
    }

    #[test]
    fn referenced_template_is_fetched_and_rendered() {
        let result = engine().generate(&request(true), &registry()).unwrap();
        assert_eq!(
            result.files["src/app/main.py"],
            "ref:fastapi/app/main.py service=user-api"
        );
    }

    #[test]
    fn unknown_language_lists_available() {
        let mut req = request(true);
        req.language = "java".into();
        match engine().generate(&req, &registry()).unwrap_err() {
            EngineError::Scaffold(ScaffoldError::UnknownLanguage { available, .. }) => {
                assert_eq!(available, vec!["python"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_framework_lists_available() {
        let mut req = request(true);
        req.framework = "django".into();
        match engine().generate(&req, &registry()).unwrap_err() {
            EngineError::Scaffold(ScaffoldError::UnknownFramework {
                available, language, ..
            }) => {
                assert_eq!(language, "python");
                assert_eq!(available, vec!["fastapi"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_service_name_is_rejected_before_any_lookup() {
        for bad in ["User-Api", "9api", "api_x", "", "-api"] {
            let mut req = request(true);
            req.service = bad.into();
            assert!(
                matches!(
                    engine().generate(&req, &registry()),
                    Err(EngineError::Scaffold(ScaffoldError::InvalidName { field: "service", .. }))
                ),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn valid_names_pass() {
        for good in ["user-api", "a", "svc2", "a-b-c"] {
            assert!(validate_name("service", good).is_ok(), "failed for {good:?}");
        }
    }

    #[test]
    fn already_exists_only_applies_outside_preview() {
        struct EverythingExists;
        impl Filesystem for EverythingExists {
            fn create_dir_all(&self, _: &Path) -> EngineResult<()> {
                Ok(())
            }
            fn write_file(&self, _: &Path, _: &str) -> EngineResult<()> {
                Ok(())
            }
            fn exists(&self, _: &Path) -> bool {
                true
            }
            fn list_dirs(&self, _: &Path) -> EngineResult<Vec<String>> {
                Ok(Vec::new())
            }
        }

        let eng = ScaffoldEngine::new(Box::new(EverythingExists), Box::new(EchoTemplates), None);
        let reg = registry();

        assert!(matches!(
            eng.generate(&request(false), &reg),
            Err(EngineError::Scaffold(ScaffoldError::AlreadyExists { .. }))
        ));
        assert!(eng.generate(&request(true), &reg).is_ok());
    }

    #[test]
    fn rendered_traversal_path_is_rejected() {
        let reg = Registry::from_json_str(
            r#"{
                "conventions": { "domainLayout": { "enforce": false, "requiredSubdirs": [] } },
                "languages": {
                    "go": { "frameworks": { "fiber": {
                        "scaffold": { "folders": ["cmd/{serviceName}/../.."], "files": {} }
                    } } }
                }
            }"#,
        )
        .unwrap();
        let mut req = request(true);
        req.language = "go".into();
        req.framework = "fiber".into();
        assert!(matches!(
            engine().generate(&req, &reg),
            Err(EngineError::Scaffold(ScaffoldError::UnsafePath { .. }))
        ));
    }
}
