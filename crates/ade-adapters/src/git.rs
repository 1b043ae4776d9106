//! Git repository initialization.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use ade_core::{
    error::{EngineError, EngineResult},
    ports::VcsInitializer,
};

/// Initializes a git repository by shelling out to the `git` binary.
///
/// Failures surface as `EngineError::Filesystem`; the engine treats them as
/// non-fatal and logs a warning instead of aborting the scaffold.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }
}

impl VcsInitializer for GitCli {
    fn init(&self, path: &Path, language: &str) -> EngineResult<()> {
        debug!(path = %path.display(), "running git init");
        let status = Command::new("git")
            .arg("init")
            .current_dir(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| EngineError::Filesystem {
                path: path.to_path_buf(),
                reason: format!("failed to run git init: {e}"),
            })?;

        if !status.success() {
            return Err(EngineError::Filesystem {
                path: path.to_path_buf(),
                reason: format!("git init exited with {status}"),
            });
        }

        // Do not clobber a .gitignore the scaffold itself produced.
        let gitignore_path = path.join(".gitignore");
        if !gitignore_path.exists() {
            std::fs::write(&gitignore_path, gitignore_content(language)).map_err(|e| {
                EngineError::Filesystem {
                    path: gitignore_path.clone(),
                    reason: format!("failed to write .gitignore: {e}"),
                }
            })?;
        }

        info!(path = %path.display(), "initialized git repository");
        Ok(())
    }
}

const COMMON_IGNORES: &str = "\
# IDE
.vscode/
.idea/
*.swp
*.swo
*~
.DS_Store

# Environment
.env
.env.*
!.env.example

# Logs
*.log
logs/

# Testing
coverage/
.coverage
*.cover";

const PYTHON_IGNORES: &str = "\
# Python
__pycache__/
*.py[cod]
*$py.class
*.so
.Python
venv/
env/
ENV/
.venv/
pip-log.txt
.pytest_cache/
*.egg-info/
dist/
build/";

const NODE_IGNORES: &str = "\
# Node
node_modules/
npm-debug.log*
yarn-debug.log*
yarn-error.log*
.npm
dist/
build/
*.tsbuildinfo";

const GO_IGNORES: &str = "\
# Go
*.exe
*.exe~
*.dll
*.so
*.dylib
*.test
*.out
vendor/
go.sum";

/// Compose a .gitignore from the common block plus the language block.
pub fn gitignore_content(language: &str) -> String {
    let specific = match language {
        "python" => PYTHON_IGNORES,
        "node" => NODE_IGNORES,
        "go" => GO_IGNORES,
        _ => "",
    };
    if specific.is_empty() {
        format!("{COMMON_IGNORES}\n")
    } else {
        format!("{COMMON_IGNORES}\n\n{specific}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gitignore_includes_language_block() {
        let content = gitignore_content("python");
        assert!(content.contains("# IDE"));
        assert!(content.contains("__pycache__/"));
        assert!(!content.contains("node_modules/"));
    }

    #[test]
    fn gitignore_for_unknown_language_is_common_only() {
        let content = gitignore_content("rust");
        assert!(content.contains(".DS_Store"));
        assert!(!content.contains("# Python"));
        assert!(!content.contains("# Go"));
    }
}
