//! Rendering of the embedded project templates.
//!
//! Everything here is pure: templates are compiled into the binary and the
//! output depends only on the arguments.

use include_dir::{Dir, include_dir};
use minijinja::{Environment, UndefinedBehavior, Value, context};

use crate::domain::{AppError, BuildType, LibraryVersion, ProjectConfig, ProjectName};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const MAIN_TEMPLATE: &str = "main.cpp.j2";
const HEADER_TEMPLATE: &str = "Game.h.j2";
const IMPLEMENTATION_TEMPLATE: &str = "Game.cpp.j2";
const BUILD_SCRIPT_TEMPLATE: &str = "CMakeLists.txt.j2";
const IGNORE_BLOCK_ASSET: &str = "ignore_block.txt";

/// The four generated source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProject {
    pub main_source: String,
    pub header: String,
    pub implementation: String,
    pub build_script: String,
}

pub fn render_project(
    name: &ProjectName,
    library_version: LibraryVersion,
    build_type: BuildType,
) -> Result<RenderedProject, AppError> {
    let env = template_environment()?;
    let ctx = context! {
        name => name.as_str(),
        library_version => library_version.as_str(),
        build_type => build_type.as_str(),
    };

    Ok(RenderedProject {
        main_source: render_by_name(&env, MAIN_TEMPLATE, &ctx)?,
        header: render_by_name(&env, HEADER_TEMPLATE, &ctx)?,
        implementation: render_by_name(&env, IMPLEMENTATION_TEMPLATE, &ctx)?,
        build_script: render_by_name(&env, BUILD_SCRIPT_TEMPLATE, &ctx)?,
    })
}

/// Patterns appended to `.gitignore`.
pub fn ignore_block() -> Result<&'static str, AppError> {
    embedded_text(IGNORE_BLOCK_ASSET)
}

fn embedded_text(name: &str) -> Result<&'static str, AppError> {
    let file = TEMPLATES_DIR.get_file(name).ok_or_else(|| AppError::Template {
        template: name.to_string(),
        reason: "asset is not embedded".to_string(),
    })?;
    file.contents_utf8().ok_or_else(|| AppError::Template {
        template: name.to_string(),
        reason: "asset is not valid UTF-8".to_string(),
    })
}

/// Render tool argument templates for a project.
///
/// Variables in scope: `name`, `project_dir`, `build_dir`, `build_type`,
/// `library_version`.
pub fn render_arguments(args: &[String], config: &ProjectConfig) -> Result<Vec<String>, AppError> {
    let layout = config.layout();
    let ctx = context! {
        name => config.name.as_str(),
        project_dir => layout.root().display().to_string(),
        build_dir => layout.build_dir().display().to_string(),
        build_type => config.build_type.as_str(),
        library_version => config.library_version.as_str(),
    };

    let env = strict_environment();
    args.iter()
        .map(|arg| {
            env.render_str(arg, &ctx).map_err(|err| AppError::Template {
                template: arg.clone(),
                reason: err.to_string(),
            })
        })
        .collect()
}

fn strict_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env
}

fn template_environment() -> Result<Environment<'static>, AppError> {
    let mut env = strict_environment();
    for file in TEMPLATES_DIR.files() {
        let Some(name) = file.path().to_str() else { continue };
        if !name.ends_with(".j2") {
            continue;
        }
        let source = file.contents_utf8().ok_or_else(|| AppError::Template {
            template: name.to_string(),
            reason: "template is not valid UTF-8".to_string(),
        })?;
        env.add_template(name, source).map_err(|e| AppError::Template {
            template: name.to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(env)
}

fn render_by_name(env: &Environment<'_>, template_name: &str, ctx: &Value) -> Result<String, AppError> {
    let template = env.get_template(template_name).map_err(|e| AppError::Template {
        template: template_name.to_string(),
        reason: e.to_string(),
    })?;

    template.render(ctx).map_err(|e| AppError::Template {
        template: template_name.to_string(),
        reason: e.to_string(),
    })
}
