//! Command implementations for the CLI tool.

use std::path::{Path, PathBuf};

use qrcedit::resource_path;
use qrcedit::{
    CompressionAlgorithm, EditResult, EntryUpdate, GroupKey, ManifestEditor, Operation,
    ResourceManifest, SaveOptions, SaveResult, save_manifest,
};

use crate::OutputFormat;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::create_formatter;

/// Settings shared by all commands.
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
    pub backup: bool,
}

impl Context {
    fn save_options(&self) -> SaveOptions {
        SaveOptions::new().backup(self.backup)
    }

    /// Quiet mode hides human-readable reports; JSON is always printed.
    fn shows_output(&self) -> bool {
        !self.quiet || self.format == OutputFormat::Json
    }

    fn print(&self, text: &str) {
        if self.shows_output() {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
}

/// Configuration for the set command.
pub struct SetConfig {
    pub key: GroupKey,
    pub name: String,
    pub alias: Option<String>,
    pub no_alias: bool,
    pub algorithm: Option<CompressionAlgorithm>,
    pub level: Option<u32>,
    pub default_level: bool,
    pub threshold: Option<u32>,
}

impl SetConfig {
    fn update(&self) -> EntryUpdate {
        let mut update = EntryUpdate::new();
        if let Some(alias) = &self.alias {
            update = update.alias(alias.as_str());
        }
        if self.no_alias {
            update = update.clear_alias();
        }
        if let Some(algorithm) = self.algorithm {
            update = update.algorithm(algorithm);
        }
        if let Some(level) = self.level {
            update = update.level(level);
        }
        if self.default_level {
            update = update.default_level();
        }
        if let Some(threshold) = self.threshold {
            update = update.threshold(threshold);
        }
        update
    }
}

/// New command implementation
pub fn new(ctx: &Context, manifest: &Path, force: bool) -> ExitCode {
    if manifest.exists() && !force {
        eprintln!(
            "Error: '{}' already exists (use --force to replace it)",
            manifest.display()
        );
        return ExitCode::BadArgs;
    }

    match save_manifest(&ResourceManifest::new(), manifest, &ctx.save_options()) {
        Ok(save) => finish(ctx, &EditResult::default(), Some(&save)),
        Err(e) => fail(&e),
    }
}

/// List command implementation
pub fn list(ctx: &Context, manifest: &Path, urls: bool) -> ExitCode {
    let editor = match open(manifest) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    let formatter = create_formatter(ctx.format);
    ctx.print(&formatter.format_list(editor.manifest(), urls));
    ExitCode::Success
}

/// Info command implementation
pub fn info(ctx: &Context, manifest: &Path) -> ExitCode {
    let editor = match open(manifest) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    let missing = editor.missing_files().len();
    let formatter = create_formatter(ctx.format);
    ctx.print(&formatter.format_info(manifest, editor.manifest(), missing));
    ExitCode::Success
}

/// Check command implementation
pub fn check(ctx: &Context, manifest: &Path) -> ExitCode {
    let editor = match open(manifest) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    let missing = editor.missing_files();
    let formatter = create_formatter(ctx.format);
    if !missing.is_empty() || ctx.shows_output() {
        print!("{}", formatter.format_check(&missing));
    }

    if missing.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::Warning
    }
}

/// Add command implementation
pub fn add(ctx: &Context, manifest: &Path, files: &[PathBuf], key: GroupKey) -> ExitCode {
    // Paths on the command line are relative to the working directory, not
    // to the manifest.
    let files: Vec<String> = files
        .iter()
        .map(|f| {
            resource_path::absolute_dir(f)
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    for file in &files {
        if !Path::new(file).is_file() {
            log::warn!("'{}' does not exist", file);
        }
    }

    let ops = files
        .into_iter()
        .map(|path| Operation::AddFile {
            key: key.clone(),
            path,
        })
        .collect::<Vec<_>>();
    edit(ctx, manifest, ops)
}

/// Add-prefix command implementation
pub fn add_prefix(ctx: &Context, manifest: &Path, key: Option<GroupKey>) -> ExitCode {
    edit(ctx, manifest, vec![Operation::AddPrefix { key }])
}

/// Remove command implementation
pub fn remove(ctx: &Context, manifest: &Path, key: GroupKey, names: &[String]) -> ExitCode {
    let ops = if names.is_empty() {
        vec![Operation::RemovePrefix { key }]
    } else {
        names
            .iter()
            .map(|name| Operation::RemoveFile {
                key: key.clone(),
                name: name.clone(),
            })
            .collect()
    };
    edit(ctx, manifest, ops)
}

/// Rename-prefix command implementation
pub fn rename_prefix(ctx: &Context, manifest: &Path, from: GroupKey, to: GroupKey) -> ExitCode {
    edit(ctx, manifest, vec![Operation::RenamePrefix { from, to }])
}

/// Set command implementation
pub fn set(ctx: &Context, manifest: &Path, config: &SetConfig) -> ExitCode {
    let update = config.update();
    if update.is_empty() {
        eprintln!("Error: nothing to change; pass --alias, --algo, --level or --threshold");
        return ExitCode::BadArgs;
    }

    edit(
        ctx,
        manifest,
        vec![Operation::UpdateFile {
            key: config.key.clone(),
            name: config.name.clone(),
            update,
        }],
    )
}

/// Format command implementation
pub fn format(ctx: &Context, manifest: &Path) -> ExitCode {
    let mut editor = match open(manifest) {
        Ok(editor) => editor.with_options(ctx.save_options()),
        Err(code) => return code,
    };

    match editor.save() {
        Ok(save) => finish(ctx, &EditResult::default(), Some(&save)),
        Err(e) => fail(&e),
    }
}

/// Save-as command implementation
pub fn save_as(ctx: &Context, manifest: &Path, destination: &Path) -> ExitCode {
    let mut editor = match open(manifest) {
        Ok(editor) => editor.with_options(ctx.save_options()),
        Err(code) => return code,
    };

    match editor.save_as(destination) {
        Ok(save) => finish(ctx, &EditResult::default(), Some(&save)),
        Err(e) => fail(&e),
    }
}

/// Opens a manifest, reporting failures
fn open(manifest: &Path) -> Result<ManifestEditor, ExitCode> {
    ManifestEditor::open(manifest).map_err(|e| {
        eprintln!("Error opening '{}': {}", manifest.display(), e);
        error_to_exit_code(&e)
    })
}

/// Applies operations and saves when anything changed
fn edit(ctx: &Context, manifest: &Path, ops: Vec<Operation>) -> ExitCode {
    let mut editor = match open(manifest) {
        Ok(editor) => editor.with_options(ctx.save_options()),
        Err(code) => return code,
    };

    let result = match editor.apply_all(ops) {
        Ok(result) => result,
        Err(e) => return fail(&e),
    };

    if !editor.is_modified() {
        return finish(ctx, &result, None);
    }

    match editor.save() {
        Ok(save) => finish(ctx, &result, Some(&save)),
        Err(e) => fail(&e),
    }
}

fn finish(ctx: &Context, result: &EditResult, save: Option<&SaveResult>) -> ExitCode {
    let formatter = create_formatter(ctx.format);
    ctx.print(&formatter.format_edit_result(result, save));

    match save.and_then(|s| s.backup_warning.as_ref()) {
        Some(warning) => {
            if ctx.quiet {
                eprintln!("Warning: {}", warning);
            }
            ExitCode::Warning
        }
        None => ExitCode::Success,
    }
}

fn fail(error: &qrcedit::Error) -> ExitCode {
    eprintln!("Error: {}", error);
    error_to_exit_code(error)
}
