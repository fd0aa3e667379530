//! Output formatting for CLI operations.

use serde_json::json;
use std::path::Path;

use qrcedit::{EditResult, FileEntry, GroupKey, ResourceManifest, SaveResult};

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats the groups and entries of a manifest
    fn format_list(&self, manifest: &ResourceManifest, urls: bool) -> String;

    /// Formats manifest summary information
    fn format_info(&self, path: &Path, manifest: &ResourceManifest, missing: usize) -> String;

    /// Formats the result of a missing-file check
    fn format_check(&self, missing: &[(&GroupKey, &FileEntry)]) -> String;

    /// Formats the result of an edit that was saved
    fn format_edit_result(&self, result: &EditResult, save: Option<&SaveResult>) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_list(&self, manifest: &ResourceManifest, urls: bool) -> String {
        let mut output = String::new();

        for group in manifest.groups() {
            output.push_str(&format!("{}\n", group.key()));
            for entry in group.files() {
                let resource = if urls {
                    entry.resource_url(group.key().effective_prefix())
                } else {
                    entry.resource_path(group.key().effective_prefix())
                };
                output.push_str(&format!("  {:<40} {}", resource, entry.file_name()));
                if !entry.compression().is_default() {
                    output.push_str(&format!("  [{}]", describe_compression(entry)));
                }
                output.push('\n');
            }
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{} prefixes, {} files\n",
            manifest.len(),
            manifest.file_count()
        ));

        output
    }

    fn format_info(&self, path: &Path, manifest: &ResourceManifest, missing: usize) -> String {
        let mut output = String::new();

        output.push_str("Resource File Information:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("  Path:           {}\n", path.display()));
        if let Ok(meta) = std::fs::metadata(path) {
            output.push_str(&format!("  Size:           {}\n", humanize_bytes(meta.len())));
        }
        output.push_str(&format!("  Prefixes:       {}\n", manifest.len()));
        output.push_str(&format!("  Files:          {}\n", manifest.file_count()));

        let langs: Vec<_> = {
            let mut langs: Vec<_> = manifest
                .groups()
                .iter()
                .map(|g| g.key().lang())
                .filter(|l| !l.is_empty())
                .collect();
            langs.sort_unstable();
            langs.dedup();
            langs
        };
        if !langs.is_empty() {
            output.push_str(&format!("  Languages:      {}\n", langs.join(", ")));
        }

        let compressed = manifest
            .iter_files()
            .filter(|(_, f)| !f.compression().is_default())
            .count();
        output.push_str(&format!("  Custom compr.:  {}\n", compressed));

        if missing > 0 {
            output.push_str(&format!("  Missing files:  {}\n", missing));
        }

        output
    }

    fn format_check(&self, missing: &[(&GroupKey, &FileEntry)]) -> String {
        if missing.is_empty() {
            return "OK - all files present\n".to_string();
        }

        let mut output = format!("{} missing files:\n", missing.len());
        for (key, entry) in missing {
            output.push_str(&format!("  {}: {}\n", key, entry.file_name()));
        }
        output
    }

    fn format_edit_result(&self, result: &EditResult, save: Option<&SaveResult>) -> String {
        let mut output = String::new();

        let mut parts = Vec::new();
        for (count, label) in [
            (result.files_added, "added"),
            (result.files_removed, "removed"),
            (result.entries_updated, "updated"),
        ] {
            if count > 0 {
                parts.push(format!("{} {}", plural(count, "file"), label));
            }
        }
        for (count, label) in [
            (result.prefixes_added, "added"),
            (result.prefixes_removed, "removed"),
            (result.prefixes_renamed, "renamed"),
        ] {
            if count > 0 {
                parts.push(format!("{} {}", plural(count, "prefix"), label));
            }
        }
        if parts.is_empty() {
            output.push_str("No changes\n");
        } else {
            output.push_str(&parts.join(", "));
            output.push('\n');
        }
        if result.files_skipped > 0 {
            output.push_str(&format!(
                "Skipped {} already listed\n",
                plural(result.files_skipped, "file")
            ));
        }

        if let Some(save) = save {
            output.push_str(&format!(
                "Wrote {} ({})\n",
                save.path.display(),
                humanize_bytes(save.bytes_written)
            ));
            if let Some(backup) = &save.backup_path {
                output.push_str(&format!("Previous version kept as {}\n", backup.display()));
            }
            if let Some(warning) = &save.backup_warning {
                output.push_str(&format!("Warning: {}\n", warning));
            }
        }

        output
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_list(&self, manifest: &ResourceManifest, _urls: bool) -> String {
        let groups: Vec<_> = manifest
            .groups()
            .iter()
            .map(|g| {
                let prefix = g.key().effective_prefix();
                json!({
                    "prefix": prefix,
                    "lang": g.key().lang(),
                    "files": g.files().iter().map(|f| entry_json(prefix, f)).collect::<Vec<_>>(),
                })
            })
            .collect();

        serde_json::to_string_pretty(&groups).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_info(&self, path: &Path, manifest: &ResourceManifest, missing: usize) -> String {
        let obj = json!({
            "path": path.display().to_string(),
            "size": std::fs::metadata(path).ok().map(|m| m.len()),
            "prefix_count": manifest.len(),
            "file_count": manifest.file_count(),
            "missing_count": missing,
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_check(&self, missing: &[(&GroupKey, &FileEntry)]) -> String {
        let obj = json!({
            "success": missing.is_empty(),
            "missing": missing
                .iter()
                .map(|(k, f)| json!({"prefix": k.effective_prefix(), "lang": k.lang(), "file": f.file_name()}))
                .collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_edit_result(&self, result: &EditResult, save: Option<&SaveResult>) -> String {
        let obj = json!({
            "files_added": result.files_added,
            "files_skipped": result.files_skipped,
            "files_removed": result.files_removed,
            "entries_updated": result.entries_updated,
            "prefixes_added": result.prefixes_added,
            "prefixes_removed": result.prefixes_removed,
            "prefixes_renamed": result.prefixes_renamed,
            "saved": save.map(|s| json!({
                "path": s.path.display().to_string(),
                "bytes_written": s.bytes_written,
                "backup_path": s.backup_path.as_ref().map(|p| p.display().to_string()),
                "backup_warning": s.backup_warning,
            })),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

fn entry_json(prefix: &str, entry: &FileEntry) -> serde_json::Value {
    let compression = entry.compression();
    json!({
        "file": entry.file_name(),
        "alias": entry.alias(),
        "resource_path": entry.resource_path(prefix),
        "url": entry.resource_url(prefix),
        "compress_algo": compression.algorithm().as_str(),
        "compress": compression.effective_level(),
        "threshold": compression.threshold(),
    })
}

fn describe_compression(entry: &FileEntry) -> String {
    let elided = entry.compression().elided();
    let mut parts = Vec::new();
    if let Some(algorithm) = elided.algorithm {
        parts.push(algorithm.to_string());
    }
    if let Some(level) = elided.level {
        parts.push(format!("level {}", level));
    }
    if let Some(threshold) = elided.threshold {
        parts.push(format!("threshold {}%", threshold));
    }
    parts.join(", ")
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun) {
        (1, _) => format!("1 {}", noun),
        (_, "prefix") => format!("{} prefixes", count),
        _ => format!("{} {}s", count, noun),
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
