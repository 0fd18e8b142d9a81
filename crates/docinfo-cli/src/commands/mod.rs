//! Command implementations.
//!
//! Each command returns the text to print on stdout.

use std::path::Path;

use docinfo::{
    DocInfoConfig, DocletInfo, FileSystem, Info, NativeFileSystem, SourceInfo, Value,
    get_source_info, to_doclet_string_with, to_json_string,
};
use tracing::{debug, info};

use crate::cli::{Cli, Command, DocletsArgs, DumpArgs, ExtendArgs, ResolveArgs};
use crate::error::{CliError, Result};

/// Run the selected subcommand.
pub fn execute(cli: &Cli) -> Result<String> {
    let config = DocInfoConfig::load(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    match &cli.command {
        Command::Dump(args) => dump(args, &config),
        Command::Resolve(args) => resolve(args, &config),
        Command::Extend(args) => extend(args, &config),
        Command::Doclets(args) => doclets(args, &config),
    }
}

pub fn dump(args: &DumpArgs, config: &DocInfoConfig) -> Result<String> {
    let source = load_source(&args.file, args.nodes || config.include_nodes)?;
    info!(records = source.code.len(), "classified {}", args.file.display());
    Ok(to_json_string(&source)?)
}

pub fn resolve(args: &ResolveArgs, config: &DocInfoConfig) -> Result<String> {
    let source = load_source(&args.file, config.include_nodes)?;
    let resolver = config.resolver(NativeFileSystem::new());

    let resolved = resolver
        .resolve_type(&source, &args.name)?
        .ok_or_else(|| CliError::Unresolved {
            name: args.name.clone(),
            path: args.file.clone(),
        })?;
    info!(
        name = %args.name,
        resolved_path = %resolved.resolved_path.display(),
        "resolved"
    );
    Ok(to_json_string(&resolved)?)
}

pub fn extend(args: &ExtendArgs, config: &DocInfoConfig) -> Result<String> {
    let source = load_source(&args.file, config.include_nodes)?;
    let target = source
        .find(&args.name)
        .filter(|info| matches!(info, Info::Class(_) | Info::Interface(_)))
        .ok_or_else(|| CliError::NotExtendable {
            name: args.name.clone(),
            path: args.file.clone(),
        })?;

    let resolver = config.resolver(NativeFileSystem::new());
    let extended = resolver
        .auto_extend_info(&source, target)?
        .ok_or_else(|| CliError::UnresolvedBase {
            name: args.name.clone(),
        })?;
    Ok(to_json_string(&extended)?)
}

pub fn doclets(args: &DocletsArgs, config: &DocInfoConfig) -> Result<String> {
    let source = load_source(&args.file, false)?;

    let mut found = Vec::new();
    for info in &source.code {
        collect_doclets(info, &mut found);
    }
    info!(doclets = found.len(), "collected doc comments");

    let blocks: Vec<String> = found
        .into_iter()
        .map(|doclet| to_doclet_string_with(doclet, &args.indent, &config.doclet))
        .collect();
    Ok(blocks.join("\n\n"))
}

fn load_source(path: &Path, include_nodes: bool) -> Result<SourceInfo> {
    let text = NativeFileSystem::new().read_text(path)?;
    Ok(get_source_info(path, &text, include_nodes))
}

/// Doclets of a record and everything nested in it, in source order.
fn collect_doclets<'i>(info: &'i Info, out: &mut Vec<&'i DocletInfo>) {
    if let Some(doclet) = info.doclet() {
        out.push(doclet);
    }

    match info {
        Info::Class(_) | Info::Interface(_) | Info::Object(_) => {
            for member in info.properties().unwrap_or_default() {
                collect_doclets(member, out);
            }
        }
        Info::Export(export) => {
            if let Some(object) = &export.object {
                collect_doclets(object, out);
            }
        }
        Info::Property(property) => {
            if let Some(Value::Info(value)) = &property.value {
                collect_doclets(value, out);
            }
        }
        Info::Variable(variable) => {
            if let Some(Value::Info(value)) = &variable.value {
                collect_doclets(value, out);
            }
        }
        Info::Function(function) => {
            for parameter in function.parameters.iter().flatten() {
                collect_doclets(parameter, out);
            }
        }
        Info::Deconstruct(_) | Info::Doclet(_) | Info::Import(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_nested_doclets_in_order() {
        let source = get_source_info(
            "main.ts",
            "/** Outer. */\nconst options = {\n    /** Inner. */\n    a: 1,\n};\n/** @apioption loose */\n",
            false,
        );

        let mut found = Vec::new();
        for info in &source.code {
            collect_doclets(info, &mut found);
        }
        let descriptions: Vec<_> = found.iter().map(|doclet| doclet.description()).collect();
        assert_eq!(descriptions, [Some("Outer."), Some("Inner."), None]);
        assert!(found[2].is_apioption());
    }
}
