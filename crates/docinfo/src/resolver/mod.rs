//! Type resolver: follows imports to the declaration behind a name.
//!
//! A query first tries every import that binds the name, in declaration
//! order, then the top-level records of the file itself. A query for the
//! default export goes straight to the file's own default export. Files
//! currently being searched are kept on an explicit stack; reaching one of
//! them again ends that import branch with no result, and the search goes on
//! with the next import and the local records.

mod paths;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::get_source_info;
use crate::error::Result;
use crate::fs::{FileSystem, NativeFileSystem};
use crate::info::{Flag, Info, ResolvedInfo, SourceInfo};

/// Query that selects a file's default export.
pub const DEFAULT_EXPORT: &str = "default";

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Suffixes probed, in order, for extension-less import targets.
    pub extensions: Vec<String>,
    /// Base types treated as built in when flattening, in addition to the
    /// standard library names.
    pub native_types: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".d.ts".to_string(), ".ts".to_string()],
            native_types: Vec::new(),
        }
    }
}

/// Resolves names across files and flattens inheritance.
#[derive(Debug, Clone)]
pub struct Resolver {
    fs: Arc<dyn FileSystem>,
    options: ResolverOptions,
    include_nodes: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(NativeFileSystem::new())
    }
}

impl Resolver {
    pub fn new(fs: impl FileSystem + 'static) -> Self {
        Self::with_options(fs, ResolverOptions::default())
    }

    pub fn with_options(fs: impl FileSystem + 'static, options: ResolverOptions) -> Self {
        Self {
            fs: Arc::new(fs),
            options,
            include_nodes: false,
        }
    }

    /// Capture verbatim node text in files loaded during resolution.
    pub fn include_nodes(mut self, include_nodes: bool) -> Self {
        self.include_nodes = include_nodes;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Finds the declaration `name` refers to from inside `source`.
    ///
    /// Returns `Ok(None)` when nothing matches or when the only path to a
    /// match runs through an import cycle. Fails only when a target file
    /// exists but cannot be read.
    pub fn resolve_type(&self, source: &SourceInfo, name: &str) -> Result<Option<ResolvedInfo>> {
        let mut session = Session::new(&source.path);

        let resolved = match self.lookup(&mut session, source, name)? {
            Lookup::Found { path, info } => Some(ResolvedInfo {
                r#type: name.to_string(),
                path: source.path.clone(),
                resolved_path: path,
                resolved_info: Some(info),
            }),
            Lookup::NotFound => None,
        };

        debug!(
            name,
            path = %source.path.display(),
            found = resolved.is_some(),
            loaded = session.cache.len(),
            "resolved type"
        );
        Ok(resolved)
    }

    fn lookup(&self, session: &mut Session, source: &SourceInfo, name: &str) -> Result<Lookup> {
        if name == DEFAULT_EXPORT {
            return Ok(lookup_default(source));
        }

        for import in source.imports() {
            let Some(original) = import.original_name_of(name) else {
                continue;
            };
            let Some(target) = paths::locate(
                self.fs.as_ref(),
                &source.path,
                &import.from,
                &self.options.extensions,
            ) else {
                debug!(from = %import.from, "import target not found");
                continue;
            };

            if session.stack.contains(&target) {
                debug!(
                    name,
                    target = %target.display(),
                    "circular import, giving up on this branch"
                );
                continue;
            }

            let target_info = self.load(session, &target)?;
            debug!(name, original, target = %target.display(), "following import");

            session.stack.push(target);
            let found = self.lookup(session, &target_info, original);
            session.stack.pop();

            if let found @ Lookup::Found { .. } = found? {
                return Ok(found);
            }
        }

        Ok(lookup_local(source, name))
    }

    /// Reads and classifies a file, once per resolution call.
    fn load(&self, session: &mut Session, path: &Path) -> Result<Arc<SourceInfo>> {
        if let Some(info) = session.cache.get(path) {
            return Ok(Arc::clone(info));
        }

        let text = self.fs.read_text(path)?;
        let info = Arc::new(get_source_info(path, &text, self.include_nodes));
        debug!(path = %path.display(), records = info.code.len(), "loaded source");
        session.cache.insert(path.to_path_buf(), Arc::clone(&info));
        Ok(info)
    }
}

fn lookup_local(source: &SourceInfo, name: &str) -> Lookup {
    if name == DEFAULT_EXPORT {
        return lookup_default(source);
    }

    source
        .code
        .iter()
        .find(|info| declares(info, name))
        .map_or(Lookup::NotFound, |info| Lookup::Found {
            path: source.path.clone(),
            info: info.clone(),
        })
}

fn lookup_default(source: &SourceInfo) -> Lookup {
    let Some(info) = source
        .code
        .iter()
        .find(|info| matches!(info, Info::Export(_)) || info.has_flag(Flag::Default))
    else {
        return Lookup::NotFound;
    };

    // `export default Name` stands for the local declaration of `Name`.
    if let Info::Export(export) = info {
        if let (Some(local), None) = (&export.name, &export.object) {
            if local != DEFAULT_EXPORT {
                if let found @ Lookup::Found { .. } = lookup_local(source, local) {
                    return found;
                }
            }
        }
    }

    Lookup::Found {
        path: source.path.clone(),
        info: info.clone(),
    }
}

/// Whether a top-level record can answer a query for `name`.
fn declares(info: &Info, name: &str) -> bool {
    match info {
        Info::Export(export) => {
            export.name.as_deref() == Some(name)
                || export.object.as_ref().and_then(|object| object.name()) == Some(name)
        }
        Info::Class(_) | Info::Interface(_) | Info::Object(_) | Info::Variable(_) => {
            info.name() == Some(name)
        }
        _ => false,
    }
}

enum Lookup {
    Found { path: PathBuf, info: Info },
    NotFound,
}

/// State of one top-level resolution call.
struct Session {
    /// Files currently being searched.
    stack: Vec<PathBuf>,
    /// Classified files, keyed by resolved path.
    cache: FxHashMap<PathBuf, Arc<SourceInfo>>,
}

impl Session {
    fn new(start: &Path) -> Self {
        Self {
            stack: vec![start.clean()],
            cache: FxHashMap::default(),
        }
    }
}
