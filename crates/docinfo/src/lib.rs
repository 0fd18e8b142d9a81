//! # docinfo
//!
//! Doclet-aware source information for TypeScript and JavaScript files.
//!
//! The crate reads a source file into a tree of [`Info`] records (classes,
//! interfaces, functions, properties, variables, objects, imports, exports,
//! destructurings and free-standing doc comments) and answers questions
//! about them:
//!
//! - **Classification**: [`get_source_info`] parses a file with OXC and
//!   classifies every top-level statement, recovering the `/** … */` blocks
//!   between declarations as [`DocletInfo`] records.
//! - **Resolution**: [`Resolver::resolve_type`] follows imports across files
//!   to the declaration a name refers to, giving up on import cycles.
//! - **Flattening**: [`Resolver::auto_extend_info`] copies inherited members
//!   of base classes and interfaces into a derived record.
//! - **Doclets**: [`parse_doclet`] and [`to_doclet_string`] read and write
//!   comment blocks; [`merge_doclet_infos`] combines them.
//! - **Edits**: [`apply_edits`] splices non-overlapping replacements into a
//!   text, and the companion helpers reparse or reclassify the result.
//!
//! ## Quick Start
//!
//! ```rust
//! use docinfo::{Info, MemoryFileSystem, Resolver, get_source_info};
//!
//! # fn main() -> docinfo::Result<()> {
//! let fs = MemoryFileSystem::new()
//!     .with_file("/src/base.ts", "export interface Base {\n  /** Size. */\n  size: number;\n}\n");
//!
//! let source = get_source_info(
//!     "/src/main.ts",
//!     "import { Base } from './base.js';\nexport interface Options extends Base { title: string; }\n",
//!     false,
//! );
//!
//! let resolver = Resolver::new(fs);
//! let options = source.find("Options").unwrap();
//! let extended = resolver.auto_extend_info(&source, options)?.unwrap();
//!
//! let names: Vec<_> = extended.properties().unwrap().iter().filter_map(Info::name).collect();
//! assert_eq!(names, ["title", "size"]);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod doclet;
pub mod edits;
pub mod error;
pub mod fs;
pub mod info;
mod inherit;
pub mod parser;
pub mod resolver;
pub mod serialize;

pub use classifier::{classify_node, get_source_info};
pub use config::DocInfoConfig;
pub use doclet::{
    DocletInfo, DocletStyle, merge_doclet_infos, parse_doclet, to_doclet_string,
    to_doclet_string_with,
};
pub use edits::{Edit, apply_edits, apply_edits_to_program, apply_edits_to_source_info};
pub use error::{DocInfoError, Result};
pub use fs::{FileSystem, MemoryFileSystem, NativeFileSystem};
pub use info::{
    ClassInfo, DeconstructInfo, ExportInfo, Flag, FunctionInfo, ImportInfo, Info, InfoKind,
    InterfaceInfo, MetaInfo, ObjectInfo, PropertyInfo, ResolvedInfo, SourceInfo, Value,
    VariableInfo,
};
pub use inherit::NATIVE_TYPES;
pub use resolver::{Resolver, ResolverOptions};
pub use serialize::to_json_string;
