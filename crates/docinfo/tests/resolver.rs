//! Cross-file type resolution.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use docinfo::{
    DocInfoError, FileSystem, Info, MemoryFileSystem, NativeFileSystem, Resolver, get_source_info,
};
use tempfile::TempDir;

/// Serves files from memory and records every read.
#[derive(Debug, Clone, Default)]
struct RecordingFileSystem {
    files: MemoryFileSystem,
    reads: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingFileSystem {
    fn new(files: MemoryFileSystem) -> Self {
        Self {
            files,
            reads: Arc::default(),
        }
    }

    fn reads_of(&self, path: &str) -> usize {
        self.reads
            .lock()
            .unwrap()
            .iter()
            .filter(|read| read.as_path() == Path::new(path))
            .count()
    }
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.exists(path)
    }

    fn read_text(&self, path: &Path) -> docinfo::Result<String> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        self.files.read_text(path)
    }
}

/// Claims every file exists but fails to read any of them.
#[derive(Debug)]
struct UnreadableFileSystem;

impl FileSystem for UnreadableFileSystem {
    fn exists(&self, _path: &Path) -> bool {
        true
    }

    fn read_text(&self, path: &Path) -> docinfo::Result<String> {
        Err(DocInfoError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        ))
    }
}

#[test]
fn follows_renamed_imports() {
    let fs = MemoryFileSystem::new()
        .with_file("/src/other.ts", "export interface Foo { a: string; }\n");
    let source = get_source_info(
        "/src/main.ts",
        "import { Foo as Bar } from './other.js';\n",
        false,
    );

    let resolved = Resolver::new(fs).resolve_type(&source, "Bar").unwrap().unwrap();
    assert_eq!(resolved.r#type, "Bar");
    assert_eq!(resolved.path.to_str(), Some("/src/main.ts"));
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/other.ts"));
    assert_eq!(resolved.resolved_info.unwrap().name(), Some("Foo"));
}

#[test]
fn follows_re_export_chains() {
    let fs = MemoryFileSystem::new()
        .with_file("/src/a.ts", "import { Base } from './b';\n")
        .with_file("/src/b.d.ts", "export declare class Base {}\n");
    let source = get_source_info("/src/main.ts", "import { Base } from './a';\n", false);

    let resolved = Resolver::new(fs).resolve_type(&source, "Base").unwrap().unwrap();
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/b.d.ts"));
    assert!(matches!(resolved.resolved_info, Some(Info::Class(_))));
}

#[test]
fn local_declarations_answer_when_no_import_does() {
    let source = get_source_info(
        "/src/main.ts",
        "import { Other } from './missing';\nconst options = { a: 1 };\n",
        false,
    );

    let resolver = Resolver::new(MemoryFileSystem::new());
    let resolved = resolver.resolve_type(&source, "options").unwrap().unwrap();
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/main.ts"));
    assert!(resolver.resolve_type(&source, "Other").unwrap().is_none());
    assert!(resolver.resolve_type(&source, "nothing").unwrap().is_none());
}

#[test]
fn imports_win_over_local_names() {
    let fs = MemoryFileSystem::new()
        .with_file("/src/other.ts", "export class Shape { remote: number; }\n");
    let source = get_source_info(
        "/src/main.ts",
        "import { Shape } from './other';\nclass Shape { local: number; }\n",
        false,
    );

    let resolved = Resolver::new(fs).resolve_type(&source, "Shape").unwrap().unwrap();
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/other.ts"));
}

#[test]
fn circular_imports_give_up() {
    let fs = MemoryFileSystem::new()
        .with_file("/src/a.ts", "import { Loop } from './b';\n")
        .with_file("/src/b.ts", "import { Loop } from './a';\n");
    let source = get_source_info("/src/a.ts", "import { Loop } from './b';\n", false);

    assert!(Resolver::new(fs).resolve_type(&source, "Loop").unwrap().is_none());
}

#[test]
fn default_exports_resolve_to_their_declaration() {
    let fs = MemoryFileSystem::new()
        .with_file("/src/chart.ts", "class Chart { width: number; }\nexport default Chart;\n")
        .with_file("/src/anonymous.ts", "export default class { size: number; }\n");
    let source = get_source_info(
        "/src/main.ts",
        "import Chart from './chart';\nimport Thing from './anonymous';\n",
        false,
    );
    let resolver = Resolver::new(fs);

    let chart = resolver.resolve_type(&source, "Chart").unwrap().unwrap();
    assert!(matches!(&chart.resolved_info, Some(Info::Class(class)) if class.name == "Chart"));

    let thing = resolver.resolve_type(&source, "Thing").unwrap().unwrap();
    assert!(matches!(&thing.resolved_info, Some(Info::Class(class)) if class.name == "default"));
}

#[test]
fn default_imports_skip_the_target_files_own_default_imports() {
    let fs = MemoryFileSystem::new()
        .with_file(
            "/src/chart.ts",
            "import U from './utilities';\nclass Chart { width: number; }\nexport default Chart;\n",
        )
        .with_file("/src/utilities.ts", "const U = { a: 1 };\nexport default U;\n");
    let source = get_source_info("/src/axis.ts", "import Chart from './chart';\n", false);

    let chart = Resolver::new(fs).resolve_type(&source, "Chart").unwrap().unwrap();
    assert_eq!(chart.resolved_path.to_str(), Some("/src/chart.ts"));
    assert!(matches!(&chart.resolved_info, Some(Info::Class(class)) if class.name == "Chart"));
}

#[test]
fn mutual_default_imports_resolve() {
    let axis = "import Chart from './chart';\nclass Axis {}\nexport default Axis;\n";
    let chart = "import Axis from './axis';\nclass Chart {}\nexport default Chart;\n";
    let fs = MemoryFileSystem::new()
        .with_file("/src/axis.ts", axis)
        .with_file("/src/chart.ts", chart);
    let resolver = Resolver::new(fs);

    let from_axis = get_source_info("/src/axis.ts", axis, false);
    let resolved = resolver.resolve_type(&from_axis, "Chart").unwrap().unwrap();
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/chart.ts"));
    assert_eq!(resolved.resolved_info.unwrap().name(), Some("Chart"));

    let from_chart = get_source_info("/src/chart.ts", chart, false);
    let resolved = resolver.resolve_type(&from_chart, "Axis").unwrap().unwrap();
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/axis.ts"));
    assert_eq!(resolved.resolved_info.unwrap().name(), Some("Axis"));
}

#[test]
fn cycles_only_end_their_own_branch() {
    let main = "import { Foo } from './b';\n";
    let fs = MemoryFileSystem::new()
        .with_file("/src/main.ts", main)
        .with_file(
            "/src/b.ts",
            "import { Foo as Local } from './main';\nexport interface Foo { b: number }\n",
        );
    let source = get_source_info("/src/main.ts", main, false);

    let resolved = Resolver::new(fs).resolve_type(&source, "Foo").unwrap().unwrap();
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/b.ts"));
    assert!(matches!(resolved.resolved_info, Some(Info::Interface(_))));
}

#[test]
fn unreadable_targets_fail_the_call() {
    let source = get_source_info("/src/main.ts", "import { Foo } from './broken';\n", false);

    let error = Resolver::new(UnreadableFileSystem)
        .resolve_type(&source, "Foo")
        .unwrap_err();
    assert!(matches!(error, DocInfoError::Io { .. }));
}

#[test]
fn each_file_is_read_once_per_call() {
    let files = MemoryFileSystem::new()
        .with_file("/src/a.ts", "import { Foo } from './shared';\n")
        .with_file("/src/b.ts", "import { Foo } from './shared';\nexport class Foo {}\n")
        .with_file("/src/shared.ts", "export const other = 1;\n");
    let fs = RecordingFileSystem::new(files);
    let source = get_source_info(
        "/src/main.ts",
        "import { Foo } from './a';\nimport { Foo } from './b';\n",
        false,
    );
    let resolver = Resolver::new(fs.clone());

    let resolved = resolver.resolve_type(&source, "Foo").unwrap().unwrap();
    assert_eq!(resolved.resolved_path.to_str(), Some("/src/b.ts"));
    assert_eq!(fs.reads_of("/src/shared.ts"), 1);
    assert_eq!(fs.reads_of("/src/a.ts"), 1);
    assert_eq!(fs.reads_of("/src/b.ts"), 1);

    resolver.resolve_type(&source, "Foo").unwrap();
    assert_eq!(fs.reads_of("/src/shared.ts"), 2);
}

#[test]
fn resolves_against_the_native_filesystem() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(
        dir.path().join("lib").join("options.d.ts"),
        "export interface Options { title: string; }\n",
    )
    .unwrap();

    let main = dir.path().join("main.ts");
    let source = get_source_info(&main, "import { Options } from './lib/options.js';\n", false);

    let resolved = Resolver::new(NativeFileSystem::new())
        .resolve_type(&source, "Options")
        .unwrap()
        .unwrap();
    assert_eq!(
        resolved.resolved_path,
        dir.path().join("lib").join("options.d.ts")
    );
}

#[test]
fn loaded_files_capture_text_when_requested() {
    let fs = MemoryFileSystem::new().with_file("/src/other.ts", "export interface Foo {}\n");
    let source = get_source_info("/src/main.ts", "import { Foo } from './other';\n", false);

    let resolved = Resolver::new(fs)
        .include_nodes(true)
        .resolve_type(&source, "Foo")
        .unwrap()
        .unwrap();
    let info = resolved.resolved_info.unwrap();
    assert_eq!(info.meta().unwrap().text.as_deref(), Some("export interface Foo {}"));
}
