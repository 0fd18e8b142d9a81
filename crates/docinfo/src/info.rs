//! The information model produced by the classifier.
//!
//! Every record is a plain value tree: a parent owns its nested records and
//! nothing points back up. Records serialize with a `kind` discriminator so a
//! dumped [`SourceInfo`] reads the same way the documentation tooling expects.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::doclet::DocletInfo;

/// Position of a record in its source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    /// Byte offset where the node's syntax starts.
    pub begin: u32,
    /// Byte offset where the node ends.
    pub end: u32,
    /// Width of the leading trivia (whitespace and comments) before `begin`.
    pub trivia: u32,
    /// OXC node type the record was classified from.
    pub syntax: String,
    /// Verbatim node source, only collected when node capture is enabled.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

impl MetaInfo {
    /// Byte offset where the leading trivia starts.
    pub fn full_begin(&self) -> u32 {
        self.begin - self.trivia
    }
}

/// Declaration modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Abstract,
    Async,
    Declare,
    Default,
    Export,
    Optional,
    Private,
    Protected,
    Public,
    Readonly,
    Static,
}

/// Initializer of a property or variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A recognized expression shape (object literal, function, class).
    Info(Box<Info>),
    /// Raw initializer text.
    Literal(String),
}

impl Value {
    pub fn as_info(&self) -> Option<&Info> {
        match self {
            Value::Info(info) => Some(info),
            Value::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Value::Literal(text) => Some(text),
            Value::Info(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extends: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub implements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub generics: Option<Vec<VariableInfo>>,
    /// Function, Property and Doclet records of the class body.
    pub properties: Vec<Info>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extends: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub generics: Option<Vec<VariableInfo>>,
    /// Interface, Property and Doclet records of the interface body.
    pub properties: Vec<Info>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    /// Constructors are named `constructor`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub generics: Option<Vec<VariableInfo>>,
    /// Variable or Deconstruct records, in declaration order.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parameters: Option<Vec<Info>>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none", default)]
    pub return_type: Option<String>,
    #[serde(skip_serializing_if = "is_false", default)]
    pub inherited: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "is_false", default)]
    pub inherited: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    /// Type assertion text when the literal was cast.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub r#type: Option<String>,
    pub properties: Vec<Info>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    /// Module specifier without quotes and without a trailing `.js`.
    pub from: String,
    /// Exported name in the target module → name bound in this file.
    ///
    /// Default imports use the key `default`, namespace imports `*`.
    pub imports: IndexMap<String, String>,
}

impl ImportInfo {
    /// Returns the exported name a query refers to, matching either side of
    /// the mapping.
    ///
    /// The `default` and `*` keys are not names and only match through their
    /// local binding.
    pub fn original_name_of(&self, name: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|(original, local)| {
                local.as_str() == name
                    || (original.as_str() == name && !matches!(original.as_str(), "default" | "*"))
            })
            .map(|(original, _)| original.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub object: Option<Box<Info>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeconstructInfo {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doclet: Option<DocletInfo>,
    /// Source property (or array index) → bound local name.
    pub deconstructs: IndexMap<String, String>,
    /// Initializer text.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub from: Option<String>,
}

/// A classified record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Info {
    Class(ClassInfo),
    Deconstruct(DeconstructInfo),
    Doclet(DocletInfo),
    Export(ExportInfo),
    Function(FunctionInfo),
    Import(ImportInfo),
    Interface(InterfaceInfo),
    Object(ObjectInfo),
    Property(PropertyInfo),
    Variable(VariableInfo),
}

/// Discriminator of an [`Info`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoKind {
    Class,
    Deconstruct,
    Doclet,
    Export,
    Function,
    Import,
    Interface,
    Object,
    Property,
    Variable,
}

impl Info {
    pub fn kind(&self) -> InfoKind {
        match self {
            Info::Class(_) => InfoKind::Class,
            Info::Deconstruct(_) => InfoKind::Deconstruct,
            Info::Doclet(_) => InfoKind::Doclet,
            Info::Export(_) => InfoKind::Export,
            Info::Function(_) => InfoKind::Function,
            Info::Import(_) => InfoKind::Import,
            Info::Interface(_) => InfoKind::Interface,
            Info::Object(_) => InfoKind::Object,
            Info::Property(_) => InfoKind::Property,
            Info::Variable(_) => InfoKind::Variable,
        }
    }

    /// Declared name, for the records that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Info::Class(info) => Some(&info.name),
            Info::Function(info) => Some(&info.name),
            Info::Interface(info) => Some(&info.name),
            Info::Property(info) => Some(&info.name),
            Info::Variable(info) => Some(&info.name),
            Info::Export(info) => info.name.as_deref(),
            Info::Deconstruct(_) | Info::Doclet(_) | Info::Import(_) | Info::Object(_) => None,
        }
    }

    /// Position of the record; doclets only carry one when recovered from
    /// source.
    pub fn meta(&self) -> Option<&MetaInfo> {
        match self {
            Info::Class(info) => Some(&info.meta),
            Info::Deconstruct(info) => Some(&info.meta),
            Info::Doclet(info) => info.meta.as_ref(),
            Info::Export(info) => Some(&info.meta),
            Info::Function(info) => Some(&info.meta),
            Info::Import(info) => Some(&info.meta),
            Info::Interface(info) => Some(&info.meta),
            Info::Object(info) => Some(&info.meta),
            Info::Property(info) => Some(&info.meta),
            Info::Variable(info) => Some(&info.meta),
        }
    }

    pub(crate) fn meta_mut(&mut self) -> Option<&mut MetaInfo> {
        match self {
            Info::Class(info) => Some(&mut info.meta),
            Info::Deconstruct(info) => Some(&mut info.meta),
            Info::Doclet(info) => info.meta.as_mut(),
            Info::Export(info) => Some(&mut info.meta),
            Info::Function(info) => Some(&mut info.meta),
            Info::Import(info) => Some(&mut info.meta),
            Info::Interface(info) => Some(&mut info.meta),
            Info::Object(info) => Some(&mut info.meta),
            Info::Property(info) => Some(&mut info.meta),
            Info::Variable(info) => Some(&mut info.meta),
        }
    }

    pub fn flags(&self) -> &[Flag] {
        match self {
            Info::Class(info) => &info.flags,
            Info::Deconstruct(info) => &info.flags,
            Info::Doclet(_) => &[],
            Info::Export(info) => &info.flags,
            Info::Function(info) => &info.flags,
            Info::Import(info) => &info.flags,
            Info::Interface(info) => &info.flags,
            Info::Object(info) => &info.flags,
            Info::Property(info) => &info.flags,
            Info::Variable(info) => &info.flags,
        }
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags().contains(&flag)
    }

    /// Attached doclet. A free-standing Doclet record is its own doclet.
    pub fn doclet(&self) -> Option<&DocletInfo> {
        match self {
            Info::Class(info) => info.doclet.as_ref(),
            Info::Deconstruct(info) => info.doclet.as_ref(),
            Info::Doclet(info) => Some(info),
            Info::Export(info) => info.doclet.as_ref(),
            Info::Function(info) => info.doclet.as_ref(),
            Info::Import(info) => info.doclet.as_ref(),
            Info::Interface(info) => info.doclet.as_ref(),
            Info::Object(info) => info.doclet.as_ref(),
            Info::Property(info) => info.doclet.as_ref(),
            Info::Variable(info) => info.doclet.as_ref(),
        }
    }

    pub fn doclet_mut(&mut self) -> Option<&mut DocletInfo> {
        match self {
            Info::Class(info) => info.doclet.as_mut(),
            Info::Deconstruct(info) => info.doclet.as_mut(),
            Info::Doclet(info) => Some(info),
            Info::Export(info) => info.doclet.as_mut(),
            Info::Function(info) => info.doclet.as_mut(),
            Info::Import(info) => info.doclet.as_mut(),
            Info::Interface(info) => info.doclet.as_mut(),
            Info::Object(info) => info.doclet.as_mut(),
            Info::Property(info) => info.doclet.as_mut(),
            Info::Variable(info) => info.doclet.as_mut(),
        }
    }

    /// Slot for attaching a leading doclet. Doclet records have none.
    pub(crate) fn doclet_slot(&mut self) -> Option<&mut Option<DocletInfo>> {
        match self {
            Info::Class(info) => Some(&mut info.doclet),
            Info::Deconstruct(info) => Some(&mut info.doclet),
            Info::Doclet(_) => None,
            Info::Export(info) => Some(&mut info.doclet),
            Info::Function(info) => Some(&mut info.doclet),
            Info::Import(info) => Some(&mut info.doclet),
            Info::Interface(info) => Some(&mut info.doclet),
            Info::Object(info) => Some(&mut info.doclet),
            Info::Property(info) => Some(&mut info.doclet),
            Info::Variable(info) => Some(&mut info.doclet),
        }
    }

    /// Member list of container records.
    pub fn properties(&self) -> Option<&[Info]> {
        match self {
            Info::Class(info) => Some(&info.properties),
            Info::Interface(info) => Some(&info.properties),
            Info::Object(info) => Some(&info.properties),
            _ => None,
        }
    }

    /// Declared base types of classes and interfaces.
    pub fn extends(&self) -> Option<&[String]> {
        match self {
            Info::Class(info) => info.extends.as_deref(),
            Info::Interface(info) => info.extends.as_deref(),
            _ => None,
        }
    }

    /// Whether the record was copied in from a base type.
    pub fn is_inherited(&self) -> bool {
        match self {
            Info::Function(info) => info.inherited,
            Info::Property(info) => info.inherited,
            _ => false,
        }
    }
}

/// The classified contents of one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: PathBuf,
    /// Top-level records in source order.
    pub code: Vec<Info>,
}

impl SourceInfo {
    /// Top-level record declared with the given name, if any.
    pub fn find(&self, name: &str) -> Option<&Info> {
        self.code.iter().find(|info| info.name() == Some(name))
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportInfo> {
        self.code.iter().filter_map(|info| match info {
            Info::Import(import) => Some(import),
            _ => None,
        })
    }
}

/// Result of a type resolution query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInfo {
    /// Name that was queried.
    pub r#type: String,
    /// File the query started from.
    pub path: PathBuf,
    /// File that declares the name.
    pub resolved_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resolved_info: Option<Info>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
