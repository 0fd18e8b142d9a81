//! Inheritance flattening for classes and interfaces.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::Result;
use crate::info::{Info, SourceInfo};
use crate::resolver::Resolver;

/// Names of the standard library never looked up as base types.
pub const NATIVE_TYPES: &[&str] = &[
    "Array",
    "ArrayLike",
    "Awaited",
    "Boolean",
    "Date",
    "Error",
    "Exclude",
    "Extract",
    "Function",
    "HTMLElement",
    "InstanceType",
    "Iterable",
    "Map",
    "NonNullable",
    "Number",
    "Object",
    "Omit",
    "Parameters",
    "Partial",
    "Pick",
    "Promise",
    "PromiseLike",
    "Readonly",
    "ReadonlyArray",
    "Record",
    "RegExp",
    "Required",
    "ReturnType",
    "Set",
    "String",
    "Symbol",
    "WeakMap",
    "WeakSet",
];

/// Separators inside a base type expression such as `Partial<Base> & Other`.
static TYPE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w.]+").expect("type separator pattern"));

impl Resolver {
    /// Returns a copy of a class or interface with the members of its base
    /// types appended.
    ///
    /// Inherited members come after the local ones, base by base, and are
    /// marked `inherited`; a name that is already present is never added
    /// again. If any base type cannot be resolved nothing is applied and the
    /// result is `None`. Records that are not classes or interfaces also
    /// yield `None`; ones without base types come back unchanged.
    pub fn auto_extend_info(&self, source: &SourceInfo, info: &Info) -> Result<Option<Info>> {
        let (extends, generics) = match info {
            Info::Class(class) => (class.extends.as_deref(), class.generics.as_deref()),
            Info::Interface(interface) => {
                (interface.extends.as_deref(), interface.generics.as_deref())
            }
            _ => return Ok(None),
        };
        let Some(extends) = extends else {
            return Ok(Some(info.clone()));
        };

        let mut names: FxHashSet<String> = info
            .properties()
            .unwrap_or_default()
            .iter()
            .filter_map(Info::name)
            .map(str::to_string)
            .collect();
        let mut inherited = Vec::new();
        let type_parameters: Vec<&str> = generics
            .unwrap_or_default()
            .iter()
            .map(|generic| generic.name.as_str())
            .collect();

        for candidate in self.base_candidates(extends, &type_parameters) {
            let base = self
                .resolve_type(source, &candidate)?
                .and_then(|resolved| resolved.resolved_info);
            let Some(base) = base else {
                debug!(
                    name = ?info.name(),
                    base = %candidate,
                    "base type not found, skipping flattening"
                );
                return Ok(None);
            };

            let base = match base {
                Info::Export(export) => match export.object {
                    Some(object) => *object,
                    None => continue,
                },
                other => other,
            };
            if !matches!(base, Info::Class(_) | Info::Interface(_)) {
                continue;
            }

            for member in base.properties().unwrap_or_default() {
                if !matches!(member, Info::Function(_) | Info::Property(_)) {
                    continue;
                }
                let Some(name) = member.name() else {
                    continue;
                };
                if !names.insert(name.to_string()) {
                    continue;
                }
                inherited.push(mark_inherited(member.clone()));
            }
        }

        let mut extended = info.clone();
        match &mut extended {
            Info::Class(class) => class.properties.extend(inherited),
            Info::Interface(interface) => interface.properties.extend(inherited),
            _ => {}
        }
        Ok(Some(extended))
    }

    /// Distinct capitalized, non-native identifiers of the base type
    /// expressions, in order of appearance.
    ///
    /// Names in `type_parameters` belong to the derived record's own generics
    /// and are never candidates.
    pub fn base_candidates(&self, extends: &[String], type_parameters: &[&str]) -> Vec<String> {
        let native = &self.options().native_types;
        let mut seen = FxHashSet::default();
        let mut candidates = Vec::new();

        for expression in extends {
            for part in TYPE_SEPARATOR.split(expression) {
                if !part.starts_with(|c: char| c.is_ascii_uppercase())
                    || NATIVE_TYPES.contains(&part)
                    || type_parameters.contains(&part)
                    || native.iter().any(|name| name == part)
                {
                    continue;
                }
                if seen.insert(part) {
                    candidates.push(part.to_string());
                }
            }
        }

        candidates
    }
}

fn mark_inherited(mut member: Info) -> Info {
    match &mut member {
        Info::Function(function) => function.inherited = true,
        Info::Property(property) => property.inherited = true,
        _ => {}
    }
    member
}
