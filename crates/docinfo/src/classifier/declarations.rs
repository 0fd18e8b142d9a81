//! Classes, interfaces, functions and module syntax.

use indexmap::IndexMap;
use oxc_ast::ast::{
    ClassElement, Expression, Function, ImportDeclarationSpecifier, MethodDefinitionKind,
    MethodDefinitionType, ModuleExportName, TSType,
};
use oxc_span::{GetSpan, Span};

use super::bindings::{push_accessibility, unwrap_casts, with_flags};
use super::{CLASS_MEMBERS, Classifier, Context, INTERFACE_MEMBERS, Node, inner_range};
use crate::info::{
    ClassInfo, ExportInfo, Flag, FunctionInfo, ImportInfo, Info, InterfaceInfo, MetaInfo,
};

/// Name given to anonymous `export default` declarations.
const DEFAULT_NAME: &str = "default";

/// Interfaces and object-shaped type aliases.
pub(super) fn interface(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    match node {
        Node::Interface(declaration) => {
            let extends: Vec<String> = declaration
                .extends
                .iter()
                .map(|heritage| cx.text(heritage.span).to_string())
                .collect();
            Some(Info::Interface(InterfaceInfo {
                meta: cx.meta(declaration.span, ctx, "TSInterfaceDeclaration"),
                flags: with_flags(ctx.flags.clone(), &[(declaration.declare, Flag::Declare)]),
                doclet: None,
                name: declaration.id.name.to_string(),
                extends: (!extends.is_empty()).then_some(extends),
                generics: cx.generics(declaration.type_parameters.as_deref()),
                properties: cx.sequence(
                    declaration.body.body.iter().map(Node::Signature),
                    inner_range(declaration.body.span),
                    INTERFACE_MEMBERS,
                ),
            }))
        }
        Node::TypeAlias(alias) => {
            let TSType::TSTypeLiteral(literal) = &alias.type_annotation else {
                return None;
            };
            Some(Info::Interface(InterfaceInfo {
                meta: cx.meta(alias.span, ctx, "TSTypeAliasDeclaration"),
                flags: with_flags(ctx.flags.clone(), &[(alias.declare, Flag::Declare)]),
                doclet: None,
                name: alias.id.name.to_string(),
                extends: None,
                generics: cx.generics(alias.type_parameters.as_deref()),
                properties: cx.sequence(
                    literal.members.iter().map(Node::Signature),
                    inner_range(literal.span),
                    INTERFACE_MEMBERS,
                ),
            }))
        }
        _ => None,
    }
}

/// Import declarations, keyed by exported name.
pub(super) fn import(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    let Node::Import(declaration) = node else {
        return None;
    };

    let mut imports = IndexMap::new();
    if let Some(specifiers) = &declaration.specifiers {
        for specifier in specifiers {
            match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(named) => {
                    let imported = match &named.imported {
                        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
                        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
                        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
                    };
                    imports.insert(imported, named.local.name.to_string());
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                    imports.insert(DEFAULT_NAME.to_string(), default.local.name.to_string());
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                    imports.insert("*".to_string(), namespace.local.name.to_string());
                }
            }
        }
    }

    let specifier = declaration.source.value.as_str();
    let from = specifier.strip_suffix(".js").unwrap_or(specifier);

    Some(Info::Import(ImportInfo {
        meta: cx.meta(declaration.span, ctx, "ImportDeclaration"),
        flags: ctx.flags.clone(),
        doclet: None,
        from: from.to_string(),
        imports,
    }))
}

/// Function declarations and expressions, arrow functions and class methods.
pub(super) fn function(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    match node {
        Node::Function(function) => Some(function_info(
            cx,
            function,
            cx.meta(function.span, ctx, "FunctionDeclaration"),
            declared_name(function.id.as_ref().map(|id| id.name.as_str()), ctx),
            ctx.flags.clone(),
        )),
        Node::ClassElement(ClassElement::MethodDefinition(method)) => {
            let name = match method.kind {
                MethodDefinitionKind::Constructor => "constructor".to_string(),
                _ => cx.key_name(&method.key),
            };
            let mut flags = ctx.flags.clone();
            push_accessibility(&mut flags, Some(&method.key), method.accessibility);
            let flags = with_flags(
                flags,
                &[
                    (
                        matches!(method.r#type, MethodDefinitionType::TSAbstractMethodDefinition),
                        Flag::Abstract,
                    ),
                    (method.optional, Flag::Optional),
                    (method.r#static, Flag::Static),
                ],
            );
            Some(function_info(
                cx,
                &method.value,
                cx.meta(method.span, ctx, "MethodDefinition"),
                name,
                flags,
            ))
        }
        Node::Expression(expression) => match expression {
            Expression::FunctionExpression(function) => Some(function_info(
                cx,
                function,
                cx.meta(function.span, ctx, "FunctionExpression"),
                declared_name(function.id.as_ref().map(|id| id.name.as_str()), ctx),
                ctx.flags.clone(),
            )),
            Expression::ArrowFunctionExpression(arrow) => Some(Info::Function(FunctionInfo {
                meta: cx.meta(arrow.span, ctx, "ArrowFunctionExpression"),
                flags: with_flags(ctx.flags.clone(), &[(arrow.r#async, Flag::Async)]),
                doclet: None,
                name: declared_name(None, ctx),
                generics: cx.generics(arrow.type_parameters.as_deref()),
                parameters: cx.parameters(&arrow.params),
                return_type: cx.type_text(arrow.return_type.as_deref()),
                inherited: false,
            })),
            _ => None,
        },
        _ => None,
    }
}

/// `export default <expression>` and `export = <expression>`.
pub(super) fn export(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    let (span, syntax, expression) = match node {
        Node::ExportDefault(export) => (
            export.span,
            "ExportDefaultDeclaration",
            export.declaration.as_expression()?,
        ),
        Node::ExportAssignment(assignment) => {
            (assignment.span, "TSExportAssignment", &assignment.expression)
        }
        _ => return None,
    };

    let (inner, _) = unwrap_casts(cx, expression);
    let (name, object) = match inner {
        Expression::Identifier(ident) => (Some(ident.name.to_string()), None),
        _ => (
            None,
            cx.classify(Node::Expression(expression), &Context::default())
                .map(Box::new),
        ),
    };

    Some(Info::Export(ExportInfo {
        meta: cx.meta(span, ctx, syntax),
        flags: with_flags(ctx.flags.clone(), &[(true, Flag::Export), (true, Flag::Default)]),
        doclet: None,
        name,
        object,
    }))
}

/// Class declarations and class expressions.
pub(super) fn class(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    let (class, syntax) = match node {
        Node::Class(class) => (class, "ClassDeclaration"),
        Node::Expression(Expression::ClassExpression(class)) => (&**class, "ClassExpression"),
        _ => return None,
    };

    let extends = class.super_class.as_ref().map(|super_class| {
        let start = super_class.span().start;
        let end = class
            .super_type_arguments
            .as_ref()
            .map_or(super_class.span().end, |arguments| arguments.span.end);
        vec![cx.text(Span::new(start, end)).to_string()]
    });
    let implements: Vec<String> = class
        .implements
        .iter()
        .map(|implemented| cx.text(implemented.span).to_string())
        .collect();

    Some(Info::Class(ClassInfo {
        meta: cx.meta(class.span, ctx, syntax),
        flags: with_flags(
            ctx.flags.clone(),
            &[(class.r#abstract, Flag::Abstract), (class.declare, Flag::Declare)],
        ),
        doclet: None,
        name: declared_name(class.id.as_ref().map(|id| id.name.as_str()), ctx),
        extends,
        implements: (!implements.is_empty()).then_some(implements),
        generics: cx.generics(class.type_parameters.as_deref()),
        properties: cx.sequence(
            class.body.body.iter().map(Node::ClassElement),
            inner_range(class.body.span),
            CLASS_MEMBERS,
        ),
    }))
}

fn function_info(
    cx: &Classifier<'_>,
    function: &Function<'_>,
    meta: MetaInfo,
    name: String,
    flags: Vec<Flag>,
) -> Info {
    Info::Function(FunctionInfo {
        meta,
        flags: with_flags(
            flags,
            &[(function.r#async, Flag::Async), (function.declare, Flag::Declare)],
        ),
        doclet: None,
        name,
        generics: cx.generics(function.type_parameters.as_deref()),
        parameters: cx.parameters(&function.params),
        return_type: cx.type_text(function.return_type.as_deref()),
        inherited: false,
    })
}

/// Own identifier, else the binding name, else `default` for anonymous
/// default exports.
fn declared_name(id: Option<&str>, ctx: &Context) -> String {
    id.map(str::to_string)
        .or_else(|| ctx.name.clone())
        .or_else(|| ctx.flags.contains(&Flag::Default).then(|| DEFAULT_NAME.to_string()))
        .unwrap_or_default()
}
