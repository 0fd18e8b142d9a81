//! Variables, destructuring, members and object literals.

use indexmap::IndexMap;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, ClassElement, Expression, ObjectPropertyKind,
    PropertyDefinitionType, PropertyKey, TSAccessibility, TSSignature,
};
use oxc_span::{GetSpan, Span};

use super::{Classifier, Context, Node, OBJECT_MEMBERS, inner_range};
use crate::info::{
    DeconstructInfo, Flag, Info, MetaInfo, ObjectInfo, PropertyInfo, Value, VariableInfo,
};

/// Top-level variables, parameters and type parameters bound to a plain
/// identifier.
pub(super) fn variable(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    match node {
        Node::Declarator(declarator) => {
            let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
                return None;
            };
            let name = id.name.to_string();
            let value = declarator.init.as_ref().map(|init| cx.value(init, &name));
            Some(Info::Variable(VariableInfo {
                meta: cx.meta(declarator.span, ctx, "VariableDeclarator"),
                flags: ctx.flags.clone(),
                doclet: None,
                name,
                r#type: cx.type_text(declarator.id.type_annotation.as_deref()),
                value,
            }))
        }
        Node::Parameter(parameter) => {
            let pattern = &parameter.pattern;
            let (target, default) = match &pattern.kind {
                BindingPatternKind::AssignmentPattern(assignment) => {
                    (&assignment.left, Some(&assignment.right))
                }
                _ => (pattern, None),
            };
            let BindingPatternKind::BindingIdentifier(id) = &target.kind else {
                return None;
            };

            let mut flags = ctx.flags.clone();
            push_accessibility(&mut flags, None, parameter.accessibility);
            let flags = with_flags(
                flags,
                &[
                    (parameter.readonly, Flag::Readonly),
                    (pattern.optional || target.optional, Flag::Optional),
                ],
            );

            let name = id.name.to_string();
            let annotation = pattern
                .type_annotation
                .as_deref()
                .or(target.type_annotation.as_deref());
            let value = default.map(|expression| cx.value(expression, &name));
            Some(Info::Variable(VariableInfo {
                meta: cx.meta(parameter.span, ctx, "FormalParameter"),
                flags,
                doclet: None,
                name,
                r#type: cx.type_text(annotation),
                value,
            }))
        }
        Node::RestParameter(rest) => {
            let BindingPatternKind::BindingIdentifier(id) = &rest.argument.kind else {
                return None;
            };
            Some(Info::Variable(VariableInfo {
                meta: cx.meta(rest.span, ctx, "BindingRestElement"),
                flags: ctx.flags.clone(),
                doclet: None,
                name: format!("...{}", id.name),
                r#type: cx.type_text(rest.argument.type_annotation.as_deref()),
                value: None,
            }))
        }
        Node::TypeParameter(parameter) => Some(Info::Variable(VariableInfo {
            meta: cx.meta(parameter.span, ctx, "TSTypeParameter"),
            flags: ctx.flags.clone(),
            doclet: None,
            name: parameter.name.name.to_string(),
            r#type: parameter
                .constraint
                .as_ref()
                .map(|constraint| cx.text(constraint.span()).to_string()),
            value: parameter
                .default
                .as_ref()
                .map(|default| Value::Literal(cx.text(default.span()).to_string())),
        })),
        _ => None,
    }
}

/// Class fields, interface members and object literal properties.
pub(super) fn property(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    match node {
        Node::ClassElement(ClassElement::PropertyDefinition(prop)) => {
            let mut flags = ctx.flags.clone();
            push_accessibility(&mut flags, Some(&prop.key), prop.accessibility);
            let flags = with_flags(
                flags,
                &[
                    (
                        matches!(
                            prop.r#type,
                            PropertyDefinitionType::TSAbstractPropertyDefinition
                        ),
                        Flag::Abstract,
                    ),
                    (prop.declare, Flag::Declare),
                    (prop.optional, Flag::Optional),
                    (prop.readonly, Flag::Readonly),
                    (prop.r#static, Flag::Static),
                ],
            );
            let name = cx.key_name(&prop.key);
            let value = prop.value.as_ref().map(|value| cx.value(value, &name));
            Some(property_info(
                cx.meta(prop.span, ctx, "PropertyDefinition"),
                flags,
                name,
                cx.type_text(prop.type_annotation.as_deref()),
                value,
            ))
        }
        Node::ClassElement(ClassElement::AccessorProperty(accessor)) => {
            let mut flags = ctx.flags.clone();
            push_accessibility(&mut flags, Some(&accessor.key), None);
            let flags = with_flags(flags, &[(accessor.r#static, Flag::Static)]);
            let name = cx.key_name(&accessor.key);
            let value = accessor.value.as_ref().map(|value| cx.value(value, &name));
            Some(property_info(
                cx.meta(accessor.span, ctx, "AccessorProperty"),
                flags,
                name,
                cx.type_text(accessor.type_annotation.as_deref()),
                value,
            ))
        }
        Node::Signature(TSSignature::TSPropertySignature(signature)) => {
            let flags = with_flags(
                ctx.flags.clone(),
                &[
                    (signature.optional, Flag::Optional),
                    (signature.readonly, Flag::Readonly),
                ],
            );
            Some(property_info(
                cx.meta(signature.span, ctx, "TSPropertySignature"),
                flags,
                cx.key_name(&signature.key),
                cx.type_text(signature.type_annotation.as_deref()),
                None,
            ))
        }
        Node::Signature(TSSignature::TSMethodSignature(signature)) => {
            let generics = signature
                .type_parameters
                .as_ref()
                .map_or("", |parameters| cx.text(parameters.span));
            let params = cx.text(signature.params.span);
            let returns = signature
                .return_type
                .as_ref()
                .map_or("void", |annotation| {
                    cx.text(annotation.type_annotation.span())
                });
            let flags = with_flags(ctx.flags.clone(), &[(signature.optional, Flag::Optional)]);
            Some(property_info(
                cx.meta(signature.span, ctx, "TSMethodSignature"),
                flags,
                cx.key_name(&signature.key),
                Some(format!("{generics}{params} => {returns}")),
                None,
            ))
        }
        Node::ObjectProperty(ObjectPropertyKind::ObjectProperty(prop)) => {
            let name = cx.key_name(&prop.key);
            let value = cx.value(&prop.value, &name);
            Some(property_info(
                cx.meta(prop.span, ctx, "ObjectProperty"),
                ctx.flags.clone(),
                name,
                None,
                Some(value),
            ))
        }
        _ => None,
    }
}

/// Object literals, including parenthesized and type-asserted ones.
pub(super) fn object(cx: &Classifier<'_>, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
    let Node::Expression(expression) = node else {
        return None;
    };
    let (inner, cast) = unwrap_casts(cx, expression);
    let Expression::ObjectExpression(object) = inner else {
        return None;
    };

    let properties = cx.sequence(
        object.properties.iter().map(Node::ObjectProperty),
        inner_range(object.span),
        OBJECT_MEMBERS,
    );
    Some(Info::Object(ObjectInfo {
        meta: cx.meta(expression.span(), ctx, "ObjectExpression"),
        flags: ctx.flags.clone(),
        doclet: None,
        r#type: cast,
        properties,
    }))
}

/// Destructuring declarators and parameters.
pub(super) fn deconstruct(
    cx: &Classifier<'_>,
    node: Node<'_, '_>,
    ctx: &Context,
) -> Option<Info> {
    let (span, syntax, pattern, init) = match node {
        Node::Declarator(declarator) => (
            declarator.span,
            "VariableDeclarator",
            &declarator.id,
            declarator.init.as_ref(),
        ),
        Node::Parameter(parameter) => match &parameter.pattern.kind {
            BindingPatternKind::AssignmentPattern(assignment) => (
                parameter.span,
                "FormalParameter",
                &assignment.left,
                Some(&assignment.right),
            ),
            _ => (parameter.span, "FormalParameter", &parameter.pattern, None),
        },
        _ => return None,
    };

    if !matches!(
        pattern.kind,
        BindingPatternKind::ObjectPattern(_) | BindingPatternKind::ArrayPattern(_)
    ) {
        return None;
    }

    let mut deconstructs = IndexMap::new();
    collect_bindings(cx, pattern, "", &mut deconstructs);

    Some(Info::Deconstruct(DeconstructInfo {
        meta: cx.meta(span, ctx, syntax),
        flags: ctx.flags.clone(),
        doclet: None,
        deconstructs,
        from: init.map(|init| cx.text(init.span()).to_string()),
    }))
}

/// Strips parentheses and type assertions, returning the outermost cast.
pub(super) fn unwrap_casts<'n, 'a>(
    cx: &Classifier<'_>,
    mut expression: &'n Expression<'a>,
) -> (&'n Expression<'a>, Option<String>) {
    let mut cast: Option<String> = None;
    loop {
        let (inner, annotation) = match expression {
            Expression::ParenthesizedExpression(inner) => (&inner.expression, None),
            Expression::TSAsExpression(inner) => {
                (&inner.expression, Some(inner.type_annotation.span()))
            }
            Expression::TSSatisfiesExpression(inner) => {
                (&inner.expression, Some(inner.type_annotation.span()))
            }
            Expression::TSTypeAssertion(inner) => {
                (&inner.expression, Some(inner.type_annotation.span()))
            }
            _ => return (expression, cast),
        };
        if cast.is_none() {
            cast = annotation.map(|span: Span| cx.text(span).to_string());
        }
        expression = inner;
    }
}

/// Walks a binding pattern, mapping source keys to bound names.
///
/// Nested keys are dotted (`a.b`), array elements use their index and rest
/// elements the key `...`.
fn collect_bindings(
    cx: &Classifier<'_>,
    pattern: &BindingPattern<'_>,
    key: &str,
    out: &mut IndexMap<String, String>,
) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => {
            out.insert(key.to_string(), id.name.to_string());
        }
        BindingPatternKind::AssignmentPattern(assignment) => {
            collect_bindings(cx, &assignment.left, key, out);
        }
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                let name = cx.key_name(&property.key);
                collect_bindings(cx, &property.value, &join_key(key, &name), out);
            }
            if let Some(rest) = &object.rest {
                collect_bindings(cx, &rest.argument, &join_key(key, "..."), out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for (index, element) in array.elements.iter().enumerate() {
                if let Some(element) = element {
                    collect_bindings(cx, element, &join_key(key, &index.to_string()), out);
                }
            }
            if let Some(rest) = &array.rest {
                collect_bindings(cx, &rest.argument, &join_key(key, "..."), out);
            }
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Adds the visibility flag of a member; `#private` keys count as private.
pub(super) fn push_accessibility(
    flags: &mut Vec<Flag>,
    key: Option<&PropertyKey<'_>>,
    accessibility: Option<TSAccessibility>,
) {
    let flag = match (key, accessibility) {
        (Some(PropertyKey::PrivateIdentifier(_)), _) => Flag::Private,
        (_, Some(TSAccessibility::Private)) => Flag::Private,
        (_, Some(TSAccessibility::Protected)) => Flag::Protected,
        (_, Some(TSAccessibility::Public)) => Flag::Public,
        (_, None) => return,
    };
    if !flags.contains(&flag) {
        flags.push(flag);
    }
}

pub(super) fn with_flags(mut flags: Vec<Flag>, extra: &[(bool, Flag)]) -> Vec<Flag> {
    for &(set, flag) in extra {
        if set && !flags.contains(&flag) {
            flags.push(flag);
        }
    }
    flags
}

fn property_info(
    meta: MetaInfo,
    flags: Vec<Flag>,
    name: String,
    r#type: Option<String>,
    value: Option<Value>,
) -> Info {
    Info::Property(PropertyInfo {
        meta,
        flags,
        doclet: None,
        name,
        r#type,
        value,
        inherited: false,
    })
}
