//! Node classifier: turns OXC syntax into [`Info`] records.
//!
//! Dispatch goes through [`RECOGNIZERS`], a fixed ordered table; the first
//! recognizer that accepts a node wins. Sibling sequences (program bodies,
//! class and interface bodies, object literals, parameter lists) are walked
//! by [`Classifier::sequence`], which also recovers the doclet blocks found
//! in the gaps between siblings and attaches the nearest one to the
//! declaration that follows it.

mod bindings;
mod declarations;

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingRestElement, Class, ClassElement, Declaration, ExportDefaultDeclaration,
    ExportDefaultDeclarationKind, Expression, FormalParameter, FormalParameters, Function,
    ImportDeclaration, ObjectPropertyKind, PropertyKey, Statement, TSExportAssignment,
    TSInterfaceDeclaration, TSSignature, TSTypeAliasDeclaration, TSTypeAnnotation,
    TSTypeParameter, TSTypeParameterDeclaration, VariableDeclarator,
};
use oxc_span::{GetSpan, Span};
use tracing::{debug, trace, warn};

use crate::doclet::find_doclets;
use crate::info::{Flag, Info, InfoKind, MetaInfo, SourceInfo, Value, VariableInfo};
use crate::parser::{ParseOptions, parse};

/// A syntax node the classifier can be asked about.
#[derive(Debug, Clone, Copy)]
pub enum Node<'n, 'a> {
    /// Top-level or block statement; expanded before classification.
    Statement(&'n Statement<'a>),
    Class(&'n Class<'a>),
    ClassElement(&'n ClassElement<'a>),
    Declarator(&'n VariableDeclarator<'a>),
    ExportAssignment(&'n TSExportAssignment<'a>),
    ExportDefault(&'n ExportDefaultDeclaration<'a>),
    Expression(&'n Expression<'a>),
    Function(&'n Function<'a>),
    Import(&'n ImportDeclaration<'a>),
    Interface(&'n TSInterfaceDeclaration<'a>),
    ObjectProperty(&'n ObjectPropertyKind<'a>),
    Parameter(&'n FormalParameter<'a>),
    RestParameter(&'n BindingRestElement<'a>),
    Signature(&'n TSSignature<'a>),
    TypeAlias(&'n TSTypeAliasDeclaration<'a>),
    TypeParameter(&'n TSTypeParameter<'a>),
    /// Any other syntax; occupies its span and classifies to nothing.
    Other(Span),
}

impl Node<'_, '_> {
    pub fn span(&self) -> Span {
        match self {
            Node::Statement(node) => node.span(),
            Node::Class(node) => node.span,
            Node::ClassElement(node) => node.span(),
            Node::Declarator(node) => node.span,
            Node::ExportAssignment(node) => node.span,
            Node::ExportDefault(node) => node.span,
            Node::Expression(node) => node.span(),
            Node::Function(node) => node.span,
            Node::Import(node) => node.span,
            Node::Interface(node) => node.span,
            Node::ObjectProperty(node) => node.span(),
            Node::Parameter(node) => node.span,
            Node::RestParameter(node) => node.span,
            Node::Signature(node) => node.span(),
            Node::TypeAlias(node) => node.span,
            Node::TypeParameter(node) => node.span,
            Node::Other(span) => *span,
        }
    }
}

/// What the enclosing syntax contributes to a classified node.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Modifiers from a transparent wrapper (`export`, `export default`,
    /// `declare`).
    pub flags: Vec<Flag>,
    /// Name of the binding an anonymous expression is assigned to.
    pub name: Option<String>,
    /// Span of the wrapper statement; when set, the record's `meta` covers it.
    pub outer: Option<Span>,
}

impl Context {
    fn wrapped(flags: Vec<Flag>, outer: Span) -> Self {
        Self {
            flags,
            name: None,
            outer: Some(outer),
        }
    }

    fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

type Recognizer = fn(&Classifier<'_>, Node<'_, '_>, &Context) -> Option<Info>;

/// Recognizers in priority order.
const RECOGNIZERS: &[(InfoKind, Recognizer)] = &[
    (InfoKind::Variable, bindings::variable),
    (InfoKind::Property, bindings::property),
    (InfoKind::Object, bindings::object),
    (InfoKind::Interface, declarations::interface),
    (InfoKind::Import, declarations::import),
    (InfoKind::Function, declarations::function),
    (InfoKind::Export, declarations::export),
    (InfoKind::Deconstruct, bindings::deconstruct),
    (InfoKind::Class, declarations::class),
];

const SOURCE_KINDS: &[InfoKind] = &[
    InfoKind::Class,
    InfoKind::Deconstruct,
    InfoKind::Doclet,
    InfoKind::Export,
    InfoKind::Function,
    InfoKind::Import,
    InfoKind::Interface,
    InfoKind::Object,
    InfoKind::Property,
    InfoKind::Variable,
];
const CLASS_MEMBERS: &[InfoKind] = &[InfoKind::Doclet, InfoKind::Function, InfoKind::Property];
const INTERFACE_MEMBERS: &[InfoKind] = &[InfoKind::Doclet, InfoKind::Interface, InfoKind::Property];
const OBJECT_MEMBERS: &[InfoKind] = &[InfoKind::Doclet, InfoKind::Property];
const PARAMETERS: &[InfoKind] = &[InfoKind::Variable, InfoKind::Deconstruct];
const TYPE_PARAMETERS: &[InfoKind] = &[InfoKind::Variable];

/// Classifies the text of one file.
///
/// Parser diagnostics are logged and whatever tree the parser recovered is
/// classified, so this never fails. With `include_nodes` every record's
/// `meta.text` holds its verbatim source.
pub fn get_source_info(path: impl AsRef<Path>, text: &str, include_nodes: bool) -> SourceInfo {
    let path = path.as_ref();
    let allocator = Allocator::default();

    let parsed = match parse(&allocator, path, text, ParseOptions::from_path(path)) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!(path = %path.display(), %error, "could not parse source");
            return SourceInfo {
                path: path.to_path_buf(),
                code: Vec::new(),
            };
        }
    };

    for diagnostic in &parsed.diagnostics {
        warn!(path = %path.display(), "{}", diagnostic.message);
    }

    let classifier = Classifier::new(text, include_nodes);
    let code = classifier.sequence(
        parsed.program.body.iter().map(Node::Statement),
        Span::new(0, text.len() as u32),
        SOURCE_KINDS,
    );
    debug!(path = %path.display(), records = code.len(), "classified source");

    SourceInfo {
        path: path.to_path_buf(),
        code,
    }
}

/// Classifies a single node of `source` without doclet recovery.
///
/// Statements are expanded first, so a variable statement or export wrapper
/// yields the record of its first declaration.
pub fn classify_node(source: &str, node: Node<'_, '_>, include_nodes: bool) -> Option<Info> {
    let classifier = Classifier::new(source, include_nodes);
    expand(node)
        .into_iter()
        .find_map(|(inner, ctx)| classifier.classify(inner, &ctx))
}

/// Classification state shared by the recognizers of one source.
pub(crate) struct Classifier<'s> {
    source: &'s str,
    include_nodes: bool,
}

impl<'s> Classifier<'s> {
    pub(crate) fn new(source: &'s str, include_nodes: bool) -> Self {
        Self {
            source,
            include_nodes,
        }
    }

    /// Runs the recognizer table; the first match wins.
    pub(crate) fn classify(&self, node: Node<'_, '_>, ctx: &Context) -> Option<Info> {
        RECOGNIZERS.iter().find_map(|(kind, recognize)| {
            let info = recognize(self, node, ctx)?;
            trace!(kind = ?kind, begin = node.span().start, "classified node");
            Some(info)
        })
    }

    /// Classifies a sibling sequence inside `range`.
    ///
    /// Records whose kind is not in `allowed` are dropped. Doclets recovered
    /// between siblings stay free-standing unless they can be attached;
    /// they are kept only when `allowed` includes [`InfoKind::Doclet`].
    pub(crate) fn sequence<'n, 'a: 'n, I>(
        &self,
        nodes: I,
        range: Span,
        allowed: &[InfoKind],
    ) -> Vec<Info>
    where
        I: IntoIterator<Item = Node<'n, 'a>>,
    {
        let keep_doclets = allowed.contains(&InfoKind::Doclet);
        let mut result = Vec::new();
        let mut cursor = range.start;

        for node in nodes {
            for (inner, ctx) in expand(node) {
                let span = ctx.outer.unwrap_or_else(|| inner.span());
                let mut doclets = find_doclets(self.source, cursor, span.start);

                let classified = self
                    .classify(inner, &ctx)
                    .filter(|info| allowed.contains(&info.kind()));

                if let Some(mut info) = classified {
                    let attachable = !matches!(info.kind(), InfoKind::Import | InfoKind::Export)
                        && doclets.last().is_some_and(|doclet| !doclet.is_apioption());
                    if attachable {
                        if let Some(slot) = info.doclet_slot() {
                            *slot = doclets.pop();
                        }
                    }
                    if let Some(meta) = info.meta_mut() {
                        meta.trivia = meta.begin.saturating_sub(cursor);
                    }
                    if keep_doclets {
                        result.extend(doclets.into_iter().map(Info::Doclet));
                    }
                    result.push(info);
                } else if keep_doclets {
                    result.extend(doclets.into_iter().map(Info::Doclet));
                }

                cursor = cursor.max(span.end);
            }
        }

        if keep_doclets {
            let trailing = find_doclets(self.source, cursor, range.end);
            result.extend(trailing.into_iter().map(Info::Doclet));
        }

        result
    }

    pub(crate) fn text(&self, span: Span) -> &'s str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    /// Position of a record, preferring the wrapper span from `ctx`.
    pub(crate) fn meta(&self, span: Span, ctx: &Context, syntax: &str) -> MetaInfo {
        let span = ctx.outer.unwrap_or(span);
        MetaInfo {
            begin: span.start,
            end: span.end,
            trivia: 0,
            syntax: syntax.to_string(),
            text: self.include_nodes.then(|| self.text(span).to_string()),
        }
    }

    /// Type text of an annotation, without the leading colon.
    pub(crate) fn type_text(&self, annotation: Option<&TSTypeAnnotation<'_>>) -> Option<String> {
        annotation.map(|annotation| self.text(annotation.type_annotation.span()).to_string())
    }

    /// Initializer of a binding named `name`.
    ///
    /// Recognized shapes become nested records; anything else is kept as
    /// raw text.
    pub(crate) fn value(&self, expression: &Expression<'_>, name: &str) -> Value {
        match self.classify(Node::Expression(expression), &Context::named(name)) {
            Some(info) => Value::Info(Box::new(info)),
            None => Value::Literal(self.text(expression.span()).to_string()),
        }
    }

    /// Display name of a member key; computed keys keep their source text.
    pub(crate) fn key_name(&self, key: &PropertyKey<'_>) -> String {
        match key {
            PropertyKey::PrivateIdentifier(ident) => format!("#{}", ident.name),
            _ => key
                .static_name()
                .map(|name| name.to_string())
                .unwrap_or_else(|| self.text(key.span()).to_string()),
        }
    }

    pub(crate) fn generics(
        &self,
        declaration: Option<&TSTypeParameterDeclaration<'_>>,
    ) -> Option<Vec<VariableInfo>> {
        let declaration = declaration?;
        let generics: Vec<VariableInfo> = self
            .sequence(
                declaration.params.iter().map(Node::TypeParameter),
                declaration.span,
                TYPE_PARAMETERS,
            )
            .into_iter()
            .filter_map(|info| match info {
                Info::Variable(variable) => Some(variable),
                _ => None,
            })
            .collect();
        (!generics.is_empty()).then_some(generics)
    }

    pub(crate) fn parameters(&self, params: &FormalParameters<'_>) -> Option<Vec<Info>> {
        let nodes = params
            .items
            .iter()
            .map(Node::Parameter)
            .chain(params.rest.as_deref().map(Node::RestParameter));
        let parameters = self.sequence(nodes, params.span, PARAMETERS);
        (!parameters.is_empty()).then_some(parameters)
    }
}

/// Span between the delimiters of a braced body.
pub(crate) fn inner_range(span: Span) -> Span {
    Span::new(span.start + 1, span.end.saturating_sub(1).max(span.start + 1))
}

/// Splices transparent wrappers into the nodes they wrap.
fn expand<'n, 'a>(node: Node<'n, 'a>) -> Vec<(Node<'n, 'a>, Context)> {
    let Node::Statement(statement) = node else {
        return vec![(node, Context::default())];
    };

    match statement {
        Statement::ImportDeclaration(import) => vec![(Node::Import(import), Context::default())],
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(declaration) => expand_declaration(declaration, vec![Flag::Export], export.span),
            None => vec![(Node::Other(export.span), Context::default())],
        },
        Statement::ExportDefaultDeclaration(export) => {
            let ctx = Context::wrapped(vec![Flag::Export, Flag::Default], export.span);
            let inner = match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                    Node::Function(function)
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => Node::Class(class),
                ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => {
                    Node::Interface(interface)
                }
                _ => return vec![(Node::ExportDefault(export), Context::default())],
            };
            vec![(inner, ctx)]
        }
        Statement::TSExportAssignment(assignment) => {
            vec![(Node::ExportAssignment(assignment), Context::default())]
        }
        Statement::ExpressionStatement(expression) => vec![(
            Node::Expression(&expression.expression),
            Context::wrapped(Vec::new(), expression.span),
        )],
        _ => match statement.as_declaration() {
            Some(declaration) => expand_declaration(declaration, Vec::new(), statement.span()),
            None => vec![(Node::Other(statement.span()), Context::default())],
        },
    }
}

fn expand_declaration<'n, 'a>(
    declaration: &'n Declaration<'a>,
    mut flags: Vec<Flag>,
    outer: Span,
) -> Vec<(Node<'n, 'a>, Context)> {
    let node = match declaration {
        Declaration::VariableDeclaration(variable) => {
            if variable.declare {
                flags.push(Flag::Declare);
            }
            // A lone declarator stands for the whole statement.
            let outer = (variable.declarations.len() == 1).then_some(outer);
            return variable
                .declarations
                .iter()
                .map(|declarator| {
                    let ctx = Context {
                        flags: flags.clone(),
                        name: None,
                        outer,
                    };
                    (Node::Declarator(declarator), ctx)
                })
                .collect();
        }
        Declaration::FunctionDeclaration(function) => Node::Function(function),
        Declaration::ClassDeclaration(class) => Node::Class(class),
        Declaration::TSInterfaceDeclaration(interface) => Node::Interface(interface),
        Declaration::TSTypeAliasDeclaration(alias) => Node::TypeAlias(alias),
        _ => return vec![(Node::Other(outer), Context::default())],
    };
    vec![(node, Context::wrapped(flags, outer))]
}
