//! Renders syntax nodes back to source text for either dialect.
//!
//! Declarations, namespaces, and imports are block-level and print on their
//! own lines; expressions print inline. Printing never fails: a malformed
//! node renders with its missing parts left empty.

use std::borrow::Cow;

use super::node::{Dialect, MethodDeclaration, NodeKind, SyntaxNode, TypeDeclaration, TypeKeyword};

const INDENT: &str = "    ";

/// Render a whole tree rooted at `root`.
pub fn render(root: &SyntaxNode, dialect: Dialect) -> String {
    Printer::new(dialect).run(Task::Block(root, 0))
}

/// Render a single node as it would appear in a file, without trailing
/// newline. Used for editor edits.
pub fn render_fragment(node: &SyntaxNode, dialect: Dialect) -> String {
    if is_block_level(node) {
        Printer::new(dialect).run(Task::Fragment(node))
    } else {
        Printer::new(dialect).run(Task::Inline(node))
    }
}

fn is_block_level(node: &SyntaxNode) -> bool {
    matches!(
        node.kind,
        NodeKind::CompilationUnit
            | NodeKind::Namespace { .. }
            | NodeKind::Class(_)
            | NodeKind::Interface(_)
            | NodeKind::Method(_)
            | NodeKind::Using(_)
    )
}

/// Unit of pending output. The printer keeps these on a heap stack instead
/// of recursing, so nesting depth is bounded only by memory.
enum Task<'a> {
    Text(Cow<'a, str>),
    Indent(usize),
    Block(&'a SyntaxNode, usize),
    Inline(&'a SyntaxNode),
    InlineBare(&'a SyntaxNode),
    /// Block-level node printed inside an expression, trailing space trimmed.
    Fragment(&'a SyntaxNode),
    /// Trim trailing whitespace, never past the given offset.
    TrimFrom(usize),
}

struct Printer {
    dialect: Dialect,
    out: String,
}

/// Tasks emitted by one step, in output order.
#[derive(Default)]
struct Emit<'a> {
    tasks: Vec<Task<'a>>,
}

impl<'a> Emit<'a> {
    fn text(&mut self, text: impl Into<Cow<'a, str>>) {
        self.tasks.push(Task::Text(text.into()));
    }

    fn line(&mut self, indent: usize, text: impl Into<Cow<'a, str>>) {
        self.tasks.push(Task::Indent(indent));
        self.text(text);
        self.text("\n");
    }

    fn inline_line(&mut self, indent: usize, node: &'a SyntaxNode, bare: bool) {
        self.tasks.push(Task::Indent(indent));
        self.tasks.push(if bare { Task::InlineBare(node) } else { Task::Inline(node) });
        self.text("\n");
    }

    fn blocks(&mut self, indent: usize, nodes: impl IntoIterator<Item = &'a SyntaxNode>) {
        self.tasks.extend(nodes.into_iter().map(|n| Task::Block(n, indent)));
    }

    /// `nodes` rendered inline, separated by `separator`.
    fn joined(&mut self, nodes: &'a [SyntaxNode], separator: &'a str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.text(separator);
            }
            self.tasks.push(Task::Inline(node));
        }
    }
}

impl Printer {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            out: String::new(),
        }
    }

    fn run(mut self, root: Task<'_>) -> String {
        let mut stack = vec![root];
        while let Some(task) = stack.pop() {
            let mut emit = Emit::default();
            match task {
                Task::Text(text) => self.out.push_str(&text),
                Task::Indent(level) => {
                    for _ in 0..level {
                        self.out.push_str(INDENT);
                    }
                }
                Task::TrimFrom(start) => {
                    let end = self.out.trim_end().len().max(start);
                    self.out.truncate(end);
                }
                Task::Fragment(node) => {
                    emit.tasks.push(Task::Block(node, 0));
                    emit.tasks.push(Task::TrimFrom(self.out.len()));
                }
                Task::Block(node, indent) => self.block(node, indent, &mut emit),
                Task::Inline(node) => self.inline(node, &mut emit),
                Task::InlineBare(node) => self.inline_bare(node, &mut emit),
            }
            stack.extend(emit.tasks.into_iter().rev());
        }
        self.out
    }

    fn block<'a>(&self, node: &'a SyntaxNode, indent: usize, emit: &mut Emit<'a>) {
        let marker = match self.dialect {
            Dialect::CSharp => "//",
            Dialect::VisualBasic => "'",
        };
        for comment in &node.leading_comments {
            emit.line(indent, format!("{marker} {comment}"));
        }
        match &node.kind {
            NodeKind::CompilationUnit => emit.blocks(indent, &node.children),
            NodeKind::Namespace { name } => match self.dialect {
                Dialect::CSharp => {
                    emit.line(indent, format!("namespace {name}"));
                    emit.line(indent, "{");
                    emit.blocks(indent + 1, &node.children);
                    emit.line(indent, "}");
                }
                Dialect::VisualBasic => {
                    emit.line(indent, format!("Namespace {name}"));
                    emit.blocks(indent + 1, &node.children);
                    emit.line(indent, "End Namespace");
                }
            },
            NodeKind::Class(decl) => self.type_declaration(node, decl, false, indent, emit),
            NodeKind::Interface(decl) => self.type_declaration(node, decl, true, indent, emit),
            NodeKind::Method(method) => self.method(node, method, indent, emit),
            _ => emit.inline_line(indent, node, true),
        }
    }

    fn attribute_lines<'a>(node: &'a SyntaxNode, indent: usize, emit: &mut Emit<'a>) {
        for attr in node.attributes() {
            emit.inline_line(indent, attr, false);
        }
    }

    fn members(node: &SyntaxNode) -> impl Iterator<Item = &SyntaxNode> {
        node.children
            .iter()
            .filter(|c| !matches!(c.kind, NodeKind::Attribute(_)))
    }

    fn type_declaration<'a>(
        &self,
        node: &'a SyntaxNode,
        decl: &TypeDeclaration,
        interface: bool,
        indent: usize,
        emit: &mut Emit<'a>,
    ) {
        Self::attribute_lines(node, indent, emit);
        let mods = join_modifiers(&decl.modifiers);
        match self.dialect {
            Dialect::CSharp => {
                let keyword = if interface {
                    "interface"
                } else {
                    match decl.keyword {
                        TypeKeyword::Class => "class",
                        TypeKeyword::Struct => "struct",
                        TypeKeyword::Record => "record",
                        TypeKeyword::Module => "static class",
                    }
                };
                let bases = if decl.base_list.is_empty() {
                    String::new()
                } else {
                    format!(" : {}", decl.base_list.join(", "))
                };
                emit.line(indent, format!("{mods}{keyword} {}{bases}", decl.name));
                emit.line(indent, "{");
                emit.blocks(indent + 1, Self::members(node));
                emit.line(indent, "}");
            }
            Dialect::VisualBasic => {
                let keyword = if interface {
                    "Interface"
                } else {
                    match decl.keyword {
                        TypeKeyword::Class | TypeKeyword::Record => "Class",
                        TypeKeyword::Struct => "Structure",
                        TypeKeyword::Module => "Module",
                    }
                };
                emit.line(indent, format!("{mods}{keyword} {}", decl.name));
                if let Some((first, rest)) = decl.base_list.split_first() {
                    if interface {
                        emit.line(indent + 1, format!("Inherits {}", decl.base_list.join(", ")));
                    } else {
                        emit.line(indent + 1, format!("Inherits {first}"));
                        if !rest.is_empty() {
                            emit.line(indent + 1, format!("Implements {}", rest.join(", ")));
                        }
                    }
                }
                emit.blocks(indent + 1, Self::members(node));
                emit.line(indent, format!("End {keyword}"));
            }
        }
    }

    fn method<'a>(
        &self,
        node: &'a SyntaxNode,
        method: &MethodDeclaration,
        indent: usize,
        emit: &mut Emit<'a>,
    ) {
        Self::attribute_lines(node, indent, emit);
        let mods = join_modifiers(&method.modifiers);
        let params = method.parameters.join(", ");
        match self.dialect {
            Dialect::CSharp => {
                let ret = if method.return_type.is_empty() {
                    String::new()
                } else {
                    format!("{} ", method.return_type)
                };
                let header = format!("{mods}{ret}{}({params})", method.name);
                if !method.has_body {
                    emit.line(indent, format!("{header};"));
                    return;
                }
                emit.line(indent, header);
                emit.line(indent, "{");
                emit.blocks(indent + 1, Self::members(node));
                emit.line(indent, "}");
            }
            Dialect::VisualBasic => {
                let is_sub = matches!(method.return_type.as_str(), "" | "void" | "Void");
                let keyword = if is_sub { "Sub" } else { "Function" };
                let ret = if is_sub {
                    String::new()
                } else {
                    format!(" As {}", method.return_type)
                };
                emit.line(indent, format!("{mods}{keyword} {}({params}){ret}", method.name));
                if !method.has_body {
                    return;
                }
                emit.blocks(indent + 1, Self::members(node));
                emit.line(indent, format!("End {keyword}"));
            }
        }
    }

    /// Inline rendering including leading comments (C# block comments only;
    /// VB has no inline comment syntax so inline comments are dropped).
    fn inline<'a>(&self, node: &'a SyntaxNode, emit: &mut Emit<'a>) {
        if self.dialect == Dialect::CSharp {
            for comment in &node.leading_comments {
                emit.text(format!("/* {comment} */ "));
            }
        }
        emit.tasks.push(Task::InlineBare(node));
    }

    fn inline_bare<'a>(&self, node: &'a SyntaxNode, emit: &mut Emit<'a>) {
        let target = node.children.first().map(std::slice::from_ref).unwrap_or_default();
        let rest = node.children.get(1..).unwrap_or_default();
        match &node.kind {
            NodeKind::Identifier(ident) => emit.text(ident.name.as_str()),
            NodeKind::MemberAccess(access) => {
                emit.joined(target, "");
                emit.text(format!(".{}", access.name));
            }
            NodeKind::Invocation(_) => {
                emit.joined(target, "");
                emit.text("(");
                emit.joined(rest, ", ");
                emit.text(")");
            }
            NodeKind::ElementAccess(_) => {
                let (open, close) = match self.dialect {
                    Dialect::CSharp => ("[", "]"),
                    Dialect::VisualBasic => ("(", ")"),
                };
                emit.joined(target, "");
                emit.text(open);
                emit.joined(rest, ", ");
                emit.text(close);
            }
            NodeKind::ObjectCreation(creation) => {
                let new_kw = match self.dialect {
                    Dialect::CSharp => "new",
                    Dialect::VisualBasic => "New",
                };
                emit.text(format!("{new_kw} {}(", creation.type_name));
                emit.joined(&node.children, ", ");
                emit.text(")");
            }
            NodeKind::Attribute(attr) => {
                let args = if attr.arguments.is_empty() {
                    String::new()
                } else {
                    format!("({})", attr.arguments.join(", "))
                };
                match self.dialect {
                    Dialect::CSharp => emit.text(format!("[{}{args}]", attr.name)),
                    Dialect::VisualBasic => emit.text(format!("<{}{args}>", attr.name)),
                }
            }
            NodeKind::Using(using) => {
                let alias = using
                    .alias
                    .as_ref()
                    .map(|a| format!("{a} = "))
                    .unwrap_or_default();
                match self.dialect {
                    Dialect::CSharp => {
                        let stat = if using.is_static { "static " } else { "" };
                        emit.text(format!("using {stat}{alias}{};", using.name));
                    }
                    Dialect::VisualBasic => emit.text(format!("Imports {alias}{}", using.name)),
                }
            }
            NodeKind::Other(other) => {
                emit.text(other.prefix.as_str());
                emit.joined(&node.children, other.separator.as_str());
                emit.text(other.suffix.as_str());
            }
            NodeKind::CompilationUnit
            | NodeKind::Namespace { .. }
            | NodeKind::Class(_)
            | NodeKind::Interface(_)
            | NodeKind::Method(_) => emit.tasks.push(Task::Fragment(node)),
        }
    }
}

fn join_modifiers(modifiers: &[String]) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        format!("{} ", modifiers.join(" "))
    }
}
