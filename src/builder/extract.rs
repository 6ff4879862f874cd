//! Declaration extraction from C/C++ headers.
//!
//! [`HeaderScanner`] is a lightweight scanner, not a compiler front end. It
//! recognizes the subset of C++ that interop headers are written in:
//! namespaces, classes and structs with bases, member and free function
//! declarations with default arguments, and object-like `#define`s.
//! Everything else (templates, typedefs, enums, fields, function bodies) is
//! skipped without error.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::decl::{
    Class, ClassKind, DeclarationGraph, Function, Macro, Namespace, Param, TranslationUnit,
};
use crate::core::module::ModuleDescriptor;
use crate::core::options::GeneratorOptions;
use crate::passes::GenerationError;

/// Produces a declaration graph from a configured module.
pub trait Extractor {
    fn extract(
        &self,
        module: &ModuleDescriptor,
        options: &GeneratorOptions,
    ) -> Result<DeclarationGraph, GenerationError>;
}

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*[\s\S]*?\*/").expect("block comment regex"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("line comment regex"));

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#(?:[^\n]*\\\r?\n)*[^\n]*").expect("directive regex")
});

// Function-like macros never match: the name must be followed by blanks or
// end of line.
static DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#[ \t]*define[ \t]+(\w+)(?:[ \t]+([^\n]*))?$").expect("define regex")
});

/// Function specifiers that are not part of the return type.
const SPECIFIERS: &[&str] = &[
    "inline",
    "explicit",
    "extern",
    "constexpr",
    "__forceinline",
    "__stdcall",
    "__cdecl",
    "__fastcall",
    "WINAPI",
    "APIENTRY",
    "CALLBACK",
    "STDMETHODCALLTYPE",
];

/// Words that can end a parameter type, so a trailing one is not a name.
const TYPE_WORDS: &[&str] = &[
    "void", "bool", "char", "wchar_t", "short", "int", "long", "float", "double", "signed",
    "unsigned", "const", "volatile",
];

/// Scanner for interop headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderScanner;

impl HeaderScanner {
    pub fn new() -> Self {
        HeaderScanner
    }

    /// Scan one header file.
    pub fn scan_file(&self, path: &Path) -> Result<TranslationUnit, GenerationError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            GenerationError::Extraction {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(self.scan_source(&content, path))
    }

    /// Scan header text. Never fails; unrecognized constructs are skipped.
    pub fn scan_source(&self, content: &str, path: &Path) -> TranslationUnit {
        let content = BLOCK_COMMENT.replace_all(content, " ");
        let content = LINE_COMMENT.replace_all(&content, " ");

        let mut unit = TranslationUnit::new(path);
        unit.macros = parse_macros(&content);

        let code = DIRECTIVE.replace_all(&content, " ");
        let mut parser = Parser::new(tokenize(&code));
        let members = parser.parse_unit();

        unit.namespaces = members.namespaces;
        unit.classes = members.classes;
        unit.functions = members.functions;
        unit
    }
}

impl Extractor for HeaderScanner {
    fn extract(
        &self,
        module: &ModuleDescriptor,
        options: &GeneratorOptions,
    ) -> Result<DeclarationGraph, GenerationError> {
        let mut graph = DeclarationGraph::new();

        for header in module.headers() {
            let unit = self.scan_file(header)?;
            if options.debug {
                tracing::debug!(
                    "scanned {}: {} namespaces, {} classes, {} functions, {} macros",
                    header.display(),
                    unit.namespaces.len(),
                    unit.classes.len(),
                    unit.functions.len(),
                    unit.macros.len()
                );
            }
            graph.units.push(unit);
        }

        Ok(graph)
    }
}

fn parse_macros(content: &str) -> Vec<Macro> {
    DEFINE
        .captures_iter(content)
        .filter_map(|cap| {
            let name = cap.get(1)?.as_str();
            let value = cap.get(2)?.as_str().trim();
            // Include guards and multi-line bodies carry no usable value
            if value.is_empty() || value.ends_with('\\') {
                return None;
            }
            Some(Macro::new(name, value))
        })
        .collect()
}

fn is_word(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn tokenize(source: &str) -> Vec<String> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        if c.is_alphanumeric() || c == '_' {
            let numeric = c.is_ascii_digit();
            while i < chars.len()
                && (chars[i].is_alphanumeric() || chars[i] == '_' || (numeric && chars[i] == '.'))
            {
                i += 1;
            }
        } else if c == '"' || c == '\'' {
            i += 1;
            while i < chars.len() && chars[i] != c {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(chars.len());
        } else if c == ':' && chars.get(i + 1) == Some(&':') {
            i += 2;
        } else {
            i += 1;
        }

        tokens.push(chars[start..i].iter().collect());
    }

    tokens
}

/// Join tokens back into a spelling, with a space only between words.
fn render<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    for token in tokens {
        let token = token.as_ref();
        if is_word(token) && !out.is_empty() {
            let last = out.chars().last().unwrap_or(' ');
            if last.is_alphanumeric() || matches!(last, '_' | '*' | '&' | ',') {
                out.push(' ');
            }
        }
        out.push_str(token);
    }
    out
}

/// Split on top-level commas.
fn split_commas(tokens: &[String]) -> Vec<&[String]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "(" | "<" | "[" | "{" => depth += 1,
            ")" | ">" | "]" | "}" => depth = depth.saturating_sub(1),
            "," if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        parts.push(&tokens[start..]);
    }
    parts
}

/// Index of the token closing the group opened at `open`.
fn matching(tokens: &[String], open: usize) -> Option<usize> {
    let (left, right) = match tokens.get(open)?.as_str() {
        "(" => ("(", ")"),
        "[" => ("[", "]"),
        "{" => ("{", "}"),
        _ => return None,
    };
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token == left {
            depth += 1;
        } else if token == right {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

fn parse_param(tokens: &[String]) -> Option<Param> {
    if tokens.is_empty() || render(tokens) == "..." {
        return None;
    }

    let (decl, default) = match tokens.iter().position(|t| t == "=") {
        Some(eq) => (&tokens[..eq], Some(render(&tokens[eq + 1..]))),
        None => (tokens, None),
    };

    // `float m[16]` decays to a pointer
    let (decl, array) = match decl.iter().position(|t| t == "[") {
        Some(idx) => (&decl[..idx], true),
        None => (decl, false),
    };

    let (ty, name) = match decl.split_last() {
        Some((last, rest))
            if !rest.is_empty()
                && is_word(last)
                && !TYPE_WORDS.contains(&last.as_str())
                && rest.last().is_some_and(|t| t != "::") =>
        {
            (render(rest), last.clone())
        }
        _ => (render(decl), String::new()),
    };

    let mut param = Param::new(name, if array { format!("{}*", ty) } else { ty });
    param.default = default;
    Some(param)
}

fn merge_namespace(into: &mut Vec<Namespace>, ns: Namespace) {
    match into.iter_mut().find(|existing| existing.name == ns.name) {
        Some(existing) => {
            existing.classes.extend(ns.classes);
            existing.functions.extend(ns.functions);
            for child in ns.namespaces {
                merge_namespace(&mut existing.namespaces, child);
            }
        }
        None => into.push(ns),
    }
}

#[derive(Debug, Default)]
struct Members {
    namespaces: Vec<Namespace>,
    classes: Vec<Class>,
    functions: Vec<Function>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Hidden,
}

/// Where declarations are being collected.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    /// Enclosing class name, for recognizing constructors
    class: Option<&'a str>,
    access: Access,
}

impl Scope<'_> {
    fn visible(&self) -> bool {
        self.access == Access::Public
    }
}

struct Parser {
    tokens: Vec<String>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<String>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&str> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<&str> {
        self.tokens.get(self.pos + offset).map(String::as_str)
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_unit(&mut self) -> Members {
        let mut members = Members::default();
        let scope = Scope {
            class: None,
            access: Access::Public,
        };

        while self.pos < self.tokens.len() {
            self.parse_scope(&mut members, scope);
            // Unbalanced `}` at file level
            self.pos += 1;
        }
        members
    }

    /// Parse declarations until the `}` closing this scope, which is left
    /// unconsumed.
    fn parse_scope(&mut self, out: &mut Members, mut scope: Scope<'_>) {
        while let Some(token) = self.peek().map(str::to_string) {
            match token.as_str() {
                "}" => return,
                ";" => self.pos += 1,
                "namespace" => self.parse_namespace(out, scope),
                "inline" if self.peek_at(1) == Some("namespace") => self.pos += 1,
                "extern" if self.peek_at(1).is_some_and(|t| t.starts_with('"')) => {
                    self.pos += 2;
                    if self.eat("{") {
                        self.parse_scope(out, scope);
                        self.eat("}");
                    }
                }
                "public" | "private" | "protected" if self.peek_at(1) == Some(":") => {
                    if scope.class.is_some() {
                        scope.access = if token == "public" {
                            Access::Public
                        } else {
                            Access::Hidden
                        };
                    }
                    self.pos += 2;
                }
                "class" | "struct" => self.parse_class(out, scope),
                _ if self.at_interface_macro() => self.parse_interface(out, scope),
                "template" => {
                    self.pos += 1;
                    self.skip_angles();
                    self.skip_statement();
                }
                "typedef" | "using" | "friend" | "enum" | "union" | "static_assert" => {
                    self.skip_statement()
                }
                _ => self.parse_declaration(out, scope),
            }
        }
    }

    fn parse_namespace(&mut self, out: &mut Members, scope: Scope<'_>) {
        self.pos += 1;
        let mut name = String::new();
        while let Some(token) = self.peek() {
            if matches!(token, "{" | ";" | "=") {
                break;
            }
            name.push_str(token);
            self.pos += 1;
        }

        if !self.eat("{") {
            // namespace alias
            self.skip_statement();
            return;
        }

        let mut inner = Members::default();
        self.parse_scope(&mut inner, scope);
        self.eat("}");

        // Anonymous namespaces have internal linkage
        if name.is_empty() {
            return;
        }

        // `namespace a::b { }` nests
        let mut segments = name.rsplit("::");
        let innermost = Namespace {
            name: segments.next().unwrap_or_default().to_string(),
            ignored: false,
            namespaces: inner.namespaces,
            classes: inner.classes,
            functions: inner.functions,
        };
        let ns = segments.fold(innermost, |child, parent| {
            Namespace::new(parent).with_namespace(child)
        });
        merge_namespace(&mut out.namespaces, ns);
    }

    fn parse_class(&mut self, out: &mut Members, scope: Scope<'_>) {
        let kind = if self.peek() == Some("class") {
            ClassKind::Class
        } else {
            ClassKind::Struct
        };
        self.pos += 1;
        let resume = self.pos;
        self.parse_class_rest(out, scope, kind, resume);
    }

    /// `MIDL_INTERFACE("uuid") Name : Base {`, the way the SDK headers
    /// declare COM interfaces. The macro expands to `struct`.
    fn at_interface_macro(&self) -> bool {
        self.peek().is_some_and(is_word)
            && self.peek_at(1) == Some("(")
            && self.peek_at(2).is_some_and(|t| t.starts_with('"'))
            && self.peek_at(3) == Some(")")
            && self.peek_at(4).is_some_and(is_word)
            && matches!(self.peek_at(5), Some(":") | Some("{"))
    }

    fn parse_interface(&mut self, out: &mut Members, scope: Scope<'_>) {
        let resume = self.pos;
        self.pos += 4;
        self.parse_class_rest(out, scope, ClassKind::Struct, resume);
    }

    /// Parse a class after its introducer. `resume` is where to reparse
    /// from when the introducer turns out to start a plain declaration.
    fn parse_class_rest(
        &mut self,
        out: &mut Members,
        scope: Scope<'_>,
        kind: ClassKind,
        resume: usize,
    ) {
        let mut header: Vec<String> = Vec::new();
        loop {
            match self.peek() {
                None => return,
                Some("{") | Some(";") | Some(":") => break,
                Some("(") => {
                    // __declspec(...), alignas(...)
                    header.pop();
                    self.skip_group();
                }
                Some(token) => {
                    header.push(token.to_string());
                    self.pos += 1;
                }
            }
        }

        // An elaborated type in a declaration, e.g. `struct tm* now();`
        if header.iter().any(|t| !is_word(t)) {
            self.pos = resume;
            self.parse_declaration(out, scope);
            return;
        }

        if header.last().is_some_and(|t| t == "final") {
            header.pop();
        }
        let name = header.pop().unwrap_or_default();

        let mut bases = Vec::new();
        if self.eat(":") {
            let mut list = Vec::new();
            while let Some(token) = self.peek() {
                if token == "{" || token == ";" {
                    break;
                }
                list.push(token.to_string());
                self.pos += 1;
            }
            for base in split_commas(&list) {
                let base: Vec<&String> = base
                    .iter()
                    .filter(|t| {
                        !matches!(t.as_str(), "public" | "private" | "protected" | "virtual")
                    })
                    .collect();
                if !base.is_empty() {
                    bases.push(render(&base));
                }
            }
        }

        // Forward declaration
        if !self.eat("{") {
            self.skip_statement();
            return;
        }

        let mut inner = Members::default();
        let access = match kind {
            ClassKind::Class => Access::Hidden,
            ClassKind::Struct => Access::Public,
        };
        self.parse_scope(
            &mut inner,
            Scope {
                class: Some(&name),
                access,
            },
        );
        self.eat("}");

        // Trailing declarators, e.g. `} instance;`
        if !self.eat(";") {
            self.skip_statement();
        }

        if name.is_empty() || !scope.visible() {
            return;
        }

        out.classes.push(Class {
            name,
            kind,
            ignored: false,
            bases,
            methods: inner.functions,
            nested: inner.classes,
        });
    }

    /// Collect one declaration and keep it if it declares a function.
    fn parse_declaration(&mut self, out: &mut Members, scope: Scope<'_>) {
        let mut statement = Vec::new();
        let mut depth = 0usize;

        while let Some(token) = self.peek() {
            match token {
                "(" | "[" => depth += 1,
                ")" | "]" => depth = depth.saturating_sub(1),
                ";" if depth == 0 => {
                    self.pos += 1;
                    break;
                }
                // Function body or brace initializer
                "{" if depth == 0 => {
                    self.skip_group();
                    break;
                }
                "}" if depth == 0 => break,
                _ => {}
            }
            statement.push(token.to_string());
            self.pos += 1;
        }

        if !scope.visible() {
            return;
        }
        if let Some(function) = function_from_tokens(&strip_attributes(statement), scope.class) {
            out.functions.push(function);
        }
    }

    /// Skip a balanced group starting at the current token.
    fn skip_group(&mut self) {
        match matching(&self.tokens, self.pos) {
            Some(close) => self.pos = close + 1,
            None => self.pos = self.tokens.len(),
        }
    }

    fn skip_angles(&mut self) {
        if !self.eat("<") {
            return;
        }
        let mut depth = 1usize;
        while let Some(token) = self.peek() {
            match token {
                "<" => depth += 1,
                ">" => depth -= 1,
                _ => {}
            }
            self.pos += 1;
            if depth == 0 {
                return;
            }
        }
    }

    /// Skip to the end of the current statement: a top-level `;`, or the
    /// end of a top-level braced block plus an optional `;`.
    fn skip_statement(&mut self) {
        while let Some(token) = self.peek() {
            match token {
                ";" => {
                    self.pos += 1;
                    return;
                }
                "}" => return,
                "{" | "(" | "[" => {
                    let brace = token == "{";
                    self.skip_group();
                    if brace {
                        self.eat(";");
                        return;
                    }
                }
                _ => self.pos += 1,
            }
        }
    }
}

/// SAL annotations such as `_In_`, `_Out_opt_` or `_Out_writes_(n)`.
fn is_annotation(token: &str) -> bool {
    token.len() > 2
        && token.starts_with('_')
        && token.ends_with('_')
        && !token.starts_with("__")
        && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Remove `__declspec(...)` and `__attribute__((...))` groups and SAL
/// annotations.
fn strip_attributes(tokens: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let attribute = matches!(token, "__declspec" | "__attribute__" | "alignas");
        if attribute && tokens.get(i + 1).is_some_and(|t| t == "(") {
            i = matching(&tokens, i + 1).map_or(tokens.len(), |close| close + 1);
            continue;
        }
        if is_annotation(token) {
            i += 1;
            if tokens.get(i).is_some_and(|t| t == "(") {
                i = matching(&tokens, i).map_or(tokens.len(), |close| close + 1);
            }
            continue;
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

fn function_from_tokens(tokens: &[String], class: Option<&str>) -> Option<Function> {
    let (name, prefix_end, open) = match tokens.iter().position(|t| t == "operator") {
        Some(op) => {
            let open = if tokens.get(op + 1)? == "(" && tokens.get(op + 2)? == ")" {
                op + 3
            } else {
                op + tokens[op..].iter().position(|t| t == "(")?
            };
            let symbol = &tokens[op + 1..open];
            let name = if symbol.first().is_some_and(|t| is_word(t)) {
                format!("operator {}", render(symbol))
            } else {
                format!("operator{}", render(symbol))
            };
            (name, op, open)
        }
        None => {
            let open = tokens.iter().position(|t| t == "(")?;
            let name = tokens.get(open.checked_sub(1)?)?;
            if !is_word(name) {
                return None;
            }
            match open.checked_sub(2).map(|i| tokens[i].as_str()) {
                // Out-of-line member definition
                Some("::") => return None,
                Some("~") => (format!("~{}", name), open - 2, open),
                _ => (name.clone(), open - 1, open),
            }
        }
    };

    if tokens.get(open)? != "(" {
        return None;
    }
    let close = matching(tokens, open)?;

    let mut function = Function::new(name, "");
    let mut return_type = Vec::new();
    for token in &tokens[..prefix_end] {
        match token.as_str() {
            "virtual" => function.is_virtual = true,
            "static" => function.is_static = true,
            t if SPECIFIERS.contains(&t) => {}
            _ => return_type.push(token.clone()),
        }
    }
    function.return_type = render(&return_type);

    let is_special = function.name.starts_with('~')
        || function.is_operator()
        || class.is_some_and(|c| c == function.name);
    // Macro invocations look like calls with no return type
    if function.return_type.is_empty() && !is_special {
        return None;
    }

    let params = &tokens[open + 1..close];
    if !(params.len() == 1 && params[0] == "void") {
        function.params = split_commas(params).into_iter().filter_map(parse_param).collect();
    }

    let trailing = &tokens[close + 1..];
    for (i, token) in trailing.iter().enumerate() {
        match token.as_str() {
            "const" => function.is_const = true,
            "override" | "final" => {
                function.is_override = true;
                function.is_virtual = true;
            }
            "=" if trailing.get(i + 1).is_some_and(|t| t == "delete") => return None,
            _ => {}
        }
    }

    Some(function)
}
