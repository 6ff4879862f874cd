//! Declaration graph types.
//!
//! A [`DeclarationGraph`] is what an extractor hands back after reading the
//! native headers: a forest of translation units holding namespaces, classes,
//! free functions and macros. The filter, the passes and the renamer mutate
//! only `ignored` flags and names; nodes are moved between scopes only by the
//! function-to-static-method pass.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The extracted representation of a set of native headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationGraph {
    /// Translation units, one per header.
    pub units: Vec<TranslationUnit>,
}

impl DeclarationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation unit.
    pub fn with_unit(mut self, unit: TranslationUnit) -> Self {
        self.units.push(unit);
        self
    }

    /// Find the first class with the given name, searching every scope
    /// including ignored ones.
    pub fn find_class(&self, name: &str) -> Option<&Class> {
        self.units.iter().find_map(|unit| unit.find_class(name))
    }

    /// Like [`find_class`](Self::find_class), but a class declared in the
    /// unit at `unit` wins over one in another unit.
    pub fn find_class_from(&self, unit: usize, name: &str) -> Option<&Class> {
        self.units
            .get(unit)
            .and_then(|u| u.find_class(name))
            .or_else(|| self.find_class(name))
    }

    /// Find the first namespace with the given name at any depth.
    pub fn find_namespace(&self, name: &str) -> Option<&Namespace> {
        fn search<'a>(namespaces: &'a [Namespace], name: &str) -> Option<&'a Namespace> {
            namespaces.iter().find_map(|ns| {
                if ns.name == name {
                    Some(ns)
                } else {
                    search(&ns.namespaces, name)
                }
            })
        }

        self.units.iter().find_map(|unit| search(&unit.namespaces, name))
    }

    /// Every non-ignored class at any depth, outside ignored subtrees.
    pub fn classes(&self) -> Vec<&Class> {
        fn collect<'a>(classes: &'a [Class], out: &mut Vec<&'a Class>) {
            for class in classes.iter().filter(|c| !c.ignored) {
                out.push(class);
                collect(&class.nested, out);
            }
        }

        fn collect_ns<'a>(namespaces: &'a [Namespace], out: &mut Vec<&'a Class>) {
            for ns in namespaces.iter().filter(|ns| !ns.ignored) {
                collect(&ns.classes, out);
                collect_ns(&ns.namespaces, out);
            }
        }

        let mut out = Vec::new();
        for unit in &self.units {
            collect(&unit.classes, &mut out);
            collect_ns(&unit.namespaces, &mut out);
        }
        out
    }

    /// Names of every class that is ignored, either directly or because an
    /// enclosing declaration is.
    pub fn ignored_classes(&self) -> BTreeSet<String> {
        fn collect(classes: &[Class], parent_ignored: bool, out: &mut BTreeSet<String>) {
            for class in classes {
                let ignored = parent_ignored || class.ignored;
                if ignored {
                    out.insert(class.name.clone());
                }
                collect(&class.nested, ignored, out);
            }
        }

        fn collect_ns(namespaces: &[Namespace], parent_ignored: bool, out: &mut BTreeSet<String>) {
            for ns in namespaces {
                let ignored = parent_ignored || ns.ignored;
                collect(&ns.classes, ignored, out);
                collect_ns(&ns.namespaces, ignored, out);
            }
        }

        let mut out = BTreeSet::new();
        for unit in &self.units {
            collect(&unit.classes, false, &mut out);
            collect_ns(&unit.namespaces, false, &mut out);
        }
        out
    }

    /// A copy of the graph with every ignored declaration removed.
    pub fn retained(&self) -> DeclarationGraph {
        fn prune_functions(functions: &[Function]) -> Vec<Function> {
            functions.iter().filter(|f| !f.ignored).cloned().collect()
        }

        fn prune_classes(classes: &[Class]) -> Vec<Class> {
            classes
                .iter()
                .filter(|c| !c.ignored)
                .map(|c| Class {
                    methods: prune_functions(&c.methods),
                    nested: prune_classes(&c.nested),
                    ..c.clone()
                })
                .collect()
        }

        fn prune_namespaces(namespaces: &[Namespace]) -> Vec<Namespace> {
            namespaces
                .iter()
                .filter(|ns| !ns.ignored)
                .map(|ns| Namespace {
                    name: ns.name.clone(),
                    ignored: false,
                    namespaces: prune_namespaces(&ns.namespaces),
                    classes: prune_classes(&ns.classes),
                    functions: prune_functions(&ns.functions),
                })
                .collect()
        }

        DeclarationGraph {
            units: self
                .units
                .iter()
                .map(|unit| TranslationUnit {
                    path: unit.path.clone(),
                    namespaces: prune_namespaces(&unit.namespaces),
                    classes: prune_classes(&unit.classes),
                    functions: prune_functions(&unit.functions),
                    macros: unit.macros.iter().filter(|m| !m.ignored).cloned().collect(),
                })
                .collect(),
        }
    }

    /// Visit every non-ignored scope that can hold functions and classes:
    /// translation units, namespaces and classes. Ignored subtrees are skipped.
    pub fn for_each_scope_mut(&mut self, f: &mut dyn FnMut(ScopeMut<'_>)) {
        for unit in &mut self.units {
            unit.for_each_scope_mut(f);
        }
    }

    /// Visit every non-ignored class at any depth.
    pub fn for_each_class_mut(&mut self, f: &mut dyn FnMut(&mut Class)) {
        for unit in &mut self.units {
            unit.for_each_class_mut(f);
        }
    }

    /// Visit every non-ignored function and method at any depth.
    pub fn for_each_function_mut(&mut self, f: &mut dyn FnMut(&mut Function)) {
        self.for_each_scope_mut(&mut |scope: ScopeMut<'_>| {
            for function in scope.functions.iter_mut().filter(|func| !func.ignored) {
                f(function);
            }
        });
    }

    /// Visit every non-ignored namespace at any depth.
    pub fn for_each_namespace_mut(&mut self, f: &mut dyn FnMut(&mut Namespace)) {
        fn visit(namespaces: &mut [Namespace], f: &mut dyn FnMut(&mut Namespace)) {
            for ns in namespaces.iter_mut().filter(|ns| !ns.ignored) {
                f(ns);
                visit(&mut ns.namespaces, f);
            }
        }

        for unit in &mut self.units {
            visit(&mut unit.namespaces, f);
        }
    }
}

fn visit_scopes(
    kind: ScopeKind,
    functions: &mut Vec<Function>,
    classes: &mut Vec<Class>,
    f: &mut dyn FnMut(ScopeMut<'_>),
) {
    f(ScopeMut {
        kind,
        functions: &mut *functions,
        classes: &mut *classes,
    });
    for class in classes.iter_mut().filter(|c| !c.ignored) {
        visit_scopes(ScopeKind::Class, &mut class.methods, &mut class.nested, f);
    }
}

fn visit_namespace_scopes(namespaces: &mut [Namespace], f: &mut dyn FnMut(ScopeMut<'_>)) {
    for ns in namespaces.iter_mut().filter(|ns| !ns.ignored) {
        visit_scopes(ScopeKind::Namespace, &mut ns.functions, &mut ns.classes, f);
        visit_namespace_scopes(&mut ns.namespaces, f);
    }
}

/// What kind of declaration a scope belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Unit,
    Namespace,
    Class,
}

/// Mutable view of one declaration scope.
pub struct ScopeMut<'a> {
    pub kind: ScopeKind,
    /// Free functions of a unit or namespace, or methods of a class.
    pub functions: &'a mut Vec<Function>,
    /// Classes declared directly in the scope.
    pub classes: &'a mut Vec<Class>,
}

/// One parsed header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Header the unit was extracted from
    pub path: PathBuf,

    /// Top-level namespaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<Namespace>,

    /// Classes declared at file scope
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<Class>,

    /// Free functions declared at file scope
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Function>,

    /// `#define` macros
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub macros: Vec<Macro>,
}

impl TranslationUnit {
    /// Create an empty unit for a header path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TranslationUnit {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces.push(namespace);
        self
    }

    pub fn with_class(mut self, class: Class) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_macro(mut self, mac: Macro) -> Self {
        self.macros.push(mac);
        self
    }

    /// File stem of the header, used to name per-unit output.
    pub fn file_stem(&self) -> &str {
        file_stem(&self.path)
    }

    /// Find the first class with the given name in this unit, including
    /// ignored ones.
    pub fn find_class(&self, name: &str) -> Option<&Class> {
        fn in_classes<'a>(classes: &'a [Class], name: &str) -> Option<&'a Class> {
            classes.iter().find_map(|c| {
                if c.name == name {
                    Some(c)
                } else {
                    in_classes(&c.nested, name)
                }
            })
        }

        fn in_namespaces<'a>(namespaces: &'a [Namespace], name: &str) -> Option<&'a Class> {
            namespaces.iter().find_map(|ns| {
                in_classes(&ns.classes, name).or_else(|| in_namespaces(&ns.namespaces, name))
            })
        }

        in_classes(&self.classes, name).or_else(|| in_namespaces(&self.namespaces, name))
    }

    /// Visit every non-ignored scope of this unit.
    pub fn for_each_scope_mut(&mut self, f: &mut dyn FnMut(ScopeMut<'_>)) {
        visit_scopes(ScopeKind::Unit, &mut self.functions, &mut self.classes, f);
        visit_namespace_scopes(&mut self.namespaces, f);
    }

    /// Visit every non-ignored class of this unit at any depth.
    pub fn for_each_class_mut(&mut self, f: &mut dyn FnMut(&mut Class)) {
        self.for_each_scope_mut(&mut |scope: ScopeMut<'_>| {
            for class in scope.classes.iter_mut().filter(|c| !c.ignored) {
                f(class);
            }
        });
    }
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("unit")
}

/// A namespace declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,

    #[serde(default)]
    pub ignored: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<Namespace>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<Class>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Function>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Namespace {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces.push(namespace);
        self
    }

    pub fn with_class(mut self, class: Class) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }
}

/// Whether a record was declared with `class` or `struct`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
}

/// A class or struct declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,

    #[serde(default)]
    pub kind: ClassKind,

    /// Set when the declaration and everything nested in it is excluded
    #[serde(default)]
    pub ignored: bool,

    /// Base class names, as written
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Function>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Class>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Class {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn with_method(mut self, method: Function) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_nested(mut self, class: Class) -> Self {
        self.nested.push(class);
        self
    }

    /// Mark the class (and therefore its subtree) as excluded.
    pub fn ignore(&mut self) {
        self.ignored = true;
    }
}

/// A free function or a method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,

    #[serde(default)]
    pub ignored: bool,

    pub return_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_virtual: bool,

    #[serde(default)]
    pub is_override: bool,

    /// `const`-qualified method
    #[serde(default)]
    pub is_const: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            return_type: return_type.into(),
            ..Default::default()
        }
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_override(mut self) -> Self {
        self.is_virtual = true;
        self.is_override = true;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Whether this is any kind of operator, including conversions.
    pub fn is_operator(&self) -> bool {
        self.name
            .strip_prefix("operator")
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| !(c.is_alphanumeric() || c == '_'))
    }

    /// The operator symbol if this is an operator overload, e.g. `"+="` for
    /// `operator+=`. Conversion operators are not reported.
    pub fn operator_symbol(&self) -> Option<&str> {
        let rest = self.name.strip_prefix("operator")?;
        let trimmed = rest.trim_start();
        match trimmed.chars().next() {
            Some(c) if c.is_alphanumeric() || c == '_' => {
                // `operator new` / `operator delete`, not `operatorFoo`
                if rest.len() != trimmed.len()
                    && (trimmed.starts_with("new") || trimmed.starts_with("delete"))
                {
                    Some(trimmed)
                } else {
                    None
                }
            }
            Some(_) => Some(trimmed),
            None => None,
        }
    }

    /// Parameter types with whitespace normalized, used to compare overloads.
    pub fn signature(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|p| p.ty.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect()
    }
}

/// A function parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name (may be empty for unnamed params)
    pub name: String,

    pub ty: String,

    /// Default value expression, as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A `#define` macro.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macro {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub ignored: bool,
}

impl Macro {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Macro {
            name: name.into(),
            value: value.into(),
            ignored: false,
        }
    }
}

/// The identifier a type spelling refers to, ignoring cv-qualifiers,
/// pointers, references and namespace qualification.
///
/// `"const ID3D11Device*"` yields `ID3D11Device`, `"std::string &"` yields
/// `string`.
pub fn type_identifier(ty: &str) -> Option<&str> {
    const QUALIFIERS: &[&str] = &[
        "const", "volatile", "struct", "class", "enum", "union", "unsigned", "signed",
    ];

    ty.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|tok| !tok.is_empty() && !QUALIFIERS.contains(tok))
        .last()
}
