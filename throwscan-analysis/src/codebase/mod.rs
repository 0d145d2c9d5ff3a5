//! In-memory program model implementing the provider traits.
//!
//! `Codebase` holds a class hierarchy, registered callables with their
//! declared contracts, and per-function variable bindings. It is enough to
//! drive the analysis end to end in tests and for hosts that have no richer
//! type model of their own.
//!
//! ```
//! use throwscan_analysis::codebase::Codebase;
//!
//! let mut cb = Codebase::new();
//! cb.class("RuntimeException", &["Exception"])
//!     .function("load", Some("RuntimeException"))
//!     .method("Repo", "save", None);
//! assert_eq!(cb.expanded("RuntimeException").len(), 2);
//! ```

pub mod hierarchy;
pub mod inference;
pub mod resolution;

pub use hierarchy::ClassHierarchy;

use throwscan_core::types::{CallableId, FxHashMap, TypeId, TypeInterner};

use crate::provider::{Callable, ExceptionContract, TypeProvider};
use crate::types::{Type, TypeSet};

/// The type every other type can be cast to.
pub const MIXED: &str = "mixed";

/// A registered callable.
#[derive(Debug, Clone)]
pub(crate) struct CallableEntry {
    pub name: String,
    pub contract: ExceptionContract,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MethodEntry {
    pub id: CallableId,
    pub is_static: bool,
}

pub struct Codebase {
    interner: TypeInterner,
    hierarchy: ClassHierarchy,
    mixed: TypeId,
    callables: FxHashMap<CallableId, CallableEntry>,
    /// Lowercased qualified name (`fn`, `class::method`) to callable.
    by_name: FxHashMap<String, CallableId>,
    /// Declaring class and lowercased method name to method.
    methods: FxHashMap<(TypeId, String), MethodEntry>,
    /// Keyed by lowercased function name and variable name without `$`.
    variables: FxHashMap<(String, String), TypeSet>,
    callable_variables: FxHashMap<(String, String), Vec<CallableId>>,
}

impl Codebase {
    pub fn new() -> Self {
        let interner = TypeInterner::new();
        let mixed = interner.intern(MIXED);
        Self {
            interner,
            hierarchy: ClassHierarchy::new(),
            mixed,
            callables: FxHashMap::default(),
            by_name: FxHashMap::default(),
            methods: FxHashMap::default(),
            variables: FxHashMap::default(),
            callable_variables: FxHashMap::default(),
        }
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    /// Declare a class or interface with its parent and interfaces.
    pub fn class(&mut self, name: &str, parents: &[&str]) -> &mut Self {
        let id = self.interner.intern(name);
        self.hierarchy.add_type(id);
        for parent in parents {
            let parent = self.interner.intern(parent);
            self.hierarchy.add_parent(id, parent);
        }
        self
    }

    /// Register a function with an optional `A|B` contract. `None` means
    /// nothing is declared; `Some("")` declares that nothing is thrown.
    pub fn function(&mut self, name: &str, throws: Option<&str>) -> &mut Self {
        let id = self.interner.intern_callable(name);
        self.register(id, name.to_string(), throws);
        self
    }

    /// Register a closure under the name the host gives its scope.
    pub fn closure(&mut self, name: &str, throws: Option<&str>) -> &mut Self {
        self.function(name, throws)
    }

    pub fn method(&mut self, class: &str, name: &str, throws: Option<&str>) -> &mut Self {
        self.add_method(class, name, false, throws);
        self
    }

    pub fn static_method(&mut self, class: &str, name: &str, throws: Option<&str>) -> &mut Self {
        self.add_method(class, name, true, throws);
        self
    }

    /// Type a variable inside `function` (`$`-prefix optional).
    pub fn bind_variable(&mut self, function: &str, variable: &str, types: &str) -> &mut Self {
        let parsed = self.parse(types);
        self.variables
            .insert(Self::variable_key(function, variable), parsed);
        self
    }

    /// Make a variable inside `function` refer to one of several callables.
    pub fn bind_callable(&mut self, function: &str, variable: &str, callees: &[&str]) -> &mut Self {
        let ids = callees
            .iter()
            .filter_map(|name| self.by_name.get(&name.to_lowercase()).copied())
            .collect();
        self.callable_variables
            .insert(Self::variable_key(function, variable), ids);
        self
    }

    pub fn ty(&self, name: &str) -> Type {
        Type::new(self.interner.intern(name))
    }

    /// Parse an `A|?B` string, see [`TypeProvider::parse_type_string`].
    pub fn parse(&self, source: &str) -> TypeSet {
        self.parse_type_string(source)
    }

    /// Expansion of a named type.
    pub fn expanded(&self, name: &str) -> TypeSet {
        self.expand(self.ty(name))
    }

    pub fn callable_count(&self) -> usize {
        self.callables.len()
    }

    pub(crate) fn mixed(&self) -> TypeId {
        self.mixed
    }

    pub(crate) fn callable(&self, id: CallableId) -> Option<Callable> {
        self.callables
            .get(&id)
            .map(|entry| Callable::new(id, entry.name.clone()))
    }

    pub(crate) fn callable_by_name(&self, name: &str) -> Option<Callable> {
        let id = *self.by_name.get(&name.trim_start_matches('\\').to_lowercase())?;
        self.callable(id)
    }

    pub(crate) fn contract(&self, id: CallableId) -> Option<&ExceptionContract> {
        self.callables.get(&id).map(|entry| &entry.contract)
    }

    /// Find `method` on `class` or the nearest ancestor declaring it.
    pub(crate) fn find_method(&self, class: TypeId, method: &str) -> Option<MethodEntry> {
        let method = method.to_lowercase();
        self.hierarchy
            .ancestors(class)
            .into_iter()
            .find_map(|ancestor| self.methods.get(&(ancestor, method.clone())).copied())
    }

    pub(crate) fn variable_types(&self, function: &str, variable: &str) -> Option<&TypeSet> {
        self.variables.get(&Self::variable_key(function, variable))
    }

    pub(crate) fn variable_callables(&self, function: &str, variable: &str) -> Option<&[CallableId]> {
        self.callable_variables
            .get(&Self::variable_key(function, variable))
            .map(Vec::as_slice)
    }

    fn add_method(&mut self, class: &str, name: &str, is_static: bool, throws: Option<&str>) {
        let class_id = self.interner.intern(class);
        self.hierarchy.add_type(class_id);
        let id = self.interner.intern_method(class, name);
        let display = self.interner.resolve_callable(id).to_string();
        self.register(id, display, throws);
        self.methods
            .insert((class_id, name.to_lowercase()), MethodEntry { id, is_static });
    }

    fn register(&mut self, id: CallableId, name: String, throws: Option<&str>) {
        let contract = match throws {
            Some(source) => ExceptionContract::Declared(self.parse(source)),
            None => ExceptionContract::Undeclared,
        };
        self.by_name
            .insert(name.trim_start_matches('\\').to_lowercase(), id);
        self.callables.insert(id, CallableEntry { name, contract });
    }

    fn variable_key(function: &str, variable: &str) -> (String, String) {
        (
            function.trim_start_matches('\\').to_lowercase(),
            variable.trim_start_matches('$').to_string(),
        )
    }
}

impl Default for Codebase {
    fn default() -> Self {
        Self::new()
    }
}
