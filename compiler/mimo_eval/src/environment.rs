//! Parent-linked scopes for variable declaration and lookup.
//!
//! Every scope has exactly one parent, fixed at creation, so the scopes
//! form a tree rooted at the global scope. A closure holds a cheap handle
//! to the scope it was created in; a scope lives as long as its last
//! handle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use mimo_ir::DeclKind;

use crate::value::{OrderedMap, Value};

/// What a scope belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeRole {
    /// The unique root; holds builtins and `global` declarations.
    Global,
    /// Top level of one loaded module.
    ModuleRoot,
    /// One function invocation; holds its parameters.
    Function,
    /// Loop iteration, branch, `try`/`catch` body or `case` arm.
    Block,
}

impl ScopeRole {
    /// Implicit `set` assignment never looks past a scope with this role.
    fn is_boundary(self) -> bool {
        matches!(self, ScopeRole::Global | ScopeRole::ModuleRoot)
    }
}

/// Why a declaration or assignment failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvError {
    /// The name is already bound in this scope and the redeclaration is
    /// not a `set` over a `set`.
    AlreadyDeclared,
    /// The binding was declared `const`.
    Const,
    /// No scope in the chain binds the name.
    Undefined,
}

#[derive(Clone)]
struct Binding {
    value: Value,
    kind: DeclKind,
}

struct Scope {
    vars: OrderedMap<Binding>,
    parent: Option<Environment>,
    role: ScopeRole,
}

/// Handle to one scope record.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    /// Create the root scope.
    pub fn global() -> Self {
        Self::with_role(None, ScopeRole::Global)
    }

    /// Create a child of `self` with the given role.
    #[must_use]
    pub fn child(&self, role: ScopeRole) -> Self {
        Self::with_role(Some(self.clone()), role)
    }

    fn with_role(parent: Option<Environment>, role: ScopeRole) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            vars: OrderedMap::new(),
            parent,
            role,
        })))
    }

    pub fn role(&self) -> ScopeRole {
        self.0.borrow().role
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// The root (global) scope of this chain.
    #[must_use]
    pub fn root(&self) -> Environment {
        let mut env = self.clone();
        while let Some(parent) = env.parent() {
            env = parent;
        }
        env
    }

    /// Bind `name` in this scope.
    ///
    /// Redeclaring a name in the same scope is only allowed when both the
    /// existing and the new binding are `set`.
    pub fn define(&self, name: &str, value: Value, kind: DeclKind) -> Result<(), EnvError> {
        let mut scope = self.0.borrow_mut();
        if let Some(existing) = scope.vars.get(name) {
            if kind != DeclKind::Set || existing.kind != DeclKind::Set {
                return Err(EnvError::AlreadyDeclared);
            }
        }
        scope.vars.insert(name, Binding { value, kind });
        Ok(())
    }

    /// Reassign the nearest binding of `name`, searching the whole chain.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EnvError> {
        let mut env = self.clone();
        loop {
            {
                let mut scope = env.0.borrow_mut();
                if let Some(binding) = scope.vars.get_mut(name) {
                    if binding.kind == DeclKind::Const {
                        return Err(EnvError::Const);
                    }
                    binding.value = value;
                    return Ok(());
                }
            }
            env = env.parent().ok_or(EnvError::Undefined)?;
        }
    }

    /// Value of the nearest binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut env = self.clone();
        loop {
            if let Some(binding) = env.0.borrow().vars.get(name) {
                return Some(binding.value.clone());
            }
            env = env.parent()?;
        }
    }

    pub fn has_in_current_scope(&self, name: &str) -> bool {
        self.0.borrow().vars.contains_key(name)
    }

    /// The scope that binds `name`, stopping after the first module-root or
    /// global scope.
    fn find_binding_scope(&self, name: &str) -> Option<Environment> {
        let mut env = self.clone();
        loop {
            let (found, boundary) = {
                let scope = env.0.borrow();
                (scope.vars.contains_key(name), scope.role.is_boundary())
            };
            if found {
                return Some(env);
            }
            if boundary {
                return None;
            }
            env = env.parent()?;
        }
    }

    /// `set name value`: reassign a binding visible up to the nearest module
    /// or global boundary, or create a new `set` binding here.
    pub fn set_variable(&self, name: &str, value: Value) -> Result<(), EnvError> {
        match self.find_binding_scope(name) {
            Some(owner) => owner.assign(name, value),
            None => self.define(name, value, DeclKind::Set),
        }
    }

    /// Every name visible from this scope, innermost first. Used for
    /// "did you mean" suggestions.
    pub fn visible_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut env = Some(self.clone());
        while let Some(current) = env {
            names.extend(current.0.borrow().vars.keys().map(str::to_string));
            env = current.parent();
        }
        names
    }

    /// Snapshot of this scope's own bindings, in declaration order.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .vars
            .iter()
            .map(|(name, binding)| (name.to_string(), binding.value.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        f.debug_struct("Environment")
            .field("role", &scope.role)
            .field("names", &scope.vars.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
