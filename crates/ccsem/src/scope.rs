//! Symbol tables and the scope chain (spec §3 "Symbol", "Symbol table").
//!
//! Scopes are stored flat in a `Vec` and addressed by index rather than
//! linked through borrowed parent pointers, so the analyzer can hold a
//! `&mut SymbolTable` for the whole pass without fighting the borrow
//! checker over which scope is "current".

use ccutil::Symbol;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Clone)]
pub struct VariableEntry {
    pub ty: Symbol,
    pub offset: i32,
    pub size: i32,
}

#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub ret_type: Symbol,
    pub param_types: Vec<Symbol>,
    pub frame_size: i64,
    pub locals: ScopeId,
}

#[derive(Debug, Clone)]
pub enum Entry {
    Variable(VariableEntry),
    Function(FunctionEntry),
}

#[derive(Debug)]
struct ScopeNode {
    bindings: FxHashMap<Symbol, Entry>,
    parent: Option<ScopeId>,
}

/// The whole scope chain for one compilation: one global scope holding
/// function symbols, plus one flat child scope per function for its
/// parameters and locals (spec §4.3: "a single flat scope per function").
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<ScopeNode>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { scopes: vec![ScopeNode { bindings: FxHashMap::default(), parent: None }] }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn new_child(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(ScopeNode { bindings: FxHashMap::default(), parent: Some(parent) });
        ScopeId(self.scopes.len() - 1)
    }

    /// Declares `name` in `scope`. Fails if `name` is already bound in this
    /// exact scope (not an ancestor) — shadowing an outer binding is fine,
    /// redeclaring within the same one is not.
    pub fn declare(&mut self, scope: ScopeId, name: Symbol, entry: Entry) -> Result<(), ()> {
        let node = &mut self.scopes[scope.0];
        if node.bindings.contains_key(&name) {
            return Err(());
        }
        node.bindings.insert(name, entry);
        Ok(())
    }

    /// Walks `scope` and its ancestors looking for `name`.
    pub fn resolve(&self, scope: ScopeId, name: Symbol) -> Option<&Entry> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let node = &self.scopes[id.0];
            if let Some(entry) = node.bindings.get(&name) {
                return Some(entry);
            }
            current = node.parent;
        }
        None
    }

    pub fn set_frame_size(&mut self, scope: ScopeId, name: Symbol, frame_size: i64) {
        if let Some(Entry::Function(f)) = self.scopes[scope.0].bindings.get_mut(&name) {
            f.frame_size = frame_size;
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
