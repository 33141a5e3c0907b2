//! The per-statement scratch-register allocator (spec §4.4.1).

use std::cell::Cell;
use std::rc::Rc;

use ccir::Register;

use crate::error::CodegenError;

/// A live scratch-register slot. Its physical register can be silently
/// relocated — the division lowering does this to evict an unrelated
/// temporary out of `RDX` before claiming it for the `IDIV` protocol
/// (spec §4.4.2). Cloning a `Temp` shares the same backing cell, so a
/// relocation is visible to every other holder of that temporary.
#[derive(Clone)]
pub struct Temp(Rc<Cell<Register>>);

impl Temp {
    pub fn reg(&self) -> Register {
        self.0.get()
    }

    pub(crate) fn relocate(&self, new: Register) {
        self.0.set(new);
    }
}

/// A bitmap (one slot per entry of [`Register::SCRATCH_POOL`]) tracking
/// which caller-saved scratch registers currently hold a live temporary.
/// Re-initialized before every top-level statement: nothing in a scratch
/// register needs to survive a statement boundary, since every named
/// value lives on the stack.
pub struct CodegenContext {
    owners: [Option<Temp>; 8],
}

impl CodegenContext {
    pub fn new() -> Self {
        CodegenContext { owners: Default::default() }
    }

    fn slot_of(register: Register) -> Option<usize> {
        Register::SCRATCH_POOL.iter().position(|r| *r == register)
    }

    /// Returns the first free register in pool order and marks it used.
    pub fn allocate(&mut self) -> Result<Temp, CodegenError> {
        for (i, slot) in self.owners.iter_mut().enumerate() {
            if slot.is_none() {
                let temp = Temp(Rc::new(Cell::new(Register::SCRATCH_POOL[i])));
                *slot = Some(temp.clone());
                return Ok(temp);
            }
        }
        Err(CodegenError::OutOfRegisters)
    }

    pub fn free(&mut self, temp: Temp) {
        if let Some(i) = Self::slot_of(temp.reg()) {
            self.owners[i] = None;
        }
    }

    pub fn is_live(&self, register: Register) -> bool {
        Self::slot_of(register).map(|i| self.owners[i].is_some()).unwrap_or(false)
    }

    pub fn owner_of(&self, register: Register) -> Option<Temp> {
        Self::slot_of(register).and_then(|i| self.owners[i].clone())
    }

    /// Finds a free pool register without creating a [`Temp`] for it yet;
    /// used by the division lowering, which needs the register identity
    /// before deciding which existing `Temp` to retarget onto it.
    pub fn find_free_register(&self) -> Result<Register, CodegenError> {
        self.owners.iter().position(|o| o.is_none()).map(|i| Register::SCRATCH_POOL[i]).ok_or(CodegenError::OutOfRegisters)
    }

    /// Reserves `register` for a caller-managed purpose without an
    /// associated `Temp` return value — used while lowering call
    /// arguments, where `argreg[i]` must be held live so that lowering
    /// later arguments does not clobber it (spec §4.4.2, function call).
    pub fn reserve(&mut self, register: Register) {
        if let Some(i) = Self::slot_of(register) {
            self.owners[i] = Some(Temp(Rc::new(Cell::new(register))));
        }
    }

    /// Moves `temp`'s logical home from `old` to `new`, freeing `old`'s
    /// pool slot and claiming `new`'s. `temp.reg()` must currently be `old`.
    pub fn retarget(&mut self, old: Register, new: Register, temp: Temp) {
        if let Some(i) = Self::slot_of(old) {
            self.owners[i] = None;
        }
        temp.relocate(new);
        if let Some(i) = Self::slot_of(new) {
            self.owners[i] = Some(temp);
        }
    }

    /// Snapshots and clears every slot — used around a `CALL`, after the
    /// live scratch registers have been pushed: "the context is now empty
    /// as far as scratch allocation is concerned" (spec §4.4.2).
    pub fn take_snapshot(&mut self) -> [Option<Temp>; 8] {
        std::mem::take(&mut self.owners)
    }

    pub fn restore_snapshot(&mut self, snapshot: [Option<Temp>; 8]) {
        self.owners = snapshot;
    }

    /// The number of set bits, for the register-discipline property
    /// (spec §8): must always equal the number of live temporaries.
    pub fn live_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }
}

impl Default for CodegenContext {
    fn default() -> Self {
        CodegenContext::new()
    }
}
