//! Physical registers named by the assembly IR (spec §3).

/// The fixed register file the code generator and printer both speak of.
/// `Al` is the 8-bit low byte of `Rax`, used only as a `SET_EQ`/`SET_NE`
/// destination ahead of a `MOVZX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rsp,
    Rbp,
    Rdi,
    Rsi,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    Al,
}

impl Register {
    /// The ordered pool of caller-saved scratch registers `ccgen` draws
    /// from, least-likely-to-be-an-argument-register first (spec §4.4.1).
    pub const SCRATCH_POOL: [Register; 8] = [
        Register::R10,
        Register::R11,
        Register::R9,
        Register::R8,
        Register::Rcx,
        Register::Rdx,
        Register::Rsi,
        Register::Rdi,
    ];

    /// Registers carrying the first six integer arguments, in order
    /// (System-V ABI, spec §6).
    pub const ARG_REGS: [Register; 6] =
        [Register::Rdi, Register::Rsi, Register::Rdx, Register::Rcx, Register::R8, Register::R9];
}
