//! Opcode values and the layout of an instruction byte.
//!
//! ```text
//! AABCDDDD
//!   AA    number of operand bytes that follow (0, 1 or 2)
//!   B     ALU operation
//!   C     sets the program counter (reserved)
//!   DDDD  instruction identifier
//! ```

/// Halt the machine.
pub const HLT: u8 = 0b0000_0001;
/// `LDI register, immediate`: load an immediate into a register.
pub const LDI: u8 = 0b1000_0010;
/// `MUL reg_a, reg_b`: multiply two registers, storing in `reg_a`.
pub const MUL: u8 = 0b1010_0010;
/// `PRN register`: print the register as a decimal integer.
pub const PRN: u8 = 0b0100_0111;

const ALU_BIT: u8 = 0b0010_0000;

/// Number of operand bytes following `opcode`.
#[inline]
pub const fn operand_count(opcode: u8) -> usize {
    ((opcode >> 6) & 0b11) as usize
}

/// Total encoded length of the instruction, opcode byte included.
#[inline]
pub const fn instruction_len(opcode: u8) -> usize {
    operand_count(opcode) + 1
}

#[inline]
pub const fn is_alu(opcode: u8) -> bool {
    opcode & ALU_BIT != 0
}

/// Low nibble, which selects the operation for ALU instructions.
#[inline]
pub const fn identifier(opcode: u8) -> u8 {
    opcode & 0x0F
}
