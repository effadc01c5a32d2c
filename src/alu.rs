use crate::error::Fault;
use crate::opcode;

/// Arithmetic operations, keyed by the identifier nibble of an ALU opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add = 0b0000,
    Mul = 0b0010,
}

impl AluOp {
    /// Combine two register values. Results wrap at 8 bits.
    pub fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            Self::Add => a.wrapping_add(b),
            Self::Mul => a.wrapping_mul(b),
        }
    }

    /// Select the operation encoded by an ALU instruction byte.
    pub fn decode(instr: u8) -> Result<Self, Fault> {
        if !opcode::is_alu(instr) {
            return Err(Fault::UnsupportedOperation(instr));
        }
        match opcode::identifier(instr) {
            0b0000 => Ok(Self::Add),
            0b0010 => Ok(Self::Mul),
            _ => Err(Fault::UnsupportedOperation(instr)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps() {
        assert_eq!(AluOp::Mul.apply(9, 10), 90);
        assert_eq!(AluOp::Mul.apply(200, 200), 64);
        assert_eq!(AluOp::Mul.apply(16, 16), 0);
        assert_eq!(AluOp::Add.apply(250, 10), 4);
        assert_eq!(AluOp::Add.apply(1, 2), 3);
    }

    #[test]
    fn decode() {
        assert_eq!(AluOp::decode(opcode::MUL).unwrap(), AluOp::Mul);
        assert_eq!(AluOp::decode(0b1010_0000).unwrap(), AluOp::Add);
        assert!(matches!(
            AluOp::decode(0b1010_1111),
            Err(Fault::UnsupportedOperation(0b1010_1111))
        ));
        // Not flagged as an ALU instruction
        assert!(matches!(
            AluOp::decode(opcode::LDI),
            Err(Fault::UnsupportedOperation(_))
        ));
    }
}
