use std::fmt::Write as _;
use std::io::Write;

use crate::alu::AluOp;
use crate::dprintln;
use crate::error::Fault;
use crate::opcode;

/// LS-8 can address 256 bytes of memory.
pub const MEMORY_MAX: usize = 0x100;

const REGISTER_COUNT: usize = 8;

/// Register 7 holds the stack pointer by convention.
const SP: usize = 7;
const SP_INIT: u8 = 0xF4;

/// Routine implementing one opcode. Reads its own operands relative to the
/// program counter, which the machine advances once the handler returns.
pub type Handler = fn(&mut Cpu, &mut dyn Write) -> Result<(), Fault>;

/// Mapping from opcode byte to the routine that implements it.
#[derive(Clone)]
pub struct DispatchTable {
    handlers: [Option<Handler>; 0x100],
}

impl DispatchTable {
    pub fn empty() -> Self {
        Self {
            handlers: [None; 0x100],
        }
    }

    /// Table containing `HLT`, `LDI`, `MUL` and `PRN`.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register(opcode::HLT, Cpu::hlt);
        table.register(opcode::LDI, Cpu::ldi);
        table.register(opcode::MUL, Cpu::alu_op);
        table.register(opcode::PRN, Cpu::prn);
        table
    }

    /// Install `handler` for `opcode`, returning the handler it replaced.
    pub fn register(&mut self, opcode: u8, handler: Handler) -> Option<Handler> {
        self.handlers[opcode as usize].replace(handler)
    }

    #[inline]
    pub fn get(&self, opcode: u8) -> Option<Handler> {
        self.handlers[opcode as usize]
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Halted(Halt),
}

/// Why the machine stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// `HLT` was executed.
    Instruction,
    /// The byte at `address` has no handler.
    UnknownOpcode { opcode: u8, address: usize },
}

/// Represents complete machine state during runtime.
pub struct Cpu {
    /// System memory - 256 bytes, shared by code and data.
    mem: [u8; MEMORY_MAX],
    /// 8x 8-bit registers
    reg: [u8; REGISTER_COUNT],
    /// Program counter
    pc: usize,
    /// Flags register `00000LGE`, reserved for comparisons
    fl: u8,
    /// Instruction register
    ir: u8,
    state: State,
    table: DispatchTable,
    trace: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_table(DispatchTable::standard())
    }

    pub fn with_table(table: DispatchTable) -> Self {
        let mut reg = [0; REGISTER_COUNT];
        reg[SP] = SP_INIT;
        Cpu {
            mem: [0; MEMORY_MAX],
            reg,
            pc: 0,
            fl: 0,
            ir: 0,
            state: State::Running,
            table,
            trace: false,
        }
    }

    /// Copy a program image into memory starting at address 0. Memory past
    /// the end of the image is left as it was.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Fault> {
        if program.len() > MEMORY_MAX {
            return Err(Fault::ImageTooLarge(program.len()));
        }
        self.mem[..program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    #[inline]
    pub fn read(&self, addr: usize) -> Result<u8, Fault> {
        self.mem
            .get(addr)
            .copied()
            .ok_or(Fault::AddressOutOfRange(addr))
    }

    #[inline]
    pub fn write(&mut self, addr: usize, val: u8) -> Result<(), Fault> {
        let cell = self
            .mem
            .get_mut(addr)
            .ok_or(Fault::AddressOutOfRange(addr))?;
        *cell = val;
        Ok(())
    }

    #[inline]
    pub fn reg(&self, reg: u8) -> Result<u8, Fault> {
        self.reg
            .get(reg as usize)
            .copied()
            .ok_or(Fault::RegisterOutOfRange(reg))
    }

    #[inline]
    fn reg_mut(&mut self, reg: u8) -> Result<&mut u8, Fault> {
        self.reg
            .get_mut(reg as usize)
            .ok_or(Fault::RegisterOutOfRange(reg))
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn flags(&self) -> u8 {
        self.fl
    }

    pub fn ir(&self) -> u8 {
        self.ir
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Run until the machine halts, returning the reason.
    pub fn run(&mut self, out: &mut dyn Write) -> Result<Halt, Fault> {
        loop {
            if let State::Halted(halt) = self.step(out)? {
                return Ok(halt);
            }
        }
    }

    /// Execute a single instruction. A halted machine is left untouched.
    pub fn step(&mut self, out: &mut dyn Write) -> Result<State, Fault> {
        if let State::Halted(_) = self.state {
            return Ok(self.state);
        }
        if self.trace {
            dprintln!("{}", self.trace_line());
        }

        self.ir = self.read(self.pc)?;
        match self.table.get(self.ir) {
            Some(handler) => {
                handler(self, out)?;
                self.pc += opcode::instruction_len(self.ir);
            }
            None => {
                dprintln!(
                    "Unknown instruction 0b{:08b} at address 0x{:02X}",
                    self.ir,
                    self.pc
                );
                self.state = State::Halted(Halt::UnknownOpcode {
                    opcode: self.ir,
                    address: self.pc,
                });
            }
        }
        Ok(self.state)
    }

    /// `TRACE: PC | M[PC] M[PC+1] M[PC+2] | R0 ... R7`
    pub fn trace_line(&self) -> String {
        let mut line = format!("TRACE: {:02X} |", self.pc);
        for offs in 0..3 {
            let val = self.mem.get(self.pc + offs).copied().unwrap_or(0);
            // Writing to a `String` cannot fail
            let _ = write!(line, " {val:02X}");
        }
        line.push_str(" |");
        for val in self.reg {
            let _ = write!(line, " {val:02X}");
        }
        line
    }

    #[inline]
    fn operand(&self, n: usize) -> Result<u8, Fault> {
        self.read(self.pc + n)
    }

    /// Apply `op` to two registers, storing the result in `reg_a`.
    pub fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), Fault> {
        let val = op.apply(self.reg(reg_a)?, self.reg(reg_b)?);
        *self.reg_mut(reg_a)? = val;
        Ok(())
    }

    /// `HLT`
    pub fn hlt(&mut self, _out: &mut dyn Write) -> Result<(), Fault> {
        self.state = State::Halted(Halt::Instruction);
        Ok(())
    }

    /// `LDI register, immediate`
    pub fn ldi(&mut self, _out: &mut dyn Write) -> Result<(), Fault> {
        let reg = self.operand(1)?;
        let val = self.operand(2)?;
        *self.reg_mut(reg)? = val;
        Ok(())
    }

    /// `PRN register`
    pub fn prn(&mut self, out: &mut dyn Write) -> Result<(), Fault> {
        let reg = self.operand(1)?;
        let val = self.reg(reg)?;
        writeln!(out, "{val}")?;
        Ok(())
    }

    /// Any ALU instruction `OP reg_a, reg_b`; the operation comes from the
    /// identifier bits of the current instruction.
    pub fn alu_op(&mut self, _out: &mut dyn Write) -> Result<(), Fault> {
        let op = AluOp::decode(self.ir)?;
        let reg_a = self.operand(1)?;
        let reg_b = self.operand(2)?;
        self.alu(op, reg_a, reg_b)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
