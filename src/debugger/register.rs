use itertools::Itertools;
use strum_macros::Display;

/// General purpose, segment and flag registers of x86-64.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Register {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rdi,
    Rsi,
    Rbp,
    Rsp,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    Rip,
    Eflags,
    Cs,
    FsBase,
    GsBase,
    Fs,
    Gs,
    Ss,
    Ds,
    Es,
}

impl Register {
    /// Map dwarf register number to a machine register.
    /// See System V AMD64 ABI, "DWARF Register Number Mapping".
    pub fn from_dwarf(number: usize) -> Option<Self> {
        let register = match number {
            0 => Register::Rax,
            1 => Register::Rdx,
            2 => Register::Rcx,
            3 => Register::Rbx,
            4 => Register::Rsi,
            5 => Register::Rdi,
            6 => Register::Rbp,
            7 => Register::Rsp,
            8 => Register::R8,
            9 => Register::R9,
            10 => Register::R10,
            11 => Register::R11,
            12 => Register::R12,
            13 => Register::R13,
            14 => Register::R14,
            15 => Register::R15,
            16 => Register::Rip,
            49 => Register::Eflags,
            50 => Register::Es,
            51 => Register::Cs,
            52 => Register::Ss,
            53 => Register::Ds,
            54 => Register::Fs,
            55 => Register::Gs,
            58 => Register::FsBase,
            59 => Register::GsBase,
            _ => return None,
        };
        Some(register)
    }
}

/// Value of a single register.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DwarfRegister {
    pub uint64_val: u64,
    /// Full register content in little endian, for registers wider than 64 bit.
    pub bytes: Vec<u8>,
}

impl DwarfRegister {
    pub fn from_u64(value: u64) -> Self {
        Self {
            uint64_val: value,
            bytes: value.to_le_bytes().to_vec(),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mut low = [0; 8];
        bytes
            .iter()
            .take(8)
            .enumerate()
            .for_each(|(i, b)| low[i] = *b);
        Self {
            uint64_val: u64::from_le_bytes(low),
            bytes,
        }
    }
}

/// Registers of a thread or a frame indexed by dwarf register number.
#[derive(Clone, Debug, Default)]
pub struct DwarfRegisters {
    regs: Vec<Option<DwarfRegister>>,
}

impl DwarfRegisters {
    pub fn new(regs: Vec<Option<DwarfRegister>>) -> Self {
        Self { regs }
    }

    /// Set register value, grow register list if needed.
    pub fn insert(&mut self, number: usize, reg: DwarfRegister) {
        if self.regs.len() <= number {
            self.regs.resize(number + 1, None);
        }
        self.regs[number] = Some(reg);
    }

    /// Return register by dwarf number, [`None`] if register value is unknown.
    pub fn reg(&self, number: usize) -> Option<&DwarfRegister> {
        self.regs.get(number)?.as_ref()
    }

    /// Number of register slots.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }
}

impl FromIterator<(usize, DwarfRegister)> for DwarfRegisters {
    fn from_iter<T: IntoIterator<Item = (usize, DwarfRegister)>>(iter: T) -> Self {
        let mut regs = DwarfRegisters::default();
        iter.into_iter()
            .for_each(|(number, reg)| regs.insert(number, reg));
        regs
    }
}

/// Architecture specific register naming.
pub trait Arch {
    /// Return register name, floating point flag and string representation of a register value.
    fn dwarf_register_to_string(&self, number: usize, reg: &DwarfRegister) -> (String, bool, String);
}

/// x86-64 architecture.
#[derive(Clone, Copy, Debug, Default)]
pub struct Amd64;

impl Amd64 {
    const XMM0: usize = 17;
    const XMM15: usize = 32;
    const ST0: usize = 33;
    const ST7: usize = 40;
}

fn hex_bytes(bytes: &[u8]) -> String {
    format!("0x{}", bytes.iter().rev().map(|b| format!("{b:02x}")).join(""))
}

impl Arch for Amd64 {
    fn dwarf_register_to_string(&self, number: usize, reg: &DwarfRegister) -> (String, bool, String) {
        if let Some(register) = Register::from_dwarf(number) {
            return (
                register.to_string(),
                false,
                format!("{:#018x}", reg.uint64_val),
            );
        }

        match number {
            Self::XMM0..=Self::XMM15 => (
                format!("xmm{}", number - Self::XMM0),
                true,
                hex_bytes(&reg.bytes),
            ),
            Self::ST0..=Self::ST7 => (
                format!("st{}", number - Self::ST0),
                true,
                hex_bytes(&reg.bytes),
            ),
            _ => (
                format!("dwarf_{number}"),
                false,
                format!("{:#018x}", reg.uint64_val),
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_amd64_register_names() {
        struct TestCase {
            number: usize,
            reg: DwarfRegister,
            expect: (&'static str, bool, &'static str),
        }
        let test_cases = [
            TestCase {
                number: 0,
                reg: DwarfRegister::from_u64(0x2A),
                expect: ("rax", false, "0x000000000000002a"),
            },
            TestCase {
                number: 16,
                reg: DwarfRegister::from_u64(0x5555_5555_BD63),
                expect: ("rip", false, "0x000055555555bd63"),
            },
            TestCase {
                number: 58,
                reg: DwarfRegister::from_u64(0),
                expect: ("fs_base", false, "0x0000000000000000"),
            },
            TestCase {
                number: 18,
                reg: DwarfRegister::from_bytes(vec![0x01, 0x02, 0x03, 0x04]),
                expect: ("xmm1", true, "0x04030201"),
            },
            TestCase {
                number: 40,
                reg: DwarfRegister::from_bytes(vec![0xff, 0x00]),
                expect: ("st7", true, "0x00ff"),
            },
            TestCase {
                number: 100,
                reg: DwarfRegister::from_u64(1),
                expect: ("dwarf_100", false, "0x0000000000000001"),
            },
        ];

        for tc in test_cases {
            let (name, fp, repr) = Amd64.dwarf_register_to_string(tc.number, &tc.reg);
            assert_eq!((name.as_str(), fp, repr.as_str()), tc.expect);
        }
    }

    #[test]
    fn test_dwarf_registers() {
        let regs: DwarfRegisters = [(3, DwarfRegister::from_u64(7))].into_iter().collect();
        assert_eq!(regs.len(), 4);
        assert!(regs.reg(0).is_none());
        assert_eq!(regs.reg(3).map(|r| r.uint64_val), Some(7));
        assert!(regs.reg(10).is_none());
        assert_eq!(DwarfRegister::from_bytes(vec![1, 0, 0, 0, 0, 0, 0, 0, 9]).uint64_val, 1);
    }
}
