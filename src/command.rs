pub trait OpCode {
    fn op_code(&self) -> u8;
}

/// DS2438 memory and conversion function commands
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum Command {
    ConvertT = 0x44,
    ConvertV = 0xB4,
    WriteScratchpad = 0x4E,
    ReadScratchpad = 0xBE,
    CopyScratchpad = 0x48,
    RecallMemory = 0xB8,
}

impl OpCode for Command {
    fn op_code(&self) -> u8 {
        *self as _
    }
}

/// Memory page selector sent after every memory function command
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum Page {
    Zero = 0x00,
}

impl OpCode for Page {
    fn op_code(&self) -> u8 {
        *self as _
    }
}
