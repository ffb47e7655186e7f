/// Number of passthrough output slots every take carries.
pub const MAX_OTHER_OUTPUT: usize = 3;

/// Number of per-output digest slots in the state registry.
pub const MAX_STATE_OUTPUT: usize = 5;

/// Protocol marker leading the state commitment output's script body.
pub const STATE_OUTPUT_MARKER: &[u8; 3] = b"cat";

/// OP_RETURN opcode.
pub const OP_RETURN: u8 = 0x6a;
