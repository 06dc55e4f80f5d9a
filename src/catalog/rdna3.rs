//! RDNA3 (gfx11xx) WMMA instruction table.
//!
//! Wave32, single-block shapes. Inputs are duplicated across both half-waves;
//! 16-bit outputs occupy one half of each 32-bit destination register, chosen
//! by OPSEL[2].

use super::{BlgpMode, CbszAbidMode, InstructionDescriptor, NegMode, OpselMode};
use crate::arch::Architecture;
use crate::types::ElementType;
use crate::types::ElementType::{Bf16, F16, F32, I32, Iu4, Iu8};

fn wmma(
    mnemonic: &'static str,
    opcode: u8,
    input: ElementType,
    out: ElementType,
    k: u32,
    cycles: u32,
) -> InstructionDescriptor {
    let integer = matches!(input, Iu8 | Iu4);
    InstructionDescriptor {
        mnemonic,
        arch: Architecture::Rdna3,
        opcode,
        src0: input,
        src1: input,
        out,
        m: 16,
        n: 16,
        k,
        blocks: 1,
        cycles,
        integer,
        c_d_arch: true,
        gpr_byte_align: 4,
        cbsz_abid: CbszAbidMode::Unsupported,
        blgp: BlgpMode::Unsupported,
        opsel: if out.bits() == 16 {
            OpselMode::OutputHalf
        } else {
            OpselMode::Unsupported
        },
        neg: if integer {
            NegMode::IntegerSignedness
        } else {
            NegMode::FloatNegAbs
        },
        coexec: false,
        coexec_delay: -1,
        sparse: false,
    }
}

pub(super) fn instructions() -> Vec<InstructionDescriptor> {
    vec![
        wmma("V_WMMA_F32_16X16X16_F16", 0x40, F16, F32, 16, 32),
        wmma("V_WMMA_F32_16X16X16_BF16", 0x41, Bf16, F32, 16, 32),
        wmma("V_WMMA_F16_16X16X16_F16", 0x42, F16, F16, 16, 32),
        wmma("V_WMMA_BF16_16X16X16_BF16", 0x43, Bf16, Bf16, 16, 32),
        wmma("V_WMMA_I32_16X16X16_IU8", 0x44, Iu8, I32, 16, 32),
        wmma("V_WMMA_I32_16X16X16_IU4", 0x45, Iu4, I32, 16, 16),
    ]
}
