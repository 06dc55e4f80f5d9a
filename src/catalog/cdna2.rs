//! CDNA2 (gfx90a, MI200 series) MFMA instruction table.
//!
//! CDNA2 keeps the CDNA1 shapes, adds the `_1K` BF16 variants and FP64, moves
//! C/D into either register file, and tightens co-execution to a 4-cycle
//! issue delay.

use super::{BlgpMode, CbszAbidMode, InstructionDescriptor, NegMode, OpselMode};
use crate::arch::Architecture;
use crate::types::ElementType;
use crate::types::ElementType::{Bf16, F16, F32, F64, I32, I8};

fn mfma(
    mnemonic: &'static str,
    opcode: u8,
    input: ElementType,
    out: ElementType,
    m: u32,
    n: u32,
    k: u32,
    blocks: u32,
    cycles: u32,
) -> InstructionDescriptor {
    let fp64 = input == F64;
    InstructionDescriptor {
        mnemonic,
        arch: Architecture::Cdna2,
        opcode,
        src0: input,
        src1: input,
        out,
        m,
        n,
        k,
        blocks,
        cycles,
        integer: input == I8,
        c_d_arch: true,
        gpr_byte_align: 8,
        cbsz_abid: if blocks > 1 && !fp64 {
            CbszAbidMode::Broadcast
        } else {
            CbszAbidMode::Unsupported
        },
        blgp: if fp64 {
            BlgpMode::Unsupported
        } else {
            BlgpMode::LaneSwizzle
        },
        opsel: OpselMode::Unsupported,
        neg: NegMode::Unsupported,
        coexec: !fp64,
        coexec_delay: if fp64 { -1 } else { 4 },
        sparse: false,
    }
}

pub(super) fn instructions() -> Vec<InstructionDescriptor> {
    vec![
        mfma("V_MFMA_F32_32X32X1F32", 0x40, F32, F32, 32, 32, 1, 2, 64),
        mfma("V_MFMA_F32_16X16X1F32", 0x41, F32, F32, 16, 16, 1, 4, 32),
        mfma("V_MFMA_F32_4X4X1F32", 0x42, F32, F32, 4, 4, 1, 16, 8),
        mfma("V_MFMA_F32_32X32X2F32", 0x44, F32, F32, 32, 32, 2, 1, 64),
        mfma("V_MFMA_F32_16X16X4F32", 0x45, F32, F32, 16, 16, 4, 1, 32),
        mfma("V_MFMA_F32_32X32X4F16", 0x48, F16, F32, 32, 32, 4, 2, 64),
        mfma("V_MFMA_F32_16X16X4F16", 0x49, F16, F32, 16, 16, 4, 4, 32),
        mfma("V_MFMA_F32_4X4X4F16", 0x4a, F16, F32, 4, 4, 4, 16, 8),
        mfma("V_MFMA_F32_32X32X8F16", 0x4c, F16, F32, 32, 32, 8, 1, 64),
        mfma("V_MFMA_F32_16X16X16F16", 0x4d, F16, F32, 16, 16, 16, 1, 32),
        mfma("V_MFMA_I32_32X32X4I8", 0x50, I8, I32, 32, 32, 4, 2, 64),
        mfma("V_MFMA_I32_16X16X4I8", 0x51, I8, I32, 16, 16, 4, 4, 32),
        mfma("V_MFMA_I32_4X4X4I8", 0x52, I8, I32, 4, 4, 4, 16, 8),
        mfma("V_MFMA_I32_32X32X8I8", 0x54, I8, I32, 32, 32, 8, 1, 64),
        mfma("V_MFMA_I32_16X16X16I8", 0x54, I8, I32, 16, 16, 16, 1, 32),
        mfma("V_MFMA_F32_32X32X4BF16_1K", 0x63, Bf16, F32, 32, 32, 4, 2, 64),
        mfma("V_MFMA_F32_16X16X4BF16_1K", 0x64, Bf16, F32, 16, 16, 4, 4, 32),
        mfma("V_MFMA_F32_4X4X4BF16_1K", 0x65, Bf16, F32, 4, 4, 4, 16, 8),
        mfma("V_MFMA_F32_32X32X8BF16_1K", 0x66, Bf16, F32, 32, 32, 8, 1, 64),
        mfma("V_MFMA_F32_16X16X16BF16_1K", 0x67, Bf16, F32, 16, 16, 16, 1, 32),
        mfma("V_MFMA_F32_32X32X2BF16", 0x68, Bf16, F32, 32, 32, 2, 2, 64),
        mfma("V_MFMA_F32_16X16X2BF16", 0x69, Bf16, F32, 16, 16, 2, 4, 32),
        mfma("V_MFMA_F32_4X4X2BF16", 0x6b, Bf16, F32, 4, 4, 2, 16, 8),
        mfma("V_MFMA_F32_32X32X4BF16", 0x6c, Bf16, F32, 32, 32, 4, 1, 64),
        mfma("V_MFMA_F32_16X16X8BF16", 0x6d, Bf16, F32, 16, 16, 8, 1, 32),
        mfma("V_MFMA_F64_16X16X4F64", 0x6e, F64, F64, 16, 16, 4, 1, 32),
        mfma("V_MFMA_F64_4X4X4F64", 0x6f, F64, F64, 4, 4, 4, 4, 16),
    ]
}
