//! CDNA3 (gfx940-942, MI300 series) MFMA and SMFMAC instruction table.
//!
//! The generation renames the dense mnemonics (block counts become `_2B` /
//! `_4B` / `_16B` infixes), adds XF32 and the mixed FP8/BF8 products, turns
//! BLGP into a negate mask on the FP64 shapes, and introduces the sparse
//! SMFMAC family: A is the 4:2-compressed M x K/2 operand, Src2 carries the
//! compression index, and CBSZ/ABID select the index slot.

use super::{BlgpMode, CbszAbidMode, InstructionDescriptor, NegMode, OpselMode};
use crate::arch::Architecture;
use crate::types::ElementType;
use crate::types::ElementType::{Bf16, Bf8, F16, F32, F64, Fp8, I32, I8, Xf32};

fn base(
    mnemonic: &'static str,
    opcode: u8,
    a: ElementType,
    b: ElementType,
    out: ElementType,
    m: u32,
    n: u32,
    k: u32,
    blocks: u32,
    cycles: u32,
) -> InstructionDescriptor {
    InstructionDescriptor {
        mnemonic,
        arch: Architecture::Cdna3,
        opcode,
        src0: a,
        src1: b,
        out,
        m,
        n,
        k,
        blocks,
        cycles,
        integer: a == I8,
        c_d_arch: true,
        gpr_byte_align: 8,
        cbsz_abid: CbszAbidMode::Unsupported,
        blgp: BlgpMode::Unsupported,
        opsel: OpselMode::Unsupported,
        neg: NegMode::Unsupported,
        coexec: true,
        coexec_delay: 4,
        sparse: false,
    }
}

/// Dense MFMA. Lane-swizzle BLGP exists on the 16-bit and integer shapes;
/// CBSZ/ABID broadcast exists wherever there is more than one block.
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
    let mut inst = base(mnemonic, opcode, input, input, out, m, n, k, blocks, cycles);
    if blocks > 1 {
        inst.cbsz_abid = CbszAbidMode::Broadcast;
    }
    if matches!(input, F16 | Bf16 | I8) {
        inst.blgp = BlgpMode::LaneSwizzle;
    }
    inst
}

fn mfma_f64(
    mnemonic: &'static str,
    opcode: u8,
    m: u32,
    n: u32,
    k: u32,
    blocks: u32,
    cycles: u32,
) -> InstructionDescriptor {
    let mut inst = base(mnemonic, opcode, F64, F64, F64, m, n, k, blocks, cycles);
    inst.blgp = BlgpMode::F64Negate;
    inst.coexec = false;
    inst.coexec_delay = -1;
    inst
}

/// Mixed-input 8-bit float MFMA: Src0 and Src1 types come from the mnemonic.
fn mfma_fp8(
    mnemonic: &'static str,
    opcode: u8,
    a: ElementType,
    b: ElementType,
    m: u32,
    n: u32,
    k: u32,
    cycles: u32,
) -> InstructionDescriptor {
    base(mnemonic, opcode, a, b, F32, m, n, k, 1, cycles)
}

fn smfmac(
    mnemonic: &'static str,
    opcode: u8,
    a: ElementType,
    b: ElementType,
    out: ElementType,
    m: u32,
    n: u32,
    k: u32,
    cycles: u32,
) -> InstructionDescriptor {
    let mut inst = base(mnemonic, opcode, a, b, out, m, n, k, 1, cycles);
    inst.sparse = true;
    inst.cbsz_abid = CbszAbidMode::SparseSlot;
    inst
}

pub(super) fn instructions() -> Vec<InstructionDescriptor> {
    vec![
        mfma("V_MFMA_F32_32X32X1_2B_F32", 0x40, F32, F32, 32, 32, 1, 2, 64),
        mfma("V_MFMA_F32_16X16X1_4B_F32", 0x41, F32, F32, 16, 16, 1, 4, 32),
        mfma("V_MFMA_F32_4X4X1_16B_F32", 0x42, F32, F32, 4, 4, 1, 16, 8),
        mfma("V_MFMA_F32_32X32X2_F32", 0x44, F32, F32, 32, 32, 2, 1, 64),
        mfma("V_MFMA_F32_16X16X4_F32", 0x45, F32, F32, 16, 16, 4, 1, 32),
        mfma("V_MFMA_F32_16X16X8_XF32", 0x46, Xf32, F32, 16, 16, 8, 1, 16),
        mfma("V_MFMA_F32_32X32X4_XF32", 0x47, Xf32, F32, 32, 32, 4, 1, 32),
        mfma("V_MFMA_F32_32X32X4_2B_F16", 0x48, F16, F32, 32, 32, 4, 2, 64),
        mfma("V_MFMA_F32_16X16X4_4B_F16", 0x49, F16, F32, 16, 16, 4, 4, 32),
        mfma("V_MFMA_F32_4X4X4_16B_F16", 0x4a, F16, F32, 4, 4, 4, 16, 8),
        mfma("V_MFMA_F32_32X32X8_F16", 0x4c, F16, F32, 32, 32, 8, 1, 32),
        mfma("V_MFMA_F32_16X16X16_F16", 0x4d, F16, F32, 16, 16, 16, 1, 16),
        mfma("V_MFMA_I32_32X32X4_2B_I8", 0x50, I8, I32, 32, 32, 4, 2, 64),
        mfma("V_MFMA_I32_16X16X4_4B_I8", 0x51, I8, I32, 16, 16, 4, 4, 32),
        mfma("V_MFMA_I32_4X4X4_16B_I8", 0x52, I8, I32, 4, 4, 4, 16, 8),
        mfma("V_MFMA_I32_32X32X16_I8", 0x54, I8, I32, 32, 32, 16, 1, 32),
        mfma("V_MFMA_I32_16X16X32_I8", 0x55, I8, I32, 16, 16, 32, 1, 16),
        mfma("V_MFMA_F32_32X32X4_2B_BF16", 0x5d, Bf16, F32, 32, 32, 4, 2, 64),
        mfma("V_MFMA_F32_16X16X4_4B_BF16", 0x5e, Bf16, F32, 16, 16, 4, 4, 32),
        mfma("V_MFMA_F32_4X4X4_16B_BF16", 0x5f, Bf16, F32, 4, 4, 4, 16, 8),
        mfma("V_MFMA_F32_32X32X8_BF16", 0x60, Bf16, F32, 32, 32, 8, 1, 32),
        mfma("V_MFMA_F32_16X16X16_BF16", 0x61, Bf16, F32, 16, 16, 16, 1, 16),
        smfmac("V_SMFMAC_F32_16X16X32_F16", 0x62, F16, F16, F32, 16, 16, 32, 16),
        smfmac("V_SMFMAC_F32_32X32X16_F16", 0x64, F16, F16, F32, 32, 32, 16, 32),
        smfmac("V_SMFMAC_F32_16X16X32_BF16", 0x66, Bf16, Bf16, F32, 16, 16, 32, 16),
        smfmac("V_SMFMAC_F32_32X32X16_BF16", 0x68, Bf16, Bf16, F32, 32, 32, 16, 32),
        smfmac("V_SMFMAC_I32_16X16X64_I8", 0x6a, I8, I8, I32, 16, 16, 64, 16),
        smfmac("V_SMFMAC_I32_32X32X32_I8", 0x6c, I8, I8, I32, 32, 32, 32, 32),
        mfma_f64("V_MFMA_F64_16X16X4_F64", 0x6e, 16, 16, 4, 1, 32),
        mfma_f64("V_MFMA_F64_4X4X4_4B_F64", 0x6f, 4, 4, 4, 4, 16),
        mfma_fp8("V_MFMA_F32_16X16X32_BF8_BF8", 0x70, Bf8, Bf8, 16, 16, 32, 16),
        mfma_fp8("V_MFMA_F32_16X16X32_BF8_FP8", 0x71, Bf8, Fp8, 16, 16, 32, 16),
        mfma_fp8("V_MFMA_F32_16X16X32_FP8_BF8", 0x72, Fp8, Bf8, 16, 16, 32, 16),
        mfma_fp8("V_MFMA_F32_16X16X32_FP8_FP8", 0x73, Fp8, Fp8, 16, 16, 32, 16),
        mfma_fp8("V_MFMA_F32_32X32X16_BF8_BF8", 0x74, Bf8, Bf8, 32, 32, 16, 32),
        mfma_fp8("V_MFMA_F32_32X32X16_BF8_FP8", 0x75, Bf8, Fp8, 32, 32, 16, 32),
        mfma_fp8("V_MFMA_F32_32X32X16_FP8_BF8", 0x76, Fp8, Bf8, 32, 32, 16, 32),
        mfma_fp8("V_MFMA_F32_32X32X16_FP8_FP8", 0x77, Fp8, Fp8, 32, 32, 16, 32),
        smfmac("V_SMFMAC_F32_16X16X64_BF8_BF8", 0x78, Bf8, Bf8, F32, 16, 16, 64, 16),
        smfmac("V_SMFMAC_F32_16X16X64_BF8_FP8", 0x79, Bf8, Fp8, F32, 16, 16, 64, 16),
        smfmac("V_SMFMAC_F32_16X16X64_FP8_BF8", 0x7a, Fp8, Bf8, F32, 16, 16, 64, 16),
        smfmac("V_SMFMAC_F32_16X16X64_FP8_FP8", 0x7b, Fp8, Fp8, F32, 16, 16, 64, 16),
        smfmac("V_SMFMAC_F32_32X32X32_BF8_BF8", 0x7c, Bf8, Bf8, F32, 32, 32, 32, 32),
        smfmac("V_SMFMAC_F32_32X32X32_BF8_FP8", 0x7d, Bf8, Fp8, F32, 32, 32, 32, 32),
        smfmac("V_SMFMAC_F32_32X32X32_FP8_BF8", 0x7e, Fp8, Bf8, F32, 32, 32, 32, 32),
        smfmac("V_SMFMAC_F32_32X32X32_FP8_FP8", 0x7f, Fp8, Fp8, F32, 32, 32, 32, 32),
    ]
}
