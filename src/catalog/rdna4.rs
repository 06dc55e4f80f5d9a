//! RDNA4 (gfx12xx) WMMA and SWMMAC instruction table.
//!
//! Wave32. Unlike RDNA3, inputs are split across the half-waves instead of
//! duplicated, and 16-bit outputs are packed two rows per register. The
//! sparse SWMMAC family keeps its compression index in one half-wave of a
//! single Src2 register, with OPSEL selecting which half-wave.

use super::{BlgpMode, CbszAbidMode, InstructionDescriptor, NegMode, OpselMode};
use crate::arch::Architecture;
use crate::types::ElementType;
use crate::types::ElementType::{Bf16, Bf8, F16, F32, Fp8, I32, Iu4, Iu8};

fn base(
    mnemonic: &'static str,
    opcode: u8,
    a: ElementType,
    b: ElementType,
    out: ElementType,
    k: u32,
    cycles: u32,
) -> InstructionDescriptor {
    let integer = matches!(a, Iu8 | Iu4);
    let fp8 = matches!(a, Fp8 | Bf8);
    InstructionDescriptor {
        mnemonic,
        arch: Architecture::Rdna4,
        opcode,
        src0: a,
        src1: b,
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
        opsel: OpselMode::Unsupported,
        neg: if integer {
            NegMode::IntegerSignedness
        } else if fp8 {
            NegMode::Unsupported
        } else {
            NegMode::FloatNegAbs
        },
        coexec: false,
        coexec_delay: -1,
        sparse: false,
    }
}

fn wmma(
    mnemonic: &'static str,
    opcode: u8,
    a: ElementType,
    b: ElementType,
    out: ElementType,
    k: u32,
    cycles: u32,
) -> InstructionDescriptor {
    base(mnemonic, opcode, a, b, out, k, cycles)
}

fn swmmac(
    mnemonic: &'static str,
    opcode: u8,
    a: ElementType,
    b: ElementType,
    out: ElementType,
    k: u32,
    cycles: u32,
) -> InstructionDescriptor {
    let mut inst = base(mnemonic, opcode, a, b, out, k, cycles);
    inst.sparse = true;
    // A K=64 index needs all 32 lanes of its register, leaving no alternate
    // half-wave for OPSEL to select.
    if k <= 32 {
        inst.opsel = OpselMode::SparseIndexSet;
    }
    inst
}

pub(super) fn instructions() -> Vec<InstructionDescriptor> {
    vec![
        wmma("V_WMMA_F32_16X16X16_F16", 0x40, F16, F16, F32, 16, 16),
        wmma("V_WMMA_F32_16X16X16_BF16", 0x41, Bf16, Bf16, F32, 16, 16),
        wmma("V_WMMA_F16_16X16X16_F16", 0x42, F16, F16, F16, 16, 16),
        wmma("V_WMMA_BF16_16X16X16_BF16", 0x43, Bf16, Bf16, Bf16, 16, 16),
        wmma("V_WMMA_I32_16X16X16_IU8", 0x44, Iu8, Iu8, I32, 16, 16),
        wmma("V_WMMA_I32_16X16X16_IU4", 0x45, Iu4, Iu4, I32, 16, 8),
        wmma("V_WMMA_F32_16X16X16_FP8_FP8", 0x46, Fp8, Fp8, F32, 16, 16),
        wmma("V_WMMA_F32_16X16X16_FP8_BF8", 0x47, Fp8, Bf8, F32, 16, 16),
        wmma("V_WMMA_F32_16X16X16_BF8_FP8", 0x48, Bf8, Fp8, F32, 16, 16),
        wmma("V_WMMA_F32_16X16X16_BF8_BF8", 0x49, Bf8, Bf8, F32, 16, 16),
        wmma("V_WMMA_I32_16X16X32_IU4", 0x4a, Iu4, Iu4, I32, 32, 16),
        swmmac("V_SWMMAC_F32_16X16X32_F16", 0x50, F16, F16, F32, 32, 32),
        swmmac("V_SWMMAC_F32_16X16X32_BF16", 0x51, Bf16, Bf16, F32, 32, 32),
        swmmac("V_SWMMAC_F16_16X16X32_F16", 0x52, F16, F16, F16, 32, 32),
        swmmac("V_SWMMAC_BF16_16X16X32_BF16", 0x53, Bf16, Bf16, Bf16, 32, 32),
        swmmac("V_SWMMAC_F32_16X16X32_FP8_FP8", 0x54, Fp8, Fp8, F32, 32, 32),
        swmmac("V_SWMMAC_F32_16X16X32_FP8_BF8", 0x55, Fp8, Bf8, F32, 32, 32),
        swmmac("V_SWMMAC_F32_16X16X32_BF8_FP8", 0x56, Bf8, Fp8, F32, 32, 32),
        swmmac("V_SWMMAC_F32_16X16X32_BF8_BF8", 0x57, Bf8, Bf8, F32, 32, 32),
        swmmac("V_SWMMAC_I32_16X16X32_IU8", 0x58, Iu8, Iu8, I32, 32, 32),
        swmmac("V_SWMMAC_I32_16X16X64_IU4", 0x59, Iu4, Iu4, I32, 64, 32),
    ]
}
