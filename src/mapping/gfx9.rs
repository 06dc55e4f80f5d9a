//! CDNA (gfx9) register layouts: MFMA inputs and outputs, FP64 register
//! pairs, and the CDNA3 sparse compression index.

use crate::catalog::InstructionDescriptor;
use crate::types::{Matrix, Modifiers, RegName};

/// Input-matrix layout. `outer` is M for A (and `cols` its stored column
/// count) or N for B; `idx` is the row of A or the column of B.
///
/// A wave's worth of contiguous register storage walks the K dimension first
/// within a lane, then the outer dimension and blocks across lanes.
pub fn input(
    inst: &InstructionDescriptor,
    outer: u32,
    cols: u32,
    idx: u32,
    k: u32,
    block: u32,
    data_bits: u32,
) -> (RegName, Vec<u32>) {
    // Elements of one lane's contiguous registers: walking k moves through
    // them before moving to the lanes of the next k group.
    let per_lane = cols / (64 / (outer * inst.blocks));
    let slot = k % per_lane;
    let lane = block * outer + (k / per_lane) * outer * inst.blocks + idx;
    (RegName::from_slot(data_bits, slot), vec![lane])
}

/// Output-matrix layout: 32-bit results are written as 4-row multirows N
/// lanes wide; 64-bit results are 1 register-pair tall.
pub fn output(inst: &InstructionDescriptor, i: u32, j: u32, block: u32) -> (RegName, Vec<u32>) {
    let data_bits = inst.out.bits();
    let m = inst.m;
    let n = inst.n;
    let multirow_height = if data_bits == 64 { 1 } else { 4 };
    let multirows_per_reg = 64 / n;
    let per_multirow = (n * m) / multirow_height;
    let blocks_per_reg = (64 + per_multirow - 1) / per_multirow;

    let mut slot = block * (m * n / 64);
    slot += (i / (multirow_height * multirows_per_reg)) * multirow_height;
    slot += i % multirow_height;

    let mut lane = (block % blocks_per_reg) * n;
    lane += ((i / multirow_height) % multirows_per_reg) * blocks_per_reg * n;
    lane += j;
    (RegName::from_slot(data_bits, slot), vec![lane])
}

/// Compression-index layout (SMFMAC). Each lane group carries the 4-bit
/// index-pair fields for its K range; ABID picks the byte or half-word slot
/// of the 32-bit index register, and a non-zero CBSZ forces slot 0.
pub fn index_field(
    inst: &InstructionDescriptor,
    i: u32,
    k: u32,
    mods: &Modifiers,
) -> (RegName, Vec<u32>) {
    let lane_groups = 64 / inst.m;
    let k_per_lane = inst.k / lane_groups;
    let lane = i + inst.m * (k / k_per_lane);
    let slot_bits = 4 * (k_per_lane / 4);
    let slot = if mods.cbsz == 0 { mods.abid } else { 0 };
    let base = slot_bits * slot;
    let nib = (k % k_per_lane) / 4;
    (
        RegName::field(0, base + 4 * nib, base + 4 * nib + 3),
        vec![lane],
    )
}

// ---------------------------------------------------------------------------
// Formula text for the instruction detail report. These mirror the numeric
// rules above for the zero-modifier case.
// ---------------------------------------------------------------------------

pub fn input_reg_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    let bits = inst.input_type(matrix).bits();
    let cols = if matrix == Matrix::A {
        inst.a_cols()
    } else {
        inst.k
    };
    let gprs = super::gpr_count(inst, matrix);
    match (bits, gprs) {
        (32, 1) => "0".to_string(),
        (64, _) => "[1:0]".to_string(),
        (32, 2) => "(k % 2)".to_string(),
        (16, 1) if cols == 2 => "0.[16*k+15 : 16*k]".to_string(),
        (16, 1) => "0.[16*(k % 2)+15 : 16*(k % 2)]".to_string(),
        (8, 1) if cols <= 4 => "0.[8*k+7 : 8*k]".to_string(),
        (8, 1) => "0.[8*(k % 4)+7 : 8*(k % 4)]".to_string(),
        (16, 2) if cols <= 4 => "floor(k / 2).[16*(k % 2)+15 : 16*(k % 2)]".to_string(),
        (16, 2) if cols <= 16 => "(floor(k / 2) % 2).[16*(k % 2)+15 : 16*(k % 2)]".to_string(),
        (8, 2) => "(floor(k / 4) % 2).[8*(k % 4)+7 : 8*(k % 4)]".to_string(),
        (16, _) => "(k % 4).[16*(k % 2)+15 : 16*(k % 2)]".to_string(),
        (8, _) => "(floor(k / 4) % 4).[8*(k % 4)+7 : 8*(k % 4)]".to_string(),
        _ => "Unknown".to_string(),
    }
}

pub fn output_reg_eqn(inst: &InstructionDescriptor) -> String {
    let (m, n, blocks) = (inst.m, inst.n, inst.blocks);
    if inst.out.bits() == 64 {
        return match blocks {
            1 => "[2*floor(i / 4)+1 : 2*floor(i / 4)]".to_string(),
            _ => "[1:0]".to_string(),
        };
    }
    match (m, n, blocks) {
        (4, 4, 16) => "i".to_string(),
        (16, 16, 4) => "4 * block + (i % 4)".to_string(),
        (16, 16, 1) => "(i % 4)".to_string(),
        (32, 32, 2) => "16 * block + 4 * floor(i / 8) + (i % 4)".to_string(),
        (32, 32, 1) => "4 * floor(i / 8) + (i % 4)".to_string(),
        _ => "Unknown".to_string(),
    }
}

pub fn lane_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    let (m, n, blocks) = (inst.m, inst.n, inst.blocks);
    match matrix {
        Matrix::A | Matrix::B | Matrix::K => {
            let outer = if matrix == Matrix::B { n } else { m };
            let cols = if matrix == Matrix::A {
                inst.a_cols()
            } else {
                inst.k
            };
            let mut s = if blocks > 1 {
                format!("{outer} * block + ")
            } else {
                String::new()
            };
            if outer * blocks < 64 {
                let div = (outer * cols * blocks) / 64;
                s.push_str(&(outer * blocks).to_string());
                if div == 1 {
                    s.push_str(" * k + ");
                } else {
                    s.push_str(&format!(" * floor(k / {div}) + "));
                }
            }
            s.push(if matrix == Matrix::B { 'j' } else { 'i' });
            s
        }
        Matrix::C | Matrix::D => {
            let mut s = String::new();
            if inst.out.bits() != 64 {
                if (n * m) / 4 > 64 {
                    s.push_str(&format!("({n} * floor(i / 4)) % 64 + "));
                } else if (n * m) / 4 == 64 {
                    s.push_str(&format!("{n} * floor(i / 4) + "));
                }
            } else {
                s.push_str("16 * (i % 4) + ");
            }
            if m * n < 64 {
                s.push_str(&format!("{n} * block + "));
            }
            s.push('j');
            s
        }
    }
}

pub fn inv_i_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    match matrix {
        Matrix::A | Matrix::K => format!("(lane % {})", inst.m),
        Matrix::B => "Unknown".to_string(),
        Matrix::C | Matrix::D => {
            if inst.out.bits() != 64 {
                let mut s = String::new();
                if inst.m > 16 {
                    s.push_str("(8 * floor(GPR_num / 4) % 32) + ");
                }
                if inst.m != 4 {
                    s.push_str(&format!("4 * floor(lane / {}) + ", inst.m));
                }
                s.push_str("(GPR_num % 4)");
                s
            } else {
                let per_block = 4 / inst.blocks;
                if per_block > 1 {
                    format!("{per_block} * floor(GPR_num / 2)")
                } else {
                    "floor(lane / 16)".to_string()
                }
            }
        }
    }
}

pub fn inv_j_eqn(inst: &InstructionDescriptor) -> String {
    format!("(lane % {})", inst.m)
}

pub fn inv_k_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    if matrix == Matrix::K {
        let lane_groups = 64 / inst.m;
        let k_per_lane = inst.k / lane_groups;
        return format!(
            "{k_per_lane} * floor(lane / {}) + 4 * floor(GPR_bits / 4)",
            inst.m
        );
    }
    let data_bits = inst.input_type(matrix).bits();
    let cols = if matrix == Matrix::A {
        inst.a_cols()
    } else {
        inst.k
    };
    if cols == 1 {
        return "0".to_string();
    }
    if data_bits == 64 {
        return "floor(lane / 16)".to_string();
    }
    let gprs = super::gpr_count(inst, matrix);
    let k_per_reg = 32 / data_bits;
    let k_per_lane_skip = k_per_reg * gprs;
    let mut s = String::new();
    if k_per_lane_skip != 1 && k_per_lane_skip < cols {
        s.push_str(&format!("{k_per_lane_skip} * "));
    }
    if k_per_lane_skip < cols {
        s.push_str(&format!("floor(lane / {})", inst.m));
    }
    if k_per_reg != 1 {
        if !s.is_empty() {
            s.push_str(" + ");
        }
        if gprs > 1 {
            s.push_str(&format!("{k_per_reg} * GPR_num + "));
        }
        s.push_str(&format!("floor(GPR_bits / {data_bits})"));
    } else if gprs > 1 {
        s.push_str(" + GPR_num");
    }
    s
}

pub fn inv_block_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    if inst.blocks == 1 {
        return "0".to_string();
    }
    match matrix {
        Matrix::A | Matrix::B | Matrix::K => {
            let mut s = format!("floor(lane / {})", inst.m);
            if inst.input_type(matrix).bits() == 64 {
                s = format!("({s} % 4)");
            }
            s
        }
        Matrix::C | Matrix::D => {
            let out_gprs = super::gpr_count(inst, Matrix::D);
            let per_block = out_gprs / inst.blocks;
            let mut s = if per_block == 0 {
                format!("floor(lane / {})", inst.m)
            } else {
                format!("floor(GPR_num / {per_block})")
            };
            if inst.out.bits() == 64 {
                s = format!("({s} % 4)");
            }
            s
        }
    }
}

/// Index-register formula text for the detail report.
pub fn index_eqns(inst: &InstructionDescriptor) -> (String, String) {
    let lane_groups = 64 / inst.m;
    let k_per_lane = inst.k / lane_groups;
    let slot_bits = 4 * (k_per_lane / 4);
    let gpr = format!(
        "0.[{slot_bits}*ABID + 4*floor((k % {k_per_lane}) / 4)+3 : {slot_bits}*ABID + 4*floor((k % {k_per_lane}) / 4)]"
    );
    let lane = format!("i + {} * floor(k / {k_per_lane})", inst.m);
    (gpr, lane)
}
