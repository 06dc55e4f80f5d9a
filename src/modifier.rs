//! Modifier engine: validation plus the input remaps and output annotations
//! for CBSZ, ABID, BLGP, OPSEL, NEG, and NEG_HI.
//!
//! Every modifier is either a pre-map rewrite of the caller's block/lane or a
//! post-map annotation (sign, bit range); none of them touch the base mapping
//! arithmetic. Structural legality is checked before range legality, and a
//! legal-but-inert modifier produces a warning rather than an error.

use crate::catalog::{BlgpMode, CbszAbidMode, InstructionDescriptor, NegMode, OpselMode};
use crate::error::{CalcError, Result};
use crate::mapping;
use crate::types::{Matrix, Modifiers, RegName, Sign};

/// CBSZ broadcasts one block to its 2^CBSZ aligned neighbors; ABID picks the
/// block that is broadcast. Maps the block a calculation would normally read
/// to the block it reads after the broadcast.
pub fn broadcast_block(block: u32, cbsz: u32, abid: u32) -> u32 {
    let group = 1u32 << cbsz;
    (block / group) * group + abid
}

/// Maps a consuming lane to the lane whose B-matrix value it reads under the
/// eight BLGP patterns: identity, half-wave broadcasts, a quarter-wave
/// rotation, and the four quarter-group broadcasts.
pub fn blgp_source_lane(lane: u32, blgp: u32, wave: u32) -> u32 {
    let half = wave / 2;
    let quarter = wave / 4;
    match blgp {
        1 => lane % half,
        2 => {
            if lane < half {
                lane + half
            } else {
                lane
            }
        }
        3 => (lane + quarter) % wave,
        4..=7 => lane % quarter + (blgp - 4) * quarter,
        _ => lane,
    }
}

fn unsupported(inst: &InstructionDescriptor, modifier: &'static str) -> CalcError {
    CalcError::UnsupportedModifier {
        mnemonic: inst.mnemonic.to_string(),
        modifier,
    }
}

fn out_of_range(
    inst: &InstructionDescriptor,
    modifier: &'static str,
    value: u32,
    legal: String,
) -> CalcError {
    CalcError::ModifierOutOfRange {
        mnemonic: inst.mnemonic.to_string(),
        modifier,
        value,
        legal,
    }
}

fn no_effect(modifier: &str, matrix: Matrix) -> String {
    format!("{modifier} has no effect on a {matrix}-matrix query and is ignored")
}

/// Validates the whole modifier bundle against one instruction and the
/// matrix being queried. Returns the warnings to surface for accepted
/// modifiers that cannot affect the chosen matrix.
pub fn validate(
    inst: &InstructionDescriptor,
    matrix: Matrix,
    mods: &Modifiers,
    output_calc: bool,
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if mods.cbsz > 0 || mods.abid > 0 {
        let named: &'static str = if mods.cbsz > 0 { "CBSZ" } else { "ABID" };
        match inst.cbsz_abid {
            CbszAbidMode::Unsupported => return Err(unsupported(inst, named)),
            CbszAbidMode::Broadcast => {
                let max_cbsz = inst.blocks.ilog2().min(4);
                if mods.cbsz > max_cbsz {
                    return Err(out_of_range(
                        inst,
                        "CBSZ",
                        mods.cbsz,
                        format!("CBSZ may only contain values between 0 and {max_cbsz}, inclusive"),
                    ));
                }
                let max_abid = (1u32 << mods.cbsz) - 1;
                if mods.abid > max_abid {
                    let legal = if max_abid == 0 {
                        "with CBSZ 0, ABID may only be set to zero".to_string()
                    } else {
                        format!(
                            "with CBSZ {}, ABID may only contain values between 0 and {max_abid}, inclusive",
                            mods.cbsz
                        )
                    };
                    return Err(out_of_range(inst, "ABID", mods.abid, legal));
                }
                if !matches!(matrix, Matrix::A) && !(matrix == Matrix::D && output_calc) {
                    warnings.push(no_effect("CBSZ/ABID broadcast", matrix));
                }
            }
            CbszAbidMode::SparseSlot => {
                if mods.cbsz > 4 {
                    return Err(out_of_range(
                        inst,
                        "CBSZ",
                        mods.cbsz,
                        "CBSZ may only contain values between 0 and 4, inclusive".to_string(),
                    ));
                }
                let max_abid = if mods.cbsz == 0 {
                    32 / mapping::index_slot_bits(inst) - 1
                } else {
                    // Non-zero CBSZ forces index slot 0; ABID is accepted but
                    // ignored.
                    3
                };
                if mods.abid > max_abid {
                    return Err(out_of_range(
                        inst,
                        "ABID",
                        mods.abid,
                        format!("ABID may only contain values between 0 and {max_abid}, inclusive"),
                    ));
                }
                if matrix != Matrix::K {
                    warnings.push(no_effect("the sparse index slot select (CBSZ/ABID)", matrix));
                }
            }
        }
    }

    if mods.blgp > 0 {
        match inst.blgp {
            BlgpMode::Unsupported => return Err(unsupported(inst, "BLGP")),
            BlgpMode::LaneSwizzle | BlgpMode::F64Negate => {
                if mods.blgp > 7 {
                    return Err(out_of_range(
                        inst,
                        "BLGP",
                        mods.blgp,
                        "BLGP may only contain values between 0 and 7, inclusive".to_string(),
                    ));
                }
            }
        }
        match inst.blgp {
            BlgpMode::LaneSwizzle => {
                if matrix != Matrix::B && !(matrix == Matrix::D && output_calc) {
                    warnings.push(no_effect("BLGP", matrix));
                }
            }
            BlgpMode::F64Negate => {
                let relevant = match matrix {
                    Matrix::A => mods.blgp & 0x1 != 0,
                    Matrix::B => mods.blgp & 0x2 != 0,
                    Matrix::C => mods.blgp & 0x4 != 0,
                    Matrix::D => output_calc,
                    Matrix::K => false,
                };
                if !relevant {
                    warnings.push(no_effect("the BLGP negate mask", matrix));
                }
            }
            BlgpMode::Unsupported => unreachable!(),
        }
    }

    if mods.opsel > 0 {
        match inst.opsel {
            OpselMode::Unsupported => return Err(unsupported(inst, "OPSEL")),
            OpselMode::OutputHalf => {
                if mods.opsel != 4 {
                    return Err(out_of_range(
                        inst,
                        "OPSEL",
                        mods.opsel,
                        "this instruction only supports the OPSEL values 0 and 4".to_string(),
                    ));
                }
                if !matches!(matrix, Matrix::C | Matrix::D) {
                    warnings.push(no_effect("OPSEL", matrix));
                }
            }
            OpselMode::SparseIndexSet => {
                if mods.opsel > 1 {
                    return Err(out_of_range(
                        inst,
                        "OPSEL",
                        mods.opsel,
                        "this instruction only supports the OPSEL values 0 and 1".to_string(),
                    ));
                }
                if matrix != Matrix::K {
                    warnings.push(no_effect("the sparse index set select (OPSEL)", matrix));
                }
            }
        }
    }

    if mods.neg > 0 || mods.neg_hi > 0 {
        let named: &'static str = if mods.neg > 0 { "NEG" } else { "NEG_HI" };
        match inst.neg {
            NegMode::Unsupported => return Err(unsupported(inst, named)),
            NegMode::IntegerSignedness => {
                if mods.neg & 0x4 != 0 {
                    return Err(out_of_range(
                        inst,
                        "NEG",
                        mods.neg,
                        "NEG[2] must be zero for integer instructions".to_string(),
                    ));
                }
                if mods.neg > 7 {
                    return Err(out_of_range(
                        inst,
                        "NEG",
                        mods.neg,
                        "NEG may only contain values between 0 and 7, inclusive".to_string(),
                    ));
                }
                if mods.neg_hi != 0 {
                    return Err(out_of_range(
                        inst,
                        "NEG_HI",
                        mods.neg_hi,
                        "NEG_HI must be zero for integer instructions".to_string(),
                    ));
                }
                warnings.push(
                    "NEG selects signed/unsigned operand interpretation on integer \
                     instructions and does not change the register mapping"
                        .to_string(),
                );
            }
            NegMode::FloatNegAbs => {
                if mods.neg > 7 {
                    return Err(out_of_range(
                        inst,
                        "NEG",
                        mods.neg,
                        "NEG may only contain values between 0 and 7, inclusive".to_string(),
                    ));
                }
                if mods.neg_hi > 7 {
                    return Err(out_of_range(
                        inst,
                        "NEG_HI",
                        mods.neg_hi,
                        "NEG_HI may only contain values between 0 and 7, inclusive".to_string(),
                    ));
                }
                let bit = match matrix {
                    Matrix::A => Some(0x1),
                    Matrix::B => Some(0x2),
                    Matrix::C => Some(0x4),
                    Matrix::D | Matrix::K => None,
                };
                let relevant = match bit {
                    Some(bit) => (mods.neg | mods.neg_hi) & bit != 0,
                    None => matrix == Matrix::D && output_calc,
                };
                if !relevant {
                    warnings.push(no_effect("NEG/NEG_HI", matrix));
                }
            }
        }
    }

    Ok(warnings)
}

/// Sign annotation for one located entry: NEG/NEG_HI on RDNA floating point,
/// and the FP64 BLGP negate mask on CDNA3.
pub fn sign_for(
    inst: &InstructionDescriptor,
    matrix: Matrix,
    reg: &RegName,
    mods: &Modifiers,
) -> Sign {
    let mut sign = Sign::Positive;

    if inst.blgp == BlgpMode::F64Negate {
        let negated = match matrix {
            Matrix::A => mods.blgp & 0x1 != 0,
            Matrix::B => mods.blgp & 0x2 != 0,
            Matrix::C => mods.blgp & 0x4 != 0,
            _ => false,
        };
        if negated {
            sign = sign.negated();
        }
    }

    if inst.neg == NegMode::FloatNegAbs {
        match matrix {
            Matrix::A | Matrix::B => {
                let bit = if matrix == Matrix::A { 0x1 } else { 0x2 };
                // NEG flips the low 16-bit half of each input register,
                // NEG_HI the high half.
                let lo_half = reg.bits == Some((0, 15));
                let hi_half = reg.bits == Some((16, 31));
                if (mods.neg & bit != 0 && lo_half) || (mods.neg_hi & bit != 0 && hi_half) {
                    sign = sign.negated();
                }
            }
            Matrix::C => {
                // Absolute value first, then negation.
                if mods.neg_hi & 0x4 != 0 {
                    sign = Sign::Absolute;
                }
                if mods.neg & 0x4 != 0 {
                    sign = sign.negated();
                }
            }
            Matrix::D | Matrix::K => {}
        }
    }

    sign
}
