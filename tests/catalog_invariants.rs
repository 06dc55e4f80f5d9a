//! Catalog-wide structural invariants: the startup self-check plus explicit
//! round-trip, coverage, and dimensional assertions over every instruction.

use mmacalc::mapping::{self, RegisterIndex};
use mmacalc::{catalog, Architecture, Matrix, Modifiers};
use std::collections::BTreeSet;

#[test]
fn self_check_passes_for_the_whole_catalog() {
    catalog().self_check().unwrap();
}

#[test]
fn forward_and_inverse_agree_everywhere() {
    let mods = Modifiers::default();
    for arch in Architecture::ALL {
        for inst in catalog().instructions(arch) {
            for matrix in inst.legal_matrices() {
                let index = RegisterIndex::build(inst, matrix, &mods).unwrap();
                for coord in mapping::coordinate_space(inst, matrix) {
                    let entry = mapping::locate(
                        inst, matrix, coord.i, coord.j, coord.k, coord.block, &mods,
                    )
                    .unwrap();
                    for &lane in &entry.lanes {
                        let found = index.coordinates_at(&entry.reg, lane);
                        assert!(
                            found.contains(&coord),
                            "{} {matrix}: inverse of {} misses {:?}",
                            inst.mnemonic,
                            entry.reg.with_lane(lane),
                            coord
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn distinct_coordinates_use_distinct_storage() {
    let mods = Modifiers::default();
    for arch in Architecture::ALL {
        for inst in catalog().instructions(arch) {
            for matrix in [Matrix::A, Matrix::B, Matrix::C, Matrix::D] {
                if !inst.supports_matrix(matrix) {
                    continue;
                }
                let mut seen = BTreeSet::new();
                for coord in mapping::coordinate_space(inst, matrix) {
                    let entry = mapping::locate(
                        inst, matrix, coord.i, coord.j, coord.k, coord.block, &mods,
                    )
                    .unwrap();
                    for &lane in &entry.lanes {
                        assert!(
                            seen.insert((entry.reg.gpr_lo, lane, entry.reg.bits)),
                            "{} {matrix}: storage collision at {}",
                            inst.mnemonic,
                            entry.reg.with_lane(lane)
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn dimensional_bounds_hold() {
    let mods = Modifiers::default();
    for arch in Architecture::ALL {
        for inst in catalog().instructions(arch) {
            for matrix in inst.legal_matrices() {
                let gprs = mapping::gpr_count(inst, matrix);
                let index = RegisterIndex::build(inst, matrix, &mods).unwrap();
                let max_gpr = index
                    .registers()
                    .iter()
                    .map(|r| r.gpr_hi)
                    .max()
                    .unwrap();
                assert_eq!(
                    max_gpr,
                    gprs - 1,
                    "{} {matrix}: register budget mismatch",
                    inst.mnemonic
                );
            }
        }
    }
}

#[test]
fn wave_sizes_bound_every_lane() {
    let mods = Modifiers::default();
    for arch in Architecture::ALL {
        let wave = arch.wave_size();
        for inst in catalog().instructions(arch) {
            for matrix in inst.legal_matrices() {
                let mut max_lane = 0;
                for coord in mapping::coordinate_space(inst, matrix) {
                    let entry = mapping::locate(
                        inst, matrix, coord.i, coord.j, coord.k, coord.block, &mods,
                    )
                    .unwrap();
                    max_lane = max_lane.max(*entry.lanes.iter().max().unwrap());
                }
                assert!(max_lane < wave, "{} {matrix}", inst.mnemonic);
                // Dense matrices fill the wave exactly.
                if matrix != Matrix::K {
                    assert_eq!(max_lane, wave - 1, "{} {matrix}", inst.mnemonic);
                }
            }
        }
    }
}

#[test]
fn opcodes_are_unique_within_each_architecture() {
    for arch in Architecture::ALL {
        let mut seen: BTreeSet<(u8, &str)> = BTreeSet::new();
        let mut opcodes: BTreeSet<u8> = BTreeSet::new();
        for inst in catalog().instructions(arch) {
            assert!(
                seen.insert((inst.opcode, inst.mnemonic)),
                "duplicate row {} on {arch}",
                inst.mnemonic
            );
            opcodes.insert(inst.opcode);
        }
        // CDNA1 shares opcode 0x54 between two I8 shapes (a quirk of the
        // published tables), so only require near-uniqueness.
        let total = catalog().instructions(arch).len();
        assert!(
            opcodes.len() + 1 >= total,
            "too many duplicate opcodes on {arch}"
        );
    }
}
