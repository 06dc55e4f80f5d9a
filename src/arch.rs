//! Architecture registry: canonical generation names, accepted aliases, and
//! per-generation facts such as wave size and encoding family.

use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One accelerator architecture generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    Cdna1,
    Cdna2,
    Cdna3,
    Rdna3,
    Rdna4,
}

impl Architecture {
    pub const ALL: [Architecture; 5] = [
        Architecture::Cdna1,
        Architecture::Cdna2,
        Architecture::Cdna3,
        Architecture::Rdna3,
        Architecture::Rdna4,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Architecture::Cdna1 => "CDNA1",
            Architecture::Cdna2 => "CDNA2",
            Architecture::Cdna3 => "CDNA3",
            Architecture::Rdna3 => "RDNA3",
            Architecture::Rdna4 => "RDNA4",
        }
    }

    /// Accepted alternative names: generation names, gfx IDs, codenames, and
    /// chip marketing names. Matching is case-insensitive.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Architecture::Cdna1 => &["cdna1", "cdna", "gfx908", "arcturus", "mi100"],
            Architecture::Cdna2 => &[
                "cdna2", "gfx90a", "aldebaran", "mi200", "mi210", "mi250", "mi250x",
            ],
            Architecture::Cdna3 => &[
                "cdna3",
                "gfx940",
                "gfx941",
                "gfx942",
                "aqua_vanjaram",
                "mi300",
                "mi300a",
                "mi300x",
                "mi325x",
            ],
            Architecture::Rdna3 => &[
                "rdna3", "gfx1100", "gfx1101", "gfx1102", "gfx1103", "gfx1150", "gfx1151",
                "gfx1152", "gfx1153",
            ],
            Architecture::Rdna4 => &["rdna4", "gfx1200", "gfx1201"],
        }
    }

    /// Resolves any accepted alias to its generation, case-insensitively.
    pub fn resolve(name: &str) -> Result<Architecture> {
        let wanted = name.trim().to_ascii_lowercase();
        for arch in Architecture::ALL {
            if arch.aliases().contains(&wanted.as_str()) {
                return Ok(arch);
            }
        }
        Err(CalcError::InvalidArch {
            name: name.to_string(),
            available: Architecture::ALL
                .iter()
                .map(|a| a.canonical_name())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// SIMD lanes per wavefront.
    pub fn wave_size(self) -> u32 {
        match self {
            Architecture::Cdna1 | Architecture::Cdna2 | Architecture::Cdna3 => 64,
            Architecture::Rdna3 | Architecture::Rdna4 => 32,
        }
    }

    /// CDNA generations share the gfx9 MFMA register layout family.
    pub fn is_gfx9(self) -> bool {
        matches!(
            self,
            Architecture::Cdna1 | Architecture::Cdna2 | Architecture::Cdna3
        )
    }

    /// Name of the compute-unit grouping used in throughput reporting.
    pub fn cu_name(self) -> &'static str {
        if self.is_gfx9() {
            "CU"
        } else {
            "WGP"
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_names() {
        for arch in Architecture::ALL {
            assert_eq!(Architecture::resolve(arch.canonical_name()).unwrap(), arch);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(
            Architecture::resolve("Aldebaran").unwrap(),
            Architecture::Cdna2
        );
        assert_eq!(Architecture::resolve("MI300X").unwrap(), Architecture::Cdna3);
        assert_eq!(Architecture::resolve("GFX1100").unwrap(), Architecture::Rdna3);
    }

    #[test]
    fn test_resolve_marketing_and_gfx_ids() {
        assert_eq!(Architecture::resolve("mi100").unwrap(), Architecture::Cdna1);
        assert_eq!(Architecture::resolve("gfx90a").unwrap(), Architecture::Cdna2);
        assert_eq!(Architecture::resolve("gfx942").unwrap(), Architecture::Cdna3);
        assert_eq!(Architecture::resolve("gfx1201").unwrap(), Architecture::Rdna4);
        assert_eq!(Architecture::resolve("cdna").unwrap(), Architecture::Cdna1);
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert!(matches!(
            Architecture::resolve("gfx600"),
            Err(CalcError::InvalidArch { .. })
        ));
    }

    #[test]
    fn test_wave_sizes() {
        assert_eq!(Architecture::Cdna1.wave_size(), 64);
        assert_eq!(Architecture::Cdna3.wave_size(), 64);
        assert_eq!(Architecture::Rdna3.wave_size(), 32);
        assert_eq!(Architecture::Rdna4.wave_size(), 32);
    }
}
