//! Engine options.

use crate::recursion::RecursionProfile;
use mapgen_common::limits;
use serde::{Deserialize, Serialize};

/// How target names are matched against source candidate names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameMatching {
    /// Ignore case, but prefer a candidate whose case matches exactly.
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

/// Options that change what the engine produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingOptions {
    pub name_matching: NameMatching,
    /// Match `HomeAddressCity` against `HomeAddress.City`.
    pub flatten_members: bool,
    /// Nesting depth after which branches are left unmapped.
    pub max_depth: u32,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            name_matching: NameMatching::CaseInsensitive,
            flatten_members: true,
            max_depth: limits::DEFAULT_MAX_MAPPING_DEPTH,
        }
    }
}

impl MappingOptions {
    pub fn recursion_profile(&self) -> RecursionProfile {
        if self.max_depth == limits::DEFAULT_MAX_MAPPING_DEPTH {
            RecursionProfile::NestedMapping
        } else {
            RecursionProfile::Custom {
                max_depth: self.max_depth,
                max_iterations: limits::MAX_MAPPING_ITERATIONS,
            }
        }
    }
}
