use getset::CopyGetters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Safety margin on the lowest rating listed in a table, in hundredths.
/// Empirical; lowering it only extends tables downwards.
pub const DEFAULT_LOWER_MARGIN: u16 = 95;

/// How many `+0.1` steps the next-target search looks ahead.
pub const DEFAULT_SMART_SEARCH_STEPS: usize = 5;

#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Default, TypedBuilder, CopyGetters, Serialize, Deserialize,
)]
#[getset(get_copy = "pub")]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    #[builder(default)]
    table: TableConfig,
    #[serde(default)]
    #[builder(default)]
    next_target: NextTargetConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, TypedBuilder, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    #[serde(default = "default_lower_margin")]
    #[builder(default = DEFAULT_LOWER_MARGIN)]
    lower_margin: u16,
}
impl Default for TableConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
fn default_lower_margin() -> u16 {
    DEFAULT_LOWER_MARGIN
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, TypedBuilder, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
#[serde(deny_unknown_fields)]
pub struct NextTargetConfig {
    #[serde(default = "default_smart_search_steps")]
    #[builder(default = DEFAULT_SMART_SEARCH_STEPS)]
    smart_search_steps: usize,
}
impl Default for NextTargetConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
fn default_smart_search_steps() -> usize {
    DEFAULT_SMART_SEARCH_STEPS
}
