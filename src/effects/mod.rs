//! Effect resolution - synergy, item, weather and terrain rule tables
//!
//! Every effect is a row of data:
//! - `synergy`, `items`, `weather` hold the tables
//! - `pipeline` applies them to one unit at placement
//! - `post` runs the roster-wide pass once both sides are placed

pub mod constants;
pub mod effect;
pub mod items;
pub mod mutation;
pub mod pipeline;
pub mod post;
pub mod synergy;
pub mod weather;

pub use effect::{Effect, EffectSet};
pub use items::{Item, ItemSet, BASIC_ITEMS, ROLLABLE_ITEMS};
pub use mutation::{EffectRule, Mutation};
pub use pipeline::{resolve_unit, team_rule};
pub use post::{apply_post_effects, debuff_tier, tier_shield};
pub use synergy::{summon_count, Synergy, SynergyLevels};
pub use weather::{Terrain, Weather, STORM_IMMUNE_TYPE};
