mod config;
mod levels;
mod milestones;
mod rate;

pub use config::RateConfig;
pub use levels::{level_info, LevelInfo};
pub use milestones::{
    actions_to_million, percent_to_target, perk_odds, ActionsToMillion, PerkOdds, MILLION,
    TEN_MILLION,
};
pub use rate::{estimate_rates, RateEstimate};
