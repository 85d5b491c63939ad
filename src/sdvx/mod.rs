//! Volforce ("VF") of SOUND VOLTEX: forward rating, grade tiers, and the inverse
//! "how much score do I need" questions built on top of it.

pub mod config;
pub mod grade;
pub mod next_target;
pub mod rating;
pub mod rating_table;
pub mod required_score;
pub mod schema;
