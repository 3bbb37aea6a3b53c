//! The five rule stages applied, in order, by [`crate::manager::EnergyManager`].

pub mod budget;
pub mod climate;
pub mod night;
pub mod price;
pub mod schedule_override;

pub use budget::{BudgetEnforcer, ShedOutcome};
pub use climate::ClimateRule;
pub use night::NightPolicy;
pub use price::PriceRule;
pub use schedule_override::ScheduleOverride;
