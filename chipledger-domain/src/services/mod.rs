pub mod pl_calculator;
pub mod settlement_calculator;
pub mod settlement_rounding;

pub use pl_calculator::{PlCalculationError, PlCalculator};
pub use settlement_calculator::SettlementCalculator;
pub use settlement_rounding::{
    MAX_SETTLEMENT_SCALE, RoundingMode, SettlementContext, SettlementContextError, round_money,
};
