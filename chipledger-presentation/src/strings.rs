pub const PLAYER: &str = "Player";
pub const PHONE: &str = "Phone";
pub const DAYS_PLAYED: &str = "Days";
pub const PL: &str = "P/L";
pub const FROM: &str = "From";
pub const TO: &str = "To";
pub const AMOUNT: &str = "Amount";
pub const STATUS: &str = "Status";
pub const PAID: &str = "Paid";
pub const PENDING: &str = "Pending";
pub const NO_PLAYERS: &str = "No player data found.";
pub const NO_SETTLEMENTS: &str = "Everyone is square; no payments needed.";
pub const TOTAL_WINNINGS: &str = "Total winnings";
pub const TOTAL_LOSSES: &str = "Total losses";
pub const UNSETTLED_WARNING: &str = "Warning: winnings and losses do not balance. Unsettled:";

pub fn event_heading(event: &str) -> String {
    format!("== {event} ==")
}
