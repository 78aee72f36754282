use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::{
    fmt,
    ops::{Neg, Sub, SubAssign},
    str::FromStr,
};

/// Number of day slots a session record carries.
pub const DAY_SLOTS: usize = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_u32(value: u32) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn signum(self) -> i64 {
        if self.0.is_zero() {
            0
        } else if self.0.is_sign_negative() {
            -1
        } else {
            1
        }
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn checked_mul(self, rhs: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(rhs)).map(Self)
    }

    /// Sum that reports overflow instead of panicking.
    pub fn checked_sum<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        values
            .into_iter()
            .try_fold(Self::ZERO, |acc, value| acc.checked_add(value))
    }

    pub fn round_dp(self, scale: u32, strategy: RoundingStrategy) -> Self {
        Self(self.0.round_dp_with_strategy(scale, strategy).normalize())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// A single day's ending-stack slot as entered by a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DayReading {
    #[default]
    Empty,
    Number(Decimal),
    Text(String),
}

impl DayReading {
    pub fn number(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether the slot holds anything at all.
    pub fn is_filled(&self) -> bool {
        match self {
            DayReading::Empty => false,
            DayReading::Number(_) => true,
            DayReading::Text(text) => !text.trim().is_empty(),
        }
    }

    /// Numeric value of the slot, or `None` when the slot is empty or does
    /// not hold a number.
    pub fn value(&self) -> Option<Money> {
        match self {
            DayReading::Empty => None,
            DayReading::Number(value) => Some(Money(*value)),
            DayReading::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .ok()
                    .map(Money)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerSessionRecord {
    pub name: String,
    pub phone: Option<String>,
    /// Starting stack; also the price of one buy-in.
    pub start: Option<Money>,
    pub buyins: Option<u32>,
    /// `days[0]` is day 1.
    pub days: [DayReading; DAY_SLOTS],
}

impl PlayerSessionRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: Money) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_buyins(mut self, buyins: u32) -> Self {
        self.buyins = Some(buyins);
        self
    }

    /// Sets a day slot by its 1-based day number. Out-of-range days are ignored.
    pub fn with_day(mut self, day: usize, reading: DayReading) -> Self {
        if let Some(slot) = day.checked_sub(1).and_then(|idx| self.days.get_mut(idx)) {
            *slot = reading;
        }
        self
    }

    pub fn day(&self, day: usize) -> Option<&DayReading> {
        day.checked_sub(1).and_then(|idx| self.days.get(idx))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerResult<'a> {
    pub name: &'a str,
    pub pl: Money,
    pub days_played: u8,
}

impl<'a> PlayerResult<'a> {
    pub fn new(name: &'a str, pl: Money) -> Self {
        Self {
            name,
            pl,
            days_played: 0,
        }
    }
}

/// A directed payment from a losing player to a winning player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

/// Balance left over after the greedy merge ran out of counterparties.
/// Positive: still owed to the player. Negative: still owed by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct UnsettledBalance<'a> {
    pub name: &'a str,
    pub remaining: Money,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SettlementPlan<'a> {
    pub transfers: Vec<Transfer<'a>>,
    pub unsettled: Vec<UnsettledBalance<'a>>,
}

impl SettlementPlan<'_> {
    pub fn is_balanced(&self) -> bool {
        self.unsettled.is_empty()
    }

    /// `None` when the amounts do not fit in a `Money`.
    pub fn total_transferred(&self) -> Option<Money> {
        Money::checked_sum(self.transfers.iter().map(|transfer| transfer.amount))
    }
}
