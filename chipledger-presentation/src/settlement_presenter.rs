use crate::{
    format_amount, strings,
    text_table::{Alignment, TextTableBuilder},
};
use chipledger_application::EventSettlement;
use std::{borrow::Cow, fmt::Write};

pub struct SettlementPresenter;

impl SettlementPresenter {
    /// Renders amounts with `scale` decimal places.
    pub fn render(settlement: &EventSettlement, scale: u32) -> String {
        let mut out = String::new();

        if settlement.settlements.is_empty() {
            out.push_str(strings::NO_SETTLEMENTS);
            out.push('\n');
        } else {
            let headers = [
                Cow::Borrowed(strings::FROM),
                Cow::Borrowed(strings::TO),
                Cow::Borrowed(strings::AMOUNT),
                Cow::Borrowed(strings::STATUS),
            ];
            let alignments = [
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
            ];

            let table = TextTableBuilder::new()
                .alignments(&alignments)
                .headers(&headers)
                .rows(settlement.settlements.iter().map(|entry| {
                    vec![
                        Cow::Borrowed(entry.from.as_str()),
                        Cow::Borrowed(entry.to.as_str()),
                        Cow::Owned(format_amount(entry.amount, scale)),
                        Cow::Borrowed(if entry.paid {
                            strings::PAID
                        } else {
                            strings::PENDING
                        }),
                    ]
                }))
                .build();
            out.push_str(&table);
        }

        let _ = writeln!(
            out,
            "{}: {}",
            strings::TOTAL_WINNINGS,
            format_amount(settlement.total_winnings, scale)
        );
        let _ = writeln!(
            out,
            "{}: {}",
            strings::TOTAL_LOSSES,
            format_amount(settlement.total_losses, scale)
        );

        if !settlement.unsettled.is_empty() {
            out.push_str(strings::UNSETTLED_WARNING);
            out.push('\n');
            for balance in &settlement.unsettled {
                let remaining = format_amount(balance.remaining, scale);
                let _ = writeln!(out, "  {}: {remaining}", balance.name);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipledger_application::{SettlementEntry, UnsettledEntry};
    use chipledger_domain::Money;
    use rstest::{fixture, rstest};

    #[fixture]
    fn settlement() -> EventSettlement {
        EventSettlement {
            event: "Friday".to_string(),
            settlements: vec![
                SettlementEntry {
                    from: "Charlie".to_string(),
                    to: "Alice".to_string(),
                    amount: Money::from_i64(80),
                    paid: true,
                },
                SettlementEntry {
                    from: "David".to_string(),
                    to: "Bob".to_string(),
                    amount: Money::new(505, 1),
                    paid: false,
                },
            ],
            total_winnings: Money::new(1305, 1),
            total_losses: Money::new(1305, 1),
            unsettled: Vec::new(),
        }
    }

    #[rstest]
    fn renders_transfers_with_status(settlement: EventSettlement) {
        let output = SettlementPresenter::render(&settlement, 2);

        assert_eq!(
            output,
            "From     To     Amount  Status\n\
             -------------------------------\n\
             Charlie  Alice   80.00  Paid\n\
             David    Bob     50.50  Pending\n\
             Total winnings: 130.50\n\
             Total losses: 130.50\n"
        );
    }

    #[rstest]
    fn warns_about_unsettled_balances(mut settlement: EventSettlement) {
        settlement.unsettled = vec![UnsettledEntry {
            name: "Alice".to_string(),
            remaining: Money::from_i64(30),
        }];

        let output = SettlementPresenter::render(&settlement, 2);
        assert!(output.ends_with(
            "Warning: winnings and losses do not balance. Unsettled:\n  Alice: 30.00\n"
        ));
    }

    #[test]
    fn square_event_says_so() {
        let settlement = EventSettlement {
            event: "Quiet".to_string(),
            settlements: Vec::new(),
            total_winnings: Money::ZERO,
            total_losses: Money::ZERO,
            unsettled: Vec::new(),
        };

        let output = SettlementPresenter::render(&settlement, 2);
        assert!(output.starts_with(strings::NO_SETTLEMENTS));
    }
}
