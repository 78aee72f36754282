use crate::{
    format_amount, strings,
    text_table::{Alignment, TextTableBuilder},
};
use chipledger_application::PlayerStanding;
use std::borrow::Cow;

pub struct StandingsPresenter;

impl StandingsPresenter {
    /// Renders P/L with `scale` decimal places and an explicit `+` for winners.
    pub fn render(event: &str, standings: &[PlayerStanding], scale: u32) -> String {
        let mut out = strings::event_heading(event);
        out.push('\n');

        if standings.is_empty() {
            out.push_str(strings::NO_PLAYERS);
            out.push('\n');
            return out;
        }

        let headers = [
            Cow::Borrowed(strings::PLAYER),
            Cow::Borrowed(strings::PHONE),
            Cow::Borrowed(strings::DAYS_PLAYED),
            Cow::Borrowed(strings::PL),
        ];
        let alignments = [
            Alignment::Left,
            Alignment::Left,
            Alignment::Right,
            Alignment::Right,
        ];

        let table = TextTableBuilder::new()
            .alignments(&alignments)
            .headers(&headers)
            .rows(standings.iter().map(|standing| {
                vec![
                    Cow::Borrowed(standing.name.as_str()),
                    Cow::Borrowed(standing.phone.as_deref().unwrap_or("")),
                    Cow::Owned(standing.days_played.to_string()),
                    Cow::Owned(format_signed(standing, scale)),
                ]
            }))
            .build();
        out.push_str(&table);
        out
    }
}

fn format_signed(standing: &PlayerStanding, scale: u32) -> String {
    let amount = format_amount(standing.pl, scale);
    if standing.pl.signum() > 0 {
        format!("+{amount}")
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipledger_domain::Money;

    #[test]
    fn renders_signed_pl() {
        let standings = vec![
            PlayerStanding {
                name: "Alice".to_string(),
                phone: None,
                pl: Money::from_i64(15),
                days_played: 1,
            },
            PlayerStanding {
                name: "Bob".to_string(),
                phone: Some("555".to_string()),
                pl: Money::new(-1850, 2),
                days_played: 3,
            },
        ];

        let output = StandingsPresenter::render("Friday", &standings, 2);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "== Friday ==");
        assert_eq!(lines[1], "Player  Phone  Days     P/L");
        assert_eq!(lines[3], "Alice             1  +15.00");
        assert_eq!(lines[4], "Bob     555       3  -18.50");
    }

    #[test]
    fn empty_event_has_placeholder() {
        let output = StandingsPresenter::render("Friday", &[], 2);
        assert_eq!(output, "== Friday ==\nNo player data found.\n");
    }
}
