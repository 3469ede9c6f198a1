use chrono::NaiveDate;

use crate::domain::EventKind;

/// URL template for one tournament page variant
///
/// mtggoldfish publishes each event at:
///   https://www.mtggoldfish.com/tournament/{slug}-{YYYY-MM-DD}#online
///
/// Challenges have run under several slugs, so the challenge kind keeps
/// every known slug in priority order and the resolver walks the list
/// until one of them carries a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlTemplate {
    pub slug: &'static str,
}

impl UrlTemplate {
    pub const fn new(slug: &'static str) -> Self {
        Self { slug }
    }

    pub fn url_for(&self, base_url: &str, date: NaiveDate) -> String {
        format!(
            "{}/tournament/{}-{}#online",
            base_url,
            self.slug,
            date.format("%Y-%m-%d")
        )
    }
}

const LEAGUE_TEMPLATES: &[UrlTemplate] = &[UrlTemplate::new("pauper-league")];

const CHALLENGE_TEMPLATES: &[UrlTemplate] = &[
    UrlTemplate::new("pauper-challenge-32"),
    UrlTemplate::new("pauper-challenge-64"),
    UrlTemplate::new("pauper-showcase-challenge"),
];

/// Page address templates to try for an event kind, in priority order
pub fn templates_for(kind: EventKind) -> &'static [UrlTemplate] {
    match kind {
        EventKind::League => LEAGUE_TEMPLATES,
        EventKind::Challenge => CHALLENGE_TEMPLATES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_league_template_url() {
        let template = templates_for(EventKind::League)[0];
        let url = template.url_for("https://www.mtggoldfish.com", date(2024, 3, 10));

        assert_eq!(
            url,
            "https://www.mtggoldfish.com/tournament/pauper-league-2024-03-10#online"
        );
    }

    #[test]
    fn test_challenge_templates_keep_priority_order() {
        let slugs: Vec<&str> = templates_for(EventKind::Challenge)
            .iter()
            .map(|t| t.slug)
            .collect();

        assert_eq!(
            slugs,
            vec![
                "pauper-challenge-32",
                "pauper-challenge-64",
                "pauper-showcase-challenge"
            ]
        );
    }

    #[test]
    fn test_league_has_a_single_template() {
        assert_eq!(templates_for(EventKind::League).len(), 1);
    }
}
