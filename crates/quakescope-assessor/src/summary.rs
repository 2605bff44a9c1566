//! Plain-text historical context built from nearby events.
//!
//! The headline is returned to the client as `historical_context_summary`;
//! the headline plus one line per event is embedded in the prompt.

use quakescope_catalog::ScoredEvent;

/// Text summary of the events near a query coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalContext {
    /// One-line summary, e.g. `Found 3 historical earthquakes within 100 km of the location.`
    pub headline: String,
    /// One line per event, closest first.
    pub detail_lines: Vec<String>,
}

impl HistoricalContext {
    /// Number of events described.
    pub fn event_count(&self) -> usize {
        self.detail_lines.len()
    }

    /// Headline and detail lines joined into a single block.
    pub fn to_text(&self) -> String {
        let mut text = self.headline.clone();
        for line in &self.detail_lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

/// Summarise `nearby` events found within `radius_km`.
pub fn historical_context(nearby: &[ScoredEvent<'_>], radius_km: f64) -> HistoricalContext {
    let headline = format!(
        "Found {} historical earthquakes within {radius_km} km of the location.",
        nearby.len()
    );
    let detail_lines = nearby.iter().map(describe).collect();

    HistoricalContext {
        headline,
        detail_lines,
    }
}

/// `- M5.0 on 2024-01-01 00:00 UTC, 12.3 km away, depth 8.0 km (10 km N of Town)`
fn describe(scored: &ScoredEvent<'_>) -> String {
    let event = scored.event;
    let depth = event
        .depth
        .map_or_else(|| "depth unknown".to_owned(), |d| format!("depth {d:.1} km"));
    let mut line = format!(
        "- M{:.1} on {}, {:.1} km away, {depth}",
        event.magnitude,
        event.timestamp.format("%Y-%m-%d %H:%M UTC"),
        scored.distance_km,
    );
    if let Some(place) = &event.place {
        line.push_str(" (");
        line.push_str(place);
        line.push(')');
    }
    line
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use quakescope_types::SeismicEvent;

    use super::*;

    fn event(depth: Option<f64>, place: Option<&str>) -> SeismicEvent {
        let t = DateTime::from_timestamp_millis(1_704_067_200_000).unwrap();
        let mut event = SeismicEvent::new(t, 34.05, -118.25, 5.0);
        event.depth = depth;
        event.place = place.map(ToOwned::to_owned);
        event
    }

    #[test]
    fn headline_counts_events() {
        let a = event(Some(8.0), Some("Downtown"));
        let nearby = [ScoredEvent {
            event: &a,
            distance_km: 0.0,
        }];
        let context = historical_context(&nearby, 100.0);
        assert!(context.headline.starts_with("Found 1 historical earthquakes"));
        assert_eq!(
            context.headline,
            "Found 1 historical earthquakes within 100 km of the location."
        );
        assert_eq!(context.event_count(), 1);
    }

    #[test]
    fn detail_line_format() {
        let a = event(Some(8.0), Some("Downtown"));
        let b = event(None, None);
        let nearby = [
            ScoredEvent {
                event: &a,
                distance_km: 0.0,
            },
            ScoredEvent {
                event: &b,
                distance_km: 12.345,
            },
        ];
        let context = historical_context(&nearby, 100.0);
        assert_eq!(
            context.detail_lines,
            vec![
                "- M5.0 on 2024-01-01 00:00 UTC, 0.0 km away, depth 8.0 km (Downtown)".to_owned(),
                "- M5.0 on 2024-01-01 00:00 UTC, 12.3 km away, depth unknown".to_owned(),
            ]
        );
        assert_eq!(context.to_text().lines().count(), 3);
    }

    #[test]
    fn empty_context() {
        let context = historical_context(&[], 50.0);
        assert_eq!(
            context.headline,
            "Found 0 historical earthquakes within 50 km of the location."
        );
        assert!(context.detail_lines.is_empty());
        assert_eq!(context.to_text(), context.headline);
    }
}
