//! Replay summary
//!
//! Plain-text report of what was replayed and what the final document says.

use crate::replay::ReplayStats;
use ets2_telemetry_core::{Document, JobState};
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct Summary {
    pub stats: ReplayStats,
    pub snapshots: usize,
    pub job_state: JobState,
    pub document: Document,
}

impl Summary {
    pub fn render(&self) -> String {
        let doc = &self.document;
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "═══════════════════════════════════════════════");
        let _ = writeln!(out, "  Telemetry Replay Summary");
        let _ = writeln!(out, "═══════════════════════════════════════════════\n");

        let _ = writeln!(out, "Host calls:  {}", self.stats.total());
        let _ = writeln!(out, "  Channels:      {}", self.stats.channel_updates);
        let _ = writeln!(out, "  Configuration: {}", self.stats.configuration_events);
        let _ = writeln!(out, "  Gameplay:      {}", self.stats.gameplay_events);
        let _ = writeln!(out, "  Started/paused: {}", self.stats.state_events);
        let _ = writeln!(out, "Snapshots:   {}", self.snapshots);

        let _ = writeln!(out, "\nGame:        {} {}", doc.game.game_name, doc.game.version);
        let _ = writeln!(out, "  Time:      {}{}", doc.game.time, if doc.game.paused { " (paused)" } else { "" });

        let _ = writeln!(out, "\nTruck:       {} {}", doc.truck.make, doc.truck.model);
        let _ = writeln!(out, "  Speed:     {} km/h", doc.truck.speed);
        let _ = writeln!(
            out,
            "  Gear:      {} (best {})",
            doc.shifter.displayed_gear_name, doc.shifter.best_gear_name
        );

        let _ = writeln!(out, "\nTrailers:    {}", doc.trailer_count);
        for trailer in doc.trailers.values().filter(|t| t.present) {
            let _ = writeln!(
                out,
                "  #{} {} {}{}",
                trailer.trailer_number,
                trailer.brand,
                trailer.name,
                if trailer.attached { " (attached)" } else { "" }
            );
        }

        let job = match self.job_state {
            JobState::OnJob => format!(
                "{} to {} (remaining {})",
                doc.cargo.cargo, doc.job.destination_city, doc.job.remaining_time
            ),
            JobState::Idle => "none".to_string(),
        };
        let _ = writeln!(out, "\nJob:         {}", job);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_summary() {
        let mut document = Document::new();
        document.game.game_name = "ETS2".to_string();
        document.truck.speed = 88;
        document.trailer_count = 1;
        if let Some(trailer) = document.trailers.get_mut(&0) {
            trailer.present = true;
            trailer.brand = "Krone".to_string();
        }

        let summary = Summary {
            stats: ReplayStats {
                channel_updates: 10,
                configuration_events: 2,
                gameplay_events: 1,
                state_events: 1,
            },
            snapshots: 4,
            job_state: JobState::Idle,
            document,
        };

        let text = summary.render();
        assert!(text.contains("Host calls:  14"));
        assert!(text.contains("Snapshots:   4"));
        assert!(text.contains("88 km/h"));
        assert!(text.contains("#0 Krone"));
        assert!(text.contains("Job:         none"));
    }
}
