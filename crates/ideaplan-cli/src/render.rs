//! Output rendering for `ideaplan plan`.

use clap::ValueEnum;
use serde::Serialize;

use ideaplan_core::timeline::PhaseWindow;
use ideaplan_core::{Phase, Plan, Strategy, format_duration};

/// Output format for a rendered plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Toml,
}

/// Serializable view of a plan for JSON and TOML output.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub idea_name: &'a str,
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_days: Option<u32>,
    pub remainder_days: u32,
    pub phases: &'a [Phase],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<&'a [PhaseWindow]>,
}

impl<'a> PlanReport<'a> {
    pub fn new(idea_name: &'a str, plan: &'a Plan, calendar: Option<&'a [PhaseWindow]>) -> Self {
        Self {
            idea_name,
            strategy: plan.strategy,
            total_days: plan.total_days,
            remainder_days: plan.remainder_days,
            phases: &plan.phases,
            calendar,
        }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        let out = match format {
            OutputFormat::Text => self.to_text(),
            OutputFormat::Json => {
                let mut s = serde_json::to_string_pretty(self)?;
                s.push('\n');
                s
            }
            OutputFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(out)
    }

    fn to_text(&self) -> String {
        let mut out = format!("{} ({} plan", self.idea_name, self.strategy);
        if let Some(total) = self.total_days {
            out.push_str(&format!(", {}", format_duration(total)));
        }
        out.push_str(")\n");

        for (i, phase) in self.phases.iter().enumerate() {
            out.push_str(&format!("\n{}. {}\n", i + 1, phase.name));
            if let Some(window) = self.calendar.and_then(|c| c.get(i)) {
                out.push_str(&format!("   {} -> {}\n", window.starts_on, window.ends_on));
            }
            for task in &phase.tasks {
                out.push_str(&format!("   - {task}\n"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use ideaplan_core::timeline::project_onto;
    use ideaplan_core::{Duration, Partitioner};
    use ideaplan_test_utils::task_pool;

    use super::*;

    fn plan(days: Option<u32>, strategy: Strategy) -> Plan {
        Partitioner::default()
            .plan(days.map(Duration::days), &task_pool(3), strategy)
            .unwrap()
    }

    #[test]
    fn text_lists_phases_and_tasks() {
        let plan = plan(None, Strategy::Waterfall);
        let text = PlanReport::new("Recipe Box", &plan, None)
            .render(OutputFormat::Text)
            .unwrap();

        assert!(text.starts_with("Recipe Box (waterfall plan)\n"), "got: {text}");
        assert!(text.contains("\n3. Development Phase\n   - Task 1\n   - Task 2\n   - Task 3\n"));
        assert!(text.contains("5. Deployment Phase"));
    }

    #[test]
    fn text_includes_total_and_dates() {
        let plan = plan(Some(30), Strategy::Agile);
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let calendar = project_onto(&plan, start).unwrap();
        let text = PlanReport::new("Recipe Box", &plan, Some(&calendar))
            .render(OutputFormat::Text)
            .unwrap();

        assert!(text.starts_with("Recipe Box (agile plan, 1 month)\n"), "got: {text}");
        assert!(text.contains("1. Sprint 1 - Planning (5 days)\n   2026-01-05 -> 2026-01-09\n"));
    }

    #[test]
    fn json_output_parses_back() {
        let plan = plan(Some(100), Strategy::Waterfall);
        let json = PlanReport::new("Recipe Box", &plan, None)
            .render(OutputFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["idea_name"], "Recipe Box");
        assert_eq!(value["total_days"], 100);
        assert_eq!(value["phases"].as_array().unwrap().len(), 5);
        assert_eq!(value["phases"][2]["days"], 45);
        assert!(value.get("calendar").is_none());
    }

    #[test]
    fn toml_output_parses_back() {
        let plan = plan(Some(14), Strategy::Agile);
        let start = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let calendar = project_onto(&plan, start).unwrap();
        let out = PlanReport::new("Recipe Box", &plan, Some(&calendar))
            .render(OutputFormat::Toml)
            .unwrap();

        let value: toml::Table = toml::from_str(&out).unwrap();
        assert_eq!(value["strategy"].as_str(), Some("agile"));
        assert_eq!(value["phases"].as_array().unwrap().len(), 6);
        assert_eq!(value["calendar"].as_array().unwrap().len(), 6);
    }
}
