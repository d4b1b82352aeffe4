//! Plain-text rendering of wizard progress and strategy reports.

use omnistrat_core::{BusinessModel, Step, StrategyReport};

/// One-line progress bar: completed and current steps are marked.
pub fn render_progress(current: Step) -> String {
    Step::ALL
        .iter()
        .map(|s| {
            let mark = if s.index() <= current.index() { "x" } else { " " };
            format!("[{mark}] {}", s.title())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_models(selected: Option<BusinessModel>) -> String {
    let mut s = String::new();
    for (i, m) in BusinessModel::ALL.iter().enumerate() {
        let cursor = if selected == Some(*m) { '>' } else { ' ' };
        s.push_str(&format!("{cursor} {}. {:<9} {}\n", i + 1, m.title(), m.description()));
    }
    s
}

pub fn render_report(report: &StrategyReport) -> String {
    let v = &report.vision;
    let tam = &report.market_sizing;
    let pmf = &report.product_market_fit;
    let gtm = &report.go_to_market;

    let mut s = String::new();
    s.push_str(&format!("# {}\n\n", v.title));

    s.push_str("## Vision Document\n\n");
    field(&mut s, "Mission", &v.mission);
    field(&mut s, "Vision", &v.vision);
    field(&mut s, "North Star", &v.north_star);
    s.push_str(&format!("Core Values: {}\n\n", v.values.join(" · ")));

    s.push_str("## TAM Analysis\n\n");
    field(&mut s, "Total Market", &tam.total_market);
    field(&mut s, "Growth Rate", &tam.growth_rate);
    field(&mut s, "Serviceable Market", &tam.servicable_market);
    field(&mut s, "Reachable Market", &tam.reachable_market);
    bullets(&mut s, "Key Drivers", &tam.key_drivers);

    s.push_str("## PMF Playbook\n\n");
    field(&mut s, "Target Customer", &pmf.target_customer);
    field(&mut s, "Problem Statement", &pmf.problem_statement);
    field(&mut s, "Solution", &pmf.solution);
    field(&mut s, "Value Proposition", &pmf.value_proposition);
    numbered(&mut s, "Validation Steps", &pmf.validation_steps);

    s.push_str("## GTM Strategy\n\n");
    field(&mut s, "Strategy", &gtm.strategy);
    bullets(&mut s, "Channels", &gtm.channels);
    field(&mut s, "Pricing Model", &gtm.pricing);
    bullets(&mut s, "Timeline", &gtm.timeline);
    bullets(&mut s, "Key Metrics", &gtm.metrics);

    s
}

fn field(s: &mut String, label: &str, value: &str) {
    s.push_str(&format!("{label}: {value}\n"));
}

fn bullets(s: &mut String, label: &str, items: &[String]) {
    s.push_str(&format!("{label}:\n"));
    for item in items {
        s.push_str(&format!("- {item}\n"));
    }
    s.push('\n');
}

fn numbered(s: &mut String, label: &str, items: &[String]) {
    s.push_str(&format!("{label}:\n"));
    for (i, item) in items.iter().enumerate() {
        s.push_str(&format!("{}. {item}\n", i + 1));
    }
    s.push('\n');
}
