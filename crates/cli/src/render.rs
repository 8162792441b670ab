//! `sdui render`: draws decoded components as terminal text or Markdown.
//!
//! Components are drawn strictly in payload order. Every kind has its own
//! drawing routine and the dispatch `match` has no wildcard arm, so adding
//! a kind without a renderer fails to compile.

use sdui_components::{
    BannerComponent, ButtonComponent, CardComponent, ChartComponent, Component,
    DashboardComponent, Item, ProductComponent, ProfileComponent, SettingsComponent, Transaction,
};

/// Text shown in place of the UI when the payload cannot be loaded.
pub const FALLBACK_MESSAGE: &str = "Error: Failed to load UI components.";

/// Width of a full (100%) chart bar, in cells.
const BAR_WIDTH: usize = 20;

/// Output format for the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Terminal,
    Markdown,
}

/// Render every component, in order, separated by blank lines.
pub fn render(components: &[Component], format: RenderFormat) -> String {
    let mut out = String::new();

    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match component {
            Component::Banner(b) => render_banner(&mut out, format, b),
            Component::Card(c) => render_card(&mut out, format, c),
            Component::Button(b) => render_button(&mut out, format, b),
            Component::Product(p) => render_product(&mut out, format, p),
            Component::Transaction(t) => render_transaction(&mut out, format, t),
            Component::Dashboard(d) => render_dashboard(&mut out, format, d),
            Component::Chart(c) => render_chart(&mut out, format, c),
            Component::Profile(p) => render_profile(&mut out, format, p),
            Component::Settings(s) => render_settings(&mut out, format, s),
        }
    }

    out
}

/// The fallback screen shown when decoding fails.
pub fn render_failure(format: RenderFormat) -> String {
    match format {
        RenderFormat::Terminal => format!("\x1b[31m{}\x1b[0m\n", FALLBACK_MESSAGE),
        RenderFormat::Markdown => format!("> **{}**\n", FALLBACK_MESSAGE),
    }
}

/// One-line description of a component, used by `sdui decode`.
pub fn summarize(component: &Component) -> String {
    match component {
        Component::Banner(b) => format!("\"{}\" until {}", b.title, b.countdown),
        Component::Card(c) => format!("\"{}\"", c.title),
        Component::Button(b) => format!("\"{}\" -> {}", b.text, b.action),
        Component::Product(p) => format!("\"{}\" at {}", p.title, p.price),
        Component::Transaction(t) => format!("\"{}\" {} on {}", t.title, t.amount, t.date),
        Component::Dashboard(d) => format!(
            "balance {} with {} transaction(s)",
            d.balance,
            d.transactions.len()
        ),
        Component::Chart(c) => format!("\"{}\" with {} point(s)", c.title, c.data.len()),
        Component::Profile(p) => format!("\"{}\" with {} stat(s)", p.name, p.stats.len()),
        Component::Settings(s) => {
            let items: usize = s.sections.iter().map(|sec| sec.items.len()).sum();
            format!("{} section(s), {} item(s)", s.sections.len(), items)
        }
    }
}

// ─── Components ──────────────────────────────────────────────────────────────

fn render_banner(out: &mut String, format: RenderFormat, banner: &BannerComponent) {
    heading(out, format, &banner.title);
    emit_line(out, format, &banner.description);
    emit_dim(out, format, &format!("Offer ends: {}", banner.countdown));
}

fn render_card(out: &mut String, format: RenderFormat, card: &CardComponent) {
    emit_line(out, format, &styled_name(format, &card.title));
    emit_line(out, format, &card.description);
    emit_dim(out, format, &format!("Image: {}", card.image_url));
}

fn render_button(out: &mut String, format: RenderFormat, button: &ButtonComponent) {
    let label = button_label(format, &button.text, Some(button.action.as_str()));
    emit_line(out, format, &label);
}

fn render_product(out: &mut String, format: RenderFormat, product: &ProductComponent) {
    emit_line(out, format, &styled_name(format, &product.title));
    emit_line(out, format, &product.description);
    emit_line(
        out,
        format,
        &format!(
            "{}  {}",
            styled_name(format, &product.price),
            button_label(format, "Add to Cart", None)
        ),
    );
}

fn render_transaction(out: &mut String, format: RenderFormat, transaction: &Transaction) {
    emit_line(out, format, &transaction_line(format, transaction));
}

fn render_dashboard(out: &mut String, format: RenderFormat, dashboard: &DashboardComponent) {
    emit_dim(out, format, "Total Balance");
    emit_line(out, format, &styled_name(format, &dashboard.balance));
    out.push('\n');
    emit_line(out, format, &styled_name(format, "Recent Transactions"));
    for transaction in &dashboard.transactions {
        emit_line(out, format, &transaction_line(format, transaction));
    }
}

fn render_chart(out: &mut String, format: RenderFormat, chart: &ChartComponent) {
    emit_line(out, format, &styled_name(format, &chart.title));

    let label_width = chart
        .data
        .iter()
        .enumerate()
        .map(|(i, _)| chart_label(chart, i).chars().count())
        .max()
        .unwrap_or(0);

    if format == RenderFormat::Markdown {
        out.push_str("```\n");
    }
    for (i, value) in chart.data.iter().enumerate() {
        out.push_str(&format!(
            "{:<width$} | {} {}\n",
            chart_label(chart, i),
            bar(*value),
            value,
            width = label_width
        ));
    }
    if format == RenderFormat::Markdown {
        out.push_str("```\n");
    }
}

fn render_profile(out: &mut String, format: RenderFormat, profile: &ProfileComponent) {
    heading(out, format, &profile.name);
    emit_line(out, format, &profile.bio);
    emit_dim(out, format, &format!("Avatar: {}", profile.avatar));

    let stats: Vec<String> = profile
        .stats
        .iter()
        .map(|(label, count)| format!("{} {}", styled_name(format, &count.to_string()), label))
        .collect();
    if !stats.is_empty() {
        emit_line(out, format, &stats.join("  "));
    }
}

fn render_settings(out: &mut String, format: RenderFormat, settings: &SettingsComponent) {
    for (i, section) in settings.sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_line(out, format, &styled_name(format, &section.title));
        for item in &section.items {
            render_item(out, format, item);
        }
    }
}

fn render_item(out: &mut String, format: RenderFormat, item: &Item) {
    let control = match item.item_type.as_str() {
        "toggle" => {
            if item.is_enabled() {
                "[on]".to_string()
            } else {
                "[off]".to_string()
            }
        }
        "input" => item.value.clone().unwrap_or_default(),
        _ => ">".to_string(),
    };

    let prefix = match format {
        RenderFormat::Terminal => "  ",
        RenderFormat::Markdown => "- ",
    };
    emit_line(out, format, &format!("{}{}  {}", prefix, item.title, control));

    // No subtitle line at all when the server sent none.
    if let Some(subtitle) = &item.subtitle {
        emit_dim(out, format, &format!("{}{}", indent(2), subtitle));
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn transaction_line(format: RenderFormat, transaction: &Transaction) -> String {
    format!(
        "{}  {}  {}",
        transaction.title,
        dim(format, &transaction.date),
        styled_name(format, &transaction.amount)
    )
}

fn chart_label(chart: &ChartComponent, i: usize) -> String {
    chart
        .labels
        .get(i)
        .cloned()
        .unwrap_or_else(|| format!("#{}", i + 1))
}

/// Values are on a 0-100 scale; anything outside is clamped for drawing.
fn bar(value: f64) -> String {
    let fraction = if value.is_finite() {
        (value / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{00b7}".repeat(BAR_WIDTH - filled)
    )
}

fn button_label(format: RenderFormat, text: &str, action: Option<&str>) -> String {
    match (format, action) {
        (RenderFormat::Terminal, Some(action)) => {
            format!("\x1b[7m[ {} ]\x1b[0m -> {}", text, action)
        }
        (RenderFormat::Terminal, None) => format!("\x1b[7m[ {} ]\x1b[0m", text),
        (RenderFormat::Markdown, Some(action)) => format!("[{}]({})", text, action),
        (RenderFormat::Markdown, None) => format!("`[ {} ]`", text),
    }
}

fn heading(out: &mut String, format: RenderFormat, title: &str) {
    match format {
        RenderFormat::Terminal => {
            out.push_str(&format!("\x1b[1m{}\x1b[0m\n", title));
            out.push_str(&"\u{2550}".repeat(title.chars().count()));
            out.push('\n');
        }
        RenderFormat::Markdown => {
            out.push_str(&format!("## {}\n\n", title));
        }
    }
}

fn emit_line(out: &mut String, _format: RenderFormat, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn emit_dim(out: &mut String, format: RenderFormat, text: &str) {
    out.push_str(&dim(format, text));
    out.push('\n');
}

fn dim(format: RenderFormat, text: &str) -> String {
    match format {
        RenderFormat::Terminal => format!("\x1b[2m{}\x1b[0m", text),
        RenderFormat::Markdown => format!("_{}_", text),
    }
}

fn styled_name(format: RenderFormat, name: &str) -> String {
    match format {
        RenderFormat::Terminal => format!("\x1b[1m{}\x1b[0m", name),
        RenderFormat::Markdown => format!("**{}**", name),
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
