use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use tracing::info;

use assistant_cost::config::Config;
use assistant_cost::pricing::monthly::{IngestionReport, MonthlyReport};
use assistant_cost::pricing::TracingObserver;

/// Execute the estimate command
///
/// Prices the configured scenario and prints the monthly breakdown
pub fn execute(cfg: &Config, detailed: bool, json: bool) -> Result<()> {
    info!("Estimating monthly cost");

    let report = cfg.usage().report_with(&mut TracingObserver)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Monthly Cost Estimate".green().bold());
    println!("=====================\n");

    display_breakdown(&report);

    if detailed {
        display_chat_detail(&report);
        display_ingestion_detail(&report);
    }

    info!(total = report.breakdown.total_cost(), "Estimate completed");
    Ok(())
}

fn dollars(value: f64) -> String {
    format!("${:.6}", value)
}

fn share(part: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.1}%", part / total * 100.0)
    } else {
        "-".to_string()
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

/// Display the chat / ingestion / storage totals
fn display_breakdown(report: &MonthlyReport) {
    let breakdown = &report.breakdown;
    let total = breakdown.total_cost();

    let mut table = new_table(vec!["CONCERN", "COST", "SHARE"]);
    for (label, cost) in [
        ("Chat", breakdown.chat_cost()),
        ("Ingestion", breakdown.ingestion_cost()),
        ("Storage", breakdown.storage_cost()),
    ] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(dollars(cost)),
            Cell::new(share(cost, total)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Green),
        Cell::new(dollars(total)).fg(Color::Green),
        Cell::new("100.0%").fg(Color::Green),
    ]);

    println!("{table}\n");
}

/// Display per-message costs and the blend
fn display_chat_detail(report: &MonthlyReport) {
    let chat = &report.chat;
    println!("{}", "Chat:".bold());

    let mut table = new_table(vec!["TIER", "INPUT TOKENS", "LLM", "OVERHEAD", "PER MESSAGE"]);
    for (label, cost) in [("premium", &chat.premium), ("economy", &chat.economy)] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{:.0}", cost.input_tokens)),
            Cell::new(dollars(cost.llm)),
            Cell::new(dollars(cost.overhead)),
            Cell::new(dollars(cost.total())),
        ]);
    }
    println!("{table}");
    println!(
        "  Blended per message: {}   Messages: {}   Monthly: {}\n",
        dollars(chat.per_message),
        chat.messages,
        dollars(chat.cost)
    );
}

fn ingestion_row<T>(
    table: &mut Table,
    modality: &str,
    labels: (&str, &str),
    line: &IngestionReport<T>,
    unit_total: impl Fn(&T) -> f64,
) {
    table.add_row(vec![
        Cell::new(modality),
        Cell::new(format!("{} / {}", labels.0, labels.1)),
        Cell::new(format!("{} / {}", line.split.premium, line.split.economy)),
        Cell::new(format!(
            "{} / {}",
            dollars(unit_total(&line.premium_unit)),
            dollars(unit_total(&line.economy_unit))
        )),
        Cell::new(dollars(line.cost)),
    ]);
}

/// Display tier splits and unit costs for documents, images and videos
fn display_ingestion_detail(report: &MonthlyReport) {
    println!("{}", "Ingestion:".bold());

    let mut table = new_table(vec!["MODALITY", "TIERS", "UNITS", "UNIT COST", "MONTHLY"]);
    ingestion_row(
        &mut table,
        "documents",
        ("hi-res", "fast"),
        &report.documents,
        |c| c.total(),
    );
    ingestion_row(
        &mut table,
        "images",
        ("premium", "economy"),
        &report.images,
        |c| c.total(),
    );
    ingestion_row(
        &mut table,
        "videos",
        ("premium", "economy"),
        &report.videos,
        |c| c.total(),
    );
    println!("{table}");

    println!(
        "  Chunks per document: {}   Frames per video: {}\n",
        report.documents.premium_unit.chunks, report.videos.premium_unit.frames
    );
}
