use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use tracing::info;

use assistant_cost::sweep::{DocumentGrid, ImageGrid, MessageGrid, SweepRow, VideoGrid};

use crate::cli::SweepTarget;

/// Execute the sweep command
///
/// Failed scenarios are shown on their own row; the batch always completes.
pub fn execute(target: SweepTarget) {
    let sections = [
        (SweepTarget::Messages, "Message cost sweep"),
        (SweepTarget::Documents, "Document ingestion sweep (model-independent)"),
        (SweepTarget::Images, "Image ingestion sweep"),
        (SweepTarget::Videos, "Video ingestion sweep (1 minute clip)"),
    ];

    for (section, title) in sections {
        if target != SweepTarget::All && target != section {
            continue;
        }
        let rows = run_section(section);
        info!(section = title, rows = rows.len(), "Sweep completed");
        display_rows(title, &rows);
    }
}

fn run_section(section: SweepTarget) -> Vec<SweepRow> {
    match section {
        SweepTarget::Messages => MessageGrid::default().run(),
        SweepTarget::Documents => DocumentGrid::default().run(),
        SweepTarget::Images => ImageGrid::default().run(),
        SweepTarget::Videos => VideoGrid::default().run(),
        SweepTarget::All => Vec::new(),
    }
}

fn display_rows(title: &str, rows: &[SweepRow]) {
    println!("{}", title.green().bold());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("SCENARIO").fg(Color::Cyan),
        Cell::new("MODEL").fg(Color::Cyan),
        Cell::new("COST").fg(Color::Cyan),
    ]);

    for row in rows {
        let cost = match &row.outcome {
            Ok(cost) => Cell::new(format!("${:.6}", cost)),
            Err(e) => Cell::new(format!("skipped: {}", e)).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&row.scenario),
            Cell::new(row.model.as_deref().unwrap_or("-")),
            cost,
        ]);
    }

    let failed = rows.iter().filter(|row| row.outcome.is_err()).count();
    println!("{table}");
    if failed > 0 {
        println!("  {} of {} scenarios skipped\n", failed.to_string().red(), rows.len());
    } else {
        println!();
    }
}
