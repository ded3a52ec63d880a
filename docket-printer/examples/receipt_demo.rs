//! End-to-end demo: discover printers, select one, print a sample receipt
//!
//! Pass a printer name to skip auto-selection:
//!
//! ```text
//! cargo run --example receipt_demo -- EPSON_TM_T20
//! RUST_LOG=docket_printer=debug cargo run --example receipt_demo
//! ```

use docket_printer::{PipelineOptions, PrintPipeline, PrinterResult};

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[tokio::main]
async fn main() -> PrinterResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docket_printer=debug".into()),
        )
        .init();

    let pipeline = PrintPipeline::new(PipelineOptions::default());

    let printers = pipeline.list_printers().await?;
    if printers.is_empty() {
        println!("No printers found on this host.");
        return Ok(());
    }
    println!("Discovered {} printer(s):", printers.len());
    for printer in &printers {
        let default_marker = if printer.is_default { " (default)" } else { "" };
        println!(
            "  {} [{}] {:?}{}",
            printer.name, printer.kind, printer.online, default_marker
        );
    }

    let selected = match std::env::args().nth(1) {
        Some(name) => pipeline.select_printer(&name).await?,
        None => pipeline.auto_select().await?,
    };
    println!("Selected: {}", selected.name);
    println!("Status:   {:?}", pipeline.printer_status(None).await?);

    // One composed job: banner, itemized table, totals and footer
    let documents = pipeline.documents();
    let mut job = documents.banner("CAFE DOCKET", '*', None)?;
    job.extend(documents.table(&rows(&[
        &["Item", "Qty", "Price"],
        &["Espresso", "2", "5.00"],
        &["Croissant", "1", "3.50"],
    ]))?);
    job.extend(documents.receipt(
        &["".to_string(), "Total               8.50".to_string()],
        Some("Thank you!"),
        true,
    )?);

    let result = pipeline.send_job(&job).await?;
    println!("Sent {} bytes in {} segments.", result.bytes_sent, job.len());
    Ok(())
}
