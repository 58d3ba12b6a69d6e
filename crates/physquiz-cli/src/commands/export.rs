//! The `physquiz export` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use physquiz_delivery::config::load_config_from;
use physquiz_delivery::BackupStore;
use physquiz_report::write_csv_report;

pub fn execute(
    output: Option<PathBuf>,
    store_dir: Option<PathBuf>,
    list: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = BackupStore::new(store_dir.unwrap_or(config.store_dir));

    if list {
        return print_table(&store);
    }

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "resultados_quiz_{}.csv",
            Local::now().format("%Y-%m-%d")
        ))
    });

    let rows = write_csv_report(&store, &path)?;
    if rows == 0 {
        println!("No local results to export.");
    } else {
        println!("Exported {rows} result(s) to {}", path.display());
    }

    Ok(())
}

fn print_table(store: &BackupStore) -> Result<()> {
    use comfy_table::{Cell, Table};

    let results = store.list()?;
    if results.is_empty() {
        println!("No local results.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Fecha", "Nombre", "Grado", "Correctas", "Total", "Porcentaje", "Nota",
    ]);

    for stored in &results {
        let p = &stored.payload;
        table.add_row(vec![
            Cell::new(&p.timestamp),
            Cell::new(&p.nombre),
            Cell::new(&p.grado),
            Cell::new(p.correctas),
            Cell::new(p.total),
            Cell::new(format!("{}%", p.porcentaje)),
            Cell::new(p.nota),
        ]);
    }

    println!("{table}");
    println!("{} result(s) in {}", results.len(), store.dir().display());
    Ok(())
}
