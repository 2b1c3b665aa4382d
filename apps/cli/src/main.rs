mod args;
mod config;
mod paths;
mod prompt;
mod render;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use roll_app::{
    AppError, AppState, Confirmation, Dashboard, ensure_app_data_dir, export_file_name,
    now_local, table_rows,
};
use roll_core::{RecordInput, ReportTab, format_start_time};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use args::{AddArgs, Cli, Command, EditArgs, ReportView};
use config::CliConfig;
use render::ChartPrinter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let config = config::load_or_create(cli.config.as_deref()).map_err(io::Error::other)?;
    if config.created {
        info!(path = %config.file.display(), "created config");
    }

    let data_dir = paths::resolve_data_dir(cli.data_dir.clone()).map_err(io::Error::other)?;
    debug!(
        dir = %data_dir.paths.app_data_dir.display(),
        existing = data_dir.matched_existing,
        "using data dir"
    );
    ensure_app_data_dir(&data_dir.paths)?;
    let state = AppState::new(data_dir.paths.db_path);
    state.initialize()?;

    let mut dashboard = state.open_dashboard()?;
    dashboard.set_active_tab(config.config.default_report);
    if dashboard.welcome_visible() && !matches!(cli.command, Command::Welcome) {
        eprintln!("Jalankan `roll-usage welcome` untuk memulai sesi.");
    }

    match run(cli.command, &mut dashboard, &config.config) {
        Err(AppError::Validation(errors)) => {
            for error in errors.iter() {
                eprintln!("{}: {}", error.field, error.message);
            }
            Err(io::Error::new(io::ErrorKind::InvalidInput, "invalid record").into())
        }
        other => Ok(other?),
    }
}

fn run(command: Command, dashboard: &mut Dashboard, config: &CliConfig) -> roll_app::Result<()> {
    match command {
        Command::Add(args) => {
            dashboard.subscribe(Box::new(ChartPrinter));
            let outcome = dashboard.save(&add_input(args))?;
            println!("{} ({})", outcome.message(), outcome.record().id);
        }
        Command::Edit { id, fields } => {
            let form = dashboard.begin_edit(&id)?;
            dashboard.subscribe(Box::new(ChartPrinter));
            let outcome = dashboard.save(&apply_edit(form, fields))?;
            println!("{}", outcome.message());
        }
        Command::Delete { id, yes } => {
            dashboard.subscribe(Box::new(ChartPrinter));
            let confirm = |message: &str| yes || prompt::confirm(message);
            report_confirmation(dashboard.delete(&id, &confirm)?, "Data berhasil dihapus");
        }
        Command::Reset { yes } => {
            let confirm = |message: &str| yes || prompt::confirm(message);
            report_confirmation(dashboard.reset(&confirm)?, "Semua data berhasil dihapus");
        }
        Command::Logout { yes } => {
            let confirm = |message: &str| yes || prompt::confirm(message);
            report_confirmation(dashboard.logout(&confirm)?, "Berhasil keluar");
        }
        Command::List { search } => {
            let term = search.unwrap_or_default();
            let matches = dashboard.search(&term);
            let rows = table_rows(&matches);
            print!("{}", render::render_table(&rows, dashboard.records().len()));
        }
        Command::Report { view } => {
            print!("{}", render::render_header(now_local().date()));
            if !dashboard.has_data() {
                println!("{}", roll_app::EMPTY_TABLE_MESSAGE);
                return Ok(());
            }
            match view {
                Some(ReportView::All) => {
                    for tab in ReportTab::ALL {
                        print!("{}", render::render_tab(dashboard.reports(), tab));
                    }
                }
                Some(ReportView::Tab(tab)) => {
                    dashboard.subscribe(Box::new(ChartPrinter));
                    dashboard.set_active_tab(tab);
                }
                None => {
                    print!(
                        "{}",
                        render::render_tab(dashboard.reports(), dashboard.active_tab())
                    );
                }
            }
        }
        Command::Export { output } => {
            let path = output.unwrap_or_else(|| default_export_path(config));
            let file = File::create(&path)?;
            let count = dashboard.export_csv(file)?;
            info!(path = %path.display(), count, "exported records");
            println!("{} data diekspor ke {}", count, path.display());
        }
        Command::Welcome => {
            if dashboard.welcome_visible() {
                print!("{}", render::render_welcome());
                dashboard.dismiss_welcome()?;
            }
            print!("{}", render::render_header(now_local().date()));
        }
    }
    Ok(())
}

fn add_input(args: AddArgs) -> RecordInput {
    RecordInput {
        lot: args.lot,
        supplier: args.supplier,
        machine: args.machine,
        counter: args.counter,
        start_time: args
            .start
            .unwrap_or_else(|| format_start_time(&now_local())),
    }
}

fn apply_edit(mut form: RecordInput, fields: EditArgs) -> RecordInput {
    if let Some(lot) = fields.lot {
        form.lot = lot;
    }
    if let Some(supplier) = fields.supplier {
        form.supplier = supplier;
    }
    if let Some(machine) = fields.machine {
        form.machine = machine;
    }
    if let Some(counter) = fields.counter {
        form.counter = counter;
    }
    if let Some(start) = fields.start {
        form.start_time = start;
    }
    form
}

fn report_confirmation(result: Confirmation, done: &str) {
    match result {
        Confirmation::Done => println!("{}", done),
        Confirmation::Declined => println!("Dibatalkan"),
    }
}

fn default_export_path(config: &CliConfig) -> PathBuf {
    let name = export_file_name(now_local().date());
    match &config.export_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn setup_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("roll_usage_cli=debug,roll_app=debug,roll_db=debug")
        } else {
            EnvFilter::new("roll_usage_cli=info,roll_app=info,roll_db=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}
