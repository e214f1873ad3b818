#![forbid(unsafe_code)]
use agenda_rooster::{
    group_by_day, io,
    parser::{LayoutOptions, Parser as GridParser},
    storage::JsonCalendar,
    sync::{self, SyncOptions},
    Appointment,
};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI : agenda texte à largeur fixe → rendez-vous
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Géométrie de la grille ; les options explicites priment sur `--layout`.
#[derive(Args, Debug)]
struct LayoutArgs {
    /// Fichier JSON de géométrie
    #[arg(long)]
    layout: Option<String>,
    #[arg(long)]
    left_width: Option<usize>,
    #[arg(long)]
    day_width: Option<usize>,
    #[arg(long)]
    num_days: Option<usize>,
    #[arg(long)]
    right_width: Option<usize>,
    #[arg(long)]
    spacer: Option<String>,
    /// Année des dates DD/MM (défaut : année courante)
    #[arg(long)]
    year: Option<i32>,
}

impl LayoutArgs {
    fn resolve(&self) -> Result<LayoutOptions> {
        let mut opts = match &self.layout {
            Some(path) => io::load_layout_json(path)?,
            None => LayoutOptions::default(),
        };
        if let Some(v) = self.left_width {
            opts.left_width = v;
        }
        if let Some(v) = self.day_width {
            opts.day_width = v;
        }
        if let Some(v) = self.num_days {
            opts.num_days = v;
        }
        if let Some(v) = self.right_width {
            opts.right_width = v;
        }
        if let Some(v) = &self.spacer {
            opts.spacer = v.clone();
        }
        if let Some(v) = self.year {
            opts.year = v;
        }
        Ok(opts)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyser une grille et lister les rendez-vous
    Parse {
        /// Fichier, URL http(s) (feature `http`) ou `-` pour stdin
        #[arg(long)]
        input: String,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Regrouper l'affichage par jour
        #[arg(long)]
        by_day: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Synchroniser les rendez-vous vers un calendrier JSON local
    Sync {
        #[arg(long)]
        input: String,
        #[command(flatten)]
        layout: LayoutArgs,
        #[arg(long, default_value = "calendar.json")]
        calendar: String,
        #[arg(long, default_value_t = 120, allow_hyphen_values = true)]
        utc_offset_minutes: i32,
        /// Pause entre deux appels au calendrier
        #[arg(long, default_value_t = 500)]
        pause_ms: u64,
        #[arg(long, default_value = "Afspraak uit TXT agenda")]
        description: String,
        #[arg(long)]
        dry_run: bool,
    },
}

fn print_appointment(app: &Appointment) {
    println!("{} | {} → {} | {}", app.date, app.start_time, app.end_time, app.name);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Parse {
            input,
            layout,
            by_day,
            out_json,
            out_csv,
        } => {
            let opts = layout.resolve()?;
            let source = io::open_source(&input)?;
            info!(source = %source.describe(), "reading grid");
            let lines = source.read_lines()?;
            let report = GridParser::new(opts).parse(&lines)?;

            if let Some(path) = out_json {
                io::export_appointments_json(path, &report.appointments)?;
            }
            if let Some(path) = out_csv {
                io::export_appointments_csv(path, &report.appointments)?;
            }

            if report.is_empty() {
                println!("no appointments found");
            } else if by_day {
                for (_, apps) in group_by_day(&report.appointments) {
                    println!("== {}", apps[0].date);
                    for app in &apps {
                        print_appointment(app);
                    }
                }
            } else {
                for app in &report.appointments {
                    print_appointment(app);
                }
            }

            if report.skipped.is_empty() {
                0
            } else {
                for cell in &report.skipped {
                    eprintln!(
                        "skipped row {} column {} ({}): {}",
                        cell.row, cell.column, cell.text, cell.error
                    );
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Sync {
            input,
            layout,
            calendar,
            utc_offset_minutes,
            pause_ms,
            description,
            dry_run,
        } => {
            let opts = layout.resolve()?;
            let lines = io::open_source(&input)?.read_lines()?;
            let report = GridParser::new(opts.clone()).parse(&lines)?;

            let sync_opts = SyncOptions {
                year: opts.year,
                utc_offset_minutes,
                description,
                pause: std::time::Duration::from_millis(pause_ms),
                dry_run,
            };
            let mut service = JsonCalendar::open(&calendar)?;
            let covered = sync::covered_dates(&report.dates, opts.year);
            let summary =
                sync::sync_appointments(&mut service, &report.appointments, &covered, &sync_opts)?;
            println!(
                "{} appointment(s): {} created, {} deleted{}",
                report.appointments.len(),
                summary.created,
                summary.deleted,
                if dry_run { " (dry run)" } else { "" }
            );
            if report.skipped.is_empty() {
                0
            } else {
                2
            }
        }
    };

    std::process::exit(code);
}
