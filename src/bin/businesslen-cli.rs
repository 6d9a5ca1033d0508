#![forbid(unsafe_code)]
use anyhow::Result;
use businesslen::{
    config::Settings,
    holidays::BuiltinHolidays,
    io::{self, IntervalReport},
    model::Interval,
    report::{DurationRenderer, TextDuration},
    storage::{ConfigStore, JsonConfigStore},
    BusinessLen, BusinessLenError,
};
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de calcul d'heures ouvrées
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration (défaut : lun–ven 9h–17h, déjeuner 12h, fériés US)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Unit {
    Hours,
    Days,
    Minutes,
    Seconds,
    All,
    /// Intervalle et conversions en une ligne JSON
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Heures ouvrées entre deux instants
    Hours {
        /// YYYY-MM-DDTHH:MM[:SS] (heure locale)
        #[arg(long)]
        start: String,
        /// YYYY-MM-DDTHH:MM[:SS] (heure locale)
        #[arg(long)]
        end: String,
        #[arg(long, value_enum, default_value_t = Unit::Hours)]
        unit: Unit,
    },

    /// Calcul par lot depuis un CSV `start,end`
    Batch {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        out: String,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },

    /// Lister les jours fériés intégrés d'un pays
    Holidays {
        #[arg(long)]
        country: String,
        #[arg(long)]
        year: i32,
    },

    /// Écrire la configuration par défaut
    Init {
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<BusinessLenError>() {
            // Code 1..=4 = entrée invalide
            Some(invalid) => {
                eprintln!("Error: {invalid}");
                i32::from(invalid.code())
            }
            None => return Err(err),
        },
    };

    std::process::exit(code);
}

fn load_calculator(config: Option<&str>) -> Result<BusinessLen> {
    let settings = match config {
        Some(path) => JsonConfigStore::open(path)?.load()?,
        None => Settings::default(),
    };
    Ok(settings.build(&BuiltinHolidays)?)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Commands::Hours { start, end, unit } => {
            let calc = load_calculator(cli.config.as_deref())?;
            let start = io::parse_instant_arg(&start)?;
            let end = io::parse_instant_arg(&end)?;
            let interval = Interval::new(start, end)?;
            let duration = calc.measure_interval(interval);
            match unit {
                Unit::Hours => println!("{}", duration.hours()),
                Unit::Days => println!("{}", duration.days()),
                Unit::Minutes => println!("{}", duration.minutes()),
                Unit::Seconds => println!("{}", duration.seconds()),
                Unit::All => println!("{}", TextDuration.render(interval, &duration)),
                Unit::Json => {
                    let report = IntervalReport { interval, duration };
                    println!("{}", serde_json::to_string(&report)?);
                }
            }
        }
        Commands::Batch { csv, out, format } => {
            let calc = load_calculator(cli.config.as_deref())?;
            let intervals = io::import_intervals_csv(csv)?;
            let reports = io::measure_all(&calc, &intervals);
            match format {
                Format::Csv => io::export_reports_csv(&out, &reports)?,
                Format::Json => io::export_reports_json(&out, &reports)?,
            }
            println!("{} interval(s) written to {out}", reports.len());
        }
        Commands::Holidays { country, year } => {
            let dates = BuiltinHolidays
                .dates(&country, year)
                .map_err(BusinessLenError::from)?;
            for (date, name) in dates {
                println!("{date} {name}");
            }
        }
        Commands::Init { out } => {
            let store = JsonConfigStore::open(&out)?;
            store.save(&Settings::default())?;
            println!("default configuration written to {}", store.path().display());
        }
    }
    Ok(0)
}
