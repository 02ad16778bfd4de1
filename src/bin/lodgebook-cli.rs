#![forbid(unsafe_code)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use lodgebook::{
    audit, evaluate_extension, evaluate_new_booking, io,
    model::{Booking, BookingId, NewBooking},
    store::JsonStore,
    Outcome, ReasonClass, ViolationKind,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de réservation d'hébergements (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du registre
    #[arg(long, global = true, default_value = "bookings.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Réserver une unité
    Book {
        #[arg(long)]
        guest: String,
        #[arg(long)]
        unit: String,
        /// YYYY-MM-DD
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        nights: u32,
    },

    /// Prolonger une réservation existante
    Extend {
        #[arg(long)]
        id: String,
        /// valeur brute, validée par le moteur
        #[arg(long, allow_hyphen_values = true)]
        extra_nights: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Importer des réservations depuis un CSV (chaque ligne passe par le moteur)
    Import {
        #[arg(long)]
        csv: String,
    },

    /// Vérifier la cohérence du registre
    Check {
        /// Export CSV des incohérences (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn print_booking(b: &Booking) {
    println!(
        "{} | {} | {} → {} | {}",
        b.id,
        b.unit_id,
        b.check_in,
        b.check_out(),
        b.guest_name
    );
}

fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Accepted(b) => {
            print_booking(b);
            0
        }
        Outcome::Rejected(reason) => {
            eprintln!("rejected: {reason}");
            match reason.class() {
                ReasonClass::ClientError => 2,
                ReasonClass::NotFound => 3,
                ReasonClass::Conflict => 4,
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let mut store = JsonStore::open(&cli.store)?;

    let code = match cli.cmd {
        Commands::Book {
            guest,
            unit,
            check_in,
            nights,
        } => {
            let check_in = io::parse_date(&check_in)?;
            match NewBooking::new(guest, unit, check_in, nights) {
                Ok(req) => exit_code(&evaluate_new_booking(&mut store, req)?),
                Err(e) => {
                    eprintln!("rejected: {e}");
                    2
                }
            }
        }
        Commands::Extend { id, extra_nights } => {
            let outcome = evaluate_extension(&mut store, &BookingId::new(id), &extra_nights)?;
            exit_code(&outcome)
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_ledger_json(path, store.ledger())?;
            }
            if let Some(path) = out_csv {
                io::export_bookings_csv(path, store.ledger())?;
            }
            let mut bookings = store.ledger().bookings.clone();
            bookings.sort_by(|a, b| (&a.unit_id, a.check_in).cmp(&(&b.unit_id, b.check_in)));
            for b in &bookings {
                print_booking(b);
            }
            0
        }
        Commands::Import { csv } => {
            let requests = io::import_bookings_csv(csv)?;
            let total = requests.len();
            let mut accepted = 0usize;
            for req in requests {
                let label = format!("{} @ {} from {}", req.guest_name, req.unit_id, req.check_in);
                match evaluate_new_booking(&mut store, req)? {
                    Outcome::Accepted(_) => accepted += 1,
                    Outcome::Rejected(reason) => eprintln!("skipped {label}: {reason}"),
                }
            }
            println!("imported {accepted}/{total} booking(s)");
            if accepted == total {
                0
            } else {
                2
            }
        }
        Commands::Check { report } => {
            let violations = audit(store.ledger());
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["booking_a", "booking_b", "kind"])?;
                    for v in &violations {
                        w.write_record([
                            v.booking_a.as_str(),
                            v.booking_b.as_str(),
                            match v.kind {
                                ViolationKind::Overlap => "overlap",
                                ViolationKind::GuestDuplicate => "guest",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                5
            }
        }
    };

    std::process::exit(code);
}
