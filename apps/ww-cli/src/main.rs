use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use ww_app::{AppResult, DesignOptions, DesignRequest, case_service, design_service, query};
use ww_core::UnitSystem;
use ww_process::Technology;
use ww_results::{DesignRecord, Variant};
use ww_sim::{AdjustmentFactors, SeasonalParams};

#[derive(Parser)]
#[command(name = "ww-cli")]
#[command(about = "WWTP designer CLI - size and simulate CAS, IFAS, MBR and MBBR plants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a design case file
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Size and simulate every selected technology
    Design {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Override the case seed
        #[arg(long)]
        seed: Option<u64>,
        /// Restrict to one or more technologies (CAS, IFAS, MBR, MBBR)
        #[arg(long = "tech")]
        technologies: Vec<Technology>,
        /// Display unit system (metric, us, si)
        #[arg(long)]
        units: Option<UnitSystem>,
    },
    /// Re-simulate stored designs at adjusted equipment settings
    Adjust {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Equalization pump, percent of design
        #[arg(long)]
        eq: Option<f64>,
        /// RAS pump, percent of design
        #[arg(long)]
        ras: Option<f64>,
        /// WAS pump, percent of design
        #[arg(long)]
        was: Option<f64>,
        /// Air blower, percent of design
        #[arg(long)]
        air: Option<f64>,
        /// Override the stored seed
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long = "tech")]
        technologies: Vec<Technology>,
    },
    /// Show stored results
    Show {
        case_path: PathBuf,
        /// Only this technology
        #[arg(long)]
        tech: Option<Technology>,
        /// Show the ADJUSTED run instead of the initial design
        #[arg(long)]
        adjusted: bool,
        #[arg(long)]
        units: Option<UnitSystem>,
    },
    /// Export a stored result as CSV
    Export {
        case_path: PathBuf,
        #[arg(long)]
        tech: Technology,
        #[arg(long)]
        adjusted: bool,
        #[arg(long)]
        units: Option<UnitSystem>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a Graphviz process flow diagram
    Diagram {
        case_path: PathBuf,
        #[arg(long)]
        tech: Technology,
        #[arg(long)]
        adjusted: bool,
        #[arg(long)]
        units: Option<UnitSystem>,
        /// Output DOT file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Synthetic daily effluent series around a stored result
    Seasonal {
        case_path: PathBuf,
        #[arg(long)]
        tech: Technology,
        #[arg(long)]
        adjusted: bool,
        /// Number of days
        #[arg(long, default_value_t = 365)]
        days: u32,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Design {
            case_path,
            seed,
            technologies,
            units,
        } => cmd_design(&case_path, options(seed, technologies), units),
        Commands::Adjust {
            case_path,
            eq,
            ras,
            was,
            air,
            seed,
            technologies,
        } => cmd_adjust(&case_path, [eq, ras, was, air], options(seed, technologies)),
        Commands::Show {
            case_path,
            tech,
            adjusted,
            units,
        } => cmd_show(&case_path, tech, variant(adjusted), units),
        Commands::Export {
            case_path,
            tech,
            adjusted,
            units,
            output,
        } => cmd_export(&case_path, tech, variant(adjusted), units, output.as_deref()),
        Commands::Diagram {
            case_path,
            tech,
            adjusted,
            units,
            output,
        } => cmd_diagram(&case_path, tech, variant(adjusted), units, output.as_deref()),
        Commands::Seasonal {
            case_path,
            tech,
            adjusted,
            days,
            output,
        } => cmd_seasonal(&case_path, tech, variant(adjusted), days, output.as_deref()),
    }
}

fn options(seed: Option<u64>, technologies: Vec<Technology>) -> DesignOptions {
    DesignOptions {
        seed,
        technologies: (!technologies.is_empty()).then_some(technologies),
    }
}

fn variant(adjusted: bool) -> Variant {
    if adjusted {
        Variant::Adjusted
    } else {
        Variant::Initial
    }
}

fn write_output(content: &str, output: Option<&Path>, what: &str) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("✓ Wrote {} to {}", what, path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = case_service::load_case(case_path)?;
    case_service::validate_case(&case)?;
    let summary = case_service::summarize(&case)?;
    println!("✓ Case is valid");
    println!("  Name: {}", summary.name);
    println!(
        "  Flow: {:.1} {} ({:.1} m³/day)",
        summary.display_units.flow(summary.flow_m3_day),
        summary.display_units.flow_label(),
        summary.flow_m3_day
    );
    let techs: Vec<_> = summary.technologies.iter().map(|t| t.code()).collect();
    println!("  Technologies: {}", techs.join(", "));
    println!("  Seed: {}", summary.seed);
    if summary.has_adjustments {
        println!("  Case carries equipment adjustments");
    }
    Ok(())
}

fn cmd_design(case_path: &Path, options: DesignOptions, units: Option<UnitSystem>) -> AppResult<()> {
    let response = design_service::design_case(DesignRequest { case_path, options })?;
    let units = units.unwrap_or_else(|| response.case.display_units());
    println!("✓ Designed case '{}' ({})", response.case.name, response.case_id);
    for record in &response.records {
        print_record(record, units);
    }
    Ok(())
}

fn cmd_adjust(case_path: &Path, pcts: [Option<f64>; 4], options: DesignOptions) -> AppResult<()> {
    let adjustments = if pcts.iter().all(Option::is_none) {
        None
    } else {
        let case = case_service::load_case(case_path)?;
        let base = case.adjustments.unwrap_or_default();
        let [eq, ras, was, air] = pcts;
        Some(AdjustmentFactors::new(
            eq.unwrap_or(base.eq_pump_pct()),
            ras.unwrap_or(base.ras_pump_pct()),
            was.unwrap_or(base.was_pump_pct()),
            air.unwrap_or(base.air_blower_pct()),
        )?)
    };

    let response =
        design_service::adjust_case(DesignRequest { case_path, options }, adjustments)?;
    let units = response.case.display_units();
    println!("✓ Adjusted case '{}'", response.case.name);
    for record in &response.records {
        print_record(record, units);
    }
    Ok(())
}

fn cmd_show(
    case_path: &Path,
    tech: Option<Technology>,
    variant: Variant,
    units: Option<UnitSystem>,
) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let store = query::load_store(case_path)?;
    let units = units.unwrap_or_else(|| case.display_units());

    let techs = match tech {
        Some(t) => vec![t],
        None => store.technologies(),
    };
    if techs.is_empty() {
        println!("No stored designs for {}", case_path.display());
        return Ok(());
    }
    for tech in techs {
        let record = query::get_record(&case, &store, tech, variant)?;
        print_record(&record, units);
    }
    Ok(())
}

fn cmd_export(
    case_path: &Path,
    tech: Technology,
    variant: Variant,
    units: Option<UnitSystem>,
    output: Option<&Path>,
) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let store = query::load_store(case_path)?;
    let record = query::get_record(&case, &store, tech, variant)?;
    let table = query::export_table(&record, units.unwrap_or_else(|| case.display_units()));
    write_output(&table.to_csv(), output, &format!("{} rows", table.rows.len()))
}

fn cmd_diagram(
    case_path: &Path,
    tech: Technology,
    variant: Variant,
    units: Option<UnitSystem>,
    output: Option<&Path>,
) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let store = query::load_store(case_path)?;
    let record = query::get_record(&case, &store, tech, variant)?;
    let topology =
        query::topology(&case, &record, units.unwrap_or_else(|| case.display_units()))?;
    write_output(&topology.to_dot(), output, "diagram")
}

fn cmd_seasonal(
    case_path: &Path,
    tech: Technology,
    variant: Variant,
    days: u32,
    output: Option<&Path>,
) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let store = query::load_store(case_path)?;
    let record = query::get_record(&case, &store, tech, variant)?;
    let series = query::seasonal(&record, days, &SeasonalParams::default());

    let mut csv = String::from("day,bod_mg_l,tss_mg_l,tkn_mg_l,tp_mg_l\n");
    for point in &series {
        let q = &point.effluent;
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            point.day, q.bod_mg_l, q.tss_mg_l, q.tkn_mg_l, q.tp_mg_l
        ));
    }
    write_output(&csv, output, &format!("{} days", series.len()))
}

fn print_record(record: &DesignRecord, units: UnitSystem) {
    println!(
        "\n{} [{}] seed={} created={}",
        record.technology(),
        record.variant,
        record.seed,
        record.created_at
    );
    if let Some(adj) = &record.adjustments {
        println!(
            "  Adjustments: EQ {:.0}%  RAS {:.0}%  WAS {:.0}%  Air {:.0}%",
            adj.eq_pump_pct(),
            adj.ras_pump_pct(),
            adj.was_pump_pct(),
            adj.air_blower_pct()
        );
    }
    let table = query::export_table(record, units);
    for row in &table.rows {
        println!("  {:<32} {:>14.3} {}", row.label, row.value, row.unit);
    }
    let defaults = &record.simulation.defaults_applied;
    if defaults.any() {
        println!("  Note: default SRT/MLSS assumed for sludge calculations");
    }
    for warning in record.sizing.warnings.iter().chain(&record.simulation.warnings) {
        println!("  ⚠ {}", warning);
    }
}
