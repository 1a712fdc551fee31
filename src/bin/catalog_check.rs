use clap::Parser;
use recycle_assist::utils::logger;
use recycle_assist::utils::validation::{validate_path, validate_required_field};
use recycle_assist::{AssistError, Catalog};

#[derive(Parser)]
#[command(name = "catalog_check")]
#[command(about = "Validate a recycling catalog file and print a summary")]
struct Args {
    /// Path to a TOML catalog file
    #[arg(short, long)]
    catalog: Option<String>,

    /// Check the built-in catalog instead of a file
    #[arg(long, conflicts_with = "catalog")]
    builtin: bool,

    /// Print the catalog as TOML after the summary
    #[arg(long)]
    dump: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match load(&args) {
        Ok(catalog) => {
            display_summary(&catalog);
            if args.dump {
                match catalog.to_toml_string() {
                    Ok(rendered) => println!("{}", rendered),
                    Err(e) => fail(e),
                }
            }
        }
        Err(e) => fail(e),
    }
}

fn load(args: &Args) -> Result<Catalog, AssistError> {
    if args.builtin {
        tracing::info!("🔍 Checking built-in catalog");
        return Ok(Catalog::builtin());
    }

    let path = validate_required_field("--catalog", &args.catalog)?;
    validate_path("--catalog", path)?;
    tracing::info!("📁 Loading catalog from: {}", path);
    Catalog::from_file(path)
}

fn display_summary(catalog: &Catalog) {
    println!("📋 Catalog Summary:");
    println!("  Categories: {}", catalog.len());
    println!("  Providers: {}", catalog.providers().len());
    println!();

    for entry in catalog.entries() {
        let category = entry.category();
        println!(
            "  {} ({}): {} provider(s)",
            category.name,
            category.id,
            entry.provider_count()
        );
        if entry.provider_count() == 0 {
            println!("    ⚠️ No provider accepts this category");
        }
        for provider in entry.providers() {
            println!(
                "    - {} ({}/5, {} km{})",
                provider.name,
                provider.rating,
                provider.distance_km,
                if provider.verified { ", verified" } else { "" }
            );
        }
    }

    println!();
    println!("✅ Catalog is valid");
}

fn fail(e: AssistError) -> ! {
    tracing::error!("❌ Catalog check failed: {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
