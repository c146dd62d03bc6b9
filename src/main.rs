mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use cli::{Cli, Commands, EquipmentArgs, PrefsAction, ResortArgs, RoiArgs};
use peakcision::api::AppState;
use peakcision::catalog::{
    CatalogItem, CatalogLoader, CatalogSource, EQUIPMENT_LOAD_ERROR, EquipmentQuery, FinderState,
    HttpCatalog, RESORTS_LOAD_ERROR, ResortQuery, StaticCatalog,
};
use peakcision::finder::{
    self, CompareSelection, FilterCriteria, FinderScope, ScoredItem, resort_fit,
};
use peakcision::preferences::{PreferenceUpdate, PreferencesContext, PreferencesStore};
use peakcision::roi::{self, Recommendation, RoiInputs};
use peakcision::{PeakcisionConfig, PeakcisionError, telemetry, web};

fn catalog_source(config: &PeakcisionConfig) -> Result<Arc<dyn CatalogSource>> {
    match &config.catalog.base_url {
        Some(url) => {
            info!("Using remote catalog at {}", url);
            Ok(Arc::new(HttpCatalog::new(url.clone())?))
        }
        None => {
            debug!("Using built-in catalog");
            Ok(Arc::new(StaticCatalog::seeded()))
        }
    }
}

async fn load_preferences(config: &PeakcisionConfig) -> Result<PreferencesContext> {
    let location = config.preferences.resolved_location();
    std::fs::create_dir_all(&location).with_context(|| {
        format!(
            "Failed to create preferences directory {}",
            location.display()
        )
    })?;
    let store = PreferencesStore::open(&location)?;
    Ok(PreferencesContext::load(store).await)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("${v:.0}"))
}

fn print_compare<T: CatalogItem>(ids: &[String], ranked: &[ScoredItem<T>]) {
    if ids.is_empty() {
        return;
    }
    let mut selection = CompareSelection::new();
    for id in ids {
        selection.toggle(id);
    }
    println!();
    println!("Compare ({} selected)", selection.len());
    for scored in selection.project(ranked) {
        println!(
            "  {:<24} fit {:>3}  price {:>6}",
            scored.item.name(),
            scored.fit,
            money(scored.item.price())
        );
    }
}

async fn run_resorts(
    config: &PeakcisionConfig,
    prefs: &PreferencesContext,
    args: ResortArgs,
) -> Result<()> {
    let mut criteria = FilterCriteria::from_preferences(FinderScope::Resorts, &prefs.get().await)
        .with_query(args.query.as_deref().unwrap_or_default())
        .with_budget(args.budget)
        .with_max_travel_hours(args.max_travel)
        .with_ability(args.ability)
        .with_terrain(args.terrain);
    if let Some(region) = &args.region {
        criteria = criteria.with_region(region);
    }
    if let Some(pass) = &args.pass {
        criteria = criteria.with_pass_type(pass);
    }
    if let Some(bias) = args.powder_bias {
        criteria = criteria.with_powder_bias(bias);
    }
    if let Some(tolerance) = args.crowd_tolerance {
        criteria = criteria.with_crowd_tolerance(tolerance);
    }

    let loader = CatalogLoader::new(catalog_source(config)?);
    let mut state = FinderState::default();
    state.begin();
    let outcome = loader
        .resorts(ResortQuery::from_criteria(&criteria, config.catalog.limit))
        .await;
    state.apply(outcome, RESORTS_LOAD_ERROR);
    if let Some(message) = &state.error {
        eprintln!("{message}");
    }

    let ranked = finder::recompute_resorts(&state.items, &criteria, args.tie_break.into());
    if args.json {
        return print_json(&ranked);
    }

    if ranked.is_empty() {
        println!("No resorts match your filters.");
    }
    for scored in &ranked {
        let resort = &scored.item;
        let breakdown = resort_fit(resort, &criteria);
        let location = resort.region_labels().join(", ");
        println!(
            "{:>3}  {:<24} {:<20} {:>6}  snow {:>3.0}  ability {:>4.1}  crowd {:>3.0}",
            scored.fit,
            resort.name,
            location,
            money(resort.price),
            breakdown.snow,
            breakdown.ability,
            breakdown.crowd
        );
    }
    print_compare(&args.compare, &ranked);
    Ok(())
}

async fn run_equipment(config: &PeakcisionConfig, args: EquipmentArgs) -> Result<()> {
    let criteria = FilterCriteria::for_equipment()
        .with_query(args.query.as_deref().unwrap_or_default())
        .with_category(args.category)
        .with_ability(args.ability)
        .with_terrain(args.terrain)
        .with_target_length(args.length)
        .with_budget(args.budget);

    let loader = CatalogLoader::new(catalog_source(config)?);
    let mut state = FinderState::default();
    state.begin();
    let outcome = loader
        .equipment(EquipmentQuery::from_criteria(&criteria, config.catalog.limit))
        .await;
    state.apply(outcome, EQUIPMENT_LOAD_ERROR);
    if let Some(message) = &state.error {
        eprintln!("{message}");
    }

    let ranked = finder::recompute_equipment(&state.items, &criteria, args.sort);
    if args.json {
        return print_json(&ranked);
    }

    if ranked.is_empty() {
        println!("No equipment matches your filters.");
    }
    for scored in &ranked {
        let item = &scored.item;
        println!(
            "{:>3}  {:<24} {:<9} {:>6}  {}",
            scored.fit,
            item.title,
            item.category.as_deref().unwrap_or("-"),
            money(item.price),
            item.badge.as_deref().unwrap_or("")
        );
    }
    print_compare(&args.compare, &ranked);
    Ok(())
}

fn run_roi(args: &RoiArgs) -> Result<()> {
    let inputs = RoiInputs {
        days_per_season: args.days,
        seasons: args.seasons,
        gear_cost: args.gear_cost,
        resale_pct: args.resale / 100.0,
        maint_per_season: args.maintenance,
        rental_per_day: args.rental_per_day,
        pass_cost: args.pass_cost,
        travel_per_day: args.travel_per_day,
        discount_pct: args.discount / 100.0,
    };
    let projection = roi::project(&inputs, args.sensitivity);
    let recommendation = Recommendation::for_projection(&projection);

    if args.json {
        return print_json(&serde_json::json!({
            "projection": projection,
            "recommendation": recommendation,
        }));
    }

    println!("{} days/season", projection.days_per_season);
    println!("year   ownership      rental");
    for point in &projection.series {
        println!(
            "{:>4}  {:>10.0}  {:>10.0}",
            point.year, point.ownership, point.rental
        );
    }
    match projection.break_even_year {
        Some(year) => println!("Break-even: year {year}"),
        None => println!("Break-even: not within the modeled seasons"),
    }
    println!("{}: {}", recommendation.tone, recommendation.detail);
    Ok(())
}

async fn run_prefs(prefs: &PreferencesContext, action: PrefsAction) -> Result<()> {
    match action {
        PrefsAction::Show { json } => {
            let current = prefs.get().await;
            if json {
                print_json(&current)?;
            } else {
                println!("{current}");
            }
        }
        PrefsAction::Set { key, value } => {
            let update = PreferenceUpdate::parse(&key, &value)?;
            println!("{}", prefs.set(update).await);
        }
        PrefsAction::Reset => {
            println!("{}", prefs.reset().await);
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = PeakcisionConfig::load_from_path(cli.config.clone())?;
    telemetry::init_logging(&config.logging, cli.verbose);
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Resorts(args) => {
            let prefs = load_preferences(&config).await?;
            run_resorts(&config, &prefs, args).await
        }
        Commands::Equipment(args) => run_equipment(&config, args).await,
        Commands::Roi(args) => run_roi(&args),
        Commands::Prefs { action } => {
            let prefs = load_preferences(&config).await?;
            run_prefs(&prefs, action).await
        }
        Commands::Serve { port } => {
            let state = AppState {
                catalog: catalog_source(&config)?,
                preferences: load_preferences(&config).await?,
                default_limit: config.catalog.limit,
            };
            web::run(state, port.unwrap_or(config.server.port)).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PeakcisionError>() {
                Some(err) => eprintln!("{}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
