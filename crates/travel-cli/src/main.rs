//! Command-line interface for the travel advisor
//!
//! # Usage
//!
//! ```bash
//! # Keys are read from the environment or a .env file
//! export ANTHROPIC_API_KEY=...
//! export OPENWEATHER_API_KEY=...
//!
//! cargo run -p travel-cli -- country Japon
//! cargo run -p travel-cli -- weather Chamonix --date 2025-01-15 --activity ski
//! cargo run -p travel-cli -- plan "I feel stuck in a routine"
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{Attribute, Cell, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use serde_json::{Value, json};
use tracing::{debug, info};
use travel_advisor::{AdvisorConfig, TravelServices};
use travel_core::ToolRegistry;

#[derive(Parser, Debug)]
#[command(name = "travel-cli")]
#[command(about = "Travel recommendations: country security, weather, flights and trip ideas", long_about = None)]
struct Args {
    /// Anthropic model to use
    #[arg(long, env = "TRAVEL_MODEL", global = true)]
    model: Option<String>,

    /// Home airport (IATA) for destination suggestions
    #[arg(long, env = "TRAVEL_DEPARTURE_AIRPORT", global = true)]
    departure_airport: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn,travel_advisor=info", global = true)]
    log_level: String,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Contextual report for a country
    Country {
        /// Country name in English or French
        country: String,
        /// all, security, events, holidays, travel or politics
        #[arg(long, default_value = "all")]
        info: String,
    },
    /// Weather for a place, optionally judged for an activity
    Weather {
        location: String,
        /// YYYY-MM-DD, up to 5 days ahead
        #[arg(long)]
        date: Option<String>,
        /// beach, ski, city, hiking, camping, festival
        #[arg(long)]
        activity: Option<String>,
    },
    /// Cheapest outbound and inbound flights
    Flights {
        from: String,
        to: String,
        outbound_date: String,
        return_date: String,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
    },
    /// Turn a mood into a travel need
    Mood { mood: String },
    /// Suggest destinations for a travel need
    Destinations { need: String },
    /// Mood to destinations with weather, security and flights
    Plan { mood: String },
    /// List the registered tools
    Tools,
}

fn config(args: &Args) -> anyhow::Result<AdvisorConfig> {
    let mut builder = AdvisorConfig::builder();
    if let Some(model) = &args.model {
        builder = builder.model(model.as_str());
    }
    if let Some(airport) = &args.departure_airport {
        builder = builder.departure_airport(airport.as_str());
    }
    builder
        .with_env()
        .build()
        .context("Invalid travel advisor configuration")
}

fn tools_table(registry: &ToolRegistry) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Tool").add_attribute(Attribute::Bold),
        Cell::new("Required").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
    ]);

    for summary in registry.summaries() {
        let required = summary.input_schema["required"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![summary.name, required, summary.description]);
    }
    table.to_string()
}

fn render(value: &Value) -> anyhow::Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    travel_core::init_tracing_with(&args.log_level, args.json_logs);

    let config = config(&args)?;
    debug!(model = %config.model, departure = %config.departure_airport, "Configuration loaded");
    let services = TravelServices::from_config(&config)?;
    let registry = services.tool_registry();
    info!(tools = registry.len(), "Starting travel-cli");

    let (tool, params) = match args.command {
        Command::Country { country, info } => {
            ("country_info", json!({"country": country, "info_type": info}))
        }
        Command::Weather {
            location,
            date,
            activity,
        } => (
            "weather_forecast",
            json!({"location": location, "date": date, "activity_type": activity}),
        ),
        Command::Flights {
            from,
            to,
            outbound_date,
            return_date,
            adults,
            children,
        } => (
            "flights_finder",
            json!({
                "departure_airport": from,
                "arrival_airport": to,
                "outbound_date": outbound_date,
                "return_date": return_date,
                "adults": adults,
                "children": children,
            }),
        ),
        Command::Mood { mood } => ("mood_to_need", json!({"mood": mood})),
        Command::Destinations { need } => ("need_to_destination", json!({"need": need})),
        Command::Plan { mood } => {
            println!("{}", services.trip_planner().plan_text(&mood).await);
            return Ok(());
        }
        Command::Tools => {
            println!("{}", tools_table(&registry));
            return Ok(());
        }
    };

    let output = registry.execute(tool, params).await?;
    println!("{}", render(&output)?);
    Ok(())
}
