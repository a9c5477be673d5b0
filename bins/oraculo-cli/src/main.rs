//! Oráculo terminal viewer
//!
//! Commands:
//! - `events`: Front page - curated events plus standalone markets
//! - `markets`: Standalone curated markets only
//! - `chart`: Yes-outcome price chart for one event (legend + optional SVG)
//! - `adrs`: Live Argentine ADR quote board
//! - `bonds`: Live Argentine sovereign-bond quote board
//!
//! # Usage
//! ```bash
//! # Front page, collapsed to one headline market per event
//! oraculo events
//!
//! # Every market of every event
//! oraculo events --full
//!
//! # One week of yes-series history, written as SVG
//! oraculo chart --event elecciones-2027 --interval 1w --out chart.svg
//!
//! # Quote boards, one-shot or refreshing every 30s
//! oraculo adrs
//! oraculo bonds --watch
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use oraculo_adapter::clob::{HistoryClient, Interval};
use oraculo_adapter::curated::{select_primary, CuratedClient, FrontPage};
use oraculo_adapter::data912::{Board, Data912Client, QuoteTicker};
use oraculo_adapter::spark::{self, SparkOptions, SparkSeries};
use oraculo_adapter::types::{Event, Market, Quote};
use oraculo_adapter::{
    format, links, CLOB_API_BASE, CURATED_API_BASE, DATA912_API_BASE, QUOTE_REFRESH_INTERVAL,
};

#[derive(Parser)]
#[command(name = "oraculo")]
#[command(about = "Terminal viewer for the Oráculo curated prediction-market feeds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Front page: curated events plus standalone markets
    Events {
        /// Show every market of each event instead of only the headline
        #[arg(long, default_value = "false")]
        full: bool,

        /// Dump the fetched page as JSON instead of rendering cards
        #[arg(long, default_value = "false")]
        json: bool,

        /// Curated API base URL
        #[arg(long, default_value = CURATED_API_BASE)]
        base_url: String,
    },

    /// Standalone curated markets
    Markets {
        /// Dump the fetched markets as JSON instead of rendering cards
        #[arg(long, default_value = "false")]
        json: bool,

        /// Curated API base URL
        #[arg(long, default_value = CURATED_API_BASE)]
        base_url: String,
    },

    /// Yes-outcome price chart for one event
    Chart {
        /// Event slug to chart
        #[arg(long)]
        event: String,

        /// History window (1h, 6h, 1d, 1w, 1m, max)
        #[arg(long, default_value = "1w")]
        interval: Interval,

        /// Sampling granularity in minutes (defaults per window)
        #[arg(long)]
        fidelity: Option<u32>,

        /// Write the chart as an SVG document to this path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Curated API base URL
        #[arg(long, default_value = CURATED_API_BASE)]
        base_url: String,

        /// Price-history API base URL
        #[arg(long, default_value = CLOB_API_BASE)]
        price_base_url: String,
    },

    /// Live Argentine ADR quote board
    Adrs {
        /// Keep refreshing every 30 seconds until Ctrl+C
        #[arg(long, default_value = "false")]
        watch: bool,

        /// Quote feed base URL
        #[arg(long, default_value = DATA912_API_BASE)]
        base_url: String,
    },

    /// Live Argentine sovereign-bond quote board
    Bonds {
        /// Keep refreshing every 30 seconds until Ctrl+C
        #[arg(long, default_value = "false")]
        watch: bool,

        /// Quote feed base URL
        #[arg(long, default_value = DATA912_API_BASE)]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();

    match cli.command {
        Commands::Events { full, json, base_url } => run_events(full, json, base_url).await,
        Commands::Markets { json, base_url } => run_markets(json, base_url).await,
        Commands::Chart { event, interval, fidelity, out, base_url, price_base_url } => {
            run_chart(event, interval, fidelity, out, base_url, price_base_url).await
        }
        Commands::Adrs { watch, base_url } => run_board(Board::Adrs, watch, base_url).await,
        Commands::Bonds { watch, base_url } => run_board(Board::Bonds, watch, base_url).await,
    }
}

async fn run_events(full: bool, json: bool, base_url: String) -> Result<()> {
    let client = CuratedClient::with_base_url(&base_url)?;
    let page = match client.front_page().await {
        Ok(page) => page,
        Err(err) => {
            println!("Error: no se pudieron cargar los datos");
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.events.is_empty() && page.markets.is_empty() {
        println!("No hay datos disponibles en este momento.");
        return Ok(());
    }

    render_hero(&page);

    if !page.events.is_empty() {
        println!("== Eventos ==");
        println!();
        for event in &page.events {
            render_event(event, full);
        }
    }

    if !page.markets.is_empty() {
        println!("== Mercados Destacados ==");
        println!();
        for market in &page.markets {
            render_market(market, "");
            println!("Ver en Polymarket: {}", links::market_url(&market.slug));
            println!();
        }
    }

    Ok(())
}

async fn run_markets(json: bool, base_url: String) -> Result<()> {
    let client = CuratedClient::with_base_url(&base_url)?;
    let markets = match client.get_markets().await {
        Ok(markets) => markets,
        Err(err) => {
            println!("Error: no se pudieron cargar los datos");
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&markets)?);
        return Ok(());
    }

    if markets.is_empty() {
        println!("No hay datos disponibles en este momento.");
        return Ok(());
    }

    println!("== Mercados Destacados ==");
    println!();
    for market in &markets {
        render_market(market, "");
        println!("Ver en Polymarket: {}", links::market_url(&market.slug));
        println!();
    }

    Ok(())
}

async fn run_chart(
    slug: String,
    interval: Interval,
    fidelity: Option<u32>,
    out: Option<PathBuf>,
    base_url: String,
    price_base_url: String,
) -> Result<()> {
    let curated = CuratedClient::with_base_url(&base_url)?;
    let events = match curated.get_events().await {
        Ok(events) => events,
        Err(err) => {
            println!("Error: no se pudieron cargar los datos");
            return Err(err.into());
        }
    };

    let Some(event) = events.into_iter().find(|e| e.slug == slug) else {
        println!("No se encontró el evento \"{slug}\"");
        anyhow::bail!("event not found: {slug}");
    };

    println!("{}", event.title);
    println!(
        "Volumen total: {} · Cierra: {}",
        format::format_volume(event.volume),
        format::format_date_long(&event.end_date)
    );
    println!();

    let history = HistoryClient::with_base_url(&price_base_url)?;
    info!("Fetching yes-series for {} markets ({})", event.markets.len(), interval);
    let series = history.yes_histories(&event.markets, interval, fidelity).await;
    let spark_series: Vec<SparkSeries> =
        series.into_iter().map(|s| SparkSeries::new(s.label, s.points)).collect();

    match spark::layout(&spark_series, SparkOptions::default()) {
        None => println!("No hay mercados con outcome \"YES\" en este evento"),
        Some(frame) => {
            for line in &frame.lines {
                println!(
                    "  {} {:.1}% ({})",
                    line.label,
                    line.last_price * 100.0,
                    format::format_change_pct(line.change_pct)
                );
            }
            if let Some(out_path) = out {
                if let Some(parent) = out_path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&out_path, frame.to_svg()).await?;
                println!();
                println!("Gráfico guardado en {}", out_path.display());
            }
        }
    }

    println!();
    println!("== Todos los Mercados ==");
    let mut markets = event.markets.clone();
    markets.sort_by(|a, b| b.volume_num().total_cmp(&a.volume_num()));
    for market in &markets {
        render_market(market, "  ");
    }

    let trade_url = match select_primary(&event.markets) {
        Some(headline) => links::event_market_url(&event.slug, &headline.market.id),
        None => links::event_url(&event.slug),
    };
    println!();
    println!("Operar: {}", trade_url);

    Ok(())
}

async fn run_board(board: Board, watch: bool, base_url: String) -> Result<()> {
    let client = Data912Client::with_base_url(&base_url)?;

    if !watch {
        // Quote failures blank the board for the cycle; no error banner.
        match client.get_board(board).await {
            Ok(quotes) if !quotes.is_empty() => render_board(board, &quotes),
            Ok(_) => warn!("{} feed returned nothing", board.title()),
            Err(err) => warn!("quote fetch failed for {}: {}", board.title(), err),
        }
        return Ok(());
    }

    info!(
        "Refreshing {} every {}s, press Ctrl+C to stop",
        board.title(),
        QUOTE_REFRESH_INTERVAL.as_secs()
    );
    let ticker = QuoteTicker::spawn(client, board);
    let mut rx = ticker.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow().clone();
                if let Some(quotes) = snapshot {
                    if quotes.is_empty() {
                        continue;
                    }
                    render_board(ticker.board(), &quotes);
                    println!("Actualizado: {}", chrono::Local::now().format("%H:%M:%S"));
                    println!();
                }
            }
        }
    }
    ticker.stop();

    Ok(())
}

fn render_hero(page: &FrontPage) {
    println!("Oráculo · Mercados predictivos de Argentina en tiempo real");
    println!(
        "Mercados en vivo: {} · Volumen: {}",
        page.total_markets(),
        format::format_volume(page.standalone_volume())
    );
    println!();
}

fn render_event(event: &Event, full: bool) {
    let badge = if event.is_live() { " [Activo]" } else { "" };
    println!("{}{}", event.title, badge);

    let count = event.markets.len();
    println!(
        "  Volumen total: {} · {} mercado{}",
        format::format_volume(event.volume),
        count,
        if count == 1 { "" } else { "s" }
    );
    println!("  Cierra: {}", format::format_date_long(&event.end_date));

    for line in event.description.lines().take(3) {
        println!("  {}", line);
    }
    if event.description.lines().count() > 3 {
        println!("  Ver más...");
    }

    if full {
        for market in &event.markets {
            render_market(market, "  ");
        }
    } else if let Some(headline) = select_primary(&event.markets) {
        let volume = format::format_volume(headline.market.volume_num());
        match &headline.yes {
            Some(yes) => println!(
                "  {} · {} {} · Vol: {}",
                headline.market.question,
                yes.label,
                format::format_probability(yes.probability),
                volume
            ),
            None => println!("  {} · Vol: {}", headline.market.question, volume),
        }
    }

    println!("  Ver en Polymarket: {}", links::event_url(&event.slug));
    println!();
}

fn render_market(market: &Market, indent: &str) {
    println!("{indent}{}", market.question);
    if let Some(group) = &market.group_item_title {
        println!("{indent}  {}", group);
    }

    let chips: Vec<String> = market
        .outcome_pairs()
        .map(|(label, price)| match price.parse::<f64>() {
            Ok(p) => format!("{} {:.1}%", label, p * 100.0),
            Err(_) => label.to_string(),
        })
        .collect();
    if !chips.is_empty() {
        println!("{indent}  {}", chips.join(" | "));
    }

    let mut status = String::new();
    if market.is_live() {
        status.push_str(" [Activo]");
    }
    if market.closed {
        status.push_str(" [Cerrado]");
    }
    println!(
        "{indent}  Vol: {} · Cierra: {}{}",
        format::format_volume(market.volume_num()),
        format::format_date_short(&market.end_date),
        status
    );
}

fn render_board(board: Board, quotes: &[Quote]) {
    println!("== {} ==", board.title());
    for quote in quotes {
        println!(
            "  {:<6} {:<26} {:>10} {:>9}   bid {} / ask {}",
            quote.symbol,
            board.display_name(&quote.symbol),
            format::format_price(quote.c),
            format::format_quote_pct(quote.pct_change),
            format::format_price(quote.px_bid),
            format::format_price(quote.px_ask),
        );
    }
}
