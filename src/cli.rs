//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{TacticalConfig, VixSource, validate_config};
use crate::domain::error::TacticalError;
use crate::domain::indicator::{IndicatorBundle, compute_indicators};
use crate::domain::market::{
    BenchmarkSnapshot, MarketPulse, PulseInputs, VixTermStructure, market_pulse,
};
use crate::domain::performance::Benchmark;
use crate::domain::ranking::{Candidate, Ranking, RankingPass};
use crate::domain::regime::{RegimeContext, classify_regime};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "tactical", about = "Technical indicator and composite scoring engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score and rank every asset in the universe
    Rank {
        #[arg(short, long)]
        config: PathBuf,
        /// Override [ranking] top
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the indicator snapshot for one symbol
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: String,
    },
    /// Classify the current market regime
    Regime {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Rank { config, top } => run_rank(&config, top),
        Command::Indicators { config, code } => run_indicators(&config, &code),
        Command::Regime { config } => run_regime(&config),
        Command::Validate { config } => run_validate(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

/// Loads and validates the config file at `path`.
pub fn load_config(path: &PathBuf) -> Result<(FileConfigAdapter, TacticalConfig), TacticalError> {
    tracing::info!("loading config from {}", path.display());
    let adapter = FileConfigAdapter::from_file(path)?;
    let config = validate_config(&adapter)?;
    Ok((adapter, config))
}

fn data_port_for(config: &TacticalConfig) -> CsvAdapter {
    CsvAdapter::new(config.data_dir.clone(), config.universe.clone())
}

/// Everything resolved once per pass and shared by every candidate.
#[derive(Debug, Clone)]
pub struct MarketContext {
    pub regime: RegimeContext,
    pub primary: Option<Benchmark>,
    pub secondary: Option<Benchmark>,
    pub index: Option<BenchmarkSnapshot>,
    pub term_structure: Option<VixTermStructure>,
    pub pulse: MarketPulse,
}

fn last_close(data_port: &dyn DataPort, code: &str) -> Result<f64, TacticalError> {
    data_port
        .fetch_series(code)?
        .last()
        .map(|bar| bar.close)
        .ok_or_else(|| TacticalError::NoData {
            code: code.to_string(),
        })
}

fn resolve_vix(data_port: &dyn DataPort, source: &VixSource) -> f64 {
    match source {
        VixSource::Level(v) => *v,
        VixSource::Series(code) => last_close(data_port, code).unwrap_or_else(|e| {
            tracing::warn!("VIX unavailable: {e}");
            f64::NAN
        }),
    }
}

fn resolve_benchmark(data_port: &dyn DataPort, code: Option<&str>) -> Option<Benchmark> {
    let code = code?;
    match data_port.fetch_series(code) {
        Ok(series) => Some(Benchmark::from_closes(code, &series.closes())),
        Err(e) => {
            tracing::warn!("benchmark {code} unavailable, treating as flat: {e}");
            None
        }
    }
}

/// Optional `[market] vix_9d / vix_3m / vix_6m` levels.
fn tenor(config: &dyn ConfigPort, key: &str) -> Option<f64> {
    config.get_float("market", key)
}

pub fn build_market_context(
    data_port: &dyn DataPort,
    config: &TacticalConfig,
    settings: &dyn ConfigPort,
) -> MarketContext {
    let index_closes = match data_port.fetch_series(&config.index) {
        Ok(series) => series.closes(),
        Err(e) => {
            tracing::warn!("index {} unavailable: {e}", config.index);
            Vec::new()
        }
    };
    let vix = resolve_vix(data_port, &config.vix);
    let regime = classify_regime(&index_closes, vix);

    let term_structure = vix.is_finite().then(|| {
        VixTermStructure::new(
            vix,
            tenor(settings, "vix_9d"),
            tenor(settings, "vix_3m"),
            tenor(settings, "vix_6m"),
        )
    });
    let pulse = market_pulse(&PulseInputs {
        index_closes: &index_closes,
        vix,
        new_highs: None,
        new_lows: None,
        fear_greed: settings.get_float("market", "fear_greed"),
    });

    MarketContext {
        regime,
        primary: resolve_benchmark(data_port, config.primary.as_deref()),
        secondary: resolve_benchmark(data_port, config.secondary.as_deref()),
        index: BenchmarkSnapshot::from_closes(config.index.clone(), &index_closes),
        term_structure,
        pulse,
    }
}

/// Loads the universe and scores it in file order against `market`.
pub fn run_rank_pipeline(
    data_port: &dyn DataPort,
    market: &MarketContext,
) -> Result<Ranking, TacticalError> {
    let universe = data_port.list_universe()?;
    if universe.is_empty() {
        return Err(TacticalError::Data {
            reason: "universe is empty".to_string(),
        });
    }
    tracing::info!(
        candidates = universe.len(),
        regime = %market.regime.regime,
        "starting ranking pass"
    );

    let mut pass = RankingPass::new(
        &market.regime,
        market.primary.as_ref(),
        market.secondary.as_ref(),
    );
    for profile in universe {
        let series = match data_port.fetch_series(&profile.code) {
            Ok(series) => series,
            Err(e) => {
                pass.skip(profile.code.clone(), e.to_string());
                continue;
            }
        };
        let candidate = Candidate { profile, series };
        if let Err(e) = pass.score(&candidate) {
            pass.skip(candidate.profile.code.clone(), e.to_string());
        }
    }

    let ranking = pass.finish();
    tracing::info!(
        ranked = ranking.ranked.len(),
        skipped = ranking.skipped.len(),
        "ranking pass complete"
    );
    Ok(ranking)
}

pub fn format_ranking(ranking: &Ranking, top: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<8} {:>6} {:<6} {:<22} {:>10} {:>8} {:>6}  {}",
        "#", "CODE", "SCORE", "RATING", "SECTOR", "CLOSE", "20D%", "RSI", "SIGNAL"
    );
    for (i, asset) in ranking.ranked.iter().take(top).enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<8} {:>6.1} {:<6} {:<22} {:>10.2} {:>8.2} {:>6.1}  {}",
            i + 1,
            asset.profile.code,
            asset.result.score,
            asset.result.rating,
            asset.profile.sector,
            asset.indicators.close,
            asset.performance.own.d20,
            asset.indicators.rsi,
            asset.indicators.crossover,
        );
    }
    if !ranking.sectors.is_empty() {
        let mix: Vec<String> = ranking
            .sectors
            .iter()
            .map(|(sector, count)| format!("{sector} {count}"))
            .collect();
        let _ = writeln!(out, "\nsectors: {}", mix.join(", "));
    }
    if !ranking.skipped.is_empty() {
        let _ = writeln!(out, "\nskipped:");
        for s in &ranking.skipped {
            let _ = writeln!(out, "  {}: {}", s.code, s.reason);
        }
    }
    out
}

pub fn format_indicators(code: &str, b: &IndicatorBundle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{code}");
    let _ = writeln!(out, "  close         {:.2} ({:+.2}%)", b.close, b.change_pct);
    let _ = writeln!(out, "  rsi           {:.2}", b.rsi);
    let _ = writeln!(
        out,
        "  macd          {:.4} / {:.4} / {:.4}",
        b.macd.line, b.macd.signal, b.macd.histogram
    );
    let _ = writeln!(
        out,
        "  sma 20/50/200 {:.2} / {:.2} / {:.2}",
        b.sma_20, b.sma_50, b.sma_200
    );
    let _ = writeln!(out, "  crossover     {}", b.crossover);
    let _ = writeln!(out, "  divergence    {}", b.divergence.description());
    let _ = writeln!(
        out,
        "  timeframe     daily {} / weekly {} / {} ({}/4)",
        b.timeframe.daily, b.timeframe.weekly, b.timeframe.confluence, b.timeframe.alignment
    );
    let _ = writeln!(
        out,
        "  risk          vol {:.2}% sharpe {:.2} sortino {:.2} maxdd {:.2}%",
        b.risk.volatility, b.risk.sharpe_ratio, b.risk.sortino_ratio, b.risk.max_drawdown
    );
    let _ = writeln!(out, "  bollinger     width {:.2} z {:.2}", b.bb_width, b.z_score);
    let _ = writeln!(
        out,
        "  volume        ratio {:.2} {} spike={} breakdown={} obv {}",
        b.volume.ratio, b.volume.trend, b.volume.spike, b.volume.breakdown, b.volume.obv_trend
    );
    out
}

pub fn format_market(market: &MarketContext) -> String {
    let r = &market.regime;
    let mut out = String::new();
    let _ = writeln!(out, "regime        {} ({})", r.regime, r.trading_mode);
    let _ = writeln!(
        out,
        "new longs     {} (size x{:.2})",
        if r.allow_new_longs { "allowed" } else { "blocked" },
        r.position_size_multiplier
    );
    let _ = writeln!(out, "vix           {:.2} ({})", r.vix, r.vix_level);
    let _ = writeln!(
        out,
        "index 200ma   {:.2} ({:+.2}%)",
        r.index_sma_200, r.distance_to_200ma_pct
    );
    if let Some(ts) = &market.term_structure {
        let _ = writeln!(
            out,
            "term          {} spread {:.2} ({:.2}%) fear {}",
            ts.structure,
            ts.spread,
            ts.spread_pct,
            if ts.structure.fear_is_high() { "high" } else { "low" }
        );
    }
    let _ = writeln!(
        out,
        "pulse         {:.0} ({})",
        market.pulse.score, market.pulse.stance
    );
    if let Some(index) = &market.index {
        let _ = writeln!(
            out,
            "{:<13} {:.2} ({:+.2}%) 20d {:.2}% 60d {:.2}% rsi {:.1} {}",
            index.code,
            index.close,
            index.change_pct,
            index.perf_20d,
            index.perf_60d,
            index.rsi,
            index.crossover
        );
    }
    out
}

fn run_rank(config_path: &PathBuf, top: Option<usize>) -> Result<(), TacticalError> {
    let (settings, config) = load_config(config_path)?;
    let data_port = data_port_for(&config);
    let market = build_market_context(&data_port, &config, &settings);
    let ranking = run_rank_pipeline(&data_port, &market)?;

    if ranking.ranked.is_empty() {
        return Err(TacticalError::NoData {
            code: "universe".to_string(),
        });
    }
    print!("{}", format_ranking(&ranking, top.unwrap_or(config.top).max(1)));
    Ok(())
}

fn run_indicators(config_path: &PathBuf, code: &str) -> Result<(), TacticalError> {
    let (_, config) = load_config(config_path)?;
    let data_port = data_port_for(&config);
    let series = data_port.fetch_series(code)?;
    let bundle =
        compute_indicators(&series).map_err(|e| TacticalError::insufficient(code, e))?;
    print!("{}", format_indicators(code, &bundle));
    Ok(())
}

fn run_regime(config_path: &PathBuf) -> Result<(), TacticalError> {
    let (settings, config) = load_config(config_path)?;
    let data_port = data_port_for(&config);
    let market = build_market_context(&data_port, &config, &settings);
    print!("{}", format_market(&market));
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), TacticalError> {
    let (_, config) = load_config(config_path)?;
    println!("configuration is valid");
    println!("  data dir: {}", config.data_dir.display());
    println!("  universe: {}", config.universe.display());
    println!("  index:    {}", config.index);
    Ok(())
}
