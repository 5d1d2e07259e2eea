// ==========================================
// 制造分析演示引擎 - 命令行入口
// ==========================================
// 子命令: mrp / oee / quality / suppliers / live
// 输出: 默认文本表格,--json 输出结构化结果
// ==========================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use nkj_demo_engine::api::{live_feed_settings, DemoApis, SupplierApi};
use nkj_demo_engine::app::{
    ExplorerAction, ExplorerState, OeeAction, OeeState, SupplierAction, WeightKey,
};
use nkj_demo_engine::config::ConfigManager;
use nkj_demo_engine::engine::parse_demand_input;
use nkj_demo_engine::render::render_live_update;
use nkj_demo_engine::{i18n, logging, LotSizing};

#[derive(Parser)]
#[command(name = "nkj-demo")]
#[command(about = "Manufacturing analytics demos: BOM explosion, OEE, quality Pareto, supplier risk", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long = "log-json", global = true, hide = true)]
    log_json: bool,

    /// Config file (JSON); defaults to $NKJ_DEMO_CONFIG or the user config dir
    #[arg(long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output language (en | zh-CN)
    #[arg(long = "locale", global = true, value_name = "LOCALE")]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explode the brake assembly BOM and render the requirements tree
    Mrp(MrpArgs),

    /// Calculate OEE from availability, performance and quality
    Oee(OeeArgs),

    /// Defect Pareto and yield summary per production line
    Quality(QualityArgs),

    /// Rank suppliers by a weighted risk score
    #[command(alias = "supplier")]
    Suppliers(SupplierArgs),

    /// Stream a simulated live OEE feed
    Live(LiveArgs),
}

#[derive(Args)]
struct MrpArgs {
    /// Top-level demand; non-numeric input counts as 0 and is clamped to 1
    #[arg(long, value_name = "QTY", allow_hyphen_values = true)]
    demand: Option<String>,

    /// Lot sizing rule: lfl | fixed | eoq
    #[arg(long = "lot-sizing", value_name = "RULE")]
    lot_sizing: Option<String>,

    /// Simulate a supplier delay on a leaf item (repeatable)
    #[arg(long = "delay", value_name = "ITEM")]
    delays: Vec<String>,

    /// Collapse an assembly in the rendered tree (repeatable)
    #[arg(long = "collapse", value_name = "ITEM")]
    collapse: Vec<String>,

    /// Print JSON instead of the text tree
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct OeeArgs {
    #[arg(long, value_name = "PCT", conflicts_with = "sample")]
    availability: Option<f64>,

    #[arg(long, value_name = "PCT", conflicts_with = "sample")]
    performance: Option<f64>,

    #[arg(long, value_name = "PCT", conflicts_with = "sample")]
    quality: Option<f64>,

    /// Load the first production record that carries OEE factors
    #[arg(long)]
    sample: bool,

    /// What-if: reduce downtime (+5 availability)
    #[arg(long = "improve-availability")]
    improve_availability: bool,

    /// What-if: reduce scrap (+2 quality)
    #[arg(long = "improve-quality")]
    improve_quality: bool,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct QualityArgs {
    /// Production line, or "All"
    #[arg(long, default_value = "All", value_name = "LINE")]
    line: String,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SupplierArgs {
    /// Delivery weight (0-100)
    #[arg(long, value_name = "W")]
    delivery: Option<u32>,

    /// Quality weight (0-100)
    #[arg(long, value_name = "W")]
    quality: Option<u32>,

    /// Incident weight (0-100)
    #[arg(long, value_name = "W")]
    incidents: Option<u32>,

    /// Record one incident against a supplier (repeatable)
    #[arg(long = "incident", value_name = "SUPPLIER_ID")]
    record_incidents: Vec<String>,

    /// Score a custom supplier file (.json or .csv) instead of the bundled one
    #[arg(long = "import", value_name = "PATH")]
    import: Option<PathBuf>,

    /// Date used to flag expired certifications (YYYY-MM-DD, default today)
    #[arg(long = "as-of", value_name = "DATE")]
    as_of: Option<NaiveDate>,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LiveArgs {
    /// Number of updates before the feed is cancelled
    #[arg(long, default_value_t = 5)]
    ticks: u32,

    /// Tick interval; defaults to live_feed_interval_ms from config
    #[arg(long = "interval-ms", value_name = "MS")]
    interval_ms: Option<u64>,

    /// Seed for reproducible fluctuations
    #[arg(long)]
    seed: Option<u64>,

    /// Start from the sample production record instead of the default sliders
    #[arg(long)]
    sample: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    if cli.log_json {
        logging::init_json(level);
    } else {
        logging::init_with_default(level);
    }

    let config = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    let locale = cli.locale.clone().unwrap_or_else(|| config.config().locale.clone());
    i18n::set_locale(&locale);
    tracing::debug!(config = %config.get_config_snapshot(), "生效配置");

    let apis = DemoApis::from_config(config)?;

    match cli.command {
        Commands::Mrp(args) => run_mrp(&apis, args),
        Commands::Oee(args) => run_oee(&apis, args),
        Commands::Quality(args) => run_quality(&apis, args),
        Commands::Suppliers(args) => run_suppliers(&apis, args),
        Commands::Live(args) => run_live(&apis, args).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_mrp(apis: &DemoApis, args: MrpArgs) -> Result<()> {
    let mut state = ExplorerState::from_config(apis.config.config());

    let mut actions = Vec::new();
    if let Some(demand) = &args.demand {
        actions.push(ExplorerAction::SetDemand(i64::from(parse_demand_input(demand))));
    }
    if let Some(rule) = &args.lot_sizing {
        let Some(lot_sizing) = LotSizing::from_str(rule) else {
            bail!("未知批量策略: {} (可选 lfl / fixed / eoq)", rule);
        };
        actions.push(ExplorerAction::SetLotSizing(lot_sizing));
    }
    actions.extend(args.delays.into_iter().map(ExplorerAction::SimulateDelay));
    state = apis.mrp.apply_all(&state, actions)?;

    // 命令行的 --collapse 表示目标状态而非切换
    let collapse: Vec<String> = args
        .collapse
        .into_iter()
        .filter(|item| state.is_expanded(item))
        .collect();
    state = apis
        .mrp
        .apply_all(&state, collapse.into_iter().map(ExplorerAction::ToggleNode))?;

    let view = apis.mrp.view(&state);
    if args.json {
        print_json(&view)
    } else {
        print!("{}", view.to_text());
        Ok(())
    }
}

fn run_oee(apis: &DemoApis, args: OeeArgs) -> Result<()> {
    let mut state = if args.sample {
        apis.oee.load_sample(&OeeState::default())?
    } else {
        let defaults = OeeState::default();
        OeeState::new(
            args.availability.unwrap_or(defaults.availability()),
            args.performance.unwrap_or(defaults.performance()),
            args.quality.unwrap_or(defaults.quality()),
        )
    };

    if args.improve_availability {
        state = state.reduce(OeeAction::ImproveAvailability);
    }
    if args.improve_quality {
        state = state.reduce(OeeAction::ImproveQuality);
    }

    let view = apis.oee.view(&state);
    if args.json {
        print_json(&view)
    } else {
        print!("{}", view.to_text());
        Ok(())
    }
}

fn run_quality(apis: &DemoApis, args: QualityArgs) -> Result<()> {
    let view = apis.quality.view(&args.line)?;
    if args.json {
        print_json(&view)
    } else {
        print!("{}", view.to_text());
        Ok(())
    }
}

fn run_suppliers(apis: &DemoApis, args: SupplierArgs) -> Result<()> {
    let imported;
    let api = match &args.import {
        Some(path) => {
            imported = SupplierApi::import(path, apis.config.config().default_supplier_weights)?;
            &imported
        }
        None => &apis.supplier,
    };

    let mut actions = Vec::new();
    for (key, value) in [
        (WeightKey::Delivery, args.delivery),
        (WeightKey::Quality, args.quality),
        (WeightKey::Incidents, args.incidents),
    ] {
        if let Some(v) = value {
            actions.push(SupplierAction::SetWeight(key, v));
        }
    }
    actions.extend(args.record_incidents.into_iter().map(SupplierAction::RecordIncident));
    let state = api.apply_all(&api.initial_state(), actions)?;

    let view = match args.as_of {
        Some(day) => api.view_as_of(&state, day),
        None => api.view(&state),
    };
    if args.json {
        print_json(&view)
    } else {
        print!("{}", view.to_text());
        Ok(())
    }
}

async fn run_live(apis: &DemoApis, args: LiveArgs) -> Result<()> {
    let mut settings = live_feed_settings(apis.config.config());
    if let Some(ms) = args.interval_ms {
        if ms == 0 {
            bail!("--interval-ms 必须大于 0");
        }
        settings.interval = Duration::from_millis(ms);
    }

    let state = if args.sample {
        apis.oee.load_sample(&OeeState::default())?
    } else {
        OeeState::default()
    };

    println!(
        "{}",
        i18n::t_with_args(
            "live.title",
            &[
                ("interval", &settings.interval.as_millis().to_string()),
                ("ticks", &args.ticks.to_string()),
            ],
        )
    );

    let (handle, mut updates) = apis.oee.start_live_feed(&state, settings, args.seed);
    for _ in 0..args.ticks {
        match updates.recv().await {
            Some(update) => println!("{}", render_live_update(&update)),
            None => break,
        }
    }
    handle.cancel().await;
    println!("{}", i18n::t("live.stopped"));
    Ok(())
}
