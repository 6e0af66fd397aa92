//! Command execution: simulation assembly, paced run, and output rendering.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use eyre::WrapErr;
use ozone_config::Config;
use ozone_core::runner::{self, RunCfg};
use ozone_core::sim::TickReport;
use ozone_core::{SeededNoise, Setpoints, Simulation};
use ozone_traits::{EventSink, MonotonicClock};

/// Event sink that forwards operator events to the tracing pipeline.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "ozone_events", "{message}");
    }
}

/// Options collected from the `run` subcommand.
pub struct RunArgs {
    pub ticks: Option<u64>,
    pub scenario: Option<String>,
    pub disturbance: bool,
    pub seed: Option<u64>,
    pub tick_ms: Option<u64>,
    pub capacity: Option<usize>,
}

fn build_simulation(cfg: &Config, args: &RunArgs) -> eyre::Result<Simulation> {
    let scenario = match &args.scenario {
        Some(name) => Some(
            cfg.resolve_scenario(name)
                .ok_or_else(|| eyre::eyre!("unknown scenario '{name}'"))?,
        ),
        None => None,
    };
    let setpoints = scenario
        .as_ref()
        .map(Setpoints::from)
        .unwrap_or_default();

    let noise = match args.seed {
        Some(seed) => SeededNoise::from_seed(seed),
        None => SeededNoise::from_entropy(),
    };

    let mut sim = Simulation::builder()
        .with_setpoints(setpoints)
        .with_control((&cfg.control).into())
        .with_process((&cfg.process).into())
        .with_noise_cfg((&cfg.noise).into())
        .with_history_capacity(args.capacity.unwrap_or(cfg.simulation.history_capacity))
        .with_noise_source(noise)
        .with_event_sink(TracingEventSink)
        .build()
        .wrap_err("building simulation")?;

    if let Some(s) = &scenario {
        sim.apply_scenario(s);
    }
    sim.set_disturbance(args.disturbance);
    Ok(sim)
}

fn tick_json(report: &TickReport) -> String {
    let m = &report.metrics;
    serde_json::json!({
        "tick": report.tick,
        "ozone_mg_h": report.actuation.ozone,
        "contact_min": report.actuation.contact,
        "quality_pct": m.quality,
        "residual_mg_l": m.residual,
        "efficiency": m.efficiency,
        "energy_kwh_m3": m.energy,
        "orp_mv": m.orp,
        "uv254": m.uv254,
        "temp_c": m.temp,
        "ph": m.ph,
        "safety": report.status.safety.to_string(),
        "loops": report.status.loops.to_string(),
        "risk": report.status.risk.to_string(),
    })
    .to_string()
}

fn tick_human(report: &TickReport) -> String {
    let m = &report.metrics;
    format!(
        "tick {:>4} | O3 {:6.1} mg/h | contact {:4.1} min | quality {:4.1} % | residual {:.2} mg/L | energy {:.2} kWh/m3 | {}/{}/{}",
        report.tick,
        report.actuation.ozone,
        report.actuation.contact,
        m.quality,
        m.residual,
        m.energy,
        report.status.safety,
        report.status.loops,
        report.status.risk,
    )
}

/// Execute `run`: assemble, pace, render, summarize.
pub fn run_simulation(cfg: &Config, json: bool, args: &RunArgs) -> eyre::Result<()> {
    let mut sim = build_simulation(cfg, args)?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || {
            stop.store(true, Ordering::Relaxed);
        })
        .wrap_err("installing Ctrl-C handler")?;
    }

    let run_cfg = RunCfg {
        tick_ms: args.tick_ms.unwrap_or(cfg.simulation.tick_ms),
        max_ticks: args.ticks,
        event_throttle_ms: cfg.simulation.event_throttle_ms,
    };
    let clock = MonotonicClock::new();

    let summary = runner::run(&mut sim, &run_cfg, &clock, &stop, |report| {
        if json {
            println!("{}", tick_json(report));
        } else {
            println!("{}", tick_human(report));
        }
    });

    if json {
        let line = serde_json::json!({
            "ticks": summary.ticks,
            "final_quality_pct": summary.last.map(|r| r.metrics.quality),
            "final_residual_mg_l": summary.last.map(|r| r.metrics.residual),
            "scenario": sim.active_scenario(),
        });
        println!("{line}");
    } else {
        match summary.last {
            Some(r) => println!(
                "finished after {} ticks: quality {:.1} %, residual {:.2} mg/L, status {}",
                summary.ticks, r.metrics.quality, r.metrics.residual, r.status.safety
            ),
            None => println!("finished after 0 ticks"),
        }
    }
    Ok(())
}

/// Execute `scenarios`: list presets from config and the built-in set.
pub fn list_scenarios(cfg: &Config, json: bool) -> eyre::Result<()> {
    let mut all = cfg.scenarios.clone();
    for s in ozone_config::builtin_scenarios() {
        if !all.iter().any(|c| c.name == s.name) {
            all.push(s);
        }
    }
    if json {
        let items: Vec<serde_json::Value> = all
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "label": s.label,
                    "flow": s.flow,
                    "contamination": s.contamination,
                    "ozone": s.ozone,
                    "contact": s.contact,
                    "temp": s.temp,
                    "ph": s.ph,
                })
            })
            .collect();
        println!("{}", serde_json::json!(items));
    } else {
        for s in &all {
            println!(
                "{:<8} {} (flow {} m3/h, load {} mg/L, O3 {} mg/h, contact {} min)",
                s.name, s.label, s.flow, s.contamination, s.ozone, s.contact
            );
        }
    }
    Ok(())
}

/// Execute `self-check`: defaults must produce bounded, healthy output.
pub fn self_check(cfg: &Config, json: bool) -> eyre::Result<()> {
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .with_control((&cfg.control).into())
        .with_process((&cfg.process).into())
        .build()
        .wrap_err("building self-check simulation")?;

    let mut last = None;
    for _ in 0..5 {
        last = Some(sim.tick());
    }
    let report = last.ok_or_else(|| eyre::eyre!("self-check produced no ticks"))?;
    let m = report.metrics;
    if !(m.quality.is_finite() && m.residual.is_finite() && m.energy.is_finite()) {
        eyre::bail!("self-check produced non-finite metrics");
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "status": "OK",
                "ticks": report.tick,
                "quality_pct": m.quality,
            })
        );
    } else {
        println!("self-check OK ({} ticks, quality {:.1} %)", report.tick, m.quality);
    }
    Ok(())
}
