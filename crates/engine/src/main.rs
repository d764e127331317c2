use std::path::Path;

use furnish_engine_lib::command::execute_json_batch;
use furnish_engine_lib::harness::TestHarness;
use furnish_engine_lib::{EngineSettings, ViewKind};
use shared::Design;

struct Args {
    design: Option<String>,
    view: ViewKind,
    commands: Option<String>,
    save_settings: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "furnish_engine_lib=info,furnish=info".into()),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("usage: furnish [--design <file>] [--view plan|perspective] [--commands <file>] [--save-settings]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let design = match &args.design {
        Some(path) => {
            let design: Design = serde_json::from_str(&read(path)?)
                .map_err(|e| format!("Failed to parse design JSON from {path}: {e}"))?;
            tracing::info!("Loaded design from {path} ({} instances)", design.furniture.len());
            design
        }
        None => Design::default(),
    };

    let settings = EngineSettings::load();
    if args.save_settings {
        settings.save();
        tracing::info!("Saved settings");
    }
    let mut harness = TestHarness::try_new(design, args.view, settings).map_err(|e| e.to_string())?;

    let Some(path) = &args.commands else {
        println!("{}", harness.export_design_json());
        return Ok(());
    };
    let responses = execute_json_batch(&mut harness, &read(path)?)?;
    let failed = responses.iter().filter(|r| !r.success).count();
    if failed > 0 {
        tracing::warn!("{failed} of {} commands failed", responses.len());
    }
    let json = serde_json::to_string_pretty(&responses).map_err(|e| format!("Failed to encode responses: {e}"))?;
    println!("{json}");
    Ok(())
}

fn read(path: &str) -> Result<String, String> {
    std::fs::read_to_string(Path::new(path)).map_err(|e| format!("Failed to read {path}: {e}"))
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        design: None,
        view: ViewKind::Plan,
        commands: None,
        save_settings: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--design" => args.design = Some(value()?),
            "--commands" => args.commands = Some(value()?),
            "--save-settings" => args.save_settings = true,
            "--view" => {
                args.view = match value()?.as_str() {
                    "plan" => ViewKind::Plan,
                    "perspective" => ViewKind::Perspective,
                    other => return Err(format!("unknown view {other:?}")),
                }
            }
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(args)
}
