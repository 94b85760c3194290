use serde::Deserialize;
use std::fs;
use std::io::Read;
use vitals_chart::api::{ChartEngine, ChartOptions, RenderOutcome};
use vitals_chart::core::ChartData;
use vitals_chart::render::NullRenderer;

/// Headless render fixture: surface size, options and chart data.
#[derive(Debug, Deserialize)]
struct SceneFixture {
    width: u32,
    height: u32,
    #[serde(default)]
    options: ChartOptions,
    data: ChartData,
}

fn main() {
    let _ = vitals_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let raw = read_input()?;
    let fixture: SceneFixture =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;

    let renderer = NullRenderer::attached(fixture.width, fixture.height);
    let mut engine = ChartEngine::new(renderer, "scene-dump", fixture.options)
        .map_err(|err| err.to_string())?;
    engine.set_data(fixture.data);

    match engine.render().map_err(|err| err.to_string())? {
        RenderOutcome::Rendered { .. } => {}
        RenderOutcome::Deferred => return Err("surface size must be > 0".to_owned()),
    }

    let json = engine
        .snapshot()
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn read_input() -> Result<String, String> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            fs::read_to_string(&path).map_err(|err| format!("failed to read `{path}`: {err}"))
        }
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            Ok(raw)
        }
    }
}
