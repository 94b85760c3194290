use vitals_chart::api::{
    ChartEngine, ChartOptions, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot,
};
use vitals_chart::core::{ChartData, Dataset, Label, Padding, PointId};
use vitals_chart::extensions::EventBus;
use vitals_chart::interaction::{PointerEvent, TooltipSize};
use vitals_chart::render::NullRenderer;
use vitals_chart::ChartError;

fn rendered_engine() -> ChartEngine<NullRenderer> {
    let labels = (0..4).map(|i| Label::raw(format!("d{i}")));
    let data = ChartData::new(labels).with_dataset(Dataset::from_values([98.0, 97.0, 99.0, 96.0]));
    let options = ChartOptions::default().with_padding(Padding::uniform(8.0));
    let mut engine =
        ChartEngine::new(NullRenderer::attached(400, 200), "spo2", options).expect("engine init");
    engine.set_data(data);
    engine.render().expect("render");
    engine
}

#[test]
fn snapshot_captures_layout_selection_and_hover() {
    let bus = EventBus::new();
    let mut engine = rendered_engine();
    engine.mount_on(&bus);
    engine
        .click(PointId::new(0, 2, 0), PointerEvent::at(0.0, 0.0))
        .expect("click");
    engine
        .pointer_enter(PointId::new(0, 1, 0), TooltipSize::new(40.0, 20.0))
        .expect("hover");

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.chart_id, "spo2");
    assert_eq!(snapshot.markers.len(), 4);
    assert_eq!(snapshot.selected, vec![PointId::new(0, 2, 0)]);
    assert_eq!(snapshot.hovered, Some(PointId::new(0, 1, 0)));
    assert!(snapshot.mounted);
    let layout = snapshot.layout.expect("layout");
    assert_eq!(layout.outer.width, 416.0);
}

#[test]
fn snapshot_contract_v1_round_trips() {
    let snapshot = rendered_engine().snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schemaVersion\": 1"));
    assert!(json.contains("\"chartId\": \"spo2\""));

    let parsed = EngineSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    assert_eq!(
        EngineSnapshot::from_json_compat_str(&bare).expect("parse bare"),
        snapshot
    );
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let snapshot = rendered_engine().snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replace(
            &format!("\"schemaVersion\": {ENGINE_SNAPSHOT_JSON_SCHEMA_V1}"),
            "\"schemaVersion\": 9",
        );
    let err = EngineSnapshot::from_json_compat_str(&json).expect_err("version 9");
    assert!(matches!(err, ChartError::Serialization(_)));
}

#[test]
fn unrendered_engine_snapshot_is_empty() {
    let engine = ChartEngine::new(NullRenderer::detached(), "idle", ChartOptions::default())
        .expect("engine init");
    let snapshot = engine.snapshot();
    assert!(snapshot.layout.is_none());
    assert!(snapshot.markers.is_empty());
    assert!(!snapshot.mounted);
}
