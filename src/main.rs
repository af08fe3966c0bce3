//! Overlay-Demo.
//!
//! Baut eine Facade über dem In-Memory-Backend, legt drei Annotationen mit
//! unterschiedlichem Z-Index an, wechselt den Basis-Stil und zeigt, dass der
//! Layer-Stapel nach dem Reload unter neuen Backend-IDs identisch ist.

use map_annotation_engine::{
    BaseStyle, CircleOptions, EngineOptions, LatLng, MapFacade, MarkerOptions, PolylineOptions,
    RecordingBackend,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Map Annotation Engine v{} Demo startet...",
        env!("CARGO_PKG_VERSION")
    );

    let options = EngineOptions::load_from_file(&EngineOptions::config_path());
    let mut facade = MapFacade::new(RecordingBackend::new(), options);

    facade.add_marker(MarkerOptions {
        z_index: Some(5),
        title: Some("Start".to_string()),
        draggable: true,
        ..MarkerOptions::at(LatLng::new(0.0, 0.0))
    })?;
    facade.add_polyline(PolylineOptions {
        z_index: Some(3),
        ..PolylineOptions::through(vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)])
    })?;
    facade.add_single_circle(CircleOptions {
        z_index: Some(8),
        ..CircleOptions::around(LatLng::new(0.0, 0.0), 10.0)
    })?;

    log_stack("vor Reload", &facade);

    facade.set_base_style_then(BaseStyle::Satellite, |style| {
        log::info!("Basis-Stil {} aktiv", style);
    });
    let (style, token) = facade
        .backend_mut()
        .take_style_request()
        .ok_or_else(|| anyhow::anyhow!("Backend hat keine Style-Anfrage erhalten"))?;
    log::info!("Backend lädt Stil {}", style);
    facade.on_style_ready(token);

    log_stack("nach Reload", &facade);
    Ok(())
}

fn log_stack(label: &str, facade: &MapFacade<RecordingBackend>) {
    let stack: Vec<String> = facade
        .backend()
        .stack_order()
        .iter()
        .map(ToString::to_string)
        .collect();
    log::info!("Layer-Stapel {}: {}", label, stack.join(" < "));
    log::info!(
        "Annotationen {}: {:?}",
        label,
        facade.stacked_annotations()
    );
}
