//! Auf- und Abbau der Backend-Layer einer Annotation.
//!
//! Aufbau und Replay nach einem Reload laufen durch dieselbe Funktion
//! [`materialize`], damit beide exakt dieselbe Stapel-Position erzeugen.

use crate::backend::MapBackend;
use crate::core::{
    Annotation, BackendError, LayerBinding, LayerId, Patch, ZIndexList,
};

/// Legt alle Feeds und Layer einer Annotation an und sortiert sie ein.
///
/// Bei einem Fehler werden bereits angelegte Teile wieder abgebaut; die
/// Annotation bleibt dann ohne Bindings zurück.
pub fn materialize<B: MapBackend + ?Sized>(
    backend: &mut B,
    zindex: &mut ZIndexList,
    annotation: &mut Annotation,
) -> Result<(), BackendError> {
    debug_assert!(annotation.bindings.is_empty());

    for spec in annotation.layer_specs() {
        let feed = backend.create_geometry_feed(&spec.geometry)?;
        let layer = match backend.create_render_layer(spec.kind, feed) {
            Ok(layer) => layer,
            Err(e) => {
                log_destroy_error(backend.destroy_geometry_feed(feed));
                dematerialize(backend, zindex, annotation);
                return Err(e);
            }
        };
        annotation.bindings.push(LayerBinding { layer, feed });

        let placed = spec
            .paint
            .iter()
            .try_for_each(|(key, value)| backend.set_layer_paint_property(layer, key, value))
            .and_then(|()| place(backend, zindex, layer, annotation.z_index));
        if let Err(e) = placed {
            dematerialize(backend, zindex, annotation);
            return Err(e);
        }
    }

    log::debug!(
        "Annotation {:?} materialisiert ({} Layer, z={})",
        annotation.id,
        annotation.bindings.len(),
        annotation.z_index
    );
    Ok(())
}

/// Entfernt alle Layer und Feeds einer Annotation (best effort).
///
/// Die Z-Index-Einträge verschwinden in jedem Fall; Backend-Fehler werden
/// protokolliert und nicht wiederholt.
pub fn dematerialize<B: MapBackend + ?Sized>(
    backend: &mut B,
    zindex: &mut ZIndexList,
    annotation: &mut Annotation,
) {
    for binding in annotation.bindings.drain(..) {
        zindex.remove(binding.layer);
        log_destroy_error(backend.destroy_render_layer(binding.layer));
        log_destroy_error(backend.destroy_geometry_feed(binding.feed));
    }
}

/// Sortiert alle Layer einer Annotation neu nach ihrem aktuellen Z-Index.
pub fn restack<B: MapBackend + ?Sized>(
    backend: &mut B,
    zindex: &mut ZIndexList,
    annotation: &Annotation,
) -> Result<(), BackendError> {
    for binding in &annotation.bindings {
        place(backend, zindex, binding.layer, annotation.z_index)?;
    }
    Ok(())
}

/// Überträgt eine Eigenschaftsänderung auf die Backend-Layer.
pub fn push_patch<B: MapBackend + ?Sized>(
    backend: &mut B,
    annotation: &Annotation,
    patch: Patch,
) -> Result<(), BackendError> {
    let specs = annotation.layer_specs();
    for (binding, spec) in annotation.bindings.iter().zip(&specs) {
        match patch {
            Patch::Geometry => backend.update_geometry_feed(binding.feed, &spec.geometry)?,
            Patch::Paint(keys) => {
                for key in keys {
                    if let Some(value) = spec.paint.get(*key) {
                        backend.set_layer_paint_property(binding.layer, *key, value)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Sortiert einen Layer ein; ohne Sentinels gibt es keinen Anker im Backend.
fn place<B: MapBackend + ?Sized>(
    backend: &mut B,
    zindex: &mut ZIndexList,
    layer: LayerId,
    z: i32,
) -> Result<(), BackendError> {
    if !zindex.has_sentinels() {
        return Err(BackendError::Rejected(
            "Z-Index-Liste ohne Sentinel-Layer".to_string(),
        ));
    }
    match zindex.insert(layer, z) {
        Some(below) => backend.insert_layer_above(layer, below),
        None => Ok(()),
    }
}

/// Protokolliert einen fehlgeschlagenen Abbau-Aufruf.
pub(crate) fn log_destroy_error(result: Result<(), BackendError>) {
    if let Err(e) = result {
        log::error!("Backend-Abbau fehlgeschlagen: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::core::{
        AnnotationBody, AnnotationId, CircleShape, CircleState, LatLng, LayerKind, PaintKey,
        PaintValue,
    };

    fn circle(z: i32) -> Annotation {
        Annotation::new(
            AnnotationId(1),
            z,
            true,
            AnnotationBody::Circle(CircleState {
                shape: CircleShape {
                    center: LatLng::default(),
                    radius_m: 10.0,
                },
                fill_color: [1.0, 0.0, 0.0, 0.5],
                stroke_color: [1.0, 0.0, 0.0, 1.0],
                stroke_width: 2.0,
            }),
        )
    }

    fn with_sentinels(backend: &mut RecordingBackend) -> ZIndexList {
        let mut zindex = ZIndexList::new();
        let mut sentinel = || {
            let feed = backend
                .create_geometry_feed(&crate::core::Geometry::Empty)
                .expect("Feed erwartet");
            backend
                .create_render_layer(LayerKind::Sentinel, feed)
                .expect("Layer erwartet")
        };
        let bottom = sentinel();
        let top = sentinel();
        zindex.install_sentinels(bottom, top);
        zindex
    }

    #[test]
    fn circle_materializes_fill_below_outline_between_sentinels() {
        let mut backend = RecordingBackend::new();
        let mut zindex = with_sentinels(&mut backend);
        let mut annotation = circle(3);

        materialize(&mut backend, &mut zindex, &mut annotation).expect("Aufbau erwartet");

        let fill = annotation.bindings[0].layer;
        let outline = annotation.bindings[1].layer;
        let stack = backend.stack_order();
        assert_eq!(stack.len(), 4);
        assert_eq!(stack[1], fill);
        assert_eq!(stack[2], outline);
        assert_eq!(
            backend.paint_of(outline, PaintKey::LineWidth),
            Some(&PaintValue::Number(2.0))
        );
    }

    #[test]
    fn materialize_without_sentinels_fails_and_cleans_up() {
        let mut backend = RecordingBackend::new();
        let mut zindex = ZIndexList::new();
        let mut annotation = circle(1);

        let result = materialize(&mut backend, &mut zindex, &mut annotation);

        assert!(matches!(result, Err(BackendError::Rejected(_))));
        assert!(annotation.bindings.is_empty());
        assert!(zindex.is_empty());
        assert_eq!(backend.layer_count(), 0);
        assert_eq!(backend.feed_count(), 0);
    }

    #[test]
    fn dematerialize_clears_bindings_and_zindex() {
        let mut backend = RecordingBackend::new();
        let mut zindex = with_sentinels(&mut backend);
        let mut annotation = circle(0);
        materialize(&mut backend, &mut zindex, &mut annotation).expect("Aufbau erwartet");

        dematerialize(&mut backend, &mut zindex, &mut annotation);

        assert!(annotation.bindings.is_empty());
        assert_eq!(zindex.layers().count(), 0);
        assert_eq!(backend.layer_count(), 2);
    }

    #[test]
    fn paint_patch_only_touches_layers_with_that_key() {
        let mut backend = RecordingBackend::new();
        let mut zindex = with_sentinels(&mut backend);
        let mut annotation = circle(0);
        materialize(&mut backend, &mut zindex, &mut annotation).expect("Aufbau erwartet");
        backend.clear_calls();

        let patch = annotation
            .set_stroke_color([0.0, 1.0, 0.0, 1.0])
            .expect("Patch erwartet");
        push_patch(&mut backend, &annotation, patch).expect("Patch erwartet");

        let outline = annotation.bindings[1].layer;
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(
            backend.paint_of(outline, PaintKey::LineColor),
            Some(&PaintValue::Color([0.0, 1.0, 0.0, 1.0]))
        );
    }
}
