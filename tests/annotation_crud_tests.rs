//! Integrationstests für Anlegen, Ändern und Entfernen von Annotationen:
//! - Validierung (InvalidOptions vs. Kreisgruppe ohne Ergebnis)
//! - Idempotentes Entfernen
//! - Geteilte Icons und Info-Fenster über Reloads

use map_annotation_engine::core::{
    AnnotationKind, DEFAULT_MARKER_ICON, Geometry, IconKey, LayerKind, PaintKey, PaintValue,
};
use map_annotation_engine::{
    BaseStyle, CircleOptions, GroupCircleOptions, LatLng, MapFacade, MarkerCircleOptions,
    MarkerOptions, OverlayError, PolygonOptions, PolylineOptions, RecordingBackend,
};
use image::{Rgba, RgbaImage};

fn facade() -> MapFacade<RecordingBackend> {
    MapFacade::with_defaults(RecordingBackend::new())
}

fn complete_reload(facade: &mut MapFacade<RecordingBackend>) {
    let (_, token) = facade
        .backend_mut()
        .take_style_request()
        .expect("Style-Anfrage erwartet");
    facade.on_style_ready(token);
}

fn icon(color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(8, 8, Rgba(color))
}

// ─── Validierung ─────────────────────────────────────────────────────────────

#[test]
fn test_marker_without_position_is_invalid_options() {
    let mut facade = facade();

    let err = facade
        .add_marker(MarkerOptions::default())
        .expect_err("Fehler erwartet");

    assert!(matches!(
        err,
        OverlayError::InvalidOptions {
            kind: AnnotationKind::Marker,
            ..
        }
    ));
    assert_eq!(facade.annotation_count(), 0);
    assert_eq!(facade.backend().layer_count(), 0);
}

#[test]
fn test_short_shapes_are_invalid_options() {
    let mut facade = facade();

    assert!(
        facade
            .add_polyline(PolylineOptions::through(vec![LatLng::default()]))
            .is_err()
    );
    assert!(
        facade
            .add_polygon(PolygonOptions::with_outline(vec![
                LatLng::default(),
                LatLng::new(1.0, 1.0),
            ]))
            .is_err()
    );
    assert!(
        facade
            .add_single_circle(CircleOptions::around(LatLng::default(), -1.0))
            .is_err()
    );
    assert!(
        facade
            .add_marker_circle(MarkerCircleOptions::default())
            .is_err()
    );
    assert_eq!(facade.annotation_count(), 0);
}

#[test]
fn test_group_circle_with_mismatched_lengths_creates_nothing() {
    let mut facade = facade();
    let centers = vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(1.0, 0.0),
        LatLng::new(2.0, 0.0),
    ];

    let result = facade
        .add_group_circle(GroupCircleOptions::new(centers, vec![5.0, 6.0]))
        .expect("kein Fehler erwartet");

    assert!(result.is_none());
    assert_eq!(facade.annotation_count(), 0);
    assert_eq!(facade.backend().layer_count(), 0);
    assert_eq!(facade.backend().feed_count(), 0);
}

#[test]
fn test_group_circle_rejects_negative_and_nan_radii() {
    let mut facade = facade();
    let centers = vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0)];

    let negative = facade
        .add_group_circle(GroupCircleOptions::new(centers.clone(), vec![5.0, -1.0]))
        .expect("kein Fehler erwartet");
    let nan = facade
        .add_group_circle(GroupCircleOptions::new(centers.clone(), vec![f64::NAN, 1.0]))
        .expect("kein Fehler erwartet");
    assert!(negative.is_none());
    assert!(nan.is_none());
    assert_eq!(facade.annotation_count(), 0);
    assert_eq!(facade.backend().layer_count(), 0);

    let group = facade
        .add_group_circle(GroupCircleOptions::new(centers.clone(), vec![5.0, 6.0]))
        .expect("kein Fehler erwartet")
        .expect("Kreisgruppe erwartet");
    facade.set_circles(group, &centers, &[-3.0, 2.0]);
    facade.set_circles(group, &centers, &[f64::INFINITY, 2.0]);

    let radii: Vec<f64> = facade
        .circles(group)
        .expect("Kreise erwartet")
        .iter()
        .map(|circle| circle.radius_m)
        .collect();
    assert_eq!(radii, vec![5.0, 6.0]);
}

#[test]
fn test_group_circle_uses_one_aggregate_feed() {
    let mut facade = facade();
    let group = facade
        .add_group_circle(GroupCircleOptions::new(
            vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)],
            vec![5.0, 6.0],
        ))
        .expect("kein Fehler erwartet")
        .expect("Kreisgruppe erwartet");

    let annotation = facade.annotation(group).expect("Annotation erwartet");
    assert_eq!(annotation.bindings.len(), 1);
    let Some(Geometry::Circles(circles)) =
        facade.backend().feed_geometry(annotation.bindings[0].feed)
    else {
        panic!("Kreis-Aggregat erwartet");
    };
    assert_eq!(circles.len(), 2);

    // Ungleiche Längen lassen die Gruppe unverändert
    facade.set_circles(group, &[LatLng::default()], &[1.0, 2.0]);
    assert_eq!(facade.circles(group).map(<[_]>::len), Some(2));

    facade.set_circles(group, &[LatLng::default(); 3], &[1.0, 2.0, 3.0]);
    assert_eq!(facade.circles(group).map(<[_]>::len), Some(3));
}

// ─── Entfernen ───────────────────────────────────────────────────────────────

#[test]
fn test_double_remove_is_noop() {
    let mut facade = facade();
    let polygon = facade
        .add_polygon(PolygonOptions::with_outline(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ]))
        .expect("Polygon erwartet");
    assert_eq!(facade.backend().layer_count(), 4);

    facade.remove(polygon);
    facade.remove(polygon);

    assert_eq!(facade.annotation_count(), 0);
    assert!(!facade.contains(polygon));
    assert_eq!(facade.backend().layer_count(), 2);
    assert_eq!(facade.zindex_list().layers().count(), 0);
}

#[test]
fn test_setters_on_removed_handle_are_silent() {
    let mut facade = facade();
    let marker = facade
        .add_marker(MarkerOptions::at(LatLng::default()))
        .expect("Marker erwartet");
    facade.remove(marker);

    facade.set_position(marker, LatLng::new(5.0, 5.0));
    facade.set_visible(marker, false);
    facade.set_z_index(marker, 3);

    assert_eq!(facade.position(marker), None);
    assert_eq!(facade.z_index(marker), None);
    assert_eq!(facade.backend().native_marker_count(), 0);
}

// ─── Eigenschaften ───────────────────────────────────────────────────────────

#[test]
fn test_marker_defaults_and_paint() {
    let mut facade = facade();
    let marker = facade
        .add_marker(MarkerOptions {
            rotation: 45.0,
            ..MarkerOptions::at(LatLng::new(1.0, 2.0))
        })
        .expect("Marker erwartet");
    let layer = facade.annotation(marker).expect("Annotation erwartet").bindings[0].layer;
    let backend = facade.backend();

    assert_eq!(
        backend.layer(layer).map(|entry| entry.kind),
        Some(LayerKind::Symbol)
    );
    assert_eq!(
        backend.paint_of(layer, PaintKey::IconImage),
        Some(&PaintValue::Text(DEFAULT_MARKER_ICON.to_string()))
    );
    assert_eq!(
        backend.paint_of(layer, PaintKey::IconAnchor),
        Some(&PaintValue::Offset([0.5, 1.0]))
    );
    assert_eq!(
        backend.paint_of(layer, PaintKey::IconRotate),
        Some(&PaintValue::Number(45.0))
    );
}

#[test]
fn test_set_position_updates_feed_and_shadow_marker() {
    let mut facade = facade();
    let marker = facade
        .add_marker(MarkerOptions::at(LatLng::default()))
        .expect("Marker erwartet");
    let target = LatLng::new(10.0, 20.0);

    facade.set_position(marker, target);

    let feed = facade.annotation(marker).expect("Annotation erwartet").bindings[0].feed;
    assert_eq!(
        facade.backend().feed_geometry(feed),
        Some(&Geometry::Point(target))
    );
    let native = facade.native_marker_of(marker).expect("Shadow-Marker erwartet");
    assert_eq!(
        facade.backend().native_marker(native).map(|m| m.position),
        Some(target)
    );
}

#[test]
fn test_set_visible_mirrors_paint_and_shadow_marker() {
    let mut facade = facade();
    let marker = facade
        .add_marker(MarkerOptions::at(LatLng::default()))
        .expect("Marker erwartet");

    facade.set_visible(marker, false);

    let layer = facade.annotation(marker).expect("Annotation erwartet").bindings[0].layer;
    let native = facade.native_marker_of(marker).expect("Shadow-Marker erwartet");
    assert_eq!(
        facade.backend().paint_of(layer, PaintKey::Visibility),
        Some(&PaintValue::Visible(false))
    );
    assert_eq!(
        facade.backend().native_marker(native).map(|m| m.visible),
        Some(false)
    );
    assert_eq!(facade.is_visible(marker), Some(false));
}

#[test]
fn test_polygon_stroke_setters_target_outline_layer() {
    let mut facade = facade();
    let polygon = facade
        .add_polygon(PolygonOptions::with_outline(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ]))
        .expect("Polygon erwartet");

    facade.set_stroke_color(polygon, [0.0, 0.0, 0.0, 1.0]);
    facade.set_width(polygon, 4.0);
    facade.set_color(polygon, [1.0, 1.0, 0.0, 0.5]);

    let bindings = facade
        .annotation(polygon)
        .expect("Annotation erwartet")
        .bindings
        .clone();
    let backend = facade.backend();
    assert_eq!(
        backend.paint_of(bindings[0].layer, PaintKey::FillColor),
        Some(&PaintValue::Color([1.0, 1.0, 0.0, 0.5]))
    );
    assert_eq!(backend.paint_of(bindings[0].layer, PaintKey::LineWidth), None);
    assert_eq!(
        backend.paint_of(bindings[1].layer, PaintKey::LineWidth),
        Some(&PaintValue::Number(4.0))
    );
    assert_eq!(
        backend.paint_of(bindings[1].layer, PaintKey::LineColor),
        Some(&PaintValue::Color([0.0, 0.0, 0.0, 1.0]))
    );
}

#[test]
fn test_set_points_rejects_too_short_lists() {
    let mut facade = facade();
    let line = facade
        .add_polyline(PolylineOptions::through(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 1.0),
        ]))
        .expect("Linie erwartet");

    facade.set_points(line, vec![LatLng::default()]);
    assert_eq!(facade.points(line).map(<[_]>::len), Some(2));

    let longer = vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(1.0, 1.0),
        LatLng::new(2.0, 0.0),
    ];
    facade.set_points(line, longer.clone());
    let feed = facade.annotation(line).expect("Annotation erwartet").bindings[0].feed;
    assert_eq!(
        facade.backend().feed_geometry(feed),
        Some(&Geometry::LineString(longer))
    );
}

#[test]
fn test_circle_radius_setters() {
    let mut facade = facade();
    let circle = facade
        .add_single_circle(CircleOptions::around(LatLng::default(), 10.0))
        .expect("Kreis erwartet");
    let dot = facade
        .add_marker_circle(MarkerCircleOptions::at(LatLng::default(), 4.0))
        .expect("Pixel-Kreis erwartet");

    facade.set_radius(circle, 25.0);
    facade.set_radius(dot, 9.0);
    facade.set_radius(dot, -3.0);

    assert_eq!(facade.radius(circle), Some(25.0));
    assert_eq!(facade.radius(dot), Some(9.0));
    let dot_layer = facade.annotation(dot).expect("Annotation erwartet").bindings[0].layer;
    assert_eq!(
        facade.backend().paint_of(dot_layer, PaintKey::CircleRadius),
        Some(&PaintValue::Number(9.0))
    );
}

// ─── Icons ───────────────────────────────────────────────────────────────────

#[test]
fn test_identical_icons_share_one_backend_image() {
    let mut facade = facade();
    let red = icon([255, 0, 0, 255]);
    let name = IconKey::for_image(&red).to_string();
    let a = facade
        .add_marker(MarkerOptions {
            icon: Some(red.clone()),
            ..MarkerOptions::at(LatLng::new(0.0, 0.0))
        })
        .expect("Marker erwartet");
    let b = facade
        .add_marker(MarkerOptions {
            icon: Some(red.clone()),
            ..MarkerOptions::at(LatLng::new(1.0, 1.0))
        })
        .expect("Marker erwartet");
    assert_eq!(facade.backend().icon_count(), 1);
    assert!(facade.backend().has_icon(&name));

    facade.remove(a);
    assert!(facade.backend().has_icon(&name));
    facade.remove(b);
    assert!(!facade.backend().has_icon(&name));
}

#[test]
fn test_icon_switch_releases_old_image_and_survives_reload() {
    let mut facade = facade();
    let red = icon([255, 0, 0, 255]);
    let blue = icon([0, 0, 255, 255]);
    let marker = facade
        .add_marker(MarkerOptions {
            icon: Some(red.clone()),
            ..MarkerOptions::at(LatLng::default())
        })
        .expect("Marker erwartet");

    facade
        .set_marker_icon(marker, Some(&blue))
        .expect("Icon-Wechsel erwartet");

    let blue_name = IconKey::for_image(&blue).to_string();
    assert!(!facade.backend().has_icon(&IconKey::for_image(&red).to_string()));
    assert!(facade.backend().has_icon(&blue_name));

    facade.set_base_style(BaseStyle::Dark);
    complete_reload(&mut facade);

    assert!(facade.backend().has_icon(&blue_name));
    let layer = facade.annotation(marker).expect("Annotation erwartet").bindings[0].layer;
    assert_eq!(
        facade.backend().paint_of(layer, PaintKey::IconImage),
        Some(&PaintValue::Text(blue_name))
    );
    assert_eq!(
        facade.marker_icon(marker).map(|image| image.dimensions()),
        Some((8, 8))
    );
}

// ─── Info-Fenster ────────────────────────────────────────────────────────────

#[test]
fn test_click_without_listener_opens_info_window_of_titled_marker() {
    let mut facade = facade();
    let marker = facade
        .add_marker(MarkerOptions {
            title: Some("Hof".to_string()),
            ..MarkerOptions::at(LatLng::default())
        })
        .expect("Marker erwartet");
    let native = facade.native_marker_of(marker).expect("Shadow-Marker erwartet");

    assert!(facade.handle_native_marker_click(native));
    assert!(facade.is_info_window_shown(marker));

    facade.hide_info_window(marker);
    assert!(!facade.is_info_window_shown(marker));
}

#[test]
fn test_consumed_click_keeps_info_window_closed() {
    let mut facade = facade();
    let marker = facade
        .add_marker(MarkerOptions {
            title: Some("Hof".to_string()),
            ..MarkerOptions::at(LatLng::default())
        })
        .expect("Marker erwartet");
    facade.on_marker_click(|_| true);
    let native = facade.native_marker_of(marker).expect("Shadow-Marker erwartet");

    assert!(facade.handle_native_marker_click(native));
    assert!(!facade.is_info_window_shown(marker));
}

#[test]
fn test_info_window_state_survives_reload() {
    let mut facade = facade();
    let marker = facade
        .add_marker(MarkerOptions {
            title: Some("Silo".to_string()),
            ..MarkerOptions::at(LatLng::default())
        })
        .expect("Marker erwartet");
    facade.show_info_window(marker);
    let before = facade.native_marker_of(marker);

    facade.set_base_style(BaseStyle::Satellite);
    assert!(facade.native_marker_of(marker).is_none());
    assert!(facade.is_info_window_shown(marker));
    complete_reload(&mut facade);

    let after = facade.native_marker_of(marker).expect("Shadow-Marker erwartet");
    assert_ne!(Some(after), before);
    assert!(facade.is_info_window_shown(marker));
    assert_eq!(facade.backend().native_marker_count(), 1);
    assert_eq!(facade.title(marker), Some("Silo"));
}

#[test]
fn test_unknown_native_marker_click_is_not_consumed() {
    let mut facade = facade();
    assert!(!facade.handle_native_marker_click(map_annotation_engine::core::NativeMarkerId(77)));
    assert!(!facade.handle_info_window_click(map_annotation_engine::core::NativeMarkerId(77)));
}
