//! In-Memory-Backend, das alle Aufrufe protokolliert.
//!
//! Dient der Demo-Binary, den Tests und den Benchmarks als Karte ohne Renderer.
//! Der Layer-Stapel, Feeds, Icons und native Marker werden vollständig
//! nachgebildet; `load_style` verwirft Layer, Feeds und Icons wie eine echte Karte.

use super::{BaseStyle, MapBackend};
use crate::core::{
    BackendError, CameraPosition, FeedId, Geometry, LatLng, LayerId, LayerKind, NativeMarkerId,
    PaintKey, PaintProps, PaintValue, ScreenPoint, StyleToken,
};
use image::RgbaImage;
use std::collections::HashMap;
use std::time::Duration;

/// Protokollierter Backend-Aufruf (vereinfacht).
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `create_geometry_feed`
    CreateFeed(FeedId),
    /// `update_geometry_feed`
    UpdateFeed(FeedId),
    /// `destroy_geometry_feed`
    DestroyFeed(FeedId),
    /// `create_render_layer`
    CreateLayer(LayerId, LayerKind),
    /// `destroy_render_layer`
    DestroyLayer(LayerId),
    /// `set_layer_paint_property`
    SetPaint(LayerId, PaintKey),
    /// `insert_layer_above`
    InsertAbove {
        /// Verschobener Layer
        layer: LayerId,
        /// Neuer direkter Vorgänger
        below: LayerId,
    },
    /// `add_icon_image`
    AddIcon(String),
    /// `remove_icon_image`
    RemoveIcon(String),
    /// `create_native_marker`
    CreateNativeMarker(NativeMarkerId),
    /// `set_native_marker_position`
    MoveNativeMarker(NativeMarkerId),
    /// `destroy_native_marker`
    DestroyNativeMarker(NativeMarkerId),
    /// `move_camera` / `animate_camera`
    Camera,
    /// `load_style`
    LoadStyle(BaseStyle, StyleToken),
}

/// Nachgebildeter Render-Layer
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLayer {
    /// Layer-Art
    pub kind: LayerKind,
    /// Speisender Feed
    pub feed: FeedId,
    /// Gesetzte Paint-Properties
    pub paint: PaintProps,
}

/// Nachgebildeter nativer Marker
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNativeMarker {
    /// Position
    pub position: LatLng,
    /// Sichtbarkeit
    pub visible: bool,
    /// Info-Fenster-Titel
    pub title: Option<String>,
    /// Info-Fenster offen
    pub info_window_shown: bool,
}

/// Protokollierendes In-Memory-Backend.
#[derive(Debug)]
pub struct RecordingBackend {
    next_id: u64,
    feeds: HashMap<FeedId, Geometry>,
    layers: HashMap<LayerId, RecordedLayer>,
    stack: Vec<LayerId>,
    icons: HashMap<String, (u32, u32)>,
    native_markers: HashMap<NativeMarkerId, RecordedNativeMarker>,
    camera: CameraPosition,
    viewport: ScreenPoint,
    pending_style: Option<(BaseStyle, StyleToken)>,
    calls: Vec<BackendCall>,
    fail_destroy: bool,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            next_id: 1,
            feeds: HashMap::new(),
            layers: HashMap::new(),
            stack: Vec::new(),
            icons: HashMap::new(),
            native_markers: HashMap::new(),
            camera: CameraPosition::default(),
            viewport: ScreenPoint::new(800.0, 600.0),
            pending_style: None,
            calls: Vec::new(),
            fail_destroy: false,
        }
    }
}

impl RecordingBackend {
    /// Erstellt ein leeres Backend mit 800×600-Viewport.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_destroy(&self) -> Result<(), BackendError> {
        if self.fail_destroy {
            return Err(BackendError::Rejected("Abbau deaktiviert".to_string()));
        }
        Ok(())
    }

    fn native_marker_mut(
        &mut self,
        marker: NativeMarkerId,
    ) -> Result<&mut RecordedNativeMarker, BackendError> {
        self.native_markers
            .get_mut(&marker)
            .ok_or(BackendError::UnknownNativeMarker(marker.0))
    }

    /// Lässt alle Destroy-Aufrufe fehlschlagen.
    pub fn set_fail_destroy(&mut self, fail: bool) {
        self.fail_destroy = fail;
    }

    /// Setzt die Viewport-Größe für die Projektion.
    pub fn set_viewport_size(&mut self, size: ScreenPoint) {
        self.viewport = size;
    }

    /// Entnimmt die offene Style-Anfrage (simuliert das Laden).
    pub fn take_style_request(&mut self) -> Option<(BaseStyle, StyleToken)> {
        self.pending_style.take()
    }

    /// Layer-Stapel von unten nach oben.
    pub fn stack_order(&self) -> &[LayerId] {
        &self.stack
    }

    /// Layer-Daten.
    pub fn layer(&self, layer: LayerId) -> Option<&RecordedLayer> {
        self.layers.get(&layer)
    }

    /// Wert einer Paint-Property.
    pub fn paint_of(&self, layer: LayerId, key: PaintKey) -> Option<&PaintValue> {
        self.layers.get(&layer)?.paint.get(key)
    }

    /// Daten eines Feeds.
    pub fn feed_geometry(&self, feed: FeedId) -> Option<&Geometry> {
        self.feeds.get(&feed)
    }

    /// Prüft, ob ein Icon registriert ist.
    pub fn has_icon(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    /// Daten eines nativen Markers.
    pub fn native_marker(&self, marker: NativeMarkerId) -> Option<&RecordedNativeMarker> {
        self.native_markers.get(&marker)
    }

    /// Anzahl lebender Layer.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Anzahl lebender Feeds.
    pub fn feed_count(&self) -> usize {
        self.feeds.len()
    }

    /// Anzahl registrierter Icons.
    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    /// Anzahl lebender nativer Marker.
    pub fn native_marker_count(&self) -> usize {
        self.native_markers.len()
    }

    /// Alle protokollierten Aufrufe.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Zählt Aufrufe, die `predicate` erfüllen.
    pub fn call_count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Leert das Aufrufprotokoll.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl MapBackend for RecordingBackend {
    fn create_geometry_feed(&mut self, geometry: &Geometry) -> Result<FeedId, BackendError> {
        let feed = FeedId(self.allocate());
        self.feeds.insert(feed, geometry.clone());
        self.calls.push(BackendCall::CreateFeed(feed));
        Ok(feed)
    }

    fn update_geometry_feed(
        &mut self,
        feed: FeedId,
        geometry: &Geometry,
    ) -> Result<(), BackendError> {
        let slot = self
            .feeds
            .get_mut(&feed)
            .ok_or(BackendError::UnknownFeed(feed.0))?;
        *slot = geometry.clone();
        self.calls.push(BackendCall::UpdateFeed(feed));
        Ok(())
    }

    fn destroy_geometry_feed(&mut self, feed: FeedId) -> Result<(), BackendError> {
        self.check_destroy()?;
        self.feeds
            .remove(&feed)
            .ok_or(BackendError::UnknownFeed(feed.0))?;
        self.calls.push(BackendCall::DestroyFeed(feed));
        Ok(())
    }

    fn create_render_layer(
        &mut self,
        kind: LayerKind,
        feed: FeedId,
    ) -> Result<LayerId, BackendError> {
        if !self.feeds.contains_key(&feed) {
            return Err(BackendError::UnknownFeed(feed.0));
        }
        let layer = LayerId(self.allocate());
        self.layers.insert(
            layer,
            RecordedLayer {
                kind,
                feed,
                paint: PaintProps::new(),
            },
        );
        self.stack.push(layer);
        self.calls.push(BackendCall::CreateLayer(layer, kind));
        Ok(layer)
    }

    fn destroy_render_layer(&mut self, layer: LayerId) -> Result<(), BackendError> {
        self.check_destroy()?;
        self.layers
            .remove(&layer)
            .ok_or(BackendError::UnknownLayer(layer.0))?;
        self.stack.retain(|id| *id != layer);
        self.calls.push(BackendCall::DestroyLayer(layer));
        Ok(())
    }

    fn set_layer_paint_property(
        &mut self,
        layer: LayerId,
        key: PaintKey,
        value: &PaintValue,
    ) -> Result<(), BackendError> {
        let entry = self
            .layers
            .get_mut(&layer)
            .ok_or(BackendError::UnknownLayer(layer.0))?;
        entry.paint.set(key, value.clone());
        self.calls.push(BackendCall::SetPaint(layer, key));
        Ok(())
    }

    fn insert_layer_above(&mut self, layer: LayerId, below: LayerId) -> Result<(), BackendError> {
        if !self.layers.contains_key(&layer) {
            return Err(BackendError::UnknownLayer(layer.0));
        }
        if !self.layers.contains_key(&below) {
            return Err(BackendError::UnknownLayer(below.0));
        }
        self.stack.retain(|id| *id != layer);
        let index = self
            .stack
            .iter()
            .position(|id| *id == below)
            .ok_or(BackendError::UnknownLayer(below.0))?;
        self.stack.insert(index + 1, layer);
        self.calls.push(BackendCall::InsertAbove { layer, below });
        Ok(())
    }

    fn add_icon_image(&mut self, name: &str, image: &RgbaImage) -> Result<(), BackendError> {
        self.icons.insert(name.to_string(), image.dimensions());
        self.calls.push(BackendCall::AddIcon(name.to_string()));
        Ok(())
    }

    fn remove_icon_image(&mut self, name: &str) -> Result<(), BackendError> {
        self.check_destroy()?;
        if self.icons.remove(name).is_none() {
            return Err(BackendError::Rejected(format!("unbekanntes Icon: {name}")));
        }
        self.calls.push(BackendCall::RemoveIcon(name.to_string()));
        Ok(())
    }

    fn create_native_marker(
        &mut self,
        position: LatLng,
        visible: bool,
    ) -> Result<NativeMarkerId, BackendError> {
        let marker = NativeMarkerId(self.allocate());
        self.native_markers.insert(
            marker,
            RecordedNativeMarker {
                position,
                visible,
                title: None,
                info_window_shown: false,
            },
        );
        self.calls.push(BackendCall::CreateNativeMarker(marker));
        Ok(marker)
    }

    fn set_native_marker_position(
        &mut self,
        marker: NativeMarkerId,
        position: LatLng,
    ) -> Result<(), BackendError> {
        self.native_marker_mut(marker)?.position = position;
        self.calls.push(BackendCall::MoveNativeMarker(marker));
        Ok(())
    }

    fn set_native_marker_visible(
        &mut self,
        marker: NativeMarkerId,
        visible: bool,
    ) -> Result<(), BackendError> {
        self.native_marker_mut(marker)?.visible = visible;
        Ok(())
    }

    fn set_native_marker_title(
        &mut self,
        marker: NativeMarkerId,
        title: Option<&str>,
    ) -> Result<(), BackendError> {
        self.native_marker_mut(marker)?.title = title.map(str::to_string);
        Ok(())
    }

    fn show_info_window(&mut self, marker: NativeMarkerId) -> Result<(), BackendError> {
        self.native_marker_mut(marker)?.info_window_shown = true;
        Ok(())
    }

    fn hide_info_window(&mut self, marker: NativeMarkerId) -> Result<(), BackendError> {
        self.native_marker_mut(marker)?.info_window_shown = false;
        Ok(())
    }

    fn is_info_window_shown(&self, marker: NativeMarkerId) -> bool {
        self.native_markers
            .get(&marker)
            .is_some_and(|entry| entry.info_window_shown)
    }

    fn destroy_native_marker(&mut self, marker: NativeMarkerId) -> Result<(), BackendError> {
        self.check_destroy()?;
        self.native_markers
            .remove(&marker)
            .ok_or(BackendError::UnknownNativeMarker(marker.0))?;
        self.calls.push(BackendCall::DestroyNativeMarker(marker));
        Ok(())
    }

    fn project_screen_to_map(&self, point: ScreenPoint) -> LatLng {
        self.camera.screen_to_map(point, self.viewport)
    }

    fn project_map_to_screen(&self, coord: LatLng) -> ScreenPoint {
        self.camera.map_to_screen(coord, self.viewport)
    }

    fn move_camera(&mut self, position: &CameraPosition) {
        self.camera = *position;
        self.calls.push(BackendCall::Camera);
    }

    fn animate_camera(&mut self, position: &CameraPosition, _duration: Duration) {
        // Ohne Renderer springt die Animation direkt ans Ziel
        self.camera = *position;
        self.calls.push(BackendCall::Camera);
    }

    fn camera_position(&self) -> CameraPosition {
        self.camera
    }

    fn load_style(&mut self, style: &BaseStyle, token: StyleToken) {
        self.layers.clear();
        self.feeds.clear();
        self.stack.clear();
        self.icons.clear();
        self.pending_style = Some((style.clone(), token));
        self.calls.push(BackendCall::LoadStyle(style.clone(), token));
    }
}
