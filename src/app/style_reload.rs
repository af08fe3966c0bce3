//! Zustandsautomat für Style-Reloads.
//!
//! `Stable → Reloading` beim ersten `set_base_style`, `Reloading → Stable`
//! sobald das Backend den zuletzt angeforderten Stil mit passendem Token
//! fertig meldet. Anfragen während eines Reloads landen in genau einem
//! Warteplatz (last-write-wins); überschriebene Anfragen verfallen still,
//! ihr Callback wird nie aufgerufen.
//!
//! Der Coordinator entscheidet nur; Abbau und Replay führt die Facade aus.

use super::materialize::log_destroy_error;
use crate::backend::{BaseStyle, MapBackend};
use crate::core::{BackendError, Geometry, LayerBinding, LayerKind, StyleToken, ZIndexList};
use std::fmt;

/// Callback nach abgeschlossenem Reload.
pub type StyleReadyCallback = Box<dyn FnOnce(&BaseStyle) + Send>;

/// Zustand des Coordinators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    /// Backend-Layer entsprechen der Registry
    Stable,
    /// Stopping-World: Backend-Mutationen werden unterdrückt
    Reloading,
}

struct StyleRequest {
    token: StyleToken,
    style: BaseStyle,
    on_ready: Option<StyleReadyCallback>,
}

impl fmt::Debug for StyleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRequest")
            .field("token", &self.token)
            .field("style", &self.style)
            .field("on_ready", &self.on_ready.is_some())
            .finish()
    }
}

/// Ergebnis von [`StyleReloadCoordinator::request`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Reload beginnt jetzt; Facade baut ab und ruft `load_style`
    BeginReload(StyleToken, BaseStyle),
    /// Reload läuft bereits; Anfrage wartet im Warteplatz
    Queued,
}

/// Ergebnis von [`StyleReloadCoordinator::style_ready`].
pub enum ReadyOutcome {
    /// Unbekanntes oder veraltetes Token
    Ignored,
    /// Wartende Anfrage muss jetzt geladen werden; bleibt `Reloading`
    LoadNext(StyleToken, BaseStyle),
    /// Reload abgeschlossen; Facade spielt die Registry neu ein
    Complete(BaseStyle, Option<StyleReadyCallback>),
}

impl fmt::Debug for ReadyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => f.write_str("Ignored"),
            Self::LoadNext(token, style) => write!(f, "LoadNext({token:?}, {style:?})"),
            Self::Complete(style, callback) => {
                write!(f, "Complete({style:?}, callback={})", callback.is_some())
            }
        }
    }
}

/// Koordiniert Abbau und Wiederaufbau bei Basis-Stil-Wechseln.
#[derive(Debug)]
pub struct StyleReloadCoordinator {
    state: ReloadState,
    current_style: BaseStyle,
    in_flight: Option<StyleRequest>,
    pending: Option<StyleRequest>,
    next_token: u64,
    sentinels: Option<(LayerBinding, LayerBinding)>,
}

impl StyleReloadCoordinator {
    /// Erstellt einen Coordinator im Zustand `Stable`.
    pub fn new(initial_style: BaseStyle) -> Self {
        Self {
            state: ReloadState::Stable,
            current_style: initial_style,
            in_flight: None,
            pending: None,
            next_token: 1,
            sentinels: None,
        }
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> ReloadState {
        self.state
    }

    /// `true` zwischen Reload-Beginn und -Abschluss.
    pub fn is_stopping_world(&self) -> bool {
        self.state == ReloadState::Reloading
    }

    /// Zuletzt vollständig geladener Stil.
    pub fn current_style(&self) -> &BaseStyle {
        &self.current_style
    }

    /// Stil, der nach Abschluss aller Anfragen aktiv sein wird.
    pub fn target_style(&self) -> &BaseStyle {
        self.pending
            .as_ref()
            .or(self.in_flight.as_ref())
            .map_or(&self.current_style, |request| &request.style)
    }

    fn allocate_token(&mut self) -> StyleToken {
        let token = StyleToken(self.next_token);
        self.next_token += 1;
        token
    }

    /// Nimmt eine Stil-Anfrage entgegen.
    pub fn request(
        &mut self,
        style: BaseStyle,
        on_ready: Option<StyleReadyCallback>,
    ) -> RequestOutcome {
        let token = self.allocate_token();
        let request = StyleRequest {
            token,
            style: style.clone(),
            on_ready,
        };
        match self.state {
            ReloadState::Stable => {
                self.state = ReloadState::Reloading;
                self.in_flight = Some(request);
                log::info!("Style-Reload beginnt: {} ({:?})", style, token);
                RequestOutcome::BeginReload(token, style)
            }
            ReloadState::Reloading => {
                if let Some(dropped) = self.pending.replace(request) {
                    log::debug!("Wartende Style-Anfrage {} verworfen", dropped.style);
                }
                log::info!("Style-Anfrage {} wartet auf laufenden Reload", style);
                RequestOutcome::Queued
            }
        }
    }

    /// Verarbeitet die Fertig-Meldung des Backends.
    pub fn style_ready(&mut self, token: StyleToken) -> ReadyOutcome {
        let matches = self
            .in_flight
            .as_ref()
            .is_some_and(|request| request.token == token);
        if !matches {
            log::warn!("Style-Fertigmeldung mit unbekanntem Token {:?} ignoriert", token);
            return ReadyOutcome::Ignored;
        }

        if let Some(next) = self.pending.take() {
            let outcome = ReadyOutcome::LoadNext(next.token, next.style.clone());
            log::info!("Style-Reload geht weiter mit wartender Anfrage {}", next.style);
            self.in_flight = Some(next);
            return outcome;
        }

        let Some(done) = self.in_flight.take() else {
            return ReadyOutcome::Ignored;
        };
        self.state = ReloadState::Stable;
        self.current_style = done.style.clone();
        log::info!("Style-Reload abgeschlossen: {}", done.style);
        ReadyOutcome::Complete(done.style, done.on_ready)
    }

    /// Legt die beiden Sentinel-Layer an, falls die Z-Index-Liste leer ist.
    pub fn ensure_sentinels<B: MapBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        zindex: &mut ZIndexList,
    ) -> Result<(), BackendError> {
        if zindex.has_sentinels() {
            return Ok(());
        }
        let bottom = create_sentinel(backend)?;
        let top = match create_sentinel(backend) {
            Ok(top) => top,
            Err(e) => {
                destroy_binding(backend, bottom);
                return Err(e);
            }
        };
        zindex.install_sentinels(bottom.layer, top.layer);
        self.sentinels = Some((bottom, top));
        log::debug!("Sentinel-Layer angelegt: {} / {}", bottom.layer, top.layer);
        Ok(())
    }

    /// Baut die Sentinel-Layer ab (best effort).
    pub fn destroy_sentinels<B: MapBackend + ?Sized>(&mut self, backend: &mut B) {
        if let Some((bottom, top)) = self.sentinels.take() {
            destroy_binding(backend, top);
            destroy_binding(backend, bottom);
        }
    }

    /// Aktuelle Sentinel-Bindings (unten, oben).
    pub fn sentinels(&self) -> Option<(LayerBinding, LayerBinding)> {
        self.sentinels
    }
}

fn create_sentinel<B: MapBackend + ?Sized>(backend: &mut B) -> Result<LayerBinding, BackendError> {
    let feed = backend.create_geometry_feed(&Geometry::Empty)?;
    match backend.create_render_layer(LayerKind::Sentinel, feed) {
        Ok(layer) => Ok(LayerBinding { layer, feed }),
        Err(e) => {
            log_destroy_error(backend.destroy_geometry_feed(feed));
            Err(e)
        }
    }
}

fn destroy_binding<B: MapBackend + ?Sized>(backend: &mut B, binding: LayerBinding) {
    log_destroy_error(backend.destroy_render_layer(binding.layer));
    log_destroy_error(backend.destroy_geometry_feed(binding.feed));
}
