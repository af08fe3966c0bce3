//! Basis-Stil-Wechsel: Abbau, Warteschlange und Replay.

use super::MapFacade;
use crate::app::materialize;
use crate::app::style_reload::{ReadyOutcome, ReloadState, RequestOutcome, StyleReadyCallback};
use crate::backend::{BaseStyle, MapBackend};
use crate::core::StyleToken;

impl<B: MapBackend> MapFacade<B> {
    /// Wechselt den Basis-Stil.
    ///
    /// Im Zustand `Stable` beginnt der Reload sofort; während eines Reloads
    /// ersetzt die Anfrage eine eventuell wartende (last-write-wins).
    pub fn set_base_style(&mut self, style: BaseStyle) {
        self.request_style(style, None);
    }

    /// Wie [`MapFacade::set_base_style`], mit Callback nach dem Replay.
    ///
    /// Der Callback läuft, während die Facade noch ausgeliehen ist. Wird die
    /// Anfrage von einer späteren überschrieben, läuft er nie.
    pub fn set_base_style_then(
        &mut self,
        style: BaseStyle,
        on_ready: impl FnOnce(&BaseStyle) + Send + 'static,
    ) {
        self.request_style(style, Some(Box::new(on_ready)));
    }

    /// Backend meldet den angeforderten Stil als geladen.
    ///
    /// Veraltete oder unbekannte Tokens werden ignoriert.
    pub fn on_style_ready(&mut self, token: StyleToken) {
        match self.reload.style_ready(token) {
            ReadyOutcome::Ignored => {}
            ReadyOutcome::LoadNext(next, style) => self.backend.load_style(&style, next),
            ReadyOutcome::Complete(style, on_ready) => {
                self.replay();
                if let Some(callback) = on_ready {
                    callback(&style);
                }
            }
        }
    }

    /// Zuletzt vollständig geladener Basis-Stil.
    pub fn base_style(&self) -> &BaseStyle {
        self.reload.current_style()
    }

    /// Zustand des Reload-Automaten.
    pub fn reload_state(&self) -> ReloadState {
        self.reload.state()
    }

    fn request_style(&mut self, style: BaseStyle, on_ready: Option<StyleReadyCallback>) {
        match self.reload.request(style, on_ready) {
            RequestOutcome::BeginReload(token, style) => {
                self.begin_reload();
                self.backend.load_style(&style, token);
            }
            RequestOutcome::Queued => {}
        }
    }

    /// Baut alle Backend-Objekte ab; die Registry bleibt unverändert.
    fn begin_reload(&mut self) {
        for annotation in self.registry.iter_mut() {
            materialize::dematerialize(&mut self.backend, &mut self.zindex, annotation);
        }
        self.shadows.detach_all(&mut self.backend);
        self.reload.destroy_sentinels(&mut self.backend);
        self.zindex.clear();
        log::info!(
            "Stopping-World: {} Annotationen abgebaut",
            self.registry.len()
        );
    }

    /// Baut Sentinels, Icons, Layer und Shadow-Marker neu auf.
    ///
    /// Annotationen werden in `(z_index, stack_seq)`-Reihenfolge eingefügt,
    /// wodurch der Stapel von vor dem Reload exakt entsteht.
    fn replay(&mut self) {
        if let Err(e) = self
            .reload
            .ensure_sentinels(&mut self.backend, &mut self.zindex)
        {
            log::error!("Sentinel-Layer nach Reload nicht angelegt: {}", e);
        }

        for (key, image) in self.icons.iter() {
            if let Err(e) = self.backend.add_icon_image(&key.to_string(), image) {
                log::error!("Icon {} nach Reload nicht registriert: {}", key, e);
            }
        }

        let mut restored = 0usize;
        for id in self.registry.ids_in_stack_order() {
            let Some(annotation) = self.registry.get_mut(id) else {
                continue;
            };
            match materialize::materialize(&mut self.backend, &mut self.zindex, annotation) {
                Ok(()) => restored += 1,
                Err(e) => log::error!("Annotation {:?} nach Reload nicht aufgebaut: {}", id, e),
            }
        }

        self.shadows.attach_all(&mut self.backend);
        log::info!(
            "Replay abgeschlossen: {}/{} Annotationen",
            restored,
            self.registry.len()
        );
    }
}
