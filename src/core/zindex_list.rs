//! Total geordnete Liste aller lebenden Render-Layer nach Z-Index.
//!
//! Die Liste ist immer aufsteigend sortiert und wird von zwei Sentinel-Einträgen
//! (`ZKey::Bottom`, `ZKey::Top`) eingerahmt. Jede Einfügung liefert den direkten
//! Vorgänger, damit der Aufrufer `insert_layer_above` im Backend ausführen kann.
//!
//! Die Sentinels sind Backend-Layer und werden deshalb vom Aufrufer angelegt
//! ([`ZIndexList::install_sentinels`]); die Liste selbst erzeugt keine. Vor
//! jedem `insert` prüft der Aufrufer [`ZIndexList::has_sentinels`] und legt sie
//! bei Bedarf neu an, auch nach `clear`.
//!
//! Gleichstand: Ein neu eingefügter (oder umsortierter) Layer landet über allen
//! vorhandenen Layern mit demselben Z-Index ("neuester oben").

use super::ids::LayerId;

/// Sortierschlüssel eines Eintrags; Sentinels liegen bei -∞ bzw. +∞.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ZKey {
    /// Unterer Sentinel (-∞)
    Bottom,
    /// Regulärer Z-Index
    At(i32),
    /// Oberer Sentinel (+∞)
    Top,
}

/// Eintrag der Z-Index-Liste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZIndexEntry {
    /// Referenzierter Render-Layer
    pub layer: LayerId,
    /// Sortierschlüssel
    pub z: ZKey,
}

/// Aufsteigend sortierte Layer-Liste mit Sentinels.
#[derive(Debug, Clone, Default)]
pub struct ZIndexList {
    entries: Vec<ZIndexEntry>,
}

impl ZIndexList {
    /// Erstellt eine leere Liste (ohne Sentinels).
    pub fn new() -> Self {
        Self::default()
    }

    /// Prüft, ob beide Sentinels vorhanden sind.
    pub fn has_sentinels(&self) -> bool {
        self.entries.len() >= 2
            && self.entries.first().is_some_and(|entry| entry.z == ZKey::Bottom)
            && self.entries.last().is_some_and(|entry| entry.z == ZKey::Top)
    }

    /// Setzt die beiden Sentinel-Layer ein.
    ///
    /// Bereits vorhandene Sentinels werden ersetzt, reguläre Einträge bleiben erhalten.
    pub fn install_sentinels(&mut self, bottom: LayerId, top: LayerId) {
        self.entries.retain(|entry| {
            matches!(entry.z, ZKey::At(_)) && entry.layer != bottom && entry.layer != top
        });
        self.entries.insert(
            0,
            ZIndexEntry {
                layer: bottom,
                z: ZKey::Bottom,
            },
        );
        self.entries.push(ZIndexEntry {
            layer: top,
            z: ZKey::Top,
        });
    }

    /// Fügt einen Layer mit Z-Index ein und gibt den direkten Vorgänger zurück.
    ///
    /// Ist der Layer bereits enthalten, wird er vorher entfernt, sodass jede
    /// Layer-ID höchstens einmal vorkommt. `None` bedeutet: kein Vorgänger
    /// (Liste ohne Sentinels); der Aufrufer positioniert dann nicht.
    pub fn insert(&mut self, layer: LayerId, z: i32) -> Option<LayerId> {
        self.remove(layer);
        let key = ZKey::At(z);
        // Erster Eintrag mit größerem Schlüssel → Einfügen direkt davor
        let index = self.entries.partition_point(|entry| entry.z <= key);
        self.entries.insert(index, ZIndexEntry { layer, z: key });
        index
            .checked_sub(1)
            .and_then(|prev| self.entries.get(prev))
            .map(|entry| entry.layer)
    }

    /// Ändert den Z-Index eines vorhandenen Layers (Entfernen + Einfügen).
    ///
    /// Unbekannte Layer bleiben unberührt (`None`).
    pub fn update_z_index(&mut self, layer: LayerId, z: i32) -> Option<LayerId> {
        if !self.contains(layer) {
            return None;
        }
        self.insert(layer, z)
    }

    /// Entfernt einen Layer; No-op für unbekannte IDs.
    pub fn remove(&mut self, layer: LayerId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.layer != layer || !matches!(entry.z, ZKey::At(_)));
        self.entries.len() != before
    }

    /// Leert die komplette Liste inklusive Sentinels.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Prüft, ob ein regulärer Layer enthalten ist.
    pub fn contains(&self, layer: LayerId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.layer == layer && matches!(entry.z, ZKey::At(_)))
    }

    /// Z-Index eines regulären Layers.
    pub fn z_of(&self, layer: LayerId) -> Option<i32> {
        self.entries.iter().find_map(|entry| match entry.z {
            ZKey::At(z) if entry.layer == layer => Some(z),
            _ => None,
        })
    }

    /// Alle Einträge von unten nach oben (inklusive Sentinels).
    pub fn entries(&self) -> &[ZIndexEntry] {
        &self.entries
    }

    /// Reguläre Layer von unten nach oben (ohne Sentinels).
    pub fn layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.z, ZKey::At(_)))
            .map(|entry| entry.layer)
    }

    /// Anzahl aller Einträge inklusive Sentinels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn die Liste komplett leer ist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prüft die Sortier-Invariante (für Tests und Debug-Assertions).
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].z <= pair[1].z)
    }
}
