//! Referenzgezählter Icon-Cache, adressiert über einen Inhalts-Hash.
//!
//! Identische Bitmaps mehrerer Marker teilen sich ein Backend-Image. Das
//! Backend-Image wird beim ersten `acquire` registriert und beim letzten
//! `release` wieder entfernt; nach einem Style-Reload registriert der
//! Coordinator alle noch lebenden Einträge neu.

use image::RgbaImage;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Inhalts-Schlüssel eines Icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconKey(pub u64);

impl IconKey {
    /// Berechnet den Schlüssel aus Abmessungen und Pixeldaten.
    pub fn for_image(image: &RgbaImage) -> Self {
        let mut hasher = DefaultHasher::new();
        image.width().hash(&mut hasher);
        image.height().hash(&mut hasher);
        image.as_raw().hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-icon-{:016x}", self.0)
    }
}

#[derive(Debug)]
struct IconEntry {
    image: Arc<RgbaImage>,
    refs: usize,
}

/// Cache aller aktuell referenzierten Marker-Icons.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: HashMap<IconKey, IconEntry>,
}

impl IconCache {
    /// Erstellt einen leeren Cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erhöht den Referenzzähler; `true` im zweiten Feld = erster Nutzer.
    pub fn acquire(&mut self, image: &RgbaImage) -> (IconKey, bool) {
        let key = IconKey::for_image(image);
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.refs += 1;
                (key, false)
            }
            None => {
                self.entries.insert(
                    key,
                    IconEntry {
                        image: Arc::new(image.clone()),
                        refs: 1,
                    },
                );
                (key, true)
            }
        }
    }

    /// Verringert den Referenzzähler; `true` = letzter Nutzer, Eintrag entfernt.
    pub fn release(&mut self, key: IconKey) -> bool {
        let Some(entry) = self.entries.get_mut(&key) else {
            return false;
        };
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs == 0 {
            self.entries.remove(&key);
            true
        } else {
            false
        }
    }

    /// Bitmap zu einem Schlüssel.
    pub fn get(&self, key: IconKey) -> Option<&Arc<RgbaImage>> {
        self.entries.get(&key).map(|entry| &entry.image)
    }

    /// Aktueller Referenzzähler (0 für unbekannte Schlüssel).
    pub fn ref_count(&self, key: IconKey) -> usize {
        self.entries.get(&key).map_or(0, |entry| entry.refs)
    }

    /// Alle lebenden Icons (für die Neu-Registrierung nach einem Reload).
    pub fn iter(&self) -> impl Iterator<Item = (IconKey, &Arc<RgbaImage>)> {
        self.entries.iter().map(|(key, entry)| (*key, &entry.image))
    }

    /// Anzahl unterschiedlicher Icons.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn kein Icon referenziert ist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dekodiert ein PNG zu einer RGBA-Bitmap.
pub fn icon_from_png(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
    Ok(decoded.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn identical_images_share_one_entry() {
        let mut cache = IconCache::new();
        let (a, first_a) = cache.acquire(&solid(4, 4, [255, 0, 0, 255]));
        let (b, first_b) = cache.acquire(&solid(4, 4, [255, 0, 0, 255]));

        assert_eq!(a, b);
        assert!(first_a);
        assert!(!first_b);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.ref_count(a), 2);
    }

    #[test]
    fn release_removes_entry_on_last_reference() {
        let mut cache = IconCache::new();
        let (key, _) = cache.acquire(&solid(2, 2, [0, 255, 0, 255]));
        cache.acquire(&solid(2, 2, [0, 255, 0, 255]));

        assert!(!cache.release(key));
        assert!(cache.release(key));
        assert!(cache.is_empty());
        assert!(!cache.release(key));
    }

    #[test]
    fn different_sizes_produce_different_keys() {
        let small = IconKey::for_image(&solid(2, 2, [0, 0, 0, 0]));
        let large = IconKey::for_image(&solid(4, 1, [0, 0, 0, 0]));
        assert_ne!(small, large);
    }

    #[test]
    fn png_roundtrip_decodes_to_rgba() {
        let original = solid(3, 2, [10, 20, 30, 255]);
        let mut bytes = Vec::new();
        original
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .expect("PNG-Encoding erwartet");

        let decoded = icon_from_png(&bytes).expect("PNG-Decoding erwartet");
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(IconKey::for_image(&decoded), IconKey::for_image(&original));
    }

    #[test]
    fn invalid_png_is_an_error() {
        assert!(icon_from_png(b"kein png").is_err());
    }
}
