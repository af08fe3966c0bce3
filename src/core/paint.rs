//! Paint-Konfiguration der Render-Layer (Schlüssel/Wert-Paare wie im Backend-Style).

/// RGBA-Farbe mit Komponenten in 0.0..=1.0.
pub type Rgba = [f32; 4];

/// Art eines Render-Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Icon-Layer (Marker)
    Symbol,
    /// Linien-Layer
    Line,
    /// Flächen-Layer
    Fill,
    /// Pixel-Kreis-Layer
    Circle,
    /// Unsichtbarer Begrenzungs-Layer des Z-Index-Stapels
    Sentinel,
}

/// Schlüssel einer Paint-Property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintKey {
    /// Name des registrierten Icons
    IconImage,
    /// Rotation in Grad
    IconRotate,
    /// Ankerpunkt relativ zur Icon-Größe (0..1, 0..1)
    IconAnchor,
    /// Icon-Deckkraft
    IconOpacity,
    /// Linienfarbe
    LineColor,
    /// Linienstärke in Pixeln
    LineWidth,
    /// Flächenfarbe
    FillColor,
    /// Umrissfarbe einer Fläche
    FillOutlineColor,
    /// Kreisradius in Pixeln
    CircleRadius,
    /// Kreisfarbe
    CircleColor,
    /// Kreis-Umrissfarbe
    CircleStrokeColor,
    /// Kreis-Umrissstärke in Pixeln
    CircleStrokeWidth,
    /// Sichtbarkeit des Layers
    Visibility,
}

/// Wert einer Paint-Property.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintValue {
    /// Farbe
    Color(Rgba),
    /// Zahl (Breite, Radius, Rotation, Deckkraft)
    Number(f32),
    /// 2D-Offset oder Anker
    Offset([f32; 2]),
    /// Text (Icon-Name)
    Text(String),
    /// Sichtbar / unsichtbar
    Visible(bool),
}

/// Geordnete Paint-Konfiguration eines Layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaintProps {
    entries: Vec<(PaintKey, PaintValue)>,
}

impl PaintProps {
    /// Erstellt eine leere Konfiguration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt oder ersetzt einen Wert (Builder-Stil).
    pub fn with(mut self, key: PaintKey, value: PaintValue) -> Self {
        self.set(key, value);
        self
    }

    /// Setzt oder ersetzt einen Wert.
    pub fn set(&mut self, key: PaintKey, value: PaintValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Liefert den Wert zu einem Schlüssel.
    pub fn get(&self, key: PaintKey) -> Option<&PaintValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Iteriert in Einfüge-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (PaintKey, &PaintValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Anzahl der Einträge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Einträge gesetzt sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
