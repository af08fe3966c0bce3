//! Opake, typisierte Handles für Annotationen.
//!
//! Ein Handle bleibt über Style-Reloads hinweg gültig; nur die Backend-IDs
//! dahinter ändern sich. Die Fähigkeits-Traits (`Colored`, `Stroked`, …)
//! legen fest, welche Setter für welche Annotation-Art erlaubt sind.

/// Stabile, engine-interne Identität einer Annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

/// Art einer Annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Icon-Marker mit Shadow-Marker für Hit-Tests
    Marker,
    /// Linienzug
    Polyline,
    /// Polygon (Fläche + Umriss)
    Polygon,
    /// Geographischer Einzelkreis (Radius in Metern)
    Circle,
    /// Pixel-Kreis an einem Punkt (Radius in Pixeln)
    MarkerCircle,
    /// Viele Kreise in einem gemeinsamen Feed
    GroupCircle,
}

/// Gemeinsame Schnittstelle aller Handle-Typen.
pub trait AnnotationHandle: Copy {
    /// Annotation-Art des Handles
    const KIND: AnnotationKind;

    /// Stabile Annotation-ID hinter dem Handle.
    fn id(self) -> AnnotationId;
}

macro_rules! annotation_handle {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) AnnotationId);

        impl AnnotationHandle for $name {
            const KIND: AnnotationKind = AnnotationKind::$kind;

            fn id(self) -> AnnotationId {
                self.0
            }
        }

        impl From<$name> for AnnotationId {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }
    };
}

annotation_handle!(
    /// Handle eines Markers
    MarkerHandle => Marker
);
annotation_handle!(
    /// Handle eines Linienzugs
    PolylineHandle => Polyline
);
annotation_handle!(
    /// Handle eines Polygons
    PolygonHandle => Polygon
);
annotation_handle!(
    /// Handle eines geographischen Einzelkreises
    CircleHandle => Circle
);
annotation_handle!(
    /// Handle eines Pixel-Kreises
    MarkerCircleHandle => MarkerCircle
);
annotation_handle!(
    /// Handle einer Kreisgruppe
    GroupCircleHandle => GroupCircle
);

/// Annotationen mit Hauptfarbe (Linie bzw. Füllung).
pub trait Colored: AnnotationHandle {}
/// Annotationen mit separater Umrissfarbe.
pub trait Stroked: AnnotationHandle {}
/// Annotationen mit einstellbarer Linien- bzw. Umrissstärke.
pub trait Widthed: AnnotationHandle {}
/// Annotationen aus einer Punktliste.
pub trait Pointed: AnnotationHandle {}
/// Annotationen mit Mittelpunkt und Radius.
pub trait Centered: AnnotationHandle {}

impl Colored for PolylineHandle {}
impl Colored for PolygonHandle {}
impl Colored for CircleHandle {}
impl Colored for MarkerCircleHandle {}
impl Colored for GroupCircleHandle {}

impl Stroked for PolygonHandle {}
impl Stroked for CircleHandle {}
impl Stroked for MarkerCircleHandle {}
impl Stroked for GroupCircleHandle {}

impl Widthed for PolylineHandle {}
impl Widthed for PolygonHandle {}
impl Widthed for CircleHandle {}
impl Widthed for MarkerCircleHandle {}

impl Pointed for PolylineHandle {}
impl Pointed for PolygonHandle {}

impl Centered for CircleHandle {}
impl Centered for MarkerCircleHandle {}
