//! Zentrale Konfiguration für die Spline-Auswertung.
//!
//! `SplineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::Plane;
use serde::{Deserialize, Serialize};

// ── Form-Parameter ──────────────────────────────────────────────────

/// Standard-Alpha (0.5 = zentripetal).
pub const DEFAULT_ALPHA: f32 = 0.5;
/// Standard-Tension (0.0 = klassische Catmull-Rom-Tangenten).
pub const DEFAULT_TENSION: f32 = 0.0;
/// Standard-Abstand (0.0 = feste Parameter-Schritte statt Arc-Length).
pub const DEFAULT_SPACING: f32 = 0.0;

// ── Abtastung ───────────────────────────────────────────────────────

/// Anzahl fester Parameter-Schritte pro Segment (Schrittweite 1/10).
pub const FIXED_STEP_SAMPLES: usize = 10;
/// Parameter-Schrittweite der Längenschätzung eines Segments.
pub const LENGTH_ESTIMATE_STEP: f32 = 0.25;
/// Grundauflösung der Arc-Length-Abtastung.
pub const ARC_LENGTH_RESOLUTION: f32 = 10.0;
/// Unterteilungen pro Längeneinheit (Auflösung × 10, empirisch).
pub const DIVISIONS_PER_UNIT: f32 = ARC_LENGTH_RESOLUTION * 10.0;
/// Obergrenze der Lauf-Schritte pro Segment.
pub const MAX_DIVISIONS: usize = 1 << 20;

// ── Kontrollpunkte ──────────────────────────────────────────────────

/// Abstand der Phantom-Punkte hinter den ersten beiden echten Punkten.
pub const PHANTOM_DISTANCE: f32 = 2.0;
/// Betragsgrenze je Koordinate. Darüber laufen Abstände und Koeffizienten
/// in f32 über, solche Punkte werden abgewiesen.
pub const MAX_COORDINATE: f32 = 1.0e15;
/// Initiale Kapazität des Kontrollpunkt-Puffers.
pub const CONTROL_POINT_CAPACITY: usize = 40;
/// Initiale Kapazität des Spline-Punkt-Puffers.
pub const SPLINE_POINT_CAPACITY: usize = 200;

/// Abtast-Strategie, abgeleitet aus `spacing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingMode {
    /// Feste Parameter-Schritte (spacing == 0)
    FixedStep,
    /// Gleichmäßige Bogenlänge mit dem angegebenen Abstand
    ArcLength(f32),
}

/// Form- und Abtast-Parameter einer Kurve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineShape {
    /// Exponent der Knoten-Parametrisierung (0 = uniform, 0.5 = zentripetal, 1 = chordal)
    pub alpha: f32,
    /// Tangenten-Skalierung (0 = Catmull-Rom, 1 = Tangente null)
    pub tension: f32,
    /// Abstand der Arc-Length-Punkte; 0 schaltet auf feste Parameter-Schritte
    pub spacing: f32,
    /// Qualitätsparameter: Unterteilungen pro geschätzter Längeneinheit
    pub divisions_per_unit: f32,
}

impl Default for SplineShape {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            tension: DEFAULT_TENSION,
            spacing: DEFAULT_SPACING,
            divisions_per_unit: DIVISIONS_PER_UNIT,
        }
    }
}

impl SplineShape {
    /// Erstellt Parameter mit Standard-Qualität; Werte werden geklemmt.
    pub fn new(alpha: f32, tension: f32, spacing: f32) -> Self {
        Self {
            alpha,
            tension,
            spacing,
            divisions_per_unit: DIVISIONS_PER_UNIT,
        }
        .sanitized()
    }

    /// Klemmt alle Werte in ihren gültigen Bereich.
    pub fn sanitized(self) -> Self {
        Self {
            alpha: clamp01(self.alpha),
            tension: clamp01(self.tension),
            spacing: clamp_spacing(self.spacing),
            divisions_per_unit: if self.divisions_per_unit.is_finite() {
                self.divisions_per_unit.max(1.0)
            } else {
                DIVISIONS_PER_UNIT
            },
        }
    }

    /// Liefert die Abtast-Strategie für den aktuellen Abstand.
    pub fn sampling_mode(&self) -> SamplingMode {
        if self.spacing > 0.0 {
            SamplingMode::ArcLength(self.spacing)
        } else {
            SamplingMode::FixedStep
        }
    }
}

/// Klemmt auf [0, 1]; NaN wird zu 0.
pub(crate) fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Klemmt auf [0, ∞); NaN wird zu 0.
pub(crate) fn clamp_spacing(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Spline-Optionen.
/// Wird als `catmull_rom_splines.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SplineOptions {
    /// Form- und Abtast-Parameter
    #[serde(flatten)]
    pub shape: SplineShape,
    /// Threads für die Batch-Auswertung (0 = rayon-Standard)
    #[serde(default)]
    pub batch_threads: usize,
    /// Constraint-Ebene für Kontrollpunkte
    #[serde(default)]
    pub plane: Plane,
}

impl SplineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.sanitized()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("catmull_rom_splines"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("catmull_rom_splines.toml")
    }

    /// Optionen mit geklemmten Form-Parametern.
    pub fn sanitized(self) -> Self {
        Self {
            shape: self.shape.sanitized(),
            ..self
        }
    }
}
