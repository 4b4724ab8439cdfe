use std::fmt;

/// Scanner modality, determining the normalization policy
///
/// Each modality maps to a fixed target shape; resampling must hit that
/// shape exactly regardless of the source resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Modality {
    Mri,
    Fmri,
    Pet,
    Ct,
    /// Unrecognized modality; handled as a 2D image fallback
    #[default]
    Unknown,
}

impl Modality {
    /// Parses a modality from a string, case-insensitively
    ///
    /// Unrecognized strings map to [`Modality::Unknown`] rather than failing,
    /// matching the lenient contract of the pipeline entry points.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "MRI" => Modality::Mri,
            "FMRI" => Modality::Fmri,
            "PET" => Modality::Pet,
            "CT" => Modality::Ct,
            _ => Modality::Unknown,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Modality::Mri => "mri",
            Modality::Fmri => "fmri",
            Modality::Pet => "pet",
            Modality::Ct => "ct",
            Modality::Unknown => "unknown",
        }
    }

    /// Target spatial shape for this modality, without the channel axis
    ///
    /// Volumetric modalities resample to a cube; unknown inputs fall back to
    /// a 2D image shape.
    pub fn target_shape(&self) -> &'static [usize] {
        match self {
            Modality::Mri | Modality::Fmri => &[160, 160, 160],
            Modality::Pet | Modality::Ct => &[128, 128, 128],
            Modality::Unknown => &[224, 224],
        }
    }

    /// Whether this modality normalizes to a 3D volume
    pub fn is_volumetric(&self) -> bool {
        !matches!(self, Modality::Unknown)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// On-disk format a scan was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanFormat {
    /// Volumetric medical format (.nii, .nii.gz, .mgh)
    Nifti,
    /// Single-frame DICOM (.dcm)
    Dicom,
    /// Raster image (.png, .jpg, .jpeg, .bmp)
    Raster,
}

impl fmt::Display for ScanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanFormat::Nifti => "nifti",
            ScanFormat::Dicom => "dicom",
            ScanFormat::Raster => "raster",
        };
        write!(f, "{}", name)
    }
}

/// Kind of a treatment suggestion entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum TreatmentKind {
    Pharmacologic,
    Nonpharmacologic,
    Advice,
}

impl fmt::Display for TreatmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TreatmentKind::Pharmacologic => "pharmacologic",
            TreatmentKind::Nonpharmacologic => "nonpharmacologic",
            TreatmentKind::Advice => "advice",
        };
        write!(f, "{}", name)
    }
}
