use crate::treatment::ResultRecord;
use std::fmt;

/// Text report formatter for a result record
pub struct TextReport<'a> {
    record: &'a ResultRecord,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(record: &'a ResultRecord) -> Self {
        Self { record }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scan Classification")?;
        writeln!(f, "===================")?;
        writeln!(f)?;
        writeln!(f, "Modality:       {}", self.record.modality)?;
        writeln!(
            f,
            "Source shape:   {}",
            self.record
                .original_shape
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join("x")
        )?;
        writeln!(f, "Top label:      {}", self.record.top_label)?;
        writeln!(f, "Confidence:     {:.1}%", self.record.confidence * 100.0)?;
        writeln!(f)?;

        writeln!(f, "Probabilities")?;
        writeln!(f, "-------------")?;
        for (label, prob) in self
            .record
            .labels
            .iter()
            .zip(self.record.probabilities.iter())
        {
            writeln!(f, "{:<28} {:>6.1}%", label, prob * 100.0)?;
        }
        writeln!(f)?;

        writeln!(f, "Treatment Suggestions")?;
        writeln!(f, "---------------------")?;
        for treatment in &self.record.treatments {
            writeln!(f, "[{}] {}", treatment.kind, treatment.name)?;
            if !treatment.notes.is_empty() {
                writeln!(f, "  {}", treatment.notes)?;
            }
            for (key, url) in &treatment.source_links {
                if url.is_empty() {
                    writeln!(f, "  {}: (no URL)", key)?;
                } else {
                    writeln!(f, "  {}: {}", key, url)?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", self.record.disclaimer)?;

        Ok(())
    }
}
