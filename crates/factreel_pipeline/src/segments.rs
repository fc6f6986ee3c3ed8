//! Pairing images with captions.

use factreel_core::{Fact, ImageAsset, Segment, SegmentRecord};
use factreel_error::{ContractError, ContractErrorKind, FactreelResult};
use std::time::Duration;

/// Builds the ordered segment list for a run.
///
/// Segment `i` always shows image `i` captioned with fact `i`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentBuilder;

impl SegmentBuilder {
    /// Pair `images[i]` with `facts[i]`, each shown for `duration_secs`.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch` if the slices differ in length
    /// - `InvalidDuration` if `duration_secs` is not positive and finite
    ///
    /// # Examples
    ///
    /// ```
    /// use factreel_core::{Fact, ImageAsset};
    /// use factreel_pipeline::SegmentBuilder;
    ///
    /// let facts: Vec<Fact> = ["A", "B", "C"]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, t)| Fact::new(i, t).unwrap())
    ///     .collect();
    /// let images: Vec<ImageAsset> = (0..3)
    ///     .map(|i| ImageAsset::new(i, format!("generated_image_{}.jpg", i), None))
    ///     .collect();
    ///
    /// let segments = SegmentBuilder::build(&images, &facts, 5.0).unwrap();
    /// let captions: Vec<_> = segments.iter().map(|s| s.caption()).collect();
    /// assert_eq!(captions, ["A", "B", "C"]);
    /// ```
    pub fn build<'a>(
        images: &'a [ImageAsset],
        facts: &'a [Fact],
        duration_secs: f64,
    ) -> FactreelResult<Vec<Segment<'a>>> {
        if images.len() != facts.len() {
            return Err(ContractError::new(ContractErrorKind::LengthMismatch {
                facts: facts.len(),
                images: images.len(),
            })
            .into());
        }
        let duration = Self::duration(duration_secs)?;

        Ok(images
            .iter()
            .zip(facts)
            .enumerate()
            .map(|(index, (image, fact))| Segment::new(index, image, fact, duration))
            .collect())
    }

    /// Build segments from per-index records.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfOrder` if record `i` does not carry index `i`
    /// - `InvalidDuration` if `duration_secs` is not positive and finite
    pub fn build_from_records<'a>(
        records: &'a [SegmentRecord],
        duration_secs: f64,
    ) -> FactreelResult<Vec<Segment<'a>>> {
        let duration = Self::duration(duration_secs)?;

        records
            .iter()
            .enumerate()
            .map(|(position, record)| -> FactreelResult<Segment<'a>> {
                if *record.index() != position || *record.image().index() != position {
                    return Err(ContractError::new(ContractErrorKind::IndexOutOfOrder {
                        expected: position,
                        found: *record.index(),
                    })
                    .into());
                }
                Ok(Segment::new(position, record.image(), record.fact(), duration))
            })
            .collect()
    }

    /// Validate a per-segment display time.
    #[track_caller]
    pub fn duration(seconds: f64) -> Result<Duration, ContractError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(ContractError::new(ContractErrorKind::InvalidDuration(seconds)));
        }
        Duration::try_from_secs_f64(seconds)
            .map_err(|_| ContractError::new(ContractErrorKind::InvalidDuration(seconds)))
    }
}

/// How long each segment is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentTiming {
    /// Every segment gets the same fixed time.
    Fixed {
        /// Seconds per segment
        seconds: f64,
    },
    /// The narration length is split evenly across segments.
    FitNarration {
        /// Seconds per segment when the narration length is unknown
        fallback_seconds: f64,
    },
}

impl Default for SegmentTiming {
    fn default() -> Self {
        SegmentTiming::Fixed { seconds: 5.0 }
    }
}

impl SegmentTiming {
    /// Seconds per segment for `count` segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use factreel_pipeline::SegmentTiming;
    /// use std::time::Duration;
    ///
    /// let fixed = SegmentTiming::Fixed { seconds: 5.0 };
    /// assert_eq!(fixed.seconds_per_segment(4, Some(Duration::from_secs(60))), 5.0);
    ///
    /// let fit = SegmentTiming::FitNarration { fallback_seconds: 5.0 };
    /// assert_eq!(fit.seconds_per_segment(4, Some(Duration::from_secs(60))), 15.0);
    /// assert_eq!(fit.seconds_per_segment(4, None), 5.0);
    /// ```
    pub fn seconds_per_segment(&self, count: usize, narration: Option<Duration>) -> f64 {
        match *self {
            SegmentTiming::Fixed { seconds } => seconds,
            SegmentTiming::FitNarration { fallback_seconds } => match narration {
                Some(length) if count > 0 && !length.is_zero() => {
                    length.as_secs_f64() / count as f64
                }
                _ => fallback_seconds,
            },
        }
    }
}
