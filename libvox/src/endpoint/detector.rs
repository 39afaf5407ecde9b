use tracing::debug;

use super::types::DetectorState;
use crate::core::{EndpointConfig, VoxError, VoxResult, WordSegment};

/// Finds the single word in a recording.
///
/// Samples must arrive in stream order. A word starts at the first sample
/// louder than the noise level and ends after `silence_run` consecutive
/// quieter samples, provided it already holds `min_word_length` samples;
/// a shorter candidate that goes quiet is thrown away and scanning resumes.
pub struct WordBoundaryDetector {
    noise_level: i32,
    min_word_length: usize,
    silence_run: usize,
    state: DetectorState,
    segment: Vec<i32>,
    onset: usize,
    position: usize,
    silence: usize,
    rejected: usize,
}

impl WordBoundaryDetector {
    /// Create a detector using `noise_level` as the amplitude threshold
    pub fn new(noise_level: i32, config: &EndpointConfig) -> Self {
        Self {
            noise_level,
            min_word_length: config.min_word_length,
            silence_run: config.silence_run,
            state: DetectorState::Idle,
            segment: Vec::new(),
            onset: 0,
            position: 0,
            silence: 0,
            rejected: 0,
        }
    }

    /// Scan a whole recording
    pub fn detect(
        noise_level: i32,
        config: &EndpointConfig,
        samples: &[i32],
    ) -> VoxResult<WordSegment> {
        let mut detector = Self::new(noise_level, config);
        detector.feed_all(samples);
        detector.finish()
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// samples consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// candidates discarded for being too short
    pub fn rejected_candidates(&self) -> usize {
        self.rejected
    }

    /// length of the current candidate
    pub fn segment_len(&self) -> usize {
        self.segment.len()
    }

    /// Push one sample
    pub fn feed(&mut self, sample: i32) -> DetectorState {
        if self.state == DetectorState::Done {
            return self.state;
        }

        let index = self.position;
        self.position += 1;
        let level = sample.saturating_abs();

        match self.state {
            DetectorState::Idle => {
                if level > self.noise_level {
                    debug!(onset = index, "word onset");
                    self.state = DetectorState::Detecting;
                    self.onset = index;
                    self.silence = 0;
                    self.segment.push(sample);
                }
            }
            DetectorState::Detecting => {
                if level >= self.noise_level {
                    self.silence = 0;
                    self.segment.push(sample);
                } else if self.segment.len() < self.min_word_length {
                    debug!(
                        onset = self.onset,
                        len = self.segment.len(),
                        "candidate too short, rejected"
                    );
                    self.rejected += 1;
                    self.segment.clear();
                    self.silence = 0;
                    self.state = DetectorState::Idle;
                } else {
                    self.silence += 1;
                    self.segment.push(sample);
                    if self.silence >= self.silence_run {
                        debug!(
                            onset = self.onset,
                            len = self.segment.len(),
                            "word offset"
                        );
                        self.state = DetectorState::Done;
                    }
                }
            }
            DetectorState::Done => {}
        }

        self.state
    }

    /// Push samples until the word is complete or the slice runs out
    pub fn feed_all(&mut self, samples: &[i32]) -> DetectorState {
        for &sample in samples {
            if self.feed(sample) == DetectorState::Done {
                break;
            }
        }
        self.state
    }

    /// End of stream: hand out the word, if any
    pub fn finish(self) -> VoxResult<WordSegment> {
        match self.state {
            DetectorState::Done => Ok(WordSegment {
                onset: self.onset,
                samples: self.segment,
            }),
            DetectorState::Detecting if self.segment.len() >= self.min_word_length => {
                debug!(
                    onset = self.onset,
                    len = self.segment.len(),
                    "stream ended inside word"
                );
                Ok(WordSegment {
                    onset: self.onset,
                    samples: self.segment,
                })
            }
            DetectorState::Detecting => Err(VoxError::detection_failed(format!(
                "stream ended inside a {}-sample candidate, shorter than {}",
                self.segment.len(),
                self.min_word_length
            ))),
            DetectorState::Idle if self.rejected > 0 => Err(VoxError::detection_failed(format!(
                "all {} candidates were shorter than {} samples",
                self.rejected, self.min_word_length
            ))),
            DetectorState::Idle => Err(VoxError::detection_failed(format!(
                "no sample rose above noise level {}",
                self.noise_level
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_word_length: usize, silence_run: usize) -> EndpointConfig {
        EndpointConfig {
            min_word_length,
            silence_run,
            ..Default::default()
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut detector = WordBoundaryDetector::new(10, &config(3, 2));

        assert_eq!(detector.feed(5), DetectorState::Idle);
        // equal to the noise level is not an onset
        assert_eq!(detector.feed(10), DetectorState::Idle);
        assert_eq!(detector.feed(-11), DetectorState::Detecting);
        assert_eq!(detector.feed(10), DetectorState::Detecting);
        assert_eq!(detector.feed(20), DetectorState::Detecting);
        assert_eq!(detector.feed(1), DetectorState::Detecting);
        assert_eq!(detector.feed(2), DetectorState::Done);
        assert_eq!(detector.feed(500), DetectorState::Done);
        // the sample fed after Done is not consumed
        assert_eq!(detector.position(), 7);

        let word = detector.finish().unwrap();
        assert_eq!(word.onset, 2);
        assert_eq!(word.samples, vec![-11, 10, 20, 1, 2]);
    }

    #[test]
    fn test_loud_sample_resets_silence() {
        let mut detector = WordBoundaryDetector::new(10, &config(2, 3));
        for s in [50, 50, 1, 1, 50, 1, 1] {
            detector.feed(s);
        }
        assert_eq!(detector.state(), DetectorState::Detecting);
        detector.feed(1);
        assert_eq!(detector.state(), DetectorState::Done);
        assert_eq!(detector.segment_len(), 8);
    }

    #[test]
    fn test_rejection_restarts_from_scratch() {
        let mut detector = WordBoundaryDetector::new(10, &config(4, 2));
        detector.feed_all(&[50, 50, 1]);
        assert_eq!(detector.state(), DetectorState::Idle);
        assert_eq!(detector.rejected_candidates(), 1);
        assert_eq!(detector.segment_len(), 0);

        detector.feed_all(&[60, 60, 60, 60, 0, 0]);
        let word = detector.finish().unwrap();
        assert_eq!(word.onset, 3);
        assert_eq!(word.samples, vec![60, 60, 60, 60, 0, 0]);
    }

    #[test]
    fn test_finish_inside_word() {
        let mut detector = WordBoundaryDetector::new(10, &config(3, 50));
        detector.feed_all(&[20, 20, 20, 20]);
        assert_eq!(detector.finish().unwrap().len(), 4);

        let mut short = WordBoundaryDetector::new(10, &config(3, 50));
        short.feed_all(&[20, 20]);
        assert!(matches!(
            short.finish(),
            Err(VoxError::DetectionFailed(_))
        ));
    }

    #[test]
    fn test_silent_stream_fails() {
        let result = WordBoundaryDetector::detect(10, &config(3, 2), &[0, 5, -10, 10]);
        assert!(matches!(result, Err(VoxError::DetectionFailed(_))));
    }
}
