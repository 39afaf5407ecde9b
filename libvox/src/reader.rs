use crate::core::{VoxError, VoxResult};

/// reader for decimal samples separated by whitespace, newlines or commas
pub struct Reader;

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader {
    /// new reader
    pub fn new() -> Self {
        Reader
    }

    /// read integer samples (endpoint pipeline input)
    ///
    /// Tokens written with a fractional part, as some capture tools emit,
    /// are accepted when the fraction is zero.
    pub fn read_i32(&self, text: &str) -> VoxResult<Vec<i32>> {
        self.read_with(text, |token| {
            token.parse::<i32>().ok().or_else(|| {
                let value = token.parse::<f64>().ok()?;
                let in_range = value.fract() == 0.0
                    && value >= i32::MIN as f64
                    && value <= i32::MAX as f64;
                in_range.then_some(value as i32)
            })
        })
    }

    /// read real samples (LPC input)
    pub fn read_f64(&self, text: &str) -> VoxResult<Vec<f64>> {
        self.read_with(text, |token| {
            token.parse::<f64>().ok().filter(|v| v.is_finite())
        })
    }

    fn read_with<T>(&self, text: &str, parse: impl Fn(&str) -> Option<T>) -> VoxResult<Vec<T>> {
        let mut samples = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let tokens = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty());
            for token in tokens {
                let value = parse(token).ok_or_else(|| VoxError::Parse {
                    line: line_no + 1,
                    token: token.to_string(),
                })?;
                samples.push(value);
            }
        }
        Ok(samples)
    }
}
