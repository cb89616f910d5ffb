//! Numeric stop ids from stop codes, or from the prefix, digits and suffix of the raw stop id
use feed_reader::RawStop;

use crate::error::{Error, Result, StopIdFailure};
use crate::patterns::leading_digits;

/// The placeholder some stops carry instead of a real code
const NO_CODE: &str = "0";

/// Largest digit run that fits in a suffix sub-band
pub const MAX_STOP_DIGITS: u32 = 999;

#[derive(Debug, Clone)]
pub struct StopIdRules {
    prefixes: Vec<(&'static str, u32)>,
    suffixes: Vec<(&'static str, u32)>,
}

impl StopIdRules {
    pub fn new(prefixes: Vec<(&'static str, u32)>, suffixes: Vec<(&'static str, u32)>) -> Self {
        Self { prefixes, suffixes }
    }

    /// Longueuil, Chambly and Saint-Jean stops, `A` to `D` platforms
    pub fn citcrc() -> Self {
        Self::new(
            vec![("LON", 100_000), ("CHB", 200_000), ("SJR", 300_000)],
            vec![("A", 1_000), ("B", 2_000), ("C", 3_000), ("D", 4_000)],
        )
    }

    /// Empty when the stop has no code or only the placeholder
    pub fn stop_code(&self, stop: &RawStop) -> String {
        match stop.code.as_deref().map(str::trim) {
            None | Some(NO_CODE) => String::new(),
            Some(code) => code.to_owned(),
        }
    }

    pub fn resolve(&self, stop: &RawStop) -> Result<u32> {
        let fail = |reason| Error::UnexpectedStopId {
            stop: Box::new(stop.clone()),
            reason,
        };

        let code = self.stop_code(stop);
        if !code.is_empty() {
            return code.parse().map_err(|_| fail(StopIdFailure::InvalidCode));
        }

        let raw_id = stop.id.as_str();
        let digits: u32 = leading_digits(raw_id)
            .ok_or_else(|| fail(StopIdFailure::NoDigits))?
            .parse()
            .map_err(|_| fail(StopIdFailure::DigitsOutOfBand))?;
        if digits > MAX_STOP_DIGITS {
            return Err(fail(StopIdFailure::DigitsOutOfBand));
        }

        let base = self
            .prefixes
            .iter()
            .find(|(prefix, _)| raw_id.starts_with(prefix))
            .map(|(_, base)| *base)
            .ok_or_else(|| fail(StopIdFailure::UnknownPrefix))?;
        let sub = self
            .suffixes
            .iter()
            .find(|(suffix, _)| raw_id.ends_with(suffix))
            .map(|(_, sub)| *sub)
            .ok_or_else(|| fail(StopIdFailure::UnknownSuffix))?;

        Ok(base + sub + digits)
    }
}
