//! Discounts

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Errors specific to discount codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// The code is not in the table.
    #[error("invalid discount code: {0:?}")]
    UnknownCode(String),

    /// A configured rate falls outside `0..=1`.
    #[error("discount rate for {code} must be between 0 and 1, got {rate}")]
    RateOutOfRange {
        /// Offending code
        code: String,
        /// Offending rate
        rate: Decimal,
    },

    /// A configured rate could not be parsed.
    #[error("invalid discount rate for {code}: {value:?}")]
    InvalidRate {
        /// Offending code
        code: String,
        /// Raw value
        value: String,
    },

    /// A code was empty after normalisation.
    #[error("discount codes can't be empty")]
    EmptyCode,
}

/// Normalise user-entered codes for lookup.
pub fn normalise_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// A discount code table: code → fractional rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCodes {
    rates: FxHashMap<String, Decimal>,
}

impl DiscountCodes {
    /// Build a table, validating every rate.
    ///
    /// # Errors
    ///
    /// Returns a `DiscountError` if a code is empty or a rate is outside `0..=1`.
    pub fn new<I, S>(rates: I) -> Result<Self, DiscountError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let rates = rates
            .into_iter()
            .map(|(code, rate)| {
                let code = normalise_code(code.as_ref());

                if code.is_empty() {
                    return Err(DiscountError::EmptyCode);
                }

                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(DiscountError::RateOutOfRange { code, rate });
                }

                Ok((code, rate))
            })
            .collect::<Result<FxHashMap<_, _>, _>>()?;

        Ok(Self { rates })
    }

    /// Load a table from YAML: a map of code to rate, where a rate is either a
    /// fraction (`0.25`) or a percentage string (`"25%"`).
    ///
    /// # Errors
    ///
    /// Returns a `DiscountConfigError` if the YAML is malformed or a rate is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, DiscountConfigError> {
        let raw: FxHashMap<String, RawRate> = serde_norway::from_str(yaml)?;

        let parsed = raw
            .into_iter()
            .map(|(code, rate)| parse_rate(&code, &rate).map(|rate| (code, rate)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(parsed)?)
    }

    /// Look up a code, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DiscountError::UnknownCode` if the code isn't in the table.
    pub fn lookup(&self, code: &str) -> Result<AppliedDiscount, DiscountError> {
        let code = normalise_code(code);

        match self.rates.get(&code) {
            Some(rate) => Ok(AppliedDiscount { rate: *rate, code }),
            None => Err(DiscountError::UnknownCode(code)),
        }
    }

    /// Get the number of codes in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for DiscountCodes {
    fn default() -> Self {
        Self {
            rates: [
                ("GONCY10".to_string(), Decimal::new(10, 2)),
                ("AGUANTEWALLBIT".to_string(), Decimal::new(25, 2)),
                ("RAZER".to_string(), Decimal::new(50, 2)),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// Errors loading a discount table from configuration.
#[derive(Debug, Error)]
pub enum DiscountConfigError {
    /// YAML parsing error
    #[error("failed to parse discount codes: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Table validation error
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRate {
    Number(f64),
    Text(String),
}

fn parse_rate(code: &str, raw: &RawRate) -> Result<Decimal, DiscountError> {
    let invalid = |value: String| DiscountError::InvalidRate {
        code: code.to_string(),
        value,
    };

    match raw {
        RawRate::Number(value) => {
            // Round-trip through the shortest decimal representation so 0.1
            // stays 0.1 instead of the nearest binary fraction.
            value
                .to_string()
                .parse::<Decimal>()
                .map_err(|_err| invalid(value.to_string()))
        }
        RawRate::Text(text) => {
            let trimmed = text.trim();

            if let Some(percent) = trimmed.strip_suffix('%') {
                percent
                    .trim()
                    .parse::<Decimal>()
                    .ok()
                    .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| invalid(text.clone()))
            } else {
                trimmed
                    .parse::<Decimal>()
                    .map_err(|_err| invalid(text.clone()))
            }
        }
    }
}

/// The discount currently applied to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDiscount {
    /// Normalised code
    pub code: String,

    /// Fractional rate, `0..=1`
    pub rate: Decimal,
}

impl AppliedDiscount {
    /// Whole-number percentage for display, e.g. `50` for a rate of `0.5`.
    pub fn percent(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).round_dp(0)
    }
}

impl fmt::Display for AppliedDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.code, self.percent())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_table_has_three_codes() -> TestResult {
        let codes = DiscountCodes::default();

        assert_eq!(codes.len(), 3);
        assert_eq!(codes.lookup("GONCY10")?.rate, Decimal::new(1, 1));
        assert_eq!(codes.lookup("AGUANTEWALLBIT")?.rate, Decimal::new(25, 2));
        assert_eq!(codes.lookup("RAZER")?.rate, Decimal::new(5, 1));

        Ok(())
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() -> TestResult {
        let codes = DiscountCodes::default();

        let applied = codes.lookup("  razer ")?;

        assert_eq!(applied.code, "RAZER");
        assert_eq!(applied.percent(), Decimal::from(50));

        Ok(())
    }

    #[test]
    fn unknown_code_errors_with_normalised_code() {
        let codes = DiscountCodes::default();

        assert_eq!(
            codes.lookup("nope"),
            Err(DiscountError::UnknownCode("NOPE".to_string()))
        );
    }

    #[test]
    fn new_rejects_out_of_range_rates() {
        let result = DiscountCodes::new([("HALF", Decimal::new(15, 1))]);

        assert!(
            matches!(result, Err(DiscountError::RateOutOfRange { ref code, .. }) if code == "HALF"),
            "expected RateOutOfRange, got {result:?}"
        );
    }

    #[test]
    fn new_rejects_blank_codes() {
        let result = DiscountCodes::new([("  ", Decimal::ONE)]);

        assert_eq!(result, Err(DiscountError::EmptyCode));
    }

    #[test]
    fn loads_fractions_and_percentages_from_yaml() -> TestResult {
        let yaml = "
            spring: 0.1
            SUMMER: \"35%\"
            free: 1
        ";

        let codes = DiscountCodes::from_yaml(yaml)?;

        assert_eq!(codes.lookup("SPRING")?.rate, Decimal::new(1, 1));
        assert_eq!(codes.lookup("summer")?.rate, Decimal::new(35, 2));
        assert_eq!(codes.lookup("FREE")?.rate, Decimal::ONE);

        Ok(())
    }

    #[test]
    fn yaml_with_bad_rate_errors() {
        let result = DiscountCodes::from_yaml("broken: lots");

        assert!(
            matches!(
                result,
                Err(DiscountConfigError::Discount(DiscountError::InvalidRate { .. }))
            ),
            "expected InvalidRate, got {result:?}"
        );
    }

    #[test]
    fn applied_discount_display() -> TestResult {
        let applied = DiscountCodes::default().lookup("goncy10")?;

        assert_eq!(applied.to_string(), "GONCY10 (10%)");

        Ok(())
    }
}
