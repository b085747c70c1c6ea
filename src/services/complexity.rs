use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ComplexityRatioError {
    #[error("{0:?} is not of the form \"simple/complex\"")]
    Malformed(String),
    #[error("parts of {0:?} do not sum to 100")]
    WrongTotal(String),
}

/// A "simple/complex" workload split such as "80/20", parsed into the two
/// fractions the credit mix is weighted by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexityMix {
    pub simple_fraction: f64,
    pub complex_fraction: f64,
}

impl ComplexityMix {
    pub fn parse(ratio: &str) -> Result<ComplexityMix, ComplexityRatioError> {
        let parts: Vec<&str> = ratio.split('/').collect();
        let [simple, complex] = parts.as_slice() else {
            return Err(ComplexityRatioError::Malformed(ratio.to_string()));
        };
        let simple: f64 = simple
            .trim()
            .parse()
            .map_err(|_| ComplexityRatioError::Malformed(ratio.to_string()))?;
        let complex: f64 = complex
            .trim()
            .parse()
            .map_err(|_| ComplexityRatioError::Malformed(ratio.to_string()))?;
        // "nan" and "inf" parse as floats; neither is a usable percentage,
        // and NaN would slip past the comparisons below.
        if !simple.is_finite() || !complex.is_finite() {
            return Err(ComplexityRatioError::Malformed(ratio.to_string()));
        }
        if simple < 0.0 || complex < 0.0 {
            return Err(ComplexityRatioError::Malformed(ratio.to_string()));
        }
        if (simple + complex - 100.0).abs() > 1e-9 {
            return Err(ComplexityRatioError::WrongTotal(ratio.to_string()));
        }
        Ok(ComplexityMix {
            simple_fraction: simple / 100.0,
            complex_fraction: complex / 100.0,
        })
    }

    /// Weighted average of the two per-user credit levels.
    pub fn blend(&self, simple_credits: f64, complex_credits: f64) -> f64 {
        simple_credits * self.simple_fraction + complex_credits * self.complex_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_eighty_twenty_split() {
        let mix = ComplexityMix::parse("80/20").unwrap();

        assert_eq!(mix.simple_fraction, 0.8);
        assert_eq!(mix.complex_fraction, 0.2);
    }

    #[test]
    fn tolerates_whitespace_around_the_parts() {
        let mix = ComplexityMix::parse(" 60 / 40 ").unwrap();

        assert_eq!(mix.simple_fraction, 0.6);
        assert_eq!(mix.complex_fraction, 0.4);
    }

    #[test]
    fn accepts_a_one_sided_split() {
        let mix = ComplexityMix::parse("100/0").unwrap();

        assert_eq!(mix.simple_fraction, 1.0);
        assert_eq!(mix.complex_fraction, 0.0);
    }

    #[test]
    fn rejects_a_missing_separator() {
        let result = ComplexityMix::parse("80");

        assert_eq!(
            result,
            Err(ComplexityRatioError::Malformed("80".to_string()))
        );
    }

    #[test]
    fn rejects_too_many_parts() {
        let result = ComplexityMix::parse("80/10/10");

        assert_eq!(
            result,
            Err(ComplexityRatioError::Malformed("80/10/10".to_string()))
        );
    }

    #[test]
    fn rejects_non_numeric_parts() {
        let result = ComplexityMix::parse("eighty/20");

        assert_eq!(
            result,
            Err(ComplexityRatioError::Malformed("eighty/20".to_string()))
        );
    }

    #[test]
    fn rejects_negative_parts_even_when_they_sum_to_one_hundred() {
        let result = ComplexityMix::parse("-10/110");

        assert_eq!(
            result,
            Err(ComplexityRatioError::Malformed("-10/110".to_string()))
        );
    }

    #[test]
    fn rejects_non_finite_parts() {
        assert_eq!(
            ComplexityMix::parse("nan/nan"),
            Err(ComplexityRatioError::Malformed("nan/nan".to_string()))
        );
        assert_eq!(
            ComplexityMix::parse("inf/0"),
            Err(ComplexityRatioError::Malformed("inf/0".to_string()))
        );
    }

    #[test]
    fn rejects_parts_that_do_not_sum_to_one_hundred() {
        let result = ComplexityMix::parse("60/30");

        assert_eq!(
            result,
            Err(ComplexityRatioError::WrongTotal("60/30".to_string()))
        );
    }

    #[test]
    fn blend_weights_the_credit_levels() {
        let mix = ComplexityMix::parse("80/20").unwrap();

        assert_eq!(mix.blend(75.0, 600.0), 180.0);
    }
}
