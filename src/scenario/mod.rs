pub mod types;

pub use types::{MarketScenario, OptimalBundle, Parameter};

use crate::error::DomainError;

/// Rejects NaN, infinities, zero and negatives.
pub(crate) fn ensure_positive(parameter: Parameter, value: f64) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite {
            quantity: parameter.as_str(),
            value,
        });
    }
    if value <= 0.0 {
        return Err(DomainError::NonPositive {
            quantity: parameter.as_str(),
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> MarketScenario {
        MarketScenario::new(0.5, 0.5, 1.0, 1.0, 10.0).unwrap()
    }

    #[test]
    fn test_new_accepts_positive_inputs() {
        let s = MarketScenario::new(0.3, 0.7, 2.0, 4.0, 12.0).unwrap();
        assert_eq!(s.alpha(), 0.3);
        assert_eq!(s.beta(), 0.7);
        assert_eq!(s.p1(), 2.0);
        assert_eq!(s.p2(), 4.0);
        assert_eq!(s.m(), 12.0);
    }

    #[test]
    fn test_new_rejects_zero_beta() {
        let err = MarketScenario::new(0.5, 0.0, 1.0, 1.0, 10.0).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonPositive {
                quantity: "beta",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_new_rejects_negative_income() {
        let err = MarketScenario::new(0.5, 0.5, 1.0, 1.0, -3.0).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NonPositive { quantity: "m", .. }
        ));
    }

    #[test]
    fn test_new_rejects_nan_and_infinity() {
        assert!(matches!(
            MarketScenario::new(f64::NAN, 0.5, 1.0, 1.0, 10.0),
            Err(DomainError::NonFinite { quantity: "alpha", .. })
        ));
        assert!(matches!(
            MarketScenario::new(0.5, 0.5, f64::INFINITY, 1.0, 10.0),
            Err(DomainError::NonFinite { quantity: "p1", .. })
        ));
    }

    #[test]
    fn test_with_replaces_one_field() {
        let s = reference().with(Parameter::P1, 2.0).unwrap();
        assert_eq!(s.p1(), 2.0);
        assert_eq!(s.p2(), 1.0);
        assert_eq!(s.get(Parameter::M), 10.0);
    }

    #[test]
    fn test_with_rejects_and_leaves_scenario_intact() {
        let s = reference();
        assert!(s.with_income(0.0).is_err());
        assert_eq!(s.m(), 10.0);
    }

    #[test]
    fn test_with_prices_validates_both() {
        assert!(reference().with_prices(2.0, -1.0).is_err());
        let s = reference().with_prices(2.0, 3.0).unwrap();
        assert_eq!((s.p1(), s.p2()), (2.0, 3.0));
    }

    #[test]
    fn test_budget_shares_sum_to_one_for_free_exponents() {
        let s = MarketScenario::new(0.2, 0.6, 1.0, 1.0, 10.0).unwrap();
        let (s1, s2) = s.budget_shares();
        assert!((s1 - 0.25).abs() < 1e-12);
        assert!((s1 + s2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parameter_parsing_is_case_insensitive() {
        assert_eq!("ALPHA".parse::<Parameter>().unwrap(), Parameter::Alpha);
        assert_eq!(" p2 ".parse::<Parameter>().unwrap(), Parameter::P2);
        assert!("gamma".parse::<Parameter>().is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: MarketScenario =
            serde_json::from_str(r#"{"alpha":0.5,"beta":0.5,"p1":1,"p2":1,"m":10}"#).unwrap();
        assert_eq!(ok, reference());

        let bad = serde_json::from_str::<MarketScenario>(
            r#"{"alpha":0.5,"beta":0,"p1":1,"p2":1,"m":10}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_uses_field_names() {
        let json = serde_json::to_value(reference()).unwrap();
        assert_eq!(json["alpha"], 0.5);
        assert_eq!(json["m"], 10.0);
    }
}
