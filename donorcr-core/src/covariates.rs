//! Population covariates held fixed for every prediction.
//!
//! The sub-models were fitted with cardiovascular disease history, HbA1c,
//! blood urea nitrogen and age as predictors. The calculator only asks for
//! weight, creatinine, kidney volume and sex, so the remaining predictors are
//! replaced by these representative values.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Covariates {
    /// Cardiovascular disease indicator.
    pub cvd: f64,
    /// Glycated haemoglobin (%).
    pub hba1c: f64,
    /// Blood urea nitrogen (mg/dL).
    pub bun: f64,
    /// Age (years).
    pub age: f64,
}

impl Covariates {
    pub const FIXED: Covariates = Covariates {
        cvd: 0.0,
        hba1c: 5.7,
        bun: 13.8,
        age: 50.0,
    };
}

impl Default for Covariates {
    fn default() -> Self {
        Self::FIXED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_values() {
        let c = Covariates::default();
        assert_eq!(c.cvd, 0.0);
        assert_eq!(c.hba1c, 5.7);
        assert_eq!(c.bun, 13.8);
        assert_eq!(c.age, 50.0);
    }

    #[test]
    fn risk_sum_denominator_never_zero() {
        // CVD + HbA1c + sex indicator, for both sexes.
        let c = Covariates::FIXED;
        assert!(c.cvd + c.hba1c > 0.0);
        assert!(c.cvd + c.hba1c + 1.0 > 0.0);
    }
}
