//! Business assumptions for a projection run
//!
//! The [`AssumptionSet`] is the single, flat input configuration: facility
//! counts, per-unit costs, starting volumes, growth and inflation rates,
//! overhead, and financing terms. The engine treats it as an immutable
//! snapshot; the caller owns it and passes it in per run.

pub mod loader;

pub use loader::{load_scenario, save_scenario, ScenarioError, ScenarioFile};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the initial investment is funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingType {
    /// Fully equity funded, no debt service
    Equity,
    /// Partially debt funded, amortized over the loan term
    Loan,
}

/// Validation failure for an assumption set.
#[derive(Debug, Error)]
pub enum AssumptionError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Flat input configuration for one projection run.
///
/// Rates are percentages as entered (3 means 3%); the engine converts to
/// fractions internally. Persisted documents use camelCase keys and any
/// missing field falls back to the baseline default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssumptionSet {
    /// Display label, not used in any computation
    pub company_name: String,

    // Facilities
    pub num_student_lockers: u32,
    pub compartments_per_student_locker: u32,
    pub num_commercial_lockers: u32,
    pub compartments_per_commercial_locker: u32,
    pub num_drop_boxes: u32,
    pub compartments_per_drop_box: u32,

    // Capital cost per unit
    pub student_locker_cost_per_unit: f64,
    pub installation_per_student_locker: f64,
    pub commercial_locker_cost_per_unit: f64,
    pub installation_per_commercial_locker: f64,
    pub drop_box_cost_per_unit: f64,
    pub installation_per_drop_box: f64,

    // Per-unit monthly operating costs
    pub rent_per_student_locker_month: f64,
    pub rent_per_commercial_locker_month: f64,
    pub rent_per_drop_box_month: f64,
    pub maintenance_per_student_locker_month: f64,
    pub maintenance_per_commercial_locker_month: f64,
    pub maintenance_per_drop_box_month: f64,
    pub electricity_per_student_locker_month: f64,
    pub electricity_per_commercial_locker_month: f64,
    pub electricity_per_drop_box_month: f64,

    // Starting volumes and pricing
    pub student_subscribers: f64,
    pub yearly_sub_fee: f64,
    pub deliveries_per_month: f64,
    pub price_per_delivery: f64,
    pub courier_cost_per_delivery: f64,
    pub p2p_transfers_per_month: f64,
    pub price_per_transfer: f64,
    pub courier_cost_per_transfer: f64,

    // Growth rates, percent per month (compounded monthly in year 1,
    // annually in the 5-year pass)
    pub subscriber_growth_rate: f64,
    pub delivery_growth_rate: f64,
    pub p2p_growth_rate: f64,

    // Cost inflation, percent per year
    pub rent_inflation_rate: f64,
    pub salary_inflation_rate: f64,
    pub general_inflation_rate: f64,

    // Fixed overhead
    pub software_license_month: f64,
    pub insurance_month: f64,
    pub num_staff: u32,
    pub avg_salary_per_staff: f64,

    // Financial parameters
    pub discount_rate: f64,
    pub tax_rate: f64,
    pub depreciation_years: u32,
    pub working_capital_percent: f64,

    // Financing
    pub financing_type: FinancingType,
    pub loan_amount: f64,
    pub loan_interest_rate: f64,
    pub loan_term_years: u32,
}

impl Default for AssumptionSet {
    /// Baseline assumptions for a mid-size campus network.
    fn default() -> Self {
        Self {
            company_name: "Parcel Locker Co.".to_string(),

            num_student_lockers: 30,
            compartments_per_student_locker: 40,
            num_commercial_lockers: 20,
            compartments_per_commercial_locker: 40,
            num_drop_boxes: 20,
            compartments_per_drop_box: 20,

            student_locker_cost_per_unit: 8000.0,
            installation_per_student_locker: 2000.0,
            commercial_locker_cost_per_unit: 8000.0,
            installation_per_commercial_locker: 2000.0,
            drop_box_cost_per_unit: 4000.0,
            installation_per_drop_box: 1000.0,

            rent_per_student_locker_month: 200.0,
            rent_per_commercial_locker_month: 200.0,
            rent_per_drop_box_month: 150.0,
            maintenance_per_student_locker_month: 150.0,
            maintenance_per_commercial_locker_month: 150.0,
            maintenance_per_drop_box_month: 75.0,
            electricity_per_student_locker_month: 30.0,
            electricity_per_commercial_locker_month: 30.0,
            electricity_per_drop_box_month: 20.0,

            student_subscribers: 500.0,
            yearly_sub_fee: 150.0,
            deliveries_per_month: 2000.0,
            price_per_delivery: 3.50,
            courier_cost_per_delivery: 1.50,
            p2p_transfers_per_month: 300.0,
            price_per_transfer: 8.0,
            courier_cost_per_transfer: 4.50,

            subscriber_growth_rate: 3.0,
            delivery_growth_rate: 5.0,
            p2p_growth_rate: 4.0,

            rent_inflation_rate: 3.0,
            salary_inflation_rate: 3.0,
            general_inflation_rate: 2.0,

            software_license_month: 2000.0,
            insurance_month: 1500.0,
            num_staff: 3,
            avg_salary_per_staff: 3500.0,

            discount_rate: 10.0,
            tax_rate: 25.0,
            depreciation_years: 7,
            working_capital_percent: 5.0,

            financing_type: FinancingType::Equity,
            loan_amount: 0.0,
            loan_interest_rate: 7.0,
            loan_term_years: 5,
        }
    }
}

impl AssumptionSet {
    /// Every numeric field zeroed, financing reset to equity, label empty.
    /// Matches the input layer's "clear all fields" operation.
    pub fn cleared() -> Self {
        Self {
            company_name: String::new(),

            num_student_lockers: 0,
            compartments_per_student_locker: 0,
            num_commercial_lockers: 0,
            compartments_per_commercial_locker: 0,
            num_drop_boxes: 0,
            compartments_per_drop_box: 0,

            student_locker_cost_per_unit: 0.0,
            installation_per_student_locker: 0.0,
            commercial_locker_cost_per_unit: 0.0,
            installation_per_commercial_locker: 0.0,
            drop_box_cost_per_unit: 0.0,
            installation_per_drop_box: 0.0,

            rent_per_student_locker_month: 0.0,
            rent_per_commercial_locker_month: 0.0,
            rent_per_drop_box_month: 0.0,
            maintenance_per_student_locker_month: 0.0,
            maintenance_per_commercial_locker_month: 0.0,
            maintenance_per_drop_box_month: 0.0,
            electricity_per_student_locker_month: 0.0,
            electricity_per_commercial_locker_month: 0.0,
            electricity_per_drop_box_month: 0.0,

            student_subscribers: 0.0,
            yearly_sub_fee: 0.0,
            deliveries_per_month: 0.0,
            price_per_delivery: 0.0,
            courier_cost_per_delivery: 0.0,
            p2p_transfers_per_month: 0.0,
            price_per_transfer: 0.0,
            courier_cost_per_transfer: 0.0,

            subscriber_growth_rate: 0.0,
            delivery_growth_rate: 0.0,
            p2p_growth_rate: 0.0,

            rent_inflation_rate: 0.0,
            salary_inflation_rate: 0.0,
            general_inflation_rate: 0.0,

            software_license_month: 0.0,
            insurance_month: 0.0,
            num_staff: 0,
            avg_salary_per_staff: 0.0,

            discount_rate: 0.0,
            tax_rate: 0.0,
            depreciation_years: 0,
            working_capital_percent: 0.0,

            financing_type: FinancingType::Equity,
            loan_amount: 0.0,
            loan_interest_rate: 0.0,
            loan_term_years: 0,
        }
    }

    /// Reject negative monetary and volume fields.
    ///
    /// Counts are unsigned so only the float fields need checking. Growth
    /// and inflation rates may be negative (shrinking volumes, deflation).
    pub fn validate(&self) -> Result<(), AssumptionError> {
        let non_negative: [(&'static str, f64); 28] = [
            ("studentLockerCostPerUnit", self.student_locker_cost_per_unit),
            ("installationPerStudentLocker", self.installation_per_student_locker),
            ("commercialLockerCostPerUnit", self.commercial_locker_cost_per_unit),
            ("installationPerCommercialLocker", self.installation_per_commercial_locker),
            ("dropBoxCostPerUnit", self.drop_box_cost_per_unit),
            ("installationPerDropBox", self.installation_per_drop_box),
            ("rentPerStudentLockerMonth", self.rent_per_student_locker_month),
            ("rentPerCommercialLockerMonth", self.rent_per_commercial_locker_month),
            ("rentPerDropBoxMonth", self.rent_per_drop_box_month),
            ("maintenancePerStudentLockerMonth", self.maintenance_per_student_locker_month),
            ("maintenancePerCommercialLockerMonth", self.maintenance_per_commercial_locker_month),
            ("maintenancePerDropBoxMonth", self.maintenance_per_drop_box_month),
            ("electricityPerStudentLockerMonth", self.electricity_per_student_locker_month),
            ("electricityPerCommercialLockerMonth", self.electricity_per_commercial_locker_month),
            ("electricityPerDropBoxMonth", self.electricity_per_drop_box_month),
            ("studentSubscribers", self.student_subscribers),
            ("yearlySubFee", self.yearly_sub_fee),
            ("deliveriesPerMonth", self.deliveries_per_month),
            ("pricePerDelivery", self.price_per_delivery),
            ("courierCostPerDelivery", self.courier_cost_per_delivery),
            ("p2pTransfersPerMonth", self.p2p_transfers_per_month),
            ("pricePerTransfer", self.price_per_transfer),
            ("courierCostPerTransfer", self.courier_cost_per_transfer),
            ("softwareLicenseMonth", self.software_license_month),
            ("insuranceMonth", self.insurance_month),
            ("avgSalaryPerStaff", self.avg_salary_per_staff),
            ("workingCapitalPercent", self.working_capital_percent),
            ("loanAmount", self.loan_amount),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(AssumptionError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Total monthly rent across all three facility classes.
    pub fn total_monthly_rent(&self) -> f64 {
        self.num_student_lockers as f64 * self.rent_per_student_locker_month
            + self.num_commercial_lockers as f64 * self.rent_per_commercial_locker_month
            + self.num_drop_boxes as f64 * self.rent_per_drop_box_month
    }

    /// Total monthly maintenance across all three facility classes.
    pub fn total_monthly_maintenance(&self) -> f64 {
        self.num_student_lockers as f64 * self.maintenance_per_student_locker_month
            + self.num_commercial_lockers as f64 * self.maintenance_per_commercial_locker_month
            + self.num_drop_boxes as f64 * self.maintenance_per_drop_box_month
    }

    /// Total monthly electricity across all three facility classes.
    pub fn total_monthly_electricity(&self) -> f64 {
        self.num_student_lockers as f64 * self.electricity_per_student_locker_month
            + self.num_commercial_lockers as f64 * self.electricity_per_commercial_locker_month
            + self.num_drop_boxes as f64 * self.electricity_per_drop_box_month
    }

    /// Monthly payroll (head count times average salary).
    pub fn monthly_staff_cost(&self) -> f64 {
        self.num_staff as f64 * self.avg_salary_per_staff
    }

    /// Monthly software license plus insurance.
    pub fn monthly_overhead(&self) -> f64 {
        self.software_license_month + self.insurance_month
    }

    /// All fixed monthly operating costs: rent, maintenance, electricity,
    /// staff, and overhead. Excludes volume-driven courier costs.
    pub fn fixed_monthly_cost(&self) -> f64 {
        self.total_monthly_rent()
            + self.total_monthly_maintenance()
            + self.total_monthly_electricity()
            + self.monthly_staff_cost()
            + self.monthly_overhead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_defaults() {
        let inputs = AssumptionSet::default();
        assert_eq!(inputs.num_student_lockers, 30);
        assert_eq!(inputs.financing_type, FinancingType::Equity);
        assert_eq!(inputs.loan_amount, 0.0);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_cleared_zeroes_everything() {
        let inputs = AssumptionSet::cleared();
        assert_eq!(inputs.company_name, "");
        assert_eq!(inputs.financing_type, FinancingType::Equity);
        assert_eq!(inputs.num_student_lockers, 0);
        assert_eq!(inputs.deliveries_per_month, 0.0);
        assert_eq!(inputs.fixed_monthly_cost(), 0.0);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_negative_field_rejected() {
        let mut inputs = AssumptionSet::default();
        inputs.price_per_delivery = -1.0;
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_fixed_monthly_cost_breakdown() {
        let inputs = AssumptionSet::default();
        // 30*200 + 20*200 + 20*150
        assert_eq!(inputs.total_monthly_rent(), 13_000.0);
        // 30*150 + 20*150 + 20*75
        assert_eq!(inputs.total_monthly_maintenance(), 9_000.0);
        // 30*30 + 20*30 + 20*20
        assert_eq!(inputs.total_monthly_electricity(), 1_900.0);
        assert_eq!(inputs.monthly_staff_cost(), 10_500.0);
        assert_eq!(inputs.monthly_overhead(), 3_500.0);
        assert_eq!(inputs.fixed_monthly_cost(), 37_900.0);
    }

    #[test]
    fn test_financing_type_serde_tags() {
        assert_eq!(serde_json::to_string(&FinancingType::Equity).unwrap(), "\"equity\"");
        assert_eq!(serde_json::to_string(&FinancingType::Loan).unwrap(), "\"loan\"");
    }
}
