use std::env;

use crate::generator::common::load_logo_data_uri;

/// Fallback identity applied when a raw record leaves the matching field
/// blank. Injected into normalization so the computation engine itself
/// carries no hard-coded business identity.
#[derive(Debug, Clone)]
pub struct PayslipDefaults {
    pub company_name: String,
    pub company_address: String,
    pub employee_number: String,
}

impl Default for PayslipDefaults {
    fn default() -> Self {
        Self {
            company_name: "BRIDGEOCEAN LIMITED".to_string(),
            company_address: "Ajah, Lagos".to_string(),
            employee_number: "EMP-0001".to_string(),
        }
    }
}

impl PayslipDefaults {
    /// Read overrides from the environment, keeping the documented
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            company_name: env::var("PAYSLIP_COMPANY_NAME").unwrap_or(base.company_name),
            company_address: env::var("PAYSLIP_COMPANY_ADDRESS").unwrap_or(base.company_address),
            employee_number: env::var("PAYSLIP_EMPLOYEE_NUMBER").unwrap_or(base.employee_number),
        }
    }
}

/// Shared application state: the injected defaults plus the logo data
/// URI, loaded once at startup.
pub struct AppState {
    pub defaults: PayslipDefaults,
    pub logo: Option<String>,
}

impl AppState {
    pub fn from_env() -> Self {
        let logo = load_logo_data_uri();
        if logo.is_none() {
            log::info!("No logo found; payslips will render without one");
        }
        Self {
            defaults: PayslipDefaults::from_env(),
            logo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_documented_values() {
        let defaults = PayslipDefaults::default();
        assert_eq!(defaults.company_name, "BRIDGEOCEAN LIMITED");
        assert_eq!(defaults.company_address, "Ajah, Lagos");
        assert_eq!(defaults.employee_number, "EMP-0001");
    }
}
