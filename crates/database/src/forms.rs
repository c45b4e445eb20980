//! Input validation for raw form fields.
//!
//! Runs before any statement is issued, so a rejected form never reaches
//! the database and its errors stay separate from [`crate::DatabaseError`].

use crate::models::{NewCustomer, NewCustomerRep, NewPart, NewServiceJob, NewTechnician, NewVehicle};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required: {0} is empty")]
    Missing(&'static str),

    #[error("{0} must be a valid number")]
    NotANumber(&'static str),

    #[error("{0} must be non-negative")]
    Negative(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} is too large")]
    OutOfRange(&'static str),

    #[error("{0} must be a date in YYYY-MM-DD format")]
    InvalidDate(&'static str),

    #[error("Part line {line} is malformed, expected PartNo:Quantity:Price")]
    MalformedPart { line: usize },

    #[error("Please enter at least one part")]
    NoParts,
}

pub type Result<T> = std::result::Result<T, ValidationError>;

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

fn number(field: &'static str, value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(field))
}

// Largest value an INT column holds
const INT_MAX: i64 = i32::MAX as i64;

fn int_column(field: &'static str, value: &str) -> Result<i64> {
    let n = number(field, value)?;
    if n > INT_MAX || n < -INT_MAX - 1 {
        return Err(ValidationError::OutOfRange(field));
    }
    Ok(n)
}

fn non_negative(field: &'static str, value: &str) -> Result<i64> {
    let n = int_column(field, value)?;
    if n < 0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(n)
}

fn date(field: &'static str, value: &str) -> Result<NaiveDate> {
    let trimmed = required(field, value)?;
    NaiveDate::parse_from_str(&trimmed, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(field))
}

fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse a service job id
pub fn service_id(value: &str) -> Result<i64> {
    int_column("Service ID", value)
}

#[derive(Debug, Clone, Default)]
pub struct TechnicianForm {
    pub technician_id: String,
    pub first_name: String,
    pub last_name: String,
    pub trained_for: String,
    pub specialization: String,
    pub years_of_experience: String,
}

impl TechnicianForm {
    pub fn validate(&self) -> Result<NewTechnician> {
        Ok(NewTechnician {
            technician_id: required("Technician ID", &self.technician_id)?,
            first_name: required("First Name", &self.first_name)?,
            last_name: required("Last Name", &self.last_name)?,
            trained_for: required("Trained For", &self.trained_for)?,
            specialization: required("Specialization", &self.specialization)?,
            years_of_experience: non_negative("Years of Experience", &self.years_of_experience)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerRepForm {
    pub employee_id: String,
    pub name: String,
    pub phone_number: String,
    pub years_of_experience: String,
}

impl CustomerRepForm {
    pub fn validate(&self) -> Result<NewCustomerRep> {
        Ok(NewCustomerRep {
            employee_id: required("Employee ID", &self.employee_id)?,
            name: required("Name", &self.name)?,
            phone_number: number("Phone", &self.phone_number)?,
            years_of_experience: non_negative("Years of Experience", &self.years_of_experience)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_no: String,
    pub age: String,
    pub registered_by: Option<String>,
}

impl CustomerForm {
    pub fn validate(&self) -> Result<NewCustomer> {
        Ok(NewCustomer {
            customer_id: required("Customer ID", &self.customer_id)?,
            name: required("Name", &self.name)?,
            email: required("Email", &self.email)?,
            phone: required("Phone", &self.phone)?,
            license_no: required("License No", &self.license_no)?,
            age: non_negative("Age", &self.age)?,
            registered_by: optional(self.registered_by.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct VehicleForm {
    pub reg_no: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub chassis_no: String,
    pub body_type: String,
    pub customer_id: String,
    pub registered_by: Option<String>,
}

impl VehicleForm {
    pub fn validate(&self) -> Result<NewVehicle> {
        Ok(NewVehicle {
            reg_no: required("Registration Number", &self.reg_no)?,
            make: required("Make", &self.make)?,
            model: required("Model", &self.model)?,
            year: non_negative("Year", &self.year)?,
            chassis_no: required("Chassis Number", &self.chassis_no)?,
            body_type: required("Body Type", &self.body_type)?,
            customer_id: required("Customer ID", &self.customer_id)?,
            registered_by: optional(self.registered_by.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceJobForm {
    pub service_id: String,
    pub reg_no: String,
    pub service_type: String,
    pub description: String,
    pub start_date: String,
    pub predicted_end_date: String,
    pub predicted_cost: String,
    pub created_by: String,
}

impl ServiceJobForm {
    pub fn validate(&self) -> Result<NewServiceJob> {
        Ok(NewServiceJob {
            service_id: service_id(&self.service_id)?,
            reg_no: required("Vehicle Reg_No", &self.reg_no)?,
            service_type: required("Service Type", &self.service_type)?,
            description: required("Description", &self.description)?,
            start_date: date("Start Date", &self.start_date)?,
            predicted_end_date: date("Predicted End Date", &self.predicted_end_date)?,
            predicted_cost: non_negative("Predicted Cost", &self.predicted_cost)?,
            created_by: required("EmpID", &self.created_by)?,
        })
    }
}

/// Parse `PartNo:Quantity:Price` lines, one part per non-blank line.
///
/// Prices may carry decimals; they are truncated to whole units.
pub fn parts(text: &str) -> Result<Vec<NewPart>> {
    let mut parsed = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = ValidationError::MalformedPart { line: idx + 1 };
        let fields: Vec<&str> = line.split(':').map(str::trim).collect();
        let [part_no, quantity, price] = fields.as_slice() else {
            return Err(malformed);
        };

        if part_no.is_empty() {
            return Err(malformed);
        }
        let quantity: i64 = quantity.parse().map_err(|_| malformed.clone())?;
        if quantity <= 0 {
            return Err(ValidationError::NotPositive("Quantity"));
        }
        if quantity > INT_MAX {
            return Err(ValidationError::OutOfRange("Quantity"));
        }
        let price: f64 = price.parse().map_err(|_| malformed.clone())?;
        if !price.is_finite() {
            return Err(malformed);
        }
        if price < 0.0 {
            return Err(ValidationError::Negative("Price"));
        }
        let price = price.trunc();
        if price > INT_MAX as f64 {
            return Err(ValidationError::OutOfRange("Price"));
        }

        parsed.push(NewPart {
            part_no: part_no.to_string(),
            quantity,
            price: price as i64,
        });
    }

    if parsed.is_empty() {
        return Err(ValidationError::NoParts);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technician_form() -> TechnicianForm {
        TechnicianForm {
            technician_id: "T010".into(),
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            trained_for: "Engine".into(),
            specialization: "Diesel".into(),
            years_of_experience: "5".into(),
        }
    }

    #[test]
    fn technician_fields_are_trimmed() {
        let mut form = technician_form();
        form.first_name = "  Asha ".into();
        let tech = form.validate().unwrap();
        assert_eq!(tech.first_name, "Asha");
        assert_eq!(tech.years_of_experience, 5);
    }

    #[test]
    fn technician_rejects_bad_experience() {
        let mut form = technician_form();
        form.years_of_experience = "five".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::NotANumber("Years of Experience"))
        );

        form.years_of_experience = "-1".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Negative("Years of Experience"))
        );
    }

    #[test]
    fn blank_field_is_missing() {
        let mut form = technician_form();
        form.specialization = "   ".into();
        assert_eq!(form.validate(), Err(ValidationError::Missing("Specialization")));
    }

    #[test]
    fn self_registration_has_no_employee() {
        let form = CustomerForm {
            customer_id: "C007".into(),
            name: "Nisha Menon".into(),
            email: "nisha@example.com".into(),
            phone: "9000000007".into(),
            license_no: "KL07000000000007".into(),
            age: "31".into(),
            registered_by: Some("  ".into()),
        };
        assert_eq!(form.validate().unwrap().registered_by, None);
    }

    #[test]
    fn job_dates_must_be_iso() {
        let form = ServiceJobForm {
            service_id: "7".into(),
            reg_no: "KL01AB1234".into(),
            service_type: "Oil Change".into(),
            description: "Routine".into(),
            start_date: "05/01/2024".into(),
            predicted_end_date: "2024-01-06".into(),
            predicted_cost: "2000".into(),
            created_by: "E001".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidDate("Start Date")));
    }

    #[test]
    fn service_id_must_be_numeric() {
        assert_eq!(service_id(" 12 "), Ok(12));
        assert_eq!(service_id("J12"), Err(ValidationError::NotANumber("Service ID")));
    }

    #[test]
    fn parses_part_lines() {
        let parts = parts("ABC123:2:150\n\n  P002 : 1 : 99.90 \n").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].part_no, "ABC123");
        assert_eq!(parts[0].quantity, 2);
        assert_eq!(parts[1].price, 99);
    }

    #[test]
    fn rejects_bad_part_lines() {
        assert_eq!(parts("ABC123:2"), Err(ValidationError::MalformedPart { line: 1 }));
        assert_eq!(
            parts("ABC123:2:150\nP2:x:10"),
            Err(ValidationError::MalformedPart { line: 2 })
        );
        assert_eq!(parts("P1:0:10"), Err(ValidationError::NotPositive("Quantity")));
        assert_eq!(parts(" \n "), Err(ValidationError::NoParts));
    }

    #[test]
    fn part_values_must_fit_an_int_column() {
        assert_eq!(parts("P1:1:1e30"), Err(ValidationError::OutOfRange("Price")));
        assert_eq!(parts("P1:2:9e18"), Err(ValidationError::OutOfRange("Price")));
        assert_eq!(
            parts("P1:3000000000:10"),
            Err(ValidationError::OutOfRange("Quantity"))
        );

        let max = parts("P1:2147483647:2147483647.9").unwrap();
        assert_eq!(max[0].quantity, i64::from(i32::MAX));
        assert_eq!(max[0].price, i64::from(i32::MAX));
    }

    #[test]
    fn numeric_fields_must_fit_an_int_column() {
        let mut form = technician_form();
        form.years_of_experience = "4294967296".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::OutOfRange("Years of Experience"))
        );
        assert_eq!(
            service_id("99999999999"),
            Err(ValidationError::OutOfRange("Service ID"))
        );
    }
}
