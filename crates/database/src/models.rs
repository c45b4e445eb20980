//! Database models for the workshop

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A service technician
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Technician {
    #[sqlx(rename = "technician_ID")]
    pub technician_id: String,
    #[sqlx(rename = "Fname")]
    pub first_name: String,
    #[sqlx(rename = "Name")]
    pub last_name: String,
    #[sqlx(rename = "Trained_For")]
    pub trained_for: Option<String>,
    #[sqlx(rename = "Specialization")]
    pub specialization: Option<String>,
    #[sqlx(rename = "YOE")]
    pub years_of_experience: i64,
}

/// Technician identity only, as returned by the part lookup
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TechnicianRef {
    #[sqlx(rename = "technician_ID")]
    pub technician_id: String,
    #[sqlx(rename = "Fname")]
    pub first_name: String,
    #[sqlx(rename = "Name")]
    pub last_name: String,
}

/// A customer representative
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerRep {
    #[sqlx(rename = "Employee_ID")]
    pub employee_id: String,
    #[sqlx(rename = "Name")]
    pub name: String,
    #[sqlx(rename = "Phone_Number")]
    pub phone_number: Option<i64>,
    #[sqlx(rename = "YOE")]
    pub years_of_experience: i64,
}

/// Customer as listed for representatives and shown on login
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    #[sqlx(rename = "Customer_ID")]
    pub customer_id: String,
    #[sqlx(rename = "Name")]
    pub name: String,
    #[sqlx(rename = "email_ID")]
    pub email: Option<String>,
    #[sqlx(rename = "Phone_no")]
    pub phone: Option<String>,
}

/// A registered vehicle
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    #[sqlx(rename = "Reg_No")]
    pub reg_no: String,
    #[sqlx(rename = "Make")]
    pub make: String,
    #[sqlx(rename = "Model")]
    pub model: String,
    #[sqlx(rename = "Year")]
    pub year: Option<i64>,
    #[sqlx(rename = "Body_type")]
    pub body_type: Option<String>,
    #[sqlx(rename = "Chassis_No")]
    pub chassis_no: String,
}

/// A service job as seen by its customer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceRecord {
    #[sqlx(rename = "Service_ID")]
    pub service_id: i64,
    #[sqlx(rename = "Reg_No")]
    pub reg_no: String,
    #[sqlx(rename = "Make")]
    pub make: String,
    #[sqlx(rename = "Model")]
    pub model: String,
    #[sqlx(rename = "Description")]
    pub description: Option<String>,
    #[sqlx(rename = "Start_Date")]
    pub start_date: String,
    #[sqlx(rename = "Predicted_End_date")]
    pub predicted_end_date: Option<String>,
    #[sqlx(rename = "Predicted_Cost")]
    pub predicted_cost: Option<i64>,
}

/// A job assigned to a technician
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TechnicianJob {
    #[sqlx(rename = "Service_ID")]
    pub service_id: i64,
    #[sqlx(rename = "Reg_No")]
    pub reg_no: String,
    #[sqlx(rename = "Make")]
    pub make: String,
    #[sqlx(rename = "Model")]
    pub model: String,
    #[sqlx(rename = "Service_type")]
    pub service_type: Option<String>,
    #[sqlx(rename = "Start_Date")]
    pub start_date: String,
    #[sqlx(rename = "Predicted_End_date")]
    pub predicted_end_date: Option<String>,
    #[sqlx(rename = "Predicted_Cost")]
    pub predicted_cost: Option<i64>,
}

/// Everything a technician needs about one job
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobDetails {
    #[sqlx(rename = "Service_ID")]
    pub service_id: i64,
    #[sqlx(rename = "Reg_No")]
    pub reg_no: String,
    #[sqlx(rename = "Make")]
    pub make: String,
    #[sqlx(rename = "Model")]
    pub model: String,
    #[sqlx(rename = "Year")]
    pub year: Option<i64>,
    #[sqlx(rename = "Chassis_No")]
    pub chassis_no: String,
    #[sqlx(rename = "Body_type")]
    pub body_type: Option<String>,
    #[sqlx(rename = "Service_type")]
    pub service_type: Option<String>,
    #[sqlx(rename = "Description")]
    pub description: Option<String>,
    #[sqlx(rename = "Start_Date")]
    pub start_date: String,
    #[sqlx(rename = "Predicted_End_date")]
    pub predicted_end_date: Option<String>,
    #[sqlx(rename = "Predicted_Cost")]
    pub predicted_cost: Option<i64>,
    #[sqlx(rename = "Customer_ID")]
    pub customer_id: String,
    #[sqlx(rename = "Customer_Name")]
    pub customer_name: String,
    #[sqlx(rename = "Phone_no")]
    pub customer_phone: Option<String>,
    #[sqlx(rename = "email_ID")]
    pub customer_email: Option<String>,
    #[sqlx(rename = "Total_Parts_Cost")]
    pub total_parts_cost: i64,
}

/// A complaint recorded against a job
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Complaint {
    #[sqlx(rename = "Complaints")]
    pub complaint: String,
    #[sqlx(rename = "Fixed")]
    pub fixed: Option<String>,
}

/// A part line on a job, with its extended total
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PartLine {
    #[sqlx(rename = "Part_No")]
    pub part_no: String,
    #[sqlx(rename = "Quantity")]
    pub quantity: i64,
    #[sqlx(rename = "Price")]
    pub price: i64,
    #[sqlx(rename = "Total")]
    pub total: i64,
}

/// Input for adding a technician
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTechnician {
    pub technician_id: String,
    pub first_name: String,
    pub last_name: String,
    pub trained_for: String,
    pub specialization: String,
    pub years_of_experience: i64,
}

/// Input for adding a customer representative
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCustomerRep {
    pub employee_id: String,
    pub name: String,
    pub phone_number: i64,
    pub years_of_experience: i64,
}

/// Input for registering a customer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_no: String,
    pub age: i64,
    /// Registering representative; `None` for self-registration
    pub registered_by: Option<String>,
}

/// Input for registering a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewVehicle {
    pub reg_no: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub chassis_no: String,
    pub body_type: String,
    pub customer_id: String,
    /// Registering representative; `None` for self-registration
    pub registered_by: Option<String>,
}

/// Input for opening a service job
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewServiceJob {
    pub service_id: i64,
    pub reg_no: String,
    pub service_type: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub predicted_end_date: NaiveDate,
    pub predicted_cost: i64,
    pub created_by: String,
}

/// One part used on a job
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPart {
    pub part_no: String,
    pub quantity: i64,
    pub price: i64,
}
