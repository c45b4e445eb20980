//! Front-desk queries: registrations, jobs and assignments

use crate::executor::Value;
use crate::models::*;
use crate::schema::Database;
use crate::Result;
use tracing::{info, warn};

impl Database {
    /// Register a customer. `First_Joined` is stamped by the database.
    pub async fn register_customer(&self, customer: &NewCustomer) -> Result<()> {
        self.write(
            "INSERT INTO customers
             (Customer_ID, Name, email_ID, Phone_no, license_No, Age, First_Joined, empID)
             VALUES (?, ?, ?, ?, ?, ?, CURRENT_DATE, ?)",
            &[
                Value::from(&customer.customer_id),
                Value::from(&customer.name),
                Value::from(&customer.email),
                Value::from(&customer.phone),
                Value::from(&customer.license_no),
                Value::from(customer.age),
                Value::from(customer.registered_by.as_deref()),
            ],
        )
        .await?;

        info!(customer_id = %customer.customer_id, "Customer registered");
        Ok(())
    }

    /// Register a vehicle for an existing customer
    pub async fn register_vehicle(&self, vehicle: &NewVehicle) -> Result<()> {
        self.write(
            "INSERT INTO vehicle
             (Reg_No, Make, Model, Year, Chassis_No, Body_type, CustomerID, EmpID)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            &[
                Value::from(&vehicle.reg_no),
                Value::from(&vehicle.make),
                Value::from(&vehicle.model),
                Value::from(vehicle.year),
                Value::from(&vehicle.chassis_no),
                Value::from(&vehicle.body_type),
                Value::from(&vehicle.customer_id),
                Value::from(vehicle.registered_by.as_deref()),
            ],
        )
        .await?;

        info!(reg_no = %vehicle.reg_no, customer_id = %vehicle.customer_id, "Vehicle registered");
        Ok(())
    }

    /// Open a service job and link it to its vehicle.
    ///
    /// The link is a second, independent statement: if it fails the job
    /// itself stays recorded and the error is returned.
    pub async fn create_service_job(&self, job: &NewServiceJob) -> Result<()> {
        self.write(
            "INSERT INTO Service_Job
             (Service_ID, Start_Date, Reg_No, Service_type, Description,
              Predicted_End_date, Predicted_Cost, EmpID)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            &[
                Value::from(job.service_id),
                Value::from(job.start_date.format("%Y-%m-%d").to_string()),
                Value::from(&job.reg_no),
                Value::from(&job.service_type),
                Value::from(&job.description),
                Value::from(job.predicted_end_date.format("%Y-%m-%d").to_string()),
                Value::from(job.predicted_cost),
                Value::from(&job.created_by),
            ],
        )
        .await?;

        if let Err(e) = self
            .write(
                "INSERT INTO needs (RegNum, JobID) VALUES (?, ?)",
                &[Value::from(&job.reg_no), Value::from(job.service_id)],
            )
            .await
        {
            warn!(service_id = job.service_id, "Job created but vehicle link failed: {}", e);
            return Err(e);
        }

        info!(service_id = job.service_id, reg_no = %job.reg_no, "Service job created");
        Ok(())
    }

    /// Put a technician on a job, recording who made the assignment when known
    pub async fn assign_technician(
        &self,
        service_id: i64,
        technician_id: &str,
        assigned_by: Option<&str>,
    ) -> Result<()> {
        self.write(
            "INSERT INTO Done_By (JobID, TechID) VALUES (?, ?)",
            &[Value::from(service_id), technician_id.into()],
        )
        .await?;

        if let Some(employee_id) = assigned_by {
            self.write(
                "INSERT INTO assigns (JobID, EmpID, TechID) VALUES (?, ?, ?)",
                &[Value::from(service_id), employee_id.into(), technician_id.into()],
            )
            .await?;
        }

        info!(service_id, technician_id, "Technician assigned");
        Ok(())
    }

    /// Get all registered customers
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.fetch_as(
            "SELECT Customer_ID, Name, email_ID, Phone_no
             FROM customers
             ORDER BY Customer_ID",
            &[],
        )
        .await
    }
}
