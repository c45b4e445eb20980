//! Staff administration queries

use crate::executor::Value;
use crate::models::*;
use crate::schema::Database;
use crate::Result;
use tracing::info;

impl Database {
    // ==================== Technicians ====================

    /// Add a new service technician
    pub async fn add_technician(&self, tech: &NewTechnician) -> Result<()> {
        self.write(
            "INSERT INTO service_technician
             (technician_ID, Fname, Name, Trained_For, Specialization, YOE)
             VALUES (?, ?, ?, ?, ?, ?)",
            &[
                Value::from(&tech.technician_id),
                Value::from(&tech.first_name),
                Value::from(&tech.last_name),
                Value::from(&tech.trained_for),
                Value::from(&tech.specialization),
                Value::from(tech.years_of_experience),
            ],
        )
        .await?;

        info!(technician_id = %tech.technician_id, "Technician added");
        Ok(())
    }

    /// Get all service technicians
    pub async fn list_technicians(&self) -> Result<Vec<Technician>> {
        self.fetch_as(
            "SELECT technician_ID, Fname, Name, Trained_For, Specialization, YOE
             FROM service_technician
             ORDER BY Fname, Name",
            &[],
        )
        .await
    }

    /// Delete a technician, returning how many rows went away.
    ///
    /// An unknown id deletes nothing and still succeeds.
    pub async fn delete_technician(&self, technician_id: &str) -> Result<u64> {
        let removed = self
            .write(
                "DELETE FROM service_technician WHERE technician_ID = ?",
                &[technician_id.into()],
            )
            .await?;

        info!(technician_id, removed, "Technician delete");
        Ok(removed)
    }

    /// Technicians who worked on any job that used the given part
    pub async fn technicians_by_part(&self, part_no: &str) -> Result<Vec<TechnicianRef>> {
        self.fetch_as(
            "SELECT st.technician_ID, st.Fname, st.Name
             FROM service_technician st
             WHERE st.technician_ID IN (
                 SELECT db.TechID
                 FROM Done_By db
                 WHERE db.JobID IN (
                     SELECT p.JobID
                     FROM parts p
                     WHERE p.Part_No = ?
                 )
             )
             ORDER BY st.technician_ID",
            &[part_no.into()],
        )
        .await
    }

    // ==================== Customer Representatives ====================

    /// Add a new customer representative
    pub async fn add_customer_rep(&self, rep: &NewCustomerRep) -> Result<()> {
        self.write(
            "INSERT INTO customer_reps (Employee_ID, Name, Phone_Number, YOE)
             VALUES (?, ?, ?, ?)",
            &[
                Value::from(&rep.employee_id),
                Value::from(&rep.name),
                Value::from(rep.phone_number),
                Value::from(rep.years_of_experience),
            ],
        )
        .await?;

        info!(employee_id = %rep.employee_id, "Customer representative added");
        Ok(())
    }

    /// Get all customer representatives
    pub async fn list_customer_reps(&self) -> Result<Vec<CustomerRep>> {
        self.fetch_as(
            "SELECT Employee_ID, Name, Phone_Number, YOE
             FROM customer_reps
             ORDER BY Name",
            &[],
        )
        .await
    }

    /// Delete a customer representative, returning how many rows went away
    pub async fn delete_customer_rep(&self, employee_id: &str) -> Result<u64> {
        let removed = self
            .write(
                "DELETE FROM customer_reps WHERE Employee_ID = ?",
                &[employee_id.into()],
            )
            .await?;

        info!(employee_id, removed, "Customer representative delete");
        Ok(removed)
    }
}
