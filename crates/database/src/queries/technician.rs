//! Workshop-floor queries: assigned jobs, complaints and parts

use crate::executor::Value;
use crate::models::*;
use crate::schema::Database;
use crate::{DatabaseError, Result};
use tracing::{info, warn};

impl Database {
    // ==================== Jobs ====================

    /// Get all jobs assigned to a technician, newest first
    pub async fn jobs_for_technician(&self, technician_id: &str) -> Result<Vec<TechnicianJob>> {
        self.fetch_as(
            "SELECT sj.Service_ID, sj.Reg_No, v.Make, v.Model, sj.Service_type,
                    CAST(sj.Start_Date AS CHAR) AS Start_Date,
                    CAST(sj.Predicted_End_date AS CHAR) AS Predicted_End_date,
                    sj.Predicted_Cost
             FROM Service_Job sj
             JOIN Done_By db ON sj.Service_ID = db.JobID
             JOIN vehicle v ON sj.Reg_No = v.Reg_No
             WHERE db.TechID = ?
             ORDER BY sj.Start_Date DESC",
            &[technician_id.into()],
        )
        .await
    }

    /// Get a job with its vehicle, owner and parts total
    pub async fn job_details(&self, service_id: i64) -> Result<JobDetails> {
        self.fetch_as::<JobDetails>(
            "SELECT sj.Service_ID, sj.Reg_No, v.Make, v.Model, v.Year, v.Chassis_No, v.Body_type,
                    sj.Service_type, sj.Description,
                    CAST(sj.Start_Date AS CHAR) AS Start_Date,
                    CAST(sj.Predicted_End_date AS CHAR) AS Predicted_End_date,
                    sj.Predicted_Cost,
                    c.Customer_ID, c.Name AS Customer_Name, c.Phone_no, c.email_ID,
                    CAST(COALESCE((
                        SELECT SUM(p.Quantity * p.Price)
                        FROM parts p
                        WHERE p.JobID = sj.Service_ID
                    ), 0) AS SIGNED) AS Total_Parts_Cost
             FROM Service_Job sj
             JOIN vehicle v ON sj.Reg_No = v.Reg_No
             JOIN customers c ON v.CustomerID = c.Customer_ID
             WHERE sj.Service_ID = ?",
            &[Value::from(service_id)],
        )
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::NotFound(format!("Service job: {}", service_id)))
    }

    // ==================== Complaints ====================

    /// Record an open complaint against a job
    pub async fn add_complaint(&self, service_id: i64, complaint: &str) -> Result<()> {
        self.write(
            "INSERT INTO complaints (JobID, Complaints, Fixed) VALUES (?, ?, NULL)",
            &[Value::from(service_id), complaint.into()],
        )
        .await?;

        info!(service_id, "Complaint recorded");
        Ok(())
    }

    /// Get all complaints for a job
    pub async fn complaints_for_job(&self, service_id: i64) -> Result<Vec<Complaint>> {
        self.fetch_as(
            "SELECT Complaints, Fixed FROM complaints WHERE JobID = ?",
            &[Value::from(service_id)],
        )
        .await
    }

    // ==================== Parts ====================

    /// Add parts used on a job, one insert per part.
    ///
    /// Stops at the first failing part; parts inserted before it remain.
    pub async fn add_parts(&self, service_id: i64, parts: &[NewPart]) -> Result<usize> {
        for (inserted, part) in parts.iter().enumerate() {
            let result = self
                .write(
                    "INSERT INTO parts (JobID, Part_No, Quantity, Price) VALUES (?, ?, ?, ?)",
                    &[
                        Value::from(service_id),
                        Value::from(&part.part_no),
                        Value::from(part.quantity),
                        Value::from(part.price),
                    ],
                )
                .await;

            if let Err(e) = result {
                warn!(service_id, inserted, part_no = %part.part_no, "Stopped adding parts");
                return Err(e);
            }
        }

        info!(service_id, count = parts.len(), "Parts added");
        Ok(parts.len())
    }

    /// Get all parts for a job with per-line totals
    pub async fn parts_for_job(&self, service_id: i64) -> Result<Vec<PartLine>> {
        self.fetch_as(
            "SELECT Part_No, Quantity, Price, CAST(Quantity * Price AS SIGNED) AS Total
             FROM parts
             WHERE JobID = ?
             ORDER BY Part_No",
            &[Value::from(service_id)],
        )
        .await
    }

    /// Total cost of all parts on a job, zero when there are none
    pub async fn total_parts_cost(&self, service_id: i64) -> Result<i64> {
        let rows: Vec<(i64,)> = self
            .fetch_as(
                "SELECT CAST(COALESCE(SUM(Quantity * Price), 0) AS SIGNED) AS Total_Cost
                 FROM parts
                 WHERE JobID = ?",
                &[Value::from(service_id)],
            )
            .await?;

        Ok(rows.first().map_or(0, |(total,)| *total))
    }
}
