//! Customer self-service queries

use crate::models::*;
use crate::schema::Database;
use crate::Result;

impl Database {
    /// Look up a customer by id, the check behind customer login
    pub async fn find_customer(&self, customer_id: &str) -> Result<Option<Customer>> {
        let rows = self
            .fetch_as::<Customer>(
                "SELECT Customer_ID, Name, email_ID, Phone_no
                 FROM customers
                 WHERE Customer_ID = ?",
                &[customer_id.into()],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Get all vehicles registered to a customer
    pub async fn vehicles_for_customer(&self, customer_id: &str) -> Result<Vec<Vehicle>> {
        self.fetch_as(
            "SELECT Reg_No, Make, Model, Year, Body_type, Chassis_No
             FROM vehicle
             WHERE CustomerID = ?
             ORDER BY Reg_No",
            &[customer_id.into()],
        )
        .await
    }

    /// Get service jobs on a customer's vehicles, newest first
    pub async fn service_records_for_customer(&self, customer_id: &str) -> Result<Vec<ServiceRecord>> {
        self.fetch_as(
            "SELECT sj.Service_ID, sj.Reg_No, v.Make, v.Model, sj.Description,
                    CAST(sj.Start_Date AS CHAR) AS Start_Date,
                    CAST(sj.Predicted_End_date AS CHAR) AS Predicted_End_date,
                    sj.Predicted_Cost
             FROM Service_Job sj
             JOIN vehicle v ON sj.Reg_No = v.Reg_No
             WHERE v.CustomerID = ?
             ORDER BY sj.Start_Date DESC",
            &[customer_id.into()],
        )
        .await
    }
}
